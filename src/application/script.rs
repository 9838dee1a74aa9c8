//! Line-oriented action scripts.
//!
//! One action per line; blank lines and `#` comments are skipped. Names may be
//! double-quoted to contain spaces.
//!
//! ```text
//! city add Paris
//! city remove Paris
//! connect Paris Lyon
//! disconnect Paris Lyon
//! zone add Paris "Jardin du Luxembourg"
//! zone add Paris Fontaine under "Jardin du Luxembourg"
//! zone rename Paris Fontaine "Fontaine Medicis"
//! select Paris
//! select
//! clear-error
//! ```

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::application::action::Action;
use crate::application::session::NetworkSession;
use crate::application::{ApplicationError, ApplicationResult};

/// An action together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub action: Action,
}

/// A failed action recorded while running with `keep_going`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    pub line: usize,
    pub message: String,
}

/// Outcome of [`run_script`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub applied: usize,
    pub failures: Vec<ScriptFailure>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses script text into actions.
pub struct ScriptParser {
    token_regex: Regex,
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptParser {
    pub fn new() -> Self {
        Self {
            token_regex: Regex::new(r#""([^"]*)"|(\S+)"#).expect("static token regex"),
        }
    }

    /// Parses every line; the first malformed line aborts with its line number.
    #[instrument(level = "debug", skip_all)]
    pub fn parse(&self, source: &str) -> ApplicationResult<Vec<ScriptLine>> {
        let mut lines = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let tokens = self
                .tokenize(trimmed)
                .map_err(|message| ApplicationError::Script { line, message })?;
            let action =
                parse_action(&tokens).map_err(|message| ApplicationError::Script { line, message })?;
            lines.push(ScriptLine { line, action });
        }
        debug!("parsed {} actions", lines.len());
        Ok(lines)
    }

    fn tokenize(&self, line: &str) -> Result<Vec<String>, String> {
        let mut tokens = Vec::new();
        for caps in self.token_regex.captures_iter(line) {
            if let Some(quoted) = caps.get(1) {
                tokens.push(quoted.as_str().to_string());
            } else if let Some(bare) = caps.get(2) {
                if bare.as_str().contains('"') {
                    return Err(format!("unbalanced quote in {}", bare.as_str()));
                }
                tokens.push(bare.as_str().to_string());
            }
        }
        Ok(tokens)
    }
}

fn parse_action(tokens: &[String]) -> Result<Action, String> {
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
    let action = match words.as_slice() {
        ["city", "add", name] => Action::AddCity(name.to_string()),
        ["city", "remove", name] => Action::RemoveCity(name.to_string()),
        ["connect", a, b] => Action::ConnectCities {
            a: a.to_string(),
            b: b.to_string(),
        },
        ["disconnect", a, b] => Action::DisconnectCities {
            a: a.to_string(),
            b: b.to_string(),
        },
        ["zone", "add", city, zone] => Action::AddGreenZone {
            city: city.to_string(),
            zone: zone.to_string(),
            parent: None,
        },
        ["zone", "add", city, zone, "under", parent] => Action::AddGreenZone {
            city: city.to_string(),
            zone: zone.to_string(),
            parent: Some(parent.to_string()),
        },
        ["zone", "rename", city, old_name, new_name] => Action::RenameZone {
            city: city.to_string(),
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        },
        ["select"] => Action::SelectCity(None),
        ["select", name] => Action::SelectCity(Some(name.to_string())),
        ["clear-error"] => Action::ClearError,
        [] => return Err("empty command".to_string()),
        [verb, ..] => return Err(format!("cannot parse command: {} ...", verb)),
    };
    Ok(action)
}

/// Parses `source` and applies it to `session`.
///
/// Parsing completes before anything is applied, so a syntax error leaves the
/// session untouched. Without `keep_going` the first failing action aborts the
/// run; earlier actions stay applied.
#[instrument(level = "debug", skip(session, source))]
pub fn run_script(
    session: &mut NetworkSession,
    source: &str,
    keep_going: bool,
) -> ApplicationResult<RunReport> {
    let lines = ScriptParser::new().parse(source)?;
    let mut report = RunReport::default();

    for ScriptLine { line, action } in lines {
        match session.apply(action) {
            Ok(()) => report.applied += 1,
            Err(ApplicationError::Domain(source)) if !keep_going => {
                return Err(ApplicationError::Action { line, source });
            }
            Err(e) => report.failures.push(ScriptFailure {
                line,
                message: e.to_string(),
            }),
        }
    }
    info!(
        applied = report.applied,
        failed = report.failures.len(),
        "script finished"
    );
    Ok(report)
}
