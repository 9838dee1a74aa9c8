//! Command dispatch: load settings, replay the script, print views.

use std::fs;
use std::io;
use std::path::Path;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{run_script, NetworkSession, RunReport};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::{DomainError, TreeView, TreeViewConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Run { script, keep_going }) => {
            cmd_run(&settings, script, *keep_going || settings.keep_going)
        }
        Some(Commands::Graph { script, pretty }) => {
            cmd_graph(&settings, script, *pretty || settings.pretty_json)
        }
        Some(Commands::Tree { script, city, json }) => {
            let format = if *json {
                OutputFormat::Json
            } else {
                settings.output
            };
            cmd_tree(&settings, script, city.as_deref(), format)
        }
        Some(Commands::Stats { script }) => cmd_stats(&settings, script),
        Some(Commands::Neighbors { script, city }) => cmd_neighbors(&settings, script, city),
        Some(Commands::Config { command }) => cmd_config(&settings, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Reads `script` and replays it into a fresh session.
#[instrument(level = "debug", skip(settings))]
fn load_session(
    settings: &Settings,
    script: &Path,
    keep_going: bool,
) -> CliResult<(NetworkSession, RunReport)> {
    let source = fs::read_to_string(script)
        .map_err(|e| CliError::io(format!("read script {}", script.display()), e))?;
    let mut session = NetworkSession::new(settings.duplicate_cities);
    let report = run_script(&mut session, &source, keep_going)?;
    Ok((session, report))
}

fn cmd_run(settings: &Settings, script: &Path, keep_going: bool) -> CliResult<()> {
    let (session, report) = load_session(settings, script, keep_going)?;
    for failure in &report.failures {
        output::failure(&format!("line {}: {}", failure.line, failure.message));
    }
    let network = session.network();
    output::success(&format!(
        "applied {} actions: {} cities, {} connections",
        report.applied,
        network.len(),
        network.edge_count()
    ));
    if let Some(selected) = session.selected_city() {
        output::field("selected", selected);
    }
    if let Some(error) = session.last_error() {
        output::warning(&format!("last action failed: {error}"));
    }
    Ok(())
}

fn cmd_graph(settings: &Settings, script: &Path, pretty: bool) -> CliResult<()> {
    let (session, _) = load_session(settings, script, settings.keep_going)?;
    let view = session.network().to_graph_view();
    output::info(&to_json(&view, pretty)?);
    Ok(())
}

fn cmd_tree(
    settings: &Settings,
    script: &Path,
    city: Option<&str>,
    format: OutputFormat,
) -> CliResult<()> {
    let (session, _) = load_session(settings, script, settings.keep_going)?;
    let network = session.network();
    let views: Vec<TreeView> = match city {
        Some(name) => vec![network.zone_tree_view(name).map_err(app_err)?],
        None => network.cities().map(|c| c.to_tree_view()).collect(),
    };

    match format {
        OutputFormat::Json if city.is_some() => {
            output::info(&to_json(&views[0], settings.pretty_json)?)
        }
        OutputFormat::Json => output::info(&to_json(&views, settings.pretty_json)?),
        OutputFormat::Tree => {
            for view in &views {
                output::info(&view.to_tree_string());
            }
        }
    }
    Ok(())
}

fn cmd_stats(settings: &Settings, script: &Path) -> CliResult<()> {
    let (session, _) = load_session(settings, script, settings.keep_going)?;
    let network = session.network();
    if network.is_empty() {
        output::info("no cities");
        return Ok(());
    }
    for city in network.cities() {
        output::header(&city.name);
        output::field("zones", &city.total_green_zones());
        output::field("max height", &city.max_green_zone_height());
        output::field("leaf zones", &city.zones().filter(|z| z.is_leaf()).count());
        let neighbors = network.connected_cities(&city.name);
        let neighbors = if neighbors.is_empty() {
            "-".to_string()
        } else {
            neighbors.iter().join(", ")
        };
        output::field("neighbors", &neighbors);
    }
    Ok(())
}

fn cmd_neighbors(settings: &Settings, script: &Path, city: &str) -> CliResult<()> {
    let (session, _) = load_session(settings, script, settings.keep_going)?;
    for neighbor in session.network().connected_cities(city) {
        output::info(&neighbor);
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "exists" } else { "missing" };
                output::field("global", &format!("{} ({state})", path.display()));
            }
            None => output::warning("no config directory for this platform"),
        },
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no config directory for this platform".to_string())
            })?;
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
            }
            fs::write(&path, Settings::template())
                .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> CliResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    Ok(json.map_err(crate::application::ApplicationError::from)?)
}

fn app_err(e: DomainError) -> CliError {
    CliError::Application(e.into())
}
