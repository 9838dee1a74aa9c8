//! CLI-level errors (wraps application errors)

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                crate::exitcode::NOINPUT
            }
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_)
                | ApplicationError::Script { .. }
                | ApplicationError::Action { .. } => crate::exitcode::DATAERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Serialize(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_errors_when_mapping_then_uses_sysexits_codes() {
        let missing = CliError::io("read script", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let denied = CliError::io(
            "read script",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(denied.exit_code(), crate::exitcode::IOERR);

        let action = CliError::from(ApplicationError::Action {
            line: 3,
            source: DomainError::CityNotFound("Ghost".into()),
        });
        assert_eq!(action.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(action.to_string(), "script line 3: city not found: Ghost");

        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);

        let usage = CliError::Usage("no command given".into());
        assert_eq!(usage.exit_code(), crate::exitcode::USAGE);
    }
}
