//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::App(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::App(e) => match e {
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Io { source, .. } => {
                    if source.kind() == std::io::ErrorKind::NotFound {
                        exitcode::NOINPUT
                    } else {
                        exitcode::IOERR
                    }
                }
                ApplicationError::Domain(d) => match d {
                    DomainError::Parse(_)
                    | DomainError::Validation(_)
                    | DomainError::Mutation(_) => exitcode::DATAERR,
                    DomainError::CorruptPath => exitcode::SOFTWARE,
                },
            },
        }
    }
}
