//! CLI error types and exit codes.
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | Request failed (empty intent, mismatch)  |
//! | 2    | Configuration or artifact problem        |

use intent_oracle_core::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    Success = 0,
    Failure = 1,
    Setup = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

/// Map an error to the exit code reported to the shell.
pub fn exit_code_for_error(err: &CliError) -> CliExitCode {
    match err {
        CliError::Oracle(e) if e.is_setup_error() => CliExitCode::Setup,
        CliError::InvalidArgument(_) => CliExitCode::Setup,
        _ => CliExitCode::Failure,
    }
}
