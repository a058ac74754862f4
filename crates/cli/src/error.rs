//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.

use switchboard_config::ConfigError;
use switchboard_config::types::UnknownModule;

/// Structured exit codes for switchboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A dotenv file is malformed or unreadable.
    ///
    /// Fix the named file and line, or set DOTENV_DISABLED=1.
    DotenvError = 2,

    /// A required variable is unset and has no default.
    MissingConfig = 3,

    /// A value could not be cast, or its encoding is invalid.
    InvalidValue = 4,

    /// A cast value failed a validator.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Parse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown { .. } => ExitCode::DotenvError,

            ConfigError::MissingRequiredConfig(_) => ExitCode::MissingConfig,

            ConfigError::InvalidConfigValue { .. } | ConfigError::InvalidEncoding { .. } => {
                ExitCode::InvalidValue
            }

            ConfigError::Validation { .. } => ExitCode::ValidationError,

            // A broken built-in schema is a bug, not an operator mistake.
            ConfigError::Schema(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if cause.downcast_ref::<UnknownModule>().is_some() {
                return ExitCode::InvalidValue;
            }
        }

        ExitCode::GeneralError
    }
}
