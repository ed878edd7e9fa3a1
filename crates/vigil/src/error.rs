//! CLI error types with miette diagnostics.
//!
//! Maps `EngineError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vigil_core::EngineError;

/// Exit codes for process termination. Success is 0 and clap owns
/// usage errors (2); everything here maps a `CliError`.
pub mod exit_code {
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const INVALID_STATUS: i32 = 5;
    pub const INTERNAL: i32 = 70;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Site #{site_id} not found")]
    #[diagnostic(
        code(vigil::not_found),
        help("Run: vigil sites list to see the fleet.")
    )]
    NotFound { site_id: u32 },

    #[error("Invalid status: '{value}'")]
    #[diagnostic(
        code(vigil::invalid_status),
        help("Valid statuses: guarded, not_guarded, emergency, alarm, suspended")
    )]
    InvalidStatus { value: String },

    #[error(transparent)]
    #[diagnostic(
        code(vigil::config),
        help("Check the config file or regenerate it with: vigil config init")
    )]
    Config(#[from] vigil_config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidStatus { .. } => exit_code::INVALID_STATUS,
            Self::Config(_) => exit_code::CONFIG,
            Self::Io(_) => exit_code::INTERNAL,
        }
    }
}

// ── EngineError → CliError mapping ───────────────────────────────────

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::SiteNotFound { id } => Self::NotFound { site_id: id },
            EngineError::InvalidStatus { value } => Self::InvalidStatus { value },
        }
    }
}
