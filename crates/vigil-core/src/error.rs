// ── Engine error type ──

use thiserror::Error;

/// Failures surfaced by engine operations.
///
/// Every variant is a reportable, caller-visible outcome; the engine has
/// no fatal error class. Journal overflow is not represented here at all
/// (capacity eviction is silent by contract).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The referenced site id is not in the registry.
    #[error("Site not found: {id}")]
    SiteNotFound { id: u32 },

    /// A status string outside the enumerated set, from a string-typed
    /// boundary such as CLI or config parsing.
    #[error("Invalid status: '{value}'")]
    InvalidStatus { value: String },
}
