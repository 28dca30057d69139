use thiserror::Error;

/// Errors produced by the core. Filtering itself never fails; only raw
/// input normalization and month parsing do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid month '{0}': expected YYYY-MM with month 01-12")]
    InvalidMonth(String),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
}
