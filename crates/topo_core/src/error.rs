use thiserror::Error;

/// Errors raised at the engine's input boundary.
///
/// Per-frame geometry never produces these; it degrades to
/// [`Resolved::Fallback`](crate::types::Resolved) instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Unknown surface kind: {0}")]
    UnknownSurface(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
