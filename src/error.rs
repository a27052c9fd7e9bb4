//! Huginn error types

/// Huginn error types
#[derive(Debug, thiserror::Error)]
pub enum HuginnError {
    /// Raised at cache construction time for a malformed capacity.
    ///
    /// Cache misses, empty registries, zero-capacity caches and
    /// deregistering an absent handle are all normal outcomes, not errors.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, HuginnError>;
