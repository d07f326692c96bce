use thiserror::Error;

/// Errors raised while building a route table
///
/// Dispatching never fails: an unmatched request is the ordinary
/// [`Dispatch::NotFound`](crate::Dispatch::NotFound) outcome.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The pattern expanded into an expression the regex engine rejected
    /// (unbalanced brackets, invalid or duplicate parameter names, ...)
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration content that cannot be turned into routes
    #[error("invalid router configuration: {0}")]
    Config(String),
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;
