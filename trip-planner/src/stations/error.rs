//! Station lookup error types.

/// Errors that can occur when resolving a station from user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// Query was empty after trimming
    #[error("station query is empty")]
    EmptyQuery,

    /// No station name came close to the query
    #[error("no station matches '{0}'")]
    NotFound(String),

    /// Several stations match and none exactly
    #[error("'{query}' is ambiguous: {}", candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
}
