//! Domain error types.
//!
//! These errors represent invalid identifiers and malformed connections
//! in the network model. They are distinct from IO and search errors.

use super::StationId;

/// Errors raised while building or querying the network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// Identifier outside the dense `[0, N)` range
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// Connection weight is negative, infinite or NaN
    #[error("invalid weight {weight} on connection {from} -> {to}")]
    InvalidWeight {
        from: StationId,
        to: StationId,
        weight: f64,
    },
}
