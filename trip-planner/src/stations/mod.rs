//! Station lookup by name.
//!
//! Resolves free-text station names to identifiers, tolerating typos:
//! substring matches first, then edit distance on the whole name, then
//! edit distance on individual name tokens.

mod error;
mod index;

pub use error::LookupError;
pub use index::{StationIndex, StationMatch};
