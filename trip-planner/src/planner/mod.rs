//! Path planner over a multimodal transit network.
//!
//! This module implements the shortest-path searches that answer:
//! "how do I get from this station to that one?" under five criteria
//! (fastest, no walking, bounded transfers, cheapest, A*).
//!
//! Every search runs on a per-query `SearchState`, leaving the network
//! untouched, and is driven by a decrease-key priority queue.

mod config;
mod path;
mod queue;
mod search;
mod state;

pub use config::SearchConfig;
pub use path::{Instruction, Itinerary, Path, PathStep};
pub use queue::{DecreaseKeyQueue, QueueOrder};
pub use search::{Criterion, Planner, SearchError, SearchOutcome};
pub use state::{Label, SearchState, Signature};
