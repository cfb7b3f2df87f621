//! Search configuration for the trip planner.

use crate::domain::DEFAULT_TRANSFER_PENALTY;

use super::search::Criterion;

/// Configuration parameters for path search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Time penalty for switching modes at an interface station.
    pub transfer_penalty: f64,

    /// Transfer bound used when a request does not give one.
    pub max_transfers: u32,

    /// Walking budget (time units) used when a request does not give one.
    pub walk_budget: f64,

    /// Maximum number of station lookup results.
    pub max_lookup_results: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_penalty: f64,
        max_transfers: u32,
        walk_budget: f64,
        max_lookup_results: usize,
    ) -> Self {
        Self {
            transfer_penalty,
            max_transfers,
            walk_budget,
            max_lookup_results,
        }
    }

    /// Transfer-bounded criterion, falling back to the configured bound.
    pub fn max_transfers_criterion(&self, max_transfers: Option<u32>) -> Criterion {
        Criterion::MaxTransfers(max_transfers.unwrap_or(self.max_transfers))
    }

    /// Fare criterion, falling back to the configured walking budget.
    pub fn cheapest_criterion(&self, walk_budget: Option<f64>) -> Criterion {
        Criterion::Cheapest {
            walk_budget: walk_budget.unwrap_or(self.walk_budget),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty: DEFAULT_TRANSFER_PENALTY,
            max_transfers: 2,
            walk_budget: 10.0,
            max_lookup_results: 10,
        }
    }
}
