//! Label-setting path search.
//!
//! All five criteria share one skeleton: extract the cheapest station from
//! a decrease-key queue, relax its outgoing connections, and commit every
//! candidate that strictly improves the destination station's primary
//! metric. The criteria differ only in which metric orders the queue,
//! which connections are rejected, and whether the search stops once the
//! destination is extracted.

use std::fmt;

use tracing::debug;

use crate::domain::{Connection, FASTEST_TIME_MULTIPLIER, NetworkError, Station, StationId};
use crate::network::Network;

use super::path::Path;
use super::queue::{DecreaseKeyQueue, QueueOrder};
use super::state::{Label, SearchState, Signature};

/// Error from path search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Source, destination or path target is not in the network
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// Extraction from an empty queue (internal invariant violation)
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Decrease-key on a station that is not queued (internal invariant violation)
    #[error("station {0} is not queued")]
    NotQueued(StationId),

    /// Invalid search parameters
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

impl From<NetworkError> for SearchError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::StationNotFound(id) => SearchError::StationNotFound(id),
            other => SearchError::InvalidRequest(other.to_string()),
        }
    }
}

/// The quantity a search optimizes, with its constraint if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Minimum travel time.
    Fastest,

    /// Minimum travel time never using walking connections.
    NoWalk,

    /// Minimum travel time with at most this many transfers.
    MaxTransfers(u32),

    /// Minimum fare walking at most `walk_budget` time units.
    Cheapest { walk_budget: f64 },

    /// Minimum travel time, A* guided by straight-line distance.
    Heuristic,
}

impl Criterion {
    /// Label field ordering the queue.
    pub fn order(&self) -> QueueOrder {
        match self {
            Criterion::Cheapest { .. } => QueueOrder::ByFare,
            Criterion::Heuristic => QueueOrder::ByEstimate,
            _ => QueueOrder::ByTime,
        }
    }

    /// Whether extracting the destination ends the search.
    ///
    /// Fare searches drain the queue: flat fares per boarding make the
    /// first extraction of the destination no guarantee of optimality.
    pub fn stops_at_destination(&self) -> bool {
        !matches!(self, Criterion::Cheapest { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Fastest => "fastest",
            Criterion::NoWalk => "no_walk",
            Criterion::MaxTransfers(_) => "max_transfers",
            Criterion::Cheapest { .. } => "cheapest",
            Criterion::Heuristic => "heuristic",
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        if let Criterion::Cheapest { walk_budget } = self {
            if walk_budget.is_nan() || *walk_budget < 0.0 {
                return Err(SearchError::InvalidRequest(format!(
                    "walking budget must be non-negative, got {walk_budget}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::MaxTransfers(max) => write!(f, "{} ({max})", self.name()),
            Criterion::Cheapest { walk_budget } => write!(f, "{} (walk <= {walk_budget})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Values a relaxation would commit to the destination label.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    time: f64,
    fare: f64,
    walked: f64,
    transfers: i32,
}

impl Candidate {
    fn improves(&self, label: &Label, order: QueueOrder) -> bool {
        match order {
            // The estimate of a fixed station differs from its time by a constant
            QueueOrder::ByTime | QueueOrder::ByEstimate => self.time < label.time,
            QueueOrder::ByFare => self.fare < label.fare,
        }
    }
}

/// Straight-line lower bound on the remaining travel time.
struct Heuristic<'a> {
    target: &'a Station,
}

impl Heuristic<'_> {
    fn estimate(&self, station: &Station) -> f64 {
        FASTEST_TIME_MULTIPLIER * station.distance_to(self.target)
    }
}

/// Result of a search: the finished labels of every station.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    network: &'a Network,
    state: SearchState,
    source: StationId,
    destination: StationId,
    criterion: Criterion,
    settled: usize,
}

impl<'a> SearchOutcome<'a> {
    pub fn source(&self) -> StationId {
        self.source
    }

    pub fn destination(&self) -> StationId {
        self.destination
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Number of queue extractions the search performed.
    pub fn settled(&self) -> usize {
        self.settled
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Label of any station.
    pub fn label(&self, station: StationId) -> Option<&Label> {
        self.state.label(station)
    }

    /// Label of the destination.
    pub fn destination_label(&self) -> &Label {
        &self.state.labels[self.destination.index()]
    }

    /// Whether the destination was reached.
    ///
    /// An unreachable destination is a normal result: its label simply has
    /// no predecessor.
    pub fn is_reachable(&self) -> bool {
        self.is_reachable_at(self.destination)
    }

    fn is_reachable_at(&self, station: StationId) -> bool {
        station == self.source
            || self
                .state
                .label(station)
                .is_some_and(|l| l.predecessor.is_some())
    }

    /// Accumulated time at the destination, if reachable.
    pub fn total_time(&self) -> Option<f64> {
        self.is_reachable().then(|| self.destination_label().time)
    }

    /// Accumulated fare at the destination, if reachable.
    pub fn total_fare(&self) -> Option<f64> {
        self.is_reachable().then(|| self.destination_label().fare)
    }

    /// Path from the source to the destination.
    pub fn path(&self) -> Path<'_> {
        Path::new(self.network, &self.state, self.source, self.destination)
    }

    /// Path from the source to any station.
    ///
    /// Fare searches drain the queue, so their labels describe the cheapest
    /// route to every station reachable within the walking budget.
    pub fn path_to(&self, station: StationId) -> Result<Path<'_>, SearchError> {
        self.network.station(station)?;
        Ok(Path::new(self.network, &self.state, self.source, station))
    }
}

/// Path planner over an immutable network.
///
/// Each search builds its own `SearchState`, so one planner (or many
/// planners sharing a network) can serve queries in any order or
/// concurrently.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    network: &'a Network,
}

impl<'a> Planner<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// Minimum travel time.
    pub fn fastest(
        &self,
        source: StationId,
        destination: StationId,
    ) -> Result<SearchOutcome<'a>, SearchError> {
        self.find_path(source, destination, Criterion::Fastest)
    }

    /// Minimum travel time without walking connections.
    pub fn fastest_without_walking(
        &self,
        source: StationId,
        destination: StationId,
    ) -> Result<SearchOutcome<'a>, SearchError> {
        self.find_path(source, destination, Criterion::NoWalk)
    }

    /// Minimum travel time with at most `max_transfers` transfers.
    pub fn fastest_with_max_transfers(
        &self,
        source: StationId,
        destination: StationId,
        max_transfers: u32,
    ) -> Result<SearchOutcome<'a>, SearchError> {
        self.find_path(source, destination, Criterion::MaxTransfers(max_transfers))
    }

    /// Minimum fare walking at most `walk_budget` time units.
    pub fn cheapest(
        &self,
        source: StationId,
        destination: StationId,
        walk_budget: f64,
    ) -> Result<SearchOutcome<'a>, SearchError> {
        self.find_path(source, destination, Criterion::Cheapest { walk_budget })
    }

    /// Minimum travel time using A*.
    pub fn heuristic(
        &self,
        source: StationId,
        destination: StationId,
    ) -> Result<SearchOutcome<'a>, SearchError> {
        self.find_path(source, destination, Criterion::Heuristic)
    }

    /// Run one search.
    pub fn find_path(
        &self,
        source: StationId,
        destination: StationId,
        criterion: Criterion,
    ) -> Result<SearchOutcome<'a>, SearchError> {
        criterion.validate()?;
        self.network.station(source)?;
        let target = self.network.station(destination)?;

        let heuristic = match criterion {
            Criterion::Heuristic => Some(Heuristic { target }),
            _ => None,
        };

        let station_count = self.network.len();
        let mut state = match criterion {
            Criterion::Cheapest { .. } => SearchState::for_fare(station_count, source),
            _ => SearchState::for_time(station_count, source),
        };

        if let Some(h) = &heuristic {
            let origin = self.network.station(source)?;
            state.label_mut(source).estimate = h.estimate(origin);
        }

        let order = criterion.order();
        let mut queue = DecreaseKeyQueue::new(order);
        queue.insert(source, &mut state);
        state.label_mut(source).reached = true;

        let mut settled = 0;
        while !queue.is_empty() {
            let v = queue.extract_min(&mut state)?;
            settled += 1;

            if v == destination && criterion.stops_at_destination() {
                break;
            }

            let station = self.network.station(v)?;
            for connection in station.connections() {
                let w = connection.to;
                let from = &state.labels[v.index()];

                let Some(candidate) = relax(criterion, from, station, connection) else {
                    continue;
                };

                if !candidate.improves(&state.labels[w.index()], order) {
                    continue;
                }

                let estimate = match &heuristic {
                    Some(h) => candidate.time + h.estimate(self.network.station(w)?),
                    None => candidate.time,
                };

                let label = state.label_mut(w);
                label.time = candidate.time;
                label.estimate = estimate;
                label.fare = candidate.fare;
                label.walked = candidate.walked;
                label.transfers = candidate.transfers;
                label.predecessor = Some(v);
                label.boarded = Signature::Boarded(connection.boarding());
                label.reached = true;

                if label.is_queued() {
                    queue.decrease_key(w, &mut state)?;
                } else {
                    queue.insert(w, &mut state);
                }
            }
        }

        let outcome = SearchOutcome {
            network: self.network,
            state,
            source,
            destination,
            criterion,
            settled,
        };

        debug!(
            criterion = %criterion,
            source = %source,
            destination = %destination,
            settled,
            reachable = outcome.is_reachable(),
            "search finished"
        );

        Ok(outcome)
    }
}

/// Candidate label for `connection.to` when reached from `from` at
/// `station`, or `None` if the criterion rejects the connection.
fn relax(
    criterion: Criterion,
    from: &Label,
    station: &Station,
    connection: &Connection,
) -> Option<Candidate> {
    if criterion == Criterion::NoWalk && connection.is_walk() {
        return None;
    }

    let boarding = !from.boarded.rides(connection);

    let mut time = from.time + connection.time_cost();
    if from.boarded.switches_mode(connection.mode) {
        time += station.transfer_penalty();
    }

    let fare = if boarding {
        from.fare + connection.fare()
    } else {
        from.fare
    };

    let walked = if connection.is_walk() {
        from.walked + connection.time_cost()
    } else {
        from.walked
    };

    let transfers = if boarding && !connection.is_walk() {
        from.transfers + 1
    } else {
        from.transfers
    };

    match criterion {
        Criterion::MaxTransfers(max) if i64::from(transfers) > i64::from(max) => None,
        Criterion::Cheapest { walk_budget } if walked > walk_budget => None,
        _ => Some(Candidate {
            time,
            fare,
            walked,
            transfers,
        }),
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
