//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Mode, Station, StationId};
use crate::network::Network;
use crate::planner::{Criterion, SearchConfig, SearchOutcome};
use crate::stations::StationMatch;

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Free-text query
    pub q: String,

    /// Maximum number of results (defaults to the configured limit)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub id: usize,
    pub name: String,

    /// Edit distance from the query
    pub distance: usize,
}

impl From<StationMatch> for StationSearchResult {
    fn from(m: StationMatch) -> Self {
        Self {
            id: m.id.index(),
            name: m.name,
            distance: m.distance,
        }
    }
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Size of the loaded network.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NetworkSummary {
    pub stations: usize,
    pub connections: usize,
    pub lines: usize,

    /// Stations where more than one non-walk mode departs
    pub interfaces: usize,
}

impl NetworkSummary {
    pub fn from_network(network: &Network) -> Self {
        Self {
            stations: network.len(),
            connections: network.connection_count(),
            lines: network.lines().count(),
            interfaces: network
                .stations()
                .filter(|s| network.is_interface(s.id()))
                .count(),
        }
    }
}

/// Optimization criterion as named in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionName {
    #[default]
    Fastest,
    NoWalk,
    MaxTransfers,
    Cheapest,
    Heuristic,
}

/// A station given either by identifier or by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StationRef {
    Id(usize),
    Name(String),
}

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origin: StationRef,
    pub destination: StationRef,

    #[serde(default)]
    pub criterion: CriterionName,

    /// Transfer bound for `max_transfers`
    pub max_transfers: Option<u32>,

    /// Walking budget (time units) for `cheapest`
    pub walk_budget: Option<f64>,
}

impl RouteRequest {
    /// Search criterion, with missing parameters taken from `config`.
    pub fn criterion(&self, config: &SearchConfig) -> Criterion {
        match self.criterion {
            CriterionName::Fastest => Criterion::Fastest,
            CriterionName::NoWalk => Criterion::NoWalk,
            CriterionName::MaxTransfers => config.max_transfers_criterion(self.max_transfers),
            CriterionName::Cheapest => config.cheapest_criterion(self.walk_budget),
            CriterionName::Heuristic => Criterion::Heuristic,
        }
    }
}

/// Station information for display.
#[derive(Debug, Serialize, PartialEq)]
pub struct StationInfo {
    pub id: usize,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl StationInfo {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id().index(),
            name: station.name().to_string(),
            x: station.x(),
            y: station.y(),
        }
    }
}

/// One connection travelled.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: StationInfo,
    pub to: StationInfo,
    pub mode: Mode,
    pub line: String,

    /// Accumulated time on arrival
    pub time: f64,

    /// Accumulated fare on arrival
    pub fare: f64,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub criterion: String,
    pub reachable: bool,

    /// Stations from origin to destination
    pub stations: Vec<StationInfo>,

    /// Legs from origin to destination
    pub legs: Vec<LegResult>,

    /// Human-readable directions
    pub instructions: Vec<String>,

    pub total_time: f64,
    pub total_fare: f64,
    pub walked_time: f64,

    /// Number of vehicles boarded
    pub boardings: usize,
}

impl RouteResponse {
    /// Create from a finished search.
    pub fn from_outcome(network: &Network, outcome: &SearchOutcome<'_>) -> Self {
        let path = outcome.path();
        let itinerary = path.itinerary();

        let info = |id: StationId| network.station(id).ok().map(StationInfo::from_station);

        let stations = if itinerary.reachable {
            path.station_ids().into_iter().filter_map(info).collect()
        } else {
            Vec::new()
        };

        let legs = if itinerary.reachable {
            path.detailed_path()
                .into_iter()
                .rev()
                .filter_map(|step| {
                    let boarding = step.boarding?;
                    Some(LegResult {
                        from: info(step.predecessor?)?,
                        to: info(step.station)?,
                        mode: boarding.mode,
                        line: boarding.line,
                        time: step.time,
                        fare: step.fare,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut instructions: Vec<String> = itinerary
            .instructions
            .iter()
            .map(ToString::to_string)
            .collect();
        if !itinerary.reachable {
            instructions.push(itinerary.to_string());
        }

        Self {
            criterion: outcome.criterion().to_string(),
            reachable: itinerary.reachable,
            stations,
            legs,
            instructions,
            total_time: itinerary.total_time,
            total_fare: itinerary.total_fare,
            walked_time: itinerary.walked_time,
            boardings: itinerary.boardings,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
