//! Stations and the connections leaving them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cost::{self, Boarding, Mode};

/// Dense station identifier.
///
/// Identifiers are assigned in insertion order, so a network with `N`
/// stations uses exactly `0..N` and the value doubles as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub usize);

impl StationId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed connection owned by its source station.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Destination station.
    pub to: StationId,

    /// Transport mode.
    pub mode: Mode,

    /// Line identifier (e.g. "205", "A").
    pub line: String,

    /// Raw weight; minutes or distance units depending on the mode.
    pub weight: f64,
}

impl Connection {
    /// Travel time along this connection.
    pub fn time_cost(&self) -> f64 {
        cost::time_cost(self.mode, self.weight)
    }

    /// Fare charged if travelling this connection is a boarding event.
    pub fn fare(&self) -> f64 {
        cost::fare(self.mode)
    }

    /// The (mode, line) signature of this connection.
    pub fn boarding(&self) -> Boarding {
        Boarding::new(self.mode, self.line.clone())
    }

    /// Whether this connection rides the given (mode, line).
    pub fn rides(&self, boarding: &Boarding) -> bool {
        self.mode == boarding.mode && self.line == boarding.line
    }

    pub fn is_walk(&self) -> bool {
        self.mode.is_walk()
    }
}

/// A station in the network.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: String,
    x: f64,
    y: f64,
    transfer_penalty: f64,
    connections: Vec<Connection>,
}

impl Station {
    pub(crate) fn new(id: StationId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
            transfer_penalty: 0.0,
            connections: Vec::new(),
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Time penalty for switching modes here (0 unless an interface).
    pub fn transfer_penalty(&self) -> f64 {
        self.transfer_penalty
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Straight-line planar distance to another station.
    pub fn distance_to(&self, other: &Station) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub(crate) fn set_transfer_penalty(&mut self, penalty: f64) {
        self.transfer_penalty = penalty;
    }

    pub(crate) fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }
}
