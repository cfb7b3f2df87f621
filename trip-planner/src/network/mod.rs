//! The transit network.
//!
//! A `Network` is an arena of stations addressed by dense `StationId`s.
//! It is populated once (usually by the loader), then `compute_interfaces`
//! marks multimodal stations, and from then on it is only read. Searches
//! never mutate it, so one network can serve any number of queries,
//! including concurrent ones.

mod loader;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::domain::{
    Connection, DEFAULT_TRANSFER_PENALTY, Mode, NetworkError, Station, StationId,
};

pub use loader::{ConnectionRecord, LoadError, NetworkFile, StationRecord, load_network, parse_network};

/// Stations, their outgoing connections, and the line index.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,

    /// Line identifier -> stations served by that line (non-walk only).
    lines: BTreeMap<String, BTreeSet<StationId>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station and return its identifier.
    pub fn add_station(&mut self, name: impl Into<String>, x: f64, y: f64) -> StationId {
        let id = StationId(self.stations.len());
        self.stations.push(Station::new(id, name, x, y));
        id
    }

    /// Add a directed connection from `from` to `to`.
    ///
    /// Non-walk connections also register both endpoints under `line`.
    pub fn add_connection(
        &mut self,
        from: StationId,
        to: StationId,
        mode: Mode,
        weight: f64,
        line: impl Into<String>,
    ) -> Result<(), NetworkError> {
        self.station(from)?;
        self.station(to)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(NetworkError::InvalidWeight { from, to, weight });
        }

        let line = line.into();
        if !mode.is_walk() {
            let served = self.lines.entry(line.clone()).or_default();
            served.insert(from);
            served.insert(to);
        }

        self.station_mut(from)?.push_connection(Connection {
            to,
            mode,
            line,
            weight,
        });
        Ok(())
    }

    /// Look up a station by identifier.
    pub fn station(&self, id: StationId) -> Result<&Station, NetworkError> {
        self.stations
            .get(id.index())
            .ok_or(NetworkError::StationNotFound(id))
    }

    fn station_mut(&mut self, id: StationId) -> Result<&mut Station, NetworkError> {
        self.stations
            .get_mut(id.index())
            .ok_or(NetworkError::StationNotFound(id))
    }

    /// Mark interface stations with the default transfer penalty.
    pub fn compute_interfaces(&mut self) -> usize {
        self.compute_interfaces_with(DEFAULT_TRANSFER_PENALTY)
    }

    /// Mark every station with outgoing connections of more than one
    /// distinct non-walk mode as an interface carrying `penalty`.
    ///
    /// All other stations are reset to no penalty. Returns the number of
    /// interface stations.
    pub fn compute_interfaces_with(&mut self, penalty: f64) -> usize {
        let mut interfaces = 0;
        for station in &mut self.stations {
            let modes: HashSet<Mode> = station
                .connections()
                .iter()
                .filter(|c| !c.is_walk())
                .map(|c| c.mode)
                .collect();

            if modes.len() > 1 {
                station.set_transfer_penalty(penalty);
                interfaces += 1;
            } else {
                station.set_transfer_penalty(0.0);
            }
        }

        debug!(interfaces, penalty, "computed interface stations");
        interfaces
    }

    /// Whether the station carries a transfer penalty.
    pub fn is_interface(&self, id: StationId) -> bool {
        self.station(id)
            .map(|s| s.transfer_penalty() > 0.0)
            .unwrap_or(false)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Total number of connections across all stations.
    pub fn connection_count(&self) -> usize {
        self.stations.iter().map(|s| s.connections().len()).sum()
    }

    /// Line identifiers known to the network, in sorted order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    /// Stations served by a line, or `None` for an unknown line.
    pub fn stations_on_line(&self, line: &str) -> Option<&BTreeSet<StationId>> {
        self.lines.get(line)
    }
}
