//! Network ingestion from JSON files.
//!
//! Station identifiers are positions in the `stations` array.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Mode, NetworkError, StationId};

use super::Network;

/// Errors that can occur while loading a network file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the file failed
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid network document
    #[error("network JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A connection refers to an unknown station or has a bad weight
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),
}

/// A station as written in the network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A connection as written in the network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: StationId,
    pub to: StationId,
    pub mode: Mode,

    /// Walking connections usually have no line.
    #[serde(default = "default_line")]
    pub line: String,

    pub weight: f64,
}

fn default_line() -> String {
    "walk".to_string()
}

/// On-disk network document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    pub stations: Vec<StationRecord>,

    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl NetworkFile {
    /// Build a network with interfaces computed using `transfer_penalty`.
    pub fn into_network(self, transfer_penalty: f64) -> Result<Network, NetworkError> {
        let mut network = Network::new();

        for station in self.stations {
            network.add_station(station.name, station.x, station.y);
        }

        for c in self.connections {
            network.add_connection(c.from, c.to, c.mode, c.weight, c.line)?;
        }

        network.compute_interfaces_with(transfer_penalty);
        Ok(network)
    }
}

/// Parse a network document from a JSON string.
pub fn parse_network(json: &str, transfer_penalty: f64) -> Result<Network, LoadError> {
    let file: NetworkFile = serde_json::from_str(json)?;
    Ok(file.into_network(transfer_penalty)?)
}

/// Load a network document from disk.
pub fn load_network(path: impl AsRef<Path>, transfer_penalty: f64) -> Result<Network, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let network = parse_network(&contents, transfer_penalty)?;

    info!(
        path = %path.display(),
        stations = network.len(),
        connections = network.connection_count(),
        lines = network.lines().count(),
        "loaded network"
    );

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_TRANSFER_PENALTY;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "stations": [
            { "name": "Trindade", "x": 0, "y": 0 },
            { "name": "Bolhao", "x": 10, "y": 0 },
            { "name": "Marques", "x": 10, "y": 10 }
        ],
        "connections": [
            { "from": 0, "to": 1, "mode": "subway", "line": "A", "weight": 300 },
            { "from": 0, "to": 2, "mode": "bus", "line": "205", "weight": 400 },
            { "from": 1, "to": 2, "mode": "walk", "weight": 20 }
        ]
    }"#;

    #[test]
    fn parse_sample() {
        let network = parse_network(SAMPLE, DEFAULT_TRANSFER_PENALTY).unwrap();

        assert_eq!(network.len(), 3);
        assert_eq!(network.connection_count(), 3);
        assert_eq!(network.station(StationId(1)).unwrap().name(), "Bolhao");

        let walk = &network.station(StationId(1)).unwrap().connections()[0];
        assert_eq!(walk.mode, Mode::Walk);
        assert_eq!(walk.line, "walk");
    }

    #[test]
    fn interfaces_computed_on_load() {
        let network = parse_network(SAMPLE, 3.0).unwrap();

        // Trindade has subway and bus departures
        assert!(network.is_interface(StationId(0)));
        assert_eq!(network.station(StationId(0)).unwrap().transfer_penalty(), 3.0);
        assert!(!network.is_interface(StationId(1)));
    }

    #[test]
    fn unknown_station_is_rejected() {
        let json = r#"{
            "stations": [{ "name": "A", "x": 0, "y": 0 }],
            "connections": [{ "from": 0, "to": 3, "mode": "bus", "line": "1", "weight": 1 }]
        }"#;

        let err = parse_network(json, DEFAULT_TRANSFER_PENALTY).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Network(NetworkError::StationNotFound(StationId(3)))
        ));
    }

    #[test]
    fn unknown_mode_is_a_json_error() {
        let json = r#"{
            "stations": [{ "name": "A", "x": 0, "y": 0 }, { "name": "B", "x": 0, "y": 0 }],
            "connections": [{ "from": 0, "to": 1, "mode": "tram", "line": "1", "weight": 1 }]
        }"#;

        let err = parse_network(json, DEFAULT_TRANSFER_PENALTY).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn connections_are_optional() {
        let json = r#"{ "stations": [{ "name": "A", "x": 1, "y": 2 }] }"#;
        let network = parse_network(json, DEFAULT_TRANSFER_PENALTY).unwrap();

        assert_eq!(network.len(), 1);
        assert_eq!(network.connection_count(), 0);
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let network = load_network(&path, DEFAULT_TRANSFER_PENALTY).unwrap();
        assert_eq!(network.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_network("/nonexistent/network.json", DEFAULT_TRANSFER_PENALTY).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn file_roundtrip_through_records() {
        let file = NetworkFile {
            stations: vec![
                StationRecord {
                    name: "A".to_string(),
                    x: 0.0,
                    y: 0.0,
                },
                StationRecord {
                    name: "B".to_string(),
                    x: 1.0,
                    y: 0.0,
                },
            ],
            connections: vec![ConnectionRecord {
                from: StationId(0),
                to: StationId(1),
                mode: Mode::Bus,
                line: "7".to_string(),
                weight: 12.0,
            }],
        };

        let json = serde_json::to_string(&file).unwrap();
        let network = parse_network(&json, DEFAULT_TRANSFER_PENALTY).unwrap();
        assert_eq!(network.connection_count(), 1);
        assert_eq!(network.lines().collect::<Vec<_>>(), vec!["7"]);
    }
}
