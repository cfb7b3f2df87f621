//! Cost model for connections.
//!
//! Maps a connection's mode and raw weight to a travel time, a flat fare
//! and a boarding signature. Everything here is pure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Time multiplier applied to subway weights.
pub const SUBWAY_TIME_MULTIPLIER: f64 = 0.02;

/// Time multiplier applied to bus weights.
pub const BUS_TIME_MULTIPLIER: f64 = 0.025;

/// Time multiplier applied to walking weights.
pub const WALK_TIME_MULTIPLIER: f64 = 0.1;

/// Flat fare charged when boarding a bus line.
pub const BUS_FARE: f64 = 1.20;

/// Flat fare charged when boarding a subway line.
pub const SUBWAY_FARE: f64 = 1.70;

/// Walking is free.
pub const WALK_FARE: f64 = 0.0;

/// Penalty (time units) for switching modes at an interface station.
pub const DEFAULT_TRANSFER_PENALTY: f64 = 5.0;

/// Multiplier of the fastest mode, used to scale straight-line distance
/// into a lower bound on travel time.
pub const FASTEST_TIME_MULTIPLIER: f64 = SUBWAY_TIME_MULTIPLIER;

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0}")]
pub struct InvalidMode(String);

/// Transport mode of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Bus,
    Subway,
    Walk,
}

impl Mode {
    /// Time units per unit of raw weight.
    pub fn time_multiplier(self) -> f64 {
        match self {
            Mode::Bus => BUS_TIME_MULTIPLIER,
            Mode::Subway => SUBWAY_TIME_MULTIPLIER,
            Mode::Walk => WALK_TIME_MULTIPLIER,
        }
    }

    /// Flat fare charged once per boarding event on this mode.
    pub fn fare(self) -> f64 {
        match self {
            Mode::Bus => BUS_FARE,
            Mode::Subway => SUBWAY_FARE,
            Mode::Walk => WALK_FARE,
        }
    }

    pub fn is_walk(self) -> bool {
        self == Mode::Walk
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Bus => "bus",
            Mode::Subway => "subway",
            Mode::Walk => "walk",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bus" => Ok(Mode::Bus),
            "subway" => Ok(Mode::Subway),
            "walk" => Ok(Mode::Walk),
            _ => Err(InvalidMode(s.to_string())),
        }
    }
}

/// Travel time of a connection with the given mode and raw weight.
pub fn time_cost(mode: Mode, weight: f64) -> f64 {
    weight * mode.time_multiplier()
}

/// Fare charged when boarding a connection of the given mode.
pub fn fare(mode: Mode) -> f64 {
    mode.fare()
}

/// The (mode, line) pair a traveller is riding.
///
/// Two consecutive connections with equal boardings are one ride; any
/// difference is a boarding event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boarding {
    pub mode: Mode,
    pub line: String,
}

impl Boarding {
    pub fn new(mode: Mode, line: impl Into<String>) -> Self {
        Self {
            mode,
            line: line.into(),
        }
    }
}

impl fmt::Display for Boarding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mode, self.line)
    }
}
