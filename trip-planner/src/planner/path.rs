//! Path reconstruction and itinerary assembly.
//!
//! A `Path` walks predecessor links of a finished search from a target
//! station back to the source. It produces the plain list of station
//! names, the detailed destination-to-source step list, and an
//! `Itinerary` of boarding instructions for presentation.

use std::fmt;

use crate::domain::{Boarding, Mode, StationId};
use crate::network::Network;

use super::state::SearchState;

/// One leg of a reconstructed path: arriving at `station`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub station: StationId,
    pub name: String,

    /// Where the leg started; `None` only for an unreachable target.
    pub predecessor: Option<StationId>,
    pub predecessor_name: Option<String>,

    /// What was ridden on this leg.
    pub boarding: Option<Boarding>,

    /// Accumulated time on arrival.
    pub time: f64,

    /// Accumulated fare on arrival.
    pub fare: f64,

    /// Accumulated walking time on arrival.
    pub walked: f64,
}

/// Predecessor chain from a search source to a target station.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    network: &'a Network,
    state: &'a SearchState,
    source: StationId,
    target: StationId,
}

impl<'a> Path<'a> {
    pub(crate) fn new(
        network: &'a Network,
        state: &'a SearchState,
        source: StationId,
        target: StationId,
    ) -> Self {
        Self {
            network,
            state,
            source,
            target,
        }
    }

    pub fn source(&self) -> StationId {
        self.source
    }

    pub fn target(&self) -> StationId {
        self.target
    }

    /// Whether the target was reached by the search.
    pub fn is_reachable(&self) -> bool {
        self.target == self.source
            || self
                .state
                .label(self.target)
                .is_some_and(|l| l.predecessor.is_some())
    }

    /// Station identifiers from the target back to the start of the chain.
    ///
    /// The walk is bounded by the station count.
    fn chain(&self) -> Vec<StationId> {
        let mut chain = vec![self.target];
        let mut current = self.target;

        while chain.len() <= self.state.len() {
            match self.state.label(current).and_then(|l| l.predecessor) {
                Some(previous) => {
                    chain.push(previous);
                    current = previous;
                }
                None => break,
            }
        }

        chain
    }

    /// Station identifiers from source to target.
    ///
    /// For an unreachable target this is just the target.
    pub fn station_ids(&self) -> Vec<StationId> {
        let mut ids = self.chain();
        ids.reverse();
        ids
    }

    /// Station names from source to target.
    pub fn station_labels(&self) -> Vec<String> {
        self.station_ids()
            .into_iter()
            .map(|id| self.name(id))
            .collect()
    }

    /// Steps from the target back towards the source, one per leg.
    ///
    /// The source itself has no leg and is not included. An unreachable
    /// target yields a single step for the target with no predecessor.
    pub fn detailed_path(&self) -> Vec<PathStep> {
        let chain = self.chain();
        if chain.len() == 1 {
            return vec![self.step(self.target)];
        }

        chain[..chain.len() - 1]
            .iter()
            .map(|id| self.step(*id))
            .collect()
    }

    fn step(&self, station: StationId) -> PathStep {
        let label = self.state.label(station);
        let predecessor = label.and_then(|l| l.predecessor);
        PathStep {
            station,
            name: self.name(station),
            predecessor,
            predecessor_name: predecessor.map(|p| self.name(p)),
            boarding: label.and_then(|l| l.boarded.boarding().cloned()),
            time: label.map(|l| l.time).unwrap_or(f64::INFINITY),
            fare: label.map(|l| l.fare).unwrap_or(f64::INFINITY),
            walked: label.map(|l| l.walked).unwrap_or(0.0),
        }
    }

    fn name(&self, station: StationId) -> String {
        self.network
            .station(station)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|_| station.to_string())
    }

    /// Boarding instructions and totals for presentation.
    pub fn itinerary(&self) -> Itinerary {
        Itinerary::from_steps(self.name(self.target), self.is_reachable(), self.detailed_path())
    }
}

/// A single instruction of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Walk between two stations.
    Walk { from: String, to: String },

    /// Board a new line.
    Board {
        at: String,
        boarding: Boarding,
        to: String,
    },

    /// Stay on the line boarded earlier.
    Continue {
        at: String,
        boarding: Boarding,
        until: String,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Walk { from, to } => write!(f, "At {from} walk to {to}"),
            Instruction::Board { at, boarding, to } => {
                write!(f, "At {at} catch the {boarding} to {to}")
            }
            Instruction::Continue {
                at,
                boarding,
                until,
            } => write!(f, "At {at} continue on the {boarding} until {until}"),
        }
    }
}

/// Human-oriented summary of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub destination: String,
    pub reachable: bool,
    pub instructions: Vec<Instruction>,
    pub total_time: f64,
    pub total_fare: f64,
    pub walked_time: f64,

    /// Number of non-walk boarding events.
    pub boardings: usize,
}

impl Itinerary {
    /// Build from detailed steps (target first, as `Path::detailed_path`
    /// returns them).
    pub fn from_steps(destination: String, reachable: bool, steps: Vec<PathStep>) -> Self {
        let (total_time, total_fare, walked_time) = match steps.first() {
            Some(last) if reachable => (last.time, last.fare, last.walked),
            _ => (0.0, 0.0, 0.0),
        };

        let mut instructions = Vec::new();
        let mut boardings = 0;
        let mut previous: Option<&Boarding> = None;

        for step in steps.iter().rev() {
            let (Some(at), Some(boarding)) = (step.predecessor_name.clone(), step.boarding.as_ref())
            else {
                continue;
            };

            let instruction = if boarding.mode == Mode::Walk {
                Instruction::Walk {
                    from: at,
                    to: step.name.clone(),
                }
            } else if previous == Some(boarding) {
                Instruction::Continue {
                    at,
                    boarding: boarding.clone(),
                    until: step.name.clone(),
                }
            } else {
                boardings += 1;
                Instruction::Board {
                    at,
                    boarding: boarding.clone(),
                    to: step.name.clone(),
                }
            };

            instructions.push(instruction);
            previous = Some(boarding);
        }

        Self {
            destination,
            reachable,
            instructions,
            total_time,
            total_fare,
            walked_time,
            boardings,
        }
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.reachable {
            return write!(
                f,
                "It is impossible to travel to {} with those constraints!",
                self.destination
            );
        }

        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        writeln!(f, "Total time: {:.2} minutes", self.total_time)?;
        write!(f, "Total price: {:.2} euros", self.total_fare)
    }
}
