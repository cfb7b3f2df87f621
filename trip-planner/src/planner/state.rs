//! Per-query search state.
//!
//! Every search owns one `SearchState`: a table of labels indexed by
//! `StationId`. The network itself holds no query state, so a fresh table
//! is all a new query needs and queries never see each other's labels.

use crate::domain::{Boarding, Connection, Mode, StationId};

/// What the traveller was riding on arrival at a station.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Signature {
    /// Station not reached yet.
    #[default]
    Unset,

    /// The search source; nothing boarded yet.
    First,

    /// Arrived riding this (mode, line).
    Boarded(Boarding),
}

impl Signature {
    pub fn boarding(&self) -> Option<&Boarding> {
        match self {
            Signature::Boarded(b) => Some(b),
            _ => None,
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.boarding().map(|b| b.mode)
    }

    /// Whether taking `connection` continues the current ride.
    pub fn rides(&self, connection: &Connection) -> bool {
        self.boarding().is_some_and(|b| connection.rides(b))
    }

    /// Whether taking a connection of `mode` switches between two
    /// different non-walk modes (and so pays the interface penalty).
    pub fn switches_mode(&self, mode: Mode) -> bool {
        match self.mode() {
            Some(current) => current != mode && !current.is_walk() && !mode.is_walk(),
            None => false,
        }
    }
}

/// Search record for one station in one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Accumulated travel time (primary metric except for fare searches).
    pub time: f64,

    /// Time plus the straight-line bound to the destination; orders A*
    /// searches and equals `time` otherwise.
    pub estimate: f64,

    /// Accumulated fare (primary metric for fare searches).
    pub fare: f64,

    /// Accumulated walking time.
    pub walked: f64,

    /// Station this one was reached from.
    pub predecessor: Option<StationId>,

    /// Whether the station has ever been queued in this query.
    pub reached: bool,

    /// Non-walk boarding events minus one (the source starts at -1).
    pub transfers: i32,

    /// What was boarded to arrive here.
    pub boarded: Signature,

    /// Position in the priority queue while queued.
    pub(super) heap_index: Option<usize>,
}

impl Label {
    fn unreached(time: f64, fare: f64) -> Self {
        Self {
            time,
            estimate: time,
            fare,
            walked: 0.0,
            predecessor: None,
            reached: false,
            transfers: 0,
            boarded: Signature::Unset,
            heap_index: None,
        }
    }

    /// Whether the station is currently in the priority queue.
    pub fn is_queued(&self) -> bool {
        self.heap_index.is_some()
    }
}

/// Labels for every station of a network, for a single query.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub(super) labels: Vec<Label>,
}

impl SearchState {
    /// State for searches minimizing time: every time is infinite except
    /// the source's.
    pub fn for_time(station_count: usize, source: StationId) -> Self {
        let mut state = Self {
            labels: vec![Label::unreached(f64::INFINITY, 0.0); station_count],
        };
        state.init_source(source);
        let label = &mut state.labels[source.index()];
        label.time = 0.0;
        label.estimate = 0.0;
        state
    }

    /// State for searches minimizing fare: every fare is infinite except
    /// the source's, and times start at zero.
    pub fn for_fare(station_count: usize, source: StationId) -> Self {
        let mut state = Self {
            labels: vec![Label::unreached(0.0, f64::INFINITY); station_count],
        };
        state.init_source(source);
        state.labels[source.index()].fare = 0.0;
        state
    }

    fn init_source(&mut self, source: StationId) {
        let label = &mut self.labels[source.index()];
        label.boarded = Signature::First;
        label.transfers = -1;
    }

    pub fn label(&self, id: StationId) -> Option<&Label> {
        self.labels.get(id.index())
    }

    pub(super) fn label_mut(&mut self, id: StationId) -> &mut Label {
        &mut self.labels[id.index()]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Stations that were reached, in identifier order.
    pub fn reached(&self) -> impl Iterator<Item = StationId> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.reached)
            .map(|(i, _)| StationId(i))
    }
}
