//! Binary min-heap with decrease-key.
//!
//! The heap holds station identifiers; their keys live in the query's
//! `SearchState`, which also records each queued station's heap position
//! so `decrease_key` never searches the heap.

use crate::domain::StationId;

use super::search::SearchError;
use super::state::{Label, SearchState};

/// Which label field orders the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    ByTime,
    ByFare,

    /// Time plus heuristic estimate, for A*.
    ByEstimate,
}

impl QueueOrder {
    pub fn key(self, label: &Label) -> f64 {
        match self {
            QueueOrder::ByTime => label.time,
            QueueOrder::ByFare => label.fare,
            QueueOrder::ByEstimate => label.estimate,
        }
    }
}

/// Min-priority queue over stations supporting decrease-key.
#[derive(Debug, Clone)]
pub struct DecreaseKeyQueue {
    order: QueueOrder,
    heap: Vec<StationId>,
}

impl DecreaseKeyQueue {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            order,
            heap: Vec::new(),
        }
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, station: StationId, state: &SearchState) -> bool {
        state.label(station).is_some_and(|l| l.is_queued())
    }

    /// Add a station that is not currently queued.
    pub fn insert(&mut self, station: StationId, state: &mut SearchState) {
        let index = self.heap.len();
        self.heap.push(station);
        state.label_mut(station).heap_index = Some(index);
        self.sift_up(index, state);
    }

    /// Remove and return the station with the smallest key.
    pub fn extract_min(&mut self, state: &mut SearchState) -> Result<StationId, SearchError> {
        let last = self.heap.pop().ok_or(SearchError::EmptyQueue)?;
        let min = if self.heap.is_empty() {
            last
        } else {
            let min = self.heap[0];
            self.place(0, last, state);
            self.sift_down(0, state);
            min
        };

        state.label_mut(min).heap_index = None;
        Ok(min)
    }

    /// Restore heap order after the station's key was lowered.
    pub fn decrease_key(
        &mut self,
        station: StationId,
        state: &mut SearchState,
    ) -> Result<(), SearchError> {
        let index = state
            .label(station)
            .and_then(|l| l.heap_index)
            .ok_or(SearchError::NotQueued(station))?;
        self.sift_up(index, state);
        Ok(())
    }

    fn key(&self, station: StationId, state: &SearchState) -> f64 {
        state
            .label(station)
            .map(|l| self.order.key(l))
            .unwrap_or(f64::INFINITY)
    }

    fn place(&mut self, index: usize, station: StationId, state: &mut SearchState) {
        self.heap[index] = station;
        state.label_mut(station).heap_index = Some(index);
    }

    fn sift_up(&mut self, mut index: usize, state: &mut SearchState) {
        let station = self.heap[index];
        let key = self.key(station, state);

        while index > 0 {
            let parent = (index - 1) / 2;
            let parent_station = self.heap[parent];
            if self.key(parent_station, state) <= key {
                break;
            }
            self.place(index, parent_station, state);
            index = parent;
        }

        self.place(index, station, state);
    }

    fn sift_down(&mut self, mut index: usize, state: &mut SearchState) {
        let station = self.heap[index];
        let key = self.key(station, state);
        let len = self.heap.len();

        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len
                && self.key(self.heap[right], state) < self.key(self.heap[left], state)
            {
                right
            } else {
                left
            };

            let child_station = self.heap[child];
            if self.key(child_station, state) >= key {
                break;
            }
            self.place(index, child_station, state);
            index = child;
        }

        self.place(index, station, state);
    }
}
