//! Domain types for the trip planner.
//!
//! Stations, connections and the cost model that turns a connection's
//! mode and weight into travel time and fare. These types carry no
//! per-query state.

mod cost;
mod error;
mod station;

pub use cost::{
    BUS_FARE, BUS_TIME_MULTIPLIER, Boarding, DEFAULT_TRANSFER_PENALTY, FASTEST_TIME_MULTIPLIER,
    InvalidMode, Mode, SUBWAY_FARE, SUBWAY_TIME_MULTIPLIER, WALK_FARE, WALK_TIME_MULTIPLIER, fare,
    time_cost,
};
pub use error::NetworkError;
pub use station::{Connection, Station, StationId};
