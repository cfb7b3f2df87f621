//! Multimodal trip planner server.
//!
//! A web application that answers: "how do I get from this station to
//! that one by bus, subway and on foot?", optimizing for time, fare or
//! number of transfers.

pub mod domain;
pub mod network;
pub mod planner;
pub mod stations;
pub mod web;
