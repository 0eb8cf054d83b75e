//! Bus trip resolver server.
//!
//! A web application that answers: "which upcoming bus takes me from this
//! stop to that one?", using a static GTFS schedule and ranking trips with
//! a live vehicle first.

pub mod config;
pub mod domain;
pub mod planner;
pub mod realtime;
pub mod schedule;
pub mod web;
