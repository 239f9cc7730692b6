//! Test fixtures for day-planner.
//!
//! Provides:
//! - Real Seoul sightseeing locations (from OpenStreetMap)
//! - Hand-built duration and geometry providers
#![allow(dead_code)]

pub mod providers;
pub mod seoul_locations;

pub use providers::*;
