//! Domain types for the journey planner.
//!
//! This module contains the core model: the grid of cities, their stations,
//! scheduled legs, and the immutable route record. All types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod city;
mod country;
mod departure;
mod error;
mod route;
mod station;
mod time;

pub use city::{City, CityIdx};
pub use country::{Country, CountryBuilder};
pub use departure::{Departure, TRANSFER_PREFIX};
pub use error::DomainError;
pub use route::{count_transfers, Route};
pub use station::{Station, StationIdx, StationKind};
pub use time::{TimeError, TimeOfDay, MINUTES_PER_DAY};
