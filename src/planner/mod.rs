//! K-shortest-paths journey planner.
//!
//! This module implements the routing kernel: given the immutable
//! transportation graph, it answers "what are the K best journeys from
//! this city to that one?" for a chosen optimization criterion.
//!
//! The search explores time-expanded states through a cost-ordered
//! frontier, honoring scheduled wall-clock departures and minimum
//! connection times, and wrapping to the next day when a connection is
//! missed.

mod config;
mod criterion;
mod rank;
mod search;


pub use config::SearchConfig;
pub use criterion::{Criterion, InvalidCriterion};
pub use rank::{path_signature, sort_routes};
pub use search::{Planner, QueryError, SearchResult, SearchStatus};
