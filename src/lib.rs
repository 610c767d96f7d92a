//! K-best multi-modal journey planner.
//!
//! Computes the K best bus + train journeys between two cities of a
//! grid-shaped country, ranked by travel time, price, or number of
//! transfers. Each city has at most one bus and one train station;
//! journeys interleave scheduled legs with intra-city transfers between
//! the two stations.
//!
//! The crate is a pure routing core: an external loader builds the
//! [`domain::Country`] model, [`graph::Graph::build`] derives the
//! adjacency structure once, and [`planner::Planner`] answers queries
//! against it.

pub mod domain;
pub mod graph;
pub mod planner;
