//! Search configuration for the journey planner.
//!
//! All pruning thresholds of the engine are plain fields here rather than
//! constants buried in the search loop; `Default` supplies the values the
//! heuristics were tuned with.

use serde::{Deserialize, Serialize};

use super::criterion::Criterion;

/// Configuration parameters for journey search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of legs in a path.
    pub max_legs: usize,

    /// Maximum total travel time of a path (minutes).
    pub max_total_time: i64,

    /// Maximum number of transfers in a path.
    pub max_transfers: u32,

    /// Maximum number of frontier pops per query. On exhaustion the search
    /// returns whatever distinct routes it has found.
    pub max_iterations: u64,

    /// How often a state at one station may be expanded under TIME.
    pub time_visit_cap: u32,

    /// How often a state at one station may be expanded under PRICE.
    pub price_visit_cap: u32,

    /// How often a state at one station may be expanded under TRANSFERS.
    pub transfers_visit_cap: u32,

    /// Minimum width of the TIME cost band around a station's best cost.
    pub time_tolerance_floor: f64,

    /// Width of the TIME cost band as a fraction of the best cost.
    pub time_tolerance_ratio: f64,

    /// Minimum width of the PRICE cost band.
    pub price_tolerance_floor: f64,

    /// Width of the PRICE cost band as a fraction of the best cost.
    pub price_tolerance_ratio: f64,

    /// Width of the TRANSFERS cost band.
    pub transfers_tolerance: f64,

    /// Cost added per traversed transfer leg under TIME.
    pub time_transfer_penalty: f64,

    /// Cost added per traversed transfer leg under PRICE.
    pub price_transfer_penalty: f64,
}

impl SearchConfig {
    /// The per-station visit cap for a criterion.
    pub fn visit_cap(&self, criterion: Criterion) -> u32 {
        match criterion {
            Criterion::Time => self.time_visit_cap,
            Criterion::Price => self.price_visit_cap,
            Criterion::Transfers => self.transfers_visit_cap,
        }
    }

    /// How far above a station's best popped cost a state may lie and still
    /// be expanded.
    pub fn tolerance(&self, criterion: Criterion, best_cost: f64) -> f64 {
        match criterion {
            Criterion::Time => self
                .time_tolerance_floor
                .max(self.time_tolerance_ratio * best_cost),
            Criterion::Price => self
                .price_tolerance_floor
                .max(self.price_tolerance_ratio * best_cost),
            Criterion::Transfers => self.transfers_tolerance,
        }
    }

    /// The cost penalty for traversing a transfer leg. Zero under
    /// TRANSFERS, where transfers are already the objective.
    pub fn transfer_penalty(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Time => self.time_transfer_penalty,
            Criterion::Price => self.price_transfer_penalty,
            Criterion::Transfers => 0.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_legs: 100,
            max_total_time: 20 * 1440, // twenty days
            max_transfers: 30,
            max_iterations: 1_000_000,
            time_visit_cap: 100,
            price_visit_cap: 50,
            transfers_visit_cap: 50,
            time_tolerance_floor: 120.0,
            time_tolerance_ratio: 0.5,
            price_tolerance_floor: 100.0,
            price_tolerance_ratio: 0.4,
            transfers_tolerance: 1.0,
            time_transfer_penalty: 5.0,
            price_transfer_penalty: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_legs, 100);
        assert_eq!(config.max_total_time, 28_800);
        assert_eq!(config.max_transfers, 30);
        assert_eq!(config.max_iterations, 1_000_000);
        assert_eq!(config.time_visit_cap, 100);
        assert_eq!(config.price_visit_cap, 50);
        assert_eq!(config.transfers_visit_cap, 50);
    }

    #[test]
    fn visit_caps_by_criterion() {
        let config = SearchConfig::default();

        assert_eq!(config.visit_cap(Criterion::Time), 100);
        assert_eq!(config.visit_cap(Criterion::Price), 50);
        assert_eq!(config.visit_cap(Criterion::Transfers), 50);
    }

    #[test]
    fn tolerance_uses_floor_for_small_costs() {
        let config = SearchConfig::default();

        assert_eq!(config.tolerance(Criterion::Time, 0.0), 120.0);
        assert_eq!(config.tolerance(Criterion::Time, 100.0), 120.0);
        assert_eq!(config.tolerance(Criterion::Price, 10.0), 100.0);
        assert_eq!(config.tolerance(Criterion::Transfers, 10.0), 1.0);
    }

    #[test]
    fn tolerance_scales_with_large_costs() {
        let config = SearchConfig::default();

        assert_eq!(config.tolerance(Criterion::Time, 1000.0), 500.0);
        assert_eq!(config.tolerance(Criterion::Price, 1000.0), 400.0);
        // TRANSFERS stays flat
        assert_eq!(config.tolerance(Criterion::Transfers, 1000.0), 1.0);
    }

    #[test]
    fn transfer_penalties() {
        let config = SearchConfig::default();

        assert_eq!(config.transfer_penalty(Criterion::Time), 5.0);
        assert_eq!(config.transfer_penalty(Criterion::Price), 1.0);
        assert_eq!(config.transfer_penalty(Criterion::Transfers), 0.0);
    }
}
