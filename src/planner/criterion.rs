//! Optimization criteria.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown criterion key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown criterion {0:?}, expected \"time\", \"price\", or \"transfers\"")]
pub struct InvalidCriterion(String);

/// What a query optimizes for.
///
/// The public string keys are `"time"`, `"price"`, and `"transfers"`.
///
/// # Examples
///
/// ```
/// use intercity::planner::Criterion;
///
/// let criterion: Criterion = "price".parse().unwrap();
/// assert_eq!(criterion, Criterion::Price);
/// assert_eq!(criterion.key(), "price");
///
/// assert!("speed".parse::<Criterion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Minimize total travel time (waiting plus in-vehicle minutes).
    Time,
    /// Minimize the summed price of the real legs.
    Price,
    /// Minimize the number of transfers.
    Transfers,
}

impl Criterion {
    /// The public string key of this criterion.
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Price => "price",
            Criterion::Transfers => "transfers",
        }
    }
}

impl FromStr for Criterion {
    type Err = InvalidCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Criterion::Time),
            "price" => Ok(Criterion::Price),
            "transfers" => Ok(Criterion::Transfers),
            other => Err(InvalidCriterion(other.to_string())),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
