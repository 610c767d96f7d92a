//! Domain error types.
//!
//! These errors represent validation failures while building the model or
//! assembling a route. They are distinct from query errors, which belong to
//! the planner.

use super::{CityIdx, StationIdx, StationKind};

/// Domain-level errors for model and route validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Grid cell outside the country's dimensions
    #[error("grid cell ({row}, {col}) is outside the grid")]
    CellOutOfBounds { row: usize, col: usize },

    /// Two cities on the same grid cell
    #[error("grid cell ({row}, {col}) already holds a city")]
    CellOccupied { row: usize, col: usize },

    /// A second station of the same kind in one city
    #[error("city {city:?} already has a {kind} station")]
    DuplicateStation { city: String, kind: StationKind },

    /// City index not present in the model
    #[error("unknown city index {0:?}")]
    UnknownCity(CityIdx),

    /// Station index not present in the model
    #[error("unknown station index {0:?}")]
    UnknownStation(StationIdx),

    /// Leg identifier used twice
    #[error("duplicate leg id {0:?}")]
    DuplicateLegId(String),

    /// Leg declared with a negative duration
    #[error("leg {id:?} has a negative duration")]
    NegativeDuration { id: String },

    /// Leg declared with a negative or non-finite price
    #[error("leg {id:?} has an invalid price")]
    InvalidPrice { id: String },

    /// Leg declared with a negative minimum wait
    #[error("leg {id:?} has a negative minimum wait")]
    NegativeWait { id: String },

    /// Leg using the reserved transfer prefix with a nonzero price
    #[error("leg {id:?} uses the reserved transfer prefix but has a nonzero price")]
    TransferLegPrice { id: String },

    /// Route has no legs
    #[error("route must contain at least one leg")]
    EmptyRoute,

    /// Route starting with an intra-city transfer
    #[error("route must not start with a transfer leg")]
    LeadingTransfer,

    /// Consecutive route legs that do not share a station
    #[error("route legs at position {at} do not share a station")]
    DisconnectedLegs { at: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::CellOccupied { row: 1, col: 2 };
        assert_eq!(err.to_string(), "grid cell (1, 2) already holds a city");

        let err = DomainError::DuplicateStation {
            city: "Sarajevo".into(),
            kind: StationKind::Bus,
        };
        assert_eq!(err.to_string(), "city \"Sarajevo\" already has a bus station");

        let err = DomainError::DuplicateLegId("b1".into());
        assert_eq!(err.to_string(), "duplicate leg id \"b1\"");

        let err = DomainError::DisconnectedLegs { at: 0 };
        assert_eq!(
            err.to_string(),
            "route legs at position 0 do not share a station"
        );

        let err = DomainError::LeadingTransfer;
        assert_eq!(err.to_string(), "route must not start with a transfer leg");
    }
}
