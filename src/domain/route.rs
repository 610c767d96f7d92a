//! Route record and transfer counting.

use super::{CityIdx, Departure, DomainError};

/// Counts the transfers in a leg sequence.
///
/// A transfer is a pair of consecutive non-transfer legs with different leg
/// identifiers; staying on a service (same id) does not count. Intra-city
/// transfer legs are skipped during the scan and never increment the count.
pub fn count_transfers(legs: &[Departure]) -> u32 {
    let mut transfers = 0;
    let mut previous: Option<&Departure> = None;

    for leg in legs {
        if leg.is_transfer() {
            continue;
        }
        if let Some(prev) = previous {
            if prev.id() != leg.id() {
                transfers += 1;
            }
        }
        previous = Some(leg);
    }

    transfers
}

/// A computed journey from a station in the origin city to a station in the
/// destination city.
///
/// Routes are produced by the planner and owned by the caller. Every leg
/// carries the absolute minute it was boarded at; summary totals are
/// computed at construction.
///
/// # Invariants
///
/// - The leg sequence is non-empty and does not start with a transfer.
/// - Consecutive legs share a station.
#[derive(Debug, Clone)]
pub struct Route {
    origin: CityIdx,
    destination: CityIdx,
    legs: Vec<Departure>,
    total_price: f64,
    total_time: i64,
    transfer_count: u32,
}

impl Route {
    /// Assemble a route, validating the structural invariants.
    ///
    /// `total_time` is the absolute arrival minute of the last leg, which
    /// equals waiting plus in-vehicle minutes for a search started at
    /// minute 0.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg sequence is empty, starts with a transfer
    /// leg, or has consecutive legs that do not share a station.
    pub fn new(
        origin: CityIdx,
        destination: CityIdx,
        legs: Vec<Departure>,
        total_time: i64,
    ) -> Result<Self, DomainError> {
        let first = legs.first().ok_or(DomainError::EmptyRoute)?;
        if first.is_transfer() {
            return Err(DomainError::LeadingTransfer);
        }
        for (at, pair) in legs.windows(2).enumerate() {
            if pair[0].to() != pair[1].from() {
                return Err(DomainError::DisconnectedLegs { at });
            }
        }

        let total_price = legs
            .iter()
            .filter(|leg| !leg.is_transfer())
            .map(Departure::price)
            .sum();
        let transfer_count = count_transfers(&legs);

        Ok(Self {
            origin,
            destination,
            legs,
            total_price,
            total_time,
            transfer_count,
        })
    }

    pub fn origin(&self) -> CityIdx {
        self.origin
    }

    pub fn destination(&self) -> CityIdx {
        self.destination
    }

    /// The legs of the journey, each stamped with its boarding minute.
    pub fn legs(&self) -> &[Departure] {
        &self.legs
    }

    /// Sum of the prices of the real legs.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Total travel time in minutes: the absolute arrival minute of the
    /// last leg.
    pub fn total_time(&self) -> i64 {
        self.total_time
    }

    /// Number of transfers per the post-hoc count.
    pub fn transfer_count(&self) -> u32 {
        self.transfer_count
    }
}
