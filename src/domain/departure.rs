//! Scheduled leg ("departure") type.
//!
//! A `Departure` is a single scheduled vehicle movement between two
//! stations, or a synthetic intra-city transfer inserted by the graph
//! builder. Legs repeat daily; the absolute day an instance is boarded on
//! is recorded only on legs that are part of an assembled route.

use std::fmt;

use super::{StationIdx, TimeOfDay};

/// Reserved identifier prefix marking synthetic intra-city transfer legs.
///
/// Any leg whose id starts with this prefix is treated as a transfer
/// everywhere in the engine and must carry a price of zero.
pub const TRANSFER_PREFIX: &str = "transfer_";

/// A scheduled leg between two stations.
///
/// Times are wall-clock times of day; `duration` is derived mod one day, so
/// an arrival earlier than the departure is an overnight leg. Legs cloned
/// into a route additionally carry the absolute minute they were boarded at
/// (see [`Departure::with_boarding`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    id: String,
    from: StationIdx,
    to: StationIdx,
    departure: TimeOfDay,
    arrival: TimeOfDay,
    price: f64,
    min_wait: i64,
    boarded_at: Option<i64>,
}

impl Departure {
    /// Create a scheduled leg. Validation (non-negative price and wait,
    /// endpoint existence) happens in the model builder.
    pub fn new(
        id: impl Into<String>,
        from: StationIdx,
        to: StationIdx,
        departure: TimeOfDay,
        arrival: TimeOfDay,
        price: f64,
        min_wait: i64,
    ) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            departure,
            arrival,
            price,
            min_wait,
            boarded_at: None,
        }
    }

    /// Create the synthetic transfer leg between two stations of one city.
    ///
    /// The placeholder endpoints are midnight; the real wall-clock endpoints
    /// of a traversed transfer are recomputed when the search materializes
    /// it (the walk starts at the traveler's arrival minute).
    pub fn transfer(
        from: StationIdx,
        to: StationIdx,
        from_id: &str,
        to_id: &str,
    ) -> Self {
        Self::new(
            format!("{TRANSFER_PREFIX}{from_id}_to_{to_id}"),
            from,
            to,
            TimeOfDay::MIDNIGHT,
            TimeOfDay::MIDNIGHT,
            0.0,
            0,
        )
    }

    /// Unique leg identifier within the model.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> StationIdx {
        self.from
    }

    pub fn to(&self) -> StationIdx {
        self.to
    }

    /// Scheduled departure time of day.
    pub fn departure_time(&self) -> TimeOfDay {
        self.departure
    }

    /// Scheduled arrival time of day.
    pub fn arrival_time(&self) -> TimeOfDay {
        self.arrival
    }

    /// Ticket price; zero for transfer legs.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Minimum minutes a traveler must already have been at `from` before
    /// this leg can be boarded. Doubles as the walk time of an intra-city
    /// transfer.
    pub fn min_wait(&self) -> i64 {
        self.min_wait
    }

    /// In-vehicle minutes, wrapping overnight legs into the next day.
    pub fn duration(&self) -> i64 {
        self.departure.duration_until(self.arrival)
    }

    /// True if this is a synthetic intra-city transfer.
    pub fn is_transfer(&self) -> bool {
        self.id.starts_with(TRANSFER_PREFIX)
    }

    /// The absolute minute this leg instance departed at, present only on
    /// legs belonging to an assembled route.
    pub fn boarded_at(&self) -> Option<i64> {
        self.boarded_at
    }

    /// A copy of this leg stamped with the absolute minute it is boarded at.
    pub fn with_boarding(&self, minute: i64) -> Self {
        Self {
            boarded_at: Some(minute),
            ..self.clone()
        }
    }

    /// Materializes a traversed transfer: the walk starts at `minute`,
    /// lasts `walk_minutes`, and the displayed wall-clock endpoints are
    /// recomputed from those absolute instants.
    pub fn materialize_transfer(&self, minute: i64, walk_minutes: i64) -> Self {
        Self {
            id: self.id.clone(),
            from: self.from,
            to: self.to,
            departure: TimeOfDay::from_absolute(minute),
            arrival: TimeOfDay::from_absolute(minute + walk_minutes),
            price: 0.0,
            min_wait: walk_minutes,
            boarded_at: Some(minute),
        }
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.id, self.departure, self.arrival
        )?;
        if let Some(minute) = self.boarded_at {
            write!(f, " (boarded at minute {minute})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tod(s: &str) -> TimeOfDay {
        TimeOfDay::parse_hhmm(s).unwrap()
    }

    fn leg(dep: &str, arr: &str) -> Departure {
        Departure::new("b1", StationIdx(0), StationIdx(1), tod(dep), tod(arr), 10.0, 5)
    }

    #[test]
    fn duration_same_day() {
        assert_eq!(leg("08:00", "09:30").duration(), 90);
    }

    #[test]
    fn duration_overnight() {
        assert_eq!(leg("23:10", "01:10").duration(), 120);
    }

    #[test]
    fn duration_zero() {
        assert_eq!(leg("08:00", "08:00").duration(), 0);
    }

    #[test]
    fn transfer_detection() {
        let real = leg("08:00", "09:00");
        assert!(!real.is_transfer());

        let transfer = Departure::transfer(StationIdx(0), StationIdx(1), "A_0_0", "Z_0_0");
        assert!(transfer.is_transfer());
        assert_eq!(transfer.id(), "transfer_A_0_0_to_Z_0_0");
        assert_eq!(transfer.price(), 0.0);
        assert_eq!(transfer.min_wait(), 0);
    }

    #[test]
    fn boarding_stamp() {
        let l = leg("08:00", "09:00");
        assert_eq!(l.boarded_at(), None);

        let boarded = l.with_boarding(1920);
        assert_eq!(boarded.boarded_at(), Some(1920));
        // Schedule fields unchanged
        assert_eq!(boarded.departure_time(), tod("08:00"));
        assert_eq!(boarded.id(), l.id());
    }

    #[test]
    fn materialized_transfer_endpoints() {
        let transfer = Departure::transfer(StationIdx(0), StationIdx(1), "A_0_0", "Z_0_0");
        // Walk starts at minute 1500 (day 1, 01:00) and takes 20 minutes
        let walked = transfer.materialize_transfer(1500, 20);

        assert_eq!(walked.boarded_at(), Some(1500));
        assert_eq!(walked.departure_time(), tod("01:00"));
        assert_eq!(walked.arrival_time(), tod("01:20"));
        assert_eq!(walked.min_wait(), 20);
        assert_eq!(walked.duration(), 20);
        assert_eq!(walked.price(), 0.0);
    }
}
