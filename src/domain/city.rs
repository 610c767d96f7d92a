//! City type.

use super::{StationIdx, StationKind};

/// Index of a city in the model's city arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityIdx(pub usize);

/// A city on the country grid.
///
/// A city occupies one grid cell and has at most one station of each kind.
/// Cities are immutable once the model is built.
#[derive(Debug, Clone)]
pub struct City {
    name: String,
    row: usize,
    col: usize,
    bus: Option<StationIdx>,
    train: Option<StationIdx>,
}

impl City {
    pub(crate) fn new(name: String, row: usize, col: usize) -> Self {
        Self {
            name,
            row,
            col,
            bus: None,
            train: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// The city's station of the given kind, if it has one.
    pub fn station(&self, kind: StationKind) -> Option<StationIdx> {
        match kind {
            StationKind::Bus => self.bus,
            StationKind::Train => self.train,
        }
    }

    /// The city's existing stations, bus first.
    pub fn stations(&self) -> impl Iterator<Item = StationIdx> {
        [self.bus, self.train].into_iter().flatten()
    }

    /// True if the city has at least one station.
    pub fn has_stations(&self) -> bool {
        self.bus.is_some() || self.train.is_some()
    }

    pub(crate) fn set_station(&mut self, kind: StationKind, idx: StationIdx) {
        match kind {
            StationKind::Bus => self.bus = Some(idx),
            StationKind::Train => self.train = Some(idx),
        }
    }
}
