//! Country model: the grid of cities and the station arena.
//!
//! Cities and stations live in two vectors owned by the model; a station
//! holds its city index, a city holds option-indices for its two stations.
//! The model is assembled through [`CountryBuilder`], which validates
//! everything an external loader can get wrong, and is read-only once
//! built.

use std::collections::{HashMap, HashSet};

use super::{
    City, CityIdx, Departure, DomainError, Station, StationIdx, StationKind, TimeOfDay,
    TRANSFER_PREFIX,
};

/// The immutable transportation model: a `rows x cols` grid with at most
/// one city per cell.
#[derive(Debug, Clone)]
pub struct Country {
    rows: usize,
    cols: usize,
    grid: Vec<Option<CityIdx>>,
    cities: Vec<City>,
    stations: Vec<Station>,
    station_ids: HashMap<String, StationIdx>,
}

impl Country {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The city occupying a grid cell, if any.
    pub fn city_at(&self, row: usize, col: usize) -> Option<CityIdx> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.grid[row * self.cols + col]
    }

    pub fn city(&self, idx: CityIdx) -> Option<&City> {
        self.cities.get(idx.0)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn station(&self, idx: StationIdx) -> Option<&Station> {
        self.stations.get(idx.0)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Looks up a station by its string identifier, e.g. `A_0_1`.
    pub fn station_by_id(&self, id: &str) -> Option<StationIdx> {
        self.station_ids.get(id).copied()
    }

    /// The station's identifier for display; `"?"` for a dangling index.
    pub fn station_label(&self, idx: StationIdx) -> &str {
        self.station(idx).map_or("?", Station::id)
    }
}

/// Builder for [`Country`].
///
/// The external loader feeds cities, stations, and scheduled legs through
/// this builder; every input is validated here so the engine can rely on
/// the model being well formed.
#[derive(Debug)]
pub struct CountryBuilder {
    rows: usize,
    cols: usize,
    grid: Vec<Option<CityIdx>>,
    cities: Vec<City>,
    stations: Vec<Station>,
    station_ids: HashMap<String, StationIdx>,
    leg_ids: HashSet<String>,
}

impl CountryBuilder {
    /// Start a model with the given grid dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            grid: vec![None; rows * cols],
            cities: Vec::new(),
            stations: Vec::new(),
            station_ids: HashMap::new(),
            leg_ids: HashSet::new(),
        }
    }

    /// Place a city on a free grid cell.
    pub fn add_city(
        &mut self,
        name: impl Into<String>,
        row: usize,
        col: usize,
    ) -> Result<CityIdx, DomainError> {
        if row >= self.rows || col >= self.cols {
            return Err(DomainError::CellOutOfBounds { row, col });
        }
        let cell = &mut self.grid[row * self.cols + col];
        if cell.is_some() {
            return Err(DomainError::CellOccupied { row, col });
        }

        let idx = CityIdx(self.cities.len());
        self.cities.push(City::new(name.into(), row, col));
        *cell = Some(idx);
        Ok(idx)
    }

    /// Add a station of the given kind to a city.
    ///
    /// The station id is derived from the kind and the city's grid cell
    /// (`A_<row>_<col>` for bus, `Z_<row>_<col>` for train).
    pub fn add_station(
        &mut self,
        city: CityIdx,
        kind: StationKind,
    ) -> Result<StationIdx, DomainError> {
        let record = self
            .cities
            .get(city.0)
            .ok_or(DomainError::UnknownCity(city))?;
        if record.station(kind).is_some() {
            return Err(DomainError::DuplicateStation {
                city: record.name().to_string(),
                kind,
            });
        }

        let id = kind.station_id(record.row(), record.col());
        let idx = StationIdx(self.stations.len());
        self.stations.push(Station::new(id.clone(), kind, city));
        self.station_ids.insert(id, idx);
        self.cities[city.0].set_station(kind, idx);
        Ok(idx)
    }

    /// Add a scheduled leg departing daily.
    ///
    /// The arrival time of day is derived from the departure plus
    /// `duration_minutes`, wrapping past midnight.
    ///
    /// # Errors
    ///
    /// Rejects unknown endpoints, duplicate leg ids, negative durations or
    /// waits, negative or non-finite prices, and legs that use the reserved
    /// `transfer_` id prefix with a nonzero price.
    #[allow(clippy::too_many_arguments)]
    pub fn add_departure(
        &mut self,
        id: impl Into<String>,
        from: StationIdx,
        to: StationIdx,
        departure: TimeOfDay,
        duration_minutes: i64,
        price: f64,
        min_wait: i64,
    ) -> Result<(), DomainError> {
        let id = id.into();

        if from.0 >= self.stations.len() {
            return Err(DomainError::UnknownStation(from));
        }
        if to.0 >= self.stations.len() {
            return Err(DomainError::UnknownStation(to));
        }
        if duration_minutes < 0 {
            return Err(DomainError::NegativeDuration { id });
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidPrice { id });
        }
        if min_wait < 0 {
            return Err(DomainError::NegativeWait { id });
        }
        if id.starts_with(TRANSFER_PREFIX) && price != 0.0 {
            return Err(DomainError::TransferLegPrice { id });
        }
        if !self.leg_ids.insert(id.clone()) {
            return Err(DomainError::DuplicateLegId(id));
        }

        let arrival = TimeOfDay::from_absolute(
            i64::from(departure.minutes_from_midnight()) + duration_minutes,
        );
        let leg = Departure::new(id, from, to, departure, arrival, price, min_wait);
        self.stations[from.0].push_departure(leg);
        Ok(())
    }

    /// Freeze the model.
    pub fn build(self) -> Country {
        Country {
            rows: self.rows,
            cols: self.cols,
            grid: self.grid,
            cities: self.cities,
            stations: self.stations,
            station_ids: self.station_ids,
        }
    }
}
