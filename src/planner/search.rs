//! K-shortest-paths journey search.
//!
//! Cost-ordered frontier search over time-expanded states: a state is a
//! station together with the path taken to reach it and the absolute minute
//! of arrival. Expanding a state boards each outgoing leg at its next
//! feasible wall-clock departure (wrapping to the next day when a
//! connection is missed) or walks the intra-city transfer to the sibling
//! station.
//!
//! The search stays finite on dense networks through a set of heuristics:
//! per-station visit caps, a cost band around the best cost seen per
//! station, hard caps on path length, total time and transfer count, and a
//! global iteration budget. Duplicate itineraries are suppressed by path
//! signature. All thresholds live in [`SearchConfig`].

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use tracing::{debug, info, instrument, trace, warn};

use crate::domain::{CityIdx, Country, Departure, Route, Station, StationIdx, StationKind};
use crate::graph::Graph;

use super::config::SearchConfig;
use super::criterion::Criterion;
use super::rank::{path_signature, sort_routes};

/// Error for a query that is rejected before any search begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Origin and destination are the same city
    #[error("origin and destination must be different cities")]
    SameCity,

    /// K is zero
    #[error("k must be at least 1")]
    InvalidK,

    /// City index not present in the model
    #[error("unknown city index {0:?}")]
    UnknownCity(CityIdx),
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The search ran to completion with at least one route.
    Ok,
    /// No admissible route exists, or an endpoint city has no stations.
    NoRoute,
    /// The iteration budget (or an external abort) cut the search short of
    /// `k`; the routes found so far are returned.
    BudgetExhausted,
}

/// Result of a journey search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found routes, best-first under the query's criterion.
    pub routes: Vec<Route>,

    /// How the search ended.
    pub status: SearchStatus,

    /// Number of frontier states popped during the search.
    pub iterations: u64,
}

/// How a state was reached, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TravelMode {
    Bus,
    Train,
    Transfer,
}

/// A time-expanded search state: a station plus the path taken to it.
///
/// Each state owns its path and visited-set copies; the path-length cap
/// keeps the copies small.
#[derive(Debug, Clone)]
struct SearchState {
    station: StationIdx,
    legs: Vec<Departure>,
    cost: f64,
    arrival_minute: i64,
    total_time: i64,
    transfers: u32,
    visited: HashSet<StationIdx>,
    last_mode: Option<TravelMode>,
}

/// Frontier entry: ordered by cost ascending, insertion order on ties.
struct FrontierEntry {
    seq: u64,
    state: SearchState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.state
            .cost
            .total_cmp(&other.state.cost)
            .then(self.seq.cmp(&other.seq))
    }
}

type Frontier = BinaryHeap<Reverse<FrontierEntry>>;

/// Journey planner over an immutable graph.
///
/// A planner borrows the model, the graph, and a configuration; each query
/// owns its entire working set, so one planner (or several) can serve
/// concurrent queries against the same graph.
pub struct Planner<'a> {
    country: &'a Country,
    graph: &'a Graph,
    config: &'a SearchConfig,
    abort: Option<&'a AtomicBool>,
}

impl<'a> Planner<'a> {
    /// Create a planner.
    pub fn new(country: &'a Country, graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self {
            country,
            graph,
            config,
            abort: None,
        }
    }

    /// Attach an external abort flag, checked between frontier pops. A
    /// query observing the flag returns what it has found so far.
    pub fn with_abort(mut self, abort: &'a AtomicBool) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Find up to `k` distinct journeys from `origin` to `destination`,
    /// ranked by `criterion`.
    ///
    /// The search starts at minute 0 (midnight of day 0) simultaneously
    /// from every station of the origin city; any station of the
    /// destination city terminates a path. Returns fewer than `k` routes
    /// when fewer distinct itineraries exist or the budget runs out, and an
    /// empty list when an endpoint city has no stations.
    ///
    /// # Errors
    ///
    /// Returns `Err` before searching if origin and destination are the
    /// same city, `k` is zero, or a city index is not part of the model.
    #[instrument(skip(self))]
    pub fn k_shortest(
        &self,
        origin: CityIdx,
        destination: CityIdx,
        criterion: Criterion,
        k: usize,
    ) -> Result<SearchResult, QueryError> {
        if origin == destination {
            return Err(QueryError::SameCity);
        }
        if k == 0 {
            return Err(QueryError::InvalidK);
        }
        let origin_city = self
            .country
            .city(origin)
            .ok_or(QueryError::UnknownCity(origin))?;
        let destination_city = self
            .country
            .city(destination)
            .ok_or(QueryError::UnknownCity(destination))?;

        info!(
            origin = origin_city.name(),
            destination = destination_city.name(),
            "starting journey search"
        );

        let start_stations: Vec<StationIdx> = origin_city.stations().collect();
        let end_stations: Vec<StationIdx> = destination_city.stations().collect();
        if start_stations.is_empty() || end_stations.is_empty() {
            debug!("an endpoint city has no stations");
            return Ok(SearchResult {
                routes: Vec::new(),
                status: SearchStatus::NoRoute,
                iterations: 0,
            });
        }

        let mut frontier = Frontier::new();
        let mut seq = 0u64;
        for &station in &start_stations {
            let mut visited = HashSet::new();
            visited.insert(station);
            frontier.push(Reverse(FrontierEntry {
                seq,
                state: SearchState {
                    station,
                    legs: Vec::new(),
                    cost: 0.0,
                    arrival_minute: 0,
                    total_time: 0,
                    transfers: 0,
                    visited,
                    last_mode: None,
                },
            }));
            seq += 1;
        }

        let mut found: Vec<Route> = Vec::new();
        let mut seen_signatures: HashSet<String> = HashSet::new();
        let mut station_best_cost: HashMap<StationIdx, f64> = HashMap::new();
        let mut station_visits: HashMap<StationIdx, u32> = HashMap::new();
        let visit_cap = self.config.visit_cap(criterion);
        let mut iterations = 0u64;
        let mut aborted = false;

        while found.len() < k && iterations < self.config.max_iterations {
            if self
                .abort
                .is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
            {
                aborted = true;
                warn!(iterations, "journey search aborted");
                break;
            }

            let Some(Reverse(entry)) = frontier.pop() else {
                break;
            };
            iterations += 1;
            let state = entry.state;

            trace!(
                station = self.country.station_label(state.station),
                cost = state.cost,
                arrival_minute = state.arrival_minute,
                arrived_by = ?state.last_mode,
                "popped state"
            );

            // Terminal: any station of the destination city ends a path.
            if end_stations.contains(&state.station) {
                if !state.legs.is_empty() {
                    let signature = path_signature(self.country, &state.legs);
                    if seen_signatures.insert(signature) {
                        match Route::new(origin, destination, state.legs, state.total_time) {
                            Ok(route) => {
                                debug!(
                                    total_time = route.total_time(),
                                    total_price = route.total_price(),
                                    transfers = route.transfer_count(),
                                    "route found"
                                );
                                found.push(route);
                            }
                            Err(err) => trace!(%err, "discarded degenerate candidate"),
                        }
                    } else {
                        trace!("duplicate itinerary suppressed");
                    }
                }
                continue;
            }

            let visits = station_visits.entry(state.station).or_insert(0);
            if *visits >= visit_cap {
                trace!(
                    station = self.country.station_label(state.station),
                    "visit cap reached"
                );
                continue;
            }
            *visits += 1;

            // The first pop at a station carries its best cost; later pops
            // must stay within the tolerance band around it.
            match station_best_cost.get(&state.station) {
                Some(&best) => {
                    if state.cost > best + self.config.tolerance(criterion, best) {
                        trace!(
                            station = self.country.station_label(state.station),
                            cost = state.cost,
                            best,
                            "outside cost band"
                        );
                        continue;
                    }
                }
                None => {
                    station_best_cost.insert(state.station, state.cost);
                }
            }

            self.expand(&state, criterion, &mut frontier, &mut seq);
        }

        let budget_hit = aborted
            || (found.len() < k
                && iterations >= self.config.max_iterations
                && !frontier.is_empty());
        if budget_hit && !aborted {
            warn!(iterations, "iteration budget exhausted");
        }

        sort_routes(&mut found, criterion);
        found.truncate(k);

        let status = if found.is_empty() {
            SearchStatus::NoRoute
        } else if budget_hit {
            SearchStatus::BudgetExhausted
        } else {
            SearchStatus::Ok
        };

        info!(iterations, routes = found.len(), ?status, "journey search complete");

        Ok(SearchResult {
            routes: found,
            status,
            iterations,
        })
    }

    /// Enqueue the feasible successors of a state.
    fn expand(
        &self,
        state: &SearchState,
        criterion: Criterion,
        frontier: &mut Frontier,
        seq: &mut u64,
    ) {
        for edge in self.graph.outgoing(state.station) {
            // Simple path over stations
            if state.visited.contains(&edge.to()) {
                continue;
            }
            // A journey never opens with a walk
            if edge.is_transfer() && state.legs.is_empty() {
                continue;
            }

            let departs_at;
            let waiting_minutes;
            let travel_minutes;
            let mut transfers = state.transfers;
            let boarded_leg;

            if edge.is_transfer() {
                // The walk starts immediately and takes the minimum
                // connection time of the last real leg.
                let walk = last_real_leg(&state.legs).map_or(0, Departure::min_wait);
                departs_at = state.arrival_minute;
                waiting_minutes = 0;
                travel_minutes = walk;
                boarded_leg = edge.materialize_transfer(departs_at, walk);
            } else {
                departs_at = edge
                    .departure_time()
                    .next_departure_after(state.arrival_minute, edge.min_wait());
                waiting_minutes = departs_at - state.arrival_minute;
                travel_minutes = edge.duration();
                if let Some(prev) = last_real_leg(&state.legs) {
                    if prev.id() != edge.id() {
                        transfers += 1;
                    }
                }
                boarded_leg = edge.with_boarding(departs_at);
            }

            let arrival_minute = departs_at + travel_minutes;
            let total_time = state.total_time + waiting_minutes + travel_minutes;

            let mut cost = match criterion {
                Criterion::Time => total_time as f64,
                Criterion::Price => {
                    state.cost + if edge.is_transfer() { 0.0 } else { edge.price() }
                }
                Criterion::Transfers => f64::from(transfers),
            };
            if edge.is_transfer() {
                cost += self.config.transfer_penalty(criterion);
            }

            if state.legs.len() + 1 > self.config.max_legs
                || total_time > self.config.max_total_time
                || transfers > self.config.max_transfers
                || waiting_minutes < 0
            {
                trace!(leg = edge.id(), "successor pruned");
                continue;
            }

            let mut legs = state.legs.clone();
            legs.push(boarded_leg);
            let mut visited = state.visited.clone();
            visited.insert(edge.to());

            frontier.push(Reverse(FrontierEntry {
                seq: *seq,
                state: SearchState {
                    station: edge.to(),
                    legs,
                    cost,
                    arrival_minute,
                    total_time,
                    transfers,
                    visited,
                    last_mode: Some(self.mode_of(edge)),
                },
            }));
            *seq += 1;
        }
    }

    fn mode_of(&self, edge: &Departure) -> TravelMode {
        if edge.is_transfer() {
            return TravelMode::Transfer;
        }
        match self.country.station(edge.from()).map(Station::kind) {
            Some(StationKind::Train) => TravelMode::Train,
            _ => TravelMode::Bus,
        }
    }
}

/// The most recent non-transfer leg of a path.
fn last_real_leg(legs: &[Departure]) -> Option<&Departure> {
    legs.iter().rev().find(|leg| !leg.is_transfer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CountryBuilder;

    #[test]
    fn same_city_is_rejected() {
        let mut builder = CountryBuilder::new(1, 1);
        let city = builder.add_city("Sarajevo", 0, 0).unwrap();
        let country = builder.build();
        let graph = Graph::build(&country);
        let config = SearchConfig::default();
        let planner = Planner::new(&country, &graph, &config);

        let result = planner.k_shortest(city, city, Criterion::Time, 3);
        assert_eq!(result.unwrap_err(), QueryError::SameCity);
    }

    #[test]
    fn zero_k_is_rejected() {
        let mut builder = CountryBuilder::new(1, 2);
        let c1 = builder.add_city("Sarajevo", 0, 0).unwrap();
        let c2 = builder.add_city("Mostar", 0, 1).unwrap();
        let country = builder.build();
        let graph = Graph::build(&country);
        let config = SearchConfig::default();
        let planner = Planner::new(&country, &graph, &config);

        let result = planner.k_shortest(c1, c2, Criterion::Time, 0);
        assert_eq!(result.unwrap_err(), QueryError::InvalidK);
    }

    #[test]
    fn unknown_city_is_rejected() {
        let mut builder = CountryBuilder::new(1, 1);
        let city = builder.add_city("Sarajevo", 0, 0).unwrap();
        let country = builder.build();
        let graph = Graph::build(&country);
        let config = SearchConfig::default();
        let planner = Planner::new(&country, &graph, &config);

        let ghost = CityIdx(99);
        let result = planner.k_shortest(city, ghost, Criterion::Time, 3);
        assert_eq!(result.unwrap_err(), QueryError::UnknownCity(ghost));
    }

    #[test]
    fn stationless_endpoint_returns_empty() {
        let mut builder = CountryBuilder::new(1, 2);
        let c1 = builder.add_city("Sarajevo", 0, 0).unwrap();
        let c2 = builder.add_city("Mostar", 0, 1).unwrap();
        builder.add_station(c1, StationKind::Bus).unwrap();
        // Mostar has no stations
        let country = builder.build();
        let graph = Graph::build(&country);
        let config = SearchConfig::default();
        let planner = Planner::new(&country, &graph, &config);

        let result = planner.k_shortest(c1, c2, Criterion::Time, 3).unwrap();
        assert!(result.routes.is_empty());
        assert_eq!(result.status, SearchStatus::NoRoute);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn frontier_orders_by_cost_then_insertion() {
        let state = |cost: f64| SearchState {
            station: StationIdx(0),
            legs: Vec::new(),
            cost,
            arrival_minute: 0,
            total_time: 0,
            transfers: 0,
            visited: HashSet::new(),
            last_mode: None,
        };

        let mut frontier = Frontier::new();
        frontier.push(Reverse(FrontierEntry { seq: 0, state: state(5.0) }));
        frontier.push(Reverse(FrontierEntry { seq: 1, state: state(1.0) }));
        frontier.push(Reverse(FrontierEntry { seq: 2, state: state(5.0) }));

        let Reverse(first) = frontier.pop().unwrap();
        assert_eq!(first.state.cost, 1.0);
        // Equal costs pop in insertion order
        let Reverse(second) = frontier.pop().unwrap();
        assert_eq!(second.seq, 0);
        let Reverse(third) = frontier.pop().unwrap();
        assert_eq!(third.seq, 2);
    }
}
