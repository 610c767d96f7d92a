//! Transportation graph: per-station outgoing edges.
//!
//! The graph is derived from a [`Country`] once and is immutable afterwards,
//! so it can be shared freely between concurrent queries. Each station's
//! edge list holds its scheduled legs plus, when the city has both
//! stations, one synthetic transfer edge to the sibling station.

use tracing::debug;

use crate::domain::{Country, Departure, StationIdx};

/// Adjacency structure over the station arena.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<Departure>>,
}

impl Graph {
    /// Derive the adjacency structure from a built model.
    ///
    /// Synthetic transfer edges are inserted in both directions between a
    /// city's two stations; a city with a single station gets none.
    pub fn build(country: &Country) -> Graph {
        let mut adjacency = Vec::with_capacity(country.stations().len());
        let mut transfer_edges = 0usize;

        for (idx, station) in country.stations().iter().enumerate() {
            let mut edges = station.departures().to_vec();

            let sibling = country
                .city(station.city())
                .and_then(|city| city.station(station.kind().sibling()));
            if let Some(other) = sibling {
                edges.push(Departure::transfer(
                    StationIdx(idx),
                    other,
                    station.id(),
                    country.station_label(other),
                ));
                transfer_edges += 1;
            }

            adjacency.push(edges);
        }

        let graph = Graph { adjacency };
        debug!(
            stations = graph.station_count(),
            edges = graph.edge_count(),
            transfer_edges,
            "transportation graph built"
        );
        graph
    }

    /// Outgoing edges of a station; empty for an index outside the model.
    pub fn outgoing(&self, station: StationIdx) -> &[Departure] {
        self.adjacency
            .get(station.0)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Number of stations in the graph.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edges, synthetic transfers included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}
