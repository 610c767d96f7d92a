//! Final ordering and identity of emitted routes.
//!
//! The frontier orders candidate states by their running criterion cost,
//! which includes transfer penalties; the output list is re-sorted here by
//! the plain totals so the caller sees a clean total order.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::domain::{Country, Departure, Route};

use super::criterion::Criterion;

/// Sorts routes by the criterion's total order:
/// TIME by total time; PRICE by (total price, total time); TRANSFERS by
/// (transfer count, total time). The sort is stable, so equal routes keep
/// their emission order.
pub fn sort_routes(routes: &mut [Route], criterion: Criterion) {
    routes.sort_by(|a, b| compare_routes(a, b, criterion));
}

fn compare_routes(a: &Route, b: &Route, criterion: Criterion) -> Ordering {
    match criterion {
        Criterion::Time => a.total_time().cmp(&b.total_time()),
        Criterion::Price => a
            .total_price()
            .total_cmp(&b.total_price())
            .then(a.total_time().cmp(&b.total_time())),
        Criterion::Transfers => a
            .transfer_count()
            .cmp(&b.transfer_count())
            .then(a.total_time().cmp(&b.total_time())),
    }
}

/// Canonical string identity of a leg sequence, used to suppress duplicate
/// itineraries: two paths over the same legs at the same scheduled times
/// are the same journey no matter what order the search found them in.
pub fn path_signature(country: &Country, legs: &[Departure]) -> String {
    let mut signature = String::new();
    for (i, leg) in legs.iter().enumerate() {
        let _ = write!(
            signature,
            "{i}:{from}->{to}_{id}_{dep};",
            from = country.station_label(leg.from()),
            to = country.station_label(leg.to()),
            id = leg.id(),
            dep = leg.departure_time(),
        );
    }
    signature
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CityIdx, CountryBuilder, StationIdx, StationKind, TimeOfDay};

    fn tod(s: &str) -> TimeOfDay {
        TimeOfDay::parse_hhmm(s).unwrap()
    }

    fn leg(id: &str, from: usize, to: usize, price: f64) -> Departure {
        Departure::new(
            id,
            StationIdx(from),
            StationIdx(to),
            tod("08:00"),
            tod("09:00"),
            price,
            0,
        )
    }

    /// A direct route with the given totals.
    fn direct(id: &str, price: f64, total_time: i64) -> Route {
        Route::new(CityIdx(0), CityIdx(1), vec![leg(id, 0, 1, price)], total_time).unwrap()
    }

    /// A route with one transfer and the given totals.
    fn with_change(price: f64, total_time: i64) -> Route {
        let legs = vec![leg("x1", 0, 1, price / 2.0), leg("x2", 1, 2, price / 2.0)];
        Route::new(CityIdx(0), CityIdx(1), legs, total_time).unwrap()
    }

    #[test]
    fn time_orders_by_total_time() {
        let mut routes = vec![direct("a", 5.0, 300), direct("b", 1.0, 120)];
        sort_routes(&mut routes, Criterion::Time);

        assert_eq!(routes[0].total_time(), 120);
        assert_eq!(routes[1].total_time(), 300);
    }

    #[test]
    fn price_ties_break_on_time() {
        // Same price, 90 vs 120 minutes: the faster route wins
        let mut routes = vec![direct("a", 30.0, 120), direct("b", 30.0, 90)];
        sort_routes(&mut routes, Criterion::Price);

        assert_eq!(routes[0].total_time(), 90);
        assert_eq!(routes[1].total_time(), 120);
    }

    #[test]
    fn price_orders_by_price_first() {
        let mut routes = vec![direct("a", 50.0, 60), direct("b", 10.0, 600)];
        sort_routes(&mut routes, Criterion::Price);

        assert_eq!(routes[0].total_price(), 10.0);
    }

    #[test]
    fn transfers_order_then_time() {
        let mut routes = vec![
            with_change(10.0, 100),
            direct("a", 10.0, 400),
            with_change(10.0, 90),
        ];
        sort_routes(&mut routes, Criterion::Transfers);

        assert_eq!(routes[0].transfer_count(), 0);
        assert_eq!(routes[1].total_time(), 90);
        assert_eq!(routes[2].total_time(), 100);
    }

    #[test]
    fn signature_identifies_leg_sequences() {
        let mut builder = CountryBuilder::new(1, 2);
        let c1 = builder.add_city("Sarajevo", 0, 0).unwrap();
        let c2 = builder.add_city("Mostar", 0, 1).unwrap();
        let s1 = builder.add_station(c1, StationKind::Bus).unwrap();
        let s2 = builder.add_station(c2, StationKind::Bus).unwrap();
        builder
            .add_departure("b1", s1, s2, tod("08:00"), 60, 10.0, 0)
            .unwrap();
        builder
            .add_departure("b2", s1, s2, tod("09:00"), 60, 10.0, 0)
            .unwrap();
        let country = builder.build();

        let legs1 = vec![country.station(s1).unwrap().departures()[0].clone()];
        let legs2 = vec![country.station(s1).unwrap().departures()[1].clone()];

        let sig1 = path_signature(&country, &legs1);
        let sig2 = path_signature(&country, &legs2);

        assert_eq!(sig1, "0:A_0_0->A_0_1_b1_08:00;");
        assert_ne!(sig1, sig2);

        // The same sequence found twice signs identically, boarding stamp or not
        let stamped = vec![legs1[0].with_boarding(480)];
        assert_eq!(path_signature(&country, &stamped), sig1);
    }
}
