use shuttlego::{
    catalog::{Catalog, Direction},
    dataset::{Dataset, RawRoute, RawSite, RawStop},
    nearest::{build_candidates, find_nearest, find_top_routes, select_top_routes},
    shared::geo::Coordinate,
};

const RIDER: Coordinate = Coordinate {
    latitude: 37.0,
    longitude: 127.0,
};

/// Three commute-in routes around the rider, nearest stops in the order
/// r1 (stop a) < r1 (stop b) < r1 (stop c) < r2 (stop d) < r3 (stop e),
/// plus a route with no stops and one commute-out route.
fn scenario_catalog() -> Catalog {
    let dataset = Dataset {
        sites: vec![raw_site("s1"), raw_site("s2")],
        routes: vec![
            raw_route("r1", "s1", "commute_in"),
            raw_route("r2", "s1", "commute_in"),
            raw_route("r3", "s1", "commute_in"),
            raw_route("r-empty", "s1", "commute_in"),
            raw_route("r-out", "s1", "commute_out"),
        ],
        stops: vec![
            // Roughly 0.2km, 0.3km and 0.4km north of the rider.
            raw_stop("r1", 1, "a", 37.0018, 127.0),
            raw_stop("r1", 2, "b", 37.0027, 127.0),
            raw_stop("r1", 3, "c", 37.0036, 127.0),
            // Roughly 0.5km.
            raw_stop("r2", 1, "d", 37.0045, 127.0),
            // Roughly 0.6km.
            raw_stop("r3", 1, "e", 37.0054, 127.0),
            raw_stop("r-out", 1, "f", 37.0018, 127.0),
        ],
        ..Default::default()
    };
    Catalog::new().with_dataset(dataset).unwrap()
}

#[test]
fn top_three_unique_routes_test() {
    let catalog = scenario_catalog();
    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);

    let picks: Vec<_> = result
        .iter()
        .map(|rec| (rec.route.id.as_ref(), rec.boarding_stop.name.as_ref()))
        .collect();
    assert_eq!(picks, [("r1", "a"), ("r2", "d"), ("r3", "e")]);
}

#[test]
fn single_best_test() {
    let catalog = scenario_catalog();

    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 1);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].route.id.as_ref(), "r1");
    assert_eq!(result[0].boarding_stop.name.as_ref(), "a");

    let nearest = find_nearest(&catalog, "s1", Direction::CommuteIn, &RIDER).unwrap();
    assert_eq!(nearest.route.id.as_ref(), "r1");
    assert_eq!(nearest.boarding_stop.name.as_ref(), "a");
    assert_eq!(nearest.stops.len(), 3);
}

#[test]
fn ordering_test() {
    let catalog = scenario_catalog();
    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);
    for pair in result.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[test]
fn uniqueness_test() {
    let catalog = scenario_catalog();
    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);
    let mut ids: Vec<_> = result.iter().map(|rec| rec.route.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), result.len());
}

#[test]
fn cardinality_bound_test() {
    let catalog = scenario_catalog();
    // Only three routes have stops, asking for more returns as many as exist.
    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 5);
    assert_eq!(result.len(), 3);

    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 2);
    assert_eq!(result.len(), 2);

    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 0);
    assert!(result.is_empty());
}

#[test]
fn representative_stop_minimality_test() {
    let catalog = scenario_catalog();
    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);
    for rec in result.iter() {
        for stop in rec.stops.iter() {
            assert!(rec.distance <= RIDER.distance(&stop.coordinate));
        }
    }
}

#[test]
fn determinism_test() {
    let catalog = scenario_catalog();
    let first = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);
    for _ in 0..10 {
        let next = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);
        assert_eq!(next.len(), first.len());
        for (a, b) in first.iter().zip(next.iter()) {
            assert_eq!(a.route.id, b.route.id);
            assert_eq!(a.boarding_stop.index, b.boarding_stop.index);
        }
    }
}

#[test]
fn equal_distance_tie_break_test() {
    // Two routes with their only stops at the exact same coordinate.
    // The stable sort must keep enumeration order: catalog route order,
    // then path order within a route.
    let dataset = Dataset {
        sites: vec![raw_site("s1")],
        routes: vec![
            raw_route("far", "s1", "commute_in"),
            raw_route("tied-1", "s1", "commute_in"),
            raw_route("tied-2", "s1", "commute_in"),
        ],
        stops: vec![
            raw_stop("far", 1, "far", 37.01, 127.0),
            raw_stop("tied-1", 1, "x", 37.002, 127.0),
            raw_stop("tied-2", 1, "y", 37.002, 127.0),
        ],
        ..Default::default()
    };
    let catalog = Catalog::new().with_dataset(dataset).unwrap();

    let result = find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3);
    let ids: Vec<_> = result.iter().map(|rec| rec.route.id.as_ref()).collect();
    assert_eq!(ids, ["tied-1", "tied-2", "far"]);
}

#[test]
fn tied_stops_on_one_route_test() {
    // Two stops of the same route at the same distance: the candidate
    // in path order wins as the representative stop.
    let dataset = Dataset {
        sites: vec![raw_site("s1")],
        routes: vec![raw_route("r1", "s1", "commute_in")],
        stops: vec![
            raw_stop("r1", 1, "first", 37.002, 127.0),
            raw_stop("r1", 2, "second", 37.002, 127.0),
        ],
        ..Default::default()
    };
    let catalog = Catalog::new().with_dataset(dataset).unwrap();

    let nearest = find_nearest(&catalog, "s1", Direction::CommuteIn, &RIDER).unwrap();
    assert_eq!(nearest.boarding_stop.name.as_ref(), "first");
}

#[test]
fn empty_results_test() {
    let catalog = scenario_catalog();

    // Unknown site.
    assert!(build_candidates(&catalog, "no-such-site", Direction::CommuteIn, &RIDER).is_empty());
    assert!(find_top_routes(&catalog, "no-such-site", Direction::CommuteIn, &RIDER, 3).is_empty());
    assert!(find_nearest(&catalog, "no-such-site", Direction::CommuteIn, &RIDER).is_none());

    // Known site with no routes in the direction.
    assert!(find_top_routes(&catalog, "s2", Direction::CommuteOut, &RIDER, 3).is_empty());

    // Empty candidate list straight into the selector.
    assert!(select_top_routes(&catalog, Vec::new(), 3).is_empty());
}

#[test]
fn routes_without_stops_test() {
    // A site whose only routes have empty stop sequences cannot produce
    // a recommendation for any k.
    let dataset = Dataset {
        sites: vec![raw_site("s1")],
        routes: vec![
            raw_route("r1", "s1", "commute_in"),
            raw_route("r2", "s1", "commute_in"),
        ],
        ..Default::default()
    };
    let catalog = Catalog::new().with_dataset(dataset).unwrap();

    assert_eq!(catalog.routes_for("s1", Direction::CommuteIn).len(), 2);
    assert!(build_candidates(&catalog, "s1", Direction::CommuteIn, &RIDER).is_empty());
    assert!(find_top_routes(&catalog, "s1", Direction::CommuteIn, &RIDER, 3).is_empty());
    assert!(find_nearest(&catalog, "s1", Direction::CommuteIn, &RIDER).is_none());
}

#[test]
fn direction_scoping_test() {
    let catalog = scenario_catalog();
    let result = find_top_routes(&catalog, "s1", Direction::CommuteOut, &RIDER, 3);
    let ids: Vec<_> = result.iter().map(|rec| rec.route.id.as_ref()).collect();
    assert_eq!(ids, ["r-out"]);
}

#[test]
fn candidate_enumeration_order_test() {
    let catalog = scenario_catalog();
    let candidates = build_candidates(&catalog, "s1", Direction::CommuteIn, &RIDER);
    let names: Vec<_> = candidates
        .iter()
        .map(|candidate| candidate.stop.name.as_ref())
        .collect();
    // Routes in catalog order, stops in path order within each route.
    assert_eq!(names, ["a", "b", "c", "d", "e"]);
}

fn raw_site(site_id: &str) -> RawSite {
    RawSite {
        site_id: site_id.into(),
        name: format!("{site_id} campus"),
    }
}

fn raw_route(route_id: &str, site_id: &str, direction: &str) -> RawRoute {
    RawRoute {
        route_id: route_id.into(),
        site_id: site_id.into(),
        direction: direction.into(),
        name: format!("{route_id} line"),
        operator: Some("Daeho Tour".into()),
        notes: None,
    }
}

fn raw_stop(route_id: &str, sequence: u16, name: &str, lat: f64, lng: f64) -> RawStop {
    RawStop {
        route_id: route_id.into(),
        sequence,
        name: name.into(),
        lat,
        lng,
    }
}
