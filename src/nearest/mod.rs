use rayon::prelude::*;
use std::collections::HashSet;

use crate::{
    catalog::{Catalog, Direction, Route, Stop},
    shared::geo::{Coordinate, Distance},
};

/// How many distinct routes a multi-option query returns at most.
pub const DEFAULT_ROUTE_OPTIONS: usize = 3;

/// A (distance, stop, route) tuple produced before selection.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub distance: Distance,
    pub stop: &'a Stop,
    pub route: &'a Route,
}

/// One recommended route: the route, its stop nearest to the rider,
/// the route's full path in stop order, and the rider's distance to
/// the boarding stop.
#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub route: &'a Route,
    pub boarding_stop: &'a Stop,
    pub stops: Vec<&'a Stop>,
    pub distance: Distance,
}

/// Every (stop, route) pair reachable from the site in the given
/// direction, with the rider's distance to each stop. Routes are
/// enumerated in catalog order and stops in path order; that order is
/// the tie-break for equal distances downstream.
pub fn build_candidates<'a>(
    catalog: &'a Catalog,
    site_id: &str,
    direction: Direction,
    rider: &Coordinate,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    for route in catalog.routes_for(site_id, direction) {
        for index in route.stops.iter() {
            let stop = &catalog.stops[*index as usize];
            candidates.push(Candidate {
                distance: rider.distance(&stop.coordinate),
                stop,
                route,
            });
        }
    }
    candidates
}

/// Picks up to `k` distinct routes from a candidate list, nearest first.
///
/// The sort is stable and keyed on distance alone, so candidates at
/// exactly equal distance keep their enumeration order. Scanning the
/// sorted list nearest to farthest, the first candidate seen for a route
/// is that route's nearest stop, so one pass collects the result.
pub fn select_top_routes<'a>(
    catalog: &'a Catalog,
    mut candidates: Vec<Candidate<'a>>,
    k: usize,
) -> Vec<Recommendation<'a>> {
    candidates.par_sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let mut selected: HashSet<u32> = HashSet::new();
    let mut recommendations = Vec::new();
    for candidate in candidates.into_iter() {
        if recommendations.len() == k {
            break;
        }
        if !selected.insert(candidate.route.index) {
            continue;
        }
        recommendations.push(Recommendation {
            route: candidate.route,
            boarding_stop: candidate.stop,
            stops: catalog.stops_of(&candidate.route.id),
            distance: candidate.distance,
        });
    }
    recommendations
}

/// The k-option query: candidates for (site, direction), then the top
/// `k` distinct routes by boarding-stop distance.
pub fn find_top_routes<'a>(
    catalog: &'a Catalog,
    site_id: &str,
    direction: Direction,
    rider: &Coordinate,
    k: usize,
) -> Vec<Recommendation<'a>> {
    let candidates = build_candidates(catalog, site_id, direction, rider);
    select_top_routes(catalog, candidates, k)
}

/// The single-option query. Same selection as [`find_top_routes`] with
/// k = 1, shaped for callers that want exactly one recommendation.
pub fn find_nearest<'a>(
    catalog: &'a Catalog,
    site_id: &str,
    direction: Direction,
    rider: &Coordinate,
) -> Option<Recommendation<'a>> {
    find_top_routes(catalog, site_id, direction, rider, 1)
        .into_iter()
        .next()
}
