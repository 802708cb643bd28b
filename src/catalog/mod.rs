use std::{collections::HashMap, sync::Arc};

mod models;
pub use models::*;
use rayon::prelude::*;
use tracing::debug;

use crate::{
    dataset::{self, Dataset, RawStop},
    shared::time::Departure,
};

type IdToIndex = HashMap<Arc<str>, usize>;
type GroupToIndexes = HashMap<(Arc<str>, Direction), Box<[usize]>>;

/// The read-only aggregate over all sites, routes and stops.
/// Built once at startup, never mutated afterwards, so any number of
/// concurrent readers can query it without coordination.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub sites: Box<[Site]>,
    pub routes: Box<[Route]>,
    pub stops: Box<[Stop]>,

    site_lookup: Arc<IdToIndex>,
    route_lookup: Arc<IdToIndex>,
    group_to_routes: Arc<GroupToIndexes>,
}

impl Catalog {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds the catalog from a loaded dataset, validating references,
    /// directions, coordinate ranges and departure times along the way.
    /// Any violation aborts the build, there is no partial catalog.
    pub fn with_dataset(mut self, dataset: Dataset) -> Result<Self, dataset::Error> {
        // Build site data set
        let mut site_lookup: IdToIndex = HashMap::new();
        let mut sites: Vec<Site> = Vec::new();
        for (i, site) in dataset.sites.into_iter().enumerate() {
            let value = Site {
                index: i as u32,
                id: site.site_id.into(),
                name: site.name.into(),
            };
            site_lookup.insert(value.id.clone(), i);
            sites.push(value);
        }
        self.sites = sites.into();
        self.site_lookup = site_lookup.into();
        debug!("loaded {} sites", self.sites.len());

        // Validate route rows and index them by id
        let mut route_lookup: IdToIndex = HashMap::new();
        let mut route_rows = Vec::with_capacity(dataset.routes.len());
        for (i, route) in dataset.routes.into_iter().enumerate() {
            let direction: Direction = route
                .direction
                .parse()
                .map_err(|_| dataset::Error::UnknownDirection(route.direction.clone()))?;
            if !self.site_lookup.contains_key(route.site_id.as_str()) {
                return Err(dataset::Error::UnknownSite {
                    route_id: route.route_id,
                    site_id: route.site_id,
                });
            }
            let id: Arc<str> = route.route_id.as_str().into();
            if route_lookup.insert(id.clone(), i).is_some() {
                return Err(dataset::Error::DuplicateRoute(id.to_string()));
            }
            route_rows.push((id, direction, route));
        }

        // Group stop rows under their owning route
        let mut stop_buffers: Vec<Vec<RawStop>> = vec![Vec::new(); route_rows.len()];
        for stop in dataset.stops.into_iter() {
            let route_index = route_lookup
                .get(stop.route_id.as_str())
                .ok_or_else(|| dataset::Error::UnknownRoute(stop.route_id.clone()))?;
            stop_buffers[*route_index].push(stop);
        }

        // Group departures under their owning route, kept in start order
        let mut departure_buffers: Vec<Vec<Departure>> = vec![Vec::new(); route_rows.len()];
        for departure in dataset.departures.into_iter() {
            let route_index = route_lookup
                .get(departure.route_id.as_str())
                .ok_or_else(|| dataset::Error::UnknownRoute(departure.route_id.clone()))?;
            let value: Departure = departure
                .departure_time
                .parse()
                .map_err(|_| dataset::Error::InvalidDeparture(departure.departure_time.clone()))?;
            departure_buffers[*route_index].push(value);
        }

        // Assemble routes and the shared stop slab. Routes keep the table's
        // load order, stops keep path order within each route.
        let mut routes: Vec<Route> = Vec::with_capacity(route_rows.len());
        let mut stops: Vec<Stop> = Vec::new();
        let mut group_to_routes: HashMap<(Arc<str>, Direction), Vec<usize>> = HashMap::new();
        for (i, (id, direction, row)) in route_rows.into_iter().enumerate() {
            let mut buffer = std::mem::take(&mut stop_buffers[i]);
            buffer.par_sort_by_key(|stop| stop.sequence);

            let mut stop_indexes = Vec::with_capacity(buffer.len());
            for stop in buffer.into_iter() {
                if !(-90.0..=90.0).contains(&stop.lat) || !(-180.0..=180.0).contains(&stop.lng) {
                    return Err(dataset::Error::CoordinateOutOfRange {
                        stop: stop.name,
                        lat: stop.lat,
                        lng: stop.lng,
                    });
                }
                let index = stops.len() as u32;
                stops.push(Stop {
                    index,
                    route_id: id.clone(),
                    sequence: stop.sequence,
                    name: stop.name.into(),
                    coordinate: (stop.lat, stop.lng).into(),
                });
                stop_indexes.push(index);
            }

            let mut departures = std::mem::take(&mut departure_buffers[i]);
            departures.sort_by_key(|departure| departure.starts());

            let site_id: Arc<str> = row.site_id.into();
            group_to_routes
                .entry((site_id.clone(), direction))
                .or_default()
                .push(i);

            routes.push(Route {
                index: i as u32,
                id,
                site_id,
                direction,
                name: row.name.into(),
                operator: row.operator.map(|val| val.into()),
                notes: row.notes.map(|val| val.into()),
                stops: stop_indexes.into(),
                departures: departures.into(),
            });
        }
        self.routes = routes.into();
        self.stops = stops.into();
        self.route_lookup = route_lookup.into();
        let group_to_routes: GroupToIndexes = group_to_routes
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        self.group_to_routes = group_to_routes.into();
        debug!(
            "loaded {} routes with {} stops",
            self.routes.len(),
            self.stops.len()
        );
        Ok(self)
    }

    /// Every site in load order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Get a site with the given id.
    /// If no site is found with the given id None is returned.
    pub fn site_by_id(&self, id: &str) -> Option<&Site> {
        let site_index = self.site_lookup.get(id)?;
        Some(&self.sites[*site_index])
    }

    /// Get a route with the given id.
    /// If no route is found with the given id None is returned.
    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        let route_index = self.route_lookup.get(id)?;
        Some(&self.routes[*route_index])
    }

    /// Routes serving a site in the given direction, in load order.
    /// Unknown sites and directions without routes yield an empty list.
    pub fn routes_for(&self, site_id: &str, direction: Direction) -> Vec<&Route> {
        let Some(site) = self.site_by_id(site_id) else {
            return Vec::new();
        };
        match self.group_to_routes.get(&(site.id.clone(), direction)) {
            Some(indexes) => indexes.iter().map(|index| &self.routes[*index]).collect(),
            None => Vec::new(),
        }
    }

    /// A route's stops in path order. Unknown routes yield an empty list.
    pub fn stops_of(&self, route_id: &str) -> Vec<&Stop> {
        match self.route_by_id(route_id) {
            Some(route) => route
                .stops
                .iter()
                .map(|index| &self.stops[*index as usize])
                .collect(),
            None => Vec::new(),
        }
    }
}
