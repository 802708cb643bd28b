use std::{fmt::Display, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::shared::{geo::Coordinate, time::Departure};

/// The travel leg a route serves. Scopes which routes are eligible
/// for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    CommuteIn,
    CommuteOut,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commute_in" => Ok(Self::CommuteIn),
            "commute_out" => Ok(Self::CommuteOut),
            _ => Err(()),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::CommuteIn => f.write_str("commute_in"),
            Direction::CommuteOut => f.write_str("commute_out"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Site {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub index: u32,
    pub id: Arc<str>,
    pub site_id: Arc<str>,
    pub direction: Direction,
    pub name: Arc<str>,
    pub operator: Option<Arc<str>>,
    pub notes: Option<Arc<str>>,
    /// Stop indexes into the catalog's stop slab, in path order.
    pub stops: Box<[u32]>,
    /// Scheduled departures in start order.
    pub departures: Box<[Departure]>,
}

#[derive(Debug, Default, Clone)]
pub struct Stop {
    pub index: u32,
    pub route_id: Arc<str>,
    pub sequence: u16,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}
