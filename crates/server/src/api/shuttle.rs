use std::{collections::HashMap, sync::Arc};

use crate::{dto::RecommendationDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shuttlego::{
    catalog::Direction,
    nearest::{DEFAULT_ROUTE_OPTIONS, find_nearest, find_top_routes},
    shared::{geo::Coordinate, time::Time},
};

struct ShuttleQuery {
    site_id: String,
    rider: Coordinate,
    time: Option<Time>,
    count: usize,
}

/// The engine assumes well formed numeric input, so malformed or
/// out-of-range rider coordinates are rejected here.
fn parse_query(params: &HashMap<String, String>) -> Result<ShuttleQuery, StatusCode> {
    let site_id = params
        .get("site_id")
        .ok_or(StatusCode::BAD_REQUEST)?
        .clone();
    let latitude: f64 = params
        .get("lat")
        .ok_or(StatusCode::BAD_REQUEST)?
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let longitude: f64 = params
        .get("lng")
        .ok_or(StatusCode::BAD_REQUEST)?
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let time = match params.get("time") {
        Some(value) if !value.trim().is_empty() => {
            Some(Time::from_hm(value).ok_or(StatusCode::BAD_REQUEST)?)
        }
        _ => None,
    };
    let count: usize = match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => DEFAULT_ROUTE_OPTIONS,
    };
    Ok(ShuttleQuery {
        site_id,
        rider: Coordinate {
            latitude,
            longitude,
        },
        time,
        count,
    })
}

fn single(
    state: &AppState,
    params: &HashMap<String, String>,
    direction: Direction,
) -> Result<Response, StatusCode> {
    let query = parse_query(params)?;
    // No match is an absent result, not a server error.
    let result = find_nearest(&state.catalog, &query.site_id, direction, &query.rider)
        .map(|rec| RecommendationDto::from(&rec, query.time));
    Ok(Json(result).into_response())
}

fn options(
    state: &AppState,
    params: &HashMap<String, String>,
    direction: Direction,
) -> Result<Response, StatusCode> {
    let query = parse_query(params)?;
    let result: Vec<_> = find_top_routes(
        &state.catalog,
        &query.site_id,
        direction,
        &query.rider,
        query.count,
    )
    .iter()
    .map(|rec| RecommendationDto::from(rec, query.time))
    .collect();
    Ok(Json(result).into_response())
}

pub async fn depart(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    single(&state, &params, Direction::CommuteIn)
}

pub async fn depart_options(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    options(&state, &params, Direction::CommuteIn)
}

pub async fn arrive(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    single(&state, &params, Direction::CommuteOut)
}

pub async fn arrive_options(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    options(&state, &params, Direction::CommuteOut)
}
