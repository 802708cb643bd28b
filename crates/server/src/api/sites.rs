use std::sync::Arc;

use crate::{dto::SiteDto, state::AppState};
use axum::{Json, extract::State};

pub async fn sites(State(state): State<Arc<AppState>>) -> Json<Vec<SiteDto>> {
    let sites: Vec<_> = state.catalog.sites().iter().map(SiteDto::from).collect();
    Json(sites)
}
