use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::models::PopularBook;
use crate::state::AppState;

/// Default length of the popular-books listing
const DEFAULT_POPULAR_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    limit: Option<usize>,
}

/// Handler for the selectable-titles listing
///
/// Returns the pivot index in matrix row order; clients populate their
/// selection widget from this closed set.
pub async fn titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.titles().to_vec())
}

/// Handler for the precomputed popular-books listing
pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularQuery>,
) -> Json<Vec<PopularBook>> {
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    Json(state.store.top_rated(limit).to_vec())
}
