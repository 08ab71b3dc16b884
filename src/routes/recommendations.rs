use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{error::AppResult, models::Book, services::recommender, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
}

/// Handler for the recommendations endpoint
///
/// Looks up the nearest neighbors of the requested title. An unknown title
/// or a broken metadata join surfaces as a JSON error body; the service
/// keeps serving.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<Book>>> {
    let recommendations = recommender::recommend(&state.store, &request.title)?;
    Ok(Json(recommendations))
}
