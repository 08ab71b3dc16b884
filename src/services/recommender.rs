use std::cmp::Ordering;

use thiserror::Error;

use crate::models::Book;
use crate::store::ArtifactStore;

/// Number of neighbors returned per lookup
pub const NEIGHBOR_COUNT: usize = 10;

/// Error types for the neighbor lookup
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("no book titled {0:?} in the catalog")]
    UnknownTitle(String),

    #[error("no metadata row for recommended title {0:?}")]
    MissingMetadata(String),
}

/// Finds the nearest neighbors of a title in the similarity matrix
///
/// Resolves the title's matrix row, ranks every other title by its
/// similarity score, and joins the top matches back to the metadata table.
/// The sort is stable, so equal scores keep matrix order. The query title
/// itself is never part of the result.
pub fn recommend(store: &ArtifactStore, title: &str) -> Result<Vec<Book>, RecommendError> {
    let row = store
        .row_of(title)
        .ok_or_else(|| RecommendError::UnknownTitle(title.to_string()))?;

    let mut ranked: Vec<(usize, f32)> = store
        .similarity_row(row)
        .iter()
        .copied()
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut neighbors = Vec::with_capacity(NEIGHBOR_COUNT);
    for (index, _score) in ranked
        .into_iter()
        .filter(|(index, _)| *index != row)
        .take(NEIGHBOR_COUNT)
    {
        let neighbor = store.title_at(index);
        let book = store
            .book(neighbor)
            .ok_or_else(|| RecommendError::MissingMetadata(neighbor.to_string()))?;
        neighbors.push(book.clone());
    }

    Ok(neighbors)
}
