use serde::{Deserialize, Serialize};

/// A book card as returned to the client and as stored in the metadata table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// URL of the cover image
    pub image_url: String,
    /// Average reader rating
    pub avg_rating: f64,
}

/// One row of the precomputed popularity table
///
/// Rows arrive already sorted by the offline ranking formula; the service
/// never reorders them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularBook {
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// URL of the cover image
    pub image_url: String,
    /// Average reader rating
    pub avg_rating: f64,
    /// Number of reviews backing the rating
    pub num_ratings: u32,
}
