use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Book, PopularBook};

/// File name of the popularity table artifact
pub const POPULAR_FILE: &str = "popular.json";
/// File name of the book metadata table artifact
pub const BOOKS_FILE: &str = "books.json";
/// File name of the pivot index artifact
pub const PIVOT_FILE: &str = "pivot.json";
/// File name of the similarity matrix artifact
pub const SIMILARITY_FILE: &str = "similarity.json";

/// Error types for artifact loading
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("similarity matrix has {rows} rows but the pivot index has {titles} titles")]
    RowCountMismatch { rows: usize, titles: usize },

    #[error("similarity matrix row {row} has {len} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("popularity row for {title:?} has invalid average rating {rating}")]
    InvalidRating { title: String, rating: f64 },
}

/// In-memory store of the four precomputed artifact tables
///
/// Loaded once at startup and shared read-only for the lifetime of the
/// process. The pivot index gives each selectable title its row in the
/// similarity matrix; the metadata table is deduplicated by title on load,
/// keeping the first row.
pub struct ArtifactStore {
    popular: Vec<PopularBook>,
    books_by_title: HashMap<String, Book>,
    titles: Vec<String>,
    row_index: HashMap<String, usize>,
    similarity: Vec<Vec<f32>>,
}

impl ArtifactStore {
    /// Loads the four artifact tables from `dir`
    ///
    /// Any unreadable file, malformed table, or shape mismatch is an error;
    /// there is no partial load.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let popular: Vec<PopularBook> = read_table(dir.join(POPULAR_FILE))?;
        let books: Vec<Book> = read_table(dir.join(BOOKS_FILE))?;
        let titles: Vec<String> = read_table(dir.join(PIVOT_FILE))?;
        let similarity: Vec<Vec<f32>> = read_table(dir.join(SIMILARITY_FILE))?;

        Self::from_tables(popular, books, titles, similarity)
    }

    /// Assembles a store from already-deserialized tables, validating shape
    pub fn from_tables(
        popular: Vec<PopularBook>,
        books: Vec<Book>,
        titles: Vec<String>,
        similarity: Vec<Vec<f32>>,
    ) -> Result<Self, ArtifactError> {
        if similarity.len() != titles.len() {
            return Err(ArtifactError::RowCountMismatch {
                rows: similarity.len(),
                titles: titles.len(),
            });
        }

        for (row, scores) in similarity.iter().enumerate() {
            if scores.len() != titles.len() {
                return Err(ArtifactError::RaggedRow {
                    row,
                    len: scores.len(),
                    expected: titles.len(),
                });
            }
        }

        for entry in &popular {
            if !entry.avg_rating.is_finite() || entry.avg_rating < 0.0 {
                return Err(ArtifactError::InvalidRating {
                    title: entry.title.clone(),
                    rating: entry.avg_rating,
                });
            }
        }

        // First row per title wins, matching the offline table's ordering
        let mut books_by_title: HashMap<String, Book> = HashMap::with_capacity(books.len());
        for book in books {
            books_by_title.entry(book.title.clone()).or_insert(book);
        }

        let mut row_index: HashMap<String, usize> = HashMap::with_capacity(titles.len());
        for (row, title) in titles.iter().enumerate() {
            row_index.entry(title.clone()).or_insert(row);
        }

        Ok(Self {
            popular,
            books_by_title,
            titles,
            row_index,
            similarity,
        })
    }

    /// The closed set of selectable titles, in matrix row order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title at a given similarity matrix row
    pub fn title_at(&self, row: usize) -> &str {
        &self.titles[row]
    }

    /// Similarity matrix row for a given pivot row
    pub fn similarity_row(&self, row: usize) -> &[f32] {
        &self.similarity[row]
    }

    /// Matrix row of a title, if the title is in the pivot index
    pub fn row_of(&self, title: &str) -> Option<usize> {
        self.row_index.get(title).copied()
    }

    /// Metadata for a title, if present
    pub fn book(&self, title: &str) -> Option<&Book> {
        self.books_by_title.get(title)
    }

    /// First `limit` rows of the popularity table, in its offline order
    pub fn top_rated(&self, limit: usize) -> &[PopularBook] {
        &self.popular[..limit.min(self.popular.len())]
    }

    /// Number of rows in the popularity table
    pub fn popular_len(&self) -> usize {
        self.popular.len()
    }
}

fn read_table<T: DeserializeOwned>(path: PathBuf) -> Result<T, ArtifactError> {
    let file = File::open(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| ArtifactError::Parse { path, source })
}
