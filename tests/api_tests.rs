use axum_test::TestServer;
use serde_json::json;

use bookvoyage_api::models::{Book, PopularBook};
use bookvoyage_api::routes::create_router;
use bookvoyage_api::state::AppState;
use bookvoyage_api::store::ArtifactStore;

fn book(title: &str, author: &str, rating: f64) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        image_url: format!("http://covers.example/{}.jpg", title.replace(' ', "-")),
        avg_rating: rating,
    }
}

/// Fixture catalog: four titles with a symmetric similarity matrix.
/// Neighbors of "The Hobbit" by score: "The Fellowship of the Ring" (0.9),
/// "The Two Towers" (0.8), "Dune" (0.1).
fn fixture_store() -> ArtifactStore {
    let titles: Vec<String> = [
        "The Hobbit",
        "The Two Towers",
        "The Fellowship of the Ring",
        "Dune",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();

    let books = vec![
        book("The Hobbit", "J.R.R. Tolkien", 4.3),
        book("The Two Towers", "J.R.R. Tolkien", 4.4),
        book("The Fellowship of the Ring", "J.R.R. Tolkien", 4.4),
        book("Dune", "Frank Herbert", 4.2),
        // duplicate metadata row; the first one above must win
        book("Dune", "F. Herbert", 1.0),
    ];

    let similarity = vec![
        vec![1.0, 0.8, 0.9, 0.1],
        vec![0.8, 1.0, 0.3, 0.2],
        vec![0.9, 0.3, 1.0, 0.4],
        vec![0.1, 0.2, 0.4, 1.0],
    ];

    let popular = vec![
        PopularBook {
            title: "The Fellowship of the Ring".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            image_url: "http://covers.example/fellowship.jpg".to_string(),
            avg_rating: 4.4,
            num_ratings: 310,
        },
        PopularBook {
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            image_url: "http://covers.example/hobbit.jpg".to_string(),
            avg_rating: 4.3,
            num_ratings: 280,
        },
    ];

    ArtifactStore::from_tables(popular, books, titles, similarity).unwrap()
}

fn create_test_server() -> TestServer {
    let state = AppState::new(fixture_store());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_list_selectable_titles() {
    let server = create_test_server();

    let response = server.get("/api/v1/books").await;
    response.assert_status_ok();

    let titles: Vec<String> = response.json();
    assert_eq!(titles.len(), 4);
    assert_eq!(titles[0], "The Hobbit");
    assert_eq!(titles[3], "Dune");
}

#[tokio::test]
async fn test_popular_books_listing() {
    let server = create_test_server();

    let response = server.get("/api/v1/books/popular").await;
    response.assert_status_ok();

    let popular: Vec<serde_json::Value> = response.json();
    // default limit is 50, capped at the table length
    assert_eq!(popular.len(), 2);
    assert_eq!(popular[0]["title"], "The Fellowship of the Ring");
    for entry in &popular {
        assert!(entry["avg_rating"].as_f64().unwrap() >= 0.0);
        assert!(entry["num_ratings"].as_u64().is_some());
    }
}

#[tokio::test]
async fn test_popular_books_respects_limit() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/books/popular")
        .add_query_param("limit", 1)
        .await;
    response.assert_status_ok();

    let popular: Vec<serde_json::Value> = response.json();
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0]["title"], "The Fellowship of the Ring");
}

#[tokio::test]
async fn test_recommendations_for_known_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "The Hobbit" }))
        .await;
    response.assert_status_ok();

    let cards: Vec<serde_json::Value> = response.json();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0]["title"], "The Fellowship of the Ring");
    assert_eq!(cards[1]["title"], "The Two Towers");
    assert_eq!(cards[2]["title"], "Dune");

    // the duplicate metadata row for "Dune" was deduplicated on load
    assert_eq!(cards[2]["author"], "Frank Herbert");
    // the query title never recommends itself
    assert!(cards.iter().all(|c| c["title"] != "The Hobbit"));
}

#[tokio::test]
async fn test_recommendations_unknown_title_is_not_found() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "No Such Book" }))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("No Such Book"));
}

#[tokio::test]
async fn test_request_id_echoed_on_response() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert!(response.maybe_header("x-request-id").is_some());
}
