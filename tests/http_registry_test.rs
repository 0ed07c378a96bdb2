use bookmarket::core::{BookRegistry, CreateOutcome, Listing, UserRegistry};
use bookmarket::{
    CreateListing, HttpBookRegistry, HttpUserRegistry, InMemoryListingStore, MarketError,
    MarketService, Shape,
};
use chrono::Utc;
use httpmock::prelude::*;
use rust_decimal::Decimal;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn listing(listing_id: i64, isbn: i64, seller: &str) -> Listing {
    Listing {
        listing_id,
        price: Decimal::new(2000, 2),
        condition: "good".to_string(),
        isbn,
        seller_token: seller.to_string(),
        status: "available".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_book_registry_found_and_absent() {
    let server = MockServer::start_async().await;

    let found = server
        .mock_async(|when, then| {
            when.method(GET).path("/books/42");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"isbn": 42, "title": "Hyperion", "author": "Dan Simmons"}));
        })
        .await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/books/7");
            then.status(404);
        })
        .await;

    let books = HttpBookRegistry::new(&server.base_url(), TIMEOUT).unwrap();

    let book = books.fetch(42).await.unwrap().unwrap();
    assert_eq!(book.title, "Hyperion");
    assert_eq!(book.author.as_deref(), Some("Dan Simmons"));

    assert!(books.fetch(7).await.unwrap().is_none());
    assert!(!books.exists(7).await.unwrap());

    found.assert_async().await;
    missing.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_server_error_is_unavailable_not_absent() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/g-1");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/g-2");
            then.status(200).body("not json");
        })
        .await;

    let users = HttpUserRegistry::new(&server.base_url(), TIMEOUT).unwrap();

    assert!(matches!(
        users.fetch("g-1").await,
        Err(MarketError::RegistryUnavailable { registry: "user", .. })
    ));
    assert!(matches!(
        users.fetch("g-2").await,
        Err(MarketError::RegistryUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_projection_marker_versus_outage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/books/1");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/ok");
            then.status(200)
                .json_body(serde_json::json!({"seller_token": "ok", "name": "Kim"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/down");
            then.status(503);
        })
        .await;

    let store = InMemoryListingStore::with_listings(vec![listing(1, 1, "ok"), listing(2, 1, "down")]);
    let market = MarketService::new(
        store,
        HttpBookRegistry::new(&server.base_url(), TIMEOUT).unwrap(),
        HttpUserRegistry::new(&server.base_url(), TIMEOUT).unwrap(),
    );

    // book 404 -> marker
    let projection = market.detail(1, Shape::WithBoth).await.unwrap();
    assert!(projection.is_missing());

    // user registry down -> error, never a marker
    let result = market.detail(2, Shape::WithUser).await;
    assert!(matches!(
        result,
        Err(MarketError::RegistryUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_create_against_remote_registries() {
    let server = MockServer::start_async().await;
    let user_check = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/g-remote");
            then.status(200)
                .json_body(serde_json::json!({"seller_token": "g-remote", "name": "Lee"}));
        })
        .await;
    let book_check = server
        .mock_async(|when, then| {
            when.method(GET).path("/books/99");
            then.status(404);
        })
        .await;

    let market = MarketService::new(
        InMemoryListingStore::new(),
        HttpBookRegistry::new(&server.base_url(), TIMEOUT).unwrap(),
        HttpUserRegistry::new(&server.base_url(), TIMEOUT).unwrap(),
    );

    let outcome = market
        .create(CreateListing {
            price: Decimal::new(1000, 2),
            condition: "fair".to_string(),
            isbn: 99,
            seller_token: "g-remote".to_string(),
            status: "available".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, CreateOutcome::BookNotFound(99));
    user_check.assert_async().await;
    book_check.assert_async().await;
}
