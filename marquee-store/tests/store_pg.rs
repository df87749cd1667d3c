//! Repository tests. The `#[ignore]` suite needs a scratch Postgres:
//!   DATABASE_URL=... cargo test -p marquee-store -- --ignored
//! The precondition tests use a lazy pool and never touch the network.

use chrono::{Duration, Utc};
use marquee_catalog::{RoomTemplate, RowTemplate};
use marquee_domain::{EngineError, SeatType};
use marquee_store::{CatalogRepository, SeatRepository, UserRepository};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://unused@localhost:1/unused")
        .expect("parse lazy pool url")
}

fn room() -> RoomTemplate {
    RoomTemplate::new(vec![RowTemplate {
        row: "A".to_string(),
        seat_types: vec![SeatType::Standard, SeatType::Vip],
    }])
}

#[tokio::test]
async fn create_show_rejects_inverted_times_before_any_mutation() {
    let pool = lazy_pool();
    let start = Utc::now() + Duration::hours(1);
    let err = CatalogRepository::create_show(
        &pool,
        Uuid::new_v4(),
        start,
        start - Duration::minutes(30),
        Decimal::new(1000, 2),
        &room(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest(_)));
}

#[tokio::test]
async fn create_show_rejects_a_degenerate_template_before_any_mutation() {
    let pool = lazy_pool();
    let start = Utc::now() + Duration::hours(1);
    let err = CatalogRepository::create_show(
        &pool,
        Uuid::new_v4(),
        start,
        start + Duration::hours(2),
        Decimal::new(1000, 2),
        &RoomTemplate::new(vec![]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest(_)));
}

async fn pg_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a scratch Postgres database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

#[tokio::test]
#[ignore = "needs a Postgres at DATABASE_URL"]
async fn shows_list_in_start_time_order_scoped_to_a_movie() {
    let pool = pg_pool().await;
    let movie = CatalogRepository::create_movie(&pool, "Late Frame", "A drama", 95)
        .await
        .expect("create movie");

    let base = Utc::now() + Duration::days(1);
    for offset in [6i64, 2, 4] {
        CatalogRepository::create_show(
            &pool,
            movie.id,
            base + Duration::hours(offset),
            base + Duration::hours(offset + 2),
            Decimal::new(1200, 2),
            &room(),
        )
        .await
        .expect("create show");
    }

    let listings = CatalogRepository::list_shows(&pool, Some(movie.id), false)
        .await
        .expect("list shows");
    assert_eq!(listings.len(), 3);
    assert!(listings
        .windows(2)
        .all(|w| w[0].show.start_time <= w[1].show.start_time));
    assert!(listings.iter().all(|l| l.show.movie_id == movie.id));
    // Nothing is booked yet, so every listing reports the full room free.
    assert!(listings.iter().all(|l| l.free_seats == 2));
}

#[tokio::test]
#[ignore = "needs a Postgres at DATABASE_URL"]
async fn listing_shows_for_an_unknown_movie_is_not_found() {
    let pool = pg_pool().await;
    let missing = Uuid::new_v4();
    let err = CatalogRepository::list_shows(&pool, Some(missing), false)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "movie", id } if id == missing));
}

#[tokio::test]
#[ignore = "needs a Postgres at DATABASE_URL"]
async fn seat_inventory_is_copied_from_the_template_in_label_order() {
    let pool = pg_pool().await;
    let movie = CatalogRepository::create_movie(&pool, "Matinee", "A comedy", 101)
        .await
        .expect("create movie");
    let start = Utc::now() + Duration::days(1);
    let show = CatalogRepository::create_show(
        &pool,
        movie.id,
        start,
        start + Duration::hours(2),
        Decimal::new(850, 2),
        &room(),
    )
    .await
    .expect("create show");

    let seats = SeatRepository::list_seats(&pool, show.id).await.expect("list seats");
    let labels: Vec<&str> = seats.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["A1", "A2"]);
    assert_eq!(seats[0].seat_type, SeatType::Standard);
    assert_eq!(seats[1].seat_type, SeatType::Vip);

    // Before any booking, every seat is available.
    let free = SeatRepository::available_seat_ids(&pool, show.id)
        .await
        .expect("availability");
    assert_eq!(free.len(), 2);
}

#[tokio::test]
#[ignore = "needs a Postgres at DATABASE_URL"]
async fn unknown_user_resolves_to_not_found() {
    let pool = pg_pool().await;
    let missing = Uuid::new_v4();
    let err = UserRepository::get_user(&pool, missing).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "user", id } if id == missing));
}
