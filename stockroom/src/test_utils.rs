//! Test utilities for handler and extractor tests.
//!
//! The pool returned by [`lazy_test_state`] connects lazily, so tests that
//! exercise validation and gating paths (which reject before acquiring a
//! connection) run without a live database.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use sqlx::PgPool;

use crate::{AppState, config::Config, types::ADMIN_ROLE};

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Config::default()
    }
}

/// Application state over a lazily-connected pool. No connection is opened
/// until a handler actually acquires one.
pub fn lazy_test_state() -> AppState {
    let pool = PgPool::connect_lazy("postgres://localhost:5432/stockroom").expect("lazy pool creation cannot fail on a valid URL");

    AppState::builder().db(pool).config(create_test_config()).build()
}

pub fn lazy_test_server() -> TestServer {
    let router = crate::build_router(lazy_test_state()).expect("router should build");
    TestServer::new(router).expect("test server should start")
}

/// The three session flag headers a logged-in frontend would send.
pub fn session_headers(username: &str, role: &str) -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (
            HeaderName::from_static("x-stockroom-user-id"),
            HeaderValue::from_static("550e8400-e29b-41d4-a716-446655440000"),
        ),
        (
            HeaderName::from_static("x-stockroom-username"),
            HeaderValue::from_str(username).expect("test username should be a valid header value"),
        ),
        (
            HeaderName::from_static("x-stockroom-role"),
            HeaderValue::from_str(role).expect("test role should be a valid header value"),
        ),
    ]
}

pub fn admin_headers(username: &str) -> Vec<(HeaderName, HeaderValue)> {
    session_headers(username, ADMIN_ROLE)
}
