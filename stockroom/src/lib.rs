//! Stockroom: a small self-hostable inventory dashboard.
//!
//! One binary serves everything:
//! - An embedded single-page frontend (login screen and product dashboard)
//! - Authentication endpoints at `/authentication/*`
//! - A product CRUD API at `/api/v1/*`
//! - Interactive API docs at `/docs`
//!
//! ## Session model
//!
//! There are no server-side sessions. After a successful login the frontend
//! stores the returned `user_id`, `username`, and `role` in browser local
//! storage and echoes them back on every API call as plain HTTP headers. The
//! server only checks that the flags are present; the role flag alone gates
//! the admin-only product mutations. This trust model is intended for
//! single-tenant installations behind a private network.
//!
//! ## Architecture
//!
//! ```text
//! main.rs -> Application::new(config) -> serve()
//!               |- PgPool + migrations + bootstrap admin user
//!               |- build_router(state)
//!                     |- /authentication/{login,logout}
//!                     |- /api/v1/products[...]
//!                     |- /healthz, /docs
//!                     |- embedded SPA fallback
//! ```
//!
//! ## Database migrations
//!
//! Migrations are embedded in the binary and run automatically on startup:
//!
//! ```ignore
//! stockroom::migrator().run(&pool).await?;
//! ```

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, patch, post},
};
use bon::Builder;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod static_assets;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

pub use config::Config;

use crate::{
    config::CorsOrigin,
    db::{
        handlers::{Repository, Users},
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    openapi::ApiDoc,
    types::{ADMIN_ROLE, UserId},
};

/// Shared application state passed to all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the stockroom database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the bootstrap admin user if it doesn't exist.
///
/// Idempotent: creates the admin user on first startup, or updates the
/// password on later startups when one is configured. Returns the user ID of
/// the created or existing admin user.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(username: &str, password: Option<&str>, db: &PgPool) -> anyhow::Result<UserId> {
    let mut tx = db.begin().await?;
    let mut user_repo = Users::new(&mut tx);

    if let Some(existing_user) = user_repo.get_by_username(username).await? {
        // User exists - update password if one is configured
        if let Some(password) = password {
            user_repo
                .update(
                    existing_user.id,
                    &UserUpdateDBRequest {
                        password: Some(password.to_string()),
                        ..Default::default()
                    },
                )
                .await?;
        }
        tx.commit().await?;
        return Ok(existing_user.id);
    }

    // No configured password means a random one: the account then exists but
    // cannot be logged into until the password is set.
    let password = match password {
        Some(password) => password.to_string(),
        None => uuid::Uuid::new_v4().to_string(),
    };

    let created_user = user_repo
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password,
            role: ADMIN_ROLE.to_string(),
        })
        .await?;

    tx.commit().await?;
    info!(username = %username, "Created bootstrap admin user");
    Ok(created_user.id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
///
/// This constructs the complete Axum router with:
/// - Authentication routes (login, logout)
/// - Product API routes under `/api/v1`
/// - Interactive API docs at `/docs`
/// - Static asset serving and SPA fallback
/// - CORS configuration and tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Authentication routes at root level, matching where the frontend posts
    let auth_routes = Router::new()
        .route("/authentication/login", post(api::handlers::auth::login))
        .route("/authentication/logout", post(api::handlers::auth::logout))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/products", get(api::handlers::products::list_products))
        .route("/products", post(api::handlers::products::create_product))
        .route("/products/{id}", patch(api::handlers::products::update_product))
        .route("/products/{id}", delete(api::handlers::products::delete_product))
        .with_state(state.clone());

    // Serve embedded static assets, falling back to SPA for unmatched routes
    let fallback = get(api::handlers::static_assets::serve_embedded_asset).fallback(get(api::handlers::static_assets::spa_fallback));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/api/v1", api_routes)
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/docs"))
        .fallback_service(fallback);

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled application: database pool, migrations applied, bootstrap
/// admin user in place, and the router ready to serve.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application over an existing pool (used by tests); connects
    /// a fresh pool from the configuration when none is given.
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Starting stockroom with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => pool,
            None => {
                let settings = config.database.pool_settings();
                let mut options = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(settings.max_connections)
                    .min_connections(settings.min_connections)
                    .acquire_timeout(std::time::Duration::from_secs(settings.acquire_timeout_secs));
                // Zero means never recycle
                if settings.idle_timeout_secs > 0 {
                    options = options.idle_timeout(std::time::Duration::from_secs(settings.idle_timeout_secs));
                }
                if settings.max_lifetime_secs > 0 {
                    options = options.max_lifetime(std::time::Duration::from_secs(settings.max_lifetime_secs));
                }
                options.connect(config.database.url()).await?
            }
        };

        migrator().run(&pool).await?;

        create_initial_admin_user(&config.admin_username, config.admin_password.as_deref(), &pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> anyhow::Result<axum_test::TestServer> {
        Ok(axum_test::TestServer::new(self.router)?)
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Stockroom listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::lazy_test_server;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_healthz() {
        let server = lazy_test_server();

        let response = server.get("/healthz").await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_products_routes_are_mounted_under_api_v1() {
        let server = lazy_test_server();

        // Unauthenticated rather than unrouted
        let response = server.get("/api/v1/products").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = lazy_test_server();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["paths"]["/api/v1/products"].is_object());
    }
}
