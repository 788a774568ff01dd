//! OpenAPI documentation configuration.
//!
//! One document covers both surfaces: the authentication endpoints at
//! `/authentication/*` and the product API at `/api/v1/*`. Served
//! interactively at `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        description = "Inventory dashboard backend: login plus product CRUD."
    ),
    paths(
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::products::list_products,
        api::handlers::products::create_product,
        api::handlers::products::update_product,
        api::handlers::products::delete_product,
    ),
    components(
        schemas(
            api::models::auth::LoginRequest,
            api::models::auth::LoginResponse,
            api::models::auth::LogoutResponse,
            api::models::products::ProductCreate,
            api::models::products::ProductUpdate,
            api::models::products::ProductResponse,
        )
    ),
    tags(
        (name = "authentication", description = "Login and logout. There are no server-side sessions; the response fields are stored by the frontend and echoed back as headers."),
        (name = "products", description = "Product listing and admin-only mutations.")
    )
)]
pub struct ApiDoc;
