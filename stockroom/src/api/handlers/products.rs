use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::products::{ProductCreate, ProductResponse, ProductUpdate},
    auth::{SessionFlags, require_admin},
    db::{
        errors::DbError,
        handlers::{Products, Repository},
        models::products::{ProductCreateDBRequest, ProductUpdateDBRequest},
    },
    errors::Error,
    types::ProductId,
};

/// List all products.
///
/// Returns the entire table - the dashboard re-fetches this after every
/// mutation instead of merging changes locally.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
        (status = 401, description = "Session flags missing"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<AppState>, _flags: SessionFlags) -> Result<Json<Vec<ProductResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut product_repo = Products::new(&mut conn);

    let products = product_repo.list().await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Create a product (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductCreate,
    tag = "products",
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Session flags missing"),
        (status = 403, description = "Role flag is not admin"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    flags: SessionFlags,
    Json(request): Json<ProductCreate>,
) -> Result<(StatusCode, Json<ProductResponse>), Error> {
    require_admin(flags)?;

    if request.name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Product name must not be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut product_repo = Products::new(&mut conn);

    let created = product_repo
        .create(&ProductCreateDBRequest {
            name: request.name,
            unit_price: request.unit_price,
            quantity: request.quantity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(created))))
}

/// Update a product (admin only).
///
/// Partial update: omitted fields are left unchanged. The dashboard form
/// always submits all three fields.
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    request_body = ProductUpdate,
    tag = "products",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Session flags missing"),
        (status = 403, description = "Role flag is not admin"),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn update_product(
    State(state): State<AppState>,
    flags: SessionFlags,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>, Error> {
    require_admin(flags)?;

    if let Some(name) = &request.name
        && name.trim().is_empty()
    {
        return Err(Error::BadRequest {
            message: "Product name must not be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut product_repo = Products::new(&mut conn);

    let updated = product_repo
        .update(
            id,
            &ProductUpdateDBRequest {
                name: request.name,
                unit_price: request.unit_price,
                quantity: request.quantity,
            },
        )
        .await
        .map_err(|e| match e {
            DbError::NotFound => Error::NotFound {
                resource: "Product".to_string(),
                id: id.to_string(),
            },
            other => Error::Database(other),
        })?;

    Ok(Json(ProductResponse::from(updated)))
}

/// Delete a product (admin only).
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "products",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Session flags missing"),
        (status = 403, description = "Role flag is not admin"),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn delete_product(State(state): State<AppState>, flags: SessionFlags, Path(id): Path<ProductId>) -> Result<StatusCode, Error> {
    require_admin(flags)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut product_repo = Products::new(&mut conn);

    if !product_repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
