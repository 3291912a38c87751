// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::Error as SqlxError;
use tracing::{error, instrument};

use crate::dtos::product::{
    CreateProductPayload, CreateProductRequest, ListProductsQuery, PriceRangeQuery,
    ProductResponse, RestockRequest, UpdateProductRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::product::Product;
use crate::state::AppState;
use axum::extract::Extension;

const PRODUCT_COLUMNS: &str = "id, owner_id, product_name, cost_price, selling_price, \
     quantity_in_stock, product_type, base_unit, created_at";

/// Statement for PUT /products/:id. `update_product` binds eight values:
/// six COALESCE'd columns, then id and owner_id.
fn update_product_sql() -> String {
    format!(
        "UPDATE products SET
             product_name = COALESCE($1, product_name),
             cost_price = COALESCE($2, cost_price),
             selling_price = COALESCE($3, selling_price),
             quantity_in_stock = COALESCE($4, quantity_in_stock),
             product_type = COALESCE($5, product_type),
             base_unit = COALESCE($6, base_unit)
         WHERE id = $7 AND owner_id = $8
         RETURNING {PRODUCT_COLUMNS}"
    )
}

fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

fn validate_new_product(req: &CreateProductRequest) -> Result<(), AppError> {
    if req.product_name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if req.cost_price < 0.0 || req.selling_price < 0.0 {
        return Err(AppError::validation("Prices cannot be negative"));
    }
    if req.quantity_in_stock < 0.0 {
        return Err(AppError::validation("Stock cannot be negative"));
    }
    Ok(())
}

// GET /products - List the caller's products, optionally by type
#[instrument(skip(state, auth))]
pub async fn get_products(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(filter): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let result = match filter.product_type {
        Some(kind) => {
            sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE owner_id = $1 AND product_type = $2 ORDER BY product_name"
            ))
            .bind(auth.user_id)
            .bind(kind.as_str())
            .fetch_all(&state.db_pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products
                 WHERE owner_id = $1 ORDER BY product_name"
            ))
            .bind(auth.user_id)
            .fetch_all(&state.db_pool)
            .await
        }
    };

    match result {
        Ok(products) => Ok(Json(
            products.into_iter().map(ProductResponse::from).collect(),
        )),
        Err(e) => {
            error!(?e, "Failed to fetch products");
            Err(e.into())
        }
    }
}

// GET /products/search?minPrice=..&maxPrice=.. - Filter by cost price
#[instrument(skip(state, auth))]
pub async fn search_by_price_range(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(range): Query<PriceRangeQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    if range.min_price > range.max_price {
        return Err(AppError::validation("minPrice cannot exceed maxPrice"));
    }

    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products
         WHERE owner_id = $1 AND cost_price BETWEEN $2 AND $3 ORDER BY cost_price"
    ))
    .bind(auth.user_id)
    .bind(range.min_price)
    .bind(range.max_price)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

// GET /products/:id - Get single product
#[instrument(skip(state, auth), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND owner_id = $2"
    ))
    .bind(id)
    .bind(auth.user_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create one product, or several when the body is an array
#[instrument(skip(state, auth, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), AppError> {
    // Single input answers with one object, bulk with an array.
    let (requests, was_single) = match payload {
        CreateProductPayload::Single(req) => (vec![req], true),
        CreateProductPayload::Bulk(reqs) => {
            if reqs.is_empty() {
                return Err(AppError::validation("Product array cannot be empty"));
            }
            (reqs, false)
        }
    };
    for req in &requests {
        validate_new_product(req)?;
    }

    // One transaction so a bulk insert is all-or-nothing.
    let mut tx = state.db_pool.begin().await?;
    let mut created = Vec::with_capacity(requests.len());

    for req in &requests {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products
                 (owner_id, product_name, cost_price, selling_price, quantity_in_stock,
                  product_type, base_unit)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(auth.user_id)
        .bind(&req.product_name)
        .bind(req.cost_price)
        .bind(req.selling_price)
        .bind(req.quantity_in_stock)
        .bind(req.product_type.as_str())
        .bind(req.base_unit.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "Product with this name already exists"))?;

        created.push(ProductResponse::from(product));
    }

    tx.commit().await?;

    let body = if was_single {
        serde_json::to_value(&created[0])
    } else {
        serde_json::to_value(&created)
    }
    .map_err(|e| AppError::internal(format!("Serialization error: {e}")))?;

    Ok((axum::http::StatusCode::CREATED, Json(body)))
}

// PUT /products/:id - Update product
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&update_product_sql())
        .bind(payload.product_name)
        .bind(payload.cost_price)
        .bind(payload.selling_price)
        .bind(payload.quantity_in_stock)
        .bind(payload.product_type.map(|t| t.as_str()))
        .bind(payload.base_unit.map(|u| u.as_str()))
        .bind(id)
        .bind(auth.user_id)
        .fetch_optional(&state.db_pool)
        .await
        .map_err(|e| map_unique_violation(e, "Product with this name already exists"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// PATCH /products/:id/restock - Add stock to an existing product
#[instrument(skip(state, auth), fields(id))]
pub async fn restock_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<RestockRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    if !payload.quantity_to_add.is_finite() || payload.quantity_to_add <= 0.0 {
        return Err(AppError::validation("Valid quantityToAdd is required"));
    }

    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET quantity_in_stock = quantity_in_stock + $1
         WHERE id = $2 AND owner_id = $3
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.quantity_to_add)
    .bind(id)
    .bind(auth.user_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<()>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(auth.user_id)
        .execute(&state.db_pool)
        .await
        .map_err(|e| match e {
            SqlxError::Database(ref db_err) if db_err.code().as_deref() == Some("23503") => {
                AppError::conflict("Product is referenced by recorded sales")
            }
            other => other.into(),
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The update statement must declare exactly as many parameters as the
    // handler binds: six COALESCE'd columns plus id and owner_id. A
    // mismatch only surfaces at runtime as a bind-count protocol error.
    #[test]
    fn update_statement_declares_eight_parameters() {
        let sql = update_product_sql();
        let highest = (1..=16)
            .filter(|n| sql.contains(&format!("${n}")))
            .max()
            .unwrap();
        assert_eq!(highest, 8);
        assert!(sql.contains("WHERE id = $7 AND owner_id = $8"));
    }
}
