// src/handlers/sale.rs
//
// Thin HTTP entry points for the settlement core in `crate::sales`.

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;

use crate::dtos::sale::{CreateDailySaleRequest, DailySaleResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::sales::settlement;
use crate::state::AppState;

// POST /sales - Record a batch of sold items as one daily-sale entry
#[instrument(skip(state, auth, req))]
pub async fn create_daily_sale(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateDailySaleRequest>,
) -> Result<(StatusCode, Json<DailySaleResponse>), AppError> {
    let (sale, items) =
        settlement::create_daily_sale(&state.db_pool, auth.user_id, &req.items_sold).await?;

    Ok((
        StatusCode::CREATED,
        Json(DailySaleResponse::from_parts(sale, items)),
    ))
}

// GET /sales - The caller's daily-sale records, newest first
#[instrument(skip(state, auth))]
pub async fn get_sales(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<DailySaleResponse>>, AppError> {
    let sales = settlement::get_sales_by_owner(&state.db_pool, auth.user_id).await?;

    Ok(Json(
        sales
            .into_iter()
            .map(|(sale, items)| DailySaleResponse::from_parts(sale, items))
            .collect(),
    ))
}
