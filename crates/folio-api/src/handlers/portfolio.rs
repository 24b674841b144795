//! Public portfolio page

use axum::{extract::State, Json};

use folio_core::services::PortfolioView;

use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/portfolio - never fails; unavailable sections come back empty.
pub async fn get_portfolio(State(state): State<AppState>) -> Json<ApiResponse<PortfolioView>> {
    Json(ApiResponse::success(state.portfolio.load().await))
}
