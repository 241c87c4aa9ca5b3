use std::collections::HashMap;

use axum::extract::{Path, Query, State};

use crate::database::models::{Company, CompanyDetail};
use crate::filter::CompanyFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /companies - List companies, optionally filtered
///
/// Query parameters (all optional, unknown keys ignored):
/// - `nameLike`: case-insensitive substring of the name, at most 30 characters
/// - `minEmployees` / `maxEmployees`: inclusive headcount bounds
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<Company>> {
    let filter = CompanyFilter::from_query(&params)?;
    let companies = state.companies().find_all(&filter).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /companies/:handle - One company with its jobs
pub async fn get(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let company = state.companies().get(&handle).await?;
    Ok(ApiResponse::success(company))
}
