use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{Company, CompanyUpdate, NewCompany};
use crate::handlers::{parse_body, parse_patch};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /companies - Create a company
///
/// Expected Input:
/// ```json
/// {
///   "handle": "new",          // Required: 1-25 characters
///   "name": "New",            // Required
///   "description": "DescNew", // Optional
///   "numEmployees": 10,       // Optional: >= 0
///   "logoUrl": "http://new.img" // Optional: absolute URL
/// }
/// ```
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Company> {
    let new_company: NewCompany = parse_body(payload)?;
    let company = state.companies().create(&new_company).await?;
    tracing::info!("Created company {}", company.handle);
    Ok(ApiResponse::created(company))
}

/// PATCH /companies/:handle - Partial update; `handle` cannot change
pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Company> {
    let fields = parse_patch::<CompanyUpdate>(payload)?;
    let company = state.companies().update(&handle, &fields).await?;
    Ok(ApiResponse::success(company))
}

pub async fn remove(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<Value> {
    state.companies().remove(&handle).await?;
    tracing::info!("Deleted company {}", handle);
    Ok(ApiResponse::success(json!({ "deleted": handle })))
}
