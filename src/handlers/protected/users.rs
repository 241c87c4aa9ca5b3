use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{User, UserUpdate};
use crate::handlers::parse_patch;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

// All three sit behind the owner-or-admin stage.

pub async fn get(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<User> {
    let user = state.users().get(&username).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /users/:username - Partial update of an account
///
/// Expected Input (any subset):
/// ```json
/// { "firstName": "New", "lastName": "Name", "password": "new-password", "email": "new@email.com" }
/// ```
pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<User> {
    let fields = parse_patch::<UserUpdate>(payload)?;
    let user = state.users().update(&username, fields).await?;
    Ok(ApiResponse::success(user))
}

pub async fn remove(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<Value> {
    state.users().remove(&username).await?;
    tracing::info!("Deleted user {}", username);
    Ok(ApiResponse::success(json!({ "deleted": username })))
}
