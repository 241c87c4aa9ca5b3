use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{NewUser, User};
use crate::handlers::parse_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /users - Admin creates an account, possibly another admin
///
/// Returns the new user together with a token for it:
/// ```json
/// { "success": true, "data": { "user": { "username": "u-new", ... }, "token": "eyJ..." } }
/// ```
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let new_user: NewUser = parse_body(payload)?;
    let user = state.users().register(&new_user).await?;
    let token = state.keys.issue(&user.username, user.is_admin)?;

    tracing::info!("Admin created {} (admin: {})", user.username, user.is_admin);
    Ok(ApiResponse::created(json!({ "user": user, "token": token })))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users().find_all().await?;
    Ok(ApiResponse::success(users))
}
