use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::database::models::{Credentials, NewUser};
use crate::handlers::parse_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/token - Exchange credentials for a session token
///
/// Expected Input:
/// ```json
/// { "username": "u1", "password": "password1" }
/// ```
///
/// Expected Output:
/// ```json
/// { "success": true, "data": { "token": "eyJ..." } }
/// ```
pub async fn token(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let credentials: Credentials = parse_body(payload)?;

    let user = state
        .users()
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    let token = state.keys.issue(&user.username, user.is_admin)?;

    tracing::info!("Issued token for {}", user.username);
    Ok(ApiResponse::success(json!({ "token": token })))
}

/// POST /auth/register - Create a (non-admin) account and log it in
///
/// Expected Input:
/// ```json
/// {
///   "username": "new",
///   "password": "password",
///   "firstName": "first",
///   "lastName": "last",
///   "email": "new@email.com"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let mut new_user: NewUser = parse_body(payload)?;
    new_user.is_admin = false;

    let user = state.users().register(&new_user).await?;
    let token = state.keys.issue(&user.username, user.is_admin)?;

    tracing::info!("Registered {}", user.username);
    Ok(ApiResponse::created(json!({ "token": token })))
}
