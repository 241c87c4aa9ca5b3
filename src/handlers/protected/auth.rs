use crate::auth::Claims;
use crate::middleware::{ApiResponse, ApiResult, SessionContext};

/// GET /auth/whoami - Claims of the current session token
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": { "username": "u1", "isAdmin": false, "iat": 1700000000, "exp": 1700086400 }
/// }
/// ```
pub async fn whoami(session: SessionContext) -> ApiResult<Claims> {
    let claims = session.require_session()?.clone();
    Ok(ApiResponse::success(claims))
}
