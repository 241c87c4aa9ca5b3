pub mod auth;
pub mod response;

pub use auth::{authenticate, require_admin, require_owner_or_admin, require_session, AuthError, SessionContext};
pub use response::{ApiResponse, ApiResult};
