use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{authenticate, require_admin, require_owner_or_admin, require_session};
use crate::state::AppState;

/// Default cap on request bodies when none is given.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the application router with the default body limit.
pub fn app(state: AppState) -> Router {
    app_with_body_limit(state, DEFAULT_MAX_BODY_BYTES)
}

pub fn app_with_body_limit(state: AppState, max_body_bytes: usize) -> Router {
    let keys = state.keys.clone();

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_routes())
        .merge(company_routes())
        .merge(job_routes())
        .merge(user_routes())
        .fallback(|| async { ApiError::not_found("Not Found") })
        // Global middleware
        .layer(from_fn_with_state(keys, authenticate))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Authenticate → RequireSession
fn session(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.layer(from_fn(require_session))
}

/// Authenticate → RequireSession → RequireRole
fn elevated(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.layer(
        ServiceBuilder::new()
            .layer(from_fn(require_session))
            .layer(from_fn(require_admin)),
    )
}

/// Authenticate → RequireOwnerOrRole
fn owner_or_admin(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.layer(from_fn(require_owner_or_admin))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(public::auth::token))
        .route("/auth/register", post(public::auth::register))
        .route("/auth/whoami", session(get(protected::auth::whoami)))
}

fn company_routes() -> Router<AppState> {
    use elevated::companies as admin;
    use public::companies;

    Router::new()
        .route(
            "/companies",
            get(companies::list).merge(elevated(post(admin::create))),
        )
        .route(
            "/companies/:handle",
            get(companies::get).merge(elevated(
                MethodRouter::new().patch(admin::update).delete(admin::remove),
            )),
        )
}

fn job_routes() -> Router<AppState> {
    use elevated::jobs as admin;
    use public::jobs;

    Router::new()
        .route("/jobs", get(jobs::list).merge(elevated(post(admin::create))))
        .route(
            "/jobs/:id",
            get(jobs::get).merge(elevated(
                MethodRouter::new().patch(admin::update).delete(admin::remove),
            )),
        )
}

fn user_routes() -> Router<AppState> {
    use elevated::users as admin;
    use protected::users;

    Router::new()
        .route("/users", elevated(get(admin::list).post(admin::create)))
        .route(
            "/users/:username",
            owner_or_admin(get(users::get).patch(users::update).delete(users::remove)),
        )
}
