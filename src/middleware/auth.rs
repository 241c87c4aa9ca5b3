use std::{collections::HashMap, convert::Infallible, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::auth::{Claims, TokenKeys};
use crate::error::ApiError;

/// Reasons a route stage refuses a request. All surface as 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingSession,

    #[error("Admin privileges required")]
    NotElevated,

    #[error("Restricted to the account owner or an admin")]
    NotOwner,
}

/// Per-request authentication state, stored in request extensions.
///
/// An empty context is not an error on its own: only the `require_*` stages
/// reject a request whose context carries no claims.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    claims: Option<Claims>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(claims: Claims) -> Self {
        Self { claims: Some(claims) }
    }

    /// Build a context from a raw `Authorization` header value.
    ///
    /// A leading `Bearer `/`bearer ` is stripped and the rest trimmed. Anything
    /// that fails verification yields an anonymous context.
    pub fn from_header(header: Option<&str>, keys: &TokenKeys) -> Self {
        let Some(raw) = header else {
            return Self::anonymous();
        };

        let token = raw
            .strip_prefix("Bearer ")
            .or_else(|| raw.strip_prefix("bearer "))
            .unwrap_or(raw)
            .trim();

        match keys.verify(token) {
            Ok(claims) => Self::authenticated(claims),
            Err(e) => {
                tracing::debug!("Ignoring unverifiable token: {}", e);
                Self::anonymous()
            }
        }
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.claims
            .as_ref()
            .map(|c| c.username.as_str())
            .filter(|u| !u.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().is_some_and(|c| c.is_admin)
    }

    pub fn require_session(&self) -> Result<&Claims, AuthError> {
        match &self.claims {
            Some(claims) if !claims.username.is_empty() => Ok(claims),
            _ => Err(AuthError::MissingSession),
        }
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::NotElevated)
        }
    }

    /// Passes for admins, or when `target` names the session's own account.
    pub fn require_owner_or_admin(&self, target: Option<&str>) -> Result<(), AuthError> {
        if self.is_admin() {
            return Ok(());
        }
        match (self.username(), target) {
            (Some(own), Some(target)) if own == target => Ok(()),
            _ => Err(AuthError::NotOwner),
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<SessionContext>().cloned().unwrap_or_default())
    }
}

fn session_of(request: &Request) -> SessionContext {
    request.extensions().get::<SessionContext>().cloned().unwrap_or_default()
}

/// Global layer: attach a [`SessionContext`] to every request. Never rejects.
pub async fn authenticate(
    State(keys): State<Arc<TokenKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let session = SessionContext::from_header(header, &keys);
    request.extensions_mut().insert(session);

    next.run(request).await
}

pub async fn require_session(request: Request, next: Next) -> Result<Response, ApiError> {
    session_of(&request).require_session().map_err(|e| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        e
    })?;
    Ok(next.run(request).await)
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let session = session_of(&request);
    session.require_admin().map_err(|e| {
        tracing::warn!(
            "Rejected {} {} for {:?}: {}",
            request.method(),
            request.uri().path(),
            session.username(),
            e
        );
        e
    })?;
    Ok(next.run(request).await)
}

/// Owner check against the route's `:username` parameter.
pub async fn require_owner_or_admin(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_of(&request);
    let target = params.get("username").map(String::as_str);

    session.require_owner_or_admin(target).map_err(|e| {
        tracing::warn!("Rejected {:?} acting on {:?}: {}", session.username(), target, e);
        e
    })?;
    Ok(next.run(request).await)
}
