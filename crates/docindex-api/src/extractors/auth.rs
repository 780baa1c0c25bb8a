//! `CurrentUser` extractor — resolves the gateway-authenticated username
//! into a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use docindex_core::error::AppError;
use docindex_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header set by the upstream authentication gateway.
const IDENTITY_HEADER: &str = "x-auth-request-user";

/// Extracted caller context available in handlers.
///
/// The gateway authenticates and forwards the username; the extractor
/// registers the identity on first sight so ownership attribution always
/// has a user row to point at.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub RequestContext);

impl std::ops::Deref for CurrentUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing X-Auth-Request-User header"))?;

        let user = state.user_service.resolve_identity(username).await?;

        Ok(CurrentUser(RequestContext::new(user.id, user.username)))
    }
}
