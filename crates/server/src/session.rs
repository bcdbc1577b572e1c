// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides an Axum extractor that reads the operator's bearer
//! token and role at the server boundary. Tokens are not validated here; they
//! are forwarded to the booking API, which owns sessions.

use aircare_api::{AuthenticatedActor, authenticate};
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::upstream::ROLE_HEADER;

/// Extractor for operator credentials.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionOperator(actor): SessionOperator,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing or not valid UTF-8
/// - Authorization header is not `Bearer <token>`
/// - The role header is missing or names an unknown role
pub struct SessionOperator(pub AuthenticatedActor);

impl<S> FromRequestParts<S> for SessionOperator
where
    S: Send + Sync,
{
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authorization: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let role: Option<&str> = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok());

        let actor: AuthenticatedActor = authenticate(Some(authorization), role).map_err(|e| {
            warn!(error = %e, "Session credentials rejected");
            SessionError::InvalidSession(e.to_string())
        })?;

        debug!(role = ?actor.role, "Session credentials accepted");

        Ok(Self(actor))
    }
}

/// Session extraction errors.
///
/// These errors are returned when session credentials are missing or
/// malformed and are automatically converted to HTTP responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header is not valid text.
    InvalidAuthorizationHeader,
    /// Credentials were present but rejected.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => {
                String::from("Invalid Authorization header encoding")
            }
            Self::InvalidSession(reason) => reason,
        };

        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
