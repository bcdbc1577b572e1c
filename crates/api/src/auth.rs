// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Console session credentials and role-based authorization.
//!
//! Sessions are issued by the booking API. The console only carries the
//! bearer token and role header through to it; it never validates tokens
//! itself. Roles decide which console operations may be attempted at all.

use crate::error::AuthError;

/// Console operator roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Office staff: queue, review, dispatch, calendar.
    Admin,
    /// Owner account: everything an admin can do plus promotions and staff.
    SuperAdmin,
    /// Field technician: own jobs only.
    Technician,
}

impl Role {
    /// Parses the role header value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            "technician" | "tech" => Ok(Self::Technician),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{value}'"),
            }),
        }
    }

    /// The role header value sent to the booking API.
    #[must_use]
    pub const fn as_header_value(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
            Self::Technician => "technician",
        }
    }
}

/// Credentials of the operator behind a request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// Bearer token issued by the booking API.
    pub token: String,
    /// The operator's role.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(token: String, role: Role) -> Self {
        Self { token, role }
    }
}

impl std::fmt::Debug for AuthenticatedActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedActor")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Builds an actor from the `Authorization` and role header values.
///
/// # Errors
///
/// Returns an error if either header is missing, the authorization header is
/// not `Bearer <token>`, the token is empty, or the role is unknown.
pub fn authenticate(
    authorization: Option<&str>,
    role: Option<&str>,
) -> Result<AuthenticatedActor, AuthError> {
    let authorization: &str = authorization.ok_or_else(|| AuthError::AuthenticationFailed {
        reason: String::from("Missing Authorization header"),
    })?;

    let token: &str = authorization
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Invalid Authorization header format. Expected: 'Bearer <token>'"),
        })?;

    if token.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Bearer token cannot be empty"),
        });
    }

    let role: Role = Role::parse(role.ok_or_else(|| AuthError::AuthenticationFailed {
        reason: String::from("Missing role header"),
    })?)?;

    Ok(AuthenticatedActor::new(token.to_string(), role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may load the booking calendar.
    ///
    /// Admins and super admins may; technicians only see their own jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a technician.
    pub fn authorize_view_calendar(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::SuperAdmin => Ok(()),
            Role::Technician => Err(AuthError::Unauthorized {
                action: String::from("view_calendar"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may view the dashboard aggregates.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a technician.
    pub fn authorize_view_dashboard(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::SuperAdmin => Ok(()),
            Role::Technician => Err(AuthError::Unauthorized {
                action: String::from("view_dashboard"),
                required_role: String::from("Admin"),
            }),
        }
    }
}
