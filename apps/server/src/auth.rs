//! Caller identity forwarded by the upstream identity provider.
//!
//! Authentication happens before requests reach this server. We only read
//! the `x-user-id` and `x-user-role` headers it sets.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing caller identity".to_string()))?;
        let role = match header(parts, USER_ROLE_HEADER) {
            None => Role::User,
            Some(raw) if raw.eq_ignore_ascii_case("USER") => Role::User,
            Some(raw) if raw.eq_ignore_ascii_case("ADMIN") => Role::Admin,
            Some(raw) => {
                return Err(ApiError::Unauthorized(format!("Unknown role '{}'", raw)));
            }
        };
        Ok(CurrentUser {
            id: id.to_string(),
            role,
        })
    }
}

/// An authenticated caller holding the `ADMIN` role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!("User {} denied an admin route", user.id);
            return Err(ApiError::Forbidden(
                "Administrator role required".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}
