use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::types::Role;
use crate::domains::auth::{hash_password, is_admin_email, verify_password};
use crate::domains::users::{NewUser, User, UserData};
use crate::error::ApiError;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserData,
    pub token: String,
}

/// Register a new account
///
/// The admin role is only accepted for allow-listed emails; everyone else
/// gets 403 and no account is created.
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = required_field(payload.name)?;
    let email = required_field(payload.email)?;
    let password = required_field(payload.password)?;
    let role_raw = required_field(payload.role)?;

    let role = Role::from_str(&role_raw)
        .map_err(|_| ApiError::Validation(format!("Invalid role: {}", role_raw)))?;

    let allow_listed = is_admin_email(&email, &state.admin_emails);
    if role == Role::Admin && !allow_listed {
        return Err(ApiError::Forbidden(
            "Admin registration not allowed for this email".to_string(),
        ));
    }

    if User::email_exists(&email, &state.db_pool).await? {
        return Err(ApiError::Duplicate("Email already exists".to_string()));
    }

    let password_hash = hash_password(&password)?;

    let user = User::create(
        NewUser {
            name,
            email,
            password_hash,
            role: role.to_string(),
            organization: payload.organization,
            verified: role == Role::Admin || allow_listed,
        },
        &state.db_pool,
    )
    .await?;

    let token = state
        .jwt_service
        .create_token(user.id, user.name.clone(), role)?;

    tracing::info!(user_id = %user.id, role = %role, "Registered new account");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

/// Log in with email and password
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = required_field(payload.email)?;
    let password = required_field(payload.password)?;

    // Same failure for unknown email and wrong password: no oracle about
    // which part was wrong.
    let user = User::find_by_email(&email, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid credentials".to_string()))?;

    let role = Role::from_str(&user.role).map_err(ApiError::Internal)?;

    // An admin account whose email has dropped off the allow-list loses
    // access; the list is checked at login as well as registration.
    if role == Role::Admin && !is_admin_email(&user.email, &state.admin_emails) {
        return Err(ApiError::Forbidden(
            "Admin access not authorized for this account".to_string(),
        ));
    }

    if !verify_password(&password, &user.password_hash)? {
        return Err(ApiError::Unauthenticated("Invalid credentials".to_string()));
    }

    let token = state
        .jwt_service
        .create_token(user.id, user.name.clone(), role)?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

/// Reject missing or empty required fields with a 400
fn required_field(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation("Missing required fields".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_accepts_value() {
        assert_eq!(
            required_field(Some("alice@example.com".to_string())).unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn test_required_field_rejects_missing_and_blank() {
        assert!(required_field(None).is_err());
        assert!(required_field(Some(String::new())).is_err());
        assert!(required_field(Some("   ".to_string())).is_err());
    }
}
