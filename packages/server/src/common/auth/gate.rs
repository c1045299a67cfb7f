use uuid::Uuid;

use super::AuthError;
use crate::common::types::Role;

/// Resolved caller context, extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}

/// Require an authenticated caller, regardless of role
pub fn require_auth(user: Option<&AuthUser>) -> Result<&AuthUser, AuthError> {
    user.ok_or(AuthError::AuthenticationRequired)
}

/// Require an authenticated caller whose role is in `allowed`
///
/// An empty `allowed` slice means any authenticated caller is permitted.
pub fn require_role<'a>(
    user: Option<&'a AuthUser>,
    allowed: &[Role],
) -> Result<&'a AuthUser, AuthError> {
    let user = require_auth(user)?;

    if allowed.is_empty() || allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AuthError::PermissionDenied(format!(
            "{} role not permitted for this operation",
            user.role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            name: "Test Caller".to_string(),
            role,
        }
    }

    #[test]
    fn test_unauthenticated_rejected() {
        let result = require_role(None, &[Role::Donor]);
        assert!(matches!(result, Err(AuthError::AuthenticationRequired)));
    }

    #[test]
    fn test_role_in_allowed_set_permitted() {
        let user = caller(Role::Ngo);
        let result = require_role(Some(&user), &[Role::Ngo]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_role_outside_allowed_set_rejected() {
        let user = caller(Role::Donor);
        let result = require_role(Some(&user), &[Role::Ngo]);
        assert!(matches!(result, Err(AuthError::PermissionDenied(_))));
    }

    #[test]
    fn test_empty_set_means_any_authenticated() {
        for role in [Role::Donor, Role::Ngo, Role::Admin] {
            let user = caller(role);
            assert!(require_role(Some(&user), &[]).is_ok());
        }
        assert!(matches!(
            require_role(None, &[]),
            Err(AuthError::AuthenticationRequired)
        ));
    }
}
