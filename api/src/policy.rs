//! Who may mutate what.
//!
//! Two layers: a route-level allow-list of roles checked before any handler
//! logic, then an ownership check against the stored record where owners and
//! privileged roles pass.

use crate::{
    error::ApiError,
    identity::models::identity::{Identity, Role},
};

/// Roles allowed to create, update and delete blogs.
pub const BLOG_AUTHORS: &[Role] = &[Role::Bloggers, Role::Admin];

/// Roles allowed to create, update and delete comments.
pub const COMMENT_AUTHORS: &[Role] = &[Role::Commenter, Role::Bloggers, Role::Admin];

/// Roles that bypass ownership on blogs and comments alike.
pub const PRIVILEGED: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Update,
    Delete,
}

impl Action {
    fn as_str(&self) -> &'static str {
        match self {
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

pub fn authorize_roles(identity: &Identity, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }

    tracing::debug!(identity_id = identity.id, role = %identity.role, "Role not allowed");
    Err(ApiError::Unauthorized(format!(
        "User role {} is not authorized to access this route",
        identity.role
    )))
}

/// `resource` names the record kind in the error message, e.g. `blog`.
pub fn authorize_owner(
    identity: &Identity,
    owner_id: i32,
    privileged: &[Role],
    action: Action,
    resource: &str,
) -> Result<(), ApiError> {
    if identity.id == owner_id || privileged.contains(&identity.role) {
        return Ok(());
    }

    tracing::debug!(
        identity_id = identity.id,
        owner_id,
        action = action.as_str(),
        resource,
        "Ownership check failed"
    );
    Err(ApiError::Unauthorized(format!(
        "User {} is not authorized to {} this {}",
        identity.id,
        action.as_str(),
        resource
    )))
}

#[cfg(test)]
mod test {
    use super::*;

    fn identity(id: i32, role: Role) -> Identity {
        let now = chrono::Utc::now().naive_utc();
        Identity {
            id,
            role,
            traits: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn commenters_cannot_manage_blogs() {
        let err = authorize_roles(&identity(1, Role::Commenter), BLOG_AUTHORS).unwrap_err();
        assert_eq!(
            err,
            ApiError::Unauthorized(
                "User role commenter is not authorized to access this route".into()
            )
        );
        assert!(authorize_roles(&identity(1, Role::Bloggers), BLOG_AUTHORS).is_ok());
        assert!(authorize_roles(&identity(1, Role::Admin), BLOG_AUTHORS).is_ok());
    }

    #[test]
    fn every_role_can_comment() {
        for role in [Role::Commenter, Role::Bloggers, Role::Admin] {
            assert!(authorize_roles(&identity(1, role), COMMENT_AUTHORS).is_ok());
        }
    }

    #[test]
    fn owner_passes_ownership_check() {
        let owner = identity(7, Role::Commenter);
        assert!(authorize_owner(&owner, 7, PRIVILEGED, Action::Update, "comment").is_ok());
    }

    #[test]
    fn admin_bypasses_ownership_check() {
        let admin = identity(1, Role::Admin);
        assert!(authorize_owner(&admin, 7, PRIVILEGED, Action::Delete, "blog").is_ok());
    }

    #[test]
    fn bloggers_do_not_bypass_ownership_check() {
        let blogger = identity(2, Role::Bloggers);
        let err = authorize_owner(&blogger, 7, PRIVILEGED, Action::Delete, "comment").unwrap_err();
        assert_eq!(
            err,
            ApiError::Unauthorized("User 2 is not authorized to delete this comment".into())
        );
    }
}
