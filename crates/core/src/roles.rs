//! Admin role names as stored in `admin_users.role`.

pub const ROLE_SUPERADMIN: &str = "superadmin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Every role an account may be registered with.
pub const VALID_ROLES: &[&str] = &[ROLE_SUPERADMIN, ROLE_ADMIN, ROLE_EDITOR];

/// Roles allowed through the manager guard (recognitions, visual stories,
/// timelines).
pub const MANAGER_ROLES: &[&str] = &[ROLE_SUPERADMIN, ROLE_ADMIN];

/// Returns `true` if `role` is one of [`VALID_ROLES`].
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Returns `true` if `role` may perform manager-guarded writes.
pub fn is_manager_role(role: &str) -> bool {
    MANAGER_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_is_valid_but_not_manager() {
        assert!(is_valid_role(ROLE_EDITOR));
        assert!(!is_manager_role(ROLE_EDITOR));
    }

    #[test]
    fn admins_are_managers() {
        assert!(is_manager_role(ROLE_ADMIN));
        assert!(is_manager_role(ROLE_SUPERADMIN));
    }

    #[test]
    fn unknown_role_rejected() {
        assert!(!is_valid_role("owner"));
        assert!(!is_valid_role("Admin"));
    }
}
