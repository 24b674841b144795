//! Admin-qualifying claim check

use folio_core::AuthUser;
use folio_shared::config::AdminSettings;

/// A user is admin when their role matches `admin_role` or their email is the
/// configured owner address.
#[derive(Debug, Clone)]
pub struct AdminPolicy {
    admin_role: String,
    owner_email: String,
}

impl AdminPolicy {
    pub fn new(admin_role: impl Into<String>, owner_email: impl Into<String>) -> Self {
        Self {
            admin_role: admin_role.into(),
            owner_email: owner_email.into(),
        }
    }

    pub fn from_settings(settings: &AdminSettings) -> Self {
        Self::new(settings.admin_role.clone(), settings.owner_email.clone())
    }

    pub fn is_admin(&self, user: &AuthUser) -> bool {
        user.has_role(&self.admin_role) || user.has_email(&self.owner_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>, email: Option<&str>) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: email.map(str::to_string),
            role: role.map(str::to_string),
            full_name: None,
        }
    }

    #[test]
    fn test_role_or_owner_email_qualifies() {
        let policy = AdminPolicy::new("admin", "owner@example.org");

        assert!(policy.is_admin(&user(Some("admin"), None)));
        assert!(policy.is_admin(&user(Some("user"), Some("owner@example.org"))));
        assert!(!policy.is_admin(&user(Some("user"), Some("someone@example.org"))));
        assert!(!policy.is_admin(&user(None, None)));
    }

    #[test]
    fn test_empty_owner_email_never_matches() {
        let policy = AdminPolicy::new("admin", "");
        assert!(!policy.is_admin(&user(Some("user"), Some(""))));
    }
}
