//! Role assignment
//!
//! Roles are decided once, at registration, from a configured allow-list of
//! full phone numbers.

use std::collections::HashSet;

use market_core::entities::Role;
use market_core::value_objects::PhoneNumber;

/// Decides which role a newly registered phone number receives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePolicy {
    admin_phones: HashSet<String>,
}

impl RolePolicy {
    /// Build from full numbers such as `+923432252006`; separators are ignored
    pub fn from_admin_phones<I, S>(phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            admin_phones: phones
                .into_iter()
                .filter_map(|p| Self::normalize(p.as_ref()))
                .collect(),
        }
    }

    /// Policy that never grants the admin role
    pub fn users_only() -> Self {
        Self::default()
    }

    pub fn is_admin_phone(&self, phone: &PhoneNumber) -> bool {
        self.admin_phones.contains(&phone.full())
    }

    pub fn role_for(&self, phone: &PhoneNumber) -> Role {
        if self.is_admin_phone(phone) {
            Role::Admin
        } else {
            Role::User
        }
    }

    fn normalize(raw: &str) -> Option<String> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("+{digits}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_grants_admin() {
        let policy = RolePolicy::from_admin_phones(["+92 343 225-2006", ""]);
        let admin = PhoneNumber::parse("+92", "3432252006").unwrap();
        let user = PhoneNumber::parse("+1", "5551234567").unwrap();

        assert_eq!(policy.role_for(&admin), Role::Admin);
        assert_eq!(policy.role_for(&user), Role::User);
    }

    #[test]
    fn test_users_only() {
        let admin = PhoneNumber::parse("+92", "3432252006").unwrap();
        assert_eq!(RolePolicy::users_only().role_for(&admin), Role::User);
    }
}
