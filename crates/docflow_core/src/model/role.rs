//! Organizational roles and the console sections they may open.

use std::str::FromStr;

use super::ParseEnumError;

str_enum!(
    /// Access-scope identity of the current session.
    Role {
        Admin => "admin",
        Engineer => "engineer",
        Hr => "hr",
        Finance => "finance",
    }
);

str_enum!(
    /// Top-level console areas a role can navigate to.
    Section {
        Dashboard => "dashboard",
        Documents => "documents",
        Search => "search",
        Upload => "upload",
        Analytics => "analytics",
        Settings => "settings",
    }
);

impl Role {
    /// Human-readable label shown next to the signed-in user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Engineer => "Engineering",
            Self::Hr => "Human Resources",
            Self::Finance => "Finance",
        }
    }

    /// Whether this role may open `section`.
    pub fn can_access(self, section: Section) -> bool {
        match section {
            Section::Dashboard | Section::Documents | Section::Search | Section::Upload => true,
            Section::Analytics | Section::Settings => self == Self::Admin,
        }
    }

    /// Parses a login selection, treating a blank selection as `engineer`.
    pub fn parse_or_default(value: &str) -> Result<Self, ParseEnumError> {
        if value.trim().is_empty() {
            return Ok(Self::Engineer);
        }
        Self::from_str(value)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Engineer
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, Section};

    #[test]
    fn analytics_and_settings_are_admin_only() {
        for role in Role::ALL {
            for section in Section::ALL {
                let expected = match section {
                    Section::Analytics | Section::Settings => *role == Role::Admin,
                    _ => true,
                };
                assert_eq!(role.can_access(*section), expected, "{role} -> {section}");
            }
        }
    }

    #[test]
    fn blank_login_selection_falls_back_to_engineer() {
        assert_eq!(Role::parse_or_default("").unwrap(), Role::Engineer);
        assert_eq!(Role::parse_or_default("  ").unwrap(), Role::Engineer);
        assert_eq!(Role::parse_or_default("HR").unwrap(), Role::Hr);
        assert!(Role::parse_or_default("auditor").is_err());
    }

    #[test]
    fn labels_match_console_badges() {
        assert_eq!(Role::Admin.label(), "Administrator");
        assert_eq!(Role::Hr.label(), "Human Resources");
    }
}
