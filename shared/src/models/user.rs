//! User roles

use serde::{Deserialize, Serialize};

/// Closed role set. Storekeepers additionally carry two fine-grained
/// access flags (chat and stock) on their account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Storekeeper,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Storekeeper => "storekeeper",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "storekeeper" => Some(Role::Storekeeper),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles that may own a Solicitud
    pub fn can_request(&self) -> bool {
        matches!(self, Role::Student | Role::Teacher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Student, Role::Teacher, Role::Storekeeper, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("supervisor"), None);
    }

    #[test]
    fn only_students_and_teachers_request() {
        assert!(Role::Student.can_request());
        assert!(Role::Teacher.can_request());
        assert!(!Role::Storekeeper.can_request());
        assert!(!Role::Admin.can_request());
    }
}
