//! Authenticated session context

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    TestTaker,
}

impl Role {
    /// Get the wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::TestTaker => "test_taker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The explicit session context handed to components that need auth.
/// Set at login, cleared at logout, persisted between runs by a
/// session store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub email: String,
    pub token: String,
    pub role: Role,
}

impl AuthSession {
    /// Create a session from login response fields
    pub fn new(email: impl Into<String>, token: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
            role,
        }
    }

    /// Whether this session belongs to an admin account
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::TestTaker.as_str(), "test_taker");
    }

    #[test]
    fn role_serde_round_trip() {
        let json = serde_json::to_string(&Role::TestTaker).unwrap();
        assert_eq!(json, "\"test_taker\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn session_json_matches_stored_shape() {
        let session = AuthSession::new("a@b.com", "tok-1", Role::TestTaker);
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["token"], "tok-1");
        assert_eq!(json["role"], "test_taker");
    }

    #[test]
    fn admin_check() {
        assert!(AuthSession::new("a@b.com", "t", Role::Admin).is_admin());
        assert!(!AuthSession::new("a@b.com", "t", Role::TestTaker).is_admin());
    }
}
