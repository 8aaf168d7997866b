use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

impl UserRole {
    /// Default landing path for the role's route namespace.
    pub fn home_path(&self) -> &'static str {
        match self {
            UserRole::Patient => "/patient/dashboard",
            UserRole::Doctor => "/doctor/dashboard",
            UserRole::Admin => "/admin/dashboard",
        }
    }

    /// Route namespace prefix reserved for this role.
    pub fn namespace(&self) -> &'static str {
        match self {
            UserRole::Patient => "/patient",
            UserRole::Doctor => "/doctor",
            UserRole::Admin => "/admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Patient => write!(f, "patient"),
            UserRole::Doctor => write!(f, "doctor"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(UserRole::Patient),
            "doctor" => Ok(UserRole::Doctor),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Authenticated session, created at login/register and destroyed at logout.
/// The session store persists it so the client survives restarts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: &str, role: UserRole, token: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            display_name: None,
            role,
            token: token.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Patient, UserRole::Doctor, UserRole::Admin] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("nurse".parse::<UserRole>().is_err());
    }

    #[test]
    fn home_path_lives_inside_namespace() {
        for role in [UserRole::Patient, UserRole::Doctor, UserRole::Admin] {
            assert!(role.home_path().starts_with(role.namespace()));
        }
    }
}
