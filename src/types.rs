/// Shared types used across the codebase
use serde::{Deserialize, Serialize};

/// User access roles. The role travels inside the JWT claims and is checked
/// by the authorization middleware for admin-only routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Allowed values for the revenue report `groupBy` query parameter
pub const GROUP_BY_VALUES: &[&str] = &["parking", "day"];

/// Aggregation key for the revenue report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Group revenue by parking lot id
    Parking,
    /// Group revenue by calendar day of exit
    Day,
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parking" => Ok(GroupBy::Parking),
            "day" => Ok(GroupBy::Day),
            other => Err(format!(
                "invalid groupBy '{}', must be one of: {}",
                other,
                GROUP_BY_VALUES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn group_by_parses_known_values() {
        assert_eq!(GroupBy::from_str("parking").unwrap(), GroupBy::Parking);
        assert_eq!(GroupBy::from_str("day").unwrap(), GroupBy::Day);
        assert!(GroupBy::from_str("week").is_err());
    }

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!(Role::from_str("root").is_err());
    }
}
