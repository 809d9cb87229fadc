//! Marketplace role model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TourError;

/// The role a user acts under. A user with no stored role is a plain
/// tourist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Tourist,
    Guide,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tourist => "tourist",
            Role::Guide => "guide",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tourist" => Ok(Role::Tourist),
            "guide" => Ok(Role::Guide),
            "admin" => Ok(Role::Admin),
            other => Err(TourError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("guide".parse::<Role>().unwrap(), Role::Guide);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("tourist".parse::<Role>().unwrap(), Role::Tourist);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("Guide".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
