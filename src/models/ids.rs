//! Strongly-typed ID wrappers for ledger entities
//!
//! Ids are opaque strings: snapshots created elsewhere use timestamps or small
//! integers ("1", "2", ...), so any string is accepted on input. Freshly
//! generated ids are UUID v4 strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the underlying string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(CategoryId);
define_id!(TransactionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let id1 = TransactionId::new();
        let id2 = TransactionId::new();
        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_opaque_ids_accepted() {
        let id: CategoryId = "12".parse().unwrap();
        assert_eq!(id.as_str(), "12");
        assert_eq!(id.to_string(), "12");

        let ts = CategoryId::from("2024-05-01T10:00:00.000Z");
        assert_eq!(ts.as_str(), "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_id_serialization_is_plain_string() {
        let id = CategoryId::from("7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7\"");

        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
