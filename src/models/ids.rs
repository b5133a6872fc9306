//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are positive integers assigned by the
//! store, so they can travel through URLs and command lines as plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an ID from its numeric value
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the numeric value
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// The ID following this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }

            /// Parse an ID from caller-supplied text
            ///
            /// Only positive base-10 integers are accepted; anything else is
            /// rejected before it can reach storage.
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let trimmed = s.trim();
                if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
                    return Err(IdParseError::new($entity, s));
                }
                match trimmed.parse::<u64>() {
                    Ok(0) | Err(_) => Err(IdParseError::new($entity, s)),
                    Ok(value) => Ok(Self(value)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(ClientId, "client");
define_id!(EntryId, "time entry");

/// Error returned when an identifier is not a positive integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    entity: &'static str,
    input: String,
}

impl IdParseError {
    fn new(entity: &'static str, input: &str) -> Self {
        Self {
            entity,
            input: input.to_string(),
        }
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {} id", self.input, self.entity)
    }
}

impl std::error::Error for IdParseError {}

/// The authenticated owner every store query is scoped to
///
/// Owners are identified by email address, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerScope(String);

impl OwnerScope {
    /// Create an owner scope, normalising case and surrounding whitespace
    pub fn new(email: impl AsRef<str>) -> Self {
        Self(email.as_ref().trim().to_lowercase())
    }

    /// The normalised owner identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse() {
        assert_eq!(ClientId::parse("42").unwrap().value(), 42);
        assert_eq!(" 7 ".parse::<ClientId>().unwrap(), ClientId::new(7));
    }

    #[test]
    fn test_id_parse_rejects_non_numeric() {
        assert!(ClientId::parse("abc").is_err());
        assert!(ClientId::parse("-1").is_err());
        assert!(ClientId::parse("0").is_err());
        assert!(ClientId::parse("").is_err());
        assert!(ClientId::parse("1.5").is_err());
        assert!(ClientId::parse("99999999999999999999999").is_err());
    }

    #[test]
    fn test_id_parse_error_message() {
        let err = EntryId::parse("x").unwrap_err();
        assert_eq!(err.to_string(), "'x' is not a valid time entry id");
    }

    #[test]
    fn test_id_serialization() {
        let id = ClientId::new(12);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");
        let deserialized: ClientId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_owner_scope_normalised() {
        assert_eq!(OwnerScope::new(" Ada@Example.com "), OwnerScope::new("ada@example.com"));
    }
}
