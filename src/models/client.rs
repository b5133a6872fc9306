//! Client model
//!
//! A client is the billable entity time entries are grouped under. Every
//! client belongs to exactly one owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ClientId, OwnerScope};

/// Maximum length of a client name
pub const MAX_CLIENT_NAME_LEN: usize = 255;

/// A billable client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,

    /// Display name
    pub name: String,

    /// Optional free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owner this client is visible to
    pub owner: OwnerScope,

    /// When the client was created
    pub created_at: DateTime<Utc>,

    /// When the client was last modified
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client
    pub fn new(id: ClientId, name: impl Into<String>, owner: OwnerScope) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: None,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the given owner may see this client
    pub fn is_owned_by(&self, owner: &OwnerScope) -> bool {
        &self.owner == owner
    }

    /// Validate the client
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientValidationError::EmptyName);
        }
        if name.chars().count() > MAX_CLIENT_NAME_LEN {
            return Err(ClientValidationError::NameTooLong(name.chars().count()));
        }
        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Client name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Client name is too long ({} characters, max {})",
                len, MAX_CLIENT_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for ClientValidationError {}
