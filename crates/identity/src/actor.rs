use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockbook_core::{ActorId, LedgerError, LedgerResult};

/// Role carried in provider user metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    /// Least-privileged default when metadata carries no recognizable role.
    #[default]
    Employee,
}

impl Role {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }
}

/// Validated current user, attributed on movements via its [`ActorId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl Actor {
    /// Build an actor from the provider's id/email and its free-form
    /// `user_metadata` object.
    ///
    /// Blank id or email fail validation; unknown or missing role falls back
    /// to [`Role::Employee`]. The id stays opaque — providers use plain
    /// strings, not necessarily UUIDs.
    pub fn from_metadata(id: &str, email: &str, metadata: &JsonValue) -> LedgerResult<Self> {
        let id = ActorId::new(id)?;
        if email.trim().is_empty() {
            return Err(LedgerError::validation("email cannot be blank"));
        }

        let name = metadata
            .get("name")
            .and_then(JsonValue::as_str)
            .map(str::to_string);
        let role = metadata
            .get("role")
            .and_then(JsonValue::as_str)
            .and_then(Role::parse)
            .unwrap_or_default();

        Ok(Self {
            id,
            email: email.to_string(),
            name,
            role,
        })
    }
}
