use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::error::AdminError;

/// A single persisted administrator.
///
/// Fields the store does not know about are kept in `extra` and written
/// back unchanged, so callers can attach their own metadata at creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String, // numeric ids written by hand are read as their decimal string
    pub username: String,
    pub password: String, // bcrypt hash, never the plaintext
    #[serde(rename = "createdAt", default)]
    pub created_at: String, // RFC 3339 timestamp
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An administrator as returned to callers, with the credential removed
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AdminProfile {
    pub id: String,
    pub username: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AdminRecord {
    /// Drop the password hash
    pub fn into_profile(self) -> AdminProfile {
        AdminProfile {
            id: self.id,
            username: self.username,
            created_at: self.created_at,
            extra: self.extra,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number id, got {}",
            other
        ))),
    }
}

/// Input for creating an administrator: an open set of fields that must
/// include `username` and `password`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct NewAdmin {
    fields: Map<String, Value>,
}

/// Validated pieces of a `NewAdmin`, ready to be turned into a record
pub(crate) struct NewAdminParts {
    pub username: String,
    pub password: String,
    pub extra: Map<String, Value>,
}

impl NewAdmin {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::default()
            .with_field("username", username.into())
            .with_field("password", password.into())
    }

    /// Attach an arbitrary field that will be stored alongside the admin
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Split into credential, username and passthrough fields.
    ///
    /// `id` and `createdAt` are generated by the store, so any caller
    /// values for them are discarded.
    pub(crate) fn into_parts(mut self) -> Result<NewAdminParts, AdminError> {
        let password = take_required_string(&mut self.fields, "password")?;
        let username = take_required_string(&mut self.fields, "username")?;
        self.fields.remove("id");
        self.fields.remove("createdAt");

        Ok(NewAdminParts {
            username,
            password,
            extra: self.fields,
        })
    }
}

impl From<Map<String, Value>> for NewAdmin {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

fn take_required_string(
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<String, AdminError> {
    match fields.remove(field) {
        None | Some(Value::Null) => Err(AdminError::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(AdminError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        }),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(AdminError::InvalidField {
            field,
            reason: format!("expected a string, got {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_uses_camel_case_timestamp() {
        let record = AdminRecord {
            id: "1700000000000".to_string(),
            username: "alice".to_string(),
            password: "$2b$10$hash".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            extra: Map::new(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let raw = json!({
            "id": "1",
            "username": "alice",
            "password": "$2b$10$hash",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "email": "alice@example.com",
            "permissions": ["read", "write"]
        });

        let record: AdminRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.extra["email"], "alice@example.com");
        assert_eq!(record.extra["permissions"], json!(["read", "write"]));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_missing_created_at_defaults_to_empty() {
        let record: AdminRecord =
            serde_json::from_value(json!({"id": "1", "username": "seed", "password": "x"}))
                .unwrap();
        assert!(record.created_at.is_empty());
    }

    #[test]
    fn test_numeric_id_is_read_as_string() {
        let record: AdminRecord = serde_json::from_value(
            json!({"id": 2, "username": "seed", "password": "x", "team": "ops"}),
        )
        .unwrap();
        assert_eq!(record.id, "2");
        assert_eq!(record.extra["team"], "ops");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "2");
    }

    #[test]
    fn test_non_scalar_id_is_rejected() {
        let result: Result<AdminRecord, _> = serde_json::from_value(
            json!({"id": ["1"], "username": "seed", "password": "x"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_has_no_password() {
        let record = AdminRecord {
            id: "1".to_string(),
            username: "alice".to_string(),
            password: "$2b$10$hash".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            extra: Map::new(),
        };

        let value = serde_json::to_value(record.into_profile()).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "alice");
    }

    #[test]
    fn test_new_admin_parts() {
        let parts = NewAdmin::new("alice", "secret")
            .with_field("email", "alice@example.com")
            .with_field("id", "caller-chosen")
            .with_field("createdAt", "yesterday")
            .into_parts()
            .unwrap();

        assert_eq!(parts.username, "alice");
        assert_eq!(parts.password, "secret");
        assert_eq!(parts.extra.len(), 1);
        assert_eq!(parts.extra["email"], "alice@example.com");
    }

    #[test]
    fn test_new_admin_requires_password() {
        let admin = NewAdmin::default().with_field("username", "alice");
        assert!(matches!(
            admin.into_parts(),
            Err(AdminError::MissingField("password"))
        ));
    }

    #[test]
    fn test_new_admin_rejects_bad_values() {
        assert!(matches!(
            NewAdmin::new("", "secret").into_parts(),
            Err(AdminError::InvalidField { field: "username", .. })
        ));
        assert!(matches!(
            NewAdmin::default()
                .with_field("username", "alice")
                .with_field("password", 42)
                .into_parts(),
            Err(AdminError::InvalidField { field: "password", .. })
        ));
    }

    #[test]
    fn test_new_admin_from_json_object() {
        let admin: NewAdmin =
            serde_json::from_value(json!({"username": "bob", "password": "pw", "role": "owner"}))
                .unwrap();
        assert_eq!(admin.fields().len(), 3);
        assert_eq!(admin.into_parts().unwrap().extra["role"], "owner");
    }
}
