use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identifier of a source row. Used for ordering upstream and as the row key
/// when rendering; never shown as a column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordKey {
    Int(i64),
    Uuid(Uuid),
    Text(String),
}

impl RecordKey {
    /// Best-effort conversion of a JSON scalar. Strings that parse as UUIDs
    /// become [`RecordKey::Uuid`].
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(
                number
                    .as_i64()
                    .map(Self::Int)
                    .unwrap_or_else(|| Self::Text(number.to_string())),
            ),
            Value::String(text) => Some(
                Uuid::parse_str(text)
                    .map(Self::Uuid)
                    .unwrap_or_else(|_| Self::Text(text.clone())),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Int(value) => write!(f, "{value}"),
            RecordKey::Uuid(value) => write!(f, "{value}"),
            RecordKey::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordKey {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

/// A row of the `employees` relation, narrowed to the columns the directory
/// knows about. Every column is optional because the relation's schema is
/// owned by the data service, not by us. Unknown columns are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmployeeRecord {
    #[serde(deserialize_with = "lenient_key")]
    pub id: Option<RecordKey>,
    #[serde(deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub email: Option<String>,
}

impl EmployeeRecord {
    pub fn with_id(id: impl Into<RecordKey>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Strings pass through, numbers keep their decimal text, everything else is
/// treated as absent.
pub fn text_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_json(&Value::deserialize(deserializer)?))
}

fn lenient_key<'de, D>(deserializer: D) -> Result<Option<RecordKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RecordKey::from_json(&Value::deserialize(deserializer)?))
}
