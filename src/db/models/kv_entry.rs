use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw row of the key-value table: one store key and its serialized value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
