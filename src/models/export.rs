use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::parsers::deserializers::null_as_default;
use crate::utils::timestamps::from_optional_epoch_seconds;

/// One conversation as it appears in the export's top-level array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConversation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversation_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub update_time: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_node: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mapping: HashMap<String, ExportNode>,
}

impl ExportConversation {
    /// Current-leaf pointer, if the export carries a non-empty one
    pub fn current_leaf(&self) -> Option<&str> {
        non_empty(&self.current_node)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_optional_epoch_seconds(self.create_time)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        from_optional_epoch_seconds(self.update_time)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<String>,
    #[serde(default)]
    pub message: Option<ExportMessage>,
}

impl ExportNode {
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref().and_then(non_empty)
    }

    /// Creation instant of the attached message, if any
    pub fn message_created_at(&self) -> Option<DateTime<Utc>> {
        self.message.as_ref().and_then(ExportMessage::created_at)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: ExportAuthor,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub update_time: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: ExportContent,
}

impl ExportMessage {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        from_optional_epoch_seconds(self.create_time)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportAuthor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

/// Message body: a content-type tag plus heterogeneous parts.
///
/// Parts stay as raw JSON values; only plain strings are ever read from them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportContent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Value>,
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
