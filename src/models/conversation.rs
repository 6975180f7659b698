use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Normalized, persisted representation of one conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_date"
    )]
    pub date_started: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_date"
    )]
    pub date_ended: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_instant"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_instant"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Copy of this record without the message bodies, for list views
    pub fn without_messages(&self) -> Self {
        Self { messages: Vec::new(), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub author: Role,
    pub content: String,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_instant"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Author of a kept message. Other export roles (system, tool, ...) never make it into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Case-insensitive match against an export author role
    pub fn from_export(role: &str) -> Option<Self> {
        if role.eq_ignore_ascii_case("user") {
            Some(Role::User)
        } else if role.eq_ignore_ascii_case("assistant") {
            Some(Role::Assistant)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
