//! Data models for exported and archived conversations.
//!
//! - [`ExportConversation`] and friends mirror the raw export file (read-only, one import run)
//! - [`Conversation`] / [`Message`] are the normalized records kept in the store
//!
//! Export models tolerate `null` and missing fields through the helpers in
//! `parsers::deserializers`; stored records accept the legacy empty-date and
//! zero-time encodings.

pub mod conversation;
pub mod export;

pub use conversation::{Conversation, Message, Role};
pub use export::{ExportAuthor, ExportContent, ExportConversation, ExportMessage, ExportNode};
