//! Persistent record store
//!
//! Records live in a single JSON file (`{"conversations": [...]}`) that is
//! rewritten in full on every mutation using temp file + rename:
//! - `merge`: create-vs-update policy and instant reconciliation
//! - `persistence`: load/save of the store file
//! - `file_store`: locked in-memory map with get/upsert/list/delete

pub mod file_store;
pub mod merge;
pub mod persistence;

pub use file_store::{ConversationPatch, ConversationStore, NewConversation, sort_for_listing};
pub use merge::{MergeOutcome, merge};
