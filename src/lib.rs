//! Chat Archive - Import exported chat conversations into a local record store
//!
//! This library turns a chat-assistant export (a JSON array of conversations,
//! each stored as a branching node graph) into flat, queryable records. It supports:
//!
//! - Parsing the export into raw conversation graphs
//! - Reconstructing one linear timeline per conversation from its current leaf
//! - Normalizing messages, summary, title, dates and a stable identifier
//! - Merging records into a JSON-file store with idempotent re-import
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use chat_archive::{ConversationStore, import_into, load_and_convert};
//!
//! let records = load_and_convert(Path::new("conversations.json"))?;
//! let store = ConversationStore::open("data/conversations_store.json")?;
//! let report = import_into(&store, records)?;
//! println!("{} new, {} updated", report.created, report.updated);
//! # Ok::<(), chat_archive::ArchiveError>(())
//! ```

pub mod cli;
pub mod errors;
pub mod importer;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod store;
pub mod timeline;
pub mod utils;

// Re-export commonly used types
pub use errors::{ArchiveError, Result};
pub use importer::{ImportReport, convert_export, import_into, load_and_convert};
pub use models::{Conversation, Message, Role};
pub use store::{ConversationStore, MergeOutcome};
