//! Readers for the chat export format
//!
//! # Error Handling Strategy
//!
//! Unlike line-oriented history files, an export is a single JSON document,
//! so reading is all-or-nothing:
//!
//! - **Structural failures**: anything that does not decode as an array of
//!   conversations fails the whole read with `ArchiveError::MalformedExport`.
//!   No partial forest is ever returned.
//!
//! - **Reader failures**: errors from the underlying stream (including a
//!   missing export file) surface as `ArchiveError::Io`.
//!
//! - **Lenient fields**: inside a conversation, `null` or missing string,
//!   list and map fields decode to empty values. Individually unusable
//!   conversations are dropped later by the importer, not here.

pub mod deserializers;
pub mod export;

pub use export::{read_export, read_export_file};
