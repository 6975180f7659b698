use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::merge::{MergeOutcome, merge};
use super::persistence::{load_records, save_records};
use crate::errors::{ArchiveError, Result};
use crate::models::Conversation;
use crate::utils::timestamps::parse_date;

/// Fields for a manually created record
#[derive(Debug, Clone, Default)]
pub struct NewConversation {
    pub title: String,
    pub summary: String,
    pub date_started: Option<String>,
    pub date_ended: Option<String>,
    pub source_id: Option<String>,
}

/// Partial edit of an existing record. `None` leaves a field untouched;
/// an empty date string clears that date.
#[derive(Debug, Clone, Default)]
pub struct ConversationPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub date_started: Option<String>,
    pub date_ended: Option<String>,
}

impl ConversationPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.date_started.is_none()
            && self.date_ended.is_none()
    }
}

/// JSON-file-backed record store.
///
/// Every mutation runs its read-modify-write under one write lock and
/// persists the full record set before releasing it. Only one process is
/// expected to write a given store file.
#[derive(Debug)]
pub struct ConversationStore {
    path: PathBuf,
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl ConversationStore {
    /// Open the store at `path`; a missing file starts an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = load_records(&path)?;

        tracing::debug!(path = %path.display(), conversations = records.len(), "Opened store");

        let conversations = records.into_iter().map(|c| (c.id.clone(), c)).collect();
        Ok(Self { path, conversations: RwLock::new(conversations) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records without message bodies, newest update first, ties by title
    pub fn list(&self) -> Vec<Conversation> {
        let mut items: Vec<Conversation> =
            self.read().values().map(Conversation::without_messages).collect();
        sort_for_listing(&mut items);
        items
    }

    pub fn get(&self, id: &str) -> Result<Conversation> {
        self.read().get(id).cloned().ok_or_else(|| ArchiveError::NotFound(id.to_string()))
    }

    /// Insert or replace a record, applying the merge policy, and persist
    pub fn upsert(&self, conversation: Conversation) -> Result<MergeOutcome> {
        let id = conversation.id.clone();
        if id.trim().is_empty() {
            return Err(ArchiveError::Validation("id cannot be empty".to_string()));
        }

        let mut guard = self.write();

        let (merged, outcome) = merge(conversation, guard.get(&id), Utc::now());
        let previous = guard.insert(id.clone(), merged);

        if let Err(e) = self.persist(&guard) {
            // Keep memory consistent with what is on disk
            restore(&mut guard, &id, previous);
            return Err(e);
        }

        tracing::debug!(id = %id, ?outcome, "Upserted conversation");
        Ok(outcome)
    }

    /// Create a record from user-supplied fields with a fresh random id
    pub fn create(&self, fields: NewConversation) -> Result<Conversation> {
        let title = required("title", &fields.title)?;
        let summary = required("summary", &fields.summary)?;
        let date_started = optional_date("dateStarted", fields.date_started.as_deref())?;
        let date_ended = optional_date("dateEnded", fields.date_ended.as_deref())?;
        let source_id = fields
            .source_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let conversation = Conversation {
            id: Uuid::new_v4().simple().to_string(),
            title,
            summary,
            date_started,
            date_ended,
            source_id,
            messages: Vec::new(),
            created_at: None,
            updated_at: None,
        };

        let id = conversation.id.clone();
        self.upsert(conversation)?;
        self.get(&id)
    }

    /// Apply a partial edit; `updated_at` is refreshed to now
    pub fn update(&self, id: &str, patch: ConversationPatch) -> Result<Conversation> {
        let mut guard = self.write();

        let mut conversation =
            guard.get(id).cloned().ok_or_else(|| ArchiveError::NotFound(id.to_string()))?;

        if let Some(title) = patch.title.as_deref() {
            conversation.title = required("title", title)?;
        }
        if let Some(summary) = patch.summary.as_deref() {
            conversation.summary = required("summary", summary)?;
        }
        if let Some(date) = patch.date_started.as_deref() {
            conversation.date_started = optional_date("dateStarted", Some(date))?;
        }
        if let Some(date) = patch.date_ended.as_deref() {
            conversation.date_ended = optional_date("dateEnded", Some(date))?;
        }
        conversation.updated_at = Some(Utc::now());

        let previous = guard.insert(id.to_string(), conversation.clone());
        if let Err(e) = self.persist(&guard) {
            restore(&mut guard, id, previous);
            return Err(e);
        }

        Ok(conversation)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut guard = self.write();

        let removed = guard.remove(id).ok_or_else(|| ArchiveError::NotFound(id.to_string()))?;
        if let Err(e) = self.persist(&guard) {
            guard.insert(id.to_string(), removed);
            return Err(e);
        }

        Ok(())
    }

    /// Remove every record
    pub fn delete_all(&self) -> Result<()> {
        let mut guard = self.write();

        let previous = std::mem::take(&mut *guard);
        if let Err(e) = self.persist(&guard) {
            *guard = previous;
            return Err(e);
        }

        Ok(())
    }

    fn persist(&self, conversations: &HashMap<String, Conversation>) -> Result<()> {
        let mut items: Vec<Conversation> = conversations.values().cloned().collect();
        sort_for_listing(&mut items);
        save_records(&self.path, &items)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Conversation>> {
        self.conversations.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Conversation>> {
        self.conversations.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Newest `updated_at` first (records without one last), ties by title ascending
pub fn sort_for_listing(items: &mut [Conversation]) {
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.title.cmp(&b.title)));
}

fn restore(
    conversations: &mut HashMap<String, Conversation>,
    id: &str,
    previous: Option<Conversation>,
) {
    match previous {
        Some(previous) => {
            conversations.insert(id.to_string(), previous);
        }
        None => {
            conversations.remove(id);
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ArchiveError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s).map(Some).ok_or_else(|| {
            ArchiveError::Validation(format!("{} must be a YYYY-MM-DD date, got {:?}", field, s))
        }),
    }
}
