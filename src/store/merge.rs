use chrono::{DateTime, Utc};

use crate::models::Conversation;

/// Whether a merge inserted a new record or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
}

/// Combine an incoming record with the stored record of the same id.
///
/// The incoming record replaces metadata and messages wholesale. Only the
/// instants are reconciled:
/// - `created_at`: incoming value if set, else the existing record's, else `now`
/// - `updated_at`: incoming value if set, else `now`
pub fn merge(
    mut incoming: Conversation,
    existing: Option<&Conversation>,
    now: DateTime<Utc>,
) -> (Conversation, MergeOutcome) {
    let outcome = match existing {
        Some(existing) => {
            if incoming.created_at.is_none() {
                incoming.created_at = existing.created_at;
            }
            MergeOutcome::Updated
        }
        None => MergeOutcome::Created,
    };

    incoming.created_at.get_or_insert(now);
    incoming.updated_at.get_or_insert(now);

    (incoming, outcome)
}
