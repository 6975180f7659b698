use chrono::{DateTime, Utc};

use super::text::{extract_text, first_non_empty, slugify, truncate};
use crate::models::{Conversation, ExportConversation, Message, Role};
use crate::timeline::{TimelineNode, reconstruct};
use crate::utils::timestamps::calendar_date;

pub const SUMMARY_LIMIT: usize = 240;
pub const TITLE_LIMIT: usize = 80;
pub const SUMMARY_PLACEHOLDER: &str = "No summary available";
pub const TITLE_PLACEHOLDER: &str = "Untitled conversation";

/// Earliest and latest instants seen while folding a timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TimeSpan {
    earliest: Option<DateTime<Utc>>,
    latest: Option<DateTime<Utc>>,
}

impl TimeSpan {
    fn observe(&mut self, ts: DateTime<Utc>) {
        if self.earliest.is_none_or(|earliest| ts < earliest) {
            self.earliest = Some(ts);
        }
        if self.latest.is_none_or(|latest| ts > latest) {
            self.latest = Some(ts);
        }
    }
}

/// Convert one export conversation into an archive record.
///
/// Returns `None` when the conversation has nothing to archive: an empty
/// mapping, an empty reconstructed timeline, or no extractable text on any
/// node. Text from other roles keeps the record but never becomes a message.
pub fn convert_conversation(raw: &ExportConversation) -> Option<Conversation> {
    if raw.mapping.is_empty() {
        return None;
    }

    let timeline = reconstruct(raw);
    if timeline.is_empty() {
        return None;
    }

    let folded = fold_timeline(&timeline);
    if !folded.has_text {
        return None;
    }

    let mut span = folded.span;
    if span.earliest.is_none() {
        span.earliest = raw.created_at();
    }
    if span.latest.is_none() {
        span.latest = raw.updated_at();
    }

    let summary = derive_summary(&folded.first_user, &folded.first_assistant);
    let title = derive_title(&raw.title, &summary);
    let id = derive_id(raw, &title, span.earliest);

    let created_at = span.earliest;
    let updated_at = span.latest.or(created_at);

    Some(Conversation {
        source_id: Some(id.clone()),
        id,
        title,
        summary,
        date_started: span.earliest.as_ref().map(calendar_date),
        date_ended: span.latest.as_ref().map(calendar_date),
        messages: folded.messages,
        created_at,
        updated_at,
    })
}

struct FoldedTimeline {
    messages: Vec<Message>,
    span: TimeSpan,
    first_user: String,
    first_assistant: String,
    has_text: bool,
}

fn fold_timeline(timeline: &[TimelineNode<'_>]) -> FoldedTimeline {
    let mut folded = FoldedTimeline {
        messages: Vec::new(),
        span: TimeSpan::default(),
        first_user: String::new(),
        first_assistant: String::new(),
        has_text: false,
    };

    for entry in timeline {
        let Some(message) = entry.node.message.as_ref() else {
            continue;
        };

        let created_at = message.created_at();
        if let Some(ts) = created_at {
            folded.span.observe(ts);
        }

        let text = extract_text(&message.content);
        if text.is_empty() {
            continue;
        }
        folded.has_text = true;

        let Some(role) = Role::from_export(&message.author.role) else {
            continue;
        };

        let first = match role {
            Role::User => &mut folded.first_user,
            Role::Assistant => &mut folded.first_assistant,
        };
        if first.is_empty() {
            first.clone_from(&text);
        }

        folded.messages.push(Message {
            id: entry.id().to_string(),
            author: role,
            content: text,
            created_at,
        });
    }

    folded
}

/// First user text, else first assistant text, capped at [`SUMMARY_LIMIT`]
pub fn derive_summary(first_user: &str, first_assistant: &str) -> String {
    match first_non_empty(&[first_user, first_assistant]) {
        Some(text) => truncate(text, SUMMARY_LIMIT),
        None => SUMMARY_PLACEHOLDER.to_string(),
    }
}

/// Export title when present, otherwise derived from the summary
pub fn derive_title(raw_title: &str, summary: &str) -> String {
    let title = raw_title.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    let from_summary = truncate(summary.trim(), TITLE_LIMIT);
    if from_summary.is_empty() { TITLE_PLACEHOLDER.to_string() } else { from_summary }
}

/// Stable identifier: conversation id, else primary id, else derived from
/// title and creation instant
pub fn derive_id(raw: &ExportConversation, title: &str, created_at: Option<DateTime<Utc>>) -> String {
    first_non_empty(&[raw.conversation_id.as_str(), raw.id.as_str()])
        .map(str::to_string)
        .unwrap_or_else(|| deterministic_id(title, created_at))
}

/// Build a fallback identifier from the slugified title and the creation
/// instant at second precision (`undated` when no instant is known)
pub fn deterministic_id(title: &str, created_at: Option<DateTime<Utc>>) -> String {
    let mut base = slugify(title);
    if base.is_empty() {
        base = "conversation".to_string();
    }

    let suffix = match created_at {
        Some(ts) => ts.format("%Y%m%d%H%M%S").to_string(),
        None => "undated".to_string(),
    };

    format!("{}-{}", base, suffix)
}
