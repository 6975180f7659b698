use serde_json::Value;

use crate::models::ExportContent;

const CONTENT_TYPE_TEXT: &str = "text";
const CONTENT_TYPE_MULTIMODAL: &str = "multimodal_text";
const ELLIPSIS: &str = "...";

/// Extract the visible text of a message body.
///
/// Only "text" and "multimodal_text" bodies carry text; for those, every
/// string part is trimmed and the non-empty ones are joined with a blank line.
/// Non-string parts (images, attachments) are skipped. Anything else yields
/// an empty string.
pub fn extract_text(content: &ExportContent) -> String {
    match content.content_type.as_str() {
        CONTENT_TYPE_TEXT | CONTENT_TYPE_MULTIMODAL => collect_string_parts(&content.parts),
        _ => String::new(),
    }
}

fn collect_string_parts(parts: &[Value]) -> String {
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();

    texts.join("\n\n")
}

/// Truncate `text` to at most `limit` characters.
///
/// Longer text is cut to leave room for a trailing `...`, so the result never
/// exceeds `limit` characters. Counts `char`s, never splitting a code point.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let cut: String = text.chars().take(keep).collect();
    let mut truncated = cut.trim_end().to_string();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// First value that is non-empty after trimming, trimmed
pub fn first_non_empty<'a>(values: &[&'a str]) -> Option<&'a str> {
    values.iter().copied().map(str::trim).find(|v| !v.is_empty())
}

/// Lower-case `title` and join its words with `-`
pub fn slugify(title: &str) -> String {
    title.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("-")
}
