//! Rolling conversation summary.
//!
//! Newest exchange first; when the text outgrows the budget the oldest tail is
//! dropped. Lossy on purpose: no semantic summarization happens here.

use super::types::Exchange;

/// Render an exchange as it appears in the summary.
pub fn render_exchange(exchange: &Exchange) -> String {
    format!("User: {}\nCoach: {}", exchange.utterance, exchange.reply)
}

/// Prepend `exchange` to `current` and keep at most `max_chars` characters from the start.
pub fn update_summary(current: Option<&str>, exchange: &Exchange, max_chars: usize) -> String {
    let rendered = render_exchange(exchange);
    let combined = match current {
        Some(current) if !current.is_empty() => format!("{rendered}\n\n{current}"),
        _ => rendered,
    };
    truncate_chars(combined, max_chars)
}

/// Keep the first `max_chars` characters (not bytes).
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}
