//! Discord message limits and truncation helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add title/footer limits, share one UTF-8 safe truncation routine
//! - 1.0.0: Initial implementation

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed title limit
pub const EMBED_TITLE_LIMIT: usize = 256;
/// Discord embed footer limit
pub const EMBED_FOOTER_LIMIT: usize = 2048;

/// Truncate text to at most `limit` bytes, adding an ellipsis if needed
///
/// Never splits a multi-byte character.
pub fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }

    // Room for "..."
    let mut end = limit.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit embed limit, adding ellipsis if needed
pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

/// Truncate text to fit message limit, adding ellipsis if needed
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}
