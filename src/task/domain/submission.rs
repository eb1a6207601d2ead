//! Input policy applied by user interfaces before creating a task.
//!
//! The store accepts any text. Front ends call [`prepare_submission`] so that
//! every client trims, rejects blanks, and caps length the same way.

/// Maximum number of characters an input field accepts for a new task.
pub const MAX_TASK_TEXT_CHARS: usize = 50;

/// Normalizes raw input for a new task.
///
/// The raw field holds at most [`MAX_TASK_TEXT_CHARS`] characters, so the cap
/// applies before trimming and leading whitespace counts against it. Returns
/// `None` when the capped input is blank.
#[must_use]
pub fn prepare_submission(raw: &str) -> Option<String> {
    let capped: String = raw.chars().take(MAX_TASK_TEXT_CHARS).collect();
    let trimmed = capped.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}
