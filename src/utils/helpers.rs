use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Keeps the first `max_chars` characters of `text`, appending `...` when
/// anything was cut. Counts characters, not bytes.
///
/// # Examples
///
/// ```
/// assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
/// assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Starts a spinner showing `message` until the returned bar is finished.
///
/// Uses the same tick characters and template as the rest of the UI:
/// 120ms tick rate, spinner, elapsed time and message.
pub fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} [{elapsed_precise}] {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
