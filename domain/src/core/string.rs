//! String utilities for the domain layer.

/// Single-line preview of a message for logs and banners (UTF-8 safe)
///
/// Newlines collapse to spaces and the result is cut at `max_chars`
/// characters with a trailing ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();

    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}
