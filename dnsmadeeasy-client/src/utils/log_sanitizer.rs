//! Helpers that keep response bodies and credentials out of logs.

/// Maximum number of bytes of a body that is written to the log.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a key left visible by [`mask_key`].
const VISIBLE_KEY_CHARS: usize = 4;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a body for logging, noting the full length when cut.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an API key, keeping only its first few characters.
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(VISIBLE_KEY_CHARS).collect();
    if visible.len() == key.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
