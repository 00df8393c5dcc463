//! Output formatting utilities

/// Truncate a string to at most `max_len` characters, ending in "..." when cut.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < 3 {
        return "...".to_string();
    }
    let trimmed: String = s.chars().take(max_len - 3).collect();
    format!("{trimmed}...")
}

/// Keep a value on one line for tab-separated output.
#[must_use]
pub fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// Compact human count: 950, 1.2k, 3.4M.
#[must_use]
pub fn format_count(n: u64) -> String {
    const K: u64 = 1_000;
    const M: u64 = K * 1_000;

    if n >= M {
        format!("{:.1}M", n as f64 / M as f64)
    } else if n >= 10 * K {
        format!("{:.1}k", n as f64 / K as f64)
    } else {
        n.to_string()
    }
}
