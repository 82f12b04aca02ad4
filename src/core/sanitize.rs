// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Keep printable ASCII only: letters, digits, punctuation, space and the
/// ASCII whitespace controls (\t \n \r \x0b \x0c).
pub fn printable_only(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
        .collect()
}

/// `"24838363_1"` → `"24838363"`. Sheets sometimes carry a suffix after the id.
pub fn listing_id(raw: &str) -> &str {
    let raw = raw.trim();
    raw.split('_').next().unwrap_or(raw)
}
