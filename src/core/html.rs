// src/core/html.rs
//
// Tolerant, case-insensitive scanning over raw HTML. No DOM: we find tags by
// text and balance same-name elements when a block may nest (divs).
// Lowercasing only touches ASCII, so byte offsets into the lowercased copy
// are valid in the input.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `<o …>…c` block starting at or after `from`. Does not balance nesting.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of an element block: tags stripped, entities decoded,
/// whitespace collapsed.
pub fn text_of(block: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))))
}

/// Position of the next `<tag` (followed by whitespace, `>` or `/`) in an
/// already-lowercased document.
fn find_tag_start(lc: &str, open: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(open) {
        let at = pos + rel;
        match lc.as_bytes().get(at + open.len()) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            _ => pos = at + open.len(),
        }
    }
    None
}

/// The full element whose open tag starts at `start`, balancing nested
/// elements of the same name.
pub fn element_block_ci(s: &str, tag: &str, start: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let close = join!("</", &to_lower(tag));

    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let next_close = lc.get(pos..)?.find(&close)? + pos;
        match find_tag_start(&lc, &open, pos) {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + open.len();
            }
            _ => {
                depth = depth.checked_sub(1)?;
                let end = lc[next_close..].find('>')? + next_close + 1;
                if depth == 0 {
                    return Some((start, end));
                }
                pos = end;
            }
        }
    }
}

/// Every open tag `<tag …>` at or after `from`, as (start, open_end) pairs.
pub fn open_tags_ci(s: &str, tag: &str, from: usize) -> Vec<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let mut out = Vec::new();
    let mut pos = from;
    while let Some(at) = find_tag_start(&lc, &open, pos) {
        let Some(rel) = s[at..].find('>') else { break };
        let open_end = at + rel + 1;
        out.push((at, open_end));
        pos = open_end;
    }
    out
}

/// First `<tag>` element (balanced) whose open tag satisfies `pred`.
pub fn find_element_ci<F>(s: &str, tag: &str, from: usize, pred: F) -> Option<(usize, usize)>
where
    F: Fn(&str) -> bool,
{
    open_tags_ci(s, tag, from)
        .into_iter()
        .find(|&(at, open_end)| pred(&s[at..open_end]))
        .and_then(|(at, _)| element_block_ci(s, tag, at))
}

/// First `<tag class="… class …">` element.
pub fn find_by_class_ci(s: &str, tag: &str, class: &str, from: usize) -> Option<(usize, usize)> {
    find_element_ci(s, tag, from, |open| has_class(open, class))
}

/// All `<tag class="… class …">` elements, in document order.
pub fn all_by_class_ci(s: &str, tag: &str, class: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((start, end)) = find_by_class_ci(s, tag, class, pos) {
        out.push((start, end));
        pos = end;
    }
    out
}

/// First `<tag attr="value">` element.
pub fn find_by_attr_ci(s: &str, tag: &str, attr: &str, value: &str, from: usize) -> Option<(usize, usize)> {
    find_element_ci(s, tag, from, |open| attr_value(open, attr).as_deref() == Some(value))
}

pub fn has_class(open_tag: &str, class: &str) -> bool {
    attr_value(open_tag, "class")
        .map(|v| v.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Attribute value from an open tag (`<meta property="x" content='y'>`).
/// Quoted or bare values; attribute names match case-insensitively.
pub fn attr_value(open_tag: &str, attr: &str) -> Option<String> {
    let b = open_tag.as_bytes();
    let n = b.len();
    let mut i = open_tag.find(|c: char| c.is_ascii_whitespace())?;

    while i < n {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        if i >= n || b[i] == b'>' { break; }

        let name_start = i;
        while i < n && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') { i += 1; }
        let name = &open_tag[name_start..i];
        while i < n && b[i].is_ascii_whitespace() { i += 1; }

        let mut value = "";
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            if i < n && (b[i] == b'"' || b[i] == b'\'') {
                let quote = b[i];
                i += 1;
                let vs = i;
                while i < n && b[i] != quote { i += 1; }
                value = &open_tag[vs..i];
                i += 1;
            } else {
                let vs = i;
                while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' { i += 1; }
                value = &open_tag[vs..i];
            }
        }

        if name.eq_ignore_ascii_case(attr) {
            return Some(normalize_entities(value));
        }
    }
    None
}

/// `content` of the first `<meta property=key>` (or `name=key`) tag.
pub fn meta_content(doc: &str, key: &str) -> Option<String> {
    open_tags_ci(doc, "meta", 0).into_iter().find_map(|(at, open_end)| {
        let tag = &doc[at..open_end];
        let matches = attr_value(tag, "property").as_deref() == Some(key)
            || attr_value(tag, "name").as_deref() == Some(key);
        if matches { attr_value(tag, "content") } else { None }
    })
}
