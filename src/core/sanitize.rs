// src/core/sanitize.rs

/// Control characters that spreadsheet XML cannot carry.
///
/// Deny-list, by code point:
/// - `U+0000..=U+0008`
/// - `U+000B` (vertical tab), `U+000C` (form feed)
/// - `U+000E..=U+001F`
///
/// Tab (`U+0009`), line feed (`U+000A`) and carriage return (`U+000D`) are
/// allowed, as is everything from `U+0020` upward.
#[inline]
pub fn is_forbidden_control(ch: char) -> bool {
    matches!(ch, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Strip forbidden control characters, leaving every other char in place.
pub fn strip_control_chars(s: &str) -> String {
    if !s.chars().any(is_forbidden_control) {
        return s.to_owned();
    }
    s.chars().filter(|&ch| !is_forbidden_control(ch)).collect()
}

/// Collapse whitespace runs to a single space and trim both ends.
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

/// Make a dataset base name safe to use as a file stem.
/// Path separators, reserved punctuation and control chars become `_`.
/// Returns `None` when nothing usable is left.
pub fn clean_base_name(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            c if c.is_control() => out.push('_'),
            c => out.push(c),
        }
    }
    let out = out.trim_matches(|c: char| c == '_' || c == '.' || c.is_whitespace());
    if out.is_empty() { None } else { Some(out.to_string()) }
}
