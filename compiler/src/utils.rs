use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

lazy_static! {
    static ref NON_IDENTIFIER: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Replaces every character that cannot appear in a C identifier with `_`.
pub fn sanitize_identifier(text: &str) -> String {
    NON_IDENTIFIER.replace_all(text, "_").into_owned()
}

/// A fresh 128-bit token, lowercase hex in UUID-style groups joined by `_`.
pub fn unique_token() -> String {
    let v: u128 = rand::rng().random();
    format!(
        "{:08x}_{:04x}_{:04x}_{:04x}_{:012x}",
        (v >> 96) as u32,
        (v >> 80) as u16,
        (v >> 64) as u16,
        (v >> 48) as u16,
        (v & 0xffff_ffff_ffff) as u64,
    )
}

/// Escapes `text` for use inside a C++ character or string literal.
pub fn escape_literal(text: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
