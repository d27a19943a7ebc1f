//! Link destination/title scanning and URL normalization, shared by the
//! reference-definition block rule and the link/image/autolink inline rules.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::unescape_all;

static GOOD_DATA_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/(gif|png|jpeg|webp);").unwrap());

const BAD_PROTOCOLS: &[&str] = &["file", "javascript", "vbscript"];

/// Bytes that pass through URL normalization unescaped, besides ASCII
/// alphanumerics.
const URL_SAFE: &[u8] = b";/?:@&=+$,-_.!~*'()#";

/// Scan a link destination starting at `pos`. Either `<...>` (no newlines)
/// or a run without spaces or control characters, allowing one level of
/// balanced parentheses at its end: `foo(bar)` but not `a(b)c`.
///
/// Returns the unescaped destination and the position after it.
pub fn parse_link_destination(s: &str, mut pos: usize, max: usize) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    let start = pos;

    if pos < max && bytes[pos] == b'<' {
        pos += 1;
        while pos < max {
            match bytes[pos] {
                b'\n' => return None,
                b'>' => return Some((unescape_all(&s[start + 1..pos]), pos + 1)),
                b'\\' if pos + 1 < max => pos += 2,
                _ => pos += 1,
            }
        }
        return None;
    }

    let mut level = 0usize;
    while pos < max {
        match bytes[pos] {
            b' ' | 0x7f => break,
            b if b < 0x20 => break,
            b'\\' if pos + 1 < max => pos += 2,
            b'(' => {
                if level == 1 {
                    break;
                }
                level += 1;
                pos += 1;
            }
            b')' => {
                if level == 0 {
                    break;
                }
                level -= 1;
                pos += 1;
                // A parenthesized group has to end the destination.
                if !ends_destination(bytes, pos, max) {
                    return None;
                }
            }
            _ => pos += 1,
        }
    }

    if start == pos || level != 0 {
        return None;
    }
    Some((unescape_all(s.get(start..pos)?), pos))
}

fn ends_destination(bytes: &[u8], pos: usize, max: usize) -> bool {
    pos >= max || matches!(bytes[pos], b' ' | b')' | 0x7f) || bytes[pos] < 0x20
}

/// A parsed link title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTitle {
    pub title: String,
    /// Newlines crossed inside the title.
    pub lines: usize,
    pub end: usize,
}

/// Scan a link title delimited by `"…"`, `'…'` or `(…)` starting at `pos`.
pub fn parse_link_title(s: &str, mut pos: usize, max: usize) -> Option<LinkTitle> {
    let bytes = s.as_bytes();
    let start = pos;
    if pos >= max {
        return None;
    }

    let marker = match bytes[pos] {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    pos += 1;

    let mut lines = 0;
    while pos < max {
        let b = bytes[pos];
        if b == marker {
            return Some(LinkTitle {
                title: unescape_all(s.get(start + 1..pos)?),
                lines,
                end: pos + 1,
            });
        }
        if b == b'\n' {
            lines += 1;
        } else if b == b'\\' && pos + 1 < max {
            pos += 1;
            if bytes[pos] == b'\n' {
                lines += 1;
            }
        }
        pos += 1;
    }
    None
}

/// Percent-encode everything outside the URL-safe set, keeping existing
/// `%XX` escapes intact.
pub fn normalize_link(url: &str) -> String {
    let bytes = url.as_bytes();
    let mut out = String::with_capacity(url.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            out.push_str(&url[i..i + 3]);
            i += 3;
            continue;
        }
        if b.is_ascii_alphanumeric() || URL_SAFE.contains(&b) {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{:02X}", b);
        }
        i += 1;
    }
    out
}

/// Percent-decode a URL for display. Falls back to the input when decoding
/// produces nothing or invalid UTF-8.
pub fn normalize_link_text(text: &str) -> String {
    match urlencoding::decode(text) {
        Ok(decoded) if !decoded.is_empty() => decoded.into_owned(),
        _ => text.to_string(),
    }
}

fn remove_special(s: &str) -> String {
    s.chars().filter(|&c| !(c <= ' ' || c == '\x7f')).collect()
}

/// Reject `javascript:`, `vbscript:`, `file:` and non-image `data:` URLs.
pub fn validate_link(url: &str) -> bool {
    let decoded = html_escape::decode_html_entities(url);
    let lowered = decoded.trim().to_lowercase();

    if let Some((proto, _)) = lowered.split_once(':') {
        let proto = remove_special(proto);
        if BAD_PROTOCOLS.contains(&proto.as_str()) {
            return false;
        }
        if proto == "data" && !GOOD_DATA_URL.is_match(&lowered) {
            return false;
        }
    }
    true
}
