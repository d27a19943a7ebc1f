//! Character classes and string helpers shared by the block and inline parsers.

/// Unicode punctuation outside ASCII (general categories Pc, Pd, Ps, Pe, Pi,
/// Pf, Po), as inclusive ranges sorted by start.
static UNICODE_PUNCT: &[(u32, u32)] = &[
    (0x00A1, 0x00A1), (0x00A7, 0x00A7), (0x00AB, 0x00AB), (0x00B6, 0x00B7),
    (0x00BB, 0x00BB), (0x00BF, 0x00BF), (0x037E, 0x037E), (0x0387, 0x0387),
    (0x055A, 0x055F), (0x0589, 0x058A), (0x05BE, 0x05BE), (0x05C0, 0x05C0),
    (0x05C3, 0x05C3), (0x05C6, 0x05C6), (0x05F3, 0x05F4), (0x0609, 0x060A),
    (0x060C, 0x060D), (0x061B, 0x061B), (0x061D, 0x061F), (0x066A, 0x066D),
    (0x06D4, 0x06D4), (0x0700, 0x070D), (0x07F7, 0x07F9), (0x0830, 0x083E),
    (0x085E, 0x085E), (0x0964, 0x0965), (0x0970, 0x0970), (0x09FD, 0x09FD),
    (0x0A76, 0x0A76), (0x0AF0, 0x0AF0), (0x0C77, 0x0C77), (0x0C84, 0x0C84),
    (0x0DF4, 0x0DF4), (0x0E4F, 0x0E4F), (0x0E5A, 0x0E5B), (0x0F04, 0x0F12),
    (0x0F14, 0x0F14), (0x0F3A, 0x0F3D), (0x0F85, 0x0F85), (0x0FD0, 0x0FD4),
    (0x0FD9, 0x0FDA), (0x104A, 0x104F), (0x10FB, 0x10FB), (0x1360, 0x1368),
    (0x1400, 0x1400), (0x166E, 0x166E), (0x169B, 0x169C), (0x16EB, 0x16ED),
    (0x1735, 0x1736), (0x17D4, 0x17D6), (0x17D8, 0x17DA), (0x1800, 0x180A),
    (0x1944, 0x1945), (0x1A1E, 0x1A1F), (0x1AA0, 0x1AA6), (0x1AA8, 0x1AAD),
    (0x1B5A, 0x1B60), (0x1B7D, 0x1B7E), (0x1BFC, 0x1BFF), (0x1C3B, 0x1C3F),
    (0x1C7E, 0x1C7F), (0x1CC0, 0x1CC7), (0x1CD3, 0x1CD3), (0x2010, 0x2027),
    (0x2030, 0x2043), (0x2045, 0x2051), (0x2053, 0x205E), (0x207D, 0x207E),
    (0x208D, 0x208E), (0x2308, 0x230B), (0x2329, 0x232A), (0x2768, 0x2775),
    (0x27C5, 0x27C6), (0x27E6, 0x27EF), (0x2983, 0x2998), (0x29D8, 0x29DB),
    (0x29FC, 0x29FD), (0x2CF9, 0x2CFC), (0x2CFE, 0x2CFF), (0x2D70, 0x2D70),
    (0x2E00, 0x2E2E), (0x2E30, 0x2E4F), (0x2E52, 0x2E5D), (0x3001, 0x3003),
    (0x3008, 0x3011), (0x3014, 0x301F), (0x3030, 0x3030), (0x303D, 0x303D),
    (0x30A0, 0x30A0), (0x30FB, 0x30FB), (0xA4FE, 0xA4FF), (0xA60D, 0xA60F),
    (0xA673, 0xA673), (0xA67E, 0xA67E), (0xA6F2, 0xA6F7), (0xA874, 0xA877),
    (0xA8CE, 0xA8CF), (0xA8F8, 0xA8FA), (0xA8FC, 0xA8FC), (0xA92E, 0xA92F),
    (0xA95F, 0xA95F), (0xA9C1, 0xA9CD), (0xA9DE, 0xA9DF), (0xAA5C, 0xAA5F),
    (0xAADE, 0xAADF), (0xAAF0, 0xAAF1), (0xABEB, 0xABEB), (0xFD3E, 0xFD3F),
    (0xFE10, 0xFE19), (0xFE30, 0xFE52), (0xFE54, 0xFE61), (0xFE63, 0xFE63),
    (0xFE68, 0xFE68), (0xFE6A, 0xFE6B), (0xFF01, 0xFF03), (0xFF05, 0xFF0A),
    (0xFF0C, 0xFF0F), (0xFF1A, 0xFF1B), (0xFF1F, 0xFF20), (0xFF3B, 0xFF3D),
    (0xFF3F, 0xFF3F), (0xFF5B, 0xFF5B), (0xFF5D, 0xFF5D), (0xFF5F, 0xFF65),
    (0x10100, 0x10102), (0x1039F, 0x1039F), (0x103D0, 0x103D0), (0x1056F, 0x1056F),
    (0x10857, 0x10857), (0x1091F, 0x1091F), (0x1093F, 0x1093F), (0x10A50, 0x10A58),
    (0x10A7F, 0x10A7F), (0x10AF0, 0x10AF6), (0x10B39, 0x10B3F), (0x10B99, 0x10B9C),
    (0x10EAD, 0x10EAD), (0x10F55, 0x10F59), (0x10F86, 0x10F89), (0x11047, 0x1104D),
    (0x110BB, 0x110BC), (0x110BE, 0x110C1), (0x11140, 0x11143), (0x11174, 0x11175),
    (0x111C5, 0x111C8), (0x111CD, 0x111CD), (0x111DB, 0x111DB), (0x111DD, 0x111DF),
    (0x11238, 0x1123D), (0x112A9, 0x112A9), (0x1144B, 0x1144F), (0x1145A, 0x1145B),
    (0x1145D, 0x1145D), (0x114C6, 0x114C6), (0x115C1, 0x115D7), (0x11641, 0x11643),
    (0x11660, 0x1166C), (0x116B9, 0x116B9), (0x1173C, 0x1173E), (0x1183B, 0x1183B),
    (0x11944, 0x11946), (0x119E2, 0x119E2), (0x11A3F, 0x11A46), (0x11A9A, 0x11A9C),
    (0x11A9E, 0x11AA2), (0x11C41, 0x11C45), (0x11C70, 0x11C71), (0x11EF7, 0x11EF8),
    (0x11FFF, 0x11FFF), (0x12470, 0x12474), (0x12FF1, 0x12FF2), (0x16A6E, 0x16A6F),
    (0x16AF5, 0x16AF5), (0x16B37, 0x16B3B), (0x16B44, 0x16B44), (0x16E97, 0x16E9A),
    (0x16FE2, 0x16FE2), (0x1BC9F, 0x1BC9F), (0x1DA87, 0x1DA8B), (0x1E95E, 0x1E95F),
];

/// ASCII punctuation as CommonMark defines it (every printable non-alphanumeric).
fn is_markdown_punct(c: char) -> bool {
    c.is_ascii_punctuation()
}

fn is_unicode_punct(c: char) -> bool {
    let cp = c as u32;
    UNICODE_PUNCT
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Punctuation for flanking decisions: ASCII markdown punctuation or Unicode
/// punctuation.
pub fn is_punct(c: char) -> bool {
    is_markdown_punct(c) || is_unicode_punct(c)
}

/// Collapse whitespace runs to one space, lowercase, and trim.
/// Used as the key of the reference table.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_space = false;
    for c in label.chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
            continue;
        }
        out.extend(c.to_lowercase());
        last_space = false;
    }
    out.trim().to_string()
}

/// Skips spaces and newlines.
pub fn skip_ws(s: &[u8], mut pos: usize, max: usize) -> usize {
    while pos < max && matches!(s.get(pos), Some(b' ' | b'\n')) {
        pos += 1;
    }
    pos
}

/// Try to decode a character reference at the start of `s` (which must begin
/// with `&`). Returns the decoded text and the number of bytes consumed.
pub fn parse_entity(s: &str) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'&') {
        return None;
    }

    let mut pos = 1;
    if bytes.get(pos) == Some(&b'#') {
        pos += 1;
        let hex = matches!(bytes.get(pos), Some(b'x' | b'X'));
        if hex {
            pos += 1;
        }
        let digits_start = pos;
        let max_digits = if hex { 6 } else { 7 };
        while pos < bytes.len()
            && pos - digits_start < max_digits
            && (if hex {
                bytes[pos].is_ascii_hexdigit()
            } else {
                bytes[pos].is_ascii_digit()
            })
        {
            pos += 1;
        }
        if pos == digits_start {
            return None;
        }
    } else {
        if !bytes.get(pos).is_some_and(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        let name_start = pos;
        while pos < bytes.len() && pos - name_start < 32 && bytes[pos].is_ascii_alphanumeric() {
            pos += 1;
        }
    }

    if bytes.get(pos) != Some(&b';') {
        return None;
    }
    let candidate = &s[..=pos];
    let decoded = html_escape::decode_html_entities(candidate);
    if decoded == candidate {
        return None;
    }
    // A decoder that falls back to a legacy prefix (`&ampx;` -> `&x;`) leaves
    // the semicolon in place; that is not a match.
    if decoded.ends_with(';') && candidate != "&semi;" {
        return None;
    }
    Some((decoded.into_owned(), pos + 1))
}

/// Resolve backslash escapes of ASCII punctuation and character references.
pub fn unescape_all(s: &str) -> String {
    if !s.contains(['\\', '&']) {
        return s.to_string();
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut run_start = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                out.push_str(&s[run_start..i]);
                if bytes[i + 1].is_ascii_punctuation() {
                    out.push(bytes[i + 1] as char);
                    i += 2;
                    run_start = i;
                } else {
                    out.push('\\');
                    i += 1;
                    run_start = i;
                }
            }
            b'&' => {
                if let Some((decoded, len)) = parse_entity(&s[i..]) {
                    out.push_str(&s[run_start..i]);
                    out.push_str(&decoded);
                    i += len;
                    run_start = i;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    out.push_str(&s[run_start..]);
    out
}

/// Code span content: whitespace runs that contain a newline or more than
/// one space become a single space; the result is trimmed.
pub fn normalize_inline_code(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_space = false;
    for c in s.chars() {
        if c == ' ' || c == '\n' {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out.trim_matches(|c: char| c.is_ascii_whitespace()).to_string()
}

/// Length in bytes of the character starting at `pos`, or 1 if `pos` is not
/// on a character boundary.
pub fn char_len_at(s: &str, pos: usize) -> usize {
    s.get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}

/// Last character before byte offset `pos`.
pub fn char_before(s: &str, pos: usize) -> Option<char> {
    s.get(..pos).and_then(|head| head.chars().next_back())
}

/// Character starting at byte offset `pos`.
pub fn char_at(s: &str, pos: usize) -> Option<char> {
    s.get(pos..).and_then(|tail| tail.chars().next())
}
