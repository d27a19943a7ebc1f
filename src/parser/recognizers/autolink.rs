//! `<scheme:...>` and `<user@host>` recognizers.

const MAX_SCHEME_LEN: usize = 23;

fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

fn is_link_byte(b: u8) -> bool {
    b >= 0x21 && b != b'<' && b != b'>'
}

fn is_email_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.' | b'_')
}

/// Match a URI autolink at the start of `s`. Returns the text between the
/// angle brackets.
pub fn match_autolink(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() < 6 || bytes[0] != b'<' || !bytes[1].is_ascii_alphabetic() {
        return None;
    }

    let mut i = 2;
    while i < bytes.len() && is_scheme_byte(bytes[i]) {
        i += 1;
        if i - 1 > MAX_SCHEME_LEN {
            return None;
        }
    }
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    i += 1;

    let body_start = i;
    while i < bytes.len() && is_link_byte(bytes[i]) {
        i += 1;
    }
    if i == body_start || bytes.get(i) != Some(&b'>') {
        return None;
    }
    s.get(1..i)
}

/// Match an email autolink at the start of `s`. Returns the address without
/// the angle brackets.
pub fn match_email(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.len() < 8 || bytes[0] != b'<' {
        return None;
    }

    let mut i = 1;
    let local_start = i;
    while i < bytes.len() && is_email_byte(bytes[i]) {
        i += 1;
    }
    if i == local_start || bytes.get(i) != Some(&b'@') {
        return None;
    }
    i += 1;

    let domain_start = i;
    while i < bytes.len() && is_email_byte(bytes[i]) {
        i += 1;
    }
    if i == domain_start || bytes.get(i) != Some(&b'>') {
        return None;
    }
    s.get(1..i)
}
