//! Typographic replacements in text: `(c)` ©, `+-` ±, `...` …, dashes and
//! collapsed runs of `?!` and `,`.

use crate::config::Config;
use crate::token::{Token, TokenKind};

use super::inline_children;

fn is_trigger(b: u8) -> bool {
    matches!(b, b'(' | b'!' | b'+' | b',' | b'-' | b'.' | b'?')
}

fn is_excl_quest(b: u8) -> bool {
    b == b'?' || b == b'!'
}

/// Length of the run of `b` starting at `from`.
fn run_len(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[from..].iter().take_while(|&&c| pred(c)).count()
}

/// Replacement for the sequence at `i`, with the number of bytes it covers.
fn replacement_at(s: &str, i: usize) -> Option<(&str, usize)> {
    let bytes = s.as_bytes();
    let at = |k: usize| bytes.get(i + k).copied().unwrap_or(0);

    match bytes[i] {
        b'(' => match at(1).to_ascii_lowercase() {
            b'c' if at(2) == b')' => Some(("©", 3)),
            b'r' if at(2) == b')' => Some(("®", 3)),
            b'p' if at(2) == b')' => Some(("§", 3)),
            b't' if at(2).eq_ignore_ascii_case(&b'm') && at(3) == b')' => Some(("™", 4)),
            _ => None,
        },
        b'+' if at(1) == b'-' => Some(("±", 2)),
        b'.' if at(1) == b'.' => {
            let len = run_len(bytes, i, |c| c == b'.');
            let after_excl_quest = i > 0 && is_excl_quest(bytes[i - 1]);
            Some((if after_excl_quest { ".." } else { "…" }, len))
        }
        b'?' | b'!' if is_excl_quest(at(1)) && is_excl_quest(at(2)) && is_excl_quest(at(3)) => {
            let len = run_len(bytes, i, is_excl_quest);
            Some((&s[i..i + 3], len))
        }
        b',' if at(1) == b',' => Some((",", run_len(bytes, i, |c| c == b','))),
        b'-' if at(1) == b'-' => match run_len(bytes, i, |c| c == b'-') {
            2 => Some(("–", 2)),
            3 => Some(("—", 3)),
            len => Some((&s[i..i + len], len)),
        },
        _ => None,
    }
}

pub(crate) fn perform_replacements(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if is_trigger(bytes[i])
            && let Some((replacement, len)) = replacement_at(s, i)
        {
            out.push_str(&s[copied..i]);
            out.push_str(replacement);
            i += len;
            copied = i;
            continue;
        }
        i += 1;
    }
    out.push_str(&s[copied..]);
    out
}

pub(super) fn replacements(tokens: &mut [Token], config: &Config) {
    if !config.typographer {
        return;
    }
    for children in inline_children(tokens) {
        for token in children.iter_mut() {
            if let TokenKind::Text { content } = &mut token.kind {
                *content = perform_replacements(content);
            }
        }
    }
}
