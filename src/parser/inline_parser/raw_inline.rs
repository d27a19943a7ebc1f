//! Raw inline HTML, only when the `html` option is on.

use crate::parser::recognizers::match_html;
use crate::token::TokenKind;

use super::InlineState;

fn is_tag_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'!' | b'?' | b'/')
}

pub(crate) fn html_inline(state: &mut InlineState<'_>, silent: bool) -> bool {
    if !state.config.html {
        return false;
    }

    let pos = state.pos;
    if state.byte(pos) != b'<' || pos + 2 > state.pos_max || !is_tag_start(state.byte(pos + 1)) {
        return false;
    }

    let src = state.src;
    let Some(matched) = match_html(&src[pos..state.pos_max]) else {
        return false;
    };

    if !silent {
        state.push(TokenKind::HtmlInline {
            content: matched.to_string(),
        });
    }
    state.pos += matched.len();
    true
}
