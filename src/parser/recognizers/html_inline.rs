//! Raw inline HTML recognizer: open tags with attributes, closing tags,
//! comments, processing instructions, declarations and CDATA sections.

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    OpenTagName,
    ClosingSlash,
    Bang,
    Processing,
    AfterTagName,
    SelfClosing,
    AttrName,
    AfterAttrName,
    BeforeAttrValue,
    DoubleQuoted,
    SingleQuoted,
    Unquoted,
    AfterQuotedValue,
    ClosingTagName,
    AfterClosingTagName,
    ProcessingQuestion,
    CommentDash,
    DeclarationName,
    CdataBracket,
    Comment,
    CommentDash1,
    CommentDash2,
    Declaration,
    Cdata,
    CdataBracket1,
    CdataBracket2,
}

fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn is_attr_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b':' || b == b'_'
}

fn is_attr_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'.' | b'_' | b'-')
}

/// Bytes not allowed in an unquoted attribute value.
fn is_unquoted_stop(b: u8) -> bool {
    b <= 0x20 || matches!(b, b'"' | b'\'' | b'=' | b'<' | b'>' | b'`')
}

/// Match an inline HTML construct at the start of `s`, returning the full
/// matched text including the angle brackets.
pub fn match_html(s: &str) -> Option<&str> {
    use State::*;

    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'<' {
        return None;
    }

    let mut state = Start;
    let mut i = 1;
    while i < bytes.len() {
        let b = bytes[i];
        i += 1;
        let matched = s.get(..i);

        state = match state {
            Start => match b {
                _ if b.is_ascii_alphabetic() => OpenTagName,
                b'/' => ClosingSlash,
                b'!' => Bang,
                b'?' => Processing,
                _ => return None,
            },
            OpenTagName => match b {
                _ if is_tag_name_byte(b) => OpenTagName,
                _ if is_ws(b) => AfterTagName,
                b'/' => SelfClosing,
                b'>' => return matched,
                _ => return None,
            },
            ClosingSlash if b.is_ascii_alphabetic() => ClosingTagName,
            ClosingSlash => return None,
            Bang => match b {
                b'-' => CommentDash,
                b'[' => CdataBracket,
                _ if b.is_ascii_uppercase() => DeclarationName,
                _ => return None,
            },
            Processing if b == b'?' => ProcessingQuestion,
            Processing => Processing,
            AfterTagName => match b {
                _ if is_ws(b) => AfterTagName,
                b'/' => SelfClosing,
                b'>' => return matched,
                _ if is_attr_name_start(b) => AttrName,
                _ => return None,
            },
            SelfClosing if b == b'>' => return matched,
            SelfClosing => return None,
            AttrName => match b {
                _ if is_attr_name_byte(b) => AttrName,
                b'=' => BeforeAttrValue,
                _ if is_ws(b) => AfterAttrName,
                b'/' => SelfClosing,
                b'>' => return matched,
                _ => return None,
            },
            AfterAttrName => match b {
                _ if is_ws(b) => AfterAttrName,
                b'=' => BeforeAttrValue,
                b'>' => return matched,
                _ if is_attr_name_start(b) => AttrName,
                _ => return None,
            },
            BeforeAttrValue => match b {
                _ if is_ws(b) => BeforeAttrValue,
                b'"' => DoubleQuoted,
                b'\'' => SingleQuoted,
                _ if is_unquoted_stop(b) => return None,
                _ => Unquoted,
            },
            DoubleQuoted if b == b'"' => AfterQuotedValue,
            DoubleQuoted => DoubleQuoted,
            SingleQuoted if b == b'\'' => AfterQuotedValue,
            SingleQuoted => SingleQuoted,
            Unquoted => match b {
                _ if is_ws(b) => AfterTagName,
                b'/' => SelfClosing,
                b'>' => return matched,
                _ if is_unquoted_stop(b) => return None,
                _ => Unquoted,
            },
            AfterQuotedValue => match b {
                _ if is_ws(b) => AfterTagName,
                b'/' => SelfClosing,
                b'>' => return matched,
                _ => return None,
            },
            ClosingTagName => match b {
                _ if is_tag_name_byte(b) => ClosingTagName,
                _ if is_ws(b) => AfterClosingTagName,
                b'>' => return matched,
                _ => return None,
            },
            AfterClosingTagName => match b {
                _ if is_ws(b) => AfterClosingTagName,
                b'>' => return matched,
                _ => return None,
            },
            ProcessingQuestion => match b {
                b'>' => return matched,
                b'?' => ProcessingQuestion,
                _ => Processing,
            },
            CommentDash if b == b'-' => Comment,
            CommentDash => return None,
            DeclarationName => match b {
                _ if b.is_ascii_uppercase() => DeclarationName,
                _ if is_ws(b) => Declaration,
                _ => return None,
            },
            CdataBracket => {
                if !s[i - 1..].starts_with("CDATA[") {
                    return None;
                }
                i += 5;
                Cdata
            }
            // `<!-->` and `<!--->` are not comments.
            Comment => match b {
                b'-' => CommentDash1,
                b'>' => return None,
                _ => Comment,
            },
            CommentDash1 => match b {
                b'-' => CommentDash2,
                b'>' => return None,
                _ => Comment,
            },
            // `--` may only appear as part of the closing `-->`.
            CommentDash2 if b == b'>' => return matched,
            CommentDash2 => return None,
            Declaration if b == b'>' => return matched,
            Declaration => Declaration,
            Cdata if b == b']' => CdataBracket1,
            Cdata => Cdata,
            CdataBracket1 if b == b']' => CdataBracket2,
            CdataBracket1 => Cdata,
            CdataBracket2 if b == b'>' => return matched,
            CdataBracket2 => Cdata,
        };
    }
    None
}
