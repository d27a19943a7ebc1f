//! Token stream produced by the parser.
//!
//! The stream is flat: container constructs are expressed as matching
//! opening/closing tokens, and every token records its nesting `level`.
//! Inline content lives in the `children` of [`TokenKind::Inline`] (and of
//! [`TokenKind::Image`] for alt text), each children list being a balanced
//! stream of its own that starts at level 0.

use serde::Serialize;

/// Column alignment of a table cell, taken from the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    None,
    Left,
    Center,
    Right,
}

/// Whether a token opens a nested region, closes one, or stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    Opening,
    Closing,
    SelfClosing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenKind {
    // Block level
    BlockquoteOpen,
    BlockquoteClose,
    BulletListOpen,
    BulletListClose,
    OrderedListOpen { order: u64 },
    OrderedListClose,
    ListItemOpen,
    ListItemClose,
    CodeBlock { content: String },
    Fence { params: String, content: String },
    HeadingOpen { h_level: u8 },
    HeadingClose { h_level: u8 },
    Hr,
    HtmlBlock { content: String },
    /// A raw inline span and, once inline parsing ran, its tokens.
    Inline { content: String, children: Vec<Token> },
    ParagraphOpen { tight: bool },
    ParagraphClose { tight: bool },
    TableOpen,
    TableClose,
    TheadOpen,
    TheadClose,
    TbodyOpen,
    TbodyClose,
    TrOpen,
    TrClose,
    ThOpen { align: Align },
    ThClose,
    TdOpen { align: Align },
    TdClose,

    // Inline level
    Text { content: String },
    Softbreak,
    Hardbreak,
    CodeInline { content: String },
    EmphasisOpen,
    EmphasisClose,
    StrongOpen,
    StrongClose,
    StrikethroughOpen,
    StrikethroughClose,
    LinkOpen { href: String, title: String },
    LinkClose,
    Image { src: String, title: String, children: Vec<Token> },
    HtmlInline { content: String },
}

impl TokenKind {
    pub fn nesting(&self) -> Nesting {
        use TokenKind::*;
        match self {
            BlockquoteOpen | BulletListOpen | OrderedListOpen { .. } | ListItemOpen
            | HeadingOpen { .. } | ParagraphOpen { .. } | TableOpen | TheadOpen | TbodyOpen
            | TrOpen | ThOpen { .. } | TdOpen { .. } | EmphasisOpen | StrongOpen
            | StrikethroughOpen | LinkOpen { .. } => Nesting::Opening,
            BlockquoteClose | BulletListClose | OrderedListClose | ListItemClose
            | HeadingClose { .. } | ParagraphClose { .. } | TableClose | TheadClose
            | TbodyClose | TrClose | ThClose | TdClose | EmphasisClose | StrongClose
            | StrikethroughClose | LinkClose => Nesting::Closing,
            _ => Nesting::SelfClosing,
        }
    }

    /// Returns true if `self` is the closing counterpart of `opener`.
    pub fn closes(&self, opener: &TokenKind) -> bool {
        use TokenKind::*;
        match (opener, self) {
            (HeadingOpen { h_level: a }, HeadingClose { h_level: b }) => a == b,
            (BlockquoteOpen, BlockquoteClose)
            | (BulletListOpen, BulletListClose)
            | (OrderedListOpen { .. }, OrderedListClose)
            | (ListItemOpen, ListItemClose)
            | (ParagraphOpen { .. }, ParagraphClose { .. })
            | (TableOpen, TableClose)
            | (TheadOpen, TheadClose)
            | (TbodyOpen, TbodyClose)
            | (TrOpen, TrClose)
            | (ThOpen { .. }, ThClose)
            | (TdOpen { .. }, TdClose)
            | (EmphasisOpen, EmphasisClose)
            | (StrongOpen, StrongClose)
            | (StrikethroughOpen, StrikethroughClose)
            | (LinkOpen { .. }, LinkClose) => true,
            _ => false,
        }
    }

    /// Short snake_case name, as used in the serialized form.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            BlockquoteOpen => "blockquote_open",
            BlockquoteClose => "blockquote_close",
            BulletListOpen => "bullet_list_open",
            BulletListClose => "bullet_list_close",
            OrderedListOpen { .. } => "ordered_list_open",
            OrderedListClose => "ordered_list_close",
            ListItemOpen => "list_item_open",
            ListItemClose => "list_item_close",
            CodeBlock { .. } => "code_block",
            Fence { .. } => "fence",
            HeadingOpen { .. } => "heading_open",
            HeadingClose { .. } => "heading_close",
            Hr => "hr",
            HtmlBlock { .. } => "html_block",
            Inline { .. } => "inline",
            ParagraphOpen { .. } => "paragraph_open",
            ParagraphClose { .. } => "paragraph_close",
            TableOpen => "table_open",
            TableClose => "table_close",
            TheadOpen => "thead_open",
            TheadClose => "thead_close",
            TbodyOpen => "tbody_open",
            TbodyClose => "tbody_close",
            TrOpen => "tr_open",
            TrClose => "tr_close",
            ThOpen { .. } => "th_open",
            ThClose => "th_close",
            TdOpen { .. } => "td_open",
            TdClose => "td_close",
            Text { .. } => "text",
            Softbreak => "softbreak",
            Hardbreak => "hardbreak",
            CodeInline { .. } => "code_inline",
            EmphasisOpen => "em_open",
            EmphasisClose => "em_close",
            StrongOpen => "strong_open",
            StrongClose => "strong_close",
            StrikethroughOpen => "s_open",
            StrikethroughClose => "s_close",
            LinkOpen { .. } => "link_open",
            LinkClose => "link_close",
            Image { .. } => "image",
            HtmlInline { .. } => "html_inline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub level: usize,
    /// Source line range `[start, end)` for block tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<[usize; 2]>,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            level: 0,
            map: None,
        }
    }

    pub fn with_map(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            level: 0,
            map: Some([start, end]),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(TokenKind::Text {
            content: content.into(),
        })
    }

    pub fn nesting(&self) -> Nesting {
        self.kind.nesting()
    }

    /// Inline children of an `Inline` or `Image` token.
    pub fn children(&self) -> Option<&[Token]> {
        match &self.kind {
            TokenKind::Inline { children, .. } | TokenKind::Image { children, .. } => {
                Some(children)
            }
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Token>> {
        match &mut self.kind {
            TokenKind::Inline { children, .. } | TokenKind::Image { children, .. } => {
                Some(children)
            }
            _ => None,
        }
    }
}

/// Checks that every opening token has exactly one matching closing token at
/// the same level, and that levels follow the open/close structure. Children
/// lists are checked recursively.
pub fn is_balanced(tokens: &[Token]) -> bool {
    let mut stack: Vec<&Token> = Vec::new();
    for token in tokens {
        match token.nesting() {
            Nesting::Opening => {
                if token.level != stack.len() {
                    return false;
                }
                stack.push(token);
            }
            Nesting::Closing => {
                let Some(opener) = stack.pop() else {
                    return false;
                };
                if opener.level != token.level || !token.kind.closes(&opener.kind) {
                    return false;
                }
            }
            Nesting::SelfClosing => {
                if token.level != stack.len() {
                    return false;
                }
            }
        }
        if let Some(children) = token.children()
            && !is_balanced(children)
        {
            return false;
        }
    }
    stack.is_empty()
}
