//! HTML rendering of a token stream.

use html_escape::encode_double_quoted_attribute;

use crate::token::{Align, Token, TokenKind};
use crate::utils::unescape_all;

/// Output options for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Close void elements as `<br />`.
    pub xhtml: bool,
    /// Render soft line breaks as `<br>`.
    pub breaks: bool,
    /// Prefix of the class given to fenced code blocks with an info string.
    pub lang_prefix: String,
    /// Add `rel="nofollow"` to links.
    pub nofollow: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            xhtml: false,
            breaks: false,
            lang_prefix: "language-".to_string(),
            nofollow: false,
        }
    }
}

fn escape(s: &str) -> std::borrow::Cow<'_, str> {
    encode_double_quoted_attribute(s)
}

fn is_tight_paragraph(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::ParagraphOpen { tight: true } | TokenKind::ParagraphClose { tight: true }
    )
}

/// Whether `token` starts a new block: an opening block tag or a leaf block.
fn starts_block(token: &Token) -> bool {
    use TokenKind::*;
    match &token.kind {
        ParagraphOpen { tight } => !tight,
        BlockquoteOpen | BulletListOpen | OrderedListOpen { .. } | ListItemOpen
        | HeadingOpen { .. } | TableOpen | CodeBlock { .. } | Fence { .. } | Hr
        | HtmlBlock { .. } => true,
        _ => false,
    }
}

fn align_style(align: Align) -> &'static str {
    match align {
        Align::None => "",
        Align::Left => " style=\"text-align:left\"",
        Align::Center => " style=\"text-align:center\"",
        Align::Right => " style=\"text-align:right\"",
    }
}

struct HtmlWriter<'a> {
    out: String,
    options: &'a RenderOptions,
}

impl<'a> HtmlWriter<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    fn void_end(&self) -> &'static str {
        if self.options.xhtml { " />" } else { ">" }
    }

    fn line_break(&mut self) {
        let end = self.void_end();
        self.out.push_str("<br");
        self.out.push_str(end);
        self.out.push('\n');
    }

    fn blocks(&mut self, tokens: &[Token]) {
        for (i, token) in tokens.iter().enumerate() {
            if i > 0
                && starts_block(token)
                && matches!(tokens[i - 1].kind, TokenKind::ParagraphClose { tight: true })
            {
                self.out.push('\n');
            }
            self.block(token, tokens.get(i + 1));
        }
    }

    fn block(&mut self, token: &Token, next: Option<&Token>) {
        use TokenKind::*;
        match &token.kind {
            ParagraphOpen { tight } => {
                if !tight {
                    self.out.push_str("<p>");
                }
            }
            ParagraphClose { tight } => {
                if !tight {
                    self.out.push_str("</p>\n");
                }
            }
            Inline { children, .. } => self.inline(children),
            BlockquoteOpen => self.out.push_str("<blockquote>\n"),
            BlockquoteClose => self.out.push_str("</blockquote>\n"),
            BulletListOpen => self.out.push_str("<ul>\n"),
            BulletListClose => self.out.push_str("</ul>\n"),
            OrderedListOpen { order } => {
                if *order == 1 {
                    self.out.push_str("<ol>\n");
                } else {
                    self.out.push_str(&format!("<ol start=\"{order}\">\n"));
                }
            }
            OrderedListClose => self.out.push_str("</ol>\n"),
            ListItemOpen => {
                self.out.push_str("<li>");
                if next.is_some_and(|t| starts_block(t) && !is_tight_paragraph(t)) {
                    self.out.push('\n');
                }
            }
            ListItemClose => self.out.push_str("</li>\n"),
            HeadingOpen { h_level } => self.out.push_str(&format!("<h{h_level}>")),
            HeadingClose { h_level } => self.out.push_str(&format!("</h{h_level}>\n")),
            Hr => {
                let end = self.void_end();
                self.out.push_str("<hr");
                self.out.push_str(end);
                self.out.push('\n');
            }
            CodeBlock { content } => {
                self.out.push_str("<pre><code>");
                self.out.push_str(&escape(content));
                self.out.push_str("</code></pre>\n");
            }
            Fence { params, content } => self.fence(params, content),
            HtmlBlock { content } => self.out.push_str(content),
            TableOpen => self.out.push_str("<table>\n"),
            TableClose => self.out.push_str("</table>\n"),
            TheadOpen => self.out.push_str("<thead>\n"),
            TheadClose => self.out.push_str("</thead>\n"),
            TbodyOpen => self.out.push_str("<tbody>\n"),
            TbodyClose => self.out.push_str("</tbody>\n"),
            TrOpen => self.out.push_str("<tr>\n"),
            TrClose => self.out.push_str("</tr>\n"),
            ThOpen { align } => self.out.push_str(&format!("<th{}>", align_style(*align))),
            ThClose => self.out.push_str("</th>\n"),
            TdOpen { align } => self.out.push_str(&format!("<td{}>", align_style(*align))),
            TdClose => self.out.push_str("</td>\n"),
            _ => self.inline(std::slice::from_ref(token)),
        }
    }

    fn fence(&mut self, params: &str, content: &str) {
        let info = unescape_all(params);
        let lang = info.split_whitespace().next().unwrap_or("");
        if lang.is_empty() {
            self.out.push_str("<pre><code>");
        } else {
            self.out.push_str(&format!(
                "<pre><code class=\"{}{}\">",
                escape(&self.options.lang_prefix),
                escape(lang)
            ));
        }
        self.out.push_str(&escape(content));
        self.out.push_str("</code></pre>\n");
    }

    fn inline(&mut self, tokens: &[Token]) {
        use TokenKind::*;
        for token in tokens {
            match &token.kind {
                Text { content } => self.out.push_str(&escape(content)),
                Softbreak => {
                    if self.options.breaks {
                        self.line_break();
                    } else {
                        self.out.push('\n');
                    }
                }
                Hardbreak => self.line_break(),
                CodeInline { content } => {
                    self.out.push_str("<code>");
                    self.out.push_str(&escape(content));
                    self.out.push_str("</code>");
                }
                EmphasisOpen => self.out.push_str("<em>"),
                EmphasisClose => self.out.push_str("</em>"),
                StrongOpen => self.out.push_str("<strong>"),
                StrongClose => self.out.push_str("</strong>"),
                StrikethroughOpen => self.out.push_str("<s>"),
                StrikethroughClose => self.out.push_str("</s>"),
                LinkOpen { href, title } => {
                    self.out.push_str(&format!("<a href=\"{}\"", escape(href)));
                    if !title.is_empty() {
                        self.out.push_str(&format!(" title=\"{}\"", escape(title)));
                    }
                    if self.options.nofollow {
                        self.out.push_str(" rel=\"nofollow\"");
                    }
                    self.out.push('>');
                }
                LinkClose => self.out.push_str("</a>"),
                Image {
                    src,
                    title,
                    children,
                } => {
                    let mut alt = String::new();
                    plain_text(children, &mut alt);
                    self.out.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\"",
                        escape(src),
                        escape(&alt)
                    ));
                    if !title.is_empty() {
                        self.out.push_str(&format!(" title=\"{}\"", escape(title)));
                    }
                    let end = self.void_end();
                    self.out.push_str(end);
                }
                HtmlInline { content } => self.out.push_str(content),
                _ => log::trace!("skipping block token {} in inline context", token.kind.name()),
            }
        }
    }
}

/// Flatten inline tokens to their text, for image alt attributes.
fn plain_text(tokens: &[Token], out: &mut String) {
    for token in tokens {
        match &token.kind {
            TokenKind::Text { content } | TokenKind::CodeInline { content } => out.push_str(content),
            TokenKind::Softbreak | TokenKind::Hardbreak => out.push('\n'),
            TokenKind::Image { children, .. } => plain_text(children, out),
            _ => {}
        }
    }
}

/// Render a token stream as HTML.
pub fn render(tokens: &[Token], options: &RenderOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    writer.blocks(tokens);
    writer.out
}
