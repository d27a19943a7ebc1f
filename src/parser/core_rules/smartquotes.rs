//! Straight quotes to typographic quotes.
//!
//! Quotes are paired within one inline children list using the emphasis
//! flanking rules. A quote can only close an opener found at its own
//! nesting level; openers at deeper levels are dropped once the scan leaves
//! that level.

use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::token::{Token, TokenKind};
use crate::utils::is_punct;

use super::inline_children;

const APOSTROPHE: char = '’';

/// An opening quote waiting for its closer.
struct OpenQuote {
    token: usize,
    pos: usize,
    single: bool,
    level: usize,
}

fn replace_quotes(children: &mut [Token], quotes: [char; 4]) {
    let mut stack: Vec<OpenQuote> = Vec::new();
    let mut texts: HashMap<usize, Vec<char>> = HashMap::new();
    let mut changed: HashSet<usize> = HashSet::new();

    for i in 0..children.len() {
        let this_level = children[i].level;
        while stack.last().is_some_and(|q| q.level > this_level) {
            stack.pop();
        }

        let TokenKind::Text { content } = &children[i].kind else {
            continue;
        };
        if !content.contains(['"', '\'']) {
            continue;
        }

        let mut text: Vec<char> = content.chars().collect();
        let max = text.len();
        let mut pos = 0;

        'scan: while pos < max {
            let Some(index) = text[pos..]
                .iter()
                .position(|&c| c == '"' || c == '\'')
                .map(|k| k + pos)
            else {
                break;
            };

            pos = index + 1;
            let single = text[index] == '\'';
            let last_char = index.checked_sub(1).map(|k| text[k]);
            let next_char = text.get(pos).copied();

            let last_space_or_start = last_char.is_none_or(char::is_whitespace);
            let next_space_or_end = next_char.is_none_or(char::is_whitespace);
            let last_punct = !last_space_or_start && last_char.is_some_and(is_punct);
            let next_punct = !next_space_or_end && next_char.is_some_and(is_punct);

            let mut can_open = !next_space_or_end && (!next_punct || last_space_or_start || last_punct);
            let mut can_close = !last_space_or_start && (!last_punct || next_space_or_end || next_punct);

            // Inch marks: `5""` neither opens nor closes.
            if !single && next_char == Some('"') && last_char.is_some_and(|c| c.is_ascii_digit()) {
                can_open = false;
                can_close = false;
            }

            if can_open && can_close {
                can_open = false;
                can_close = next_punct;
            }

            if !can_open && !can_close {
                if single {
                    text[index] = APOSTROPHE;
                    changed.insert(i);
                }
                continue;
            }

            if can_close {
                for j in (0..stack.len()).rev() {
                    let item = &stack[j];
                    if item.level < this_level {
                        break;
                    }
                    if item.single != single || item.level != this_level {
                        continue;
                    }

                    let (open, close) = if single {
                        (quotes[2], quotes[3])
                    } else {
                        (quotes[0], quotes[1])
                    };
                    text[index] = close;
                    if item.token == i {
                        text[item.pos] = open;
                    } else if let Some(opener_text) = texts.get_mut(&item.token) {
                        opener_text[item.pos] = open;
                        changed.insert(item.token);
                    }
                    changed.insert(i);
                    stack.truncate(j);
                    continue 'scan;
                }
            }

            if can_open {
                stack.push(OpenQuote {
                    token: i,
                    pos: index,
                    single,
                    level: this_level,
                });
            } else if can_close && single {
                text[index] = APOSTROPHE;
                changed.insert(i);
            }
        }

        texts.insert(i, text);
    }

    for i in changed {
        if let (Some(text), TokenKind::Text { content }) = (texts.remove(&i), &mut children[i].kind) {
            *content = text.into_iter().collect();
        }
    }
}

pub(super) fn smartquotes(tokens: &mut [Token], config: &Config) {
    if !config.typographer {
        return;
    }
    for children in inline_children(tokens).rev() {
        replace_quotes(children, config.quotes);
    }
}
