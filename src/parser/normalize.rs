//! Line normalization and indexing.
//!
//! Produces the canonical document text (LF line endings, tabs expanded to
//! spaces, NUL replaced) together with per-line start/end offsets and the
//! indentation width of each line. All later phases index into this text.

const REPLACEMENT: char = '\u{FFFD}';

/// Normalized text plus the line table. The line table always ends with one
/// sentinel entry positioned at the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    pub text: String,
    /// Offset of the first byte of each line.
    pub b_marks: Vec<usize>,
    /// Offset of each line's end, excluding the newline.
    pub e_marks: Vec<usize>,
    /// Leading indentation width of each line.
    pub t_shift: Vec<isize>,
}

impl LineIndex {
    /// Number of real lines, excluding the sentinel.
    pub fn line_count(&self) -> usize {
        self.b_marks.len() - 1
    }
}

/// Decode `src` as UTF-8, replacing every byte of an invalid sequence with
/// U+FFFD.
fn decode_lossy(src: &[u8]) -> impl Iterator<Item = char> + '_ {
    src.utf8_chunks().flat_map(|chunk| {
        chunk
            .valid()
            .chars()
            .chain(std::iter::repeat_n(REPLACEMENT, chunk.invalid().len()))
    })
}

pub fn normalize_and_index(src: &[u8]) -> LineIndex {
    let mut text = String::with_capacity(src.len() + src.len() / 4);
    let mut b_marks = Vec::new();
    let mut e_marks = Vec::new();
    let mut t_shift = Vec::new();

    // Characters seen so far, and the value of that counter at line start.
    let mut i = 0usize;
    let mut line_start = 0usize;
    let mut last_tab_pos = 0usize;
    let mut indent: isize = 0;
    let mut indent_found = false;
    let mut skip_next_lf = false;
    let mut start = 0usize;

    for c in decode_lossy(src) {
        if skip_next_lf {
            skip_next_lf = false;
            if c == '\n' {
                continue;
            }
        }

        match c {
            ' ' => {
                text.push(' ');
                if !indent_found {
                    indent += 1;
                }
            }
            '\r' | '\n' => {
                skip_next_lf = c == '\r';
                b_marks.push(start);
                e_marks.push(text.len());
                t_shift.push(indent);
                indent_found = false;
                indent = 0;

                text.push('\n');
                line_start = i + 1;
                last_tab_pos = 0;
                start = text.len();
            }
            '\t' => {
                let k = (i - line_start - last_tab_pos) % 4;
                for _ in k..4 {
                    text.push(' ');
                }
                last_tab_pos = i - line_start + 1;
                if !indent_found {
                    indent += (4 - k) as isize;
                }
            }
            '\0' => {
                text.push(REPLACEMENT);
                indent_found = true;
            }
            other => {
                text.push(other);
                indent_found = true;
            }
        }

        i += 1;
    }

    if !text.is_empty() && !text.ends_with('\n') {
        b_marks.push(start);
        e_marks.push(text.len());
        t_shift.push(indent);
    }

    b_marks.push(text.len());
    e_marks.push(text.len());
    t_shift.push(0);

    log::trace!("normalized {} bytes into {} lines", text.len(), b_marks.len() - 1);

    LineIndex {
        text,
        b_marks,
        e_marks,
        t_shift,
    }
}

/// Normalized text only.
pub fn normalize(src: &[u8]) -> String {
    normalize_and_index(src).text
}
