//! Streaming line and word counter
//!
//! The reader is consumed once, front to back, holding a single line in
//! memory at a time. A line ends at `\n`, at `\r`, or at `\r\n`. A trailing
//! line without a terminator still counts.
//!
//! Bytes are decoded as UTF-8 per line with invalid sequences replaced by
//! U+FFFD, so malformed input never aborts a count.
//!
//! Word boundaries follow a narrow whitespace definition: tokens are split on
//! ` `, `\t`, `\n`, `\x0B`, `\x0C` and `\r` only, and edges are trimmed of
//! control characters and spaces (`<= U+0020`). A no-break space therefore
//! joins the token it sits in.
//!
//! CSV counting splits on every comma with no quote handling. Quoted cells
//! that contain commas or line breaks are counted as several cells.

use std::borrow::Cow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Totals for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub lines: u64,
    pub words: u64,
}

/// Word splitting rule, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// Cells with text, split on commas
    Csv,
    /// Tokens separated by whitespace runs
    Text,
}

impl CountMode {
    pub fn for_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("csv") {
            CountMode::Csv
        } else {
            CountMode::Text
        }
    }

    fn words_in(self, line: &str) -> u64 {
        match self {
            CountMode::Csv => line
                .split(',')
                .filter(|cell| has_text(trim_controls(cell)))
                .count() as u64,
            CountMode::Text => {
                let line = trim_controls(line);
                if !has_text(line) {
                    return 0;
                }
                line.split(is_separator)
                    .filter(|token| !token.is_empty())
                    .count() as u64
            },
        }
    }
}

/// Token separators: ASCII space, tab, and the line/form control characters
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn trim_controls(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

/// Whitespace for the purpose of deciding whether a cell or line is blank
///
/// Unicode space separators count, except the non-breaking ones
/// (U+00A0, U+2007, U+202F) and NEL; the ASCII information separators
/// U+001C..U+001F count as well.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{1c}'..='\u{1f}' => true,
        '\u{85}' | '\u{a0}' | '\u{2007}' | '\u{202f}' => false,
        c => c.is_whitespace(),
    }
}

fn has_text(s: &str) -> bool {
    s.chars().any(|c| !is_blank_char(c))
}

/// Count lines and words in `reader`
///
/// Deterministic: identical bytes and extension always give identical counts.
/// Any read error aborts the count and is returned as is.
pub async fn count<R>(reader: &mut R, extension: &str) -> std::io::Result<Counts>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mode = CountMode::for_extension(extension);
    let mut counts = Counts::default();
    let mut line = Vec::with_capacity(8 * 1024);
    // A `\r` ended the previous line; a `\n` right after it belongs to it
    let mut after_cr = false;

    loop {
        let (used, ended) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }

            let skip = usize::from(after_cr && available[0] == b'\n');
            after_cr = false;

            let rest = &available[skip..];
            match rest.iter().position(|b| matches!(b, b'\n' | b'\r')) {
                Some(pos) => {
                    line.extend_from_slice(&rest[..pos]);
                    after_cr = rest[pos] == b'\r';
                    (skip + pos + 1, true)
                },
                None => {
                    line.extend_from_slice(rest);
                    (available.len(), false)
                },
            }
        };
        reader.consume(used);

        if ended {
            counts.lines += 1;
            counts.words += mode.words_in(&decode_line(&line));
            line.clear();
        }
    }

    if !line.is_empty() {
        counts.lines += 1;
        counts.words += mode.words_in(&decode_line(&line));
    }

    Ok(counts)
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(raw)
}
