//! Position locator.
//!
//! Maps a cursor offset to the enclosing block and to the statement the
//! cursor sits in. The statement is recovered by a character scanner that
//! tracks open parentheses, brackets and strings, so it works on text that
//! does not parse.

use psl_syntax::parser::line_starts_statement;
use psl_syntax::{Block, Document, TextSize};

/// Result of locating a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location<'s> {
    /// Innermost block containing the cursor.
    pub block: Option<&'s Block>,
    /// What surrounds the cursor.
    pub construct: EnclosingConstruct,
}

/// The construct enclosing the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EnclosingConstruct {
    /// Outside every block; carries the text of the line before the cursor.
    TopLevel { prefix: String },
    /// On a block header, right of the keyword.
    BlockHeader,
    /// Inside a `//` comment.
    Comment,
    /// Inside a block body.
    Statement(Statement),
}

/// Kind of an unclosed delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `(`
    Paren,
    /// `[`
    Bracket,
}

/// An unclosed delimiter before the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenDelimiter {
    pub kind: Delimiter,
    /// Byte offset of the delimiter in [`Statement::before`].
    pub offset: usize,
}

/// The statement around the cursor, comments removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    /// Offset of the first non-blank character of the statement.
    pub start: TextSize,
    /// Statement text up to the cursor.
    pub before: String,
    /// Rest of the cursor line.
    pub after: String,
    /// Unclosed delimiters, outermost first.
    pub open: Vec<OpenDelimiter>,
    /// Offset in `before` of the quote opening an unterminated string.
    pub string: Option<usize>,
}

impl Statement {
    /// Text of the statement before delimiter `depth` was opened.
    pub fn text_before_delimiter(&self, depth: usize) -> &str {
        let end = self.open.get(depth).map_or(self.before.len(), |open| open.offset);
        &self.before[..end]
    }

    /// Text between delimiter `depth` and the next open delimiter or the cursor.
    pub fn text_inside_delimiter(&self, depth: usize) -> &str {
        let Some(open) = self.open.get(depth) else {
            return "";
        };
        let end = self
            .open
            .get(depth + 1)
            .map_or(self.before.len(), |next| next.offset);
        &self.before[open.offset + 1..end]
    }

    /// Shape of the open delimiters, outermost first.
    pub fn shape(&self) -> Vec<Delimiter> {
        self.open.iter().map(|open| open.kind).collect()
    }

    /// Returns `true` if non-blank text follows the cursor on its line.
    pub fn has_text_after(&self) -> bool {
        !self.after.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
    InComment,
}

/// Locates `offset` within `document`.
pub(crate) fn locate(document: &Document, offset: TextSize) -> Location<'_> {
    let text = document.text();

    // With an unclosed block followed by another header, both ranges touch
    // the header; the later block wins.
    let block = document
        .blocks()
        .iter()
        .filter(|block| block.range.contains_inclusive(offset))
        .last();

    let Some(block) = block else {
        return Location {
            block: None,
            construct: top_level(text, offset, TextSize::from(0)),
        };
    };

    if offset < block.body.start() {
        let keyword_end = block.range.start() + TextSize::of(block.kind.keyword());
        if offset <= keyword_end {
            return Location {
                block: None,
                construct: top_level(text, offset, block.range.start()),
            };
        }
        return Location {
            block: Some(block),
            construct: EnclosingConstruct::BlockHeader,
        };
    }

    if block.closed && offset > block.body.end() {
        return Location {
            block: None,
            construct: top_level(text, offset, block.range.end()),
        };
    }

    Location {
        block: Some(block),
        construct: scan_statement(text, usize::from(block.body.start()), usize::from(offset)),
    }
}

/// Builds the top-level construct from the line text before the cursor,
/// ignoring anything before `floor`.
fn top_level(text: &str, offset: TextSize, floor: TextSize) -> EnclosingConstruct {
    let cursor = usize::from(offset);
    let line_start = text[..cursor].rfind('\n').map_or(0, |idx| idx + 1);
    let start = line_start.max(usize::from(floor));
    let prefix = &text[start..cursor];
    if prefix.contains("//") {
        return EnclosingConstruct::Comment;
    }
    EnclosingConstruct::TopLevel {
        prefix: prefix.to_string(),
    }
}

/// Scans a block body from its start to the cursor.
fn scan_statement(text: &str, body_start: usize, cursor: usize) -> EnclosingConstruct {
    let body = &text[body_start..cursor];

    let mut state = ScanState::Normal;
    let mut statement_start = body_start;
    let mut before = String::new();
    let mut open: Vec<OpenDelimiter> = Vec::new();
    let mut string = None;

    let mut chars = body.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch == '\n' {
            let next_line = body_start + idx + 1;
            state = ScanState::Normal;
            string = None;
            if open.is_empty() || line_starts_statement(&text[next_line..]) {
                before.clear();
                open.clear();
                statement_start = next_line;
            } else {
                before.push('\n');
            }
            continue;
        }

        match state {
            ScanState::InComment => {}
            ScanState::InString => {
                before.push(ch);
                if ch == '\\' {
                    if let Some((_, escaped)) = chars.next_if(|(_, next)| *next != '\n') {
                        before.push(escaped);
                    }
                } else if ch == '"' {
                    state = ScanState::Normal;
                    string = None;
                }
            }
            ScanState::Normal => match ch {
                '/' if chars.peek().is_some_and(|(_, next)| *next == '/') => {
                    state = ScanState::InComment;
                }
                '"' => {
                    state = ScanState::InString;
                    string = Some(before.len());
                    before.push(ch);
                }
                '(' | '[' => {
                    let kind = if ch == '(' {
                        Delimiter::Paren
                    } else {
                        Delimiter::Bracket
                    };
                    open.push(OpenDelimiter {
                        kind,
                        offset: before.len(),
                    });
                    before.push(ch);
                }
                ')' | ']' => {
                    let kind = if ch == ')' {
                        Delimiter::Paren
                    } else {
                        Delimiter::Bracket
                    };
                    if open.last().is_some_and(|last| last.kind == kind) {
                        open.pop();
                    }
                    before.push(ch);
                }
                _ => before.push(ch),
            },
        }
    }

    if state == ScanState::InComment {
        return EnclosingConstruct::Comment;
    }

    let line_end = text[cursor..].find('\n').map_or(text.len(), |idx| cursor + idx);
    let after = strip_comment(&text[cursor..line_end]).trim_end_matches('\r');

    let source = &text[statement_start..cursor];
    let start = statement_start + (source.len() - source.trim_start().len());

    EnclosingConstruct::Statement(Statement {
        start: TextSize::from(start as u32),
        before,
        after: after.to_string(),
        open,
        string,
    })
}

/// Drops a trailing `//` comment that is not inside a string.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut escaped = false;
    let bytes = line.as_bytes();
    for (idx, &byte) in bytes.iter().enumerate() {
        match byte {
            _ if escaped => escaped = false,
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(idx + 1) == Some(&b'/') => return &line[..idx],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use psl_syntax::Schema;

    fn locate_marked(source: &str) -> (Option<String>, EnclosingConstruct) {
        let cursor = source.find('|').expect("cursor marker");
        let mut cleaned = source.to_string();
        cleaned.remove(cursor);
        let schema = Schema::single_file("file:///test.prisma", cleaned);
        let document = &schema.documents()[0];
        let location = locate(document, TextSize::from(cursor as u32));
        (
            location.block.map(|block| block.name.to_string()),
            location.construct,
        )
    }

    fn statement(source: &str) -> Statement {
        match locate_marked(source).1 {
            EnclosingConstruct::Statement(statement) => statement,
            other => panic!("expected statement, got {other:?}"),
        }
    }

    #[test]
    fn empty_document_is_top_level() {
        let (block, construct) = locate_marked("|");
        assert_eq!(block, None);
        assert_eq!(
            construct,
            EnclosingConstruct::TopLevel {
                prefix: String::new()
            }
        );
    }

    #[test]
    fn after_closed_block_is_top_level() {
        let (block, construct) = locate_marked("model A {\n  id Int\n}\nmo|");
        assert_eq!(block, None);
        assert_eq!(
            construct,
            EnclosingConstruct::TopLevel {
                prefix: "mo".to_string()
            }
        );
    }

    #[test]
    fn header_keyword_and_name() {
        assert!(matches!(
            locate_marked("mod|el A {\n}\n").1,
            EnclosingConstruct::TopLevel { .. }
        ));
        assert_eq!(
            locate_marked("model A| {\n}\n").1,
            EnclosingConstruct::BlockHeader
        );
    }

    #[test]
    fn comment_inside_block() {
        assert_eq!(
            locate_marked("model A {\n  // id |\n}\n").1,
            EnclosingConstruct::Comment
        );
    }

    #[test]
    fn statement_tracks_open_delimiters() {
        let statement = statement("model A {\n  a Int\n  @@index([a, |])\n}\n");
        assert_eq!(statement.shape(), vec![Delimiter::Paren, Delimiter::Bracket]);
        assert_eq!(statement.text_inside_delimiter(1), "a, ");
        assert_eq!(statement.text_before_delimiter(0), "  @@index");
        assert_eq!(statement.after, "])");
    }

    #[test]
    fn multi_line_argument_list_is_one_statement() {
        let statement = statement("model A {\n  a Int\n  @@index(\n    [a],\n    |\n  )\n}\n");
        assert_eq!(statement.shape(), vec![Delimiter::Paren]);
        assert_eq!(statement.text_inside_delimiter(0), "\n    [a],\n    ");
    }

    #[test]
    fn unclosed_bracket_on_previous_line_does_not_leak() {
        let statement = statement("model A {\n  a Int\n  @@index([a\n  @@|\n}\n");
        assert!(statement.open.is_empty());
        assert_eq!(statement.before.trim(), "@@");
    }

    #[test]
    fn string_state_is_reported() {
        let statement = statement("datasource db {\n  provider = \"|\"\n}\n");
        assert_eq!(statement.string, Some(13));
        assert!(statement.open.is_empty());
    }

    #[test]
    fn closed_string_is_not_open() {
        let statement = statement("model A {\n  a String @map(\"a\")|\n}\n");
        assert_eq!(statement.string, None);
        assert!(statement.open.is_empty());
    }

    #[test]
    fn statement_start_skips_indentation() {
        let source = "model A {\n  name String |\n}\n";
        let statement = statement(source);
        assert_eq!(usize::from(statement.start), source.find("name").unwrap());
    }

    #[test]
    fn strip_comment_ignores_slashes_in_strings() {
        assert_eq!(strip_comment("url = \"a//b\" // c"), "url = \"a//b\" ");
    }
}
