//! Tolerant, line-oriented parser.
//!
//! The source is first split into logical lines: a newline ends a statement
//! unless it sits inside parentheses or brackets. An unclosed delimiter never
//! swallows a following `}` line, `@@` line or block header, so a half-typed
//! attribute only affects its own statement.
//!
//! Anything the parser does not understand is skipped. It never fails.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::ast::{
    Argument, Attribute, Block, BlockKind, EnumValue, Expr, Field, FieldArity, FieldType,
    Property,
};
use crate::lexer::{lex_significant, Token, TokenKind};

/// Parses every block of `text`.
#[must_use]
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let tokens = lex_significant(text);
    let lines = split_lines(&tokens);

    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for line in lines {
        if let Some((kind, name, lbrace)) = block_header(line, text) {
            if let Some(open) = current.take() {
                blocks.push(finish_unclosed(open, line[0].range.start()));
            }
            let start = line[0].range.start();
            let mut block = Block {
                kind,
                name,
                range: TextRange::new(start, lbrace.range.end()),
                body: TextRange::empty(lbrace.range.end()),
                closed: false,
                fields: Vec::new(),
                values: Vec::new(),
                properties: Vec::new(),
                attributes: Vec::new(),
            };
            // `model A {}` on a single line
            if let Some(rbrace) = line.get(3).filter(|t| t.kind == TokenKind::RBrace) {
                close(&mut block, rbrace);
                blocks.push(block);
            } else {
                current = Some(block);
            }
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        if line[0].kind == TokenKind::RBrace {
            close(block, &line[0]);
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            continue;
        }

        parse_body_line(block, line, text);
    }

    if let Some(open) = current.take() {
        blocks.push(finish_unclosed(open, TextSize::of(text)));
    }

    blocks
}

fn close(block: &mut Block, rbrace: &Token) {
    block.closed = true;
    block.body = TextRange::new(block.body.start(), rbrace.range.start());
    block.range = TextRange::new(block.range.start(), rbrace.range.end());
}

fn finish_unclosed(mut block: Block, end: TextSize) -> Block {
    let end = end.max(block.body.start());
    block.body = TextRange::new(block.body.start(), end);
    block.range = TextRange::new(block.range.start(), end);
    block
}

/// Recognizes `<keyword> <name> {`.
fn block_header<'t>(line: &'t [Token], text: &str) -> Option<(BlockKind, SmolStr, &'t Token)> {
    match line {
        [keyword, name, lbrace, ..]
            if keyword.kind == TokenKind::Ident
                && name.kind == TokenKind::Ident
                && lbrace.kind == TokenKind::LBrace =>
        {
            let kind = BlockKind::from_keyword(keyword.text(text))?;
            Some((kind, SmolStr::new(name.text(text)), lbrace))
        }
        _ => None,
    }
}

/// Splits the token stream into logical lines, dropping the newlines.
fn split_lines(tokens: &[Token]) -> Vec<&[Token]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            kind if kind.is_opening_delimiter() => depth += 1,
            kind if kind.is_closing_delimiter() => depth = depth.saturating_sub(1),
            TokenKind::Newline => {
                if depth == 0 || starts_statement(&tokens[idx + 1..]) {
                    if start < idx {
                        lines.push(&tokens[start..idx]);
                    }
                    start = idx + 1;
                    depth = 0;
                }
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        lines.push(&tokens[start..]);
    }

    lines
}

/// Whether the line after a newline begins a statement that cannot be the
/// continuation of an argument list.
///
/// Two identifiers in a row never occur inside arguments, so they mark a
/// field declaration or a block header.
fn starts_statement(rest: &[Token]) -> bool {
    let mut line = rest.iter().take_while(|t| t.kind != TokenKind::Newline);
    match (line.next(), line.next()) {
        (Some(first), _) if matches!(first.kind, TokenKind::RBrace | TokenKind::AtAt) => true,
        (Some(first), Some(second)) => {
            first.kind == TokenKind::Ident && second.kind == TokenKind::Ident
        }
        _ => false,
    }
}

/// Text version of the statement-start check, for scanners working on raw
/// lines. Only the first line of `line` is inspected.
#[must_use]
pub fn line_starts_statement(line: &str) -> bool {
    let line = line.split('\n').next().unwrap_or_default();
    starts_statement(&lex_significant(line))
}

fn parse_body_line(block: &mut Block, line: &[Token], text: &str) {
    let mut p = LineParser::new(line, text);

    if p.at(TokenKind::AtAt) {
        if let Some(attribute) = p.attribute() {
            block.attributes.push(attribute);
        }
        return;
    }

    if !p.at(TokenKind::Ident) {
        return;
    }

    let range = p.line_range();
    let name = p.ident();

    match block.kind {
        BlockKind::Datasource | BlockKind::Generator => {
            let value = if p.eat(TokenKind::Eq) {
                Some(p.expr()).filter(|expr| *expr != Expr::Missing)
            } else {
                None
            };
            block.properties.push(Property {
                key: name,
                value,
                range,
            });
        }
        BlockKind::Enum => {
            let attributes = p.trailing_attributes();
            block.values.push(EnumValue {
                name,
                attributes,
                range,
            });
        }
        BlockKind::Model | BlockKind::View | BlockKind::CompositeType => {
            let ty = p.field_type();
            let attributes = p.trailing_attributes();
            block.fields.push(Field {
                name,
                ty,
                attributes,
                range,
            });
        }
    }
}

/// Recursive descent over the tokens of one logical line.
struct LineParser<'a> {
    tokens: &'a [Token],
    text: &'a str,
    pos: usize,
}

impl<'a> LineParser<'a> {
    fn new(tokens: &'a [Token], text: &'a str) -> Self {
        Self {
            tokens,
            text,
            pos: 0,
        }
    }

    fn line_range(&self) -> TextRange {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => TextRange::new(first.range.start(), last.range.end()),
            _ => TextRange::default(),
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.nth_kind(0) == Some(kind)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.current()?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn text_of(&self, token: &Token) -> &'a str {
        token.text(self.text)
    }

    /// End of the last consumed token.
    fn last_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or_else(TextSize::default, |t| t.range.end())
    }

    fn ident(&mut self) -> SmolStr {
        match self.current() {
            Some(token) if token.kind == TokenKind::Ident => {
                self.pos += 1;
                SmolStr::new(self.text_of(token))
            }
            _ => SmolStr::default(),
        }
    }

    /// `a.b.c`; a trailing dot is consumed but not part of the path.
    fn path(&mut self) -> SmolStr {
        let mut path = String::from(self.ident().as_str());
        while self.at(TokenKind::Dot) {
            self.pos += 1;
            if !self.at(TokenKind::Ident) {
                break;
            }
            path.push('.');
            path.push_str(&self.ident());
        }
        SmolStr::new(path)
    }

    fn field_type(&mut self) -> Option<FieldType> {
        let start = self.current()?;
        if start.kind != TokenKind::Ident {
            return None;
        }
        let name = self.ident();
        // Unsupported("...")
        if self.at(TokenKind::LParen) {
            self.arguments();
        }
        let arity = if self.at(TokenKind::LBracket) && self.nth_kind(1) == Some(TokenKind::RBracket)
        {
            self.pos += 2;
            FieldArity::List
        } else if self.eat(TokenKind::Question) {
            FieldArity::Optional
        } else {
            FieldArity::Required
        };
        Some(FieldType {
            name,
            arity,
            range: TextRange::new(start.range.start(), self.last_end()),
        })
    }

    fn trailing_attributes(&mut self) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        while !self.at_end() {
            if self.at(TokenKind::At) || self.at(TokenKind::AtAt) {
                if let Some(attribute) = self.attribute() {
                    attributes.push(attribute);
                }
            } else {
                self.pos += 1;
            }
        }
        attributes
    }

    /// Parses an attribute starting at `@` or `@@`.
    fn attribute(&mut self) -> Option<Attribute> {
        let start = self.bump()?;
        let block_level = start.kind == TokenKind::AtAt;
        let name = self.path();
        let arguments = if self.at(TokenKind::LParen) {
            self.arguments()
        } else {
            Vec::new()
        };
        Some(Attribute {
            name,
            block_level,
            arguments,
            range: TextRange::new(start.range.start(), self.last_end()),
        })
    }

    /// Parses `( ... )`, tolerating a missing closing parenthesis.
    fn arguments(&mut self) -> Vec<Argument> {
        let mut arguments = Vec::new();
        if !self.eat(TokenKind::LParen) {
            return arguments;
        }
        loop {
            match self.nth_kind(0) {
                None => break,
                Some(TokenKind::RParen) => {
                    self.pos += 1;
                    break;
                }
                Some(TokenKind::Comma) => self.pos += 1,
                Some(_) => {
                    let before = self.pos;
                    if let Some(argument) = self.argument() {
                        arguments.push(argument);
                    }
                    if self.pos == before {
                        self.pos += 1;
                    }
                }
            }
        }
        arguments
    }

    fn argument(&mut self) -> Option<Argument> {
        let start = self.current()?.range.start();
        let name = if self.at(TokenKind::Ident) && self.nth_kind(1) == Some(TokenKind::Colon) {
            let name = self.ident();
            self.pos += 1;
            Some(name)
        } else {
            None
        };
        let value = self.expr();
        if name.is_none() && value == Expr::Missing {
            return None;
        }
        Some(Argument {
            name,
            value,
            range: TextRange::new(start, self.last_end().max(start)),
        })
    }

    fn expr(&mut self) -> Expr {
        let Some(token) = self.current() else {
            return Expr::Missing;
        };
        match token.kind {
            TokenKind::String | TokenKind::UnterminatedString => {
                self.pos += 1;
                Expr::String(SmolStr::new(unquote(self.text_of(token))))
            }
            TokenKind::Number => {
                self.pos += 1;
                Expr::Number(SmolStr::new(self.text_of(token)))
            }
            TokenKind::Ident => {
                let name = self.path();
                if self.at(TokenKind::LParen) {
                    let arguments = self.arguments();
                    Expr::Call { name, arguments }
                } else {
                    Expr::Path(name)
                }
            }
            TokenKind::LBracket => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    match self.nth_kind(0) {
                        None => break,
                        Some(TokenKind::RBracket) => {
                            self.pos += 1;
                            break;
                        }
                        Some(TokenKind::Comma) => self.pos += 1,
                        Some(TokenKind::RParen) => break,
                        Some(_) => {
                            let before = self.pos;
                            let item = self.expr();
                            if item != Expr::Missing {
                                items.push(item);
                            }
                            if self.pos == before {
                                self.pos += 1;
                            }
                        }
                    }
                }
                Expr::Array(items)
            }
            _ => Expr::Missing,
        }
    }
}

/// Strips the surrounding quotes of a string token.
fn unquote(raw: &str) -> &str {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    inner.strip_suffix('"').unwrap_or(inner)
}
