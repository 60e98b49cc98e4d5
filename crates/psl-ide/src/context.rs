//! Completion context classification.
//!
//! Turns a [`Location`] into exactly one [`CompletionContext`] by looking at
//! the statement text before the cursor and at the delimiters still open
//! around it.

use psl_syntax::lexer::lex_significant;
use psl_syntax::{Block, BlockKind, EnumValue, Field, Schema, Token, TokenKind};
use smol_str::SmolStr;

use crate::capabilities::attributes::{positional_argument, VALUE_FIRST_ATTRIBUTES};
use crate::locator::{Delimiter, EnclosingConstruct, Location, Statement};

/// The statement a field-level attribute is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLine<'s> {
    /// A field of a model, view or composite type.
    Field(&'s Field),
    /// A value of an enum.
    Value(&'s EnumValue),
}

/// What the user is completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext<'s> {
    /// A top-level block keyword.
    TopLevelBlockType,
    /// A key inside a datasource or generator.
    DatasourceOrGeneratorField {
        /// The datasource or generator.
        block: &'s Block,
    },
    /// The value right of `key =`.
    ConfigValue {
        /// The datasource or generator.
        block: &'s Block,
        /// The property key.
        key: SmolStr,
    },
    /// Inside the quoted value of `key = "`.
    ConfigValueString {
        /// The datasource or generator.
        block: &'s Block,
        /// The property key.
        key: SmolStr,
        /// Text typed after the opening quote.
        partial: SmolStr,
    },
    /// Inside `key = [ ... ]`.
    ConfigValueList {
        /// The datasource or generator.
        block: &'s Block,
        /// The property key.
        key: SmolStr,
        /// Strings already in the list.
        listed: Vec<SmolStr>,
    },
    /// Inside `env("...")`.
    EnvVariable {
        /// The datasource or generator.
        block: &'s Block,
        /// The property key.
        key: SmolStr,
    },
    /// The first word of a line that already has content after the cursor.
    ModelBodyField {
        /// The enclosing block.
        block: &'s Block,
    },
    /// The type of a field.
    FieldTypeName {
        /// The enclosing block.
        block: &'s Block,
        /// Name of the field being declared.
        field: SmolStr,
    },
    /// A field attribute after the type.
    FieldAttribute {
        /// The enclosing block.
        block: &'s Block,
        /// The field or enum value.
        field: FieldLine<'s>,
    },
    /// A native type after `@db.`.
    NativeType {
        /// The enclosing block.
        block: &'s Block,
        /// The annotated field.
        field: &'s Field,
    },
    /// A block attribute on a bare line.
    BlockAttribute {
        /// The enclosing block.
        block: &'s Block,
    },
    /// An argument name inside an attribute.
    AttributeArgumentName {
        /// The enclosing block.
        block: &'s Block,
        /// Attribute name with its `@`/`@@` prefix.
        attribute: SmolStr,
        /// Arguments already bound, by name or by position.
        used: Vec<SmolStr>,
    },
    /// An argument value inside an attribute.
    AttributeArgumentValue {
        /// The enclosing block.
        block: &'s Block,
        /// The field carrying the attribute, for field attributes.
        field: Option<&'s Field>,
        /// Attribute name with its `@`/`@@` prefix.
        attribute: SmolStr,
        /// Argument name, `None` for the leading unnamed value.
        argument: Option<SmolStr>,
    },
    /// Inside a quoted argument value.
    AttributeArgumentValueString {
        /// The enclosing block.
        block: &'s Block,
        /// Attribute name with its `@`/`@@` prefix.
        attribute: SmolStr,
        /// Argument name, `None` for the leading unnamed value.
        argument: Option<SmolStr>,
    },
    /// Inside an array of field names.
    FieldReferenceList {
        /// Block whose fields are listed; `None` when a relation target
        /// does not resolve.
        block: Option<&'s Block>,
        /// Names already in the list before the cursor.
        listed: Vec<SmolStr>,
        /// Complete segments of a dotted composite path.
        path: Vec<SmolStr>,
        /// Identifier typed after the last dot.
        partial: SmolStr,
        /// Whether fields typed with a model or view are offered.
        relations: bool,
    },
    /// An option name inside a per-field call such as `title(|)`.
    PerFieldOptionArgument {
        /// Attribute name with its `@@` prefix.
        attribute: SmolStr,
        /// Type name of the referenced field.
        field_type: Option<SmolStr>,
    },
    /// An option value inside a per-field call such as `title(sort: |)`.
    PerFieldOptionValue {
        /// Attribute name with its `@@` prefix.
        attribute: SmolStr,
        /// Option name.
        argument: SmolStr,
        /// The referenced field.
        field: Option<&'s Field>,
        /// Index method from the attribute's `type:` argument.
        index_type: Option<SmolStr>,
    },
    /// An argument of a generator function nested in `@default(...)`.
    DefaultFunctionArgument {
        /// Function name, e.g. `sequence`.
        function: SmolStr,
        /// Arguments already bound.
        used: Vec<SmolStr>,
    },
}

/// Classifies a located cursor. `None` means nothing can be completed here.
pub(crate) fn classify<'s>(
    schema: &'s Schema,
    location: &Location<'s>,
) -> Option<CompletionContext<'s>> {
    match &location.construct {
        EnclosingConstruct::TopLevel { prefix } => prefix
            .trim_start()
            .chars()
            .all(is_ident_char)
            .then_some(CompletionContext::TopLevelBlockType),
        EnclosingConstruct::BlockHeader | EnclosingConstruct::Comment => None,
        EnclosingConstruct::Statement(statement) => {
            let block = location.block?;
            if block.kind.is_configuration() {
                classify_configuration(block, statement)
            } else if statement.open.is_empty() {
                if statement.string.is_some() {
                    return None;
                }
                classify_line(block, statement)
            } else {
                classify_arguments(schema, block, statement)
            }
        }
    }
}

fn classify_configuration<'s>(
    block: &'s Block,
    statement: &Statement,
) -> Option<CompletionContext<'s>> {
    let head = statement.text_before_delimiter(0);
    let tokens = words(head);
    let key = match tokens.as_slice() {
        [(key, TokenKind::Ident), (_, TokenKind::Eq), ..] => Some(SmolStr::new(key)),
        _ => None,
    };

    if let Some(first) = statement.open.first() {
        let key = key?;
        return match first.kind {
            Delimiter::Bracket => {
                let listed = words(statement.text_inside_delimiter(0))
                    .into_iter()
                    .filter(|(_, kind)| *kind == TokenKind::String)
                    .map(|(text, _)| SmolStr::new(unquote(text)))
                    .collect();
                Some(CompletionContext::ConfigValueList { block, key, listed })
            }
            Delimiter::Paren => {
                let callee = last_identifier(head);
                (statement.open.len() == 1
                    && statement.string.is_some()
                    && callee == Some("env"))
                .then_some(CompletionContext::EnvVariable { block, key })
            }
        };
    }

    if let Some(quote) = statement.string {
        let key = key?;
        let partial = SmolStr::new(&statement.before[quote + 1..]);
        return Some(CompletionContext::ConfigValueString {
            block,
            key,
            partial,
        });
    }

    let boundary = ends_at_boundary(&statement.before);
    let Some(eq) = tokens.iter().position(|(_, kind)| *kind == TokenKind::Eq) else {
        return match tokens.as_slice() {
            [] => Some(CompletionContext::DatasourceOrGeneratorField { block }),
            [(_, TokenKind::Ident)] if !boundary => {
                Some(CompletionContext::DatasourceOrGeneratorField { block })
            }
            _ => None,
        };
    };

    let key = key.filter(|_| eq == 1)?;
    match &tokens[eq + 1..] {
        [] => Some(CompletionContext::ConfigValue { block, key }),
        [(_, TokenKind::Ident)] if !boundary => {
            Some(CompletionContext::ConfigValue { block, key })
        }
        _ => None,
    }
}

fn classify_line<'s>(block: &'s Block, statement: &Statement) -> Option<CompletionContext<'s>> {
    let tokens = lex_significant(&statement.before);
    let tokens: Vec<Token> = tokens
        .into_iter()
        .filter(|token| token.kind != TokenKind::Newline)
        .collect();
    let boundary = ends_at_boundary(&statement.before);

    let Some(first) = tokens.first() else {
        return Some(if statement.has_text_after() {
            CompletionContext::ModelBodyField { block }
        } else {
            CompletionContext::BlockAttribute { block }
        });
    };

    if first.kind == TokenKind::AtAt {
        let naming = match tokens.as_slice() {
            [_] => true,
            [_, name] => name.kind == TokenKind::Ident,
            _ => false,
        };
        return (naming && !boundary).then_some(CompletionContext::BlockAttribute { block });
    }

    if first.kind != TokenKind::Ident {
        return None;
    }

    if tokens.len() == 1 && !boundary {
        return Some(if statement.has_text_after() {
            CompletionContext::ModelBodyField { block }
        } else {
            CompletionContext::BlockAttribute { block }
        });
    }

    if block.kind == BlockKind::Enum {
        let value = block.value_at(statement.start)?;
        return Some(CompletionContext::FieldAttribute {
            block,
            field: FieldLine::Value(value),
        });
    }

    let field_name = first.text(&statement.before);
    let in_type = match tokens.as_slice() {
        [_] => boundary,
        [_, ty] => ty.kind == TokenKind::Ident && !boundary,
        _ => false,
    };
    if in_type {
        return Some(CompletionContext::FieldTypeName {
            block,
            field: SmolStr::new(field_name),
        });
    }

    let field = block
        .field_at(statement.start)
        .or_else(|| block.field(field_name))?;

    if !boundary && after_native_type_prefix(&tokens, &statement.before) {
        return Some(CompletionContext::NativeType { block, field });
    }

    Some(CompletionContext::FieldAttribute {
        block,
        field: FieldLine::Field(field),
    })
}

/// `@db.` optionally followed by the start of a type name.
fn after_native_type_prefix(tokens: &[Token], text: &str) -> bool {
    let tail = match tokens {
        [.., at, db, dot] if dot.kind == TokenKind::Dot => [at, db],
        [.., at, db, dot, name] if dot.kind == TokenKind::Dot && name.kind == TokenKind::Ident => {
            [at, db]
        }
        _ => return false,
    };
    tail[0].kind == TokenKind::At && tail[1].kind == TokenKind::Ident && tail[1].text(text) == "db"
}

fn classify_arguments<'s>(
    schema: &'s Schema,
    block: &'s Block,
    statement: &Statement,
) -> Option<CompletionContext<'s>> {
    let attribute = attribute_name(statement.text_before_delimiter(0))?;
    let shape = statement.shape();
    if shape.first() != Some(&Delimiter::Paren) {
        return None;
    }

    let field = if attribute.starts_with("@@") {
        None
    } else {
        block.field_at(statement.start)
    };

    if let Some(quote) = statement.string {
        if shape.len() != 1 {
            return None;
        }
        let inside = &statement.before[statement.open[0].offset + 1..quote];
        let segments = split_top_level(inside);
        let current = segments.last().copied().unwrap_or_default();
        let argument = named_segment(current).map(|(name, _)| SmolStr::new(name));
        return Some(CompletionContext::AttributeArgumentValueString {
            block,
            attribute,
            argument,
        });
    }

    match shape.as_slice() {
        [Delimiter::Paren] => {
            let segments = split_top_level(statement.text_inside_delimiter(0));
            let (current, previous) = segments.split_last()?;

            if let Some((name, value)) = named_segment(current) {
                return is_partial_identifier(value).then(|| {
                    CompletionContext::AttributeArgumentValue {
                        block,
                        field,
                        attribute: attribute.clone(),
                        argument: Some(SmolStr::new(name)),
                    }
                });
            }
            if !is_partial_identifier(current) {
                return None;
            }
            if previous.is_empty() && VALUE_FIRST_ATTRIBUTES.contains(&attribute.as_str()) {
                return Some(CompletionContext::AttributeArgumentValue {
                    block,
                    field,
                    attribute,
                    argument: None,
                });
            }

            let used = bound_arguments(
                positional_argument(&attribute),
                previous,
                current,
                &statement.after,
            );
            Some(CompletionContext::AttributeArgumentName {
                block,
                attribute,
                used,
            })
        }
        [Delimiter::Paren, Delimiter::Bracket] => {
            let outer = split_top_level(statement.text_inside_delimiter(0));
            let (holder, previous) = outer.split_last()?;
            let argument = match named_segment(holder) {
                Some((name, value)) if value.trim().is_empty() => Some(name),
                Some(_) => return None,
                None if previous.is_empty() && holder.trim().is_empty() => None,
                None => return None,
            };

            let (target, relations) = match (attribute.as_str(), argument) {
                ("@relation", Some("fields")) => (Some(block), false),
                ("@relation", Some("references")) => {
                    let related = field
                        .and_then(Field::type_name)
                        .and_then(|name| schema.type_block(name))
                        .filter(|related| related.kind.is_model_like());
                    (related, true)
                }
                (
                    "@@id" | "@@unique" | "@@index" | "@@fulltext" | "@@shardKey",
                    None | Some("fields"),
                ) => (Some(block), true),
                _ => return None,
            };

            let items = split_top_level(statement.text_inside_delimiter(1));
            let (current, previous) = items.split_last()?;
            let mut listed: Vec<SmolStr> = previous
                .iter()
                .filter_map(|item| listed_path(item))
                .map(SmolStr::new)
                .collect();

            let current = current.trim();
            let mut segments: Vec<SmolStr> = current
                .split('.')
                .map(|segment| SmolStr::new(segment.trim()))
                .collect();
            let partial = segments.pop().unwrap_or_default();
            if segments.is_empty() && !partial.is_empty() {
                listed.push(partial.clone());
            }

            Some(CompletionContext::FieldReferenceList {
                block: target,
                listed,
                path: segments,
                partial,
                relations,
            })
        }
        [Delimiter::Paren, Delimiter::Bracket, Delimiter::Paren] => {
            let items = split_top_level(statement.text_inside_delimiter(1));
            let field_name = items.last().and_then(|item| leading_identifier(item))?;
            let referenced = block.field(field_name);

            let options = split_top_level(statement.text_inside_delimiter(2));
            let current = options.last().copied().unwrap_or_default();
            if let Some((name, value)) = named_segment(current) {
                if !is_partial_identifier(value) {
                    return None;
                }
                let index_type = block
                    .attribute_at(statement.start)
                    .and_then(|parsed| parsed.argument("type"))
                    .and_then(|argument| argument.value.as_path())
                    .map(SmolStr::new);
                return Some(CompletionContext::PerFieldOptionValue {
                    attribute,
                    argument: SmolStr::new(name),
                    field: referenced,
                    index_type,
                });
            }
            is_partial_identifier(current).then(|| CompletionContext::PerFieldOptionArgument {
                attribute,
                field_type: referenced.and_then(Field::type_name).map(SmolStr::new),
            })
        }
        [Delimiter::Paren, Delimiter::Paren] if attribute == "@default" => {
            let function = last_identifier(statement.text_inside_delimiter(0))?;
            let arguments = split_top_level(statement.text_inside_delimiter(1));
            let (current, previous) = arguments.split_last()?;
            if named_segment(current).is_some() || !is_partial_identifier(current) {
                return None;
            }
            let used = bound_arguments(None, previous, current, &statement.after);
            Some(CompletionContext::DefaultFunctionArgument {
                function: SmolStr::new(function),
                used,
            })
        }
        _ => None,
    }
}

/// Arguments already bound in a call: every named argument, a bare
/// identifier spelled like an argument, and the unnamed first argument
/// standing for `positional`.
///
/// `after` is the rest of the line; its first segment continues the one
/// under the cursor and is skipped.
fn bound_arguments(
    positional: Option<&str>,
    previous: &[&str],
    current: &str,
    after: &str,
) -> Vec<SmolStr> {
    let following = split_top_level(remaining_arguments(after));
    let mut used = Vec::new();

    let segments = previous
        .iter()
        .map(|segment| (*segment, false))
        .chain(following.iter().skip(1).map(|segment| (*segment, false)))
        .chain(std::iter::once((current, true)));

    let first_segment = previous.first().copied();
    for (segment, at_cursor) in segments {
        if let Some((name, _)) = named_segment(segment) {
            used.push(SmolStr::new(name));
        } else if let Some(word) = leading_identifier(segment).filter(|w| *w == segment.trim()) {
            used.push(SmolStr::new(word));
        } else if !at_cursor && Some(segment) == first_segment && !segment.trim().is_empty() {
            if let Some(positional) = positional {
                used.push(SmolStr::new(positional));
            }
        }
    }
    used
}

/// Text of `after` up to the delimiter that closes the current call.
fn remaining_arguments(after: &str) -> &str {
    let mut depth = 0usize;
    let mut in_string = false;
    for (idx, ch) in after.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            _ if in_string => {}
            '(' | '[' => depth += 1,
            ')' | ']' if depth == 0 => return &after[..idx],
            ')' | ']' => depth -= 1,
            _ => {}
        }
    }
    after
}

/// Attribute name ending `text`, with its `@`/`@@` prefix, e.g. `@@index`
/// or `@db.VarChar`.
fn attribute_name(text: &str) -> Option<SmolStr> {
    let tokens = lex_significant(text);
    let mut path = Vec::new();
    let mut iter = tokens.iter().rev().peekable();
    while let Some(token) = iter.next() {
        match token.kind {
            TokenKind::Ident => path.push(token.text(text)),
            TokenKind::Dot if iter.peek().is_some_and(|t| t.kind == TokenKind::Ident) => {}
            TokenKind::At | TokenKind::AtAt if !path.is_empty() => {
                path.reverse();
                let prefix = if token.kind == TokenKind::AtAt { "@@" } else { "@" };
                return Some(SmolStr::new(format!("{prefix}{}", path.join("."))));
            }
            _ => return None,
        }
    }
    None
}

/// Significant tokens of `text` with their source slices, newlines dropped.
fn words(text: &str) -> Vec<(&str, TokenKind)> {
    lex_significant(text)
        .into_iter()
        .filter(|token| token.kind != TokenKind::Newline)
        .map(|token| (token.text(text), token.kind))
        .collect()
}

fn last_identifier(text: &str) -> Option<&str> {
    match words(text).last() {
        Some((word, TokenKind::Ident)) => Some(word),
        _ => None,
    }
}

/// Identifier at the start of `text`, ignoring leading blanks.
fn leading_identifier(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|ch: char| !is_ident_char(ch))
        .unwrap_or(trimmed.len());
    let word = &trimmed[..end];
    let rest = trimmed[end..].trim_start();
    (!word.is_empty() && !rest.starts_with('.')).then_some(word)
}

/// Field or dotted path written as a list item, without any per-field
/// call, e.g. `address.street` for `address.street(sort: Desc)`.
fn listed_path(item: &str) -> Option<&str> {
    let path = item.split('(').next().unwrap_or_default().trim();
    let valid = !path.is_empty()
        && path
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(is_ident_char));
    valid.then_some(path)
}

/// Splits `text` at commas that are not nested in brackets or strings.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            _ if in_string => {}
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Splits `name: value`, returning the trimmed name and the raw value.
fn named_segment(segment: &str) -> Option<(&str, &str)> {
    let (name, value) = segment.split_once(':')?;
    let name = name.trim();
    (!name.is_empty() && name.chars().all(is_ident_char)).then_some((name, value))
}

fn is_partial_identifier(text: &str) -> bool {
    text.trim().chars().all(is_ident_char)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn ends_at_boundary(text: &str) -> bool {
    text.chars().last().is_none_or(char::is_whitespace)
}

fn unquote(raw: &str) -> &str {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    inner.strip_suffix('"').unwrap_or(inner)
}
