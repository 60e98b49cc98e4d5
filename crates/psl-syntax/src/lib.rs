//! `psl-syntax` - Lexer, tolerant parser, and structural model for the Prisma Schema Language.
//!
//! This crate provides the low-level syntactic analysis for schema files:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Splits the token stream into statements and builds blocks
//! - **Model**: Blocks, fields, enum values, properties and attributes
//!
//! # Design Principles
//!
//! - **Error-tolerant**: Parsing never fails; unknown input is skipped
//! - **Line oriented**: A statement ends at a newline outside of brackets
//! - **Positioned**: Every node remembers the byte range it came from
//!
//! # Example
//!
//! ```
//! use psl_syntax::{BlockKind, Schema};
//!
//! let schema = Schema::single_file(
//!     "file:///schema.prisma",
//!     "model User {\n  id Int @id\n}\n",
//! );
//!
//! let user = schema.type_block("User").unwrap();
//! assert_eq!(user.kind, BlockKind::Model);
//! assert!(user.field("id").unwrap().has_attribute("id"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
mod error;
pub mod lexer;
mod line_index;
pub mod parser;
mod schema;

pub use ast::{
    Argument, Attribute, Block, BlockKind, EnumValue, Expr, Field, FieldArity, FieldType,
    Property,
};
pub use error::SchemaError;
pub use lexer::{lex, Lexer, Token, TokenKind};
pub use line_index::{LineIndex, Position};
pub use schema::{Document, Schema};
pub use text_size::{TextRange, TextSize};
