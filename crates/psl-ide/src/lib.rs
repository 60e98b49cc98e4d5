//! `psl-ide` - Context-aware completion for the Prisma Schema Language.
//!
//! This crate provides completion built on top of `psl-syntax`:
//!
//! - **Locator**: Finds the block and statement around the cursor, tolerating
//!   unclosed brackets and strings
//! - **Classifier**: Decides what is being typed at the cursor
//! - **Capabilities**: Static tables gated by connector and preview features
//! - **Completion**: Emits ordered, deduplicated candidates
//!
//! # Architecture
//!
//! Completion is a pure function of a [`psl_syntax::Schema`] snapshot and a
//! position. Nothing is cached between requests.
//!
//! # Example
//!
//! ```
//! use psl_ide::complete;
//! use psl_syntax::{Position, Schema};
//!
//! let schema = Schema::single_file("file:///schema.prisma", "");
//! let list = complete(&schema, "file:///schema.prisma", Position::new(0, 0)).unwrap();
//! let labels: Vec<_> = list.labels().collect();
//! assert_eq!(labels, ["datasource", "generator", "model", "enum"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod completion;
mod context;
mod locator;
pub mod resolve;

pub use capabilities::{Capabilities, PreviewFeature, PreviewFeatures, Provider, ScalarType};
pub use completion::{
    complete, complete_with_trigger, completion_context, CompletionItem, CompletionKind,
    CompletionList, Trigger,
};
pub use context::{CompletionContext, FieldLine};
pub use resolve::ResolvedType;
