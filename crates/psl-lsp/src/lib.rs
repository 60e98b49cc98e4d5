//! `psl-lsp` - Language server boundary for Prisma Schema completion.
//!
//! This crate connects the completion engine in `psl-ide` to the outside:
//!
//! - **Handlers**: Convert `textDocument/completion` requests and responses
//!   to and from `lsp-types`
//! - **Config**: Project settings read from `psl.toml`
//! - **Loader**: Composes the configured schema files into one [`psl_syntax::Schema`]
//!
//! The `psl-complete` binary wires these together for a single request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
mod handlers;
pub mod loader;

pub use config::ProjectConfig;
pub use handlers::{
    completion_kind, completion_options, completion_response, handle_completion_request,
};
pub use loader::{file_uri, load_schema, LoadError, LoadedSchema};
