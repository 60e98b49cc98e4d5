//! Composes a target file and the configured schema files into one schema.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use psl_syntax::{Document, Schema};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ProjectConfig;

/// Characters escaped in the path of a `file://` URI.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Error loading schema documents from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A configured schema file pattern is not a valid glob.
    #[error("invalid schema file pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },
}

/// A schema together with the URI of the document that was asked for.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    /// All documents composed into one schema.
    pub schema: Schema,
    /// URI of the target document inside `schema`.
    pub uri: String,
}

/// Builds a `file://` URI for an absolute path.
#[must_use]
pub fn file_uri(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let raw = raw.strip_prefix(r"\\?\").unwrap_or(&raw).replace('\\', "/");
    let encoded = utf8_percent_encode(&raw, PATH_SET);
    if raw.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}

/// Loads `target` followed by every file matched by the configured patterns.
///
/// The target must be readable. Matched files that cannot be read are skipped
/// with a warning, and a file matched more than once is added once.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the target cannot be read and
/// [`LoadError::Pattern`] if a configured pattern is invalid.
pub fn load_schema(config: &ProjectConfig, target: &Path) -> Result<LoadedSchema, LoadError> {
    let io_error = |source| LoadError::Io {
        path: target.to_path_buf(),
        source,
    };
    let target = std::fs::canonicalize(target).map_err(io_error)?;
    let text = std::fs::read_to_string(&target).map_err(io_error)?;
    let uri = file_uri(&target);

    let mut schema = Schema::single_file(uri.clone(), text);

    for pattern in config.schema_patterns() {
        let paths = glob::glob(&pattern).map_err(|source| LoadError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!("Skipping unreadable schema path: {err}");
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let Some((path, text)) = read_document(&path) else {
                continue;
            };
            if let Err(err) = schema.add_document(Document::parse(file_uri(&path), text)) {
                debug!("{err}");
            }
        }
    }

    debug!(
        file = %target.display(),
        documents = schema.documents().len(),
        "loaded schema"
    );
    Ok(LoadedSchema { schema, uri })
}

fn read_document(path: &Path) -> Option<(PathBuf, String)> {
    let canonical = match std::fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(err) => {
            warn!("Failed to resolve schema file {}: {err}", path.display());
            return None;
        }
    };
    match std::fs::read_to_string(&canonical) {
        Ok(text) => Some((canonical, text)),
        Err(err) => {
            warn!("Failed to read schema file {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn file_uris_escape_path_characters() {
        assert_eq!(
            file_uri(Path::new("/work/my schema/base.prisma")),
            "file:///work/my%20schema/base.prisma"
        );
        assert_eq!(
            file_uri(Path::new("/work/#1/schema.prisma")),
            "file:///work/%231/schema.prisma"
        );
    }

    #[test]
    fn windows_paths_become_file_uris() {
        assert_eq!(
            file_uri(Path::new(r"\\?\C:\work\schema.prisma")),
            "file:///C:/work/schema.prisma"
        );
    }
}
