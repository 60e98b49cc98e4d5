//! Project configuration loaded from `psl.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub(crate) const CONFIG_FILES: &[&str] = &["psl.toml", ".psl.toml"];

/// Trigger characters used when the project does not configure any.
pub const DEFAULT_TRIGGER_CHARACTERS: &[&str] = &["@", "\"", "."];

/// Project configuration loaded from `psl.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Root directory of the project.
    pub root: PathBuf,
    /// Config file path (if found).
    pub config_path: Option<PathBuf>,
    /// Glob patterns, relative to the root, of documents composed into one schema.
    pub schema_files: Vec<String>,
    /// Characters that start a completion request in the editor.
    pub trigger_characters: Vec<String>,
}

impl ProjectConfig {
    /// Load configuration for a project root.
    ///
    /// A missing file yields defaults. An unreadable or malformed file is
    /// reported with a warning and also yields defaults.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let Some(path) = find_config_file(root) else {
            return Self::base(root, None);
        };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            warn!("Failed to read psl config at {}", path.display());
            return Self::base(root, Some(path));
        };
        info!("Loaded psl config from {}", path.display());
        Self::from_contents(root, Some(path), &contents)
    }

    /// Builds the configuration from the text of a config file.
    #[must_use]
    pub fn from_contents(root: &Path, config_path: Option<PathBuf>, contents: &str) -> Self {
        let mut config = Self::base(root, config_path);
        let parsed: ConfigFile = match toml::from_str(contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                if let Some(path) = &config.config_path {
                    warn!("Failed to parse psl config at {}: {err}", path.display());
                } else {
                    warn!("Failed to parse psl config: {err}");
                }
                return config;
            }
        };

        config.schema_files = parsed.schema.files;
        if let Some(characters) = parsed.completion.trigger_characters {
            config.trigger_characters = characters
                .into_iter()
                .filter(|character| {
                    let single = character.chars().count() == 1;
                    if !single {
                        warn!("Ignoring trigger character '{character}': expected one character");
                    }
                    single
                })
                .collect();
        }
        config
    }

    /// Schema file patterns joined onto the project root.
    #[must_use]
    pub fn schema_patterns(&self) -> Vec<String> {
        self.schema_files
            .iter()
            .map(|pattern| resolve_path(&self.root, pattern).to_string_lossy().into_owned())
            .collect()
    }

    fn base(root: &Path, config_path: Option<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path,
            schema_files: Vec::new(),
            trigger_characters: DEFAULT_TRIGGER_CHARACTERS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    schema: SchemaSection,
    #[serde(default)]
    completion: CompletionSection,
}

#[derive(Debug, Default, Deserialize)]
struct SchemaSection {
    #[serde(default)]
    files: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CompletionSection {
    trigger_characters: Option<Vec<String>>,
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

fn resolve_path(root: &Path, entry: &str) -> PathBuf {
    let path = PathBuf::from(entry);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
