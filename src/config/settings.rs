//! Configuration settings for frump.
//!
//! Settings are plain YAML. Every section and field is optional; anything
//! left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FrumpError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Parser settings.
    pub parser: ParserConfig,
    /// Serializer settings.
    pub writer: WriterConfig,
    /// Validation settings.
    pub validation: ValidationConfig,
}

/// How the `#` marker is removed from a title line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TitleMarkers {
    /// Strip only the leading `#`.
    #[default]
    Leading,
    /// Strip every `#` in the line.
    All,
}

/// What goes between accumulated body or description lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BodySeparator {
    /// One `\n` between lines.
    #[default]
    Newline,
    /// One space between lines.
    Space,
    /// Lines are concatenated as-is.
    None,
}

impl BodySeparator {
    /// The text inserted between two fragments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::Space => " ",
            Self::None => "",
        }
    }
}

/// Where a `###` task heading may appear.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeadingPolicy {
    /// Anywhere in the document; a heading opens the Tasks section itself.
    #[default]
    Anywhere,
    /// Only after a `## Tasks` marker.
    TasksSection,
}

/// Line ending written by the serializer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    /// The line terminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Title marker stripping.
    pub title_markers: TitleMarkers,
    /// Separator between accumulated body lines.
    pub body_separator: BodySeparator,
    /// Placement rule for task headings.
    pub task_headings: HeadingPolicy,
}

/// Serializer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WriterConfig {
    /// Line terminator.
    pub line_ending: LineEnding,
    /// Separate sections and tasks with a blank line.
    #[serde(default = "default_true")]
    pub blank_lines: bool,
}

/// Validation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum number of words in a property name.
    #[serde(default = "default_max_property_words")]
    pub max_property_words: usize,
    /// Report task ids that are not strictly ascending.
    #[serde(default = "default_true")]
    pub require_ascending_ids: bool,
    /// Check member emails for a single `@` with both sides non-empty.
    #[serde(default = "default_true")]
    pub check_emails: bool,
}

// Default value functions for serde
const fn default_true() -> bool {
    true
}

const fn default_max_property_words() -> usize {
    3
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::default(),
            blank_lines: default_true(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_property_words: default_max_property_words(),
            require_ascending_ids: default_true(),
            check_emails: default_true(),
        }
    }
}

impl Config {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or has unknown values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FrumpError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| FrumpError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, FrumpError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FrumpError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            FrumpError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), FrumpError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FrumpError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FrumpError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
