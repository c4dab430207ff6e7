//! Project configuration (`renflow.toml`)
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration. CLI flags override what is loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up by [`ProjectConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "renflow.toml";

fn default_output_dir() -> PathBuf {
    PathBuf::from("game")
}

fn default_characters_file() -> Option<String> {
    Some("characters.rpy".to_string())
}

fn default_variables_file() -> Option<String> {
    Some("variables.rpy".to_string())
}

fn default_character_class() -> String {
    "Character".to_string()
}

fn default_indent_width() -> usize {
    4
}

/// The full project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub export: ExportSchema,
}

/// Where to read from and write to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// articy JSON export to convert
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Directory receiving every generated `.rpy` file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: default_output_dir(),
        }
    }
}

/// What gets written and how it looks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Scene target files to write; empty means every target file in the export
    #[serde(default)]
    pub scenes: Vec<String>,
    /// Character declarations file, `None` to skip
    #[serde(default = "default_characters_file")]
    pub characters_file: Option<String>,
    /// Variable declarations file, `None` to skip
    #[serde(default = "default_variables_file")]
    pub variables_file: Option<String>,
    /// Class used in `define x = Class(...)` lines
    #[serde(default = "default_character_class")]
    pub character_class: String,
    /// Spaces per indentation level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Render labels on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            scenes: Vec::new(),
            characters_file: default_characters_file(),
            variables_file: default_variables_file(),
            character_class: default_character_class(),
            indent_width: default_indent_width(),
            parallel: false,
        }
    }
}

/// Names used by the articy project for model types and template features
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSchema {
    #[serde(default)]
    pub types: ModelTypes,
    #[serde(default)]
    pub templates: TemplateFeatures,
}

/// `Type` values of `Packages[0].Models[]` entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTypes {
    pub character: String,
    pub dialogue: String,
    pub fragment: String,
    pub injected_fragment: String,
    pub jump: String,
    pub menu: String,
    pub menu_item: String,
}

impl Default for ModelTypes {
    fn default() -> Self {
        Self {
            character: "RenCharacter".to_string(),
            dialogue: "Dialogue".to_string(),
            fragment: "DialogueFragment".to_string(),
            injected_fragment: "InjectedFragment".to_string(),
            jump: "Jump".to_string(),
            menu: "Menu".to_string(),
            menu_item: "MenuItem".to_string(),
        }
    }
}

/// Template feature and property names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateFeatures {
    pub character_properties: String,
    pub color: String,
    pub python_injections: String,
    pub condition: String,
    pub outcome: String,
    pub menu_item: String,
    pub selected_text: String,
    pub ordinal: String,
}

impl Default for TemplateFeatures {
    fn default() -> Self {
        Self {
            character_properties: "RenCharProps".to_string(),
            color: "Color".to_string(),
            python_injections: "PythonInjections".to_string(),
            condition: "PythonCondition".to_string(),
            outcome: "PythonOutcome".to_string(),
            menu_item: "MenuItem".to_string(),
            selected_text: "OptionSelectedText".to_string(),
            ordinal: "OrdinalNumber".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&content)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate config text
    pub fn parse(content: &str) -> Result<Self> {
        let config: ProjectConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `renflow.toml` from `dir` if present, defaults otherwise
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.output.indent_width == 0 {
            return Err(Error::InvalidConfig("output.indent_width must be at least 1".to_string()));
        }
        if self.output.character_class.trim().is_empty() {
            return Err(Error::InvalidConfig("output.character_class must not be empty".to_string()));
        }
        Ok(())
    }
}
