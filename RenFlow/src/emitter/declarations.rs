//! Init files: character `define`s and variable `default`s

use std::fmt;
use std::str::FromStr;

use super::scene::quote;
use crate::error::Error;
use crate::graph::{Character, Variable, VariableType, script_ident};

const CHARACTER_HEADER: &str = "# Declarations for game characters and their important values";
const VARIABLE_HEADER: &str = "# Declarations of global variables";

/// Which declarations file to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitKind {
    Character,
    Variable,
}

impl InitKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InitKind::Character => "character",
            InitKind::Variable => "variable",
        }
    }
}

impl fmt::Display for InitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "character" | "characters" => Ok(InitKind::Character),
            "variable" | "variables" => Ok(InitKind::Variable),
            _ => Err(Error::InvalidInitKind(s.to_string())),
        }
    }
}

/// `#rrggbb`, black when the export has no color
fn hex_color(color: &str) -> String {
    let hex = color.trim().trim_start_matches('#');
    if hex.is_empty() {
        "#000000".to_string()
    } else {
        format!("#{hex}")
    }
}

/// Script literal for a variable's default value
fn literal(variable: &Variable) -> String {
    let raw = variable.value.trim();
    if raw.is_empty() {
        return "None".to_string();
    }
    match variable.var_type {
        VariableType::Boolean if raw.eq_ignore_ascii_case("true") => "True".to_string(),
        VariableType::Boolean if raw.eq_ignore_ascii_case("false") => "False".to_string(),
        VariableType::String => quote(raw),
        _ => raw.to_string(),
    }
}

/// Render the character declarations file
#[must_use]
pub fn render_characters(characters: &[Character], character_class: &str) -> String {
    let mut output = format!("{CHARACTER_HEADER}\n\n");
    for character in characters {
        output.push_str(&format!(
            "define {} = {}({}, color={})\n",
            script_ident(&character.name),
            character_class,
            quote(&character.name),
            quote(&hex_color(&character.color)),
        ));
    }
    output
}

/// Render the variable declarations file
#[must_use]
pub fn render_variables(variables: &[Variable]) -> String {
    let mut output = format!("{VARIABLE_HEADER}\n\n");
    for variable in variables {
        output.push_str(&format!(
            "default {}.{} = {}\n",
            variable.namespace,
            variable.name,
            literal(variable)
        ));
    }
    output
}
