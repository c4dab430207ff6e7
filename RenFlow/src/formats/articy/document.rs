//! Raw articy:draft JSON export structures
//!
//! Only the parts the converter reads are typed. Model properties and
//! templates stay as JSON values, since their shape depends on the model type
//! and on the project's template definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top level of an articy JSON export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArticyExport {
    #[serde(default)]
    pub global_variables: Vec<VariableNamespace>,
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// One global variable set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableNamespace {
    pub namespace: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub variables: Vec<RawVariable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawVariable {
    pub variable: String,
    #[serde(rename = "Type", default)]
    pub var_type: String,
    /// Usually a string, but some exports write booleans and numbers
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub description: String,
}

impl RawVariable {
    /// The default value as export text; `null` becomes empty
    #[must_use]
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Package {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub models: Vec<Model>,
}

/// One exported object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    #[serde(rename = "Type")]
    pub model_type: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub template: Map<String, Value>,
}

impl Model {
    /// A string property, if present and a string
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// The model id, or `<unknown>` for logging when it is missing
    #[must_use]
    pub fn id_or_unknown(&self) -> &str {
        self.property("Id").unwrap_or("<unknown>")
    }

    /// `Template.<feature>.<property>`
    #[must_use]
    pub fn template_value(&self, feature: &str, property: &str) -> Option<&Value> {
        self.template.get(feature)?.get(property)
    }

    /// Targets of every connection of every output pin, in export order
    #[must_use]
    pub fn output_targets(&self) -> Vec<String> {
        let Some(pins) = self.properties.get("OutputPins").and_then(Value::as_array) else {
            return Vec::new();
        };

        pins.iter()
            .filter_map(|pin| pin.get("Connections").and_then(Value::as_array))
            .flatten()
            .filter_map(|connection| connection.get("Target").and_then(Value::as_str))
            .map(ToString::to_string)
            .collect()
    }
}
