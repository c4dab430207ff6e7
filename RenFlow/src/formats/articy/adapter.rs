//! Export → typed records
//!
//! Models are dispatched on their `Type` using the configured type names.
//! Unknown types are skipped.

use serde_json::Value;

use super::document::{ArticyExport, Model};
use crate::config::{ExportSchema, TemplateFeatures};
use crate::error::{Error, Result};
use crate::graph::{Character, Fragment, Jump, Label, MenuItem, Node, Records, Variable, VariableType};

/// Build records from a parsed export
///
/// Only the first package is read.
pub fn extract_records(export: &ArticyExport, schema: &ExportSchema) -> Result<Records> {
    let package = export.packages.first().ok_or(Error::NoPackages)?;
    let types = &schema.types;
    let features = &schema.templates;

    let mut records = Records {
        variables: extract_variables(export),
        ..Default::default()
    };

    let mut skipped = 0usize;
    for model in &package.models {
        let kind = model.model_type.as_str();
        if kind == types.character {
            records.characters.push(character(model, features)?);
        } else if kind == types.dialogue {
            records.labels.push(label(model)?);
        } else if kind == types.fragment {
            records.nodes.push(Node::Fragment(fragment(model)?));
        } else if kind == types.injected_fragment {
            let mut fragment = fragment(model)?;
            fragment.guard = injection(model, features, &features.condition);
            fragment.effect = injection(model, features, &features.outcome);
            records.nodes.push(Node::Fragment(fragment));
        } else if kind == types.menu {
            records.nodes.push(Node::Menu(fragment(model)?));
        } else if kind == types.menu_item {
            records.nodes.push(Node::MenuItem(menu_item(model, features)?));
        } else if kind == types.jump {
            records.nodes.push(Node::Jump(jump(model)?));
        } else {
            tracing::debug!("Skipping model {} of type {}", model.id_or_unknown(), kind);
            skipped += 1;
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} models of unhandled types", skipped);
    }
    Ok(records)
}

fn extract_variables(export: &ArticyExport) -> Vec<Variable> {
    export
        .global_variables
        .iter()
        .flat_map(|namespace| {
            namespace.variables.iter().map(|raw| Variable {
                namespace: namespace.namespace.clone(),
                name: raw.variable.clone(),
                var_type: VariableType::from(raw.var_type.as_str()),
                value: raw.value_text(),
                description: raw.description.clone(),
            })
        })
        .collect()
}

fn required<'a>(model: &'a Model, field: &str) -> Result<&'a str> {
    model.property(field).ok_or_else(|| Error::MissingField {
        model_type: model.model_type.clone(),
        id: model.id_or_unknown().to_string(),
        field: field.to_string(),
    })
}

fn optional(model: &Model, field: &str) -> String {
    model.property(field).unwrap_or_default().to_string()
}

/// Trimmed template string; blank counts as absent
fn template_text(model: &Model, feature: &str, property: &str) -> Option<String> {
    model
        .template_value(feature, property)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

fn injection(model: &Model, features: &TemplateFeatures, property: &str) -> Option<String> {
    template_text(model, &features.python_injections, property)
}

fn character(model: &Model, features: &TemplateFeatures) -> Result<Character> {
    Ok(Character {
        name: required(model, "DisplayName")?.to_string(),
        color: template_text(model, &features.character_properties, &features.color).unwrap_or_default(),
        speaker: required(model, "Id")?.to_string(),
    })
}

fn label(model: &Model) -> Result<Label> {
    Ok(Label {
        id: required(model, "Id")?.to_string(),
        name: required(model, "DisplayName")?.to_string(),
        target_file: required(model, "Text")?.trim().to_string(),
        edges: model.output_targets(),
    })
}

fn fragment(model: &Model) -> Result<Fragment> {
    let stage = optional(model, "StageDirections");
    Ok(Fragment {
        id: required(model, "Id")?.to_string(),
        parent: required(model, "Parent")?.to_string(),
        speaker_id: optional(model, "Speaker"),
        text: optional(model, "Text"),
        stage_direction: Some(stage.trim().to_string()).filter(|stage| !stage.is_empty()),
        guard: None,
        effect: None,
        edges: model.output_targets(),
    })
}

fn menu_item(model: &Model, features: &TemplateFeatures) -> Result<MenuItem> {
    let base = fragment(model)?;
    Ok(MenuItem {
        ordinal: ordinal(model, features),
        guard: injection(model, features, &features.condition),
        effect: injection(model, features, &features.outcome),
        selected_text: template_text(model, &features.menu_item, &features.selected_text),
        id: base.id,
        parent: base.parent,
        speaker_id: base.speaker_id,
        text: base.text,
        edges: base.edges,
    })
}

/// Ordinal as a JSON number or a numeric string, 0 when absent
fn ordinal(model: &Model, features: &TemplateFeatures) -> i64 {
    let value = model.template_value(&features.menu_item, &features.ordinal);
    let parsed = match value {
        None | Some(Value::Null) => return 0,
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::warn!("Menu item {}: ordinal {:?} is not an integer, using 0", model.id_or_unknown(), value);
        0
    })
}

fn jump(model: &Model) -> Result<Jump> {
    Ok(Jump {
        id: required(model, "Id")?.to_string(),
        parent: required(model, "Parent")?.to_string(),
        target: required(model, "Target")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::articy::parse_export;
    use pretty_assertions::assert_eq;

    fn extract(json: &str) -> Result<Records> {
        extract_records(&parse_export(json).unwrap(), &ExportSchema::default())
    }

    #[test]
    fn test_models_dispatched_by_type() {
        let records = extract(
            r#"{
                "GlobalVariables": [
                    {"Namespace": "story", "Variables": [
                        {"Variable": "met", "Type": "Boolean", "Value": "False", "Description": ""}
                    ]}
                ],
                "Packages": [{"Models": [
                    {"Type": "RenCharacter",
                     "Properties": {"Id": "0x01", "DisplayName": "Faye"},
                     "Template": {"RenCharProps": {"Color": "ff8800"}}},
                    {"Type": "Dialogue",
                     "Properties": {"Id": "0x10", "DisplayName": "start", "Text": "script.rpy",
                                    "OutputPins": [{"Connections": [{"Target": "0x11"}]}]}},
                    {"Type": "DialogueFragment",
                     "Properties": {"Id": "0x12", "Parent": "0x10", "Speaker": "0x01",
                                    "Text": "Hi", "StageDirections": " bg room ",
                                    "OutputPins": [{"Connections": [{"Target": "0x13"}, {"Target": "0x14"}]}]}},
                    {"Type": "Jump",
                     "Properties": {"Id": "0x13", "Parent": "0x10", "Target": "0x11"}},
                    {"Type": "Comment", "Properties": {"Id": "0x99"}}
                ]}]
            }"#,
        )
        .unwrap();

        assert_eq!(records.characters.len(), 1);
        assert_eq!(records.characters[0].color, "ff8800");
        assert_eq!(records.variables[0].var_type, VariableType::Boolean);
        assert_eq!(records.variables[0].value, "False");
        assert_eq!(records.labels[0].target_file, "script.rpy");
        assert_eq!(records.labels[0].edges, vec!["0x11".to_string()]);
        assert_eq!(records.nodes.len(), 2);

        let Node::Fragment(fragment) = &records.nodes[0] else {
            panic!("expected a fragment");
        };
        assert_eq!(fragment.stage_direction.as_deref(), Some("bg room"));
        assert_eq!(fragment.edges, vec!["0x13".to_string(), "0x14".to_string()]);
        assert!(records.nodes[1].is_jump());
    }

    #[test]
    fn test_injected_fragment_and_menu_item_templates() {
        let records = extract(
            r#"{"Packages": [{"Models": [
                {"Type": "InjectedFragment",
                 "Properties": {"Id": "F1", "Parent": "L1", "Text": "Psst"},
                 "Template": {"PythonInjections": {"PythonCondition": "if met", "PythonOutcome": "  "}}},
                {"Type": "MenuItem",
                 "Properties": {"Id": "I1", "Parent": "M1", "Text": "Go"},
                 "Template": {
                    "PythonInjections": {"PythonCondition": "", "PythonOutcome": "gold -= 1"},
                    "MenuItem": {"OptionSelectedText": "Let's go.", "OrdinalNumber": "3"}}},
                {"Type": "MenuItem",
                 "Properties": {"Id": "I2", "Parent": "M1", "Text": "Stay"},
                 "Template": {"MenuItem": {"OrdinalNumber": 1}}}
            ]}]}"#,
        )
        .unwrap();

        let Node::Fragment(fragment) = &records.nodes[0] else {
            panic!("expected a fragment");
        };
        assert_eq!(fragment.guard.as_deref(), Some("if met"));
        assert_eq!(fragment.effect, None);

        let Node::MenuItem(first) = &records.nodes[1] else {
            panic!("expected a menu item");
        };
        assert_eq!(first.ordinal, 3);
        assert_eq!(first.guard, None);
        assert_eq!(first.effect.as_deref(), Some("gold -= 1"));
        assert_eq!(first.selected_text.as_deref(), Some("Let's go."));
        assert_eq!(records.nodes[2].ordinal(), 1);
    }

    #[test]
    fn test_missing_field_reported() {
        let err = extract(r#"{"Packages": [{"Models": [{"Type": "Jump", "Properties": {"Id": "J1", "Parent": "L1"}}]}]}"#)
            .unwrap_err();
        match err {
            Error::MissingField { model_type, id, field } => {
                assert_eq!(model_type, "Jump");
                assert_eq!(id, "J1");
                assert_eq!(field, "Target");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_packages() {
        let err = extract(r#"{"GlobalVariables": []}"#).unwrap_err();
        assert!(matches!(err, Error::NoPackages));
    }

    #[test]
    fn test_custom_type_names() {
        let mut schema = ExportSchema::default();
        schema.types.character = "Ren_py_character".to_string();
        let export = parse_export(
            r#"{"Packages": [{"Models": [
                {"Type": "Ren_py_character", "Properties": {"Id": "C1", "DisplayName": "Tom"}}
            ]}]}"#,
        )
        .unwrap();

        let records = extract_records(&export, &schema).unwrap();
        assert_eq!(records.characters[0].name, "Tom");
        assert_eq!(records.characters[0].color, "");
    }
}
