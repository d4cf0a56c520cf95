//! UI schema model: the declarative description of a form.
//!
//! A UI schema is a tree of elements. Controls bind to one location of the
//! data tree via a scope reference; layouts group other elements. Layouts
//! carry no renderer of their own - the application walks them and creates
//! a renderer per control.

use serde::{Deserialize, Serialize};

use super::model::JsonSchema;

/// Reference to a location in the schema/data tree, e.g. `#/properties/pets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl ScopeRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Label configuration on a control.
///
/// May be a bare visibility flag (text derived), a bare text, or a
/// descriptor with either part optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSpec {
    Visible(bool),
    Text(String),
    Descriptor {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        show: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

/// A control bound to one scope of the data tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlElement {
    pub scope: ScopeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSpec>,
}

impl ControlElement {
    /// A control with the given scope and no explicit label.
    pub fn with_scope(reference: impl Into<String>) -> Self {
        Self {
            scope: ScopeRef::new(reference),
            label: None,
        }
    }
}

/// Children of a layout element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub elements: Vec<UiSchema>,
}

/// A UI schema element, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiSchema {
    Control(ControlElement),
    VerticalLayout(Layout),
    HorizontalLayout(Layout),
}

impl UiSchema {
    /// The UI type tag as it appears in serialized form.
    pub fn type_tag(&self) -> &'static str {
        match self {
            UiSchema::Control(_) => "Control",
            UiSchema::VerticalLayout(_) => "VerticalLayout",
            UiSchema::HorizontalLayout(_) => "HorizontalLayout",
        }
    }

    pub fn as_control(&self) -> Option<&ControlElement> {
        match self {
            UiSchema::Control(control) => Some(control),
            _ => None,
        }
    }
}

/// Derive a default UI schema from a schema root: one control per
/// top-level property, wrapped in a vertical layout when there are
/// several.
pub fn generate_default_uischema(schema: &JsonSchema) -> UiSchema {
    let mut controls: Vec<UiSchema> = schema
        .properties
        .keys()
        .map(|name| UiSchema::Control(ControlElement::with_scope(format!("#/properties/{name}"))))
        .collect();

    if controls.len() == 1 {
        controls.remove(0)
    } else {
        UiSchema::VerticalLayout(Layout { elements: controls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_control() {
        let json = r#"{
            "type": "Control",
            "scope": { "$ref": "#/properties/pets" }
        }"#;

        let uischema: UiSchema = serde_json::from_str(json).unwrap();
        assert_eq!(uischema.type_tag(), "Control");

        let control = uischema.as_control().unwrap();
        assert_eq!(control.scope.reference, "#/properties/pets");
        assert!(control.label.is_none());
    }

    #[test]
    fn test_deserialize_label_variants() {
        let hidden: ControlElement = serde_json::from_str(
            r#"{ "scope": { "$ref": "#/properties/a" }, "label": false }"#,
        )
        .unwrap();
        assert_eq!(hidden.label, Some(LabelSpec::Visible(false)));

        let named: ControlElement = serde_json::from_str(
            r#"{ "scope": { "$ref": "#/properties/a" }, "label": "Pets" }"#,
        )
        .unwrap();
        assert_eq!(named.label, Some(LabelSpec::Text("Pets".to_string())));

        let descriptor: ControlElement = serde_json::from_str(
            r#"{ "scope": { "$ref": "#/properties/a" }, "label": { "show": true } }"#,
        )
        .unwrap();
        assert_eq!(
            descriptor.label,
            Some(LabelSpec::Descriptor {
                show: Some(true),
                text: None
            })
        );
    }

    #[test]
    fn test_deserialize_layout() {
        let json = r#"{
            "type": "VerticalLayout",
            "elements": [
                { "type": "Control", "scope": { "$ref": "#/properties/a" } },
                { "type": "Control", "scope": { "$ref": "#/properties/b" } }
            ]
        }"#;

        let uischema: UiSchema = serde_json::from_str(json).unwrap();
        assert_eq!(uischema.type_tag(), "VerticalLayout");
        assert!(uischema.as_control().is_none());

        match uischema {
            UiSchema::VerticalLayout(layout) => assert_eq!(layout.elements.len(), 2),
            _ => panic!("expected a vertical layout"),
        }
    }

    #[test]
    fn test_generate_default_uischema() {
        let schema: JsonSchema = serde_json::from_str(
            r#"{
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "pets": { "type": "array" }
                }
            }"#,
        )
        .unwrap();

        match generate_default_uischema(&schema) {
            UiSchema::VerticalLayout(layout) => {
                assert_eq!(layout.elements.len(), 2);
                let scopes: Vec<&str> = layout
                    .elements
                    .iter()
                    .filter_map(|e| e.as_control())
                    .map(|c| c.scope.reference.as_str())
                    .collect();
                assert_eq!(scopes, vec!["#/properties/name", "#/properties/pets"]);
            }
            other => panic!("expected a layout, got {}", other.type_tag()),
        }
    }

    #[test]
    fn test_generate_default_uischema_single_property() {
        let schema: JsonSchema = serde_json::from_str(
            r#"{ "type": "object", "properties": { "pets": { "type": "array" } } }"#,
        )
        .unwrap();

        let uischema = generate_default_uischema(&schema);
        let control = uischema.as_control().expect("expected a bare control");
        assert_eq!(control.scope.reference, "#/properties/pets");
    }
}
