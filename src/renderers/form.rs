//! Nested sub-form construction.
//!
//! The array control treats per-element rendering as an opaque
//! collaborator: anything implementing [`SubFormRenderer`] can build the
//! subtree for one `(data, schema)` fragment. [`ObjectForm`] is the
//! built-in implementation.

use serde_json::Value;

use crate::schema::label::start_case;
use crate::schema::model::{JsonSchema, SchemaType};

use super::tree::{NodeKind, ViewNode};

/// Builds the view subtree for one `(data, schema)` fragment.
pub trait SubFormRenderer {
    fn build(&self, data: &Value, schema: &JsonSchema) -> ViewNode;
}

/// Renders an object fragment as rows of "label: value" fields, recursing
/// into nested objects and summarising nested arrays by element count.
pub struct ObjectForm;

impl SubFormRenderer for ObjectForm {
    fn build(&self, data: &Value, schema: &JsonSchema) -> ViewNode {
        let mut form = ViewNode::new(NodeKind::Form);

        for (name, property) in &schema.properties {
            let value = data.get(name.as_str());
            let label = property
                .title
                .clone()
                .unwrap_or_else(|| start_case(name));

            if property.is_type(SchemaType::Object) {
                let mut nested = self.build(value.unwrap_or(&Value::Null), property);
                nested.text = Some(label);
                form.push(nested);
            } else if property.is_type(SchemaType::Array) {
                let count = value.and_then(Value::as_array).map_or(0, Vec::len);
                form.push(
                    ViewNode::new(NodeKind::Field)
                        .with_text(format!("{label}: {count} items")),
                );
            } else {
                form.push(
                    ViewNode::new(NodeKind::Field)
                        .with_text(format!("{label}: {}", display_value(value))),
                );
            }
        }

        // Schemas without declared properties still get one row, so an
        // element is never rendered as nothing at all.
        if schema.properties.is_empty() {
            form.push(ViewNode::new(NodeKind::Field).with_text(display_value(Some(data))));
        }
        form
    }
}

/// Format a leaf value for display. Absent and null values render empty.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pet_schema() -> JsonSchema {
        serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer" },
                "vet": {
                    "type": "object",
                    "properties": { "city": { "type": "string" } }
                },
                "vaccinations": { "type": "array", "items": { "type": "string" } }
            }
        }))
        .unwrap()
    }

    fn field_texts(node: &ViewNode) -> Vec<String> {
        node.descendants_of_kind(NodeKind::Field)
            .iter()
            .filter_map(|field| field.text.clone())
            .collect()
    }

    #[test]
    fn test_build_renders_one_field_per_property() {
        let form = ObjectForm.build(
            &json!({ "name": "Rex", "age": 3, "vaccinations": ["rabies"] }),
            &pet_schema(),
        );

        let texts = field_texts(&form);
        assert!(texts.contains(&"Name: Rex".to_string()));
        assert!(texts.contains(&"Age: 3".to_string()));
        assert!(texts.contains(&"Vaccinations: 1 items".to_string()));
    }

    #[test]
    fn test_build_recurses_into_objects() {
        let form = ObjectForm.build(&json!({ "vet": { "city": "Lisbon" } }), &pet_schema());

        let nested = form.child_of_kind(NodeKind::Form).unwrap();
        assert_eq!(nested.text.as_deref(), Some("Vet"));
        assert!(field_texts(nested).contains(&"City: Lisbon".to_string()));
    }

    #[test]
    fn test_build_blanks_missing_values() {
        let form = ObjectForm.build(&json!({}), &pet_schema());
        let texts = field_texts(&form);
        assert!(texts.contains(&"Name: ".to_string()));
        assert!(texts.contains(&"Vaccinations: 0 items".to_string()));
    }

    #[test]
    fn test_build_without_properties_shows_raw_value() {
        let form = ObjectForm.build(&json!("plain"), &JsonSchema::default());
        assert_eq!(field_texts(&form), vec!["plain"]);
    }
}
