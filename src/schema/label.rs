//! Control label derivation.
//!
//! Captions come from the control's explicit label when given, from the
//! resolved schema fragment's `title` when present, and otherwise from the
//! last segment of the scope reference, start-cased.

use super::model::JsonSchema;
use super::path::resolve_schema;
use super::uischema::{ControlElement, LabelSpec};

/// Whether and what caption to display for a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelObject {
    pub show: bool,
    pub text: String,
}

/// Derive the label for a control against its owning schema.
pub fn get_element_label_object(schema: &JsonSchema, control: &ControlElement) -> LabelObject {
    let derived = derive_label(schema, control);
    match &control.label {
        None => LabelObject {
            show: true,
            text: derived,
        },
        Some(LabelSpec::Visible(show)) => LabelObject {
            show: *show,
            text: derived,
        },
        Some(LabelSpec::Text(text)) => LabelObject {
            show: true,
            text: text.clone(),
        },
        Some(LabelSpec::Descriptor { show, text }) => LabelObject {
            show: show.unwrap_or(true),
            text: text.clone().unwrap_or(derived),
        },
    }
}

fn derive_label(schema: &JsonSchema, control: &ControlElement) -> String {
    if let Some(fragment) = resolve_schema(schema, &control.scope.reference) {
        if let Some(title) = &fragment.title {
            return title.clone();
        }
    }
    control
        .scope
        .reference
        .rsplit('/')
        .next()
        .map(start_case)
        .unwrap_or_default()
}

/// Start-case an identifier: `firstName` and `first_name` both become
/// `First Name`.
pub fn start_case(ident: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in ident.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && current.chars().last().is_some_and(char::is_lowercase) {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::uischema::ScopeRef;

    fn schema_with_title() -> JsonSchema {
        serde_json::from_str(
            r#"{
                "type": "object",
                "properties": {
                    "pets": { "type": "array", "title": "Companions" },
                    "firstName": { "type": "string" }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_label_derived_from_scope() {
        let schema = schema_with_title();
        let control = ControlElement::with_scope("#/properties/firstName");
        let label = get_element_label_object(&schema, &control);
        assert!(label.show);
        assert_eq!(label.text, "First Name");
    }

    #[test]
    fn test_label_prefers_schema_title() {
        let schema = schema_with_title();
        let control = ControlElement::with_scope("#/properties/pets");
        assert_eq!(get_element_label_object(&schema, &control).text, "Companions");
    }

    #[test]
    fn test_label_visibility_flag_keeps_derived_text() {
        let schema = schema_with_title();
        let control = ControlElement {
            scope: ScopeRef::new("#/properties/firstName"),
            label: Some(LabelSpec::Visible(false)),
        };
        let label = get_element_label_object(&schema, &control);
        assert!(!label.show);
        assert_eq!(label.text, "First Name");
    }

    #[test]
    fn test_label_explicit_text() {
        let schema = schema_with_title();
        let control = ControlElement {
            scope: ScopeRef::new("#/properties/pets"),
            label: Some(LabelSpec::Text("Pets".to_string())),
        };
        let label = get_element_label_object(&schema, &control);
        assert!(label.show);
        assert_eq!(label.text, "Pets");
    }

    #[test]
    fn test_label_descriptor_defaults() {
        let schema = schema_with_title();
        let control = ControlElement {
            scope: ScopeRef::new("#/properties/firstName"),
            label: Some(LabelSpec::Descriptor {
                show: None,
                text: Some("Given Name".to_string()),
            }),
        };
        let label = get_element_label_object(&schema, &control);
        assert!(label.show);
        assert_eq!(label.text, "Given Name");
    }

    #[test]
    fn test_start_case() {
        assert_eq!(start_case("firstName"), "First Name");
        assert_eq!(start_case("first_name"), "First Name");
        assert_eq!(start_case("pets"), "Pets");
        assert_eq!(start_case(""), "");
    }
}
