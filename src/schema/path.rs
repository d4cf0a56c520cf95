//! Scope reference resolution.
//!
//! Scope references look like `#/properties/pets` and address a fragment
//! of the schema tree. The same reference, stripped of its bookkeeping
//! segments, addresses the bound value in the data tree.

use super::model::{Items, JsonSchema};

/// Resolve a scope reference against a root schema.
///
/// Follows `properties` and `items` segments; a bare segment is treated as
/// a property name. Returns `None` when any segment cannot be followed.
/// Tuple-typed `items` are never traversed.
pub fn resolve_schema<'a>(root: &'a JsonSchema, reference: &str) -> Option<&'a JsonSchema> {
    let mut current = root;
    let mut segments = reference.split('/').filter(|s| !s.is_empty() && *s != "#");

    while let Some(segment) = segments.next() {
        current = match segment {
            "properties" => current.properties.get(segments.next()?)?,
            "items" => match current.items.as_ref()? {
                Items::Single(schema) => schema,
                Items::Tuple(_) => return None,
            },
            name => current.properties.get(name)?,
        };
    }
    Some(current)
}

/// Convert a scope reference into the path of the bound value in the data
/// tree: `#/properties/pets` binds to `data["pets"]`.
pub fn to_data_path(reference: &str) -> Vec<String> {
    reference
        .split('/')
        .filter(|s| !s.is_empty() && *s != "#" && *s != "properties")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::SchemaType;

    fn sample_schema() -> JsonSchema {
        serde_json::from_str(
            r#"{
                "type": "object",
                "properties": {
                    "pets": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": { "name": { "type": "string" } }
                        }
                    },
                    "tags": {
                        "type": "array",
                        "items": [ { "type": "string" }, { "type": "number" } ]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_property() {
        let schema = sample_schema();
        let pets = resolve_schema(&schema, "#/properties/pets").unwrap();
        assert!(pets.is_type(SchemaType::Array));
    }

    #[test]
    fn test_resolve_items() {
        let schema = sample_schema();
        let item = resolve_schema(&schema, "#/properties/pets/items").unwrap();
        assert!(item.is_type(SchemaType::Object));

        let name = resolve_schema(&schema, "#/properties/pets/items/properties/name").unwrap();
        assert!(name.is_type(SchemaType::String));
    }

    #[test]
    fn test_resolve_bare_segment() {
        let schema = sample_schema();
        let item = resolve_schema(&schema, "#/pets/items").unwrap();
        assert!(item.is_type(SchemaType::Object));
    }

    #[test]
    fn test_resolve_rejects_tuples_and_unknowns() {
        let schema = sample_schema();
        assert!(resolve_schema(&schema, "#/properties/tags/items").is_none());
        assert!(resolve_schema(&schema, "#/properties/missing").is_none());
        assert!(resolve_schema(&schema, "#/properties/pets/properties/name").is_none());
    }

    #[test]
    fn test_resolve_empty_reference_is_root() {
        let schema = sample_schema();
        let resolved = resolve_schema(&schema, "#").unwrap();
        assert_eq!(resolved, &schema);
    }

    #[test]
    fn test_to_data_path() {
        assert_eq!(to_data_path("#/properties/pets"), vec!["pets"]);
        assert_eq!(to_data_path("#/foo"), vec!["foo"]);
        assert_eq!(
            to_data_path("#/properties/address/properties/city"),
            vec!["address", "city"]
        );
        assert!(to_data_path("#").is_empty());
    }
}
