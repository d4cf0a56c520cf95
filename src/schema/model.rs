//! JSON Schema data model.
//!
//! A deliberately small subset of JSON Schema: enough to describe objects,
//! arrays and primitive leaves for form rendering. The `items` field is
//! parsed once into the tagged [`Items`] variant, so downstream code never
//! has to shape-sniff between "one schema" and "tuple of schemas".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The `type` tag of a schema fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

/// The `items` field of an array schema.
///
/// JSON Schema allows either a single schema (homogeneous list) or a
/// sequence of schemas (tuple). Tuples are modelled so they can be
/// rejected explicitly rather than misrendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// One schema describing every element.
    Single(Box<JsonSchema>),
    /// Positional schemas, one per element.
    Tuple(Vec<JsonSchema>),
}

/// A schema fragment.
///
/// All fields are optional; an absent document deserializes to
/// [`JsonSchema::default`], which [`JsonSchema::is_empty`] reports as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonSchema {
    /// The `type` tag, if declared.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    /// Human-readable title, preferred over derived labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named sub-schemas of an object schema.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, JsonSchema>,

    /// Element schema(s) of an array schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    /// Property names an object value must carry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl JsonSchema {
    /// True when no field of the fragment is set.
    pub fn is_empty(&self) -> bool {
        self.schema_type.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.properties.is_empty()
            && self.items.is_none()
            && self.required.is_empty()
    }

    /// True when the `type` tag equals `t`.
    pub fn is_type(&self, t: SchemaType) -> bool {
        self.schema_type == Some(t)
    }
}
