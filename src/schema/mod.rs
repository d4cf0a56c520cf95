//! Schema and UI schema models.
//!
//! Everything the renderers need to know about the shape of a document
//! and the declarative description of its form:
//!
//! - [`model`]: the JSON Schema subset ([`JsonSchema`], [`Items`])
//! - [`uischema`]: UI schema elements ([`UiSchema`], [`ControlElement`])
//! - [`path`]: scope reference resolution against schema and data trees
//! - [`label`]: caption derivation for controls

pub mod label;
pub mod model;
pub mod path;
pub mod uischema;

pub use label::{get_element_label_object, LabelObject};
pub use model::{Items, JsonSchema, SchemaType};
pub use path::{resolve_schema, to_data_path};
pub use uischema::{generate_default_uischema, ControlElement, LabelSpec, Layout, ScopeRef, UiSchema};
