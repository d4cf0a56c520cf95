//! # schemaform
//!
//! A schema-driven TUI and library for rendering JSON documents as
//! editable forms.
//!
//! Given a JSON Schema, an optional UI schema and a document, the crate
//! selects a renderer per control, renders the bound values and writes
//! user edits back through a shared data service.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│ renderers │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (shell) │    │(view trees)    │(painting)    │         │ │
//! │  └────┬────┘    └─────┬─────┘    └─────────┘    └─────────┘ │
//! │       │               │                                      │
//! │       ▼               ▼                                      │
//! │  ┌─────────┐    ┌───────────┐                                │
//! │  │ schema  │    │   core    │◀── DataService | testers      │
//! │  │ (models)│    │ (services)│                                │
//! │  └─────────┘    └───────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`schema`]**: JSON Schema and UI schema models, scope resolution
//!   and label derivation
//! - **[`core`]**: the data service (document ownership and change
//!   fan-out), applicability testers and the styling registry
//! - **[`renderers`]**: the renderer registry and the built-in renderers;
//!   each renderer owns a retained view tree rebuilt from current data
//! - **[`ui`]**: ratatui painting of view trees, themes and chrome
//! - **[`app`]** / **[`events`]**: the interactive shell
//!
//! ## The array control
//!
//! The flagship renderer edits array-of-object values: one sub-form per
//! element plus an append button. It subscribes to the data service while
//! attached and fully rebuilds its subtree whenever the value at its
//! scope changes.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Render a form for a schema, editing document.json in place
//! schemaform --schema schema.json --data document.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::rc::Rc;
//! use schemaform::core::data_service::DataService;
//! use schemaform::core::styling::StylingRegistry;
//! use schemaform::renderers::form::ObjectForm;
//! use schemaform::renderers::registry::{default_registry, RendererContext};
//! use schemaform::schema::model::JsonSchema;
//! use schemaform::schema::uischema::{ControlElement, UiSchema};
//! use serde_json::json;
//!
//! let schema: JsonSchema = serde_json::from_value(json!({
//!     "type": "object",
//!     "properties": {
//!         "pets": {
//!             "type": "array",
//!             "items": { "type": "object", "properties": { "name": { "type": "string" } } }
//!         }
//!     }
//! })).unwrap();
//!
//! let context = RendererContext {
//!     schema: Rc::new(schema),
//!     service: DataService::new(json!({ "pets": [{ "name": "Rex" }] })),
//!     styling: Rc::new(StylingRegistry::default()),
//!     sub_form: Rc::new(ObjectForm),
//! };
//!
//! let uischema = UiSchema::Control(ControlElement::with_scope("#/properties/pets"));
//! let handle = default_registry().best_renderer(&uischema, &context).unwrap();
//! handle.attach();
//! assert_eq!(handle.with_root(|root| root.children.len()), 1);
//! handle.detach();
//! ```

pub mod app;
pub mod core;
pub mod events;
pub mod renderers;
pub mod schema;
pub mod ui;

// Re-export main types for convenience
pub use crate::core::data_service::{DataChange, DataChangeListener, DataService};
pub use crate::core::styling::StylingRegistry;
pub use crate::core::testers::{RankedTester, Tester};
pub use app::App;
pub use renderers::{
    default_registry, Action, ArrayControlView, FieldControlView, NodeKind, ObjectForm, Renderer,
    RendererContext, RendererHandle, RendererRegistry, SubFormRenderer, ViewNode,
};
pub use schema::{
    generate_default_uischema, ControlElement, Items, JsonSchema, LabelObject, SchemaType,
    ScopeRef, UiSchema,
};
pub use ui::Theme;
