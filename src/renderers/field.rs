//! Fallback leaf control renderer.
//!
//! Renders any `Control` with a resolvable schema as a single captioned
//! field row. Lowest-ranked renderer; more specific renderers (arrays)
//! outrank it.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::core::data_service::{DataChangeListener, DataService, ListenerRef};
use crate::core::testers::{and, rank_with, schema_matches, ui_type_is, RankedTester};
use crate::schema::label::get_element_label_object;
use crate::schema::model::JsonSchema;
use crate::schema::uischema::ControlElement;

use super::form::display_value;
use super::registry::{RendererContext, RendererHandle, RendererRegistry};
use super::tree::{NodeKind, ViewNode};
use super::Renderer;

/// Tester for the fallback control: rank 1 for any `Control` whose
/// resolved schema is non-empty.
pub fn field_tester() -> RankedTester {
    rank_with(
        1,
        and(vec![
            ui_type_is("Control"),
            schema_matches(|schema| !schema.is_empty()),
        ]),
    )
}

/// Register the fallback control renderer.
pub fn register(registry: &mut RendererRegistry) {
    registry.register(
        field_tester(),
        Box::new(|uischema, context| {
            let control = uischema.as_control()?.clone();
            Some(FieldControlView::handle(control, context))
        }),
    );
}

/// Read-only view of a single leaf value.
pub struct FieldControlView {
    control: ControlElement,
    schema: Rc<JsonSchema>,
    service: Rc<DataService>,
    root: ViewNode,
}

impl FieldControlView {
    pub fn new(control: ControlElement, context: &RendererContext) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            control,
            schema: context.schema.clone(),
            service: context.service.clone(),
            root: ViewNode::new(NodeKind::Control),
        }))
    }

    pub fn handle(control: ControlElement, context: &RendererContext) -> RendererHandle {
        let view = Self::new(control, context);
        let listener: ListenerRef = view.clone();
        RendererHandle::new(view, Some(listener), context.service.clone())
    }
}

impl Renderer for FieldControlView {
    fn render(&mut self) {
        self.root.ensure_class("control");
        self.root.remove_last_child();

        let label_object = get_element_label_object(&self.schema, &self.control);
        let value = self.service.get_value(&self.control);

        let mut field = ViewNode::new(NodeKind::Field);
        field.text = Some(if label_object.show {
            format!("{}: {}", label_object.text, display_value(value.as_ref()))
        } else {
            display_value(value.as_ref())
        });
        self.root.push(field);
    }

    fn root(&self) -> &ViewNode {
        &self.root
    }

    fn dispose(&mut self) {
        self.root = ViewNode::new(NodeKind::Control);
    }
}

impl DataChangeListener for FieldControlView {
    fn needs_notification_about(&self, control: Option<&ControlElement>) -> bool {
        match control {
            None => false,
            Some(control) => self.control.scope.reference == control.scope.reference,
        }
    }

    fn data_changed(&mut self, _control: &ControlElement, _new_value: &Value) {
        self.render();
    }
}
