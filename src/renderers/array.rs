//! Array-of-object control renderer.
//!
//! Renders one sub-form per array element plus an affordance to append a
//! fresh element. The highest-priority renderer for `Control` elements
//! whose resolved schema is a non-tuple array of objects.
//!
//! Every accepted change notification rebuilds the whole subtree from the
//! value currently held by the data service; the add-item action instead
//! appends a single sub-form in place before writing back, so the UI
//! reflects the new element without waiting for the round-trip.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::warn;

use crate::core::data_service::{DataChange, DataChangeListener, DataService, ListenerRef};
use crate::core::styling::StylingRegistry;
use crate::core::testers::{and, rank_with, schema_matches, ui_type_is, RankedTester};
use crate::schema::label::get_element_label_object;
use crate::schema::model::{Items, JsonSchema, SchemaType};
use crate::schema::path::resolve_schema;
use crate::schema::uischema::ControlElement;

use super::form::SubFormRenderer;
use super::registry::{RendererContext, RendererHandle, RendererRegistry};
use super::tree::{Action, NodeKind, ViewNode};
use super::Renderer;

/// Tester for the array control: rank 2 for `Control` elements whose
/// resolved schema is a non-empty array of objects. Tuple-typed `items`
/// and arrays of primitives are rejected.
pub fn array_tester() -> RankedTester {
    rank_with(
        2,
        and(vec![
            ui_type_is("Control"),
            schema_matches(|schema| {
                !schema.is_empty()
                    && schema.is_type(SchemaType::Array)
                    && matches!(
                        schema.items.as_ref(),
                        Some(Items::Single(items)) if items.is_type(SchemaType::Object)
                    )
            }),
        ]),
    )
}

/// Register the array renderer.
pub fn register(registry: &mut RendererRegistry) {
    registry.register(
        array_tester(),
        Box::new(|uischema, context| {
            let control = uischema.as_control()?.clone();
            Some(ArrayControlView::handle(control, context))
        }),
    );
}

/// Stateful view for one array control.
pub struct ArrayControlView {
    control: ControlElement,
    schema: Rc<JsonSchema>,
    service: Rc<DataService>,
    styling: Rc<StylingRegistry>,
    sub_form: Rc<dyn SubFormRenderer>,
    root: ViewNode,
    /// Array value as read at the last render. The add handler mutates
    /// this copy and writes it back through the service; it is never the
    /// source of truth for rendering.
    items: Option<Vec<Value>>,
}

impl ArrayControlView {
    /// Construct the shared view cell.
    pub fn new(control: ControlElement, context: &RendererContext) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            control,
            schema: context.schema.clone(),
            service: context.service.clone(),
            styling: context.styling.clone(),
            sub_form: context.sub_form.clone(),
            root: ViewNode::new(NodeKind::Control),
            items: None,
        }))
    }

    /// Construct the view and wrap it in a handle that subscribes it to
    /// data changes on attach.
    pub fn handle(control: ControlElement, context: &RendererContext) -> RendererHandle {
        let view = Self::new(control, context);
        let listener: ListenerRef = view.clone();
        RendererHandle::new(view, Some(listener), context.service.clone())
    }

    fn item_schema(&self) -> Option<&JsonSchema> {
        let reference = format!("{}/items", self.control.scope.reference);
        resolve_schema(&self.schema, &reference)
    }

    /// Append one rendered sub-form for `element` to the existing content
    /// region, without rebuilding the rest of the subtree.
    fn append_rendered_item(&mut self, element: &Value) {
        let node = match self.item_schema() {
            Some(item_schema) => self.sub_form.build(element, item_schema),
            None => {
                warn!(scope = %self.control.scope.reference, "item schema did not resolve");
                return;
            }
        };
        if let Some(group) = self.root.children.last_mut() {
            if let Some(content) = group.child_of_kind_mut(NodeKind::Content) {
                content.push(node);
            }
        }
    }
}

impl Renderer for ArrayControlView {
    /// Full rebuild from the value currently held by the data service.
    /// Repeated calls converge to the same structure for the same data.
    fn render(&mut self) {
        self.root.ensure_class("control");
        self.root.remove_last_child();

        let label_object = get_element_label_object(&self.schema, &self.control);

        let mut caption = ViewNode::new(NodeKind::Caption);
        let mut label = ViewNode::new(NodeKind::Label);
        if label_object.show {
            label.text = Some(label_object.text.clone());
        }
        caption.push(label);

        let array_data = match self.service.get_value(&self.control) {
            Some(Value::Array(elements)) => Some(elements),
            Some(_) => {
                warn!(scope = %self.control.scope.reference, "expected an array value");
                None
            }
            None => None,
        };

        let mut content = ViewNode::new(NodeKind::Content).with_class("children");
        if let Some(elements) = &array_data {
            match self.item_schema() {
                Some(item_schema) => {
                    for element in elements {
                        content.push(self.sub_form.build(element, item_schema));
                    }
                }
                None => {
                    warn!(scope = %self.control.scope.reference, "item schema did not resolve")
                }
            }
        }

        caption.push(
            ViewNode::new(NodeKind::Button)
                .with_class(self.styling.get_as_class_name("button"))
                .with_text(format!("Add to {}", label_object.text))
                .with_action(Action::AddItem),
        );

        let mut group = ViewNode::new(NodeKind::Group).with_class("array-layout");
        group.push(caption);
        group.push(content);
        self.root.push(group);

        self.items = array_data;
    }

    fn root(&self) -> &ViewNode {
        &self.root
    }

    /// The add-item handler: lazily initialise an absent value, append a
    /// fresh empty record, show it immediately, and hand the mutated
    /// sequence back for the single write-back through the data service.
    fn activate(&mut self, action: Action) -> Option<DataChange> {
        match action {
            Action::AddItem => {
                let mut elements = self.items.take().unwrap_or_default();
                let element = Value::Object(Map::new());
                elements.push(element.clone());
                self.append_rendered_item(&element);
                self.items = Some(elements.clone());
                Some(DataChange {
                    control: self.control.clone(),
                    value: Value::Array(elements),
                })
            }
        }
    }

    fn dispose(&mut self) {
        self.root = ViewNode::new(NodeKind::Control);
        self.items = None;
    }
}

impl DataChangeListener for ArrayControlView {
    /// Exact scope match; a notification without an originating control
    /// is always rejected.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::form::ObjectForm;
    use crate::schema::uischema::{LabelSpec, Layout, ScopeRef, UiSchema};
    use serde_json::json;

    fn pets_schema() -> JsonSchema {
        serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "pets": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "name": { "type": "string" } }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn context(data: Value) -> RendererContext {
        RendererContext {
            schema: Rc::new(pets_schema()),
            service: DataService::new(data),
            styling: Rc::new(StylingRegistry::default()),
            sub_form: Rc::new(ObjectForm),
        }
    }

    fn pets_control() -> ControlElement {
        ControlElement::with_scope("#/properties/pets")
    }

    fn array_schema(json: serde_json::Value) -> JsonSchema {
        serde_json::from_value(json).unwrap()
    }

    fn form_count(handle: &RendererHandle) -> usize {
        handle.with_root(|root| root.descendants_of_kind(NodeKind::Form).len())
    }

    // -- tester ----------------------------------------------------------

    #[test]
    fn test_tester_accepts_object_arrays() {
        let tester = array_tester();
        let uischema = UiSchema::Control(pets_control());
        let schema = array_schema(json!({
            "type": "array",
            "items": { "type": "object", "properties": { "name": { "type": "string" } } }
        }));
        assert_eq!(tester(&uischema, &schema), Some(2));
    }

    #[test]
    fn test_tester_rejects_missing_items() {
        let tester = array_tester();
        let uischema = UiSchema::Control(pets_control());
        assert_eq!(tester(&uischema, &array_schema(json!({ "type": "array" }))), None);
    }

    #[test]
    fn test_tester_rejects_tuple_items() {
        let tester = array_tester();
        let uischema = UiSchema::Control(pets_control());
        let schema = array_schema(json!({
            "type": "array",
            "items": [ { "type": "object" }, { "type": "object" } ]
        }));
        assert_eq!(tester(&uischema, &schema), None);
    }

    #[test]
    fn test_tester_rejects_primitive_items() {
        let tester = array_tester();
        let uischema = UiSchema::Control(pets_control());
        let schema = array_schema(json!({ "type": "array", "items": { "type": "string" } }));
        assert_eq!(tester(&uischema, &schema), None);
    }

    #[test]
    fn test_tester_rejects_non_control_elements() {
        let tester = array_tester();
        let uischema = UiSchema::VerticalLayout(Layout::default());
        let schema = array_schema(json!({
            "type": "array",
            "items": { "type": "object", "properties": { "name": { "type": "string" } } }
        }));
        assert_eq!(tester(&uischema, &schema), None);
    }

    #[test]
    fn test_tester_rejects_empty_and_non_array_schemas() {
        let tester = array_tester();
        let uischema = UiSchema::Control(pets_control());
        assert_eq!(tester(&uischema, &JsonSchema::default()), None);
        assert_eq!(tester(&uischema, &array_schema(json!({ "type": "object" }))), None);
    }

    // -- rendering -------------------------------------------------------

    #[test]
    fn test_render_count_matches_value_length() {
        let ctx = context(json!({ "pets": [{ "name": "Rex" }, { "name": "Ada" }, {}] }));
        let handle = ArrayControlView::handle(pets_control(), &ctx);
        handle.attach();
        assert_eq!(form_count(&handle), 3);
    }

    #[test]
    fn test_render_treats_absent_value_as_empty() {
        let ctx = context(json!({}));
        let handle = ArrayControlView::handle(pets_control(), &ctx);
        handle.attach();
        assert_eq!(form_count(&handle), 0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let ctx = context(json!({ "pets": [{}, {}] }));
        let view = ArrayControlView::new(pets_control(), &ctx);

        view.borrow_mut().render();
        view.borrow_mut().render();

        let view = view.borrow();
        assert_eq!(view.root().children.len(), 1);
        assert_eq!(view.root().descendants_of_kind(NodeKind::Form).len(), 2);
    }

    #[test]
    fn test_label_shown_and_button_caption() {
        let ctx = context(json!({}));
        let handle = ArrayControlView::handle(pets_control(), &ctx);
        handle.attach();

        handle.with_root(|root| {
            let labels = root.descendants_of_kind(NodeKind::Label);
            assert_eq!(labels[0].text.as_deref(), Some("Pets"));

            let buttons = root.descendants_of_kind(NodeKind::Button);
            assert_eq!(buttons[0].text.as_deref(), Some("Add to Pets"));
            assert_eq!(buttons[0].action, Some(Action::AddItem));
            assert_eq!(buttons[0].classes, vec!["button"]);
        });
    }

    #[test]
    fn test_hidden_label_still_names_the_button() {
        let ctx = context(json!({}));
        let control = ControlElement {
            scope: ScopeRef::new("#/properties/pets"),
            label: Some(LabelSpec::Visible(false)),
        };
        let handle = ArrayControlView::handle(control, &ctx);
        handle.attach();

        handle.with_root(|root| {
            let labels = root.descendants_of_kind(NodeKind::Label);
            assert_eq!(labels[0].text, None);

            let buttons = root.descendants_of_kind(NodeKind::Button);
            assert_eq!(buttons[0].text.as_deref(), Some("Add to Pets"));
        });
    }

    // -- notification filter ---------------------------------------------

    #[test]
    fn test_notification_filter() {
        let ctx = context(json!({}));
        let view = ArrayControlView::new(pets_control(), &ctx);
        let view = view.borrow();

        assert!(!view.needs_notification_about(None));
        assert!(!view.needs_notification_about(Some(&ControlElement::with_scope(
            "#/properties/other"
        ))));
        assert!(view.needs_notification_about(Some(&pets_control())));
    }

    // -- add-item flow ---------------------------------------------------

    #[test]
    fn test_add_item_initialises_absent_value() {
        let ctx = context(json!({}));
        let handle = ArrayControlView::handle(pets_control(), &ctx);
        handle.attach();

        handle.activate(Action::AddItem);
        assert_eq!(ctx.service.get_value(&pets_control()), Some(json!([{}])));
        assert_eq!(form_count(&handle), 1);

        handle.activate(Action::AddItem);
        assert_eq!(ctx.service.get_value(&pets_control()), Some(json!([{}, {}])));
        assert_eq!(form_count(&handle), 2);
    }

    #[test]
    fn test_add_item_appends_to_existing_value() {
        let ctx = context(json!({ "pets": [{ "name": "Rex" }] }));
        let handle = ArrayControlView::handle(pets_control(), &ctx);
        handle.attach();

        handle.activate(Action::AddItem);
        assert_eq!(
            ctx.service.get_value(&pets_control()),
            Some(json!([{ "name": "Rex" }, {}]))
        );
        assert_eq!(form_count(&handle), 2);
    }

    #[test]
    fn test_incremental_append_and_full_rebuild_agree() {
        let ctx = context(json!({ "pets": [{}] }));
        let view = ArrayControlView::new(pets_control(), &ctx);
        let listener: ListenerRef = view.clone();
        RendererHandle::new(view.clone(), Some(listener), ctx.service.clone()).attach();

        // Run the handler without committing: only the incremental path.
        let pending = view.borrow_mut().activate(Action::AddItem).unwrap();
        let incremental = view.borrow().root().clone();
        assert_eq!(incremental.children.len(), 1);
        assert_eq!(incremental.descendants_of_kind(NodeKind::Form).len(), 2);

        // Commit the write-back; the fan-out triggers the full rebuild.
        ctx.service
            .notify_about_data_change(&pending.control, pending.value);
        let rebuilt = view.borrow().root().clone();
        assert_eq!(rebuilt, incremental);
    }

    // -- lifecycle -------------------------------------------------------

    #[test]
    fn test_attach_detach_symmetry() {
        let ctx = context(json!({}));
        let handle = ArrayControlView::handle(pets_control(), &ctx);

        for _ in 0..3 {
            handle.attach();
            assert_eq!(ctx.service.listener_count(), 1);
            handle.detach();
            assert_eq!(ctx.service.listener_count(), 0);
        }

        // Double attach must not double-register.
        handle.attach();
        handle.attach();
        assert_eq!(ctx.service.listener_count(), 1);
        handle.detach();
        assert_eq!(ctx.service.listener_count(), 0);
    }

    #[test]
    fn test_detached_view_misses_later_changes() {
        let ctx = context(json!({ "pets": [] }));
        let handle = ArrayControlView::handle(pets_control(), &ctx);
        handle.attach();
        handle.detach();

        ctx.service
            .notify_about_data_change(&pets_control(), json!([{}, {}]));
        assert_eq!(form_count(&handle), 0);
    }
}
