//! Renderer registration and selection.
//!
//! A plain list of (ranked tester, factory) pairs populated at startup.
//! The host asks for the best renderer for a uischema element; every
//! tester is evaluated against the schema resolved at the element's
//! scope, and the highest-ranked applicable registration wins, first
//! registration breaking ties.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::data_service::{DataService, ListenerRef};
use crate::core::styling::StylingRegistry;
use crate::core::testers::RankedTester;
use crate::schema::model::JsonSchema;
use crate::schema::path::resolve_schema;
use crate::schema::uischema::UiSchema;

use super::form::SubFormRenderer;
use super::tree::{Action, ViewNode};
use super::Renderer;

/// Everything a factory needs to construct a renderer.
#[derive(Clone)]
pub struct RendererContext {
    /// Root schema the uischema's scopes resolve against.
    pub schema: Rc<JsonSchema>,
    /// Document owner.
    pub service: Rc<DataService>,
    /// Style token mapping injected into views.
    pub styling: Rc<StylingRegistry>,
    /// Builder for nested sub-forms.
    pub sub_form: Rc<dyn SubFormRenderer>,
}

/// Constructor for an instantiated renderer.
pub type RendererFactory = Box<dyn Fn(&UiSchema, &RendererContext) -> Option<RendererHandle>>;

/// An instantiated renderer: the shared view cell, its listener identity
/// and the service it writes through.
///
/// `attach`/`detach` are the scoped acquire/release pair: attach
/// registers the listener and performs the initial render; detach
/// deregisters first, then drops view state. Detach must run before the
/// handle is discarded, or the service would keep a listener alive past
/// its view.
pub struct RendererHandle {
    renderer: Rc<RefCell<dyn Renderer>>,
    listener: Option<ListenerRef>,
    service: Rc<DataService>,
}

impl RendererHandle {
    /// Wrap a concrete view cell. `listener` must alias the same cell
    /// whenever the view subscribes to data changes.
    pub fn new(
        renderer: Rc<RefCell<dyn Renderer>>,
        listener: Option<ListenerRef>,
        service: Rc<DataService>,
    ) -> Self {
        Self {
            renderer,
            listener,
            service,
        }
    }

    /// Enter the active state: subscribe, then render.
    pub fn attach(&self) {
        if let Some(listener) = &self.listener {
            self.service.register_data_change_listener(listener.clone());
        }
        self.renderer.borrow_mut().render();
    }

    /// Leave the active state: unsubscribe first, then drop view state.
    pub fn detach(&self) {
        if let Some(listener) = &self.listener {
            self.service.deregister_data_change_listener(listener);
        }
        self.renderer.borrow_mut().dispose();
    }

    /// Dispatch a user action, committing any resulting write-back.
    ///
    /// The view borrow is released before the commit, so the service may
    /// fan the change straight back into the same view for its rebuild.
    pub fn activate(&self, action: Action) {
        let change = self.renderer.borrow_mut().activate(action);
        if let Some(change) = change {
            self.service
                .notify_about_data_change(&change.control, change.value);
        }
    }

    /// Read access to the rendered subtree.
    pub fn with_root<R>(&self, read: impl FnOnce(&ViewNode) -> R) -> R {
        let renderer = self.renderer.borrow();
        read(renderer.root())
    }
}

struct Registration {
    tester: RankedTester,
    factory: RendererFactory,
}

/// Registry of renderer registrations.
#[derive(Default)]
pub struct RendererRegistry {
    registrations: Vec<Registration>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Add a registration. Later registrations lose rank ties.
    pub fn register(&mut self, tester: RankedTester, factory: RendererFactory) {
        self.registrations.push(Registration { tester, factory });
    }

    /// Rank of the best applicable registration for a uischema element,
    /// if any.
    pub fn best_rank(&self, uischema: &UiSchema, root_schema: &JsonSchema) -> Option<u8> {
        let resolved = resolved_schema(uischema, root_schema)?;
        self.best(uischema, resolved).map(|(rank, _)| rank)
    }

    /// Instantiate the highest-ranked applicable renderer.
    pub fn best_renderer(
        &self,
        uischema: &UiSchema,
        context: &RendererContext,
    ) -> Option<RendererHandle> {
        let Some(resolved) = resolved_schema(uischema, &context.schema) else {
            warn!(tag = uischema.type_tag(), "scope did not resolve against the schema");
            return None;
        };
        let (rank, registration) = self.best(uischema, resolved)?;
        debug!(rank, tag = uischema.type_tag(), "renderer selected");
        (registration.factory)(uischema, context)
    }

    fn best(&self, uischema: &UiSchema, resolved: &JsonSchema) -> Option<(u8, &Registration)> {
        let mut best: Option<(u8, &Registration)> = None;
        for registration in &self.registrations {
            if let Some(rank) = (registration.tester)(uischema, resolved) {
                if best.as_ref().is_none_or(|(top, _)| rank > *top) {
                    best = Some((rank, registration));
                }
            }
        }
        best
    }
}

/// The schema a tester sees: the fragment at a control's scope, or the
/// root for scopeless elements.
fn resolved_schema<'a>(uischema: &UiSchema, root: &'a JsonSchema) -> Option<&'a JsonSchema> {
    match uischema.as_control() {
        Some(control) => resolve_schema(root, &control.scope.reference),
        None => Some(root),
    }
}

/// Registry with the built-in renderers.
pub fn default_registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    super::array::register(&mut registry);
    super::field::register(&mut registry);
    registry
}
