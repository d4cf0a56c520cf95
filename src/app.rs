//! Application state: renderer handles, focus and user feedback.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use serde_json::Value;
use tracing::warn;

use crate::core::data_service::DataService;
use crate::core::styling::StylingRegistry;
use crate::renderers::form::ObjectForm;
use crate::renderers::registry::{
    default_registry, RendererContext, RendererHandle, RendererRegistry,
};
use crate::renderers::tree::{Action, NodeKind};
use crate::schema::model::JsonSchema;
use crate::schema::uischema::UiSchema;
use crate::ui::Theme;

/// Main application state.
///
/// Owns the data service, one renderer handle per control of the UI
/// schema, and the focus/feedback state of the shell. Renderer selection
/// and layout walking happen once, at construction; afterwards the
/// renderers keep themselves current through the data service's
/// notifications.
pub struct App {
    pub running: bool,
    pub show_help: bool,

    service: Rc<DataService>,
    handles: Vec<RendererHandle>,

    /// Index into [`App::actions`] of the focused button.
    pub focused_button: usize,

    /// Where `w` writes the document, when given.
    pub document_path: Option<PathBuf>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create an App for one document: build the default registry, select
    /// a renderer per control and attach all of them.
    pub fn new(schema: JsonSchema, uischema: &UiSchema, data: Value, theme: Theme) -> Result<Self> {
        let registry = default_registry();
        let service = DataService::new(data);
        let context = RendererContext {
            schema: Rc::new(schema),
            service: service.clone(),
            styling: Rc::new(StylingRegistry::default()),
            sub_form: Rc::new(ObjectForm),
        };

        let mut handles = Vec::new();
        collect_handles(&registry, uischema, &context, &mut handles);
        if handles.is_empty() {
            anyhow::bail!("no applicable renderer for any control in the UI schema");
        }
        for handle in &handles {
            handle.attach();
        }

        Ok(Self {
            running: true,
            show_help: false,
            service,
            handles,
            focused_button: 0,
            document_path: None,
            theme,
            status_message: None,
        })
    }

    /// The attached renderer handles, in display order.
    pub fn handles(&self) -> &[RendererHandle] {
        &self.handles
    }

    /// The document owner.
    pub fn service(&self) -> &Rc<DataService> {
        &self.service
    }

    /// Returns a description of the document being edited.
    pub fn source_description(&self) -> String {
        match &self.document_path {
            Some(path) => path.display().to_string(),
            None => "(unsaved document)".to_string(),
        }
    }

    /// All activatable buttons as (handle index, action) pairs, in paint
    /// order.
    pub fn actions(&self) -> Vec<(usize, Action)> {
        let mut actions = Vec::new();
        for (index, handle) in self.handles.iter().enumerate() {
            handle.with_root(|root| {
                for button in root.descendants_of_kind(NodeKind::Button) {
                    if let Some(action) = button.action {
                        actions.push((index, action));
                    }
                }
            });
        }
        actions
    }

    /// Index of the focused button, `None` when there is nothing to
    /// focus.
    pub fn focused_action_index(&self) -> Option<usize> {
        let count = self.actions().len();
        (count > 0).then(|| self.focused_button.min(count - 1))
    }

    /// Move focus to the next button, wrapping around.
    pub fn focus_next(&mut self) {
        let count = self.actions().len();
        if count > 0 {
            self.focused_button = (self.focused_button + 1) % count;
        }
    }

    /// Move focus to the previous button, wrapping around.
    pub fn focus_prev(&mut self) {
        let count = self.actions().len();
        if count > 0 {
            self.focused_button = (self.focused_button + count - 1) % count;
        }
    }

    /// Dispatch the focused button's action to its renderer.
    pub fn activate_focused(&mut self) {
        let Some(index) = self.focused_action_index() else {
            return;
        };
        let (handle_index, action) = self.actions()[index];
        self.handles[handle_index].activate(action);
        match action {
            Action::AddItem => self.set_status_message("Item added".to_string()),
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Write the current document to a file as pretty-printed JSON.
    pub fn save_document(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        let json = serde_json::to_string_pretty(&self.service.root())?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

impl Drop for App {
    /// Detach every renderer so no listener registration outlives its
    /// view.
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.detach();
        }
    }
}

/// Walk a UI schema, creating one renderer handle per control. Layouts
/// are composition only; their elements are walked in order.
fn collect_handles(
    registry: &RendererRegistry,
    uischema: &UiSchema,
    context: &RendererContext,
    handles: &mut Vec<RendererHandle>,
) {
    match uischema {
        UiSchema::Control(_) => match registry.best_renderer(uischema, context) {
            Some(handle) => handles.push(handle),
            None => warn!(tag = uischema.type_tag(), "no applicable renderer"),
        },
        UiSchema::VerticalLayout(layout) | UiSchema::HorizontalLayout(layout) => {
            for element in &layout.elements {
                collect_handles(registry, element, context, handles);
            }
        }
    }
}
