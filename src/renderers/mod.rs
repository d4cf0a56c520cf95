//! Renderer selection and the built-in renderer set.
//!
//! A renderer is a stateful view bound to one UI schema element. The
//! registry pairs each renderer with a ranked applicability tester; the
//! host evaluates all testers for an element and instantiates the
//! highest-ranked match.
//!
//! ## Submodules
//!
//! - [`tree`]: the retained [`ViewNode`] tree renderers produce
//! - [`registry`]: tester/factory registration and the renderer handle
//! - [`array`]: the array-of-object control (rank 2)
//! - [`field`]: the fallback leaf control (rank 1)
//! - [`form`]: nested sub-form construction for array elements

pub mod array;
pub mod field;
pub mod form;
pub mod registry;
pub mod tree;

pub use array::{array_tester, ArrayControlView};
pub use field::{field_tester, FieldControlView};
pub use form::{display_value, ObjectForm, SubFormRenderer};
pub use registry::{
    default_registry, RendererContext, RendererFactory, RendererHandle, RendererRegistry,
};
pub use tree::{Action, NodeKind, ViewNode};

use crate::core::data_service::DataChange;

/// A stateful view bound to one UI schema element.
///
/// Renderers own a [`ViewNode`] subtree. `render` is a full rebuild:
/// repeated calls converge to the same structure for the same data.
pub trait Renderer {
    /// Rebuild the visual subtree from current data.
    fn render(&mut self);

    /// The rendered subtree.
    fn root(&self) -> &ViewNode;

    /// Run an action originating from this renderer's subtree.
    ///
    /// Returns the write-back to commit, if any. The caller commits it
    /// only after this borrow has ended, so the data service's fan-out
    /// may safely re-enter the view.
    fn activate(&mut self, action: Action) -> Option<DataChange> {
        let _ = action;
        None
    }

    /// Release view state before the renderer is discarded.
    fn dispose(&mut self) {}
}
