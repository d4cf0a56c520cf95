//! Document ownership and change notification.
//!
//! The data service owns the root JSON document. Views never keep an
//! authoritative copy: they read through [`DataService::get_value`] and
//! write through [`DataService::notify_about_data_change`], which commits
//! the value and fans the change out to every registered listener whose
//! filter accepts it. Whichever component writes last wins; readers
//! re-pull fresh state instead of caching.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::schema::path::to_data_path;
use crate::schema::uischema::ControlElement;

/// Receiver of data-change notifications.
pub trait DataChangeListener {
    /// Whether a change at `control`'s scope concerns this listener.
    ///
    /// `None` (no originating control) must be rejected.
    fn needs_notification_about(&self, control: Option<&ControlElement>) -> bool;

    /// Called after a change this listener accepted was committed.
    fn data_changed(&mut self, control: &ControlElement, new_value: &Value);
}

/// Shared handle to a registered listener.
pub type ListenerRef = Rc<RefCell<dyn DataChangeListener>>;

/// A write-back produced by a view action, to be committed through
/// [`DataService::notify_about_data_change`].
#[derive(Debug, Clone)]
pub struct DataChange {
    pub control: ControlElement,
    pub value: Value,
}

/// Owner of the root document and the listener fan-out set.
pub struct DataService {
    root: RefCell<Value>,
    listeners: RefCell<Vec<ListenerRef>>,
}

impl DataService {
    /// Create a service owning `root`.
    pub fn new(root: Value) -> Rc<Self> {
        Rc::new(Self {
            root: RefCell::new(root),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Current value at the control's scope, or `None` when absent.
    ///
    /// The returned value is a clone; mutating it does not affect the
    /// document.
    pub fn get_value(&self, control: &ControlElement) -> Option<Value> {
        let path = to_data_path(&control.scope.reference);
        let root = self.root.borrow();
        let mut current: &Value = &root;
        for segment in &path {
            current = current.get(segment.as_str())?;
        }
        Some(current.clone())
    }

    /// Commit `new_value` at the control's scope, then notify listeners.
    ///
    /// The parent of the target location must already exist; a write into
    /// a missing parent is dropped. Fan-out runs after the document borrow
    /// is released, so listeners are free to read back through the
    /// service, and the listener list is snapshotted so registrations
    /// during dispatch cannot invalidate the iteration.
    pub fn notify_about_data_change(&self, control: &ControlElement, new_value: Value) {
        if !self.commit(control, new_value.clone()) {
            return;
        }
        debug!(scope = %control.scope.reference, "data change committed");

        let listeners: Vec<ListenerRef> = self.listeners.borrow().clone();
        for listener in listeners {
            let accepts = listener.borrow().needs_notification_about(Some(control));
            if accepts {
                listener.borrow_mut().data_changed(control, &new_value);
            }
        }
    }

    fn commit(&self, control: &ControlElement, new_value: Value) -> bool {
        let path = to_data_path(&control.scope.reference);
        let mut root = self.root.borrow_mut();

        let Some((last, parents)) = path.split_last() else {
            *root = new_value;
            return true;
        };

        let mut current: &mut Value = &mut root;
        for segment in parents {
            match current.get_mut(segment.as_str()) {
                Some(next) => current = next,
                None => {
                    warn!(scope = %control.scope.reference, "write dropped: missing parent");
                    return false;
                }
            }
        }
        match current {
            Value::Object(map) => {
                map.insert(last.clone(), new_value);
                true
            }
            _ => {
                warn!(scope = %control.scope.reference, "write dropped: parent is not an object");
                false
            }
        }
    }

    /// Register a listener. Registering the same listener twice is a
    /// no-op.
    pub fn register_data_change_listener(&self, listener: ListenerRef) {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return;
        }
        listeners.push(listener);
        debug!(total = listeners.len(), "listener registered");
    }

    /// Deregister a listener. Unknown listeners are a no-op.
    pub fn deregister_data_change_listener(&self, listener: &ListenerRef) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| !same_listener(l, listener));
        debug!(total = listeners.len(), "listener deregistered");
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// A clone of the current root document.
    pub fn root(&self) -> Value {
        self.root.borrow().clone()
    }
}

/// Listener identity is the address of the shared cell, not the vtable.
fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
