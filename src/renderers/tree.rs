//! Retained view tree.
//!
//! Renderers build [`ViewNode`] trees; the terminal UI paints them. Nodes
//! carry a semantic kind, style classes, optional text and an optional
//! action tag, so both the painter and the tests can inspect structure
//! without knowing renderer internals.

/// What a node represents in the rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of one renderer's subtree.
    Control,
    /// Grouping container holding a caption and a content region.
    Group,
    /// Caption region of a group.
    Caption,
    /// Caption text.
    Label,
    /// Content region holding child forms or fields.
    Content,
    /// Activatable control.
    Button,
    /// A nested sub-form.
    Form,
    /// A single "label: value" row.
    Field,
}

/// User-triggerable action carried by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append a fresh element to an array control.
    AddItem,
}

/// A node in the retained view tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub kind: NodeKind,
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub action: Option<Action>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            text: None,
            action: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Add `class` unless already present.
    pub fn ensure_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn push(&mut self, child: ViewNode) {
        self.children.push(child);
    }

    /// Remove and return the most recently attached child.
    pub fn remove_last_child(&mut self) -> Option<ViewNode> {
        self.children.pop()
    }

    /// First direct child of the given kind.
    pub fn child_of_kind(&self, kind: NodeKind) -> Option<&ViewNode> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// Mutable access to the first direct child of the given kind.
    pub fn child_of_kind_mut(&mut self, kind: NodeKind) -> Option<&mut ViewNode> {
        self.children.iter_mut().find(|child| child.kind == kind)
    }

    /// All nodes of the given kind in this subtree, depth-first.
    pub fn descendants_of_kind(&self, kind: NodeKind) -> Vec<&ViewNode> {
        let mut found = Vec::new();
        self.collect_kind(kind, &mut found);
        found
    }

    fn collect_kind<'a>(&'a self, kind: NodeKind, found: &mut Vec<&'a ViewNode>) {
        if self.kind == kind {
            found.push(self);
        }
        for child in &self.children {
            child.collect_kind(kind, found);
        }
    }

    /// Depth-first walk with the depth of each node.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ViewNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut dyn FnMut(&'a ViewNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}
