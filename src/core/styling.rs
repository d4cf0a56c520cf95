//! Style class registry.
//!
//! Maps semantic style tokens (`"button"`) to concrete class names on
//! rendered nodes. The registry is plain configuration handed to views at
//! construction, so components stay testable without process-wide state.

use std::collections::HashMap;

const NO_CLASSES: &[String] = &[];

/// Token to class-name mapping.
#[derive(Debug, Clone)]
pub struct StylingRegistry {
    classes: HashMap<String, Vec<String>>,
}

impl StylingRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Register class names for a token, replacing earlier ones.
    pub fn register(&mut self, token: impl Into<String>, classes: Vec<String>) {
        self.classes.insert(token.into(), classes);
    }

    /// Remove a token.
    pub fn deregister(&mut self, token: &str) {
        self.classes.remove(token);
    }

    /// Class names for a token; empty when unregistered.
    pub fn get(&self, token: &str) -> &[String] {
        self.classes.get(token).map_or(NO_CLASSES, Vec::as_slice)
    }

    /// Space-joined class-attribute form of [`StylingRegistry::get`].
    pub fn get_as_class_name(&self, token: &str) -> String {
        self.get(token).join(" ")
    }
}

impl Default for StylingRegistry {
    /// Registry carrying the stock tokens the built-in renderers use.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("button", vec!["button".to_string()]);
        registry
    }
}
