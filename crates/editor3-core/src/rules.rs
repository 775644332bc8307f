//! Registry of host-defined custom block kinds.

use std::fmt;

use indexmap::IndexMap;

/// Type alias for wrap functions
pub type WrapFn = Box<dyn Fn(&CustomBlock<'_>) -> String + Send + Sync>;

/// A rendered custom block handed to a wrap function
#[derive(Debug, Clone, Copy)]
pub struct CustomBlock<'a> {
    /// Registered block kind id
    pub id: &'a str,
    /// Display label of the block kind
    pub label: &'a str,
    /// Rendered HTML of the block body
    pub html: &'a str,
}

/// A custom block kind registered by the host application
pub struct CustomBlockKind {
    /// Display label
    pub label: String,
    wrap: Option<WrapFn>,
}

impl CustomBlockKind {
    /// Create a kind rendered with the default wrapper
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            wrap: None,
        }
    }

    /// Create a kind whose final markup is shaped by `wrap`
    pub fn with_wrap<F>(label: &str, wrap: F) -> Self
    where
        F: Fn(&CustomBlock<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            label: label.to_string(),
            wrap: Some(Box::new(wrap)),
        }
    }

    /// Apply this kind's wrap function, if any
    pub fn wrap(&self, block: &CustomBlock<'_>) -> Option<String> {
        self.wrap.as_ref().map(|wrap| wrap(block))
    }
}

impl fmt::Debug for CustomBlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomBlockKind")
            .field("label", &self.label)
            .field("wrap", &self.wrap.is_some())
            .finish()
    }
}

/// Custom block kinds by id, in registration order
#[derive(Debug, Default)]
pub struct CustomBlockRegistry {
    kinds: IndexMap<String, CustomBlockKind>,
}

impl CustomBlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind, replacing any kind with the same id
    pub fn add(&mut self, id: &str, kind: CustomBlockKind) {
        self.kinds.insert(id.to_string(), kind);
    }

    pub fn get(&self, id: &str) -> Option<&CustomBlockKind> {
        self.kinds.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}
