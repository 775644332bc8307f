//! Editor3Service - configured entry point for rendering editor3 content to HTML

use editor3_core::{
    render, ContentState, CustomBlockKind, CustomBlockRegistry, EntityType, RenderOptions, Rendered,
};
use log::debug;

use crate::raw::from_raw;
use crate::Result;

/// The main service for converting editor3 content to HTML
#[derive(Debug, Default)]
pub struct Editor3Service {
    options: RenderOptions,
    custom_blocks: CustomBlockRegistry,
}

impl Editor3Service {
    /// Create a new Editor3Service with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an Editor3Service with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            custom_blocks: CustomBlockRegistry::new(),
        }
    }

    /// Register a custom block type, keyed by its vocabulary id
    pub fn register_custom_block(&mut self, id: &str, kind: CustomBlockKind) -> &mut Self {
        self.custom_blocks.add(id, kind);
        self
    }

    /// Stop rendering atomic blocks of the given entity type
    pub fn disable(&mut self, entity_type: EntityType) -> &mut Self {
        self.options.disabled = self.options.disabled.with(entity_type);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Render a content state, keeping any warnings
    pub fn render(&self, content: &ContentState) -> Result<Rendered> {
        Ok(render(content, &self.options, &self.custom_blocks)?)
    }

    /// Convert a content state to HTML
    pub fn to_html(&self, content: &ContentState) -> Result<String> {
        self.render(content).map(|rendered| rendered.html)
    }

    /// Parse a raw JSON content state and render it
    pub fn render_raw(&self, json: &str) -> Result<Rendered> {
        let content = from_raw(json)?;
        debug!(
            "parsed raw content state: {} blocks, {} entities",
            content.blocks().len(),
            content.entity_map().len()
        );
        self.render(&content)
    }

    /// Convert a raw JSON content state to HTML
    pub fn raw_to_html(&self, json: &str) -> Result<String> {
        self.render_raw(json).map(|rendered| rendered.html)
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Get the registered custom block types
    pub fn custom_blocks(&self) -> &CustomBlockRegistry {
        &self.custom_blocks
    }
}
