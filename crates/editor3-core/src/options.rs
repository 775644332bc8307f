//! Configuration options for HTML serialization

use crate::entity::EntityTypes;

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Separator between top-level rendered blocks
    pub block_separator: String,

    /// Prefix of the per-entity id written into media embed markers
    pub media_id_prefix: String,

    /// Markup for a soft newline inside a text block (code blocks keep `\n`)
    pub soft_newline: String,

    /// Entity types suppressed everywhere in the document
    pub disabled: EntityTypes,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_separator: "\n".to_string(),
            media_id_prefix: "editor_".to_string(),
            soft_newline: "<br>".to_string(),
            disabled: EntityTypes::empty(),
        }
    }
}
