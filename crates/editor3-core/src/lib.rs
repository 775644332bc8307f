//! editor3-core - Editor3 content model and HTML serialization
//!
//! This crate provides the immutable document model of the editor3 rich-text
//! editor and the serializer that turns it into publish-ready HTML. It is used
//! by `editor3`, which builds content states from their raw JSON form.
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────────┐   text block  ┌──────────────────────────┐
//! ContentState ──▶ │   document    │ ────────────▶ │ entity + style emitters  │ ──▶ HTML
//!        ▲         │   renderer    │               └──────────────────────────┘
//!        │         │               │   atomic      ┌──────────────────────────┐
//!        │         │               │ ────────────▶ │ media / embed / table /  │ ──▶ HTML
//!        │         └───────────────┘               │ quote / custom / article │
//!        │                                         └────────────┬─────────────┘
//!        └──────────────── nested documents ────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use editor3_core::{style_set, to_html, Block, BlockType, CharacterMetadata, ContentState};
//! use indexmap::IndexMap;
//!
//! let characters = "Hello"
//!     .chars()
//!     .map(|_| CharacterMetadata::new(style_set(["BOLD"]), None))
//!     .collect();
//! let block = Block::new("a1", BlockType::HeaderOne, "Hello", characters).unwrap();
//! let content = ContentState::new(vec![block], IndexMap::new()).unwrap();
//!
//! assert_eq!(to_html(&content).unwrap(), "<h1><b>Hello</b></h1>");
//! ```

mod atomic;
mod embed;
mod emit;
mod entity;
mod error;
mod model;
mod options;
mod rules;
mod serialize;
mod style;

pub use embed::{is_widget, rewrite_widget};
pub use emit::{EntityEmitter, StyleEmitter};
pub use entity::{
    ArticleEmbedData, CustomBlockData, EmbedData, Entity, EntityData, EntityKey, EntityType,
    EntityTypes, LinkData, MediaData, MediaKind, Mutability, QuoteData, Rendition, TableData,
};
pub use error::{Error, Result};
pub use model::{Block, BlockType, CharacterMetadata, ContentState};
pub use options::RenderOptions;
pub use rules::{CustomBlock, CustomBlockKind, CustomBlockRegistry, WrapFn};
pub use serialize::{inline_html, render, to_html, Rendered, Warning};
pub use style::{style_set, InlineStyle, StyleSet};
