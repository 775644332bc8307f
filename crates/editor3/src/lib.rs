//! # editor3
//!
//! Convert editor3 content to HTML.
//!
//! Editor3 is a draft-js based rich-text editor. It persists documents as
//! *raw content states*: JSON with a list of blocks carrying style and entity
//! ranges, plus an entity map of links, media, embeds, tables and other
//! atomic content. This crate reads that JSON and renders it with
//! [`editor3_core`].
//!
//! ## Example
//!
//! ```rust
//! use editor3::Editor3Service;
//!
//! let service = Editor3Service::new();
//! let html = service
//!     .raw_to_html(
//!         r#"{
//!             "blocks": [{
//!                 "key": "a1",
//!                 "text": "Hello World",
//!                 "type": "header-two",
//!                 "depth": 0,
//!                 "inlineStyleRanges": [{"offset": 6, "length": 5, "style": "ITALIC"}],
//!                 "entityRanges": []
//!             }],
//!             "entityMap": {}
//!         }"#,
//!     )
//!     .unwrap();
//! assert_eq!(html, "<h2>Hello <i>World</i></h2>");
//! ```
//!
//! ## Custom blocks
//!
//! Custom blocks are rendered with a generic wrapper unless their vocabulary
//! id is registered:
//!
//! ```rust
//! use editor3::{CustomBlockKind, Editor3Service};
//!
//! let mut service = Editor3Service::new();
//! service.register_custom_block(
//!     "fact-box",
//!     CustomBlockKind::with_wrap("Fact box", |block| {
//!         format!("<aside class=\"fact-box\">{}</aside>", block.html)
//!     }),
//! );
//! ```

pub mod raw;
mod service;

pub use editor3_core::{
    ContentState, CustomBlock, CustomBlockKind, EntityType, EntityTypes, RenderOptions, Rendered,
    Warning,
};
pub use raw::{from_raw, from_raw_value, RawContentState};
pub use service::Editor3Service;

/// Error type for editor3 operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid raw content: {0}")]
    InvalidRaw(String),

    #[error(transparent)]
    Model(#[from] editor3_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
