//! Error types for rendering

/// Error type for content model construction and rendering
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("block {block}: {annotations} character annotations for {text} characters")]
    AnnotationLength {
        block: String,
        text: usize,
        annotations: usize,
    },

    #[error("block {block}: entity {key} is not in the entity map")]
    MissingEntity { block: String, key: String },

    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
