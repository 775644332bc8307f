//! Entities: typed, keyed objects referenced from character annotations

use std::fmt;

use indexmap::IndexMap;

use crate::model::ContentState;

/// Opaque key of an entity, unique within one content state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Entity mutability as tracked by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mutability {
    #[default]
    Mutable,
    Immutable,
    Segmented,
}

/// Recognized entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Link,
    Media,
    Embed,
    Table,
    MultiLineQuote,
    CustomBlock,
    ArticleEmbed,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::Link,
        EntityType::Media,
        EntityType::Embed,
        EntityType::Table,
        EntityType::MultiLineQuote,
        EntityType::CustomBlock,
        EntityType::ArticleEmbed,
    ];

    /// Raw type name used in serialized content states
    pub fn name(self) -> &'static str {
        match self {
            EntityType::Link => "LINK",
            EntityType::Media => "MEDIA",
            EntityType::Embed => "EMBED",
            EntityType::Table => "TABLE",
            EntityType::MultiLineQuote => "MULTI_LINE_QUOTE",
            EntityType::CustomBlock => "CUSTOM_BLOCK",
            EntityType::ArticleEmbed => "ARTICLE_EMBED",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A small copyable set of entity types, used to suppress types while
/// rendering nested documents (e.g. no tables inside table cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityTypes(u8);

impl EntityTypes {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Return a copy of this set that also contains `entity_type`
    pub fn with(self, entity_type: EntityType) -> Self {
        Self(self.0 | entity_type.bit())
    }

    pub fn contains(self, entity_type: EntityType) -> bool {
        self.0 & entity_type.bit() != 0
    }
}

impl FromIterator<EntityType> for EntityTypes {
    fn from_iter<I: IntoIterator<Item = EntityType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// An entity stored in a content state's entity map
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub mutability: Mutability,
    pub data: EntityData,
}

impl Entity {
    pub fn new(data: EntityData) -> Self {
        Self {
            mutability: Mutability::default(),
            data,
        }
    }

    pub fn with_mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    /// The recognized type of this entity, `None` if unrecognized
    pub fn entity_type(&self) -> Option<EntityType> {
        self.data.entity_type()
    }

    /// Raw type name, including unrecognized ones
    pub fn type_name(&self) -> &str {
        match &self.data {
            EntityData::Unrecognized { type_name } => type_name,
            data => data.entity_type().map(EntityType::name).unwrap_or_default(),
        }
    }
}

/// Type-specific entity payload
#[derive(Debug, Clone, PartialEq)]
pub enum EntityData {
    Link(LinkData),
    Media(MediaData),
    Embed(EmbedData),
    Table(TableData),
    MultiLineQuote(QuoteData),
    CustomBlock(CustomBlockData),
    ArticleEmbed(ArticleEmbedData),
    /// An entity type this serializer does not know how to render
    Unrecognized { type_name: String },
}

impl EntityData {
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            EntityData::Link(_) => Some(EntityType::Link),
            EntityData::Media(_) => Some(EntityType::Media),
            EntityData::Embed(_) => Some(EntityType::Embed),
            EntityData::Table(_) => Some(EntityType::Table),
            EntityData::MultiLineQuote(_) => Some(EntityType::MultiLineQuote),
            EntityData::CustomBlock(_) => Some(EntityType::CustomBlock),
            EntityData::ArticleEmbed(_) => Some(EntityType::ArticleEmbed),
            EntityData::Unrecognized { .. } => None,
        }
    }
}

/// Inline link or attachment reference
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkData {
    pub href: Option<String>,
    /// Id of an attached file, rendered as `data-attachment`
    pub attachment: Option<String>,
    pub title: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Parse the item type of a media payload (`picture`, `video`, ...)
    pub fn from_item_type(item_type: &str) -> Self {
        match item_type {
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            _ => MediaKind::Image,
        }
    }

    /// Label used in the embed marker comments
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Audio => "Audio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendition {
    pub href: Option<String>,
}

/// Picture, video or audio item embedded in the text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaData {
    pub kind: MediaKind,
    /// Renditions by name (`original`, `viewImage`, `thumbnail`, ...)
    pub renditions: IndexMap<String, Rendition>,
    pub alt_text: Option<String>,
    pub description_text: Option<String>,
}

impl MediaData {
    const PREFERRED_RENDITIONS: [&'static str; 3] = ["original", "viewImage", "baseImage"];

    /// Href of the best available rendition
    pub fn href(&self) -> Option<&str> {
        Self::PREFERRED_RENDITIONS
            .iter()
            .filter_map(|name| self.renditions.get(*name))
            .chain(self.renditions.values())
            .find_map(|r| r.href.as_deref())
    }
}

/// Third-party embed code
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbedData {
    pub html: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    pub num_rows: usize,
    pub num_cols: usize,
    pub with_header: bool,
    /// Row-major cells; a `None` or absent cell is an empty paragraph
    pub cells: Vec<Vec<Option<ContentState>>>,
}

impl TableData {
    pub fn cell(&self, row: usize, col: usize) -> Option<&ContentState> {
        self.cells.get(row)?.get(col)?.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteData {
    pub body: ContentState,
}

/// Block of a kind registered by the host application
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomBlockData {
    pub block_type_id: String,
    pub body: ContentState,
}

/// Another article transcluded with its pre-rendered body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleEmbedData {
    pub article_id: String,
    pub html: String,
}
