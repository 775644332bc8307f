//! Editor3 content model
//!
//! A [`ContentState`] is an ordered list of [`Block`]s plus an arena of
//! [`Entity`] values. Blocks never embed entities by value: every character
//! carries an optional [`EntityKey`] that is resolved through the content
//! state's entity map.
//!
//! All types are immutable once constructed. Construction validates the
//! invariants the serializer relies on: one annotation per character, unique
//! block keys and no dangling entity keys.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::entity::{Entity, EntityKey};
use crate::error::{Error, Result};
use crate::style::StyleSet;

/// Block-level type of a block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    /// Placeholder block holding exactly one embedded entity
    Atomic,
    /// Any other block type, rendered as a paragraph
    Other(String),
}

impl BlockType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "unstyled" | "paragraph" => BlockType::Unstyled,
            "header-one" => BlockType::HeaderOne,
            "header-two" => BlockType::HeaderTwo,
            "header-three" => BlockType::HeaderThree,
            "header-four" => BlockType::HeaderFour,
            "header-five" => BlockType::HeaderFive,
            "header-six" => BlockType::HeaderSix,
            "blockquote" => BlockType::Blockquote,
            "code-block" => BlockType::CodeBlock,
            "unordered-list-item" => BlockType::UnorderedListItem,
            "ordered-list-item" => BlockType::OrderedListItem,
            "atomic" => BlockType::Atomic,
            other => BlockType::Other(other.to_string()),
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, BlockType::UnorderedListItem | BlockType::OrderedListItem)
    }

    pub fn is_atomic(&self) -> bool {
        *self == BlockType::Atomic
    }
}

/// Style set and optional entity reference of one character
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterMetadata {
    pub style: StyleSet,
    pub entity: Option<EntityKey>,
}

impl CharacterMetadata {
    pub fn new(style: StyleSet, entity: Option<EntityKey>) -> Self {
        Self { style, entity }
    }
}

/// One paragraph-equivalent unit of a document
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    key: String,
    block_type: BlockType,
    depth: u8,
    text: String,
    characters: Vec<CharacterMetadata>,
}

impl Block {
    /// Create a block, checking that there is one annotation per character
    pub fn new(
        key: impl Into<String>,
        block_type: BlockType,
        text: impl Into<String>,
        characters: Vec<CharacterMetadata>,
    ) -> Result<Self> {
        let key = key.into();
        let text = text.into();
        let text_len = text.chars().count();

        if text_len != characters.len() {
            return Err(Error::AnnotationLength {
                block: key,
                text: text_len,
                annotations: characters.len(),
            });
        }

        Ok(Self {
            key,
            block_type,
            depth: 0,
            text,
            characters,
        })
    }

    /// Create an unannotated block
    pub fn plain(key: impl Into<String>, block_type: BlockType, text: impl Into<String>) -> Self {
        let text = text.into();
        let characters = vec![CharacterMetadata::default(); text.chars().count()];
        Self {
            key: key.into(),
            block_type,
            depth: 0,
            text,
            characters,
        }
    }

    /// Create an atomic block whose single placeholder character references `entity`
    pub fn atomic(key: impl Into<String>, entity: EntityKey) -> Self {
        Self {
            key: key.into(),
            block_type: BlockType::Atomic,
            depth: 0,
            text: " ".to_string(),
            characters: vec![CharacterMetadata::new(StyleSet::new(), Some(entity))],
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn characters(&self) -> &[CharacterMetadata] {
        &self.characters
    }

    /// Text paired with each character's annotation
    pub fn chars(&self) -> impl Iterator<Item = (char, &CharacterMetadata)> {
        self.text.chars().zip(self.characters.iter())
    }

    /// Entity referenced by the character at `offset`
    pub fn entity_at(&self, offset: usize) -> Option<&EntityKey> {
        self.characters.get(offset)?.entity.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The serializable document: ordered blocks plus the entity arena
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentState {
    blocks: Vec<Block>,
    entity_map: IndexMap<EntityKey, Entity>,
}

impl ContentState {
    /// Create a content state, checking that block keys are unique and that
    /// every referenced entity exists
    pub fn new(blocks: Vec<Block>, entity_map: IndexMap<EntityKey, Entity>) -> Result<Self> {
        let mut keys = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !keys.insert(block.key.as_str()) {
                return Err(Error::InvalidStructure(format!(
                    "duplicate block key {}",
                    block.key
                )));
            }
            for meta in &block.characters {
                if let Some(key) = &meta.entity {
                    if !entity_map.contains_key(key) {
                        return Err(Error::MissingEntity {
                            block: block.key.clone(),
                            key: key.to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { blocks, entity_map })
    }

    /// One block per line of `text`, like a freshly typed document
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| Block::plain(format!("b{i}"), BlockType::Unstyled, line))
            .collect();
        Self {
            blocks,
            entity_map: IndexMap::new(),
        }
    }

    /// A document holding a single empty paragraph
    pub fn empty_paragraph() -> Self {
        Self::from_text("")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn entity_map(&self) -> &IndexMap<EntityKey, Entity> {
        &self.entity_map
    }

    pub fn entity(&self, key: &EntityKey) -> Option<&Entity> {
        self.entity_map.get(key)
    }

    /// Plain text of all blocks, one line per block
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
