//! Raw (serialized) content states.
//!
//! Editor3 stores documents in the draft-js raw format: blocks carry style and
//! entity *ranges*, and entity payloads are free-form JSON. This module reads
//! that format and folds it into the typed, per-character
//! [`ContentState`] the serializer works on.
//!
//! Range offsets and lengths are UTF-16 code units, as produced by the editor
//! running in a browser. They are mapped to character positions here.

use indexmap::IndexMap;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use editor3_core::{
    ArticleEmbedData, Block, BlockType, CharacterMetadata, ContentState, CustomBlockData,
    EmbedData, Entity, EntityData, EntityKey, EntityType, InlineStyle, LinkData, MediaData,
    MediaKind, Mutability, QuoteData, Rendition, TableData,
};

use crate::{Error, Result};

/// Parse a raw content state from JSON text
pub fn from_raw(json: &str) -> Result<ContentState> {
    let raw: RawContentState = serde_json::from_str(json)?;
    raw.into_content_state()
}

/// Convert a raw content state held as a JSON value
pub fn from_raw_value(value: Value) -> Result<ContentState> {
    let raw: RawContentState = serde_json::from_value(value)?;
    raw.into_content_state()
}

/// A content state in draft-js raw form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawContentState {
    pub blocks: Vec<RawBlock>,
    pub entity_map: IndexMap<String, RawEntity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default = "unstyled")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
}

fn unstyled() -> String {
    "unstyled".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: RawKey,
}

/// Entity range keys are numbers in editor output and strings in entity maps
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawKey {
    Number(u64),
    Text(String),
}

impl RawKey {
    fn to_entity_key(&self) -> EntityKey {
        match self {
            RawKey::Number(n) => EntityKey::new(n.to_string()),
            RawKey::Text(s) => EntityKey::new(s.as_str()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub mutability: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl RawContentState {
    /// Fold ranges into per-character annotations and decode entity payloads
    pub fn into_content_state(self) -> Result<ContentState> {
        let blocks = self
            .blocks
            .into_iter()
            .map(RawBlock::into_block)
            .collect::<Result<Vec<_>>>()?;

        let mut entity_map = IndexMap::with_capacity(self.entity_map.len());
        for (key, raw) in self.entity_map {
            let entity = raw.into_entity(&key)?;
            entity_map.insert(EntityKey::new(key), entity);
        }

        Ok(ContentState::new(blocks, entity_map)?)
    }
}

impl RawBlock {
    fn into_block(self) -> Result<Block> {
        let offsets = Utf16Offsets::new(&self.text);
        let mut characters = vec![CharacterMetadata::default(); offsets.len()];

        let text_len = self.text.encode_utf16().count();
        let ranges = self
            .inline_style_ranges
            .iter()
            .map(|r| (r.offset, r.length))
            .chain(self.entity_ranges.iter().map(|r| (r.offset, r.length)));
        for (offset, length) in ranges {
            if offset.saturating_add(length) > text_len {
                return Err(Error::InvalidRaw(format!(
                    "range {offset}+{length} exceeds text of block {} ({text_len} units)",
                    self.key
                )));
            }
        }

        for range in &self.inline_style_ranges {
            let style = InlineStyle::from_name(&range.style);
            for meta in &mut characters[offsets.chars(range.offset, range.length)] {
                meta.style.insert(style.clone());
            }
        }

        for range in &self.entity_ranges {
            let key = range.key.to_entity_key();
            for meta in &mut characters[offsets.chars(range.offset, range.length)] {
                meta.entity = Some(key.clone());
            }
        }

        let block = Block::new(
            self.key,
            BlockType::from_name(&self.block_type),
            self.text,
            characters,
        )?;
        Ok(block.with_depth(self.depth))
    }
}

/// UTF-16 start offset of every character of a string
struct Utf16Offsets(Vec<usize>);

impl Utf16Offsets {
    fn new(text: &str) -> Self {
        let mut offset = 0;
        Self(
            text.chars()
                .map(|c| {
                    let start = offset;
                    offset += c.len_utf16();
                    start
                })
                .collect(),
        )
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// Characters starting inside the UTF-16 range `offset..offset + length`
    fn chars(&self, offset: usize, length: usize) -> std::ops::Range<usize> {
        let start = self.0.partition_point(|&s| s < offset);
        let end = self.0.partition_point(|&s| s < offset.saturating_add(length));
        start..end.max(start)
    }
}

impl RawEntity {
    fn into_entity(self, key: &str) -> Result<Entity> {
        let mutability = match self.mutability.as_deref() {
            Some("IMMUTABLE") => Mutability::Immutable,
            Some("SEGMENTED") => Mutability::Segmented,
            _ => Mutability::Mutable,
        };

        let data = match EntityType::from_name(&self.entity_type) {
            Some(entity_type) => decode_payload(entity_type, self.data, key)?,
            None => EntityData::Unrecognized {
                type_name: self.entity_type,
            },
        };

        Ok(Entity::new(data).with_mutability(mutability))
    }
}

fn decode_payload(entity_type: EntityType, data: Value, key: &str) -> Result<EntityData> {
    let data = match entity_type {
        EntityType::Link => {
            let payload: LinkPayload = lenient(data, key);
            let link = payload.link.unwrap_or_default();
            EntityData::Link(LinkData {
                href: link.href.or(payload.url),
                attachment: link.attachment,
                title: link.title,
                target: link.target,
            })
        }
        EntityType::Media => {
            let media = lenient::<MediaPayload>(data, key).media;
            EntityData::Media(MediaData {
                kind: MediaKind::from_item_type(media.item_type.as_deref().unwrap_or_default()),
                renditions: media
                    .renditions
                    .into_iter()
                    .map(|(name, r)| (name, Rendition { href: r.href }))
                    .collect(),
                alt_text: media.alt_text,
                description_text: media.description_text,
            })
        }
        EntityType::Embed => {
            let payload: EmbedPayload = lenient(data, key);
            // data.data is the oEmbed response; its description belongs to
            // the provider, not the editor
            let html = match payload.data {
                Value::String(html) => html,
                Value::Object(fields) => string_field(&fields, "html").unwrap_or_default(),
                _ => String::new(),
            };
            EntityData::Embed(EmbedData {
                html,
                description: payload.description,
            })
        }
        EntityType::Table => {
            let table = lenient::<TablePayload>(data, key).data;
            EntityData::Table(TableData {
                num_rows: table.num_rows,
                num_cols: table.num_cols,
                with_header: table.with_header,
                cells: nested_cells(table.cells)?,
            })
        }
        EntityType::MultiLineQuote => {
            let payload: QuotePayload = lenient(data, key);
            EntityData::MultiLineQuote(QuoteData {
                body: payload.body.or_else(|| first_cell(payload.data.cells)).into_body()?,
            })
        }
        EntityType::CustomBlock => {
            let payload: CustomBlockPayload = lenient(data, key);
            EntityData::CustomBlock(CustomBlockData {
                block_type_id: payload
                    .vocabulary_id
                    .or(payload.data.vocabulary_id)
                    .unwrap_or_default(),
                body: first_cell(payload.data.cells).into_body()?,
            })
        }
        EntityType::ArticleEmbed => {
            let payload: ArticleEmbedPayload = lenient(data, key);
            EntityData::ArticleEmbed(ArticleEmbedData {
                article_id: payload.id.or(payload.article_id).unwrap_or_default(),
                html: payload.html.unwrap_or_default(),
            })
        }
    };
    Ok(data)
}

/// Decode a payload, falling back to an empty one when its shape is off.
///
/// Missing or mistyped payload fields degrade to defaults instead of failing
/// the whole document.
fn lenient<T: DeserializeOwned + Default>(data: Value, key: &str) -> T {
    if data.is_null() {
        return T::default();
    }
    serde_json::from_value(data).unwrap_or_else(|err| {
        warn!("entity {key}: unexpected payload shape ({err}), using defaults");
        T::default()
    })
}

fn string_field(fields: &serde_json::Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

fn nested_cells(cells: Vec<Vec<Option<RawContentState>>>) -> Result<Vec<Vec<Option<ContentState>>>> {
    cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(RawContentState::into_content_state).transpose())
                .collect()
        })
        .collect()
}

fn first_cell(cells: Vec<Vec<Option<RawContentState>>>) -> Option<RawContentState> {
    cells.into_iter().next()?.into_iter().next()?
}

trait IntoBody {
    fn into_body(self) -> Result<ContentState>;
}

impl IntoBody for Option<RawContentState> {
    fn into_body(self) -> Result<ContentState> {
        match self {
            Some(raw) => raw.into_content_state(),
            None => Ok(ContentState::empty_paragraph()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LinkPayload {
    link: Option<RawLink>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLink {
    href: Option<String>,
    attachment: Option<String>,
    title: Option<String>,
    target: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MediaPayload {
    media: RawMedia,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMedia {
    #[serde(rename = "type")]
    item_type: Option<String>,
    renditions: IndexMap<String, RawRendition>,
    alt_text: Option<String>,
    description_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRendition {
    href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmbedPayload {
    data: Value,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TablePayload {
    data: RawCells,
}

/// Table-shaped payload; quotes and custom blocks reuse it with one cell
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCells {
    num_rows: usize,
    num_cols: usize,
    with_header: bool,
    cells: Vec<Vec<Option<RawContentState>>>,
    vocabulary_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuotePayload {
    data: RawCells,
    body: Option<RawContentState>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CustomBlockPayload {
    data: RawCells,
    vocabulary_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ArticleEmbedPayload {
    id: Option<String>,
    article_id: Option<String>,
    html: Option<String>,
}
