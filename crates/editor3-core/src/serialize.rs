//! Content state serialization
//!
//! Converts a content state into HTML. Text blocks are rendered by walking
//! their character annotations through the tag emitters; atomic blocks are
//! handed to the dispatcher in [`crate::atomic`], which recurses back into
//! [`Renderer::document`] for nested documents.

use log::{trace, warn};

use crate::emit::{EntityEmitter, StyleEmitter};
use crate::entity::{Entity, EntityKey, EntityTypes};
use crate::error::Result;
use crate::model::{Block, BlockType, ContentState};
use crate::options::RenderOptions;
use crate::rules::CustomBlockRegistry;

/// Non-fatal problem found while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A block references an entity of a type with no renderer
    UnrecognizedEntity {
        block: String,
        key: String,
        type_name: String,
    },
}

/// Result of a render: the HTML plus any warnings reported along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub warnings: Vec<Warning>,
}

/// Render a content state to HTML
pub fn render(
    content: &ContentState,
    options: &RenderOptions,
    registry: &CustomBlockRegistry,
) -> Result<Rendered> {
    let mut renderer = Renderer::new(options, registry);
    let html = renderer.document(content, options.disabled)?;
    Ok(Rendered {
        html,
        warnings: renderer.warnings,
    })
}

/// Render a content state to HTML with default options and no custom blocks
pub fn to_html(content: &ContentState) -> Result<String> {
    render(content, &RenderOptions::default(), &CustomBlockRegistry::new()).map(|r| r.html)
}

/// State of one top-level render
pub(crate) struct Renderer<'r> {
    pub(crate) options: &'r RenderOptions,
    pub(crate) registry: &'r CustomBlockRegistry,
    pub(crate) warnings: Vec<Warning>,
    widget_count: usize,
}

impl<'r> Renderer<'r> {
    pub(crate) fn new(options: &'r RenderOptions, registry: &'r CustomBlockRegistry) -> Self {
        Self {
            options,
            registry,
            warnings: Vec::new(),
            widget_count: 0,
        }
    }

    /// Next widget mount-point id, unique within this render
    pub(crate) fn next_widget_id(&mut self) -> String {
        self.widget_count += 1;
        format!("qumu-widget-{}", self.widget_count)
    }

    /// Render every block of `content` in order
    pub(crate) fn document(
        &mut self,
        content: &ContentState,
        disabled: EntityTypes,
    ) -> Result<String> {
        let blocks = content.blocks();
        let mut parts = Vec::with_capacity(blocks.len());
        let mut i = 0;

        while i < blocks.len() {
            let block = &blocks[i];

            if block.block_type().is_list_item() {
                let run = blocks[i..]
                    .iter()
                    .take_while(|b| b.block_type().is_list_item())
                    .count();
                let items = &blocks[i..i + run];
                let mut j = 0;
                while j < items.len() {
                    let mut out = String::new();
                    j += self.list(content, &items[j..], 0, &mut out)?;
                    parts.push(out);
                }
                i += run;
                continue;
            }

            let html = if block.block_type().is_atomic() {
                self.atomic(content, block, disabled)?
            } else if block.is_empty() {
                String::new()
            } else {
                self.text_block(content, block)?
            };

            if !html.is_empty() {
                parts.push(html);
            }
            i += 1;
        }

        trace!("rendered {} of {} blocks", parts.len(), blocks.len());
        Ok(parts.join(&self.options.block_separator))
    }

    fn text_block(&mut self, content: &ContentState, block: &Block) -> Result<String> {
        let (open, close) = block_element(block.block_type());
        let inner = self.inline(content, block)?;

        let mut out = String::with_capacity(open.len() + inner.len() + close.len());
        out.push_str(open);
        out.push_str(&inner);
        out.push_str(close);
        Ok(out)
    }

    /// Render one list starting at `items[0]` as level `level`, returning the
    /// number of items consumed.
    ///
    /// Items deeper than `level` nest inside the preceding item. An item at
    /// `level` of the other list type ends the list.
    fn list(
        &mut self,
        content: &ContentState,
        items: &[Block],
        level: usize,
        out: &mut String,
    ) -> Result<usize> {
        let list_type = items[0].block_type();
        let tag = if *list_type == BlockType::OrderedListItem {
            "ol"
        } else {
            "ul"
        };
        let indent = "    ".repeat(level);

        out.push_str(&indent);
        out.push('<');
        out.push_str(tag);
        out.push('>');

        let mut i = 0;
        while i < items.len() {
            let item = &items[i];
            let depth = usize::from(item.depth());
            if i > 0 && (depth < level || (depth == level && item.block_type() != list_type)) {
                break;
            }

            out.push('\n');
            out.push_str(&indent);
            out.push_str("  <li>");
            out.push_str(&self.inline(content, item)?);
            i += 1;

            let children_end = i + items[i..]
                .iter()
                .take_while(|b| usize::from(b.depth()) > level)
                .count();

            if children_end > i {
                let children = &items[i..children_end];
                let mut j = 0;
                while j < children.len() {
                    out.push('\n');
                    j += self.list(content, &children[j..], level + 1, out)?;
                }
                out.push('\n');
                out.push_str(&indent);
                out.push_str("  </li>");
            } else {
                out.push_str("</li>");
            }
            i = children_end;
        }

        out.push('\n');
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        Ok(i)
    }
}

/// Opening and closing markup of a text block's element
fn block_element(block_type: &BlockType) -> (&'static str, &'static str) {
    match block_type {
        BlockType::HeaderOne => ("<h1>", "</h1>"),
        BlockType::HeaderTwo => ("<h2>", "</h2>"),
        BlockType::HeaderThree => ("<h3>", "</h3>"),
        BlockType::HeaderFour => ("<h4>", "</h4>"),
        BlockType::HeaderFive => ("<h5>", "</h5>"),
        BlockType::HeaderSix => ("<h6>", "</h6>"),
        BlockType::Blockquote => ("<blockquote>", "</blockquote>"),
        BlockType::CodeBlock => ("<pre><code>", "</code></pre>"),
        BlockType::UnorderedListItem | BlockType::OrderedListItem => ("<li>", "</li>"),
        BlockType::Unstyled | BlockType::Atomic | BlockType::Other(_) => ("<p>", "</p>"),
    }
}

/// Render the inline content of a text block.
///
/// Warnings are logged but not returned; use [`render`] to collect them.
pub fn inline_html(content: &ContentState, block: &Block, options: &RenderOptions) -> Result<String> {
    let registry = CustomBlockRegistry::new();
    Renderer::new(options, &registry).inline(content, block)
}

impl Renderer<'_> {
    /// Render the inline content of `block`.
    ///
    /// The entity emitter runs before the style emitter for every character.
    /// A boundary that opens or closes an anchor first closes all open
    /// styles, so anchors always enclose style tags: `<a><b>x</b></a>`,
    /// never `<b><a>x</a></b>`. Boundaries of spans without markup leave
    /// the styles open.
    pub(crate) fn inline(&mut self, content: &ContentState, block: &Block) -> Result<String> {
        let keep_newlines = *block.block_type() == BlockType::CodeBlock;
        let mut out = String::with_capacity(block.text().len() + 16);
        let mut text = String::new();
        let mut styles = StyleEmitter::new();
        let mut entities = EntityEmitter::new(content, block.key());

        for (ch, meta) in block.chars() {
            let entity = meta.entity.as_ref();
            let mut tags = String::new();

            if entities.changes(entity) {
                if let Some(key) = entity {
                    let resolved = entities.resolve(key)?;
                    if resolved.entity_type().is_none() {
                        self.unrecognized(block, key, resolved);
                    }
                }
                if entities.has_markup(entity)? {
                    tags.push_str(&styles.flush());
                }
                tags.push_str(&entities.tags(entity)?);
            }
            tags.push_str(&styles.tags(&meta.style));

            if !tags.is_empty() {
                push_text(&mut out, &mut text);
                out.push_str(&tags);
            }

            if ch == '\n' && !keep_newlines {
                push_text(&mut out, &mut text);
                out.push_str(&self.options.soft_newline);
            } else {
                text.push(ch);
            }
        }

        push_text(&mut out, &mut text);
        out.push_str(&styles.flush());
        out.push_str(&entities.flush());
        Ok(out)
    }

    /// Log and record a reference to an entity of an unknown type
    pub(crate) fn unrecognized(&mut self, block: &Block, key: &EntityKey, entity: &Entity) {
        warn!(
            "unrecognized entity type {} (entity {key}, block {})",
            entity.type_name(),
            block.key()
        );
        self.warnings.push(Warning::UnrecognizedEntity {
            block: block.key().to_string(),
            key: key.to_string(),
            type_name: entity.type_name().to_string(),
        });
    }
}

/// Append pending text to `out`, HTML-escaped, and clear it
fn push_text(out: &mut String, text: &mut String) {
    if !text.is_empty() {
        html_escape::encode_text_to_string(text.as_str(), out);
        text.clear();
    }
}
