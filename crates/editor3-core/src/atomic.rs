//! Atomic block rendering
//!
//! An atomic block holds one placeholder character whose entity fully
//! determines the output. Table cells, quote bodies and custom block bodies
//! are independent content states rendered recursively; the `disabled` set
//! passed down the recursion stops tables from nesting inside tables.

use html_escape::encode_text;
use log::debug;

use crate::embed::{is_widget, rewrite_widget};
use crate::emit::push_attr;
use crate::entity::{
    ArticleEmbedData, CustomBlockData, EmbedData, EntityData, EntityKey, EntityType, EntityTypes,
    MediaData, MediaKind, QuoteData, TableData,
};
use crate::error::{Error, Result};
use crate::model::{Block, ContentState};
use crate::rules::CustomBlock;
use crate::serialize::Renderer;

impl Renderer<'_> {
    /// Render an atomic block, or nothing if its entity type is disabled or
    /// unrecognized
    pub(crate) fn atomic(
        &mut self,
        content: &ContentState,
        block: &Block,
        disabled: EntityTypes,
    ) -> Result<String> {
        let Some(key) = block.entity_at(0) else {
            debug!("atomic block {} has no entity", block.key());
            return Ok(String::new());
        };
        let entity = content.entity(key).ok_or_else(|| Error::MissingEntity {
            block: block.key().to_string(),
            key: key.to_string(),
        })?;

        let Some(entity_type) = entity.entity_type() else {
            self.unrecognized(block, key, entity);
            return Ok(String::new());
        };

        if disabled.contains(entity_type) {
            debug!("skipping disabled {entity_type} entity {key}");
            return Ok(String::new());
        }

        match &entity.data {
            EntityData::Media(media) => Ok(self.media(key, media)),
            EntityData::Embed(embed) => Ok(self.embed(embed)),
            EntityData::Table(table) => self.table(table, disabled),
            EntityData::MultiLineQuote(quote) => self.quote(quote, disabled),
            EntityData::CustomBlock(custom) => self.custom_block(custom, disabled),
            EntityData::ArticleEmbed(article) => Ok(article_embed(article)),
            EntityData::Link(_) | EntityData::Unrecognized { .. } => Ok(String::new()),
        }
    }

    fn media(&self, key: &EntityKey, media: &MediaData) -> String {
        let id = comment_safe(&format!("{}{key}", self.options.media_id_prefix));
        let marker = format!("{} {{id: \"{id}\"}}", media.kind.label());

        let mut element = String::new();
        match media.kind {
            MediaKind::Image => element.push_str("<img"),
            MediaKind::Video => element.push_str("<video controls"),
            MediaKind::Audio => element.push_str("<audio controls"),
        }
        push_attr(&mut element, "src", media.href().unwrap_or_default());
        push_attr(&mut element, "alt", media.alt_text.as_deref().unwrap_or_default());
        match media.kind {
            MediaKind::Image => element.push_str(" />"),
            MediaKind::Video => element.push_str("></video>"),
            MediaKind::Audio => element.push_str("></audio>"),
        }

        let mut out = format!("<!-- EMBED START {marker} -->\n<figure>\n    {element}\n");
        if let Some(description) = media.description_text.as_deref().filter(|d| !d.is_empty()) {
            out.push_str("    <figcaption>");
            out.push_str(&encode_text(description));
            out.push_str("</figcaption>\n");
        }
        out.push_str("</figure>\n<!-- EMBED END ");
        out.push_str(&marker);
        out.push_str(" -->");
        out
    }

    fn embed(&mut self, embed: &EmbedData) -> String {
        let mut out = String::from("<div class=\"embed-block\">");

        let widget = if is_widget(&embed.html) {
            let mount_id = self.next_widget_id();
            debug!("rewriting widget embed to mount at #{mount_id}");
            rewrite_widget(&embed.html, &mount_id)
        } else {
            None
        };
        out.push_str(widget.as_deref().unwrap_or(embed.html.as_str()));

        if let Some(description) = embed.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str("<p class=\"embed-block__description\">");
            out.push_str(&encode_text(description));
            out.push_str("</p>");
        }
        out.push_str("</div>");
        out
    }

    fn table(&mut self, table: &TableData, disabled: EntityTypes) -> Result<String> {
        let nested = disabled.with(EntityType::Table);
        let body_start = usize::from(table.with_header && table.num_rows > 0);
        let mut out = String::from("<table>");

        if body_start == 1 {
            out.push_str("<thead>");
            self.table_row(table, 0, "th", nested, &mut out)?;
            out.push_str("</thead>");
        }

        if body_start < table.num_rows {
            out.push_str("<tbody>");
            for row in body_start..table.num_rows {
                self.table_row(table, row, "td", nested, &mut out)?;
            }
            out.push_str("</tbody>");
        }

        out.push_str("</table>");
        Ok(out)
    }

    fn table_row(
        &mut self,
        table: &TableData,
        row: usize,
        cell_tag: &str,
        disabled: EntityTypes,
        out: &mut String,
    ) -> Result<()> {
        let empty = ContentState::empty_paragraph();

        out.push_str("<tr>");
        for col in 0..table.num_cols {
            let cell = table.cell(row, col).unwrap_or(&empty);
            out.push('<');
            out.push_str(cell_tag);
            out.push('>');
            out.push_str(&self.document(cell, disabled)?);
            out.push_str("</");
            out.push_str(cell_tag);
            out.push('>');
        }
        out.push_str("</tr>");
        Ok(())
    }

    fn quote(&mut self, quote: &QuoteData, disabled: EntityTypes) -> Result<String> {
        let body = self.document(&quote.body, disabled)?;
        Ok(format!("<div class=\"multi-line-quote\">{body}</div>"))
    }

    fn custom_block(&mut self, custom: &CustomBlockData, disabled: EntityTypes) -> Result<String> {
        let body = self.document(&custom.body, disabled)?;
        let id = custom.block_type_id.as_str();

        let Some(kind) = self.registry.get(id) else {
            debug!("custom block type {id} is not registered");
            return Ok(default_custom_block(id, &body));
        };

        let block = CustomBlock {
            id,
            label: &kind.label,
            html: &body,
        };
        Ok(kind
            .wrap(&block)
            .unwrap_or_else(|| default_custom_block(id, &body)))
    }
}

fn default_custom_block(id: &str, body: &str) -> String {
    let mut out = String::from("<div");
    push_attr(&mut out, "data-custom-block-type", id);
    out.push('>');
    out.push_str(body);
    out.push_str("</div>");
    out
}

/// Collapse runs of `-` so `text` cannot end an HTML comment
fn comment_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch != '-' || !out.ends_with('-') {
            out.push(ch);
        }
    }
    out
}

fn article_embed(article: &ArticleEmbedData) -> String {
    let mut out = String::from("<div class=\"article-embed\"");
    push_attr(&mut out, "data-article-id", &article.article_id);
    out.push('>');
    out.push_str(&article.html);
    out.push_str("</div>");
    out
}
