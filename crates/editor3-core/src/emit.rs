//! Tag emitters
//!
//! Both emitters turn a per-character sequence of target values into the
//! minimal markup needed to move from the previous value to the next one.
//! They are created fresh for every text block and must be flushed at the
//! end of the block, which leaves all emitted markup balanced.

use html_escape::encode_double_quoted_attribute;

use crate::entity::{Entity, EntityData, EntityKey, LinkData};
use crate::error::{Error, Result};
use crate::model::ContentState;
use crate::style::{InlineStyle, StyleSet};

/// Diffs consecutive style sets into open/close tags.
///
/// The open stack always equals the canonical-order list of the last
/// requested set (restricted to styles with markup). A transition keeps the
/// longest common prefix of both lists, closes the rest of the stack
/// top-down and opens the rest of the new list in canonical order.
#[derive(Debug, Default)]
pub struct StyleEmitter {
    open: Vec<InlineStyle>,
}

impl StyleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup needed before a character styled with `next`
    pub fn tags(&mut self, next: &StyleSet) -> String {
        let wanted: Vec<&InlineStyle> = next.iter().filter(|s| s.has_markup()).collect();

        let keep = self
            .open
            .iter()
            .zip(&wanted)
            .take_while(|(open, want)| *open == **want)
            .count();

        if keep == self.open.len() && keep == wanted.len() {
            return String::new();
        }

        let mut out = self.close_to(keep);
        for style in &wanted[keep..] {
            if let Some(tag) = style.open_tag() {
                out.push_str(&tag);
            }
            self.open.push((*style).clone());
        }
        out
    }

    /// Close every open style
    pub fn flush(&mut self) -> String {
        self.close_to(0)
    }

    fn close_to(&mut self, len: usize) -> String {
        let mut out = String::new();
        while self.open.len() > len {
            if let Some(tag) = self.open.pop().and_then(|s| s.close_tag()) {
                out.push_str(tag);
            }
        }
        out
    }
}

/// Diffs consecutive entity references into anchor tags.
///
/// Markup for a span is resolved once, when the span opens.
#[derive(Debug)]
pub struct EntityEmitter<'a> {
    content: &'a ContentState,
    block: &'a str,
    current: Option<OpenEntity<'a>>,
}

#[derive(Debug)]
struct OpenEntity<'a> {
    key: &'a EntityKey,
    close: &'static str,
}

impl<'a> EntityEmitter<'a> {
    /// Create an emitter resolving keys through `content`; `block` names the
    /// block being rendered in error messages
    pub fn new(content: &'a ContentState, block: &'a str) -> Self {
        Self {
            content,
            block,
            current: None,
        }
    }

    /// Whether `next` starts a different span
    pub fn changes(&self, next: Option<&EntityKey>) -> bool {
        self.current.as_ref().map(|open| open.key) != next
    }

    /// Whether moving to `next` closes or opens an anchor. Spans of other
    /// entity types are tracked without markup.
    pub fn has_markup(&self, next: Option<&EntityKey>) -> Result<bool> {
        if !self.changes(next) {
            return Ok(false);
        }
        if self.current.as_ref().is_some_and(|open| !open.close.is_empty()) {
            return Ok(true);
        }
        match next {
            Some(key) => Ok(matches!(self.resolve(key)?.data, EntityData::Link(_))),
            None => Ok(false),
        }
    }

    /// Look up `key`, failing if the content state has no such entity
    pub fn resolve(&self, key: &EntityKey) -> Result<&'a Entity> {
        self.content.entity(key).ok_or_else(|| Error::MissingEntity {
            block: self.block.to_string(),
            key: key.to_string(),
        })
    }

    /// Markup needed before a character referencing `next`
    pub fn tags(&mut self, next: Option<&'a EntityKey>) -> Result<String> {
        if !self.changes(next) {
            return Ok(String::new());
        }

        let mut out = self.flush();
        if let Some(key) = next {
            let entity = self.resolve(key)?;
            let close = match &entity.data {
                EntityData::Link(link) => {
                    out.push_str(&link_open_tag(link));
                    "</a>"
                }
                _ => "",
            };
            self.current = Some(OpenEntity { key, close });
        }
        Ok(out)
    }

    /// Close the open span, if any
    pub fn flush(&mut self) -> String {
        self.current
            .take()
            .map(|open| open.close.to_string())
            .unwrap_or_default()
    }
}

fn link_open_tag(link: &LinkData) -> String {
    let mut tag = String::from("<a");
    if let Some(attachment) = &link.attachment {
        push_attr(&mut tag, "data-attachment", attachment);
    } else if let Some(href) = &link.href {
        push_attr(&mut tag, "href", href);
    }
    if let Some(title) = &link.title {
        push_attr(&mut tag, "title", title);
    }
    if let Some(target) = &link.target {
        push_attr(&mut tag, "target", target);
    }
    tag.push('>');
    tag
}

pub(crate) fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
