//! Inline styles and their canonical ordering
//!
//! The variant order of [`InlineStyle`] is the canonical nesting order used by
//! the serializer: earlier variants are opened first and closed last, so a
//! [`StyleSet`] always produces the same tag sequence no matter in which order
//! the styles were applied in the editor.

use std::collections::BTreeSet;
use std::fmt;

/// A character-level inline style
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    Code,
    /// Editorial annotation highlight, `ANNOTATION-<id>`
    Annotation(u32),
    /// Any style without HTML markup (spellchecker marks, comment highlights, ...)
    Other(String),
}

/// Set of styles applied to one character, iterated in canonical order
pub type StyleSet = BTreeSet<InlineStyle>;

impl InlineStyle {
    /// Parse a raw editor style name (`BOLD`, `ANNOTATION-3`, ...)
    pub fn from_name(name: &str) -> Self {
        match name {
            "BOLD" => InlineStyle::Bold,
            "ITALIC" => InlineStyle::Italic,
            "UNDERLINE" => InlineStyle::Underline,
            "STRIKETHROUGH" => InlineStyle::Strikethrough,
            "SUBSCRIPT" => InlineStyle::Subscript,
            "SUPERSCRIPT" => InlineStyle::Superscript,
            "CODE" => InlineStyle::Code,
            _ => name
                .strip_prefix("ANNOTATION-")
                .and_then(|id| id.parse().ok())
                .map(InlineStyle::Annotation)
                .unwrap_or_else(|| InlineStyle::Other(name.to_string())),
        }
    }

    /// Opening tag, or `None` for styles that produce no markup
    pub fn open_tag(&self) -> Option<String> {
        let tag = match self {
            InlineStyle::Bold => "<b>",
            InlineStyle::Italic => "<i>",
            InlineStyle::Underline => "<u>",
            InlineStyle::Strikethrough => "<s>",
            InlineStyle::Subscript => "<sub>",
            InlineStyle::Superscript => "<sup>",
            InlineStyle::Code => "<code>",
            InlineStyle::Annotation(id) => return Some(format!("<span annotation-id=\"{id}\">")),
            InlineStyle::Other(_) => return None,
        };
        Some(tag.to_string())
    }

    /// Closing tag, or `None` for styles that produce no markup
    pub fn close_tag(&self) -> Option<&'static str> {
        match self {
            InlineStyle::Bold => Some("</b>"),
            InlineStyle::Italic => Some("</i>"),
            InlineStyle::Underline => Some("</u>"),
            InlineStyle::Strikethrough => Some("</s>"),
            InlineStyle::Subscript => Some("</sub>"),
            InlineStyle::Superscript => Some("</sup>"),
            InlineStyle::Code => Some("</code>"),
            InlineStyle::Annotation(_) => Some("</span>"),
            InlineStyle::Other(_) => None,
        }
    }

    pub fn has_markup(&self) -> bool {
        !matches!(self, InlineStyle::Other(_))
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineStyle::Bold => f.write_str("BOLD"),
            InlineStyle::Italic => f.write_str("ITALIC"),
            InlineStyle::Underline => f.write_str("UNDERLINE"),
            InlineStyle::Strikethrough => f.write_str("STRIKETHROUGH"),
            InlineStyle::Subscript => f.write_str("SUBSCRIPT"),
            InlineStyle::Superscript => f.write_str("SUPERSCRIPT"),
            InlineStyle::Code => f.write_str("CODE"),
            InlineStyle::Annotation(id) => write!(f, "ANNOTATION-{id}"),
            InlineStyle::Other(name) => f.write_str(name),
        }
    }
}

/// Build a style set from raw style names
pub fn style_set<'a>(names: impl IntoIterator<Item = &'a str>) -> StyleSet {
    names.into_iter().map(InlineStyle::from_name).collect()
}
