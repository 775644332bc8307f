//! Third-party widget detection in embed code
//!
//! Qumu widgets are pasted as a script calling `KV.widget({...})`. The widget
//! needs an element to mount into, so the config gets a `selector` pointing at
//! a fresh `<div>` appended after the script.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static QUMU_WIDGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"KV\.widget\(\s*(\{[\s\S]*?\})\s*\)").expect("widget pattern is valid")
});

/// Whether `html` contains a recognized widget signature
pub fn is_widget(html: &str) -> bool {
    QUMU_WIDGET.is_match(html)
}

/// Rewrite widget embed code to mount into an element with id `mount_id`.
///
/// Returns `None` when `html` holds no recognized widget or its config is not
/// a JSON object.
pub fn rewrite_widget(html: &str, mount_id: &str) -> Option<String> {
    let config = QUMU_WIDGET.captures(html)?.get(1)?;
    let mut fields: Map<String, Value> = serde_json::from_str(config.as_str()).ok()?;
    fields.insert("selector".to_string(), Value::String(format!("#{mount_id}")));
    let config_json = serde_json::to_string(&fields).ok()?;

    let mut out = String::with_capacity(html.len() + config_json.len() + 32);
    out.push_str(&html[..config.start()]);
    out.push_str(&config_json);
    out.push_str(&html[config.end()..]);
    out.push_str("<div id=\"");
    out.push_str(mount_id);
    out.push_str("\"></div>");
    Some(out)
}
