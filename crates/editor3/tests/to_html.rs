use editor3::{from_raw, from_raw_value, Editor3Service, EntityType, RenderOptions, Warning};
use pretty_assertions::assert_eq;
use scraper::Html;
use serde_json::{json, Value};

macro_rules! fixture {
    ($name:literal) => {
        include_str!(concat!("fixtures/", $name, ".json"))
    };
}

fn to_html(json: &str) -> String {
    Editor3Service::new().raw_to_html(json).unwrap()
}

/// Re-serializing the parsed fragment is only lossless when every tag is
/// closed in the order it was opened.
fn assert_balanced(html: &str) {
    let fragment = Html::parse_fragment(html);
    assert_eq!(fragment.root_element().inner_html(), html);
}

fn raw_list(items: &[(&str, u8, &str)]) -> String {
    let blocks: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (block_type, depth, text))| {
            json!({
                "key": format!("k{i}"),
                "text": text,
                "type": block_type,
                "depth": depth,
                "inlineStyleRanges": [],
                "entityRanges": [],
                "data": {}
            })
        })
        .collect();
    json!({ "blocks": blocks, "entityMap": {} }).to_string()
}

#[test]
fn test_sentence_without_formatting() {
    let html = to_html(fixture!("plain_sentence"));
    assert_eq!(
        html,
        r#"<p>The name of Highlaws comes from the Old English hēah-hlāw, meaning "high mounds".</p>"#
    );
}

#[test]
fn test_simple_inline_styles() {
    let html = to_html(fixture!("inline_styles"));
    assert_eq!(
        html,
        r#"<p><b>The</b> <i>name</i> <u>of</u> <s>Highlaws</s> <sub>comes</sub> <sup>from</sup> the Old English hēah-hlāw, meaning "high mounds".</p>"#
    );
    assert_balanced(&html);
}

#[test]
fn test_headings() {
    assert_eq!(
        to_html(fixture!("headings")),
        r#"<h1>The name of Highlaws comes from the Old English hēah-hlāw</h1>
<h2>, meaning "high mounds". In the past,</h2>
<h3>variant spellings included Heelawes, Hielawes,</h3>
<h4>Highlows, Hielows, and Hylaws.</h4>
<h5>[2] The hamlet appears in a survey of Holm Cultram dating back</h5>
<h6>to the year 1538, during the reign of Henry VIII.</h6>
<p>There were at least thirteen families resident in Highlaws at that time.[3] Abdastartus is a genus of lace bugs in the family Tingidae. There are about five described species in Abdastartus.</p>"#
    );
}

#[test]
fn test_blockquote() {
    assert_eq!(
        to_html(fixture!("blockquote")),
        r#"<blockquote>The name of Highlaws comes from the Old English hēah-hlāw, meaning "high mounds".</blockquote>
<p>In the past, variant spellings included Heelawes, Hielawes, Highlows, Hielows, and Hylaws.</p>"#
    );
}

#[test]
fn test_code_block() {
    assert_eq!(
        to_html(fixture!("code_block")),
        r#"<pre><code>The name of Highlaws comes from the Old English hēah-hlāw, meaning "high mounds".</code></pre>
<p>In the past, variant spellings included Heelawes, Hielawes, Highlows, Hielows, and Hylaws.</p>"#
    );
}

#[test]
fn test_link() {
    assert_eq!(
        to_html(fixture!("link")),
        r#"<p>The name of <a href="https://en.wikipedia.org/wiki/Highlaws">Highlaws</a> comes from the Old English hēah-hlāw, meaning "high mounds".</p>"#
    );
}

#[test]
fn test_attachment() {
    assert_eq!(
        to_html(fixture!("attachment")),
        r#"<p>The name of <a data-attachment="5c9dd26d149f114c61d84db0">Highlaws</a> comes from the Old English hēah-hlāw, meaning "high mounds".</p>"#
    );
}

#[test]
fn test_simple_table() {
    assert_eq!(
        to_html(fixture!("table")),
        "<table><tbody><tr><td><p>three</p></td><td><p>column</p></td><td><p>table</p></td></tr>\
         <tr><td><p>example</p></td><td><p>right</p></td><td><p>here</p></td></tr></tbody></table>"
    );
}

#[test]
fn test_table_with_inline_styles() {
    let html = to_html(fixture!("table_styles"));
    assert_eq!(
        html,
        "<table><tbody><tr><td><p><b>three</b></p></td><td><p><i>column</i></p></td><td><p><u>table</u></p></td></tr>\
         <tr><td><p><sub>example</sub></p></td><td><p><sup>right</sup></p></td><td><p><s>here</s></p></td></tr></tbody></table>"
    );
    assert_balanced(&html);
}

#[test]
fn test_image() {
    assert_eq!(
        to_html(fixture!("image")),
        r#"<!-- EMBED START Image {id: "editor_0"} -->
<figure>
    <img src="http://localhost:5000/api/upload-raw/5c9d03dd149f116747b6730f.jpg" alt="pin alt" />
    <figcaption>pin dec</figcaption>
</figure>
<!-- EMBED END Image {id: "editor_0"} -->"#
    );
}

#[test]
fn test_media_id_prefix() {
    let service = Editor3Service::with_options(RenderOptions {
        media_id_prefix: "body_".to_string(),
        ..Default::default()
    });
    let html = service.raw_to_html(fixture!("image")).unwrap();
    assert!(html.starts_with(r#"<!-- EMBED START Image {id: "body_0"} -->"#));
    assert!(html.ends_with(r#"<!-- EMBED END Image {id: "body_0"} -->"#));
}

#[test]
fn test_embed() {
    assert_eq!(
        to_html(fixture!("embed")),
        r#"<div class="embed-block"><div><div style="left: 0; width: 100%; height: 0; position: relative; padding-bottom: 56.2493%;"><iframe src="//cdn.iframe.ly/api/iframe?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DG5-KJgVsoUM&amp;key=87ca3314a9fa775b5c3a7726100694b0" style="border: 0; top: 0; left: 0; width: 100%; height: 100%; position: absolute;" allowfullscreen scrolling="no" allow="autoplay; encrypted-media"></iframe></div></div></div>"#
    );
}

#[test]
fn test_unordered_list() {
    assert_eq!(
        to_html(fixture!("unordered_list")),
        "<ul>
  <li>The name of</li>
  <li>Highlaws comes</li>
  <li>from the Old English</li>
  <li>hēah-hlāw</li>
</ul>"
    );
}

#[test]
fn test_ordered_list() {
    assert_eq!(
        to_html(fixture!("ordered_list")),
        "<ol>
  <li>The name of</li>
  <li>Highlaws comes</li>
  <li>from the Old English</li>
  <li>hēah-hlāw</li>
</ol>"
    );
}

#[test]
fn test_adjacent_lists() {
    let html = to_html(fixture!("adjacent_lists"));
    assert_eq!(
        html,
        r#"<ol>
  <li>The name of Highlaws comes from the Old English</li>
</ol>
<ul>
  <li>hēah-hlāw, meaning "high mounds". In the past, variant</li>
</ul>
<ol>
  <li>spellings included Heelawes, Hielawes, Highlows,</li>
  <li>Hielows, and Hylaws.</li>
</ol>"#
    );
    assert_balanced(&html);
}

#[test]
fn test_nested_inline_styles() {
    let html = to_html(fixture!("nested_styles"));
    assert_eq!(
        html,
        r#"<p>The <b>name of Highlaws <u>comes</u> from <i>the</i> Old English</b> hēah-hlāw, meaning "high mounds". In the past, variant spellings included Heelawes, Hielawes, Highlows, Hielows, and Hylaws.</p>"#
    );
    assert_balanced(&html);
}

#[test]
fn test_overlapping_inline_styles() {
    let html = to_html(fixture!("overlapping_styles"));
    assert_eq!(
        html,
        r#"<p><b>The <i>name of Highlaws comes <u>from the Old English hēah-hlāw, meaning</u></i></b><i><u> "high mounds". In the past</u></i><u>, variant spellings included Heelawes, Hielawes, Highlows, Hielows, and <sup>Hyla</sup></u><sup>w</sup>s.</p>"#
    );
    assert_balanced(&html);
}

#[test]
fn test_inline_styles_overlapping_links() {
    let html = to_html(fixture!("styles_and_links"));
    assert_eq!(
        html,
        r#"<p>The name of <b>Highlaws </b><a href="https://en.wikipedia.org/wiki/Highlaws"><b>comes</b> from</a> the <a href="https://en.wikipedia.org/wiki/Highlaws">Old English <u>hēah-hl</u><b><u>āw</u></b></a><b><u>, me</u></b><u>aning</u> "high mounds". In the past, variant spellings included Heelawes, Hielawes, Highlows, Hielows, and Hylaws.</p>"#
    );
    assert_balanced(&html);
}

#[test]
fn test_annotations() {
    let json = json!({
        "entityMap": {},
        "blocks": [{
            "key": "2sso6",
            "text": "lorem ipsum dolor",
            "type": "unstyled",
            "depth": 0,
            "inlineStyleRanges": [
                {"offset": 6, "length": 5, "style": "ANNOTATION-1"},
                {"offset": 12, "length": 5, "style": "ANNOTATION-2"}
            ],
            "entityRanges": [],
            "data": {"MULTIPLE_HIGHLIGHTS": {"lastHighlightIds": {"ANNOTATION": 2}}}
        }]
    });
    let content = from_raw_value(json).unwrap();
    assert_eq!(
        Editor3Service::new().to_html(&content).unwrap(),
        r#"<p>lorem <span annotation-id="1">ipsum</span> <span annotation-id="2">dolor</span></p>"#
    );
}

#[test]
fn test_nested_lists() {
    let json = raw_list(&[
        ("unordered-list-item", 0, "1"),
        ("unordered-list-item", 0, "2"),
        ("unordered-list-item", 1, "11"),
        ("unordered-list-item", 1, "22"),
        ("unordered-list-item", 1, "3"),
        ("unordered-list-item", 2, "4"),
        ("unordered-list-item", 2, "5"),
        ("unordered-list-item", 3, "6"),
        ("unordered-list-item", 3, "6.5"),
        ("unordered-list-item", 2, "x"),
        ("unordered-list-item", 1, "7"),
        ("unordered-list-item", 1, "33"),
        ("unordered-list-item", 0, "8"),
    ]);
    let html = to_html(&json);
    assert_eq!(
        html,
        "<ul>
  <li>1</li>
  <li>2
    <ul>
      <li>11</li>
      <li>22</li>
      <li>3
        <ul>
          <li>4</li>
          <li>5
            <ul>
              <li>6</li>
              <li>6.5</li>
            </ul>
          </li>
          <li>x</li>
        </ul>
      </li>
      <li>7</li>
      <li>33</li>
    </ul>
  </li>
  <li>8</li>
</ul>"
    );
    assert_balanced(&html);
}

#[test]
fn test_abruptly_ending_list() {
    let json = raw_list(&[
        ("unordered-list-item", 0, "1"),
        ("unordered-list-item", 1, "2"),
        ("unordered-list-item", 2, "3"),
        ("unordered-list-item", 3, "4"),
        ("unstyled", 0, "abc"),
    ]);
    assert_eq!(
        to_html(&json),
        "<ul>
  <li>1
    <ul>
      <li>2
        <ul>
          <li>3
            <ul>
              <li>4</li>
            </ul>
          </li>
        </ul>
      </li>
    </ul>
  </li>
</ul>
<p>abc</p>"
    );
}

#[test]
fn test_utf16_offsets_outside_the_bmp() {
    // each emoji is two UTF-16 code units
    let json = json!({
        "blocks": [{
            "key": "e1",
            "text": "😀😀 bold",
            "type": "unstyled",
            "inlineStyleRanges": [{"offset": 5, "length": 4, "style": "BOLD"}],
            "entityRanges": [{"offset": 0, "length": 2, "key": "0"}]
        }],
        "entityMap": {"0": {"type": "LINK", "mutability": "MUTABLE", "data": {"url": "https://example.com/?a=1&b=2"}}}
    });
    let html = to_html(&json.to_string());
    assert_eq!(
        html,
        r#"<p><a href="https://example.com/?a=1&amp;b=2">😀</a>😀 <b>bold</b></p>"#
    );
}

#[test]
fn test_soft_newlines() {
    let json = raw_list(&[("unstyled", 0, "one\ntwo & three"), ("code-block", 0, "a\nb")]);
    assert_eq!(
        to_html(&json),
        "<p>one<br>two &amp; three</p>\n<pre><code>a\nb</code></pre>"
    );
}

#[test]
fn test_disabled_entity_types() {
    let mut service = Editor3Service::new();
    service.disable(EntityType::Table).disable(EntityType::Media);
    assert_eq!(service.raw_to_html(fixture!("table")).unwrap(), "");
    assert_eq!(service.raw_to_html(fixture!("image")).unwrap(), "");
    assert!(service
        .raw_to_html(fixture!("embed"))
        .unwrap()
        .starts_with("<div class=\"embed-block\">"));
}

#[test]
fn test_unrecognized_entity_is_reported() {
    let json = json!({
        "blocks": [
            {"key": "a", "text": "before", "type": "unstyled"},
            {"key": "b", "text": " ", "type": "atomic", "entityRanges": [{"offset": 0, "length": 1, "key": 0}]},
            {"key": "c", "text": "after", "type": "unstyled"}
        ],
        "entityMap": {"0": {"type": "POLL", "mutability": "IMMUTABLE", "data": {"question": "?"}}}
    });
    let rendered = Editor3Service::new().render_raw(&json.to_string()).unwrap();
    assert_eq!(rendered.html, "<p>before</p>\n<p>after</p>");
    assert_eq!(
        rendered.warnings,
        vec![Warning::UnrecognizedEntity {
            block: "b".to_string(),
            key: "0".to_string(),
            type_name: "POLL".to_string(),
        }]
    );
}

#[test]
fn test_widget_ids_are_deterministic() {
    let embed = |html: &str| {
        json!({"type": "EMBED", "mutability": "MUTABLE", "data": {"data": {"html": html}}})
    };
    let widget = r#"<script>KV.widget({"guid": "w"});</script>"#;
    let json = json!({
        "blocks": [
            {"key": "a", "text": " ", "type": "atomic", "entityRanges": [{"offset": 0, "length": 1, "key": 0}]},
            {"key": "b", "text": " ", "type": "atomic", "entityRanges": [{"offset": 0, "length": 1, "key": 1}]}
        ],
        "entityMap": {"0": embed(widget), "1": embed(widget)}
    })
    .to_string();

    let service = Editor3Service::new();
    let first = service.raw_to_html(&json).unwrap();
    assert!(first.contains(r#"<div id="qumu-widget-1"></div>"#));
    assert!(first.contains(r#"<div id="qumu-widget-2"></div>"#));
    assert_eq!(service.raw_to_html(&json).unwrap(), first);
}

#[test]
fn test_rendering_is_deterministic() {
    let content = from_raw(fixture!("styles_and_links")).unwrap();
    let service = Editor3Service::new();
    assert_eq!(
        service.to_html(&content).unwrap(),
        service.to_html(&content).unwrap()
    );
}

#[test]
fn test_missing_entity_is_an_error() {
    let json = json!({
        "blocks": [{"key": "a", "text": "x", "entityRanges": [{"offset": 0, "length": 1, "key": 9}]}],
        "entityMap": {}
    });
    assert!(matches!(
        Editor3Service::new().raw_to_html(&json.to_string()),
        Err(editor3::Error::Model(_))
    ));
}
