//! Behavioural properties of header patching on whole documents.

use matter_patch::{BlockKind, EmitOptions, HeaderStyle, PatchSet, SourceRecord};
use serde_json::{json, Value};

const DECK: &str = "---
# Deck settings
theme: seriph # try 'default' too
title: Quarterly Review

# Shown on the cover slide
background:
  image: cover.png   # 1920x1080
  dim: true
tags: [finance, q3]
---

# Quarterly Review
";

fn render(record: &SourceRecord) -> String {
    record.render(&EmitOptions::default()).unwrap()
}

fn patch(entries: Value) -> PatchSet {
    serde_json::from_value(entries).unwrap()
}

/// The key line of the top-level pair `key` plus its indented continuation lines.
fn pair_text(text: &str, key: &str) -> String {
    let prefix = format!("{key}:");
    let mut lines = text
        .split_inclusive('\n')
        .skip_while(|line| !line.starts_with(&prefix));
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines.take_while(|line| line.starts_with(' ')) {
        out.push_str(line);
    }
    out
}

#[test]
fn untouched_pairs_are_byte_identical() {
    let mut record = SourceRecord::parse(DECK).unwrap();
    let before = render(&record);
    assert_eq!(before, DECK);

    record
        .apply_patch(&patch(json!({"title": "Q3 Review", "layout": "cover"})))
        .unwrap();
    let after = render(&record);

    for key in ["theme", "background", "tags"] {
        assert_eq!(pair_text(&after, key), pair_text(&before, key), "pair {key} changed");
    }
    assert!(after.contains("# Deck settings\ntheme: seriph # try 'default' too\n"));
    assert!(after.contains("\n# Shown on the cover slide\nbackground:\n"));
    assert!(after.ends_with("---\n\n# Quarterly Review\n"));
}

#[test]
fn patched_document_snapshot() {
    let mut record = SourceRecord::parse(DECK).unwrap();
    record
        .apply_patch(&patch(json!({
            "title": "Q3 Review",
            "tags": ["finance", "q3", "board"],
            "drawings": {"persist": false},
        })))
        .unwrap();

    insta::assert_snapshot!(render(&record), @r"
---
# Deck settings
theme: seriph # try 'default' too
title: Q3 Review

# Shown on the cover slide
background:
  image: cover.png   # 1920x1080
  dim: true
tags:
  - finance
  - q3
  - board
drawings:
  persist: false
---

# Quarterly Review
");
}

#[test]
fn upsert_is_idempotent() {
    let set = patch(json!({"title": "Again", "transition": "fade", "fonts": {"sans": "Inter"}}));

    let mut once = SourceRecord::parse(DECK).unwrap();
    once.apply_patch(&set).unwrap();

    let mut twice = SourceRecord::parse(DECK).unwrap();
    twice.apply_patch(&set).unwrap();
    twice.apply_patch(&set).unwrap();

    assert_eq!(once.values(), twice.values());
    assert_eq!(once.header(), twice.header());
    assert_eq!(render(&once), render(&twice));
}

#[test]
fn delete_is_idempotent() {
    let mut once = SourceRecord::parse(DECK).unwrap();
    once.apply_patch(&patch(json!({"theme": null}))).unwrap();

    let mut twice = SourceRecord::parse(DECK).unwrap();
    twice.apply_patch(&patch(json!({"theme": null}))).unwrap();
    twice.apply_patch(&patch(json!({"theme": null}))).unwrap();

    assert_eq!(render(&once), render(&twice));
    assert!(!render(&once).contains("theme"));
    assert!(render(&once).starts_with("---\n# Deck settings\ntitle: Quarterly Review\n"));

    let mut absent = SourceRecord::parse(DECK).unwrap();
    absent.apply_patch(&patch(json!({"missing": null}))).unwrap();
    assert_eq!(render(&absent), DECK);
}

#[test]
fn new_keys_append_in_patch_order() {
    let mut record = SourceRecord::parse("---\n---\n").unwrap();
    let mut set = PatchSet::new();
    set.set("a", 1).set("b", 2);
    record.apply_patch(&set).unwrap();

    let keys: Vec<&str> = record.header().unwrap().mapping().unwrap().keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(render(&record), "---\na: 1\nb: 2\n---\n");
}

#[test]
fn header_is_materialized_on_first_key() {
    let mut record = SourceRecord::parse("# Hello\n").unwrap();
    assert_eq!(record.header_style(), HeaderStyle::None);

    let mut set = PatchSet::new();
    set.set("title", "Hi");
    record.apply_patch(&set).unwrap();

    assert_eq!(record.header_style(), HeaderStyle::Block(BlockKind::Fenced));
    let mapping = record.header().unwrap().mapping().unwrap();
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get("title").unwrap().to_json(), json!("Hi"));
    assert_eq!(record.values().len(), 1);
    assert_eq!(record.values()["title"], json!("Hi"));
    assert_eq!(render(&record), "---\ntitle: Hi\n---\n# Hello\n");
}

#[test]
fn null_clears_both_views() {
    let mut record = SourceRecord::parse("---\nfoo: 1\nbar: 2\n---\n").unwrap();
    record.apply_patch(&patch(json!({"foo": null}))).unwrap();

    assert!(record.header().unwrap().mapping().unwrap().get("foo").is_none());
    assert!(!record.values().contains_key("foo"));
    assert_eq!(render(&record), "---\nbar: 2\n---\n");
}

#[test]
fn last_write_wins() {
    let mut record = SourceRecord::parse("---\nx: 0\n---\n").unwrap();
    record.apply_patch(&patch(json!({"x": 1}))).unwrap();
    record.apply_patch(&patch(json!({"x": 2}))).unwrap();

    assert_eq!(record.values()["x"], json!(2));
    assert_eq!(render(&record), "---\nx: 2\n---\n");
}

#[test]
fn repeated_key_in_one_patch_set_applies_in_order() {
    let set: PatchSet = serde_json::from_str(r#"{"x": 1, "y": true, "x": 2}"#).unwrap();
    let mut record = SourceRecord::parse("body\n").unwrap();
    record.apply_patch(&set).unwrap();

    assert_eq!(record.values()["x"], json!(2));
    assert_eq!(render(&record), "---\nx: 2\ny: true\n---\nbody\n");
}

#[test]
fn nested_values_are_replaced_whole() {
    let mut record = SourceRecord::parse(DECK).unwrap();
    record
        .apply_patch(&patch(json!({"background": {"image": "new.png"}})))
        .unwrap();

    let text = render(&record);
    assert!(text.contains("# Shown on the cover slide\nbackground:\n  image: new.png\ntags:"));
    assert!(!text.contains("1920x1080"));
    assert_eq!(record.values()["background"], json!({"image": "new.png"}));
}

#[test]
fn code_block_header_keeps_its_fences() {
    let mut record = SourceRecord::parse("```yaml\nlayout: center\n```\n\n# Title\n").unwrap();
    let mut set = PatchSet::new();
    set.set("class", "text-center");
    record.apply_patch(&set).unwrap();

    assert_eq!(
        render(&record),
        "```yaml\nlayout: center\nclass: text-center\n```\n\n# Title\n"
    );
}

#[test]
fn reparsing_patched_output_matches_decoded_view() {
    let mut record = SourceRecord::parse(DECK).unwrap();
    record
        .apply_patch(&patch(json!({
            "title": "true",
            "count": 12,
            "ratio": 1.5,
            "empty": [],
            "theme": null,
        })))
        .unwrap();

    let reparsed = SourceRecord::parse(&render(&record)).unwrap();
    assert_eq!(reparsed.values(), record.values());
}
