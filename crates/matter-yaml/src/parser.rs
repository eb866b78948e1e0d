//! Header parser that builds editable, lossless `Document` trees.

use crate::convert::yaml_to_json;
use crate::node::{Mapping, Node, Pair, Scalar};
use crate::{Document, Result, SourceInfo};
use serde_json::Value;
use std::mem;
use yaml_rust2::yaml::Hash;
use yaml_rust2::{Yaml, YamlLoader};

/// Parse header text into an editable [`Document`].
///
/// Only the first YAML document in `content` is used. Rendering the result
/// without edits reproduces `content` exactly.
///
/// # Example
///
/// ```rust
/// use matter_yaml::parse;
///
/// let doc = parse("title: Deck # working title\n").unwrap();
/// let title = doc.mapping().unwrap().get("title").unwrap();
/// assert_eq!(title.as_scalar().unwrap().as_str(), Some("Deck"));
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn parse(content: &str) -> Result<Document> {
    let root = YamlLoader::load_from_str(content)?.into_iter().next();

    let Some(root) = root else {
        // Empty or comment-only header.
        return Ok(Document::from_parts(content.to_string(), None, String::new()));
    };

    if let Yaml::Hash(hash) = &root {
        if let Some(doc) = split_block_mapping(content, hash) {
            return Ok(doc);
        }
        tracing::warn!(
            "header mapping is not a plain block mapping; it is re-rendered when edited"
        );
    }

    let (before, rest) = split_leading_trivia(content);
    let node = Node::from_yaml(&root).with_raw(rest.to_string());
    Ok(Document::from_parts(before.to_string(), Some(node), String::new()))
}

/// Decode a single YAML value, e.g. the `VALUE` of a `KEY:VALUE` argument.
///
/// Empty input decodes to `null`.
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn decode_value(text: &str) -> Result<Value> {
    let root = YamlLoader::load_from_str(text)?.into_iter().next();
    Ok(root.as_ref().map_or(Value::Null, yaml_to_json))
}

/// Text of one top-level pair before it is matched against the decoded hash.
struct RawPair<'a> {
    before: String,
    key_text: &'a str,
    value_text: String,
    offset: usize,
    line: usize,
}

/// Split a block mapping into top-level pairs, keeping every byte.
///
/// Returns `None` when the text is not a block mapping whose top-level keys
/// line up one-to-one with the decoded `hash`.
fn split_block_mapping(content: &str, hash: &Hash) -> Option<Document> {
    let mut before = String::new();
    let mut pending = String::new();
    let mut raw_pairs: Vec<RawPair<'_>> = Vec::new();
    let mut offset = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += line.len();

        if is_trivia(line) {
            pending.push_str(line);
            continue;
        }

        if let Some((key_text, rest)) = split_key_line(line) {
            // Lines above the first pair describe the whole header.
            if raw_pairs.is_empty() {
                before = mem::take(&mut pending);
            }
            raw_pairs.push(RawPair {
                before: mem::take(&mut pending),
                key_text,
                value_text: rest.to_string(),
                offset: start,
                line: index + 1,
            });
        } else {
            // Continuation of the current value; trivia in between belongs to it.
            let current = raw_pairs.last_mut()?;
            current.value_text.push_str(&mem::take(&mut pending));
            current.value_text.push_str(line);
        }
    }

    if raw_pairs.len() != hash.len() {
        return None;
    }

    let mut mapping = Mapping::new();
    for raw in raw_pairs {
        let key = decode_key(raw.key_text)?;
        let value = hash.get(&key)?;
        let len = raw.key_text.len() + 1 + raw.value_text.len();
        mapping.pairs.push(Pair {
            before: raw.before,
            key: Scalar::new(key).with_raw(raw.key_text),
            value: Node::from_yaml(value).with_raw(raw.value_text),
            span: Some(SourceInfo::new(raw.offset, raw.line, 1, len)),
        });
    }

    Some(Document::from_parts(
        before,
        Some(Node::Mapping(mapping)),
        pending,
    ))
}

fn decode_key(text: &str) -> Option<Yaml> {
    match YamlLoader::load_from_str(text).ok()?.into_iter().next()? {
        Yaml::Array(_) | Yaml::Hash(_) => None,
        key => Some(key),
    }
}

/// Blank lines and comment lines at any indentation.
fn is_trivia(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn split_leading_trivia(content: &str) -> (&str, &str) {
    let mut end = 0;
    for line in content.split_inclusive('\n') {
        if !is_trivia(line) {
            break;
        }
        end += line.len();
    }
    content.split_at(end)
}

/// Split a column-0 `key: value` line into the key text and the text after
/// the colon.
fn split_key_line(line: &str) -> Option<(&str, &str)> {
    let first = line.chars().next()?;
    match first {
        '"' | '\'' => {
            let close = closing_quote(line, first)?;
            let after = &line[close + 1..];
            let trimmed = after.trim_start_matches([' ', '\t']);
            let colon = close + 1 + (after.len() - trimmed.len());
            if !trimmed.starts_with(':') || !is_value_separator(&trimmed[1..]) {
                return None;
            }
            Some((&line[..colon], &line[colon + 1..]))
        }
        c if c.is_whitespace() || "-#[]{}?!&*|>%@`,".contains(c) => None,
        _ => {
            let mut search = 0;
            while let Some(pos) = line[search..].find(':') {
                let colon = search + pos;
                let key = &line[..colon];
                if key.contains(" #") || key.contains("\t#") {
                    return None;
                }
                if is_value_separator(&line[colon + 1..]) {
                    return Some((key, &line[colon + 1..]));
                }
                search = colon + 1;
            }
            None
        }
    }
}

fn is_value_separator(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with([' ', '\t', '\r', '\n'])
}

/// Byte index of the quote closing a quoted key that opens at index 0.
fn closing_quote(line: &str, quote: char) -> Option<usize> {
    let bytes = line.as_bytes();
    let quote = quote as u8;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quote == b'"' => i += 2,
            b'\'' if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') => i += 2,
            b if b == quote => return Some(i),
            b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}
