//! Rendering header trees back to text.

use crate::{Document, Node, Pair, Result, Scalar};
use serde::Deserialize;
use std::mem;
use yaml_rust2::{Yaml, YamlEmitter, YamlLoader};

/// Options for rendering nodes that have no verbatim text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Spaces used to indent a block value under its key.
    pub indent: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

pub(crate) fn render_document(doc: &Document, options: &EmitOptions) -> Result<String> {
    let mut out = String::new();
    push_block(&mut out, doc.before());
    if let Some(contents) = doc.contents() {
        render_root(contents, options, &mut out)?;
    }
    push_block(&mut out, doc.after());
    Ok(out)
}

fn render_root(node: &Node, options: &EmitOptions, out: &mut String) -> Result<()> {
    if let Some(raw) = node.raw() {
        push_block(out, raw);
        return Ok(());
    }
    match node {
        Node::Mapping(mapping) => {
            for pair in mapping.pairs() {
                render_pair(pair, options, out)?;
            }
        }
        other if is_block(other) => {
            start_line(out);
            write_entries(other, 0, true, options, out)?;
            end_line(out);
        }
        other => {
            let mut text = String::new();
            write_value(other, 0, options, &mut text)?;
            push_block(out, text.trim_start());
            end_line(out);
        }
    }
    Ok(())
}

fn render_pair(pair: &Pair, options: &EmitOptions, out: &mut String) -> Result<()> {
    push_block(out, pair.before());
    start_line(out);
    out.push_str(&key_text(pair.key())?);
    out.push(':');
    match pair.value().raw() {
        Some(raw) => out.push_str(raw),
        None => {
            render_value(pair.value(), options, out)?;
            end_line(out);
        }
    }
    Ok(())
}

/// Write a top-level value after its key's colon.
fn render_value(node: &Node, options: &EmitOptions, out: &mut String) -> Result<()> {
    write_value(node, options.indent, options, out)
}

/// Write `node` after a colon or dash. Block entries go at column `col`.
fn write_value(node: &Node, col: usize, options: &EmitOptions, out: &mut String) -> Result<()> {
    match node {
        Node::Scalar(scalar) => {
            out.push(' ');
            out.push_str(&scalar_text(scalar.value())?);
        }
        Node::Sequence(_) | Node::Mapping(_) if !is_block(node) => {
            out.push_str(if node.is_mapping() { " {}" } else { " []" });
        }
        block => write_entries(block, col, false, options, out)?,
    }
    Ok(())
}

/// Write the entries of a block collection at column `col`.
///
/// With `inline_first` the first entry continues the current line, as in
/// `- key: value`.
fn write_entries(
    node: &Node,
    col: usize,
    inline_first: bool,
    options: &EmitOptions,
    out: &mut String,
) -> Result<()> {
    let mut inline = inline_first;
    match node {
        Node::Sequence(sequence) => {
            for item in sequence.items() {
                start_entry(out, col, mem::take(&mut inline));
                out.push('-');
                if is_block(item) {
                    out.push(' ');
                    write_entries(item, col + 2, true, options, out)?;
                } else {
                    write_value(item, col + 2, options, out)?;
                }
            }
        }
        Node::Mapping(mapping) => {
            for pair in mapping.pairs() {
                start_entry(out, col, mem::take(&mut inline));
                out.push_str(&key_text(pair.key())?);
                out.push(':');
                write_value(pair.value(), col + options.indent, options, out)?;
            }
        }
        Node::Scalar(_) => write_value(node, col, options, out)?,
    }
    Ok(())
}

fn start_entry(out: &mut String, col: usize, inline: bool) {
    if !inline {
        out.push('\n');
        out.extend(std::iter::repeat_n(' ', col));
    }
}

/// Non-empty sequence or mapping.
fn is_block(node: &Node) -> bool {
    match node {
        Node::Sequence(sequence) => !sequence.is_empty(),
        Node::Mapping(mapping) => !mapping.is_empty(),
        Node::Scalar(_) => false,
    }
}

fn key_text(key: &Scalar) -> Result<String> {
    match key.raw() {
        Some(raw) => Ok(raw.to_string()),
        None => scalar_text(key.value()),
    }
}

/// Scalar text: plain when it reads back as the same string, otherwise
/// whatever the emitter writes (quoted where needed).
fn scalar_text(yaml: &Yaml) -> Result<String> {
    match yaml {
        Yaml::String(text) if reads_back_as_plain(text) => Ok(text.clone()),
        other => emit(other),
    }
}

/// Whether `text` written unquoted decodes to the string `text`.
fn reads_back_as_plain(text: &str) -> bool {
    if text.contains(['\n', '\r']) {
        return false;
    }
    YamlLoader::load_from_str(text)
        .is_ok_and(|docs| matches!(docs.as_slice(), [Yaml::String(read)] if read == text))
}

/// Emit a single YAML value without the document marker.
pub(crate) fn emit(yaml: &Yaml) -> Result<String> {
    let mut out = String::new();
    YamlEmitter::new(&mut out).dump(yaml)?;
    let body = out.strip_prefix("---").unwrap_or(&out);
    let body = body
        .strip_prefix('\n')
        .or_else(|| body.strip_prefix(' '))
        .unwrap_or(body);
    Ok(body.to_string())
}

fn push_block(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    start_line(out);
    out.push_str(text);
}

fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn end_line(out: &mut String) {
    if !out.ends_with('\n') {
        out.push('\n');
    }
}
