//! Documents split into header block and body.

use crate::Result;
use indexmap::IndexMap;
use matter_yaml::{Document, EmitOptions};
use serde::Serialize;
use serde_json::Value;

const FENCE: &str = "---";
const CODE_FENCE: &str = "```";

/// How a header block is delimited in the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// `---` lines at the very top of the document.
    Fenced,
    /// A leading `` ```yaml `` code block.
    CodeBlock,
}

/// Whether a document has a header block, and which kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    None,
    Block(BlockKind),
}

#[derive(Debug, Clone)]
struct HeaderBlock {
    kind: BlockKind,
    /// Everything up to and including the opening fence line.
    open: String,
    /// The closing fence line, with its line ending if it had one.
    close: String,
    doc: Document,
}

/// One document: header tree, decoded header values, and body.
///
/// The tree and the decoded values are only changed together, through
/// [`SourceRecord::apply_patch`].
#[derive(Debug, Clone)]
pub struct SourceRecord {
    header: Option<HeaderBlock>,
    values: IndexMap<String, Value>,
    body: String,
}

impl SourceRecord {
    /// Split `text` into header block and body and parse the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header block is not valid YAML.
    pub fn parse(text: &str) -> Result<Self> {
        let Some(split) = split_header(text) else {
            return Ok(Self {
                header: None,
                values: IndexMap::new(),
                body: text.to_string(),
            });
        };

        let doc = matter_yaml::parse(split.header)?;
        let values = match doc.to_json() {
            Value::Object(map) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };

        Ok(Self {
            header: Some(HeaderBlock {
                kind: split.kind,
                open: split.open.to_string(),
                close: split.close.to_string(),
                doc,
            }),
            values,
            body: split.body.to_string(),
        })
    }

    pub fn header_style(&self) -> HeaderStyle {
        self.header
            .as_ref()
            .map_or(HeaderStyle::None, |block| HeaderStyle::Block(block.kind))
    }

    /// The header tree, if the document has a header block.
    pub fn header(&self) -> Option<&Document> {
        self.header.as_ref().map(|block| &block.doc)
    }

    /// Decoded header values, in header order.
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Both views of the header, creating an empty `---` block if needed.
    pub(crate) fn header_views_mut(
        &mut self,
    ) -> (&mut Document, &mut IndexMap<String, Value>) {
        let block = self.header.get_or_insert_with(|| {
            tracing::debug!("document has no header block; creating one");
            HeaderBlock {
                kind: BlockKind::Fenced,
                open: format!("{FENCE}\n"),
                close: format!("{FENCE}\n"),
                doc: Document::empty_mapping(),
            }
        });
        (&mut block.doc, &mut self.values)
    }

    /// Re-assemble the document text.
    ///
    /// # Errors
    ///
    /// Returns an error if an edited header value cannot be emitted.
    pub fn render(&self, options: &EmitOptions) -> Result<String> {
        let mut out = String::new();
        if let Some(block) = &self.header {
            out.push_str(&block.open);
            let header = block.doc.render(options)?;
            out.push_str(&header);
            if !header.is_empty() && !header.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&block.close);
        }
        out.push_str(&self.body);
        Ok(out)
    }
}

struct HeaderSplit<'a> {
    kind: BlockKind,
    open: &'a str,
    header: &'a str,
    close: &'a str,
    body: &'a str,
}

fn split_header(text: &str) -> Option<HeaderSplit<'_>> {
    split_fenced(text).or_else(|| split_code_block(text))
}

/// `---` on the first line, closed by the next line that is exactly `---`.
fn split_fenced(text: &str) -> Option<HeaderSplit<'_>> {
    let first = text.split_inclusive('\n').next()?;
    if first.trim_end() != FENCE || !first.ends_with('\n') {
        return None;
    }
    let (header, close, body) = find_close(&text[first.len()..], |line| line == FENCE)?;
    Some(HeaderSplit {
        kind: BlockKind::Fenced,
        open: first,
        header,
        close,
        body,
    })
}

/// A `` ```yaml `` block, after optional leading whitespace.
fn split_code_block(text: &str) -> Option<HeaderSplit<'_>> {
    let trimmed = text.trim_start();
    let lead = text.len() - trimmed.len();
    let first = trimmed.split_inclusive('\n').next()?;
    let info = first.trim_end().strip_prefix(CODE_FENCE)?.trim();
    if !matches!(info, "yaml" | "yml") || !first.ends_with('\n') {
        return None;
    }
    let open_len = lead + first.len();
    let (header, close, body) = find_close(&text[open_len..], |line| line == CODE_FENCE)?;
    Some(HeaderSplit {
        kind: BlockKind::CodeBlock,
        open: &text[..open_len],
        header,
        close,
        body,
    })
}

/// Split `rest` at the first line accepted by `is_close`.
fn find_close(rest: &str, is_close: impl Fn(&str) -> bool) -> Option<(&str, &str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_close(line.trim_end()) {
            let end = offset + line.len();
            return Some((&rest[..offset], &rest[offset..end], &rest[end..]));
        }
        offset += line.len();
    }
    None
}
