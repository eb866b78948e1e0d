//! The root of a header tree.

use crate::emit::render_document;
use crate::{EmitOptions, Mapping, Node, Result};
use serde_json::Value;

/// A parsed (or newly created) header.
///
/// `before` and `after` are comment and blank lines that belong to the
/// document rather than to a pair: text above the root (or above its first
/// pair), and text below the last top-level pair. Deleting pairs never
/// touches them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    before: String,
    contents: Option<Node>,
    after: String,
}

impl Document {
    /// A document with no contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document whose root is an empty mapping.
    pub fn empty_mapping() -> Self {
        Self {
            contents: Some(Node::Mapping(Mapping::new())),
            ..Self::default()
        }
    }

    pub(crate) fn from_parts(before: String, contents: Option<Node>, after: String) -> Self {
        Self {
            before,
            contents,
            after,
        }
    }

    pub fn contents(&self) -> Option<&Node> {
        self.contents.as_ref()
    }

    pub fn before(&self) -> &str {
        &self.before
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    pub fn is_mapping(&self) -> bool {
        self.contents.as_ref().is_some_and(Node::is_mapping)
    }

    pub fn mapping(&self) -> Option<&Mapping> {
        self.contents.as_ref().and_then(Node::as_mapping)
    }

    pub fn mapping_mut(&mut self) -> Option<&mut Mapping> {
        self.contents.as_mut().and_then(Node::as_mapping_mut)
    }

    /// The root mapping, replacing any other root with an empty mapping first.
    ///
    /// Document-level comments survive the replacement.
    pub fn mapping_mut_or_reset(&mut self) -> &mut Mapping {
        if !self.is_mapping() {
            if self.contents.is_some() {
                tracing::debug!("replacing non-mapping header root with an empty mapping");
            }
            self.contents = Some(Node::Mapping(Mapping::new()));
        }
        match &mut self.contents {
            Some(Node::Mapping(mapping)) => mapping,
            _ => unreachable!("header root was just set to a mapping"),
        }
    }

    /// Remove the top-level pair `key`. Returns whether a pair was removed.
    ///
    /// A document without a mapping root has nothing to remove.
    pub fn delete(&mut self, key: &str) -> bool {
        self.mapping_mut()
            .is_some_and(|mapping| mapping.remove(key).is_some())
    }

    /// The plain view of the whole header (`null` when empty).
    pub fn to_json(&self) -> Value {
        self.contents.as_ref().map_or(Value::Null, Node::to_json)
    }

    /// Render the header back to YAML text.
    pub fn render(&self, options: &EmitOptions) -> Result<String> {
        render_document(self, options)
    }
}
