//! Header tree nodes.
//!
//! Parsed nodes may carry `raw`: the exact text they were read from. The
//! renderer writes `raw` verbatim and only falls back to emitting the
//! structure for nodes without it. Any edit through the mutating API drops
//! the `raw` text of the node being edited, so stale text is never written.

use crate::convert::{json_scalar_to_yaml, key_string, yaml_to_json};
use crate::{EncodeError, SourceInfo};
use serde_json::Value;
use yaml_rust2::yaml::Hash;
use yaml_rust2::Yaml;

/// Maximum nesting accepted by [`Node::from_json`].
pub const MAX_NODE_DEPTH: usize = 128;

/// A node of the header tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Sequence),
    Mapping(Mapping),
}

/// A leaf value (string, number, boolean or null).
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    value: Yaml,
    raw: Option<String>,
}

/// An ordered list of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    items: Vec<Node>,
    raw: Option<String>,
}

/// An ordered list of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    pub(crate) pairs: Vec<Pair>,
    raw: Option<String>,
}

/// One entry of a mapping.
///
/// `before` holds the blank and comment lines written above the pair. They
/// belong to the pair, so replacing its value keeps them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub(crate) before: String,
    pub(crate) key: Scalar,
    pub(crate) value: Node,
    pub(crate) span: Option<SourceInfo>,
}

impl Node {
    /// Build a node tree from a plain value.
    ///
    /// Arrays become sequences and objects become mappings (keys in object
    /// order). Fails when the value nests deeper than [`MAX_NODE_DEPTH`] or
    /// holds an integer above `i64::MAX`.
    pub fn from_json(value: &Value) -> Result<Self, EncodeError> {
        Self::from_json_at(value, 0)
    }

    fn from_json_at(value: &Value, depth: usize) -> Result<Self, EncodeError> {
        if depth >= MAX_NODE_DEPTH {
            return Err(EncodeError::TooDeep {
                limit: MAX_NODE_DEPTH,
            });
        }
        let node = match value {
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| Self::from_json_at(item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Node::Sequence(Sequence::new(items))
            }
            Value::Object(map) => {
                let mut mapping = Mapping::new();
                for (key, item) in map {
                    let value = Self::from_json_at(item, depth + 1)?;
                    mapping.push(Pair::new(key.as_str(), value));
                }
                Node::Mapping(mapping)
            }
            scalar => Node::Scalar(Scalar::new(json_scalar_to_yaml(scalar)?)),
        };
        Ok(node)
    }

    /// Build a node tree from a decoded YAML value. The result has no raw text.
    pub fn from_yaml(yaml: &Yaml) -> Self {
        match yaml {
            Yaml::Array(items) => {
                Node::Sequence(Sequence::new(items.iter().map(Self::from_yaml).collect()))
            }
            Yaml::Hash(hash) => {
                let mut mapping = Mapping::new();
                for (key, value) in hash {
                    mapping.pairs.push(Pair {
                        before: String::new(),
                        key: Scalar::new(key.clone()),
                        value: Self::from_yaml(value),
                        span: None,
                    });
                }
                Node::Mapping(mapping)
            }
            scalar => Node::Scalar(Scalar::new(scalar.clone())),
        }
    }

    /// The YAML value this node encodes.
    pub fn to_yaml(&self) -> Yaml {
        match self {
            Node::Scalar(scalar) => scalar.value.clone(),
            Node::Sequence(sequence) => {
                Yaml::Array(sequence.items.iter().map(Node::to_yaml).collect())
            }
            Node::Mapping(mapping) => {
                let mut hash = Hash::new();
                for pair in &mapping.pairs {
                    hash.insert(pair.key.value.clone(), pair.value.to_yaml());
                }
                Yaml::Hash(hash)
            }
        }
    }

    /// The plain view of this node.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Scalar(scalar) => yaml_to_json(&scalar.value),
            Node::Sequence(sequence) => {
                Value::Array(sequence.items.iter().map(Node::to_json).collect())
            }
            Node::Mapping(mapping) => Value::Object(
                mapping
                    .pairs
                    .iter()
                    .map(|pair| (key_string(&pair.key.value), pair.value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Verbatim source text, if this node was parsed and not edited since.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Node::Scalar(scalar) => scalar.raw.as_deref(),
            Node::Sequence(sequence) => sequence.raw.as_deref(),
            Node::Mapping(mapping) => mapping.raw.as_deref(),
        }
    }

    pub(crate) fn with_raw(mut self, text: String) -> Self {
        let slot = match &mut self {
            Node::Scalar(scalar) => &mut scalar.raw,
            Node::Sequence(sequence) => &mut sequence.raw,
            Node::Mapping(mapping) => &mut mapping.raw,
        };
        *slot = Some(text);
        self
    }
}

impl Scalar {
    pub fn new(value: Yaml) -> Self {
        Self { value, raw: None }
    }

    pub fn value(&self) -> &Yaml {
        &self.value
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub(crate) fn with_raw(mut self, text: &str) -> Self {
        self.raw = Some(text.to_string());
        self
    }
}

impl Sequence {
    pub fn new(items: Vec<Node>) -> Self {
        Self { items, raw: None }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Mutable access to the pairs, in order.
    ///
    /// The mapping's own verbatim text (if any) is dropped; pairs keep theirs.
    pub fn pairs_mut(&mut self) -> &mut [Pair] {
        self.raw = None;
        &mut self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Keys of the string-keyed pairs, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().filter_map(Pair::key_str)
    }

    /// Value of the first pair whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.pairs
            .iter()
            .find(|pair| pair.matches_key(key))
            .map(|pair| &pair.value)
    }

    /// The pair for `key`, if present.
    pub fn pair(&self, key: &str) -> Option<&Pair> {
        self.pairs.iter().find(|pair| pair.matches_key(key))
    }

    /// Append a pair after all existing pairs.
    pub fn push(&mut self, pair: Pair) {
        self.raw = None;
        self.pairs.push(pair);
    }

    /// Remove the pair for `key`. Absence is not an error.
    pub fn remove(&mut self, key: &str) -> Option<Pair> {
        let index = self.pairs.iter().position(|pair| pair.matches_key(key))?;
        self.raw = None;
        Some(self.pairs.remove(index))
    }
}

impl Pair {
    /// A new pair with a string key and no leading comments.
    pub fn new(key: &str, value: Node) -> Self {
        Self {
            before: String::new(),
            key: Scalar::new(Yaml::String(key.to_string())),
            value,
            span: None,
        }
    }

    pub fn key(&self) -> &Scalar {
        &self.key
    }

    pub fn key_str(&self) -> Option<&str> {
        self.key.as_str()
    }

    /// Whether the key is a string scalar equal to `key`.
    pub fn matches_key(&self, key: &str) -> bool {
        self.key.as_str() == Some(key)
    }

    pub fn value(&self) -> &Node {
        &self.value
    }

    /// Replace the value slot. Key text and leading comments stay untouched.
    pub fn set_value(&mut self, value: Node) {
        self.value = value;
    }

    /// Blank and comment lines written above this pair.
    pub fn before(&self) -> &str {
        &self.before
    }

    /// Location of the pair in the header it was parsed from.
    pub fn span(&self) -> Option<&SourceInfo> {
        self.span.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_builds_nested_nodes() {
        let node = Node::from_json(&json!({"title": "Deck", "tags": ["a", "b"], "n": 3})).unwrap();
        let mapping = node.as_mapping().unwrap();

        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["title", "tags", "n"]);
        assert_eq!(mapping.get("tags").unwrap().as_sequence().unwrap().len(), 2);
        assert_eq!(mapping.get("n").unwrap().as_scalar().unwrap().value(), &Yaml::Integer(3));
        assert_eq!(node.to_json(), json!({"title": "Deck", "tags": ["a", "b"], "n": 3}));
    }

    #[test]
    fn test_from_json_rejects_deep_nesting() {
        let mut value = json!(1);
        for _ in 0..MAX_NODE_DEPTH {
            value = json!([value]);
        }
        assert_eq!(
            Node::from_json(&value),
            Err(EncodeError::TooDeep {
                limit: MAX_NODE_DEPTH
            })
        );
    }

    #[test]
    fn test_from_json_accepts_depth_below_limit() {
        let mut value = json!(1);
        for _ in 0..MAX_NODE_DEPTH - 1 {
            value = json!([value]);
        }
        assert!(Node::from_json(&value).is_ok());
    }

    #[test]
    fn test_from_json_rejects_unsigned_beyond_i64() {
        let value = json!({"ids": [1, u64::MAX]});
        assert_eq!(
            Node::from_json(&value),
            Err(EncodeError::IntegerOutOfRange { value: u64::MAX })
        );
    }

    #[test]
    fn test_mapping_remove_and_push() {
        let mut mapping = Mapping::new();
        mapping.push(Pair::new("a", Node::Scalar(Scalar::new(Yaml::Integer(1)))));
        mapping.push(Pair::new("b", Node::Scalar(Scalar::new(Yaml::Integer(2)))));

        assert!(mapping.remove("missing").is_none());
        let removed = mapping.remove("a").unwrap();
        assert_eq!(removed.key_str(), Some("a"));
        assert_eq!(mapping.keys().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn test_edits_drop_raw_text() {
        let mut mapping = Node::from_yaml(&Yaml::Hash(Hash::new())).with_raw("{}".to_string());
        assert_eq!(mapping.raw(), Some("{}"));

        mapping
            .as_mapping_mut()
            .unwrap()
            .push(Pair::new("k", Node::Scalar(Scalar::new(Yaml::Null))));
        assert_eq!(mapping.raw(), None);
    }

    #[test]
    fn test_non_string_keys_never_match() {
        let node = Node::from_yaml(&yaml_rust2::YamlLoader::load_from_str("1: one").unwrap()[0]);
        let mapping = node.as_mapping().unwrap();
        assert!(mapping.get("1").is_none());
        assert_eq!(node.to_json(), json!({"1": "one"}));
    }
}
