//! Patch sets and the patch engine.

use crate::{Error, Result, SourceRecord};
use matter_yaml::{Document, Node, Pair};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;

/// An ordered list of header updates. A `null` value deletes the key.
///
/// Unlike a map, a patch set may name the same key more than once; entries
/// are applied in order, so the last one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchSet {
    entries: Vec<(String, Value)>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Delete `key`.
    pub fn delete(&mut self, key: impl Into<String>) -> &mut Self {
        self.entries.push((key.into(), Value::Null));
        self
    }

    /// Append all entries of `other` after this set's entries.
    pub fn extend(&mut self, other: PatchSet) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for PatchSet {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }
}

impl From<serde_json::Map<String, Value>> for PatchSet {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Deserializes from a map, keeping entry order and repeated keys.
impl<'de> Deserialize<'de> for PatchSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PatchSetVisitor;

        impl<'de> Visitor<'de> for PatchSetVisitor {
            type Value = PatchSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from header keys to new values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<PatchSet, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(PatchSet { entries })
            }
        }

        deserializer.deserialize_map(PatchSetVisitor)
    }
}

impl SourceRecord {
    /// Apply `patch` to this record. See [`apply_patch`].
    ///
    /// # Errors
    ///
    /// See [`apply_patch`].
    pub fn apply_patch(&mut self, patch: &PatchSet) -> Result<()> {
        apply_patch(self, patch)
    }
}

/// Apply `patch` to the header of `record`, entry by entry.
///
/// A record without a header gets an empty `---` block first. For each
/// entry, in order:
///
/// - `null` removes the top-level pair and the decoded value (a missing key
///   is not an error);
/// - any other value replaces the value slot of the existing top-level pair,
///   keeping its key text and comments, or is appended as a new last pair.
///
/// Only top-level pairs are searched. Nested values are replaced whole.
///
/// # Errors
///
/// Stops at the first entry with an empty key or a value that cannot be
/// encoded ([`Error::EmptyKey`], [`Error::Encode`]). Entries before it stay
/// applied. An empty key changes nothing; a value that cannot be encoded is
/// already in the decoded view but not in the tree.
pub fn apply_patch(record: &mut SourceRecord, patch: &PatchSet) -> Result<()> {
    let (doc, values) = record.header_views_mut();

    for (index, (key, value)) in patch.iter().enumerate() {
        if key.is_empty() {
            return Err(Error::EmptyKey { index });
        }

        if value.is_null() {
            values.shift_remove(key);
            let removed = doc.delete(key);
            tracing::debug!(key = %key, removed, action = "delete", "patched header key");
            continue;
        }

        // The decoded view takes the value even if the tree cannot.
        values.insert(key.to_string(), value.clone());
        let node = Node::from_json(value).map_err(|source| Error::Encode {
            key: key.to_string(),
            source,
        })?;
        let action = upsert(doc, key, node);
        tracing::debug!(key = %key, action, "patched header key");
    }

    Ok(())
}

/// Replace the value of the top-level pair `key`, or append a new pair.
fn upsert(doc: &mut Document, key: &str, node: Node) -> &'static str {
    if let Some(mapping) = doc.mapping_mut() {
        for pair in mapping.pairs_mut() {
            if pair.matches_key(key) {
                pair.set_value(node);
                return "replace";
            }
        }
    }
    doc.mapping_mut_or_reset().push(Pair::new(key, node));
    "append"
}
