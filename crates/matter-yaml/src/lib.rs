//! # matter-yaml
//!
//! Editable YAML trees for document headers (front matter).
//!
//! A [`Document`] produced by [`parse`] keeps the verbatim text of every
//! top-level pair: its leading comment lines, the key as written, and the
//! value with its inline comment and continuation lines. Rendering an
//! untouched document returns the input unchanged; replacing a value only
//! re-renders that value.
//!
//! ## Design
//!
//! Decoding is delegated to `yaml-rust2`. The lossless layer is a line split
//! of the header into top-level pairs, cross-checked against the decoded
//! mapping. Anything the split cannot account for (flow mappings, complex
//! keys, a non-mapping root) is kept as one verbatim block and rendered
//! structurally once it is edited.
//!
//! ## Example
//!
//! ```rust
//! use matter_yaml::{parse, EmitOptions, Node, Pair};
//!
//! let mut doc = parse("# shown on the cover\ntitle: Hello\n").unwrap();
//! let value = Node::from_json(&serde_json::json!(["a", "b"])).unwrap();
//! doc.mapping_mut_or_reset().push(Pair::new("tags", value));
//!
//! let text = doc.render(&EmitOptions::default()).unwrap();
//! assert_eq!(text, "# shown on the cover\ntitle: Hello\ntags:\n  - a\n  - b\n");
//! ```

mod convert;
mod document;
mod emit;
mod error;
mod node;
mod parser;
mod source_info;

pub use convert::yaml_to_json;
pub use document::Document;
pub use emit::EmitOptions;
pub use error::{EncodeError, Error, Result};
pub use node::{Mapping, Node, Pair, Scalar, Sequence, MAX_NODE_DEPTH};
pub use parser::{decode_value, parse};
pub use source_info::SourceInfo;
