//! Source location information for header nodes.

use serde::{Deserialize, Serialize};

/// Position of an element in the header text it was parsed from.
///
/// Offsets are relative to the start of the header, not the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Byte offset from start of the header (0-based)
    pub offset: usize,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, in characters not bytes)
    pub col: usize,

    /// Length in bytes
    pub len: usize,
}

impl SourceInfo {
    pub fn new(offset: usize, line: usize, col: usize, len: usize) -> Self {
        Self {
            offset,
            line,
            col,
            len,
        }
    }

    /// Create a SourceInfo from a yaml-rust2 marker.
    ///
    /// yaml-rust2 counts lines from 1 and columns from 0.
    pub fn from_marker(marker: &yaml_rust2::scanner::Marker, len: usize) -> Self {
        Self {
            offset: marker.index(),
            line: marker.line(),
            col: marker.col() + 1,
            len,
        }
    }
}
