//! Command implementations

pub mod patch;
pub mod show;

use anyhow::{Context, Result};
use matter_patch::SourceRecord;
use std::fs;
use std::path::Path;

/// Read and parse a document.
fn read_record(input: &Path) -> Result<SourceRecord> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    SourceRecord::parse(&text)
        .with_context(|| format!("failed to parse header of {}", input.display()))
}
