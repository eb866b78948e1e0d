//! Show command implementation

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn execute(input: &Path) -> Result<()> {
    let record = super::read_record(input)?;

    let values: Map<String, Value> = record
        .values()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let report = json!({
        "style": record.header_style(),
        "values": values,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
