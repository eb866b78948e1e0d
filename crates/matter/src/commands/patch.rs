//! Patch command implementation

use anyhow::{Context, Result};
use matter_patch::{EmitOptions, PatchSet};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct PatchArgs {
    pub input: PathBuf,
    pub patch: Option<String>,
    pub metadata: Vec<String>,
    pub unset: Vec<String>,
    pub indent: usize,
    pub in_place: bool,
}

pub fn execute(args: PatchArgs) -> Result<()> {
    let mut record = super::read_record(&args.input)?;

    let patch = build_patch_set(&args)?;
    if patch.is_empty() {
        warn!("no header updates given");
    }

    record
        .apply_patch(&patch)
        .with_context(|| format!("failed to patch {}", args.input.display()))?;
    let output = record.render(&EmitOptions {
        indent: args.indent,
    })?;

    if args.in_place {
        fs::write(&args.input, output)
            .with_context(|| format!("failed to write {}", args.input.display()))?;
        info!(path = %args.input.display(), keys = patch.len(), "updated header");
    } else {
        print!("{output}");
    }
    Ok(())
}

/// Collect updates in order: `--patch` entries, then `-M`, then `--unset`.
fn build_patch_set(args: &PatchArgs) -> Result<PatchSet> {
    let mut patch = match &args.patch {
        Some(source) => {
            let json = read_source(source)?;
            serde_json::from_str::<PatchSet>(&json)
                .with_context(|| format!("{source} must contain a JSON object"))?
        }
        None => PatchSet::new(),
    };

    for item in &args.metadata {
        let (key, value) = item
            .split_once(':')
            .with_context(|| format!("expected KEY:VALUE, got `{item}`"))?;
        let value = matter_yaml::decode_value(value.trim())
            .with_context(|| format!("invalid YAML value for `{key}`"))?;
        patch.set(key.trim(), value);
    }

    for key in &args.unset {
        patch.delete(key.as_str());
    }

    Ok(patch)
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read patch from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
    }
}
