use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use vyomgarud_shared::cms::unwrap_data_envelope;

/// Read raw records from a file holding either a JSON array or a CMS
/// `{ "data": [...] }` envelope.
pub fn read_raw_records(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_raw_records(&content).with_context(|| format!("invalid records in {}", path.display()))
}

pub fn parse_raw_records(content: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(content).context("not valid JSON")?;
    match document {
        Value::Array(records) => Ok(records),
        other => unwrap_data_envelope(other).map_err(|detail| anyhow!(detail)),
    }
}

pub fn read_optional_records(path: Option<&Path>) -> Result<Vec<Value>> {
    path.map(read_raw_records)
        .transpose()
        .map(Option::unwrap_or_default)
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", to_pretty_json(value)?);
    Ok(())
}
