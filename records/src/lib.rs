use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One persisted item: its registered type, display name and the values of
/// its parameters in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ItemRecord {
    pub fn parameter(&self, name: &str) -> Option<&ParameterRecord> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("collection file must contain a list of item records")]
    NotASequence,
}

/// A record that could not be decoded; the rest of the collection is still
/// usable.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordIssue {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DecodedRecords {
    pub records: Vec<(usize, ItemRecord)>,
    pub issues: Vec<RecordIssue>,
}

pub fn encode(records: &[ItemRecord]) -> Result<String, RecordError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Decodes a persisted collection record by record. Only a document that is
/// not a JSON array fails as a whole.
pub fn decode(text: &str) -> Result<DecodedRecords, RecordError> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(entries) = document else {
        return Err(RecordError::NotASequence);
    };
    let mut decoded = DecodedRecords::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ItemRecord>(entry) {
            Ok(record) => decoded.records.push((index, record)),
            Err(err) => {
                log::warn!("skipping undecodable record #{index}: {err}");
                decoded.issues.push(RecordIssue {
                    index,
                    message: err.to_string(),
                });
            }
        }
    }
    Ok(decoded)
}

pub fn save_to_file<P: AsRef<Path>>(records: &[ItemRecord], path: P) -> Result<(), RecordError> {
    let data = serde_json::to_vec_pretty(records)?;
    fs::write(path, data)?;
    Ok(())
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<DecodedRecords, RecordError> {
    let data = fs::read_to_string(path)?;
    decode(&data)
}
