//! Wire types for the Firehose data-transformation contract.
//!
//! `data` stays in its base64 form so a record that cannot be decoded can be
//! handed back untouched.

use serde::{Deserialize, Serialize};

/// Batch of records delivered by the stream for transformation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationEvent {
    #[serde(default)]
    pub invocation_id: Option<String>,
    #[serde(default)]
    pub delivery_stream_arn: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub records: Vec<StreamRecord>,
}

/// A single encoded record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    pub record_id: String,
    #[serde(default)]
    pub approximate_arrival_timestamp: Option<i64>,
    pub data: String,
}

/// Per-record outcome reported back to the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordResult {
    Ok,
    ProcessingFailed,
}

/// Transformed (or failed) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedRecord {
    pub record_id: String,
    pub result: RecordResult,
    pub data: String,
}

impl TransformedRecord {
    pub fn ok(record_id: impl Into<String>, data: String) -> Self {
        Self {
            record_id: record_id.into(),
            result: RecordResult::Ok,
            data,
        }
    }

    /// Failed record carrying the input data unchanged
    pub fn failed(record: &StreamRecord) -> Self {
        Self {
            record_id: record.record_id.clone(),
            result: RecordResult::ProcessingFailed,
            data: record.data.clone(),
        }
    }
}

/// Response returned to the stream, one record per input record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformationResponse {
    pub records: Vec<TransformedRecord>,
}
