use crate::record::{RecordResult, StreamRecord, TransformedRecord};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Errors that fail a single record
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to decode record data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Record data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to parse record as JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Record has no payload at detail.data")]
    MissingPayload,

    #[error("Payload at detail.data is not a JSON object")]
    NotAnObject,

    #[error("Payload is missing field {0}")]
    MissingField(&'static str),

    #[error("Failed to serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Transform every record in a batch.
///
/// The output has one entry per input record, in input order. A record that
/// fails is reported as `ProcessingFailed` with its original data.
#[instrument(skip(records), fields(count = records.len()))]
pub fn transform_batch(records: &[StreamRecord]) -> Vec<TransformedRecord> {
    let output: Vec<TransformedRecord> = records.iter().map(transform_record).collect();

    let failed = output
        .iter()
        .filter(|r| r.result == RecordResult::ProcessingFailed)
        .count();

    info!(
        total = output.len(),
        ok = output.len() - failed,
        failed = failed,
        "Batch transformed"
    );

    output
}

/// Transform one record, falling back to its original data on failure
pub fn transform_record(record: &StreamRecord) -> TransformedRecord {
    match transform_data(&record.data) {
        Ok(data) => {
            debug!(record_id = %record.record_id, "Record transformed");
            metrics::counter!("transformer.records.ok").increment(1);
            TransformedRecord::ok(record.record_id.clone(), data)
        }
        Err(e) => {
            warn!(
                record_id = %record.record_id,
                error = %e,
                "Failed to transform record"
            );
            metrics::counter!("transformer.records.failed").increment(1);
            TransformedRecord::failed(record)
        }
    }
}

/// Decode, reshape and re-encode one record's data
pub fn transform_data(encoded: &str) -> Result<String, TransformError> {
    let raw = String::from_utf8(STANDARD.decode(encoded)?)?;
    let entry: Value = serde_json::from_str(&raw).map_err(TransformError::Parse)?;

    let payload = extract_payload(entry)?;
    let payload = reshape_payload(payload)?;

    let mut line = serde_json::to_string(&Value::Object(payload)).map_err(TransformError::Serialize)?;
    line.push('\n');

    Ok(STANDARD.encode(line.as_bytes()))
}

/// Take the event payload nested at `detail.data`
fn extract_payload(mut entry: Value) -> Result<Map<String, Value>, TransformError> {
    let payload = entry
        .get_mut("detail")
        .and_then(|detail| detail.get_mut("data"))
        .map(Value::take)
        .ok_or(TransformError::MissingPayload)?;

    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(TransformError::NotAnObject),
    }
}

/// Rename `date` to `timestamp` and flatten `details` into a JSON string
pub fn reshape_payload(mut payload: Map<String, Value>) -> Result<Map<String, Value>, TransformError> {
    let date = payload
        .remove("date")
        .ok_or(TransformError::MissingField("date"))?;
    payload.insert("timestamp".to_string(), date);

    let details = payload
        .get("details")
        .ok_or(TransformError::MissingField("details"))?;
    let details = serde_json::to_string(details).map_err(TransformError::Serialize)?;
    payload.insert("details".to_string(), Value::String(details));

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &Value) -> String {
        STANDARD.encode(serde_json::to_vec(value).unwrap())
    }

    fn decode(data: &str) -> String {
        String::from_utf8(STANDARD.decode(data).unwrap()).unwrap()
    }

    fn log_event(data: Value) -> Value {
        json!({
            "version": "0",
            "id": "d1b7a5b2-6c9e-4a8e-9f7f-2d6f1e0c3b4a",
            "detail-type": "Auth Log",
            "source": "aws.partner/auth",
            "detail": {
                "log_id": "90020240102150405",
                "data": data
            }
        })
    }

    fn record(id: &str, data: String) -> StreamRecord {
        StreamRecord {
            record_id: id.to_string(),
            approximate_arrival_timestamp: None,
            data,
        }
    }

    fn sample_payload() -> Value {
        json!({
            "log_id": "90020240102150405",
            "date": "2024-01-02",
            "type": "s",
            "client_id": "abc123",
            "ip": "203.0.113.7",
            "details": { "a": 1 }
        })
    }

    #[test]
    fn test_date_renamed_to_timestamp() {
        let output = transform_data(&encode(&log_event(sample_payload()))).unwrap();
        let payload: Value = serde_json::from_str(&decode(&output)).unwrap();

        assert!(payload.get("date").is_none());
        assert_eq!(payload["timestamp"], "2024-01-02");
    }

    #[test]
    fn test_details_stringified() {
        let output = transform_data(&encode(&log_event(sample_payload()))).unwrap();
        let payload: Value = serde_json::from_str(&decode(&output)).unwrap();

        assert_eq!(payload["details"], Value::String(r#"{"a":1}"#.to_string()));
        let reparsed: Value = serde_json::from_str(payload["details"].as_str().unwrap()).unwrap();
        assert_eq!(reparsed, json!({ "a": 1 }));
    }

    #[test]
    fn test_other_fields_preserved_and_newline_terminated() {
        let output = transform_data(&encode(&log_event(sample_payload()))).unwrap();
        let text = decode(&output);

        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);

        let payload: Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(payload["log_id"], "90020240102150405");
        assert_eq!(payload["client_id"], "abc123");
        assert_eq!(payload["ip"], "203.0.113.7");
        // Only the nested payload is emitted, not the event envelope
        assert!(payload.get("detail").is_none());
    }

    #[test]
    fn test_non_object_details_are_stringified() {
        let mut data = sample_payload();
        data["details"] = json!(null);

        let output = transform_data(&encode(&log_event(data))).unwrap();
        let payload: Value = serde_json::from_str(&decode(&output)).unwrap();
        assert_eq!(payload["details"], "null");
    }

    #[test]
    fn test_invalid_base64_fails() {
        assert!(matches!(
            transform_data("not base64!!"),
            Err(TransformError::Decode(_))
        ));
    }

    #[test]
    fn test_invalid_json_fails() {
        let data = STANDARD.encode(b"{not json");
        assert!(matches!(transform_data(&data), Err(TransformError::Parse(_))));
    }

    #[test]
    fn test_missing_payload_fails() {
        let data = encode(&json!({ "detail": { "other": 1 } }));
        assert!(matches!(
            transform_data(&data),
            Err(TransformError::MissingPayload)
        ));
    }

    #[test]
    fn test_non_object_payload_fails() {
        let data = encode(&log_event(json!(["2024-01-02"])));
        assert!(matches!(transform_data(&data), Err(TransformError::NotAnObject)));
    }

    #[test]
    fn test_missing_date_or_details_fails() {
        let mut no_date = sample_payload();
        no_date.as_object_mut().unwrap().remove("date");
        assert!(matches!(
            transform_data(&encode(&log_event(no_date))),
            Err(TransformError::MissingField("date"))
        ));

        let mut no_details = sample_payload();
        no_details.as_object_mut().unwrap().remove("details");
        assert!(matches!(
            transform_data(&encode(&log_event(no_details))),
            Err(TransformError::MissingField("details"))
        ));
    }

    #[test]
    fn test_failed_record_keeps_original_data() {
        let original = "this is !! not base64".to_string();
        let result = transform_record(&record("r-1", original.clone()));

        assert_eq!(result.record_id, "r-1");
        assert_eq!(result.result, RecordResult::ProcessingFailed);
        assert_eq!(result.data, original);
    }

    #[test]
    fn test_batch_preserves_order_and_cardinality() {
        let good = encode(&log_event(sample_payload()));
        let bad_json = STANDARD.encode(b"[1, 2");
        let records = vec![
            record("r-1", good.clone()),
            record("r-2", "@@@".to_string()),
            record("r-3", good),
            record("r-4", bad_json.clone()),
        ];

        let output = transform_batch(&records);

        assert_eq!(output.len(), records.len());
        let ids: Vec<&str> = output.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, vec!["r-1", "r-2", "r-3", "r-4"]);

        let results: Vec<RecordResult> = output.iter().map(|r| r.result).collect();
        assert_eq!(
            results,
            vec![
                RecordResult::Ok,
                RecordResult::ProcessingFailed,
                RecordResult::Ok,
                RecordResult::ProcessingFailed,
            ]
        );
        assert_eq!(output[1].data, "@@@");
        assert_eq!(output[3].data, bad_json);
    }

    #[test]
    fn test_empty_batch() {
        assert!(transform_batch(&[]).is_empty());
    }
}
