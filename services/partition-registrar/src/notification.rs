use crate::registrar::RegistrarError;
use aws_lambda_events::s3::{S3Event, S3EventRecord};

/// An object-created notification reduced to what partition registration needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNotification {
    pub bucket_name: String,
    pub object_key: String,
}

impl ObjectNotification {
    pub fn new(bucket_name: impl Into<String>, object_key: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_key: object_key.into(),
        }
    }

    /// Extract notifications from an S3 event, failing on the first incomplete record
    pub fn from_event(event: &S3Event) -> Result<Vec<Self>, RegistrarError> {
        event.records.iter().map(Self::try_from).collect()
    }
}

impl TryFrom<&S3EventRecord> for ObjectNotification {
    type Error = RegistrarError;

    fn try_from(record: &S3EventRecord) -> Result<Self, Self::Error> {
        let bucket_name = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or(RegistrarError::MissingField("s3.bucket.name"))?;
        let object_key = record
            .s3
            .object
            .key
            .clone()
            .ok_or(RegistrarError::MissingField("s3.object.key"))?;

        Ok(Self {
            bucket_name,
            object_key,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Object-created record in the shape S3 delivers it
    pub(crate) fn s3_record(bucket: &str, key: Option<&str>) -> Value {
        let mut object = json!({
            "size": 1024,
            "eTag": "0123456789abcdef0123456789abcdef",
            "sequencer": "0A1B2C3D4E5F678901"
        });
        if let Some(key) = key {
            object["key"] = json!(key);
        }

        json!({
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2024-01-02T15:04:05.000Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": { "principalId": "EXAMPLE" },
            "requestParameters": { "sourceIPAddress": "127.0.0.1" },
            "responseElements": {
                "x-amz-request-id": "EXAMPLE123456789",
                "x-amz-id-2": "EXAMPLE123/5678abcdefghijklambdaisawesome/mnopqrstuvwxyzABCDEFGH"
            },
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "partition-trigger",
                "bucket": {
                    "name": bucket,
                    "ownerIdentity": { "principalId": "EXAMPLE" },
                    "arn": format!("arn:aws:s3:::{bucket}")
                },
                "object": object
            }
        })
    }

    pub(crate) fn s3_event(records: Vec<Value>) -> S3Event {
        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    #[test]
    fn test_from_event_extracts_bucket_and_key() {
        let event = s3_event(vec![s3_record("auth-logs", Some("logs/2024/01/02/15/file.json"))]);

        let notifications = ObjectNotification::from_event(&event).unwrap();
        assert_eq!(
            notifications,
            vec![ObjectNotification::new("auth-logs", "logs/2024/01/02/15/file.json")]
        );
    }

    #[test]
    fn test_from_event_keeps_record_order() {
        let event = s3_event(vec![
            s3_record("auth-logs", Some("logs/2024/01/02/15/a.json")),
            s3_record("auth-logs", Some("logs/2024/01/02/16/b.json")),
        ]);

        let keys: Vec<String> = ObjectNotification::from_event(&event)
            .unwrap()
            .into_iter()
            .map(|n| n.object_key)
            .collect();
        assert_eq!(keys, vec!["logs/2024/01/02/15/a.json", "logs/2024/01/02/16/b.json"]);
    }

    #[test]
    fn test_from_event_rejects_record_without_key() {
        let event = s3_event(vec![s3_record("auth-logs", None)]);

        let err = ObjectNotification::from_event(&event).unwrap_err();
        assert!(matches!(err, RegistrarError::MissingField("s3.object.key")));
    }
}
