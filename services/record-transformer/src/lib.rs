//! Record Transformer
//!
//! Firehose data-transformation function for the auth log delivery stream.
//! Each incoming record is a base64-encoded event whose `detail.data` object
//! is the log entry. The function emits that entry as one line of JSON in the
//! shape of the catalog table: `date` becomes `timestamp` and the nested
//! `details` object is flattened into a JSON string column.
//!
//! Records are independent. A record that cannot be decoded or reshaped is
//! returned as `ProcessingFailed` with its original data so the stream can
//! route it to its error output.

pub mod config;
pub mod handler;
pub mod record;
pub mod transform;

pub use config::Config;
pub use record::{
    RecordResult, StreamRecord, TransformationEvent, TransformationResponse, TransformedRecord,
};
pub use transform::{transform_batch, transform_data, transform_record, TransformError};
