use crate::record::{TransformationEvent, TransformationResponse};
use crate::transform::transform_batch;
use lambda_runtime::{Error, LambdaEvent};
use tracing::{info, instrument};

/// Handles a Firehose transformation invocation
#[instrument(skip(event), fields(request_id = %event.context.request_id))]
pub async fn handler(event: LambdaEvent<TransformationEvent>) -> Result<TransformationResponse, Error> {
    info!(
        invocation_id = ?event.payload.invocation_id,
        record_count = event.payload.records.len(),
        "Transforming records"
    );

    let records = transform_batch(&event.payload.records);

    Ok(TransformationResponse { records })
}
