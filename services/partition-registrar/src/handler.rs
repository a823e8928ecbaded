use crate::catalog::PartitionCatalog;
use crate::notification::ObjectNotification;
use crate::registrar::PartitionRegistrar;
use aws_lambda_events::s3::S3Event;
use lambda_runtime::{Error, LambdaEvent};
use tracing::{info, instrument};

/// Handles the object-created event delivered by S3
#[instrument(skip(registrar, event), fields(request_id = %event.context.request_id))]
pub async fn handler<C: PartitionCatalog>(
    registrar: &PartitionRegistrar<C>,
    event: LambdaEvent<S3Event>,
) -> Result<(), Error> {
    info!(
        record_count = event.payload.records.len(),
        "Processing object notifications"
    );

    let notifications = ObjectNotification::from_event(&event.payload)?;
    registrar.register_partitions(&notifications).await?;

    Ok(())
}
