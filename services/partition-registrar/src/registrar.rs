use crate::catalog::{CatalogError, PartitionCatalog};
use crate::notification::ObjectNotification;
use crate::partition::PartitionDescriptor;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Errors that abort a registration batch
#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("Malformed object key {key:?}: expected {expected} segments, got {segments}")]
    MalformedKey {
        key: String,
        expected: usize,
        segments: usize,
    },

    #[error("Notification is missing field {0}")]
    MissingField(&'static str),
}

/// Registers delivered objects as partitions of a catalog table
pub struct PartitionRegistrar<C: PartitionCatalog> {
    catalog: Arc<C>,
    database: String,
    table: String,
}

impl<C: PartitionCatalog> PartitionRegistrar<C> {
    pub fn new(catalog: Arc<C>, database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            catalog,
            database: database.into(),
            table: table.into(),
        }
    }

    /// Register one partition per notification, in order.
    ///
    /// Catalog failures are logged and never stop the batch. A malformed
    /// object key does: it is returned immediately, after the notifications
    /// ahead of it have been registered.
    #[instrument(skip(self, notifications), fields(database = %self.database, table = %self.table, count = notifications.len()))]
    pub async fn register_partitions(
        &self,
        notifications: &[ObjectNotification],
    ) -> Result<(), RegistrarError> {
        for notification in notifications {
            let partition = PartitionDescriptor::from_notification(notification)?;
            self.register(notification, &partition).await;
        }

        Ok(())
    }

    async fn register(&self, notification: &ObjectNotification, partition: &PartitionDescriptor) {
        let result = self
            .catalog
            .create_partition(&self.database, &self.table, partition)
            .await;

        match result {
            Ok(()) => {
                info!(
                    bucket = %notification.bucket_name,
                    key = %notification.object_key,
                    date = %partition.date(),
                    hour = %partition.hour(),
                    location = %partition.location,
                    "Partition registered"
                );
                metrics::counter!("registrar.partitions.created").increment(1);
            }
            Err(CatalogError::AlreadyExists(message)) => {
                info!(
                    key = %notification.object_key,
                    date = %partition.date(),
                    hour = %partition.hour(),
                    message = %message,
                    "Partition already exists"
                );
                metrics::counter!("registrar.partitions.already_exists").increment(1);
            }
            Err(e) => {
                error!(
                    error = %e,
                    kind = e.kind(),
                    bucket = %notification.bucket_name,
                    key = %notification.object_key,
                    date = %partition.date(),
                    hour = %partition.hour(),
                    "Failed to register partition"
                );
                metrics::counter!("registrar.partitions.failed", "kind" => e.kind()).increment(1);
            }
        }
    }
}
