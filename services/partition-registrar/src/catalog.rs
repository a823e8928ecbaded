use crate::config::CatalogConfig;
use crate::partition::PartitionDescriptor;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_glue::config::Builder as GlueConfigBuilder;
use aws_sdk_glue::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_glue::operation::create_partition::CreatePartitionError;
use aws_sdk_glue::types::{Column, PartitionInput, SerDeInfo, SkewedInfo, StorageDescriptor};
use aws_sdk_glue::Client as GlueClient;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors returned by the catalog when creating a partition
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Partition already exists: {0}")]
    AlreadyExists(String),

    #[error("Database or table not found: {0}")]
    EntityNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Request throttled: {0}")]
    Throttled(String),

    #[error("Invalid partition input: {0}")]
    InvalidInput(String),

    #[error("Catalog service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("Catalog request failed: {0}")]
    Transport(String),
}

impl CatalogError {
    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::AlreadyExists(_) => "already_exists",
            CatalogError::EntityNotFound(_) => "entity_not_found",
            CatalogError::AccessDenied(_) => "access_denied",
            CatalogError::Throttled(_) => "throttled",
            CatalogError::InvalidInput(_) => "invalid_input",
            CatalogError::Service { .. } => "service",
            CatalogError::Transport(_) => "transport",
        }
    }
}

/// Metadata catalog that partitions are registered with
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PartitionCatalog: Send + Sync {
    /// Create one partition under `database.table`
    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        partition: &PartitionDescriptor,
    ) -> Result<(), CatalogError>;
}

/// AWS Glue data catalog client
#[derive(Clone, Debug)]
pub struct GlueCatalog {
    client: GlueClient,
}

impl GlueCatalog {
    /// Create a catalog from the default AWS credential and region chain
    pub async fn new(config: &CatalogConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(ref region) = config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let aws_config = loader.load().await;

        let mut glue_config_builder = GlueConfigBuilder::from(&aws_config);

        // Configure custom endpoint for LocalStack
        if let Some(ref endpoint_url) = config.endpoint_url {
            glue_config_builder = glue_config_builder.endpoint_url(endpoint_url);
        }

        let client = GlueClient::from_conf(glue_config_builder.build());

        info!(
            region = ?aws_config.region(),
            endpoint_url = ?config.endpoint_url,
            "Glue catalog client initialized"
        );

        Self { client }
    }
}

#[async_trait]
impl PartitionCatalog for GlueCatalog {
    #[instrument(skip(self, partition), fields(values = ?partition.values()))]
    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        partition: &PartitionDescriptor,
    ) -> Result<(), CatalogError> {
        let input = to_partition_input(partition)?;

        debug!(location = %partition.location, "Creating partition");

        self.client
            .create_partition()
            .database_name(database)
            .table_name(table)
            .partition_input(input)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(())
    }
}

/// Build the Glue partition input for a descriptor
pub fn to_partition_input(partition: &PartitionDescriptor) -> Result<PartitionInput, CatalogError> {
    let format = &partition.format;

    let columns = partition
        .columns
        .iter()
        .map(|column| {
            Column::builder()
                .name(column.name)
                .r#type(column.data_type)
                .build()
                .map_err(|e| CatalogError::InvalidInput(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let serde_info = SerDeInfo::builder()
        .serialization_library(format.serialization_library)
        .parameters("serialization.format", format.serialization_format)
        .build();

    let skewed_info = SkewedInfo::builder()
        .set_skewed_column_names(Some(Vec::new()))
        .set_skewed_column_values(Some(Vec::new()))
        .set_skewed_column_value_location_maps(Some(HashMap::new()))
        .build();

    let storage_descriptor = StorageDescriptor::builder()
        .number_of_buckets(format.number_of_buckets)
        .set_columns(Some(columns))
        .location(&partition.location)
        .input_format(format.input_format)
        .output_format(format.output_format)
        .compressed(format.compressed)
        .serde_info(serde_info)
        .set_bucket_columns(Some(Vec::new()))
        .set_sort_columns(Some(Vec::new()))
        .set_parameters(Some(HashMap::new()))
        .skewed_info(skewed_info)
        .stored_as_sub_directories(format.stored_as_sub_directories)
        .build();

    Ok(PartitionInput::builder()
        .set_values(Some(partition.values()))
        .storage_descriptor(storage_descriptor)
        .build())
}

fn classify_sdk_error(err: SdkError<CreatePartitionError>) -> CatalogError {
    match err.as_service_error() {
        Some(service_error) => classify_service_error(service_error),
        None => CatalogError::Transport(DisplayErrorContext(&err).to_string()),
    }
}

/// Map a Glue service error onto the catalog error taxonomy
pub fn classify_service_error(err: &CreatePartitionError) -> CatalogError {
    let message = err.message().unwrap_or_default().to_string();

    if err.is_already_exists_exception() {
        return CatalogError::AlreadyExists(message);
    }
    if err.is_entity_not_found_exception() {
        return CatalogError::EntityNotFound(message);
    }
    if err.is_invalid_input_exception() {
        return CatalogError::InvalidInput(message);
    }

    match err.code() {
        Some("AccessDeniedException") => CatalogError::AccessDenied(message),
        Some("ThrottlingException") => CatalogError::Throttled(message),
        code => CatalogError::Service {
            code: code.unwrap_or("Unknown").to_string(),
            message,
        },
    }
}
