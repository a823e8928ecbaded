//! Partition Registrar
//!
//! Lambda function triggered by S3 object-created notifications on the log
//! delivery bucket. Each delivered object key carries the partition it belongs
//! to (`folder/year/month/day/hour/filename`); the function registers that
//! partition in the Glue data catalog so the query engine can see the new data.
//!
//! ## Flow
//!
//! ```text
//! S3 ObjectCreated          Partition Registrar                Glue Catalog
//! ┌──────────────┐         ┌──────────────────────┐          ┌──────────────┐
//! │ bucket/key   │────────▶│ parse key            │          │ database     │
//! └──────────────┘         │ derive (date, hour)  │─────────▶│   table      │
//!                          │ build descriptor     │          │   partition  │
//!                          └──────────────────────┘          └──────────────┘
//! ```
//!
//! Catalog errors, including "partition already exists" on redelivery, are
//! logged and never fail the invocation. A key that does not have six segments
//! fails the invocation.

pub mod catalog;
pub mod config;
pub mod handler;
pub mod notification;
pub mod partition;
pub mod registrar;
pub mod schema;

pub use catalog::{CatalogError, GlueCatalog, PartitionCatalog};
pub use config::{Config, ConfigError};
pub use notification::ObjectNotification;
pub use partition::{ObjectKeyParts, PartitionDescriptor};
pub use registrar::{PartitionRegistrar, RegistrarError};
