//! DynamoDB table provisioning.

mod client;
mod error;
#[cfg(feature = "inmemory")]
mod inmemory;
mod provision;
mod service;

pub use client::{create_client, AwsConfig, DynamoTableService};
pub use error::{
    map_create_table_error, map_describe_table_error, map_list_tables_error, ProvisionError,
    Result,
};
#[cfg(feature = "inmemory")]
pub use inmemory::{CallCounts, InMemoryTableService};
pub use provision::{ProvisionOutcome, ProvisionSettings, Provisioner};
pub use service::{TableNamesPage, TableService};
