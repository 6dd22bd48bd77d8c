//! Error types for table provisioning.
//!
//! Maps AWS SDK errors to `ProvisionError::RemoteService`.

use std::fmt::Debug;
use std::time::Duration;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use thiserror::Error;
use vehicle_tracker_core::table::ConfigurationError;

/// Result type alias for the dynamodb module.
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that can occur while provisioning a table.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The remote service could not be reached or rejected the request.
    #[error("{operation} failed: {message}")]
    RemoteService {
        operation: &'static str,
        message: String,
    },

    #[error("Timed out after {timeout:?} waiting for table '{table_name}' to become active")]
    ProvisioningTimeout {
        table_name: String,
        timeout: Duration,
    },

    #[error("Invalid table configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Provisioning cancelled")]
    Cancelled,
}

impl ProvisionError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        ProvisionError::RemoteService {
            operation,
            message: message.into(),
        }
    }
}

/// Map a ListTables SDK error to ProvisionError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> ProvisionError {
    let message = match err.into_service_error() {
        ListTablesError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        ListTablesError::InvalidEndpointException(_) => "Invalid endpoint".to_string(),
        err => format!("{:?}", err),
    };
    ProvisionError::remote("ListTables", message)
}

/// Map a CreateTable SDK error to ProvisionError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
    table_name: &str,
) -> ProvisionError {
    let message = match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => {
            format!("Table '{}' already exists or is in use", table_name)
        }
        CreateTableError::LimitExceededException(_) => {
            "Too many tables in CREATING state or account table limit reached".to_string()
        }
        CreateTableError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        CreateTableError::InvalidEndpointException(_) => "Invalid endpoint".to_string(),
        err => format!("{:?}", err),
    };
    ProvisionError::remote("CreateTable", message)
}

/// Map a DescribeTable SDK error to ProvisionError.
///
/// Callers that treat a missing table as a normal outcome check for
/// `ResourceNotFoundException` before mapping.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> ProvisionError {
    let message = match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => {
            format!("Table '{}' not found", table_name)
        }
        DescribeTableError::InternalServerError(_) => "DynamoDB internal server error".to_string(),
        DescribeTableError::InvalidEndpointException(_) => "Invalid endpoint".to_string(),
        err => format!("{:?}", err),
    };
    ProvisionError::remote("DescribeTable", message)
}
