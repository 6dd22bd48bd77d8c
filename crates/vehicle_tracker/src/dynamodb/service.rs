use async_trait::async_trait;
use vehicle_tracker_core::table::{CreateTableRequest, TableStatus};

use super::error::Result;

/// One page of table names returned by ListTables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableNamesPage {
    pub table_names: Vec<String>,
    /// Start point for the next page, `None` on the last page.
    pub last_evaluated_table_name: Option<String>,
}

/// The control-plane operations provisioning depends on.
///
/// Implemented over the AWS SDK by [`DynamoTableService`] and in memory for
/// tests.
///
/// [`DynamoTableService`]: super::DynamoTableService
#[async_trait]
pub trait TableService: Send + Sync {
    /// Lists one page of table names, starting after `exclusive_start_table_name`.
    async fn list_tables(&self, exclusive_start_table_name: Option<String>)
        -> Result<TableNamesPage>;

    /// Issues a create-table request. Returns once the request is accepted.
    async fn create_table(&self, request: &CreateTableRequest) -> Result<()>;

    /// Returns the table status, or `None` when the table does not exist.
    async fn describe_table(&self, table_name: &str) -> Result<Option<TableStatus>>;
}
