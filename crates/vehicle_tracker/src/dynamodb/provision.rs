//! Table provisioning operations (Imperative Shell).

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vehicle_tracker_core::table::{calculate_provision_plan, ProvisionPlan, TableSpec, TableStatus};

use super::error::{ProvisionError, Result};
use super::service::TableService;

/// Upper bound on waiting for a new table to become active.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Shorter intervals are raised to this; tokio rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Parameters of the wait-for-active loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionSettings {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// What `create_if_not_exist` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    AlreadyExists,
    Created,
}

/// Creates a table from a [`TableSpec`] unless it already exists.
///
/// Nothing is cached between calls: every operation queries the service.
pub struct Provisioner<S> {
    service: S,
    settings: ProvisionSettings,
    cancel: CancellationToken,
}

impl<S: TableService> Provisioner<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            settings: ProvisionSettings::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_settings(mut self, settings: ProvisionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Cancelling `token` aborts the current remote call or wait with
    /// [`ProvisionError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Reports whether the spec's table name appears in the table listing.
    pub async fn exists(&self, spec: &TableSpec) -> Result<bool> {
        let table_name = spec.table_name();
        let mut start = None;

        loop {
            debug!(table_name, start = ?start, "Listing tables");
            let page = self.cancellable(self.service.list_tables(start)).await?;

            if page.table_names.iter().any(|name| name == table_name) {
                return Ok(true);
            }
            match page.last_evaluated_table_name {
                Some(next) => start = Some(next),
                None => return Ok(false),
            }
        }
    }

    /// Computes what `create_if_not_exist` would do, without creating anything.
    pub async fn plan(&self, spec: &TableSpec) -> Result<ProvisionPlan> {
        let exists = self.exists(spec).await?;
        Ok(calculate_provision_plan(exists, spec))
    }

    /// Issues the create request and waits for the table to become active.
    pub async fn create(&self, spec: &TableSpec) -> Result<()> {
        let request = spec.create_table_request();

        debug!(
            table_name = %request.table_name,
            billing_mode = %request.billing_mode,
            "Creating table"
        );
        self.cancellable(self.service.create_table(&request)).await?;

        self.wait_for_table_active(&request.table_name).await
    }

    /// Creates the table when it is absent. An existing table is left as is.
    pub async fn create_if_not_exist(&self, spec: &TableSpec) -> Result<ProvisionOutcome> {
        match self.plan(spec).await? {
            ProvisionPlan::NoChanges { table_name } => {
                info!(%table_name, "Table already exists");
                Ok(ProvisionOutcome::AlreadyExists)
            }
            ProvisionPlan::CreateTable { request } => {
                self.create(spec).await?;
                info!(table_name = %request.table_name, "Table created and active");
                Ok(ProvisionOutcome::Created)
            }
        }
    }

    async fn wait_for_table_active(&self, table_name: &str) -> Result<()> {
        let timeout = self.settings.timeout;

        let wait = async {
            match tokio::time::timeout(timeout, self.poll_until_active(table_name)).await {
                Ok(result) => result,
                Err(_) => Err(ProvisionError::ProvisioningTimeout {
                    table_name: table_name.to_string(),
                    timeout,
                }),
            }
        };

        self.cancellable(wait).await
    }

    async fn poll_until_active(&self, table_name: &str) -> Result<()> {
        let period = self.settings.poll_interval.max(MIN_POLL_INTERVAL);
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;

            match self.service.describe_table(table_name).await? {
                Some(TableStatus::Active) => return Ok(()),
                Some(TableStatus::Deleting) => {
                    return Err(ProvisionError::remote(
                        "DescribeTable",
                        format!("Table '{}' is being deleted", table_name),
                    ));
                }
                // Not yet visible right after CreateTable.
                None => debug!(table_name, "Table not visible yet"),
                Some(status) => debug!(table_name, %status, "Waiting for table"),
            }
        }
    }

    async fn cancellable<T>(&self, operation: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!("Provisioning cancelled");
                Err(ProvisionError::Cancelled)
            }
            result = operation => result,
        }
    }
}
