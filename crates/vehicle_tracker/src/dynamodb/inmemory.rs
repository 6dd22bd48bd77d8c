//! In-memory `TableService` implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use vehicle_tracker_core::table::{CreateTableRequest, TableStatus};

use super::error::{ProvisionError, Result};
use super::service::{TableNamesPage, TableService};

const DEFAULT_PAGE_SIZE: usize = 100;

/// Number of calls made against an [`InMemoryTableService`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_tables: usize,
    pub create_table: usize,
    pub describe_table: usize,
}

#[derive(Debug)]
struct InMemoryTable {
    status: TableStatus,
    /// Describe calls left before a creating table turns active.
    /// `None` keeps it creating forever.
    polls_until_active: Option<u32>,
    /// Describe calls left that report the table as not found.
    hidden_polls: u32,
}

#[derive(Debug)]
struct State {
    tables: BTreeMap<String, InMemoryTable>,
    created: Vec<CreateTableRequest>,
    calls: CallCounts,
    page_size: usize,
    list_failure: Option<String>,
    create_failure: Option<String>,
    describe_failure: Option<String>,
    activation_polls: Option<u32>,
    invisible_polls: u32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            tables: BTreeMap::new(),
            created: Vec::new(),
            calls: CallCounts::default(),
            page_size: DEFAULT_PAGE_SIZE,
            list_failure: None,
            create_failure: None,
            describe_failure: None,
            activation_polls: Some(0),
            invisible_polls: 0,
        }
    }
}

/// In-memory table service for testing.
///
/// Clones share state, so a test can keep one handle for inspection while a
/// `Provisioner` owns another. Created tables report `CREATING` for a
/// configurable number of describe calls before turning `ACTIVE`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableService {
    state: Arc<Mutex<State>>,
}

impl InMemoryTableService {
    /// Creates a service with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an already active table.
    pub fn with_table(self, table_name: impl Into<String>) -> Self {
        self.state().tables.insert(
            table_name.into(),
            InMemoryTable {
                status: TableStatus::Active,
                polls_until_active: None,
                hidden_polls: 0,
            },
        );
        self
    }

    /// Sets the maximum number of names returned per ListTables page.
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state().page_size = page_size.max(1);
        self
    }

    /// Makes every ListTables call fail with `message`.
    pub fn failing_list(self, message: impl Into<String>) -> Self {
        self.state().list_failure = Some(message.into());
        self
    }

    /// Makes every CreateTable call fail with `message`.
    pub fn rejecting_create(self, message: impl Into<String>) -> Self {
        self.state().create_failure = Some(message.into());
        self
    }

    /// Makes every DescribeTable call fail with `message`.
    pub fn failing_describe(self, message: impl Into<String>) -> Self {
        self.state().describe_failure = Some(message.into());
        self
    }

    /// Created tables are not found by the first `polls` describe calls.
    pub fn invisible_for_polls(self, polls: u32) -> Self {
        self.state().invisible_polls = polls;
        self
    }

    /// Created tables report `CREATING` for `polls` describe calls.
    pub fn activate_after_polls(self, polls: u32) -> Self {
        self.state().activation_polls = Some(polls);
        self
    }

    /// Created tables never leave `CREATING`.
    pub fn never_activate(self) -> Self {
        self.state().activation_polls = None;
        self
    }

    /// Overrides the status of an existing table.
    pub fn set_status(&self, table_name: &str, status: TableStatus) {
        if let Some(table) = self.state().tables.get_mut(table_name) {
            table.status = status;
            table.polls_until_active = None;
        }
    }

    pub fn call_counts(&self) -> CallCounts {
        self.state().calls
    }

    /// Requests accepted by `create_table`, in call order.
    pub fn created_requests(&self) -> Vec<CreateTableRequest> {
        self.state().created.clone()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.state().tables.keys().cloned().collect()
    }
}

#[async_trait]
impl TableService for InMemoryTableService {
    async fn list_tables(
        &self,
        exclusive_start_table_name: Option<String>,
    ) -> Result<TableNamesPage> {
        let mut state = self.state();
        state.calls.list_tables += 1;

        if let Some(message) = &state.list_failure {
            return Err(ProvisionError::remote("ListTables", message.clone()));
        }

        let mut remaining = state
            .tables
            .keys()
            .filter(|name| {
                exclusive_start_table_name
                    .as_deref()
                    .is_none_or(|start| name.as_str() > start)
            })
            .cloned();

        let table_names: Vec<String> = remaining.by_ref().take(state.page_size).collect();
        let last_evaluated_table_name = match remaining.next() {
            Some(_) => table_names.last().cloned(),
            None => None,
        };

        Ok(TableNamesPage {
            table_names,
            last_evaluated_table_name,
        })
    }

    async fn create_table(&self, request: &CreateTableRequest) -> Result<()> {
        let mut state = self.state();
        state.calls.create_table += 1;

        if let Some(message) = &state.create_failure {
            return Err(ProvisionError::remote("CreateTable", message.clone()));
        }
        if state.tables.contains_key(&request.table_name) {
            return Err(ProvisionError::remote(
                "CreateTable",
                format!(
                    "Table '{}' already exists or is in use",
                    request.table_name
                ),
            ));
        }

        let table = InMemoryTable {
            status: TableStatus::Creating,
            polls_until_active: state.activation_polls,
            hidden_polls: state.invisible_polls,
        };
        state.tables.insert(request.table_name.clone(), table);
        state.created.push(request.clone());
        Ok(())
    }

    async fn describe_table(&self, table_name: &str) -> Result<Option<TableStatus>> {
        let mut state = self.state();
        state.calls.describe_table += 1;

        if let Some(message) = &state.describe_failure {
            return Err(ProvisionError::remote("DescribeTable", message.clone()));
        }

        let Some(table) = state.tables.get_mut(table_name) else {
            return Ok(None);
        };
        if table.hidden_polls > 0 {
            table.hidden_polls -= 1;
            return Ok(None);
        }

        if table.status == TableStatus::Creating {
            match table.polls_until_active {
                Some(0) => table.status = TableStatus::Active,
                Some(polls) => table.polls_until_active = Some(polls - 1),
                None => {}
            }
        }
        Ok(Some(table.status))
    }
}
