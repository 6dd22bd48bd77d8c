//! Table specification types (Functional Core - pure data).

use std::fmt;

use super::error::Result;
use super::options::{TableOption, TableSpecBuilder};

/// Name of the table provisioned when no override is given.
pub const DEFAULT_TABLE_NAME: &str = "VehicleTracker";
pub const DEFAULT_READ_CAPACITY_UNITS: i64 = 5;
pub const DEFAULT_WRITE_CAPACITY_UNITS: i64 = 5;

/// DynamoDB scalar attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Number,
    Binary,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::String => write!(f, "S"),
            ScalarType::Number => write!(f, "N"),
            ScalarType::Binary => write!(f, "B"),
        }
    }
}

/// An attribute definition: name plus scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub name: String,
    pub attribute_type: ScalarType,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}

/// Role an attribute plays in the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Partition key.
    Hash,
    /// Sort key.
    Range,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Hash => write!(f, "HASH"),
            KeyRole::Range => write!(f, "RANGE"),
        }
    }
}

/// A key schema element: attribute name plus key role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub role: KeyRole,
}

impl KeySchemaElement {
    pub fn new(attribute_name: impl Into<String>, role: KeyRole) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            role,
        }
    }
}

/// Provisioned read/write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Default for Throughput {
    fn default() -> Self {
        Self {
            read_capacity_units: DEFAULT_READ_CAPACITY_UNITS,
            write_capacity_units: DEFAULT_WRITE_CAPACITY_UNITS,
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingMode {
    #[default]
    Provisioned,
    PayPerRequest,
}

impl fmt::Display for BillingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingMode::Provisioned => write!(f, "PROVISIONED"),
            BillingMode::PayPerRequest => write!(f, "PAY_PER_REQUEST"),
        }
    }
}

/// The desired definition of the table.
///
/// A spec is built once from the defaults plus configuration overrides and is
/// never mutated afterwards. Use [`TableSpecBuilder`] or
/// [`TableSpec::with_options`] to obtain one with overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub(super) table_name: String,
    pub(super) attribute_definitions: Vec<AttributeDefinition>,
    pub(super) key_schema: Vec<KeySchemaElement>,
    pub(super) throughput: Throughput,
    pub(super) billing_mode: BillingMode,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            attribute_definitions: default_attribute_definitions(),
            key_schema: default_key_schema(),
            throughput: Throughput::default(),
            billing_mode: BillingMode::default(),
        }
    }
}

impl TableSpec {
    /// Builds a spec from the defaults, applying `options` in order.
    ///
    /// Stops at the first option that fails validation and returns its error.
    pub fn with_options(options: impl IntoIterator<Item = TableOption>) -> Result<Self> {
        options
            .into_iter()
            .fold(TableSpecBuilder::new(), TableSpecBuilder::option)
            .build()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn attribute_definitions(&self) -> &[AttributeDefinition] {
        &self.attribute_definitions
    }

    pub fn key_schema(&self) -> &[KeySchemaElement] {
        &self.key_schema
    }

    pub fn throughput(&self) -> Throughput {
        self.throughput
    }

    pub fn billing_mode(&self) -> BillingMode {
        self.billing_mode
    }

    /// Derives the request sent to the remote service.
    ///
    /// Throughput is only included under provisioned billing.
    pub fn create_table_request(&self) -> CreateTableRequest {
        CreateTableRequest {
            table_name: self.table_name.clone(),
            attribute_definitions: self.attribute_definitions.clone(),
            key_schema: self.key_schema.clone(),
            billing_mode: self.billing_mode,
            throughput: match self.billing_mode {
                BillingMode::Provisioned => Some(self.throughput),
                BillingMode::PayPerRequest => None,
            },
        }
    }
}

/// A create-table request derived from a [`TableSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableRequest {
    pub table_name: String,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub key_schema: Vec<KeySchemaElement>,
    pub billing_mode: BillingMode,
    pub throughput: Option<Throughput>,
}

fn default_attribute_definitions() -> Vec<AttributeDefinition> {
    vec![
        AttributeDefinition::new("LicensePlate", ScalarType::String),
        AttributeDefinition::new("TypeVehicle", ScalarType::String),
    ]
}

fn default_key_schema() -> Vec<KeySchemaElement> {
    vec![
        KeySchemaElement::new("LicensePlate", KeyRole::Hash),
        KeySchemaElement::new("TypeVehicle", KeyRole::Range),
    ]
}
