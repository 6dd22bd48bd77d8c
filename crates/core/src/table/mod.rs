//! Table specification, configuration overrides, and provisioning plans.

mod error;
mod options;
mod planning;
mod spec;
mod validation;

pub use error::{ConfigurationError, Result};
pub use options::{TableOption, TableSpecBuilder};
pub use planning::{
    calculate_provision_plan, format_provision_plan, ProvisionPlan, TableStatus,
};
pub use spec::{
    AttributeDefinition, BillingMode, CreateTableRequest, KeyRole, KeySchemaElement, ScalarType,
    TableSpec, Throughput, DEFAULT_READ_CAPACITY_UNITS, DEFAULT_TABLE_NAME,
    DEFAULT_WRITE_CAPACITY_UNITS,
};
pub use validation::{
    validate_attribute_definitions, validate_key_attributes_defined, validate_key_schema,
    validate_table_name, validate_throughput,
};
