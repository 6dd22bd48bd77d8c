//! Configuration overrides applied on top of the default table spec.

use super::error::{ConfigurationError, Result};
use super::spec::{AttributeDefinition, BillingMode, KeySchemaElement, TableSpec, Throughput};
use super::validation::{
    validate_attribute_definitions, validate_key_attributes_defined, validate_key_schema,
    validate_table_name, validate_throughput,
};

/// A single override. Each variant replaces exactly one field of the spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    TableName(String),
    AttributeDefinitions(Vec<AttributeDefinition>),
    KeySchema(Vec<KeySchemaElement>),
    ProvisionedThroughput { read: i64, write: i64 },
    BillingMode(BillingMode),
}

impl TableOption {
    /// Validates the override and applies it to `spec`.
    ///
    /// `spec` is left untouched when validation fails.
    fn apply(self, spec: &mut TableSpec) -> Result<()> {
        match self {
            TableOption::TableName(name) => {
                validate_table_name(&name)?;
                spec.table_name = name;
            }
            TableOption::AttributeDefinitions(definitions) => {
                validate_attribute_definitions(&definitions)?;
                spec.attribute_definitions = definitions;
            }
            TableOption::KeySchema(key_schema) => {
                validate_key_schema(&key_schema)?;
                spec.key_schema = key_schema;
            }
            TableOption::ProvisionedThroughput { read, write } => {
                let throughput = Throughput {
                    read_capacity_units: read,
                    write_capacity_units: write,
                };
                validate_throughput(&throughput)?;
                spec.throughput = throughput;
            }
            TableOption::BillingMode(billing_mode) => {
                spec.billing_mode = billing_mode;
            }
        }
        Ok(())
    }
}

/// Builds a [`TableSpec`] from the defaults plus overrides applied in order.
///
/// Once an override fails, later overrides are ignored and [`build`] returns
/// that first failure.
///
/// [`build`]: TableSpecBuilder::build
#[derive(Debug, Clone)]
pub struct TableSpecBuilder {
    spec: TableSpec,
    error: Option<ConfigurationError>,
}

impl Default for TableSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSpecBuilder {
    /// Starts from the default VehicleTracker spec.
    pub fn new() -> Self {
        Self {
            spec: TableSpec::default(),
            error: None,
        }
    }

    /// Applies one override unless an earlier one already failed.
    pub fn option(mut self, option: TableOption) -> Self {
        if self.error.is_none() {
            if let Err(err) = option.apply(&mut self.spec) {
                self.error = Some(err);
            }
        }
        self
    }

    pub fn table_name(self, name: impl Into<String>) -> Self {
        self.option(TableOption::TableName(name.into()))
    }

    pub fn attribute_definitions(self, definitions: Vec<AttributeDefinition>) -> Self {
        self.option(TableOption::AttributeDefinitions(definitions))
    }

    pub fn key_schema(self, key_schema: Vec<KeySchemaElement>) -> Self {
        self.option(TableOption::KeySchema(key_schema))
    }

    pub fn provisioned_throughput(self, read: i64, write: i64) -> Self {
        self.option(TableOption::ProvisionedThroughput { read, write })
    }

    pub fn billing_mode(self, billing_mode: BillingMode) -> Self {
        self.option(TableOption::BillingMode(billing_mode))
    }

    /// Returns the finished spec, or the first configuration failure.
    ///
    /// Attribute definitions and key schema can be overridden independently,
    /// so the check that every key attribute is defined runs here.
    pub fn build(self) -> Result<TableSpec> {
        if let Some(err) = self.error {
            return Err(err);
        }
        validate_key_attributes_defined(&self.spec.key_schema, &self.spec.attribute_definitions)?;
        Ok(self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{KeyRole, ScalarType};

    #[test]
    fn test_table_name_override_changes_only_name() {
        let spec = TableSpecBuilder::new()
            .table_name("Fleet")
            .build()
            .unwrap();

        let default = TableSpec::default();
        assert_eq!(spec.table_name(), "Fleet");
        assert_eq!(spec.attribute_definitions(), default.attribute_definitions());
        assert_eq!(spec.key_schema(), default.key_schema());
        assert_eq!(spec.throughput(), default.throughput());
        assert_eq!(spec.billing_mode(), default.billing_mode());
    }

    #[test]
    fn test_overrides_apply_in_order() {
        let spec = TableSpec::with_options([
            TableOption::TableName("First".to_string()),
            TableOption::TableName("Second".to_string()),
            TableOption::ProvisionedThroughput { read: 10, write: 20 },
        ])
        .unwrap();

        assert_eq!(spec.table_name(), "Second");
        assert_eq!(spec.throughput().read_capacity_units, 10);
        assert_eq!(spec.throughput().write_capacity_units, 20);
    }

    #[test]
    fn test_first_failure_stops_application() {
        let result = TableSpecBuilder::new()
            .table_name("x")
            .provisioned_throughput(0, 0)
            .build();

        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidTableName { .. })
        ));
    }

    #[test]
    fn test_later_valid_option_does_not_clear_error() {
        let result = TableSpecBuilder::new()
            .provisioned_throughput(0, 1)
            .table_name("Fleet")
            .build();

        assert_eq!(
            result,
            Err(ConfigurationError::InvalidThroughput { read: 0, write: 1 })
        );
    }

    #[test]
    fn test_replacing_schema_and_definitions_together() {
        let spec = TableSpecBuilder::new()
            .attribute_definitions(vec![AttributeDefinition::new("Vin", ScalarType::String)])
            .key_schema(vec![KeySchemaElement::new("Vin", KeyRole::Hash)])
            .build()
            .unwrap();

        assert_eq!(spec.key_schema().len(), 1);
        assert_eq!(spec.attribute_definitions()[0].name, "Vin");
    }

    #[test]
    fn test_key_attribute_must_be_defined() {
        let result = TableSpecBuilder::new()
            .key_schema(vec![KeySchemaElement::new("Vin", KeyRole::Hash)])
            .build();

        assert_eq!(
            result,
            Err(ConfigurationError::UndefinedKeyAttribute("Vin".to_string()))
        );
    }

    #[test]
    fn test_billing_mode_override() {
        let spec = TableSpecBuilder::new()
            .billing_mode(BillingMode::PayPerRequest)
            .build()
            .unwrap();

        assert_eq!(spec.billing_mode(), BillingMode::PayPerRequest);
        assert_eq!(spec.table_name(), "VehicleTracker");
    }
}
