//! AWS SDK client setup and the DynamoDB-backed `TableService` (Imperative Shell).

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use vehicle_tracker_core::table::{self, CreateTableRequest, TableStatus};

use super::error::{
    map_create_table_error, map_describe_table_error, map_list_tables_error, ProvisionError,
    Result,
};
use super::service::{TableNamesPage, TableService};

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
///
/// Credentials come from the default provider chain.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// `TableService` backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct DynamoTableService {
    client: Client,
}

impl DynamoTableService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableService for DynamoTableService {
    async fn list_tables(
        &self,
        exclusive_start_table_name: Option<String>,
    ) -> Result<TableNamesPage> {
        let output = self
            .client
            .list_tables()
            .set_exclusive_start_table_name(exclusive_start_table_name)
            .send()
            .await
            .map_err(map_list_tables_error)?;

        Ok(TableNamesPage {
            table_names: output.table_names.unwrap_or_default(),
            last_evaluated_table_name: output.last_evaluated_table_name,
        })
    }

    async fn create_table(&self, request: &CreateTableRequest) -> Result<()> {
        let attribute_definitions = request
            .attribute_definitions
            .iter()
            .map(|attribute| {
                AttributeDefinition::builder()
                    .attribute_name(&attribute.name)
                    .attribute_type(to_scalar_type(attribute.attribute_type))
                    .build()
                    .map_err(|e| ProvisionError::remote("CreateTable", e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let key_schema = request
            .key_schema
            .iter()
            .map(|key| {
                KeySchemaElement::builder()
                    .attribute_name(&key.attribute_name)
                    .key_type(to_key_type(key.role))
                    .build()
                    .map_err(|e| ProvisionError::remote("CreateTable", e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let provisioned_throughput = request
            .throughput
            .map(|throughput| {
                ProvisionedThroughput::builder()
                    .read_capacity_units(throughput.read_capacity_units)
                    .write_capacity_units(throughput.write_capacity_units)
                    .build()
                    .map_err(|e| ProvisionError::remote("CreateTable", e.to_string()))
            })
            .transpose()?;

        self.client
            .create_table()
            .table_name(&request.table_name)
            .set_attribute_definitions(Some(attribute_definitions))
            .set_key_schema(Some(key_schema))
            .set_provisioned_throughput(provisioned_throughput)
            .billing_mode(to_billing_mode(request.billing_mode))
            .send()
            .await
            .map_err(|e| map_create_table_error(e, &request.table_name))?;

        Ok(())
    }

    async fn describe_table(&self, table_name: &str) -> Result<Option<TableStatus>> {
        match self.client.describe_table().table_name(table_name).send().await {
            Ok(output) => Ok(output
                .table()
                .map(|description| to_table_status(description.table_status()))),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                Ok(None)
            }
            Err(err) => Err(map_describe_table_error(err, table_name)),
        }
    }
}

fn to_scalar_type(attr_type: table::ScalarType) -> ScalarAttributeType {
    match attr_type {
        table::ScalarType::String => ScalarAttributeType::S,
        table::ScalarType::Number => ScalarAttributeType::N,
        table::ScalarType::Binary => ScalarAttributeType::B,
    }
}

fn to_key_type(role: table::KeyRole) -> KeyType {
    match role {
        table::KeyRole::Hash => KeyType::Hash,
        table::KeyRole::Range => KeyType::Range,
    }
}

fn to_billing_mode(billing_mode: table::BillingMode) -> BillingMode {
    match billing_mode {
        table::BillingMode::Provisioned => BillingMode::Provisioned,
        table::BillingMode::PayPerRequest => BillingMode::PayPerRequest,
    }
}

fn to_table_status(status: Option<&aws_sdk_dynamodb::types::TableStatus>) -> TableStatus {
    use aws_sdk_dynamodb::types::TableStatus as SdkTableStatus;

    match status {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Inaccessible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display_local() {
        let config = AwsConfig {
            endpoint_url: Some("http://localhost:8000".to_string()),
            region: "us-east-1".to_string(),
        };
        assert_eq!(
            config.target_display(),
            "Local DynamoDB (http://localhost:8000)"
        );
    }

    #[test]
    fn test_target_display_aws() {
        let config = AwsConfig {
            endpoint_url: None,
            region: "eu-west-1".to_string(),
        };
        assert_eq!(
            config.target_display(),
            "AWS DynamoDB (region: eu-west-1)"
        );
    }

    #[test]
    fn test_sdk_type_conversions() {
        assert_eq!(
            to_scalar_type(table::ScalarType::Number),
            ScalarAttributeType::N
        );
        assert_eq!(to_key_type(table::KeyRole::Range), KeyType::Range);
        assert_eq!(
            to_billing_mode(table::BillingMode::PayPerRequest),
            BillingMode::PayPerRequest
        );
    }

    #[test]
    fn test_table_status_conversion() {
        use aws_sdk_dynamodb::types::TableStatus as SdkTableStatus;

        assert_eq!(
            to_table_status(Some(&SdkTableStatus::Active)),
            TableStatus::Active
        );
        assert_eq!(
            to_table_status(Some(&SdkTableStatus::Creating)),
            TableStatus::Creating
        );
        assert_eq!(
            to_table_status(Some(&SdkTableStatus::Archived)),
            TableStatus::Inaccessible
        );
        assert_eq!(to_table_status(None), TableStatus::Inaccessible);
    }
}
