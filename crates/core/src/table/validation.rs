//! Validation rules for table configuration overrides.

use std::collections::HashSet;

use super::error::{ConfigurationError, Result};
use super::spec::{AttributeDefinition, KeyRole, KeySchemaElement, Throughput};

const MIN_TABLE_NAME_LEN: usize = 3;
const MAX_TABLE_NAME_LEN: usize = 255;

/// Validates a table name against DynamoDB naming rules.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.len() < MIN_TABLE_NAME_LEN || name.len() > MAX_TABLE_NAME_LEN {
        return Err(ConfigurationError::InvalidTableName {
            name: name.to_string(),
            reason: "must be between 3 and 255 characters",
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(ConfigurationError::InvalidTableName {
            name: name.to_string(),
            reason: "may only contain a-z, A-Z, 0-9, '_', '-' and '.'",
        });
    }
    Ok(())
}

/// Validates a list of attribute definitions: non-empty, named, no duplicates.
pub fn validate_attribute_definitions(definitions: &[AttributeDefinition]) -> Result<()> {
    if definitions.is_empty() {
        return Err(ConfigurationError::NoAttributeDefinitions);
    }
    let mut seen = HashSet::new();
    for definition in definitions {
        if definition.name.is_empty() {
            return Err(ConfigurationError::EmptyAttributeName);
        }
        if !seen.insert(definition.name.as_str()) {
            return Err(ConfigurationError::DuplicateAttribute(
                definition.name.clone(),
            ));
        }
    }
    Ok(())
}

/// Validates key roles: exactly one hash key, at most one range key, and no
/// attribute used twice.
pub fn validate_key_schema(key_schema: &[KeySchemaElement]) -> Result<()> {
    let hash_keys = key_schema
        .iter()
        .filter(|k| k.role == KeyRole::Hash)
        .count();
    let range_keys = key_schema.len() - hash_keys;

    if hash_keys != 1 {
        return Err(ConfigurationError::HashKeyCount(hash_keys));
    }
    if range_keys > 1 {
        return Err(ConfigurationError::RangeKeyCount(range_keys));
    }
    let mut seen = HashSet::new();
    for key in key_schema {
        if key.attribute_name.is_empty() {
            return Err(ConfigurationError::EmptyAttributeName);
        }
        if !seen.insert(key.attribute_name.as_str()) {
            return Err(ConfigurationError::DuplicateAttribute(
                key.attribute_name.clone(),
            ));
        }
    }
    Ok(())
}

/// Every key attribute must appear in the attribute definitions.
pub fn validate_key_attributes_defined(
    key_schema: &[KeySchemaElement],
    definitions: &[AttributeDefinition],
) -> Result<()> {
    match key_schema
        .iter()
        .find(|k| !definitions.iter().any(|d| d.name == k.attribute_name))
    {
        Some(missing) => Err(ConfigurationError::UndefinedKeyAttribute(
            missing.attribute_name.clone(),
        )),
        None => Ok(()),
    }
}

pub fn validate_throughput(throughput: &Throughput) -> Result<()> {
    if throughput.read_capacity_units < 1 || throughput.write_capacity_units < 1 {
        return Err(ConfigurationError::InvalidThroughput {
            read: throughput.read_capacity_units,
            write: throughput.write_capacity_units,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ScalarType;

    #[test]
    fn test_valid_table_names() {
        assert!(validate_table_name("VehicleTracker").is_ok());
        assert!(validate_table_name("abc").is_ok());
        assert!(validate_table_name("fleet.v2_prod-eu").is_ok());
        assert!(validate_table_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_table_name_length() {
        assert!(validate_table_name("ab").is_err());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_table_name_characters() {
        let result = validate_table_name("vehicle tracker");
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidTableName { .. })
        ));
        assert!(validate_table_name("vehicle/tracker").is_err());
    }

    #[test]
    fn test_attribute_definitions() {
        assert_eq!(
            validate_attribute_definitions(&[]),
            Err(ConfigurationError::NoAttributeDefinitions)
        );
        assert_eq!(
            validate_attribute_definitions(&[AttributeDefinition::new("", ScalarType::String)]),
            Err(ConfigurationError::EmptyAttributeName)
        );
        assert_eq!(
            validate_attribute_definitions(&[
                AttributeDefinition::new("Plate", ScalarType::String),
                AttributeDefinition::new("Plate", ScalarType::Number),
            ]),
            Err(ConfigurationError::DuplicateAttribute("Plate".to_string()))
        );
    }

    #[test]
    fn test_key_schema_requires_single_hash_key() {
        assert_eq!(
            validate_key_schema(&[]),
            Err(ConfigurationError::HashKeyCount(0))
        );
        assert_eq!(
            validate_key_schema(&[
                KeySchemaElement::new("A", KeyRole::Hash),
                KeySchemaElement::new("B", KeyRole::Hash),
            ]),
            Err(ConfigurationError::HashKeyCount(2))
        );
        assert_eq!(
            validate_key_schema(&[KeySchemaElement::new("A", KeyRole::Range)]),
            Err(ConfigurationError::HashKeyCount(0))
        );
    }

    #[test]
    fn test_key_schema_allows_one_range_key() {
        assert!(validate_key_schema(&[KeySchemaElement::new("A", KeyRole::Hash)]).is_ok());
        assert!(validate_key_schema(&[
            KeySchemaElement::new("A", KeyRole::Hash),
            KeySchemaElement::new("B", KeyRole::Range),
        ])
        .is_ok());
        assert_eq!(
            validate_key_schema(&[
                KeySchemaElement::new("A", KeyRole::Hash),
                KeySchemaElement::new("B", KeyRole::Range),
                KeySchemaElement::new("C", KeyRole::Range),
            ]),
            Err(ConfigurationError::RangeKeyCount(2))
        );
    }

    #[test]
    fn test_key_schema_rejects_reused_attribute() {
        assert_eq!(
            validate_key_schema(&[
                KeySchemaElement::new("A", KeyRole::Hash),
                KeySchemaElement::new("A", KeyRole::Range),
            ]),
            Err(ConfigurationError::DuplicateAttribute("A".to_string()))
        );
    }

    #[test]
    fn test_key_attributes_defined() {
        let definitions = [AttributeDefinition::new("A", ScalarType::String)];
        assert!(validate_key_attributes_defined(
            &[KeySchemaElement::new("A", KeyRole::Hash)],
            &definitions
        )
        .is_ok());
        assert_eq!(
            validate_key_attributes_defined(
                &[
                    KeySchemaElement::new("A", KeyRole::Hash),
                    KeySchemaElement::new("B", KeyRole::Range),
                ],
                &definitions
            ),
            Err(ConfigurationError::UndefinedKeyAttribute("B".to_string()))
        );
    }

    #[test]
    fn test_throughput() {
        assert!(validate_throughput(&Throughput::default()).is_ok());
        assert!(validate_throughput(&Throughput {
            read_capacity_units: 0,
            write_capacity_units: 5,
        })
        .is_err());
        assert!(validate_throughput(&Throughput {
            read_capacity_units: 5,
            write_capacity_units: -1,
        })
        .is_err());
    }
}
