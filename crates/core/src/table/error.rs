use thiserror::Error;

/// Errors raised while applying configuration overrides to a table spec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid table name '{name}': {reason}")]
    InvalidTableName { name: String, reason: &'static str },
    #[error("At least one attribute definition is required")]
    NoAttributeDefinitions,
    #[error("Attribute name cannot be empty")]
    EmptyAttributeName,
    #[error("Attribute '{0}' is defined more than once")]
    DuplicateAttribute(String),
    #[error("Key schema must contain exactly one hash key (found {0})")]
    HashKeyCount(usize),
    #[error("Key schema may contain at most one range key (found {0})")]
    RangeKeyCount(usize),
    #[error("Key attribute '{0}' is missing from the attribute definitions")]
    UndefinedKeyAttribute(String),
    #[error("Capacity units must be at least 1 (read: {read}, write: {write})")]
    InvalidThroughput { read: i64, write: i64 },
}

/// Result type for table configuration.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
