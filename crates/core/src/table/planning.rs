//! Pure functions for deciding what provisioning has to do (Functional Core).

use std::fmt;

use super::spec::{CreateTableRequest, TableSpec};

/// Table status as reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
    /// Archived, archiving, or unreadable encryption credentials.
    Inaccessible,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Active => write!(f, "ACTIVE"),
            TableStatus::Creating => write!(f, "CREATING"),
            TableStatus::Updating => write!(f, "UPDATING"),
            TableStatus::Deleting => write!(f, "DELETING"),
            TableStatus::Inaccessible => write!(f, "INACCESSIBLE"),
        }
    }
}

/// Planned provisioning action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { request: CreateTableRequest },
    /// Table already exists, nothing to do.
    NoChanges { table_name: String },
}

impl ProvisionPlan {
    pub fn table_name(&self) -> &str {
        match self {
            ProvisionPlan::CreateTable { request } => &request.table_name,
            ProvisionPlan::NoChanges { table_name } => table_name,
        }
    }
}

/// Pure function: decide what to do given whether the table already exists.
pub fn calculate_provision_plan(exists: bool, desired: &TableSpec) -> ProvisionPlan {
    if exists {
        ProvisionPlan::NoChanges {
            table_name: desired.table_name().to_string(),
        }
    } else {
        ProvisionPlan::CreateTable {
            request: desired.create_table_request(),
        }
    }
}

/// Pure function: format a provisioning plan for display.
pub fn format_provision_plan(plan: &ProvisionPlan) -> Vec<String> {
    match plan {
        ProvisionPlan::CreateTable { request } => {
            let mut lines = vec![format!("+ Create table: {}", request.table_name)];
            for key in &request.key_schema {
                let attribute_type = request
                    .attribute_definitions
                    .iter()
                    .find(|a| a.name == key.attribute_name)
                    .map(|a| a.attribute_type.to_string())
                    .unwrap_or_else(|| "?".to_string());
                lines.push(format!(
                    "  {} key: {} ({})",
                    key.role, key.attribute_name, attribute_type
                ));
            }
            lines.push(format!("  Billing: {}", request.billing_mode));
            if let Some(throughput) = &request.throughput {
                lines.push(format!(
                    "  Throughput: {} RCU / {} WCU",
                    throughput.read_capacity_units, throughput.write_capacity_units
                ));
            }
            lines
        }
        ProvisionPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' already exists", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{BillingMode, TableSpecBuilder};

    #[test]
    fn test_plan_for_absent_table_creates() {
        let spec = TableSpec::default();

        let plan = calculate_provision_plan(false, &spec);

        assert_eq!(
            plan,
            ProvisionPlan::CreateTable {
                request: spec.create_table_request()
            }
        );
        assert_eq!(plan.table_name(), "VehicleTracker");
    }

    #[test]
    fn test_plan_for_present_table_is_noop() {
        let plan = calculate_provision_plan(true, &TableSpec::default());

        assert_eq!(
            plan,
            ProvisionPlan::NoChanges {
                table_name: "VehicleTracker".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let plan = calculate_provision_plan(false, &TableSpec::default());

        assert_eq!(
            format_provision_plan(&plan),
            vec![
                "+ Create table: VehicleTracker",
                "  HASH key: LicensePlate (S)",
                "  RANGE key: TypeVehicle (S)",
                "  Billing: PROVISIONED",
                "  Throughput: 5 RCU / 5 WCU",
            ]
        );
    }

    #[test]
    fn test_format_on_demand_plan_has_no_throughput() {
        let spec = TableSpecBuilder::new()
            .billing_mode(BillingMode::PayPerRequest)
            .build()
            .unwrap();

        let lines = format_provision_plan(&calculate_provision_plan(false, &spec));

        assert_eq!(lines.last().unwrap(), "  Billing: PAY_PER_REQUEST");
    }

    #[test]
    fn test_format_noop_plan() {
        let plan = ProvisionPlan::NoChanges {
            table_name: "Fleet".to_string(),
        };
        assert_eq!(
            format_provision_plan(&plan),
            vec!["= Table 'Fleet' already exists"]
        );
    }

    #[test]
    fn test_table_status_display() {
        assert_eq!(TableStatus::Active.to_string(), "ACTIVE");
        assert_eq!(TableStatus::Deleting.to_string(), "DELETING");
    }
}
