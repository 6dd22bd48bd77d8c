//! Imperative shell for provisioning the VehicleTracker DynamoDB table.
//!
//! The table definition and the provisioning plan live in
//! `vehicle_tracker_core`; this crate talks to DynamoDB.

pub mod config;
pub mod dynamodb;
