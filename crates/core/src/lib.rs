//! Functional core for provisioning the VehicleTracker DynamoDB table.
//!
//! Everything in this crate is pure data and pure functions. Talking to
//! DynamoDB lives in the `vehicle_tracker` crate.

pub mod table;
