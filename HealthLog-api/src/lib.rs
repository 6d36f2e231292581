// HealthLog-api lib.rs
//
// HTTP surface of HealthLog: reading CRUD, day-level aggregation,
// clinical classification, trends and reports.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
