// HealthLog Domain
// This crate contains the business logic for the HealthLog application

// Pure aggregation, classification and report assembly
pub mod analytics;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Services that implement business logic
pub mod services;

// Trend and report windows
pub mod time_range;

// Re-export the database module from the data crate for convenience
pub use health_log_data::database;
