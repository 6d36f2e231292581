// Public entities for the HealthLog API
// Readings, alerts and summaries are the domain types themselves; this
// module holds the request and response envelopes specific to HTTP.

// Common entities for error handling
pub mod common;

// Aggregation and classification payloads
pub mod analytics;

// Query parameters
pub mod queries;
