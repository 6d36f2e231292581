//! Domain layer health check functionality

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use health_log_data::database;

/// System health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced capability
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

impl SystemHealth {
    /// Overall status derived from the worst component
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else if components
            .values()
            .any(|c| c.status == ComponentStatus::Degraded)
        {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Check the state of the database
///
/// Returns:
/// - Ok(Some(info)) if the pool answers queries
/// - Ok(None) if no pool was initialized and readings live in memory
/// - Err if the pool exists but cannot serve a connection
pub fn check_database_status() -> Result<Option<String>, String> {
    match database::get_connection_info() {
        Some(Ok(info)) => Ok(Some(info)),
        Some(Err(e)) => Err(format!("Database connection error: {}", e)),
        None => Ok(None),
    }
}

/// Health of the storage layer
pub fn database_component() -> HealthComponent {
    match check_database_status() {
        Ok(Some(info)) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: Some(info),
        },
        Ok(None) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Database not initialized, readings are kept in memory".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    }
}

/// Get overall system health
pub fn get_system_health() -> SystemHealth {
    SystemHealth::from_components(
        vec![("database".to_string(), database_component())]
            .into_iter()
            .collect(),
    )
}
