//! Error types for the person sensor.

use thiserror::Error;

use crate::resource::ResourceName;

/// Errors surfaced by sensor construction and readings.
#[derive(Error, Debug)]
pub enum SensorError {
    /// A required attribute is missing, empty, or has the wrong type.
    #[error("configuration error: {0}")]
    Config(String),

    /// A named dependency is not registered in the current deployment.
    #[error("dependency not found: {0}")]
    DependencyNotFound(ResourceName),

    /// The vision service call failed. Passed through as-is.
    #[error(transparent)]
    Vision(anyhow::Error),

    #[error("{0} is not implemented for this sensor")]
    Unimplemented(&'static str),
}

impl SensorError {
    pub fn config(msg: impl Into<String>) -> Self {
        SensorError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SensorError>;
