//! Person-presence sensor
//!
//! A virtual sensor that asks an external vision service for detections on a
//! named camera and reports a single reading, `person_detected`, as 0 or 1.
//!
//! # Architecture
//!
//! The sensor owns no detection logic. Everything it needs arrives through
//! two capability traits resolved by name at construction:
//!
//! 1. **Camera**: referenced by name only; frames stay inside the vision service.
//! 2. **VisionService**: answers "detections for camera X".
//!
//! Every reading is one delegated call. There is no cache, no retry and no
//! fallback value: if the vision service fails, the caller sees that failure.
//!
//! # Module Structure
//!
//! - `config`: component attributes and validation
//! - `resource`: resource names, model triplet, dependency registry
//! - `vision`: vision service trait, detection records, backends (stub, HTTP)
//! - `sensor`: `Sensor` trait and `PersonSensor`
//! - `deployment`: deployment file for the `person_sensord` daemon

pub mod camera;
pub mod config;
pub mod deployment;
pub mod error;
pub mod resource;
pub mod sensor;
pub mod vision;

pub use camera::{Camera, NamedCamera};
pub use config::{ComponentConfig, PersonSensorConfig};
pub use error::SensorError;
pub use resource::{Dependencies, Model, ResourceApi, ResourceName};
pub use sensor::{person_present, person_reading, PersonSensor, Readings, Sensor, PERSON_DETECTED};
pub use vision::{Detection, StubResponse, StubVision, VisionProperties, VisionService};

#[cfg(feature = "vision-http")]
pub use vision::{HttpVisionConfig, HttpVisionService};

pub const MODEL_NAMESPACE: &str = "anazen";
pub const MODEL_FAMILY: &str = "simple-person-sensor";
pub const MODEL_NAME: &str = "person-sensor";

/// Model implemented by `PersonSensor`.
pub fn model() -> Model {
    Model::new(MODEL_NAMESPACE, MODEL_FAMILY, MODEL_NAME)
}
