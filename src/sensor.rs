//! Sensor capability and the person-presence sensor.
//!
//! `PersonSensor` delegates all detection work to a vision service. Each call
//! to `readings` is one detection query against the configured camera,
//! reduced to `{"person_detected": 0|1}`. Nothing is cached between calls and
//! failures are handed back to the caller untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::camera::Camera;
use crate::config::{self, ComponentConfig, PersonSensorConfig};
use crate::error::{Result, SensorError};
use crate::resource::Dependencies;
use crate::vision::{Detection, VisionService};

/// Key of the only reading this sensor produces.
pub const PERSON_DETECTED: &str = "person_detected";

/// Sensor readings keyed by reading name.
pub type Readings = BTreeMap<String, Value>;

/// Sensor capability.
pub trait Sensor: Send + Sync {
    fn name(&self) -> &str;

    /// Take one set of readings.
    fn readings(&self) -> Result<Readings>;

    /// Model-specific commands.
    fn do_command(&self, _command: &Map<String, Value>) -> Result<Map<String, Value>> {
        Err(SensorError::Unimplemented("do_command"))
    }

    /// Physical geometries of the sensor, as JSON objects.
    fn geometries(&self) -> Result<Vec<Value>> {
        Err(SensorError::Unimplemented("geometries"))
    }
}

/// True when `detections` holds anything that counts as a person.
///
/// Without a label every detection counts: the vision service is expected to
/// be configured as a person detector. With a label only matching classes
/// count (case-insensitive).
pub fn person_present(detections: &[Detection], label: Option<&str>) -> bool {
    match label {
        None => !detections.is_empty(),
        Some(label) => detections.iter().any(|d| d.is_class(label)),
    }
}

/// Build the reading for a presence value.
pub fn person_reading(present: bool) -> Readings {
    let mut readings = Readings::new();
    readings.insert(PERSON_DETECTED.to_string(), Value::from(u8::from(present)));
    readings
}

pub struct PersonSensor {
    name: String,
    config: PersonSensorConfig,
    camera: Arc<dyn Camera>,
    vision: Arc<dyn VisionService>,
}

struct Resolved {
    config: PersonSensorConfig,
    camera: Arc<dyn Camera>,
    vision: Arc<dyn VisionService>,
}

fn resolve(config: &ComponentConfig, deps: &Dependencies) -> Result<Resolved> {
    config::check_model(config)?;
    let sensor_config = PersonSensorConfig::from_attributes(&config.attributes)?;
    let vision = deps.vision(&sensor_config.vision_service)?;
    let camera = deps.camera(&sensor_config.camera_name)?;
    Ok(Resolved {
        config: sensor_config,
        camera,
        vision,
    })
}

impl PersonSensor {
    /// Validate `config` and resolve its camera and vision service.
    pub fn new(config: &ComponentConfig, deps: &Dependencies) -> Result<Self> {
        let resolved = resolve(config, deps)?;
        log::info!(
            "{}: using vision service {} on camera {}",
            config.name,
            resolved.vision.name(),
            resolved.camera.name()
        );
        Ok(Self {
            name: config.name.clone(),
            config: resolved.config,
            camera: resolved.camera,
            vision: resolved.vision,
        })
    }

    /// Swap in a new configuration. On error the current wiring is kept.
    pub fn reconfigure(&mut self, config: &ComponentConfig, deps: &Dependencies) -> Result<()> {
        log::info!("{}: reconfiguring", self.name);
        let resolved = resolve(config, deps)?;
        self.name = config.name.clone();
        self.config = resolved.config;
        self.camera = resolved.camera;
        self.vision = resolved.vision;
        Ok(())
    }

    pub fn config(&self) -> &PersonSensorConfig {
        &self.config
    }

    pub fn camera_name(&self) -> &str {
        self.camera.name()
    }

    pub fn vision_service_name(&self) -> &str {
        self.vision.name()
    }

    /// Log whether the vision service can detect at all. Never fails.
    fn diagnose_failure(&self) {
        match self.vision.properties() {
            Ok(props) if !props.detections_supported => log::warn!(
                "{}: vision service {} does not support detection",
                self.name,
                self.vision.name()
            ),
            Ok(_) => {}
            Err(e) => log::debug!(
                "{}: properties of vision service {} unavailable: {:#}",
                self.name,
                self.vision.name(),
                e
            ),
        }
    }
}

impl Sensor for PersonSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn readings(&self) -> Result<Readings> {
        let detections = match self.vision.detections_from_camera(self.camera.name()) {
            Ok(detections) => detections,
            Err(e) => {
                log::error!("{}: error retrieving detections: {:#}", self.name, e);
                self.diagnose_failure();
                return Err(SensorError::Vision(e));
            }
        };

        let present = person_present(&detections, self.config.label.as_deref());
        log::debug!(
            "{}: {}={} ({} detections)",
            self.name,
            PERSON_DETECTED,
            u8::from(present),
            detections.len()
        );
        Ok(person_reading(present))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_detection_counts_without_label() {
        assert!(!person_present(&[], None));
        assert!(person_present(&[Detection::labelled("dog", 0.4)], None));
    }

    #[test]
    fn label_filters_case_insensitively() {
        let detections = vec![
            Detection::labelled("dog", 0.8),
            Detection::labelled("PERSON", 0.7),
        ];
        assert!(person_present(&detections, Some("person")));
        assert!(!person_present(&detections[..1], Some("person")));
    }

    #[test]
    fn reading_has_single_integer_key() {
        let reading = person_reading(true);
        assert_eq!(reading.len(), 1);
        assert_eq!(reading.get(PERSON_DETECTED), Some(&Value::from(1)));
        assert_eq!(
            person_reading(false).get(PERSON_DETECTED),
            Some(&Value::from(0))
        );
    }
}
