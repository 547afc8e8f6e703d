use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SensorError};
use crate::resource::Model;

pub const ATTR_CAMERA_NAME: &str = "camera_name";
pub const ATTR_VISION_SERVICE: &str = "vision_service";
pub const ATTR_LABEL: &str = "label";

/// Host description of a component: its name, model, and free-form attributes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub name: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

fn default_model() -> String {
    crate::model().to_string()
}

impl ComponentConfig {
    pub fn new(name: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            model: default_model(),
            attributes,
        }
    }

    pub fn model(&self) -> Result<Model> {
        self.model.parse()
    }
}

/// Validated attributes of a person sensor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonSensorConfig {
    pub camera_name: String,
    pub vision_service: String,
    /// Only detections with this class label count, when set.
    pub label: Option<String>,
}

impl PersonSensorConfig {
    pub fn from_attributes(attributes: &Map<String, Value>) -> Result<Self> {
        let vision_service = required_string(attributes, ATTR_VISION_SERVICE)?;
        let camera_name = required_string(attributes, ATTR_CAMERA_NAME)?;
        let label = match attributes.get(ATTR_LABEL) {
            None | Some(Value::Null) => None,
            Some(_) => Some(required_string(attributes, ATTR_LABEL)?),
        };
        Ok(Self {
            camera_name,
            vision_service,
            label,
        })
    }

    /// Names this sensor needs resolved before it can be built.
    pub fn dependencies(&self) -> Vec<String> {
        vec![self.vision_service.clone(), self.camera_name.clone()]
    }
}

/// Check a component config and return its implicit dependencies.
pub fn validate(config: &ComponentConfig) -> Result<Vec<String>> {
    check_model(config)?;
    Ok(PersonSensorConfig::from_attributes(&config.attributes)?.dependencies())
}

/// Reject components that are not a person sensor.
pub fn check_model(config: &ComponentConfig) -> Result<()> {
    let model = config.model()?;
    if model != crate::model() {
        return Err(SensorError::config(format!(
            "component '{}' has model {}, expected {}",
            config.name,
            model,
            crate::model()
        )));
    }
    Ok(())
}

fn required_string(attributes: &Map<String, Value>, field: &str) -> Result<String> {
    let value = match attributes.get(field) {
        Some(Value::String(value)) => value,
        _ => {
            return Err(SensorError::config(format!(
                "'{}' attribute is missing or not a valid string",
                field
            )))
        }
    };
    if value.trim().is_empty() {
        return Err(SensorError::config(format!(
            "'{}' attribute cannot be an empty string",
            field
        )));
    }
    Ok(value.clone())
}
