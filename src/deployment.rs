//! Deployment file for `person_sensord`.
//!
//! Loads from the JSON file named by `PERSON_SENSOR_CONFIG` (or an explicit
//! path), then applies environment overrides, then validates.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::camera::NamedCamera;
use crate::config::{ComponentConfig, ATTR_CAMERA_NAME};
use crate::resource::Dependencies;

pub const ENV_CONFIG_PATH: &str = "PERSON_SENSOR_CONFIG";
pub const ENV_POLL_MS: &str = "PERSON_SENSOR_POLL_MS";
pub const ENV_CAMERA: &str = "PERSON_SENSOR_CAMERA";

const DEFAULT_SENSOR_NAME: &str = "person-sensor";
const DEFAULT_POLL_MS: u64 = 1000;
const DEFAULT_VISION_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Deserialize, Default)]
struct DeploymentFile {
    sensor: Option<SensorFile>,
    cameras: Option<Vec<String>>,
    vision_services: Option<Vec<VisionServiceFile>>,
    poll_interval_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct SensorFile {
    name: Option<String>,
    model: Option<String>,
    attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct VisionServiceFile {
    name: String,
    url: String,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct VisionServiceSettings {
    pub name: String,
    pub url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub sensor: ComponentConfig,
    pub cameras: Vec<String>,
    pub vision_services: Vec<VisionServiceSettings>,
    pub poll_interval: Duration,
}

impl DeploymentConfig {
    /// Load from `PERSON_SENSOR_CONFIG` if set, otherwise defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH).ok();
        Self::load_from(path.as_deref().map(Path::new))
    }

    /// Load from an explicit path (or defaults when `None`), then apply env.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => read_deployment_file(path)?,
            None => DeploymentFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: DeploymentFile) -> Self {
        let sensor_file = file.sensor.unwrap_or_default();
        let mut sensor = ComponentConfig::new(
            sensor_file
                .name
                .unwrap_or_else(|| DEFAULT_SENSOR_NAME.to_string()),
            sensor_file.attributes.unwrap_or_default(),
        );
        if let Some(model) = sensor_file.model {
            sensor.model = model;
        }
        let vision_services = file
            .vision_services
            .unwrap_or_default()
            .into_iter()
            .map(|svc| VisionServiceSettings {
                name: svc.name,
                url: svc.url,
                timeout: Duration::from_millis(
                    svc.timeout_ms.unwrap_or(DEFAULT_VISION_TIMEOUT_MS),
                ),
            })
            .collect();
        Self {
            sensor,
            cameras: file.cameras.unwrap_or_default(),
            vision_services,
            poll_interval: Duration::from_millis(
                file.poll_interval_ms.unwrap_or(DEFAULT_POLL_MS),
            ),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(poll) = std::env::var(ENV_POLL_MS) {
            let millis: u64 = poll.trim().parse().map_err(|_| {
                anyhow!("{} must be an integer number of milliseconds", ENV_POLL_MS)
            })?;
            self.poll_interval = Duration::from_millis(millis);
        }
        if let Ok(camera) = std::env::var(ENV_CAMERA) {
            if !camera.trim().is_empty() {
                self.sensor
                    .attributes
                    .insert(ATTR_CAMERA_NAME.to_string(), Value::String(camera));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(anyhow!("poll interval must be greater than zero"));
        }
        ensure_unique("camera", self.cameras.iter().map(String::as_str))?;
        ensure_unique(
            "vision service",
            self.vision_services.iter().map(|svc| svc.name.as_str()),
        )?;
        Ok(())
    }

    /// Register every configured camera. Vision services are added by the caller,
    /// since how they are reached depends on enabled features.
    pub fn camera_dependencies(&self) -> Dependencies {
        let mut deps = Dependencies::new();
        for name in &self.cameras {
            deps.insert_camera(Arc::new(NamedCamera::new(name.clone())));
        }
        deps
    }

    /// Cameras plus an HTTP client for every configured vision service.
    #[cfg(feature = "vision-http")]
    pub fn dependencies(&self) -> Result<Dependencies> {
        use crate::vision::{HttpVisionConfig, HttpVisionService};

        let mut deps = self.camera_dependencies();
        for svc in &self.vision_services {
            let service = HttpVisionService::new(HttpVisionConfig {
                name: svc.name.clone(),
                url: svc.url.clone(),
                timeout: svc.timeout,
            })?;
            deps.insert_vision(Arc::new(service));
        }
        Ok(deps)
    }
}

fn ensure_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(anyhow!("{} name cannot be empty", kind));
        }
        if !seen.insert(name) {
            return Err(anyhow!("duplicate {} name '{}'", kind, name));
        }
    }
    Ok(())
}

fn read_deployment_file(path: &Path) -> Result<DeploymentFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
