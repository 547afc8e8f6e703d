//! Resource naming and the dependency registry.
//!
//! The host resolves a sensor's dependencies by name before construction.
//! `Dependencies` is that resolved set: each entry maps a `ResourceName` to a
//! shared capability handle. The sensor borrows handles out of it and never
//! owns the underlying camera or vision service.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::camera::Camera;
use crate::error::{Result, SensorError};
use crate::vision::VisionService;

/// Namespace shared by all built-in resource APIs.
pub const RESOURCE_NAMESPACE: &str = "rdk";

/// API a resource implements.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceApi {
    Camera,
    Sensor,
    Vision,
}

impl ResourceApi {
    /// Components are hardware-like; services are software capabilities.
    fn kind(self) -> &'static str {
        match self {
            ResourceApi::Camera | ResourceApi::Sensor => "component",
            ResourceApi::Vision => "service",
        }
    }

    fn subtype(self) -> &'static str {
        match self {
            ResourceApi::Camera => "camera",
            ResourceApi::Sensor => "sensor",
            ResourceApi::Vision => "vision",
        }
    }
}

/// Fully qualified name of a resource, e.g. `rdk:service:vision/people`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName {
    pub api: ResourceApi,
    pub name: String,
}

impl ResourceName {
    pub fn new(api: ResourceApi, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
        }
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(ResourceApi::Camera, name)
    }

    pub fn vision(name: impl Into<String>) -> Self {
        Self::new(ResourceApi::Vision, name)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}/{}",
            RESOURCE_NAMESPACE,
            self.api.kind(),
            self.api.subtype(),
            self.name
        )
    }
}

/// Model triplet identifying a resource implementation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Model {
    pub namespace: String,
    pub family: String,
    pub name: String,
}

impl Model {
    pub fn new(namespace: &str, family: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            family: family.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.family, self.name)
    }
}

impl FromStr for Model {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [namespace, family, name]
                if !namespace.is_empty() && !family.is_empty() && !name.is_empty() =>
            {
                Ok(Model::new(namespace, family, name))
            }
            _ => Err(SensorError::config(format!(
                "model '{}' must be of the form namespace:family:name",
                s
            ))),
        }
    }
}

#[derive(Clone)]
enum Resource {
    Camera(Arc<dyn Camera>),
    Vision(Arc<dyn VisionService>),
}

/// Resolved dependencies available to a resource at construction time.
#[derive(Clone, Default)]
pub struct Dependencies {
    resources: BTreeMap<ResourceName, Resource>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a camera under its own name. Replaces any previous entry.
    pub fn insert_camera(&mut self, camera: Arc<dyn Camera>) {
        let name = ResourceName::camera(camera.name());
        self.resources.insert(name, Resource::Camera(camera));
    }

    /// Register a vision service under its own name. Replaces any previous entry.
    pub fn insert_vision(&mut self, vision: Arc<dyn VisionService>) {
        let name = ResourceName::vision(vision.name());
        self.resources.insert(name, Resource::Vision(vision));
    }

    pub fn with_camera(mut self, camera: Arc<dyn Camera>) -> Self {
        self.insert_camera(camera);
        self
    }

    pub fn with_vision(mut self, vision: Arc<dyn VisionService>) -> Self {
        self.insert_vision(vision);
        self
    }

    /// Look up a camera by name.
    pub fn camera(&self, name: &str) -> Result<Arc<dyn Camera>> {
        let key = ResourceName::camera(name);
        match self.resources.get(&key) {
            Some(Resource::Camera(camera)) => Ok(camera.clone()),
            _ => Err(SensorError::DependencyNotFound(key)),
        }
    }

    /// Look up a vision service by name.
    pub fn vision(&self, name: &str) -> Result<Arc<dyn VisionService>> {
        let key = ResourceName::vision(name);
        match self.resources.get(&key) {
            Some(Resource::Vision(vision)) => Ok(vision.clone()),
            _ => Err(SensorError::DependencyNotFound(key)),
        }
    }

    /// Registered resource names, sorted.
    pub fn names(&self) -> Vec<ResourceName> {
        self.resources.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::NamedCamera;
    use crate::vision::StubVision;

    #[test]
    fn resource_names_render_with_kind() {
        assert_eq!(
            ResourceName::camera("front").to_string(),
            "rdk:component:camera/front"
        );
        assert_eq!(
            ResourceName::vision("people").to_string(),
            "rdk:service:vision/people"
        );
    }

    #[test]
    fn model_parses_triplet() {
        let model: Model = "anazen:simple-person-sensor:person-sensor".parse().unwrap();
        assert_eq!(model.namespace, "anazen");
        assert_eq!(model.family, "simple-person-sensor");
        assert_eq!(model.name, "person-sensor");
        assert_eq!(model.to_string(), "anazen:simple-person-sensor:person-sensor");
    }

    #[test]
    fn model_rejects_short_or_empty_parts() {
        assert!("anazen:person-sensor".parse::<Model>().is_err());
        assert!("anazen::person-sensor".parse::<Model>().is_err());
        assert!("a:b:c:d".parse::<Model>().is_err());
    }

    #[test]
    fn lookups_are_typed() {
        let deps = Dependencies::new()
            .with_camera(Arc::new(NamedCamera::new("shared")))
            .with_vision(Arc::new(StubVision::new("people")));

        assert!(deps.camera("shared").is_ok());
        assert!(deps.vision("people").is_ok());

        // A camera named "shared" does not satisfy a vision lookup.
        match deps.vision("shared") {
            Err(SensorError::DependencyNotFound(name)) => {
                assert_eq!(name, ResourceName::vision("shared"));
            }
            other => panic!("expected DependencyNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn reinserting_replaces_entry() {
        let mut deps = Dependencies::new();
        deps.insert_camera(Arc::new(NamedCamera::new("front")));
        deps.insert_camera(Arc::new(NamedCamera::new("front")));
        assert_eq!(deps.len(), 1);
        assert_eq!(deps.names(), vec![ResourceName::camera("front")]);
    }
}
