//! Vision service reached over HTTP.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET detections?camera=<name>` returns `{"detections": [...]}`
//! - `GET properties` returns the service's `VisionProperties`
//!
//! Any non-2xx status, transport failure, or malformed body is an error.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use url::Url;

use crate::vision::result::{Detection, VisionProperties};
use crate::vision::service::VisionService;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for an HTTP vision service.
#[derive(Clone, Debug)]
pub struct HttpVisionConfig {
    /// Service name used for dependency lookups.
    pub name: String,
    /// Base URL. Supported schemes: http, https.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpVisionConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetectionsResponse {
    #[serde(default)]
    detections: Vec<Detection>,
}

pub struct HttpVisionService {
    name: String,
    base: Url,
    agent: ureq::Agent,
}

impl HttpVisionService {
    pub fn new(config: HttpVisionConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .with_context(|| format!("parse vision service url {}", config.url))?;
        match base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(anyhow!(
                    "unsupported vision service scheme '{}'; expected http(s)",
                    other
                ))
            }
        }
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Ok(Self {
            name: config.name,
            base,
            agent,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segment: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("vision service url {} cannot be a base", self.base))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn get_body(&self, request: ureq::Request, what: &str) -> Result<String> {
        let response = request
            .call()
            .with_context(|| format!("{} request to vision service {}", what, self.name))?;
        response
            .into_string()
            .with_context(|| format!("read {} response from vision service {}", what, self.name))
    }
}

impl VisionService for HttpVisionService {
    fn name(&self) -> &str {
        &self.name
    }

    fn detections_from_camera(&self, camera_name: &str) -> Result<Vec<Detection>> {
        let url = self.endpoint("detections")?;
        let request = self.agent.get(url.as_str()).query("camera", camera_name);
        let body = self.get_body(request, "detections")?;
        let parsed: DetectionsResponse = serde_json::from_str(&body).with_context(|| {
            format!("invalid detections response from vision service {}", self.name)
        })?;
        Ok(parsed.detections)
    }

    fn properties(&self) -> Result<VisionProperties> {
        let url = self.endpoint("properties")?;
        let body = self.get_body(self.agent.get(url.as_str()), "properties")?;
        serde_json::from_str(&body).with_context(|| {
            format!("invalid properties response from vision service {}", self.name)
        })
    }
}
