use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{anyhow, Result};

use crate::vision::result::{Detection, VisionProperties};
use crate::vision::service::VisionService;

/// What a `StubVision` answers with on the next detection call.
#[derive(Clone, Debug)]
pub enum StubResponse {
    Detections(Vec<Detection>),
    Fail(String),
}

#[derive(Clone, Debug)]
enum StubProperties {
    Report(VisionProperties),
    Fail(String),
}

/// In-process vision service with a scripted response. Used for testing.
pub struct StubVision {
    name: String,
    response: Mutex<StubResponse>,
    properties: StubProperties,
    calls: AtomicUsize,
}

impl StubVision {
    /// A detector that reports nothing until told otherwise.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: Mutex::new(StubResponse::Detections(Vec::new())),
            properties: StubProperties::Report(VisionProperties::detector()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_detections(self, detections: Vec<Detection>) -> Self {
        self.respond(StubResponse::Detections(detections));
        self
    }

    pub fn with_properties(mut self, properties: VisionProperties) -> Self {
        self.properties = StubProperties::Report(properties);
        self
    }

    /// Make `properties` fail with `msg`.
    pub fn with_properties_failure(mut self, msg: impl Into<String>) -> Self {
        self.properties = StubProperties::Fail(msg.into());
        self
    }

    /// Replace the scripted response.
    pub fn respond(&self, response: StubResponse) {
        *self.response_guard() = response;
    }

    /// Poisoning is ignored: every write replaces the whole response.
    fn response_guard(&self) -> MutexGuard<'_, StubResponse> {
        self.response.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of detection calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl VisionService for StubVision {
    fn name(&self) -> &str {
        &self.name
    }

    fn detections_from_camera(&self, camera_name: &str) -> Result<Vec<Detection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.response_guard() {
            StubResponse::Detections(detections) => Ok(detections.clone()),
            StubResponse::Fail(msg) => Err(anyhow!("{} (camera {})", msg, camera_name)),
        }
    }

    fn properties(&self) -> Result<VisionProperties> {
        match &self.properties {
            StubProperties::Report(props) => Ok(*props),
            StubProperties::Fail(msg) => Err(anyhow!("{}", msg)),
        }
    }
}
