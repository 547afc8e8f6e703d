use anyhow::Result;

use crate::vision::result::{Detection, VisionProperties};

/// Vision service capability.
///
/// Implementations own detection end to end: they fetch frames from the named
/// camera, run their model, and apply their own confidence threshold. Callers
/// get back whatever the service considers a detection.
pub trait VisionService: Send + Sync {
    /// Service identifier, as referenced from sensor configuration.
    fn name(&self) -> &str;

    /// Detections for the most recent frame of `camera_name`.
    fn detections_from_camera(&self, camera_name: &str) -> Result<Vec<Detection>>;

    /// Capabilities advertised by the service.
    fn properties(&self) -> Result<VisionProperties>;
}
