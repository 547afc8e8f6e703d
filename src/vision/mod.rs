mod backends;
mod result;
mod service;

#[cfg(feature = "vision-http")]
pub use backends::{HttpVisionConfig, HttpVisionService};
pub use backends::{StubResponse, StubVision};
pub use result::{Detection, VisionProperties};
pub use service::VisionService;
