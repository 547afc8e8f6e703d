pub mod stub;

#[cfg(feature = "vision-http")]
pub mod http;

pub use stub::{StubResponse, StubVision};

#[cfg(feature = "vision-http")]
pub use http::{HttpVisionConfig, HttpVisionService};
