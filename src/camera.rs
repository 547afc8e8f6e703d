/// Camera capability.
///
/// The sensor only refers to a camera by name. Frames are pulled by the
/// vision service, never by this crate.
pub trait Camera: Send + Sync {
    fn name(&self) -> &str;
}

/// A camera known only by its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedCamera {
    name: String,
}

impl NamedCamera {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Camera for NamedCamera {
    fn name(&self) -> &str {
        &self.name
    }
}
