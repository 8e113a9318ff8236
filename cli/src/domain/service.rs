//! Services discovered in the project root.

/// A buildable service: a project subdirectory carrying a build descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Service {
    name: String,
}

impl Service {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image tag for this service, e.g. `backend-service:latest`.
    #[must_use]
    pub fn image_tag(&self, suffix: &str) -> String {
        format!("{}{suffix}:latest", self.name)
    }

    /// Build context relative to the project root.
    #[must_use]
    pub fn build_context(&self) -> String {
        format!("./{}", self.name)
    }
}

/// Turn directory entries into a sorted service list.
///
/// Each entry is `(directory name, has build descriptor)`. Entries without a
/// descriptor are skipped.
pub fn select_services<I>(entries: I) -> Vec<Service>
where
    I: IntoIterator<Item = (String, bool)>,
{
    let mut services: Vec<Service> = entries
        .into_iter()
        .filter(|(_, has_descriptor)| *has_descriptor)
        .map(|(name, _)| Service::new(name))
        .collect();
    services.sort();
    services
}
