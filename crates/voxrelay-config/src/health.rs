use serde::Deserialize;

/// `GET` route reporting process status and capability load state
///
/// Every service mounts it at the same path so one probe configuration
/// covers the backend, translation and speech-synthesis processes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl HealthConfig {
    /// Mount path, or `None` when the route is disabled
    pub fn route(&self) -> Option<&str> {
        self.enabled.then_some(self.path.as_str())
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_owned()
}
