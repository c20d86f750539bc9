//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::repository::DeletePolicy;

/// Which remote client the server talks to.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted backend reached over HTTPS.
    #[default]
    Remote,
    /// Process-local tables, empty on start.
    Memory,
}

fn default_page_size() -> usize {
    20
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub delete_policy: DeletePolicy,
}

impl ServerConfig {
    /// Configuration for a process-local backend, used by tests and demos.
    pub fn in_memory(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            project_id: String::new(),
            public_key: String::new(),
            api_url: String::new(),
            backend: BackendKind::Memory,
            page_size: default_page_size(),
            delete_policy: DeletePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: ServerConfig =
            serde_json::from_value(json!({"address": "127.0.0.1", "port": 8080})).unwrap();

        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.delete_policy, DeletePolicy::Any);
    }

    #[test]
    fn tokens_are_lowercase() {
        let config: ServerConfig = serde_json::from_value(json!({
            "address": "0.0.0.0",
            "port": 80,
            "backend": "memory",
            "delete_policy": "all",
        }))
        .unwrap();

        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.delete_policy, DeletePolicy::All);
    }
}
