use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Client settings read from `config.yaml` in the data directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Persistable for ClientConfig {
    fn key() -> &'static str {
        "config"
    }
    fn is_json() -> bool {
        false
    }
}

impl ClientConfig {
    /// A non-empty `--api-url` wins over the file.
    pub fn with_override(mut self, api_url: Option<&str>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().api_base_url, "http://localhost:8000");
        assert_eq!(ClientConfig::filename(), "config.yaml");
    }

    #[test]
    fn test_yaml_missing_key_uses_default() {
        let cfg: ClientConfig = serde_norway::from_str("{}").unwrap();
        assert_eq!(cfg, ClientConfig::default());
    }

    #[test]
    fn test_override_and_trailing_slash() {
        let cfg = ClientConfig::default().with_override(Some("https://api.example.com/"));
        assert_eq!(cfg.api_base_url, "https://api.example.com");
        let cfg = ClientConfig::default().with_override(Some("  "));
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }
}
