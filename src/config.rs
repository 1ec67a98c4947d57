//! Application configuration management.
//!
//! Configuration is stored at `~/.config/yapper/config.json` and holds an
//! optional override for the API base URL. All endpoint URLs are derived
//! from a single [`Endpoints`] value built once at startup, so no other
//! module hardcodes an address.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Application name used for config/credential directory paths
const APP_NAME: &str = "yapper";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API base URL (Noroff Social API v2)
const DEFAULT_API_BASE: &str = "https://v2.api.noroff.dev";

/// Environment variable that overrides the API base URL
const API_BASE_ENV: &str = "YAPPER_API_BASE";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory where credentials are persisted between runs
    pub fn credentials_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join("credentials"))
    }

    /// Resolve the endpoint set. Precedence: env var, config file, default.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let base = std::env::var(API_BASE_ENV)
            .ok()
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Endpoints::new(&base)
    }
}

/// All endpoint URLs the client talks to, derived from one base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base.trim_end_matches('/'))
            .with_context(|| format!("Invalid API base URL: {}", base))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("API base URL must be http or https: {}", base);
        }
        Ok(Self { base })
    }

    /// Join path segments onto the base URL. Segments are percent-encoded,
    /// so profile names with special characters stay intact.
    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn login(&self) -> Url {
        self.join(&["auth", "login"])
    }

    pub fn register(&self) -> Url {
        self.join(&["auth", "register"])
    }

    pub fn create_api_key(&self) -> Url {
        self.join(&["auth", "create-api-key"])
    }

    pub fn posts(&self) -> Url {
        self.join(&["social", "posts"])
    }

    pub fn post(&self, id: i64) -> Url {
        self.join(&["social", "posts", &id.to_string()])
    }

    pub fn posts_search(&self) -> Url {
        self.join(&["social", "posts", "search"])
    }

    pub fn profile(&self, name: &str) -> Url {
        self.join(&["social", "profiles", name])
    }

    pub fn profile_posts(&self, name: &str) -> Url {
        self.join(&["social", "profiles", name, "posts"])
    }

    pub fn follow(&self, name: &str) -> Url {
        self.join(&["social", "profiles", name, "follow"])
    }

    pub fn unfollow(&self, name: &str) -> Url {
        self.join(&["social", "profiles", name, "unfollow"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let endpoints = Endpoints::new("https://v2.api.noroff.dev").unwrap();
        assert_eq!(
            endpoints.login().as_str(),
            "https://v2.api.noroff.dev/auth/login"
        );
        assert_eq!(
            endpoints.post(42).as_str(),
            "https://v2.api.noroff.dev/social/posts/42"
        );
        assert_eq!(
            endpoints.follow("alice").as_str(),
            "https://v2.api.noroff.dev/social/profiles/alice/follow"
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let endpoints = Endpoints::new("https://v2.api.noroff.dev/").unwrap();
        assert_eq!(
            endpoints.posts().as_str(),
            "https://v2.api.noroff.dev/social/posts"
        );
    }

    #[test]
    fn test_profile_names_are_encoded() {
        let endpoints = Endpoints::new("https://v2.api.noroff.dev").unwrap();
        assert_eq!(
            endpoints.profile("ola nordmann").as_str(),
            "https://v2.api.noroff.dev/social/profiles/ola%20nordmann"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(Endpoints::new("ftp://example.com").is_err());
        assert!(Endpoints::new("not a url").is_err());
    }
}
