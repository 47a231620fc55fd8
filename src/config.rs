//! Configuration loaded from environment variables.
//!
//! - `VK_API_TOKEN` (required): VK access token.
//! - `VK_API_BASE_URL` (optional): API root, defaults to `https://api.vk.ru/method`.
//!
//! `main` loads a `.env` file before calling [`Config::from_env`].

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://api.vk.ru/method";

#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("VK_API_TOKEN").context("VK_API_TOKEN must be set")?;
        let api_base_url = env::var("VK_API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());

        Ok(Config {
            token,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

// Keeps the token out of debug logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"***")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_token_is_an_error() {
        env::remove_var("VK_API_TOKEN");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("VK_API_TOKEN"));
    }

    #[test]
    #[serial]
    fn defaults_base_url() {
        env::set_var("VK_API_TOKEN", "secret");
        env::remove_var("VK_API_BASE_URL");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.token, "secret");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        env::remove_var("VK_API_TOKEN");
    }

    #[test]
    #[serial]
    fn base_url_override_drops_trailing_slash() {
        env::set_var("VK_API_TOKEN", "secret");
        env::set_var("VK_API_BASE_URL", "http://127.0.0.1:9000/method/");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000/method");
        env::remove_var("VK_API_TOKEN");
        env::remove_var("VK_API_BASE_URL");
    }

    #[test]
    #[serial]
    fn debug_hides_token() {
        let cfg = Config {
            token: "very-secret".into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
        };
        assert!(!format!("{:?}", cfg).contains("very-secret"));
    }
}
