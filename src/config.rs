use std::env;

use anyhow::{Result, anyhow};

pub const DEFAULT_BASE_URL: &str = "https://skillcorner.com";
const DEFAULT_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub page_limit: u32,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("SKILLCORNER_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let page_limit = env::var("SKILLCORNER_PAGE_LIMIT")
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, 1000);

        Self {
            base_url,
            username: env_string("SKILLCORNER_USERNAME"),
            password: env_string("SKILLCORNER_PASSWORD"),
            page_limit,
        }
    }

    pub fn with_credentials(username: &str, password: &str) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn credentials(&self) -> Result<(&str, &str)> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| anyhow!("SKILLCORNER_USERNAME is not set"))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| anyhow!("SKILLCORNER_PASSWORD is not set"))?;
        Ok((username, password))
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_parts() {
        let mut cfg = ProviderConfig::with_credentials("analyst", "secret");
        assert_eq!(cfg.credentials().unwrap(), ("analyst", "secret"));

        cfg.password = None;
        let err = cfg.credentials().unwrap_err();
        assert!(err.to_string().contains("SKILLCORNER_PASSWORD"));
    }
}
