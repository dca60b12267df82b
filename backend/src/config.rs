use std::{env, time::Duration};

use anyhow::{bail, Context, Result};
use vyomgarud_shared::{cms::DEFAULT_CMS_BASE_URL, view::RenderMode, NormalizeDefaults};

/// Where raw records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Cms { base_url: String, timeout: Duration },
    Fixture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_addr: String,
    pub source: SourceKind,
    pub render_mode: RenderMode,
    pub defaults: NormalizeDefaults,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(port) => port.parse().with_context(|| format!("invalid PORT `{port}`"))?,
            None => 3000,
        };
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());

        let source = match get("CONTENT_SOURCE").as_deref().unwrap_or("cms") {
            "cms" => {
                let timeout_secs: u64 = match get("CMS_TIMEOUT_SECS") {
                    Some(secs) => secs
                        .parse()
                        .with_context(|| format!("invalid CMS_TIMEOUT_SECS `{secs}`"))?,
                    None => 10,
                };
                SourceKind::Cms {
                    base_url: get("CMS_BASE_URL").unwrap_or_else(|| DEFAULT_CMS_BASE_URL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                }
            },
            "fixture" => SourceKind::Fixture,
            other => bail!("invalid CONTENT_SOURCE `{other}` (expected cms or fixture)"),
        };

        let render_mode = match get("RENDER_MODE") {
            Some(mode) => mode.parse().map_err(anyhow::Error::msg)?,
            None => RenderMode::Normal,
        };

        let mut defaults = NormalizeDefaults::default();
        if let Some(title) = get("TITLE_PLACEHOLDER") {
            defaults.title = title;
        }
        if let Some(excerpt) = get("EXCERPT_PLACEHOLDER") {
            defaults.excerpt = excerpt;
        }

        Ok(Self {
            port,
            bind_addr,
            source,
            render_mode,
            defaults,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
