use std::sync::Arc;

use anyhow::{Context, Result};
use vyomgarud_shared::{
    cms::CmsClient, source::FixtureSource, view::RenderMode, ContentSource, Normalizer,
};

use crate::config::{ServerConfig, SourceKind};

#[derive(Clone)]
pub struct AppState {
    /// Where raw posts and categories are fetched from
    source: Arc<dyn ContentSource>,
    normalizer: Normalizer,
    /// Used by `/api/blog` when the request has no `view` parameter
    render_mode: RenderMode,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let normalizer = Normalizer::new(config.defaults.clone());
        let source: Arc<dyn ContentSource> = match &config.source {
            SourceKind::Cms {
                base_url,
                timeout,
            } => Arc::new(
                CmsClient::new(base_url, *timeout)
                    .with_context(|| format!("failed to build CMS client for {base_url}"))?,
            ),
            SourceKind::Fixture => Arc::new(FixtureSource::new(normalizer.clone())),
        };
        Ok(Self::new(source, normalizer, config.render_mode))
    }

    pub fn new(
        source: Arc<dyn ContentSource>,
        normalizer: Normalizer,
        render_mode: RenderMode,
    ) -> Self {
        Self {
            source,
            normalizer,
            render_mode,
        }
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }
}
