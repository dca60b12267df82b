//! HTTP client for the headless CMS (`/articles`, `/categories`).
//!
//! Every failure is caught here and surfaces to callers as
//! [`ContentOutcome::Empty`] with a reason; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::source::{ArticleQuery, ContentOutcome, ContentSource, EmptyReason};

/// Default CMS API root used by local development setups.
pub const DEFAULT_CMS_BASE_URL: &str = "http://localhost:1337/api";

#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// Base URL is not an http(s) URL
    #[error("invalid CMS base URL: {0}")]
    InvalidBaseUrl(String),

    /// Request could not be sent or its body could not be read
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx answer
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body is not a `{ "data": [...] }` document
    #[error("unexpected response from {url}: {detail}")]
    Malformed { url: String, detail: String },
}

impl CmsError {
    pub fn into_empty_reason(self) -> EmptyReason {
        match self {
            CmsError::InvalidBaseUrl(url) => {
                EmptyReason::Unreachable(format!("invalid base URL {url}"))
            },
            CmsError::Transport {
                source, ..
            } => EmptyReason::Unreachable(source.to_string()),
            CmsError::Status {
                status, ..
            } => EmptyReason::Status(status),
            CmsError::Malformed {
                detail, ..
            } => EmptyReason::Malformed(detail),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CmsError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CmsError::InvalidBaseUrl(base_url));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CmsError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Articles with relations populated, newest first.
    pub async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Value>, CmsError> {
        let mut params = vec![
            ("populate".to_string(), "*".to_string()),
            ("sort".to_string(), "publishedAt:desc".to_string()),
        ];
        // Category names compare case-insensitively, like `filter_articles`.
        if let Some(category) = query.category.as_deref().map(str::trim) {
            params.push(("filters[category][name][$eqi]".to_string(), category.to_string()));
        }
        if let Some(slug) = query.slug.as_deref().map(str::trim) {
            params.push(("filters[slug][$eq]".to_string(), slug.to_string()));
        }
        self.fetch_collection("articles", &params).await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Value>, CmsError> {
        let params = [("populate".to_string(), "*".to_string())];
        self.fetch_collection("categories", &params).await
    }

    async fn fetch_collection(
        &self,
        collection: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Value>, CmsError> {
        let url = format!("{}/{collection}", self.base_url);
        tracing::debug!(url = %url, "fetching CMS collection");

        let response = self
            .http
            .get(&url)
            .query(params)
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|source| CmsError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| CmsError::Transport {
            url: url.clone(),
            source,
        })?;
        let document: Value = serde_json::from_slice(&body).map_err(|err| CmsError::Malformed {
            url: url.clone(),
            detail: err.to_string(),
        })?;

        unwrap_data_envelope(document).map_err(|detail| CmsError::Malformed {
            url,
            detail,
        })
    }
}

/// Pull the record list out of `{ "data": [...] }`. A missing or null
/// `data` is an empty list.
pub fn unwrap_data_envelope(document: Value) -> Result<Vec<Value>, String> {
    let Value::Object(mut object) = document else {
        return Err("response body is not a JSON object".to_string());
    };
    match object.remove("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(format!("`data` is not an array (found {})", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn articles(&self, query: &ArticleQuery) -> ContentOutcome {
        match self.fetch_articles(query).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "fetched articles");
                ContentOutcome::from_records(records)
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch articles, serving empty list");
                ContentOutcome::Empty(err.into_empty_reason())
            },
        }
    }

    async fn categories(&self) -> ContentOutcome {
        match self.fetch_categories().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "fetched categories");
                ContentOutcome::from_records(records)
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch categories, serving empty list");
                ContentOutcome::Empty(err.into_empty_reason())
            },
        }
    }

    fn name(&self) -> &'static str {
        "cms"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::{unwrap_data_envelope, CmsClient, CmsError};

    #[test]
    fn unwrap_data_envelope_handles_missing_and_null_data() {
        assert_eq!(unwrap_data_envelope(json!({})), Ok(Vec::new()));
        assert_eq!(unwrap_data_envelope(json!({ "data": null })), Ok(Vec::new()));
        assert_eq!(unwrap_data_envelope(json!({ "data": [1, 2] })), Ok(vec![json!(1), json!(2)]));
    }

    #[test]
    fn unwrap_data_envelope_rejects_other_documents() {
        assert!(unwrap_data_envelope(json!([])).is_err());
        let err = unwrap_data_envelope(json!({ "data": { "id": 1 } })).expect_err("object data");
        assert!(err.contains("object"));
    }

    #[test]
    fn new_rejects_non_http_base_url() {
        let err = CmsClient::new("ftp://cms.local", Duration::from_secs(1)).expect_err("bad url");
        assert!(matches!(err, CmsError::InvalidBaseUrl(_)));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = CmsClient::new(" http://cms.local/api/ ", Duration::from_secs(1))
            .expect("valid client");
        assert_eq!(client.base_url(), "http://cms.local/api");
    }
}
