//! Fetches the opening paragraph of Wikipedia articles.
//!
//! Each manifest link is reduced to its page title and looked up through the
//! REST summary endpoint, whose `extract` field holds the article's lead
//! paragraph as plain text.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{DocumentSource, Manifest};
use crate::document::Document;
use crate::errors::FetchError;

pub const DEFAULT_API_BASE: &str = "https://en.wikipedia.org/api/rest_v1";

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: Option<String>,
}

pub struct WikipediaSource {
    client: reqwest::Client,
    api_base: String,
    manifest: Manifest,
}

impl WikipediaSource {
    pub fn new(
        manifest: Manifest,
        api_base: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            manifest,
        })
    }

    fn summary_url(&self, link: &str) -> String {
        format!("{}/page/summary/{}", self.api_base, page_title(link))
    }
}

/// Reduce a link to a page title: the segment after `/wiki/`, or the whole
/// string when it is not a wiki URL.
pub fn page_title(link: &str) -> String {
    let link = link.trim();
    let title = match link.rsplit_once("/wiki/") {
        Some((_, rest)) => rest,
        None => link,
    };
    let title = title.split(['#', '?']).next().unwrap_or_default();
    title.replace(' ', "_").replace('/', "%2F")
}

#[async_trait]
impl DocumentSource for WikipediaSource {
    fn len(&self) -> usize {
        self.manifest.len()
    }

    async fn fetch(&self, index: usize) -> Result<Document, FetchError> {
        let entry = self
            .manifest
            .get(index)
            .ok_or_else(|| FetchError::new(index, "index past end of manifest"))?;
        let fail = |message: String| FetchError::new(index, message).with_name(&entry.name);

        let url = self.summary_url(&entry.link);
        debug!(index, name = %entry.name, %url, "Fetching summary");

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| fail(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(index, %status, "Summary endpoint returned error status");
            return Err(fail(format!("HTTP {}", status)));
        }

        let summary = resp
            .json::<SummaryResponse>()
            .await
            .map_err(|e| fail(format!("invalid summary response: {}", e)))?;

        match summary.extract {
            Some(text) if !text.trim().is_empty() => Ok(Document::new(&entry.name, text)),
            _ => Err(fail("article has no intro text".to_string())),
        }
    }
}
