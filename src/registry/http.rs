//! HTTP Registry
//!
//! Fetches the index and skill bodies from a static HTTPS tree (raw file
//! hosting is enough). Every request carries a hard timeout; a slow or
//! unreachable registry degrades into the stale-cache path instead of
//! delaying the user's prompt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{RouterError, RouterResult};
use crate::index::{parse_index, SkillDescriptor, SkillIndex};
use crate::registry::{verify_body, SkillRegistry};

pub struct HttpRegistry {
    client: Client,
    base_url: String,
}

impl HttpRegistry {
    pub fn new(base_url: &str, timeout_ms: u64) -> RouterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!("skill-router/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RouterError::internal(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_text(&self, path: &str) -> RouterResult<String> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RouterError::network(format!("{url}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RouterError::not_found(url));
        }
        if !response.status().is_success() {
            return Err(RouterError::network(format!(
                "{url}: HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| RouterError::network(format!("{url}: {e}")))
    }
}

#[async_trait]
impl SkillRegistry for HttpRegistry {
    async fn fetch_index(&self) -> RouterResult<SkillIndex> {
        let text = self.fetch_text("index.json").await?;
        parse_index(&text)
    }

    async fn fetch_body(&self, skill: &SkillDescriptor) -> RouterResult<String> {
        let body = self.fetch_text(&skill.body_path).await?;
        verify_body(skill, body)
    }
}
