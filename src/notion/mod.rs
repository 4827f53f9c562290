//! The remote page store: an opaque paginated page-creation capability.
//!
//! Like the completion capability, the pipeline reaches the Notion API only
//! through a trait seam ([`PageStore`]), so the persistence orchestrator can
//! be exercised with an in-memory store. The payload builder is a free
//! function so the wire shape is testable without a network.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_API_VERSION: &str = "2022-06-28";

/// Per-call timeout; the Notion API has no streaming responses.
const API_TIMEOUT_SECS: u64 = 60;

/// A created page, as reported back to the user.
#[derive(Debug, Clone)]
pub struct CreatedPage {
    pub page_id: String,
    pub page_url: String,
}

/// Failures from the page store.
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Trait for page-store backends.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Create one page titled `title` whose content children are `blocks`,
    /// in order.
    async fn create_page(&self, title: &str, blocks: &[String]) -> Result<CreatedPage, NotionError>;
}

/// [`PageStore`] backed by the Notion REST API.
pub struct NotionClient {
    client: reqwest::Client,
    api_key: String,
    database_id: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(
        api_key: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Result<Self, NotionError> {
        Self::with_base_url(api_key, database_id, NOTION_API_BASE_URL)
    }

    /// Fails only if the HTTP client cannot be constructed; a constructed
    /// client always carries the per-call timeout.
    pub fn with_base_url(
        api_key: impl Into<String>,
        database_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, NotionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            database_id: database_id.into(),
            base_url: base_url.into(),
        })
    }
}

/// Build the `pages.create` request body.
///
/// Property names (`タイトル`, `作成日`) are the database schema this tool
/// writes into. Each content block becomes one paragraph child with a single
/// rich-text item; block order is the reading order.
pub fn build_page_request(
    database_id: &str,
    title: &str,
    blocks: &[String],
    created_at: &str,
) -> serde_json::Value {
    let children: Vec<serde_json::Value> = blocks
        .iter()
        .map(|block| {
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [
                        { "type": "text", "text": { "content": block } }
                    ]
                }
            })
        })
        .collect();

    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "タイトル": {
                "title": [
                    { "text": { "content": title } }
                ]
            },
            "作成日": {
                "date": { "start": created_at }
            }
        },
        "children": children,
    })
}

#[async_trait]
impl PageStore for NotionClient {
    async fn create_page(&self, title: &str, blocks: &[String]) -> Result<CreatedPage, NotionError> {
        let url = format!("{}/pages", self.base_url);
        let created_at = Utc::now().to_rfc3339();
        let body = build_page_request(&self.database_id, title, blocks, &created_at);

        debug!(blocks = blocks.len(), "creating page in database {}", self.database_id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", NOTION_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::Api { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        let page_id = resp["id"]
            .as_str()
            .ok_or_else(|| NotionError::Parse("missing page id".into()))?
            .to_string();
        let page_url = format!("https://notion.so/{}", page_id.replace('-', ""));

        info!("Notion page created: {page_id}");
        Ok(CreatedPage { page_id, page_url })
    }
}
