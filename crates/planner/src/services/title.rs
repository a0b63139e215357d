//! Song title lookup.
//!
//! Titles come from an oEmbed endpoint keyed by the video's watch URL. The
//! lookup only enriches a song: any failure falls back to
//! [`PLACEHOLDER_TITLE`]. Successful lookups are cached with `moka`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use revelion_core::VideoId;

/// Title used when the lookup fails or returns nothing.
pub const PLACEHOLDER_TITLE: &str = "YouTube song";

/// Default oEmbed endpoint.
pub const DEFAULT_OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// Errors that can occur when looking up a title.
#[derive(Debug, Error)]
pub enum TitleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status}")]
    Api { status: u16 },

    /// Response carried no usable title.
    #[error("no title in response")]
    MissingTitle,
}

/// Resolves a display title for a video.
pub trait TitleLookup {
    /// Fetch the title of `video_id`.
    fn fetch_title(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<String, TitleError>> + Send;
}

/// Look up a title, falling back to [`PLACEHOLDER_TITLE`] on any failure.
pub async fn title_or_placeholder<L: TitleLookup + Sync>(lookup: &L, video_id: &VideoId) -> String {
    match lookup.fetch_title(video_id).await {
        Ok(title) if !title.trim().is_empty() => title,
        Ok(_) => PLACEHOLDER_TITLE.to_owned(),
        Err(e) => {
            warn!(%video_id, error = %e, "Title lookup failed, using placeholder");
            PLACEHOLDER_TITLE.to_owned()
        }
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// oEmbed client with an in-process title cache.
#[derive(Clone)]
pub struct OEmbedClient {
    inner: Arc<OEmbedClientInner>,
}

struct OEmbedClientInner {
    client: reqwest::Client,
    endpoint: String,
    cache: Cache<VideoId, String>,
}

impl OEmbedClient {
    /// Create a client for `endpoint`, caching titles for `cache_ttl`.
    #[must_use]
    pub fn new(endpoint: &str, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Self {
            inner: Arc::new(OEmbedClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    fn request_url(&self, video_id: &VideoId) -> String {
        format!(
            "{}?url={}&format=json",
            self.inner.endpoint,
            urlencoding::encode(&video_id.watch_url())
        )
    }
}

impl TitleLookup for OEmbedClient {
    async fn fetch_title(&self, video_id: &VideoId) -> Result<String, TitleError> {
        if let Some(title) = self.inner.cache.get(video_id).await {
            debug!(%video_id, "Title cache hit");
            return Ok(title);
        }

        let response = self
            .inner
            .client
            .get(self.request_url(video_id))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TitleError::Api {
                status: status.as_u16(),
            });
        }

        let body: OEmbedResponse = response.json().await?;
        let title = body
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or(TitleError::MissingTitle)?;

        self.inner.cache.insert(video_id.clone(), title.clone()).await;
        Ok(title)
    }
}
