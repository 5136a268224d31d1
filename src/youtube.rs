use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Page size for search.list and batch size for videos.list (the API maximum).
pub const MAX_RESULTS: usize = 50;

/// Optional publish-date bounds, passed through to the API unvalidated.
#[derive(Debug, Clone, Default)]
pub struct DateWindow {
    pub published_after: Option<String>,
    pub published_before: Option<String>,
}

/// One page of search results, decoded at the network boundary.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// Per-video statistics as returned by the details endpoint.
///
/// The view count stays a string here; the API serves it as one, and parsing
/// happens in [`fetch_video_records`] so a bad value aborts the run.
#[derive(Debug, Clone)]
pub struct VideoStats {
    pub id: String,
    pub title: String,
    pub view_count: String,
}

/// Final per-video record emitted to CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub views: u64,
    pub title: String,
    pub url: String,
}

/// The two YouTube Data API calls this tool makes. Seam for tests.
pub(crate) trait VideoApi {
    async fn search_page(
        &self,
        channel_id: &str,
        window: &DateWindow,
        page_token: Option<&str>,
    ) -> Result<SearchPage>;

    async fn video_stats(&self, ids: &[String]) -> Result<Vec<VideoStats>>;
}

// Wire types for the two list responses.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: SearchResultId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Snippet,
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: String,
}

/// YouTube Data API v3 client authenticated with an API key.
pub struct YouTube {
    client: Client,
    api_key: String,
}

impl YouTube {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", API_BASE_URL, path))
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

impl VideoApi for YouTube {
    async fn search_page(
        &self,
        channel_id: &str,
        window: &DateWindow,
        page_token: Option<&str>,
    ) -> Result<SearchPage> {
        let max_results = MAX_RESULTS.to_string();
        let mut query = vec![
            ("part", "id"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(after) = window.published_after.as_deref() {
            query.push(("publishedAfter", after));
        }
        if let Some(before) = window.published_before.as_deref() {
            query.push(("publishedBefore", before));
        }
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response: SearchListResponse = self.get_json("search", &query).await?;

        Ok(SearchPage {
            video_ids: response
                .items
                .into_iter()
                .map(|item| item.id.video_id)
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    async fn video_stats(&self, ids: &[String]) -> Result<Vec<VideoStats>> {
        let joined = ids.join(",");
        let query = [("part", "snippet,statistics"), ("id", joined.as_str())];

        let response: VideoListResponse = self.get_json("videos", &query).await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| VideoStats {
                id: item.id,
                title: item.snippet.title,
                view_count: item.statistics.view_count,
            })
            .collect())
    }
}

/// Collect every video id for a channel, following the pagination cursor
/// until the API stops returning one.
pub(crate) async fn collect_video_ids(
    api: &impl VideoApi,
    channel_id: &str,
    window: &DateWindow,
) -> Result<Vec<String>> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = api.search_page(channel_id, window, page_token.as_deref()).await?;
        video_ids.extend(page.video_ids);

        // A missing or empty token means the last page.
        match page.next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(video_ids)
}

/// Fetch statistics for the given ids in batches of at most [`MAX_RESULTS`],
/// then sort by view count descending. Ids the API no longer recognizes are
/// absent from its response and end up dropped without a diagnostic.
pub(crate) async fn fetch_video_records(
    api: &impl VideoApi,
    video_ids: &[String],
) -> Result<Vec<VideoRecord>> {
    let mut records = Vec::new();

    for batch in video_ids.chunks(MAX_RESULTS) {
        for video in api.video_stats(batch).await? {
            let views = video.view_count.parse::<u64>().map_err(|_| {
                Error::InvalidViewCount {
                    video_id: video.id.clone(),
                    value: video.view_count.clone(),
                }
            })?;

            records.push(VideoRecord {
                views,
                title: video.title,
                url: format!("{}{}", WATCH_URL, video.id),
            });
        }
    }

    // Stable sort, so equal view counts keep the API's order.
    records.sort_by(|a, b| b.views.cmp(&a.views));

    Ok(records)
}
