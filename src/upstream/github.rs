//! GitHub REST API and contributions proxy over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use tracing::debug;

use super::{CommitDetail, Result, Upstream, UpstreamError};
use crate::config::Config;
use crate::model::{ActivityEvent, Contribution};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("wake/", env!("CARGO_PKG_VERSION"));

/// Talks to the GitHub REST API and the contributions proxy.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
    contributions_api: Url,
}

impl GitHubClient {
    /// Build a client from configuration.
    ///
    /// Every request made through it is bounded by `request-timeout-secs`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: parse_base(&config.api_base)?,
            contributions_api: parse_base(&config.contributions_api)?,
        })
    }

    async fn get(&self, url: Url) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await.map_err(send_error)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(status_error(response).await)
        }
    }
}

#[async_trait]
impl Upstream for GitHubClient {
    async fn public_events(&self, identity: &str, count: u32) -> Result<Vec<ActivityEvent>> {
        let mut url = endpoint(&self.api_base, &["users", identity, "events", "public"]);
        url.query_pairs_mut().append_pair("per_page", &count.to_string());
        let body = self.get(url).await?.text().await.map_err(send_error)?;
        parse_events(&body)
    }

    async fn commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitDetail> {
        let url = endpoint(&self.api_base, &["repos", owner, repo, "commits", sha]);
        let body = self.get(url).await?.text().await.map_err(send_error)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn contributions(&self, identity: &str) -> Result<Vec<Contribution>> {
        let mut url = endpoint(&self.contributions_api, &[identity]);
        url.query_pairs_mut().append_pair("y", "last");
        let body = self.get(url).await?.text().await.map_err(send_error)?;
        parse_contributions(&body)
    }
}

/// Parse the events feed body.
///
/// The body must be a JSON array. Each element is parsed permissively;
/// an element that is not even an object becomes an empty event rather
/// than being dropped, so positions in the feed are preserved.
fn parse_events(body: &str) -> Result<Vec<ActivityEvent>> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(raw
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

#[derive(serde::Deserialize)]
struct ContributionsBody {
    #[serde(default)]
    contributions: Vec<Contribution>,
}

fn parse_contributions(body: &str) -> Result<Vec<Contribution>> {
    let parsed: ContributionsBody = serde_json::from_str(body)?;
    Ok(parsed.contributions)
}

fn send_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Request(e)
    }
}

/// Turn a non-success response into an error carrying upstream's explanation.
///
/// GitHub puts it in `message`; the contributions proxy uses `error`.
async fn status_error(response: Response) -> UpstreamError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    UpstreamError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.is_empty());

    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    })
}

/// A base URL that path segments can be appended to.
fn parse_base(base: &str) -> Result<Url> {
    let url = Url::parse(base.trim()).map_err(|e| UpstreamError::BaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(UpstreamError::BaseUrl {
            url: base.to_string(),
            reason: "not a hierarchical URL".to_string(),
        });
    }
    Ok(url)
}

/// Append `segments` to `base`, percent-encoding each one, so a value like
/// `a?b` stays a single path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
