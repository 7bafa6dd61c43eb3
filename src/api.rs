// API client module: a small blocking HTTP client that posts paste
// content to Pastery. Authentication and metadata travel in the query
// string, the body is the raw content.

use crate::config::ApiKey;
use crate::error::UploadError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::form_urlencoded;

pub const DEFAULT_ENDPOINT: &str = "https://www.pastery.net/api/paste/";
pub const DEFAULT_DURATION_MINUTES: i64 = 60;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("Mozilla/5.0 (Rust) bakeit/", env!("CARGO_PKG_VERSION"));

// Longest slice of an error body quoted back to the user.
const MAX_ERROR_BODY: usize = 200;

/// Metadata attached to a paste. Built once from the command line and
/// passed by reference; nothing here is mutated during an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOptions {
    pub title: Option<String>,
    pub language: Option<String>,
    pub duration_minutes: i64,
    /// 0 means unlimited.
    pub max_views: i64,
}

impl Default for PasteOptions {
    fn default() -> Self {
        PasteOptions {
            title: None,
            language: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            max_views: 0,
        }
    }
}

/// Everything needed for one upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub content: Vec<u8>,
    pub options: PasteOptions,
    pub api_key: ApiKey,
}

/// The part of Pastery's reply we care about.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub url: String,
}

// Pastery reports failures as `{"result": "error", "error_msg": "..."}`.
#[derive(Deserialize)]
struct ErrorReply {
    error_msg: Option<String>,
}

impl UploadRequest {
    pub fn new(content: Vec<u8>, options: PasteOptions, api_key: ApiKey) -> Self {
        UploadRequest {
            content,
            options,
            api_key,
        }
    }

    /// Form-encoded query string, keys in sorted order. Empty values are
    /// still sent; the service decides what they mean.
    pub fn query_string(&self) -> String {
        self.encode_query(self.api_key.expose())
    }

    /// Same as `query_string` with the key masked, for logging.
    pub fn redacted_query_string(&self) -> String {
        self.encode_query("***")
    }

    fn encode_query(&self, api_key: &str) -> String {
        let opts = &self.options;
        form_urlencoded::Serializer::new(String::new())
            .append_pair("api_key", api_key)
            .append_pair("duration", &opts.duration_minutes.to_string())
            .append_pair("language", opts.language.as_deref().unwrap_or(""))
            .append_pair("max_views", &opts.max_views.to_string())
            .append_pair("title", opts.title.as_deref().unwrap_or(""))
            .finish()
    }
}

/// Blocking client bound to one paste endpoint.
#[derive(Clone)]
pub struct PasteryClient {
    client: Client,
    endpoint: String,
}

impl PasteryClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, UploadError> {
        let endpoint = endpoint.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| UploadError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        Ok(PasteryClient { client, endpoint })
    }

    /// POST the content and return the paste URL. Exactly one request is
    /// made; failures are returned as-is without retrying.
    pub fn upload(&self, req: &UploadRequest) -> Result<UploadResponse, UploadError> {
        // reqwest errors carry the request URL, and with it the api_key.
        let transport = |source: reqwest::Error| UploadError::Transport {
            endpoint: self.endpoint.clone(),
            source: source.without_url(),
        };

        debug!(
            url = %format!("{}?{}", self.endpoint, req.redacted_query_string()),
            bytes = req.content.len(),
            "sending paste"
        );

        let url = format!("{}?{}", self.endpoint, req.query_string());
        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .header(CONTENT_LENGTH, HeaderValue::from(req.content.len()))
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .body(req.content.clone())
            .send()
            .map_err(transport)?;

        let status = res.status();
        let body = res.bytes().map_err(transport)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received reply");

        if !status.is_success() {
            return Err(UploadError::ResponseFormat {
                reason: format!("HTTP {}: {}", status.as_u16(), error_message(&body)),
            });
        }

        parse_reply(&body)
    }
}

/// Parse a successful reply body. The `url` field must be present and non-empty.
pub fn parse_reply(body: &[u8]) -> Result<UploadResponse, UploadError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| UploadError::ResponseFormat {
            reason: format!("body is not JSON ({e}): {}", snippet(body)),
        })?;

    match serde_json::from_value::<UploadResponse>(value.clone()) {
        Ok(resp) if !resp.url.is_empty() => Ok(resp),
        Ok(_) => Err(UploadError::ResponseFormat {
            reason: "reply has an empty url".into(),
        }),
        Err(_) => {
            let reason = match value.get("error_msg").and_then(|m| m.as_str()) {
                Some(msg) => format!("reply has no url: {msg}"),
                None => "reply has no url".into(),
            };
            Err(UploadError::ResponseFormat { reason })
        }
    }
}

fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorReply>(body) {
        Ok(ErrorReply { error_msg: Some(msg) }) => msg,
        _ => snippet(body),
    }
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
