// mastodon-mcp - Mastodon tools for AI agents over the Model Context Protocol
// Copyright (C) 2025 mastodon-mcp Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Mastodon API client implementation

use reqwest::multipart::{Form, Part};
use reqwest::{header, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::log_api_call;
use crate::models::{
    CreateStatusParams, MediaAttachment, SearchParams, SearchResults, Status, StatusOrScheduled,
    TimelineParams, TrendingTag,
};

/// User agent sent with every request
const USER_AGENT: &str = concat!("mastodon-mcp/", env!("CARGO_PKG_VERSION"));

/// Extension to MIME type table for media uploads
const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
];

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Body of an API request
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Carries its own boundary-bearing content type
    Multipart(Form),
}

/// Mastodon API client
///
/// Holds the instance URL and access token for its whole lifetime; every call is
/// a single authenticated round trip with no retries.
pub struct MastodonClient {
    http: reqwest::Client,
    instance_url: String,
    access_token: String,
}

impl MastodonClient {
    /// Create a client from an existing access token
    pub fn new(instance_url: &str, access_token: &str) -> ApiResult<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            instance_url: normalize_url(instance_url),
            access_token: access_token.to_string(),
        })
    }

    /// Send one authenticated request and decode the JSON response.
    ///
    /// The body is always read as text first so that error bodies are logged
    /// and reported even when they are not JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.instance_url, endpoint);
        debug!("{} {}", method, url);

        let request = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(&self.access_token);

        let request = match body {
            RequestBody::Empty => request.header(header::CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(&value)?),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        log_api_call!(method.as_str(), endpoint, status.as_u16(), &text);

        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.request(Method::GET, endpoint, RequestBody::Empty).await
    }

    /// Upload a media file
    pub async fn upload_media(
        &self,
        file: Vec<u8>,
        filename: &str,
        description: Option<&str>,
    ) -> ApiResult<MediaAttachment> {
        let mime_type = mime_type_for(filename);
        debug!("Uploading {} ({} bytes, {})", filename, file.len(), mime_type);

        let part = Part::bytes(file)
            .file_name(filename.to_string())
            .mime_str(mime_type)?;

        let mut form = Form::new().part("file", part);
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            form = form.text("description", description.to_string());
        }

        let attachment: MediaAttachment = self
            .request(Method::POST, "/api/v1/media", RequestBody::Multipart(form))
            .await?;

        info!("Media uploaded: {}", attachment.id);
        Ok(attachment)
    }

    /// Create a new post, or schedule one when `scheduled_at` is set
    pub async fn create_status(&self, params: &CreateStatusParams) -> ApiResult<StatusOrScheduled> {
        let payload = CreateStatusParams {
            scheduled_at: params.scheduled_at.clone().filter(|s| !s.is_empty()),
            ..params.clone()
        };

        info!(
            "Creating status (media: {}, scheduled: {})",
            payload.media_ids.as_ref().map_or(0, Vec::len),
            payload.scheduled_at.is_some()
        );

        let body = serde_json::to_value(&payload)?;
        self.request(Method::POST, "/api/v1/statuses", RequestBody::Json(body))
            .await
    }

    /// Get the home timeline
    pub async fn home_timeline(&self, params: &TimelineParams) -> ApiResult<Vec<Status>> {
        let query = build_query(&params.query_pairs());
        self.get(&format!("/api/v1/timelines/home{}", query)).await
    }

    /// Get the federated timeline
    pub async fn public_timeline(&self, params: &TimelineParams) -> ApiResult<Vec<Status>> {
        let query = build_query(&params.query_pairs());
        self.get(&format!("/api/v1/timelines/public{}", query)).await
    }

    /// Get the local timeline; `local=true` is always sent
    pub async fn local_timeline(&self, params: &TimelineParams) -> ApiResult<Vec<Status>> {
        let params = TimelineParams {
            local: Some(true),
            ..params.clone()
        };
        let query = build_query(&params.query_pairs());
        self.get(&format!("/api/v1/timelines/public{}", query)).await
    }

    /// Get trending hashtags
    pub async fn trending_tags(&self, limit: Option<u32>) -> ApiResult<Vec<TrendingTag>> {
        let limit = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let query = build_query(&[("limit", limit)]);
        self.get(&format!("/api/v1/trends/tags{}", query)).await
    }

    /// Search accounts, hashtags and statuses
    pub async fn search(&self, params: &SearchParams) -> ApiResult<SearchResults> {
        let query = build_query(&params.query_pairs());
        self.get(&format!("/api/v2/search{}", query)).await
    }
}

/// Turn a non-2xx response into an [`ApiError`].
///
/// A JSON `error` field is used verbatim; other JSON is re-serialized; anything
/// else is embedded raw.
fn error_from_response(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("error").and_then(Value::as_str) {
            Some(error) if !error.is_empty() => error.to_string(),
            _ => json.to_string(),
        },
        Err(_) => format!("Request failed with status {}: {}", status, body),
    };

    ApiError::Api { status, message }
}

/// Build a query string from ordered pairs, skipping absent values.
///
/// Returns an empty string (no `?`) when nothing is left.
pub fn build_query(pairs: &[(&str, Option<String>)]) -> String {
    let query = pairs
        .iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|value| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query)
    }
}

/// MIME type for an upload, from the text after the last `.` in the file name
pub fn mime_type_for(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or_default().to_lowercase();

    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Normalize an instance URL
fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    // Remove trailing slash
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::{
        matchers::{body_json, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const TOKEN: &str = "test-token";

    fn client(server: &MockServer) -> MastodonClient {
        MastodonClient::new(&server.uri(), TOKEN).unwrap()
    }

    fn status_json(id: &str) -> Value {
        json!({
            "id": id,
            "url": format!("https://social.example/@alice/{}", id),
            "created_at": "2025-03-01T12:00:00.000Z",
            "content": "<p>hello</p>",
            "account": { "id": "1", "username": "alice", "acct": "alice" },
            "media_attachments": []
        })
    }

    #[test]
    fn test_build_query_drops_absent_values_and_keeps_order() {
        let query = build_query(&[
            ("limit", Some("20".to_string())),
            ("max_id", None),
            ("since_id", Some("5".to_string())),
        ]);

        assert_eq!(query, "?limit=20&since_id=5");
    }

    #[test]
    fn test_build_query_empty_has_no_question_mark() {
        assert_eq!(build_query(&[("limit", None), ("max_id", None)]), "");
        assert_eq!(build_query(&[]), "");
    }

    #[test]
    fn test_build_query_encodes_values() {
        let query = build_query(&[("q", Some("#rust & friends".to_string()))]);
        assert_eq!(query, "?q=%23rust%20%26%20friends");
    }

    #[test]
    fn test_mime_type_inference() {
        assert_eq!(mime_type_for("photo.PNG"), "image/png");
        assert_eq!(mime_type_for("holiday.jpeg"), "image/jpeg");
        assert_eq!(mime_type_for("clip.final.MOV"), "video/quicktime");
        assert_eq!(mime_type_for("archive.zip"), "application/octet-stream");
        assert_eq!(mime_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://floss.social/"), "https://floss.social");
        assert_eq!(normalize_url(" mastodon.social "), "https://mastodon.social");
        assert_eq!(normalize_url("http://localhost:3000"), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_request_sends_bearer_token_and_parses_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/timelines/home"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([status_json("1")])))
            .expect(1)
            .mount(&server)
            .await;

        let posts = assert_ok!(client(&server).home_timeline(&TimelineParams::default()).await);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].account.acct, "alice");
    }

    #[tokio::test]
    async fn test_error_field_becomes_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/statuses"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({ "error": "Validation failed: Text can't be blank" })),
            )
            .mount(&server)
            .await;

        let params = CreateStatusParams::default();
        let err = assert_err!(client(&server).create_status(&params).await);

        assert_eq!(err.to_string(), "Validation failed: Text can't be blank");
        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn test_json_error_without_error_field_is_reserialized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/trends/tags"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "detail": "down" })))
            .mount(&server)
            .await;

        let err = assert_err!(client(&server).trending_tags(Some(5)).await);
        assert_eq!(err.to_string(), r#"{"detail":"down"}"#);
    }

    #[tokio::test]
    async fn test_non_json_error_embeds_raw_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/search"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = assert_err!(client(&server).search(&SearchParams::new("rust")).await);
        let message = err.to_string();

        assert!(message.contains("<html>Bad Gateway</html>"));
        assert!(message.contains("502"));
    }

    #[tokio::test]
    async fn test_invalid_json_on_success_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/trends/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = assert_err!(client(&server).trending_tags(None).await);
        assert!(matches!(err, ApiError::Json(_)));
    }

    #[tokio::test]
    async fn test_local_timeline_forces_local_flag() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/timelines/public"))
            .and(query_param("local", "true"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let params = TimelineParams {
            limit: Some(5),
            local: Some(false),
            ..Default::default()
        };

        let posts = assert_ok!(client(&server).local_timeline(&params).await);
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_public_timeline_sends_only_present_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/timelines/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let params = TimelineParams {
            limit: Some(20),
            since_id: Some("5".to_string()),
            ..Default::default()
        };
        assert_ok!(client(&server).public_timeline(&params).await);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("limit=20&since_id=5"));
    }

    #[tokio::test]
    async fn test_trending_tags_without_limit_has_no_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/trends/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "rust", "url": "https://social.example/tags/rust", "history": [] }
            ])))
            .mount(&server)
            .await;

        let tags = assert_ok!(client(&server).trending_tags(None).await);
        assert_eq!(tags[0].name, "rust");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_create_status_omits_empty_schedule() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/statuses"))
            .and(body_json(json!({ "status": "hello", "visibility": "public" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_json("42")))
            .expect(1)
            .mount(&server)
            .await;

        let params = CreateStatusParams {
            status: "hello".to_string(),
            visibility: Some(crate::models::Visibility::Public),
            scheduled_at: Some(String::new()),
            ..Default::default()
        };

        let result = assert_ok!(client(&server).create_status(&params).await);
        assert!(matches!(result, StatusOrScheduled::Published(_)));
    }

    #[tokio::test]
    async fn test_upload_media_sends_multipart_with_inferred_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/media"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "555",
                "type": "image",
                "url": "https://files.example/555.png",
                "description": "a tiny square"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let attachment = assert_ok!(
            client(&server)
                .upload_media(vec![0x89, 0x50, 0x4e, 0x47], "photo.PNG", Some("a tiny square"))
                .await
        );
        assert_eq!(attachment.id, "555");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains(r#"name="file"; filename="photo.PNG""#));
        assert!(body.contains("image/png"));
        assert!(body.contains(r#"name="description""#));
        assert!(body.contains("a tiny square"));
    }

    /// Log sink shared between the subscriber and the assertions
    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[tokio::test]
    async fn test_every_round_trip_is_logged() {
        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/trends/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/search"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Record not found" })),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        assert_ok!(client.trending_tags(None).await);
        assert_err!(client.search(&SearchParams::new("nobody")).await);

        let output = logs.contents();
        assert_eq!(output.matches("API call completed").count(), 2);
        assert!(output.contains("status=200"));
        assert!(output.contains("status=404"));
        assert!(output.contains("Record not found"));
    }
}
