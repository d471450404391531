//! Blocking client for the Robopost public API.
//!
//! # Design
//! `RobopostClient` holds a validated config and a `Transport`, and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; `upload_media` and `create_scheduled_posts` run the
//! transport in between. The build and parse halves are deterministic and
//! can be driven by any HTTP stack.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ChannelPolicy, ClientConfig};
use crate::error::{ApiError, TransportError};
use crate::http::{FilePart, HttpBody, HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{MediaRecord, ScheduledPostRequest, ScheduledPostResult};

const API_KEY_PARAM: &str = "apikey";
const UPLOAD_FIELD: &str = "file";

/// Synchronous client for the Robopost API.
#[derive(Debug, Clone)]
pub struct RobopostClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl RobopostClient<ReqwestTransport> {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RobopostClient<T> {
    pub fn with_transport(mut config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        config.validate()?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload a local image or video file.
    pub fn upload_media(&self, file_path: impl AsRef<Path>) -> Result<MediaRecord, ApiError> {
        let req = self.build_upload_media(file_path.as_ref())?;
        let media = self.parse_upload_media(self.transport.execute(req)?)?;
        info!(media_id = %media.id, name = %media.name, "uploaded media");
        Ok(media)
    }

    /// Create scheduled posts or drafts. The server may return several
    /// results for one request, e.g. one per targeted channel.
    pub fn create_scheduled_posts(
        &self,
        request: &ScheduledPostRequest,
    ) -> Result<Vec<ScheduledPostResult>, ApiError> {
        let req = self.build_create_scheduled_posts(request)?;
        let posts = self.parse_create_scheduled_posts(self.transport.execute(req)?)?;
        info!(count = posts.len(), "created scheduled posts");
        Ok(posts)
    }

    /// Read `file_path` into a multipart request. Fails before any network
    /// activity if the file cannot be read.
    pub fn build_upload_media(&self, file_path: &Path) -> Result<HttpRequest, ApiError> {
        let bytes = std::fs::read(file_path).map_err(|source| ApiError::FileAccess {
            path: file_path.to_path_buf(),
            source,
        })?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UPLOAD_FIELD.to_string());

        let url = format!("{}/medias/upload", self.config.base_url);
        debug!(%url, %file_name, size = bytes.len(), "building media upload");

        Ok(HttpRequest {
            url,
            query: self.auth_query(),
            headers: Vec::new(),
            body: HttpBody::Multipart(FilePart {
                field_name: UPLOAD_FIELD.to_string(),
                file_name,
                bytes,
            }),
        })
    }

    pub fn parse_upload_media(&self, response: HttpResponse) -> Result<MediaRecord, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| validation(format!("media record: {e}")))
    }

    pub fn build_create_scheduled_posts(
        &self,
        request: &ScheduledPostRequest,
    ) -> Result<HttpRequest, ApiError> {
        request.validate(self.config.channel_policy)?;
        let body =
            serde_json::to_string(request).map_err(|e| ApiError::Serialization(e.to_string()))?;

        let url = format!("{}/scheduled_posts/", self.config.base_url);
        debug!(
            %url,
            channels = request.channel_ids.len(),
            is_recur = request.is_recur,
            size = body.len(),
            "building scheduled post request"
        );

        Ok(HttpRequest {
            url,
            query: self.auth_query(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: HttpBody::Json(body),
        })
    }

    /// Parse the JSON array response, one result per element.
    pub fn parse_create_scheduled_posts(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ScheduledPostResult>, ApiError> {
        check_status(&response)?;
        let items: Vec<Value> = serde_json::from_str(&response.body)
            .map_err(|e| validation(format!("expected a JSON array of posts: {e}")))?;

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let post: ScheduledPostResult = serde_json::from_value(item)
                    .map_err(|e| validation(format!("post[{index}]: {e}")))?;
                if self.config.channel_policy == ChannelPolicy::RequireAtLeastOne
                    && post.channel_ids.is_empty()
                {
                    return Err(validation(format!("post[{index}]: channel_ids is empty")));
                }
                Ok(post)
            })
            .collect()
    }

    fn auth_query(&self) -> Vec<(String, String)> {
        vec![(API_KEY_PARAM.to_string(), self.config.api_key.clone())]
    }
}

/// Map non-2xx status codes to a transport error carrying status and body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "Robopost API rejected request");
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    }
    .into())
}

fn validation(msg: String) -> ApiError {
    warn!(%msg, "response failed validation");
    ApiError::Validation(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::io::Write;

    use chrono::{TimeZone, Utc};

    /// Replays canned responses and counts calls.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<VecDeque<HttpResponse>>,
        calls: Cell<usize>,
    }

    impl ScriptedTransport {
        fn replying(status: u16, body: &str) -> Self {
            let transport = Self::default();
            transport.responses.borrow_mut().push_back(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            });
            transport
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| TransportError::Network("no scripted response".to_string()).into())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("test-key").with_base_url("http://localhost:3000")
    }

    fn client() -> RobopostClient<ScriptedTransport> {
        RobopostClient::with_transport(config(), ScriptedTransport::default()).unwrap()
    }

    fn client_replying(status: u16, body: &str) -> RobopostClient<ScriptedTransport> {
        RobopostClient::with_transport(config(), ScriptedTransport::replying(status, body)).unwrap()
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn hello_request() -> ScheduledPostRequest {
        ScheduledPostRequest::new("hello", ["c1"])
            .scheduled_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    const HELLO_RESULT: &str = r#"[{"id":"p1","text":"hello","channel_ids":["c1"],"schedule_at":"2025-01-01T00:00:00Z","is_recur":false}]"#;

    #[test]
    fn build_upload_media_produces_multipart_request() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"\xFF\xD8\xFFjpeg").unwrap();

        let req = client().build_upload_media(file.path()).unwrap();
        assert_eq!(req.url, "http://localhost:3000/medias/upload");
        assert_eq!(req.query_param("apikey"), Some("test-key"));
        let HttpBody::Multipart(part) = &req.body else {
            panic!("expected multipart body, got {:?}", req.body);
        };
        assert_eq!(part.field_name, "file");
        assert!(part.file_name.ends_with(".jpg"));
        assert_eq!(part.bytes, b"\xFF\xD8\xFFjpeg");
    }

    #[test]
    fn api_key_never_appears_in_url() {
        let req = client().build_create_scheduled_posts(&hello_request()).unwrap();
        assert!(!req.url.contains("test-key"));
        assert_eq!(req.query_param("apikey"), Some("test-key"));
    }

    #[test]
    fn upload_of_missing_file_fails_before_network() {
        let client = client_replying(200, "{}");
        let err = client.upload_media("/no/such/dir/sample1.jpg").unwrap_err();
        assert!(matches!(err, ApiError::FileAccess { .. }));
        assert_eq!(client.transport().calls.get(), 0);
    }

    #[test]
    fn parse_upload_media_success() {
        let media = client()
            .parse_upload_media(ok(
                r#"{"id":"m1","name":"sample1.jpg","extension":"jpg","storage_object_id":"so-1"}"#,
            ))
            .unwrap();
        assert_eq!(media.id, "m1");
        assert_eq!(media.storage_object_id, "so-1");
    }

    #[test]
    fn parse_upload_media_missing_id_is_validation_error() {
        let err = client()
            .parse_upload_media(ok(r#"{"name":"a.jpg","extension":"jpg","storage_object_id":"s"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.contains("id")));
    }

    #[test]
    fn parse_upload_media_wrong_status() {
        let response = HttpResponse {
            status: 413,
            headers: Vec::new(),
            body: "file too large".to_string(),
        };
        let err = client().parse_upload_media(response).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Status { status: 413, ref body }) if body == "file too large"
        ));
    }

    #[test]
    fn build_create_scheduled_posts_produces_json_request() {
        let req = client().build_create_scheduled_posts(&hello_request()).unwrap();
        assert_eq!(req.url, "http://localhost:3000/scheduled_posts/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_json().unwrap()).unwrap();
        assert_eq!(body["text"], "hello");
        assert_eq!(body["channel_ids"], serde_json::json!(["c1"]));
        assert_eq!(body["schedule_at"], "2025-01-01T00:00:00Z");
        assert_eq!(body["is_recur"], false);
        assert_eq!(body["youtube_settings"]["videoPrivacyStatus"], "public");
    }

    #[test]
    fn empty_channels_rejected_before_network() {
        let client = client_replying(200, "[]");
        let req = ScheduledPostRequest::new("nobody", Vec::<String>::new());
        let err = client.create_scheduled_posts(&req).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        assert_eq!(client.transport().calls.get(), 0);
    }

    #[test]
    fn empty_channels_allowed_when_configured() {
        let client = RobopostClient::with_transport(
            config().with_channel_policy(ChannelPolicy::AllowEmpty),
            ScriptedTransport::replying(
                200,
                r#"[{"id":"p1","channel_ids":[],"schedule_at":"2025-01-01T00:00:00Z"}]"#,
            ),
        )
        .unwrap();
        let posts = client
            .create_scheduled_posts(&ScheduledPostRequest::new("x", Vec::<String>::new()))
            .unwrap();
        assert!(posts[0].channel_ids.is_empty());
    }

    #[test]
    fn create_scheduled_posts_returns_one_result() {
        let client = client_replying(200, HELLO_RESULT);
        let posts = client.create_scheduled_posts(&hello_request()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "hello");
        assert_eq!(posts[0].channel_ids, vec!["c1"]);
        assert_eq!(client.transport().calls.get(), 1);
    }

    #[test]
    fn parse_create_scheduled_posts_keeps_order() {
        let posts = client()
            .parse_create_scheduled_posts(ok(r#"[
                {"id":"p1","channel_ids":["c1"],"schedule_at":"2025-01-01T00:00:00Z"},
                {"id":"p2","channel_ids":["c1"],"schedule_at":"2025-01-02T00:00:00Z"}
            ]"#))
            .unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn parse_create_scheduled_posts_names_bad_element() {
        let err = client()
            .parse_create_scheduled_posts(ok(r#"[
                {"id":"p1","channel_ids":["c1"],"schedule_at":"2025-01-01T00:00:00Z"},
                {"channel_ids":["c1"],"schedule_at":"2025-01-01T00:00:00Z"}
            ]"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.starts_with("post[1]")));
    }

    #[test]
    fn parse_create_scheduled_posts_rejects_empty_channels_under_strict_policy() {
        let err = client()
            .parse_create_scheduled_posts(ok(
                r#"[{"id":"p1","channel_ids":[],"schedule_at":"2025-01-01T00:00:00Z"}]"#,
            ))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn parse_create_scheduled_posts_rejects_object_body() {
        let err = client()
            .parse_create_scheduled_posts(ok(r#"{"id":"p1"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn parse_create_scheduled_posts_bad_json() {
        let err = client().parse_create_scheduled_posts(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn parse_create_scheduled_posts_rejects_unknown_literal() {
        let err = client()
            .parse_create_scheduled_posts(ok(
                r#"[{"id":"p1","channel_ids":["c1"],"schedule_at":"2025-01-01T00:00:00Z","recur_interval":"FORTNIGHTLY"}]"#,
            ))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.contains("FORTNIGHTLY")));
    }

    #[test]
    fn create_scheduled_posts_surfaces_status_and_body() {
        let client = client_replying(422, r#"{"detail":"channel not found"}"#);
        let err = client.create_scheduled_posts(&hello_request()).unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert!(err.to_string().contains("channel not found"));
    }

    #[test]
    fn network_failure_propagates() {
        let client = client();
        let err = client.create_scheduled_posts(&hello_request()).unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Network(_))));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RobopostClient::with_transport(
            ClientConfig::new("k").with_base_url("http://localhost:3000/v1/"),
            ScriptedTransport::default(),
        )
        .unwrap();
        let req = client.build_create_scheduled_posts(&hello_request()).unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/scheduled_posts/");
    }

    #[test]
    fn blank_api_key_is_rejected_at_construction() {
        let result = RobopostClient::with_transport(ClientConfig::new(""), ScriptedTransport::default());
        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
