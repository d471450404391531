use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const DEFAULT_API_KEY: &str = "test-key";

/// Largest request body the router accepts. Bigger uploads get 413.
pub const UPLOAD_LIMIT: usize = 512 * 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaRead {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub storage_object_id: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub apikey: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    router(api_key, UPLOAD_LIMIT)
}

pub fn router(api_key: &str, body_limit: usize) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/medias/upload", post(upload_media))
        .route("/scheduled_posts/", post(create_scheduled_posts))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

fn error(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn authorize(state: &AppState, query: &AuthQuery) -> Result<(), Response> {
    match query.apikey.as_deref() {
        Some(key) if key == &*state.api_key => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid API key")),
    }
}

async fn upload_media(
    State(state): State<AppState>,
    Query(query): Query<AuthQuery>,
    mut multipart: Multipart,
) -> Result<Json<MediaRead>, Response> {
    authorize(&state, &query)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error(e.status(), &e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| error(e.status(), &e.body_text()))?;
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        let media = MediaRead {
            id: Uuid::new_v4().to_string(),
            name,
            extension,
            storage_object_id: Uuid::new_v4().to_string(),
        };
        tracing::info!(id = %media.id, size = bytes.len(), "stored media");
        return Ok(Json(media));
    }

    Err(error(StatusCode::UNPROCESSABLE_ENTITY, "field `file` is required"))
}

/// Fans the payload out into one post per channel id.
async fn create_scheduled_posts(
    State(state): State<AppState>,
    Query(query): Query<AuthQuery>,
    Json(payload): Json<Value>,
) -> Result<Json<Vec<Value>>, Response> {
    authorize(&state, &query)?;

    let Value::Object(body) = payload else {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "body must be an object"));
    };
    let channels: Vec<String> = body
        .get("channel_ids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    if channels.is_empty() {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "channel_ids must contain at least one channel",
        ));
    }

    let posts: Vec<Value> = channels
        .into_iter()
        .map(|channel| {
            let mut post = body.clone();
            post.remove("_id");
            post.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
            post.insert("channel_ids".to_string(), json!([channel]));
            if post.get("schedule_at").map_or(true, Value::is_null) {
                let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
                post.insert("schedule_at".to_string(), json!(now));
            }
            Value::Object(post)
        })
        .collect();
    tracing::info!(count = posts.len(), "scheduled posts");

    Ok(Json(posts))
}
