//! Blocking client for the Robopost social-media scheduling API.
//!
//! # Overview
//! Two operations: upload a media file (`POST /medias/upload`) and create
//! scheduled posts (`POST /scheduled_posts/`). Each call is one HTTP request
//! whose response is validated into typed structures. Nothing is retried,
//! cached or persisted.
//!
//! # Design
//! - `RobopostClient` splits every operation into `build_*` (produces an
//!   `HttpRequest`) and `parse_*` (consumes an `HttpResponse`); a `Transport`
//!   runs the round-trip in between. `ReqwestTransport` is the default.
//! - The API key is sent as the `apikey` query parameter on every request.
//! - Enum fields only accept their declared string literals.
//! - Result types stay open where the server's schema has drifted between
//!   revisions (see `types`).
//! - The library logs through `tracing` and installs no subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod timestamp;
pub mod transport;
pub mod types;

pub use client::RobopostClient;
pub use config::{ChannelPolicy, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError, ParseLiteralError, TransportError};
pub use http::{FilePart, HttpBody, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AiImageModel, AiRecurOptions, FacebookPostType, FacebookSettings, GmbCtaButtonActionType,
    GmbPostTopicType, GmbSettings, InstagramPostType, InstagramSettings, MediaRecord, MediaRef,
    PinterestSettings, PlatformBlock, PlatformSettings, RecurInterval, RecurrenceRule,
    ScheduledPostRequest, ScheduledPostResult, SettingsBlock, TikTokPrivacyLevel, TikTokSettings,
    VoiceTone, WordpressPostType, WordpressSettings, YoutubePrivacyStatus, YoutubeSettings,
    YoutubeVideoType,
};
