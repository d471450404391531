//! Scheduled post payloads.
//!
//! # Design
//! `ScheduledPostRequest` is strict: every field is typed and serializes with
//! its declared default, so the server sees the full canonical payload.
//! `ScheduledPostResult` is strict only for fields that have stayed stable
//! across server revisions (id, text, channels, flags, timestamps, recurrence).
//! Settings blocks and media references have changed shape between
//! revisions, so results keep them as open JSON and decode them on demand.
//! Unrecognized result fields are kept in `extra` rather than dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::enums::{AiImageModel, RecurInterval, VoiceTone};
use super::media::MediaRef;
use super::settings::{
    FacebookSettings, GmbSettings, InstagramSettings, PinterestSettings, PlatformBlock,
    PlatformSettings, TikTokSettings, WordpressSettings, YoutubeSettings,
};
use crate::config::ChannelPolicy;
use crate::error::ApiError;
use crate::timestamp::{self, null_as_default};

/// When and how a recurring post repeats.
///
/// Only consulted by the server when the owning post has `is_recur` set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(rename = "recur_interval", default, deserialize_with = "null_as_default")]
    pub interval: RecurInterval,
    #[serde(rename = "recur_until_dt", default, with = "timestamp::option")]
    pub until: Option<DateTime<Utc>>,
    #[serde(rename = "recur_until_dt_enabled", default)]
    pub until_enabled: bool,
    /// Used by the `*_SPECIFIC_TIME_SLOTS` intervals.
    #[serde(rename = "recur_interval_time_slots", default, deserialize_with = "null_as_default")]
    pub time_slots: Vec<String>,
}

impl RecurrenceRule {
    pub fn new(interval: RecurInterval) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Stop recurring after `until`.
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self.until_enabled = true;
        self
    }

    pub fn with_time_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_slots = slots.into_iter().map(Into::into).collect();
        self
    }
}

/// AI regeneration applied each time a recurring post fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRecurOptions {
    #[serde(rename = "recur_generate_new_ai_image", default)]
    pub generate_new_image: bool,
    #[serde(
        rename = "recur_generate_new_ai_image_model",
        default,
        deserialize_with = "null_as_default"
    )]
    pub image_model: AiImageModel,
    #[serde(rename = "recur_rephrase_text_with_ai", default)]
    pub rephrase_text: bool,
    #[serde(
        rename = "recur_rephrase_text_with_ai_tone",
        default,
        deserialize_with = "null_as_default"
    )]
    pub rephrase_tone: VoiceTone,
}

/// Body of `POST /scheduled_posts/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPostRequest {
    /// Client-side id, sent as `_id`.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub channel_ids: Vec<String>,
    #[serde(default)]
    pub image_object_ids: Vec<String>,
    #[serde(default)]
    pub video_object_id: Option<String>,
    #[serde(default)]
    pub gif_object_id: Option<String>,
    /// Remote images the server downloads and stores itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[serde(default)]
    pub facebook_settings: FacebookSettings,
    #[serde(default)]
    pub instagram_settings: InstagramSettings,
    #[serde(default)]
    pub pinterest_settings: PinterestSettings,
    #[serde(default)]
    pub wordpress_settings: WordpressSettings,
    #[serde(default)]
    pub youtube_settings: YoutubeSettings,
    #[serde(default)]
    pub tiktok_settings: TikTokSettings,
    #[serde(default)]
    pub gmb_settings: GmbSettings,

    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub post_collection_id: Option<String>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub schedule_at: DateTime<Utc>,
    #[serde(default)]
    pub is_recur: bool,
    #[serde(flatten)]
    pub recurrence: RecurrenceRule,
    #[serde(flatten)]
    pub ai: AiRecurOptions,
}

impl Default for ScheduledPostRequest {
    fn default() -> Self {
        Self {
            client_id: None,
            text: String::new(),
            channel_ids: Vec::new(),
            image_object_ids: Vec::new(),
            video_object_id: None,
            gif_object_id: None,
            image_urls: Vec::new(),
            video_url: None,
            facebook_settings: FacebookSettings::default(),
            instagram_settings: InstagramSettings::default(),
            pinterest_settings: PinterestSettings::default(),
            wordpress_settings: WordpressSettings::default(),
            youtube_settings: YoutubeSettings::default(),
            tiktok_settings: TikTokSettings::default(),
            gmb_settings: GmbSettings::default(),
            is_draft: false,
            post_collection_id: None,
            schedule_at: Utc::now(),
            is_recur: false,
            recurrence: RecurrenceRule::default(),
            ai: AiRecurOptions::default(),
        }
    }
}

impl ScheduledPostRequest {
    /// A post scheduled for now, with a fresh client-side id.
    pub fn new<I, S>(text: impl Into<String>, channel_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client_id: Some(Uuid::new_v4().to_string()),
            text: text.into(),
            channel_ids: channel_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.schedule_at = at;
        self
    }

    pub fn draft(mut self) -> Self {
        self.is_draft = true;
        self
    }

    pub fn in_collection(mut self, collection_id: impl Into<String>) -> Self {
        self.post_collection_id = Some(collection_id.into());
        self
    }

    pub fn with_image(mut self, storage_object_id: impl Into<String>) -> Self {
        self.image_object_ids.push(storage_object_id.into());
        self
    }

    pub fn with_video(mut self, storage_object_id: impl Into<String>) -> Self {
        self.video_object_id = Some(storage_object_id.into());
        self
    }

    pub fn with_gif(mut self, storage_object_id: impl Into<String>) -> Self {
        self.gif_object_id = Some(storage_object_id.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_urls.push(url.into());
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// Replace the block for the platform `settings` belongs to.
    pub fn with_settings(mut self, settings: impl Into<PlatformSettings>) -> Self {
        match settings.into() {
            PlatformSettings::Facebook(s) => self.facebook_settings = s,
            PlatformSettings::Instagram(s) => self.instagram_settings = s,
            PlatformSettings::Pinterest(s) => self.pinterest_settings = s,
            PlatformSettings::Wordpress(s) => self.wordpress_settings = s,
            PlatformSettings::Youtube(s) => self.youtube_settings = s,
            PlatformSettings::TikTok(s) => self.tiktok_settings = s,
            PlatformSettings::Gmb(s) => self.gmb_settings = s,
        }
        self
    }

    /// Mark the post recurring under `rule`.
    pub fn recurring(mut self, rule: RecurrenceRule) -> Self {
        self.is_recur = true;
        self.recurrence = rule;
        self
    }

    pub fn with_ai(mut self, ai: AiRecurOptions) -> Self {
        self.ai = ai;
        self
    }

    /// Check the request is actionable before it goes on the wire.
    pub fn validate(&self, policy: ChannelPolicy) -> Result<(), ApiError> {
        if policy == ChannelPolicy::RequireAtLeastOne && self.channel_ids.is_empty() {
            return Err(ApiError::InvalidRequest(
                "channel_ids must name at least one channel".to_string(),
            ));
        }
        if let Some(pos) = self.channel_ids.iter().position(|id| id.trim().is_empty()) {
            return Err(ApiError::InvalidRequest(format!(
                "channel_ids[{pos}] is blank"
            )));
        }
        if self.recurrence.until_enabled && self.recurrence.until.is_none() {
            return Err(ApiError::InvalidRequest(
                "recur_until_dt_enabled is set but recur_until_dt is missing".to_string(),
            ));
        }
        if self.is_recur
            && self.recurrence.interval.uses_time_slots()
            && self.recurrence.time_slots.is_empty()
        {
            return Err(ApiError::InvalidRequest(format!(
                "{} needs at least one entry in recur_interval_time_slots",
                self.recurrence.interval
            )));
        }
        Ok(())
    }
}

/// A platform settings block as the server returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsBlock(Map<String, Value>);

impl SettingsBlock {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode into a typed block; keys the block lacks take their defaults.
    pub fn decode<S: PlatformBlock>(&self) -> Result<S, ApiError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| ApiError::Validation(format!("{}: {e}", S::FIELD)))
    }
}

impl From<Map<String, Value>> for SettingsBlock {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A scheduled post as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPostResult {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_object_ids: Vec<MediaRef>,
    #[serde(default)]
    pub video_object_id: Option<MediaRef>,
    #[serde(default)]
    pub gif_object_id: Option<MediaRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub facebook_settings: SettingsBlock,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instagram_settings: SettingsBlock,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinterest_settings: SettingsBlock,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wordpress_settings: SettingsBlock,
    #[serde(default, deserialize_with = "null_as_default")]
    pub youtube_settings: SettingsBlock,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tiktok_settings: SettingsBlock,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gmb_settings: SettingsBlock,

    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub post_collection_id: Option<String>,
    #[serde(with = "timestamp")]
    pub schedule_at: DateTime<Utc>,
    #[serde(default)]
    pub is_recur: bool,
    #[serde(flatten)]
    pub recurrence: RecurrenceRule,
    #[serde(flatten)]
    pub ai: AiRecurOptions,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScheduledPostResult {
    /// Decode the settings block for platform `S`.
    pub fn settings<S: PlatformBlock>(&self) -> Result<S, ApiError> {
        match self.settings_block(S::FIELD) {
            Some(block) => block.decode(),
            None => Ok(S::default()),
        }
    }

    pub fn settings_block(&self, field: &str) -> Option<&SettingsBlock> {
        match field {
            "facebook_settings" => Some(&self.facebook_settings),
            "instagram_settings" => Some(&self.instagram_settings),
            "pinterest_settings" => Some(&self.pinterest_settings),
            "wordpress_settings" => Some(&self.wordpress_settings),
            "youtube_settings" => Some(&self.youtube_settings),
            "tiktok_settings" => Some(&self.tiktok_settings),
            "gmb_settings" => Some(&self.gmb_settings),
            _ => None,
        }
    }

    /// Storage object ids of attached images, skipping references without one.
    pub fn image_ids(&self) -> Vec<&str> {
        self.image_object_ids
            .iter()
            .filter_map(MediaRef::object_id)
            .collect()
    }
}
