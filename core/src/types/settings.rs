//! Per-platform settings blocks.
//!
//! A scheduled post carries one block per supported platform. Only the block
//! matching a target channel's platform is meaningful; the server ignores
//! the rest, which still go over the wire with their defaults. Keys are
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::enums::{
    FacebookPostType, GmbCtaButtonActionType, GmbPostTopicType, InstagramPostType,
    TikTokPrivacyLevel, WordpressPostType, YoutubePrivacyStatus, YoutubeVideoType,
};

/// A settings block, named by the payload field that carries it.
pub trait PlatformBlock: Serialize + DeserializeOwned + Default {
    const FIELD: &'static str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacebookSettings {
    pub post_type: FacebookPostType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstagramSettings {
    pub post_type: InstagramPostType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PinterestSettings {
    pub pin_title: String,
    pub destination_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordpressSettings {
    pub post_title: String,
    pub post_text: String,
    pub post_slug: String,
    pub post_type: WordpressPostType,
    pub post_categories: Vec<String>,
    pub post_tags: Vec<String>,
    pub post_featured_image: Option<String>,
    pub post_parent_page: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YoutubeSettings {
    pub video_object: Option<String>,
    pub video_title: String,
    pub video_type: YoutubeVideoType,
    pub video_description: String,
    pub video_privacy_status: YoutubePrivacyStatus,
    pub video_thumbnail_image_object: Option<String>,
    pub video_thumbnail_group_uuid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TikTokSettings {
    pub title: String,
    pub privacy_level: TikTokPrivacyLevel,
    pub disable_duet: bool,
    pub disable_comment: bool,
    pub disable_stitch: bool,
    pub video_cover_timestamp_ms: i64,
    pub video_object: Option<String>,
    pub video_thumbnail_group_uuid: Option<String>,
    pub auto_add_music: bool,
}

impl Default for TikTokSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            privacy_level: TikTokPrivacyLevel::default(),
            disable_duet: false,
            disable_comment: false,
            disable_stitch: false,
            video_cover_timestamp_ms: 0,
            video_object: None,
            video_thumbnail_group_uuid: None,
            auto_add_music: true,
        }
    }
}

/// Google Business Profile settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GmbSettings {
    pub post_topic_type: GmbPostTopicType,
    pub offer_title: String,
    pub offer_coupon_code: String,
    pub offer_redeem_online_url: String,
    pub offer_terms_conditions: String,
    #[serde(with = "crate::timestamp::option")]
    pub offer_start_dt: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp::option")]
    pub offer_end_dt: Option<DateTime<Utc>>,
    pub event_title: String,
    #[serde(with = "crate::timestamp::option")]
    pub event_start_dt: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp::option")]
    pub event_end_dt: Option<DateTime<Utc>>,
    pub cta_button_action_type: GmbCtaButtonActionType,
    pub cta_url: String,
}

impl PlatformBlock for FacebookSettings {
    const FIELD: &'static str = "facebook_settings";
}

impl PlatformBlock for InstagramSettings {
    const FIELD: &'static str = "instagram_settings";
}

impl PlatformBlock for PinterestSettings {
    const FIELD: &'static str = "pinterest_settings";
}

impl PlatformBlock for WordpressSettings {
    const FIELD: &'static str = "wordpress_settings";
}

impl PlatformBlock for YoutubeSettings {
    const FIELD: &'static str = "youtube_settings";
}

impl PlatformBlock for TikTokSettings {
    const FIELD: &'static str = "tiktok_settings";
}

impl PlatformBlock for GmbSettings {
    const FIELD: &'static str = "gmb_settings";
}

/// Settings for exactly one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformSettings {
    Facebook(FacebookSettings),
    Instagram(InstagramSettings),
    Pinterest(PinterestSettings),
    Wordpress(WordpressSettings),
    Youtube(YoutubeSettings),
    TikTok(TikTokSettings),
    Gmb(GmbSettings),
}

impl PlatformSettings {
    pub fn field(&self) -> &'static str {
        match self {
            PlatformSettings::Facebook(_) => FacebookSettings::FIELD,
            PlatformSettings::Instagram(_) => InstagramSettings::FIELD,
            PlatformSettings::Pinterest(_) => PinterestSettings::FIELD,
            PlatformSettings::Wordpress(_) => WordpressSettings::FIELD,
            PlatformSettings::Youtube(_) => YoutubeSettings::FIELD,
            PlatformSettings::TikTok(_) => TikTokSettings::FIELD,
            PlatformSettings::Gmb(_) => GmbSettings::FIELD,
        }
    }
}

macro_rules! impl_from_block {
    ($($block:ident => $variant:ident),+ $(,)?) => {
        $(impl From<$block> for PlatformSettings {
            fn from(settings: $block) -> Self {
                PlatformSettings::$variant(settings)
            }
        })+
    };
}

impl_from_block! {
    FacebookSettings => Facebook,
    InstagramSettings => Instagram,
    PinterestSettings => Pinterest,
    WordpressSettings => Wordpress,
    YoutubeSettings => Youtube,
    TikTokSettings => TikTok,
    GmbSettings => Gmb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn youtube_defaults_serialize_camel_case() {
        let value = serde_json::to_value(YoutubeSettings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "videoObject": null,
                "videoTitle": "",
                "videoType": "video",
                "videoDescription": "",
                "videoPrivacyStatus": "public",
                "videoThumbnailImageObject": null,
                "videoThumbnailGroupUuid": null
            })
        );
    }

    #[test]
    fn tiktok_adds_music_by_default() {
        let settings: TikTokSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.auto_add_music);
        assert!(!settings.disable_duet);
        assert_eq!(settings.privacy_level, TikTokPrivacyLevel::PublicToEveryone);
    }

    #[test]
    fn partial_block_fills_defaults() {
        let settings: InstagramSettings = serde_json::from_str(r#"{"postType":"STORIES"}"#).unwrap();
        assert_eq!(settings.post_type, InstagramPostType::Stories);

        let settings: WordpressSettings =
            serde_json::from_str(r#"{"postTitle":"Hello","postTags":["a"]}"#).unwrap();
        assert_eq!(settings.post_title, "Hello");
        assert_eq!(settings.post_tags, vec!["a"]);
        assert_eq!(settings.post_parent_page, 0);
    }

    #[test]
    fn invalid_post_type_is_rejected() {
        let result: Result<FacebookSettings, _> = serde_json::from_str(r#"{"postType":"STORY"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn gmb_event_dates_round_trip_as_utc() {
        let settings = GmbSettings {
            post_topic_type: GmbPostTopicType::Event,
            event_title: "Launch".to_string(),
            event_start_dt: Some(Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap()),
            ..GmbSettings::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["eventStartDt"], "2025-03-01T18:00:00Z");
        assert_eq!(value["eventEndDt"], serde_json::Value::Null);
        assert_eq!(value["postTopicType"], "EVENT");

        let back: GmbSettings = serde_json::from_value(value).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn platform_settings_names_its_field() {
        let settings: PlatformSettings = YoutubeSettings::default().into();
        assert_eq!(settings.field(), "youtube_settings");
        let settings: PlatformSettings = GmbSettings::default().into();
        assert_eq!(settings.field(), "gmb_settings");
    }
}
