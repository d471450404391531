//! Domain DTOs for the Robopost API.
//!
//! # Design
//! Request types are strict and always serialize their declared defaults.
//! Response types keep strict typing for the fields that have stayed stable
//! across server revisions and stay open (`SettingsBlock`, `MediaRef`,
//! `extra`) where the server's shape has drifted. The mock-server crate
//! defines its own types; integration tests catch schema drift between them.

pub mod enums;
pub mod media;
pub mod post;
pub mod settings;

pub use enums::{
    AiImageModel, FacebookPostType, GmbCtaButtonActionType, GmbPostTopicType, InstagramPostType,
    RecurInterval, TikTokPrivacyLevel, VoiceTone, WordpressPostType, YoutubePrivacyStatus,
    YoutubeVideoType,
};
pub use media::{MediaRecord, MediaRef};
pub use post::{AiRecurOptions, RecurrenceRule, ScheduledPostRequest, ScheduledPostResult, SettingsBlock};
pub use settings::{
    FacebookSettings, GmbSettings, InstagramSettings, PinterestSettings, PlatformBlock,
    PlatformSettings, TikTokSettings, WordpressSettings, YoutubeSettings,
};
