//! String-literal enums used by the Robopost API.
//!
//! Each enum serializes to exactly its declared literal and refuses anything
//! else, both through `FromStr` and through deserialization. There is no
//! catch-all variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLiteralError;

macro_rules! literal_enum {
    (
        $(#[$meta:meta])*
        $name:ident (default $default:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $lit:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $lit)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLiteralError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($lit => Ok($name::$variant),)+
                    other => Err(ParseLiteralError {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

literal_enum! {
    /// Image model used when a recurring post regenerates its AI image.
    AiImageModel (default Dalle) {
        Dalle => "DALLE",
        FluxSchnell => "FLUX_SCHNELL",
        FluxDev => "FLUX_DEV",
        FluxPro => "FLUX_PRO",
    }
}

literal_enum! {
    /// Tone for AI rephrasing of recurring post text.
    VoiceTone (default Friendly) {
        Polite => "POLITE",
        Witty => "WITTY",
        Enthusiastic => "ENTHUSIASTIC",
        Informational => "INFORMATIONAL",
        Funny => "FUNNY",
        Formal => "FORMAL",
        Informal => "INFORMAL",
        Humorous => "HUMOROUS",
        Serious => "SERIOUS",
        Optimistic => "OPTIMISTIC",
        Motivating => "MOTIVATING",
        Respectful => "RESPECTFUL",
        Assertive => "ASSERTIVE",
        Conversational => "CONVERSATIONAL",
        Casual => "CASUAL",
        Professional => "PROFESSIONAL",
        Smart => "SMART",
        Nostalgic => "NOSTALGIC",
        Friendly => "FRIENDLY",
    }
}

literal_enum! {
    RecurInterval (default Daily) {
        DailySpecificTimeSlots => "DAILY_SPECIFIC_TIME_SLOTS",
        WeeklySpecificTimeSlots => "WEEKLY_SPECIFIC_TIME_SLOTS",
        Every3Hours => "EVERY_3_HOURS",
        Every6Hours => "EVERY_6_HOURS",
        /// Every 12 hours.
        BiDaily => "BI_DAILY",
        Daily => "DAILY",
        Weekly => "WEEKLY",
        Monthly => "MONTHLY",
        Yearly => "YEARLY",
    }
}

impl RecurInterval {
    /// Intervals that fire at the rule's explicit time slots.
    pub fn uses_time_slots(&self) -> bool {
        matches!(
            self,
            RecurInterval::DailySpecificTimeSlots | RecurInterval::WeeklySpecificTimeSlots
        )
    }
}

literal_enum! {
    FacebookPostType (default Post) {
        Post => "POST",
        Reels => "REELS",
    }
}

literal_enum! {
    InstagramPostType (default Post) {
        Post => "POST",
        Reels => "REELS",
        Stories => "STORIES",
    }
}

literal_enum! {
    WordpressPostType (default Post) {
        Post => "POST",
    }
}

literal_enum! {
    YoutubeVideoType (default Video) {
        Video => "video",
        Short => "short",
    }
}

literal_enum! {
    YoutubePrivacyStatus (default Public) {
        Public => "public",
        Private => "private",
        Unlisted => "unlisted",
    }
}

literal_enum! {
    TikTokPrivacyLevel (default PublicToEveryone) {
        PublicToEveryone => "PUBLIC_TO_EVERYONE",
    }
}

literal_enum! {
    /// Google Business Profile post topic.
    GmbPostTopicType (default Standard) {
        Standard => "STANDARD",
        Offer => "OFFER",
        Event => "EVENT",
    }
}

literal_enum! {
    /// Call-to-action button on a Google Business Profile post.
    GmbCtaButtonActionType (default ActionTypeUnspecified) {
        ActionTypeUnspecified => "ACTION_TYPE_UNSPECIFIED",
        Book => "BOOK",
        Order => "ORDER",
        Shop => "SHOP",
        LearnMore => "LEARN_MORE",
        SignUp => "SIGN_UP",
        Call => "CALL",
    }
}
