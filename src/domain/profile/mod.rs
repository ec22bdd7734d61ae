//! Profile domain: reading and writing user profile tags.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};

pub use wire::{PortraitGetResponse, UserProfileItem};

pub const TAG_NICK: &str = "Tag_Profile_IM_Nick";
pub const TAG_GENDER: &str = "Tag_Profile_IM_Gender";
pub const TAG_BIRTHDAY: &str = "Tag_Profile_IM_BirthDay";
pub const TAG_LOCATION: &str = "Tag_Profile_IM_Location";
pub const TAG_SELF_SIGNATURE: &str = "Tag_Profile_IM_SelfSignature";
pub const TAG_ALLOW_TYPE: &str = "Tag_Profile_IM_AllowType";
pub const TAG_LANGUAGE: &str = "Tag_Profile_IM_Language";
pub const TAG_IMAGE: &str = "Tag_Profile_IM_Image";
pub const TAG_MSG_SETTINGS: &str = "Tag_Profile_IM_MsgSettings";
pub const TAG_ADMIN_FORBID_TYPE: &str = "Tag_Profile_IM_AdminForbidType";
pub const TAG_LEVEL: &str = "Tag_Profile_IM_Level";
pub const TAG_ROLE: &str = "Tag_Profile_IM_Role";

/// Tags every profile read includes.
pub const DEFAULT_TAGS: [&str; 6] = [
    TAG_NICK,
    TAG_GENDER,
    TAG_BIRTHDAY,
    TAG_LOCATION,
    TAG_SELF_SIGNATURE,
    TAG_IMAGE,
];

/// One profile field. `value` is a string or an integer depending on the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileItem {
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Value")]
    pub value: serde_json::Value,
}

impl ProfileItem {
    pub fn new(tag: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            tag: tag.to_string(),
            value: value.into(),
        }
    }

    pub fn nick(nick: &str) -> Self {
        Self::new(TAG_NICK, nick)
    }

    pub fn image(url: &str) -> Self {
        Self::new(TAG_IMAGE, url)
    }

    pub fn self_signature(text: &str) -> Self {
        Self::new(TAG_SELF_SIGNATURE, text)
    }

    /// `Tag_Profile_Custom_<name>`, the app-defined field `name`.
    pub fn custom(name: &str, value: impl Into<serde_json::Value>) -> Self {
        Self::new(&format!("Tag_Profile_Custom_{}", name), value)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// `extra` in its order, then any default tag it is missing.
pub fn tag_list(extra: &[impl AsRef<str>]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(extra.len() + DEFAULT_TAGS.len());
    for tag in extra.iter().map(AsRef::as_ref).chain(DEFAULT_TAGS) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
