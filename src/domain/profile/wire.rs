//! Wire types for the profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::profile::ProfileItem;
use crate::shared::{impl_im_response, ResponseStatus};

#[derive(Debug, Clone, Serialize)]
pub struct PortraitSetRequest<'a> {
    #[serde(rename = "From_Account")]
    pub from_account: &'a str,
    #[serde(rename = "ProfileItem")]
    pub profile_item: &'a [ProfileItem],
}

#[derive(Debug, Clone, Serialize)]
pub struct PortraitGetRequest<'a> {
    #[serde(rename = "To_Account")]
    pub to_account: Vec<&'a str>,
    #[serde(rename = "TagList")]
    pub tag_list: Vec<String>,
}

/// Response from `PortraitGet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortraitGetResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "UserProfileItem", default)]
    pub user_profiles: Vec<UserProfileItem>,
    #[serde(rename = "FailAccount", default, skip_serializing_if = "Vec::is_empty")]
    pub fail_accounts: Vec<String>,
}

impl PortraitGetResponse {
    pub fn profile(&self, account: &str) -> Option<&UserProfileItem> {
        self.user_profiles.iter().find(|p| p.to_account == account)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfileItem {
    #[serde(rename = "To_Account", default)]
    pub to_account: String,
    #[serde(rename = "ProfileItem", default)]
    pub items: Vec<ProfileItem>,
    #[serde(rename = "ResultCode", default)]
    pub result_code: i64,
    #[serde(rename = "ResultInfo", default)]
    pub result_info: String,
}

impl UserProfileItem {
    /// Value of `tag`, if the profile has it.
    pub fn get(&self, tag: &str) -> Option<&serde_json::Value> {
        self.items.iter().find(|i| i.tag == tag).map(|i| &i.value)
    }
}

impl_im_response!(PortraitGetResponse);
