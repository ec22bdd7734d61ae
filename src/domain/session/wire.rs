//! Wire types for the recent contact endpoints.

use serde::{Deserialize, Serialize};

use crate::shared::{impl_im_response, ResponseStatus};

#[derive(Debug, Clone, Serialize)]
pub struct SessionListRequest<'a> {
    #[serde(rename = "From_Account")]
    pub from_account: &'a str,
    #[serde(rename = "TimeStamp")]
    pub time_stamp: i64,
    #[serde(rename = "StartIndex")]
    pub start_index: i64,
    #[serde(rename = "TopTimeStamp")]
    pub top_time_stamp: i64,
    #[serde(rename = "TopStartIndex")]
    pub top_start_index: i64,
    #[serde(rename = "AssistFlags")]
    pub assist_flags: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDeleteRequest<'a> {
    #[serde(rename = "From_Account")]
    pub from_account: &'a str,
    #[serde(rename = "Type")]
    pub kind: u8,
    #[serde(rename = "To_Account", skip_serializing_if = "Option::is_none")]
    pub to_account: Option<&'a str>,
    #[serde(rename = "ToGroupid", skip_serializing_if = "Option::is_none")]
    pub to_group_id: Option<&'a str>,
    /// 1 also clears roaming messages.
    #[serde(rename = "ClearRamble", skip_serializing_if = "is_zero")]
    pub clear_ramble: u8,
}

fn is_zero(v: &u8) -> bool {
    *v == 0
}

/// Response from `GetRecentContact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionListResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    /// 1 once every session has been returned.
    #[serde(rename = "CompleteFlag", default)]
    pub complete_flag: i64,
    #[serde(rename = "TimeStamp", default)]
    pub time_stamp: i64,
    #[serde(rename = "StartIndex", default)]
    pub start_index: i64,
    #[serde(rename = "TopTimeStamp", default)]
    pub top_time_stamp: i64,
    #[serde(rename = "TopStartIndex", default)]
    pub top_start_index: i64,
    #[serde(rename = "SessionItem", default)]
    pub sessions: Vec<SessionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionItem {
    /// 1 for C2C, 2 for group.
    #[serde(rename = "Type", default)]
    pub kind: u8,
    #[serde(rename = "To_Account", default, skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(rename = "MsgTime", default)]
    pub msg_time: i64,
    /// 1 when pinned.
    #[serde(rename = "TopFlag", default)]
    pub top_flag: u8,
}

impl_im_response!(SessionListResponse);
