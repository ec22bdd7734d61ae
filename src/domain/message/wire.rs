//! Wire types for single chat message requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::message::{
    ForbidCallbackControl, MsgContent, OfflinePushInfo, SendMsgControl, SendOptions,
    DEFAULT_MSG_LIFE_TIME,
};
use crate::shared::{impl_im_response, msg_random, AccountError, ResponseStatus};

// ─── Requests ────────────────────────────────────────────────────────────────

/// Request payload for `SendMsg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(rename = "SyncOtherMachine", skip_serializing_if = "Option::is_none")]
    pub sync_other_machine: Option<u8>,
    #[serde(rename = "From_Account")]
    pub from_account: String,
    #[serde(rename = "To_Account")]
    pub to_account: String,
    #[serde(rename = "MsgLifeTime")]
    pub msg_life_time: u32,
    #[serde(rename = "MsgRandom")]
    pub msg_random: u32,
    #[serde(rename = "MsgBody")]
    pub msg_body: Vec<MsgContent>,
    #[serde(rename = "CloudCustomData", default, skip_serializing_if = "Option::is_none")]
    pub cloud_custom_data: Option<String>,
    #[serde(rename = "SendMsgControl", default, skip_serializing_if = "Vec::is_empty")]
    pub send_msg_control: Vec<SendMsgControl>,
    #[serde(rename = "ForbidCallbackControl", default, skip_serializing_if = "Vec::is_empty")]
    pub forbid_callback_control: Vec<ForbidCallbackControl>,
    #[serde(rename = "OfflinePushInfo", default, skip_serializing_if = "Option::is_none")]
    pub offline_push_info: Option<OfflinePushInfo>,
}

impl MessageRequest {
    /// Build a request with a freshly drawn `MsgRandom`.
    pub fn new(from: &str, to: &str, content: MsgContent, options: SendOptions) -> Self {
        Self {
            sync_other_machine: options.sync_other_machine.map(|s| s.as_u8()),
            from_account: from.to_string(),
            to_account: to.to_string(),
            msg_life_time: options.msg_life_time.unwrap_or(DEFAULT_MSG_LIFE_TIME),
            msg_random: msg_random(),
            msg_body: vec![content],
            cloud_custom_data: options.cloud_custom_data,
            send_msg_control: options.send_msg_control,
            forbid_callback_control: options.forbid_callback_control,
            offline_push_info: options.offline_push_info,
        }
    }
}

/// Request payload for `BatchSendMsg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMessageRequest {
    #[serde(rename = "SyncOtherMachine", skip_serializing_if = "Option::is_none")]
    pub sync_other_machine: Option<u8>,
    #[serde(rename = "From_Account")]
    pub from_account: String,
    #[serde(rename = "To_Account")]
    pub to_account: Vec<String>,
    #[serde(rename = "MsgLifeTime")]
    pub msg_life_time: u32,
    #[serde(rename = "MsgRandom")]
    pub msg_random: u32,
    #[serde(rename = "MsgBody")]
    pub msg_body: Vec<MsgContent>,
    #[serde(rename = "CloudCustomData", default, skip_serializing_if = "Option::is_none")]
    pub cloud_custom_data: Option<String>,
    #[serde(rename = "SendMsgControl", default, skip_serializing_if = "Vec::is_empty")]
    pub send_msg_control: Vec<SendMsgControl>,
    #[serde(rename = "OfflinePushInfo", default, skip_serializing_if = "Option::is_none")]
    pub offline_push_info: Option<OfflinePushInfo>,
}

impl BatchMessageRequest {
    pub fn new(from: &str, to: Vec<String>, content: MsgContent, options: SendOptions) -> Self {
        Self {
            sync_other_machine: options.sync_other_machine.map(|s| s.as_u8()),
            from_account: from.to_string(),
            to_account: to,
            msg_life_time: options.msg_life_time.unwrap_or(DEFAULT_MSG_LIFE_TIME),
            msg_random: msg_random(),
            msg_body: vec![content],
            cloud_custom_data: options.cloud_custom_data,
            send_msg_control: options.send_msg_control,
            offline_push_info: options.offline_push_info,
        }
    }
}

/// Request payload for `QueryMsg`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRequest<'a> {
    #[serde(rename = "Operator_Account")]
    pub operator_account: &'a str,
    #[serde(rename = "Peer_Account")]
    pub peer_account: &'a str,
    #[serde(rename = "LastMsgKey", skip_serializing_if = "Option::is_none")]
    pub last_msg_key: Option<&'a str>,
    #[serde(rename = "MaxCnt")]
    pub max_cnt: u32,
    #[serde(rename = "MinTime")]
    pub min_time: i64,
    #[serde(rename = "MaxTime")]
    pub max_time: i64,
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// Response from `SendMsg`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMsgResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "MsgTime", default, skip_serializing_if = "Option::is_none")]
    pub msg_time: Option<i64>,
    /// Needed to withdraw the message later.
    #[serde(rename = "MsgKey", default, skip_serializing_if = "Option::is_none")]
    pub msg_key: Option<String>,
}

/// Response from `BatchSendMsg`; failed recipients are listed in `error_list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSendMsgResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "MsgKey", default, skip_serializing_if = "Option::is_none")]
    pub msg_key: Option<String>,
    #[serde(rename = "ErrorList", default, skip_serializing_if = "Vec::is_empty")]
    pub error_list: Vec<AccountError>,
}

/// Response from `QueryMsg`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryMessageResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    /// 1 when every message in the range has been returned.
    #[serde(rename = "Complete", default)]
    pub complete: i64,
    #[serde(rename = "MsgCnt", default)]
    pub msg_cnt: i64,
    #[serde(rename = "LastMsgTime", default)]
    pub last_msg_time: i64,
    #[serde(rename = "LastMsgKey", default)]
    pub last_msg_key: String,
    #[serde(rename = "MsgList", default)]
    pub msg_list: Vec<HistoryMsg>,
}

/// One message in a history page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryMsg {
    #[serde(rename = "From_Account", default)]
    pub from_account: String,
    #[serde(rename = "To_Account", default)]
    pub to_account: String,
    #[serde(rename = "MsgSeq", default)]
    pub msg_seq: i64,
    #[serde(rename = "MsgRandom", default)]
    pub msg_random: u64,
    #[serde(rename = "MsgTimeStamp", default)]
    pub msg_time_stamp: i64,
    #[serde(rename = "MsgFlagBits", default)]
    pub msg_flag_bits: i64,
    #[serde(rename = "MsgKey", default)]
    pub msg_key: String,
    #[serde(rename = "MsgBody", default)]
    pub msg_body: Vec<RawMsgBody>,
    #[serde(rename = "CloudCustomData", default, skip_serializing_if = "Option::is_none")]
    pub cloud_custom_data: Option<String>,
}

/// A message element as received. Element types this SDK does not model
/// (images, files, video) stay available as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMsgBody {
    #[serde(rename = "MsgType")]
    pub msg_type: String,
    #[serde(rename = "MsgContent", default)]
    pub msg_content: serde_json::Value,
}

impl RawMsgBody {
    /// Typed view of the element, if its type is modelled.
    pub fn content(&self) -> Option<MsgContent> {
        serde_json::from_value(serde_json::json!({
            "MsgType": self.msg_type,
            "MsgContent": self.msg_content,
        }))
        .ok()
    }
}

/// Response from `GetC2CUnreadMsgNum`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnreadMsgNumResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "AllC2CUnreadMsgNum", default)]
    pub all_unread: i64,
    #[serde(rename = "C2CUnreadMsgNumList", default)]
    pub per_peer: Vec<PeerUnread>,
    #[serde(rename = "ErrorList", default, skip_serializing_if = "Vec::is_empty")]
    pub error_list: Vec<PeerError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerUnread {
    #[serde(rename = "Peer_Account")]
    pub peer_account: String,
    #[serde(rename = "C2CUnreadMsgNum")]
    pub unread: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerError {
    #[serde(rename = "Peer_Account")]
    pub peer_account: String,
    #[serde(rename = "ErrorCode")]
    pub error_code: i64,
}

impl_im_response!(
    SendMsgResponse,
    BatchSendMsgResponse,
    HistoryMessageResponse,
    UnreadMsgNumResponse,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ImResponse;
    use serde_json::json;

    #[test]
    fn test_message_request_wire_shape() {
        let req = MessageRequest::new("alice", "bob", MsgContent::text("hi"), SendOptions::default());
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["From_Account"], "alice");
        assert_eq!(v["To_Account"], "bob");
        assert_eq!(v["MsgLifeTime"], 604800);
        assert!(v["MsgRandom"].is_u64());
        assert_eq!(v["MsgBody"][0]["MsgType"], "TIMTextElem");
        assert!(v.get("SyncOtherMachine").is_none());
        assert!(v.get("SendMsgControl").is_none());
        assert!(v.get("OfflinePushInfo").is_none());
    }

    #[test]
    fn test_batch_response_lists_failures() {
        let resp: BatchSendMsgResponse = serde_json::from_value(json!({
            "ActionStatus": "OK", "ErrorInfo": "", "ErrorCode": 0,
            "MsgKey": "1335_219_1603700942",
            "ErrorList": [{"To_Account": "lumotuwe1", "ErrorCode": 70107}]
        }))
        .unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.error_list[0].to_account, "lumotuwe1");
        assert_eq!(resp.error_list[0].error_code, 70107);
    }

    #[test]
    fn test_history_raw_body_typed_view() {
        let resp: HistoryMessageResponse = serde_json::from_value(json!({
            "ActionStatus": "OK", "ErrorInfo": "", "ErrorCode": 0,
            "Complete": 1, "MsgCnt": 2, "LastMsgTime": 1584669680, "LastMsgKey": "k",
            "MsgList": [
                {"From_Account": "a", "To_Account": "b", "MsgSeq": 1, "MsgRandom": 2,
                 "MsgTimeStamp": 3, "MsgFlagBits": 0, "MsgKey": "k1",
                 "MsgBody": [{"MsgType": "TIMTextElem", "MsgContent": {"Text": "hi"}}]},
                {"From_Account": "a", "To_Account": "b", "MsgKey": "k2",
                 "MsgBody": [{"MsgType": "TIMImageElem", "MsgContent": {"UUID": "x"}}]}
            ]
        }))
        .unwrap();
        assert_eq!(resp.msg_list.len(), 2);
        assert_eq!(
            resp.msg_list[0].msg_body[0].content(),
            Some(MsgContent::text("hi"))
        );
        assert_eq!(resp.msg_list[1].msg_body[0].msg_type, "TIMImageElem");
        assert!(resp.msg_list[1].msg_body[0].content().is_none());
    }

    #[test]
    fn test_send_response_error_code() {
        let resp: SendMsgResponse = serde_json::from_value(json!({
            "ActionStatus": "FAIL", "ErrorInfo": "Fail to Parse json data of body", "ErrorCode": 90001
        }))
        .unwrap();
        assert_eq!(resp.error_code(), 90001);
        assert!(resp.msg_key.is_none());
    }
}
