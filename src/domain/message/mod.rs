//! Message domain: single chat (C2C) message content and send options.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

pub use wire::{
    BatchSendMsgResponse, HistoryMessageResponse, HistoryMsg, RawMsgBody, SendMsgResponse,
    UnreadMsgNumResponse,
};

/// Default `MsgLifeTime`: offline messages are kept for 7 days.
pub const DEFAULT_MSG_LIFE_TIME: u32 = 3600 * 24 * 7;

/// Maximum `MaxCnt` accepted by the history endpoint.
pub const MAX_HISTORY_PAGE: u32 = 100;

/// One message element, serialized as `{"MsgType": .., "MsgContent": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "MsgType", content = "MsgContent")]
pub enum MsgContent {
    #[serde(rename = "TIMTextElem")]
    Text {
        #[serde(rename = "Text")]
        text: String,
    },
    #[serde(rename = "TIMCustomElem")]
    Custom {
        #[serde(rename = "Data")]
        data: String,
        #[serde(rename = "Desc", default, skip_serializing_if = "String::is_empty")]
        desc: String,
        #[serde(rename = "Ext", default, skip_serializing_if = "String::is_empty")]
        ext: String,
        #[serde(rename = "Sound", default, skip_serializing_if = "String::is_empty")]
        sound: String,
    },
    #[serde(rename = "TIMFaceElem")]
    Face {
        #[serde(rename = "Index")]
        index: i64,
        #[serde(rename = "Data", default)]
        data: String,
    },
    #[serde(rename = "TIMLocationElem")]
    Location {
        #[serde(rename = "Desc")]
        desc: String,
        #[serde(rename = "Latitude")]
        latitude: f64,
        #[serde(rename = "Longitude")]
        longitude: f64,
    },
}

impl MsgContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn custom(data: impl Into<String>) -> Self {
        Self::Custom {
            data: data.into(),
            desc: String::new(),
            ext: String::new(),
            sound: String::new(),
        }
    }

    /// Custom element whose `Data` is `data` encoded as JSON.
    pub fn custom_json<T: Serialize>(data: &T) -> Result<Self, SdkError> {
        Ok(Self::custom(serde_json::to_string(data)?))
    }

    pub fn msg_type(&self) -> &'static str {
        match self {
            Self::Text { .. } => "TIMTextElem",
            Self::Custom { .. } => "TIMCustomElem",
            Self::Face { .. } => "TIMFaceElem",
            Self::Location { .. } => "TIMLocationElem",
        }
    }
}

/// `SendMsgControl` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendMsgControl {
    /// Not counted as unread.
    NoUnread,
    /// Does not update the recipient's session list.
    NoLastMsg,
    /// Honour the recipient's do-not-disturb setting for the sender.
    WithMuteNotifications,
}

/// `ForbidCallbackControl` flags, scoped to one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForbidCallbackControl {
    ForbidBeforeSendMsgCallback,
    ForbidAfterSendMsgCallback,
}

/// Whether a message is synced to the sender's own devices and roaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOtherMachine {
    Sync,
    NoSync,
}

impl SyncOtherMachine {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Sync => 1,
            Self::NoSync => 2,
        }
    }
}

/// Offline push settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfflinePushInfo {
    /// 0 pushes, 1 suppresses the push.
    #[serde(rename = "PushFlag", default)]
    pub push_flag: u8,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Desc", default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(rename = "Ext", default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(rename = "AndroidInfo", default, skip_serializing_if = "Option::is_none")]
    pub android_info: Option<AndroidPushInfo>,
    #[serde(rename = "ApnsInfo", default, skip_serializing_if = "Option::is_none")]
    pub apns_info: Option<ApnsPushInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AndroidPushInfo {
    #[serde(rename = "Sound", default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApnsPushInfo {
    #[serde(rename = "Sound", default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// 0 increments the badge, 1 leaves it.
    #[serde(rename = "BadgeMode", default, skip_serializing_if = "Option::is_none")]
    pub badge_mode: Option<u8>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "SubTitle", default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
}

/// Optional knobs for [`client::Messages::send`] and
/// [`client::Messages::send_batch`].
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Opaque string delivered alongside the message.
    pub cloud_custom_data: Option<String>,
    pub send_msg_control: Vec<SendMsgControl>,
    /// Ignored by batch sends.
    pub forbid_callback_control: Vec<ForbidCallbackControl>,
    /// Platform default when unset: synced to the sender.
    pub sync_other_machine: Option<SyncOtherMachine>,
    pub offline_push_info: Option<OfflinePushInfo>,
    /// Seconds; [`DEFAULT_MSG_LIFE_TIME`] when unset.
    pub msg_life_time: Option<u32>,
}

impl SendOptions {
    pub fn cloud_custom_data(mut self, data: impl Into<String>) -> Self {
        self.cloud_custom_data = Some(data.into());
        self
    }

    /// Attach structured custom data, JSON-encoded.
    pub fn cloud_custom_json<T: Serialize>(mut self, data: &T) -> Result<Self, SdkError> {
        self.cloud_custom_data = Some(serde_json::to_string(data)?);
        Ok(self)
    }

    pub fn control(mut self, control: SendMsgControl) -> Self {
        self.send_msg_control.push(control);
        self
    }

    pub fn forbid_callback(mut self, forbid: ForbidCallbackControl) -> Self {
        self.forbid_callback_control.push(forbid);
        self
    }

    pub fn sync_other_machine(mut self, sync: SyncOtherMachine) -> Self {
        self.sync_other_machine = Some(sync);
        self
    }

    pub fn offline_push(mut self, info: OfflinePushInfo) -> Self {
        self.offline_push_info = Some(info);
        self
    }

    pub fn msg_life_time(mut self, secs: u32) -> Self {
        self.msg_life_time = Some(secs);
        self
    }
}

/// Parameters for a roaming history query between two accounts.
///
/// Results can differ depending on whose side is queried: one party may have
/// cleared or deleted messages the other still sees.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    /// Account whose view of the conversation is read.
    pub operator: String,
    pub peer: String,
    /// `MsgKey` of the last message of the previous page.
    pub last_msg_key: Option<String>,
    pub max_cnt: u32,
    /// Seconds.
    pub min_time: i64,
    /// Seconds.
    pub max_time: i64,
}

impl HistoryQuery {
    pub fn new(operator: &str, peer: &str, min_time: i64, max_time: i64) -> Self {
        Self {
            operator: operator.to_string(),
            peer: peer.to_string(),
            last_msg_key: None,
            max_cnt: MAX_HISTORY_PAGE,
            min_time,
            max_time,
        }
    }

    pub fn max_cnt(mut self, max_cnt: u32) -> Self {
        self.max_cnt = max_cnt;
        self
    }

    /// Continue after the page that ended with `last_msg_key`.
    pub fn after(mut self, last_msg_key: impl Into<String>) -> Self {
        self.last_msg_key = Some(last_msg_key.into());
        self
    }

    /// Query for the page following `page`, or `None` when it was the last.
    pub fn next_page(&self, page: &HistoryMessageResponse) -> Option<Self> {
        if page.complete == 1 || page.last_msg_key.is_empty() {
            return None;
        }
        let mut next = self.clone().after(page.last_msg_key.clone());
        next.max_time = page.last_msg_time;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_element_wire_shape() {
        let v = serde_json::to_value(MsgContent::text("hello")).unwrap();
        assert_eq!(
            v,
            json!({"MsgType": "TIMTextElem", "MsgContent": {"Text": "hello"}})
        );
    }

    #[test]
    fn test_custom_element_skips_empty_fields() {
        let v = serde_json::to_value(MsgContent::custom_json(&json!({"gift": 3})).unwrap()).unwrap();
        assert_eq!(v["MsgType"], "TIMCustomElem");
        assert_eq!(v["MsgContent"]["Data"], r#"{"gift":3}"#);
        assert!(v["MsgContent"].get("Desc").is_none());
    }

    #[test]
    fn test_location_element_parses() {
        let content: MsgContent = serde_json::from_value(json!({
            "MsgType": "TIMLocationElem",
            "MsgContent": {"Desc": "office", "Latitude": 22.54, "Longitude": 113.93}
        }))
        .unwrap();
        assert_eq!(content.msg_type(), "TIMLocationElem");
        assert!(matches!(content, MsgContent::Location { ref desc, .. } if desc == "office"));
    }

    #[test]
    fn test_send_options_builders() {
        let opts = SendOptions::default()
            .control(SendMsgControl::NoUnread)
            .forbid_callback(ForbidCallbackControl::ForbidAfterSendMsgCallback)
            .sync_other_machine(SyncOtherMachine::NoSync)
            .cloud_custom_json(&json!({"k": "v"}))
            .unwrap();
        assert_eq!(opts.send_msg_control, vec![SendMsgControl::NoUnread]);
        assert_eq!(opts.sync_other_machine.map(|s| s.as_u8()), Some(2));
        assert_eq!(opts.cloud_custom_data.as_deref(), Some(r#"{"k":"v"}"#));
    }

    #[test]
    fn test_history_next_page() {
        let query = HistoryQuery::new("alice", "bob", 0, 2_000_000_000);
        let page: HistoryMessageResponse = serde_json::from_value(json!({
            "ActionStatus": "OK", "ErrorCode": 0, "ErrorInfo": "",
            "Complete": 0, "MsgCnt": 100, "LastMsgTime": 1_700_000_000,
            "LastMsgKey": "549396494_2578554_1603093388", "MsgList": []
        }))
        .unwrap();
        let next = query.next_page(&page).unwrap();
        assert_eq!(next.last_msg_key.as_deref(), Some("549396494_2578554_1603093388"));
        assert_eq!(next.max_time, 1_700_000_000);

        let last: HistoryMessageResponse = serde_json::from_value(json!({
            "ActionStatus": "OK", "ErrorCode": 0, "Complete": 1
        }))
        .unwrap();
        assert!(query.next_page(&last).is_none());
    }
}
