//! Messages sub-client: single chat sends, withdrawal, history and read state.

use serde_json::json;

use crate::client::ImClient;
use crate::domain::message::wire::{BatchMessageRequest, HistoryRequest, MessageRequest};
use crate::domain::message::{
    BatchSendMsgResponse, HistoryMessageResponse, HistoryQuery, MsgContent, SendMsgResponse,
    SendOptions, UnreadMsgNumResponse, MAX_HISTORY_PAGE,
};
use crate::error::SdkError;
use crate::shared::{CommonResponse, ImResponse};

pub struct Messages<'a> {
    pub(crate) client: &'a ImClient,
}

impl<'a> Messages<'a> {
    /// Send one message from `from` to `to`.
    ///
    /// A platform rejection is logged and returned as `Ok`; inspect
    /// [`ImResponse::is_ok`] on the result.
    pub async fn send(
        &self,
        from: &str,
        to: &str,
        content: MsgContent,
        options: SendOptions,
    ) -> Result<SendMsgResponse, SdkError> {
        self.send_with(from, to, content, options).await
    }

    /// [`send`](Self::send) decoding into a caller-chosen response type.
    pub async fn send_with<R: ImResponse>(
        &self,
        from: &str,
        to: &str,
        content: MsgContent,
        options: SendOptions,
    ) -> Result<R, SdkError> {
        require_parties(from, [to])?;
        let request = MessageRequest::new(from, to, content, options);
        let resp: R = self.client.http.send("SendMsg", &request).await?;
        if !resp.is_ok() {
            tracing::error!(
                from,
                to,
                error_code = resp.error_code(),
                response = %resp.raw(),
                "send message rejected"
            );
        }
        Ok(resp)
    }

    /// Send the same message to up to 500 recipients.
    ///
    /// Per-recipient failures are listed in
    /// [`BatchSendMsgResponse::error_list`] even when the call succeeds.
    pub async fn send_batch(
        &self,
        from: &str,
        to: &[impl AsRef<str>],
        content: MsgContent,
        options: SendOptions,
    ) -> Result<BatchSendMsgResponse, SdkError> {
        self.send_batch_with(from, to, content, options).await
    }

    pub async fn send_batch_with<R: ImResponse>(
        &self,
        from: &str,
        to: &[impl AsRef<str>],
        content: MsgContent,
        options: SendOptions,
    ) -> Result<R, SdkError> {
        let to: Vec<String> = to.iter().map(|t| t.as_ref().to_string()).collect();
        if to.is_empty() {
            return Err(SdkError::Validation("missing recipients".to_string()));
        }
        require_parties(from, to.iter().map(String::as_str))?;

        let request = BatchMessageRequest::new(from, to, content, options);
        let resp: R = self.client.http.send("BatchSendMsg", &request).await?;
        if !resp.is_ok() {
            tracing::error!(
                from,
                to = ?request.to_account,
                error_code = resp.error_code(),
                response = %resp.raw(),
                "batch send rejected"
            );
        }
        Ok(resp)
    }

    /// Withdraw a message previously sent from `from` to `to`.
    pub async fn withdraw(
        &self,
        from: &str,
        to: &str,
        msg_key: &str,
    ) -> Result<CommonResponse, SdkError> {
        require_parties(from, [to])?;
        if msg_key.is_empty() {
            return Err(SdkError::Validation("missing MsgKey".to_string()));
        }
        let resp: CommonResponse = self
            .client
            .http
            .send(
                "MsgWithdraw",
                &json!({
                    "From_Account": from,
                    "To_Account": to,
                    "MsgKey": msg_key,
                }),
            )
            .await?;
        tracing::info!(from, to, msg_key, response = %resp.raw(), "message withdraw");
        Ok(resp)
    }

    /// One page of roaming history. Use [`HistoryQuery::next_page`] to continue.
    pub async fn history(&self, query: &HistoryQuery) -> Result<HistoryMessageResponse, SdkError> {
        require_parties(&query.operator, [query.peer.as_str()])?;
        if query.max_cnt == 0 || query.max_cnt > MAX_HISTORY_PAGE {
            return Err(SdkError::Validation(format!(
                "MaxCnt must be between 1 and {}, got {}",
                MAX_HISTORY_PAGE, query.max_cnt
            )));
        }
        let request = HistoryRequest {
            operator_account: &query.operator,
            peer_account: &query.peer,
            last_msg_key: query.last_msg_key.as_deref().filter(|k| !k.is_empty()),
            max_cnt: query.max_cnt,
            min_time: query.min_time,
            max_time: query.max_time,
        };
        self.client.http.send("QueryMsg", &request).await
    }

    /// Mark `peer`'s messages as read by `report` up to `msg_read_time`
    /// (seconds), or all of them when `None`.
    pub async fn set_read(
        &self,
        report: &str,
        peer: &str,
        msg_read_time: Option<i64>,
    ) -> Result<CommonResponse, SdkError> {
        require_parties(report, [peer])?;
        let mut body = json!({
            "Report_Account": report,
            "Peer_Account": peer,
        });
        if let Some(t) = msg_read_time {
            body["MsgReadTime"] = json!(t);
        }
        self.client.http.send("SetMsgRead", &body).await
    }

    /// Unread counts for `to`, in total or per peer when `peers` is not empty.
    pub async fn unread_count(
        &self,
        to: &str,
        peers: &[impl AsRef<str>],
    ) -> Result<UnreadMsgNumResponse, SdkError> {
        if to.is_empty() {
            return Err(SdkError::Validation("missing account".to_string()));
        }
        let mut body = json!({ "To_Account": to });
        if !peers.is_empty() {
            let peers: Vec<&str> = peers.iter().map(AsRef::as_ref).collect();
            body["Peer_Account"] = json!(peers);
        }
        self.client.http.send("GetC2CUnreadMsgNum", &body).await
    }
}

fn require_parties<'s>(
    from: &str,
    to: impl IntoIterator<Item = &'s str>,
) -> Result<(), SdkError> {
    if from.is_empty() || to.into_iter().any(str::is_empty) {
        return Err(SdkError::Validation(
            "missing sender or recipient".to_string(),
        ));
    }
    Ok(())
}
