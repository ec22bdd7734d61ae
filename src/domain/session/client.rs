//! Sessions sub-client: list and delete recent contacts.

use crate::client::ImClient;
use crate::domain::session::wire::{SessionDeleteRequest, SessionListRequest};
use crate::domain::session::{SessionCursor, SessionListResponse, SessionTarget};
use crate::error::SdkError;
use crate::shared::{CommonResponse, ImResponse};

pub struct Sessions<'a> {
    pub(crate) client: &'a ImClient,
}

impl<'a> Sessions<'a> {
    /// One page of `user`'s sessions. Pass `SessionCursor::default()` for the
    /// first page and [`SessionCursor::next_page`] afterwards.
    pub async fn list(
        &self,
        user: &str,
        cursor: SessionCursor,
    ) -> Result<SessionListResponse, SdkError> {
        if user.is_empty() {
            return Err(SdkError::Validation("missing account".to_string()));
        }
        let request = SessionListRequest {
            from_account: user,
            time_stamp: cursor.time_stamp,
            start_index: cursor.start_index,
            top_time_stamp: cursor.top_time_stamp,
            top_start_index: cursor.top_start_index,
            assist_flags: cursor.assist_flags,
        };
        self.client.http.send("GetRecentContact", &request).await
    }

    /// Delete one session from `user`'s list, optionally clearing its roaming
    /// messages too. Rejections carry `ErrorDisplay` when the platform sends one.
    pub async fn delete(
        &self,
        user: &str,
        target: &SessionTarget,
        clear_roaming: bool,
    ) -> Result<CommonResponse, SdkError> {
        if user.is_empty() || target.id().is_empty() {
            return Err(SdkError::Validation(
                "missing account or session peer".to_string(),
            ));
        }
        let request = SessionDeleteRequest {
            from_account: user,
            kind: target.kind(),
            to_account: match target {
                SessionTarget::C2c(id) => Some(id.as_str()),
                SessionTarget::Group(_) => None,
            },
            to_group_id: match target {
                SessionTarget::Group(id) => Some(id.as_str()),
                SessionTarget::C2c(_) => None,
            },
            clear_ramble: u8::from(clear_roaming),
        };
        let resp: CommonResponse = self
            .client
            .http
            .send("DeleteRecentContact", &request)
            .await?;
        tracing::info!(
            user,
            peer = target.id(),
            error_code = resp.error_code(),
            error_display = resp.error_display.as_deref().unwrap_or_default(),
            "delete session"
        );
        Ok(resp)
    }
}
