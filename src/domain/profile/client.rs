//! Profiles sub-client: portrait set / get.

use crate::client::ImClient;
use crate::domain::profile::wire::{PortraitGetRequest, PortraitSetRequest};
use crate::domain::profile::{tag_list, PortraitGetResponse, ProfileItem};
use crate::error::SdkError;
use crate::shared::{CommonResponse, ImResponse};

pub struct Profiles<'a> {
    pub(crate) client: &'a ImClient,
}

impl<'a> Profiles<'a> {
    /// Overwrite the given profile fields of `user`.
    pub async fn set(&self, user: &str, items: &[ProfileItem]) -> Result<CommonResponse, SdkError> {
        if user.is_empty() {
            return Err(SdkError::Validation("missing account".to_string()));
        }
        if items.is_empty() {
            return Err(SdkError::Validation("no profile items".to_string()));
        }
        let request = PortraitSetRequest {
            from_account: user,
            profile_item: items,
        };
        let resp: CommonResponse = self.client.http.send("PortraitSet", &request).await?;
        tracing::info!(user, error_code = resp.error_code(), "profile set");
        Ok(resp)
    }

    /// Profiles of `users`. `extra_tags` are requested first, followed by the
    /// default tags not already listed.
    pub async fn get(
        &self,
        users: &[impl AsRef<str>],
        extra_tags: &[impl AsRef<str>],
    ) -> Result<PortraitGetResponse, SdkError> {
        let to_account: Vec<&str> = users.iter().map(AsRef::as_ref).collect();
        if to_account.is_empty() || to_account.iter().any(|u| u.is_empty()) {
            return Err(SdkError::Validation("missing account".to_string()));
        }
        let request = PortraitGetRequest {
            to_account,
            tag_list: tag_list(extra_tags),
        };
        self.client.http.send("PortraitGet", &request).await
    }
}
