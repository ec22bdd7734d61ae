//! Accounts sub-client: import, delete, check, kick and online status.

use serde_json::json;

use crate::client::ImClient;
use crate::domain::account::wire::{AccountImportRequest, UserIdItem};
use crate::domain::account::{
    AccountCheckResponse, AccountDeleteResponse, AccountImportResponse,
    MultiAccountImportResponse, QueryUserStatusResponse, MAX_BATCH_ACCOUNTS, MAX_STATUS_ACCOUNTS,
};
use crate::error::SdkError;
use crate::shared::{CommonResponse, ImResponse};

pub struct Accounts<'a> {
    pub(crate) client: &'a ImClient,
}

impl<'a> Accounts<'a> {
    /// Import one account. Empty `nick` / `face_url` are left unset.
    pub async fn import(
        &self,
        user: &str,
        nick: &str,
        face_url: &str,
    ) -> Result<AccountImportResponse, SdkError> {
        if user.is_empty() {
            return Err(SdkError::Validation("missing account".to_string()));
        }
        let request = AccountImportRequest {
            user_id: user,
            nick: Some(nick).filter(|n| !n.is_empty()),
            face_url: Some(face_url).filter(|f| !f.is_empty()),
        };
        let resp: AccountImportResponse = self.client.http.send("AccountImport", &request).await?;
        tracing::info!(user, error_code = resp.error_code(), "account import");
        Ok(resp)
    }

    /// Import up to 100 accounts without profile data.
    pub async fn import_many(
        &self,
        users: &[impl AsRef<str>],
    ) -> Result<MultiAccountImportResponse, SdkError> {
        let users = batch(users, MAX_BATCH_ACCOUNTS)?;
        let resp: MultiAccountImportResponse = self
            .client
            .http
            .send("MultiAccountImport", &json!({ "Accounts": users }))
            .await?;
        if !resp.fail_accounts.is_empty() {
            tracing::warn!(fail_accounts = ?resp.fail_accounts, "some accounts were not imported");
        }
        Ok(resp)
    }

    /// Delete up to 100 accounts.
    pub async fn delete(
        &self,
        users: &[impl AsRef<str>],
    ) -> Result<AccountDeleteResponse, SdkError> {
        let users = batch(users, MAX_BATCH_ACCOUNTS)?;
        let items: Vec<UserIdItem<'_>> = users.iter().map(|u| UserIdItem { user_id: u }).collect();
        self.client
            .http
            .send("AccountDelete", &json!({ "DeleteItem": items }))
            .await
    }

    /// Whether each of up to 100 accounts has been imported.
    pub async fn check(&self, users: &[impl AsRef<str>]) -> Result<AccountCheckResponse, SdkError> {
        let users = batch(users, MAX_BATCH_ACCOUNTS)?;
        let items: Vec<UserIdItem<'_>> = users.iter().map(|u| UserIdItem { user_id: u }).collect();
        self.client
            .http
            .send("AccountCheck", &json!({ "CheckItem": items }))
            .await
    }

    /// Invalidate `user`'s login state, forcing it offline.
    pub async fn kick(&self, user: &str) -> Result<CommonResponse, SdkError> {
        if user.is_empty() {
            return Err(SdkError::Validation("missing account".to_string()));
        }
        let resp: CommonResponse = self
            .client
            .http
            .send("AccountInvalid", &json!({ "UserID": user }))
            .await?;
        tracing::info!(user, error_code = resp.error_code(), "account kicked");
        Ok(resp)
    }

    /// Online status of up to 500 accounts, with per-platform detail.
    pub async fn query_status(
        &self,
        users: &[impl AsRef<str>],
    ) -> Result<QueryUserStatusResponse, SdkError> {
        let users = batch(users, MAX_STATUS_ACCOUNTS)?;
        self.client
            .http
            .send(
                "AccountStatus",
                &json!({ "To_Account": users, "IsNeedDetail": 1 }),
            )
            .await
    }
}

fn batch<'u>(users: &'u [impl AsRef<str>], max: usize) -> Result<Vec<&'u str>, SdkError> {
    if users.is_empty() || users.len() > max {
        return Err(SdkError::Validation(format!(
            "expected 1 to {} accounts, got {}",
            max,
            users.len()
        )));
    }
    let users: Vec<&str> = users.iter().map(AsRef::as_ref).collect();
    if users.iter().any(|u| u.is_empty()) {
        return Err(SdkError::Validation("empty account id".to_string()));
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::mock_client;
    use httpmock::Method::POST;
    use httpmock::MockServer;

    #[tokio::test]
    async fn test_import_skips_empty_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v4/im_open_login_svc/account_import")
                    .json_body(json!({"UserID": "u1", "Nick": "Neo"}));
                then.status(200).json_body(json!({"ActionStatus": "OK", "ErrorCode": 0}));
            })
            .await;

        let (client, _) = mock_client(&server.base_url());
        let resp = client.accounts().import("u1", "Neo", "").await.unwrap();
        mock.assert_calls_async(1).await;
        assert!(resp.is_ok());
    }

    #[tokio::test]
    async fn test_import_many_reports_failures() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v4/im_open_login_svc/multiaccount_import")
                    .json_body(json!({"Accounts": ["u1", "u2"]}));
                then.status(200).json_body(json!({
                    "ActionStatus": "OK", "ErrorCode": 0, "FailAccounts": ["u2"]
                }));
            })
            .await;

        let (client, _) = mock_client(&server.base_url());
        let resp = client.accounts().import_many(&["u1", "u2"]).await.unwrap();
        mock.assert_calls_async(1).await;
        assert_eq!(resp.fail_accounts, vec!["u2".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_and_check_item_shapes() {
        let server = MockServer::start_async().await;
        let delete = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v4/im_open_login_svc/account_delete")
                    .json_body(json!({"DeleteItem": [{"UserID": "u1"}]}));
                then.status(200).json_body(json!({
                    "ActionStatus": "OK", "ErrorCode": 0,
                    "ResultItem": [{"UserID": "u1", "ResultCode": 0, "ResultInfo": ""}]
                }));
            })
            .await;
        let check = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v4/im_open_login_svc/account_check")
                    .json_body(json!({"CheckItem": [{"UserID": "u1"}]}));
                then.status(200).json_body(json!({
                    "ActionStatus": "OK", "ErrorCode": 0,
                    "ResultItem": [{"UserID": "u1", "ResultCode": 0, "AccountStatus": "NotImported"}]
                }));
            })
            .await;

        let (client, _) = mock_client(&server.base_url());
        let deleted = client.accounts().delete(&["u1"]).await.unwrap();
        let checked = client.accounts().check(&["u1"]).await.unwrap();

        delete.assert_calls_async(1).await;
        check.assert_calls_async(1).await;
        assert_eq!(deleted.results[0].user_id, "u1");
        assert_eq!(checked.imported().count(), 0);
    }

    #[tokio::test]
    async fn test_kick_and_query_status() {
        let server = MockServer::start_async().await;
        let kick = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v4/im_open_login_svc/kick")
                    .json_body(json!({"UserID": "u1"}));
                then.status(200).json_body(json!({"ActionStatus": "OK", "ErrorCode": 0}));
            })
            .await;
        let status = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v4/openim/query_online_status")
                    .json_body(json!({"To_Account": ["u1"], "IsNeedDetail": 1}));
                then.status(200).json_body(json!({
                    "ActionStatus": "OK", "ErrorCode": 0,
                    "QueryResult": [{"To_Account": "u1", "Status": "Offline"}]
                }));
            })
            .await;

        let (client, _) = mock_client(&server.base_url());
        client.accounts().kick("u1").await.unwrap();
        let resp = client.accounts().query_status(&["u1"]).await.unwrap();

        kick.assert_calls_async(1).await;
        status.assert_calls_async(1).await;
        assert!(!resp.query_result[0].is_online());
    }

    #[tokio::test]
    async fn test_batch_limits() {
        let (client, _) = mock_client("http://127.0.0.1:1");
        let none: [&str; 0] = [];
        assert!(matches!(
            client.accounts().import_many(&none).await,
            Err(SdkError::Validation(_))
        ));

        let too_many: Vec<String> = (0..=MAX_BATCH_ACCOUNTS).map(|i| format!("u{}", i)).collect();
        assert!(matches!(
            client.accounts().delete(&too_many).await,
            Err(SdkError::Validation(_))
        ));
        assert!(matches!(
            client.accounts().check(&["u1", ""]).await,
            Err(SdkError::Validation(_))
        ));
    }
}
