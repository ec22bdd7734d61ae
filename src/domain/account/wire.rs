//! Wire types for the account endpoints.

use serde::{Deserialize, Serialize};

use crate::shared::{impl_im_response, AccountError, ResponseStatus};

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AccountImportRequest<'a> {
    #[serde(rename = "UserID")]
    pub user_id: &'a str,
    #[serde(rename = "Nick", skip_serializing_if = "Option::is_none")]
    pub nick: Option<&'a str>,
    #[serde(rename = "FaceUrl", skip_serializing_if = "Option::is_none")]
    pub face_url: Option<&'a str>,
}

/// `{"UserID": ..}` entry used by delete and check.
#[derive(Debug, Clone, Serialize)]
pub struct UserIdItem<'a> {
    #[serde(rename = "UserID")]
    pub user_id: &'a str,
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// Response from `AccountImport`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountImportResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
}

/// Response from `MultiAccountImport`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiAccountImportResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    /// Accounts that could not be imported.
    #[serde(rename = "FailAccounts", default)]
    pub fail_accounts: Vec<String>,
}

/// Response from `AccountDelete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountDeleteResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "ResultItem", default)]
    pub results: Vec<DeleteResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    #[serde(rename = "UserID", default)]
    pub user_id: String,
    #[serde(rename = "ResultCode", default)]
    pub result_code: i64,
    #[serde(rename = "ResultInfo", default)]
    pub result_info: String,
}

/// Response from `AccountCheck`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountCheckResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "ResultItem", default)]
    pub results: Vec<CheckResult>,
}

impl AccountCheckResponse {
    /// Accounts reported as imported.
    pub fn imported(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| r.is_imported())
            .map(|r| r.user_id.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(rename = "UserID", default)]
    pub user_id: String,
    #[serde(rename = "ResultCode", default)]
    pub result_code: i64,
    #[serde(rename = "ResultInfo", default)]
    pub result_info: String,
    /// `"Imported"` or `"NotImported"`.
    #[serde(rename = "AccountStatus", default)]
    pub account_status: String,
}

impl CheckResult {
    pub fn is_imported(&self) -> bool {
        self.result_code == 0 && self.account_status == "Imported"
    }
}

/// Response from `AccountStatus`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryUserStatusResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    #[serde(rename = "QueryResult", default)]
    pub query_result: Vec<OnlineStatus>,
    #[serde(rename = "ErrorList", default, skip_serializing_if = "Vec::is_empty")]
    pub error_list: Vec<AccountError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnlineStatus {
    #[serde(rename = "To_Account", default)]
    pub to_account: String,
    /// `"Online"`, `"PushOnline"` or `"Offline"`.
    #[serde(rename = "Status", default)]
    pub status: String,
    /// Per-platform detail; present because queries ask for it.
    #[serde(rename = "Detail", default)]
    pub detail: Vec<PlatformStatus>,
}

impl OnlineStatus {
    pub fn is_online(&self) -> bool {
        self.status == "Online"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformStatus {
    #[serde(rename = "Platform", default)]
    pub platform: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

impl_im_response!(
    AccountImportResponse,
    MultiAccountImportResponse,
    AccountDeleteResponse,
    AccountCheckResponse,
    QueryUserStatusResponse,
);
