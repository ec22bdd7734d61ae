//! Shared response contract and helpers used across all domain modules.
//!
//! Every platform response carries the same three status fields:
//!
//! ```json
//! { "ActionStatus": "OK", "ErrorCode": 0, "ErrorInfo": "" }
//! ```
//!
//! Endpoint-specific response types embed them through [`ResponseStatus`] and
//! implement [`ImResponse`].

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ─── ImResponse ──────────────────────────────────────────────────────────────

/// Contract every decoded response satisfies.
///
/// **A non-zero [`error_code`](ImResponse::error_code) is not turned into an
/// `Err`.** The dispatcher only fails on transport problems; a call the
/// platform rejected still returns `Ok(response)`. Callers that need hard
/// failure must check [`is_ok`](ImResponse::is_ok) themselves.
pub trait ImResponse: Serialize + DeserializeOwned {
    /// Platform status code; `0` means success.
    fn error_code(&self) -> i64;

    /// The decoded response as JSON, for diagnostics.
    fn raw(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn is_ok(&self) -> bool {
        self.error_code() == 0
    }
}

/// Untyped responses: the code is read from the `ErrorCode` key, absent means 0.
impl ImResponse for serde_json::Value {
    fn error_code(&self) -> i64 {
        self.get("ErrorCode")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0)
    }

    fn raw(&self) -> serde_json::Value {
        self.clone()
    }
}

/// Implements [`ImResponse`] for structs with a flattened `status: ResponseStatus`.
macro_rules! impl_im_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::shared::ImResponse for $ty {
                fn error_code(&self) -> i64 {
                    self.status.error_code
                }
            }
        )+
    };
}
pub(crate) use impl_im_response;

/// Status fields common to every response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseStatus {
    /// `"OK"` or `"FAIL"`.
    #[serde(rename = "ActionStatus", default)]
    pub action_status: String,
    #[serde(rename = "ErrorCode", default)]
    pub error_code: i64,
    #[serde(rename = "ErrorInfo", default)]
    pub error_info: String,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonResponse {
    #[serde(flatten)]
    pub status: ResponseStatus,
    /// Detailed, user-facing error text some endpoints add on failure.
    #[serde(
        rename = "ErrorDisplay",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_display: Option<String>,
}

impl_im_response!(CommonResponse);

/// Per-account failure entry returned by batch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountError {
    #[serde(rename = "To_Account")]
    pub to_account: String,
    #[serde(rename = "ErrorCode")]
    pub error_code: i64,
}

// ─── Randomness ──────────────────────────────────────────────────────────────

/// A string of `len` random decimal digits.
pub fn random_digits(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Fresh per-message disambiguator (`MsgRandom`).
pub fn msg_random() -> u32 {
    rand::random()
}
