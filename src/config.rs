//! Client configuration.
//!
//! [`ImConfig`] deserializes from the same JSON shape the platform console
//! settings are usually stored in:
//!
//! ```json
//! {
//!   "appId": 1400000000,
//!   "identifier": "administrator",
//!   "Key": "<hmac secret>",
//!   "useSha": "HMAC-SHA256",
//!   "imHost": "https://console.tim.qq.com",
//!   "expire": 15552000
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::network::{DEFAULT_IM_HOST, DEFAULT_SIG_EXPIRE_SECS};

/// UserSig signing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignScheme {
    /// TLS sig v2, keyed with the app's symmetric secret.
    #[default]
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
    /// Legacy TLS sig v1, signed with the app's ECDSA private key.
    #[serde(rename = "ECDSA-SHA256")]
    EcdsaSha256,
}

impl SignScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha256 => "HMAC-SHA256",
            Self::EcdsaSha256 => "ECDSA-SHA256",
        }
    }
}

impl std::fmt::Display for SignScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable client configuration.
///
/// Only the key material of the selected [`SignScheme`] is ever read. The
/// other scheme's fields may be empty or garbage.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImConfig {
    /// Prefix prepended to local user ids by [`ImConfig::account_id`].
    #[serde(default)]
    pub prefix: String,
    pub app_id: u64,
    /// Administrator account the REST calls are made as.
    pub identifier: String,
    /// HMAC-SHA256 secret.
    #[serde(default, rename = "Key")]
    pub key: String,
    /// ECDSA-SHA256 private key (PEM), used for signing.
    #[serde(default)]
    pub private_key: String,
    /// ECDSA-SHA256 public key (PEM), used for verification.
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub use_sha: SignScheme,
    /// API host without trailing slash.
    #[serde(default = "default_host")]
    pub im_host: String,
    /// UserSig lifetime in seconds.
    #[serde(default = "default_expire")]
    pub expire: u64,
}

fn default_host() -> String {
    DEFAULT_IM_HOST.to_string()
}

fn default_expire() -> u64 {
    DEFAULT_SIG_EXPIRE_SECS
}

impl ImConfig {
    /// HMAC-SHA256 configuration against the default host.
    pub fn hmac(app_id: u64, identifier: &str, key: &str) -> Self {
        Self {
            prefix: String::new(),
            app_id,
            identifier: identifier.to_string(),
            key: key.to_string(),
            private_key: String::new(),
            public_key: String::new(),
            use_sha: SignScheme::HmacSha256,
            im_host: default_host(),
            expire: default_expire(),
        }
    }

    /// ECDSA-SHA256 configuration against the default host.
    pub fn ecdsa(app_id: u64, identifier: &str, private_key: &str, public_key: &str) -> Self {
        Self {
            private_key: private_key.to_string(),
            public_key: public_key.to_string(),
            use_sha: SignScheme::EcdsaSha256,
            key: String::new(),
            ..Self::hmac(app_id, identifier, "")
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.im_host = host.to_string();
        self
    }

    pub fn with_expire(mut self, expire_secs: u64) -> Self {
        self.expire = expire_secs;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Platform account id for a local user id.
    pub fn account_id(&self, local_id: impl std::fmt::Display) -> String {
        format!("{}{}", self.prefix, local_id)
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for ImConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImConfig")
            .field("prefix", &self.prefix)
            .field("app_id", &self.app_id)
            .field("identifier", &self.identifier)
            .field("use_sha", &self.use_sha)
            .field("im_host", &self.im_host)
            .field("expire", &self.expire)
            .finish_non_exhaustive()
    }
}
