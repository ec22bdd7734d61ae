//! HMAC-SHA256 UserSig (TLS sig v2).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::auth::{check_expiry, check_field, decode_document, encode_document, UserSigner};
use crate::error::SignError;

const VERSION: &str = "2.0";

#[derive(Debug, Serialize, Deserialize)]
struct SigDocument {
    #[serde(rename = "TLS.ver")]
    ver: String,
    #[serde(rename = "TLS.identifier")]
    identifier: String,
    #[serde(rename = "TLS.sdkappid")]
    sdk_app_id: u64,
    #[serde(rename = "TLS.expire")]
    expire: i64,
    #[serde(rename = "TLS.time")]
    time: i64,
    #[serde(rename = "TLS.sig")]
    sig: String,
}

/// Signs with the app's symmetric secret key.
#[derive(Clone)]
pub struct HmacSigner {
    app_id: u64,
    key: String,
}

impl HmacSigner {
    pub fn new(app_id: u64, key: &str) -> Self {
        Self {
            app_id,
            key: key.to_string(),
        }
    }

    /// Issue a token as if it were `now`.
    pub fn gen_user_sig_at(
        &self,
        identifier: &str,
        expire: u64,
        now: DateTime<Utc>,
    ) -> Result<String, SignError> {
        let expire = i64::try_from(expire)
            .map_err(|_| SignError::Malformed(format!("expire out of range: {}", expire)))?;
        let time = now.timestamp();
        let mac = self.mac(identifier, time, expire)?;

        encode_document(&SigDocument {
            ver: VERSION.to_string(),
            identifier: identifier.to_string(),
            sdk_app_id: self.app_id,
            expire,
            time,
            sig: STANDARD.encode(mac.finalize().into_bytes()),
        })
    }

    fn mac(&self, identifier: &str, time: i64, expire: i64) -> Result<Hmac<Sha256>, SignError> {
        if self.key.is_empty() {
            return Err(SignError::MissingKey("HMAC-SHA256"));
        }
        let content = format!(
            "TLS.identifier:{}\nTLS.sdkappid:{}\nTLS.time:{}\nTLS.expire:{}\n",
            identifier, self.app_id, time, expire
        );
        let mut mac = Hmac::<Sha256>::new_from_slice(self.key.as_bytes())
            .map_err(|e| SignError::InvalidKey(e.to_string()))?;
        mac.update(content.as_bytes());
        Ok(mac)
    }
}

impl UserSigner for HmacSigner {
    fn gen_user_sig(&self, identifier: &str, expire: u64) -> Result<String, SignError> {
        self.gen_user_sig_at(identifier, expire, Utc::now())
    }

    fn verify_user_sig(
        &self,
        identifier: &str,
        user_sig: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SignError> {
        let doc: SigDocument = decode_document(user_sig)?;
        check_field("version", VERSION, &doc.ver)?;
        check_field("identifier", identifier, &doc.identifier)?;
        check_field("sdkappid", &self.app_id.to_string(), &doc.sdk_app_id.to_string())?;
        check_expiry(doc.time, doc.expire, now)?;

        let raw_sig = STANDARD
            .decode(&doc.sig)
            .map_err(|e| SignError::Malformed(format!("TLS.sig: {}", e)))?;
        self.mac(&doc.identifier, doc.time, doc.expire)?
            .verify_slice(&raw_sig)
            .map_err(|_| SignError::SignatureVerificationFailed)
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}
