//! ECDSA-SHA256 UserSig (legacy TLS sig v1, secp256k1 key pairs).
//!
//! Only available with the `ecdsa` feature.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use k256::SecretKey;
use serde::{Deserialize, Serialize};

use crate::auth::{check_expiry, check_field, decode_document, encode_document, UserSigner};
use crate::error::SignError;

const VERSION: &str = "201512300000";

#[derive(Debug, Serialize, Deserialize)]
struct SigDocument {
    #[serde(rename = "TLS.account_type")]
    account_type: String,
    #[serde(rename = "TLS.identifier")]
    identifier: String,
    #[serde(rename = "TLS.appid_at_3rd")]
    appid_at_3rd: String,
    #[serde(rename = "TLS.sdk_appid")]
    sdk_app_id: String,
    #[serde(rename = "TLS.expire_after")]
    expire_after: String,
    #[serde(rename = "TLS.version")]
    version: String,
    #[serde(rename = "TLS.time")]
    time: String,
    #[serde(rename = "TLS.sig")]
    sig: String,
}

impl SigDocument {
    fn content(&self) -> String {
        format!(
            "TLS.appid_at_3rd:{}\nTLS.account_type:{}\nTLS.identifier:{}\nTLS.sdk_appid:{}\nTLS.time:{}\nTLS.expire_after:{}\n",
            self.appid_at_3rd,
            self.account_type,
            self.identifier,
            self.sdk_app_id,
            self.time,
            self.expire_after
        )
    }
}

/// Signs with the app's ECDSA private key; verifies with its public key.
///
/// PEM material is parsed on every use.
#[derive(Clone)]
pub struct EcdsaSigner {
    app_id: u64,
    private_key: String,
    public_key: String,
}

impl EcdsaSigner {
    pub fn new(app_id: u64, private_key: &str, public_key: &str) -> Self {
        Self {
            app_id,
            private_key: private_key.to_string(),
            public_key: public_key.to_string(),
        }
    }

    /// Issue a token as if it were `now`.
    pub fn gen_user_sig_at(
        &self,
        identifier: &str,
        expire: u64,
        now: DateTime<Utc>,
    ) -> Result<String, SignError> {
        let key = self.signing_key()?;
        let mut doc = SigDocument {
            account_type: "0".to_string(),
            identifier: identifier.to_string(),
            appid_at_3rd: "0".to_string(),
            sdk_app_id: self.app_id.to_string(),
            expire_after: expire.to_string(),
            version: VERSION.to_string(),
            time: now.timestamp().to_string(),
            sig: String::new(),
        };
        let signature: Signature = key.sign(doc.content().as_bytes());
        doc.sig = STANDARD.encode(signature.to_der().as_bytes());
        encode_document(&doc)
    }

    fn signing_key(&self) -> Result<SigningKey, SignError> {
        if self.private_key.trim().is_empty() {
            return Err(SignError::MissingKey("ECDSA-SHA256 private key"));
        }
        SigningKey::from_pkcs8_pem(&self.private_key)
            .or_else(|_| {
                // OpenSSL-style keys may carry an `EC PARAMETERS` block first.
                let sec1 = pem_block(&self.private_key, "EC PRIVATE KEY");
                SecretKey::from_sec1_pem(sec1).map(SigningKey::from)
            })
            .map_err(|e| SignError::InvalidKey(e.to_string()))
    }

    fn verifying_key(&self) -> Result<VerifyingKey, SignError> {
        if self.public_key.trim().is_empty() {
            return Err(SignError::MissingKey("ECDSA-SHA256 public key"));
        }
        VerifyingKey::from_public_key_pem(&self.public_key)
            .map_err(|e| SignError::InvalidKey(e.to_string()))
    }
}

impl UserSigner for EcdsaSigner {
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
        check_field("identifier", identifier, &doc.identifier)?;
        check_field("sdk_appid", &self.app_id.to_string(), &doc.sdk_app_id)?;

        let time: i64 = doc
            .time
            .parse()
            .map_err(|_| SignError::Malformed(format!("TLS.time: {}", doc.time)))?;
        let expire: i64 = doc
            .expire_after
            .parse()
            .map_err(|_| SignError::Malformed(format!("TLS.expire_after: {}", doc.expire_after)))?;
        check_expiry(time, expire, now)?;

        let der = STANDARD
            .decode(&doc.sig)
            .map_err(|e| SignError::Malformed(format!("TLS.sig: {}", e)))?;
        let signature =
            Signature::from_der(&der).map_err(|e| SignError::Malformed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);

        self.verifying_key()?
            .verify(doc.content().as_bytes(), &signature)
            .map_err(|_| SignError::SignatureVerificationFailed)
    }
}

impl std::fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

/// The `label` block of a multi-block PEM string, or the whole input.
fn pem_block<'a>(pem: &'a str, label: &str) -> &'a str {
    let begin = format!("-----BEGIN {}-----", label);
    match pem.find(&begin) {
        Some(start) => pem[start..].trim(),
        None => pem.trim(),
    }
}
