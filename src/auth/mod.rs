//! Authentication: UserSig generation, verification and caching.
//!
//! Every REST call is made as the configured administrator and carries a
//! `usersig` query parameter: a signed, time-bounded credential for that
//! identity. Two interchangeable schemes exist ([`SignScheme`]); both produce a
//! zlib-compressed JSON document encoded with a URL-safe base64 variant
//! (`+` → `*`, `/` → `-`, `=` → `_`).
//!
//! The dispatcher never talks to a scheme directly. It asks
//! [`UserSigCache::get`] for the admin token, which reuses the cached value
//! while it still verifies and regenerates it otherwise.

pub mod cache;
#[cfg(feature = "ecdsa")]
pub mod ecdsa;
pub mod hmac;

pub use cache::UserSigCache;
#[cfg(feature = "ecdsa")]
pub use ecdsa::EcdsaSigner;
pub use hmac::HmacSigner;

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ImConfig, SignScheme};
use crate::error::SignError;

/// A UserSig signing scheme.
///
/// Implementations are CPU-bound and must not block.
pub trait UserSigner: Send + Sync {
    /// Issue a token for `identifier`, valid for `expire` seconds from now.
    fn gen_user_sig(&self, identifier: &str, expire: u64) -> Result<String, SignError>;

    /// Check that `user_sig` was issued for `identifier` by this app and is
    /// still valid at `now`.
    fn verify_user_sig(
        &self,
        identifier: &str,
        user_sig: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SignError>;
}

/// The signer registered for each scheme.
#[derive(Clone, Default)]
pub struct SignerSet {
    signers: HashMap<SignScheme, Arc<dyn UserSigner>>,
}

impl SignerSet {
    /// Built-in signers for the key material present in `config`.
    ///
    /// Keys are not parsed here, so a scheme that is never selected is never
    /// validated.
    pub fn from_config(config: &ImConfig) -> Self {
        let mut set = Self::default();
        set.insert(
            SignScheme::HmacSha256,
            Arc::new(HmacSigner::new(config.app_id, &config.key)),
        );
        #[cfg(feature = "ecdsa")]
        set.insert(
            SignScheme::EcdsaSha256,
            Arc::new(EcdsaSigner::new(
                config.app_id,
                &config.private_key,
                &config.public_key,
            )),
        );
        set
    }

    pub fn insert(&mut self, scheme: SignScheme, signer: Arc<dyn UserSigner>) {
        self.signers.insert(scheme, signer);
    }

    pub fn get(&self, scheme: SignScheme) -> Result<&Arc<dyn UserSigner>, SignError> {
        self.signers
            .get(&scheme)
            .ok_or(SignError::Unsupported(scheme.as_str()))
    }
}

// ─── Token framing ───────────────────────────────────────────────────────────

/// Serialize, zlib-compress and base64url-encode a signature document.
pub(crate) fn encode_document<T: Serialize>(doc: &T) -> Result<String, SignError> {
    let json = serde_json::to_vec(doc).map_err(|e| SignError::Malformed(e.to_string()))?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| SignError::Malformed(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| SignError::Malformed(e.to_string()))?;

    Ok(STANDARD
        .encode(compressed)
        .chars()
        .map(|c| match c {
            '+' => '*',
            '/' => '-',
            '=' => '_',
            other => other,
        })
        .collect())
}

/// Inverse of [`encode_document`].
pub(crate) fn decode_document<T: DeserializeOwned>(user_sig: &str) -> Result<T, SignError> {
    let standard: String = user_sig
        .chars()
        .map(|c| match c {
            '*' => '+',
            '-' => '/',
            '_' => '=',
            other => other,
        })
        .collect();
    let compressed = STANDARD
        .decode(standard)
        .map_err(|e| SignError::Malformed(format!("base64: {}", e)))?;

    let mut json = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut json)
        .map_err(|e| SignError::Malformed(format!("zlib: {}", e)))?;

    serde_json::from_slice(&json).map_err(|e| SignError::Malformed(format!("json: {}", e)))
}

pub(crate) fn check_field(
    field: &'static str,
    expected: &str,
    actual: &str,
) -> Result<(), SignError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SignError::Mismatch {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

pub(crate) fn check_expiry(issued_at: i64, expire: i64, now: DateTime<Utc>) -> Result<(), SignError> {
    if now.timestamp() > issued_at.saturating_add(expire) {
        Err(SignError::Expired)
    } else {
        Ok(())
    }
}
