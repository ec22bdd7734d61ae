//! Administrator UserSig cache.

use std::sync::Arc;

use async_lock::RwLock;
use chrono::{DateTime, Utc};

use crate::auth::SignerSet;
use crate::config::SignScheme;
use crate::error::SignError;

/// Tokens this short are treated as absent rather than verified.
const MIN_SIG_LEN: usize = 10;

#[derive(Debug, Clone)]
struct CachedSig {
    sig: String,
    scheme: SignScheme,
    generated_at: DateTime<Utc>,
}

impl CachedSig {
    fn is_candidate(&self, scheme: SignScheme, expire: u64, now: DateTime<Utc>) -> bool {
        let expire = i64::try_from(expire).unwrap_or(i64::MAX);
        self.sig.len() > MIN_SIG_LEN
            && self.scheme == scheme
            && self.generated_at.timestamp().saturating_add(expire) > now.timestamp()
    }
}

/// Holds the administrator's UserSig and re-derives it when absent or stale.
///
/// Clones share the cached value. Concurrent callers may both regenerate;
/// the last write wins and the value is always replaced whole.
#[derive(Clone)]
pub struct UserSigCache {
    identifier: String,
    expire: u64,
    signers: SignerSet,
    scheme: Arc<RwLock<SignScheme>>,
    cached: Arc<RwLock<Option<CachedSig>>>,
}

impl UserSigCache {
    pub fn new(identifier: &str, expire: u64, scheme: SignScheme, signers: SignerSet) -> Self {
        Self {
            identifier: identifier.to_string(),
            expire,
            signers,
            scheme: Arc::new(RwLock::new(scheme)),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Administrator identity the cached token is issued for.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub async fn scheme(&self) -> SignScheme {
        *self.scheme.read().await
    }

    /// Switch schemes. The next [`get`](Self::get) regenerates.
    pub async fn set_scheme(&self, scheme: SignScheme) {
        *self.scheme.write().await = scheme;
    }

    /// Drop the cached token.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// A currently valid admin token.
    ///
    /// Never fails: signing errors are logged and yield an empty string, which
    /// the platform then rejects through the normal response path.
    pub async fn get(&self) -> String {
        let scheme = self.scheme().await;
        let signer = match self.signers.get(scheme) {
            Ok(signer) => signer,
            Err(e) => {
                tracing::error!(scheme = %scheme, error = %e, "no usersig signer for scheme");
                return String::new();
            }
        };

        let now = Utc::now();
        {
            let cached = self.cached.read().await;
            if let Some(c) = cached.as_ref() {
                if c.is_candidate(scheme, self.expire, now) {
                    match signer.verify_user_sig(&self.identifier, &c.sig, now) {
                        Ok(()) => return c.sig.clone(),
                        Err(e) => {
                            tracing::warn!(
                                identifier = %self.identifier,
                                error = %e,
                                "cached usersig failed verification, regenerating"
                            );
                        }
                    }
                }
            }
        }

        match signer.gen_user_sig(&self.identifier, self.expire) {
            Ok(sig) => {
                tracing::debug!(identifier = %self.identifier, scheme = %scheme, "generated admin usersig");
                *self.cached.write().await = Some(CachedSig {
                    sig: sig.clone(),
                    scheme,
                    generated_at: now,
                });
                sig
            }
            Err(e) => {
                tracing::error!(
                    identifier = %self.identifier,
                    scheme = %scheme,
                    error = %e,
                    "failed to generate admin usersig"
                );
                *self.cached.write().await = None;
                String::new()
            }
        }
    }

    /// Issue an uncached token for an arbitrary end user.
    pub async fn user_sig_for(&self, identifier: &str) -> Result<String, SignError> {
        let scheme = self.scheme().await;
        self.signers
            .get(scheme)?
            .gen_user_sig(identifier, self.expire)
            .inspect_err(|e| {
                tracing::error!(identifier, scheme = %scheme, error = %e, "failed to generate usersig");
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::UserSigner;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Counts generations; verification outcome is switchable.
    #[derive(Default)]
    pub(crate) struct CountingSigner {
        pub generated: AtomicUsize,
        pub verified: AtomicUsize,
        pub reject: AtomicBool,
        pub fail_generation: AtomicBool,
    }

    impl UserSigner for CountingSigner {
        fn gen_user_sig(&self, identifier: &str, expire: u64) -> Result<String, SignError> {
            if self.fail_generation.load(Ordering::SeqCst) {
                return Err(SignError::MissingKey("test"));
            }
            let n = self.generated.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("sig-{}-{}-{:04}", identifier, expire, n))
        }

        fn verify_user_sig(
            &self,
            _identifier: &str,
            _user_sig: &str,
            _now: DateTime<Utc>,
        ) -> Result<(), SignError> {
            self.verified.fetch_add(1, Ordering::SeqCst);
            if self.reject.load(Ordering::SeqCst) {
                Err(SignError::SignatureVerificationFailed)
            } else {
                Ok(())
            }
        }
    }

    fn cache_with(signer: Arc<CountingSigner>, expire: u64) -> UserSigCache {
        let mut signers = SignerSet::default();
        signers.insert(SignScheme::HmacSha256, signer);
        UserSigCache::new("administrator", expire, SignScheme::HmacSha256, signers)
    }

    #[tokio::test]
    async fn test_reuses_token_within_window() {
        let signer = Arc::new(CountingSigner::default());
        let cache = cache_with(signer.clone(), 3600);

        let first = cache.get().await;
        for _ in 0..10 {
            assert_eq!(cache.get().await, first);
        }
        assert_eq!(signer.generated.load(Ordering::SeqCst), 1);
        assert_eq!(signer.verified.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_regenerates_once_after_failed_verification() {
        let signer = Arc::new(CountingSigner::default());
        let cache = cache_with(signer.clone(), 3600);

        let first = cache.get().await;
        signer.reject.store(true, Ordering::SeqCst);
        let second = cache.get().await;
        assert_ne!(first, second);
        assert_eq!(signer.generated.load(Ordering::SeqCst), 2);

        signer.reject.store(false, Ordering::SeqCst);
        assert_eq!(cache.get().await, second);
        assert_eq!(signer.generated.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_token_regenerated_without_verifying() {
        let signer = Arc::new(CountingSigner::default());
        let cache = cache_with(signer.clone(), 0);

        cache.get().await;
        cache.get().await;
        assert_eq!(signer.generated.load(Ordering::SeqCst), 2);
        assert_eq!(signer.verified.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_yields_empty_token() {
        let signer = Arc::new(CountingSigner::default());
        signer.fail_generation.store(true, Ordering::SeqCst);
        let cache = cache_with(signer.clone(), 3600);

        assert_eq!(cache.get().await, "");

        signer.fail_generation.store(false, Ordering::SeqCst);
        assert!(!cache.get().await.is_empty());
        assert_eq!(signer.generated.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_scheme_yields_empty_token() {
        let cache = UserSigCache::new(
            "administrator",
            3600,
            SignScheme::EcdsaSha256,
            SignerSet::default(),
        );
        assert_eq!(cache.get().await, "");
        assert!(cache.user_sig_for("alice").await.is_err());
    }

    #[tokio::test]
    async fn test_scheme_switch_regenerates() {
        let hmac = Arc::new(CountingSigner::default());
        let ecdsa = Arc::new(CountingSigner::default());
        let mut signers = SignerSet::default();
        signers.insert(SignScheme::HmacSha256, hmac.clone());
        signers.insert(SignScheme::EcdsaSha256, ecdsa.clone());
        let cache = UserSigCache::new("administrator", 3600, SignScheme::HmacSha256, signers);

        cache.get().await;
        cache.set_scheme(SignScheme::EcdsaSha256).await;
        cache.get().await;
        cache.get().await;
        assert_eq!(hmac.generated.load(Ordering::SeqCst), 1);
        assert_eq!(ecdsa.generated.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_user_sig_not_cached() {
        let signer = Arc::new(CountingSigner::default());
        let cache = cache_with(signer.clone(), 3600);

        let a = cache.user_sig_for("alice").await.unwrap();
        let b = cache.user_sig_for("alice").await.unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("sig-alice-3600"));
        assert_eq!(signer.generated.load(Ordering::SeqCst), 2);

        // The admin slot is untouched.
        cache.get().await;
        assert_eq!(signer.generated.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_concurrent_callers_always_get_usable_token() {
        let signer = Arc::new(CountingSigner::default());
        let cache = cache_with(signer.clone(), 3600);

        let mut handles = Vec::new();
        for _ in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.get().await }));
        }
        for handle in handles {
            let sig = handle.await.unwrap();
            assert!(sig.starts_with("sig-administrator-3600-"));
        }
        assert!(signer.generated.load(Ordering::SeqCst) >= 1);
    }
}
