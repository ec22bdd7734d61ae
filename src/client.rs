//! High-level client: `ImClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared dispatcher and accessor methods.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{SignerSet, UserSigCache, UserSigner};
use crate::config::{ImConfig, SignScheme};
use crate::domain::account::client::Accounts;
use crate::domain::message::client::Messages;
use crate::domain::profile::client::Profiles;
use crate::domain::session::client::Sessions;
use crate::error::SdkError;
use crate::http::{HttpConfig, ImHttp};

// Re-export sub-client types for convenience.
pub use crate::domain::account::client::Accounts as AccountsClient;
pub use crate::domain::message::client::Messages as MessagesClient;
pub use crate::domain::profile::client::Profiles as ProfilesClient;
pub use crate::domain::session::client::Sessions as SessionsClient;

/// The primary entry point for the IM REST API.
///
/// Provides nested sub-client accessors for each domain:
/// `client.messages()`, `client.accounts()`, etc.
///
/// Cheap to clone; clones share the connection pool and the admin UserSig.
/// Independently built clients share nothing.
#[derive(Clone)]
pub struct ImClient {
    pub(crate) http: ImHttp,
    pub(crate) config: Arc<ImConfig>,
}

impl ImClient {
    pub fn builder() -> ImClientBuilder {
        ImClientBuilder::default()
    }

    /// Client for `config` with default transport settings.
    pub fn new(config: ImConfig) -> Result<Self, SdkError> {
        Self::builder().config(config).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn messages(&self) -> Messages<'_> {
        Messages { client: self }
    }

    pub fn sessions(&self) -> Sessions<'_> {
        Sessions { client: self }
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    pub fn profiles(&self) -> Profiles<'_> {
        Profiles { client: self }
    }

    // ── Low-level access ─────────────────────────────────────────────────

    /// The signed-request dispatcher, for operations without a typed method.
    pub fn http(&self) -> &ImHttp {
        &self.http
    }

    pub fn config(&self) -> &ImConfig {
        &self.config
    }

    // ── UserSig ──────────────────────────────────────────────────────────

    /// Issue a UserSig for an end user, e.g. to hand to a mobile client.
    /// Not cached.
    pub async fn user_sig(&self, identifier: &str) -> Result<String, SdkError> {
        if identifier.is_empty() {
            return Err(SdkError::Validation("missing identifier".to_string()));
        }
        Ok(self.http.user_sig().user_sig_for(identifier).await?)
    }

    pub async fn sign_scheme(&self) -> SignScheme {
        self.http.user_sig().scheme().await
    }

    /// Switch the signing scheme. The admin token is regenerated on the next call.
    pub async fn set_sign_scheme(&self, scheme: SignScheme) {
        tracing::info!(scheme = %scheme, "switching usersig scheme");
        self.http.user_sig().set_scheme(scheme).await;
    }

    /// Drop the cached admin token, e.g. after the key was rotated.
    pub async fn invalidate_user_sig(&self) {
        self.http.user_sig().invalidate().await;
    }
}

impl std::fmt::Debug for ImClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImClient")
            .field("http", &self.http)
            .field("config", &self.config)
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct ImClientBuilder {
    config: Option<ImConfig>,
    http: HttpConfig,
    signers: Vec<(SignScheme, Arc<dyn UserSigner>)>,
}

impl ImClientBuilder {
    pub fn config(mut self, config: ImConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overall request timeout. Default 3 s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Connection timeout. Default 3 s.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http.connect_timeout = timeout;
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.http.pool_max_idle_per_host = max;
        self
    }

    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.http.pool_idle_timeout = timeout;
        self
    }

    /// Use `signer` for `scheme` instead of the built-in one.
    pub fn signer(mut self, scheme: SignScheme, signer: Arc<dyn UserSigner>) -> Self {
        self.signers.push((scheme, signer));
        self
    }

    pub fn build(self) -> Result<ImClient, SdkError> {
        let config = self
            .config
            .ok_or_else(|| SdkError::Config("missing ImConfig".to_string()))?;
        if config.identifier.is_empty() {
            return Err(SdkError::Config(
                "administrator identifier is empty".to_string(),
            ));
        }

        let mut signers = SignerSet::from_config(&config);
        for (scheme, signer) in self.signers {
            signers.insert(scheme, signer);
        }
        let cache = UserSigCache::new(&config.identifier, config.expire, config.use_sha, signers);
        let http = ImHttp::new(&config.im_host, config.app_id, cache, &self.http)?;

        tracing::debug!(
            host = %config.im_host,
            app_id = config.app_id,
            scheme = %config.use_sha,
            "IM client built"
        );
        Ok(ImClient {
            http,
            config: Arc::new(config),
        })
    }
}
