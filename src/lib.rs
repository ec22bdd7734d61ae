//! # Tencent IM server SDK
//!
//! A server-side client for the Tencent Cloud IM REST API (v4). Every call is
//! a signed HTTPS POST made as the configured administrator account.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Configuration, errors, the shared response contract
//! 2. **Auth**: UserSig signing (HMAC-SHA256 / ECDSA-SHA256) and the admin token cache
//! 3. **HTTP API**: `ImHttp` with the operation table and URL signing
//! 4. **High-Level Client**: `ImClient` with nested sub-clients per domain
//!
//! ## Platform errors are not `Err`
//!
//! A call only fails on transport problems: timeouts, connection errors,
//! non-2xx statuses, undecodable bodies. When the platform answers with a
//! non-zero `ErrorCode` the SDK logs it and still returns `Ok(response)`.
//! Check [`shared::ImResponse::is_ok`] on every response that matters.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tencent_im::prelude::*;
//!
//! let client = ImClient::new(ImConfig::hmac(1400000000, "administrator", "secret"))?;
//!
//! let resp = client
//!     .messages()
//!     .send("alice", "bob", MsgContent::text("hello"), SendOptions::default())
//!     .await?;
//! if !resp.is_ok() {
//!     eprintln!("rejected: {}", resp.status.error_info);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Client configuration and the signing scheme selector.
pub mod config;

/// Response contract and helpers shared by all domains.
pub mod shared;

/// Domain modules (vertical slices): caller types, wire types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Hosts and transport defaults.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// UserSig generation, verification and caching.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Signed-request dispatcher and operation table.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `ImClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Configuration
    pub use crate::config::{ImConfig, SignScheme};

    // Shared response contract
    pub use crate::shared::{AccountError, CommonResponse, ImResponse, ResponseStatus};

    // Domain types: messages
    pub use crate::domain::message::{
        AndroidPushInfo, ApnsPushInfo, BatchSendMsgResponse, ForbidCallbackControl,
        HistoryMessageResponse, HistoryMsg, HistoryQuery, MsgContent, OfflinePushInfo,
        RawMsgBody, SendMsgControl, SendMsgResponse, SendOptions, SyncOtherMachine,
        UnreadMsgNumResponse,
    };

    // Domain types: sessions
    pub use crate::domain::session::{
        SessionCursor, SessionItem, SessionListResponse, SessionTarget,
    };

    // Domain types: accounts
    pub use crate::domain::account::{
        AccountCheckResponse, AccountDeleteResponse, AccountImportResponse,
        MultiAccountImportResponse, OnlineStatus, QueryUserStatusResponse,
    };

    // Domain types: profiles
    pub use crate::domain::profile::{PortraitGetResponse, ProfileItem, UserProfileItem};

    // Errors
    pub use crate::error::{HttpError, SdkError, SignError};

    // Network
    pub use crate::network::{DEFAULT_IM_HOST, SINGAPORE_IM_HOST};

    // Auth
    pub use crate::auth::{HmacSigner, UserSigner};
    #[cfg(feature = "ecdsa")]
    pub use crate::auth::EcdsaSigner;

    // HTTP client + sub-clients
    pub use crate::client::{
        AccountsClient, ImClient, ImClientBuilder, MessagesClient, ProfilesClient,
        SessionsClient,
    };
    pub use crate::http::{HttpConfig, ImHttp};
}
