//! Account domain: importing, deleting and inspecting IM accounts.

pub mod client;
pub mod wire;

pub use wire::{
    AccountCheckResponse, AccountDeleteResponse, AccountImportResponse, CheckResult,
    DeleteResult, MultiAccountImportResponse, OnlineStatus, PlatformStatus,
    QueryUserStatusResponse,
};

/// Maximum accounts per batch call.
pub const MAX_BATCH_ACCOUNTS: usize = 100;

/// Maximum accounts per online status query.
pub const MAX_STATUS_ACCOUNTS: usize = 500;
