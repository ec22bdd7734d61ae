//! Network URL constants and transport defaults for the Tencent IM REST API.

use std::time::Duration;

/// Default REST API host (mainland China). No trailing slash.
pub const DEFAULT_IM_HOST: &str = "https://console.tim.qq.com";

/// Singapore region host.
pub const SINGAPORE_IM_HOST: &str = "https://adminapisgp.im.qcloud.com";

/// Connect and whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Idle keep-alive connections kept per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 50;

/// How long an idle pooled connection is kept.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default UserSig lifetime: 180 days.
pub const DEFAULT_SIG_EXPIRE_SECS: u64 = 86_400 * 180;
