//! Low-level request dispatcher: `ImHttp`.
//!
//! One generic entry point, [`ImHttp::send`], serves every operation: resolve
//! the operation's path, attach the admin UserSig, POST the JSON payload and
//! decode the JSON response. The domain sub-clients wrap it.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;

use crate::auth::UserSigCache;
use crate::error::{HttpError, SdkError};
use crate::http::endpoint::{self, AuthParams};
use crate::network::{DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_TIMEOUT};
use crate::shared::ImResponse;

/// Transport settings for [`ImHttp`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Time allowed to establish the connection (TCP + TLS).
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, headers and body included.
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }
}

/// Signed-request dispatcher for the IM REST API.
///
/// Cheap to clone: clones share the connection pool and the UserSig cache.
#[derive(Clone)]
pub struct ImHttp {
    host: String,
    app_id: u64,
    client: Client,
    user_sig: UserSigCache,
}

impl ImHttp {
    pub fn new(
        host: &str,
        app_id: u64,
        user_sig: UserSigCache,
        config: &HttpConfig,
    ) -> Result<Self, SdkError> {
        let parsed = reqwest::Url::parse(host)
            .map_err(|e| SdkError::Config(format!("invalid IM host {:?}: {}", host, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(SdkError::Config(format!("invalid IM host {:?}", host)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()
            .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            app_id,
            client,
            user_sig,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user_sig(&self) -> &UserSigCache {
        &self.user_sig
    }

    /// Fully authenticated URL for one call of `operation`.
    pub async fn url_for(&self, operation: &str) -> Result<String, SdkError> {
        let path = endpoint::resolve(operation)?;
        let user_sig = self.user_sig.get().await;
        Ok(endpoint::compose_url(
            &self.host,
            path,
            AuthParams {
                app_id: self.app_id,
                identifier: self.user_sig.identifier(),
                user_sig: &user_sig,
            },
        ))
    }

    /// Dispatch `operation` with `body` and decode the response as `R`.
    ///
    /// # Errors
    ///
    /// - [`SdkError::UnknownOperation`] before any network activity.
    /// - [`SdkError::Http`] for transport failures: timeouts, connection
    ///   errors, non-2xx statuses, bodies that do not decode as `R`. Nothing is
    ///   retried.
    ///
    /// A response whose `ErrorCode` is non-zero is **not** an error: it is
    /// logged and returned as `Ok`. Check [`ImResponse::is_ok`].
    pub async fn send<R, B>(&self, operation: &str, body: &B) -> Result<R, SdkError>
    where
        R: ImResponse,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(operation).await?;
        let payload = serde_json::to_vec(body)?;

        let resp = match self.do_request::<R>(&url, payload).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(operation, error = %e, "IM request failed");
                return Err(e.into());
            }
        };

        if resp.is_ok() {
            tracing::debug!(operation, "IM request succeeded");
        } else {
            tracing::error!(
                operation,
                error_code = resp.error_code(),
                response = %resp.raw(),
                "IM request rejected by platform"
            );
        }
        Ok(resp)
    }

    /// [`send`](Self::send) into a caller-owned container.
    ///
    /// `container` is only overwritten when a response was received and
    /// decoded; on any error it is left as it was.
    pub async fn send_into<R, B>(
        &self,
        operation: &str,
        body: &B,
        container: &mut R,
    ) -> Result<(), SdkError>
    where
        R: ImResponse,
        B: Serialize + ?Sized,
    {
        *container = self.send(operation, body).await?;
        Ok(())
    }

    async fn do_request<R: ImResponse>(&self, url: &str, payload: Vec<u8>) -> Result<R, HttpError> {
        let resp = self.client.post(url).body(payload).send().await?;
        let status = resp.status();

        if status.is_success() {
            let bytes = resp.bytes().await?;
            return serde_json::from_slice::<R>(&bytes).map_err(|e| {
                HttpError::Decode(format!("{}: {}", e, String::from_utf8_lossy(&bytes)))
            });
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl std::fmt::Debug for ImHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImHttp")
            .field("host", &self.host)
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}
