//! Request transport: CSRF tagging, the single-refresh 401 contract, and
//! the mapping from HTTP outcomes to [`ApiError`] and [`Notice`].
//!
//! # Refresh contract
//!
//! Per logical request:
//!
//! - A 401 from an auth endpoint (`/auth/login`, `/auth/register`,
//!   `/auth/refresh`) passes through unchanged. Refreshing there would loop.
//! - A 401 from anything else triggers exactly one silent
//!   `POST /auth/refresh`. On refresh success the original request is
//!   replayed once and the replay's outcome is final -- a second 401 is not
//!   retried. On refresh failure the session store is cleared, navigation is
//!   pointed at the login surface unless it is already there, and the
//!   original 401 propagates.
//! - Refresh itself is never retried.
//!
//! The "already retried" flag of the original design is structural here:
//! [`ApiClient::execute`] performs at most one refresh-and-replay, so there
//! is no per-request state to track or forget.
//!
//! Concurrent requests do not coordinate: a burst of 401s runs one refresh
//! each. The backend treats refresh as idempotent, so this costs extra
//! round-trips, not correctness.

use crate::{ApiClient, ApiError, Notice};
use futures_util::StreamExt;
use motorlot_types::{Envelope, Route};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

const CSRF_COOKIE: &str = "XSRF-TOKEN";
const CSRF_HEADER: &str = "X-XSRF-TOKEN";

const REFRESH_PATH: &str = "/auth/refresh";

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Auth endpoints are exempt from the refresh contract.
fn is_auth_endpoint(path: &str) -> bool {
    matches!(path, "/auth/login" | "/auth/register" | "/auth/refresh")
}

impl ApiClient {
    /// Send a request through the refresh contract. `build` is invoked once
    /// per attempt so a replay carries the same parameters but fresh
    /// headers; `path` is the API path the request targets.
    pub(crate) async fn execute<F>(&self, path: &str, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let response = self.dispatch(&build).await?;

        if response.status() == StatusCode::UNAUTHORIZED && !is_auth_endpoint(path) {
            tracing::debug!(path, "401 on protected resource, attempting silent refresh");

            if self.refresh_credentials().await {
                let replay = self.dispatch(&build).await?;
                return self.settle(path, replay).await;
            }

            self.expire_session();
            return Err(ApiError::Unauthorized {
                message: envelope_message(response).await,
            });
        }

        self.settle(path, response).await
    }

    /// One attempt: tag with CSRF, send, map transport failure.
    async fn dispatch<F>(&self, build: &F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut request = build();
        if let Some(token) = self.csrf_token() {
            request = request.header(CSRF_HEADER, token);
        }

        match request.send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::debug!(error = %e, "Backend unreachable");
                self.notices().emit(Notice::BackendUnreachable);
                Err(ApiError::Unreachable(e))
            }
        }
    }

    /// Map a settled response. 401 here is terminal: either the target was
    /// an auth endpoint or the request was already replayed once.
    async fn settle(&self, path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(path, "401 not eligible for (another) refresh");
            return Err(ApiError::Unauthorized {
                message: envelope_message(response).await,
            });
        }

        if status == StatusCode::FORBIDDEN {
            self.notices().emit(Notice::PermissionDenied);
            return Err(ApiError::PermissionDenied);
        }

        if status.is_server_error() {
            self.notices()
                .emit(Notice::ServiceUnavailable { status: status.as_u16() });
            return Err(ApiError::ServiceUnavailable {
                status: status.as_u16(),
            });
        }

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message: envelope_message(response).await,
        })
    }

    /// The one silent refresh. Sent outside [`Self::execute`] so it can
    /// never recurse into the contract; any failure counts as a dead
    /// session.
    async fn refresh_credentials(&self) -> bool {
        let mut request = self.http().post(self.endpoint(REFRESH_PATH));
        if let Some(token) = self.csrf_token() {
            request = request.header(CSRF_HEADER, token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Credential refresh succeeded");
                true
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Credential refresh rejected");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "Credential refresh transport failure");
                false
            }
        }
    }

    /// Session is beyond recovery: clear it and point navigation at the
    /// login surface, unless the user is already looking at it.
    fn expire_session(&self) {
        self.session().clear();
        let redirected = !self.session().current_route().is_login();
        if redirected {
            self.session().navigate(Route::Login);
        }
        self.notices().emit(Notice::SessionExpired { redirected });
    }

    /// Value of the XSRF-TOKEN cookie for the backend origin, if the jar
    /// holds one. Absence just omits the header.
    fn csrf_token(&self) -> Option<String> {
        use reqwest::cookie::CookieStore;

        let header = self.jar.cookies(&self.base_url)?;
        let value = header.to_str().ok()?;
        value.split(';').map(str::trim).find_map(|pair| {
            pair.strip_prefix(CSRF_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(ToOwned::to_owned)
        })
    }
}

/// Decode a success envelope and take its data.
pub(crate) async fn decode_data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let envelope: Envelope<T> = response.json().await.map_err(ApiError::UnexpectedBody)?;
    if !envelope.success {
        return Err(ApiError::Rejected {
            status,
            message: envelope.message,
        });
    }
    envelope.data.ok_or(ApiError::MissingData)
}

/// Decode a success envelope for endpoints that return no data, yielding
/// the backend's message.
pub(crate) async fn decode_ack(response: Response) -> Result<String, ApiError> {
    let status = response.status().as_u16();
    let envelope: Envelope<serde_json::Value> =
        response.json().await.map_err(ApiError::UnexpectedBody)?;
    if !envelope.success {
        return Err(ApiError::Rejected {
            status,
            message: envelope.message,
        });
    }
    Ok(envelope.message.unwrap_or_default())
}

/// Best-effort extraction of the envelope message from an error body,
/// reading at most [`MAX_ERROR_BODY_BYTES`].
async fn envelope_message(response: Response) -> Option<String> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            return None;
        }
    }

    serde_json::from_slice::<Envelope<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.message)
}
