//! Typed HTTP client for the Motorlot dealership backend.
//!
//! # Architecture
//!
//! [`ApiClient`] wraps a cookie-carrying `reqwest` client plus the two pieces
//! of client-resident state the backend does not own: the [`SessionStore`]
//! and the current navigation route. Resource modules hang off it:
//!
//! | Accessor | Backend surface |
//! |----------|-----------------|
//! | [`ApiClient::auth`] | `/auth/*`, `/users/profile` |
//! | [`ApiClient::cars`] | public `/cars` catalog |
//! | [`ApiClient::favorites`] | `/favorites` |
//! | [`ApiClient::test_drives`] | `/test-drives` |
//! | [`ApiClient::admin_cars`] | `/admin/cars` and image sub-resources |
//! | [`ApiClient::admin_test_drives`] | `/admin/test-drives` |
//!
//! Every call goes through the transport layer, which owns the one
//! protocol-precise behavior of this client: at most one silent
//! credential refresh per 401, never for the auth endpoints themselves, and
//! a notice channel for the cross-cutting failure classes (session expiry,
//! permission denied, server failure, unreachable backend).
//!
//! # Errors
//!
//! All calls return [`ApiError`]. Business-level rejection messages from the
//! backend envelope pass through verbatim so the calling surface can show
//! them in context; the cross-cutting classes additionally emit a [`Notice`]
//! on the channel handed to [`ApiClient::new`].

mod admin;
mod auth;
mod cars;
mod error;
mod favorites;
mod media;
mod notice;
mod session;
mod test_drives;
mod transport;

pub use admin::{AdminCarsApi, AdminTestDrivesApi, CarDraft, ImageUpload};
pub use auth::{AuthApi, SignIn};
pub use cars::CatalogApi;
pub use error::ApiError;
pub use favorites::FavoritesApi;
pub use notice::{Notice, NoticeSender, notice_channel};
pub use session::SessionStore;
pub use test_drives::TestDrivesApi;

pub use motorlot_config::ClientConfig;
pub use motorlot_types as types;

use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;
const POOL_MAX_IDLE_PER_HOST: usize = 100;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Client for one backend origin. Cheap to clone is a non-goal; create one
/// and hand out references (the resource accessors borrow it).
pub struct ApiClient {
    http: reqwest::Client,
    /// Base URL including the `/api` prefix, no trailing slash.
    base: String,
    /// Same base as a parsed URL, for cookie-jar lookups.
    base_url: Url,
    jar: Arc<Jar>,
    session: SessionStore,
    notices: NoticeSender,
}

impl ApiClient {
    /// Build a client for the configured backend. Notices for the
    /// cross-cutting failure classes go out on `notices`; pass
    /// [`NoticeSender::disabled`] if nothing will listen.
    pub fn new(config: &ClientConfig, notices: NoticeSender) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(ApiError::Build)?;

        let base_url = config.api_base_url().clone();
        let base = base_url.as_str().trim_end_matches('/').to_owned();

        Ok(Self {
            http,
            base,
            base_url,
            jar,
            session: SessionStore::default(),
            notices,
        })
    }

    /// Client-held session and navigation state.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    #[must_use]
    pub fn cars(&self) -> CatalogApi<'_> {
        CatalogApi::new(self)
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesApi<'_> {
        FavoritesApi::new(self)
    }

    #[must_use]
    pub fn test_drives(&self) -> TestDrivesApi<'_> {
        TestDrivesApi::new(self)
    }

    #[must_use]
    pub fn admin_cars(&self) -> AdminCarsApi<'_> {
        AdminCarsApi::new(self)
    }

    #[must_use]
    pub fn admin_test_drives(&self) -> AdminTestDrivesApi<'_> {
        AdminTestDrivesApi::new(self)
    }

    /// Absolute URL for an API path. `path` must start with `/`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        debug_assert!(path.starts_with('/'), "endpoint path must start with '/'");
        format!("{}{}", self.base, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn notices(&self) -> &NoticeSender {
        &self.notices
    }
}
