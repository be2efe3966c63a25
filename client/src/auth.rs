//! Authentication and profile calls, plus the chained sign-in flow.

use crate::transport::{decode_ack, decode_data};
use crate::{ApiClient, ApiError};
use motorlot_types::{Route, UserProfile};
use serde::Serialize;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    full_name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileBody<'a> {
    full_name: &'a str,
}

/// Result of the full sign-in flow: who signed in and where the surface
/// should land.
#[derive(Debug, Clone, PartialEq)]
pub struct SignIn {
    pub user: UserProfile,
    pub destination: Route,
}

/// `/auth/*` and `/users/profile`.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Authenticate. On success the backend installs HttpOnly auth cookies
    /// in the jar; the session store is not touched until a profile is
    /// fetched. Returns the backend's ack message.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let path = "/auth/login";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || {
                self.client
                    .http()
                    .post(&url)
                    .json(&LoginBody { email, password })
            })
            .await?;
        decode_ack(response).await
    }

    /// The chained flow the login surface runs: authenticate, then fetch
    /// the profile, then decide the landing route by role. Each step only
    /// starts after the previous one succeeded.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, ApiError> {
        self.login(email, password).await?;
        let user = self.me().await?;

        let destination = user.role.landing_route();
        self.client.session().navigate(destination);
        tracing::debug!(role = %user.role, destination = %destination, "Signed in");

        Ok(SignIn { user, destination })
    }

    /// Clear auth cookies server-side and drop the local session.
    pub async fn logout(&self) -> Result<String, ApiError> {
        let path = "/auth/logout";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || self.client.http().post(&url))
            .await?;
        let ack = decode_ack(response).await?;

        self.client.session().clear();
        self.client.session().navigate(Route::Home);
        Ok(ack)
    }

    /// Create an account. Does not sign in.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let path = "/auth/register";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || {
                self.client.http().post(&url).json(&RegisterBody {
                    full_name,
                    email,
                    password,
                })
            })
            .await?;
        decode_ack(response).await
    }

    /// Fetch the authenticated profile and install it in the session
    /// store.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let path = "/auth/me";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || self.client.http().get(&url))
            .await?;
        let user: UserProfile = decode_data(response).await?;

        self.client.session().set_auth(user.clone());
        Ok(user)
    }

    /// Rename the account and refresh the stored profile.
    pub async fn update_profile(&self, full_name: &str) -> Result<UserProfile, ApiError> {
        let path = "/users/profile";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || {
                self.client
                    .http()
                    .patch(&url)
                    .json(&UpdateProfileBody { full_name })
            })
            .await?;
        let user: UserProfile = decode_data(response).await?;

        self.client.session().update_user(user.clone());
        Ok(user)
    }
}
