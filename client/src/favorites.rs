//! Saved listings. Every call is guarded client-side: without a session the
//! backend would 401 anyway, and the surfaces want a login prompt rather
//! than a round-trip.

use crate::transport::{decode_ack, decode_data};
use crate::{ApiClient, ApiError, Notice};
use motorlot_types::{Car, CarId, Favorite, Route};

/// `/favorites`.
pub struct FavoritesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FavoritesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Warn-and-redirect instead of issuing a request that cannot succeed.
    /// No network traffic happens on this path.
    fn require_session(&self) -> Result<(), ApiError> {
        if self.client.session().is_authenticated() {
            return Ok(());
        }
        self.client.notices().emit(Notice::LoginRequired);
        self.client.session().navigate(Route::Login);
        Err(ApiError::LoginRequired)
    }

    pub async fn add(&self, car_id: CarId) -> Result<Favorite, ApiError> {
        self.require_session()?;
        let path = format!("/favorites/{car_id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().post(&url))
            .await?;
        decode_data(response).await
    }

    pub async fn remove(&self, car_id: CarId) -> Result<String, ApiError> {
        self.require_session()?;
        let path = format!("/favorites/{car_id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().delete(&url))
            .await?;
        decode_ack(response).await
    }

    /// The bare (user, car) pairs.
    pub async fn list(&self) -> Result<Vec<Favorite>, ApiError> {
        self.require_session()?;
        let path = "/favorites";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || self.client.http().get(&url))
            .await?;
        decode_data(response).await
    }

    /// Full car listings for the favorites page.
    pub async fn list_with_details(&self) -> Result<Vec<Car>, ApiError> {
        self.require_session()?;
        let path = "/favorites/with-details";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || self.client.http().get(&url))
            .await?;
        decode_data(response).await
    }
}
