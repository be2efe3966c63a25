//! Customer test-drive bookings.

use crate::transport::{decode_ack, decode_data};
use crate::{ApiClient, ApiError, Notice};
use chrono::NaiveDateTime;
use motorlot_types::{Booking, BookingId, CarId, Route};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookBody {
    car_id: CarId,
    /// Local dealership time, serialized without a zone.
    appointment_date: NaiveDateTime,
}

/// `/test-drives`.
pub struct TestDrivesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TestDrivesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn require_session(&self) -> Result<(), ApiError> {
        if self.client.session().is_authenticated() {
            return Ok(());
        }
        self.client.notices().emit(Notice::LoginRequired);
        self.client.session().navigate(Route::Login);
        Err(ApiError::LoginRequired)
    }

    /// Book a slot. The backend rejects unavailable cars and taken slots
    /// with a message that passes through verbatim.
    pub async fn book(
        &self,
        car_id: CarId,
        appointment_date: NaiveDateTime,
    ) -> Result<Booking, ApiError> {
        self.require_session()?;
        let path = "/test-drives";
        let url = self.client.endpoint(path);
        let body = BookBody {
            car_id,
            appointment_date,
        };
        let response = self
            .client
            .execute(path, || self.client.http().post(&url).json(&body))
            .await?;
        decode_data(response).await
    }

    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.require_session()?;
        let path = "/test-drives/my-bookings";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || self.client.http().get(&url))
            .await?;
        decode_data(response).await
    }

    /// Cancel a booking. Only PENDING bookings are cancellable; anything
    /// else is rejected server-side.
    pub async fn cancel(&self, id: BookingId) -> Result<String, ApiError> {
        self.require_session()?;
        let path = format!("/test-drives/{id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().delete(&url))
            .await?;
        decode_ack(response).await
    }
}
