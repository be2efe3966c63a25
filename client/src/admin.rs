//! Back-office inventory and booking management. The backend enforces the
//! ADMIN role on everything here; a customer session gets a 403, which the
//! transport surfaces as a permission-denied notice.

use crate::transport::{decode_ack, decode_data};
use crate::{ApiClient, ApiError};
use motorlot_types::{
    Booking, BookingId, Car, CarFilter, CarId, CarStatus, FuelType, ImageId, TestDriveStatus,
    Transmission,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;

/// Fields of a listing as the back office submits them, for both create
/// and update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One image file to upload alongside a listing.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct StatusBody<T> {
    status: T,
}

/// Multipart form for create/add-images: a JSON `data` part plus repeated
/// `images` file parts. Rebuilt per attempt because forms are consumed on
/// send.
fn car_form(data: Option<&str>, images: &[ImageUpload]) -> Form {
    let mut form = Form::new();
    if let Some(json) = data {
        let part = Part::text(json.to_owned())
            .mime_str("application/json")
            .expect("static mime type is valid");
        form = form.part("data", part);
    }
    for image in images {
        form = form.part(
            "images",
            Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
        );
    }
    form
}

fn primary_index_query(primary_index: Option<usize>) -> Vec<(&'static str, String)> {
    primary_index
        .map(|index| vec![("primaryIndex", index.to_string())])
        .unwrap_or_default()
}

/// `/admin/cars` and its image sub-resources.
pub struct AdminCarsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminCarsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Unpaged inventory listing, soft-deleted cars included.
    pub async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, ApiError> {
        let path = "/admin/cars";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || {
                self.client.http().get(&url).query(&filter.to_query())
            })
            .await?;
        decode_data(response).await
    }

    pub async fn get(&self, id: CarId) -> Result<Car, ApiError> {
        let path = format!("/admin/cars/{id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().get(&url))
            .await?;
        decode_data(response).await
    }

    /// Create a listing, optionally with an initial image gallery.
    /// `primary_index` points into `images`.
    pub async fn create(
        &self,
        draft: &CarDraft,
        images: &[ImageUpload],
        primary_index: Option<usize>,
    ) -> Result<Car, ApiError> {
        let path = "/admin/cars";
        let url = self.client.endpoint(path);
        let data = serde_json::to_string(draft).map_err(ApiError::Encode)?;
        let query = primary_index_query(primary_index);
        let response = self
            .client
            .execute(path, || {
                self.client
                    .http()
                    .post(&url)
                    .query(&query)
                    .multipart(car_form(Some(data.as_str()), images))
            })
            .await?;
        decode_data(response).await
    }

    pub async fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car, ApiError> {
        let path = format!("/admin/cars/{id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().put(&url).json(draft))
            .await?;
        decode_data(response).await
    }

    /// Soft-delete: the listing disappears from the public catalog but can
    /// be restored.
    pub async fn delete(&self, id: CarId) -> Result<String, ApiError> {
        let path = format!("/admin/cars/{id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().delete(&url))
            .await?;
        decode_ack(response).await
    }

    pub async fn restore(&self, id: CarId) -> Result<Car, ApiError> {
        let path = format!("/admin/cars/{id}/restore");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().patch(&url))
            .await?;
        decode_data(response).await
    }

    pub async fn set_status(&self, id: CarId, status: CarStatus) -> Result<Car, ApiError> {
        let path = format!("/admin/cars/{id}/status");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || {
                self.client
                    .http()
                    .patch(&url)
                    .json(&StatusBody { status })
            })
            .await?;
        decode_data(response).await
    }

    /// Append images to an existing listing. `primary_index` points into
    /// the uploaded batch, not the existing gallery.
    pub async fn add_images(
        &self,
        id: CarId,
        images: &[ImageUpload],
        primary_index: Option<usize>,
    ) -> Result<Car, ApiError> {
        let path = format!("/admin/cars/{id}/images");
        let url = self.client.endpoint(&path);
        let query = primary_index_query(primary_index);
        let response = self
            .client
            .execute(&path, || {
                self.client
                    .http()
                    .post(&url)
                    .query(&query)
                    .multipart(car_form(None, images))
            })
            .await?;
        decode_data(response).await
    }

    pub async fn set_primary_image(
        &self,
        car_id: CarId,
        image_id: ImageId,
    ) -> Result<Car, ApiError> {
        let path = format!("/admin/cars/{car_id}/images/{image_id}/primary");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().patch(&url))
            .await?;
        decode_data(response).await
    }

    pub async fn delete_image(
        &self,
        car_id: CarId,
        image_id: ImageId,
    ) -> Result<String, ApiError> {
        let path = format!("/admin/cars/{car_id}/images/{image_id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().delete(&url))
            .await?;
        decode_ack(response).await
    }
}

/// `/admin/test-drives` -- the approval workflow.
pub struct AdminTestDrivesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminTestDrivesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Booking>, ApiError> {
        let path = "/admin/test-drives";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || self.client.http().get(&url))
            .await?;
        decode_data(response).await
    }

    /// Move a booking through the workflow: PENDING to APPROVED or
    /// REJECTED, and APPROVED to COMPLETED after the drive.
    pub async fn set_status(
        &self,
        id: BookingId,
        status: TestDriveStatus,
    ) -> Result<Booking, ApiError> {
        let path = format!("/admin/test-drives/{id}/status");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || {
                self.client
                    .http()
                    .patch(&url)
                    .json(&StatusBody { status })
            })
            .await?;
        decode_data(response).await
    }
}
