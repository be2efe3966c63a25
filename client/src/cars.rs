//! Public catalog reads. No authentication required.

use crate::transport::decode_data;
use crate::{ApiClient, ApiError};
use motorlot_types::{Car, CarFilter, CarId, Page, PageQuery};

/// `/cars` -- the browsing surface's data source.
pub struct CatalogApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CatalogApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of the catalog under the given filters. The page index is
    /// 0-based; identical filters with different pages return disjoint
    /// slices of the same ordering.
    pub async fn list(&self, filter: &CarFilter, page: &PageQuery) -> Result<Page<Car>, ApiError> {
        let path = "/cars";
        let url = self.client.endpoint(path);
        let response = self
            .client
            .execute(path, || {
                self.client
                    .http()
                    .get(&url)
                    .query(&filter.to_query())
                    .query(&page.to_query())
            })
            .await?;
        decode_data(response).await
    }

    /// A single listing with its image gallery.
    pub async fn get(&self, id: CarId) -> Result<Car, ApiError> {
        let path = format!("/cars/{id}");
        let url = self.client.endpoint(&path);
        let response = self
            .client
            .execute(&path, || self.client.http().get(&url))
            .await?;
        decode_data(response).await
    }
}
