//! Static media served by the backend under `/uploads/`.

use crate::ApiClient;

impl ApiClient {
    /// Full URL for a relative image path as returned in listings, e.g.
    /// `"ab12-front.jpg"` to `http://host/api/uploads/ab12-front.jpg`.
    /// Empty paths yield `None`.
    #[must_use]
    pub fn image_url(&self, image_path: &str) -> Option<String> {
        let trimmed = image_path.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(self.endpoint(&format!("/uploads/{trimmed}")))
    }
}
