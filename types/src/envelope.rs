use serde::{Deserialize, Serialize};

/// The uniform response wrapper every backend endpoint uses:
/// `{success, message?, data?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// The message, or an empty string. Error surfaces display this
    /// verbatim.
    #[must_use]
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// One page of a paged listing, as the backend nests it under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 0-based page index.
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: usize,
    pub last: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_success_with_data() {
        let json = r#"{"success": true, "message": "Cars retrieved", "data": [1, 2, 3]}"#;
        let envelope: Envelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn envelope_decodes_failure_without_data() {
        let json = r#"{"success": false, "message": "Car not available"}"#;
        let envelope: Envelope<()> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message_or_empty(), "Car not available");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn envelope_tolerates_null_message() {
        let json = r#"{"success": true, "message": null, "data": null}"#;
        let envelope: Envelope<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.message_or_empty(), "");
    }

    #[test]
    fn page_decodes_camel_case_fields() {
        let json = r#"{
            "content": ["a", "b"],
            "page": 0,
            "size": 12,
            "totalElements": 26,
            "totalPages": 3,
            "last": false
        }"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 2);
        assert!(!page.is_empty());
        assert_eq!(page.total_elements, 26);
        assert!(!page.last);
    }
}
