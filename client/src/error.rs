use thiserror::Error;

/// Failure classes for backend calls, mirroring how the surfaces treat
/// them: authentication loss, missing permission, server failure, an
/// unreachable backend, and business-level rejections whose message is
/// shown verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 that survived the single-refresh contract: the request targeted
    /// an auth endpoint, the replay failed again, or the silent refresh was
    /// rejected.
    #[error("{}", message.as_deref().unwrap_or("authentication required"))]
    Unauthorized { message: Option<String> },

    /// 403. The account is signed in but lacks the required role.
    #[error("access denied: missing permission for this action")]
    PermissionDenied,

    /// 5xx. The service answered but is not healthy.
    #[error("the dealership service is currently unavailable (HTTP {status})")]
    ServiceUnavailable { status: u16 },

    /// No response at all: connect failure, timeout, or a broken body.
    #[error("could not reach the backend")]
    Unreachable(#[source] reqwest::Error),

    /// Any remaining 4xx, or a 2xx envelope with `success: false`. The
    /// backend's message passes through for contextual display.
    #[error("{}", message.as_deref().unwrap_or("request rejected"))]
    Rejected { status: u16, message: Option<String> },

    /// A mutating call was attempted without a session. Raised client-side,
    /// before any network traffic.
    #[error("login required")]
    LoginRequired,

    /// 2xx with a body that does not match the documented envelope.
    #[error("unexpected response body")]
    UnexpectedBody(#[source] reqwest::Error),

    /// A request payload could not be encoded. Only reachable with
    /// non-finite numeric input.
    #[error("could not encode request payload")]
    Encode(#[source] serde_json::Error),

    /// Successful envelope with no `data` where the endpoint documents one.
    #[error("response envelope carried no data")]
    MissingData,

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}

impl ApiError {
    /// True when retrying the same call later could help (server or
    /// connectivity trouble rather than a rejected request).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable { .. } | Self::Unreachable(_)
        )
    }

    /// The backend-provided message, when one was attached.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_backend_message_verbatim() {
        let err = ApiError::Rejected {
            status: 400,
            message: Some("Car already booked for that slot".into()),
        };
        assert_eq!(err.to_string(), "Car already booked for that slot");
        assert_eq!(
            err.backend_message(),
            Some("Car already booked for that slot")
        );
    }

    #[test]
    fn unauthorized_without_message_has_fallback() {
        let err = ApiError::Unauthorized { message: None };
        assert_eq!(err.to_string(), "authentication required");
    }

    #[test]
    fn transient_classification() {
        assert!(ApiError::ServiceUnavailable { status: 503 }.is_transient());
        assert!(!ApiError::PermissionDenied.is_transient());
        assert!(!ApiError::LoginRequired.is_transient());
    }
}
