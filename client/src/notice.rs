use tokio::sync::mpsc;

/// Cross-cutting user-facing notifications. The transport emits these for
/// the failure classes every surface reports the same way; business-level
/// errors stay on the `Result` path and never show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The session could not be silently renewed. `redirected` is true when
    /// the transport also pointed navigation at the login surface (it skips
    /// that when the user is already there).
    SessionExpired { redirected: bool },
    /// 403 from the backend.
    PermissionDenied,
    /// 5xx from the backend.
    ServiceUnavailable { status: u16 },
    /// No response from the backend at all.
    BackendUnreachable,
    /// A guarded action was attempted without a session; the surface should
    /// offer the login flow.
    LoginRequired,
}

/// Open a notice channel. Hand the sender to [`crate::ApiClient::new`] and
/// drain the receiver from the embedding surface.
#[must_use]
pub fn notice_channel() -> (NoticeSender, mpsc::UnboundedReceiver<Notice>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NoticeSender { tx: Some(tx) }, rx)
}

/// Sending half of the notice channel. Emission never blocks and never
/// fails; a dropped receiver silently discards notices.
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: Option<mpsc::UnboundedSender<Notice>>,
}

impl NoticeSender {
    /// A sender that drops every notice, for embedders that only consume
    /// the `Result` path.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { tx: None }
    }

    pub(crate) fn emit(&self, notice: Notice) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(notice);
        }
    }
}
