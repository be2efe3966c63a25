use motorlot_types::{Role, Route, Session, UserProfile};
use std::sync::{Arc, RwLock};

/// Process-wide session and navigation state.
///
/// Credentials themselves live in HttpOnly cookies the backend manages;
/// this store only mirrors the last successful auth response plus the route
/// the surface is currently on. Updates are atomic per completed call --
/// there is no cross-request coordination to do.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<State>>,
}

#[derive(Debug)]
struct State {
    session: Session,
    route: Route,
}

impl Default for State {
    fn default() -> Self {
        Self {
            session: Session::anonymous(),
            route: Route::Home,
        }
    }
}

impl SessionStore {
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().session.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().session.is_authenticated()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read().session.role()
    }

    /// Install the profile from a successful login or profile fetch.
    pub fn set_auth(&self, user: UserProfile) {
        self.write().session = Session::authenticated(user);
    }

    /// Refresh the stored profile after an update. No-op when anonymous.
    pub fn update_user(&self, user: UserProfile) {
        self.write().session.update_user(user);
    }

    /// Drop to `{isAuthenticated: false, user: null, role: null}`.
    pub fn clear(&self) {
        self.write().session = Session::anonymous();
    }

    #[must_use]
    pub fn current_route(&self) -> Route {
        self.read().route
    }

    pub fn navigate(&self, route: Route) {
        self.write().route = route;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motorlot_types::UserId;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            email: "jo@example.com".into(),
            full_name: "Jo Smith".into(),
            role: Role::Customer,
        }
    }

    #[test]
    fn starts_anonymous_on_home() {
        let store = SessionStore::default();
        assert!(!store.is_authenticated());
        assert_eq!(store.current_route(), Route::Home);
    }

    #[test]
    fn set_and_clear_round_trip() {
        let store = SessionStore::default();
        store.set_auth(profile());
        assert!(store.is_authenticated());
        assert_eq!(store.role(), Some(Role::Customer));

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.role().is_none());
        assert!(store.snapshot().user().is_none());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::default();
        let view = store.clone();
        store.set_auth(profile());
        assert!(view.is_authenticated());

        view.navigate(Route::Login);
        assert_eq!(store.current_route(), Route::Login);
    }
}
