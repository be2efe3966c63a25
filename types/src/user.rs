use crate::{ParseEnumError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. The backend's security layer sometimes reports roles with a
/// `ROLE_` prefix, so [`Role::parse`] accepts both spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    /// Parse a role string. Accepts `ADMIN`/`ROLE_ADMIN` and
    /// `CUSTOMER`/`ROLE_CUSTOMER`, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        let normalized = value.trim().to_ascii_uppercase();
        let bare = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        match bare {
            "ADMIN" => Ok(Self::Admin),
            "CUSTOMER" => Ok(Self::Customer),
            _ => Err(ParseEnumError::new("role", value)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
        }
    }

    /// Where a fresh sign-in lands: admins on the dashboard, everyone else
    /// on the public home surface.
    #[must_use]
    pub const fn landing_route(self) -> Route {
        match self {
            Self::Admin => Route::AdminDashboard,
            Self::Customer => Route::Home,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user's profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Navigation surfaces the flows decide between. The client never renders
/// these; it only reports where the embedding surface should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    AdminDashboard,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::AdminDashboard => "/admin/dashboard",
        }
    }

    /// True for the login surface. Session-loss redirects check this to
    /// avoid bouncing a user who is already there.
    #[must_use]
    pub const fn is_login(self) -> bool {
        matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Client-held session state, derived from the last successful auth
/// response. Authentication is the presence of a user; there is no separate
/// flag to drift out of sync.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    #[must_use]
    pub fn authenticated(user: UserProfile) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Replace the stored profile, e.g. after a profile update. No-op when
    /// anonymous.
    pub fn update_user(&mut self, user: UserProfile) {
        if self.user.is_some() {
            self.user = Some(user);
        }
    }
}
