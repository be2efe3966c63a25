//! Core domain types for Motorlot.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here is owned by the backend and merely decoded
//! on this side; the only client-authored state is [`Session`] and the
//! filter/page types the catalog views hold between requests.

mod booking;
mod car;
mod envelope;
mod favorite;
mod filter;
mod ids;
mod user;

pub use booking::{Booking, TestDriveStatus};
pub use car::{Car, CarImage, CarStatus, FuelType, Transmission};
pub use envelope::{Envelope, Page};
pub use favorite::Favorite;
pub use filter::{CarFilter, PageQuery, SortDir};
pub use ids::{BookingId, CarId, ImageId, UserId};
pub use user::{Role, Route, Session, UserProfile};

use thiserror::Error;

/// Error returned when a backend enum string has no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
