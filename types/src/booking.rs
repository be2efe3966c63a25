use crate::{BookingId, CarId, ParseEnumError, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a test-drive booking. Bookings start PENDING; the back
/// office moves them to APPROVED or REJECTED, and to COMPLETED after the
/// drive. A customer cancel is a REJECTED transition on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestDriveStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl TestDriveStatus {
    /// Parse a status from user input. Case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseEnumError::new("test-drive status", value)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Only PENDING bookings may be cancelled by the customer.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for TestDriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A test-drive booking, flattened with the car and customer fields the
/// backend denormalizes into the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub car_id: CarId,
    #[serde(default)]
    pub car_make: Option<String>,
    #[serde(default)]
    pub car_model: Option<String>,
    pub customer_id: UserId,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Appointment slot in the dealership's local time, no zone attached.
    pub appointment_date: NaiveDateTime,
    pub status: TestDriveStatus,
}

impl Booking {
    /// "Toyota Corolla" label, or a placeholder when the car fields were
    /// not denormalized.
    #[must_use]
    pub fn car_label(&self) -> String {
        match (&self.car_make, &self.car_model) {
            (Some(make), Some(model)) => format!("{make} {model}"),
            _ => format!("car #{}", self.car_id),
        }
    }
}
