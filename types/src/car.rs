use crate::{CarId, ImageId, ParseEnumError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gearbox type of a listed car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    /// Parse a transmission from user input. Case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MANUAL" => Ok(Self::Manual),
            "AUTOMATIC" => Ok(Self::Automatic),
            _ => Err(ParseEnumError::new("transmission", value)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fuel type of a listed car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    /// Parse a fuel type from user input. Case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GASOLINE" => Ok(Self::Gasoline),
            "DIESEL" => Ok(Self::Diesel),
            "ELECTRIC" => Ok(Self::Electric),
            "HYBRID" => Ok(Self::Hybrid),
            _ => Err(ParseEnumError::new("fuel type", value)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gasoline => "GASOLINE",
            Self::Diesel => "DIESEL",
            Self::Electric => "ELECTRIC",
            Self::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sale status of a listing. New listings start AVAILABLE; the back office
/// flips them to SOLD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    Available,
    Sold,
}

impl CarStatus {
    /// Parse a car status from user input. Case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ParseEnumError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "SOLD" => Ok(Self::Sold),
            _ => Err(ParseEnumError::new("car status", value)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Sold => "SOLD",
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One image attached to a listing. At most one image per car is primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarImage {
    pub id: ImageId,
    /// Path relative to the backend's `/uploads/` static root.
    pub image_path: String,
    pub primary_image: bool,
}

/// A car listing as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub status: CarStatus,
    #[serde(default)]
    pub description: Option<String>,
    /// Path of the primary image, when one is set.
    #[serde(default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub images: Vec<CarImage>,
    /// Soft-delete flag. Deleted listings only show up in the back office.
    #[serde(default)]
    pub deleted: bool,
}

impl Car {
    /// Short "2021 Toyota Corolla" display label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}
