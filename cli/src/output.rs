//! Rendering helpers: plain tables for humans, pretty JSON for `--json`.

use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use motorlot_client::ApiClient;
use motorlot_types::{Booking, Car, Page};

pub fn json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn cars(cars: &[Car]) {
    for car in cars {
        println!("{}", car_line(car));
    }
    println!("{} listing(s)", cars.len());
}

pub fn page(page: &Page<Car>) {
    for car in &page.content {
        println!("{}", car_line(car));
    }
    println!(
        "page {}/{} - showing {} of {} listing(s)",
        page.page + 1,
        page.total_pages.max(1),
        page.len(),
        page.total_elements
    );
}

fn car_line(car: &Car) -> String {
    let mut line = format!(
        "#{:<5} {:<30} {:>12}  {:<9} {:<8} {}",
        car.id,
        car.label(),
        format!("${:.2}", car.price),
        car.transmission,
        car.fuel_type,
        car.status,
    );
    if car.deleted {
        line.push_str("  [deleted]");
    }
    line
}

pub fn car_details(car: &Car, client: &ApiClient) {
    println!("{}", car_line(car));
    if let Some(description) = &car.description {
        println!("  {description}");
    }
    for image in &car.images {
        let marker = if image.primary_image { "*" } else { " " };
        let url = client
            .image_url(&image.image_path)
            .unwrap_or_else(|| image.image_path.clone());
        println!("  {marker} image #{}: {url}", image.id);
    }
}

pub fn bookings(bookings: &[Booking]) {
    for booking in bookings {
        println!(
            "#{:<5} {:<24} {}  {}",
            booking.id,
            booking.car_label(),
            booking.appointment_date.format("%Y-%m-%d %H:%M"),
            booking.status,
        );
    }
    println!("{} booking(s)", bookings.len());
}

/// Parse "YYYY-MM-DD HH:MM" (or the same with a `T`, optionally with
/// seconds) as dealership-local time.
pub fn parse_appointment(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    bail!("could not parse appointment {input:?}; expected YYYY-MM-DD HH:MM")
}
