// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock cab booking subsystem and its tools.
//!
//! Bookings live in an in-memory per-employee arena for the lifetime of the
//! process. Fare, driver, and vehicle plate are synthesized per booking.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use deskmate_core::DeskmateError;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tool::{now_rfc3339, prefixed_id, today, Tool, ToolOutput};

const DRIVERS: [&str; 4] = ["Rahul", "Amit", "Priya", "Sneha"];

/// A cab booking record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabBooking {
    pub id: String,
    pub employee_id: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub pickup_time: String,
    pub date: String,
    pub status: String,
    pub estimated_fare: u32,
    pub driver_name: String,
    pub vehicle_number: String,
    pub created_at: String,
}

/// In-memory cab booking system keyed by employee id.
#[derive(Default)]
pub struct CabSystem {
    bookings: DashMap<String, Vec<CabBooking>>,
}

impl CabSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books a cab. Missing fields default: pickup "Office", drop "Home",
    /// pickup time now, date today.
    pub fn book(&self, employee_id: &str, args: &serde_json::Value) -> CabBooking {
        let mut rng = rand::thread_rng();
        let plate_letter = |rng: &mut rand::rngs::ThreadRng| -> char {
            (b'A' + rng.gen_range(0..26u8)) as char
        };
        let booking = CabBooking {
            id: prefixed_id("CAB"),
            employee_id: employee_id.to_string(),
            pickup_location: str_arg(args, "pickupLocation").unwrap_or_else(|| "Office".into()),
            drop_location: str_arg(args, "dropLocation").unwrap_or_else(|| "Home".into()),
            pickup_time: str_arg(args, "pickupTime").unwrap_or_else(now_rfc3339),
            date: str_arg(args, "date").unwrap_or_else(today),
            status: "CONFIRMED".to_string(),
            estimated_fare: rng.gen_range(100..400),
            driver_name: DRIVERS[rng.gen_range(0..DRIVERS.len())].to_string(),
            vehicle_number: format!(
                "KA-{:02}-{}{}-{}",
                rng.gen_range(0..99u32),
                plate_letter(&mut rng),
                plate_letter(&mut rng),
                rng.gen_range(1000..10000u32)
            ),
            created_at: now_rfc3339(),
        };

        self.bookings
            .entry(employee_id.to_string())
            .or_default()
            .push(booking.clone());
        booking
    }

    /// Cancels a booking by id. Unknown ids are a business failure, not an error.
    pub fn cancel(&self, employee_id: &str, booking_id: &str) -> serde_json::Value {
        if let Some(mut bookings) = self.bookings.get_mut(employee_id) {
            if let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) {
                booking.status = "CANCELLED".to_string();
                return serde_json::json!({ "success": true, "booking": booking });
            }
        }
        serde_json::json!({ "success": false, "message": "Booking not found" })
    }

    /// Returns all bookings for the employee (any status).
    pub fn bookings(&self, employee_id: &str) -> Vec<CabBooking> {
        self.bookings
            .get(employee_id)
            .map(|b| b.clone())
            .unwrap_or_default()
    }
}

fn str_arg(args: &serde_json::Value, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(String::from)
}

/// `book_cab` tool.
pub struct BookCabTool(pub Arc<CabSystem>);

#[async_trait]
impl Tool for BookCabTool {
    fn name(&self) -> &str {
        "book_cab"
    }

    fn description(&self) -> &str {
        "Book a cab for the employee. Use this when the user wants to book a cab or taxi."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pickupLocation": { "type": "string", "description": "Pickup location" },
                "dropLocation": { "type": "string", "description": "Drop/destination location" },
                "pickupTime": { "type": "string", "description": "Pickup time (e.g., \"9:00 AM\", \"14:30\")" },
                "date": { "type": "string", "description": "Date for the booking (YYYY-MM-DD format)" }
            },
            "required": ["pickupLocation", "dropLocation"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        let booking = self.0.book(employee_id, &input);
        Ok(ToolOutput::json(&booking))
    }
}

/// `cancel_cab` tool.
pub struct CancelCabTool(pub Arc<CabSystem>);

#[async_trait]
impl Tool for CancelCabTool {
    fn name(&self) -> &str {
        "cancel_cab"
    }

    fn description(&self) -> &str {
        "Cancel a cab booking"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "bookingId": { "type": "string", "description": "The booking ID to cancel" }
            },
            "required": ["bookingId"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        let booking_id = input["bookingId"].as_str().unwrap_or_default();
        let result = self.0.cancel(employee_id, booking_id);
        Ok(ToolOutput::json(&result))
    }
}

/// `get_cab_bookings` tool.
pub struct GetCabBookingsTool(pub Arc<CabSystem>);

#[async_trait]
impl Tool for GetCabBookingsTool {
    fn name(&self) -> &str {
        "get_cab_bookings"
    }

    fn description(&self) -> &str {
        "Get all cab bookings for the employee"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.bookings(employee_id)))
    }
}
