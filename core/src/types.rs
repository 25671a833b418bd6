//! Domain DTOs for the museum administration API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Field names follow the service's wire format (`museum_id`,
//! `annual_budget`, ...) so no renaming is needed except on the response
//! envelope, whose Spanish keys are mapped onto English field names.
//! Integration tests catch any schema drift between the two crates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a museum as assigned by the service.
pub type MuseumId = i64;

/// Identifier of a room as assigned by the service.
pub type RoomId = i64;

/// Label used when a room's museum reference does not resolve.
pub const UNKNOWN_MUSEUM: &str = "Unknown";

/// A museum record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Museum {
    pub museum_id: MuseumId,
    pub name: String,
    pub city: String,
    pub annual_budget: f64,
    pub is_public: bool,
    pub opening_date: NaiveDate,
}

/// Payload for creating or replacing a museum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMuseum {
    pub name: String,
    pub city: String,
    pub annual_budget: f64,
    pub is_public: bool,
    pub opening_date: NaiveDate,
}

/// A room record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: f64,
    pub area: f64,
    pub is_climatized: bool,
    pub opening_date: NaiveDate,
    pub museum_id: MuseumId,
}

/// Payload for creating or replacing a room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRoom {
    pub name: String,
    pub capacity: f64,
    pub area: f64,
    pub is_climatized: bool,
    pub opening_date: NaiveDate,
    pub museum_id: MuseumId,
}

/// A room joined with the name of the museum it belongs to.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoomRow {
    #[serde(flatten)]
    pub room: Room,
    pub museum_name: String,
}

/// Minimal museum projection embedded in graph entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MuseumLabel {
    pub name: String,
}

/// Number of rooms registered for one museum (`GET /museums/graph`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomCount {
    #[serde(default)]
    pub museum: Option<MuseumLabel>,
    pub total: u64,
}

impl RoomCount {
    /// Display label for the entry, falling back to [`UNKNOWN_MUSEUM`].
    pub fn label(&self) -> &str {
        self.museum
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or(UNKNOWN_MUSEUM)
    }
}

/// Response wrapper used by every endpoint of the service.
///
/// All fields are optional on the wire; a missing `ok` reads as `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "datos")]
    pub data: Option<T>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}
