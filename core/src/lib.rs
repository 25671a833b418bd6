//! Client core for the museum administration service.
//!
//! # Overview
//! Talks to the museum/room REST API, validates form input before anything is
//! sent, and reports every failure as one `NormalizedError` shape.
//!
//! # Design
//! - `MuseumClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network, so request construction and error
//!   classification are testable against recorded responses.
//! - `Adapter` is the only I/O boundary: a `ureq` agent with a fixed base
//!   address and timeout, configured explicitly through `ApiConfig`.
//! - `Admin` performs one user action per method on top of the adapter
//!   (forms, searches, joined listings, delete-and-reload).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod adapter;
pub mod admin;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod validation;

pub use adapter::Adapter;
pub use admin::{ActionError, ActionResult, Admin, Deleted};
pub use client::MuseumClient;
pub use config::ApiConfig;
pub use error::{ApiError, NormalizedError, NO_RESPONSE_MESSAGE, REQUEST_FAILED_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Envelope, Museum, MuseumId, MuseumLabel, NewMuseum, NewRoom, Room, RoomCount, RoomId, RoomRow,
};
pub use validation::{
    DateRange, Field, FormErrors, MuseumEdit, MuseumForm, NumericRange, RangeError, RoomEdit,
    RoomForm,
};
