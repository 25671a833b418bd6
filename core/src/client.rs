//! Stateless HTTP request builder and response parser for the museum API.
//!
//! # Design
//! `MuseumClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint has a `build_*` method that produces an `HttpRequest`;
//! responses are consumed by `parse_*` methods keyed on the payload shape
//! rather than the endpoint, since every endpoint answers with the same
//! `{ ok, datos, mensaje }` envelope. The `Adapter` executes the round-trip.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{server_message, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, JSON_CONTENT_TYPE};
use crate::types::{Envelope, Museum, MuseumId, NewMuseum, NewRoom, Room, RoomCount, RoomId};

/// Synchronous, stateless client for the museum API.
#[derive(Debug, Clone)]
pub struct MuseumClient {
    base_url: String,
}

impl MuseumClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -- museums ------------------------------------------------------------

    pub fn build_list_museums(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/museums/", None)
    }

    pub fn build_get_museum(&self, id: MuseumId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/museums/{id}"), None)
    }

    pub fn build_create_museum(&self, input: &NewMuseum) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Post, "/museums", Some(body)))
    }

    pub fn build_update_museum(
        &self,
        id: MuseumId,
        input: &NewMuseum,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Put, &format!("/museums/{id}"), Some(body)))
    }

    pub fn build_delete_museum(&self, id: MuseumId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/museums/{id}"), None)
    }

    pub fn build_museums_by_budget(&self, min: f64, max: f64) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/museums/budget?min={min}&max={max}"),
            None,
        )
    }

    pub fn build_museums_between(&self, from: NaiveDate, to: NaiveDate) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/museums/between?from={from}&to={to}"),
            None,
        )
    }

    pub fn build_museum_graph(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/museums/graph", None)
    }

    // -- rooms --------------------------------------------------------------

    pub fn build_list_rooms(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/rooms/", None)
    }

    pub fn build_get_room(&self, id: RoomId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/rooms/{id}"), None)
    }

    pub fn build_create_room(&self, input: &NewRoom) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Post, "/rooms", Some(body)))
    }

    pub fn build_update_room(&self, id: RoomId, input: &NewRoom) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Put, &format!("/rooms/{id}"), Some(body)))
    }

    pub fn build_delete_room(&self, id: RoomId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/rooms/{id}"), None)
    }

    pub fn build_rooms_by_area(&self, min: f64, max: f64) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            &format!("/rooms/area?min={min}&max={max}"),
            None,
        )
    }

    // -- parsing ------------------------------------------------------------

    /// Parse a list of museums; a null payload reads as an empty list.
    pub fn parse_museums(&self, response: HttpResponse) -> Result<Vec<Museum>, ApiError> {
        Ok(parse_envelope(response)?.data.unwrap_or_default())
    }

    pub fn parse_museum(&self, response: HttpResponse) -> Result<Museum, ApiError> {
        parse_envelope(response)?.data.ok_or(ApiError::MissingPayload)
    }

    /// Parse a list of rooms; a null payload reads as an empty list.
    pub fn parse_rooms(&self, response: HttpResponse) -> Result<Vec<Room>, ApiError> {
        Ok(parse_envelope(response)?.data.unwrap_or_default())
    }

    pub fn parse_room(&self, response: HttpResponse) -> Result<Room, ApiError> {
        parse_envelope(response)?.data.ok_or(ApiError::MissingPayload)
    }

    pub fn parse_room_counts(&self, response: HttpResponse) -> Result<Vec<RoomCount>, ApiError> {
        Ok(parse_envelope(response)?.data.unwrap_or_default())
    }

    /// Parse the reply to a create, update or delete and return the server's
    /// message, if it sent one. An empty 2xx body is accepted.
    pub fn parse_message(&self, response: HttpResponse) -> Result<Option<String>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: Envelope<serde_json::Value> = decode(&response.body)?;
        Ok(envelope.message.filter(|m| !m.is_empty()))
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body,
        }
    }
}

fn to_body<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<Envelope<T>, ApiError> {
    check_status(&response)?;
    decode(&response.body)
}

/// Map non-2xx status codes to `ApiError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        status_text: response.status_text.clone(),
        message: server_message(&response.body),
    })
}
