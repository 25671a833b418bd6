//! The API client adapter: executes requests built by `MuseumClient`.
//!
//! # Design
//! `Adapter` is the only type in the crate that performs I/O. It owns a
//! `ureq` agent configured once from `ApiConfig` (fixed timeout, status codes
//! returned as data) and exposes one method per endpoint. Every method
//! returns either the unwrapped payload or a `NormalizedError`; transport
//! details never reach callers. There is no retry, caching or queueing.

use std::thread;

use chrono::NaiveDate;

use crate::client::MuseumClient;
use crate::config::ApiConfig;
use crate::error::{ApiError, NormalizedError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Museum, MuseumId, NewMuseum, NewRoom, Room, RoomCount, RoomId};

/// Blocking client for the museum API with normalized failures.
#[derive(Debug, Clone)]
pub struct Adapter {
    client: MuseumClient,
    agent: ureq::Agent,
    config: ApiConfig,
}

impl Adapter {
    pub fn new(config: &ApiConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();

        Self {
            client: MuseumClient::new(&config.base_url),
            agent,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn client(&self) -> &MuseumClient {
        &self.client
    }

    // -- museums ------------------------------------------------------------

    pub fn list_museums(&self) -> Result<Vec<Museum>, NormalizedError> {
        let req = self.client.build_list_museums();
        self.run(req, |c, resp| c.parse_museums(resp))
    }

    pub fn get_museum(&self, id: MuseumId) -> Result<Museum, NormalizedError> {
        let req = self.client.build_get_museum(id);
        self.run(req, |c, resp| c.parse_museum(resp))
    }

    /// Create a museum and return the server's message, if any.
    pub fn create_museum(&self, input: &NewMuseum) -> Result<Option<String>, NormalizedError> {
        let req = self.built("/museums", self.client.build_create_museum(input))?;
        self.run(req, |c, resp| c.parse_message(resp))
    }

    pub fn update_museum(
        &self,
        id: MuseumId,
        input: &NewMuseum,
    ) -> Result<Option<String>, NormalizedError> {
        let req = self.built(
            &format!("/museums/{id}"),
            self.client.build_update_museum(id, input),
        )?;
        self.run(req, |c, resp| c.parse_message(resp))
    }

    pub fn delete_museum(&self, id: MuseumId) -> Result<Option<String>, NormalizedError> {
        let req = self.client.build_delete_museum(id);
        self.run(req, |c, resp| c.parse_message(resp))
    }

    pub fn museums_by_budget(&self, min: f64, max: f64) -> Result<Vec<Museum>, NormalizedError> {
        let req = self.client.build_museums_by_budget(min, max);
        self.run(req, |c, resp| c.parse_museums(resp))
    }

    pub fn museums_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Museum>, NormalizedError> {
        let req = self.client.build_museums_between(from, to);
        self.run(req, |c, resp| c.parse_museums(resp))
    }

    pub fn museum_graph(&self) -> Result<Vec<RoomCount>, NormalizedError> {
        let req = self.client.build_museum_graph();
        self.run(req, |c, resp| c.parse_room_counts(resp))
    }

    // -- rooms --------------------------------------------------------------

    pub fn list_rooms(&self) -> Result<Vec<Room>, NormalizedError> {
        let req = self.client.build_list_rooms();
        self.run(req, |c, resp| c.parse_rooms(resp))
    }

    pub fn get_room(&self, id: RoomId) -> Result<Room, NormalizedError> {
        let req = self.client.build_get_room(id);
        self.run(req, |c, resp| c.parse_room(resp))
    }

    pub fn create_room(&self, input: &NewRoom) -> Result<Option<String>, NormalizedError> {
        let req = self.built("/rooms", self.client.build_create_room(input))?;
        self.run(req, |c, resp| c.parse_message(resp))
    }

    pub fn update_room(
        &self,
        id: RoomId,
        input: &NewRoom,
    ) -> Result<Option<String>, NormalizedError> {
        let req = self.built(&format!("/rooms/{id}"), self.client.build_update_room(id, input))?;
        self.run(req, |c, resp| c.parse_message(resp))
    }

    pub fn delete_room(&self, id: RoomId) -> Result<Option<String>, NormalizedError> {
        let req = self.client.build_delete_room(id);
        self.run(req, |c, resp| c.parse_message(resp))
    }

    pub fn rooms_by_area(&self, min: f64, max: f64) -> Result<Vec<Room>, NormalizedError> {
        let req = self.client.build_rooms_by_area(min, max);
        self.run(req, |c, resp| c.parse_rooms(resp))
    }

    // -- fan-out ------------------------------------------------------------

    /// Fetch all rooms and all museums concurrently and join both results.
    ///
    /// If either fetch fails the join fails; rooms are checked first.
    pub fn rooms_and_museums(&self) -> Result<(Vec<Room>, Vec<Museum>), NormalizedError> {
        thread::scope(|s| {
            let museums = s.spawn(|| self.list_museums());
            let rooms = self.list_rooms();
            Ok((rooms?, joined(museums.join())?))
        })
    }

    /// Same as `rooms_and_museums`, restricted to rooms within an area range.
    pub fn rooms_by_area_and_museums(
        &self,
        min: f64,
        max: f64,
    ) -> Result<(Vec<Room>, Vec<Museum>), NormalizedError> {
        thread::scope(|s| {
            let museums = s.spawn(|| self.list_museums());
            let rooms = self.rooms_by_area(min, max);
            Ok((rooms?, joined(museums.join())?))
        })
    }

    // -- plumbing -----------------------------------------------------------

    /// Unwrap a request-builder result, normalizing a construction failure.
    fn built(
        &self,
        path: &str,
        req: Result<HttpRequest, ApiError>,
    ) -> Result<HttpRequest, NormalizedError> {
        req.map_err(|e| e.normalize(&format!("{}{path}", self.client.base_url())))
    }

    fn run<T>(
        &self,
        req: HttpRequest,
        parse: impl FnOnce(&MuseumClient, HttpResponse) -> Result<T, ApiError>,
    ) -> Result<T, NormalizedError> {
        let url = req.url.clone();
        tracing::debug!(method = req.method.as_str(), %url, "sending request");
        self.execute(req)
            .and_then(|resp| parse(&self.client, resp))
            .map_err(|e| e.normalize(&url))
    }

    /// Perform the round-trip. Non-2xx statuses come back as data.
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.url), &req.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers(self.agent.delete(&req.url), &req.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(self.agent.post(&req.url), &req.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers(self.agent.put(&req.url), &req.headers).send_empty()
            }
        };

        let mut response = result.map_err(classify)?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::NoResponse(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn joined<T>(result: thread::Result<Result<T, NormalizedError>>) -> Result<T, NormalizedError> {
    result.unwrap_or_else(|_| Err(NormalizedError::new("request worker panicked")))
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key, value);
    }
    builder
}

/// Split transport failures into "never sent" and "sent, no reply".
fn classify(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::BadUri(reason) => ApiError::Request(reason),
        ureq::Error::Http(e) => ApiError::Request(e.to_string()),
        other => ApiError::NoResponse(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::NO_RESPONSE_MESSAGE;

    #[test]
    fn adapter_strips_trailing_slash_from_config() {
        let adapter = Adapter::new(&ApiConfig::new("http://localhost:3000/api/"));
        assert_eq!(adapter.client().base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn malformed_base_url_is_a_request_error() {
        let adapter = Adapter::new(&ApiConfig::new("not a url"));
        let err = adapter.list_museums().unwrap_err();
        assert!(!err.ok);
        assert!(err.data.is_none());
        assert_ne!(err.message, NO_RESPONSE_MESSAGE);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn closed_port_reports_no_response() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ApiConfig::new(format!("http://{addr}/api"))
            .with_timeout(Duration::from_millis(500));
        let err = Adapter::new(&config).get_room(1).unwrap_err();
        assert_eq!(err.message, NO_RESPONSE_MESSAGE);
    }
}
