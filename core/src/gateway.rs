//! The API gateway: one HTTP call with uniform error and loading handling.
//!
//! # Design
//! `call` is split the same way as the typed client: `build_request` turns
//! an endpoint and `RequestOptions` into an `HttpRequest`, and
//! `parse_response` turns an `HttpResponse` into a `ParseOutcome` or a
//! `RequestFailure`. Both halves are pure. `call` wraps them with the
//! transport round-trip and the `UiState` bookkeeping.
//!
//! Loading is held by an `InFlight` guard for the duration of the
//! round-trip, so every exit path (success, failure, panic in the transport)
//! ends the loading period.

use tracing::{debug, warn};

use crate::error::RequestFailure;
use crate::http::{HttpRequest, HttpResponse, ParseOutcome, RequestBody, RequestOptions};
use crate::state::UiState;
use crate::transport::Transport;

/// Base address of the employee API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Banner shown when the server could not be reached at all.
pub const CONNECTIVITY_MESSAGE: &str =
    "Cannot connect to the server. Please make sure the backend is running.";

/// Failure message when neither the body nor the status line explain a failure.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Banner text for a failed call.
pub fn banner_text(failure: &RequestFailure) -> String {
    if failure.is_transport() {
        CONNECTIVITY_MESSAGE.to_string()
    } else {
        format!("Error: {}", failure.message())
    }
}

/// Issues requests against a fixed base URL and keeps `UiState` in sync.
#[derive(Debug, Clone)]
pub struct ApiGateway<T> {
    base_url: String,
    transport: T,
    state: UiState,
}

impl<T: Transport> ApiGateway<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self::with_state(base_url, transport, UiState::new())
    }

    pub fn with_state(base_url: &str, transport: T, state: UiState) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Merge `options` over the defaults and serialize the body.
    ///
    /// Defaults are `GET` and `Content-Type: application/json`. A caller
    /// header with the same name (any case) replaces the default.
    pub fn build_request(&self, endpoint: &str, options: &RequestOptions) -> Result<HttpRequest, RequestFailure> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in &options.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(existing) => *existing = (name.clone(), value.clone()),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        let body = match &options.body {
            None => None,
            Some(RequestBody::Text(text)) => Some(text.clone()),
            Some(RequestBody::Json(value)) => Some(serde_json::to_string(value).map_err(|e| {
                RequestFailure::Encode {
                    message: e.to_string(),
                }
            })?),
        };

        Ok(HttpRequest {
            method: options.method.unwrap_or_default(),
            url: format!("{}{endpoint}", self.base_url),
            headers,
            body,
        })
    }

    /// Interpret a response: parsed body on 2xx, `RequestFailure::Status` otherwise.
    pub fn parse_response(&self, response: &HttpResponse) -> Result<ParseOutcome, RequestFailure> {
        let outcome = ParseOutcome::from_body(&response.body);
        if response.is_success() {
            return Ok(outcome);
        }
        Err(RequestFailure::Status {
            status_code: response.status,
            message: failure_message(&outcome, response),
        })
    }

    /// Perform one call and return its parsed body.
    ///
    /// On failure the banner is written to `UiState` before the error is
    /// returned, so callers may ignore the error without losing feedback.
    pub fn call(&self, endpoint: &str, options: RequestOptions) -> Result<ParseOutcome, RequestFailure> {
        let request = self.build_request(endpoint, &options)?;
        self.round_trip(&request).map(|(outcome, _)| outcome)
    }

    /// `GET` an endpoint and return the raw body bytes (file downloads).
    pub fn fetch_bytes(&self, endpoint: &str) -> Result<Vec<u8>, RequestFailure> {
        let request = self.build_request(endpoint, &RequestOptions::new())?;
        self.round_trip(&request).map(|(_, response)| response.body)
    }

    fn round_trip(&self, request: &HttpRequest) -> Result<(ParseOutcome, HttpResponse), RequestFailure> {
        debug!(method = %request.method, url = %request.url, "API call");

        let call = self.state.begin();
        let result = self
            .transport
            .execute(request)
            .map_err(RequestFailure::from)
            .and_then(|response| {
                debug!(status = response.status, body = %response.text(), "API response");
                let outcome = self.parse_response(&response)?;
                Ok((outcome, response))
            });

        if let Err(failure) = &result {
            warn!(method = %request.method, url = %request.url, error = %failure, "API call failed");
            call.fail(banner_text(failure));
        }
        result
    }
}

/// Failure message priority: body `error` field, status text, fixed fallback.
fn failure_message(outcome: &ParseOutcome, response: &HttpResponse) -> String {
    if let Some(message) = outcome.error_field() {
        return message;
    }
    if !response.status_text.is_empty() {
        return response.status_text.clone();
    }
    UNKNOWN_ERROR_MESSAGE.to_string()
}
