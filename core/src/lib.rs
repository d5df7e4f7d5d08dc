//! Synchronous client core for the employee records API.
//!
//! # Overview
//! `ApiGateway` issues one request per call through a pluggable
//! `Transport`, normalizes every failure into a `RequestFailure`, and keeps a
//! shared `UiState` (loading, error banner, success notice) up to date.
//! `EmployeeClient` layers the typed CRUD and export operations on top.
//!
//! # Design
//! - Request building and response parsing are pure (`build_request`,
//!   `parse_response`); only `Transport::execute` does I/O.
//! - `UiState` is an explicit store with ticket-ordered updates instead of
//!   process-wide flags.
//! - Non-JSON bodies surface as `ParseOutcome::Malformed`/`Empty` rather
//!   than silently becoming `{}`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod export;
pub mod gateway;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::EmployeeClient;
pub use error::{RequestFailure, TransportError};
pub use gateway::{ApiGateway, DEFAULT_BASE_URL};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ParseOutcome, RequestBody, RequestOptions};
pub use state::{UiSnapshot, UiState};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{ContactSubmission, Employee, EmployeeUpdate, MutationReply, NewEmployee};
