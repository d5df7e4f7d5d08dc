//! Scripted transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{UiSnapshot, UiState};
use crate::transport::Transport;

/// Replays queued results in order and records every request it sees,
/// along with the UI state observed while the request was in flight.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    seen: RefCell<Vec<HttpRequest>>,
    observed: RefCell<Vec<UiSnapshot>>,
    watch: RefCell<Option<UiState>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&self, state: &UiState) {
        *self.watch.borrow_mut() = Some(state.clone());
    }

    pub fn reply(&self, status: u16, status_text: &str, body: &str) -> &Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }));
        self
    }

    pub fn refuse(&self, message: &str) -> &Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::new(message)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.seen.borrow().last().cloned().expect("no request was sent")
    }

    pub fn observed(&self) -> Vec<UiSnapshot> {
        self.observed.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        if let Some(state) = self.watch.borrow().as_ref() {
            self.observed.borrow_mut().push(state.snapshot());
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .expect("scripted transport ran out of replies")
    }
}
