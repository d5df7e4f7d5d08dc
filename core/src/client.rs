//! Typed employee operations on top of `ApiGateway`.
//!
//! # Design
//! Each operation is a thin caller of the gateway: it picks the endpoint and
//! method, encodes the payload, and decodes the parsed body into a DTO.
//! Loading, error banners and logging all happen inside the gateway. The
//! only UI write done here is the success notice after the create-form flow.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::RequestFailure;
use crate::gateway::ApiGateway;
use crate::http::{HttpMethod, ParseOutcome, RequestBody, RequestOptions};
use crate::state::UiState;
use crate::transport::Transport;
use crate::types::{ContactSubmission, Employee, EmployeeUpdate, MutationReply, NewEmployee};

/// Notice shown after a successful create.
pub const EMPLOYEE_ADDED_NOTICE: &str = "Employee added successfully!";

/// Client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient<T> {
    gateway: ApiGateway<T>,
}

impl<T: Transport> EmployeeClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            gateway: ApiGateway::new(base_url, transport),
        }
    }

    pub fn gateway(&self) -> &ApiGateway<T> {
        &self.gateway
    }

    pub fn state(&self) -> &UiState {
        self.gateway.state()
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, RequestFailure> {
        self.get_json("/employees")
    }

    pub fn get_employee(&self, id: u64) -> Result<Employee, RequestFailure> {
        self.get_json(&format!("/employees/{id}"))
    }

    pub fn create_employee(&self, input: &NewEmployee) -> Result<MutationReply, RequestFailure> {
        self.send_json(HttpMethod::Post, "/employees", input)
    }

    /// Create-form flow: create, reload the list, then show the success notice.
    ///
    /// The notice is posted after the reload because every call clears the
    /// banners when it starts.
    pub fn submit_new_employee(&self, input: &NewEmployee) -> Result<Vec<Employee>, RequestFailure> {
        self.create_employee(input)?;
        let employees = self.list_employees()?;
        self.state().notify(EMPLOYEE_ADDED_NOTICE);
        Ok(employees)
    }

    pub fn update_employee(&self, id: u64, input: &EmployeeUpdate) -> Result<MutationReply, RequestFailure> {
        self.send_json(HttpMethod::Put, &format!("/employees/{id}"), input)
    }

    pub fn delete_employee(&self, id: u64) -> Result<MutationReply, RequestFailure> {
        let endpoint = format!("/employees/{id}");
        let outcome = self
            .gateway
            .call(&endpoint, RequestOptions::new().method(HttpMethod::Delete))?;
        decode(outcome)
    }

    /// Raw CSV file as served by the API.
    pub fn export_csv(&self) -> Result<Vec<u8>, RequestFailure> {
        self.gateway.fetch_bytes("/export/csv")
    }

    /// JSON export, kept as an untyped value so it can be written back out
    /// exactly as received.
    pub fn export_json(&self) -> Result<Value, RequestFailure> {
        Ok(self.gateway.call("/export/json", RequestOptions::new())?.into_value())
    }

    pub fn submit_contact(&self, input: &ContactSubmission) -> Result<MutationReply, RequestFailure> {
        self.send_json(HttpMethod::Post, "/contact", input)
    }

    pub fn contact_submissions(&self) -> Result<Vec<Value>, RequestFailure> {
        self.get_json("/admin/contact-submissions")
    }

    fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, RequestFailure> {
        decode(self.gateway.call(endpoint, RequestOptions::new())?)
    }

    fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        input: &B,
    ) -> Result<R, RequestFailure> {
        let body = serde_json::to_value(input).map_err(|e| RequestFailure::Encode {
            message: e.to_string(),
        })?;
        let options = RequestOptions::new().method(method).body(RequestBody::Json(body));
        decode(self.gateway.call(endpoint, options)?)
    }
}

/// Decode a success body into `R`. Empty and malformed bodies decode as `{}`.
fn decode<R: DeserializeOwned>(outcome: ParseOutcome) -> Result<R, RequestFailure> {
    serde_json::from_value(outcome.into_value()).map_err(|e| RequestFailure::Decode {
        message: e.to_string(),
    })
}
