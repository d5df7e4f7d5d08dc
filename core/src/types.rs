//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the mock server's schema but are defined independently
//! so the client does not depend on the server crate. Integration tests
//! catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single employee record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub department: String,
    pub age: u32,
    pub salary: u64,
    pub email: String,
}

/// Request payload for creating a new employee. The server assigns `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub age: u32,
    pub department: String,
    pub salary: u64,
    pub email: String,
}

/// Request payload for updating an employee. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Reply to create, update and delete. `employee` is absent for delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

/// A message sent through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_omits_absent_fields() {
        let update = EmployeeUpdate {
            name: Some("Bobby".to_string()),
            salary: Some(65000),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Bobby", "salary": 65000}));
        assert!(!update.is_empty());
        assert!(EmployeeUpdate::default().is_empty());
    }

    #[test]
    fn delete_reply_has_no_employee() {
        let reply: MutationReply =
            serde_json::from_str(r#"{"message":"Employee deleted successfully"}"#).unwrap();
        assert_eq!(reply.message, "Employee deleted successfully");
        assert!(reply.employee.is_none());
    }

    #[test]
    fn employee_rejects_missing_fields() {
        let result: Result<Employee, _> = serde_json::from_str(r#"{"id":1,"name":"A"}"#);
        assert!(result.is_err());
    }
}
