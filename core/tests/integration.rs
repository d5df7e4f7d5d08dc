//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP through `UreqTransport`. Validates that request
//! building, transport and response handling work end-to-end and that the
//! UI state ends each call in the expected place.

use employee_core::gateway::CONNECTIVITY_MESSAGE;
use employee_core::{EmployeeClient, EmployeeUpdate, NewEmployee, RequestFailure, UreqTransport};

/// Start the mock server on a random port and return its API base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

#[test]
fn crud_lifecycle() {
    let client = EmployeeClient::new(&start_server(), UreqTransport::new());

    // Step 1: list is seeded with four employees.
    let employees = client.list_employees().unwrap();
    assert_eq!(employees.len(), 4);
    assert_eq!(employees[0].name, "Alice Johnson");
    assert!(!client.state().is_loading());

    // Step 2: create.
    let input = NewEmployee {
        name: "Eve Adams".to_string(),
        age: 41,
        department: "Finance".to_string(),
        salary: 80000,
        email: "eve@company.com".to_string(),
    };
    let reply = client.create_employee(&input).unwrap();
    let created = reply.employee.expect("create returns the employee");
    assert_eq!(created.id, 5);
    assert_eq!(created.name, "Eve Adams");

    // Step 3: get.
    let fetched = client.get_employee(created.id).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update name and salary only.
    let update = EmployeeUpdate {
        name: Some("Eve A. Adams".to_string()),
        salary: Some(85000),
        ..Default::default()
    };
    let updated = client.update_employee(created.id, &update).unwrap().employee.unwrap();
    assert_eq!(updated.name, "Eve A. Adams");
    assert_eq!(updated.salary, 85000);
    assert_eq!(updated.department, "Finance");

    // Step 5: exports see the new record.
    let csv = String::from_utf8(client.export_csv().unwrap()).unwrap();
    assert!(csv.starts_with("id,name,age,department,salary,email\n"));
    assert!(csv.contains("5,Eve A. Adams,41,Finance,85000,eve@company.com"));
    let json = client.export_json().unwrap();
    assert_eq!(json.as_array().unwrap().len(), 5);

    // Step 6: delete.
    let reply = client.delete_employee(created.id).unwrap();
    assert_eq!(reply.message, "Employee deleted successfully");

    // Step 7: get after delete is a 404 with the server's message.
    let err = client.get_employee(created.id).unwrap_err();
    assert_eq!(
        err,
        RequestFailure::Status {
            status_code: 404,
            message: "Employee not found".to_string()
        }
    );
    let snap = client.state().snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.error.as_deref(), Some("Error: Employee not found"));

    // Step 8: a non-JSON error body falls back to the status text.
    let err = client
        .gateway()
        .call("/employees/not-a-number", Default::default())
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.message(), "Bad Request");

    // Step 9: list is back to the seed data.
    assert_eq!(client.list_employees().unwrap().len(), 4);
    assert!(client.state().error_message().is_none());

    // Step 10: the create-form flow reloads the list and posts a notice.
    let employees = client.submit_new_employee(&input).unwrap();
    assert_eq!(employees.len(), 5);
    assert_eq!(employees[4].id, 5);
    assert_eq!(
        client.state().notice().as_deref(),
        Some("Employee added successfully!")
    );
}

#[test]
fn unreachable_server_shows_connectivity_banner() {
    // Bind then drop to get a port nothing is listening on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = EmployeeClient::new(&format!("http://{addr}/api"), UreqTransport::new());

    let err = client.list_employees().unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status_code(), None);

    let snap = client.state().snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.error.as_deref(), Some(CONNECTIVITY_MESSAGE));
}
