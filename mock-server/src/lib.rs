//! In-memory implementation of the employee records API.
//!
//! Serves the same routes and JSON shapes as the production backend so the
//! client can be exercised end to end. State lives behind `RwLock`s and is
//! seeded with four sample employees.

pub mod error;

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ServerError, ServerResult};

/// Origins allowed to call the API from a browser.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5500", "http://127.0.0.1:5500"];

const CSV_HEADER: &str = "id,name,age,department,salary,email";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub department: String,
    pub salary: u64,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub age: u32,
    pub department: String,
    pub salary: u64,
    pub email: String,
}

/// Partial update. Unknown keys (including `id`) are ignored.
#[derive(Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub department: Option<String>,
    pub salary: Option<u64>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: u64,
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pub employees: RwLock<BTreeMap<u64, Employee>>,
    pub contacts: RwLock<Vec<ContactRecord>>,
}

pub type Db = Arc<Store>;

/// The four records the backend starts with.
pub fn sample_employees() -> Vec<Employee> {
    let rows = [
        (1, "Alice Johnson", 25, "Engineering", 50000, "alice@company.com"),
        (2, "Bob Smith", 30, "Marketing", 60000, "bob@company.com"),
        (3, "Charlie Brown", 35, "Sales", 70000, "charlie@company.com"),
        (4, "Diana Prince", 28, "HR", 55000, "diana@company.com"),
    ];
    rows.into_iter()
        .map(|(id, name, age, department, salary, email)| Employee {
            id,
            name: name.to_string(),
            age,
            department: department.to_string(),
            salary,
            email: email.to_string(),
        })
        .collect()
}

/// Router seeded with `sample_employees()`.
pub fn app() -> Router {
    app_with(sample_employees())
}

pub fn app_with(employees: Vec<Employee>) -> Router {
    let store = Store {
        employees: RwLock::new(employees.into_iter().map(|e| (e.id, e)).collect()),
        contacts: RwLock::new(Vec::new()),
    };
    let db: Db = Arc::new(store);

    let api = Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/export/csv", get(export_csv))
        .route("/export/json", get(list_employees))
        .route("/contact", post(submit_contact))
        .route("/admin/contact-submissions", get(list_contacts));

    Router::new()
        .route("/", get(home))
        .nest("/api", api)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Employee Management API", "version": "1.0" }))
}

async fn list_employees(State(db): State<Db>) -> Json<Vec<Employee>> {
    let employees = db.employees.read().await;
    Json(employees.values().cloned().collect())
}

async fn get_employee(State(db): State<Db>, Path(id): Path<u64>) -> ServerResult<Json<Employee>> {
    let employees = db.employees.read().await;
    employees
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ServerError::EmployeeNotFound)
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<CreateEmployee>,
) -> (StatusCode, Json<Value>) {
    let mut employees = db.employees.write().await;
    let id = employees.keys().next_back().map_or(1, |max| max + 1);
    let employee = Employee {
        id,
        name: input.name,
        age: input.age,
        department: input.department,
        salary: input.salary,
        email: input.email,
    };
    employees.insert(id, employee.clone());
    tracing::info!(id, "employee created");
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Employee added successfully", "employee": employee })),
    )
}

async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateEmployee>,
) -> ServerResult<Json<Value>> {
    let mut employees = db.employees.write().await;
    let employee = employees.get_mut(&id).ok_or(ServerError::EmployeeNotFound)?;
    if let Some(name) = input.name {
        employee.name = name;
    }
    if let Some(age) = input.age {
        employee.age = age;
    }
    if let Some(department) = input.department {
        employee.department = department;
    }
    if let Some(salary) = input.salary {
        employee.salary = salary;
    }
    if let Some(email) = input.email {
        employee.email = email;
    }
    tracing::info!(id, "employee updated");
    Ok(Json(json!({ "message": "Employee updated successfully", "employee": employee })))
}

async fn delete_employee(State(db): State<Db>, Path(id): Path<u64>) -> ServerResult<Json<Value>> {
    let mut employees = db.employees.write().await;
    employees.remove(&id).ok_or(ServerError::EmployeeNotFound)?;
    tracing::info!(id, "employee deleted");
    Ok(Json(json!({ "message": "Employee deleted successfully" })))
}

async fn export_csv(State(db): State<Db>) -> impl IntoResponse {
    let employees = db.employees.read().await;
    let body = employees_to_csv(employees.values());
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=employees.csv"),
        ],
        body,
    )
}

async fn submit_contact(
    State(db): State<Db>,
    Json(input): Json<ContactInput>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let name = required("name", input.name)?;
    let email = required("email", input.email)?;
    let subject = required("subject", input.subject)?;
    let message = required("message", input.message)?;

    let mut contacts = db.contacts.write().await;
    let id = contacts.iter().map(|c| c.id).max().map_or(1, |max| max + 1);
    contacts.push(ContactRecord {
        id,
        timestamp: chrono::Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        name,
        email,
        subject,
        message,
    });
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Thank you for your message! We will get back to you soon." })),
    ))
}

async fn list_contacts(State(db): State<Db>) -> Json<Vec<ContactRecord>> {
    Json(db.contacts.read().await.clone())
}

/// Trimmed value of a contact field; missing or blank is rejected.
fn required(field: &'static str, value: Option<String>) -> ServerResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ServerError::MissingField(field))
}

/// Render employees in the export column order.
pub fn employees_to_csv<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for e in employees {
        let row = [
            e.id.to_string(),
            csv_field(&e.name),
            e.age.to_string(),
            csv_field(&e.department),
            e.salary.to_string(),
            csv_field(&e.email),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
