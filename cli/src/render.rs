//! Terminal rendering of employee lists and banners.

use std::fmt::Write as _;

use employee_core::{Employee, UiSnapshot};
use serde_json::Value;

pub const EMPTY_LIST: &str = "No employees found.";
pub const LOADING: &str = "Loading...";

/// Group digits in threes: `1234567` → `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn employee_card(employee: &Employee) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", employee.id, employee.name);
    let _ = writeln!(out, "    Department: {}", employee.department);
    let _ = writeln!(
        out,
        "    Age: {} | Salary: ${}",
        employee.age,
        thousands(employee.salary)
    );
    let _ = writeln!(out, "    Email: {}", employee.email);
    out
}

pub fn employee_list(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }
    employees
        .iter()
        .map(employee_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per contact submission: `#id timestamp name <email>: subject`.
pub fn contact_list(contacts: &[Value]) -> String {
    if contacts.is_empty() {
        return "No contact submissions.\n".to_string();
    }
    let field = |c: &Value, key: &str| match &c[key] {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    contacts
        .iter()
        .map(|c| {
            format!(
                "#{} {} {} <{}>: {}\n",
                field(c, "id"),
                field(c, "timestamp"),
                field(c, "name"),
                field(c, "email"),
                field(c, "subject"),
            )
        })
        .collect()
}

/// Which stream a banner goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Notice(String),
}

/// Status line shown while a call is in flight.
pub fn loading_line(snapshot: &UiSnapshot) -> Option<&'static str> {
    snapshot.loading.then_some(LOADING)
}

pub fn banner(snapshot: &UiSnapshot) -> Option<Banner> {
    if let Some(error) = &snapshot.error {
        return Some(Banner::Error(error.clone()));
    }
    snapshot.notice.clone().map(Banner::Notice)
}
