//! Subcommands and their execution against an `EmployeeClient`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use employee_core::export;
use employee_core::{ContactSubmission, EmployeeClient, EmployeeUpdate, NewEmployee, Transport};
use tracing::debug;

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all employees
    List,
    /// Show one employee
    Get {
        id: u64,
    },
    /// Add a new employee
    Add(AddArgs),
    /// Change fields of an existing employee
    Edit(EditArgs),
    /// Delete an employee
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Download all records to a file
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// File or directory to write (default: current directory)
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
    /// Send a message through the contact form
    Contact(ContactArgs),
    /// List contact form submissions
    Contacts,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: u32,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub salary: u64,
    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub salary: Option<u64>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Run one command. Output goes to `out`; `confirm` answers yes/no prompts.
pub fn execute<T: Transport>(
    client: &EmployeeClient<T>,
    command: Command,
    out: &mut dyn Write,
    confirm: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<()> {
    debug!(?command, base_url = client.gateway().base_url(), "executing command");
    match command {
        Command::List => {
            let employees = client.list_employees()?;
            write!(out, "{}", render::employee_list(&employees))?;
        }
        Command::Get { id } => {
            let employee = client.get_employee(id)?;
            write!(out, "{}", render::employee_card(&employee))?;
        }
        Command::Add(args) => {
            let input = NewEmployee {
                name: args.name,
                age: args.age,
                department: args.department,
                salary: args.salary,
                email: args.email,
            };
            let employees = client.submit_new_employee(&input)?;
            write!(out, "{}", render::employee_list(&employees))?;
        }
        Command::Edit(args) => {
            let update = EmployeeUpdate {
                name: args.name,
                age: args.age,
                department: args.department,
                salary: args.salary,
                email: args.email,
            };
            if update.is_empty() {
                bail!("nothing to change: pass at least one of --name, --age, --department, --salary, --email");
            }
            // Fetch first so a missing id fails before anything is sent.
            client.get_employee(args.id)?;
            client.update_employee(args.id, &update)?;
            let employees = client.list_employees()?;
            write!(out, "{}", render::employee_list(&employees))?;
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this employee?")? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            client.delete_employee(id)?;
            let employees = client.list_employees()?;
            write!(out, "{}", render::employee_list(&employees))?;
        }
        Command::Export { format, out: target } => {
            let path = match format {
                ExportFormat::Csv => export::export_csv(client, &target),
                ExportFormat::Json => export::export_json(client, &target),
            }
            .with_context(|| format!("export to {} failed", target.display()))?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        Command::Contact(args) => {
            let input = ContactSubmission {
                name: args.name,
                email: args.email,
                subject: args.subject,
                message: args.message,
            };
            let reply = client.submit_contact(&input)?;
            client.state().notify(reply.message);
        }
        Command::Contacts => {
            let contacts = client.contact_submissions()?;
            write!(out, "{}", render::contact_list(&contacts))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use employee_core::{HttpMethod, HttpRequest, HttpResponse, RequestFailure, TransportError};

    use super::*;

    const ALICE: &str = r#"{"id":1,"name":"Alice Johnson","department":"Engineering","age":25,"salary":50000,"email":"alice@company.com"}"#;

    #[derive(Default)]
    struct Replay {
        replies: RefCell<VecDeque<(u16, &'static str, String)>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Replay {
        fn reply(&self, status: u16, status_text: &'static str, body: impl Into<String>) -> &Self {
            self.replies.borrow_mut().push_back((status, status_text, body.into()));
            self
        }

        fn methods(&self) -> Vec<HttpMethod> {
            self.seen.borrow().iter().map(|r| r.method).collect()
        }
    }

    impl Transport for Replay {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            let (status, status_text, body) = self
                .replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| TransportError::new("no reply scripted"))?;
            Ok(HttpResponse {
                status,
                status_text: status_text.to_string(),
                headers: Vec::new(),
                body: body.into_bytes(),
            })
        }
    }

    fn run(transport: &Replay, command: Command, answer: bool) -> (Result<()>, String, EmployeeClient<&Replay>) {
        let client = EmployeeClient::new("http://localhost:8000/api", transport);
        let mut out = Vec::new();
        let mut confirm = |_: &str| -> Result<bool> { Ok(answer) };
        let result = execute(&client, command, &mut out, &mut confirm);
        (result, String::from_utf8(out).unwrap(), client)
    }

    #[test]
    fn list_renders_cards() {
        let transport = Replay::default();
        transport.reply(200, "OK", format!("[{ALICE}]"));
        let (result, out, _) = run(&transport, Command::List, true);
        result.unwrap();
        assert!(out.starts_with("[1] Alice Johnson\n"));
        assert!(out.contains("Salary: $50,000"));
    }

    #[test]
    fn get_missing_employee_leaves_banner() {
        let transport = Replay::default();
        transport.reply(404, "Not Found", r#"{"error":"Employee not found"}"#);
        let (result, out, client) = run(&transport, Command::Get { id: 9 }, true);
        let err = result.unwrap_err();
        let failure = err.downcast_ref::<RequestFailure>().unwrap();
        assert!(failure.is_not_found());
        assert!(out.is_empty());
        assert_eq!(
            client.state().error_message().as_deref(),
            Some("Error: Employee not found")
        );
    }

    #[test]
    fn add_reloads_and_notifies() {
        let transport = Replay::default();
        transport
            .reply(201, "Created", format!(r#"{{"message":"Employee added successfully","employee":{ALICE}}}"#))
            .reply(200, "OK", format!("[{ALICE}]"));
        let command = Command::Add(AddArgs {
            name: "Alice Johnson".to_string(),
            age: 25,
            department: "Engineering".to_string(),
            salary: 50000,
            email: "alice@company.com".to_string(),
        });
        let (result, out, client) = run(&transport, command, true);
        result.unwrap();
        assert!(out.contains("Alice Johnson"));
        assert_eq!(transport.methods(), vec![HttpMethod::Post, HttpMethod::Get]);
        assert_eq!(
            client.state().notice().as_deref(),
            Some("Employee added successfully!")
        );
    }

    #[test]
    fn edit_without_fields_sends_nothing() {
        let transport = Replay::default();
        let command = Command::Edit(EditArgs {
            id: 1,
            name: None,
            age: None,
            department: None,
            salary: None,
            email: None,
        });
        let (result, _, _) = run(&transport, command, true);
        assert!(result.is_err());
        assert!(transport.methods().is_empty());
    }

    #[test]
    fn edit_fetches_updates_and_reloads() {
        let transport = Replay::default();
        transport
            .reply(200, "OK", ALICE)
            .reply(200, "OK", format!(r#"{{"message":"Employee updated successfully","employee":{ALICE}}}"#))
            .reply(200, "OK", format!("[{ALICE}]"));
        let command = Command::Edit(EditArgs {
            id: 1,
            name: Some("Alice J.".to_string()),
            age: None,
            department: None,
            salary: Some(52000),
            email: None,
        });
        let (result, _, _) = run(&transport, command, true);
        result.unwrap();
        assert_eq!(
            transport.methods(),
            vec![HttpMethod::Get, HttpMethod::Put, HttpMethod::Get]
        );
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let transport = Replay::default();
        let (result, out, _) = run(&transport, Command::Delete { id: 2, yes: false }, false);
        result.unwrap();
        assert_eq!(out, "Cancelled.\n");
        assert!(transport.methods().is_empty());
    }

    #[test]
    fn confirmed_delete_reloads_list() {
        let transport = Replay::default();
        transport
            .reply(200, "OK", r#"{"message":"Employee deleted successfully"}"#)
            .reply(200, "OK", "[]");
        let (result, out, _) = run(&transport, Command::Delete { id: 2, yes: false }, true);
        result.unwrap();
        assert_eq!(out, "No employees found.\n");
        assert_eq!(transport.methods(), vec![HttpMethod::Delete, HttpMethod::Get]);
    }

    #[test]
    fn contact_success_becomes_notice() {
        let transport = Replay::default();
        transport.reply(
            201,
            "Created",
            r#"{"message":"Thank you for your message! We will get back to you soon."}"#,
        );
        let command = Command::Contact(ContactArgs {
            name: "Sam".to_string(),
            email: "sam@x".to_string(),
            subject: "Hello".to_string(),
            message: "Hi".to_string(),
        });
        let (result, _, client) = run(&transport, command, true);
        result.unwrap();
        assert_eq!(
            client.state().notice().as_deref(),
            Some("Thank you for your message! We will get back to you soon.")
        );
    }
}
