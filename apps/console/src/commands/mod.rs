//! # Console Commands Module
//!
//! Every command the console understands, one module per surface.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Reply, argument helpers)
//! ├── shell.rs    ◄─── Dispatch, landing view, REPL loop
//! ├── admin.rs    ◄─── Cuisine, dish and customer management
//! └── client.rs   ◄─── Login, menu, cart, checkout
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin:  "add-dish c1; Mapo Tofu; 12.99"                               │
//! │         │                                                               │
//! │         │ split_command                                                 │
//! │         ▼                                                               │
//! │  verb = "add-dish", args = "c1; Mapo Tofu; 12.99"                      │
//! │         │                                                               │
//! │         │ shell::execute dispatches on the current View                 │
//! │         ▼                                                               │
//! │  admin::execute(&mut AppState, verb, args)                              │
//! │      -> Result<Reply, ApiError>                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout: "Added dish Mapo Tofu ($12.99) ..."  or  "Error: ..."          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod client;
pub mod shell;

use crate::error::ApiError;

/// What a command hands back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print. May be empty.
    Message(String),
    /// End the session.
    Exit,
}

impl Reply {
    pub fn message(text: impl Into<String>) -> Self {
        Reply::Message(text.into())
    }
}

/// Result type for console commands.
pub type CommandResult = Result<Reply, ApiError>;

/// Splits a line into its verb (lowercased) and the untouched rest.
pub fn split_command(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

/// Splits `;`-separated form fields, trimming each one.
///
/// ```rust
/// use michelin_console::commands::split_fields;
///
/// assert_eq!(split_fields("c1; Mapo Tofu ;12.99"), vec!["c1", "Mapo Tofu", "12.99"]);
/// assert!(split_fields("  ").is_empty());
/// ```
pub fn split_fields(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    args.split(';').map(str::trim).collect()
}

/// Returns the single argument a command needs, or a usage error.
pub(crate) fn required_arg<'a>(args: &'a str, usage: &str) -> Result<&'a str, ApiError> {
    let arg = args.trim();
    if arg.is_empty() {
        return Err(ApiError::validation(format!("Usage: {}", usage)));
    }
    Ok(arg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("  ADD-DISH c1; Tofu; 3 "), ("add-dish".to_string(), "c1; Tofu; 3"));
        assert_eq!(split_command("cart"), ("cart".to_string(), ""));
        assert_eq!(split_command(""), (String::new(), ""));
    }

    #[test]
    fn test_split_fields_keeps_empty_middle_field() {
        assert_eq!(split_fields("c1;;9.99"), vec!["c1", "", "9.99"]);
    }

    #[test]
    fn test_required_arg() {
        assert_eq!(required_arg(" c1 ", "delete-cuisine <id>").unwrap(), "c1");
        let err = required_arg("", "delete-cuisine <id>").unwrap_err();
        assert!(err.message.contains("delete-cuisine <id>"));
    }
}
