//! # Shell
//!
//! The root of the console: reads a line, routes it to the surface for the
//! current view, prints the reply.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read line ──► global verbs (help, back, quit)                         │
//! │                    │ otherwise                                          │
//! │                    ▼                                                    │
//! │  View::Landing     admin / client                                      │
//! │  View::Admin       admin::execute                                      │
//! │  View::ClientLogin client::execute_login                               │
//! │  View::ClientApp   client::execute                                     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  state.drain_events() ──► print reply or "Error: ..."                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use super::{admin, client, split_command, CommandResult, Reply};
use crate::error::ApiError;
use crate::state::{AppState, View};

const LANDING_HELP: &str = "\
  admin    manage cuisines, dishes and customers
  client   order as a customer
  help     show this help
  quit     leave";

/// Runs one input line against the session.
pub fn execute(state: &mut AppState, line: &str) -> CommandResult {
    let (verb, args) = split_command(line);
    if verb.is_empty() {
        return Ok(Reply::message(""));
    }
    debug!(view = %state.view, verb = %verb, "Command");

    let result = match verb.as_str() {
        "quit" | "exit" => Ok(Reply::Exit),
        "help" => Ok(Reply::message(help(state.view))),
        "back" => {
            state.view = View::Landing;
            Ok(Reply::message(landing(state)))
        }
        _ => dispatch(state, &verb, args),
    };

    state.drain_events();
    result
}

fn dispatch(state: &mut AppState, verb: &str, args: &str) -> CommandResult {
    match state.view {
        View::Landing => match verb {
            "admin" => {
                state.view = View::Admin;
                Ok(Reply::message(format!(
                    "Admin dashboard. {} cuisines, {} dishes, {} customers.\n{}",
                    state.store.cuisines().len(),
                    state.store.dishes().len(),
                    state.store.customers().len(),
                    admin::HELP
                )))
            }
            "client" => {
                let view = state.enter_client();
                Ok(Reply::message(match view {
                    View::ClientApp => {
                        let name = state
                            .store
                            .current_user()
                            .map(|c| c.name.as_str())
                            .unwrap_or_default();
                        format!("Welcome back, {}. Type 'menu' to browse.", name)
                    }
                    _ => client::LOGIN_HELP.to_string(),
                }))
            }
            _ => Err(ApiError::unknown_command(verb)),
        },
        View::Admin => admin::execute(state, verb, args),
        View::ClientLogin => client::execute_login(state, verb, args),
        View::ClientApp => client::execute(state, verb, args),
    }
}

fn help(view: View) -> String {
    match view {
        View::Landing => LANDING_HELP.to_string(),
        View::Admin => admin::HELP.to_string(),
        View::ClientLogin => client::LOGIN_HELP.to_string(),
        View::ClientApp => client::HELP.to_string(),
    }
}

fn landing(state: &AppState) -> String {
    format!(
        "{}\n{}\n\n{}",
        state.config.restaurant_name, state.config.tagline, LANDING_HELP
    )
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Errors from commands are printed and the loop continues; only I/O
/// errors end the session early.
pub fn run_session<R, W>(state: &mut AppState, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", landing(state))?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", state.view.prompt())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match execute(state, &line) {
            Ok(Reply::Message(text)) => {
                if !text.is_empty() {
                    writeln!(output, "{}", text)?;
                }
            }
            Ok(Reply::Exit) => {
                writeln!(output, "Goodbye.")?;
                break;
            }
            Err(err) => {
                warn!(code = ?err.code, message = %err.message, "Command failed");
                writeln!(output, "Error: {}", err.message)?;
            }
        }
    }

    info!("Session ended");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
