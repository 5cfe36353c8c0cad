//! # Michelin Console Library
//!
//! The interactive front end of the Michelin restaurant demo: an admin
//! surface for the menu and customers, and a client surface for ordering.
//!
//! ## Module Organization
//! ```text
//! michelin_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (store, cart, view, events)
//! │   ├── view.rs     ◄─── Root navigation
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Reply type, argument helpers
//! │   ├── shell.rs    ◄─── Dispatch and REPL loop
//! │   ├── admin.rs    ◄─── Management commands
//! │   └── client.rs   ◄─── Ordering commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{AppState, ConfigState};

/// Runs the console on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,michelin=debug; override with RUST_LOG              │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults + MICHELIN_* environment variables                       │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • Store seeded with the demo restaurant (unless disabled)           │
/// │     • Empty cart, landing view, event subscription                      │
/// │                                                                         │
/// │  4. Run the REPL until `quit` or end of input ────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(
        restaurant = %config.restaurant_name,
        seed_demo = config.seed_demo_data,
        "Starting Michelin console"
    );

    let mut state = AppState::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    commands::shell::run_session(&mut state, stdin.lock(), &mut stdout)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=michelin_store=trace` - Show trace for the store only
/// - Default: INFO, DEBUG for michelin crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,michelin=debug"));

    // A second init (e.g. embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
