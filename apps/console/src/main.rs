//! # Michelin Console Entry Point
//!
//! Thin wrapper around [`michelin_console::run`].

fn main() {
    if let Err(err) = michelin_console::run() {
        eprintln!("michelin: {}", err);
        std::process::exit(1);
    }
}
