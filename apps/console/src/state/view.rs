//! The screen the console is currently showing.

use std::fmt;

/// Root navigation of the console.
///
/// ```text
///             ┌──────────┐
///     ┌──────►│ Landing  │◄──────┐   `back` from anywhere
///     │       └──────────┘       │
///  `admin`                    `client`
///     │                          │
/// ┌───────┐            ┌─────────────┐  login   ┌───────────┐
/// │ Admin │            │ ClientLogin │ ───────► │ ClientApp │
/// └───────┘            └─────────────┘ ◄─────── └───────────┘
///                                     logout / session ended
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Admin,
    ClientLogin,
    ClientApp,
}

impl View {
    /// Prompt printed before each input line.
    pub fn prompt(&self) -> &'static str {
        match self {
            View::Landing => "michelin> ",
            View::Admin => "admin> ",
            View::ClientLogin => "login> ",
            View::ClientApp => "client> ",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Landing => "landing",
            View::Admin => "admin",
            View::ClientLogin => "client login",
            View::ClientApp => "client",
        };
        f.write_str(name)
    }
}
