//! Module `menu`
//!
//! Parses the user's menu selection.

/// Menu lines printed before every selection prompt.
pub const MENU: &str = "1. Register\n2. Login\n3. Exit\n";

/// A selection from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Register,
    Login,
    Exit,
    Invalid,
}

impl MenuOption {
    /// Parses a raw input line. Accepts the option number or its name, case-insensitive.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "register" => MenuOption::Register,
            "2" | "login" => MenuOption::Login,
            "3" | "exit" => MenuOption::Exit,
            _ => MenuOption::Invalid,
        }
    }
}
