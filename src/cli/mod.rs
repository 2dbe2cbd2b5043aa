//! Interactive front end
//!
//! Line-based menu that feeds usernames and passwords to the authentication service.

pub mod menu;
pub mod session;

pub use menu::MenuOption;
pub use session::Session;
