// Launcher configuration — built-in defaults plus `.detshell.yml` overrides.

pub mod loader;
pub mod types;

pub use loader::{CONFIG_FILE, load};
pub use types::{BindPolicy, Config};
