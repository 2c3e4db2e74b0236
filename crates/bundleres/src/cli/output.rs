//! Terminal messages

use console::style;

/// Print a fatal error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}
