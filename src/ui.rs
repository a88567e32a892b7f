//! Terminal output helpers.
//!
//! Formatting only, no prompts; commands print through these so output
//! styling stays in one place.

use console::style;

use crate::domain::Change;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a summary line for a batch of pending changes.
pub fn display_pending_summary(changes: &[Change]) {
    println!(
        "{} {} pending change(s)",
        style("→").yellow(),
        changes.len()
    );

    for change in changes {
        let kind = change.kind.as_deref().unwrap_or("-");
        println!("  {} {}", style(kind).bold(), change.body);
    }
}
