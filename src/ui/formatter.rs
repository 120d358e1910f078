//! Pure formatting functions for UI output.
//!
//! Functions here only print; they never read input.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render one `label: value` line of the parameter banner
pub fn parameter_line(label: &str, value: &str) -> String {
    format!("  • {:<9} {}", format!("{}:", label), style(value).green())
}

/// Shorten a commit message to its first line, at most `max` characters
pub fn short_message(message: &str, max: usize) -> String {
    let first_line = message.lines().next().unwrap_or("");
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}
