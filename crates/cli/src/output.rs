//! Terminal output formatting.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), message);
}

/// Prints a generated (or planned) widget file.
pub fn widget_written(path: &Path, dry_run: bool) {
    if dry_run {
        println!(
            "{} {} {}",
            style("○").dim(),
            style(path.display()).dim(),
            style("(dry run)").dim()
        );
    } else {
        println!("{} {}", style("✓").green(), path.display());
    }
}

/// Prints a summary of a generation run.
pub fn summary(widgets: usize, dry_run: bool, duration_ms: u64) {
    println!();

    if dry_run {
        println!(
            "{}: {} widgets would be generated in {}ms",
            style("DRY RUN").yellow().bold(),
            widgets,
            duration_ms
        );
    } else {
        println!(
            "{}: {} widgets generated in {}ms",
            style("SUCCESS").green().bold(),
            widgets,
            duration_ms
        );
    }
}

/// Creates a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Prints a list item.
pub fn list_item(text: &str) {
    println!("  {} {}", style("•").dim(), text);
}
