//! Terminal output helpers.

pub mod list;
pub mod theme;

use crossterm::style::Stylize;

/// Console message helpers shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Prints an informational message to the console.
    pub fn info(&self, msg: &str) {
        println!("  {msg}");
    }

    /// Prints a success message to the console.
    pub fn success(&self, msg: &str) {
        println!("  {} {msg}", "OK".green().bold());
    }

    /// Prints a warning message to the console.
    pub fn warning(&self, msg: &str) {
        println!("  {} {msg}", "WARN".yellow().bold());
    }

    /// Prints an error message to the console.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "ERROR".red().bold());
    }

    /// Prints a dimmed section title.
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", title.dark_grey());
        println!();
    }
}
