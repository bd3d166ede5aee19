//! Console output and styling.
//!
//! All user-facing console text goes through here. Per-file detail stays in
//! the run log; the console only gets coarse messages and the final tally.

use crate::file_organizer::RunSummary;
use colored::*;

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extidy::output::OutputFormatter;
    /// OutputFormatter::success("Organization complete.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the end-of-run report: tally line, per-folder table and a
    /// pointer to the log file when something failed.
    pub fn run_report(summary: &RunSummary, log_path: &std::path::Path) {
        let line = summary.completion_line();
        if summary.is_complete_success() {
            Self::success(&line);
        } else {
            Self::warning(&line);
        }

        if !summary.by_folder.is_empty() {
            Self::summary_table(summary);
        }

        if !summary.is_complete_success() {
            Self::warning(&format!(
                "{} file(s) could not be organized. See {} for details.",
                summary.failures.len(),
                log_path.display()
            ));
        }
    }

    /// Prints a table of moved files per folder pair.
    pub fn summary_table(summary: &RunSummary) {
        Self::header("SUMMARY");

        let max_folder_len = summary
            .by_folder
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(6); // "Folder"

        println!(
            "{:<width$} | {}",
            "Folder".bold(),
            "Files".bold(),
            width = max_folder_len
        );
        println!("{}", "-".repeat(max_folder_len + 10));

        for (folder, count) in &summary.by_folder {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                folder,
                count.to_string().green(),
                file_word,
                width = max_folder_len
            );
        }

        println!("{}", "-".repeat(max_folder_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            summary.organized_files.to_string().green().bold(),
            if summary.organized_files == 1 {
                "file"
            } else {
                "files"
            },
            width = max_folder_len
        );
    }
}
