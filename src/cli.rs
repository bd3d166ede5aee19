//! Interactive menu for extidy.
//!
//! This module handles all CLI-related functionality:
//! - Presenting the menu and reading the user's choice
//! - Validating the chosen directory and asking for confirmation
//! - Running the organizer and reporting the tally
//!
//! Terminal interaction sits behind the [`Prompt`] trait so the menu loop can
//! be driven by a scripted prompt in tests.

use crate::file_organizer::{Organizer, RunSummary};
use crate::logging::RunLogger;
use crate::output::OutputFormatter;
use dialoguer::console::Term;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Organize a directory typed in by the user.
    OrganizePath,
    /// Organize the directory the program lives in.
    OrganizeProgramDir,
    /// Leave the menu.
    Quit,
}

impl MenuChoice {
    /// Every choice, in menu order.
    pub const ALL: [MenuChoice; 3] = [
        MenuChoice::OrganizePath,
        MenuChoice::OrganizeProgramDir,
        MenuChoice::Quit,
    ];

    /// Text shown for this choice in the menu.
    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::OrganizePath => "Organize files in a specific directory",
            MenuChoice::OrganizeProgramDir => {
                "Organize files in the program's directory (where this executable is located)"
            }
            MenuChoice::Quit => "Quit",
        }
    }
}

/// Source of user answers for the menu.
pub trait Prompt {
    /// Asks the user to pick one of `choices`.
    fn choose(&mut self, choices: &[MenuChoice]) -> dialoguer::Result<MenuChoice>;

    /// Asks for a directory path.
    fn directory(&mut self) -> dialoguer::Result<String>;

    /// Asks a yes/no question. Anything but an explicit yes means no.
    fn confirm(&mut self, message: &str) -> dialoguer::Result<bool>;
}

/// [`Prompt`] backed by `dialoguer` widgets on stderr.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn choose(&mut self, choices: &[MenuChoice]) -> dialoguer::Result<MenuChoice> {
        let labels: Vec<&str> = choices.iter().map(MenuChoice::label).collect();
        let index = Select::new()
            .with_prompt("Options")
            .items(&labels)
            .default(0)
            .interact_on(&self.term)?;
        Ok(choices[index])
    }

    fn directory(&mut self) -> dialoguer::Result<String> {
        Input::<String>::new()
            .with_prompt("Enter the directory path to organize")
            .interact_text_on(&self.term)
    }

    fn confirm(&mut self, message: &str) -> dialoguer::Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact_on(&self.term)
    }
}

/// Everything a menu session needs besides the prompt.
#[derive(Debug)]
pub struct Session {
    pub organizer: Organizer,
    pub logger: RunLogger,
    /// Target of the "program's directory" menu entry.
    pub program_dir: PathBuf,
}

/// Runs the menu until the user quits.
///
/// # Errors
///
/// Returns an error message if the terminal interaction itself fails.
///
/// # Examples
///
/// ```no_run
/// use extidy::cli::{Session, TerminalPrompt, run_menu};
/// use extidy::file_organizer::Organizer;
/// use extidy::filters::ExclusionFilter;
/// use extidy::logging::RunLogger;
/// use std::path::{Path, PathBuf};
///
/// let session = Session {
///     organizer: Organizer::new(ExclusionFilter::for_current_exe()),
///     logger: RunLogger::create(Path::new("logs")).unwrap(),
///     program_dir: PathBuf::from("."),
/// };
/// run_menu(&mut TerminalPrompt::new(), &session).unwrap();
/// ```
pub fn run_menu<P: Prompt>(prompt: &mut P, session: &Session) -> Result<(), String> {
    OutputFormatter::header("File Organizer");
    OutputFormatter::plain("=======================");

    loop {
        let choice = prompt
            .choose(&MenuChoice::ALL)
            .map_err(|e| format!("Error reading menu choice: {}", e))?;

        match choice {
            MenuChoice::OrganizePath => {
                let input = prompt
                    .directory()
                    .map_err(|e| format!("Error reading directory: {}", e))?;
                let directory = PathBuf::from(input.trim());
                if directory.is_dir() {
                    let question = format!(
                        "Are you sure you want to organize '{}'?",
                        directory.display()
                    );
                    confirm_and_organize(prompt, session, &directory, &question)?;
                } else {
                    OutputFormatter::error("Invalid directory. Please try again.");
                }
            }
            MenuChoice::OrganizeProgramDir => {
                let question = format!(
                    "Are you sure you want to organize the program directory '{}'?",
                    session.program_dir.display()
                );
                confirm_and_organize(prompt, session, &session.program_dir, &question)?;
            }
            MenuChoice::Quit => break,
        }
    }

    OutputFormatter::plain("Thank you for using extidy!");
    Ok(())
}

fn confirm_and_organize<P: Prompt>(
    prompt: &mut P,
    session: &Session,
    directory: &Path,
    question: &str,
) -> Result<(), String> {
    let confirmed = prompt
        .confirm(question)
        .map_err(|e| format!("Error reading confirmation: {}", e))?;

    if !confirmed {
        OutputFormatter::plain("Operation cancelled.");
        return Ok(());
    }

    organize_directory(session, directory);
    Ok(())
}

/// Organizes `directory` and prints the outcome.
///
/// Returns `None` if the directory was rejected as invalid.
pub fn organize_directory(session: &Session, directory: &Path) -> Option<RunSummary> {
    OutputFormatter::info(&format!("Organizing contents of: {}", directory.display()));

    match session.organizer.organize(directory, &session.logger) {
        Ok(summary) => {
            OutputFormatter::run_report(&summary, session.logger.path());
            Some(summary)
        }
        Err(e) => {
            OutputFormatter::error("Invalid directory path.");
            OutputFormatter::error(&e.to_string());
            None
        }
    }
}

/// Directory containing the running executable, falling back to the
/// working directory when it cannot be determined.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ExclusionFilter;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct ScriptedPrompt {
        choices: VecDeque<MenuChoice>,
        directories: VecDeque<String>,
        confirmations: VecDeque<bool>,
        questions: Vec<String>,
    }

    impl Prompt for ScriptedPrompt {
        fn choose(&mut self, _choices: &[MenuChoice]) -> dialoguer::Result<MenuChoice> {
            Ok(self.choices.pop_front().unwrap_or(MenuChoice::Quit))
        }

        fn directory(&mut self) -> dialoguer::Result<String> {
            Ok(self.directories.pop_front().unwrap_or_default())
        }

        fn confirm(&mut self, message: &str) -> dialoguer::Result<bool> {
            self.questions.push(message.to_string());
            Ok(self.confirmations.pop_front().unwrap_or(false))
        }
    }

    fn session(temp_dir: &TempDir, program_dir: PathBuf) -> Session {
        Session {
            organizer: Organizer::new(ExclusionFilter::for_program(None)),
            logger: RunLogger::create(&temp_dir.path().join("logs")).unwrap(),
            program_dir,
        }
    }

    #[test]
    fn test_menu_labels() {
        assert_eq!(MenuChoice::ALL.len(), 3);
        assert_eq!(MenuChoice::Quit.label(), "Quit");
    }

    #[test]
    fn test_quit_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir, temp_dir.path().to_path_buf());
        let mut prompt = ScriptedPrompt::default();

        assert!(run_menu(&mut prompt, &session).is_ok());
        assert!(prompt.questions.is_empty());
    }

    #[test]
    fn test_organize_path_confirmed() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("song.mp3"), "mp3").unwrap();

        let session = session(&temp_dir, temp_dir.path().to_path_buf());
        let mut prompt = ScriptedPrompt {
            choices: VecDeque::from([MenuChoice::OrganizePath, MenuChoice::Quit]),
            directories: VecDeque::from([format!("  {}  ", target.display())]),
            confirmations: VecDeque::from([true]),
            ..Default::default()
        };

        run_menu(&mut prompt, &session).unwrap();

        assert!(target.join("Audio/MP3/song.mp3").exists());
        assert_eq!(prompt.questions.len(), 1);
        assert!(prompt.questions[0].starts_with("Are you sure you want to organize '"));
    }

    #[test]
    fn test_organize_path_declined() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("song.mp3"), "mp3").unwrap();

        let session = session(&temp_dir, temp_dir.path().to_path_buf());
        let mut prompt = ScriptedPrompt {
            choices: VecDeque::from([MenuChoice::OrganizePath]),
            directories: VecDeque::from([target.display().to_string()]),
            confirmations: VecDeque::from([false]),
            ..Default::default()
        };

        run_menu(&mut prompt, &session).unwrap();

        assert!(target.join("song.mp3").exists());
        assert!(!target.join("Audio").exists());
    }

    #[test]
    fn test_invalid_directory_is_not_confirmed() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir, temp_dir.path().to_path_buf());
        let mut prompt = ScriptedPrompt {
            choices: VecDeque::from([MenuChoice::OrganizePath]),
            directories: VecDeque::from([temp_dir
                .path()
                .join("missing")
                .display()
                .to_string()]),
            ..Default::default()
        };

        run_menu(&mut prompt, &session).unwrap();

        assert!(prompt.questions.is_empty());
    }

    #[test]
    fn test_organize_program_dir() {
        let temp_dir = TempDir::new().unwrap();
        let program_dir = temp_dir.path().join("bin");
        fs::create_dir(&program_dir).unwrap();
        fs::write(program_dir.join("clip.mov"), "mov").unwrap();

        let session = session(&temp_dir, program_dir.clone());
        let mut prompt = ScriptedPrompt {
            choices: VecDeque::from([MenuChoice::OrganizeProgramDir, MenuChoice::Quit]),
            confirmations: VecDeque::from([true]),
            ..Default::default()
        };

        run_menu(&mut prompt, &session).unwrap();

        assert!(program_dir.join("Videos/MOV/clip.mov").exists());
        assert!(prompt.questions[0].contains("program directory"));
    }

    #[test]
    fn test_organize_directory_rejects_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir, temp_dir.path().to_path_buf());

        assert!(organize_directory(&session, &temp_dir.path().join("missing")).is_none());
    }
}
