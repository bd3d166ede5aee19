//! Exclusion rules for the organizer.
//!
//! The organizer must never move the running program or the log files it
//! writes. These rules are expressed as exact file names plus glob patterns
//! that are matched against the file name only:
//!
//! - the executable's own file name (e.g. `extidy`, `extidy.exe`)
//! - `*.log`, the log artifact suffix

use glob::Pattern;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

/// Suffix shared by every log file the program writes.
pub const LOG_SUFFIX: &str = ".log";

/// Compiled exclusion rules, checked once per file during a run.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    exclude_filenames: HashSet<OsString>,
    exclude_patterns: Vec<Pattern>,
}

impl ExclusionFilter {
    /// Creates an empty filter that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard rules for a run: skip `program_name` and every `*.log` file.
    pub fn for_program(program_name: Option<OsString>) -> Self {
        let mut filter = Self::new();
        if let Some(name) = program_name {
            filter.exclude_filenames.insert(name);
        }
        filter
            .exclude_patterns
            .push(Pattern::new(&format!("*{}", LOG_SUFFIX)).expect("static pattern is valid"));
        filter
    }

    /// Standard rules using the file name of the running executable.
    pub fn for_current_exe() -> Self {
        let program_name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_os_string()));
        Self::for_program(program_name)
    }

    /// Returns true if the organizer should leave `file_path` alone.
    pub fn is_excluded(&self, file_path: &Path) -> bool {
        let Some(file_name) = file_path.file_name() else {
            return true;
        };

        if self.exclude_filenames.contains(file_name) {
            return true;
        }

        let file_name = file_name.to_string_lossy();
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&file_name))
    }
}
