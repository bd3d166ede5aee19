//! Walk-and-move engine that sorts files into extension folder pairs.
//!
//! A run validates the root, snapshots every regular file beneath it, then
//! moves each file into `<root>/<Main>/<Sub>/<name>`. Failures are isolated
//! per file: they are logged, recorded in the `RunSummary` and the run goes
//! on with the next file.

use crate::filters::ExclusionFilter;
use crate::folder_map::{Destination, FolderMapper, extension_of};
use crate::logging::RunLogger;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

/// Errors that can occur during file organization.
#[derive(Debug)]
pub enum OrganizeError {
    /// The root path does not exist or is not a directory.
    InvalidRoot {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a main or sub folder.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file with the same name already sits in the destination folder.
    DestinationExists { destination: PathBuf },
    /// Failed to move a file into its destination folder.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot { path, source } => {
                write!(f, "Invalid directory path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DestinationExists { destination } => {
                write!(
                    f,
                    "Destination {} already exists, leaving file in place",
                    destination.display()
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// A file that was moved during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    /// Where the file was before the run.
    pub original_path: PathBuf,
    /// Where the file is now.
    pub new_path: PathBuf,
    /// The folder pair it was sorted into.
    pub folder: Destination,
}

/// A file that could not be organized, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Tally of one run.
///
/// Every file counted in `total_files` is either counted in
/// `organized_files` or has an entry in `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files the run attempted to organize.
    pub total_files: usize,
    /// Files moved successfully.
    pub organized_files: usize,
    /// Moved files per `Main/Sub` folder pair.
    pub by_folder: BTreeMap<String, usize>,
    /// Files left in place because of an error.
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    fn record(&mut self, path: &Path, outcome: &OrganizeResult<MovedFile>) {
        self.total_files += 1;
        match outcome {
            Ok(moved) => {
                self.organized_files += 1;
                *self.by_folder.entry(moved.folder.to_string()).or_insert(0) += 1;
            }
            Err(e) => self.failures.push(FileFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    /// The one-line tally printed and logged at the end of a run.
    pub fn completion_line(&self) -> String {
        format!(
            "Organization complete. {} out of {} files organized.",
            self.organized_files, self.total_files
        )
    }

    /// Returns true if no file failed.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sorts files under a root directory into extension folder pairs.
#[derive(Debug, Clone, Default)]
pub struct Organizer {
    mapper: FolderMapper,
    filter: ExclusionFilter,
}

impl Organizer {
    /// Creates an organizer using the standard folder table.
    pub fn new(filter: ExclusionFilter) -> Self {
        Self {
            mapper: FolderMapper::default(),
            filter,
        }
    }

    /// Organizes every file under `root`, logging to `logger`.
    ///
    /// The file list is collected before anything is moved, so folders
    /// created by this run are never walked. Only an invalid root aborts the
    /// run; per-file problems end up in [`RunSummary::failures`].
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::InvalidRoot` if `root` is missing or not a
    /// directory. Nothing is created on disk in that case.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extidy::file_organizer::Organizer;
    /// use extidy::filters::ExclusionFilter;
    /// use extidy::logging::RunLogger;
    /// use std::path::Path;
    ///
    /// let logger = RunLogger::create(Path::new("logs")).unwrap();
    /// let organizer = Organizer::new(ExclusionFilter::for_current_exe());
    /// match organizer.organize(Path::new("/home/me/Downloads"), &logger) {
    ///     Ok(summary) => println!("{}/{}", summary.organized_files, summary.total_files),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    pub fn organize(&self, root: &Path, logger: &RunLogger) -> OrganizeResult<RunSummary> {
        logger.in_scope(|| self.run(root))
    }

    fn run(&self, root: &Path) -> OrganizeResult<RunSummary> {
        if let Err(e) = validate_root(root) {
            error!("Invalid directory path: {}", root.display());
            return Err(e);
        }

        let mut summary = RunSummary::default();
        for file_path in self.snapshot(root) {
            let outcome = self.organize_file(root, &file_path);
            let name = display_name(&file_path);
            match &outcome {
                Ok(moved) => info!("Moved {} to {}", name, moved.folder),
                Err(e) => error!("Error processing {}: {}", name, e),
            }
            summary.record(&file_path, &outcome);
        }

        info!("{}", summary.completion_line());
        Ok(summary)
    }

    /// Lists the files a run over `root` would process.
    ///
    /// Excluded files and files already sitting in their own destination
    /// folder are left out. Entries that cannot be read are logged and
    /// skipped.
    pub fn snapshot(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    error!("Error walking {}: {}", root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| !self.filter.is_excluded(path))
            .filter(|path| !self.is_in_place(root, path))
            .collect()
    }

    /// Resolves the folder pair for a file from its name.
    pub fn destination_for(&self, file_path: &Path) -> Destination {
        self.mapper.classify(&extension_of(&display_name(file_path)))
    }

    fn is_in_place(&self, root: &Path, file_path: &Path) -> bool {
        let target_dir = root.join(self.destination_for(file_path).relative_dir());
        file_path.parent() == Some(target_dir.as_path())
    }

    /// Moves a single file into its folder pair under `root`.
    ///
    /// Missing folders are created. An existing file at the destination is
    /// never overwritten; the move fails with `DestinationExists` instead.
    pub fn organize_file(&self, root: &Path, file_path: &Path) -> OrganizeResult<MovedFile> {
        let folder = self.destination_for(file_path);

        let main_dir = root.join(folder.main_folder());
        ensure_dir(&main_dir)?;
        let sub_dir = main_dir.join(&folder.sub_folder);
        ensure_dir(&sub_dir)?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: sub_dir.clone(),
                source_error: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;
        let destination = sub_dir.join(file_name);

        if fs::symlink_metadata(&destination).is_ok() {
            return Err(OrganizeError::DestinationExists { destination });
        }

        move_file(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(MovedFile {
            original_path: file_path.to_path_buf(),
            new_path: destination,
            folder,
        })
    }
}

fn validate_root(root: &Path) -> OrganizeResult<()> {
    let reason = match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        Err(e) => e,
    };
    Err(OrganizeError::InvalidRoot {
        path: root.to_path_buf(),
        source: reason,
    })
}

fn ensure_dir(path: &Path) -> OrganizeResult<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| OrganizeError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Renames, falling back to copy-then-delete when the destination is on
/// another filesystem.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        other => other,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
