//! extidy - sort a directory tree into extension-based folder pairs
//!
//! This library classifies files by extension into a fixed two-level layout
//! (`Images/JPG`, `Documents/PDF`, `Others/<EXT>`...), moves them there with
//! per-file error isolation, writes a per-run log file and drives the
//! interactive menu used by the `extidy` binary.

pub mod cli;
pub mod file_organizer;
pub mod filters;
pub mod folder_map;
pub mod logging;
pub mod output;

pub use file_organizer::{OrganizeError, Organizer, RunSummary};
pub use filters::ExclusionFilter;
pub use folder_map::{Category, Destination, FolderMapper, classify, extension_of};
pub use logging::RunLogger;

pub use cli::{Prompt, Session, TerminalPrompt, run_menu};
