//! Extension-to-folder classification.
//!
//! This module maps a file extension to the two-level destination folder pair
//! a file is moved into (e.g. `Images/JPG`, `Documents/PDF`). Extensions that
//! are not in the table land in `Others/<EXTENSION>`.
//!
//! # Examples
//!
//! ```
//! use extidy::folder_map::{Category, classify};
//!
//! let dest = classify("jpg");
//! assert_eq!(dest.category, Category::Images);
//! assert_eq!(dest.sub_folder, "JPG");
//!
//! let dest = classify("xyz");
//! assert_eq!(dest.main_folder(), "Others");
//! assert_eq!(dest.sub_folder, "XYZ");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

static STANDARD_MAPPER: LazyLock<FolderMapper> = LazyLock::new(FolderMapper::new);

/// The main folder a file is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// JPG, JPEG, PNG, GIF
    Images,
    /// MP4, MOV, AVI
    Videos,
    /// MP3, WAV, FLAC
    Audio,
    /// PDF, DOCX, TXT
    Documents,
    /// XLSX, CSV
    Spreadsheets,
    /// ZIP, RAR, 7Z
    Archives,
    /// Anything the table does not know about
    Others,
}

impl Category {
    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use extidy::folder_map::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Others.dir_name(), "Others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Documents => "Documents",
            Category::Spreadsheets => "Spreadsheets",
            Category::Archives => "Archives",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A resolved `(main folder, sub folder)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    /// The main folder, e.g. `Images`.
    pub category: Category,
    /// The sub folder inside the main folder, e.g. `JPG`.
    pub sub_folder: String,
}

impl Destination {
    fn new(category: Category, sub_folder: impl Into<String>) -> Self {
        Self {
            category,
            sub_folder: sub_folder.into(),
        }
    }

    /// Name of the main folder.
    pub fn main_folder(&self) -> &'static str {
        self.category.dir_name()
    }

    /// The folder pair as a path relative to the organized root.
    pub fn relative_dir(&self) -> PathBuf {
        PathBuf::from(self.main_folder()).join(&self.sub_folder)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_folder(), self.sub_folder)
    }
}

/// Maps lowercase extensions to their destination folder pair.
///
/// The table is fixed at construction; there is no way to add entries at
/// runtime.
#[derive(Debug, Clone)]
pub struct FolderMapper {
    extension_map: HashMap<&'static str, (Category, &'static str)>,
}

impl FolderMapper {
    /// Creates a mapper holding the standard table.
    pub fn new() -> Self {
        let rules: [(&'static str, Category, &'static str); 18] = [
            ("jpg", Category::Images, "JPG"),
            ("jpeg", Category::Images, "JPEG"),
            ("png", Category::Images, "PNG"),
            ("gif", Category::Images, "GIF"),
            ("mp4", Category::Videos, "MP4"),
            ("mov", Category::Videos, "MOV"),
            ("avi", Category::Videos, "AVI"),
            ("mp3", Category::Audio, "MP3"),
            ("wav", Category::Audio, "WAV"),
            ("flac", Category::Audio, "FLAC"),
            ("pdf", Category::Documents, "PDF"),
            ("docx", Category::Documents, "DOCX"),
            ("txt", Category::Documents, "TXT"),
            ("xlsx", Category::Spreadsheets, "XLSX"),
            ("csv", Category::Spreadsheets, "CSV"),
            ("zip", Category::Archives, "ZIP"),
            ("rar", Category::Archives, "RAR"),
            ("7z", Category::Archives, "7Z"),
        ];

        Self {
            extension_map: rules
                .into_iter()
                .map(|(ext, category, sub)| (ext, (category, sub)))
                .collect(),
        }
    }

    /// Looks an extension up in the table without the `Others` fallback.
    ///
    /// The lookup is case-insensitive.
    pub fn lookup(&self, extension: &str) -> Option<Destination> {
        self.extension_map
            .get(extension.to_lowercase().as_str())
            .map(|&(category, sub)| Destination::new(category, sub))
    }

    /// Maps an extension to its destination folder pair.
    ///
    /// Unknown extensions, including the empty string, map to
    /// `Others/<EXTENSION>` with the extension uppercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use extidy::folder_map::FolderMapper;
    ///
    /// let mapper = FolderMapper::default();
    /// assert_eq!(mapper.classify("PDF").to_string(), "Documents/PDF");
    /// assert_eq!(mapper.classify("gz").to_string(), "Others/GZ");
    /// assert_eq!(mapper.classify("").sub_folder, "");
    /// ```
    pub fn classify(&self, extension: &str) -> Destination {
        self.lookup(extension)
            .unwrap_or_else(|| Destination::new(Category::Others, extension.to_uppercase()))
    }

    /// Iterates over every `(extension, destination)` entry of the table.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Destination)> + '_ {
        self.extension_map
            .iter()
            .map(|(&ext, &(category, sub))| (ext, Destination::new(category, sub)))
    }
}

impl Default for FolderMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies an extension against the standard table.
pub fn classify(extension: &str) -> Destination {
    STANDARD_MAPPER.classify(extension)
}

/// Derives the extension used for classification from a file name.
///
/// This is the text after the final `.`, lowercased. A name without any `.`
/// is used whole (`noext` yields `noext`), and a name ending in `.` yields an
/// empty extension. Both are literal behaviour kept on purpose; callers
/// should not expect `Path::extension` semantics.
///
/// # Examples
///
/// ```
/// use extidy::folder_map::extension_of;
///
/// assert_eq!(extension_of("archive.tar.gz"), "gz");
/// assert_eq!(extension_of("photo.JPG"), "jpg");
/// assert_eq!(extension_of("noext"), "noext");
/// assert_eq!(extension_of("trailing."), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}
