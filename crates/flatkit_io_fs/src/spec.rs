//! Collect specification models and top-level error types.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use thiserror::Error;

/// Extension marker used when none is configured.
pub const C_EXTENSION_DEFAULT: &str = ".kt";

/// Directory names pruned from the walk when none are configured.
pub const L_NAMES_IGNORE_DIRS_DEFAULT: [&str; 3] = ["build", "generated", ".gradle"];

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Per-file failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumCollectFailurePolicy {
    /// Stop the run at the first failed copy.
    #[default]
    Abort,
    /// Record the failure in the report and continue with the next candidate.
    Continue,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `collect_flat`.
#[derive(Debug, Clone)]
pub struct SpecCollectOptions {
    /// Case-sensitive suffix a file name must end with to be collected.
    pub extension: String,
    /// Directory basenames excluded from traversal together with their subtree.
    pub names_ignore_dirs: BTreeSet<String>,
    /// Behavior when copying a single file fails.
    pub rule_failure: EnumCollectFailurePolicy,
    /// Keep one [`RecordCopiedFile`] per copy in the final report.
    pub if_keep_records: bool,
}

impl Default for SpecCollectOptions {
    fn default() -> Self {
        Self {
            extension: C_EXTENSION_DEFAULT.to_string(),
            names_ignore_dirs: L_NAMES_IGNORE_DIRS_DEFAULT
                .iter()
                .map(|v| v.to_string())
                .collect(),
            rule_failure: EnumCollectFailurePolicy::Abort,
            if_keep_records: false,
        }
    }
}

impl SpecCollectOptions {
    /// Whether a directory basename is in the ignore set.
    pub fn is_dir_ignored<S: AsRef<OsStr>>(&self, name_dir: S) -> bool {
        name_dir
            .as_ref()
            .to_str()
            .is_some_and(|v| self.names_ignore_dirs.contains(v))
    }

    /// Whether a file basename ends with the configured extension marker.
    ///
    /// Compared on raw bytes, so names that are not valid UTF-8 still match.
    pub fn is_candidate<S: AsRef<OsStr>>(&self, name_file: S) -> bool {
        name_file
            .as_ref()
            .as_encoded_bytes()
            .ends_with(self.extension.as_bytes())
    }
}

/// One file copied into the flat destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCopiedFile {
    /// Origin path inside the source tree.
    pub path_file_src: PathBuf,
    /// Basename of the origin, i.e. the name tried first.
    pub name_candidate: OsString,
    /// Final path inside the destination root.
    pub path_file_dst: PathBuf,
}

impl RecordCopiedFile {
    /// Resolved destination basename, lossily converted for display.
    pub fn name_resolved(&self) -> String {
        self.path_file_dst
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Whether the file had to be renamed to avoid a collision.
    pub fn is_renamed(&self) -> bool {
        self.path_file_dst.file_name() != Some(self.name_candidate.as_os_str())
    }
}

/// One copy failure item with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCollectError {
    /// Failed source path.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// Errors that abort a `collect_flat` or `write_bundle` call.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Extension marker is empty, so every file would match.
    #[error("Extension marker must not be empty")]
    InvalidExtension,

    /// Source path is not a directory.
    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    /// Source and destination overlap (`src` contains `dst` or vice versa).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        .source_dir.display(),
        .destination.display()
    )]
    SourceDestinationOverlap {
        /// Normalized source directory.
        source_dir: PathBuf,
        /// Normalized destination directory.
        destination: PathBuf,
    },

    /// Destination directory reset failed.
    #[error("Failed to initialize destination {}: {message}", .path.display())]
    DestinationInitFailed {
        /// Destination path that failed initialization.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },

    /// A directory inside the source tree could not be listed.
    #[error("Failed to read directory {}", .path.display())]
    TraversalFailed {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A candidate file could not be copied.
    #[error("Failed to copy {} -> {}", .path_src.display(), .path_dst.display())]
    CopyFailed {
        /// Origin path.
        path_src: PathBuf,
        /// Resolved destination path.
        path_dst: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Bundle would be written into the flat destination.
    #[error("Bundle path must not be inside destination: {}", .0.display())]
    BundleInsideDestination(PathBuf),

    /// Bundle file could not be written.
    #[error("Failed to write bundle {}", .path.display())]
    BundleWriteFailed {
        /// Bundle path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
