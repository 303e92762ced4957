use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::{FileTime, set_file_times};

use crate::spec::CollectError;

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    // Not created yet: resolve the parent so `./out` and `/abs/out` compare equal.
    if let (Some(parent), Some(name)) = (path.parent(), path.file_name())
        && let Ok(resolved_parent) = fs::canonicalize(if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        })
    {
        return resolved_parent.join(name);
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Whether `path` is `base` or lives below it, after normalization.
pub(crate) fn is_inside(path: &Path, base: &Path) -> bool {
    _normalize_path(path).starts_with(_normalize_path(base))
}

pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    is_inside(dst, src) || is_inside(src, dst)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Destination

/// Remove `path_dir_dst` with everything beneath it, then create it empty.
pub(crate) fn reset_destination_dir(path_dir_dst: &Path) -> Result<(), CollectError> {
    let init_failed = |e: io::Error| CollectError::DestinationInitFailed {
        path: path_dir_dst.to_path_buf(),
        message: e.to_string(),
    };

    match fs::symlink_metadata(path_dir_dst) {
        Ok(meta_dir_dst) if meta_dir_dst.file_type().is_symlink() => {
            return Err(CollectError::DestinationInitFailed {
                path: path_dir_dst.to_path_buf(),
                message: "Destination root path must not be a symbolic link.".to_string(),
            });
        }
        Ok(meta_dir_dst) if meta_dir_dst.is_dir() => {
            log::info!("Removing previous destination {}", path_dir_dst.display());
            fs::remove_dir_all(path_dir_dst).map_err(init_failed)?;
        }
        Ok(_) => {
            return Err(CollectError::DestinationInitFailed {
                path: path_dir_dst.to_path_buf(),
                message: "Destination exists and is not a directory.".to_string(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(init_failed(e)),
    }

    fs::create_dir_all(path_dir_dst).map_err(init_failed)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy bytes, permission bits and access/modification times.
///
/// Symbolic links are followed. On Linux extended attributes are copied on a
/// best-effort basis.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    {
        copy_xattrs_linux(path_file_src, path_file_dst);
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            log::debug!(
                "Skipping xattr {} on {} ({e})",
                name.to_string_lossy(),
                path_file_dst.display()
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
