//! Source tree traversal and flat copy orchestration.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::resolve_destination_os_name;
use crate::report::{ReportCollect, ReportCollectBuilder};
use crate::spec::{
    CollectError, EnumCollectFailurePolicy, RecordCopiedFile, SpecCollectOptions,
};
use crate::util::{copy_file_with_metadata, is_overlap, reset_destination_dir};

#[derive(Debug, Clone)]
struct SpecDirEntry {
    path_dir_src_sub: PathBuf,
    name_dir: OsString,
    if_is_symlink: bool,
}

#[derive(Debug, Clone)]
struct SpecFileEntry {
    path_file_src: PathBuf,
    name_file: OsString,
}

struct SpecCollectContext<'a, F> {
    path_dir_dst: PathBuf,
    spec_options: SpecCollectOptions,
    builder_report: ReportCollectBuilder,
    fn_on_copied: &'a mut F,
}

/// Collect every file under `dir_source` whose name ends with the configured
/// extension into the flat directory `dir_destination`.
///
/// This function performs:
/// 1. Input validation (extension, source directory, overlap).
/// 2. Destination reset: an existing destination is removed with all of its
///    contents and recreated empty.
/// 3. A sorted, top-down walk of the source tree. Directories whose basename
///    is in `names_ignore_dirs` are pruned before descending. Files of a
///    directory are handled before its subdirectories.
/// 4. For each candidate, a collision-free name is resolved against the
///    current destination contents and the file is copied with its metadata.
///    `fn_on_copied` is called after every successful copy.
///
/// Errors during validation, destination reset or traversal are returned as
/// [`CollectError`]. A failed copy is returned as [`CollectError::CopyFailed`]
/// under [`EnumCollectFailurePolicy::Abort`], or recorded in the report under
/// [`EnumCollectFailurePolicy::Continue`]. Files copied before an error stay
/// in the destination.
pub fn collect_flat<P, Q, F>(
    dir_source: P,
    dir_destination: Q,
    spec_options: SpecCollectOptions,
    mut fn_on_copied: F,
) -> Result<ReportCollect, CollectError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&RecordCopiedFile),
{
    if spec_options.extension.is_empty() {
        return Err(CollectError::InvalidExtension);
    }

    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_dst = dir_destination.as_ref().to_path_buf();

    if !path_dir_src.is_dir() {
        return Err(CollectError::SourceNotDirectory(path_dir_src));
    }
    if is_overlap(&path_dir_src, &path_dir_dst) {
        return Err(CollectError::SourceDestinationOverlap {
            source_dir: path_dir_src,
            destination: path_dir_dst,
        });
    }
    reset_destination_dir(&path_dir_dst)?;

    let mut spec_ctx = SpecCollectContext {
        path_dir_dst,
        spec_options,
        builder_report: ReportCollectBuilder::default(),
        fn_on_copied: &mut fn_on_copied,
    };

    walk_directory(&path_dir_src, &mut spec_ctx)?;
    Ok(spec_ctx.builder_report.build())
}

fn walk_directory<F>(
    path_root: &Path,
    spec_ctx: &mut SpecCollectContext<'_, F>,
) -> Result<(), CollectError>
where
    F: FnMut(&RecordCopiedFile),
{
    let traversal_failed = |e: std::io::Error| CollectError::TraversalFailed {
        path: path_root.to_path_buf(),
        source: e,
    };

    let mut l_dirs: Vec<SpecDirEntry> = Vec::new();
    let mut l_files: Vec<SpecFileEntry> = Vec::new();

    for entry_res in fs::read_dir(path_root).map_err(traversal_failed)? {
        let entry = entry_res.map_err(traversal_failed)?;
        let path_entry = entry.path();
        let c_name = entry.file_name();
        let cfg_file_type = entry.file_type().map_err(traversal_failed)?;

        let b_is_symlink = cfg_file_type.is_symlink();
        let b_is_dir = cfg_file_type.is_dir() || (b_is_symlink && path_entry.is_dir());
        if b_is_dir {
            l_dirs.push(SpecDirEntry {
                path_dir_src_sub: path_entry,
                name_dir: c_name,
                if_is_symlink: b_is_symlink,
            });
        } else {
            l_files.push(SpecFileEntry {
                path_file_src: path_entry,
                name_file: c_name,
            });
        }
    }

    l_dirs.sort_by(|a, b| a.name_dir.cmp(&b.name_dir));
    l_files.sort_by(|a, b| a.name_file.cmp(&b.name_file));

    for file_entry in l_files {
        handle_file_entry(file_entry, spec_ctx)?;
    }

    for dir_entry in l_dirs {
        if spec_ctx.spec_options.is_dir_ignored(&dir_entry.name_dir) {
            log::debug!("Pruned {}", dir_entry.path_dir_src_sub.display());
            spec_ctx.builder_report.add_pruned();
            continue;
        }
        if dir_entry.if_is_symlink {
            log::debug!(
                "Not following directory symlink {}",
                dir_entry.path_dir_src_sub.display()
            );
            continue;
        }
        walk_directory(&dir_entry.path_dir_src_sub, spec_ctx)?;
    }

    Ok(())
}

fn handle_file_entry<F>(
    spec_file_entry: SpecFileEntry,
    spec_ctx: &mut SpecCollectContext<'_, F>,
) -> Result<(), CollectError>
where
    F: FnMut(&RecordCopiedFile),
{
    spec_ctx.builder_report.add_scanned();
    if !spec_ctx.spec_options.is_candidate(&spec_file_entry.name_file) {
        return Ok(());
    }
    spec_ctx.builder_report.add_matched();

    // FIFOs and sockets would block or fail inside `fs::copy`.
    if let Ok(meta_file_src) = fs::metadata(&spec_file_entry.path_file_src)
        && !meta_file_src.is_file()
    {
        spec_ctx.builder_report.add_warning(format!(
            "Special file skipped: {}",
            spec_file_entry.path_file_src.display()
        ));
        return Ok(());
    }

    let path_dir_dst = &spec_ctx.path_dir_dst;
    let name_resolved = resolve_destination_os_name(
        &spec_file_entry.name_file,
        &spec_ctx.spec_options.extension,
        |c| fs::symlink_metadata(path_dir_dst.join(c)).is_ok(),
    );
    let path_file_dst = path_dir_dst.join(&name_resolved);

    if let Err(e) = copy_file_with_metadata(&spec_file_entry.path_file_src, &path_file_dst) {
        match spec_ctx.spec_options.rule_failure {
            EnumCollectFailurePolicy::Abort => {
                return Err(CollectError::CopyFailed {
                    path_src: spec_file_entry.path_file_src,
                    path_dst: path_file_dst,
                    source: e,
                });
            }
            EnumCollectFailurePolicy::Continue => {
                log::warn!(
                    "Failed to copy {} ({e}); continuing",
                    spec_file_entry.path_file_src.display()
                );
                // The name was free before this attempt; drop any partial file.
                let _ = fs::remove_file(&path_file_dst);
                spec_ctx
                    .builder_report
                    .add_error(spec_file_entry.path_file_src, e.to_string());
                return Ok(());
            }
        }
    }

    let record = RecordCopiedFile {
        path_file_src: spec_file_entry.path_file_src,
        name_candidate: spec_file_entry.name_file,
        path_file_dst,
    };
    (spec_ctx.fn_on_copied)(&record);
    let if_keep_records = spec_ctx.spec_options.if_keep_records;
    spec_ctx.builder_report.add_copied(record, if_keep_records);
    Ok(())
}
