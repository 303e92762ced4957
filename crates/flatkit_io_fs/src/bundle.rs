//! Single-file bundle of collected sources.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset};

use crate::spec::{CollectError, RecordCopiedFile};
use crate::util::is_inside;

const C_RULE: &str = "// ============================================";

/// Reject a bundle path that would land inside the flat destination.
pub fn validate_bundle_path<P, Q>(path_bundle: P, dir_destination: Q) -> Result<(), CollectError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_bundle = path_bundle.as_ref();
    if is_inside(path_bundle, dir_destination.as_ref()) {
        return Err(CollectError::BundleInsideDestination(
            path_bundle.to_path_buf(),
        ));
    }
    Ok(())
}

/// Concatenate copied files into one text file at `path_bundle`.
///
/// Each file is preceded by a header naming its path relative to
/// `dir_source`; files appear in copy order. Content is read from the copy in
/// the destination. Returns the number of files written.
pub fn write_bundle<P, Q, R>(
    records: &[RecordCopiedFile],
    dir_source: P,
    dir_destination: Q,
    path_bundle: R,
    timestamp: &DateTime<FixedOffset>,
) -> Result<usize, CollectError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let path_bundle = path_bundle.as_ref();
    validate_bundle_path(path_bundle, &dir_destination)?;

    let write_failed = |e: std::io::Error| CollectError::BundleWriteFailed {
        path: path_bundle.to_path_buf(),
        source: e,
    };

    if let Some(path_parent) = path_bundle.parent()
        && !path_parent.as_os_str().is_empty()
    {
        fs::create_dir_all(path_parent).map_err(write_failed)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path_bundle).map_err(write_failed)?);

    writeln!(writer, "{C_RULE}").map_err(write_failed)?;
    writeln!(writer, "// CONSOLIDATED SOURCES").map_err(write_failed)?;
    writeln!(
        writer,
        "// Generated at: {}",
        timestamp.format("%Y-%m-%d %H:%M:%S %:z")
    )
    .map_err(write_failed)?;
    writeln!(writer, "{C_RULE}").map_err(write_failed)?;

    for record in records {
        let path_rel = record
            .path_file_src
            .strip_prefix(dir_source.as_ref())
            .unwrap_or(&record.path_file_src);
        let raw_content = fs::read(&record.path_file_dst).map_err(write_failed)?;

        writeln!(writer).map_err(write_failed)?;
        writeln!(writer, "{C_RULE}").map_err(write_failed)?;
        writeln!(
            writer,
            "// File: {}",
            path_rel.to_string_lossy().replace('\\', "/")
        )
        .map_err(write_failed)?;
        writeln!(writer, "{C_RULE}").map_err(write_failed)?;
        writer.write_all(&raw_content).map_err(write_failed)?;
        if !raw_content.ends_with(b"\n") {
            writeln!(writer).map_err(write_failed)?;
        }
    }

    writer.flush().map_err(write_failed)?;
    Ok(records.len())
}
