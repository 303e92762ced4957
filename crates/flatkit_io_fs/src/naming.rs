//! Collision-free naming inside the flat destination.
//!
//! Names are handled as `OsStr` so bytes that are not valid UTF-8 survive
//! unchanged into the destination.

use std::ffi::{OsStr, OsString};

/// Byte offset where the extension part of `raw_name` starts.
///
/// The configured extension marker wins when `raw_name` ends with it;
/// otherwise the last `.` (ignoring a leading dot). `raw_name.len()` when
/// there is no extension.
fn _find_split_index(raw_name: &[u8], extension: &str) -> usize {
    if !extension.is_empty() && raw_name.ends_with(extension.as_bytes()) {
        return raw_name.len() - extension.len();
    }
    match raw_name.iter().rposition(|b| *b == b'.') {
        Some(n_idx) if n_idx > 0 => n_idx,
        _ => raw_name.len(),
    }
}

/// Split `name` into the part before the extension marker and the marker itself.
///
/// When `name` does not end with `extension`, falls back to the last `.`
/// (ignoring a leading dot, so `.gradle` has no extension).
pub fn split_name(name: &str, extension: &str) -> (String, String) {
    let n_idx = _find_split_index(name.as_bytes(), extension);
    (name[..n_idx].to_string(), name[n_idx..].to_string())
}

/// [`split_name`] for names that may not be valid UTF-8.
pub fn split_os_name<'a>(name: &'a OsStr, extension: &str) -> (&'a OsStr, &'a OsStr) {
    let raw_name = name.as_encoded_bytes();
    let n_idx = _find_split_index(raw_name, extension);
    let (raw_stem, raw_extension) = raw_name.split_at(n_idx);
    // SAFETY: both halves come from `name`, split either at its end or right
    // before a non-empty UTF-8 substring (the extension marker or `.`).
    unsafe {
        (
            OsStr::from_encoded_bytes_unchecked(raw_stem),
            OsStr::from_encoded_bytes_unchecked(raw_extension),
        )
    }
}

/// Name tried on attempt `n_attempt` (`0` is the unchanged name).
pub fn derive_suffixed_name(stem: &OsStr, extension: &OsStr, n_attempt: usize) -> OsString {
    let mut name = stem.to_os_string();
    if n_attempt > 0 {
        name.push(format!("_{n_attempt}"));
    }
    name.push(extension);
    name
}

/// First name of `name`, `stem_1.ext`, `stem_2.ext`, ... for which `is_taken` is false.
pub fn resolve_destination_os_name<F>(name: &OsStr, extension: &str, is_taken: F) -> OsString
where
    F: Fn(&OsStr) -> bool,
{
    if !is_taken(name) {
        return name.to_os_string();
    }
    let (stem, os_extension) = split_os_name(name, extension);
    let mut n_attempt = 1;
    loop {
        let name_next = derive_suffixed_name(stem, os_extension, n_attempt);
        if !is_taken(&name_next) {
            return name_next;
        }
        n_attempt += 1;
    }
}

/// [`resolve_destination_os_name`] for UTF-8 names.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use flatkit_io_fs::resolve_destination_name;
///
/// let set_names = HashSet::from(["Foo.kt".to_string()]);
/// let name = resolve_destination_name("Foo.kt", ".kt", |c| set_names.contains(c));
/// assert_eq!(name, "Foo_1.kt");
/// ```
pub fn resolve_destination_name<F>(name: &str, extension: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    resolve_destination_os_name(OsStr::new(name), extension, |c| {
        c.to_str().is_some_and(&is_taken)
    })
    .to_string_lossy()
    .into_owned()
}
