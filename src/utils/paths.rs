use std::{
    ffi::{OsStr, OsString},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::{HzipError, Result};

/// The bytes of an OS string, untouched on unix.
#[cfg(unix)]
pub fn os_bytes(s: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().to_vec()
}

#[cfg(not(unix))]
pub fn os_bytes(s: &OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
pub fn os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
pub fn os_string(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// File name without its last extension (`dir/notes.tar.gz` gives `notes.tar`).
pub fn base_name(path: &Path) -> Vec<u8> {
    path.file_stem().map(os_bytes).unwrap_or_default()
}

/// Last extension with its leading dot, or nothing.
pub fn extension(path: &Path) -> Vec<u8> {
    match path.extension() {
        Some(ext) => {
            let mut out = vec![b'.'];
            out.extend(os_bytes(ext));
            out
        }
        None => Vec::new(),
    }
}

/// Whether `a` and `b` name the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Parent directory, `.` for a bare file name.
pub fn directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| HzipError::SourceRead { path: path.to_path_buf(), source })
}

/// Writes `bytes` to a temporary file next to `dest` and renames it over
/// `dest` once complete. On failure `dest` is left as it was.
pub fn write_atomic(dest: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    let write_error = |source: io::Error| HzipError::DestinationWrite { path: dest.to_path_buf(), source };

    if !overwrite && dest.exists() {
        return Err(write_error(io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists")));
    }

    let mut tmp = NamedTempFile::new_in(directory(dest)).map_err(write_error)?;
    tmp.write_all(bytes).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;

    let persisted = if overwrite { tmp.persist(dest) } else { tmp.persist_noclobber(dest) };
    persisted.map_err(|e| write_error(e.error))?;

    Ok(())
}
