//! Capability-based file helpers built on `cap-std` and `camino`.
//!
//! Every helper opens the containing directory with ambient authority and
//! then works relative to it, so callers never hand raw paths to `std::fs`.
#![forbid(unsafe_code)]

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the parent directory of `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` exists and is a regular file.
///
/// A missing parent directory or file surfaces as an
/// [`io::ErrorKind::NotFound`] error rather than `false`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create (or truncate) the file at `path`, creating missing parent
/// directories first.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (root, relative) = split_root(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&root, ambient_authority())?.create_dir_all(&relative)
}

/// Split `path` into the directory it is anchored at and the remainder.
///
/// Relative paths are anchored at the current directory; absolute paths at
/// their root (including any Windows drive or UNC prefix).
fn split_root(path: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let mut components = std_path.components();
    let root = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            // Skip the root directory that follows a drive prefix.
            if matches!(components.clone().next(), Some(Component::RootDir)) {
                components.next();
            }
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => return Ok((Utf8PathBuf::from("."), path.to_path_buf())),
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 path"))?;
    Ok((root, relative))
}
