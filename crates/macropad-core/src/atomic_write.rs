use std::{fs, io::Write, path::Path};

use tempfile::NamedTempFile;

/// Write `contents` to `path` through a uniquely named temp file in the same
/// directory, then rename. Readers never observe a truncated file and
/// concurrent writers never share a temp file.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
