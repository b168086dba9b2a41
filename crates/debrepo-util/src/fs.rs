use std::path::Path;

/// Read a text file, returning `None` when it does not exist.
///
/// Any other I/O failure is propagated.
pub fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} not found, skipping", path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Size in bytes of the regular file at `path`, or `None` if there is no such file.
pub fn file_size(path: &Path) -> std::io::Result<Option<u64>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
