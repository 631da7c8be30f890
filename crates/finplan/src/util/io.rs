//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write content to a file atomically using write-then-rename pattern.
///
/// This prevents data corruption if the process is interrupted during write.
/// The content is first written to a temporary file, then atomically renamed
/// to the target path.
///
/// # Arguments
/// * `path` - Target file path
/// * `content` - Content to write
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("config.yaml"), &yaml_content)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    // Create temp file path with .tmp extension
    let temp_path = path.with_extension("yaml.tmp");

    // Write to temp file first
    fs::write(&temp_path, content)?;

    // Atomically rename temp file to target (atomic on POSIX systems)
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write bytes to a file atomically using write-then-rename pattern.
pub fn atomic_write_bytes(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
