//! Local persistence for fetched resources.
//!
//! One file per resource in the download directory, created or truncated on
//! each write. Colliding filenames are last-writer-wins; nothing here locks
//! or versions the target. A failure mid-write leaves the file contents
//! unspecified.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Writes `data` to `dir/filename`, creating or overwriting the file.
/// The file handle is scoped to this call and released on every exit path.
pub fn write_bytes(dir: &Path, filename: &str, data: &[u8]) -> io::Result<()> {
    let path = dir.join(filename);
    let mut file = File::create(&path)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}

/// Async variant used by the cooperative strategy, so disk I/O is a
/// suspension point rather than a stall for sibling tasks.
pub async fn write_bytes_async(dir: &Path, filename: &str, data: &[u8]) -> io::Result<()> {
    tokio::fs::write(dir.join(filename), data).await
}
