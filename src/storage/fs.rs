//! Permission-aware filesystem helpers

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;

/// Create `path` and any missing parents with `mode` (unix)
pub fn create_dir_all(path: &Path, mode: u32) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)?;
    Ok(())
}

/// Create or truncate `path`, then write `bytes` into it.
///
/// `mode` applies only when the file is newly created (unix). The file is
/// truncated before writing, so an interrupted call leaves partial content.
pub fn write_file(path: &Path, bytes: &[u8], mode: u32) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

/// Write `bytes` to `temp`, then rename it over `path`.
///
/// On failure the staging file is removed before the error is returned.
pub fn write_atomic(temp: &Path, path: &Path, bytes: &[u8], mode: u32) -> Result<()> {
    let result = write_file(temp, bytes, mode).and_then(|()| {
        fs::rename(temp, path)?;
        Ok(())
    });

    if result.is_err() {
        if let Err(e) = fs::remove_file(temp) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %temp.display(), error = %e, "failed to remove staging file");
            }
        }
    }
    result
}
