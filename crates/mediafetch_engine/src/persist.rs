use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Upper bound on `name (n).ext` candidates tried before giving up.
const MAX_NAME_ATTEMPTS: usize = 1000;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("no free filename for {0}")]
    NameExhausted(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes `bytes` to a new file in `dir`, never replacing an existing one.
///
/// Data goes to a temporary file in `dir` first and is renamed into place. The
/// temporary file is removed on every error path.
pub fn write_new_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
    ensure_output_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let target = dir.join(numbered(filename, attempt));
        match tmp.persist_noclobber(&target) {
            Ok(_) => return Ok(target),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => tmp = err.file,
            Err(err) => return Err(PersistError::Io(err.error)),
        }
    }
    Err(PersistError::NameExhausted(filename.to_string()))
}

/// `song.mp3`, `song (1).mp3`, `song (2).mp3`, ...
fn numbered(filename: &str, attempt: usize) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    match filename.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({attempt}){}", &filename[..dot], &filename[dot..]),
        _ => format!("{filename} ({attempt})"),
    }
}
