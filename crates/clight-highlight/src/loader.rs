use std::path::{Path, PathBuf};

use tracing::debug;

/// Failure to load a source file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is empty", .path.display())]
    EmptyFile { path: PathBuf },
}

/// Read a whole file and split it into lines.
pub fn load_lines(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.is_empty() {
        return Err(LoadError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let lines = split_lines(&contents);
    debug!(path = %path.display(), bytes = contents.len(), lines = lines.len(), "loaded file");
    Ok(lines)
}

/// Split on `\n`. A final line without a terminator is kept; a trailing
/// terminator does not start an extra empty line.
pub fn split_lines(contents: &[u8]) -> Vec<Vec<u8>> {
    if contents.is_empty() {
        return Vec::new();
    }
    let body = contents.strip_suffix(b"\n").unwrap_or(contents);
    body.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}
