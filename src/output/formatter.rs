use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{GenerateError, Result};

/// Write generated text verbatim to `target`, or to stdout when `target` is `None`.
///
/// Parent directories of `target` are created as needed.
pub fn write_output(target: Option<&Path>, contents: &str) -> Result<()> {
    let Some(path) = target else {
        let mut stdout = std::io::stdout().lock();
        return stdout
            .write_all(contents.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|source| io_error("<stdout>", source));
    };

    validate_target(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    std::fs::write(path, contents).map_err(|source| io_error(path, source))?;

    info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn validate_target(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(invalid_target(path, "output path must not be empty"));
    }
    if path.file_name().is_none() || path.is_dir() {
        return Err(invalid_target(path, "output path must name a file"));
    }
    Ok(())
}

fn invalid_target(path: &Path, message: &str) -> GenerateError {
    io_error(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidInput, message),
    )
}

fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
