//! Input resolution: expand CLI paths and glob patterns into a concrete,
//! ordered list of files to transcribe.
//!
//! Policy:
//! - Arguments containing glob metacharacters (`*`, `?`, `[`) are expanded
//!   with the `glob` crate; matches are sorted so batch runs are deterministic.
//! - Literal paths pass through untouched, preserving argument order.
//! - Every resolved path must exist and carry a supported extension; we fail
//!   the whole run up front rather than partway through a batch.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Extensions we accept as transcription input.
///
/// This is a container allowlist, not a codec guarantee: probing may still
/// fail for an exotic stream inside a supported container, and that error
/// surfaces at decode time.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "aac", "aif", "aiff", "flac", "m4a", "mkv", "mov", "mp3", "mp4", "oga", "ogg", "opus", "wav",
    "webm", "wma",
];

/// Expand paths and glob patterns into an ordered list of existing, supported files.
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if has_glob_meta(pattern) {
            let mut matched: Vec<PathBuf> = glob::glob(pattern)?
                .filter_map(|entry| entry.ok())
                .collect();
            matched.sort();
            paths.extend(matched);
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    if paths.is_empty() {
        return Err(Error::NoInputs);
    }

    for path in &paths {
        if !path.exists() {
            return Err(Error::InputNotFound(path.clone()));
        }
        ensure_supported(path)?;
    }

    Ok(paths)
}

/// Check a single path against the supported extension set.
///
/// Matching is case-insensitive (`.WAV` is fine). A path with no extension is
/// rejected because the extension also serves as the container probe hint.
pub fn ensure_supported(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(Error::UnsupportedExtension(path.to_path_buf())),
    }
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
