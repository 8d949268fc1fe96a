//! Output path derivation for transcripts.
//!
//! Two separable concerns live here:
//! - [`derive_output_path`] is a pure function of (input, `-o` argument,
//!   format). Running it twice with the same arguments yields the same path.
//! - [`unique_path`] consults the filesystem and appends `-1`, `-2`, ... to
//!   the stem until the path is free, so repeat runs never clobber an
//!   earlier transcript.

use std::path::{Path, PathBuf};

use crate::output_format::OutputFormat;

/// Derive the destination path for one input's transcript.
///
/// Rules:
/// - `-o` omitted: write alongside the input, same stem, format extension.
/// - `-o <dir>`: `<dir>/<input stem>.<ext>`.
/// - `-o <file>`: that exact path (the CLI restricts this to single-input runs).
pub fn derive_output_path(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> PathBuf {
    let ext = format.extension();

    match output {
        Some(out) if out.is_dir() => out.join(format!("{}.{ext}", stem_of(input))),
        Some(out) => out.to_path_buf(),
        None => input.with_extension(ext),
    }
}

/// Return `base` if it is free, otherwise the first `stem-N.ext` that is.
pub fn unique_path(base: &Path) -> PathBuf {
    if !base.exists() {
        return base.to_path_buf();
    }

    let stem = stem_of(base);
    let ext = base.extension().and_then(|ext| ext.to_str());
    let parent = base.parent().unwrap_or_else(|| Path::new(""));

    let mut counter: u32 = 1;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };

        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn stem_of(path: &Path) -> &str {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("transcript")
}
