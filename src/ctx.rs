use std::path::Path;

use anyhow::{Context, Result, ensure};
use whisper_rs::{WhisperContext, WhisperContextParameters};

use crate::logging::silence_whisper_logs;

/// Load a Whisper model and return an initialized `WhisperContext`.
///
/// Why this exists:
/// - We centralize model loading in one place so error handling and defaults stay consistent.
///
/// We check the path ourselves before handing it to whisper.cpp, whose own
/// "failed to load" error doesn't distinguish a missing file from a corrupt one.
pub fn get_context(model_path: &str) -> Result<WhisperContext> {
    // whisper.cpp logs straight to stderr; keep it quiet so binaries fully
    // control their own output.
    silence_whisper_logs();

    let path = Path::new(model_path);
    ensure!(
        path.exists(),
        "model not found at '{model_path}' (fetch one with model-downloader, or pass --model)"
    );
    ensure!(path.is_file(), "model path is not a file: '{model_path}'");

    let ctx_params = WhisperContextParameters::default();
    let ctx = WhisperContext::new_with_params(model_path, ctx_params)
        .with_context(|| format!("failed to load model from path: {model_path}"))?;

    Ok(ctx)
}
