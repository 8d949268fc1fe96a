//! Decode media files (audio/video containers) into mono `f32` samples at the
//! sample rate Whisper expects.
//!
//! This module is intentionally small and orchestration-focused:
//! - `demux` handles probing + packet iteration
//! - `decode` handles codec decoding
//! - `pipeline` handles PCM normalization (downmix + resample)
//!
//! Transcription is strictly one file at a time, so unlike a live-capture
//! pipeline we decode the whole input into a contiguous buffer before
//! inference.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use symphonia::core::io::MediaSource;

mod decode;
mod demux;
mod pipeline;

use pipeline::Pipeline;

/// The mono sample rate Whisper expects (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decode a media file into mono `f32` samples at [`TARGET_SAMPLE_RATE`].
///
/// The file extension (when present) is passed to the probe as a hint, which
/// improves detection for ambiguous containers.
pub fn decode_file(path: &Path) -> Result<Vec<f32>> {
    let file =
        File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;

    let hint_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    decode_source(Box::new(file), hint_extension.as_deref())
}

/// Shared implementation that takes an abstract Symphonia `MediaSource`.
fn decode_source(source: Box<dyn MediaSource>, hint_extension: Option<&str>) -> Result<Vec<f32>> {
    let (mut format, track) = demux::probe_and_pick_audio_track(source, hint_extension)?;

    let mut decoder = decode::make_decoder_for_track(&track)?;
    let mut pipeline = Pipeline::new();
    let mut samples = Vec::new();

    loop {
        let Some(packet) = demux::next_packet(&mut format)? else {
            break;
        };

        // Ignore packets from non-audio tracks (video files carry several).
        if packet.track_id() != track.id {
            continue;
        }

        // `decode_packet_and_then` returns `Ok(false)` for recoverable cases
        // (e.g. bad frames / IO end). We keep iterating.
        decode::decode_packet_and_then(&mut decoder, &packet, |decoded| {
            pipeline
                .push_decoded(&decoded, &mut samples)
                .context("audio pipeline failed while processing decoded samples")
        })?;
    }

    // Flush any buffered resampler tail.
    pipeline
        .finalize(&mut samples)
        .context("audio pipeline failed during finalize")?;

    tracing::debug!(
        samples = samples.len(),
        seconds = samples.len() as f32 / TARGET_SAMPLE_RATE as f32,
        "decoded audio"
    );

    Ok(samples)
}
