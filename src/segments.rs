//! Segment extraction from a Whisper inference pass.
//!
//! Whisper hands us timestamps in centiseconds; everything downstream of this
//! module works in seconds.

use anyhow::{Context, Result};
use serde::Serialize;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperSegment, WhisperState};

use crate::opts::Opts;

/// A single timed span of transcribed text.
///
/// Segments are emitted in the order the model produced them; we don't reorder
/// or merge them.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Segment {
    /// Start time in seconds.
    #[serde(rename = "start")]
    pub start_seconds: f32,

    /// End time in seconds.
    #[serde(rename = "end")]
    pub end_seconds: f32,

    /// Transcribed text for this span.
    pub text: String,
}

/// Run a full Whisper pass over `samples` and hand each segment to `on_segment`.
///
/// Backpressure/lifecycle notes:
/// - `on_segment` errors abort the pass and propagate.
/// - We do not close or flush any encoder here; the caller owns the encoder lifecycle.
pub fn emit_segments(
    ctx: &WhisperContext,
    opts: &Opts,
    samples: &[f32],
    on_segment: &mut dyn FnMut(&Segment) -> Result<()>,
) -> Result<()> {
    let state = run_whisper_full(ctx, opts, samples)?;
    for whisper_segment in state.as_iter() {
        let segment = to_segment(whisper_segment)?;
        on_segment(&segment)?;
    }
    Ok(())
}

fn to_segment(segment: WhisperSegment) -> Result<Segment> {
    // Whisper emits a leading space on most segments; trim so encoders don't
    // have to care.
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .trim()
        .to_owned();

    Ok(Segment {
        start_seconds: centiseconds_to_seconds(segment.start_timestamp()),
        end_seconds: centiseconds_to_seconds(segment.end_timestamp()),
        text,
    })
}

/// Convert whisper's centisecond timestamps to seconds.
///
/// Whisper uses -1 for unknown; clamp to 0 so consumers never see negative time.
pub(crate) fn centiseconds_to_seconds(value: i64) -> f32 {
    if value < 0 { 0.0 } else { value as f32 / 100.0 }
}

fn build_full_params(opts: &Opts) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(opts.enable_translate_to_english);
    params.set_language(opts.language.as_deref());
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params
}

fn run_whisper_full(ctx: &WhisperContext, opts: &Opts, samples: &[f32]) -> Result<WhisperState> {
    let params = build_full_params(opts);

    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;

    state
        .full(params, samples)
        .context("failed to run whisper full()")?;

    Ok(state)
}
