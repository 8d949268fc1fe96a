//! High-level API for running transcriptions.
//!
//! We expose a single, ergonomic entry point (`Transcriber`) that wraps the
//! lower-level decoding, Whisper, and encoding logic.
//!
//! The intent is:
//! - We load the Whisper model once (expensive).
//! - We reuse it to transcribe multiple inputs in a batch.
//! - Callers choose output format and behavior via `Opts`.
//!
//! This module is deliberately "high level": it wires up decoding → Whisper →
//! encoder, while keeping the lower-level pieces testable in their own modules.

use std::io::{BufWriter, Write};
use std::path::Path;

use whisper_rs::WhisperContext;

use crate::Result;
use crate::audio;
use crate::ctx::get_context;
use crate::json_encoder::JsonEncoder;
use crate::opts::Opts;
use crate::output_format::OutputFormat;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::emit_segments;
use crate::srt_encoder::SrtEncoder;
use crate::txt_encoder::TxtEncoder;
use crate::vtt_encoder::VttEncoder;

/// The main high-level transcription entry point.
///
/// `Transcriber` owns the one long-lived resource required for transcription:
/// a `WhisperContext` (loaded model + runtime state).
///
/// Typical usage:
/// - Construct once (model loading happens here).
/// - Call `transcribe_file` once per input in the batch.
pub struct Transcriber {
    ctx: WhisperContext,
}

impl Transcriber {
    /// Load a whisper.cpp model from disk and initialize a transcriber.
    pub fn new(model_path: impl AsRef<str>) -> Result<Self> {
        let ctx = get_context(model_path.as_ref())?;
        Ok(Self { ctx })
    }

    /// Access the underlying Whisper context.
    ///
    /// This is primarily intended for advanced or experimental use-cases.
    pub fn context(&self) -> &WhisperContext {
        &self.ctx
    }

    /// Transcribe a media file and write the encoded transcript to `w`.
    ///
    /// The file is decoded in full (any supported container), normalized to
    /// mono 16 kHz, run through Whisper, and serialized in the format selected
    /// by `opts.format`.
    pub fn transcribe_file<W: Write>(&self, input: &Path, w: W, opts: &Opts) -> Result<()> {
        let samples = audio::decode_file(input)?;
        self.transcribe_samples(&samples, w, opts)
    }

    /// Transcribe pre-decoded mono 16 kHz samples and write the encoded
    /// transcript to `w`.
    pub fn transcribe_samples<W: Write>(&self, samples: &[f32], w: W, opts: &Opts) -> Result<()> {
        // Buffer output for efficiency (especially important for stdout).
        let writer = BufWriter::new(w);

        // Select an encoder based on the requested output format.
        // We keep this explicit (no trait objects) to avoid lifetime surprises.
        match opts.format {
            OutputFormat::Txt => {
                let mut encoder = TxtEncoder::new(writer);
                let run_res = self.run(samples, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputFormat::Srt => {
                let mut encoder = SrtEncoder::new(writer);
                let run_res = self.run(samples, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputFormat::Vtt => {
                let mut encoder = VttEncoder::new(writer);
                let run_res = self.run(samples, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
            OutputFormat::Json => {
                let mut encoder = JsonEncoder::new(writer);
                let run_res = self.run(samples, opts, &mut encoder);
                merge_run_and_close(run_res, encoder.close())
            }
        }
    }

    fn run<E: SegmentEncoder>(&self, samples: &[f32], opts: &Opts, encoder: &mut E) -> Result<()> {
        // Silent or zero-length inputs still produce valid (empty) output:
        // the caller closes the encoder either way.
        if samples.is_empty() {
            tracing::debug!("no samples decoded; emitting empty transcript");
            return Ok(());
        }

        emit_segments(&self.ctx, opts, samples, &mut |seg| {
            encoder.write_segment(seg).map_err(anyhow::Error::from)
        })?;

        Ok(())
    }
}

/// Prefer the transcription error over the close error when both fail; never
/// lose a close failure on an otherwise clean run.
fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(run_err), _) => Err(run_err),
    }
}
