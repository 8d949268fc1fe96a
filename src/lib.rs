//! `verbatim` — a small, focused batch transcription library built on top of Whisper.
//!
//! This crate provides:
//! - Model loading and context management
//! - Media decoding (any Symphonia-supported container) into Whisper's input format
//! - Input resolution (paths and glob patterns) and output path derivation
//! - Pluggable output encoders (TXT, SRT, VTT, JSON)
//!
//! The library is designed to back the `verbatim` CLI but stays usable on its
//! own, with an emphasis on clarity, streaming output, and minimal surprises.

// High-level API (most consumers should start here).
pub mod engine;
pub mod opts;

// Core Whisper context management.
pub mod ctx;

// Segment data structures and transcription helpers.
pub mod segments;

// Media decoding into mono 16 kHz samples.
pub mod audio;

// Input resolution and output path derivation.
pub mod inputs;
pub mod outpath;

// Output selection and encoder interfaces.
pub mod output_format;
pub mod segment_encoder;

// Output encoders that serialize segments into various formats.
pub mod json_encoder;
pub mod srt_encoder;
pub mod txt_encoder;
pub mod vtt_encoder;

mod timestamp;

// Logging configuration and control.
pub mod logging;

mod error;

pub use error::{Error, Result};
