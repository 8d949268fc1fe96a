//! Model-backed end-to-end tests.
//!
//! These are `#[ignore]`d by default because they need a whisper.cpp model on
//! disk. Fetch one first:
//!
//! ```text
//! cargo run --features bin-model-downloader --bin model-downloader -- --name base.en
//! cargo test -- --ignored
//! ```

use std::path::Path;

use verbatim::engine::Transcriber;
use verbatim::opts::Opts;
use verbatim::output_format::OutputFormat;

const MODEL_PATH: &str = "./models/ggml-base.en.bin";

fn write_silence_wav(path: &Path, seconds: f32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for _ in 0..(16_000.0 * seconds) as u32 {
        writer.write_sample(0i16).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

#[test]
#[ignore = "requires a local whisper model"]
fn transcribes_wav_to_valid_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let wav = dir.path().join("silence.wav");
    write_silence_wav(&wav, 2.0);

    let transcriber = Transcriber::new(MODEL_PATH).expect("load model");

    let opts = Opts {
        enable_translate_to_english: false,
        language: Some("en".to_string()),
        format: OutputFormat::Json,
    };

    let mut out = Vec::new();
    transcriber
        .transcribe_file(&wav, &mut out, &opts)
        .expect("transcribe");

    // Whatever the model hears (or doesn't), the output must be a valid
    // transcript document.
    let parsed: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert!(parsed["text"].is_string());
    assert!(parsed["segments"].is_array());
}

#[test]
#[ignore = "requires a local whisper model"]
fn model_is_reused_across_a_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("a.wav");
    let second = dir.path().join("b.wav");
    write_silence_wav(&first, 1.0);
    write_silence_wav(&second, 1.0);

    let transcriber = Transcriber::new(MODEL_PATH).expect("load model");
    let opts = Opts {
        format: OutputFormat::Txt,
        ..Opts::default()
    };

    for wav in [&first, &second] {
        let mut out = Vec::new();
        transcriber
            .transcribe_file(wav, &mut out, &opts)
            .expect("transcribe");
    }
}
