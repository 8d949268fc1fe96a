use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Result, ensure};
use clap::Parser;

use verbatim::engine::Transcriber;
use verbatim::inputs::resolve_inputs;
use verbatim::opts::Opts;
use verbatim::outpath::{derive_output_path, unique_path};
use verbatim::output_format::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "verbatim")]
#[command(version)]
#[command(about = "Transcribe audio and video files to text, subtitles, or JSON")]
struct Args {
    /// Input file path(s); glob patterns are supported (e.g. *.mp3)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Txt
    )]
    format: OutputFormat,

    /// Output destination: a file (single input), a directory, or '-' for stdout.
    /// When omitted, each transcript is written alongside its input.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Path to a whisper.cpp GGML model file
    #[arg(
        short = 'm',
        long = "model",
        env = "VERBATIM_MODEL",
        default_value = "./models/ggml-base.en.bin"
    )]
    model: String,

    /// Language hint (e.g. "en"); Whisper auto-detects when omitted
    #[arg(short = 'l', long = "language")]
    language: Option<String>,

    /// Translate speech to English instead of transcribing verbatim
    #[arg(long, default_value_t = false)]
    translate: bool,

    /// Suppress progress messages; only print resulting output paths
    #[arg(short = 'q', long = "quiet", default_value_t = false)]
    quiet: bool,
}

fn main() -> ExitCode {
    verbatim::logging::init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the batch. Returns `Ok(false)` when any input failed to transcribe;
/// setup errors (bad arguments, missing model) abort the whole run instead.
fn run(args: &Args) -> Result<bool> {
    let inputs = resolve_inputs(&args.inputs)?;

    let to_stdout = args.output.as_deref() == Some(Path::new("-"));

    // Batch destination rules: multiple transcripts can't share a single file
    // or an interleaved stdout stream.
    if inputs.len() > 1 {
        ensure!(!to_stdout, "output '-' (stdout) only works with a single input");
        if let Some(output) = &args.output {
            ensure!(
                output.is_dir(),
                "output must be a directory when processing multiple files"
            );
        }
    }

    let opts = Opts {
        enable_translate_to_english: args.translate,
        language: args.language.clone(),
        format: args.format,
    };

    if !args.quiet {
        eprintln!("Loading model {}...", args.model);
    }
    let transcriber = Transcriber::new(&args.model)?;

    let mut all_ok = true;
    for input in &inputs {
        if !args.quiet {
            eprintln!("Processing {}...", input.display());
        }

        if let Err(err) = transcribe_one(&transcriber, input, args, to_stdout, &opts) {
            if !args.quiet {
                eprintln!(
                    "Error: transcription failed for {}: {err:#}",
                    input.display()
                );
            }
            all_ok = false;
        }
    }

    Ok(all_ok)
}

fn transcribe_one(
    transcriber: &Transcriber,
    input: &Path,
    args: &Args,
    to_stdout: bool,
    opts: &Opts,
) -> Result<()> {
    if to_stdout {
        let stdout = io::stdout();
        transcriber.transcribe_file(input, stdout.lock(), opts)?;
        return Ok(());
    }

    // Encode into memory first so a failed transcription never leaves a
    // partial file behind.
    let mut encoded = Vec::new();
    transcriber.transcribe_file(input, &mut encoded, opts)?;

    let derived = derive_output_path(input, args.output.as_deref(), args.format);
    let out_path = unique_path(&derived);
    std::fs::write(&out_path, &encoded)?;

    // The output path goes to stdout even in quiet mode; it is the one piece
    // of output scripts can rely on.
    println!("{}", out_path.display());
    Ok(())
}
