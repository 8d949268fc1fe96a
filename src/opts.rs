use crate::output_format::OutputFormat;

/// Options that control how a transcription is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// Whether to translate speech to English instead of transcribing verbatim.
    pub enable_translate_to_english: bool,

    /// Optional language hint (e.g. `"en"`, `"es"`).
    ///
    /// When `None`, we allow Whisper to auto-detect the spoken language.
    pub language: Option<String>,

    /// The desired output format for transcription segments.
    pub format: OutputFormat,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            enable_translate_to_english: false,
            language: None,
            format: OutputFormat::Txt,
        }
    }
}
