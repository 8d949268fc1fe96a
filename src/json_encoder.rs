use std::io::Write;

use serde::Serialize;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes a single JSON object describing the transcript.
///
/// Unlike the subtitle encoders, this one buffers segments in memory: the
/// top-level object carries the concatenated `text` of the whole transcript,
/// which isn't known until the final segment arrives.
///
/// Example output:
/// ```json
/// {
///   "text": "hello world",
///   "segments": [
///     { "start": 0.0, "end": 1.2, "text": "hello" },
///     { "start": 1.2, "end": 2.5, "text": "world" }
///   ]
/// }
/// ```
pub struct JsonEncoder<W: Write> {
    w: W,
    segments: Vec<Segment>,
    closed: bool,
}

/// The serialized shape of a full transcript.
#[derive(Serialize)]
struct TranscriptDocument<'a> {
    text: String,
    segments: &'a [Segment],
}

impl<W: Write> JsonEncoder<W> {
    /// Create a new JSON encoder that writes to the given writer.
    ///
    /// Nothing is written until `close`; an empty transcript still produces a
    /// valid JSON object with an empty `text` and `segments`.
    pub fn new(w: W) -> Self {
        Self {
            w,
            segments: Vec::new(),
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for JsonEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        self.segments.push(seg.clone());
        Ok(())
    }

    /// Serialize the buffered transcript and flush the underlying writer.
    ///
    /// This method is idempotent:
    /// - Calling `close()` multiple times is safe.
    /// - After closing, no further segments may be written.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        let text = self
            .segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let doc = TranscriptDocument {
            text,
            segments: &self.segments,
        };

        serde_json::to_writer_pretty(&mut self.w, &doc)?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f32, end: f32, text: &str) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn json_close_without_segments_emits_empty_document() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonEncoder::new(&mut out);
        enc.close()?;

        let parsed: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(parsed["text"], "");
        assert_eq!(parsed["segments"].as_array().map(Vec::len), Some(0));
        Ok(())
    }

    #[test]
    fn json_joins_segment_text_and_keeps_timing() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonEncoder::new(&mut out);

        enc.write_segment(&seg(0.0, 1.0, "hello"))?;
        enc.write_segment(&seg(1.0, 2.5, "world"))?;
        enc.close()?;

        let parsed: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(parsed["text"], "hello world");

        let arr = parsed["segments"].as_array().expect("expected JSON array");
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["text"], "hello");
        assert_eq!(arr[0]["start"], 0.0);
        assert_eq!(arr[1]["end"], 2.5);
        Ok(())
    }

    #[test]
    fn json_close_is_idempotent() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonEncoder::new(&mut out);
        enc.close()?;
        enc.close()?;

        let parsed: serde_json::Value = serde_json::from_slice(&out)?;
        assert!(parsed.is_object());
        Ok(())
    }

    #[test]
    fn json_write_after_close_errors() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
