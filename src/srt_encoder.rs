use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::timestamp::format_timestamp;

/// A `SegmentEncoder` that writes segments in SubRip (SRT) format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - Cue numbers start at 1 and increment per segment, as SRT requires.
///
/// Example output:
/// ```text
/// 1
/// 00:00:00,000 --> 00:00:01,200
/// hello
///
/// 2
/// 00:00:01,200 --> 00:00:02,500
/// world
/// ```
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// The 1-based index of the next cue.
    next_index: u64,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    /// Write a single numbered cue in SRT format.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        // SRT timestamps use `HH:MM:SS,mmm`.
        let start = format_timestamp(seg.start_seconds, ',');
        let end = format_timestamp(seg.end_seconds, ',');

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", seg.text)?;

        // Blank line separates cues.
        writeln!(&mut self.w)?;

        self.next_index += 1;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

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
    fn srt_numbers_cues_sequentially_from_one() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);

        enc.write_segment(&seg(0.0, 1.2, "hello"))?;
        enc.write_segment(&seg(1.2, 2.5, "world"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out).expect("utf8");
        assert_eq!(
            s,
            "1\n00:00:00,000 --> 00:00:01,200\nhello\n\n\
             2\n00:00:01,200 --> 00:00:02,500\nworld\n\n"
        );
        Ok(())
    }

    #[test]
    fn srt_close_without_segments_emits_nothing() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn srt_uses_comma_millisecond_separator() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.write_segment(&seg(3661.5, 3662.0, "late cue"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out).expect("utf8");
        assert!(s.contains("01:01:01,500 --> 01:01:02,000"));
        Ok(())
    }

    #[test]
    fn srt_write_after_close_errors() -> crate::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
