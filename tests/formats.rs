//! End-to-end output format checks: a fixed synthetic segment sequence must
//! serialize to byte-identical, format-correct output for every format.

use verbatim::json_encoder::JsonEncoder;
use verbatim::segment_encoder::SegmentEncoder;
use verbatim::segments::Segment;
use verbatim::srt_encoder::SrtEncoder;
use verbatim::txt_encoder::TxtEncoder;
use verbatim::vtt_encoder::VttEncoder;

fn fixture_segments() -> Vec<Segment> {
    vec![
        Segment {
            start_seconds: 0.0,
            end_seconds: 1.2,
            text: "And so my fellow Americans".to_string(),
        },
        Segment {
            start_seconds: 1.2,
            end_seconds: 2.5,
            text: "ask not what your country can do for you".to_string(),
        },
        Segment {
            start_seconds: 61.25,
            end_seconds: 63.0,
            text: "ask what you can do for your country".to_string(),
        },
    ]
}

fn encode<E: SegmentEncoder>(mut encoder: E) -> E {
    for seg in fixture_segments() {
        encoder.write_segment(&seg).expect("write segment");
    }
    encoder.close().expect("close encoder");
    encoder
}

#[test]
fn txt_output_is_byte_identical() {
    let mut out = Vec::new();
    encode(TxtEncoder::new(&mut out));

    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "And so my fellow Americans\n\
         ask not what your country can do for you\n\
         ask what you can do for your country\n"
    );
}

#[test]
fn srt_output_is_byte_identical() {
    let mut out = Vec::new();
    encode(SrtEncoder::new(&mut out));

    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "1\n\
         00:00:00,000 --> 00:00:01,200\n\
         And so my fellow Americans\n\
         \n\
         2\n\
         00:00:01,200 --> 00:00:02,500\n\
         ask not what your country can do for you\n\
         \n\
         3\n\
         00:01:01,250 --> 00:01:03,000\n\
         ask what you can do for your country\n\
         \n"
    );
}

#[test]
fn vtt_output_is_byte_identical() {
    let mut out = Vec::new();
    encode(VttEncoder::new(&mut out));

    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "WEBVTT\n\
         \n\
         00:00:00.000 --> 00:00:01.200\n\
         And so my fellow Americans\n\
         \n\
         00:00:01.200 --> 00:00:02.500\n\
         ask not what your country can do for you\n\
         \n\
         00:01:01.250 --> 00:01:03.000\n\
         ask what you can do for your country\n\
         \n"
    );
}

#[test]
fn json_output_carries_full_text_and_timing() {
    let mut out = Vec::new();
    encode(JsonEncoder::new(&mut out));

    let parsed: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(
        parsed["text"],
        "And so my fellow Americans \
         ask not what your country can do for you \
         ask what you can do for your country"
    );

    let segments = parsed["segments"].as_array().expect("segments array");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0]["start"], 0.0);
    assert_eq!(segments[2]["text"], "ask what you can do for your country");

    let end = segments[2]["end"].as_f64().expect("end is a number");
    assert!((end - 63.0).abs() < 1e-6);
}

#[test]
fn serialization_is_deterministic_across_runs() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    encode(SrtEncoder::new(&mut first));
    encode(SrtEncoder::new(&mut second));
    assert_eq!(first, second);
}
