use chrome_ext::host::{decode_message, encode_message, MAX_FROM_BROWSER};
use chrome_ext::json::JsonValue;
use serde_json::json;
use std::io::Cursor;

#[test]
fn encode_then_decode_roundtrip() {
    let message = json!({ "key": "value", "n": 42, "unicode": "héllo 🌍" });
    let frame = encode_message(&message).expect("encode");
    // First 4 bytes = length
    let len = u32::from_ne_bytes(frame[0..4].try_into().unwrap()) as usize;
    assert_eq!(len, frame.len() - 4);

    let mut cur = Cursor::new(frame);
    let decoded = decode_message(&mut cur, MAX_FROM_BROWSER).expect("decode");
    let val: serde_json::Value = serde_json::from_str(&decoded).expect("json");
    assert_eq!(val, message);
}

#[test]
fn json_values_frame_like_their_text() {
    let value: JsonValue = [("b", JsonValue::from(true)), ("a", JsonValue::from(1))]
        .into_iter()
        .collect();
    let frame = encode_message(&value).expect("encode");
    assert_eq!(&frame[4..], br#"{"b":true,"a":1}"#);
}

#[test]
fn encode_message_enforces_1mb_limit() {
    let big = "x".repeat(1_200_000);
    let message = json!({ "blob": big });
    let err = encode_message(&message).expect_err("should exceed 1MB host->browser limit");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn decode_message_respects_max_size_cap() {
    // Claims 1024 bytes with no body; the cap of 8 must reject it before reading.
    let mut frame = Vec::new();
    frame.extend_from_slice(&(1024u32).to_ne_bytes());
    let mut cur = Cursor::new(frame);
    let err = decode_message(&mut cur, 8).expect_err("should reject over cap");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn decode_message_invalid_utf8() {
    let mut frame = Vec::new();
    let body = vec![0xff, 0xfe, 0xfd];
    frame.extend_from_slice(&(body.len() as u32).to_ne_bytes());
    frame.extend_from_slice(&body);
    let mut cur = Cursor::new(frame);
    let err = decode_message(&mut cur, 1024).expect_err("invalid utf-8 should error");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn decode_message_on_empty_input_is_eof() {
    let mut cur = Cursor::new(Vec::<u8>::new());
    let err = decode_message(&mut cur, 1024).expect_err("nothing to read");
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}
