use crate::event::Event;
use crate::fields::FieldMap;
use crate::record::Direction;
use crate::sink::{EventSink, JsonLinesSink};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;

fn sample_event(count: u64) -> Event {
    let mut headers = FieldMap::new();
    headers.insert("host", "example.com");
    headers.insert("accept", "*/*");

    let mut tx = FieldMap::new();
    tx.insert("ReqHeader", crate::fields::FieldValue::Map(headers));
    tx.insert("Length", 128i64);

    Event {
        timestamp: Utc::now(),
        count,
        direction: Direction::Client,
        vxid: 42,
        tx,
    }
}

#[test]
fn writes_one_json_document_per_line() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let mut sink = JsonLinesSink::file(file.path()).unwrap();
    sink.publish(sample_event(1));
    sink.publish(sample_event(2));
    sink.close();

    let contents = fs::read_to_string(file.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["count"], 1);
    assert_eq!(first["type"], "client");
    assert_eq!(first["vxid"], 42);
    assert!(first["@timestamp"].is_string());
}

#[test]
fn event_fields_serialize_with_their_wire_shapes() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let mut sink = JsonLinesSink::file(file.path()).unwrap();
    sink.publish(sample_event(1));
    sink.close();

    let contents = fs::read_to_string(file.path()).unwrap();
    let event: Value = serde_json::from_str(contents.trim_end()).unwrap();

    assert_eq!(event["tx"]["ReqHeader"]["host"], "example.com");
    assert_eq!(event["tx"]["Length"], 128);

    // Insertion order survives into the serialized text.
    let host = contents.find("\"host\"").unwrap();
    let accept = contents.find("\"accept\"").unwrap();
    assert!(host < accept);
}
