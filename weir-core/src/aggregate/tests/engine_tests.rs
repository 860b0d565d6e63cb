use crate::aggregate::Aggregator;
use crate::record::{Direction, LogRecord};
use pretty_assertions::assert_eq;

fn rec(vxid: u32, tag: &str, direction: Direction, payload: &str) -> LogRecord {
    LogRecord::new(vxid, tag, direction, payload)
}

#[test]
fn end_produces_one_event_with_accumulated_fields() {
    let mut agg = Aggregator::new();

    assert!(
        agg.ingest(&rec(42, "ReqHeader", Direction::Client, "Host: example.com"))
            .is_none()
    );
    let event = agg
        .ingest(&rec(42, "End", Direction::Client, ""))
        .expect("End must emit");

    assert_eq!(event.vxid, 42);
    assert_eq!(event.direction, Direction::Client);
    assert_eq!(event.count, 1);

    let headers = event.tx.get("ReqHeader").unwrap().as_map().unwrap();
    assert_eq!(headers.get("host").unwrap().as_str(), Some("example.com"));
}

#[test]
fn end_resets_the_transaction() {
    let mut agg = Aggregator::new();

    agg.ingest(&rec(7, "ReqHeader", Direction::Client, "Host: one"));
    agg.ingest(&rec(7, "End", Direction::Client, ""));

    // The same vxid after End starts from a clean slate.
    agg.ingest(&rec(7, "ReqHeader", Direction::Client, "Accept: */*"));
    let event = agg.ingest(&rec(7, "End", Direction::Client, "")).unwrap();

    let headers = event.tx.get("ReqHeader").unwrap().as_map().unwrap();
    assert!(headers.get("host").is_none());
    assert_eq!(headers.get("accept").unwrap().as_str(), Some("*/*"));
}

#[test]
fn end_without_prior_records_emits_empty_event() {
    let mut agg = Aggregator::new();

    let event = agg.ingest(&rec(9, "End", Direction::Backend, "")).unwrap();

    assert!(event.tx.is_empty());
    assert_eq!(event.direction, Direction::Backend);
    assert_eq!(agg.in_flight(), 0);
}

#[test]
fn sequence_numbers_start_at_one_and_have_no_gaps() {
    let mut agg = Aggregator::new();

    let counts: Vec<u64> = (10..15u32)
        .map(|vxid| {
            agg.ingest(&rec(vxid, "End", Direction::Client, ""))
                .unwrap()
                .count
        })
        .collect();

    assert_eq!(counts, vec![1, 2, 3, 4, 5]);
}

#[test]
fn interleaved_transactions_stay_isolated() {
    let mut agg = Aggregator::new();

    agg.ingest(&rec(1, "ReqHeader", Direction::Client, "Host: first"));
    agg.ingest(&rec(2, "ReqHeader", Direction::Client, "Host: second"));
    agg.ingest(&rec(1, "VCL_call", Direction::Client, "RECV"));

    let second = agg.ingest(&rec(2, "End", Direction::Client, "")).unwrap();
    let first = agg.ingest(&rec(1, "End", Direction::Client, "")).unwrap();

    let second_headers = second.tx.get("ReqHeader").unwrap().as_map().unwrap();
    assert_eq!(second_headers.get("host").unwrap().as_str(), Some("second"));
    assert!(second.tx.get("VCL_call").is_none());

    let first_headers = first.tx.get("ReqHeader").unwrap().as_map().unwrap();
    assert_eq!(first_headers.get("host").unwrap().as_str(), Some("first"));
    assert!(first.tx.get("VCL_call").is_some());
}

#[test]
fn other_direction_records_are_dropped() {
    let mut agg = Aggregator::new();

    assert!(
        agg.ingest(&rec(3, "ReqHeader", Direction::Other, "Host: nope"))
            .is_none()
    );
    assert_eq!(agg.in_flight(), 0);

    // Even a structural End is ignored on a session record.
    assert!(agg.ingest(&rec(3, "End", Direction::Other, "")).is_none());
}

#[test]
fn direction_filter_drops_disabled_sides() {
    let mut agg = Aggregator::with_directions(true, false);

    agg.ingest(&rec(4, "BereqHeader", Direction::Backend, "Host: origin"));
    assert_eq!(agg.in_flight(), 0);
    assert!(agg.ingest(&rec(4, "End", Direction::Backend, "")).is_none());

    // Client side still flows.
    agg.ingest(&rec(5, "ReqHeader", Direction::Client, "Host: edge"));
    assert!(agg.ingest(&rec(5, "End", Direction::Client, "")).is_some());
}

#[test]
fn filtered_records_do_not_consume_sequence_numbers() {
    let mut agg = Aggregator::with_directions(false, true);

    agg.ingest(&rec(6, "End", Direction::Client, ""));
    let event = agg.ingest(&rec(8, "End", Direction::Backend, "")).unwrap();

    assert_eq!(event.count, 1);
}
