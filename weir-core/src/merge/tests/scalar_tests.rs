use super::test_helpers::merged;
use crate::merge::{Strategy, classify};
use pretty_assertions::assert_eq;

#[test]
fn length_parses_to_integer() {
    let acc = merged(&[("Length", "4096")]);

    assert_eq!(acc.fields().get("Length").unwrap().as_i64(), Some(4096));
}

#[test]
fn non_numeric_length_stores_nothing() {
    let acc = merged(&[("Length", "not-a-number")]);

    assert!(acc.fields().get("Length").is_none());
    assert!(acc.is_empty());
}

#[test]
fn unknown_tag_stores_payload_verbatim() {
    let acc = merged(&[("ReqMethod", "GET")]);

    assert_eq!(acc.fields().get("ReqMethod").unwrap().as_str(), Some("GET"));
}

#[test]
fn unknown_tag_last_value_wins() {
    let acc = merged(&[("ReqURL", "/old"), ("ReqURL", "/new")]);

    assert_eq!(acc.fields().get("ReqURL").unwrap().as_str(), Some("/new"));
}

#[test]
fn end_tag_is_structural_not_default() {
    assert_eq!(classify("End"), Strategy::End);
}

#[test]
fn classify_covers_the_header_family() {
    for tag in ["BereqHeader", "BerespHeader", "ObjHeader", "ReqHeader", "RespHeader"] {
        assert_eq!(classify(tag), Strategy::HeaderFolded, "{tag}");
    }
    assert_eq!(classify("Timestamp"), Strategy::HeaderVerbatim);
}
