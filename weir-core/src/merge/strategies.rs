use super::accumulator::TxAccumulator;
use crate::fields::FieldValue;

/// Stored in place of a header value when the log writer truncated the line
/// before the key/value separator.
const TRUNCATED: &str = "truncated";

/// Level assigned to custom log lines whose key carries no `LEVEL_` prefix.
const UNKNOWN_LEVEL: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyCase {
    /// Lower-case the key (request/response/object header lines).
    Fold,
    /// Keep the key as written (timestamp lines).
    Verbatim,
}

impl KeyCase {
    fn normalize(self, key: &str) -> String {
        match self {
            KeyCase::Fold => key.to_lowercase(),
            KeyCase::Verbatim => key.to_owned(),
        }
    }
}

/// `Key: Value` lines. Repeated records for the same tag merge into one
/// nested map. Content-Length is the one value worth typing as a number;
/// a non-numeric Content-Length stores nothing rather than failing.
pub(super) fn header(acc: &mut TxAccumulator, tag: &str, payload: &str, case: KeyCase) {
    let entry = acc.fields_mut().map_entry(tag);

    match payload.split_once(": ") {
        Some((raw_key, value)) => {
            let key = case.normalize(raw_key);
            if key.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.trim().parse::<i64>() {
                    entry.insert(key, n);
                }
            } else {
                entry.insert(key, value);
            }
        }
        // The log writer truncates over-long header lines; record the marker
        // instead of guessing where the split would have been.
        None => {
            entry.insert(case.normalize(payload), TRUNCATED);
        }
    }
}

/// Integer payload stored directly under the tag. A non-numeric payload
/// stores nothing; a single malformed line never aborts the transaction.
pub(super) fn length(acc: &mut TxAccumulator, tag: &str, payload: &str) {
    if let Ok(n) = payload.trim().parse::<i64>() {
        acc.fields_mut().insert(tag, n);
    }
}

/// `LEVEL_KEY: VALUE` or `KEY: VALUE` lines, appended to an ordered list at
/// `tag → level → key`. This tag fires many times per transaction and
/// earlier lines must survive, so values accumulate instead of overwriting.
pub(super) fn vcl_log(acc: &mut TxAccumulator, tag: &str, payload: &str) {
    let (level, key, value) = match payload.split_once(':') {
        Some((left, right)) => {
            let value = right.trim().to_owned();
            match left.split_once('_') {
                Some((level, key)) if !level.is_empty() && !key.is_empty() => {
                    (level.trim().to_owned(), key.trim().to_owned(), value)
                }
                _ => (UNKNOWN_LEVEL.to_owned(), left.trim().to_owned(), value),
            }
        }
        // No separator at all: keep the line under its bare key with a
        // literal "null" value.
        None => (
            UNKNOWN_LEVEL.to_owned(),
            payload.trim().to_owned(),
            "null".to_owned(),
        ),
    };

    acc.fields_mut()
        .map_entry(tag)
        .map_entry(&level)
        .list_entry(&key)
        .push(FieldValue::String(value));
}

/// `KEY [VALUE]` ACL check lines. Each occurrence lands under `key.N`, with
/// N counting occurrences of that key within the transaction from zero. An
/// ACL check that prints no verdict text is stored as boolean true.
pub(super) fn vcl_acl(acc: &mut TxAccumulator, tag: &str, payload: &str) {
    let (key, value) = match payload.split_once(' ') {
        Some((key, rest)) => (key.to_owned(), FieldValue::from(rest.trim())),
        None => (payload.to_owned(), FieldValue::Bool(true)),
    };

    let index = acc.next_acl_index(&key);
    acc.fields_mut()
        .map_entry(tag)
        .insert(format!("{key}.{index}"), value);
}

/// Subroutine call/return/use verbs. Set semantics: entering the same
/// subroutine twice within a transaction is one membership.
pub(super) fn vcl_verb(acc: &mut TxAccumulator, tag: &str, payload: &str) {
    acc.fields_mut().map_entry(tag).insert(payload, true);
}

/// Catch-all for unrecognized tags: the payload verbatim, last value wins.
pub(super) fn last_wins(acc: &mut TxAccumulator, tag: &str, payload: &str) {
    acc.fields_mut().insert(tag, payload);
}
