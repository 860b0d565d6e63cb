mod accumulator;
mod strategies;

#[cfg(test)]
mod tests;

pub use accumulator::TxAccumulator;

use strategies::KeyCase;

/// How a tag's payload folds into the transaction accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Header-style `Key: Value` lines with case-folded keys.
    HeaderFolded,
    /// Header-style lines that keep the key spelling (timestamps).
    HeaderVerbatim,
    /// Integer body byte count.
    Length,
    /// Custom log lines, accumulated as ordered lists per (level, key).
    VclLog,
    /// ACL checks, indexed per key in arrival order.
    VclAcl,
    /// Subroutine call/return/use verbs, kept as a boolean set.
    VclVerb,
    /// Transaction complete: finalize and reset.
    End,
    /// Anything else: last value wins.
    Default,
}

/// Map a record tag to its merge strategy.
///
/// `End` is structural and always wins over the catch-all, so a hypothetical
/// custom tag can never shadow transaction completion.
pub fn classify(tag: &str) -> Strategy {
    match tag {
        "BereqHeader" | "BerespHeader" | "ObjHeader" | "ReqHeader" | "RespHeader" => {
            Strategy::HeaderFolded
        }
        "Timestamp" => Strategy::HeaderVerbatim,
        "Length" => Strategy::Length,
        "VCL_Log" => Strategy::VclLog,
        "VCL_acl" => Strategy::VclAcl,
        "VCL_call" | "VCL_return" | "VCL_use" => Strategy::VclVerb,
        "End" => Strategy::End,
        _ => Strategy::Default,
    }
}

/// Fold one record's payload into the accumulator under its tag's rules.
///
/// `Strategy::End` carries no payload to merge and is a no-op here; the
/// aggregation engine finalizes the transaction instead of calling this.
pub fn apply(acc: &mut TxAccumulator, strategy: Strategy, tag: &str, payload: &str) {
    match strategy {
        Strategy::HeaderFolded => strategies::header(acc, tag, payload, KeyCase::Fold),
        Strategy::HeaderVerbatim => strategies::header(acc, tag, payload, KeyCase::Verbatim),
        Strategy::Length => strategies::length(acc, tag, payload),
        Strategy::VclLog => strategies::vcl_log(acc, tag, payload),
        Strategy::VclAcl => strategies::vcl_acl(acc, tag, payload),
        Strategy::VclVerb => strategies::vcl_verb(acc, tag, payload),
        Strategy::Default => strategies::last_wins(acc, tag, payload),
        Strategy::End => {}
    }
}
