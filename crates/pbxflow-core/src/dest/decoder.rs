//! The destination-string decoder.
//!
//! Grammar: `<kind-token>,<id>,<extra>`, comma-separated and positional.
//! Two token shapes exist in the wild:
//! - suffix-id tokens embed the target id in the token itself
//!   (`ivr-7,s,1`, `app-announcement-3,s,1`, `outrt-5,...`)
//! - argument-id tokens carry the id in the second field
//!   (`ext-group,600,1`, `timeconditions,3,truestate`)
//!
//! Decoding is total: any input outside the table, including the empty
//! string and inputs with too few fields, yields `TargetKind::Unknown`
//! with the raw text preserved.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{DestinationRef, TargetKind};

/// Voicemail box ids embedded in extension destinations:
/// `vmu4220` (unavailable), `vmb4220` (busy), `vms4220` (no-message).
static VOICEMAIL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^vm([ubs])(\d+)$").expect("static regex"));

/// Decode a raw destination string into a typed reference. Never fails.
pub fn decode(raw: &str) -> DestinationRef {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DestinationRef::unknown(raw);
    }

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if fields.len() < 2 {
        return DestinationRef::unknown(raw);
    }

    let token = fields[0];
    let arg = fields[1];
    let extra = fields.get(2).copied().filter(|s| !s.is_empty());

    // Suffix-id tokens: the second field is the dialplan entry point
    // (conventionally `s`), kept as the sub-selector.
    for (prefix, kind) in [
        ("ivr-", TargetKind::Ivr),
        ("app-announcement-", TargetKind::Announcement),
        ("outrt-", TargetKind::OutboundRoute),
    ] {
        if let Some(id) = token.strip_prefix(prefix) {
            if is_digits(id) {
                return DestinationRef {
                    kind,
                    target_id: id.to_string(),
                    sub_selector: non_empty(arg),
                    raw: raw.to_string(),
                };
            }
        }
    }

    // Argument-id tokens: the second field is the target id.
    let kind = match token {
        "ext-group" => Some(TargetKind::RingGroup),
        "ext-queues" => Some(TargetKind::Queue),
        "timeconditions" => Some(TargetKind::TimeCondition),
        "ext-trunk" => Some(TargetKind::Trunk),
        "app-blackhole" => Some(TargetKind::Hangup),
        "ext-local" | "from-did-direct" => {
            // Voicemail boxes reuse the local-extension context with a
            // prefixed mailbox id.
            if let Some(caps) = VOICEMAIL_ID.captures(arg) {
                return DestinationRef {
                    kind: TargetKind::Voicemail,
                    target_id: caps[2].to_string(),
                    sub_selector: Some(caps[1].to_string()),
                    raw: raw.to_string(),
                };
            }
            Some(TargetKind::Extension)
        }
        _ => None,
    };

    match kind {
        Some(TargetKind::Hangup) => DestinationRef {
            kind: TargetKind::Hangup,
            // The id field is a fixed `hangup` sentinel; normalize so all
            // hang-up leaves converge onto one node.
            target_id: "hangup".to_string(),
            sub_selector: extra.map(str::to_string),
            raw: raw.to_string(),
        },
        Some(kind) if !arg.is_empty() => DestinationRef {
            kind,
            target_id: arg.to_string(),
            sub_selector: extra.map(str::to_string),
            raw: raw.to_string(),
        },
        _ => DestinationRef::unknown(raw),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_token_requires_numeric_id() {
        assert_eq!(decode("ivr-x,s,1").kind, TargetKind::Unknown);
        assert_eq!(decode("ivr-,s,1").kind, TargetKind::Unknown);
        assert_eq!(decode("ivr-12,s,1").kind, TargetKind::Ivr);
    }

    #[test]
    fn argument_token_requires_id() {
        assert_eq!(decode("ext-group,,1").kind, TargetKind::Unknown);
        assert_eq!(decode("ext-group,600,1").kind, TargetKind::RingGroup);
    }
}
