// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use crate::error::{InfraIdError, InfraIdResult};

/// Replaces every character outside `[A-Za-z0-9-]` with `-`, collapses
/// runs of `-` and trims `-` from the right.
///
/// A leading `-` is kept when the input starts with a non-alphanumeric
/// character.
pub fn normalize(raw: &str) -> InfraIdResult<String> {
    let mut normalized = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let ch = if ch.is_ascii_alphanumeric() { ch } else { '-' };
        if ch == '-' && normalized.ends_with('-') {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.is_empty() || normalized == "-" {
        return Err(InfraIdError::InvalidInput(raw.to_string()));
    }

    Ok(normalized.trim_end_matches('-').to_string())
}

/// Cuts `value` down to `max_len` bytes and trims trailing `-`.
///
/// Only called on normalized strings, which are pure ASCII.
pub fn truncate(value: &str, max_len: usize) -> &str {
    let value = if value.len() > max_len {
        &value[..max_len]
    } else {
        value
    };
    value.trim_end_matches('-')
}

/// True when `value` could have come out of InfraID generation: only
/// alphanumerics and `-`, at least one alphanumeric, no trailing `-`.
///
/// A leading `-` (base starting with punctuation) and a doubled `-` (suffix
/// override starting with punctuation) are both accepted.
pub fn is_well_formed_infra_id(value: &str) -> bool {
    !value.ends_with('-')
        && value.chars().any(|c| c.is_ascii_alphanumeric())
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_special_characters() {
        assert_eq!(normalize("qwe.rty.@iop!").unwrap(), "qwe-rty-iop");
    }

    #[test]
    fn collapses_dash_runs() {
        assert_eq!(normalize("a---b__c").unwrap(), "a-b-c");
    }

    #[test]
    fn multibyte_chars_become_single_dash() {
        assert_eq!(normalize("caf\u{e9}-ol\u{e9}").unwrap(), "caf-ol");
    }

    #[test]
    fn keeps_leading_dash() {
        assert_eq!(normalize("@cluster").unwrap(), "-cluster");
        assert_eq!(normalize("--cluster--").unwrap(), "-cluster");
    }

    #[test]
    fn rejects_input_without_alphanumerics() {
        for raw in ["", "-", "---", ".@!", "\u{e9}\u{e9}"] {
            match normalize(raw) {
                Err(InfraIdError::InvalidInput(got)) => assert_eq!(got, raw),
                other => panic!("expected InvalidInput for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["qwe.rty.@iop!", "My Cluster", "a--b-", "prod_eu-west_1", "x"] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn truncate_trims_trailing_dash() {
        assert_eq!(truncate("qwertyuiopasdfghjklz-cvbnm", 21), "qwertyuiopasdfghjklz");
        assert_eq!(truncate("short", 21), "short");
    }

    #[test]
    fn validates_infra_ids() {
        assert!(is_well_formed_infra_id("poc-001"));
        assert!(is_well_formed_infra_id("a"));
        assert!(is_well_formed_infra_id("-poc-dgqwr"));
        assert!(is_well_formed_infra_id("poc--001"));
        assert!(!is_well_formed_infra_id(""));
        assert!(!is_well_formed_infra_id("-"));
        assert!(!is_well_formed_infra_id("poc-"));
        assert!(!is_well_formed_infra_id("poc_001"));
    }
}
