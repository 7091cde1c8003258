// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use rand::Rng;
use tracing::info;

use crate::error::{InfraIdError, InfraIdResult};
use crate::normalize::{normalize, truncate};
use crate::overrides::{INFRA_ID_KEY, INFRA_ID_SUFFIX_KEY, Overrides};

// No vowels, no easily confused glyphs.
const CHARSET: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";
pub const RANDOM_LEN: usize = 5;

pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Builds an InfraID from `base` that is at most `max_len` long and only
/// contains alphanumerics and single `-`.
///
/// An `INFRA_ID` override is returned as is (normalized, not truncated).
/// An `INFRA_ID_SUFFIX` override replaces the random suffix. Both override
/// paths write the result back to `INFRA_ID` in `overrides`.
pub fn generate_infra_id(
    base: &str,
    max_len: usize,
    overrides: &mut Overrides,
) -> InfraIdResult<String> {
    generate_infra_id_with(base, max_len, overrides, &mut rand::thread_rng())
}

pub fn generate_infra_id_with<R: Rng + ?Sized>(
    base: &str,
    max_len: usize,
    overrides: &mut Overrides,
    rng: &mut R,
) -> InfraIdResult<String> {
    if let Some(predefined) = overrides.lookup(INFRA_ID_KEY)? {
        let infra_id = normalize(&predefined)?;
        overrides.write_back(INFRA_ID_KEY, &infra_id);
        info!("Using predefined InfraID {}", infra_id);
        return Ok(infra_id);
    }

    let min_len = RANDOM_LEN + 2;
    if max_len < min_len {
        return Err(InfraIdError::MaxLengthTooShort(max_len, min_len));
    }

    // normalize before truncating to keep as many meaningful characters as possible
    let base = normalize(base)?;
    let max_base_len = max_len - (RANDOM_LEN + 1);
    let base = truncate(&base, max_base_len);

    if let Some(suffix) = overrides.lookup(INFRA_ID_SUFFIX_KEY)? {
        let infra_id = format!("{}-{}", base, suffix);
        let infra_id = truncate(&infra_id, max_len).to_string();
        overrides.write_back(INFRA_ID_KEY, &infra_id);
        info!("Generated InfraID {} from predefined suffix", infra_id);
        return Ok(infra_id);
    }

    let infra_id = format!("{}-{}", base, random_suffix(rng));
    info!("Generated InfraID {}", infra_id);
    Ok(infra_id)
}
