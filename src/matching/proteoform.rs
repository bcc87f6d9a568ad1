//! Policy-driven equivalence between an input proteoform and a reference
//! proteoform from the catalog.

use crate::core::proteoform::{Modification, Proteoform};
use crate::core::types::MatchPolicy;
use crate::matching::engine::MatchingConfig;

/// Coordinate tolerance rule.
///
/// An unset coordinate on either side is a wildcard, not a failure; two set
/// coordinates are equal when their distance is within the margin. Symmetric
/// by construction, so it holds regardless of which side is the input.
#[must_use]
pub fn coordinates_match(a: Option<u64>, b: Option<u64>, margin: u64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.abs_diff(b) <= margin,
        _ => true,
    }
}

/// Two modifications correspond when their type codes are identical and
/// their site coordinates satisfy the tolerance rule.
fn modification_matches(input: &Modification, reference: &Modification, margin: u64) -> bool {
    input.psi_mod == reference.psi_mod
        && coordinates_match(input.coordinate, reference.coordinate, margin)
}

/// Decide whether `input` matches `reference` under the configured policy.
#[must_use]
pub fn matches(input: &Proteoform, reference: &Proteoform, config: &MatchingConfig) -> bool {
    // Isoform suffixes are normalized away for accession comparison; the
    // full accession still distinguishes proteoform identity elsewhere.
    if input.base_accession() != reference.base_accession() {
        return false;
    }

    if config.use_subsequence_ranges {
        if !coordinates_match(
            input.start_coordinate(),
            reference.start_coordinate(),
            config.margin,
        ) {
            return false;
        }
        if !coordinates_match(
            input.end_coordinate(),
            reference.end_coordinate(),
            config.margin,
        ) {
            return false;
        }
    }

    let i_mods = input.modifications();
    let r_mods = reference.modifications();

    match config.policy {
        MatchPolicy::Exact => {
            i_mods.len() == r_mods.len() && has_bijection(i_mods, r_mods, config.margin)
        }
        MatchPolicy::One => i_mods
            .iter()
            .any(|im| r_mods.iter().any(|rm| modification_matches(im, rm, config.margin))),
        MatchPolicy::Superset => r_mods
            .iter()
            .all(|rm| i_mods.iter().any(|im| modification_matches(im, rm, config.margin))),
    }
}

/// Check for a bijection between two equally-sized modification lists under
/// the correspondence relation.
///
/// Greedy pairing is not enough: with a margin, one input modification can
/// satisfy several reference modifications and a bad first choice can hide a
/// valid complete pairing. Kuhn's augmenting-path algorithm finds a maximum
/// bipartite matching instead; modification sets are small, so the O(V*E)
/// bound is irrelevant in practice.
fn has_bijection(i_mods: &[Modification], r_mods: &[Modification], margin: u64) -> bool {
    debug_assert_eq!(i_mods.len(), r_mods.len());

    // assigned[i] = reference index currently paired with input i
    let mut assigned: Vec<Option<usize>> = vec![None; i_mods.len()];

    for (r_idx, rm) in r_mods.iter().enumerate() {
        let mut visited = vec![false; i_mods.len()];
        if !try_assign(r_idx, rm, i_mods, r_mods, margin, &mut assigned, &mut visited) {
            return false;
        }
    }
    true
}

fn try_assign(
    r_idx: usize,
    rm: &Modification,
    i_mods: &[Modification],
    r_mods: &[Modification],
    margin: u64,
    assigned: &mut Vec<Option<usize>>,
    visited: &mut Vec<bool>,
) -> bool {
    for (i_idx, im) in i_mods.iter().enumerate() {
        if visited[i_idx] || !modification_matches(im, rm, margin) {
            continue;
        }
        visited[i_idx] = true;

        let displaced = assigned[i_idx];
        assigned[i_idx] = Some(r_idx);
        match displaced {
            None => return true,
            Some(prev) => {
                if try_assign(prev, &r_mods[prev], i_mods, r_mods, margin, assigned, visited) {
                    return true;
                }
                assigned[i_idx] = displaced;
            }
        }
    }
    false
}
