//! Duplicate detection over differentiator sets.
//!
//! Variant counts per product are small, so the pairwise comparisons below
//! are linear scans; the whole check is O(n²) in the number of variants and
//! that cost is accepted by design.

use crate::extract::{DifferentiatorEntry, differentiators};
use crate::variant::Variant;

/// Whether two differentiator sets are equal.
///
/// Equal iff they have the same length and, after sorting both by label,
/// every positional pair has an equal label and a deep-equal value. The
/// comparison is order-independent with respect to extraction order.
pub fn is_duplicate(candidate: &[DifferentiatorEntry], existing: &[DifferentiatorEntry]) -> bool {
    if candidate.len() != existing.len() {
        return false;
    }

    let mut left: Vec<&DifferentiatorEntry> = candidate.iter().collect();
    let mut right: Vec<&DifferentiatorEntry> = existing.iter().collect();
    left.sort_by(|a, b| a.label.cmp(&b.label));
    right.sort_by(|a, b| a.label.cmp(&b.label));

    left.iter()
        .zip(&right)
        .all(|(a, b)| a.label == b.label && a.value.deep_eq(&b.value))
}

/// Find a variant whose differentiator set equals the candidate's.
///
/// The candidate is addressed by index and never compared against itself;
/// an out-of-range index has no candidate and reports no duplicate.
/// Returns the candidate's differentiator labels on the first match, for
/// use in the rejection message. Note that two variants with *no*
/// differentiator attributes match each other: the empty set equals the
/// empty set, which caps a product at one no-differentiator variant.
pub fn find_duplicate(variants: &[Variant], candidate_index: usize) -> Option<Vec<String>> {
    let candidate = differentiators(variants.get(candidate_index)?);

    for (index, other) in variants.iter().enumerate() {
        if index == candidate_index {
            continue;
        }
        if is_duplicate(&candidate, &differentiators(other)) {
            let mut labels: Vec<String> =
                candidate.iter().map(|e| e.label.clone()).collect();
            labels.sort();
            labels.dedup();
            return Some(labels);
        }
    }
    None
}

/// Whether any other variant duplicates the candidate's differentiator set.
pub fn has_duplicate(variants: &[Variant], candidate_index: usize) -> bool {
    find_duplicate(variants, candidate_index).is_some()
}
