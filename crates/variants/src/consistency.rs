//! Differentiator label consistency across a product's variants.

use crate::extract::differentiator_labels;
use crate::variant::Variant;

/// Outcome of a consistency check for one candidate variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyReport {
    pub is_valid: bool,
    /// Labels declared on one side of a comparison but not the other,
    /// deduplicated, first-seen order.
    pub missing_attributes: Vec<String>,
}

impl ConsistencyReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            missing_attributes: Vec::new(),
        }
    }
}

/// Verify the candidate exposes the same differentiator label set as every
/// other variant.
///
/// The check is bidirectional: a label declared by another variant but not
/// the candidate is reported as missing, and so is a label declared by the
/// candidate but not the other. Discrepancies from both directions land in
/// the same `missing_attributes` list; downstream message text depends on
/// exactly this shape. An out-of-range index has no candidate to compare
/// and yields a valid report.
pub fn check_consistency(variants: &[Variant], candidate_index: usize) -> ConsistencyReport {
    let Some(candidate) = variants.get(candidate_index) else {
        return ConsistencyReport::valid();
    };
    let candidate_labels = differentiator_labels(candidate);

    let mut missing: Vec<String> = Vec::new();
    let mut note = |label: &String| {
        if !missing.contains(label) {
            missing.push(label.clone());
        }
    };

    for (index, other) in variants.iter().enumerate() {
        if index == candidate_index {
            continue;
        }
        let other_labels = differentiator_labels(other);

        for label in &other_labels {
            if !candidate_labels.contains(label) {
                note(label);
            }
        }
        for label in &candidate_labels {
            if !other_labels.contains(label) {
                note(label);
            }
        }
    }

    if missing.is_empty() {
        ConsistencyReport::valid()
    } else {
        ConsistencyReport {
            is_valid: false,
            missing_attributes: missing,
        }
    }
}

/// Union of every label used as a differentiator anywhere in the product.
///
/// A UI summary helper; it never gates saves.
pub fn all_differentiator_labels(variants: &[Variant]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for variant in variants {
        for label in differentiator_labels(variant) {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, AttributeGroup};

    fn variant(labels: &[(&str, &str)]) -> Variant {
        let mut v = Variant::draft("v");
        v.attribute_groups = vec![AttributeGroup::new(
            "Options",
            labels
                .iter()
                .map(|(label, value)| Attribute::differentiator(*label, *value))
                .collect(),
        )];
        v
    }

    #[test]
    fn matching_label_sets_are_valid() {
        let variants = vec![
            variant(&[("Color", "Red"), ("Size", "M")]),
            variant(&[("Color", "Blue"), ("Size", "L")]),
        ];
        let report = check_consistency(&variants, 1);
        assert!(report.is_valid);
        assert!(report.missing_attributes.is_empty());
    }

    #[test]
    fn candidate_missing_a_label_is_reported() {
        let variants = vec![
            variant(&[("Color", "Red"), ("Size", "M")]),
            variant(&[("Color", "Blue")]),
        ];
        let report = check_consistency(&variants, 1);
        assert!(!report.is_valid);
        assert_eq!(report.missing_attributes, vec!["Size"]);
    }

    #[test]
    fn extra_label_on_candidate_is_also_reported() {
        let variants = vec![
            variant(&[("Color", "Red")]),
            variant(&[("Color", "Blue"), ("Size", "L")]),
        ];
        let report = check_consistency(&variants, 1);
        assert!(!report.is_valid);
        assert_eq!(report.missing_attributes, vec!["Size"]);
    }

    #[test]
    fn discrepancies_are_deduplicated_across_comparisons() {
        let variants = vec![
            variant(&[("Color", "Red"), ("Size", "M")]),
            variant(&[("Color", "Green"), ("Size", "S")]),
            variant(&[("Color", "Blue")]),
        ];
        let report = check_consistency(&variants, 2);
        // "Size" is missing against both siblings but reported once.
        assert_eq!(report.missing_attributes, vec!["Size"]);
    }

    #[test]
    fn lone_variant_is_always_consistent() {
        let variants = vec![variant(&[("Color", "Red")])];
        assert!(check_consistency(&variants, 0).is_valid);
    }

    #[test]
    fn out_of_range_candidate_yields_a_valid_report() {
        let variants = vec![
            variant(&[("Color", "Red"), ("Size", "M")]),
            variant(&[("Color", "Blue")]),
        ];
        let report = check_consistency(&variants, 99);
        assert!(report.is_valid);
        assert!(report.missing_attributes.is_empty());
    }

    #[test]
    fn union_covers_every_variant() {
        let variants = vec![
            variant(&[("Color", "Red")]),
            variant(&[("Size", "M")]),
            variant(&[("Color", "Blue"), ("Finish", "Matte")]),
        ];
        assert_eq!(
            all_differentiator_labels(&variants),
            vec!["Color", "Size", "Finish"]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn variant_strategy() -> impl Strategy<Value = Variant> {
            prop::collection::vec(
                prop::sample::select(vec!["Color", "Size", "Material"]),
                0..3,
            )
            .prop_map(|labels| {
                let mut v = Variant::draft("v");
                v.attribute_groups = vec![AttributeGroup::new(
                    "Options",
                    labels
                        .into_iter()
                        .map(|label| Attribute::differentiator(label, "x"))
                        .collect(),
                )];
                v
            })
        }

        proptest! {
            /// Running the check twice on an unchanged collection yields the
            /// same report.
            #[test]
            fn check_is_idempotent(
                variants in prop::collection::vec(variant_strategy(), 1..5),
                index in 0usize..5,
            ) {
                let index = index % variants.len();
                let first = check_consistency(&variants, index);
                let second = check_consistency(&variants, index);
                prop_assert_eq!(first, second);
            }

            /// `is_valid` agrees with `missing_attributes` being empty.
            #[test]
            fn validity_matches_missing_list(
                variants in prop::collection::vec(variant_strategy(), 1..5),
                index in 0usize..5,
            ) {
                let index = index % variants.len();
                let report = check_consistency(&variants, index);
                prop_assert_eq!(report.is_valid, report.missing_attributes.is_empty());
            }
        }
    }
}
