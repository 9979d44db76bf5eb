//! Differentiator extraction.
//!
//! Flattens a variant's nested attribute groups into the set of attributes
//! that distinguish it from its siblings. Pure functions; output order is
//! not guaranteed, consumers must treat results as sets.

use crate::attribute::AttributeValue;
use crate::variant::Variant;

/// One differentiator attribute, flattened out of its group.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentiatorEntry {
    pub label: String,
    pub value: AttributeValue,
    pub group_name: String,
}

/// Every attribute flagged as a differentiator, across all groups.
///
/// A variant without attribute groups yields an empty set.
pub fn differentiators(variant: &Variant) -> Vec<DifferentiatorEntry> {
    let mut entries = Vec::new();
    for group in &variant.attribute_groups {
        for attribute in &group.attributes {
            if attribute.is_differentiator {
                entries.push(DifferentiatorEntry {
                    label: attribute.label.clone(),
                    value: attribute.value.clone(),
                    group_name: group.name.clone(),
                });
            }
        }
    }
    entries
}

/// The differentiator *labels* of a variant, deduplicated, first-seen order.
pub fn differentiator_labels(variant: &Variant) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for entry in differentiators(variant) {
        if !labels.contains(&entry.label) {
            labels.push(entry.label);
        }
    }
    labels
}
