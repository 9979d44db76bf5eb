//! Variant differentiator consistency engine (pure domain logic).
//!
//! This crate contains the comparison algorithms that keep a product's
//! variant list coherent: differentiator extraction, duplicate detection and
//! label-consistency checking. Everything here is deterministic and free of
//! IO; persistence lives behind the gateway in `varia-session`.

pub mod attribute;
pub mod consistency;
pub mod duplicate;
pub mod extract;
pub mod variant;

pub use attribute::{Attribute, AttributeGroup, AttributeValue};
pub use consistency::{ConsistencyReport, all_differentiator_labels, check_consistency};
pub use duplicate::{find_duplicate, has_duplicate, is_duplicate};
pub use extract::{DifferentiatorEntry, differentiator_labels, differentiators};
pub use variant::{Variant, VariantIdentity, VariantPayload};
