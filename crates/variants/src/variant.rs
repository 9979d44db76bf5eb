//! The variant entity and the payload shape sent to the gateway.

use serde::{Deserialize, Serialize};

use varia_core::{DraftId, Entity, VariantId};

use crate::attribute::AttributeGroup;

/// How a variant is addressed within the editing session.
///
/// A variant is **unsaved** iff its identity is still a [`DraftId`]; it
/// switches to `Persisted` once the gateway accepts a create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantIdentity {
    /// Client-local only; nothing exists on the backend yet.
    Draft(DraftId),
    /// Accepted by the backend under this identifier.
    Persisted(VariantId),
}

/// A purchasable variant of a product.
///
/// Prices are in the smallest currency unit. Images are opaque string
/// references, pre-uploaded by an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub identity: VariantIdentity,
    pub name: String,
    pub sku: Option<String>,
    pub price: u64,
    pub cost_price: u64,
    pub images: Vec<String>,
    pub attribute_groups: Vec<AttributeGroup>,
}

impl Variant {
    /// A fresh unsaved variant with the given draft identity, empty attribute
    /// groups and zero price/cost.
    pub fn new_draft(id: DraftId, name: impl Into<String>) -> Self {
        Self {
            identity: VariantIdentity::Draft(id),
            name: name.into(),
            sku: None,
            price: 0,
            cost_price: 0,
            images: Vec::new(),
            attribute_groups: Vec::new(),
        }
    }

    /// Convenience: [`Variant::new_draft`] with a generated identity.
    pub fn draft(name: impl Into<String>) -> Self {
        Self::new_draft(DraftId::generate(), name)
    }

    /// An unsaved deep copy of `source`: attribute groups and images are
    /// carried over, the sku is cleared, and ` (Copy)` is appended to the
    /// name.
    pub fn clone_of(source: &Variant) -> Self {
        Self::clone_with_id(source, DraftId::generate())
    }

    /// [`Variant::clone_of`] with a caller-supplied draft identity.
    pub fn clone_with_id(source: &Variant, id: DraftId) -> Self {
        Self {
            identity: VariantIdentity::Draft(id),
            name: format!("{} (Copy)", source.name),
            sku: None,
            price: source.price,
            cost_price: source.cost_price,
            images: source.images.clone(),
            attribute_groups: source.attribute_groups.clone(),
        }
    }

    pub fn is_unsaved(&self) -> bool {
        matches!(self.identity, VariantIdentity::Draft(_))
    }

    pub fn persisted_id(&self) -> Option<&VariantId> {
        match &self.identity {
            VariantIdentity::Persisted(id) => Some(id),
            VariantIdentity::Draft(_) => None,
        }
    }

    pub fn draft_id(&self) -> Option<&DraftId> {
        match &self.identity {
            VariantIdentity::Draft(id) => Some(id),
            VariantIdentity::Persisted(_) => None,
        }
    }

    /// The shape sent to the gateway (no identifiers).
    pub fn payload(&self) -> VariantPayload {
        VariantPayload {
            name: self.name.clone(),
            sku: self.sku.clone(),
            price: self.price,
            cost_price: self.cost_price,
            images: self.images.clone(),
            attribute_groups: self.attribute_groups.clone(),
        }
    }
}

impl Entity for Variant {
    type Id = VariantIdentity;

    fn id(&self) -> &Self::Id {
        &self.identity
    }
}

/// What the gateway consumes on create/update. The backend owns the wire
/// format beyond this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    pub name: String,
    pub sku: Option<String>,
    pub price: u64,
    pub cost_price: u64,
    pub images: Vec<String>,
    pub attribute_groups: Vec<AttributeGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{Attribute, AttributeGroup};

    fn persisted(name: &str) -> Variant {
        Variant {
            identity: VariantIdentity::Persisted(VariantId::new("srv-1")),
            name: name.to_string(),
            sku: Some("SKU-001".to_string()),
            price: 1999,
            cost_price: 900,
            images: vec!["img/red.png".to_string()],
            attribute_groups: vec![AttributeGroup::new(
                "Physical Properties",
                vec![Attribute::differentiator("Color", "Red")],
            )],
        }
    }

    #[test]
    fn draft_starts_unsaved_with_zero_prices() {
        let v = Variant::draft("Basic");
        assert!(v.is_unsaved());
        assert_eq!(v.price, 0);
        assert_eq!(v.cost_price, 0);
        assert!(v.attribute_groups.is_empty());
        assert!(v.persisted_id().is_none());
        assert!(v.draft_id().is_some());
    }

    #[test]
    fn clone_of_copies_content_but_not_identity() {
        let source = persisted("Red Shirt");
        let copy = Variant::clone_of(&source);

        assert!(copy.is_unsaved());
        assert_eq!(copy.name, "Red Shirt (Copy)");
        assert_eq!(copy.sku, None);
        assert_eq!(copy.images, source.images);
        assert_eq!(copy.attribute_groups, source.attribute_groups);
        assert_ne!(copy.identity, source.identity);
    }

    #[test]
    fn payload_excludes_identity() {
        let source = persisted("Red Shirt");
        let payload = source.payload();
        assert_eq!(payload.name, "Red Shirt");
        assert_eq!(payload.sku, Some("SKU-001".to_string()));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("identity").is_none());
        assert_eq!(json["costPrice"], serde_json::json!(900));
    }
}
