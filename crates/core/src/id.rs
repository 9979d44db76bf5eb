//! Strongly-typed identifiers used across the engine.

use core::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Identifier of the parent product (persisted, server-assigned).
///
/// The engine never creates products; it only attaches variants to one that
/// the backend has already accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ProductId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| EngineError::InvalidId(format!("ProductId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Persisted variant identifier, owned by the backend.
///
/// Treated as an opaque string; the engine never parses or mints one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for VariantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Client-local identifier for a variant that has not been persisted yet.
///
/// Generated as `temp_<unix-millis>`. Uniqueness within a session is backed
/// by the single-unsaved-variant rule, not by the timestamp itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    /// Mint a fresh client-local identifier.
    pub fn generate() -> Self {
        Self(format!("temp_{}", Utc::now().timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DraftId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_id_has_temp_prefix() {
        let id = DraftId::generate();
        assert!(id.as_str().starts_with("temp_"));
    }

    #[test]
    fn product_id_round_trips_through_str() {
        let id = ProductId::new();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn product_id_rejects_garbage() {
        let err = "not-a-uuid".parse::<ProductId>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidId(_)));
    }

    #[test]
    fn variant_id_is_opaque() {
        let id = VariantId::new("srv-42");
        assert_eq!(id.as_str(), "srv-42");
        assert_eq!(id.to_string(), "srv-42");
    }
}
