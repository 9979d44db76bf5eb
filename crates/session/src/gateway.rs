//! Persistence gateway contract.
//!
//! The backend owns the wire format; the engine only needs these four
//! operations and their success/failure outcomes. Implementations make one
//! network round trip per call and never retry on their own.

use async_trait::async_trait;

use varia_core::{GatewayError, ProductId, VariantId};
use varia_variants::{Variant, VariantPayload};

/// Async contract to the product/variant persistence service.
#[async_trait]
pub trait VariantGateway: Send + Sync {
    /// Create a variant under a persisted product. On success the backend
    /// returns the variant with its assigned persisted identifier.
    async fn create_variant(
        &self,
        product: ProductId,
        payload: VariantPayload,
    ) -> Result<Variant, GatewayError>;

    /// Update an already-persisted variant.
    async fn update_variant(
        &self,
        product: ProductId,
        variant: &VariantId,
        payload: VariantPayload,
    ) -> Result<Variant, GatewayError>;

    /// Delete an already-persisted variant.
    async fn delete_variant(
        &self,
        product: ProductId,
        variant: &VariantId,
    ) -> Result<(), GatewayError>;

    /// Fetch the authoritative variant list for a product. The session calls
    /// this after every successful mutation instead of patching its local
    /// copy optimistically.
    async fn list_variants(&self, product: ProductId) -> Result<Vec<Variant>, GatewayError>;
}
