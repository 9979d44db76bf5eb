//! In-memory gateway for tests/dev.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use varia_core::{GatewayError, ProductId, VariantId};
use varia_variants::{Variant, VariantIdentity, VariantPayload};

use crate::gateway::VariantGateway;

/// In-memory variant store behind the gateway contract.
///
/// - No IO; all state lives in a mutex-guarded map
/// - Persisted identifiers are minted from UUIDv7
/// - A failure can be armed to make the next call return it, so tests can
///   exercise the session's gateway-error paths
#[derive(Debug, Default)]
pub struct InMemoryVariantGateway {
    store: Mutex<HashMap<ProductId, Vec<Variant>>>,
    fail_next: Mutex<Option<GatewayError>>,
}

impl InMemoryVariantGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-persisted variants for a product.
    pub fn seed(&self, product: ProductId, variants: Vec<Variant>) {
        self.lock_store().insert(product, variants);
    }

    /// Arm a failure: the next gateway call returns it instead of running.
    pub fn fail_next(&self, error: GatewayError) {
        *lock_recovering(&self.fail_next) = Some(error);
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, HashMap<ProductId, Vec<Variant>>> {
        lock_recovering(&self.store)
    }

    fn take_armed_failure(&self) -> Result<(), GatewayError> {
        match lock_recovering(&self.fail_next).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn persist(payload: VariantPayload) -> Variant {
        Variant {
            identity: VariantIdentity::Persisted(VariantId::new(Uuid::now_v7().to_string())),
            name: payload.name,
            sku: payload.sku,
            price: payload.price,
            cost_price: payload.cost_price,
            images: payload.images,
            attribute_groups: payload.attribute_groups,
        }
    }
}

fn lock_recovering<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl VariantGateway for InMemoryVariantGateway {
    async fn create_variant(
        &self,
        product: ProductId,
        payload: VariantPayload,
    ) -> Result<Variant, GatewayError> {
        self.take_armed_failure()?;
        let variant = Self::persist(payload);
        self.lock_store()
            .entry(product)
            .or_default()
            .push(variant.clone());
        Ok(variant)
    }

    async fn update_variant(
        &self,
        product: ProductId,
        variant: &VariantId,
        payload: VariantPayload,
    ) -> Result<Variant, GatewayError> {
        self.take_armed_failure()?;
        let mut store = self.lock_store();
        let variants = store
            .get_mut(&product)
            .ok_or_else(|| GatewayError::Api(404, format!("unknown product {product}")))?;
        let existing = variants
            .iter_mut()
            .find(|v| v.persisted_id() == Some(variant))
            .ok_or_else(|| GatewayError::Api(404, format!("unknown variant {variant}")))?;

        existing.name = payload.name;
        existing.sku = payload.sku;
        existing.price = payload.price;
        existing.cost_price = payload.cost_price;
        existing.images = payload.images;
        existing.attribute_groups = payload.attribute_groups;
        Ok(existing.clone())
    }

    async fn delete_variant(
        &self,
        product: ProductId,
        variant: &VariantId,
    ) -> Result<(), GatewayError> {
        self.take_armed_failure()?;
        let mut store = self.lock_store();
        let variants = store
            .get_mut(&product)
            .ok_or_else(|| GatewayError::Api(404, format!("unknown product {product}")))?;
        let before = variants.len();
        variants.retain(|v| v.persisted_id() != Some(variant));
        if variants.len() == before {
            return Err(GatewayError::Api(404, format!("unknown variant {variant}")));
        }
        Ok(())
    }

    async fn list_variants(&self, product: ProductId) -> Result<Vec<Variant>, GatewayError> {
        self.take_armed_failure()?;
        Ok(self.lock_store().get(&product).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_a_persisted_identity() {
        let gateway = InMemoryVariantGateway::new();
        let product = ProductId::new();
        let created = gateway
            .create_variant(product, Variant::draft("Basic").payload())
            .await
            .unwrap();
        assert!(!created.is_unsaved());
        assert_eq!(gateway.list_variants(product).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn armed_failure_fires_once() {
        let gateway = InMemoryVariantGateway::new();
        let product = ProductId::new();
        gateway.fail_next(GatewayError::Network("timeout".to_string()));

        let err = gateway.list_variants(product).await.unwrap_err();
        assert_eq!(err, GatewayError::Network("timeout".to_string()));
        assert!(gateway.list_variants(product).await.is_ok());
    }

    #[tokio::test]
    async fn delete_of_unknown_variant_is_a_404() {
        let gateway = InMemoryVariantGateway::new();
        let product = ProductId::new();
        gateway.seed(product, Vec::new());
        let err = gateway
            .delete_variant(product, &VariantId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Api(404, _)));
    }
}
