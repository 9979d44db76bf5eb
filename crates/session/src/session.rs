//! The variant editing session: one product, one user, one tab.
//!
//! All session state lives behind a single `std::sync::Mutex` held only
//! across synchronous sections, never across an await. Overlap between
//! user-triggered operations is prevented by the `processing` flag, a
//! logical mutex over the collection rather than a thread primitive:
//! validation runs against the in-memory collection before the flag is
//! taken and before any network call is issued, so rejected saves never
//! reach the gateway.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info, warn};

use varia_core::{DraftId, EngineError, EngineResult, ProductId};
use varia_variants::{Variant, VariantIdentity, check_consistency, find_duplicate};

use crate::gateway::VariantGateway;

/// Whether an operation is in flight, and for which variant index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processing {
    Idle,
    Busy(usize),
}

#[derive(Debug)]
struct SessionState {
    product_id: Option<ProductId>,
    variants: Vec<Variant>,
    processing: Processing,
    expanded: Option<usize>,
}

/// Orchestrates add/clone/save/delete over one product's variant collection.
pub struct VariantEditingSession {
    gateway: Arc<dyn VariantGateway>,
    state: Mutex<SessionState>,
}

impl VariantEditingSession {
    /// A session over an empty collection. `product_id` is `None` while the
    /// parent product itself has not been saved yet.
    pub fn new(gateway: Arc<dyn VariantGateway>, product_id: Option<ProductId>) -> Self {
        Self::with_variants(gateway, product_id, Vec::new())
    }

    /// A session hydrated with an already-fetched variant collection.
    pub fn with_variants(
        gateway: Arc<dyn VariantGateway>,
        product_id: Option<ProductId>,
        variants: Vec<Variant>,
    ) -> Self {
        Self {
            gateway,
            state: Mutex::new(SessionState {
                product_id,
                variants,
                processing: Processing::Idle,
                expanded: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current collection.
    pub fn variants(&self) -> Vec<Variant> {
        self.state().variants.clone()
    }

    pub fn processing(&self) -> Processing {
        self.state().processing
    }

    pub fn expanded(&self) -> Option<usize> {
        self.state().expanded
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.state().product_id
    }

    /// Append a fresh unsaved variant with empty attribute groups, zero
    /// price/cost and a placeholder name for the form to overwrite.
    ///
    /// Rejected while another unsaved variant exists or an operation is in
    /// flight. Does not enter `processing`.
    pub fn add_new_variant(&self) -> EngineResult<DraftId> {
        let mut st = self.state();
        if st.variants.iter().any(Variant::is_unsaved) {
            warn!("add rejected: an unsaved variant already exists");
            return Err(EngineError::UnsavedVariantExists);
        }
        if st.processing != Processing::Idle {
            warn!("add rejected: an operation is in flight");
            return Err(EngineError::OperationInProgress);
        }

        let id = DraftId::generate();
        st.variants.push(Variant::new_draft(id.clone(), "New Variant"));
        Ok(id)
    }

    /// Append an unsaved deep copy of an existing variant and mark it as the
    /// one to expand in the UI. Same preconditions as [`Self::add_new_variant`].
    pub fn clone_variant(&self, source: &VariantIdentity) -> EngineResult<DraftId> {
        let mut st = self.state();
        if st.variants.iter().any(Variant::is_unsaved) {
            warn!("clone rejected: an unsaved variant already exists");
            return Err(EngineError::UnsavedVariantExists);
        }
        if st.processing != Processing::Idle {
            warn!("clone rejected: an operation is in flight");
            return Err(EngineError::OperationInProgress);
        }
        let id = DraftId::generate();
        let copy = {
            let Some(original) = st.variants.iter().find(|v| v.identity == *source) else {
                return Err(EngineError::UnknownVariant);
            };
            Variant::clone_with_id(original, id.clone())
        };
        st.variants.push(copy);
        st.expanded = Some(st.variants.len() - 1);
        Ok(id)
    }

    /// Validate and persist the candidate at `index`.
    ///
    /// Validation (duplicate, consistency, product persisted) is synchronous
    /// and happens before the processing flag is taken; a rejected save
    /// never reaches the gateway. A save already in flight for the *same*
    /// index may be re-submitted; any other index is rejected.
    pub async fn save_variant(&self, candidate: Variant, index: usize) -> EngineResult<()> {
        let (product_id, target) = {
            let mut st = self.state();
            if let Processing::Busy(busy) = st.processing {
                if busy != index {
                    warn!(busy, index, "save rejected: another variant is being processed");
                    return Err(EngineError::OperationInProgress);
                }
            }
            if index >= st.variants.len() {
                return Err(EngineError::UnknownVariant);
            }

            let mut scratch = st.variants.clone();
            scratch[index] = candidate.clone();

            if let Some(labels) = find_duplicate(&scratch, index) {
                warn!(?labels, "save rejected: duplicate differentiator set");
                return Err(EngineError::DuplicateVariant { labels });
            }
            let report = check_consistency(&scratch, index);
            if !report.is_valid {
                warn!(missing = ?report.missing_attributes, "save rejected: inconsistent differentiators");
                return Err(EngineError::InconsistentDifferentiators {
                    missing: report.missing_attributes,
                });
            }
            let Some(product_id) = st.product_id else {
                warn!("save rejected: product not persisted");
                return Err(EngineError::ProductNotPersisted);
            };

            st.processing = Processing::Busy(index);
            (product_id, candidate.persisted_id().cloned())
        };

        let outcome = match &target {
            Some(id) => self
                .gateway
                .update_variant(product_id, id, candidate.payload())
                .await
                .map(|_| ()),
            None => self
                .gateway
                .create_variant(product_id, candidate.payload())
                .await
                .map(|_| ()),
        };

        match outcome {
            Ok(()) => {
                let refreshed = self.gateway.list_variants(product_id).await;
                let mut st = self.state();
                st.processing = Processing::Idle;
                match refreshed {
                    Ok(variants) => {
                        apply_refresh(&mut st, variants);
                        info!(index, "variant saved");
                        Ok(())
                    }
                    Err(e) => {
                        error!(%e, "variant saved but refresh failed");
                        Err(e.into())
                    }
                }
            }
            Err(e) => {
                self.state().processing = Processing::Idle;
                error!(%e, index, "variant save failed");
                Err(e.into())
            }
        }
    }

    /// Remove a variant: server round trip for persisted ones, in-memory
    /// removal for drafts. Always returns to idle when the operation
    /// settles.
    pub async fn delete_variant(&self, identity: &VariantIdentity) -> EngineResult<()> {
        let (product_id, index, persisted) = {
            let mut st = self.state();
            if st.processing != Processing::Idle {
                warn!("delete rejected: an operation is in flight");
                return Err(EngineError::OperationInProgress);
            }
            let Some(index) = st.variants.iter().position(|v| v.identity == *identity) else {
                return Err(EngineError::UnknownVariant);
            };

            match st.variants[index].identity.clone() {
                VariantIdentity::Draft(_) => {
                    // Never persisted: no network call. The flag is taken and
                    // released within the same critical section.
                    st.processing = Processing::Busy(index);
                    st.variants.remove(index);
                    fix_expanded_after_remove(&mut st, index);
                    st.processing = Processing::Idle;
                    info!(index, "draft variant removed");
                    return Ok(());
                }
                VariantIdentity::Persisted(id) => {
                    let Some(product_id) = st.product_id else {
                        return Err(EngineError::ProductNotPersisted);
                    };
                    st.processing = Processing::Busy(index);
                    (product_id, index, id)
                }
            }
        };

        let outcome = self.gateway.delete_variant(product_id, &persisted).await;
        match outcome {
            Ok(()) => {
                let refreshed = self.gateway.list_variants(product_id).await;
                let mut st = self.state();
                st.processing = Processing::Idle;
                match refreshed {
                    Ok(variants) => {
                        apply_refresh(&mut st, variants);
                        info!(index, "variant deleted");
                        Ok(())
                    }
                    Err(e) => {
                        error!(%e, "variant deleted but refresh failed");
                        Err(e.into())
                    }
                }
            }
            Err(e) => {
                self.state().processing = Processing::Idle;
                error!(%e, index, "variant delete failed");
                Err(e.into())
            }
        }
    }

    /// Expand one variant in the UI, collapsing any other; toggling the
    /// expanded one collapses it. No validation involved.
    pub fn toggle_expand(&self, index: usize) {
        let mut st = self.state();
        if index >= st.variants.len() {
            return;
        }
        st.expanded = if st.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Re-fetch the collection from the source of truth.
    pub async fn refresh(&self) -> EngineResult<()> {
        let product_id = {
            let st = self.state();
            if st.processing != Processing::Idle {
                return Err(EngineError::OperationInProgress);
            }
            st.product_id.ok_or(EngineError::ProductNotPersisted)?
        };
        let variants = self.gateway.list_variants(product_id).await?;
        apply_refresh(&mut self.state(), variants);
        Ok(())
    }
}

fn apply_refresh(st: &mut SessionState, variants: Vec<Variant>) {
    st.variants = variants;
    if let Some(expanded) = st.expanded {
        if expanded >= st.variants.len() {
            st.expanded = None;
        }
    }
}

fn fix_expanded_after_remove(st: &mut SessionState, removed: usize) {
    st.expanded = match st.expanded {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    };
}
