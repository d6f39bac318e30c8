//! # Cart Backend Seam
//!
//! The collaborator trait the host application implements. The editor owns
//! neither call: it awaits them, logs failures, and guarantees the
//! submitting flag resets either way. Retry, toasts, and cart refresh are
//! the host's job.

use async_trait::async_trait;

use cartline_core::ItemId;

use crate::error::EditorResult;

// =============================================================================
// Cart Backend Trait
// =============================================================================

/// Persists quantity changes for one cart line.
///
/// Implemented by the host against its commerce API. Both methods are
/// awaited without local retry; at most one call is outstanding per editor
/// instance by construction.
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Persists a new non-zero quantity for the line item.
    ///
    /// In `input_only` mode this also receives `0`, since that mode never
    /// removes.
    async fn update_quantity(&self, quantity: u32) -> EditorResult<()>;

    /// Deletes the line item; invoked when the quantity is driven to zero
    /// and an item identifier was configured.
    async fn remove_item(&self, item_id: &ItemId) -> EditorResult<()>;
}

/// No-op backend for tests and detached wiring.
pub struct NoOpBackend;

#[async_trait]
impl CartBackend for NoOpBackend {
    async fn update_quantity(&self, _quantity: u32) -> EditorResult<()> {
        Ok(())
    }

    async fn remove_item(&self, _item_id: &ItemId) -> EditorResult<()> {
        Ok(())
    }
}
