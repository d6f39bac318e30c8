//! # cartline-editor: Quantity Editor Runtime
//!
//! Tokio runtime for the cart quantity editor: one actor task per cart
//! line, owning the debounce and warning timers and dispatching update and
//! remove calls to the host's [`CartBackend`].
//!
//! The pure transition rules live in `cartline-core`; this crate only adds
//! timers, dispatch, and teardown.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cartline_editor::{EditorConfig, NoOpBackend, QuantityEditor};
//!
//! # async fn demo() -> Result<(), cartline_editor::EditorError> {
//! let handle = QuantityEditor::spawn(
//!     EditorConfig::for_item("line-42", 2),
//!     Arc::new(NoOpBackend),
//! );
//!
//! // Rapid edits coalesce; only the last value is dispatched.
//! handle.set_quantity(3).await?;
//! handle.set_quantity("4").await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod config;
pub mod editor;
pub mod error;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backend::{CartBackend, NoOpBackend};
pub use config::EditorConfig;
pub use editor::{QuantityEditor, QuantityEditorHandle};
pub use error::{EditorError, EditorResult};

// Core types hosts need alongside the runtime
pub use cartline_core::{
    EditOutcome, EditorSnapshot, ItemId, QuantityEditorState, RawQuantity,
    CLAMP_WARNING_DURATION, DEBOUNCE_DELAY,
};
