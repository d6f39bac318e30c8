//! # cartline-core: Pure Quantity-Editor Logic
//!
//! The state machine behind a cart line's quantity control, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cartline Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront Frontend                            │   │
//! │  │    Cart line row ──► +/- buttons ──► free-text quantity field  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              cartline-editor (tokio runtime)                    │   │
//! │  │    debounce timer • warning timer • CartBackend dispatch       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cartline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   state   │  │   error   │                  │   │
//! │  │   │RawQuantity│  │ Editor    │  │  Parse    │                  │   │
//! │  │   │  ItemId   │  │  State    │  │  errors   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input/id unions and the UI snapshot
//! - [`state`] - The [`QuantityEditorState`] transitions
//! - [`error`] - Typed parse failures
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every transition is deterministic and synchronous
//! 2. **No I/O**: timers and collaborator calls live in cartline-editor
//! 3. **Lenient Input**: raw text degrades to 0, it never raises
//! 4. **Explicit Errors**: the strict parse API returns typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use cartline_core::{QuantityEditorState, RawQuantity, EditOutcome};
//!
//! // A line item starts at the server-confirmed quantity.
//! let mut state = QuantityEditorState::new(2, Some(5));
//!
//! // Over-max edits clamp and raise the transient warning.
//! let outcome = state.apply_edit(RawQuantity::Count(7));
//! assert_eq!(outcome, EditOutcome::Clamped { limit: 5 });
//! assert_eq!(state.display_value(), 5);
//! assert!(state.is_clamped());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::QuantityParseError;
pub use state::{EditOutcome, QuantityEditorState};
pub use types::{EditorSnapshot, ItemId, RawQuantity};

use std::time::Duration;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Delay between the last local edit and the collaborator dispatch.
///
/// ## Why a constant?
/// Rapid sequential edits within this window coalesce into one network
/// effect carrying only the last value. Hosts that need a different window
/// (or an immediate one in tests) override it via the editor config.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// How long the "maximum exceeded" warning stays visible.
///
/// Each new clamp event restarts the countdown, so the warning expires this
/// long after the most recent clamp.
pub const CLAMP_WARNING_DURATION: Duration = Duration::from_millis(3000);
