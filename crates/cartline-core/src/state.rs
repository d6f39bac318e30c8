//! # Quantity Editor State
//!
//! The pure state machine behind the quantity control.
//!
//! ## Transition Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Quantity Editor Transitions                           │
//! │                                                                         │
//! │  UI Event                 Transition              Effect                │
//! │  ────────                 ──────────              ──────                │
//! │                                                                         │
//! │  Type / press +/- ──────► apply_edit() ─────────► Clamped              │
//! │                                                    (over max, warn)     │
//! │                                                   Reverted             │
//! │                                                    (back to committed)  │
//! │                                                   Scheduled            │
//! │                                                    (pending set)        │
//! │                                                                         │
//! │  Debounce fires ────────► take_pending() ───────► value to dispatch    │
//! │                           begin_submit()                                │
//! │                           finish_submit()                               │
//! │                                                                         │
//! │  Warning expires ───────► clear_warning()                              │
//! │                                                                         │
//! │  Server re-render ──────► resync() ─────────────► pending discarded    │
//! │                                                                         │
//! │  NOTE: Timers and collaborator calls live in cartline-editor.          │
//! │        Every function here is synchronous and deterministic.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{EditorSnapshot, RawQuantity};

// =============================================================================
// Edit Outcome
// =============================================================================

/// Result of applying one local edit.
///
/// Tells the runtime which timer to touch: `Clamped` restarts the warning
/// timer, `Scheduled` restarts the debounce timer, `Reverted` cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The request exceeded `max_quantity`; the display was clamped to the
    /// bound and the warning raised. No network effect is scheduled.
    Clamped {
        /// The bound the display was clamped to.
        limit: u32,
    },

    /// The edit landed back on `committed_value`; any pending dispatch is
    /// dropped so no spurious call goes out.
    Reverted,

    /// The edit diverges from the committed value and awaits dispatch.
    Scheduled {
        /// The value recorded as pending.
        value: u32,
    },
}

// =============================================================================
// Quantity Editor State
// =============================================================================

/// Per-line-item editor state.
///
/// ## Invariants
/// - `display_value <= max_quantity` for every locally applied edit
/// - `pending_value` holds at most the newest undispatched edit
/// - `pending_value` is taken (cleared) before a dispatch awaits
///
/// Authoritative values arriving via [`resync`](Self::resync) are trusted
/// as-is; clamping applies to local edits only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityEditorState {
    /// Last value known consistent with the server.
    committed_value: u32,

    /// Value currently shown in the input.
    display_value: u32,

    /// Newest edit awaiting the debounced dispatch.
    pending_value: Option<u32>,

    /// True while an update/remove call is outstanding.
    is_submitting: bool,

    /// True while the "maximum exceeded" warning is visible.
    is_clamped: bool,

    /// Upper bound for local edits; `None` means unbounded.
    max_quantity: Option<u32>,
}

impl QuantityEditorState {
    /// Creates editor state for a line item at its server-confirmed value.
    pub fn new(initial_value: u32, max_quantity: Option<u32>) -> Self {
        QuantityEditorState {
            committed_value: initial_value,
            display_value: initial_value,
            pending_value: None,
            is_submitting: false,
            is_clamped: false,
            max_quantity,
        }
    }

    /// Last server-consistent value.
    pub fn committed_value(&self) -> u32 {
        self.committed_value
    }

    /// Value currently shown to the user.
    pub fn display_value(&self) -> u32 {
        self.display_value
    }

    /// Newest undispatched edit, if any.
    pub fn pending_value(&self) -> Option<u32> {
        self.pending_value
    }

    /// Whether a collaborator call is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Whether the max-quantity warning is visible.
    pub fn is_clamped(&self) -> bool {
        self.is_clamped
    }

    /// Configured upper bound, if any.
    pub fn max_quantity(&self) -> Option<u32> {
        self.max_quantity
    }

    /// Applies one local edit.
    ///
    /// ## Behavior
    /// - Bad text normalizes to `0` (see [`RawQuantity::normalize`])
    /// - Over-max requests clamp the display, raise the warning, and cancel
    ///   any pending dispatch; nothing is scheduled
    /// - Edits landing back on `committed_value` clear the pending slot
    /// - Everything else becomes the new (sole) pending value
    pub fn apply_edit(&mut self, raw: RawQuantity) -> EditOutcome {
        let requested = raw.normalize();

        if let Some(limit) = self.max_quantity {
            if requested > limit {
                self.display_value = limit;
                self.is_clamped = true;
                // The clamp replaced the edit buffer; an older pending value
                // must not fire while the display shows the bound.
                self.pending_value = None;
                return EditOutcome::Clamped { limit };
            }
        }

        self.display_value = requested;

        if requested == self.committed_value {
            self.pending_value = None;
            return EditOutcome::Reverted;
        }

        self.pending_value = Some(requested);
        EditOutcome::Scheduled { value: requested }
    }

    /// Takes the pending value for dispatch, clearing the slot.
    ///
    /// Called when the debounce fires, before the collaborator is awaited,
    /// so a new debounce cycle can accumulate during the call.
    pub fn take_pending(&mut self) -> Option<u32> {
        self.pending_value.take()
    }

    /// Marks a collaborator call as outstanding.
    pub fn begin_submit(&mut self) {
        self.is_submitting = true;
    }

    /// Marks the collaborator call finished, success or failure.
    pub fn finish_submit(&mut self) {
        self.is_submitting = false;
    }

    /// Hides the max-quantity warning.
    pub fn clear_warning(&mut self) {
        self.is_clamped = false;
    }

    /// Resets to an externally confirmed quantity.
    ///
    /// Server wins: any in-progress local edit that has not been dispatched
    /// is discarded. The warning state is orthogonal and untouched.
    pub fn resync(&mut self, authoritative: u32) {
        self.committed_value = authoritative;
        self.display_value = authoritative;
        self.pending_value = None;
    }

    /// Serializable view for the frontend.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            committed_value: self.committed_value,
            display_value: self.display_value,
            is_submitting: self.is_submitting,
            is_clamped: self.is_clamped,
            max_quantity: self.max_quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
