//! # Editor Configuration
//!
//! Recognized options for one editor instance. Defaults mirror the named
//! constants in cartline-core; tests and unusual hosts override the delays.

use std::time::Duration;

use cartline_core::{ItemId, CLAMP_WARNING_DURATION, DEBOUNCE_DELAY};

/// Configuration for a [`QuantityEditor`](crate::editor::QuantityEditor).
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Server-confirmed quantity the editor starts at.
    pub initial_value: u32,

    /// Upper bound for local edits; `None` means unbounded.
    pub max_quantity: Option<u32>,

    /// Line-item identifier. Required for the zero-quantity removal branch;
    /// without it a zero edit makes no call at all.
    pub item_id: Option<ItemId>,

    /// Bypass the submitting flag and the removal branch: every accepted
    /// edit is forwarded to `update_quantity` immediately, `0` included.
    pub input_only: bool,

    /// Delay between the last edit and the collaborator dispatch.
    pub debounce_delay: Duration,

    /// How long the max-quantity warning stays visible after the most
    /// recent clamp.
    pub warning_duration: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            initial_value: 0,
            max_quantity: None,
            item_id: None,
            input_only: false,
            debounce_delay: DEBOUNCE_DELAY,
            warning_duration: CLAMP_WARNING_DURATION,
        }
    }
}

impl EditorConfig {
    /// Config for a cart line at its server-confirmed quantity.
    pub fn for_item(item_id: impl Into<ItemId>, initial_value: u32) -> Self {
        EditorConfig {
            initial_value,
            item_id: Some(item_id.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
