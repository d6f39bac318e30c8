//! # Editor Types
//!
//! Input, identifier, and snapshot types for the quantity editor.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Editor Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   RawQuantity   │   │     ItemId      │   │ EditorSnapshot  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Count(i64)     │   │  Text(String)   │   │  committed      │       │
//! │  │  Text(String)   │   │  Number(i64)    │   │  display        │       │
//! │  │                 │   │                 │   │  submitting     │       │
//! │  │  +/- buttons or │   │  line-item key  │   │  clamped        │       │
//! │  │  free-text box  │   │  from the API   │   │  max            │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient vs Strict Parsing
//! The editing contract never raises on bad text: [`RawQuantity::normalize`]
//! degrades empty/non-numeric/negative input to `0`. [`RawQuantity::parse`]
//! is the strict variant for hosts that validate up front.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ParseResult, QuantityParseError};

// =============================================================================
// Raw Quantity
// =============================================================================

/// A quantity as it arrives from the UI.
///
/// Increment/decrement controls send a direct integer; the free-text field
/// sends whatever the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RawQuantity {
    /// Direct integer from stepper buttons.
    Count(i64),
    /// Raw text from the quantity input field.
    Text(String),
}

impl RawQuantity {
    /// Strictly parses the input into a non-negative quantity.
    pub fn parse(&self) -> ParseResult<u32> {
        let count = match self {
            RawQuantity::Count(n) => *n,
            RawQuantity::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(QuantityParseError::Empty);
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| QuantityParseError::NotANumber(trimmed.to_string()))?
            }
        };

        if count < 0 {
            return Err(QuantityParseError::Negative(count));
        }

        // Values beyond u32 are saturated; max_quantity clamps below that anyway
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    /// Leniently normalizes the input: any parse failure degrades to `0`.
    pub fn normalize(&self) -> u32 {
        self.parse().unwrap_or(0)
    }
}

impl From<i64> for RawQuantity {
    fn from(count: i64) -> Self {
        RawQuantity::Count(count)
    }
}

// Unannotated integer literals fall back to i32
impl From<i32> for RawQuantity {
    fn from(count: i32) -> Self {
        RawQuantity::Count(i64::from(count))
    }
}

impl From<u32> for RawQuantity {
    fn from(count: u32) -> Self {
        RawQuantity::Count(i64::from(count))
    }
}

impl From<&str> for RawQuantity {
    fn from(text: &str) -> Self {
        RawQuantity::Text(text.to_string())
    }
}

impl From<String> for RawQuantity {
    fn from(text: String) -> Self {
        RawQuantity::Text(text)
    }
}

// =============================================================================
// Item Id
// =============================================================================

/// Identifier of the cart line item this editor controls.
///
/// The commerce API hands out string ids for most tenants and numeric ids
/// for legacy ones, so both shapes are accepted and round-tripped as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ItemId {
    /// String identifier (UUID or API handle).
    Text(String),
    /// Numeric identifier.
    Number(i64),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Text(id) => write!(f, "{id}"),
            ItemId::Number(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Text(id)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Number(id)
    }
}

// =============================================================================
// Editor Snapshot
// =============================================================================

/// Serializable view of the editor state for the frontend.
///
/// Published on every transition; the UI renders the input field from
/// `display_value`, the spinner from `is_submitting`, and the max-quantity
/// warning from `is_clamped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EditorSnapshot {
    /// Last value known consistent with the server.
    pub committed_value: u32,

    /// Value currently shown in the input.
    pub display_value: u32,

    /// True while an update/remove call is outstanding.
    pub is_submitting: bool,

    /// True while the "maximum exceeded" warning is visible.
    pub is_clamped: bool,

    /// Upper bound for local edits, if any.
    pub max_quantity: Option<u32>,
}

// =============================================================================
// Unit Tests
// =============================================================================
