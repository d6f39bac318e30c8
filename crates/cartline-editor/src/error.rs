//! # Error Types
//!
//! Runtime errors for the editor crate.
//!
//! Collaborator failures are deliberately *not* part of the editor's control
//! flow: a failed update/remove is logged, `is_submitting` resets, and the
//! host surfaces the problem however it likes. [`EditorError::Backend`]
//! exists so `CartBackend` implementations have a typed way to report
//! failures through the trait.

use thiserror::Error;

/// Errors surfaced by the editor runtime and its collaborator seam.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The editor task is gone (shut down or dropped); the handle can no
    /// longer deliver commands.
    #[error("quantity editor is detached")]
    Detached,

    /// A collaborator call failed.
    ///
    /// ## When This Occurs
    /// The host's update/remove implementation hit a network or API error.
    /// The editor logs it and resets the submitting flag; it never retries.
    #[error("cart backend call failed: {message}")]
    Backend { message: String },
}

impl EditorError {
    /// Convenience constructor for backend implementations.
    pub fn backend(message: impl Into<String>) -> Self {
        EditorError::Backend {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with EditorError.
pub type EditorResult<T> = Result<T, EditorError>;

// =============================================================================
// Unit Tests
// =============================================================================
