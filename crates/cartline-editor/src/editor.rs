//! # Quantity Editor Runtime
//!
//! One actor task per cart line, driving the pure state machine from
//! cartline-core.
//!
//! ## Runtime Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    QuantityEditor Runtime                               │
//! │                                                                         │
//! │  UI layer                                                              │
//! │  ────────                                                              │
//! │  QuantityEditorHandle ── set_quantity / sync_committed / shutdown      │
//! │          │                                      ▲                       │
//! │          │ mpsc commands                        │ watch snapshots       │
//! │          ▼                                      │                       │
//! │  ┌─────────────────────────────────────────────┴─────────────────────┐ │
//! │  │                    QuantityEditor (actor task)                    │ │
//! │  │                                                                   │ │
//! │  │  select! over:                                                    │ │
//! │  │  • command channel      edits, resync, shutdown                   │ │
//! │  │  • debounce deadline    take pending, dispatch to CartBackend     │ │
//! │  │  • warning deadline     hide the max-quantity warning             │ │
//! │  │                                                                   │ │
//! │  │  Dispatch is inline on this task, so at most one update/remove    │ │
//! │  │  call is ever outstanding per instance.                           │ │
//! │  └───────────────────────────────┬───────────────────────────────────┘ │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                    CartBackend (host-implemented)                       │
//! │                    update_quantity(qty) / remove_item(id)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Teardown
//! `shutdown()` (or dropping every handle) ends the loop; both deadlines
//! die with it, so no timer callback can mutate state after the owning view
//! is gone. A shutdown arriving mid-call lets the await finish first.

use std::future::pending;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use cartline_core::{EditOutcome, EditorSnapshot, QuantityEditorState, RawQuantity};

use crate::backend::CartBackend;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};

// =============================================================================
// Constants
// =============================================================================

/// Command channel depth; edits far outpacing the actor get backpressured.
const COMMAND_CHANNEL_CAPACITY: usize = 32;

// =============================================================================
// Commands
// =============================================================================

/// Messages from the handle to the actor task.
#[derive(Debug)]
enum Command {
    /// A local edit from the stepper buttons or the text field.
    SetQuantity(RawQuantity),

    /// The authoritative quantity changed (parent re-render).
    SyncCommitted(u32),

    /// Stop the actor.
    Shutdown,
}

// =============================================================================
// Quantity Editor
// =============================================================================

/// The actor owning one cart line's editor state and timers.
pub struct QuantityEditor {
    /// Instance configuration.
    config: EditorConfig,

    /// Pure state machine.
    state: QuantityEditorState,

    /// Host collaborator for update/remove calls.
    backend: Arc<dyn CartBackend>,

    /// Command receiver.
    cmd_rx: mpsc::Receiver<Command>,

    /// Snapshot publisher.
    snapshot_tx: watch::Sender<EditorSnapshot>,

    /// When the debounced dispatch fires, if an edit is pending.
    debounce_deadline: Option<Instant>,

    /// When the max-quantity warning hides, if visible.
    warning_deadline: Option<Instant>,
}

/// Handle for controlling a [`QuantityEditor`].
#[derive(Clone)]
pub struct QuantityEditorHandle {
    /// Command sender.
    cmd_tx: mpsc::Sender<Command>,

    /// Snapshot receiver.
    snapshot_rx: watch::Receiver<EditorSnapshot>,
}

impl QuantityEditorHandle {
    /// Applies a local edit: a direct integer from increment/decrement
    /// controls or raw text from the input field.
    pub async fn set_quantity(&self, raw: impl Into<RawQuantity>) -> EditorResult<()> {
        self.cmd_tx
            .send(Command::SetQuantity(raw.into()))
            .await
            .map_err(|_| EditorError::Detached)
    }

    /// Resets the editor to an externally confirmed quantity, discarding
    /// any undispatched local edit.
    pub async fn sync_committed(&self, value: u32) -> EditorResult<()> {
        self.cmd_tx
            .send(Command::SyncCommitted(value))
            .await
            .map_err(|_| EditorError::Detached)
    }

    /// Current editor snapshot.
    pub fn snapshot(&self) -> EditorSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch receiver for snapshot changes (for reactive UI layers).
    pub fn subscribe(&self) -> watch::Receiver<EditorSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Stops the actor; both timers are cancelled with it.
    pub async fn shutdown(&self) -> EditorResult<()> {
        self.cmd_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| EditorError::Detached)
    }
}

impl QuantityEditor {
    /// Creates an editor and returns it with its handle.
    ///
    /// The caller spawns [`run`](Self::run) as a task; see
    /// [`spawn`](Self::spawn) for the one-liner.
    pub fn new(config: EditorConfig, backend: Arc<dyn CartBackend>) -> (Self, QuantityEditorHandle) {
        let state = QuantityEditorState::new(config.initial_value, config.max_quantity);
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let editor = QuantityEditor {
            config,
            state,
            backend,
            cmd_rx,
            snapshot_tx,
            debounce_deadline: None,
            warning_deadline: None,
        };

        let handle = QuantityEditorHandle {
            cmd_tx,
            snapshot_rx,
        };

        (editor, handle)
    }

    /// Creates an editor, spawns its task, and returns the handle.
    pub fn spawn(config: EditorConfig, backend: Arc<dyn CartBackend>) -> QuantityEditorHandle {
        let (editor, handle) = QuantityEditor::new(config, backend);
        tokio::spawn(editor.run());
        handle
    }

    /// Runs the editor loop.
    ///
    /// This should be spawned as a background task. It exits on shutdown or
    /// when every handle is dropped.
    pub async fn run(mut self) {
        debug!(item_id = ?self.config.item_id, "quantity editor starting");

        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(Command::SetQuantity(raw)) => self.on_edit(raw).await,
                    Some(Command::SyncCommitted(value)) => self.on_resync(value),
                    Some(Command::Shutdown) | None => break,
                },

                // Debounced dispatch
                _ = Self::at(self.debounce_deadline), if self.debounce_deadline.is_some() => {
                    self.debounce_deadline = None;
                    self.dispatch_pending().await;
                }

                // Warning expiry
                _ = Self::at(self.warning_deadline), if self.warning_deadline.is_some() => {
                    self.warning_deadline = None;
                    self.state.clear_warning();
                    self.publish();
                }
            }
        }

        debug!(item_id = ?self.config.item_id, "quantity editor stopped");
    }

    /// Resolves at `deadline`; never resolves when disarmed.
    ///
    /// The select branch carries an `is_some` precondition, so the pending
    /// arm is only a type-level placeholder.
    async fn at(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => pending::<()>().await,
        }
    }

    /// Handles one local edit.
    async fn on_edit(&mut self, raw: RawQuantity) {
        let outcome = self.state.apply_edit(raw);
        self.publish();

        match outcome {
            EditOutcome::Clamped { limit } => {
                debug!(limit, "edit clamped to maximum quantity");
                // The clamp superseded the edit buffer; cancel the dispatch
                // and restart the warning countdown from this clamp.
                self.debounce_deadline = None;
                self.warning_deadline = Some(Instant::now() + self.config.warning_duration);
            }
            EditOutcome::Reverted => {
                self.debounce_deadline = None;
            }
            EditOutcome::Scheduled { value } => {
                if self.config.input_only {
                    self.dispatch_immediate(value).await;
                } else {
                    self.debounce_deadline = Some(Instant::now() + self.config.debounce_delay);
                }
            }
        }
    }

    /// Forwards an accepted edit straight to the update collaborator.
    ///
    /// `input_only` mode: no debounce, no submitting flag, no removal
    /// branch; `0` passes through like any other value.
    async fn dispatch_immediate(&mut self, value: u32) {
        self.state.take_pending();
        if let Err(error) = self.backend.update_quantity(value).await {
            warn!(%error, value, "quantity update failed");
        }
    }

    /// Dispatches the pending edit after the debounce elapsed.
    async fn dispatch_pending(&mut self) {
        // Taken before the await so the next debounce cycle can accumulate
        // while this call is in flight.
        let Some(value) = self.state.take_pending() else {
            return;
        };
        if value == self.state.committed_value() {
            return;
        }

        if value == 0 {
            let Some(item_id) = self.config.item_id.clone() else {
                debug!("quantity reached zero with no item id, nothing to remove");
                return;
            };
            self.state.begin_submit();
            self.publish();
            if let Err(error) = self.backend.remove_item(&item_id).await {
                warn!(%error, item_id = %item_id, "cart line removal failed");
            }
        } else {
            self.state.begin_submit();
            self.publish();
            if let Err(error) = self.backend.update_quantity(value).await {
                warn!(%error, value, "quantity update failed");
            }
        }

        // Reset on success and failure alike; the spinner must never stick.
        self.state.finish_submit();
        self.publish();
    }

    /// Handles an authoritative quantity change. Server wins: the pending
    /// edit and its debounce are discarded.
    fn on_resync(&mut self, value: u32) {
        self.state.resync(value);
        self.debounce_deadline = None;
        self.publish();
    }

    /// Publishes the current snapshot to every subscriber.
    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use cartline_core::ItemId;

    /// Records every collaborator call.
    #[derive(Default)]
    struct RecordingBackend {
        updates: Mutex<Vec<u32>>,
        removes: Mutex<Vec<ItemId>>,
    }

    impl RecordingBackend {
        fn updates(&self) -> Vec<u32> {
            self.updates.lock().unwrap().clone()
        }

        fn removes(&self) -> Vec<ItemId> {
            self.removes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CartBackend for RecordingBackend {
        async fn update_quantity(&self, quantity: u32) -> EditorResult<()> {
            self.updates.lock().unwrap().push(quantity);
            Ok(())
        }

        async fn remove_item(&self, item_id: &ItemId) -> EditorResult<()> {
            self.removes.lock().unwrap().push(item_id.clone());
            Ok(())
        }
    }

    /// Blocks each call until released, to observe the submitting window.
    #[derive(Default)]
    struct GatedBackend {
        gate: Notify,
        updates: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl CartBackend for GatedBackend {
        async fn update_quantity(&self, quantity: u32) -> EditorResult<()> {
            self.gate.notified().await;
            self.updates.lock().unwrap().push(quantity);
            Ok(())
        }

        async fn remove_item(&self, _item_id: &ItemId) -> EditorResult<()> {
            self.gate.notified().await;
            Ok(())
        }
    }

    /// Fails every call.
    struct FailingBackend;

    #[async_trait]
    impl CartBackend for FailingBackend {
        async fn update_quantity(&self, _quantity: u32) -> EditorResult<()> {
            Err(EditorError::backend("502 from commerce API"))
        }

        async fn remove_item(&self, _item_id: &ItemId) -> EditorResult<()> {
            Err(EditorError::backend("502 from commerce API"))
        }
    }

    /// Lets the actor task drain its queue on the paused runtime.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_coalesce_into_one_update() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 1), backend.clone());

        handle.set_quantity(3).await.unwrap();
        handle.set_quantity(4).await.unwrap();
        handle.set_quantity(5).await.unwrap();

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(backend.updates().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(backend.updates(), vec![5]);
        assert!(backend.removes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_back_to_committed_makes_no_call() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 2), backend.clone());

        handle.set_quantity(5).await.unwrap();
        handle.set_quantity(2).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert!(backend.updates().is_empty());
        assert!(backend.removes().is_empty());
        assert_eq!(handle.snapshot().display_value, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_quantity_removes_after_debounce() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-9", 3), backend.clone());

        handle.set_quantity(0).await.unwrap();

        tokio::time::sleep(Duration::from_millis(501)).await;
        settle().await;
        assert_eq!(backend.removes(), vec![ItemId::from("line-9")]);
        assert!(backend.updates().is_empty());
        assert!(!handle.snapshot().is_submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_quantity_without_item_id_is_noop() {
        let backend = Arc::new(RecordingBackend::default());
        let config = EditorConfig {
            initial_value: 3,
            ..Default::default()
        };
        let handle = QuantityEditor::spawn(config, backend.clone());

        handle.set_quantity(0).await.unwrap();

        tokio::time::sleep(Duration::from_millis(501)).await;
        settle().await;
        assert!(backend.updates().is_empty());
        assert!(backend.removes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clamp_warns_then_expires_without_calls() {
        let backend = Arc::new(RecordingBackend::default());
        let config = EditorConfig {
            max_quantity: Some(5),
            ..EditorConfig::for_item("line-1", 2)
        };
        let handle = QuantityEditor::spawn(config, backend.clone());

        handle.set_quantity(7).await.unwrap();
        settle().await;

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.display_value, 5);
        assert!(snapshot.is_clamped);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        settle().await;

        let snapshot = handle.snapshot();
        assert!(!snapshot.is_clamped);
        assert_eq!(snapshot.display_value, 5);
        assert!(backend.updates().is_empty());
        assert!(backend.removes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_clamp_restarts_warning_timer() {
        let backend = Arc::new(RecordingBackend::default());
        let config = EditorConfig {
            max_quantity: Some(5),
            ..EditorConfig::for_item("line-1", 2)
        };
        let handle = QuantityEditor::spawn(config, backend.clone());

        handle.set_quantity(7).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        handle.set_quantity(6).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        settle().await;
        // 4s after the first clamp, 2s after the second: still visible
        assert!(handle.snapshot().is_clamped);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        settle().await;
        assert!(!handle.snapshot().is_clamped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clamp_cancels_previously_scheduled_edit() {
        let backend = Arc::new(RecordingBackend::default());
        let config = EditorConfig {
            max_quantity: Some(5),
            ..EditorConfig::for_item("line-1", 2)
        };
        let handle = QuantityEditor::spawn(config, backend.clone());

        handle.set_quantity(4).await.unwrap();
        handle.set_quantity(9).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert!(backend.updates().is_empty());
        assert_eq!(handle.snapshot().display_value, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_only_dispatches_immediately() {
        let backend = Arc::new(RecordingBackend::default());
        let config = EditorConfig {
            input_only: true,
            ..EditorConfig::for_item("line-1", 1)
        };
        let handle = QuantityEditor::spawn(config, backend.clone());

        handle.set_quantity(4).await.unwrap();
        settle().await;
        // No 500 ms delay
        assert_eq!(backend.updates(), vec![4]);

        // Zero passes through as an update, never a removal
        handle.set_quantity(0).await.unwrap();
        settle().await;
        assert_eq!(backend.updates(), vec![4, 0]);
        assert!(backend.removes().is_empty());
        assert!(!handle.snapshot().is_submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_input_parses_and_dispatches() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 1), backend.clone());

        handle.set_quantity("12").await.unwrap();
        tokio::time::sleep(Duration::from_millis(501)).await;
        settle().await;
        assert_eq!(backend.updates(), vec![12]);
        assert_eq!(handle.snapshot().display_value, 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submitting_flag_spans_the_call() {
        let backend = Arc::new(GatedBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 1), backend.clone());

        handle.set_quantity(5).await.unwrap();
        tokio::time::sleep(Duration::from_millis(501)).await;
        settle().await;
        // The call is blocked on the gate
        assert!(handle.snapshot().is_submitting);

        // Edits made mid-flight accumulate as the next pending value
        handle.set_quantity(7).await.unwrap();

        backend.gate.notify_one();
        settle().await;
        assert!(!handle.snapshot().is_submitting);
        assert_eq!(backend.updates.lock().unwrap().clone(), vec![5]);

        // The mid-flight edit debounces and dispatches in its own cycle
        tokio::time::sleep(Duration::from_millis(501)).await;
        settle().await;
        assert!(handle.snapshot().is_submitting);
        backend.gate.notify_one();
        settle().await;
        assert_eq!(backend.updates.lock().unwrap().clone(), vec![5, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_failure_resets_submitting() {
        let backend = Arc::new(FailingBackend);
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 1), backend);

        handle.set_quantity(4).await.unwrap();
        tokio::time::sleep(Duration::from_millis(501)).await;
        settle().await;

        let snapshot = handle.snapshot();
        assert!(!snapshot.is_submitting);
        assert_eq!(snapshot.display_value, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resync_discards_pending_edit() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 3), backend.clone());

        handle.set_quantity(5).await.unwrap();
        handle.sync_committed(9).await.unwrap();

        tokio::time::sleep(Duration::from_millis(600)).await;
        settle().await;
        assert!(backend.updates().is_empty());

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.committed_value, 9);
        assert_eq!(snapshot.display_value, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_debounce() {
        let backend = Arc::new(RecordingBackend::default());
        let (editor, handle) =
            QuantityEditor::new(EditorConfig::for_item("line-1", 1), backend.clone());
        let task = tokio::spawn(editor.run());

        handle.set_quantity(5).await.unwrap();
        handle.shutdown().await.unwrap();
        task.await.unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(backend.updates().is_empty());

        // The handle is detached once the actor is gone
        assert!(matches!(
            handle.set_quantity(6).await,
            Err(EditorError::Detached)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_every_handle_stops_the_actor() {
        let backend = Arc::new(RecordingBackend::default());
        let (editor, handle) =
            QuantityEditor::new(EditorConfig::for_item("line-1", 1), backend.clone());
        let task = tokio::spawn(editor.run());

        handle.set_quantity(2).await.unwrap();
        drop(handle);

        task.await.unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(backend.updates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_subscription_sees_transitions() {
        let backend = Arc::new(RecordingBackend::default());
        let handle = QuantityEditor::spawn(EditorConfig::for_item("line-1", 1), backend);
        let mut snapshots = handle.subscribe();

        handle.set_quantity(3).await.unwrap();
        snapshots.changed().await.unwrap();
        assert_eq!(snapshots.borrow_and_update().display_value, 3);
    }
}
