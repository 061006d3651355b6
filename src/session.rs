//! Debounced history checkpointing for one document
//!
//! Every edit cancels the pending checkpoint timer and starts a new one,
//! so only the last edit of a burst reaches [`HistoryManager::record`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::config::Config;
use crate::history::{EditorState, HistoryLimits, HistoryManager};

/// Default quiet period before an edit is considered for a checkpoint
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Default)]
struct Shared {
    history: HistoryManager,
    /// Latest edit waiting for its timer
    scheduled: Option<EditorState>,
}

impl Shared {
    fn commit_scheduled(&mut self) -> bool {
        match self.scheduled.take() {
            Some(state) => self.history.record(state, false),
            None => false,
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Editing session owning a document's history and its debounce timer
///
/// Timers run on the ambient tokio runtime. Without one, edits are
/// recorded immediately.
#[derive(Debug)]
pub struct EditSession {
    shared: Arc<Mutex<Shared>>,
    debounce: Duration,
    timer: Option<JoinHandle<()>>,
}

impl EditSession {
    pub fn new(limits: HistoryLimits, debounce: Duration) -> Self {
        let shared = Shared {
            history: HistoryManager::with_limits(limits),
            scheduled: None,
        };
        Self {
            shared: Arc::new(Mutex::new(shared)),
            debounce,
            timer: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.history_limits(), config.debounce())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Note an edit; it is recorded once no further edit arrives for the debounce period
    pub fn on_edit(&mut self, state: EditorState) {
        self.cancel_timer();
        lock(&self.shared).scheduled = Some(state);

        let Ok(runtime) = Handle::try_current() else {
            lock(&self.shared).commit_scheduled();
            return;
        };

        let shared = Arc::clone(&self.shared);
        let delay = self.debounce;
        self.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let created = lock(&shared).commit_scheduled();
            trace!(created, "debounced checkpoint fired");
        }));
    }

    /// Record a waiting edit now instead of when its timer fires
    pub fn flush(&mut self) -> bool {
        self.cancel_timer();
        lock(&self.shared).commit_scheduled()
    }

    /// Unconditional checkpoint, used before saving, compiling or resetting
    pub fn force_checkpoint(&mut self, state: EditorState) {
        self.cancel_timer();
        let mut shared = lock(&self.shared);
        shared.scheduled = None;
        shared.history.record(state, true);
    }

    pub fn undo(&mut self) -> Option<EditorState> {
        self.flush();
        lock(&self.shared).history.undo()
    }

    pub fn redo(&mut self) -> Option<EditorState> {
        self.flush();
        lock(&self.shared).history.redo()
    }

    /// Drop all history, e.g. for a new file
    pub fn reset(&mut self) {
        self.cancel_timer();
        let mut shared = lock(&self.shared);
        shared.scheduled = None;
        shared.history.clear();
    }

    pub fn can_undo(&self) -> bool {
        lock(&self.shared).history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        lock(&self.shared).history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        lock(&self.shared).history.undo_depth()
    }

    /// The pending history state (not counting an edit still waiting on its timer)
    pub fn current(&self) -> Option<EditorState> {
        lock(&self.shared).history.current().cloned()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            if !timer.is_finished() {
                debug!("pending checkpoint cancelled");
            }
            timer.abort();
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(
            HistoryLimits::default(),
            Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        )
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn typed(text: &str) -> EditorState {
        EditorState::new(text, (text.len(), text.len()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_records_once() {
        let mut session = EditSession::default();
        session.force_checkpoint(typed("abc"));
        let baseline = session.undo_depth();

        session.on_edit(typed("abcd"));
        sleep(ms(100)).await;
        session.on_edit(typed("abcde"));
        sleep(ms(100)).await;
        session.on_edit(typed("abcdef"));

        sleep(ms(100)).await;
        assert_eq!(session.current().unwrap().text, "abc");

        sleep(ms(500)).await;
        assert_eq!(session.current().unwrap().text, "abcdef");
        assert!(session.undo_depth() <= baseline + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_records_immediately() {
        let mut session = EditSession::default();
        session.force_checkpoint(typed("x"));
        session.on_edit(typed("x + pasted"));

        assert!(session.flush());
        assert_eq!(session.undo_depth(), 1);
        assert!(!session.flush());

        sleep(ms(1000)).await;
        assert_eq!(session.undo_depth(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_force_checkpoint_cancels_timer() {
        let mut session = EditSession::default();
        session.force_checkpoint(typed("one"));
        session.on_edit(typed("one, but longer"));
        session.force_checkpoint(typed("saved"));

        sleep(ms(1000)).await;
        assert_eq!(session.current().unwrap().text, "saved");
        assert_eq!(session.undo().unwrap().text, "one");
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_flushes_waiting_edit() {
        let mut session = EditSession::default();
        session.force_checkpoint(typed("base"));
        session.on_edit(typed("base and more"));

        assert_eq!(session.undo().unwrap().text, "base");
        assert!(session.can_redo());
        assert_eq!(session.redo().unwrap().text, "base and more");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset() {
        let mut session = EditSession::default();
        session.force_checkpoint(typed("a"));
        session.force_checkpoint(typed("b"));
        session.on_edit(typed("b and c"));
        session.reset();

        sleep(ms(1000)).await;
        assert!(!session.can_undo());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_without_runtime_records_directly() {
        let mut session = EditSession::default();
        session.on_edit(typed("first"));
        session.on_edit(typed("first and second"));
        assert_eq!(session.undo_depth(), 1);
        assert_eq!(session.current().unwrap().text, "first and second");
    }
}
