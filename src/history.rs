//! Undo/redo history
//!
//! The manager keeps one pending state plus bounded undo and redo stacks.
//! Each recorded state either becomes a new checkpoint (the old pending
//! state moves to the undo stack) or silently replaces the pending state,
//! so bursts of small edits collapse into one undo step.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

/// A snapshot of the editor: text, selection and when it was taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub text: String,
    /// Byte offsets `(start, end)` into `text`
    pub selection: (usize, usize),
    pub timestamp: Instant,
}

impl EditorState {
    /// Snapshot taken now
    pub fn new(text: impl Into<String>, selection: (usize, usize)) -> Self {
        Self::at(text, selection, Instant::now())
    }

    /// Snapshot with an explicit timestamp
    pub fn at(text: impl Into<String>, selection: (usize, usize), timestamp: Instant) -> Self {
        Self {
            text: text.into(),
            selection,
            timestamp,
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn newline_count(&self) -> usize {
        self.text.matches('\n').count()
    }
}

/// Thresholds for the checkpoint heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    /// Maximum undo depth; the oldest checkpoint is evicted past this
    pub max_undo: usize,
    /// Character-count change that is always significant
    pub min_char_delta: usize,
    /// Time since the pending state after which any edit is significant
    pub idle_threshold: Duration,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_undo: 100,
            min_char_delta: 3,
            idle_threshold: Duration::from_millis(2000),
        }
    }
}

/// Bounded undo/redo stacks of [`EditorState`]
#[derive(Debug, Default)]
pub struct HistoryManager {
    undo_stack: VecDeque<EditorState>,
    redo_stack: Vec<EditorState>,
    current: Option<EditorState>,
    limits: HistoryLimits,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: HistoryLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> HistoryLimits {
        self.limits
    }

    /// Record a new state
    ///
    /// Returns `true` when a checkpoint was created. With `force` the
    /// heuristic is skipped and a checkpoint is always created.
    pub fn record(&mut self, state: EditorState, force: bool) -> bool {
        let checkpoint = force
            || self
                .current
                .as_ref()
                .map_or(true, |pending| self.is_significant(pending, &state));

        if checkpoint {
            if let Some(previous) = self.current.take() {
                self.push_undo(previous);
            }
            if !self.redo_stack.is_empty() {
                debug!(dropped = self.redo_stack.len(), "redo history cleared");
                self.redo_stack.clear();
            }
            debug!(force, depth = self.undo_stack.len(), "checkpoint recorded");
        }

        self.current = Some(state);
        checkpoint
    }

    /// Whether `new` differs enough from `old` to deserve its own undo step
    pub fn is_significant(&self, old: &EditorState, new: &EditorState) -> bool {
        let char_delta = old.char_count().abs_diff(new.char_count());
        let idle = new.timestamp.saturating_duration_since(old.timestamp);

        char_delta >= self.limits.min_char_delta
            || idle > self.limits.idle_threshold
            || (old.selection != new.selection && char_delta >= 1)
            || old.newline_count() != new.newline_count()
    }

    /// Step back one checkpoint; `None` when there is nothing to undo
    pub fn undo(&mut self) -> Option<EditorState> {
        let previous = self.undo_stack.pop_back()?;
        if let Some(current) = self.current.take() {
            self.redo_stack.push(current);
        }
        self.current = Some(previous.clone());
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "undo");
        Some(previous)
    }

    /// Step forward one checkpoint; `None` when there is nothing to redo
    pub fn redo(&mut self) -> Option<EditorState> {
        let next = self.redo_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.push_undo(current);
        }
        self.current = Some(next.clone());
        debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "redo");
        Some(next)
    }

    /// Forget everything, including the pending state
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The pending state not yet pushed as a checkpoint
    pub fn current(&self) -> Option<&EditorState> {
        self.current.as_ref()
    }

    fn push_undo(&mut self, state: EditorState) {
        self.undo_stack.push_back(state);
        while self.undo_stack.len() > self.limits.max_undo {
            self.undo_stack.pop_front();
        }
    }
}
