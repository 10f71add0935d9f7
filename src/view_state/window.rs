//! Window state - which items are currently materialized

use std::collections::VecDeque;
use std::ops::Range;

/// Contiguous range of materialized item indices.
///
/// Half-open: `start` is the top index, `end` is one past the bottom index.
/// An empty range (`start == end`) is the `bottomIndex = topIndex - 1`
/// sentinel of a freshly reset window.
///
/// # Invariants
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowRange {
    /// Index of the first materialized item (inclusive).
    pub start: usize,
    /// One past the last materialized item (exclusive).
    pub end: usize,
}

impl WindowRange {
    /// Create a new window range.
    ///
    /// # Panics
    /// In debug builds, panics if start > end.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "window start {start} past end {end}");
        Self { start, end }
    }

    /// Number of materialized items.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the empty-window sentinel.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Index of the first materialized item.
    pub fn top_index(&self) -> usize {
        self.start
    }

    /// Index of the last materialized item, `None` for an empty window.
    pub fn bottom_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    /// Iterate over materialized indices.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if a specific index is materialized.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Materialized range plus back-references to the mounted nodes.
///
/// Handles are lookup keys into the display layer, front = top item,
/// back = bottom item. Nothing here owns a node.
#[derive(Debug, Clone)]
pub struct WindowState<H> {
    top: usize,
    handles: VecDeque<H>,
}

impl<H: Copy> WindowState<H> {
    /// Empty window anchored at `top`.
    pub fn empty_at(top: usize) -> Self {
        Self {
            top,
            handles: VecDeque::new(),
        }
    }

    /// Current range.
    pub fn range(&self) -> WindowRange {
        WindowRange::new(self.top, self.top + self.handles.len())
    }

    /// Index of the first materialized item (or the anchor when empty).
    pub fn top(&self) -> usize {
        self.top
    }

    /// One past the last materialized index.
    pub fn end(&self) -> usize {
        self.top + self.handles.len()
    }

    /// Number of materialized items.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handle of the first materialized node.
    pub fn first(&self) -> Option<H> {
        self.handles.front().copied()
    }

    /// Handle of the last materialized node.
    pub fn last(&self) -> Option<H> {
        self.handles.back().copied()
    }

    /// Handles from top to bottom.
    pub fn handles(&self) -> impl DoubleEndedIterator<Item = H> + ExactSizeIterator + '_ {
        self.handles.iter().copied()
    }

    /// Record a node materialized just below the window.
    pub fn push_back(&mut self, handle: H) {
        self.handles.push_back(handle);
    }

    /// Record a node materialized just above the window.
    ///
    /// # Panics
    /// Panics if the window already starts at index 0.
    pub fn push_front(&mut self, handle: H) {
        assert!(self.top > 0, "cannot extend window above index 0");
        self.top -= 1;
        self.handles.push_front(handle);
    }

    /// Forget the first node, advancing the top index.
    pub fn pop_front(&mut self) -> Option<H> {
        let handle = self.handles.pop_front()?;
        self.top += 1;
        Some(handle)
    }

    /// Forget the last node.
    pub fn pop_back(&mut self) -> Option<H> {
        self.handles.pop_back()
    }

    /// Empty the window, re-anchoring it at `top`, and hand back every handle.
    pub fn reset(&mut self, top: usize) -> Vec<H> {
        self.top = top;
        self.handles.drain(..).collect()
    }
}

impl<H: Copy> Default for WindowState<H> {
    fn default() -> Self {
        Self::empty_at(0)
    }
}
