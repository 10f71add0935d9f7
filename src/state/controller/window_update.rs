//! Window update passes: fill, trim, and rebuild.
//!
//! # Geometry
//!
//! Offsets come from the surface and are relative to the viewport's top edge.
//! An item's *bottom edge* is `offset + extent`.
//!
//! - forward fill: mount below until the last item's bottom edge reaches
//!   `viewport + prefetch_items × estimate`
//! - forward trim: unmount from the top while an item's bottom edge is above
//!   `-removal_tolerance`
//! - backward fill: mount above until the first item's top edge is at or
//!   above the viewport's top edge
//! - backward trim: unmount from the bottom while an item's top edge is past
//!   `viewport + prefetch_items × estimate`
//!
//! Trims never unmount the last remaining item. While a pass fills, the
//! spacer on that side shrinks by each measured extent.
//!
//! # Spacer settlement
//!
//! Every pass ends with both spacers at `estimate × unmaterialized items`.
//! Re-deriving the top spacer moves every mounted item, so the scroll offset
//! moves with it and the content stays where it was on screen. A top spacer
//! is therefore never zero while items above are unmaterialized, and never
//! non-zero above item 0.

use super::WindowController;
use crate::surface::{Anchor, Spacer, Surface};
use crate::view_state::spacers::SpacerSizes;
use crate::view_state::window::WindowState;
use tracing::{debug, trace};

impl<T, S: Surface> WindowController<T, S> {
    /// Empty the surface and materialize the first screen from index 0.
    pub(super) fn reset_and_fill(&mut self) {
        self.surface.clear();
        self.store.clear_sizes();
        self.window = WindowState::default();
        self.spacers = SpacerSizes::default();
        self.reactor.reset(self.surface.scroll_offset());
        self.initialized = true;

        if self.store.is_empty() {
            return;
        }

        // The first screen is filled to the viewport edge only.
        let limit = self.surface.viewport_extent();
        let rendered = self.fill_below(limit);
        self.resize_spacer(Spacer::Bottom);
        debug!(rendered, window = ?self.window.range(), "Initial fill");
    }

    pub(super) fn scroll_forward(&mut self) {
        let limit = self.prefetch_limit();
        self.fill_below(limit);

        // The last item is never trimmed, so it can anchor the content.
        let anchor = self
            .window
            .last()
            .map(|handle| (handle, self.surface.offset(handle)));
        self.trim_above();
        self.resize_spacer(Spacer::Bottom);
        self.resize_spacer(Spacer::Top);

        let drift = anchor.map_or(0.0, |(handle, before)| self.surface.offset(handle) - before);
        // Also re-clamps the offset if the bottom spacer shrank.
        self.shift_offset(drift);
    }

    pub(super) fn scroll_backward(&mut self) {
        self.cover_top();
        self.trim_below();
        self.resize_spacer(Spacer::Bottom);
    }

    /// Unmount everything and materialize the range under the viewport,
    /// located by scroll fraction and extended until it spans the viewport,
    /// then pin the offset to the new top spacer.
    pub(super) fn rebuild(&mut self) {
        let len = self.store.len();
        let offset = self.surface.scroll_offset();
        let viewport = self.surface.viewport_extent();
        let total = self.surface.scroll_extent();

        for handle in self.window.reset(0) {
            self.surface.remove(handle);
        }

        if len == 0 {
            self.resize_spacer(Spacer::Top);
            self.resize_spacer(Spacer::Bottom);
            return;
        }

        let (top_fraction, bottom_fraction) = if total > 0.0 {
            (offset / total, (offset + viewport) / total)
        } else {
            (0.0, 1.0)
        };
        let top = fraction_index(top_fraction, len).min(len - 1);
        let end = fraction_index(bottom_fraction, len).clamp(top + 1, len);

        self.window = WindowState::empty_at(top);
        let mut covered = 0.0;
        for index in top..end {
            covered += self.mount_below(index).1;
        }
        // Items smaller than the estimate leave the viewport short.
        while covered < viewport && self.window.end() < len {
            covered += self.mount_below(self.window.end()).1;
        }
        self.resize_spacer(Spacer::Top);
        self.resize_spacer(Spacer::Bottom);

        let before = self.surface.scroll_offset();
        self.surface.set_scroll_offset(self.spacers.top);
        let after = self.surface.scroll_offset();
        self.reactor.expect_programmatic_scroll(before, after);

        // A short tail clamps the offset below the top spacer, leaving a gap
        // above the first item.
        if after < self.spacers.top {
            self.cover_top();
            self.resize_spacer(Spacer::Bottom);
        }

        debug!(
            top_fraction,
            bottom_fraction,
            window = ?self.window.range(),
            corrected_offset = self.surface.scroll_offset(),
            "Rebuilt window"
        );
    }

    /// Fill above and settle the top spacer until the viewport's top edge is
    /// covered. Each extra round mounts at least one item.
    fn cover_top(&mut self) {
        self.fill_above();
        while self.settle_top_spacer() && self.fill_above() > 0 {}
    }

    /// Re-derive the top spacer from the estimate, moving the offset by the
    /// same amount. Returns false if the spacer was already settled.
    fn settle_top_spacer(&mut self) -> bool {
        let previous = self.spacers.top;
        self.resize_spacer(Spacer::Top);
        let shift = self.spacers.top - previous;
        if shift == 0.0 {
            return false;
        }
        self.shift_offset(shift);
        trace!(previous, top_spacer = self.spacers.top, "Settled top spacer");
        true
    }

    /// Move the scroll offset by `delta` and expect the echo.
    fn shift_offset(&mut self, delta: f64) {
        let before = self.surface.scroll_offset();
        self.surface.set_scroll_offset(before + delta);
        let after = self.surface.scroll_offset();
        self.reactor.expect_programmatic_scroll(before, after);
    }

    fn prefetch_limit(&mut self) -> f64 {
        let estimate = self.store.estimate();
        self.surface.viewport_extent() + self.config.prefetch_margin(estimate)
    }

    fn bottom_edge(&self, handle: S::Handle) -> f64 {
        self.surface.offset(handle) + self.surface.extent(handle)
    }

    fn fill_below(&mut self, limit: f64) -> usize {
        if let Some(last) = self.window.last() {
            if self.bottom_edge(last) >= limit {
                return 0;
            }
        }

        let mut rendered = 0;
        while self.window.end() < self.store.len() {
            let (handle, extent) = self.mount_below(self.window.end());
            let spacer = self.spacers.shrink(Spacer::Bottom, extent);
            self.surface.set_spacer_extent(Spacer::Bottom, spacer);
            rendered += 1;
            if self.surface.offset(handle) + extent >= limit {
                break;
            }
        }
        rendered
    }

    fn fill_above(&mut self) -> usize {
        let Some(first) = self.window.first() else {
            return 0;
        };
        if self.window.top() == 0 || self.surface.offset(first) <= 0.0 {
            return 0;
        }

        let mut rendered = 0;
        while self.window.top() > 0 {
            let (handle, extent) = self.mount_above(self.window.top() - 1);
            let spacer = self.spacers.shrink(Spacer::Top, extent);
            self.surface.set_spacer_extent(Spacer::Top, spacer);
            rendered += 1;
            if self.surface.offset(handle) <= 0.0 {
                break;
            }
        }
        rendered
    }

    fn trim_above(&mut self) -> usize {
        let tolerance = -self.config.removal_tolerance;
        let removable = self.window.len().saturating_sub(1);
        let count = self
            .window
            .handles()
            .take(removable)
            .take_while(|&handle| self.bottom_edge(handle) < tolerance)
            .count();

        for _ in 0..count {
            if let Some(handle) = self.window.pop_front() {
                self.surface.remove(handle);
            }
        }
        if count > 0 {
            trace!(count, top = self.window.top(), "Removed items above");
        }
        count
    }

    fn trim_below(&mut self) -> usize {
        let limit = self.prefetch_limit();
        let removable = self.window.len().saturating_sub(1);
        let count = self
            .window
            .handles()
            .rev()
            .take(removable)
            .take_while(|&handle| self.surface.offset(handle) > limit)
            .count();

        for _ in 0..count {
            if let Some(handle) = self.window.pop_back() {
                self.surface.remove(handle);
            }
        }
        if count > 0 {
            trace!(count, end = self.window.end(), "Removed items below");
        }
        count
    }

    fn mount_below(&mut self, index: usize) -> (S::Handle, f64) {
        let node = self.renderer.render(&self.store[index]);
        let handle = self
            .surface
            .insert_before(node, Anchor::Spacer(Spacer::Bottom));
        let extent = self.surface.extent(handle);
        self.store.record_extent(index, extent);
        self.window.push_back(handle);
        trace!(index, extent, "Mounted item below");
        (handle, extent)
    }

    fn mount_above(&mut self, index: usize) -> (S::Handle, f64) {
        let node = self.renderer.render(&self.store[index]);
        let handle = self.surface.insert_after(node, Anchor::Spacer(Spacer::Top));
        let extent = self.surface.extent(handle);
        self.store.record_extent(index, extent);
        self.window.push_front(handle);
        trace!(index, extent, "Mounted item above");
        (handle, extent)
    }

    /// Size a spacer as `estimate × unmaterialized items on that side`.
    fn resize_spacer(&mut self, spacer: Spacer) {
        let estimate = self.store.estimate();
        let count = match spacer {
            Spacer::Top => self.window.top(),
            Spacer::Bottom => self.store.len().saturating_sub(self.window.end()),
        };
        let extent = self.spacers.estimate(spacer, estimate, count);
        self.surface.set_spacer_extent(spacer, extent);
    }
}

/// Index at `fraction` of a sequence of `len` items, rounded to nearest.
fn fraction_index(fraction: f64, len: usize) -> usize {
    // Saturating cast: NaN and negatives land on 0.
    (fraction * len as f64).round() as usize
}
