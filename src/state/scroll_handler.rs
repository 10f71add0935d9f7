//! Scroll reactor - turns scroll notifications into window update modes.
//!
//! Pure bookkeeping: the reactor remembers the previous offset, derives the
//! delta, and classifies it. It owns the one-shot suppression flag used when
//! the controller moves the scroll offset itself, so the resulting synthetic
//! notification is swallowed instead of triggering another rebuild.
//!
//! # Sign convention
//!
//! `delta = previous - current`. Negative deltas move toward later indices
//! ("down"), positive ones toward earlier indices.

/// Which window update a scroll delta calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateMode {
    /// Non-incremental navigation (scrollbar drag, home/end): rebuild the
    /// window from the scroll fraction.
    Jump,
    /// Small move toward later indices: fill below, trim above.
    Forward,
    /// Small move toward earlier indices (or no move): fill above, trim below.
    Backward,
}

impl UpdateMode {
    /// Classify a delta against the jump threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// # use virtlist::state::scroll_handler::UpdateMode;
    /// assert_eq!(UpdateMode::classify(-600.0, 500.0), UpdateMode::Jump);
    /// assert_eq!(UpdateMode::classify(-60.0, 500.0), UpdateMode::Forward);
    /// assert_eq!(UpdateMode::classify(60.0, 500.0), UpdateMode::Backward);
    /// assert_eq!(UpdateMode::classify(0.0, 500.0), UpdateMode::Backward);
    /// ```
    pub fn classify(delta: f64, jump_threshold: f64) -> Self {
        if delta.abs() > jump_threshold {
            UpdateMode::Jump
        } else if delta < 0.0 {
            UpdateMode::Forward
        } else {
            UpdateMode::Backward
        }
    }
}

/// Counters of what the reactor has dispatched, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactorStats {
    /// Full rebuilds triggered by large deltas.
    pub jumps: usize,
    /// Incremental forward updates.
    pub forward: usize,
    /// Incremental backward updates.
    pub backward: usize,
    /// Notifications swallowed by the suppression flag.
    pub suppressed: usize,
}

impl ReactorStats {
    fn count(&mut self, mode: UpdateMode) {
        match mode {
            UpdateMode::Jump => self.jumps += 1,
            UpdateMode::Forward => self.forward += 1,
            UpdateMode::Backward => self.backward += 1,
        }
    }
}

/// Scroll-position bookkeeping for one controller.
#[derive(Debug, Clone, Default)]
pub struct ScrollReactor {
    previous_offset: f64,
    ignore_next: bool,
    stats: ReactorStats,
}

impl ScrollReactor {
    /// Consume one scroll notification reporting `offset`.
    ///
    /// Returns `None` when the notification is the synthetic echo of a
    /// controller-issued offset change; the flag is cleared either way.
    pub fn observe(&mut self, offset: f64, jump_threshold: f64) -> Option<UpdateMode> {
        let delta = self.previous_offset - offset;
        self.previous_offset = offset;

        if std::mem::take(&mut self.ignore_next) {
            self.stats.suppressed += 1;
            tracing::trace!(offset, "Ignoring synthetic scroll notification");
            return None;
        }

        let mode = UpdateMode::classify(delta, jump_threshold);
        self.stats.count(mode);
        Some(mode)
    }

    /// Count an update requested directly rather than via a notification.
    pub fn record(&mut self, mode: UpdateMode) {
        self.stats.count(mode);
    }

    /// Note a controller-issued move from `before` to `after`.
    ///
    /// Arms the suppression flag only if the offset actually changed, since
    /// hosts do not notify about no-op moves. Several moves within one update
    /// reach the host as a single notification, so an armed flag stays armed.
    pub fn expect_programmatic_scroll(&mut self, before: f64, after: f64) {
        self.previous_offset = after;
        self.ignore_next |= before != after;
    }

    /// Forget pending state and start tracking from `offset`.
    pub fn reset(&mut self, offset: f64) {
        self.previous_offset = offset;
        self.ignore_next = false;
    }

    /// Last offset seen.
    pub fn previous_offset(&self) -> f64 {
        self.previous_offset
    }

    /// True while a synthetic notification is expected.
    pub fn is_ignoring_next(&self) -> bool {
        self.ignore_next
    }

    /// Dispatch counters.
    pub fn stats(&self) -> ReactorStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 500.0;

    #[test]
    fn classify_uses_strict_threshold() {
        assert_eq!(UpdateMode::classify(-500.0, THRESHOLD), UpdateMode::Forward);
        assert_eq!(UpdateMode::classify(500.0, THRESHOLD), UpdateMode::Backward);
        assert_eq!(UpdateMode::classify(500.5, THRESHOLD), UpdateMode::Jump);
    }

    #[test]
    fn observe_derives_delta_from_previous_offset() {
        let mut reactor = ScrollReactor::default();
        assert_eq!(reactor.observe(60.0, THRESHOLD), Some(UpdateMode::Forward));
        assert_eq!(reactor.previous_offset(), 60.0);
        assert_eq!(reactor.observe(20.0, THRESHOLD), Some(UpdateMode::Backward));
        assert_eq!(reactor.observe(900.0, THRESHOLD), Some(UpdateMode::Jump));
    }

    #[test]
    fn programmatic_scroll_suppresses_exactly_one_notification() {
        let mut reactor = ScrollReactor::default();
        reactor.expect_programmatic_scroll(0.0, 25_000.0);
        assert!(reactor.is_ignoring_next());

        assert_eq!(reactor.observe(25_000.0, THRESHOLD), None);
        assert!(!reactor.is_ignoring_next());
        assert_eq!(reactor.observe(25_010.0, THRESHOLD), Some(UpdateMode::Forward));

        let stats = reactor.stats();
        assert_eq!(stats.suppressed, 1);
        assert_eq!(stats.forward, 1);
    }

    #[test]
    fn noop_programmatic_scroll_does_not_arm_flag() {
        let mut reactor = ScrollReactor::default();
        reactor.expect_programmatic_scroll(300.0, 300.0);
        assert!(!reactor.is_ignoring_next());
        assert_eq!(reactor.observe(310.0, THRESHOLD), Some(UpdateMode::Forward));
    }

    #[test]
    fn moves_within_one_update_share_one_echo() {
        let mut reactor = ScrollReactor::default();
        reactor.expect_programmatic_scroll(0.0, 400.0);
        reactor.expect_programmatic_scroll(400.0, 400.0);
        reactor.expect_programmatic_scroll(400.0, 430.0);

        assert_eq!(reactor.observe(430.0, THRESHOLD), None);
        assert_eq!(reactor.observe(440.0, THRESHOLD), Some(UpdateMode::Forward));
        assert_eq!(reactor.stats().suppressed, 1);
    }

    #[test]
    fn reset_clears_flag() {
        let mut reactor = ScrollReactor::default();
        reactor.expect_programmatic_scroll(0.0, 100.0);
        reactor.reset(0.0);
        assert!(!reactor.is_ignoring_next());
        assert_eq!(reactor.previous_offset(), 0.0);
    }

    #[test]
    fn record_counts_direct_updates() {
        let mut reactor = ScrollReactor::default();
        reactor.record(UpdateMode::Jump);
        reactor.record(UpdateMode::Backward);
        assert_eq!(
            reactor.stats(),
            ReactorStats {
                jumps: 1,
                forward: 0,
                backward: 1,
                suppressed: 0,
            }
        );
    }
}
