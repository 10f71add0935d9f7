//! WindowController - windowed rendering of a large ordered collection.
//!
//! Only the items near the visible region are mounted in the display layer;
//! everything else is represented by two spacers sized from an estimated
//! average item extent. Scroll notifications drive incremental expand/contract
//! passes, and large deltas rebuild the window from the scroll fraction.
//!
//! The controller is strictly single-owner: every method runs synchronously
//! on the caller's thread and there is no internal locking.

mod window_update;

use super::scroll_handler::{ReactorStats, ScrollReactor, UpdateMode};
use crate::config::WindowConfig;
use crate::model::item_store::ItemStore;
use crate::surface::{ItemRenderer, Surface};
use crate::view_state::spacers::SpacerSizes;
use crate::view_state::window::{WindowRange, WindowState};
use tracing::debug;

/// Virtualized window over a sequence of `T`, mounted into a surface `S`.
///
/// # Lifecycle
///
/// A fresh controller is *uninitialized*. [`initialize`](Self::initialize),
/// [`set_items`](Self::set_items) or the first append/prepend reset the
/// surface and materialize the first screen. From then on the host forwards
/// each scroll-position change to [`on_scroll`](Self::on_scroll).
///
/// # Examples
///
/// ```
/// # use virtlist::config::WindowConfig;
/// # use virtlist::state::WindowController;
/// # use virtlist::surface::StackSurface;
/// let surface: StackSurface<f64> = StackSurface::new(500.0);
/// let mut list = WindowController::new(surface, |_: &u32| 50.0, WindowConfig::default());
/// list.set_items((0..1000).collect());
///
/// assert_eq!(list.top_index(), 0);
/// assert_eq!(list.bottom_index(), Some(9));
/// assert_eq!(list.spacer_sizes().bottom, 990.0 * 50.0);
/// ```
pub struct WindowController<T, S: Surface> {
    surface: S,
    store: ItemStore<T>,
    renderer: Box<dyn ItemRenderer<T, S::Node>>,
    window: WindowState<S::Handle>,
    spacers: SpacerSizes,
    reactor: ScrollReactor,
    config: WindowConfig,
    initialized: bool,
}

impl<T, S: Surface> WindowController<T, S> {
    /// Creates an uninitialized controller over `surface`.
    pub fn new<R>(surface: S, renderer: R, config: WindowConfig) -> Self
    where
        R: ItemRenderer<T, S::Node> + 'static,
    {
        Self {
            surface,
            store: ItemStore::new(config.estimate_sample_size),
            renderer: Box::new(renderer),
            window: WindowState::default(),
            spacers: SpacerSizes::default(),
            reactor: ScrollReactor::default(),
            config,
            initialized: false,
        }
    }

    /// Binds `renderer` and shows `items` from the top.
    pub fn initialize<R>(&mut self, items: Vec<T>, renderer: R)
    where
        R: ItemRenderer<T, S::Node> + 'static,
    {
        self.renderer = Box::new(renderer);
        self.set_items(items);
    }

    /// Replaces every item and re-initializes.
    ///
    /// All mounted nodes are dropped, the size cache and the memoized estimate
    /// are forgotten, and the first screen is materialized again.
    pub fn set_items(&mut self, items: Vec<T>) {
        debug!(len = items.len(), "Replacing items");
        self.store.replace(items);
        self.reset_and_fill();
    }

    /// Appends one item to the end.
    pub fn append_item(&mut self, item: T) {
        self.append_items(std::iter::once(item));
    }

    /// Appends items to the end.
    ///
    /// On an initialized controller the window is rebuilt at the current
    /// scroll fraction; otherwise this behaves like [`set_items`](Self::set_items)
    /// with the resulting sequence. Measurements are kept either way.
    pub fn append_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let added = self.store.append(items);
        debug!(added, len = self.store.len(), "Appended items");
        self.restructure();
    }

    /// Prepends one item to the front.
    pub fn prepend_item(&mut self, item: T) {
        self.prepend_items(std::iter::once(item));
    }

    /// Prepends items to the front, keeping their order.
    ///
    /// Cached measurements move with the items they belong to. Rebuild rules
    /// are the same as for [`append_items`](Self::append_items).
    pub fn prepend_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let added = self.store.prepend(items);
        debug!(added, len = self.store.len(), "Prepended items");
        self.restructure();
    }

    /// Swaps the render strategy for future materializations.
    ///
    /// Mounted nodes are not re-rendered.
    pub fn bind_item_renderer<R>(&mut self, renderer: R)
    where
        R: ItemRenderer<T, S::Node> + 'static,
    {
        self.renderer = Box::new(renderer);
    }

    /// Handle one scroll notification from the host.
    ///
    /// Reads the current offset from the surface, derives the delta and runs
    /// the matching update. Returns `None` when the notification was the echo
    /// of a controller-issued offset change.
    pub fn on_scroll(&mut self) -> Option<UpdateMode> {
        let offset = self.surface.scroll_offset();
        let mode = self.reactor.observe(offset, self.config.jump_threshold)?;
        self.apply(mode);
        Some(mode)
    }

    /// Run the update a given `delta` calls for, without consulting the
    /// surface's offset history.
    pub fn update(&mut self, delta: f64) -> UpdateMode {
        let mode = UpdateMode::classify(delta, self.config.jump_threshold);
        self.reactor.record(mode);
        self.apply(mode);
        mode
    }

    /// Re-run both incremental passes in place, e.g. after the viewport
    /// extent changed. Does nothing before initialization.
    ///
    /// Mounted items keep their on-screen position; any offset change this
    /// needs is flagged like the correction after a jump.
    pub fn relayout(&mut self) {
        if !self.initialized {
            return;
        }
        self.scroll_forward();
        self.scroll_backward();
        debug!(window = ?self.window.range(), "Relayout");
    }

    fn apply(&mut self, mode: UpdateMode) {
        match mode {
            UpdateMode::Jump => self.rebuild(),
            UpdateMode::Forward => self.scroll_forward(),
            UpdateMode::Backward => self.scroll_backward(),
        }
        debug!(
            ?mode,
            window = ?self.window.range(),
            top_spacer = self.spacers.top,
            bottom_spacer = self.spacers.bottom,
            "Window updated"
        );
    }

    fn restructure(&mut self) {
        if self.initialized && !self.window.is_empty() {
            self.rebuild();
        } else {
            self.reset_and_fill();
        }
    }

    /// Currently materialized range.
    pub fn window_range(&self) -> WindowRange {
        self.window.range()
    }

    /// Index of the first materialized item.
    pub fn top_index(&self) -> usize {
        self.window.top()
    }

    /// Index of the last materialized item, `None` for an empty window.
    pub fn bottom_index(&self) -> Option<usize> {
        self.window.range().bottom_index()
    }

    /// Current spacer extents.
    pub fn spacer_sizes(&self) -> SpacerSizes {
        self.spacers
    }

    /// Average item extent used for spacer arithmetic.
    pub fn estimated_extent(&mut self) -> f64 {
        self.store.estimate()
    }

    /// Last measured extent of the item at `index`, if it was ever rendered.
    pub fn cached_extent(&self, index: usize) -> Option<f64> {
        self.store.sizes().get(index)
    }

    /// All items in order.
    pub fn items(&self) -> &[T] {
        self.store.items()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True if there are no items.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// True once items have been set at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tunables in effect.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Dispatch counters of the scroll reactor.
    pub fn stats(&self) -> ReactorStats {
        self.reactor.stats()
    }

    /// True while a controller-issued offset change awaits its notification.
    pub fn is_ignoring_next_scroll(&self) -> bool {
        self.reactor.is_ignoring_next()
    }

    /// The display layer.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the display layer, e.g. to move the scroll offset.
    ///
    /// Mounting or removing nodes behind the controller's back leaves its
    /// window state stale.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<T, S> std::fmt::Debug for WindowController<T, S>
where
    S: Surface,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowController")
            .field("len", &self.store.len())
            .field("window", &self.window.range())
            .field("spacers", &self.spacers)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
