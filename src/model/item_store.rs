//! Item store - the ordered items plus their measured extents.
//!
//! Items are opaque and identified only by position. Extents are learned
//! lazily: an entry appears in the [`SizeCache`] the first time the item is
//! rendered and survives un-rendering, so it keeps informing the average-size
//! estimate used for spacer arithmetic.

use indexmap::IndexMap;
use std::ops::Index;

/// Extent reported by [`SizeCache::estimate`] before anything was measured.
pub const SENTINEL_EXTENT: f64 = 1.0;

/// Default number of cache entries sampled by the estimate.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Sparse map from item index to last-measured extent.
///
/// Iteration follows insertion order: re-measuring an index updates its value
/// in place without moving it. The average estimate samples the first
/// `sample_size` entries only and is memoized once that many are available.
/// The memo survives appends and prepends and is dropped by [`clear`](Self::clear).
#[derive(Debug, Clone)]
pub struct SizeCache {
    extents: IndexMap<usize, f64>,
    memo: Option<f64>,
    sample_size: usize,
}

impl SizeCache {
    /// Creates an empty cache sampling at most `sample_size` entries.
    ///
    /// A sample size of zero is treated as one.
    pub fn new(sample_size: usize) -> Self {
        Self {
            extents: IndexMap::new(),
            memo: None,
            sample_size: sample_size.max(1),
        }
    }

    /// Records the measured extent of the item at `index`.
    pub fn record(&mut self, index: usize, extent: f64) {
        self.extents.insert(index, extent);
    }

    /// Last measured extent of the item at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.extents.get(&index).copied()
    }

    /// Number of measured items.
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// True if nothing has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// True once the estimate is frozen.
    pub fn is_memoized(&self) -> bool {
        self.memo.is_some()
    }

    /// Average item extent.
    ///
    /// Returns [`SENTINEL_EXTENT`] while the cache is empty so spacer
    /// arithmetic stays well-defined before the first paint.
    ///
    /// # Examples
    ///
    /// ```
    /// # use virtlist::model::item_store::SizeCache;
    /// let mut cache = SizeCache::new(100);
    /// assert_eq!(cache.estimate(), 1.0);
    /// cache.record(0, 40.0);
    /// cache.record(1, 60.0);
    /// assert_eq!(cache.estimate(), 50.0);
    /// ```
    pub fn estimate(&mut self) -> f64 {
        if let Some(memo) = self.memo {
            return memo;
        }

        // Bounded scan over the first `sample_size` measurements.
        let sampled = self.extents.values().take(self.sample_size);
        let (count, sum) = sampled.fold((0usize, 0.0), |(count, sum), extent| {
            (count + 1, sum + extent)
        });

        if count == 0 {
            return SENTINEL_EXTENT;
        }

        let average = sum / count as f64;
        if count == self.sample_size {
            self.memo = Some(average);
        }
        average
    }

    /// Moves every entry `count` indices later, keeping insertion order.
    pub fn shift(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.extents = self
            .extents
            .drain(..)
            .map(|(index, extent)| (index + count, extent))
            .collect();
    }

    /// Forgets every measurement and the memoized estimate.
    pub fn clear(&mut self) {
        self.extents.clear();
        self.memo = None;
    }
}

impl Default for SizeCache {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

/// The ordered item sequence and its size cache.
#[derive(Debug, Clone)]
pub struct ItemStore<T> {
    items: Vec<T>,
    sizes: SizeCache,
}

impl<T> ItemStore<T> {
    /// Creates an empty store whose estimate samples `sample_size` entries.
    pub fn new(sample_size: usize) -> Self {
        Self {
            items: Vec::new(),
            sizes: SizeCache::new(sample_size),
        }
    }

    /// Replaces every item, dropping all measurements.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.sizes.clear();
    }

    /// Adds items to the end. Existing measurements stay valid.
    pub fn append(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let before = self.items.len();
        self.items.extend(items);
        self.items.len() - before
    }

    /// Adds items to the front, re-keying measurements so they stay attached
    /// to the items they were taken from.
    pub fn prepend(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let mut front: Vec<T> = items.into_iter().collect();
        let count = front.len();
        if count > 0 {
            front.append(&mut self.items);
            self.items = front;
            self.sizes.shift(count);
        }
        count
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All items in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Measurement history.
    pub fn sizes(&self) -> &SizeCache {
        &self.sizes
    }

    /// Drops every measurement, keeping the items.
    pub fn clear_sizes(&mut self) {
        self.sizes.clear();
    }

    /// Records a fresh measurement.
    pub fn record_extent(&mut self, index: usize, extent: f64) {
        self.sizes.record(index, extent);
    }

    /// Current average-extent estimate.
    pub fn estimate(&mut self) -> f64 {
        self.sizes.estimate()
    }
}

impl<T> Index<usize> for ItemStore<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}
