// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured item sizes keyed by index.

use hashbrown::HashMap;
use kurbo::Size;

/// Measured sizes for the items of the current generation, keyed by index.
///
/// Widths drive lane wrapping; heights are kept alongside so lanes can be
/// sized to their tallest member. Sizes exclude the item spacing that the
/// flow layout inserts after each item.
///
/// The cache is only written through
/// [`FlowCollection::apply_pending`](crate::FlowCollection::apply_pending), so
/// hosts can read it freely but never observe a write in the middle of a pass.
/// It is considered trustworthy for layout only once [`WidthCache::is_complete`]
/// holds for the current element count.
#[derive(Clone, Debug, Default)]
pub struct WidthCache {
    sizes: HashMap<usize, Size>,
}

impl WidthCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
        }
    }

    /// Number of measured items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if nothing has been measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Returns `true` if the cache holds one entry per index in `0..element_count`.
    ///
    /// Entries are only ever accepted for in-range indices of the current
    /// generation, so comparing lengths is sufficient.
    #[must_use]
    pub fn is_complete(&self, element_count: usize) -> bool {
        self.sizes.len() == element_count
    }

    /// Returns `true` if `index` has been measured.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.sizes.contains_key(&index)
    }

    /// Measured width of `index`, if known.
    #[must_use]
    pub fn width_of(&self, index: usize) -> Option<f64> {
        self.sizes.get(&index).map(|size| size.width)
    }

    /// Measured size of `index`, if known.
    #[must_use]
    pub fn size_of(&self, index: usize) -> Option<Size> {
        self.sizes.get(&index).copied()
    }

    /// Indices in `0..element_count` that have not been measured yet, in order.
    pub fn missing(&self, element_count: usize) -> impl Iterator<Item = usize> + '_ {
        (0..element_count).filter(|index| !self.sizes.contains_key(index))
    }

    pub(crate) fn insert(&mut self, index: usize, size: Size) -> Option<Size> {
        let size = Size::new(sanitize_extent(size.width), sanitize_extent(size.height));
        self.sizes.insert(index, size)
    }

    pub(crate) fn clear(&mut self) {
        self.sizes.clear();
    }
}

/// Clamp a measured extent into a usable, non-negative value.
fn sanitize_extent(extent: f64) -> f64 {
    // Extents are expected to be finite. Catch NaNs (and infinities) in
    // debug builds so misuse does not go unnoticed.
    debug_assert!(
        extent.is_finite(),
        "WidthCache extents must be finite; got {extent:?}"
    );
    if !extent.is_finite() || extent.is_sign_negative() {
        0.0
    } else {
        extent
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::WidthCache;

    #[test]
    fn completeness_tracks_element_count() {
        let mut cache = WidthCache::new();
        assert!(cache.is_complete(0));
        assert!(!cache.is_complete(2));

        cache.insert(1, Size::new(30.0, 10.0));
        assert!(!cache.is_complete(2));
        assert_eq!(cache.missing(2).collect::<Vec<_>>(), [0]);

        cache.insert(0, Size::new(20.0, 12.0));
        assert!(cache.is_complete(2));
        assert_eq!(cache.width_of(0), Some(20.0));
        assert_eq!(cache.size_of(1), Some(Size::new(30.0, 10.0)));
        assert_eq!(cache.width_of(2), None);
    }

    #[test]
    fn remeasuring_replaces_the_entry() {
        let mut cache = WidthCache::new();
        cache.insert(0, Size::new(20.0, 10.0));
        let previous = cache.insert(0, Size::new(25.0, 10.0));
        assert_eq!(previous, Some(Size::new(20.0, 10.0)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.width_of(0), Some(25.0));
    }

    #[test]
    fn negative_extents_are_clamped_to_zero() {
        let mut cache = WidthCache::new();
        cache.insert(0, Size::new(-5.0, -1.0));
        assert_eq!(cache.size_of(0), Some(Size::ZERO));
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = WidthCache::new();
        cache.insert(0, Size::new(1.0, 1.0));
        cache.clear();
        assert!(cache.is_empty());
    }
}
