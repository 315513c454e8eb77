// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render pass: places generated content according to wrapped lanes.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::{ContentGenerator, FlowConfig, Lanes, WidthCache};

/// A visible item with its position in container coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem<C> {
    /// Index of the item.
    pub index: usize,
    /// Bounds of the item's content, excluding the trailing item spacing.
    pub rect: Rect,
    /// The generated content.
    pub content: C,
}

/// One placed lane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLane<C> {
    /// Bounds of the lane including its vertical padding. Lanes span the full
    /// container width.
    pub rect: Rect,
    /// Items in left-to-right order.
    pub items: Vec<PlacedItem<C>>,
}

/// The visible layer of a [`FlowFrame`](crate::FlowFrame).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLayer<C> {
    /// Lanes in top-to-bottom order.
    pub lanes: Vec<PlacedLane<C>>,
    /// Size of the container.
    pub size: Size,
}

impl<C> LayoutLayer<C> {
    pub(crate) const fn empty() -> Self {
        Self {
            lanes: Vec::new(),
            size: Size::ZERO,
        }
    }

    /// Returns `true` if nothing is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Iterates over every placed item in lane order.
    pub fn items(&self) -> impl Iterator<Item = &PlacedItem<C>> + '_ {
        self.lanes.iter().flat_map(|lane| lane.items.iter())
    }
}

/// Place every item of `lanes`, generating its content a second time.
///
/// Lanes stack top to bottom with `lane_padding` above and below each. A
/// lane is as tall as its tallest item; shorter items are centered vertically.
/// Within a lane, items run left to right with `item_spacing` after each one.
///
/// Every index in `lanes` must be present in `cache`.
pub(crate) fn arrange<C, G>(
    lanes: &Lanes,
    cache: &WidthCache,
    config: &FlowConfig,
    generator: &mut G,
) -> LayoutLayer<C>
where
    G: ContentGenerator<C> + ?Sized,
{
    if lanes.is_empty() {
        return LayoutLayer::empty();
    }

    let size_of = |index: usize| cache.size_of(index).unwrap_or(Size::ZERO);

    let mut widest: f64 = 0.0;
    for lane in lanes {
        let advance: f64 = lane
            .iter()
            .map(|&index| config.advance(size_of(index).width))
            .sum();
        widest = widest.max(advance);
    }
    let bound = if config.max_usable_width.is_finite() {
        config.max_usable_width.max(0.0)
    } else {
        0.0
    };
    let width = bound.max(widest);

    let mut placed = Vec::with_capacity(lanes.len());
    let mut y = 0.0;
    for lane in lanes {
        let height = lane
            .iter()
            .map(|&index| size_of(index).height)
            .fold(0.0, f64::max);
        let top = y + config.lane_gap();

        let mut x = 0.0;
        let mut items = Vec::with_capacity(lane.len());
        for &index in lane {
            let size = size_of(index);
            let item_top = top + (height - size.height) / 2.0;
            items.push(PlacedItem {
                index,
                rect: Rect::from_origin_size((x, item_top), size),
                content: generator.generate(index),
            });
            x += config.advance(size.width);
        }

        let bottom = top + height + config.lane_gap();
        placed.push(PlacedLane {
            rect: Rect::new(0.0, y, width, bottom),
            items,
        });
        y = bottom;
    }

    LayoutLayer {
        lanes: placed,
        size: Size::new(width, y),
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::arrange;
    use crate::{FlowConfig, WidthCache, wrap_lanes};

    fn cache_of(sizes: &[(f64, f64)]) -> WidthCache {
        let mut cache = WidthCache::new();
        for (index, &(width, height)) in sizes.iter().enumerate() {
            cache.insert(index, Size::new(width, height));
        }
        cache
    }

    #[test]
    fn lane_height_is_tallest_member() {
        let cache = cache_of(&[(40.0, 20.0), (40.0, 50.0), (40.0, 30.0)]);
        let config = FlowConfig::new(200.0);
        let lanes = wrap_lanes(3, config.max_usable_width, |i| {
            config.advance(cache.width_of(i).unwrap())
        });
        let layer = arrange(&lanes, &cache, &config, &mut |index: usize| index);

        assert_eq!(layer.lanes.len(), 1);
        let lane = &layer.lanes[0];
        assert_eq!(lane.rect, Rect::new(0.0, 0.0, 200.0, 60.0));

        // Spacing of 10 after every item; short items are centered.
        assert_eq!(lane.items[0].rect, Rect::new(0.0, 20.0, 40.0, 40.0));
        assert_eq!(lane.items[1].rect, Rect::new(50.0, 5.0, 90.0, 55.0));
        assert_eq!(lane.items[2].rect, Rect::new(100.0, 15.0, 140.0, 45.0));
        assert_eq!(layer.size, Size::new(200.0, 60.0));
    }

    #[test]
    fn lanes_stack_with_padding() {
        let cache = cache_of(&[(100.0, 10.0), (100.0, 20.0), (100.0, 10.0)]);
        let config = FlowConfig::new(250.0).with_item_spacing(0.0);
        let lanes = wrap_lanes(3, config.max_usable_width, |i| {
            config.advance(cache.width_of(i).unwrap())
        });
        let layer = arrange(&lanes, &cache, &config, &mut |index: usize| index);

        assert_eq!(layer.lanes.len(), 2);
        assert_eq!(layer.lanes[0].rect, Rect::new(0.0, 0.0, 250.0, 30.0));
        assert_eq!(layer.lanes[1].rect, Rect::new(0.0, 30.0, 250.0, 50.0));
        assert_eq!(layer.lanes[1].items[0].rect, Rect::new(0.0, 35.0, 100.0, 45.0));
        let order: alloc::vec::Vec<usize> = layer.items().map(|item| item.content).collect();
        assert_eq!(order, [0, 1, 2]);
    }

    #[test]
    fn oversized_item_widens_the_container() {
        let cache = cache_of(&[(500.0, 10.0)]);
        let config = FlowConfig::new(390.0).with_lane_padding(0.0);
        let lanes = wrap_lanes(1, config.max_usable_width, |i| {
            config.advance(cache.width_of(i).unwrap())
        });
        let layer = arrange(&lanes, &cache, &config, &mut |index: usize| index);
        assert_eq!(layer.size, Size::new(510.0, 10.0));
    }

    #[test]
    fn negative_paddings_do_not_overlap_items() {
        let cache = cache_of(&[(60.0, 10.0), (60.0, 10.0)]);
        let mut config = FlowConfig::new(100.0);
        config.item_spacing = -20.0;
        config.lane_padding = -5.0;
        let lanes = wrap_lanes(2, config.max_usable_width, |i| {
            config.advance(cache.width_of(i).unwrap())
        });
        let layer = arrange(&lanes, &cache, &config, &mut |index: usize| index);

        assert_eq!(layer.lanes.len(), 2);
        assert_eq!(layer.lanes[0].rect, Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(layer.lanes[1].items[0].rect, Rect::new(0.0, 10.0, 60.0, 20.0));
    }

    #[test]
    fn no_lanes_means_empty_layer() {
        let config = FlowConfig::new(100.0);
        let lanes = wrap_lanes(0, 100.0, |_| 0.0);
        let layer = arrange(&lanes, &WidthCache::new(), &config, &mut |index: usize| index);
        assert!(layer.is_empty());
        assert_eq!(layer.size, Size::ZERO);
    }
}
