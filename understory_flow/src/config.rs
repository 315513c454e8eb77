// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout parameters for a flow collection.

/// Trailing horizontal padding applied after every item, in logical pixels.
pub const DEFAULT_ITEM_SPACING: f64 = 10.0;

/// Vertical padding applied above and below every lane, in logical pixels.
pub const DEFAULT_LANE_PADDING: f64 = 5.0;

/// Layout parameters for a [`FlowCollection`](crate::FlowCollection).
///
/// All values live in the host's logical coordinate space. There is no
/// sensible default for the maximum width; hosts without a tighter bound
/// should pass their display width.
///
/// ```rust
/// use understory_flow::FlowConfig;
///
/// let config = FlowConfig::new(390.0).with_item_spacing(4.0);
/// assert_eq!(config.max_usable_width, 390.0);
/// assert_eq!(config.advance(20.0), 24.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowConfig {
    /// The maximum horizontal span a lane may occupy.
    ///
    /// Zero or negative values place every item on its own lane.
    pub max_usable_width: f64,
    /// Trailing padding after each item, including the last one in a lane.
    ///
    /// Negative values are treated as zero.
    pub item_spacing: f64,
    /// Padding above and below each lane.
    ///
    /// Negative values are treated as zero.
    pub lane_padding: f64,
}

impl FlowConfig {
    /// Creates a config bounded by `max_usable_width` with default paddings.
    #[must_use]
    pub const fn new(max_usable_width: f64) -> Self {
        Self {
            max_usable_width,
            item_spacing: DEFAULT_ITEM_SPACING,
            lane_padding: DEFAULT_LANE_PADDING,
        }
    }

    /// Replaces the maximum usable width.
    #[must_use]
    pub const fn with_max_usable_width(mut self, max_usable_width: f64) -> Self {
        self.max_usable_width = max_usable_width;
        self
    }

    /// Replaces the trailing item spacing. Negative values are treated as zero.
    #[must_use]
    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.item_spacing = item_spacing.max(0.0);
        self
    }

    /// Replaces the per-lane vertical padding. Negative values are treated as zero.
    #[must_use]
    pub fn with_lane_padding(mut self, lane_padding: f64) -> Self {
        self.lane_padding = lane_padding.max(0.0);
        self
    }

    /// Horizontal space consumed by an item of the given measured `width`.
    #[must_use]
    pub fn advance(&self, width: f64) -> f64 {
        width + self.item_spacing.max(0.0)
    }

    /// Vertical padding applied above and below each lane.
    #[must_use]
    pub fn lane_gap(&self) -> f64 {
        self.lane_padding.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ITEM_SPACING, DEFAULT_LANE_PADDING, FlowConfig};

    #[test]
    fn new_applies_default_paddings() {
        let config = FlowConfig::new(390.0);
        assert_eq!(config.item_spacing, DEFAULT_ITEM_SPACING);
        assert_eq!(config.lane_padding, DEFAULT_LANE_PADDING);
        assert_eq!(config.advance(50.0), 60.0);
    }

    #[test]
    fn negative_paddings_are_clamped() {
        let config = FlowConfig::new(100.0)
            .with_item_spacing(-3.0)
            .with_lane_padding(-1.0);
        assert_eq!(config.item_spacing, 0.0);
        assert_eq!(config.lane_padding, 0.0);
    }

    #[test]
    fn negative_fields_set_directly_read_as_zero() {
        let mut config = FlowConfig::new(100.0);
        config.item_spacing = -4.0;
        config.lane_padding = -2.0;
        assert_eq!(config.advance(30.0), 30.0);
        assert_eq!(config.lane_gap(), 0.0);
    }
}
