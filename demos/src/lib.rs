// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the `understory_flow` demo screens.
//!
//! [`Host`] stands in for a UI toolkit's render loop: it runs passes, measures
//! probes with a caller-provided metric, delivers the results in shuffled
//! batches to mimic asynchronous layout callbacks, and applies them between
//! passes until the collection settles.
//!
//! Run the screens with:
//! - `cargo run -p understory_flow_demos --example text_grid`
//! - `cargo run -p understory_flow_demos --example circles`
//! - `cargo run -p understory_flow_demos --example chips`

use std::fmt::Write as _;

use kurbo::Size;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use understory_flow::{ContentGenerator, FlowCollection, FlowFrame};

/// Fixed-advance stand-in for platform text measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance of every character.
    pub char_width: f64,
    /// Height of a single line.
    pub line_height: f64,
}

impl TextMetrics {
    /// Body text.
    pub const BODY: Self = Self {
        char_width: 8.0,
        line_height: 17.0,
    };
    /// Footnote text.
    pub const FOOTNOTE: Self = Self {
        char_width: 6.5,
        line_height: 13.0,
    };

    /// Size of `text` laid out on one line.
    #[must_use]
    pub fn measure(&self, text: &str) -> Size {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Character counts of demo labels are tiny"
        )]
        let chars = text.chars().count() as f64;
        Size::new(chars * self.char_width, self.line_height)
    }
}

/// A simulated render loop driving a [`FlowCollection`] to a settled frame.
#[derive(Debug)]
pub struct Host {
    batch: usize,
    rng: StdRng,
    passes: usize,
}

impl Host {
    /// Creates a host that delivers at most `batch` measurements per pass.
    ///
    /// `seed` fixes the delivery order so runs are reproducible.
    #[must_use]
    pub fn new(batch: usize, seed: u64) -> Self {
        Self {
            batch: batch.max(1),
            rng: StdRng::seed_from_u64(seed),
            passes: 0,
        }
    }

    /// Total number of passes run so far.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Run passes until `flow` produces a frame with nothing left to measure.
    ///
    /// `measure` plays the role of the toolkit reading back the size of a
    /// hidden probe.
    pub fn settle<C, G, M>(
        &mut self,
        flow: &mut FlowCollection,
        generator: &mut G,
        mut measure: M,
    ) -> FlowFrame<C>
    where
        G: ContentGenerator<C>,
        M: FnMut(&C) -> Size,
    {
        loop {
            let frame = flow.pass(generator);
            self.passes += 1;
            if frame.measure.is_empty() && !flow.has_pending() {
                info!(
                    "settled {} items after {} passes",
                    flow.element_count(),
                    self.passes
                );
                return frame;
            }

            let mut probes: Vec<_> = frame.measure.probes.iter().collect();
            probes.shuffle(&mut self.rng);
            for probe in probes.into_iter().take(self.batch) {
                flow.record_measurement(probe.generation, probe.index, measure(&probe.content));
            }
            flow.apply_pending();
        }
    }
}

/// Render a settled frame as text, one line per lane.
///
/// Items are drawn as `[label]` at their horizontal position, scaled by
/// `units_per_column`.
pub fn sketch<C>(
    frame: &FlowFrame<C>,
    units_per_column: f64,
    label: impl Fn(&C) -> String,
) -> String {
    let mut out = String::new();
    for lane in &frame.layout.lanes {
        let mut line = String::new();
        for item in &lane.items {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "Columns are small, non-negative, and rounded on purpose"
            )]
            let column = (item.rect.x0 / units_per_column).round() as usize;
            while line.chars().count() < column {
                line.push(' ');
            }
            let _ = write!(line, "[{}]", label(&item.content));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "({} lanes, {:.0}x{:.0})",
        frame.layout.lanes.len(),
        frame.size().width,
        frame.size().height
    );
    out
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use understory_flow::{FlowCollection, FlowConfig, FlowLayers};

    use super::{Host, TextMetrics, sketch};

    #[test]
    fn text_metrics_scale_with_length() {
        assert_eq!(TextMetrics::BODY.measure("abcd"), Size::new(32.0, 17.0));
        assert_eq!(TextMetrics::BODY.measure(""), Size::new(0.0, 17.0));
    }

    #[test]
    fn host_settles_one_measurement_at_a_time() {
        let config = FlowConfig::new(100.0).with_item_spacing(0.0).with_lane_padding(0.0);
        let mut flow = FlowCollection::new(config, 5);
        let mut host = Host::new(1, 3);
        let mut generate = |index: usize| index;

        let frame = host.settle(&mut flow, &mut generate, |_| Size::new(40.0, 10.0));
        assert_eq!(frame.layers(), FlowLayers::LAYOUT);
        // One pass per measurement, then the arranging pass.
        assert_eq!(host.passes(), 6);
        assert_eq!(frame.layout.lanes.len(), 3);
    }

    #[test]
    fn host_resettles_after_count_change() {
        let config = FlowConfig::new(100.0).with_item_spacing(0.0).with_lane_padding(0.0);
        let mut flow = FlowCollection::new(config, 2);
        let mut host = Host::new(8, 3);
        let mut generate = |index: usize| index;
        let _ = host.settle(&mut flow, &mut generate, |_| Size::new(40.0, 10.0));

        flow.set_element_count(3);
        let frame = host.settle(&mut flow, &mut generate, |_| Size::new(40.0, 10.0));
        assert_eq!(flow.generation().get(), 1);
        assert_eq!(frame.layout.items().count(), 3);
    }

    #[test]
    fn sketch_places_labels_by_column() {
        let config = FlowConfig::new(100.0).with_item_spacing(0.0).with_lane_padding(0.0);
        let mut flow = FlowCollection::new(config, 3);
        let mut host = Host::new(8, 1);
        let mut generate = |index: usize| index;
        let frame = host.settle(&mut flow, &mut generate, |_| Size::new(40.0, 10.0));

        let text = sketch(&frame, 10.0, |index| index.to_string());
        assert_eq!(text, "[0] [1]\n[2]\n(2 lanes, 100x20)\n");
    }
}
