// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flow collection controller and the frames it produces.

use kurbo::Size;
use log::debug;

use crate::measure::{self, PendingQueue};
use crate::policy::{InvalidationPolicy, Phase};
use crate::render::{self, LayoutLayer};
use crate::{
    Applied, ContentGenerator, FlowConfig, Generation, Lanes, MeasureLayer, WidthCache, wrap_lanes,
};

bitflags::bitflags! {
    /// Reasons a flow collection needs another pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// The element count changed.
        const COUNT        = 0b0000_0001;
        /// The maximum usable width changed.
        const WIDTH        = 0b0000_0010;
        /// Content was replaced without a count change.
        const CONTENT      = 0b0000_0100;
        /// Measurements were recorded or applied to the width cache.
        const MEASUREMENTS = 0b0000_1000;
    }
}

bitflags::bitflags! {
    /// Which layers of a [`FlowFrame`] carry content.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FlowLayers: u8 {
        /// The hidden measurement layer has probes.
        const MEASURE = 0b0000_0001;
        /// The visible layout layer has placed lanes.
        const LAYOUT  = 0b0000_0010;
    }
}

/// Output of one [`FlowCollection::pass`]: two overlapping layers.
///
/// Hosts should stack both layers in the same region. The measurement layer
/// must be rendered invisibly; it is non-empty only while sizes are still being
/// discovered. The layout layer is non-empty only once every item is measured.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowFrame<C> {
    /// Hidden probes awaiting measurement.
    pub measure: MeasureLayer<C>,
    /// Visible, placed lanes.
    pub layout: LayoutLayer<C>,
}

impl<C> FlowFrame<C> {
    /// Which layers carry content.
    #[must_use]
    pub fn layers(&self) -> FlowLayers {
        let mut layers = FlowLayers::empty();
        if !self.measure.is_empty() {
            layers |= FlowLayers::MEASURE;
        }
        if !self.layout.is_empty() {
            layers |= FlowLayers::LAYOUT;
        }
        layers
    }

    /// Size of the visible layer.
    #[must_use]
    pub fn size(&self) -> Size {
        self.layout.size
    }
}

/// A container that wraps a dynamically sized collection of items into lanes.
///
/// Item sizes are not known up front. The collection discovers them by
/// emitting invisible probes, waits for the host to report their measured
/// sizes, and only then wraps and places the items:
///
/// 1. The host calls [`pass`](Self::pass) whenever [`needs_pass`](Self::needs_pass)
///    is `true` (and whenever it wants a fresh frame).
/// 2. For every [`Probe`](crate::Probe) in the frame's measurement layer, the
///    host measures the content and calls
///    [`record_measurement`](Self::record_measurement).
/// 3. Between passes, the host calls [`apply_pending`](Self::apply_pending).
///    This is the only point at which the width cache changes.
///
/// Once every item is measured the collection is [settled](Self::is_settled)
/// and each pass produces the placed layout layer.
///
/// Any change to the element count starts a new [`Generation`]: the whole
/// cache is wiped (deferred to the next `apply_pending`) and everything is
/// measured again. Changing the maximum width only re-wraps.
#[derive(Debug)]
pub struct FlowCollection {
    config: FlowConfig,
    element_count: usize,
    cache: WidthCache,
    policy: InvalidationPolicy,
    pending: PendingQueue,
    dirty: Invalidation,
}

impl FlowCollection {
    /// Creates a collection of `element_count` items laid out with `config`.
    #[must_use]
    pub fn new(config: FlowConfig, element_count: usize) -> Self {
        Self {
            config,
            element_count,
            cache: WidthCache::new(),
            policy: InvalidationPolicy::new(),
            pending: PendingQueue::default(),
            dirty: Invalidation::COUNT,
        }
    }

    /// The layout parameters.
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Number of items in the collection.
    #[must_use]
    pub const fn element_count(&self) -> usize {
        self.element_count
    }

    /// Sets the number of items.
    ///
    /// The next pass starts a new generation if the count differs from the one
    /// the previous pass saw.
    pub fn set_element_count(&mut self, element_count: usize) {
        if element_count != self.element_count {
            self.element_count = element_count;
            self.dirty |= Invalidation::COUNT;
        }
    }

    /// The maximum horizontal span of a lane.
    #[must_use]
    pub const fn max_usable_width(&self) -> f64 {
        self.config.max_usable_width
    }

    /// Sets the maximum horizontal span of a lane. Measurements are kept.
    pub fn set_max_usable_width(&mut self, max_usable_width: f64) {
        if max_usable_width != self.config.max_usable_width {
            self.config.max_usable_width = max_usable_width;
            self.dirty |= Invalidation::WIDTH;
        }
    }

    /// The measured sizes of the current generation.
    #[must_use]
    pub const fn width_cache(&self) -> &WidthCache {
        &self.cache
    }

    /// The current generation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.policy.generation()
    }

    /// Reasons the collection needs another pass, if any.
    #[must_use]
    pub const fn invalidation(&self) -> Invalidation {
        self.dirty
    }

    /// Returns `true` if the host should run another pass.
    ///
    /// Recording a measurement sets this, so a host driven by it comes back,
    /// calls [`apply_pending`](Self::apply_pending), and runs the next pass.
    #[must_use]
    pub const fn needs_pass(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns `true` if recorded work awaits [`apply_pending`](Self::apply_pending).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns `true` if every item of the current generation is measured.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.policy.observed_count() == Some(self.element_count)
            && !self.pending.has_clear()
            && self.cache.is_complete(self.element_count)
    }

    /// Drops every measurement and starts a new generation.
    ///
    /// Use this when content at existing indices changes without the count
    /// changing; the collection cannot detect that on its own. The wipe is
    /// deferred to the next [`apply_pending`](Self::apply_pending).
    pub fn invalidate_measurements(&mut self) {
        let generation = self.policy.bump_generation();
        debug!("measurements invalidated, starting generation {}", generation.get());
        self.pending.push_clear(generation);
        self.dirty |= Invalidation::CONTENT;
    }

    /// Produce a frame.
    ///
    /// While the collection is not settled the frame only carries probes. Once
    /// settled, it only carries the placed lanes. This never modifies the width
    /// cache; a wipe discovered here is queued for
    /// [`apply_pending`](Self::apply_pending).
    pub fn pass<C, G>(&mut self, generator: &mut G) -> FlowFrame<C>
    where
        G: ContentGenerator<C> + ?Sized,
    {
        let reset_pending = self.pending.has_clear();
        let phase = self
            .policy
            .evaluate(self.element_count, &self.cache, reset_pending);
        let generation = self.policy.generation();
        generator.begin_generation(generation);
        self.dirty = Invalidation::empty();

        match phase {
            Phase::Measure { reset } => {
                if reset {
                    debug!(
                        "element count now {}, starting generation {}",
                        self.element_count,
                        generation.get()
                    );
                    self.pending.push_clear(generation);
                }
                FlowFrame {
                    measure: measure::probe_layer(
                        generator,
                        &self.cache,
                        self.element_count,
                        generation,
                        reset || reset_pending,
                    ),
                    layout: LayoutLayer::empty(),
                }
            }
            Phase::Arrange => {
                let lanes = self.wrap();
                FlowFrame {
                    measure: MeasureLayer::empty(generation),
                    layout: render::arrange(&lanes, &self.cache, &self.config, generator),
                }
            }
        }
    }

    /// Queue the measured size of a probe.
    ///
    /// `generation` must be the generation of the probe the size was measured
    /// from; results for older generations or indices no longer in range are
    /// dropped by [`apply_pending`](Self::apply_pending). Measurements may be
    /// recorded in any order.
    ///
    /// Marks the collection as needing a pass.
    pub fn record_measurement(&mut self, generation: Generation, index: usize, size: Size) {
        self.pending.push_write(generation, index, size);
        self.dirty |= Invalidation::MEASUREMENTS;
    }

    /// Apply queued wipes and measurements to the width cache.
    ///
    /// Call this between passes, never from inside code that is consuming a
    /// frame. Marks the collection as needing a pass if anything changed.
    pub fn apply_pending(&mut self) -> Applied {
        let was_settled = self.is_settled();
        let applied = self
            .pending
            .apply(&mut self.cache, self.policy.generation(), self.element_count);
        if !applied.is_empty() {
            self.dirty |= Invalidation::MEASUREMENTS;
        }
        if !was_settled && self.is_settled() {
            debug!(
                "settled {} items in generation {}",
                self.element_count,
                self.policy.generation().get()
            );
        }
        applied
    }

    /// The current lane structure, if settled.
    #[must_use]
    pub fn lanes(&self) -> Option<Lanes> {
        self.is_settled().then(|| self.wrap())
    }

    fn wrap(&self) -> Lanes {
        let cache = &self.cache;
        let config = &self.config;
        wrap_lanes(self.element_count, config.max_usable_width, |index| {
            config.advance(cache.width_of(index).unwrap_or(0.0))
        })
    }
}
