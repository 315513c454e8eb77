// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement pass: invisible probes and the deferred write queue.

use alloc::vec::Vec;

use kurbo::Size;
use log::{debug, trace};

use crate::{ContentGenerator, Generation, WidthCache};

/// An invisible instance of an item, emitted so the host can measure it.
///
/// Hosts render probes without making them perceivable (zero opacity, or off
/// screen), read back the intrinsic size of `content`, and report it with
/// [`FlowCollection::record_measurement`](crate::FlowCollection::record_measurement)
/// along with the probe's `generation`.
#[derive(Clone, Debug, PartialEq)]
pub struct Probe<C> {
    /// Index of the probed item.
    pub index: usize,
    /// Generation the probe was emitted in.
    pub generation: Generation,
    /// The generated content to measure.
    pub content: C,
}

/// The hidden layer of a [`FlowFrame`](crate::FlowFrame).
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureLayer<C> {
    /// Generation the probes belong to.
    pub generation: Generation,
    /// Items awaiting measurement, in index order.
    pub probes: Vec<Probe<C>>,
}

impl<C> MeasureLayer<C> {
    pub(crate) const fn empty(generation: Generation) -> Self {
        Self {
            generation,
            probes: Vec::new(),
        }
    }

    /// Returns `true` if there is nothing to measure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

/// Emit probes for every item the cache cannot vouch for.
///
/// With `measure_all` set (a wipe is queued) every index is probed; otherwise
/// only indices missing from the cache are.
pub(crate) fn probe_layer<C, G>(
    generator: &mut G,
    cache: &WidthCache,
    element_count: usize,
    generation: Generation,
    measure_all: bool,
) -> MeasureLayer<C>
where
    G: ContentGenerator<C> + ?Sized,
{
    let probes = (0..element_count)
        .filter(|&index| measure_all || !cache.contains(index))
        .map(|index| Probe {
            index,
            generation,
            content: generator.generate(index),
        })
        .collect();
    MeasureLayer { generation, probes }
}

/// Summary of one [`FlowCollection::apply_pending`](crate::FlowCollection::apply_pending) call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Measurements written into the width cache.
    pub written: usize,
    /// Measurements dropped because they belonged to an older generation or
    /// to an index that no longer exists.
    pub discarded: usize,
    /// Whether the width cache was wiped.
    pub cleared: bool,
}

impl Applied {
    /// Returns `true` if applying changed nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.written == 0 && !self.cleared
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Deferred {
    Clear(Generation),
    Write {
        generation: Generation,
        index: usize,
        size: Size,
    },
}

/// Width-cache mutations waiting for the host to apply them between passes.
#[derive(Clone, Debug, Default)]
pub(crate) struct PendingQueue {
    ops: Vec<Deferred>,
}

impl PendingQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn has_clear(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, Deferred::Clear(_)))
    }

    pub(crate) fn push_clear(&mut self, generation: Generation) {
        self.ops.push(Deferred::Clear(generation));
    }

    pub(crate) fn push_write(&mut self, generation: Generation, index: usize, size: Size) {
        self.ops.push(Deferred::Write {
            generation,
            index,
            size,
        });
    }

    /// Drain the queue into `cache`, in the order operations were queued.
    pub(crate) fn apply(
        &mut self,
        cache: &mut WidthCache,
        current: Generation,
        element_count: usize,
    ) -> Applied {
        let mut applied = Applied::default();
        for op in self.ops.drain(..) {
            match op {
                Deferred::Clear(generation) => {
                    debug!(
                        "wiping {} cached measurements for generation {}",
                        cache.len(),
                        generation.get()
                    );
                    cache.clear();
                    applied.cleared = true;
                }
                Deferred::Write {
                    generation,
                    index,
                    size,
                } => {
                    if generation != current || index >= element_count {
                        trace!(
                            "discarding measurement of item {index} from generation {} (current {}, count {element_count})",
                            generation.get(),
                            current.get()
                        );
                        applied.discarded += 1;
                        continue;
                    }
                    trace!("item {index} measured at {}x{}", size.width, size.height);
                    cache.insert(index, size);
                    applied.written += 1;
                }
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::{Applied, PendingQueue, probe_layer};
    use crate::{Generation, WidthCache};

    #[test]
    fn probes_only_missing_items() {
        let mut cache = WidthCache::new();
        cache.insert(1, Size::new(5.0, 5.0));
        let mut generator = |index: usize| index * 10;

        let layer = probe_layer(&mut generator, &cache, 3, Generation::FIRST, false);
        let probed: Vec<_> = layer.probes.iter().map(|p| (p.index, p.content)).collect();
        assert_eq!(probed, [(0, 0), (2, 20)]);

        let layer = probe_layer(&mut generator, &cache, 3, Generation::FIRST, true);
        assert_eq!(layer.probes.len(), 3);
    }

    #[test]
    fn writes_apply_in_any_order() {
        let mut cache = WidthCache::new();
        let mut queue = PendingQueue::default();
        let generation = Generation::FIRST;
        queue.push_write(generation, 2, Size::new(30.0, 10.0));
        queue.push_write(generation, 0, Size::new(10.0, 10.0));
        queue.push_write(generation, 1, Size::new(20.0, 10.0));

        let applied = queue.apply(&mut cache, generation, 3);
        assert_eq!(
            applied,
            Applied {
                written: 3,
                discarded: 0,
                cleared: false,
            }
        );
        assert!(queue.is_empty());
        assert!(cache.is_complete(3));
        assert_eq!(cache.width_of(2), Some(30.0));
    }

    #[test]
    fn stale_and_out_of_range_writes_are_discarded() {
        let mut cache = WidthCache::new();
        let mut queue = PendingQueue::default();
        let old = Generation::FIRST;
        let current = old.next();
        queue.push_write(old, 0, Size::new(10.0, 10.0));
        queue.push_write(current, 5, Size::new(10.0, 10.0));
        queue.push_write(current, 1, Size::new(10.0, 10.0));

        let applied = queue.apply(&mut cache, current, 2);
        assert_eq!(applied.written, 1);
        assert_eq!(applied.discarded, 2);
        assert!(cache.contains(1));
        assert!(!cache.contains(0));
    }

    #[test]
    fn clear_runs_before_later_writes() {
        let mut cache = WidthCache::new();
        cache.insert(0, Size::new(99.0, 99.0));
        let mut queue = PendingQueue::default();
        let generation = Generation::FIRST.next();
        queue.push_clear(generation);
        queue.push_write(generation, 1, Size::new(10.0, 10.0));
        assert!(queue.has_clear());

        let applied = queue.apply(&mut cache, generation, 2);
        assert!(applied.cleared);
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains(0));
        assert!(!queue.has_clear());
    }
}
