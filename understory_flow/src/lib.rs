// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flow --heading-base-level=0

//! Understory Flow: a measure-then-arrange flow layout.
//!
//! This crate wraps a dynamically sized collection of variable-width items into
//! lanes, like words in a paragraph, growing vertically to fit while never
//! exceeding a maximum horizontal span. Items come from an opaque per-index
//! [`ContentGenerator`], and their sizes are only known once the host has
//! actually instantiated them, so layout happens in two phases:
//!
//! - **Measure**: the collection emits invisible [`Probe`]s for every item it
//!   has not measured. The host renders them without showing them, reads back
//!   their sizes, and reports them with [`FlowCollection::record_measurement`].
//! - **Arrange**: once the [`WidthCache`] holds a size for every index,
//!   [`wrap_lanes`] packs items greedily into [`Lanes`] and each item is
//!   generated again and placed with `kurbo` geometry.
//!
//! The core concepts are:
//!
//! - [`FlowCollection`]: the controller. It owns the [`FlowConfig`], the width
//!   cache, the [`InvalidationPolicy`], and a queue of deferred cache writes.
//! - [`FlowFrame`]: the output of one pass, with a hidden [`MeasureLayer`] and a
//!   visible [`LayoutLayer`] meant to be stacked in the same region.
//! - [`Generation`]: the validity window of the width cache. Any change of the
//!   element count starts a new generation and wipes every measurement.
//! - [`wrap_lanes`]: the pure line-wrapping function, usable on its own.
//!
//! This crate deliberately does **not** know about widgets, display trees, or
//! text shaping. Host frameworks are responsible for:
//!
//! - Running [`FlowCollection::pass`] whenever [`FlowCollection::needs_pass`]
//!   says so.
//! - Measuring probes and feeding their sizes back.
//! - Calling [`FlowCollection::apply_pending`] between passes. The width cache
//!   is never written during a pass, so a pass can always read it consistently.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_flow::{FlowCollection, FlowConfig, FlowLayers};
//!
//! let config = FlowConfig::new(250.0)
//!     .with_item_spacing(0.0)
//!     .with_lane_padding(0.0);
//! let mut flow = FlowCollection::new(config, 3);
//! let mut generate = |index: usize| index;
//!
//! // Nothing is measured yet, so the first pass only has probes.
//! let frame = flow.pass(&mut generate);
//! assert_eq!(frame.layers(), FlowLayers::MEASURE);
//!
//! // The host measures each probe; here every item is 100x20.
//! for probe in &frame.measure.probes {
//!     flow.record_measurement(probe.generation, probe.index, Size::new(100.0, 20.0));
//! }
//! flow.apply_pending();
//! assert!(flow.is_settled());
//!
//! // Two items fit in 250 units; the third wraps.
//! let frame = flow.pass(&mut generate);
//! assert_eq!(frame.layout.lanes.len(), 2);
//! assert_eq!(frame.size(), Size::new(250.0, 40.0));
//! ```
//!
//! Wrapping is strictly conservative: an item that would make a lane exactly as
//! wide as the maximum goes to the next lane. An item that is wider than the
//! maximum on its own still gets a lane of its own and is never clipped.
//!
//! All sizes live in a caller-chosen coordinate space (typically logical
//! pixels) and are expected to be finite and non-negative.
//!
//! ## Logging
//!
//! Generation changes, cache wipes, and settling are reported at `debug` level
//! through the [`log`] facade; individual measurements at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod config;
mod flow;
mod generator;
mod measure;
mod policy;
mod render;
mod wrap;

pub use cache::WidthCache;
pub use config::{DEFAULT_ITEM_SPACING, DEFAULT_LANE_PADDING, FlowConfig};
pub use flow::{FlowCollection, FlowFrame, FlowLayers, Invalidation};
pub use generator::{ContentGenerator, Memoized};
pub use measure::{Applied, MeasureLayer, Probe};
pub use policy::{Generation, InvalidationPolicy, Phase};
pub use render::{LayoutLayer, PlacedItem, PlacedLane};
pub use wrap::{Lane, Lanes, wrap_lanes};
