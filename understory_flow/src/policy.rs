// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generation tracking: decides whether a pass measures or arranges.

use crate::WidthCache;

/// Tag for one validity window of the width cache.
///
/// A new generation starts whenever the element count changes or the host
/// explicitly invalidates measurements. Probes and recorded measurements carry
/// the generation they were produced in so late results can be recognized and
/// dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The generation a fresh collection starts in.
    pub const FIRST: Self = Self(0);

    /// Raw generation counter.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What a pass should produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The cache cannot be trusted; emit probes.
    ///
    /// `reset` is `true` when this evaluation started a new generation and the
    /// cache must be wiped before any of its entries are reused.
    Measure {
        /// Whether this evaluation started a new generation.
        reset: bool,
    },
    /// The cache is complete for the current generation; wrap and place items.
    Arrange,
}

/// Compares the width cache against the element count on every pass.
///
/// The policy never touches the cache itself. When it detects a new
/// generation it reports [`Phase::Measure`] with `reset: true`, and the caller
/// is responsible for deferring the wipe until the pass is over.
#[derive(Clone, Debug, Default)]
pub struct InvalidationPolicy {
    observed_count: Option<usize>,
    generation: Generation,
}

impl InvalidationPolicy {
    /// Creates a policy that has not observed any element count yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            observed_count: None,
            generation: Generation::FIRST,
        }
    }

    /// The current generation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// The element count seen by the most recent evaluation.
    #[must_use]
    pub const fn observed_count(&self) -> Option<usize> {
        self.observed_count
    }

    /// Decides the phase for a pass over `element_count` items.
    ///
    /// `reset_pending` tells the policy that a wipe is already queued, in which
    /// case the cache is not trusted even if its length happens to match.
    pub fn evaluate(
        &mut self,
        element_count: usize,
        cache: &WidthCache,
        reset_pending: bool,
    ) -> Phase {
        match self.observed_count {
            None => self.observed_count = Some(element_count),
            Some(observed) if observed != element_count => {
                self.observed_count = Some(element_count);
                self.generation = self.generation.next();
                return Phase::Measure { reset: true };
            }
            Some(_) => {}
        }

        if !reset_pending && cache.is_complete(element_count) {
            Phase::Arrange
        } else {
            Phase::Measure { reset: false }
        }
    }

    /// Starts a new generation without an element count change.
    pub(crate) fn bump_generation(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }
}
