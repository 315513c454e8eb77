// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-index content generators.

use hashbrown::HashMap;

use crate::Generation;

/// Produces the content for an item index.
///
/// A flow collection calls the generator at least twice per index: once for
/// the invisible probe and once for the visible, placed instance. Generators
/// must therefore be pure functions of the index within a generation. If
/// content cannot be produced deterministically, wrap the generator in
/// [`Memoized`].
///
/// Every `FnMut(usize) -> C` is a generator.
pub trait ContentGenerator<C> {
    /// Produce the content for `index`.
    fn generate(&mut self, index: usize) -> C;

    /// Called at the start of every pass with the collection's current generation.
    ///
    /// The default implementation does nothing.
    fn begin_generation(&mut self, generation: Generation) {
        let _ = generation;
    }
}

impl<C, F> ContentGenerator<C> for F
where
    F: FnMut(usize) -> C,
{
    fn generate(&mut self, index: usize) -> C {
        self(index)
    }
}

/// A [`ContentGenerator`] adapter that produces each index at most once per generation.
///
/// The probe and the placed instance of an item are then clones of the same
/// value, so what gets measured is exactly what gets shown. The memo is
/// dropped whenever the collection moves to a new generation.
///
/// ```rust
/// use understory_flow::{ContentGenerator, Generation, Memoized};
///
/// let mut calls = 0;
/// let mut generator = Memoized::new(|index: usize| {
///     calls += 1;
///     index * 2
/// });
/// generator.begin_generation(Generation::FIRST);
/// assert_eq!(generator.generate(3), 6);
/// assert_eq!(generator.generate(3), 6);
/// drop(generator);
/// assert_eq!(calls, 1);
/// ```
#[derive(Debug)]
pub struct Memoized<G, C> {
    inner: G,
    generation: Option<Generation>,
    memo: HashMap<usize, C>,
}

impl<G, C> Memoized<G, C> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            generation: None,
            memo: HashMap::new(),
        }
    }

    /// Number of memoized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Returns `true` if nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Unwraps the inner generator.
    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G, C> ContentGenerator<C> for Memoized<G, C>
where
    G: ContentGenerator<C>,
    C: Clone,
{
    fn generate(&mut self, index: usize) -> C {
        let Self { inner, memo, .. } = self;
        memo.entry(index)
            .or_insert_with(|| inner.generate(index))
            .clone()
    }

    fn begin_generation(&mut self, generation: Generation) {
        if self.generation != Some(generation) {
            self.memo.clear();
            self.generation = Some(generation);
        }
        self.inner.begin_generation(generation);
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::{ContentGenerator, Memoized};
    use crate::Generation;

    #[test]
    fn closures_are_generators() {
        let mut label = |index: usize| format!("Index: {index}");
        assert_eq!(ContentGenerator::<String>::generate(&mut label, 4), "Index: 4");
    }

    #[test]
    fn memo_is_dropped_on_new_generation() {
        let mut counter = 0_usize;
        let mut generator = Memoized::new(move |_index: usize| {
            counter += 1;
            counter
        });

        generator.begin_generation(Generation::FIRST);
        assert_eq!(generator.generate(0), 1);
        assert_eq!(generator.generate(0), 1);
        assert_eq!(generator.len(), 1);

        // Same generation again: memo survives.
        generator.begin_generation(Generation::FIRST);
        assert_eq!(generator.generate(0), 1);

        generator.begin_generation(Generation::FIRST.next());
        assert!(generator.is_empty());
        assert_eq!(generator.generate(0), 2);
    }
}
