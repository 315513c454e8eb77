// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line wrapping of item advances into lanes.

use alloc::vec::Vec;
use core::slice;

use smallvec::SmallVec;

/// Indices of the items in one lane, strictly increasing.
pub type Lane = SmallVec<[usize; 8]>;

/// An ordered sequence of lanes: top-to-bottom, each left-to-right.
///
/// Produced by [`wrap_lanes`]. Concatenating the lanes always yields
/// `0..element_count` in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lanes {
    lanes: Vec<Lane>,
}

impl Lanes {
    /// Number of lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` if there are no lanes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// The lane at position `lane`, if any.
    #[must_use]
    pub fn get(&self, lane: usize) -> Option<&[usize]> {
        self.lanes.get(lane).map(|lane| lane.as_slice())
    }

    /// Iterates over the lanes in order.
    pub fn iter(&self) -> slice::Iter<'_, Lane> {
        self.lanes.iter()
    }

    /// Position of the lane containing item `index`, if any.
    #[must_use]
    pub fn lane_of(&self, index: usize) -> Option<usize> {
        // Lanes partition `0..len` in order, so the first index of each lane
        // is sorted and a binary search over lane starts is enough.
        let lane = match self.lanes.binary_search_by(|lane| lane[0].cmp(&index)) {
            Ok(lane) => lane,
            Err(0) => return None,
            Err(next) => next - 1,
        };
        self.lanes[lane].contains(&index).then_some(lane)
    }
}

impl<'a> IntoIterator for &'a Lanes {
    type Item = &'a Lane;
    type IntoIter = slice::Iter<'a, Lane>;

    fn into_iter(self) -> Self::IntoIter {
        self.lanes.iter()
    }
}

/// Wrap `element_count` items into lanes no wider than `max_usable_width`.
///
/// `advance_of(index)` is the horizontal space item `index` consumes,
/// including any trailing spacing. Items are packed greedily in index order: an
/// item joins the current lane only if the lane's running advance plus its own
/// stays *strictly* below `max_usable_width`; otherwise it starts a new lane.
/// Lanes that are already closed are never revisited.
///
/// An item that does not fit on its own still gets a lane to itself; nothing
/// is split or dropped. A zero or negative `max_usable_width` therefore puts
/// every item on its own lane.
///
/// ```rust
/// use understory_flow::wrap_lanes;
///
/// let lanes = wrap_lanes(3, 250.0, |_| 100.0);
/// assert_eq!(lanes.get(0), Some(&[0, 1][..]));
/// assert_eq!(lanes.get(1), Some(&[2][..]));
///
/// // Exactly filling the width is not allowed.
/// let lanes = wrap_lanes(4, 100.0, |_| 50.0);
/// assert_eq!(lanes.len(), 4);
/// ```
pub fn wrap_lanes<F>(element_count: usize, max_usable_width: f64, mut advance_of: F) -> Lanes
where
    F: FnMut(usize) -> f64,
{
    let mut lanes: Vec<Lane> = Vec::new();
    let mut lane_advance = 0.0;

    for index in 0..element_count {
        let advance = advance_of(index);
        match lanes.last_mut() {
            Some(lane) if lane_advance + advance < max_usable_width => {
                lane.push(index);
                lane_advance += advance;
            }
            _ => {
                lanes.push(smallvec::smallvec![index]);
                lane_advance = advance;
            }
        }
    }

    Lanes { lanes }
}
