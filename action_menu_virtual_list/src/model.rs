// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extent models and the visible-strip query.

use core::cmp;

/// Rows to materialize for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleStrip {
    /// First realized row (inclusive).
    pub start: usize,
    /// One past the last realized row.
    pub end: usize,
    /// Extent of the rows before `start`; the leading spacer.
    pub before_extent: f64,
    /// Extent of the rows after `end`; the trailing spacer.
    pub after_extent: f64,
    /// Extent of all rows.
    pub content_extent: f64,
}

impl VisibleStrip {
    /// A strip with nothing realized.
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        before_extent: 0.0,
        after_extent: 0.0,
        content_extent: 0.0,
    };

    /// Returns `true` if no row is realized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of realized rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if row `index` is realized.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Row heights along the scroll axis, indexed `0..len`.
///
/// Offsets and extents share the scroll offset's coordinate space. Queries
/// take `&mut self` so implementations can keep lazy prefix-sum caches.
pub trait ExtentModel {
    /// Number of rows.
    fn len(&self) -> usize;

    /// Returns `true` if there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all row extents.
    fn total_extent(&mut self) -> f64;

    /// Extent of one row (non-negative).
    fn extent_of(&mut self, index: usize) -> f64;

    /// Offset of the start of `index`; `offset_of(0) == 0`.
    fn offset_of(&mut self, index: usize) -> f64;

    /// Index of the row at or before `offset`, clamped into `0..len`.
    fn index_at_offset(&mut self, offset: f64) -> usize;
}

/// Computes which rows intersect `[scroll_offset, scroll_offset + viewport)`,
/// widened by `overscan` rows on each side.
pub fn compute_visible_strip<M>(model: &mut M, scroll_offset: f64, viewport_extent: f64, overscan: usize) -> VisibleStrip
where
    M: ExtentModel + ?Sized,
{
    let len = model.len();
    if len == 0 {
        return VisibleStrip::EMPTY;
    }
    let content_extent = model.total_extent().max(0.0);
    if content_extent == 0.0 {
        return VisibleStrip::EMPTY;
    }

    let min = scroll_offset.max(0.0).min(content_extent);
    let max = (min + viewport_extent.max(0.0)).min(content_extent);

    let mut start = cmp::min(model.index_at_offset(min), len - 1);
    while start > 0 && model.offset_of(start) > min {
        start -= 1;
    }
    let mut end = start;
    while end < len && (end == start || model.offset_of(end) < max) {
        end += 1;
    }

    let start = start.saturating_sub(overscan);
    let end = cmp::min(end.saturating_add(overscan), len);
    let before_extent = model.offset_of(start);
    let end_offset = if end < len { model.offset_of(end) } else { content_extent };

    VisibleStrip {
        start,
        end,
        before_extent,
        after_extent: (content_extent - end_offset).max(0.0),
        content_extent,
    }
}
