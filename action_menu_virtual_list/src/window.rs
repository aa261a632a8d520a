// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A windowing controller that owns an [`ExtentModel`] and scroll state.

use crate::measured::{DEFAULT_ESTIMATED_ROW_HEIGHT, MeasuredExtentModel};
use crate::model::{ExtentModel, VisibleStrip, compute_visible_strip};

/// Default number of rows realized beyond each viewport edge.
pub const DEFAULT_OVERSCAN: usize = 12;

/// Windowing parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowConfig {
    /// Rows realized beyond each viewport edge.
    pub overscan: usize,
    /// Extent assumed for rows that have not been measured.
    pub estimated_row_height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
        }
    }
}

/// Alignment when scrolling a row into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Row start at the viewport start.
    Start,
    /// Row centered in the viewport.
    Center,
    /// Row end at the viewport end.
    End,
    /// Smallest move that makes the row fully visible.
    Nearest,
}

/// Windowed view over a surface's flattened rows.
///
/// Stores the scroll offset, viewport extent and overscan, owns the extent
/// model, and caches the last [`VisibleStrip`]. It knows nothing about the
/// host's element tree; hosts realize `strip.start..strip.end` and size two
/// spacers from `before_extent` and `after_extent`.
#[derive(Debug)]
pub struct VirtualWindow<M: ExtentModel = MeasuredExtentModel> {
    model: M,
    scroll_offset: f64,
    viewport_extent: f64,
    overscan: usize,
    dirty: bool,
    last_strip: VisibleStrip,
}

impl VirtualWindow<MeasuredExtentModel> {
    /// Creates a window over `count` estimated rows.
    #[must_use]
    pub fn with_config(count: usize, viewport_extent: f64, config: WindowConfig) -> Self {
        Self::new(
            MeasuredExtentModel::new(count, config.estimated_row_height),
            viewport_extent,
            config.overscan,
        )
    }

    /// Sets the row count, keeping measurements of surviving rows.
    pub fn set_count(&mut self, count: usize) {
        if count != self.model.len() {
            self.model_mut().set_len(count);
        }
    }

    /// Records the measured extent of a realized row.
    pub fn measure(&mut self, index: usize, extent: f64) {
        self.model_mut().measure(index, extent);
    }
}

impl<M: ExtentModel> VirtualWindow<M> {
    /// Creates a window over `model`.
    #[must_use]
    pub fn new(model: M, viewport_extent: f64, overscan: usize) -> Self {
        Self {
            model,
            scroll_offset: 0.0,
            viewport_extent: viewport_extent.max(0.0),
            overscan,
            dirty: true,
            last_strip: VisibleStrip::EMPTY,
        }
    }

    /// The extent model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the extent model; invalidates the cached strip.
    pub fn model_mut(&mut self) -> &mut M {
        self.dirty = true;
        &mut self.model
    }

    /// Number of rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.model.len()
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset; negative values clamp to zero.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.dirty = true;
        }
    }

    /// Current viewport extent.
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Sets the viewport extent.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        let extent = extent.max(0.0);
        if extent != self.viewport_extent {
            self.viewport_extent = extent;
            self.dirty = true;
        }
    }

    /// Rows realized beyond each viewport edge.
    #[must_use]
    pub const fn overscan(&self) -> usize {
        self.overscan
    }

    /// Sets the overscan in rows.
    pub fn set_overscan(&mut self, overscan: usize) {
        if overscan != self.overscan {
            self.overscan = overscan;
            self.dirty = true;
        }
    }

    /// Computes or returns the cached visible strip.
    pub fn visible_strip(&mut self) -> VisibleStrip {
        if self.dirty {
            self.last_strip = compute_visible_strip(
                &mut self.model,
                self.scroll_offset,
                self.viewport_extent,
                self.overscan,
            );
            self.dirty = false;
        }
        self.last_strip
    }

    /// Keeps the viewport within the content.
    pub fn clamp_scroll_to_content(&mut self) {
        let content = self.model.total_extent();
        let max_offset = (content - self.viewport_extent).max(0.0);
        if self.scroll_offset > max_offset {
            self.set_scroll_offset(max_offset);
        }
    }

    /// Scrolls so that row `index` is in view with the given alignment.
    ///
    /// Indices past the end target the last row.
    pub fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) {
        let len = self.model.len();
        if len == 0 {
            self.set_scroll_offset(0.0);
            return;
        }
        let index = index.min(len - 1);
        let item_start = self.model.offset_of(index);
        let item_end = item_start + self.model.extent_of(index);
        let viewport = self.viewport_extent;

        let offset = match align {
            ScrollAlign::Start => item_start,
            ScrollAlign::End => item_end - viewport,
            ScrollAlign::Center => (item_start + item_end - viewport) / 2.0,
            ScrollAlign::Nearest => {
                let current = self.scroll_offset;
                if item_start >= current && item_end <= current + viewport {
                    current
                } else if item_start < current {
                    item_start
                } else {
                    item_end - viewport
                }
            }
        };
        self.set_scroll_offset(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(count: usize, viewport: f64, overscan: usize) -> VirtualWindow {
        VirtualWindow::with_config(
            count,
            viewport,
            WindowConfig {
                overscan,
                estimated_row_height: 10.0,
            },
        )
    }

    fn indices(list: &mut VirtualWindow) -> core::ops::Range<usize> {
        let strip = list.visible_strip();
        strip.start..strip.end
    }

    #[test]
    fn defaults_follow_documented_values() {
        let config = WindowConfig::default();
        assert_eq!(config.overscan, 12);
        assert_eq!(config.estimated_row_height, 32.0);
    }

    #[test]
    fn strip_tracks_scroll_and_viewport() {
        let mut list = window(100, 50.0, 0);
        assert_eq!(indices(&mut list), 0..5);
        list.set_scroll_offset(10.0);
        assert_eq!(indices(&mut list), 1..6);
        list.set_overscan(2);
        assert_eq!(indices(&mut list), 0..8);
    }

    #[test]
    fn measurements_invalidate_the_strip() {
        let mut list = window(100, 50.0, 0);
        assert_eq!(indices(&mut list), 0..5);
        list.measure(0, 40.0);
        assert_eq!(indices(&mut list), 0..2);
        assert_eq!(list.visible_strip().content_extent, 1030.0);
    }

    #[test]
    fn count_changes_keep_scroll_state() {
        let mut list = window(10, 30.0, 0);
        list.set_scroll_offset(20.0);
        list.set_count(100);
        assert_eq!(list.count(), 100);
        assert_eq!(indices(&mut list), 2..5);
        list.set_count(0);
        assert!(list.visible_strip().is_empty());
    }

    #[test]
    fn scroll_to_index_aligns() {
        let mut list = window(10, 30.0, 0);
        list.scroll_to_index(3, ScrollAlign::Start);
        assert_eq!(list.scroll_offset(), 30.0);
        list.scroll_to_index(3, ScrollAlign::End);
        assert_eq!(list.scroll_offset(), 10.0);
        list.scroll_to_index(3, ScrollAlign::Center);
        assert_eq!(list.scroll_offset(), 20.0);
        list.scroll_to_index(3, ScrollAlign::Nearest);
        assert_eq!(list.scroll_offset(), 20.0);
        list.scroll_to_index(9, ScrollAlign::Nearest);
        assert_eq!(list.scroll_offset(), 70.0);
        list.scroll_to_index(0, ScrollAlign::Nearest);
        assert_eq!(list.scroll_offset(), 0.0);
    }

    #[test]
    fn clamp_keeps_viewport_inside_content() {
        let mut list = window(5, 30.0, 0);
        list.set_scroll_offset(100.0);
        list.clamp_scroll_to_content();
        assert_eq!(list.scroll_offset(), 20.0);

        let mut short = window(2, 30.0, 0);
        short.set_scroll_offset(10.0);
        short.clamp_scroll_to_content();
        assert_eq!(short.scroll_offset(), 0.0);
    }
}
