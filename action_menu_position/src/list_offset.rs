// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring how far a surface's first row sits below its top edge.

/// Vertical layout of a surface, in one coordinate space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceLayout {
    /// Top edge of the surface.
    pub surface_top: f64,
    /// Bottom edge of the search input, when one is visible.
    pub input_bottom: Option<f64>,
    /// Top edge of the list's content box (inside its top padding).
    pub list_content_top: f64,
}

impl SurfaceLayout {
    /// Distance from the surface top to where rows start.
    ///
    /// Uses the input's bottom edge when an input is visible and the list's
    /// padded top otherwise. Never negative.
    #[must_use]
    pub fn list_offset(&self) -> f64 {
        let edge = self.input_bottom.unwrap_or(self.list_content_top);
        let offset = edge - self.surface_top;
        if offset.is_finite() && offset > 0.0 { offset } else { 0.0 }
    }
}

/// Keeps the last measured list offset of one submenu surface.
///
/// Hosts call [`ListAlignTracker::measure`] when the surface opens and on
/// layout changes that move its input or list (input shown or hidden,
/// loader state rows swapped in). A changed offset means the placement
/// request must be rebuilt.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ListAlignTracker {
    offset: Option<f64>,
}

impl ListAlignTracker {
    /// A tracker with nothing measured.
    #[must_use]
    pub const fn new() -> Self {
        Self { offset: None }
    }

    /// Last measured offset, or zero before the first measurement.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset.unwrap_or(0.0)
    }

    /// Returns `true` once a layout has been measured.
    #[must_use]
    pub const fn is_measured(&self) -> bool {
        self.offset.is_some()
    }

    /// Records `layout`; returns `true` if the offset changed.
    pub fn measure(&mut self, layout: &SurfaceLayout) -> bool {
        let offset = layout.list_offset();
        if self.offset == Some(offset) {
            return false;
        }
        self.offset = Some(offset);
        true
    }

    /// Forgets the measurement (the surface closed).
    pub fn reset(&mut self) {
        self.offset = None;
    }
}
