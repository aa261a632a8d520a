// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row extents that start as estimates and are replaced by measurements.

use crate::model::ExtentModel;

/// Default row height estimate, in logical pixels.
pub const DEFAULT_ESTIMATED_ROW_HEIGHT: f64 = 32.0;

/// An [`ExtentModel`] over estimated rows with a lazy prefix-sum cache.
///
/// Every row starts at the estimate. [`MeasuredExtentModel::measure`]
/// replaces a row's extent once layout knows it; prefix sums are recomputed
/// from the first changed row on the next query. Resizing keeps the
/// measurements of surviving rows.
#[derive(Clone, Debug)]
pub struct MeasuredExtentModel {
    estimate: f64,
    extents: Vec<f64>,
    measured: Vec<bool>,
    starts: Vec<f64>,
    dirty_from: Option<usize>,
}

impl Default for MeasuredExtentModel {
    fn default() -> Self {
        Self::new(0, DEFAULT_ESTIMATED_ROW_HEIGHT)
    }
}

impl MeasuredExtentModel {
    /// Creates `len` rows of `estimate` extent.
    #[must_use]
    pub fn new(len: usize, estimate: f64) -> Self {
        let estimate = sanitize(estimate);
        Self {
            estimate,
            extents: vec![estimate; len],
            measured: vec![false; len],
            starts: vec![0.0; len],
            dirty_from: Some(0),
        }
    }

    /// Extent assumed for rows that have not been measured.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Grows or shrinks to `len` rows; new rows take the estimate.
    pub fn set_len(&mut self, len: usize) {
        let old = self.extents.len();
        if len == old {
            return;
        }
        self.extents.resize(len, self.estimate);
        self.measured.resize(len, false);
        self.starts.resize(len, 0.0);
        self.mark_dirty(old.min(len));
    }

    /// Forgets every measurement.
    pub fn reset_measurements(&mut self) {
        self.extents.fill(self.estimate);
        self.measured.fill(false);
        self.mark_dirty(0);
    }

    /// Records the measured extent of row `index`. Out-of-range rows are ignored.
    ///
    /// Negative and non-finite extents count as zero.
    pub fn measure(&mut self, index: usize, extent: f64) {
        let Some(slot) = self.extents.get_mut(index) else {
            return;
        };
        let extent = sanitize(extent);
        self.measured[index] = true;
        if *slot != extent {
            *slot = extent;
            self.mark_dirty(index);
        }
    }

    /// Returns `true` if row `index` has been measured.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    fn mark_dirty(&mut self, from: usize) {
        self.dirty_from = Some(self.dirty_from.map_or(from, |dirty| dirty.min(from)));
    }

    fn ensure_prefix(&mut self) {
        let Some(from) = self.dirty_from.take() else {
            return;
        };
        let len = self.extents.len();
        if from >= len {
            return;
        }
        let mut pos = if from == 0 {
            0.0
        } else {
            self.starts[from - 1] + self.extents[from - 1]
        };
        for i in from..len {
            self.starts[i] = pos;
            pos += self.extents[i];
        }
    }
}

fn sanitize(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

impl ExtentModel for MeasuredExtentModel {
    fn len(&self) -> usize {
        self.extents.len()
    }

    fn total_extent(&mut self) -> f64 {
        let Some(last) = self.extents.len().checked_sub(1) else {
            return 0.0;
        };
        self.ensure_prefix();
        self.starts[last] + self.extents[last]
    }

    fn extent_of(&mut self, index: usize) -> f64 {
        self.extents.get(index).copied().unwrap_or(0.0)
    }

    fn offset_of(&mut self, index: usize) -> f64 {
        let len = self.extents.len();
        if index == 0 || len == 0 {
            return 0.0;
        }
        if index >= len {
            return self.total_extent();
        }
        self.ensure_prefix();
        self.starts[index]
    }

    fn index_at_offset(&mut self, offset: f64) -> usize {
        if self.extents.is_empty() {
            return 0;
        }
        self.ensure_prefix();
        let target = offset.max(0.0);
        match self.starts.binary_search_by(|start| start.total_cmp(&target)) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }
}
