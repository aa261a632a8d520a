// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side and alignment choices for a surface.

use kurbo::{Rect, Size};

/// Side of the anchor a surface is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns `true` for [`Side::Left`] and [`Side::Right`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Alignment of the surface along the anchor's edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Leading edges line up.
    Start,
    /// Centers line up.
    Center,
    /// Trailing edges line up.
    End,
    /// The surface's first list row lines up with the anchor row.
    ///
    /// Resolved with the offset measured by [`ListAlignTracker`](crate::ListAlignTracker).
    List,
}

/// Default side and alignment for a surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacementDefaults {
    /// Side of the anchor.
    pub side: Side,
    /// Alignment along the anchor's edge.
    pub align: Align,
}

impl PlacementDefaults {
    /// Root surfaces open below their trigger, start aligned.
    pub const ROOT: Self = Self {
        side: Side::Bottom,
        align: Align::Start,
    };

    /// Submenus open to the right of their trigger row, list aligned.
    pub const SUBMENU: Self = Self {
        side: Side::Right,
        align: Align::List,
    };

    /// Defaults for a surface at `depth` (`0` is the root).
    #[must_use]
    pub const fn for_depth(depth: usize) -> Self {
        if depth == 0 { Self::ROOT } else { Self::SUBMENU }
    }

    /// Mirrors horizontal sides for right-to-left layouts.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        let side = if self.side.is_horizontal() {
            self.side.opposite()
        } else {
            self.side
        };
        Self { side, ..self }
    }
}

/// Inputs handed to a [`PositioningService`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Bounds of the anchor (trigger button or trigger row).
    pub anchor: Rect,
    /// Size of the surface being placed.
    pub size: Size,
    /// Preferred side.
    pub side: Side,
    /// Preferred alignment.
    pub align: Align,
    /// Gap between the anchor and the surface along `side`.
    pub side_offset: f64,
    /// Shift along the anchor's edge; for [`Align::List`] this is the
    /// measured list offset and moves the surface back by that much.
    pub align_offset: f64,
    /// Region the surface should stay inside, if any.
    pub boundary: Option<Rect>,
}

impl PlacementRequest {
    /// A request with the given defaults and no offsets or boundary.
    #[must_use]
    pub const fn new(anchor: Rect, size: Size, defaults: PlacementDefaults) -> Self {
        Self {
            anchor,
            size,
            side: defaults.side,
            align: defaults.align,
            side_offset: 0.0,
            align_offset: 0.0,
            boundary: None,
        }
    }

    /// Sets the gap along the side.
    #[must_use]
    pub const fn with_side_offset(mut self, offset: f64) -> Self {
        self.side_offset = offset;
        self
    }

    /// Sets the shift along the anchor's edge.
    #[must_use]
    pub const fn with_align_offset(mut self, offset: f64) -> Self {
        self.align_offset = offset;
        self
    }

    /// Sets the boundary.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: Rect) -> Self {
        self.boundary = Some(boundary);
        self
    }
}

/// Where a surface ended up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Final bounds of the surface.
    pub rect: Rect,
    /// Side actually used (a collision-aware service may flip it).
    pub side: Side,
    /// Alignment actually used.
    pub align: Align,
}

/// An external positioning service: given the request, returns a placement.
///
/// Collision handling (flipping, shifting into the boundary) belongs to the
/// implementation; the engine only prepares the request.
pub trait PositioningService {
    /// Places one surface.
    fn place(&self, request: &PlacementRequest) -> Placement;
}

/// Places surfaces exactly where requested, without collision handling.
#[derive(Copy, Clone, Debug, Default)]
pub struct StaticPlacer;

impl PositioningService for StaticPlacer {
    fn place(&self, request: &PlacementRequest) -> Placement {
        let PlacementRequest {
            anchor,
            size,
            side,
            align,
            side_offset,
            align_offset,
            ..
        } = *request;

        let (x, y) = if side.is_horizontal() {
            let x = match side {
                Side::Right => anchor.x1 + side_offset,
                _ => anchor.x0 - side_offset - size.width,
            };
            let y = align_cross(anchor.y0, anchor.y1, size.height, align, align_offset);
            (x, y)
        } else {
            let y = match side {
                Side::Bottom => anchor.y1 + side_offset,
                _ => anchor.y0 - side_offset - size.height,
            };
            let x = align_cross(anchor.x0, anchor.x1, size.width, align, align_offset);
            (x, y)
        };

        Placement {
            rect: Rect::from_origin_size((x, y), size),
            side,
            align,
        }
    }
}

fn align_cross(start: f64, end: f64, extent: f64, align: Align, offset: f64) -> f64 {
    match align {
        Align::Start => start + offset,
        Align::Center => start + (end - start - extent) / 2.0 + offset,
        Align::End => end - extent + offset,
        Align::List => start - offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Rect = Rect::new(10.0, 100.0, 210.0, 132.0);
    const SIZE: Size = Size::new(180.0, 300.0);

    #[test]
    fn defaults_depend_on_depth() {
        assert_eq!(PlacementDefaults::for_depth(0), PlacementDefaults::ROOT);
        assert_eq!(PlacementDefaults::for_depth(3), PlacementDefaults::SUBMENU);
        assert_eq!(PlacementDefaults::SUBMENU.mirrored().side, Side::Left);
        assert_eq!(PlacementDefaults::ROOT.mirrored(), PlacementDefaults::ROOT);
    }

    #[test]
    fn root_opens_below_start_aligned() {
        let request = PlacementRequest::new(ANCHOR, SIZE, PlacementDefaults::ROOT).with_side_offset(4.0);
        let placement = StaticPlacer.place(&request);
        assert_eq!(placement.rect, Rect::new(10.0, 136.0, 190.0, 436.0));
        assert_eq!(placement.side, Side::Bottom);
    }

    #[test]
    fn list_alignment_lifts_surface_by_offset() {
        let request = PlacementRequest::new(ANCHOR, SIZE, PlacementDefaults::SUBMENU).with_align_offset(44.0);
        let placement = StaticPlacer.place(&request);
        assert_eq!(placement.rect.x0, 210.0);
        assert_eq!(placement.rect.y0, 56.0);
    }

    #[test]
    fn left_and_top_sides_subtract_size() {
        let mut request = PlacementRequest::new(ANCHOR, SIZE, PlacementDefaults::SUBMENU.mirrored());
        request.align = Align::End;
        let placement = StaticPlacer.place(&request);
        assert_eq!(placement.rect.x1, 10.0);
        assert_eq!(placement.rect.y1, 132.0);

        request.side = Side::Top;
        request.align = Align::Center;
        let placement = StaticPlacer.place(&request);
        assert_eq!(placement.rect.y1, 100.0);
        assert_eq!(placement.rect.x0, 20.0);
    }
}
