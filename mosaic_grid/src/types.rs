// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.
//!
//! All coordinates are whole canvas units: `x` runs over `0..canvas_width`
//! (percent of the canvas width in the reference editor) and `y` is
//! unbounded downwards, measured in the same unit.

use core::cmp::Ordering;

/// A position on the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Distance from the left canvas edge.
    pub x: i32,
    /// Distance from the top canvas edge.
    pub y: i32,
}

impl Pos {
    /// Create a new position.
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width and height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Expanse {
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Expanse {
    /// Create a new expanse.
    #[inline(always)]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Area widened to `i64`. Negative extents count as zero.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.w.max(0)) * i64::from(self.h.max(0))
    }

    /// Raise each extent to at least `min`.
    ///
    /// Zero and negative sizes would "fit" anywhere, so every placement entry
    /// point runs requested sizes through this first.
    #[inline]
    #[must_use]
    pub fn clamp_min(self, min: Self) -> Self {
        Self {
            w: self.w.max(min.w),
            h: self.h.max(min.h),
        }
    }
}

/// Axis-aligned rectangle: a [`Pos`] plus an [`Expanse`].
///
/// A rect covers the half-open cell range `x..x + w` by `y..y + h`. Rects
/// with a non-positive width or height are *empty*; they cover no cells and
/// never overlap anything.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Create a new rect from origin and size.
    #[inline(always)]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rect at `pos` with size `expanse`.
    #[inline]
    pub const fn from_pos_expanse(pos: Pos, expanse: Expanse) -> Self {
        Self::new(pos.x, pos.y, expanse.w, expanse.h)
    }

    /// The top-left corner.
    #[inline]
    pub const fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    /// The size.
    #[inline]
    pub const fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Area widened to `i64`; zero for empty rects.
    #[inline]
    pub fn area(&self) -> i64 {
        self.expanse().area()
    }

    /// Return true if the rect has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether the unit cell at `(x, y)` lies inside this rect.
    #[inline]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rect. Empty rects are
    /// contained nowhere.
    #[inline]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        !other.is_empty()
            && self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Determines whether two rects share a region of non-zero area.
    ///
    /// Rects that only touch along an edge or at a corner do *not* overlap, and
    /// an empty rect overlaps nothing, itself included.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_grid::Rect;
    ///
    /// let a = Rect::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&Rect::new(5, 5, 10, 10)));
    /// assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
    /// assert!(!a.overlaps(&Rect::new(3, 3, 0, 4)));
    /// ```
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink every side by `d`, keeping the width and height non-negative.
    #[inline]
    #[must_use]
    pub fn inset(&self, d: i32) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            w: (self.w - 2 * d).max(0),
            h: (self.h - 2 * d).max(0),
        }
    }

    /// The smallest rect enclosing both rects. Empty inputs are ignored.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            w: self.right().max(other.right()) - x,
            h: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Width over height, or `None` for empty rects.
    #[inline]
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(f64::from(self.w) / f64::from(self.h))
        }
    }
}

/// Free-function form of [`Rect::overlaps`].
#[inline]
pub const fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Round a length to the nearest multiple of `grid`, never below zero.
///
/// Halves round up. NaN and negative values snap to zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Snapped lengths are canvas units; out-of-range values saturate."
)]
#[inline]
pub fn snap(value: f64, grid: i32) -> i32 {
    debug_assert!(grid > 0, "snap grid must be strictly positive");
    let steps = value / f64::from(grid);
    if steps.is_nan() || steps <= 0.0 {
        return 0;
    }
    ((steps + 0.5) as i32).saturating_mul(grid)
}

/// Order positions for reading: mostly top-to-bottom, with horizontal
/// distance weighted down so a row reads left-to-right.
#[inline]
pub fn reading_order(a: &Pos, b: &Pos) -> Ordering {
    reading_norm(a).total_cmp(&reading_norm(b))
}

#[inline]
fn reading_norm(p: &Pos) -> f64 {
    let x = f64::from(p.x);
    let y = f64::from(p.y);
    x * x * 0.05 + y * y
}

#[cfg(feature = "kurbo")]
impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.x),
            f64::from(r.y),
            f64::from(r.right()),
            f64::from(r.bottom()),
        )
    }
}

#[cfg(feature = "kurbo")]
impl Rect {
    /// Convert a `kurbo` rect to whole canvas units, rounding each edge.
    ///
    /// Inverted rects are normalized first. Returns `None` for non-finite
    /// input.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Edges were rounded and range-checked just above."
    )]
    pub fn from_kurbo(r: kurbo::Rect) -> Option<Self> {
        if !r.is_finite() {
            return None;
        }
        let r = r.abs().round();
        let limit = f64::from(i32::MAX);
        if r.x0 < -limit || r.y0 < -limit || r.x1 > limit || r.y1 > limit {
            return None;
        }
        let (x0, y0, x1, y1) = (r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32);
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn overlap_disjoint_and_touching() {
        let a = Rect::new(0, 0, 10, 10);
        // Disjoint on every side.
        assert!(!a.overlaps(&Rect::new(20, 0, 5, 5)));
        assert!(!a.overlaps(&Rect::new(-20, 0, 5, 5)));
        assert!(!a.overlaps(&Rect::new(0, 20, 5, 5)));
        assert!(!a.overlaps(&Rect::new(0, -20, 5, 5)));
        // Sharing an edge.
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(-10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, -10, 10, 10)));
        // Sharing a corner.
        assert!(!a.overlaps(&Rect::new(10, 10, 5, 5)));
        assert!(!a.overlaps(&Rect::new(-5, -5, 5, 5)));
        assert!(!a.overlaps(&Rect::new(10, -5, 5, 5)));
        assert!(!a.overlaps(&Rect::new(-5, 10, 5, 5)));
    }

    #[test]
    fn overlap_partial_contained_identical() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(9, 9, 5, 5)));
        assert!(a.overlaps(&Rect::new(-4, 2, 5, 1)));
        // Containment in both directions.
        assert!(a.overlaps(&Rect::new(2, 2, 3, 3)));
        assert!(Rect::new(2, 2, 3, 3).overlaps(&a));
        // Identical rects.
        assert!(a.overlaps(&a));
        // A cross shape where no corner of either lies inside the other.
        assert!(Rect::new(4, -5, 2, 20).overlaps(&Rect::new(-5, 4, 20, 2)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let rects = [
            Rect::new(0, 0, 10, 10),
            Rect::new(10, 0, 10, 10),
            Rect::new(5, 5, 10, 10),
            Rect::new(2, 2, 3, 3),
            Rect::new(0, 0, 0, 10),
            Rect::new(-3, 9, 4, 4),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
                assert_eq!(overlaps(a, b), a.overlaps(b));
            }
        }
    }

    #[test]
    fn empty_rects_never_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let degenerate = [
            Rect::new(5, 5, 0, 5),
            Rect::new(5, 5, 5, 0),
            Rect::new(5, 5, 0, 0),
            Rect::new(5, 5, -3, 4),
        ];
        for d in &degenerate {
            assert!(d.is_empty());
            assert!(!a.overlaps(d), "{d:?} must not overlap");
            assert!(!d.overlaps(&a), "{d:?} must not overlap");
            assert!(!d.overlaps(d), "{d:?} must not overlap itself");
        }
    }

    #[test]
    fn rect_accessors() {
        let r = Rect::from_pos_expanse(Pos::new(3, 4), Expanse::new(5, 6));
        assert_eq!(r.right(), 8);
        assert_eq!(r.bottom(), 10);
        assert_eq!(r.area(), 30);
        assert_eq!(r.pos(), Pos::new(3, 4));
        assert_eq!(r.expanse(), Expanse::new(5, 6));
        assert!(r.contains_point(3, 4));
        assert!(!r.contains_point(8, 4));
        assert_eq!(r.inset(1), Rect::new(4, 5, 3, 4));
        assert_eq!(r.inset(4).expanse(), Expanse::new(0, 0));
        assert_eq!(Rect::new(0, 0, 0, 0).area(), 0);
        assert_eq!(Rect::new(0, 0, -2, 5).area(), 0);
    }

    #[test]
    fn union_skips_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 1, 2, 6);
        assert_eq!(a.union(&b), Rect::new(0, 0, 7, 7));
        assert_eq!(a.union(&Rect::new(50, 50, 0, 0)), a);
    }

    #[test]
    fn containment() {
        let frame = Rect::new(0, 0, 10, 10);
        assert!(frame.contains_rect(&Rect::new(0, 0, 10, 10)));
        assert!(frame.contains_rect(&Rect::new(9, 9, 1, 1)));
        assert!(!frame.contains_rect(&Rect::new(9, 9, 2, 1)));
        assert!(!frame.contains_rect(&Rect::new(2, 2, 0, 1)));
    }

    #[test]
    fn clamp_min_raises_degenerate_sizes() {
        let min = Expanse::new(1, 1);
        assert_eq!(Expanse::new(0, -4).clamp_min(min), Expanse::new(1, 1));
        assert_eq!(Expanse::new(24, 19).clamp_min(min), Expanse::new(24, 19));
    }

    #[test]
    fn snap_rounds_to_grid() {
        assert_eq!(snap(33.78, 1), 34);
        assert_eq!(snap(33.49, 1), 33);
        assert_eq!(snap(2.5, 1), 3);
        assert_eq!(snap(7.0, 5), 5);
        assert_eq!(snap(8.0, 5), 10);
        assert_eq!(snap(-3.0, 1), 0);
        assert_eq!(snap(f64::NAN, 1), 0);
    }

    #[test]
    fn reading_order_prefers_rows() {
        let mut ps: Vec<Pos> = vec![Pos::new(0, 20), Pos::new(60, 1), Pos::new(10, 1)];
        ps.sort_by(reading_order);
        assert_eq!(ps, vec![Pos::new(10, 1), Pos::new(60, 1), Pos::new(0, 20)]);
    }
}
