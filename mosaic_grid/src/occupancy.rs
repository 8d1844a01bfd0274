// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse occupancy grid over unit canvas cells.
//!
//! The grid records which unit cells are covered by rects that were added to
//! it. It is a scratch structure: callers rebuild it with
//! [`OccupancyGrid::reset`] from the current tile rects, run their queries and
//! edits, and throw it away. Only occupied cells are stored, so the cost is
//! proportional to covered area rather than to canvas height.
//!
//! Everything outside `0..width` by `0..height` counts as occupied. The
//! height bound starts one row below the lowest added rect and grows by a
//! row at a time when [`OccupancyGrid::next_rect`] runs out of room.

use core::fmt::Debug;

use hashbrown::HashSet;
use rand::Rng;

use crate::types::{Expanse, Pos, Rect};

/// One edge of a rect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left edge (towards smaller `x`).
    Left,
    /// The top edge (towards smaller `y`).
    Up,
    /// The right edge (towards larger `x`).
    Right,
    /// The bottom edge (towards larger `y`).
    Down,
}

impl Side {
    /// All sides in round-robin order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// The one-cell strip just outside this edge of `r`.
    #[inline]
    fn outer_strip(self, r: &Rect) -> Rect {
        match self {
            Self::Left => Rect::new(r.x - 1, r.y, 1, r.h),
            Self::Right => Rect::new(r.right(), r.y, 1, r.h),
            Self::Up => Rect::new(r.x, r.y - 1, r.w, 1),
            Self::Down => Rect::new(r.x, r.bottom(), r.w, 1),
        }
    }

    /// The one-cell strip just inside this edge of `r`.
    #[inline]
    fn inner_strip(self, r: &Rect) -> Rect {
        match self {
            Self::Left => Rect::new(r.x, r.y, 1, r.h),
            Self::Right => Rect::new(r.right() - 1, r.y, 1, r.h),
            Self::Up => Rect::new(r.x, r.y, r.w, 1),
            Self::Down => Rect::new(r.x, r.bottom() - 1, r.w, 1),
        }
    }

    #[inline]
    fn extend(self, r: &mut Rect) {
        match self {
            Self::Left => {
                r.x -= 1;
                r.w += 1;
            }
            Self::Right => r.w += 1,
            Self::Up => {
                r.y -= 1;
                r.h += 1;
            }
            Self::Down => r.h += 1,
        }
    }

    #[inline]
    fn translate(self, r: &mut Rect) {
        match self {
            Self::Left => r.x -= 1,
            Self::Right => r.x += 1,
            Self::Up => r.y -= 1,
            Self::Down => r.y += 1,
        }
    }

    #[inline]
    fn contract(self, r: &mut Rect) {
        match self {
            Self::Left => {
                r.x += 1;
                r.w -= 1;
            }
            Self::Right => r.w -= 1,
            Self::Up => {
                r.y += 1;
                r.h -= 1;
            }
            Self::Down => r.h -= 1,
        }
    }
}

/// Returned when a scan for free space gave up after extending the grid
/// height the maximum number of times.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no free rect found after {extensions} height extensions")]
pub struct LayoutExhausted {
    /// How many rows were appended before giving up.
    pub extensions: u32,
}

/// Tuning for [`OccupancyGrid::next_rect`] and
/// [`OccupancyGrid::next_rect_random`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanParams {
    /// Size of the seed rect tried at each scan position.
    pub seed: Expanse,
    /// Smallest random seed adjustment, in scan steps.
    pub jitter_min: i32,
    /// Largest random seed adjustment, in scan steps (inclusive).
    pub jitter_max: i32,
    /// Distance between scan positions; also the unit of jitter.
    pub step: i32,
    /// Area a found seed is grown towards.
    pub target_area: i64,
    /// Inset applied to every side of a found rect.
    pub margin: i32,
    /// How many rows the grid may append before the scan gives up.
    pub max_extensions: u32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            seed: Expanse::new(10, 10),
            jitter_min: -2,
            jitter_max: 20,
            step: 1,
            target_area: 150,
            margin: 1,
            max_extensions: 64,
        }
    }
}

/// Sparse set of occupied unit cells with a fixed width and a growable
/// height bound.
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    row_height: i32,
    // First row worth scanning; nothing above it has been freed since the
    // last successful scan.
    last_y: i32,
    cells: HashSet<u64>,
}

impl Debug for OccupancyGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OccupancyGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("row_height", &self.row_height)
            .field("last_y", &self.last_y)
            .field("occupied", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl OccupancyGrid {
    /// Create an empty grid `width` cells wide and `row_height` cells tall.
    ///
    /// `row_height` is also the amount appended below the lowest rect on
    /// [`reset`][Self::reset] and on every height extension.
    pub fn new(width: i32, row_height: i32) -> Self {
        debug_assert!(width > 0, "grid width must be strictly positive");
        debug_assert!(row_height > 0, "grid row height must be strictly positive");
        Self {
            width,
            height: row_height,
            row_height,
            last_y: 0,
            cells: HashSet::new(),
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Current height bound in cells.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Set the height bound. Cells below the new bound stay recorded but are
    /// treated as out of bounds until the bound grows past them again.
    #[inline]
    pub fn set_height(&mut self, height: i32) {
        self.height = height.max(0);
    }

    /// Rows appended per height extension.
    #[inline]
    pub const fn row_height(&self) -> i32 {
        self.row_height
    }

    /// The in-bounds region.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Clear the grid, size its height to one row below the lowest rect, and
    /// add every rect.
    ///
    /// The iterator is walked twice, once for the height and once to add.
    pub fn reset<I>(&mut self, rects: I)
    where
        I: IntoIterator<Item = Rect>,
        I::IntoIter: Clone,
    {
        let rects = rects.into_iter();
        self.cells.clear();
        self.last_y = 0;
        let lowest = rects.clone().map(|r| r.bottom()).max().unwrap_or(0).max(0);
        self.height = lowest.saturating_add(self.row_height);
        for r in rects {
            self.add_rect(r);
        }
    }

    #[inline]
    fn key(x: i32, y: i32) -> u64 {
        debug_assert!(x >= 0 && y >= 0, "only in-bounds cells are keyed");
        (u64::from(x as u32) << 32) | u64::from(y as u32)
    }

    #[inline]
    const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Whether the cell at `(x, y)` is occupied. Out-of-bounds cells always
    /// are.
    #[inline]
    pub fn has_point(&self, x: i32, y: i32) -> bool {
        !self.in_bounds(x, y) || self.cells.contains(&Self::key(x, y))
    }

    /// Mark every in-bounds cell of `r` as occupied.
    pub fn add_rect(&mut self, r: Rect) {
        for x in r.x.max(0)..r.right().min(self.width) {
            for y in r.y.max(0)..r.bottom().min(self.height) {
                self.cells.insert(Self::key(x, y));
            }
        }
    }

    /// Mark every in-bounds cell of `r` as free.
    ///
    /// This is the exact inverse of [`add_rect`][Self::add_rect] as long as no
    /// other added rect shares cells with `r`.
    pub fn remove_rect(&mut self, r: Rect) {
        if r.is_empty() {
            return;
        }
        self.last_y = self.last_y.min(r.y.max(0));
        for x in r.x.max(0)..r.right().min(self.width) {
            for y in r.y.max(0)..r.bottom().min(self.height) {
                self.cells.remove(&Self::key(x, y));
            }
        }
    }

    /// Whether `r` is non-empty, lies inside the grid bounds, and covers only
    /// free cells.
    pub fn can_add_rect(&self, r: Rect) -> bool {
        if r.is_empty() || !self.bounds().contains_rect(&r) {
            return false;
        }
        (r.x..r.right()).all(|x| (r.y..r.bottom()).all(|y| !self.cells.contains(&Self::key(x, y))))
    }

    #[inline]
    fn try_grow(&self, r: &mut Rect, side: Side, frame: Option<&Rect>) -> bool {
        let strip = side.outer_strip(r);
        if frame.is_some_and(|f| !f.contains_rect(&strip)) || !self.can_add_rect(strip) {
            return false;
        }
        side.extend(r);
        true
    }

    /// Push one edge of `r` out by a single cell if the newly covered strip is
    /// free. Returns whether it moved.
    #[inline]
    pub fn grow_step(&self, r: &mut Rect, side: Side) -> bool {
        self.try_grow(r, side, None)
    }

    /// Push one edge of `r` out until it hits an occupied cell or the grid
    /// bounds. Returns the number of cells gained along that axis.
    pub fn grow_toward(&self, r: &mut Rect, side: Side) -> i32 {
        let mut steps = 0;
        while self.try_grow(r, side, None) {
            steps += 1;
        }
        steps
    }

    /// Like [`grow_toward`][Self::grow_toward], but the rect never leaves
    /// `frame`.
    pub fn grow_toward_within(&self, r: &mut Rect, side: Side, frame: &Rect) -> i32 {
        let mut steps = 0;
        while self.try_grow(r, side, Some(frame)) {
            steps += 1;
        }
        steps
    }

    /// Grow fully to the left, up, right and down, in that order.
    pub fn grow(&self, r: &mut Rect) {
        for side in Side::ALL {
            self.grow_toward(r, side);
        }
    }

    /// Grow fully to the left, right, down and up, in that order, without
    /// leaving `frame`. Returns whether the rect changed.
    pub fn grow_within(&self, r: &mut Rect, frame: &Rect) -> bool {
        let mut grown = 0;
        for side in [Side::Left, Side::Right, Side::Down, Side::Up] {
            grown += self.grow_toward_within(r, side, frame);
        }
        grown > 0
    }

    /// Grow one cell at a time in each direction, round-robin, until the area
    /// reaches `target` or a full round gains nothing.
    ///
    /// The area never decreases. Returns whether `target` was reached.
    pub fn grow_to_area(&self, r: &mut Rect, target: i64) -> bool {
        while r.area() < target {
            let before = r.area();
            for side in Side::ALL {
                self.grow_step(r, side);
            }
            if r.area() == before {
                break;
            }
        }
        r.area() >= target
    }

    /// Slide `r` towards `side` until the strip ahead of it is blocked.
    /// Returns the distance moved.
    ///
    /// Only the strip ahead is tested, so `r` itself should not be added to
    /// the grid.
    pub fn flow_toward(&self, r: &mut Rect, side: Side) -> i32 {
        let mut steps = 0;
        while self.can_add_rect(side.outer_strip(r)) {
            side.translate(r);
            steps += 1;
        }
        steps
    }

    /// Pull one edge of `r` inwards while the strip along that edge is
    /// blocked. Returns the number of cells given up.
    pub fn shrink_from(&self, r: &mut Rect, side: Side) -> i32 {
        let mut steps = 0;
        while !r.is_empty() && !self.can_add_rect(side.inner_strip(r)) {
            side.contract(r);
            steps += 1;
        }
        steps
    }

    /// Shrink from the top, left, right and bottom, in that order.
    pub fn shrink(&self, r: &mut Rect) {
        for side in [Side::Up, Side::Left, Side::Right, Side::Down] {
            self.shrink_from(r, side);
        }
    }

    /// Find the first free spot for a `params.seed` sized rect, scanning rows
    /// top to bottom and columns left to right, grow it towards
    /// `params.target_area` and inset it by `params.margin`.
    ///
    /// When no row fits, the height bound is extended by one row at a time,
    /// at most `params.max_extensions` times.
    ///
    /// The returned rect is not added to the grid.
    pub fn next_rect(&mut self, params: &ScanParams) -> Result<Rect, LayoutExhausted> {
        self.scan(params, || params.seed)
    }

    /// Like [`next_rect`][Self::next_rect], but every tried seed has its
    /// width and height adjusted by a random number of steps drawn from
    /// `params.jitter_min..=params.jitter_max`.
    pub fn next_rect_random<R: Rng + ?Sized>(
        &mut self,
        params: &ScanParams,
        rng: &mut R,
    ) -> Result<Rect, LayoutExhausted> {
        let step = params.step.max(1);
        let jitter = params.jitter_min..=params.jitter_max.max(params.jitter_min);
        self.scan(params, || {
            Expanse::new(
                params.seed.w + rng.random_range(jitter.clone()) * step,
                params.seed.h + rng.random_range(jitter.clone()) * step,
            )
        })
    }

    fn scan<F: FnMut() -> Expanse>(
        &mut self,
        params: &ScanParams,
        mut seed: F,
    ) -> Result<Rect, LayoutExhausted> {
        debug_assert!(params.step > 0, "scan step must be strictly positive");
        let step = params.step.max(1);
        let mut extensions = 0;
        loop {
            for y in (self.last_y..self.height).step_by(step as usize) {
                for x in (0..self.width).step_by(step as usize) {
                    let size = seed().clamp_min(Expanse::new(1, 1));
                    let mut r = Rect::from_pos_expanse(Pos::new(x, y), size);
                    if !self.can_add_rect(r) {
                        continue;
                    }
                    self.last_y = y;
                    self.grow_to_area(&mut r, params.target_area);
                    if r.w > 2 * params.margin && r.h > 2 * params.margin {
                        r = r.inset(params.margin);
                    }
                    return Ok(r);
                }
            }
            if extensions >= params.max_extensions {
                log::warn!(
                    "free-space scan gave up at height {} after {extensions} extensions",
                    self.height
                );
                return Err(LayoutExhausted { extensions });
            }
            extensions += 1;
            self.height = self.height.saturating_add(self.row_height);
        }
    }
}
