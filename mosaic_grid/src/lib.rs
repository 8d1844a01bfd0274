// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Grid: canvas geometry and a sparse occupancy grid for tile layout.
//!
//! Mosaic Grid is the low-level half of the Mosaic tile-layout engine.
//!
//! - [`Rect`], [`Pos`] and [`Expanse`] describe tiles on a fixed-width,
//!   unbounded-height canvas in whole canvas units.
//! - [`Rect::overlaps`] is the single overlap test every placement decision
//!   is built on: two rects overlap only if they share non-zero area.
//! - [`OccupancyGrid`] tracks which unit cells are covered, answers point and
//!   rect queries, and grows, slides ([`OccupancyGrid::flow_toward`]) or
//!   shrinks rects against what is already there.
//! - [`OccupancyGrid::next_rect`] scans for the first free slot of a seed
//!   size, which editors use to offer a spot for the next tile.
//!
//! The grid is a scratch structure: rebuild it from the current rects with
//! [`OccupancyGrid::reset`] whenever the tiles change.
//!
//! ## Features
//!
//! - `kurbo`: conversions between [`Rect`] and [`kurbo::Rect`] for renderers
//!   built on Kurbo. Pulls in `kurbo` with its `libm` feature so the crate
//!   stays `no_std`.
//!
//! # Example
//!
//! ```rust
//! use mosaic_grid::{OccupancyGrid, Rect, ScanParams, Side};
//!
//! // A 100-unit wide canvas with one tile in the top-left corner.
//! let mut grid = OccupancyGrid::new(100, 20);
//! grid.reset([Rect::new(0, 0, 40, 20)]);
//!
//! // Slide a new rect up and to the left until it touches existing content.
//! let mut r = Rect::new(70, 25, 10, 10);
//! grid.flow_toward(&mut r, Side::Up);
//! grid.flow_toward(&mut r, Side::Left);
//! assert_eq!(r, Rect::new(40, 0, 10, 10));
//!
//! // Ask for a fresh slot.
//! let slot = grid.next_rect(&ScanParams::default()).unwrap();
//! assert!(grid.can_add_rect(slot));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod occupancy;
mod types;

pub use occupancy::{LayoutExhausted, OccupancyGrid, ScanParams, Side};
pub use types::{Expanse, Pos, Rect, overlaps, reading_order, snap};
