// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mosaic Layout: automatic tile layout for gallery pages.
//!
//! A page is a fixed-width, unbounded-height canvas holding rectangular
//! [`Tile`]s. Image tiles want to keep the aspect ratio of their image; text
//! tiles only need room. This crate does two things with them:
//!
//! - [`place_rect`] puts one new tile into free space, deterministically and
//!   without overlapping anything.
//! - [`optimize_layout`] re-flows a whole page. It runs many randomized
//!   trials (shuffle, place, grow into free space, fill holes) and keeps the
//!   one whose worst image distortion is lowest.
//!
//! The editor helpers around them cover the rest of a gallery editor's
//! layout needs: [`suggest_slot`] for the "new tile" spot, [`place_batch`]
//! for multi-image uploads, [`grow_tile`] for the per-tile grow handle, and
//! [`tiles_in_area`] for rubber-band selection.
//!
//! All randomness is injected through [`rand::Rng`], so a seeded generator
//! reproduces a layout exactly. Tuning lives in [`LayoutConfig`].
//!
//! For long runs, drive an [`Optimizer`] one trial at a time and stop
//! whenever the host needs the thread back.
//!
//! ## Features
//!
//! - `parallel`: `optimize_layout_par`, which runs trials on the `rayon`
//!   pool with one `rand_pcg` stream per trial.
//!
//! # Example
//!
//! ```rust
//! use mosaic_layout::{ImageDims, LayoutConfig, Rect, Tile, optimize_layout, place_rect};
//! use rand::SeedableRng;
//!
//! let config = LayoutConfig::default().with_trials(30);
//! let mut tiles = vec![
//!     Tile::image(Rect::default(), ImageDims::natural(1600, 900), 1_u32),
//!     Tile::image(Rect::default(), ImageDims::natural(1000, 1000), 2),
//! ];
//!
//! // Add a text tile into free space.
//! let rect = place_rect(config.text_expanse(), &tiles, &config).unwrap();
//! tiles.push(Tile::text(rect, 3));
//!
//! // Re-flow the page.
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
//! let layout = optimize_layout(tiles, &mut rng, &config).unwrap();
//! for (i, a) in layout.tiles.iter().enumerate() {
//!     for b in &layout.tiles[i + 1..] {
//!         assert!(!a.rect.overlaps(&b.rect));
//!     }
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod optimizer;
#[cfg(feature = "parallel")]
mod parallel;
mod placement;
mod types;

pub use mosaic_grid::{Expanse, Pos, Rect, overlaps, reading_order, snap};

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use optimizer::{
    CostModel, Layout, Optimizer, TrialReport, badness, optimize_layout, run_trial,
};
#[cfg(feature = "parallel")]
pub use parallel::optimize_layout_par;
pub use placement::{
    content_height, fit_expanse, grow_tile, image_expanse, place_batch, place_rect, suggest_slot,
    tiles_in_area, upload_expanse,
};
pub use types::{GrowDirections, ImageDims, Tile};
