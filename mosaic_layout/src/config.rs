// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout tuning.

use mosaic_grid::{Expanse, Rect, ScanParams};

use crate::LayoutError;
use crate::optimizer::CostModel;

/// Tuning for placement and optimization.
///
/// The defaults reproduce the reference gallery editor: a 100-unit wide
/// canvas (one unit is one percent of the rendered width), 19-unit rows and
/// a 5-unit margin on both sides.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Canvas width in units.
    pub canvas_width: i32,
    /// Snap step for computed sizes and the unit of scan movement.
    pub grid: i32,
    /// Horizontal margin kept free on both canvas edges.
    pub margin: i32,
    /// Width of a new text tile.
    pub default_width: i32,
    /// Base row height; also the height of a new text tile.
    pub default_height: i32,
    /// Height used for images that would otherwise be too large.
    pub half_height: i32,
    /// Height used for images that would otherwise be too small.
    pub double_height: i32,
    /// Seed size for free-slot scans.
    pub min_seed: Expanse,
    /// Smallest random seed adjustment in grid steps.
    pub seed_jitter_min: i32,
    /// Largest random seed adjustment in grid steps.
    pub seed_jitter_max: i32,
    /// Area a free slot is grown towards.
    pub target_area: i64,
    /// Height extensions a free-slot scan may make before giving up.
    pub max_extensions: u32,
    /// Number of optimizer trials.
    pub trials: u32,
    /// Chance that an image starts from twice the base height in a trial.
    pub double_chance: f64,
    /// Upper area band, in multiples of the base area, used by the optimizer.
    pub crowded_band: f64,
    /// Upper area band, in multiples of the base area, used for new uploads.
    pub upload_band: f64,
    /// Gap-fill attempts per trial.
    pub gap_fill_attempts: u32,
    /// Edge length of the gap-fill probe.
    pub probe_size: i32,
    /// Badness function used to rank trials.
    pub cost_model: CostModel,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 100,
            grid: 1,
            margin: 5,
            default_width: 24,
            default_height: 19,
            half_height: 9,
            double_height: 39,
            min_seed: Expanse::new(10, 10),
            seed_jitter_min: -2,
            seed_jitter_max: 20,
            target_area: 150,
            max_extensions: 64,
            trials: 200,
            double_chance: 0.2,
            crowded_band: 5.0,
            upload_band: 2.0,
            gap_fill_attempts: 100,
            probe_size: 3,
            cost_model: CostModel::AreaScaled,
        }
    }
}

impl LayoutConfig {
    /// Set the number of optimizer trials.
    #[must_use]
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Set the badness function.
    #[must_use]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Set the canvas width and side margin.
    #[must_use]
    pub fn with_canvas(mut self, canvas_width: i32, margin: i32) -> Self {
        self.canvas_width = canvas_width;
        self.margin = margin;
        self
    }

    /// Height of one placement band and of one grid extension.
    #[inline]
    pub const fn row_height(&self) -> i32 {
        self.default_height + self.grid
    }

    /// Widest tile that fits between the margins.
    #[inline]
    pub const fn max_tile_width(&self) -> i32 {
        self.canvas_width - 2 * self.margin - 3
    }

    /// Size of a new text tile.
    #[inline]
    pub const fn text_expanse(&self) -> Expanse {
        Expanse::new(self.default_width, self.default_height)
    }

    /// The region tiles may grow into during optimization, for content that
    /// ends at `content_bottom`.
    #[inline]
    pub const fn frame(&self, content_bottom: i32) -> Rect {
        Rect::new(
            self.margin + 1,
            1,
            self.max_tile_width(),
            content_bottom - 1,
        )
    }

    /// Parameters for [`OccupancyGrid`][mosaic_grid::OccupancyGrid] slot scans.
    pub fn scan_params(&self) -> ScanParams {
        ScanParams {
            seed: self.min_seed,
            jitter_min: self.seed_jitter_min,
            jitter_max: self.seed_jitter_max,
            step: self.grid,
            target_area: self.target_area,
            margin: self.grid,
            max_extensions: self.max_extensions,
        }
    }

    /// Check that this config can produce layouts.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid <= 0 {
            return Err(LayoutError::InvalidConfig("grid must be positive"));
        }
        if self.default_height <= 0 || self.half_height <= 0 || self.double_height <= 0 {
            return Err(LayoutError::InvalidConfig("row heights must be positive"));
        }
        if self.margin < 0 {
            return Err(LayoutError::InvalidConfig("margin must not be negative"));
        }
        if self.max_tile_width() < 1 {
            return Err(LayoutError::InvalidConfig(
                "canvas is too narrow for its margins",
            ));
        }
        if self.min_seed.w <= 0 || self.min_seed.h <= 0 {
            return Err(LayoutError::InvalidConfig("seed size must be positive"));
        }
        if self.seed_jitter_min > self.seed_jitter_max {
            return Err(LayoutError::InvalidConfig("seed jitter range is inverted"));
        }
        if !(0.0..=1.0).contains(&self.double_chance) {
            return Err(LayoutError::InvalidConfig(
                "double_chance must lie in 0..=1",
            ));
        }
        if self.trials == 0 {
            return Err(LayoutError::InvalidConfig("at least one trial is required"));
        }
        if self.probe_size <= 0 {
            return Err(LayoutError::InvalidConfig("probe size must be positive"));
        }
        Ok(())
    }
}
