// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized multi-restart layout optimization.
//!
//! A trial shuffles the tiles, places every image tile with
//! [`place_rect`][crate::place_rect], relaxes the result by growing tiles into
//! free space, fills leftover holes, and scores the outcome with a
//! [`CostModel`]. [`Optimizer`] runs trials one at a time and keeps the best.
//!
//! Tiles without an image are obstacles: they keep their rect through every
//! pass and carry no cost.

use alloc::vec::Vec;

use mosaic_grid::{OccupancyGrid, Rect};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::placement::{content_height, image_expanse, place_rect};
use crate::{LayoutConfig, LayoutError, Tile};

/// How a layout is scored. Lower is better.
///
/// Both models take the worst image tile. Its aspect-ratio error is
/// `d = (rect_ratio - natural_ratio) / natural_ratio`.
///
/// A score near zero needs every image rect to keep its ratio after the
/// expand pass, which stretches tiles to the frame edges. Ratios whose base
/// sizes tile the usable width with little slack (4:3 on the default canvas)
/// get there; others, such as 1:1 or 16:9, keep one stretched tile per row
/// and stay in the low hundreds under [`CostModel::AreaScaled`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CostModel {
    /// `max(d² · area)`: distortion counts more on large tiles.
    #[default]
    AreaScaled,
    /// `max(d² + area / 1000)`: distortion plus a mild penalty on size.
    AreaOffset,
}

impl CostModel {
    /// Penalty for one image tile placed at `rect`.
    ///
    /// An empty rect shows nothing and scores infinitely bad.
    pub fn penalty(self, rect: &Rect, natural_ratio: f64) -> f64 {
        let Some(ratio) = rect.aspect_ratio() else {
            return f64::INFINITY;
        };
        let d = (ratio - natural_ratio) / natural_ratio;
        let area = rect.area() as f64;
        match self {
            Self::AreaScaled => d * d * area,
            Self::AreaOffset => d * d + area / 1000.0,
        }
    }
}

/// Score `tiles` with `model`. Layouts without image tiles score zero.
pub fn badness<P>(tiles: &[Tile<P>], model: CostModel) -> f64 {
    tiles
        .iter()
        .filter_map(|t| t.image.map(|i| model.penalty(&t.rect, i.aspect_ratio())))
        .fold(0.0, f64::max)
}

/// A candidate layout and its score.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout<P = ()> {
    /// The tiles, in trial order.
    pub tiles: Vec<Tile<P>>,
    /// The layout's badness.
    pub badness: f64,
}

/// Outcome of one [`Optimizer::step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrialReport {
    /// Zero-based index of the trial.
    pub trial: u32,
    /// Badness of this trial's layout.
    pub badness: f64,
    /// Whether this trial became the new best.
    pub improved: bool,
}

// Grow every image tile into free space, in list order, without leaving the
// canvas frame.
fn expand_all<P>(tiles: &mut [Tile<P>], grid: &mut OccupancyGrid, config: &LayoutConfig) {
    let frame = config.frame(content_height(tiles));
    for t in tiles.iter_mut().filter(|t| t.image.is_some()) {
        grid.remove_rect(t.rect);
        grid.grow_within(&mut t.rect, &frame);
        grid.add_rect(t.rect);
    }
}

// First free probe inside the frame, scanning columns left to right and each
// column top to bottom.
fn find_gap(grid: &OccupancyGrid, frame: &Rect, size: i32) -> Option<Rect> {
    for x in frame.x..=frame.right() - size {
        for y in frame.y..=frame.bottom() - size {
            let probe = Rect::new(x, y, size, size);
            if grid.can_add_rect(probe) {
                return Some(probe);
            }
        }
    }
    None
}

// Move image tiles, in list order, into holes left after expansion. Tiles
// without an image never receive a gap; the next image tile in trial order
// does.
fn fill_gaps<P>(tiles: &mut [Tile<P>], grid: &mut OccupancyGrid, config: &LayoutConfig) {
    let movable: Vec<usize> = tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.image.is_some())
        .map(|(i, _)| i)
        .collect();
    for &index in movable.iter().take(config.gap_fill_attempts as usize) {
        let frame = config.frame(content_height(tiles));
        let Some(mut gap) = find_gap(grid, &frame, config.probe_size) else {
            break;
        };
        grid.grow_within(&mut gap, &frame);
        grid.remove_rect(tiles[index].rect);
        tiles[index].rect = gap;
        grid.add_rect(gap);
        expand_all(tiles, grid, config);
    }
}

/// Run a single trial on a copy of `tiles`.
///
/// Every draw (the shuffle and the per-image size choice) comes from `rng`,
/// so a seeded source reproduces the trial exactly.
///
/// Tiles without an image keep their rect: placement, expansion and gap
/// filling treat them as obstacles, and a free gap is handed to the next
/// image tile in trial order rather than to whatever tile comes next.
pub fn run_trial<P: Clone, R: Rng + ?Sized>(
    tiles: &[Tile<P>],
    rng: &mut R,
    config: &LayoutConfig,
) -> Result<Layout<P>, LayoutError> {
    config.validate()?;
    let mut trial: Vec<Tile<P>> = tiles.to_vec();
    trial.shuffle(rng);

    // Unplaced images hold an empty rect, which never overlaps anything.
    for t in trial.iter_mut().filter(|t| t.image.is_some()) {
        t.rect = Rect::default();
    }
    for i in 0..trial.len() {
        let Some(image) = trial[i].image else {
            continue;
        };
        let scale = if rng.random_bool(config.double_chance) { 2 } else { 1 };
        let expanse = image_expanse(&image, scale, config.crowded_band, config);
        trial[i].rect = place_rect(expanse, &trial, config)?;
    }

    let mut grid = OccupancyGrid::new(config.canvas_width, config.row_height());
    grid.reset(trial.iter().map(|t| t.rect));
    expand_all(&mut trial, &mut grid, config);
    fill_gaps(&mut trial, &mut grid, config);

    let badness = badness(&trial, config.cost_model);
    Ok(Layout {
        tiles: trial,
        badness,
    })
}

/// Drives trials one at a time and keeps the lowest-badness layout.
///
/// Hosts that need to stay responsive can call [`step`][Self::step] from an
/// idle callback and stop whenever they like; a trial is never left half
/// done.
pub struct Optimizer<P = ()> {
    tiles: Vec<Tile<P>>,
    config: LayoutConfig,
    best: Option<Layout<P>>,
    trials_run: u32,
}

impl<P> core::fmt::Debug for Optimizer<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Optimizer")
            .field("tiles", &self.tiles.len())
            .field("trials_run", &self.trials_run)
            .field("best_badness", &self.best_badness())
            .finish_non_exhaustive()
    }
}

impl<P> Optimizer<P> {
    /// Create an optimizer for `tiles`.
    pub fn new(tiles: Vec<Tile<P>>, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            tiles,
            config,
            best: None,
            trials_run: 0,
        })
    }

    /// The config trials run with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of completed trials.
    pub fn trials_run(&self) -> u32 {
        self.trials_run
    }

    /// Whether `config.trials` trials have completed.
    pub fn is_finished(&self) -> bool {
        self.trials_run >= self.config.trials
    }

    /// The best layout so far, if any trial has run.
    pub fn best(&self) -> Option<&Layout<P>> {
        self.best.as_ref()
    }

    /// Badness of the best layout so far, or infinity before the first trial.
    pub fn best_badness(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |l| l.badness)
    }

    /// The best layout found.
    ///
    /// If no trial finished with a finite score, the input tiles come back
    /// unchanged with their own score.
    pub fn into_best(self) -> Layout<P> {
        match self.best {
            Some(best) => best,
            None => {
                let badness = badness(&self.tiles, self.config.cost_model);
                Layout {
                    tiles: self.tiles,
                    badness,
                }
            }
        }
    }
}

impl<P: Clone> Optimizer<P> {
    /// Run one trial and keep it if it beats the best so far.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TrialReport, LayoutError> {
        let layout = run_trial(&self.tiles, rng, &self.config)?;
        let trial = self.trials_run;
        self.trials_run += 1;
        let badness = layout.badness;
        let improved = badness < self.best_badness();
        log::trace!("trial {trial}: badness {badness}");
        if improved {
            log::debug!("trial {trial} improved best badness to {badness}");
            self.best = Some(layout);
        }
        Ok(TrialReport {
            trial,
            badness,
            improved,
        })
    }

    /// Run the remaining trials.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), LayoutError> {
        while !self.is_finished() {
            self.step(rng)?;
        }
        log::debug!(
            "{} trials over {} tiles, best badness {}",
            self.trials_run,
            self.tiles.len(),
            self.best_badness()
        );
        Ok(())
    }
}

/// Run `config.trials` trials on `tiles` and return the best layout.
///
/// # Examples
///
/// ```
/// use mosaic_layout::{ImageDims, LayoutConfig, Rect, Tile, optimize_layout};
/// use rand::SeedableRng;
///
/// let tiles: Vec<Tile<&str>> = vec![
///     Tile::image(Rect::default(), ImageDims::natural(1600, 900), "beach"),
///     Tile::image(Rect::default(), ImageDims::natural(900, 1600), "tower"),
///     Tile::text(Rect::new(6, 60, 40, 10), "caption"),
/// ];
/// let config = LayoutConfig::default().with_trials(20);
/// let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
/// let layout = optimize_layout(tiles, &mut rng, &config).unwrap();
///
/// assert_eq!(layout.tiles.len(), 3);
/// assert!(layout.badness.is_finite());
/// ```
pub fn optimize_layout<P: Clone, R: Rng + ?Sized>(
    tiles: Vec<Tile<P>>,
    rng: &mut R,
    config: &LayoutConfig,
) -> Result<Layout<P>, LayoutError> {
    let mut optimizer = Optimizer::new(tiles, *config)?;
    optimizer.run(rng)?;
    Ok(optimizer.into_best())
}
