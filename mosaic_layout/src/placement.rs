// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic placement of single tiles and editor-level helpers.
//!
//! [`place_rect`] is the entry point used when inserting a tile: it works
//! directly against the tile list with [`Rect::overlaps`] and keeps no state
//! between calls. The remaining helpers build a scratch
//! [`OccupancyGrid`] from the tile list when they need to grow or slide rects.

use alloc::vec::Vec;

use mosaic_grid::{Expanse, OccupancyGrid, Rect, Side, snap};
use rand::Rng;
use smallvec::SmallVec;

use crate::{GrowDirections, ImageDims, LayoutConfig, LayoutError, Tile};

/// Lowest bottom edge over all tiles, or zero for an empty list.
pub fn content_height<P>(tiles: &[Tile<P>]) -> i32 {
    tiles.iter().map(|t| t.rect.bottom()).max().unwrap_or(0).max(0)
}

/// Raise a requested size to at least one unit and cap its width to what
/// fits between the margins.
pub fn fit_expanse(expanse: Expanse, config: &LayoutConfig) -> Expanse {
    let e = expanse.clamp_min(Expanse::new(1, 1));
    Expanse::new(e.w.min(config.max_tile_width().max(1)), e.h)
}

/// Find a free rect of size `expanse` among `tiles`.
///
/// The canvas is scanned in bands of `row_height` starting at `y = 1`. The
/// first band runs right to left, the next left to right, and so on, so
/// successive insertions spread over both edges. At every column two rows
/// are tried: the band top and half a row below it. Columns keep the
/// configured margin plus one unit clear on the left and two on the right.
///
/// A band below all existing content always has room, so the scan ends by
/// construction. Bands in which every candidate stays blocked are skipped in
/// one jump. Sizes are passed through [`fit_expanse`] first.
///
/// # Errors
///
/// [`LayoutError::InvalidConfig`] if `config` does not validate, and
/// [`LayoutError::Exhausted`] if the scan would run past the largest
/// representable row.
///
/// # Examples
///
/// ```
/// use mosaic_layout::{Expanse, LayoutConfig, Rect, place_rect};
///
/// let config = LayoutConfig::default();
/// let r = place_rect::<()>(Expanse::new(24, 19), &[], &config).unwrap();
/// assert_eq!(r, Rect::new(100 - 24 - 2 - 5, 1, 24, 19));
/// ```
pub fn place_rect<P>(
    expanse: Expanse,
    tiles: &[Tile<P>],
    config: &LayoutConfig,
) -> Result<Rect, LayoutError> {
    config.validate()?;
    let e = fit_expanse(expanse, config);
    let left = config.margin + 1;
    let right = config.canvas_width - e.w - 2 - config.margin;
    let band = i64::from(config.row_height());
    let half = config.half_height + config.grid;
    let blocker = |r: &Rect| tiles.iter().find(|t| t.rect.overlaps(r));

    let mut y = 1_i32;
    let mut bands = 0_u32;
    loop {
        let right_to_left = bands % 2 == 0;
        // Lowest band top at which some candidate of this band may be free.
        let mut next_top = i64::MAX;
        for i in 0..=(right - left) {
            let x = if right_to_left { right - i } else { left + i };
            for offset in [0, half] {
                let Some(row) = y.checked_add(offset) else {
                    continue;
                };
                let r = Rect::new(x, row, e.w, e.h);
                match blocker(&r) {
                    None => return Ok(r),
                    Some(t) => {
                        next_top = next_top.min(i64::from(t.rect.bottom()) - i64::from(offset));
                    }
                }
            }
        }
        let skip = (next_top.saturating_sub(i64::from(y)).saturating_add(band - 1) / band).max(1);
        let next = i64::from(y).saturating_add(skip.saturating_mul(band));
        let Ok(next) = i32::try_from(next) else {
            break;
        };
        y = next;
        bands = bands.saturating_add(u32::try_from(skip).unwrap_or(u32::MAX));
    }
    log::warn!("no row fits a {}x{} tile", e.w, e.h);
    Err(mosaic_grid::LayoutExhausted { extensions: bands }.into())
}

/// Size for an image tile.
///
/// The image is scaled to `scale` base rows and snapped to the grid. Results
/// smaller than `0.6` base areas are redone at the double row height, results
/// larger than `upper_band` base areas at the half row height.
pub fn image_expanse(
    image: &ImageDims,
    scale: i32,
    upper_band: f64,
    config: &LayoutConfig,
) -> Expanse {
    let ratio = image.aspect_ratio();
    let sized = |height: i32| {
        let height = f64::from(height);
        Expanse::new(snap(ratio * height, config.grid), snap(height, config.grid))
    };
    let base = f64::from(config.default_height);
    let base_area = base * base;

    let mut e = sized(config.default_height * scale);
    let area = e.area() as f64;
    if area < base_area * 0.6 {
        e = sized(config.double_height);
    } else if area > base_area * upper_band {
        e = sized(config.half_height);
    }
    fit_expanse(e, config)
}

/// Size for a freshly uploaded image, using the upload area band.
pub fn upload_expanse(image: &ImageDims, config: &LayoutConfig) -> Expanse {
    image_expanse(image, 1, config.upload_band, config)
}

fn scratch_grid<I>(rects: I, config: &LayoutConfig) -> OccupancyGrid
where
    I: IntoIterator<Item = Rect>,
    I::IntoIter: Clone,
{
    let mut grid = OccupancyGrid::new(config.canvas_width, config.row_height());
    grid.reset(rects);
    grid
}

/// The slot an editor offers for the next tile: the first free spot of the
/// seed size, grown towards the target area.
pub fn suggest_slot<P>(tiles: &[Tile<P>], config: &LayoutConfig) -> Result<Rect, LayoutError> {
    config.validate()?;
    let mut grid = scratch_grid(tiles.iter().map(|t| t.rect), config);
    Ok(grid.next_rect(&config.scan_params())?)
}

fn fit_into(image: &ImageDims, slot: Expanse, grid: i32) -> Expanse {
    let ratio = image.aspect_ratio();
    let slot_ratio = f64::from(slot.w) / f64::from(slot.h.max(1));
    let e = if ratio >= slot_ratio {
        Expanse::new(slot.w, snap(f64::from(slot.w) / ratio, grid))
    } else {
        Expanse::new(snap(f64::from(slot.h) * ratio, grid), slot.h)
    };
    Expanse::new(e.w.min(slot.w), e.h.min(slot.h)).clamp_min(Expanse::new(1, 1))
}

fn rect_ratio(r: &Rect) -> f64 {
    r.aspect_ratio().unwrap_or(0.0)
}

/// Place a batch of uploaded images into free slots.
///
/// The first image goes into [`suggest_slot`]; every following one into a
/// randomly sized slot from the same scan. Each image is fit into its slot
/// keeping its aspect ratio and then slid up and left against existing
/// content.
///
/// When more than one image is placed, every rect gives up one grid unit on
/// the right and bottom as a gutter, and rects are re-paired with images by
/// aspect ratio so the widest image lands in the widest rect. The returned
/// tiles are in that pairing order and are not yet part of `tiles`.
pub fn place_batch<P, R: Rng + ?Sized>(
    images: Vec<(ImageDims, P)>,
    tiles: &[Tile<P>],
    rng: &mut R,
    config: &LayoutConfig,
) -> Result<Vec<Tile<P>>, LayoutError> {
    config.validate()?;
    let params = config.scan_params();
    let mut grid = scratch_grid(tiles.iter().map(|t| t.rect), config);
    let count = images.len();
    let mut placed: Vec<Tile<P>> = Vec::with_capacity(count);
    if count == 0 {
        return Ok(placed);
    }

    let mut slot = grid.next_rect(&params)?;
    for (i, (image, payload)) in images.into_iter().enumerate() {
        let mut rect = Rect::from_pos_expanse(slot.pos(), fit_into(&image, slot.expanse(), config.grid));
        grid.flow_toward(&mut rect, Side::Up);
        grid.flow_toward(&mut rect, Side::Left);
        grid.add_rect(rect);
        placed.push(Tile::image(rect, image, payload));
        if i + 1 < count {
            slot = grid.next_rect_random(&params, rng)?;
        }
    }

    if count > 1 {
        for t in &mut placed {
            if t.rect.w > config.grid {
                t.rect.w -= config.grid;
            }
            if t.rect.h > config.grid {
                t.rect.h -= config.grid;
            }
        }
        let mut rects: Vec<Rect> = placed.iter().map(|t| t.rect).collect();
        rects.sort_by(|a, b| rect_ratio(a).total_cmp(&rect_ratio(b)));
        placed.sort_by(|a, b| {
            let ra = a.image.map_or(0.0, |i| i.aspect_ratio());
            let rb = b.image.map_or(0.0, |i| i.aspect_ratio());
            ra.total_cmp(&rb)
        });
        for (t, r) in placed.iter_mut().zip(rects) {
            t.rect = r;
        }
    }
    Ok(placed)
}

/// Grow the tile at `index` from the requested edges until it touches
/// another tile or the canvas limits.
///
/// Horizontally the limits are the canvas edges. Vertically the tile stays
/// below `y = 0` and above one unit past the lowest other tile. Returns the
/// grown rect, or `None` if `index` is out of range.
pub fn grow_tile<P>(
    tiles: &[Tile<P>],
    index: usize,
    directions: GrowDirections,
    config: &LayoutConfig,
) -> Result<Option<Rect>, LayoutError> {
    config.validate()?;
    let Some(tile) = tiles.get(index) else {
        return Ok(None);
    };
    let mut rect = tile.rect;
    let others = || {
        tiles
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != index)
            .map(|(_, t)| t.rect)
    };
    let lowest = others().map(|r| r.bottom()).max();
    let limit = lowest.map_or(rect.bottom(), |b| (b + 1).max(rect.bottom()));
    let frame = Rect::new(0, 0, config.canvas_width, limit);

    let mut grid = scratch_grid(others(), config);
    if grid.height() < limit {
        grid.set_height(limit);
    }
    for (flag, side) in [
        (GrowDirections::LEFT, Side::Left),
        (GrowDirections::RIGHT, Side::Right),
        (GrowDirections::UP, Side::Up),
        (GrowDirections::DOWN, Side::Down),
    ] {
        if directions.contains(flag) {
            grid.grow_toward_within(&mut rect, side, &frame);
        }
    }
    Ok(Some(rect))
}

/// Indices of the tiles whose rect overlaps `area`, in list order.
pub fn tiles_in_area<P>(tiles: &[Tile<P>], area: &Rect) -> SmallVec<[usize; 8]> {
    tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.rect.overlaps(area))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn image_tile(rect: Rect) -> Tile<()> {
        Tile::image(rect, ImageDims::natural(1600, 900), ())
    }

    fn assert_disjoint<P>(tiles: &[Tile<P>]) {
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                assert!(!a.rect.overlaps(&b.rect), "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn first_placement_on_empty_canvas() {
        let config = LayoutConfig::default();
        let r = place_rect::<()>(Expanse::new(24, 19), &[], &config).unwrap();
        assert_eq!(r, Rect::new(69, 1, 24, 19));
    }

    #[test]
    fn placement_is_deterministic() {
        let config = LayoutConfig::default();
        let tiles = vec![image_tile(Rect::new(69, 1, 24, 19))];
        let a = place_rect(Expanse::new(24, 19), &tiles, &config).unwrap();
        let b = place_rect(Expanse::new(24, 19), &tiles, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(45, 1, 24, 19));
    }

    #[test]
    fn placement_never_overlaps() {
        let config = LayoutConfig::default();
        let mut tiles: Vec<Tile<()>> = Vec::new();
        let sizes = [
            Expanse::new(24, 19),
            Expanse::new(34, 19),
            Expanse::new(13, 19),
            Expanse::new(87, 9),
            Expanse::new(40, 39),
            Expanse::new(24, 19),
            Expanse::new(10, 30),
        ];
        for e in sizes {
            let r = place_rect(e, &tiles, &config).unwrap();
            assert_eq!(r.expanse(), e);
            assert!(r.x >= config.margin + 1);
            assert!(r.right() <= config.canvas_width - 2 - config.margin);
            assert!(tiles.iter().all(|t| !t.rect.overlaps(&r)));
            tiles.push(image_tile(r));
        }
        assert_disjoint(&tiles);
    }

    #[test]
    fn full_first_band_snakes_back() {
        let config = LayoutConfig::default();
        // Fill the whole first band.
        let tiles = vec![image_tile(Rect::new(0, 0, 100, 30))];
        let r = place_rect(Expanse::new(24, 19), &tiles, &config).unwrap();
        // The second band starts at y = 21 and scans left to right; its
        // half-row offset (y = 31) is the first free candidate.
        assert_eq!(r, Rect::new(6, 31, 24, 19));
    }

    #[test]
    fn half_row_offset_is_tried() {
        let config = LayoutConfig::default();
        // Block only the top of the rightmost column range.
        let tiles = vec![image_tile(Rect::new(0, 0, 100, 5))];
        let r = place_rect(Expanse::new(24, 19), &tiles, &config).unwrap();
        assert_eq!(r, Rect::new(69, 11, 24, 19));
    }

    #[test]
    fn tall_content_is_skipped_in_one_jump() {
        let config = LayoutConfig::default();
        let tiles = vec![image_tile(Rect::new(0, 0, 100, 100_000))];
        let r = place_rect(Expanse::new(24, 19), &tiles, &config).unwrap();
        // Band 5000 starts at y = 100_001 and, being even, scans right to left.
        assert_eq!(r, Rect::new(69, 100_001, 24, 19));
    }

    #[test]
    fn rows_past_i32_max_are_exhausted() {
        let config = LayoutConfig::default();
        let tiles = vec![image_tile(Rect::new(0, 0, 100, i32::MAX - 5))];
        assert!(matches!(
            place_rect(Expanse::new(24, 19), &tiles, &config),
            Err(LayoutError::Exhausted(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = LayoutConfig {
            default_height: 0,
            grid: 0,
            ..LayoutConfig::default()
        };
        let tiles = vec![Tile::text(Rect::new(0, 0, 100, 30), ())];
        let invalid = |r: Result<_, LayoutError>| matches!(r, Err(LayoutError::InvalidConfig(_)));
        assert!(invalid(place_rect(Expanse::new(24, 19), &tiles, &config).map(|_| ())));
        assert!(invalid(suggest_slot(&tiles, &config).map(|_| ())));
        assert!(invalid(grow_tile(&tiles, 0, GrowDirections::all(), &config).map(|_| ())));
        let mut rng = Pcg32::seed_from_u64(1);
        let batch = place_batch(vec![(ImageDims::natural(4, 3), ())], &tiles, &mut rng, &config);
        assert!(invalid(batch.map(|_| ())));
    }

    #[test]
    fn degenerate_expanse_is_clamped() {
        let config = LayoutConfig::default();
        let r = place_rect::<()>(Expanse::new(0, -5), &[], &config).unwrap();
        assert_eq!(r.expanse(), Expanse::new(1, 1));
        assert!(!r.is_empty());

        let wide = place_rect::<()>(Expanse::new(500, 10), &[], &config).unwrap();
        assert_eq!(wide, Rect::new(6, 1, 87, 10));
    }

    #[test]
    fn image_expanse_bands() {
        let config = LayoutConfig::default();
        let landscape = ImageDims::new(800, 450, 1600, 900);
        assert_eq!(
            image_expanse(&landscape, 1, config.crowded_band, &config),
            Expanse::new(34, 19)
        );
        // Twice the base height is above the crowded band: half height.
        assert_eq!(
            image_expanse(&landscape, 2, config.crowded_band, &config),
            Expanse::new(16, 9)
        );
        // Uploads use the tighter band: 34x19 is still below 2 base areas.
        assert_eq!(upload_expanse(&landscape, &config), Expanse::new(34, 19));

        // A tall sliver is too small at base height: double height.
        let sliver = ImageDims::natural(100, 1000);
        assert_eq!(
            image_expanse(&sliver, 1, config.crowded_band, &config),
            Expanse::new(4, 39)
        );

        // A panorama is capped to the usable width.
        let panorama = ImageDims::natural(10000, 500);
        let e = image_expanse(&panorama, 1, config.crowded_band, &config);
        assert_eq!(e, Expanse::new(87, 9));
    }

    #[test]
    fn suggest_slot_uses_free_space() {
        let config = LayoutConfig::default();
        let tiles = vec![image_tile(Rect::new(0, 0, 100, 20))];
        let slot = suggest_slot(&tiles, &config).unwrap();
        assert_eq!(slot, Rect::new(1, 21, 11, 11));
        let empty: [Tile<()>; 0] = [];
        assert_eq!(suggest_slot(&empty, &config).unwrap(), Rect::new(1, 1, 11, 11));
    }

    #[test]
    fn batch_placement_is_disjoint_and_paired_by_ratio() {
        let config = LayoutConfig::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let existing = vec![Tile::text(Rect::new(0, 0, 40, 20), 0_u32)];
        let images = vec![
            (ImageDims::natural(1600, 900), 1_u32),
            (ImageDims::natural(900, 1600), 2),
            (ImageDims::natural(1000, 1000), 3),
        ];
        let placed = place_batch(images, &existing, &mut rng, &config).unwrap();
        assert_eq!(placed.len(), 3);

        let mut all = existing.clone();
        all.extend(placed.iter().cloned());
        assert_disjoint(&all);

        // Pairing order follows image aspect ratio.
        let payloads: Vec<u32> = placed.iter().map(|t| t.payload).collect();
        assert_eq!(payloads, vec![2, 3, 1]);
        let ratios: Vec<f64> = placed.iter().map(|t| rect_ratio(&t.rect)).collect();
        assert!(ratios.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn single_image_batch_fills_suggested_slot() {
        let config = LayoutConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let placed = place_batch(
            vec![(ImageDims::natural(1000, 1000), ())],
            &[],
            &mut rng,
            &config,
        )
        .unwrap();
        // The 11x11 slot at (1, 1) slides into the corner.
        assert_eq!(placed[0].rect, Rect::new(0, 0, 11, 11));
        assert!(place_batch::<(), _>(vec![], &[], &mut rng, &config).unwrap().is_empty());
    }

    #[test]
    fn grow_tile_stops_at_neighbours() {
        let config = LayoutConfig::default();
        let tiles = vec![
            image_tile(Rect::new(10, 10, 10, 10)),
            image_tile(Rect::new(50, 0, 10, 40)),
        ];
        let grow = |index, directions| grow_tile(&tiles, index, directions, &config).unwrap();
        assert_eq!(grow(0, GrowDirections::RIGHT), Some(Rect::new(10, 10, 40, 10)));
        assert_eq!(
            grow(0, GrowDirections::LEFT | GrowDirections::UP),
            Some(Rect::new(0, 0, 20, 20))
        );
        assert_eq!(grow(0, GrowDirections::DOWN), Some(Rect::new(10, 10, 10, 31)));
        assert_eq!(grow(1, GrowDirections::all()), Some(Rect::new(20, 0, 80, 40)));
        assert_eq!(grow(5, GrowDirections::all()), None);
    }

    #[test]
    fn area_selection() {
        let tiles = vec![
            image_tile(Rect::new(0, 0, 10, 10)),
            image_tile(Rect::new(20, 0, 10, 10)),
            image_tile(Rect::new(0, 20, 10, 10)),
        ];
        let hit = tiles_in_area(&tiles, &Rect::new(5, 5, 20, 10));
        assert_eq!(hit.as_slice(), &[0, 1]);
        assert!(tiles_in_area(&tiles, &Rect::new(40, 40, 5, 5)).is_empty());
    }

    #[test]
    fn content_height_of_tiles() {
        let empty: [Tile<()>; 0] = [];
        assert_eq!(content_height(&empty), 0);
        let tiles = vec![image_tile(Rect::new(0, 5, 10, 10)), image_tile(Rect::new(0, 0, 10, 30))];
        assert_eq!(content_height(&tiles), 30);
    }
}
