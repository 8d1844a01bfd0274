// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a small gallery page, then re-flow it.
//!
//! This example shows how to:
//! - insert tiles one at a time with `place_rect`,
//! - upload a batch of images with `place_batch`,
//! - run the optimizer step by step, and on the rayon pool.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p mosaic_demos --example auto_arrange`

use mosaic_layout::{
    GrowDirections, ImageDims, LayoutConfig, Optimizer, Tile, grow_tile, optimize_layout_par,
    place_batch, place_rect, upload_expanse,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn print_page(title: &str, tiles: &[Tile<&str>]) {
    println!("{title}");
    for t in tiles {
        let r = t.rect;
        println!(
            "  {:<10} x={:>3} y={:>3} w={:>3} h={:>3}",
            t.payload, r.x, r.y, r.w, r.h
        );
    }
}

fn main() {
    env_logger::init();
    let config = LayoutConfig::default();
    let mut rng = Pcg32::seed_from_u64(2026);

    // A heading and a photo, inserted by hand.
    let mut tiles = Vec::new();
    let heading = place_rect(config.text_expanse(), &tiles, &config).unwrap();
    tiles.push(Tile::text(heading, "heading"));
    let photo = ImageDims::new(1600, 900, 4800, 2700);
    let rect = place_rect(upload_expanse(&photo, &config), &tiles, &config).unwrap();
    tiles.push(Tile::image(rect, photo, "harbour"));

    // Three more photos uploaded together.
    let upload = vec![
        (ImageDims::natural(900, 1600), "lighthouse"),
        (ImageDims::natural(1200, 1200), "gull"),
        (ImageDims::natural(3000, 1000), "pier"),
    ];
    let placed = place_batch(upload, &tiles, &mut rng, &config).unwrap();
    tiles.extend(placed);

    // Stretch the heading to the right.
    if let Some(r) = grow_tile(&tiles, 0, GrowDirections::RIGHT, &config).unwrap() {
        tiles[0].rect = r;
    }
    print_page("as edited:", &tiles);

    // Re-flow, one trial at a time.
    let mut optimizer = Optimizer::new(tiles.clone(), config.with_trials(100)).unwrap();
    while !optimizer.is_finished() {
        let report = optimizer.step(&mut rng).unwrap();
        if report.improved {
            log::info!("trial {} -> {:.3}", report.trial, report.badness);
        }
    }
    let layout = optimizer.into_best();
    print_page(&format!("re-flowed (badness {:.3}):", layout.badness), &layout.tiles);

    // Same thing on all cores.
    let layout = optimize_layout_par(tiles, 2026, &config).unwrap();
    print_page(
        &format!("re-flowed in parallel (badness {:.3}):", layout.badness),
        &layout.tiles,
    );
}
