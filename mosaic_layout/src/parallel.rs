// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trials on the rayon thread pool.

use alloc::vec::Vec;

use rand_pcg::Pcg32;
use rayon::prelude::*;

use crate::optimizer::{Layout, run_trial};
use crate::{LayoutConfig, LayoutError, Tile};

/// Like [`optimize_layout`][crate::optimize_layout], but runs the trials in
/// parallel.
///
/// Trial `i` draws from `Pcg32::new(seed, i)`, so the result only depends on
/// `seed`, never on scheduling. Ties go to the lowest trial index.
pub fn optimize_layout_par<P: Clone + Send + Sync>(
    tiles: Vec<Tile<P>>,
    seed: u64,
    config: &LayoutConfig,
) -> Result<Layout<P>, LayoutError> {
    config.validate()?;
    let best = (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = Pcg32::new(seed, u64::from(trial));
            run_trial(&tiles, &mut rng, config).map(|layout| (trial, layout))
        })
        .try_reduce_with(|a, b| {
            let keep_a = a.1.badness < b.1.badness || (a.1.badness == b.1.badness && a.0 < b.0);
            Ok(if keep_a { a } else { b })
        });
    match best {
        Some(result) => {
            let (trial, layout) = result?;
            log::debug!(
                "{} parallel trials, best badness {} from trial {trial}",
                config.trials,
                layout.badness
            );
            Ok(layout)
        }
        None => Err(LayoutError::InvalidConfig("at least one trial is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageDims, Rect};
    use alloc::vec;

    fn gallery() -> Vec<Tile<u8>> {
        vec![
            Tile::image(Rect::default(), ImageDims::natural(1600, 900), 0),
            Tile::image(Rect::default(), ImageDims::natural(900, 1600), 1),
            Tile::image(Rect::default(), ImageDims::natural(1000, 1000), 2),
            Tile::text(Rect::new(6, 1, 24, 19), 3),
        ]
    }

    #[test]
    fn deterministic_for_a_seed() {
        let config = LayoutConfig::default().with_trials(16);
        let a = optimize_layout_par(gallery(), 99, &config).unwrap();
        let b = optimize_layout_par(gallery(), 99, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn matches_the_best_sequential_trial() {
        let config = LayoutConfig::default().with_trials(8);
        let tiles = gallery();
        let best = (0..8_u32)
            .map(|i| run_trial(&tiles, &mut Pcg32::new(4, u64::from(i)), &config).unwrap())
            .fold(None::<Layout<u8>>, |best, l| match best {
                Some(b) if b.badness <= l.badness => Some(b),
                _ => Some(l),
            })
            .unwrap();
        assert_eq!(optimize_layout_par(tiles, 4, &config).unwrap(), best);
    }
}
