// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by placement and optimization.

use mosaic_grid::LayoutExhausted;

/// Why a layout operation could not produce a result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A scan for free space hit its bound without finding room.
    #[error(transparent)]
    Exhausted(#[from] LayoutExhausted),
    /// The [`LayoutConfig`][crate::LayoutConfig] cannot produce a valid layout.
    #[error("invalid layout config: {0}")]
    InvalidConfig(&'static str),
}
