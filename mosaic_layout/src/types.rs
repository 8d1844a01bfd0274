// Copyright 2026 the Mosaic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiles and their image metadata.

use mosaic_grid::Rect;

/// Pixel dimensions of a tile's image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageDims {
    /// Width of the stored (possibly downscaled) image.
    pub w: u32,
    /// Height of the stored (possibly downscaled) image.
    pub h: u32,
    /// Width of the original upload.
    pub natural_w: u32,
    /// Height of the original upload.
    pub natural_h: u32,
}

impl ImageDims {
    /// Create image dimensions from the stored and the original size.
    #[inline]
    pub const fn new(w: u32, h: u32, natural_w: u32, natural_h: u32) -> Self {
        Self {
            w,
            h,
            natural_w,
            natural_h,
        }
    }

    /// Image dimensions for an image stored at its original size.
    #[inline]
    pub const fn natural(w: u32, h: u32) -> Self {
        Self::new(w, h, w, h)
    }

    /// The aspect ratio a placed rect should approximate.
    ///
    /// Zero dimensions are read as one pixel so the ratio stays finite.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.natural_w.max(1)) / f64::from(self.natural_h.max(1))
    }
}

/// A positioned content unit on a page.
///
/// `P` is host data carried through layout untouched (for example an image
/// URL or a text block id).
#[derive(Clone, Debug, PartialEq)]
pub struct Tile<P = ()> {
    /// Where the tile sits on the canvas.
    pub rect: Rect,
    /// The tile's image, if it shows one. Tiles without an image occupy
    /// space but carry no aspect-ratio cost.
    pub image: Option<ImageDims>,
    /// Whether the tile holds text.
    pub is_text: bool,
    /// Host data.
    pub payload: P,
}

impl<P> Tile<P> {
    /// An image tile.
    #[inline]
    pub const fn image(rect: Rect, image: ImageDims, payload: P) -> Self {
        Self {
            rect,
            image: Some(image),
            is_text: false,
            payload,
        }
    }

    /// A text tile.
    #[inline]
    pub const fn text(rect: Rect, payload: P) -> Self {
        Self {
            rect,
            image: None,
            is_text: true,
            payload,
        }
    }

    /// This tile moved to `rect`.
    #[inline]
    #[must_use]
    pub fn with_rect(self, rect: Rect) -> Self {
        Self { rect, ..self }
    }
}

bitflags::bitflags! {
    /// Edges a tile may grow from in [`grow_tile`][crate::grow_tile].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct GrowDirections: u8 {
        /// Grow the left edge.
        const LEFT  = 0b0000_0001;
        /// Grow the right edge.
        const RIGHT = 0b0000_0010;
        /// Grow the top edge.
        const UP    = 0b0000_0100;
        /// Grow the bottom edge.
        const DOWN  = 0b0000_1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_uses_natural_size() {
        let image = ImageDims::new(800, 450, 1600, 900);
        assert!((image.aspect_ratio() - 16.0 / 9.0).abs() < 1e-12);
        let broken = ImageDims::new(0, 0, 0, 0);
        assert!((broken.aspect_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constructors() {
        let r = Rect::new(1, 2, 3, 4);
        let t = Tile::text(r, "hello");
        assert!(t.is_text);
        assert!(t.image.is_none());
        let moved = t.with_rect(Rect::new(5, 6, 7, 8));
        assert_eq!(moved.payload, "hello");
        assert_eq!(moved.rect, Rect::new(5, 6, 7, 8));

        let i = Tile::image(r, ImageDims::natural(4, 3), ());
        assert!(!i.is_text);
        assert_eq!(i.image, Some(ImageDims::new(4, 3, 4, 3)));
    }

    #[test]
    fn grow_directions_combine() {
        let d = GrowDirections::LEFT | GrowDirections::DOWN;
        assert!(d.contains(GrowDirections::LEFT));
        assert!(!d.contains(GrowDirections::UP));
        assert_eq!(GrowDirections::all().bits(), 0b1111);
    }
}
