// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Glyph and image position tables
//!
//! These tables are produced by an atlas builder (not part of this library)
//! and describe, for each glyph or image, its metrics and the rectangle it
//! occupies in the atlas texture.
//!
//! Glyph metrics are in pixels of a glyph laid out at [`ONE_EM`] size.

use crate::Rect;
use std::collections::HashMap;

/// Size of one em in layout units
///
/// Glyphs are rasterized and laid out at this size and scaled from there.
pub const ONE_EM: f32 = 24.0;

/// Ratio between the default font size (16) and [`ONE_EM`]
///
/// Inline images are scaled by this ratio so that they size consistently
/// with surrounding text.
pub const BASE_FONT_RATIO: f32 = 1.0 / (16.0 / ONE_EM);

/// Border (in pixels) around each glyph bitmap in the glyph atlas
pub const GLYPH_PBF_BORDER: f32 = 3.0;

/// Padding (in pixels) around each image in the image atlas
pub const IMAGE_PADDING: f32 = 1.0;

/// Metrics of a glyph
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
    pub advance: f32,
}

/// Metrics and atlas location of a glyph
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphPosition {
    pub metrics: GlyphMetrics,
    /// Location in the atlas, if the glyph has a bitmap
    ///
    /// Glyphs without a bitmap (e.g. space) have no rect; they are not
    /// placed by the shaper.
    pub rect: Option<Rect>,
}

/// Atlas location and stretch metadata of an image
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePosition {
    /// Location in the atlas, including [`IMAGE_PADDING`] on each side
    pub padded_rect: Rect,
    /// Size of the image in layout units
    pub display_size: [f32; 2],
    /// Horizontally stretchable ranges, in image pixels
    ///
    /// An empty list means the image declares no stretchable ranges.
    pub stretch_x: Vec<(f32, f32)>,
    /// Vertically stretchable ranges, in image pixels
    pub stretch_y: Vec<(f32, f32)>,
}

impl ImagePosition {
    /// Construct for a non-stretchable image
    pub fn new(padded_rect: Rect, display_size: [f32; 2]) -> Self {
        ImagePosition {
            padded_rect,
            display_size,
            stretch_x: vec![],
            stretch_y: vec![],
        }
    }

    /// Set stretchable ranges
    pub fn with_stretch(mut self, stretch_x: Vec<(f32, f32)>, stretch_y: Vec<(f32, f32)>) -> Self {
        self.stretch_x = stretch_x;
        self.stretch_y = stretch_y;
        self
    }

    /// True if any stretchable range is declared
    #[inline]
    pub fn is_stretchable(&self) -> bool {
        !self.stretch_x.is_empty() || !self.stretch_y.is_empty()
    }
}

/// Glyph positions of a single font, by codepoint
pub type FontGlyphs = HashMap<u32, GlyphPosition>;

/// Glyph positions by font name, then by codepoint
pub type GlyphPositions = HashMap<String, FontGlyphs>;

/// Image positions by image name
pub type ImagePositions = HashMap<String, ImagePosition>;
