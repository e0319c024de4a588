// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Textured quads for icons and glyphs
//!
//! A [`SymbolQuad`] describes one textured rectangle (possibly rotated) of a
//! symbol, with corners relative to the symbol's anchor. Corner positions
//! are in layout units; for stretched icons an additional offset in pixels
//! is supplied so that fixed (non-stretched) parts of the image are drawn at
//! their native size.

use crate::icon::PositionedIcon;
use crate::{GlyphQuadOptions, Rect, Shaping, Vec2, WritingMode, GLYPH_PBF_BORDER, ONE_EM};
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_2;

/// Border (in pixels) of the image included in icon quads
///
/// A non-pixel-aligned image covers one extra pixel; quads are padded to
/// include the atlas padding on each side.
const ICON_BORDER: f32 = 1.0;

/// Padding of glyph rects beyond [`GLYPH_PBF_BORDER`]
const GLYPH_PADDING: f32 = 1.0;

/// A textured quad
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolQuad {
    pub tl: Vec2,
    pub tr: Vec2,
    pub bl: Vec2,
    pub br: Vec2,
    /// Source rect in the atlas
    pub tex: Rect,
    /// Pixel offset of the top-left corner (added after scaling)
    pub pixel_offset_tl: Vec2,
    /// Pixel offset of the bottom-right corner (added after scaling)
    pub pixel_offset_br: Vec2,
    /// Writing mode of the source text; `None` for icons
    pub writing_mode: Option<WritingMode>,
    /// Anchor of the glyph along a line; zero unless placed along a line
    pub glyph_offset: Vec2,
    /// Index of the source section (used for per-section styling)
    pub section_index: u32,
}

impl SymbolQuad {
    fn new(tl: Vec2, br: Vec2, tex: Rect) -> Self {
        SymbolQuad {
            tl,
            tr: Vec2(br.0, tl.1),
            bl: Vec2(tl.0, br.1),
            br,
            tex,
            pixel_offset_tl: Vec2::ZERO,
            pixel_offset_br: Vec2::ZERO,
            writing_mode: None,
            glyph_offset: Vec2::ZERO,
            section_index: 0,
        }
    }

    /// Rotate all corners about the anchor (radians)
    fn rotate(&mut self, angle: f32) {
        for corner in [&mut self.tl, &mut self.tr, &mut self.bl, &mut self.br] {
            *corner = corner.rotate(angle);
        }
    }

    fn rotate_around(&mut self, angle: f32, center: Vec2) {
        for corner in [&mut self.tl, &mut self.tr, &mut self.bl, &mut self.br] {
            *corner = corner.rotate_around(angle, center);
        }
    }

    fn translate(&mut self, offset: Vec2) {
        for corner in [&mut self.tl, &mut self.tr, &mut self.bl, &mut self.br] {
            *corner += offset;
        }
    }
}

/// A cut along one axis of an image
///
/// The cut lies at image pixel `fixed + stretch`, where `stretch` is the
/// total length of stretchable ranges before the cut.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cut {
    fixed: f32,
    stretch: f32,
}

impl Cut {
    #[inline]
    fn pixel(self) -> f32 {
        self.fixed + self.stretch
    }
}

/// Cuts and totals along one axis of an image
struct Axis {
    cuts: SmallVec<[Cut; 4]>,
    fixed_size: f32,
    stretch_size: f32,
    /// Display start and size of the icon
    start: f32,
    size: f32,
}

impl Axis {
    fn new(image_size: f32, ranges: &[(f32, f32)], stretchable: bool, start: f32, size: f32) -> Self {
        let whole = [(0.0, image_size)];
        let ranges = if ranges.is_empty() { &whole[..] } else { ranges };
        let stretch_size: f32 = ranges.iter().map(|(a, b)| b - a).sum();
        let fixed_size = image_size - stretch_size;

        let mut cuts: SmallVec<[Cut; 4]> = SmallVec::new();
        if !stretchable {
            // A single cell covering the image plus border
            cuts.push(Cut {
                fixed: 0.0,
                stretch: -ICON_BORDER,
            });
            cuts.push(Cut {
                fixed: 0.0,
                stretch: image_size + ICON_BORDER,
            });
        } else {
            cuts.push(Cut {
                fixed: -ICON_BORDER,
                stretch: 0.0,
            });
            for &(c1, c2) in ranges {
                let stretch = cuts.last().map_or(0.0, |cut| cut.stretch);
                cuts.push(Cut {
                    fixed: c1 - stretch,
                    stretch,
                });
                cuts.push(Cut {
                    fixed: c1 - stretch,
                    stretch: stretch + (c2 - c1),
                });
            }
            cuts.push(Cut {
                fixed: fixed_size + ICON_BORDER,
                stretch: stretch_size,
            });
        }

        Axis {
            cuts,
            fixed_size,
            stretch_size,
            start,
            size,
        }
    }

    fn stretch_fraction(&self, cut: Cut) -> f32 {
        if self.stretch_size > 0.0 {
            cut.stretch / self.stretch_size
        } else {
            0.0
        }
    }

    /// Position of a cut in layout units
    fn em_offset(&self, cut: Cut) -> f32 {
        self.stretch_fraction(cut) * self.size + self.start
    }

    /// Pixel offset of a cut
    fn px_offset(&self, cut: Cut) -> f32 {
        cut.fixed - self.fixed_size * self.stretch_fraction(cut)
    }

    fn cells(&self) -> impl Iterator<Item = (Cut, Cut)> + '_ {
        self.cuts.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Construct quads for an icon
///
/// A stretch-free image yields a single quad. That quad includes the
/// one-pixel atlas padding on each side, so its texture is the whole padded
/// rect and its box extends one pixel beyond the icon's box. Otherwise the image is cut
/// into cells at the boundaries of its stretchable ranges and one quad is
/// produced per cell; stretchable cells scale with the icon's box while
/// fixed cells keep their pixel size.
///
/// `icon_rotate` is in degrees clockwise.
pub fn get_icon_quads(icon: &PositionedIcon, icon_rotate: f32) -> Vec<SymbolQuad> {
    let image = &icon.image;
    let padded = image.padded_rect;
    let image_width = padded.w - 2.0 * ICON_BORDER;
    let image_height = padded.h - 2.0 * ICON_BORDER;
    let stretchable = image.is_stretchable();

    let x_axis = Axis::new(image_width, &image.stretch_x, stretchable, icon.left, icon.width());
    let y_axis = Axis::new(image_height, &image.stretch_y, stretchable, icon.top, icon.height());

    let angle = icon_rotate.to_radians();
    let mut quads = Vec::with_capacity((x_axis.cuts.len() - 1) * (y_axis.cuts.len() - 1));

    for (left, right) in x_axis.cells() {
        for (top, bottom) in y_axis.cells() {
            let tl = Vec2(x_axis.em_offset(left), y_axis.em_offset(top));
            let br = Vec2(x_axis.em_offset(right), y_axis.em_offset(bottom));

            let x1 = left.pixel();
            let y1 = top.pixel();
            let tex = Rect::new(
                padded.x + ICON_BORDER + x1,
                padded.y + ICON_BORDER + y1,
                right.pixel() - x1,
                bottom.pixel() - y1,
            );

            let mut quad = SymbolQuad::new(tl, br, tex);
            quad.pixel_offset_tl = Vec2(x_axis.px_offset(left), y_axis.px_offset(top));
            quad.pixel_offset_br = Vec2(x_axis.px_offset(right), y_axis.px_offset(bottom));
            if angle != 0.0 {
                quad.rotate(angle);
            }
            quads.push(quad);
        }
    }

    quads
}

/// Construct quads for the glyphs of shaped text
///
/// One quad is produced per placed glyph with a non-empty atlas rect.
/// `text_offset` is added to each glyph's position unless glyphs are placed
/// along a line, in which case each quad is relative to its own glyph anchor
/// (see [`SymbolQuad::glyph_offset`]).
pub fn get_glyph_quads(shaping: &Shaping, text_offset: Vec2, options: &GlyphQuadOptions) -> Vec<SymbolQuad> {
    let text_rotate = options.text_rotate.to_radians();
    let rect_buffer = GLYPH_PBF_BORDER + GLYPH_PADDING;
    let mut quads = Vec::with_capacity(shaping.positioned_glyphs.len());

    for glyph in &shaping.positioned_glyphs {
        let rect = glyph.rect;
        if rect.is_empty() {
            continue;
        }

        let scale = glyph.scale;
        let half_advance = glyph.metrics.advance * scale / 2.0;

        let anchor = Vec2(glyph.x + half_advance, glyph.y);
        let (glyph_offset, mut built_in_offset) = if options.along_line {
            (anchor, Vec2::ZERO)
        } else {
            (Vec2::ZERO, anchor + text_offset)
        };

        let rotate_vertical = (options.along_line || options.allow_vertical_placement) && glyph.vertical;
        let mut verticalized_offset = Vec2::ZERO;
        if rotate_vertical {
            // The quad is rotated about its own origin then moved back
            verticalized_offset = built_in_offset;
            built_in_offset = Vec2::ZERO;
        }

        let x1 = (glyph.metrics.left - rect_buffer) * scale - half_advance + built_in_offset.0;
        let y1 = (-glyph.metrics.top - rect_buffer) * scale + built_in_offset.1;
        let tl = Vec2(x1, y1);
        let br = Vec2(x1 + rect.w * scale, y1 + rect.h * scale);
        let mut quad = SymbolQuad::new(tl, br, rect);

        if rotate_vertical {
            // Upright glyphs occupy a one-em square cell. Rotating 90° CCW
            // about the middle of the cell's left edge centers the glyph on
            // the midline, which makes the baseline offset redundant; the
            // x correction pulls half-width glyphs back into the cell.
            let center = Vec2(-half_advance, half_advance - shaping.y_offset);
            let half_width_correction = ONE_EM / 2.0 - half_advance;
            let correction = Vec2(5.0 - shaping.y_offset - half_width_correction, 0.0);
            quad.rotate_around(-FRAC_PI_2, center);
            quad.translate(correction + verticalized_offset);
        }

        if text_rotate != 0.0 {
            quad.rotate(text_rotate);
        }

        quad.writing_mode = Some(shaping.writing_mode);
        quad.glyph_offset = glyph_offset;
        quad.section_index = glyph.section_index;
        quads.push(quad);
    }

    quads
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::icon::shape_icon;
    use crate::positions::GlyphMetrics;
    use crate::{ImagePosition, PositionedGlyph, TextAnchor};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    fn icon(image: ImagePosition, left: f32, top: f32, right: f32, bottom: f32) -> PositionedIcon {
        PositionedIcon {
            image,
            top,
            bottom,
            left,
            right,
        }
    }

    fn image() -> ImagePosition {
        ImagePosition::new(Rect::new(10.0, 20.0, 22.0, 12.0), [20.0, 10.0])
    }

    #[test]
    fn icon_stretch_free() {
        let icon = shape_icon(&image(), Vec2::ZERO, TextAnchor::Center);
        let quads = get_icon_quads(&icon, 0.0);
        assert_eq!(quads.len(), 1);

        let quad = &quads[0];
        assert_eq!(quad.tl, Vec2(-11.0, -6.0));
        assert_eq!(quad.tr, Vec2(11.0, -6.0));
        assert_eq!(quad.bl, Vec2(-11.0, 6.0));
        assert_eq!(quad.br, Vec2(11.0, 6.0));
        // Padding is included on each side
        assert_eq!(quad.br.0 - quad.tl.0, icon.width() + 2.0);
        assert_eq!(quad.br.1 - quad.tl.1, icon.height() + 2.0);
        assert_eq!(quad.tex, Rect::new(10.0, 20.0, 22.0, 12.0));
        assert_eq!(quad.pixel_offset_tl, Vec2::ZERO);
        assert_eq!(quad.pixel_offset_br, Vec2::ZERO);
        assert_eq!(quad.writing_mode, None);
        assert_eq!(quad.section_index, 0);
    }

    #[test]
    fn icon_rotated() {
        let icon = shape_icon(&image(), Vec2::ZERO, TextAnchor::Center);
        let quads = get_icon_quads(&icon, 90.0);
        assert_eq!(quads.len(), 1);
        assert!(approx(quads[0].tl, Vec2(6.0, -11.0)));
        assert!(approx(quads[0].br, Vec2(-6.0, 11.0)));
        assert_eq!(quads[0].tex, Rect::new(10.0, 20.0, 22.0, 12.0));
    }

    #[test]
    fn icon_nine_slice() {
        let image = image().with_stretch(vec![(5.0, 15.0)], vec![(3.0, 7.0)]);
        let quads = get_icon_quads(&icon(image, -20.0, -10.0, 20.0, 10.0), 0.0);
        assert_eq!(quads.len(), 9);

        // Corner cell: fixed size, positioned by pixel offset
        let corner = &quads[0];
        assert_eq!(corner.tl, Vec2(-20.0, -10.0));
        assert_eq!(corner.br, Vec2(-20.0, -10.0));
        assert_eq!(corner.pixel_offset_tl, Vec2(-1.0, -1.0));
        assert_eq!(corner.pixel_offset_br, Vec2(5.0, 3.0));
        assert_eq!(corner.tex, Rect::new(10.0, 20.0, 6.0, 4.0));

        // Center cell: stretched to the icon's box, less fixed borders
        let center = &quads[4];
        assert_eq!(center.tl, Vec2(-20.0, -10.0));
        assert_eq!(center.br, Vec2(20.0, 10.0));
        assert_eq!(center.pixel_offset_tl, Vec2(5.0, 3.0));
        assert_eq!(center.pixel_offset_br, Vec2(-5.0, -3.0));
        assert_eq!(center.tex, Rect::new(16.0, 24.0, 10.0, 4.0));

        let last = &quads[8];
        assert_eq!(last.br, Vec2(20.0, 10.0));
        assert_eq!(last.pixel_offset_br, Vec2(1.0, 1.0));
        assert_eq!(last.tex, Rect::new(26.0, 28.0, 6.0, 4.0));
    }

    #[test]
    fn icon_cells_share_edges() {
        let image = image().with_stretch(vec![(5.0, 15.0)], vec![(3.0, 7.0)]);
        let quads = get_icon_quads(&icon(image, -20.0, -10.0, 20.0, 10.0), 0.0);
        // Quads are ordered by column, then by row
        for x in 0..3 {
            for y in 0..3 {
                let quad = &quads[x * 3 + y];
                if y + 1 < 3 {
                    let below = &quads[x * 3 + y + 1];
                    assert_eq!(quad.bl, below.tl);
                    assert_eq!(quad.pixel_offset_br.1, below.pixel_offset_tl.1);
                    assert_eq!(quad.tex.y + quad.tex.h, below.tex.y);
                }
                if x + 1 < 3 {
                    let right = &quads[(x + 1) * 3 + y];
                    assert_eq!(quad.tr, right.tl);
                    assert_eq!(quad.pixel_offset_br.0, right.pixel_offset_tl.0);
                    assert_eq!(quad.tex.x + quad.tex.w, right.tex.x);
                }
            }
        }
    }

    #[test]
    fn icon_stretch_one_axis() {
        // Stretch declared only horizontally: the whole height stretches
        let image = image().with_stretch(vec![(5.0, 15.0)], vec![]);
        let quads = get_icon_quads(&icon(image, -20.0, -10.0, 20.0, 10.0), 0.0);
        assert_eq!(quads.len(), 9);
        assert_eq!(quads[1].tl.1, -10.0);
        assert_eq!(quads[1].br.1, 10.0);
        assert_eq!(quads[1].tex.h, 10.0);
    }

    fn glyph(vertical: bool, advance: f32, rect: Rect) -> PositionedGlyph {
        PositionedGlyph {
            glyph: 'a',
            image_name: None,
            x: 0.0,
            y: -17.0,
            vertical,
            scale: 1.0,
            font: "test".to_string(),
            section_index: 2,
            metrics: GlyphMetrics {
                width: advance,
                height: 20.0,
                left: 0.0,
                top: -8.0,
                advance,
            },
            rect,
        }
    }

    fn shaping(glyphs: Vec<PositionedGlyph>) -> Shaping {
        Shaping {
            positioned_glyphs: glyphs,
            top: -14.4,
            bottom: 14.4,
            left: -5.0,
            right: 5.0,
            writing_mode: WritingMode::Horizontal,
            line_count: 1,
            text: "a".to_string(),
            icons_in_text: false,
            y_offset: -17.0,
        }
    }

    #[test]
    fn glyph_point() {
        let shaping = shaping(vec![glyph(false, 10.0, Rect::new(0.0, 0.0, 16.0, 26.0))]);
        let quads = get_glyph_quads(&shaping, Vec2::ZERO, &GlyphQuadOptions::default());
        assert_eq!(quads.len(), 1);

        let quad = &quads[0];
        assert_eq!(quad.tl, Vec2(-4.0, -13.0));
        assert_eq!(quad.br, Vec2(12.0, 13.0));
        assert_eq!(quad.tex, Rect::new(0.0, 0.0, 16.0, 26.0));
        assert_eq!(quad.glyph_offset, Vec2::ZERO);
        assert_eq!(quad.writing_mode, Some(WritingMode::Horizontal));
        assert_eq!(quad.section_index, 2);
        assert_eq!(quad.pixel_offset_tl, Vec2::ZERO);

        let offset = Vec2(1.0, 2.0);
        let quads = get_glyph_quads(&shaping, offset, &GlyphQuadOptions::default());
        assert_eq!(quads[0].tl, Vec2(-3.0, -11.0));
    }

    #[test]
    fn glyph_along_line() {
        let shaping = shaping(vec![glyph(false, 10.0, Rect::new(0.0, 0.0, 16.0, 26.0))]);
        let options = GlyphQuadOptions {
            along_line: true,
            ..Default::default()
        };
        let quads = get_glyph_quads(&shaping, Vec2(1.0, 2.0), &options);
        assert_eq!(quads[0].glyph_offset, Vec2(5.0, -17.0));
        assert_eq!(quads[0].tl, Vec2(-9.0, 4.0));
        assert_eq!(quads[0].br, Vec2(7.0, 30.0));
    }

    #[test]
    fn glyph_empty_rect_skipped() {
        let shaping = shaping(vec![
            glyph(false, 10.0, Rect::default()),
            glyph(false, 10.0, Rect::new(0.0, 0.0, 16.0, 26.0)),
        ]);
        let quads = get_glyph_quads(&shaping, Vec2::ZERO, &GlyphQuadOptions::default());
        assert_eq!(quads.len(), 1);
    }

    #[test]
    fn glyph_vertical() {
        let shaping = shaping(vec![glyph(true, 24.0, Rect::new(0.0, 0.0, 30.0, 26.0))]);

        // Vertical glyphs are only rotated when vertical placement is allowed
        let quads = get_glyph_quads(&shaping, Vec2::ZERO, &GlyphQuadOptions::default());
        assert_eq!(quads[0].tl, Vec2(-4.0, -13.0));

        let options = GlyphQuadOptions {
            allow_vertical_placement: true,
            ..Default::default()
        };
        let quads = get_glyph_quads(&shaping, Vec2::ZERO, &options);
        assert!(approx(quads[0].tl, Vec2(-3.0, 16.0)));
        assert!(approx(quads[0].br, Vec2(23.0, -14.0)));
    }

    #[test]
    fn glyph_rotated() {
        let shaping = shaping(vec![glyph(false, 10.0, Rect::new(0.0, 0.0, 16.0, 26.0))]);
        let options = GlyphQuadOptions {
            text_rotate: 180.0,
            ..Default::default()
        };
        let quads = get_glyph_quads(&shaping, Vec2::ZERO, &options);
        assert!(approx(quads[0].tl, Vec2(4.0, 13.0)));
        assert!(approx(quads[0].br, Vec2(-12.0, -13.0)));
    }
}
