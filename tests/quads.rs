// Quads from shaped text and positioned icons

use std::collections::HashMap;
use symbol_layout::*;

const FONT: &str = "Noto Sans Regular";

fn glyphs() -> GlyphPositions {
    let mut font = HashMap::new();
    for (i, c) in "ABCD".chars().enumerate() {
        let metrics = GlyphMetrics {
            width: 12.0,
            height: 18.0,
            left: 0.0,
            top: -6.0,
            advance: 12.0,
        };
        let rect = Some(Rect::new(18.0 * i as f32, 0.0, 18.0, 24.0));
        font.insert(u32::from(c), GlyphPosition { metrics, rect });
    }
    let mut glyphs = HashMap::new();
    glyphs.insert(FONT.to_string(), font);
    glyphs
}

fn stretchable_image() -> ImagePosition {
    // A 30x20 image with stretchable middle sections
    ImagePosition::new(Rect::new(100.0, 50.0, 32.0, 22.0), [30.0, 20.0])
        .with_stretch(vec![(10.0, 20.0)], vec![(5.0, 15.0)])
}

fn text_shaping() -> Shaping {
    let text = [FormattedSection::text("ABCD")];
    let options = LayoutOptions::new().with_default_font(FONT).with_line_height(24.0);
    shape_text(&text, &glyphs(), &HashMap::new(), &options, None).unwrap()
}

#[test]
fn quad_per_glyph() {
    let shaping = text_shaping();
    let quads = get_glyph_quads(&shaping, Vec2::ZERO, &GlyphQuadOptions::default());
    assert_eq!(quads.len(), shaping.positioned_glyphs.len());

    for (quad, glyph) in quads.iter().zip(&shaping.positioned_glyphs) {
        assert_eq!(quad.tex, glyph.rect);
        assert_eq!(quad.br.0 - quad.tl.0, glyph.rect.w * glyph.scale);
        assert_eq!(quad.br.1 - quad.tl.1, glyph.rect.h * glyph.scale);
        assert_eq!(quad.writing_mode, Some(WritingMode::Horizontal));
    }

    // Quads advance with their glyphs
    assert_eq!(quads[1].tl.0 - quads[0].tl.0, 12.0);
}

#[test]
fn text_offset_translates_quads() {
    let shaping = text_shaping();
    let options = GlyphQuadOptions::default();
    let a = get_glyph_quads(&shaping, Vec2::ZERO, &options);
    let b = get_glyph_quads(&shaping, Vec2(2.0, -3.0), &options);
    for (a, b) in a.iter().zip(&b) {
        assert_eq!(b.tl, a.tl + Vec2(2.0, -3.0));
        assert_eq!(b.br, a.br + Vec2(2.0, -3.0));
    }
}

#[test]
fn icon_fitted_to_text() {
    let shaping = text_shaping();
    let icon = shape_icon(&stretchable_image(), Vec2::ZERO, TextAnchor::Center);
    assert_eq!(icon.width(), 30.0);

    let padding = [2.0, 4.0, 2.0, 4.0];
    let fitted = fit_icon_to_text(&icon, &shaping, IconTextFit::BOTH, padding, Vec2::ZERO, 1.0).unwrap();
    assert_eq!(fitted.left, shaping.left - 4.0);
    assert_eq!(fitted.right, shaping.right + 4.0);
    assert_eq!(fitted.top, shaping.top - 2.0);
    assert_eq!(fitted.bottom, shaping.bottom + 2.0);

    let quads = get_icon_quads(&fitted, 0.0);
    assert_eq!(quads.len(), 9);

    // The outer edges of the quads enclose the fitted box
    let min_x = quads.iter().map(|q| q.tl.0).fold(f32::INFINITY, f32::min);
    let max_x = quads.iter().map(|q| q.br.0).fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(min_x, fitted.left);
    assert_eq!(max_x, fitted.right);

    // Texture cells tile the padded rect exactly
    let area: f32 = quads.iter().map(|q| q.tex.w * q.tex.h).sum();
    assert_eq!(area, 32.0 * 22.0);
}

#[test]
fn icon_fit_none_is_error() {
    let shaping = text_shaping();
    let icon = shape_icon(&stretchable_image(), Vec2::ZERO, TextAnchor::Center);
    let result = fit_icon_to_text(&icon, &shaping, IconTextFit::empty(), [0.0; 4], Vec2::ZERO, 1.0);
    assert_eq!(result, Err(FitError::None));
}

#[test]
fn unfitted_stretchable_icon() {
    // Without fitting, cells keep their natural proportions
    let icon = shape_icon(&stretchable_image(), Vec2::ZERO, TextAnchor::TopLeft);
    let quads = get_icon_quads(&icon, 0.0);
    assert_eq!(quads.len(), 9);
    for quad in &quads {
        let x = quad.tl.0 + quad.pixel_offset_tl.0;
        let y = quad.tl.1 + quad.pixel_offset_tl.1;
        assert_eq!(x, quad.tex.x - 101.0);
        assert_eq!(y, quad.tex.y - 51.0);
    }
}
