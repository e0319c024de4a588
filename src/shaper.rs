// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text shaping
//!
//! This module provides the [`shape_text`] function, which lays out a label's
//! formatted text as a [`Shaping`]: a sequence of [`PositionedGlyph`]s plus a
//! bounding box relative to the label's anchor.
//!
//! Shaping proceeds as follows:
//!
//! 1.  The input is flattened into a [`TaggedString`]; for vertical writing
//!     mode, punctuation is replaced by vertical forms.
//! 2.  Line breaks are determined on the logical text (see
//!     [`determine_line_breaks`]) and lines are split (and reordered, if a
//!     [`BidiProcessor`] is supplied).
//! 3.  Each line is trimmed, then glyphs are resolved against the position
//!     tables and placed left-to-right. Unresolved characters are skipped.
//! 4.  Each line is justified, then the whole block is aligned to the anchor.
//!
//! This module *does not* perform glyph rasterization or kerning: glyph
//! metrics are supplied by the caller.

use crate::bidi::BidiProcessor;
use crate::linebreak::determine_line_breaks;
use crate::positions::{GlyphMetrics, GlyphPositions, ImagePositions};
use crate::script::{char_has_upright_vertical_orientation, char_in_complex_shaping_script, is_whitespace};
use crate::tagged::{Formatted, Section, TaggedString};
use crate::{AnchorAlignment, LayoutOptions, Rect, WritingMode, BASE_FONT_RATIO, IMAGE_PADDING, ONE_EM};
use thiserror::Error;

/// Left padding of an inline image
const GLYPH_DEFAULT_LEFT_PADDING: f32 = 2.0;
/// Right padding of an inline image (added to its advance)
const GLYPH_DEFAULT_RIGHT_PADDING: f32 = 3.0;

/// Vertical position of the first line's baseline, before alignment
///
/// Glyphs are laid out at [`ONE_EM`] size; this offset moves their visual
/// center onto the line's midline.
pub const SHAPING_DEFAULT_OFFSET: f32 = -17.0;

/// Result of shaping when no glyph could be placed
///
/// This occurs for empty or whitespace-only input and when no character
/// resolves against the supplied position tables.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Error)]
#[error("no glyphs placed")]
pub struct NoLayout;

/// A glyph (or inline image) positioned relative to the label's anchor
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedGlyph {
    /// The character (for images, a private-use placeholder)
    pub glyph: char,
    /// Image name, for inline images
    pub image_name: Option<String>,
    pub x: f32,
    pub y: f32,
    /// If true, the glyph is placed upright in a one-em cell of vertical text
    pub vertical: bool,
    pub scale: f32,
    /// Font name (empty for images)
    pub font: String,
    /// Index of the section within the label's formatted input
    pub section_index: u32,
    pub metrics: GlyphMetrics,
    /// Location in the glyph or image atlas
    pub rect: Rect,
}

/// A shaped label
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shaping {
    /// All placed glyphs, line by line
    pub positioned_glyphs: Vec<PositionedGlyph>,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub writing_mode: WritingMode,
    /// Number of lines, including empty lines
    pub line_count: usize,
    /// The logical text (after any punctuation verticalization)
    pub text: String,
    /// True if any inline image was placed
    pub icons_in_text: bool,
    /// Baseline offset used in layout; see [`SHAPING_DEFAULT_OFFSET`]
    pub y_offset: f32,
}

impl Shaping {
    /// Width of the bounding box
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the bounding box
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Shape formatted text
///
/// Returns [`NoLayout`] if no glyph is placed.
///
/// If `bidi` is `Some`, lines are reordered into visual order: text with a
/// single section uses [`BidiProcessor::process`], otherwise
/// [`BidiProcessor::process_styled`] is used if supported. Without
/// (supported) bidi processing, lines are laid out in logical order.
pub fn shape_text(
    text: &Formatted,
    glyphs: &GlyphPositions,
    images: &ImagePositions,
    options: &LayoutOptions,
    bidi: Option<&dyn BidiProcessor>,
) -> Result<Shaping, NoLayout> {
    let mut input = TaggedString::from_formatted(text, &options.default_font);

    if options.writing_mode.is_vertical() {
        input.verticalize_punctuation();
    }

    let line_breaks = determine_line_breaks(
        &input,
        options.spacing,
        options.max_width,
        glyphs,
        images,
        options.placement,
    );
    let lines = split_lines(&input, &line_breaks, bidi);

    let ctx = LineContext {
        glyphs,
        images,
        writing_mode: options.writing_mode,
        allow_vertical_placement: options.allow_vertical_placement,
        spacing: options.spacing,
    };
    let block = shape_lines(lines, &ctx, options);

    if block.glyphs.is_empty() {
        log::debug!("shape_text: no glyphs placed for {:?}", input.to_string());
        return Err(NoLayout);
    }

    let translate = options.translate;
    let top = translate.1 - block.align.vertical * block.height;
    let left = translate.0 - block.align.horizontal * block.width;
    Ok(Shaping {
        positioned_glyphs: block.glyphs,
        top,
        bottom: top + block.height,
        left,
        right: left + block.width,
        writing_mode: options.writing_mode,
        line_count: block.line_count,
        text: input.to_string(),
        icons_in_text: block.icons_in_text,
        y_offset: SHAPING_DEFAULT_OFFSET,
    })
}

fn split_lines(
    input: &TaggedString,
    line_breaks: &[usize],
    bidi: Option<&dyn BidiProcessor>,
) -> Vec<TaggedString> {
    let Some(processor) = bidi else {
        return input.break_lines(line_breaks);
    };

    let text = input.to_string();
    let sections = input.sections();
    if sections.len() == 1 {
        // Bidi doesn't have to be style-aware
        return processor
            .process(&text, line_breaks)
            .into_iter()
            .map(|line| {
                let chars: Vec<char> = line.chars().collect();
                let section_index = vec![0; chars.len()];
                TaggedString::from_parts(chars, section_index, sections.clone())
            })
            .collect();
    }

    match processor.process_styled(&text, input.section_indices(), line_breaks) {
        Some(lines) => lines
            .into_iter()
            .map(|(line, mut section_index)| {
                let mut chars: Vec<char> = line.chars().collect();
                if chars.len() != section_index.len() {
                    log::warn!(
                        "split_lines: bidi line has {} chars but {} section indices; truncating",
                        chars.len(),
                        section_index.len()
                    );
                    let len = chars.len().min(section_index.len());
                    chars.truncate(len);
                    section_index.truncate(len);
                }
                TaggedString::from_parts(chars, section_index, sections.clone())
            })
            .collect(),
        None => input.break_lines(line_breaks),
    }
}

/// Inputs shared by all lines
struct LineContext<'a> {
    glyphs: &'a GlyphPositions,
    images: &'a ImagePositions,
    writing_mode: WritingMode,
    allow_vertical_placement: bool,
    spacing: f32,
}

impl LineContext<'_> {
    /// True if `c` is placed upright in a vertical cell
    fn is_vertical(&self, c: char) -> bool {
        if !self.writing_mode.is_vertical() {
            return false;
        }
        if self.allow_vertical_placement {
            // Never verticalize whitespace or glyphs from complex text layout
            !(is_whitespace(c) || char_in_complex_shaping_script(c))
        } else {
            char_has_upright_vertical_orientation(c)
        }
    }
}

/// Result of laying out a single line
#[derive(Debug, Default)]
struct ShapedLine {
    glyphs: Vec<PositionedGlyph>,
    /// Line length, excluding trailing spacing
    length: f32,
    /// Maximum section scale on this line
    max_scale: f32,
    /// Downward shift of the line due to images taller than one em
    line_offset: f32,
    icons_in_text: bool,
}

/// Lay out a single (trimmed, non-empty) line with its baseline at `y`
fn shape_line(line: &TaggedString, y: f32, ctx: &LineContext) -> ShapedLine {
    let max_scale = line.max_scale();
    let max_line_offset = (max_scale - 1.0) * ONE_EM;

    let mut shaped = ShapedLine {
        glyphs: Vec::with_capacity(line.len()),
        max_scale,
        ..Default::default()
    };
    let mut x = 0.0;

    for i in 0..line.len() {
        let c = line.char_at(i);
        let section_index = line.section_index(i);

        let section = line.section(i);
        let (metrics, rect, scale, font, image_name, baseline_offset) = match section {
            Section::Text { scale, font } => {
                let position = ctx.glyphs.get(font).and_then(|font| font.get(&u32::from(c)));
                let Some((metrics, rect)) = position.and_then(|p| p.rect.map(|rect| (p.metrics, rect)))
                else {
                    log::trace!("shape_line: skipping unresolved glyph {c:?} in font {font:?}");
                    continue;
                };
                // We don't know the baseline, but since we're laying out at
                // ONE_EM we can calculate how much it moves when scaled.
                let baseline_offset = (max_scale - scale) * ONE_EM;
                (metrics, rect, *scale, font.clone(), None, baseline_offset)
            }
            Section::Image { name } => {
                let Some(image) = ctx.images.get(name) else {
                    log::trace!("shape_line: skipping unresolved image {name:?}");
                    continue;
                };
                shaped.icons_in_text = true;
                let scale = section.scale() * BASE_FONT_RATIO;
                let [width, height] = image.display_size;
                let metrics = GlyphMetrics {
                    width,
                    height,
                    left: GLYPH_DEFAULT_LEFT_PADDING,
                    top: -IMAGE_PADDING,
                    advance: width + GLYPH_DEFAULT_RIGHT_PADDING,
                };

                // Align the image's bottom to the baseline
                let image_offset = ONE_EM - height * scale;
                let baseline_offset = max_line_offset + image_offset;

                // Push the line down if the image is taller than one em at
                // the line's maximum scale
                let offset = height * scale - ONE_EM * max_scale;
                if offset > 0.0 && offset > shaped.line_offset {
                    shaped.line_offset = offset;
                }

                let name = Some(name.clone());
                (metrics, image.padded_rect, scale, String::new(), name, baseline_offset)
            }
        };

        let vertical = ctx.is_vertical(c);
        shaped.glyphs.push(PositionedGlyph {
            glyph: c,
            image_name,
            x,
            y: y + baseline_offset,
            vertical,
            scale,
            font,
            section_index,
            metrics,
            rect,
        });

        x += if vertical {
            // Vertical glyphs occupy a square em cell
            ONE_EM * scale + ctx.spacing
        } else {
            metrics.advance * scale + ctx.spacing
        };
    }

    shaped.length = x - ctx.spacing;
    shaped
}

/// Shift glyphs of a line for justification and image overflow
///
/// Justify: right = 1, left = 0, center = 0.5.
fn justify_line(glyphs: &mut [PositionedGlyph], justify: f32, line_offset: f32) {
    if justify == 0.0 && line_offset == 0.0 {
        return;
    }
    let Some(last) = glyphs.last() else {
        return;
    };

    let last_advance = last.metrics.advance * last.scale;
    let line_indent = (last.x + last_advance) * justify;

    for glyph in glyphs {
        glyph.x -= line_indent;
        glyph.y += line_offset;
    }
}

/// Accumulated state of the line loop
#[derive(Debug)]
struct Block {
    glyphs: Vec<PositionedGlyph>,
    line_count: usize,
    width: f32,
    height: f32,
    align: AnchorAlignment,
    icons_in_text: bool,
}

fn shape_lines(lines: Vec<TaggedString>, ctx: &LineContext, options: &LayoutOptions) -> Block {
    let line_height = options.line_height;
    let justify = options.justify.factor();

    let mut block = Block {
        glyphs: Vec::new(),
        line_count: lines.len(),
        width: 0.0,
        height: 0.0,
        align: options.anchor.alignment(),
        icons_in_text: false,
    };
    let mut y = SHAPING_DEFAULT_OFFSET;
    let mut max_line_height: f32 = 0.0;

    for mut line in lines {
        line.trim();

        if line.is_empty() {
            // Still need a line feed after an empty line
            y += line_height;
            continue;
        }

        let mut shaped = shape_line(&line, y, ctx);
        if !shaped.glyphs.is_empty() {
            block.width = block.width.max(shaped.length);
            justify_line(&mut shaped.glyphs, justify, shaped.line_offset);
            block.glyphs.append(&mut shaped.glyphs);
        }
        block.icons_in_text |= shaped.icons_in_text;

        let current_line_height = line_height * shaped.max_scale + shaped.line_offset;
        y += current_line_height;
        max_line_height = max_line_height.max(current_line_height);
    }

    block.height = y - SHAPING_DEFAULT_OFFSET;
    align_block(&mut block, justify, line_height, max_line_height);
    block
}

/// Align the whole block to the anchor
fn align_block(block: &mut Block, justify: f32, line_height: f32, max_line_height: f32) {
    let align = block.align;
    let shift_x = (justify - align.horizontal) * block.width;
    let shift_y = if max_line_height != line_height {
        // Lines of differing height (scaled text or images)
        -block.height * align.vertical - SHAPING_DEFAULT_OFFSET
    } else {
        (-align.vertical * block.line_count as f32 + 0.5) * line_height
    };

    for glyph in &mut block.glyphs {
        glyph.x += shift_x;
        glyph.y += shift_y;
    }
}
