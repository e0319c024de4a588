// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Layout parameters

use crate::{SymbolPlacement, TextAnchor, TextJustify, Vec2, WritingMode, ONE_EM};

/// Parameters controlling text shaping
///
/// All values are already evaluated (e.g. from a style sheet); units are
/// layout units at [`ONE_EM`] font size unless noted otherwise.
///
/// `LayoutOptions` can be default-constructed: a centered, horizontal,
/// point-placed label wrapped at ten ems.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Font used for text sections which do not specify one
    pub default_font: String,
    /// Maximum line width
    ///
    /// Lines are balanced towards equal length rather than filled to this
    /// width; a line may exceed it when there is no suitable break point.
    pub max_width: f32,
    /// Height of a line at unit scale
    pub line_height: f32,
    /// Additional spacing between glyphs
    pub spacing: f32,
    /// Position of the anchor relative to the text block
    pub anchor: TextAnchor,
    /// Justification of lines within the block
    pub justify: TextJustify,
    /// Offset of the bounding box from the anchor
    pub translate: Vec2,
    /// Writing mode
    pub writing_mode: WritingMode,
    /// If true, glyphs are verticalized whenever vertical placement applies
    ///
    /// Otherwise, only glyphs with an upright vertical form are verticalized.
    pub allow_vertical_placement: bool,
    /// Placement of the symbol; line breaking only applies to point placement
    pub placement: SymbolPlacement,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            default_font: String::new(),
            max_width: 10.0 * ONE_EM,
            line_height: 1.2 * ONE_EM,
            spacing: 0.0,
            anchor: TextAnchor::default(),
            justify: TextJustify::default(),
            translate: Vec2::ZERO,
            writing_mode: WritingMode::default(),
            allow_vertical_placement: false,
            placement: SymbolPlacement::default(),
        }
    }
}

impl LayoutOptions {
    /// Alternative default constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default font
    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// Set the maximum line width
    pub fn with_max_width(mut self, max_width: f32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the line height
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Set glyph spacing
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set anchor and justification
    ///
    /// Takes `(anchor, justify)` tuple to allow easier parameter passing.
    pub fn with_align(mut self, (anchor, justify): (TextAnchor, TextJustify)) -> Self {
        self.anchor = anchor;
        self.justify = justify;
        self
    }

    /// Set the translation
    pub fn with_translate(mut self, translate: Vec2) -> Self {
        self.translate = translate;
        self
    }

    /// Set the writing mode
    pub fn with_writing_mode(mut self, mode: WritingMode, allow_vertical_placement: bool) -> Self {
        self.writing_mode = mode;
        self.allow_vertical_placement = allow_vertical_placement;
        self
    }

    /// Set symbol placement
    pub fn with_placement(mut self, placement: SymbolPlacement) -> Self {
        self.placement = placement;
        self
    }
}

/// Parameters controlling glyph quad construction
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphQuadOptions {
    /// Rotation applied to every quad, in degrees clockwise
    pub text_rotate: f32,
    /// True if glyphs are placed individually along a line
    pub along_line: bool,
    /// As [`LayoutOptions::allow_vertical_placement`]
    pub allow_vertical_placement: bool,
}
