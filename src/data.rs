// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

use std::ops::{Add, AddAssign, Sub};

/// 2D vector (or point)
///
/// Coordinates are in layout units relative to the symbol's anchor, with `y`
/// increasing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);

    /// Rotate by `angle` (radians) about the origin
    ///
    /// This is a multiplication by the matrix `[cos, -sin; sin, cos]`.
    #[inline]
    pub fn rotate(self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2(cos * self.0 - sin * self.1, sin * self.0 + cos * self.1)
    }

    /// Rotate by `angle` (radians) about the point `center`
    #[inline]
    pub fn rotate_around(self, angle: f32, center: Vec2) -> Vec2 {
        (self - center).rotate(angle) + center
    }
}

impl From<[f32; 2]> for Vec2 {
    #[inline]
    fn from([x, y]: [f32; 2]) -> Self {
        Vec2(x, y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2(self.0 - rhs.0, self.1 - rhs.1)
    }
}

/// A rectangle within a texture atlas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Construct
    #[inline]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// True if the rect covers no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }
}

/// Position of the anchor relative to the laid-out block
///
/// For example, [`TextAnchor::TopLeft`] places the top-left corner of the
/// block at the anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAnchor {
    #[default]
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Alignment fractions derived from a [`TextAnchor`]
///
/// Both values are in the range `[0, 1]`: `0` is left/top, `1` is
/// right/bottom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorAlignment {
    pub horizontal: f32,
    pub vertical: f32,
}

impl TextAnchor {
    /// Get horizontal and vertical alignment fractions
    pub fn alignment(self) -> AnchorAlignment {
        use TextAnchor::*;
        let horizontal = match self {
            Right | TopRight | BottomRight => 1.0,
            Left | TopLeft | BottomLeft => 0.0,
            _ => 0.5,
        };
        let vertical = match self {
            Bottom | BottomRight | BottomLeft => 1.0,
            Top | TopRight | TopLeft => 0.0,
            _ => 0.5,
        };
        AnchorAlignment {
            horizontal,
            vertical,
        }
    }
}

/// Justification of lines within a text block
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextJustify {
    Left,
    #[default]
    Center,
    Right,
}

impl TextJustify {
    /// Fraction of line length by which lines are shifted left
    ///
    /// Right = 1, left = 0, center = 0.5.
    #[inline]
    pub fn factor(self) -> f32 {
        match self {
            TextJustify::Left => 0.0,
            TextJustify::Center => 0.5,
            TextJustify::Right => 1.0,
        }
    }
}

/// Writing mode
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingMode {
    /// Horizontal lines, glyphs upright
    #[default]
    Horizontal,
    /// Vertical lines: glyphs with an upright vertical form are placed in
    /// one-em cells, punctuation uses vertical presentation forms
    Vertical,
    /// Horizontal; used for labels whose glyphs lack any vertical form
    HorizontalOnly,
}

impl WritingMode {
    /// True for [`WritingMode::Vertical`]
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == WritingMode::Vertical
    }
}

/// Placement of a symbol relative to its geometry
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolPlacement {
    /// Placed at a point; text may be broken into multiple lines
    #[default]
    Point,
    /// Placed along a line; text is never broken
    Line,
    /// Placed at the center of a line; text is never broken
    LineCenter,
}

bitflags::bitflags! {
    /// Dimensions in which an icon is fitted to its text
    ///
    /// The empty set corresponds to "none": no fitting.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IconTextFit: u8 {
        /// Stretch horizontally to the text width
        const WIDTH = 1 << 0;
        /// Stretch vertically to the text height
        const HEIGHT = 1 << 1;
        /// Stretch in both dimensions
        const BOTH = Self::WIDTH.bits() | Self::HEIGHT.bits();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn anchor_alignment() {
        let a = TextAnchor::Center.alignment();
        assert_eq!((a.horizontal, a.vertical), (0.5, 0.5));
        let a = TextAnchor::TopRight.alignment();
        assert_eq!((a.horizontal, a.vertical), (1.0, 0.0));
        let a = TextAnchor::BottomLeft.alignment();
        assert_eq!((a.horizontal, a.vertical), (0.0, 1.0));
        let a = TextAnchor::Bottom.alignment();
        assert_eq!((a.horizontal, a.vertical), (0.5, 1.0));
        let a = TextAnchor::Left.alignment();
        assert_eq!((a.horizontal, a.vertical), (0.0, 0.5));
    }

    #[test]
    fn rotate() {
        let v = Vec2(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(v.0.abs() < 1e-6);
        assert!((v.1 - 1.0).abs() < 1e-6);

        let v = Vec2(2.0, 1.0).rotate_around(-FRAC_PI_2, Vec2(1.0, 1.0));
        assert!((v.0 - 1.0).abs() < 1e-6);
        assert!((v.1 - 0.0).abs() < 1e-6);
    }

    #[test]
    fn arithmetic() {
        let mut v = Vec2::from([1.0, 2.0]);
        assert_eq!(v + Vec2(3.0, 4.0), Vec2(4.0, 6.0));
        assert_eq!(v - Vec2(3.0, 4.0), Vec2(-2.0, -2.0));
        v += Vec2(0.5, 0.5);
        assert_eq!(v, Vec2(1.5, 2.5));
    }

    #[test]
    fn icon_text_fit() {
        assert!(IconTextFit::empty().is_empty());
        assert!(IconTextFit::BOTH.contains(IconTextFit::WIDTH));
        assert!(IconTextFit::BOTH.contains(IconTextFit::HEIGHT));
        assert!(!IconTextFit::WIDTH.contains(IconTextFit::HEIGHT));
    }
}
