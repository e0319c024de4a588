// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Icon placement

use crate::{IconTextFit, ImagePosition, Shaping, TextAnchor, Vec2};
use thiserror::Error;

/// Icon fitting error
///
/// Fitting requires a non-empty [`IconTextFit`]; padding and offset lengths
/// are enforced by their types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("icon-text-fit is none")]
    None,
}

/// An icon positioned relative to the symbol's anchor
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedIcon {
    pub image: ImagePosition,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl PositionedIcon {
    /// Width of the display box
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the display box
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Position an icon's display box relative to its anchor
pub fn shape_icon(image: &ImagePosition, offset: Vec2, anchor: TextAnchor) -> PositionedIcon {
    let align = anchor.alignment();
    let [width, height] = image.display_size;
    let left = offset.0 - width * align.horizontal;
    let top = offset.1 - height * align.vertical;
    PositionedIcon {
        image: image.clone(),
        top,
        bottom: top + height,
        left,
        right: left + width,
    }
}

/// Fit an icon's box to shaped text
///
/// The icon's anchor is ignored: the icon is centered on the text, then
/// stretched to the text's extent (plus padding) in the dimensions selected
/// by `fit`. Dimensions not stretched keep the image's display size.
///
/// `padding` is `[top, right, bottom, left]`. The text's box is multiplied by
/// `font_scale` before fitting.
pub fn fit_icon_to_text(
    icon: &PositionedIcon,
    text: &Shaping,
    fit: IconTextFit,
    padding: [f32; 4],
    offset: Vec2,
    font_scale: f32,
) -> Result<PositionedIcon, FitError> {
    if fit.is_empty() {
        return Err(FitError::None);
    }

    let image = &icon.image;
    let size = Vec2::from(image.display_size);
    let [top_pad, right_pad, bottom_pad, left_pad] = padding;

    let text_left = text.left * font_scale;
    let text_right = text.right * font_scale;
    let (left, right) = if fit.contains(IconTextFit::WIDTH) {
        (offset.0 + text_left - left_pad, offset.0 + text_right + right_pad)
    } else {
        let left = offset.0 + (text_left + text_right - size.0) / 2.0;
        (left, left + size.0)
    };

    let text_top = text.top * font_scale;
    let text_bottom = text.bottom * font_scale;
    let (top, bottom) = if fit.contains(IconTextFit::HEIGHT) {
        (offset.1 + text_top - top_pad, offset.1 + text_bottom + bottom_pad)
    } else {
        let top = offset.1 + (text_top + text_bottom - size.1) / 2.0;
        (top, top + size.1)
    };

    Ok(PositionedIcon {
        image: image.clone(),
        top,
        bottom,
        left,
        right,
    })
}
