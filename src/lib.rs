// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Map symbol label layout
//!
//! This library lays out the text and icons of map symbols. It consumes
//! pre-evaluated style values along with glyph and image position tables
//! (from an atlas builder) and produces textured quads ready for rendering.
//!
//! Layout proceeds in stages:
//!
//! 1.  Formatted input ([`FormattedSection`]s) is flattened into a
//!     [`TaggedString`]: one section index per char
//! 2.  [`determine_line_breaks`] selects balanced line breaks
//! 3.  [`shape_text`] positions glyphs (and inline images) relative to the
//!     symbol's anchor, producing a [`Shaping`]
//! 4.  [`get_glyph_quads`] converts a [`Shaping`] to quads, while
//!     [`get_icon_quads`] converts a [`PositionedIcon`] (optionally fitted
//!     to text with [`fit_icon_to_text`]) to quads
//!
//! Font loading, glyph rasterization, collision detection and rendering are
//! the caller's concern.
//!
//! ```
//! use std::collections::HashMap;
//! use symbol_layout::*;
//!
//! let mut font = HashMap::new();
//! for c in "Hello".chars() {
//!     let metrics = GlyphMetrics { width: 10.0, height: 20.0, left: 0.0, top: -8.0, advance: 10.0 };
//!     let rect = Some(Rect::new(0.0, 0.0, 16.0, 26.0));
//!     font.insert(u32::from(c), GlyphPosition { metrics, rect });
//! }
//! let mut glyphs = HashMap::new();
//! glyphs.insert("Open Sans".to_string(), font);
//! let images = HashMap::new();
//!
//! let text = [FormattedSection::text("Hello")];
//! let options = LayoutOptions::new().with_default_font("Open Sans");
//! let shaping = shape_text(&text, &glyphs, &images, &options, None).unwrap();
//! assert_eq!(shaping.width(), 50.0);
//!
//! let quads = get_glyph_quads(&shaping, Vec2::ZERO, &GlyphQuadOptions::default());
//! assert_eq!(quads.len(), 5);
//! ```

pub mod conv;
pub mod script;

mod data;
pub use data::*;

mod env;
pub use env::*;

mod positions;
pub use positions::*;

mod tagged;
pub use tagged::{Formatted, FormattedSection, Section, TaggedString, PUA_BEGIN, PUA_END};

mod bidi;
pub use bidi::{BidiProcessor, StyledLine, UnicodeBidi};

mod linebreak;
pub use linebreak::determine_line_breaks;

mod shaper;
pub use shaper::{shape_text, NoLayout, PositionedGlyph, Shaping, SHAPING_DEFAULT_OFFSET};

mod icon;
pub use icon::{fit_icon_to_text, shape_icon, FitError, PositionedIcon};

mod quads;
pub use quads::{get_glyph_quads, get_icon_quads, SymbolQuad};
