// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Section model: text tagged with per-character sections
//!
//! A label's text is supplied as a sequence of [`FormattedSection`]s, each
//! either a run of text (with optional font and scale) or an inline image.
//! These are flattened into a [`TaggedString`]: a sequence of characters plus
//! the index of the [`Section`] each character belongs to. Each image is
//! represented by a single placeholder character from the Unicode Private Use
//! Area.

use crate::conv::{to_char, to_u32, to_usize};
use crate::script::{is_whitespace, verticalize_punctuation};
use std::sync::Arc;

/// First codepoint used for image placeholders
pub const PUA_BEGIN: u32 = 0xE000;
/// Last codepoint used for image placeholders
pub const PUA_END: u32 = 0xF8FF;

/// A span of formatted input
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormattedSection {
    /// A run of text
    Text {
        text: String,
        /// Scale relative to the label's font size (default: 1)
        scale: Option<f32>,
        /// Font name (default: the label's default font)
        font: Option<String>,
    },
    /// An inline image, by name
    Image(String),
}

impl FormattedSection {
    /// Construct a text span with default scale and font
    pub fn text(text: impl Into<String>) -> Self {
        FormattedSection::Text {
            text: text.into(),
            scale: None,
            font: None,
        }
    }

    /// Construct an image span
    pub fn image(name: impl Into<String>) -> Self {
        FormattedSection::Image(name.into())
    }

    /// Set the scale of a text span (no effect on images)
    pub fn with_scale(mut self, value: f32) -> Self {
        if let FormattedSection::Text { ref mut scale, .. } = self {
            *scale = Some(value);
        }
        self
    }

    /// Set the font of a text span (no effect on images)
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        if let FormattedSection::Text { ref mut font, .. } = self {
            *font = Some(name.into());
        }
        self
    }
}

/// Formatted input: a sequence of spans in logical order
pub type Formatted = [FormattedSection];

/// A resolved section of a [`TaggedString`]
#[derive(Clone, Debug, PartialEq)]
pub enum Section {
    Text { scale: f32, font: String },
    Image { name: String },
}

impl Section {
    /// Scale of this section
    ///
    /// Images have unit scale here; conversion to the em size happens
    /// during shaping.
    #[inline]
    pub fn scale(&self) -> f32 {
        match self {
            Section::Text { scale, .. } => *scale,
            Section::Image { .. } => 1.0,
        }
    }

    /// Image name, if this is an image section
    #[inline]
    pub fn image(&self) -> Option<&str> {
        match self {
            Section::Text { .. } => None,
            Section::Image { name } => Some(name),
        }
    }
}

/// A string where each character is tagged with a [`Section`]
///
/// Invariant: `section_index.len() == chars.len()`.
///
/// The section list is shared (copy-on-write) between a string and the lines
/// split from it, so indices remain valid across [`Self::substring`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaggedString {
    chars: Vec<char>,
    section_index: Vec<u32>,
    sections: Arc<Vec<Section>>,
    image_section_id: Option<u32>,
}

impl TaggedString {
    /// Construct an empty string
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from formatted input
    ///
    /// Text spans without a font are assigned `default_font`. Image spans with
    /// an empty name, and images beyond the capacity of the placeholder range,
    /// are dropped with a warning.
    pub fn from_formatted(text: &Formatted, default_font: &str) -> Self {
        let mut result = TaggedString::new();
        for section in text {
            match section {
                FormattedSection::Text { text, scale, font } => {
                    let font = font.as_deref().unwrap_or(default_font);
                    result.add_text_section(text, scale.unwrap_or(1.0), font);
                }
                FormattedSection::Image(name) => result.add_image_section(name),
            }
        }
        result
    }

    /// Construct with explicit content
    ///
    /// This is used to rebuild lines returned by a bidi processor. Panics (in
    /// debug builds) if the lengths of `chars` and `section_index` differ.
    pub fn from_parts(chars: Vec<char>, section_index: Vec<u32>, sections: Arc<Vec<Section>>) -> Self {
        debug_assert_eq!(chars.len(), section_index.len());
        TaggedString {
            chars,
            section_index,
            sections,
            image_section_id: None,
        }
    }

    /// Append a text section
    pub fn add_text_section(&mut self, text: &str, scale: f32, font: &str) {
        let index = to_u32(self.sections.len());
        Arc::make_mut(&mut self.sections).push(Section::Text {
            scale,
            font: font.to_string(),
        });
        for c in text.chars() {
            self.chars.push(c);
            self.section_index.push(index);
        }
    }

    /// Append an image section
    ///
    /// The image is represented by the next free placeholder codepoint.
    pub fn add_image_section(&mut self, name: &str) {
        if name.is_empty() {
            log::warn!("TaggedString: can't add an image section with an empty name");
            return;
        }

        let Some(code) = self.next_image_section_char_code() else {
            log::warn!(
                "TaggedString: reached maximum number of images {}",
                PUA_END - PUA_BEGIN + 1
            );
            return;
        };

        let index = to_u32(self.sections.len());
        Arc::make_mut(&mut self.sections).push(Section::Image {
            name: name.to_string(),
        });
        self.chars.push(to_char(code));
        self.section_index.push(index);
    }

    fn next_image_section_char_code(&mut self) -> Option<u32> {
        let next = match self.image_section_id {
            None => PUA_BEGIN,
            Some(id) if id >= PUA_END => return None,
            Some(id) => id + 1,
        };
        self.image_section_id = Some(next);
        Some(next)
    }

    /// Number of characters
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True if there are no characters
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters, in order
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at `index`
    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }

    /// Section indices, one per character
    #[inline]
    pub fn section_indices(&self) -> &[u32] {
        &self.section_index
    }

    /// Index of the section of the character at `index`
    #[inline]
    pub fn section_index(&self, index: usize) -> u32 {
        self.section_index[index]
    }

    /// Section of the character at `index`
    #[inline]
    pub fn section(&self, index: usize) -> &Section {
        &self.sections[to_usize(self.section_index[index])]
    }

    /// All sections (including any not referenced by a character)
    #[inline]
    pub fn sections(&self) -> &Arc<Vec<Section>> {
        &self.sections
    }

    /// Replace punctuation with vertical forms, in place
    pub fn verticalize_punctuation(&mut self) {
        verticalize_punctuation(&mut self.chars);
    }

    /// Remove leading and trailing whitespace
    ///
    /// Characters and section indices are trimmed together.
    pub fn trim(&mut self) {
        let start = self
            .chars
            .iter()
            .position(|c| !is_whitespace(*c))
            .unwrap_or(self.chars.len());
        let end = self
            .chars
            .iter()
            .rposition(|c| !is_whitespace(*c))
            .map(|i| i + 1)
            .unwrap_or(start);

        self.chars.truncate(end);
        self.chars.drain(..start);
        self.section_index.truncate(end);
        self.section_index.drain(..start);
    }

    /// Extract `start..end`, sharing sections
    pub fn substring(&self, start: usize, end: usize) -> TaggedString {
        TaggedString {
            chars: self.chars[start..end].to_vec(),
            section_index: self.section_index[start..end].to_vec(),
            sections: self.sections.clone(),
            image_section_id: None,
        }
    }

    /// Split at the given break points
    ///
    /// Each break point is the start of a new line. Text after the last break
    /// point forms a final line.
    pub fn break_lines(&self, line_breaks: &[usize]) -> Vec<TaggedString> {
        let mut lines = Vec::with_capacity(line_breaks.len() + 1);
        let mut start = 0;
        for &line_break in line_breaks {
            lines.push(self.substring(start, line_break));
            start = line_break;
        }

        if start < self.len() {
            lines.push(self.substring(start, self.len()));
        }
        lines
    }

    /// Maximum scale over sections referenced by characters
    ///
    /// Returns 0 for an empty string.
    pub fn max_scale(&self) -> f32 {
        self.section_index
            .iter()
            .map(|index| self.sections[to_usize(*index)].scale())
            .fold(0.0, f32::max)
    }
}

impl std::fmt::Display for TaggedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
