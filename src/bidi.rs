// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Bidirectional text support
//!
//! Bidi reordering is an optional capability supplied by the caller as a
//! [`BidiProcessor`]. Line breaks are always determined on the logical text;
//! the processor then splits the text at these breaks and reorders each line
//! into visual order.
//!
//! [`UnicodeBidi`] is an implementation over the `unicode-bidi` crate.

use std::ops::Range;
use unicode_bidi::BidiInfo;

/// A line in visual order, with section indices
pub type StyledLine = (String, Vec<u32>);

/// Reorders logical text into visual lines
///
/// Line break positions are char offsets into the logical text; each marks
/// the start of a new line. Text after the last break forms a final line.
///
/// A processor is registered once (e.g. in a `static`) and shared by all
/// shaping calls, hence the `Sync` bound.
pub trait BidiProcessor: Sync {
    /// Reorder un-styled text
    fn process(&self, text: &str, line_breaks: &[usize]) -> Vec<String>;

    /// Reorder text along with per-character section indices
    ///
    /// Returns `None` if style-aware processing is not supported, in which
    /// case multi-section text is not reordered.
    fn process_styled(
        &self,
        text: &str,
        section_index: &[u32],
        line_breaks: &[usize],
    ) -> Option<Vec<StyledLine>> {
        let _ = (text, section_index, line_breaks);
        None
    }
}

/// Implementation of [`BidiProcessor`] using Unicode TR9
///
/// Characters of right-to-left runs are reversed and, where a mirrored glyph
/// exists (e.g. brackets), mirrored.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeBidi;

impl UnicodeBidi {
    /// Visual order of each line as `(char index, char, rtl)`
    fn reorder(text: &str, line_breaks: &[usize]) -> Vec<Vec<(usize, char, bool)>> {
        let char_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let len = char_offsets.len();
        let byte_offset = |index: usize| char_offsets.get(index).copied().unwrap_or(text.len());
        let char_index = |offset: usize| match char_offsets.binary_search(&offset) {
            Ok(i) | Err(i) => i,
        };

        let mut ranges = Vec::with_capacity(line_breaks.len() + 1);
        let mut start = 0;
        for &line_break in line_breaks {
            ranges.push(start..line_break);
            start = line_break;
        }
        if start < len {
            ranges.push(start..len);
        }

        let info = BidiInfo::new(text, None);

        ranges
            .into_iter()
            .map(|range| {
                let line = byte_offset(range.start)..byte_offset(range.end);
                let mut visual = Vec::with_capacity(range.len());
                for para in &info.paragraphs {
                    let part = para.range.start.max(line.start)..para.range.end.min(line.end);
                    if part.start >= part.end {
                        continue;
                    }
                    let (levels, runs) = info.visual_runs(para, part);
                    for run in runs {
                        let rtl = levels[run.start].is_rtl();
                        let mut chars = run_chars(text, run, &char_index);
                        if rtl {
                            chars.reverse();
                        }
                        visual.extend(chars.into_iter().map(|(i, c)| (i, c, rtl)));
                    }
                }
                visual
            })
            .collect()
    }
}

fn run_chars(text: &str, run: Range<usize>, char_index: &impl Fn(usize) -> usize) -> Vec<(usize, char)> {
    text[run.clone()]
        .char_indices()
        .map(|(i, c)| (char_index(run.start + i), c))
        .collect()
}

#[inline]
fn visual_char(c: char, rtl: bool) -> char {
    if rtl {
        unicode_bidi_mirroring::get_mirrored(c).unwrap_or(c)
    } else {
        c
    }
}

impl BidiProcessor for UnicodeBidi {
    fn process(&self, text: &str, line_breaks: &[usize]) -> Vec<String> {
        Self::reorder(text, line_breaks)
            .into_iter()
            .map(|line| line.into_iter().map(|(_, c, rtl)| visual_char(c, rtl)).collect())
            .collect()
    }

    fn process_styled(
        &self,
        text: &str,
        section_index: &[u32],
        line_breaks: &[usize],
    ) -> Option<Vec<StyledLine>> {
        let lines = Self::reorder(text, line_breaks)
            .into_iter()
            .map(|line| {
                let mut s = String::with_capacity(line.len());
                let mut indices = Vec::with_capacity(line.len());
                for (i, c, rtl) in line {
                    s.push(visual_char(c, rtl));
                    indices.push(section_index.get(i).copied().unwrap_or(0));
                }
                (s, indices)
            })
            .collect();
        Some(lines)
    }
}
