// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Line breaking
//!
//! Break points are chosen to minimise total "badness": the squared deviation
//! of each line's width from a target width, plus penalties for undesirable
//! break points. The target width is the total width divided evenly over the
//! minimum number of lines, so that lines are balanced rather than filled
//! greedily (avoiding a short final line).
//!
//! This is a shortest-path problem over candidate break points, solved by
//! dynamic programming. Lines longer than the maximum width are allowed when
//! no better break exists.

use crate::positions::{GlyphPositions, ImagePositions};
use crate::script::{char_allows_ideographic_breaking, is_breakable, is_whitespace};
use crate::tagged::{Section, TaggedString};
use crate::{SymbolPlacement, BASE_FONT_RATIO};

/// Penalty forcing a break after a newline
const NEWLINE_PENALTY: f32 = -10000.0;
/// Penalty for a break between ideographic characters
const IDEOGRAPHIC_PENALTY: f32 = 150.0;
/// Penalty for an opening parenthesis at line end or a closing one at line start
const PARENTHESIS_PENALTY: f32 = 50.0;

/// Advance of a character, if it resolves against the position tables
pub(crate) fn glyph_advance(
    c: char,
    section: &Section,
    glyphs: &GlyphPositions,
    images: &ImagePositions,
    spacing: f32,
) -> Option<f32> {
    match section {
        Section::Text { scale, font } => {
            let glyph = glyphs.get(font)?.get(&u32::from(c))?;
            Some(glyph.metrics.advance * scale + spacing)
        }
        Section::Image { name } => {
            let image = images.get(name)?;
            Some(image.display_size[0] * section.scale() * BASE_FONT_RATIO + spacing)
        }
    }
}

fn average_line_width(
    input: &TaggedString,
    spacing: f32,
    max_width: f32,
    glyphs: &GlyphPositions,
    images: &ImagePositions,
) -> f32 {
    let total_width: f32 = (0..input.len())
        .filter_map(|i| glyph_advance(input.char_at(i), input.section(i), glyphs, images, spacing))
        .sum();

    let line_count = (total_width / max_width).ceil().max(1.0);
    total_width / line_count
}

/// Badness of a single line
pub(crate) fn badness(line_width: f32, target_width: f32, penalty: f32, is_last_break: bool) -> f32 {
    let raggedness = (line_width - target_width).powi(2);
    if is_last_break {
        // Favor final lines shorter than average over longer than average
        if line_width < target_width {
            return raggedness / 2.0;
        } else {
            return raggedness * 2.0;
        }
    }

    raggedness + penalty.abs() * penalty
}

/// Penalty of breaking between `c` and `next`
pub(crate) fn penalty(c: char, next: char, penalizable_ideographic_break: bool) -> f32 {
    let mut penalty = 0.0;
    if c == '\n' {
        penalty += NEWLINE_PENALTY;
    }
    // Breaks between ideographs are less preferable than at (zero-width)
    // spaces, where the latter are present
    if penalizable_ideographic_break {
        penalty += IDEOGRAPHIC_PENALTY;
    }
    if c == '(' || c == '\u{FF08}' {
        penalty += PARENTHESIS_PENALTY;
    }
    if next == ')' || next == '\u{FF09}' {
        penalty += PARENTHESIS_PENALTY;
    }
    penalty
}

/// A candidate break point
#[derive(Clone, Copy, Debug)]
struct Break {
    /// Char index at which the next line starts
    index: usize,
    /// Position of the break
    x: f32,
    /// Index of the best prior break in the candidate list, if any
    prior: Option<usize>,
    /// Total badness of lines up to this break
    badness: f32,
}

fn evaluate_break(
    index: usize,
    x: f32,
    target_width: f32,
    candidates: &[Break],
    penalty: f32,
    is_last_break: bool,
) -> Break {
    let mut prior = None;
    let mut best = badness(x, target_width, penalty, is_last_break);

    for (i, candidate) in candidates.iter().enumerate() {
        let line_width = x - candidate.x;
        let value = badness(line_width, target_width, penalty, is_last_break) + candidate.badness;
        if value <= best {
            prior = Some(i);
            best = value;
        }
    }

    Break {
        index,
        x,
        prior,
        badness: best,
    }
}

fn least_bad_breaks(candidates: &[Break], last: Break) -> Vec<usize> {
    let mut breaks = vec![last.index];
    let mut prior = last.prior;
    while let Some(i) = prior {
        breaks.push(candidates[i].index);
        prior = candidates[i].prior;
    }
    breaks.reverse();
    breaks
}

/// Determine line break points
///
/// Returns the char indices at which each line ends, in increasing order.
/// The last entry is always the length of the input (the terminal break).
///
/// Returns an empty list if `placement` is not [`SymbolPlacement::Point`] or
/// if `input` is empty.
pub fn determine_line_breaks(
    input: &TaggedString,
    spacing: f32,
    max_width: f32,
    glyphs: &GlyphPositions,
    images: &ImagePositions,
    placement: SymbolPlacement,
) -> Vec<usize> {
    if placement != SymbolPlacement::Point || input.is_empty() {
        return vec![];
    }

    let target_width = average_line_width(input, spacing, max_width, glyphs, images);
    let has_suggested_breaks = input.chars().contains(&'\u{200B}');

    let mut candidates: Vec<Break> = Vec::new();
    let mut x = 0.0;
    let len = input.len();

    for i in 0..len {
        let c = input.char_at(i);
        if !is_whitespace(c) {
            x += glyph_advance(c, input.section(i), glyphs, images, spacing).unwrap_or(0.0);
        }

        if i + 1 < len {
            let ideographic_break = char_allows_ideographic_breaking(c);
            if is_breakable(c) || ideographic_break {
                let penalty = penalty(
                    c,
                    input.char_at(i + 1),
                    ideographic_break && has_suggested_breaks,
                );
                let candidate = evaluate_break(i + 1, x, target_width, &candidates, penalty, false);
                candidates.push(candidate);
            }
        }
    }

    let last = evaluate_break(len, x, target_width, &candidates, 0.0, true);
    least_bad_breaks(&candidates, last)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::positions::{GlyphMetrics, GlyphPosition};
    use crate::Rect;
    use std::collections::HashMap;

    fn fixed_width_font(chars: &str, advance: f32) -> GlyphPositions {
        let mut font = HashMap::new();
        for c in chars.chars() {
            let metrics = GlyphMetrics {
                width: advance,
                height: 20.0,
                left: 0.0,
                top: -8.0,
                advance,
            };
            let rect = Some(Rect::new(0.0, 0.0, advance + 6.0, 26.0));
            font.insert(u32::from(c), GlyphPosition { metrics, rect });
        }
        let mut glyphs = HashMap::new();
        glyphs.insert("test".to_string(), font);
        glyphs
    }

    fn tagged(text: &str) -> TaggedString {
        let mut s = TaggedString::new();
        s.add_text_section(text, 1.0, "test");
        s
    }

    const CHARS: &str = "abcdefghijklmnopqrstuvwxyz ()-\n\u{200B}中国人民";

    fn breaks(text: &str, max_width: f32) -> Vec<usize> {
        let glyphs = fixed_width_font(CHARS, 10.0);
        let images = HashMap::new();
        determine_line_breaks(&tagged(text), 0.0, max_width, &glyphs, &images, SymbolPlacement::Point)
    }

    #[test]
    fn badness_last_line() {
        assert_eq!(badness(8.0, 10.0, 0.0, true), 2.0);
        assert_eq!(badness(12.0, 10.0, 0.0, true), 8.0);
        assert_eq!(badness(12.0, 10.0, 3.0, false), 13.0);
        assert_eq!(badness(12.0, 10.0, -3.0, false), -5.0);
    }

    #[test]
    fn penalties() {
        assert_eq!(penalty('\n', 'a', false), -10000.0);
        assert_eq!(penalty('a', 'b', true), 150.0);
        assert_eq!(penalty('(', ')', false), 100.0);
        assert_eq!(penalty(' ', 'a', false), 0.0);
    }

    #[test]
    fn not_point_placement() {
        let glyphs = fixed_width_font(CHARS, 10.0);
        let images = HashMap::new();
        let input = tagged("abc def");
        for placement in [SymbolPlacement::Line, SymbolPlacement::LineCenter] {
            let breaks = determine_line_breaks(&input, 0.0, 10.0, &glyphs, &images, placement);
            assert!(breaks.is_empty());
        }
    }

    #[test]
    fn empty() {
        assert!(breaks("", 100.0).is_empty());
    }

    #[test]
    fn no_breakable() {
        assert_eq!(breaks("abcdefghij", 30.0), vec![10]);
    }

    #[test]
    fn wide_enough() {
        assert_eq!(breaks("ab cd", 1000.0), vec![5]);
    }

    #[test]
    fn balanced() {
        // Total 110 (spaces count), target 55: break after "aaaa "
        assert_eq!(breaks("aaaa bbbbbb", 60.0), vec![5, 11]);
    }

    #[test]
    fn balanced_three() {
        // Total 110, target 36.7: three lines of equal length
        assert_eq!(breaks("aaa bbb ccc", 40.0), vec![4, 8, 11]);
        // Total 110, target 55: "aaa bbb" then "ccc" beats "aaa" then "bbb ccc"
        assert_eq!(breaks("aaa bbb ccc", 70.0), vec![8, 11]);
    }

    #[test]
    fn newline_forced() {
        assert_eq!(breaks("ab\ncd", 1000.0), vec![3, 5]);
    }

    #[test]
    fn overflow_allowed() {
        // No break point: a single over-long line
        assert_eq!(breaks("abcdefghij klm", 30.0), vec![11, 14]);
    }

    #[test]
    fn ideographic() {
        let text = "中国人民";
        assert_eq!(breaks(text, 20.0), vec![2, 4]);
    }

    #[test]
    fn suggested_break_preferred() {
        // With a zero-width space present, ideographic breaks are penalized
        assert_eq!(breaks("中国人\u{200B}民", 30.0), vec![4, 5]);
        // Without one, the balanced ideographic break wins
        assert_eq!(breaks("中国人民", 30.0), vec![2, 4]);
    }
}
