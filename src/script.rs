// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Codepoint classification
//!
//! Classification is by Unicode block. This is coarser than the
//! `Vertical_Orientation` and `Line_Break` properties but is sufficient to
//! decide line-break opportunities and glyph orientation for labels.

use std::ops::RangeInclusive;

type Block = RangeInclusive<u32>;

const LATIN_1_SUPPLEMENT: Block = 0x0080..=0x00FF;
const ARABIC: Block = 0x0600..=0x06FF;
const ARABIC_SUPPLEMENT: Block = 0x0750..=0x077F;
const ARABIC_EXTENDED_A: Block = 0x08A0..=0x08FF;
const HANGUL_JAMO: Block = 0x1100..=0x11FF;
const UNIFIED_CANADIAN_ABORIGINAL_SYLLABICS: Block = 0x1400..=0x167F;
const UNIFIED_CANADIAN_ABORIGINAL_SYLLABICS_EXTENDED: Block = 0x18B0..=0x18FF;
const GENERAL_PUNCTUATION: Block = 0x2000..=0x206F;
const LETTERLIKE_SYMBOLS: Block = 0x2100..=0x214F;
const NUMBER_FORMS: Block = 0x2150..=0x218F;
const MISCELLANEOUS_TECHNICAL: Block = 0x2300..=0x23FF;
const CONTROL_PICTURES: Block = 0x2400..=0x243F;
const OPTICAL_CHARACTER_RECOGNITION: Block = 0x2440..=0x245F;
const ENCLOSED_ALPHANUMERICS: Block = 0x2460..=0x24FF;
const GEOMETRIC_SHAPES: Block = 0x25A0..=0x25FF;
const MISCELLANEOUS_SYMBOLS: Block = 0x2600..=0x26FF;
const MISCELLANEOUS_SYMBOLS_AND_ARROWS: Block = 0x2B00..=0x2BFF;
const CJK_RADICALS_SUPPLEMENT: Block = 0x2E80..=0x2EFF;
const KANGXI_RADICALS: Block = 0x2F00..=0x2FDF;
const IDEOGRAPHIC_DESCRIPTION_CHARACTERS: Block = 0x2FF0..=0x2FFF;
const CJK_SYMBOLS_AND_PUNCTUATION: Block = 0x3000..=0x303F;
const HIRAGANA: Block = 0x3040..=0x309F;
const KATAKANA: Block = 0x30A0..=0x30FF;
const BOPOMOFO: Block = 0x3100..=0x312F;
const HANGUL_COMPATIBILITY_JAMO: Block = 0x3130..=0x318F;
const KANBUN: Block = 0x3190..=0x319F;
const BOPOMOFO_EXTENDED: Block = 0x31A0..=0x31BF;
const CJK_STROKES: Block = 0x31C0..=0x31EF;
const KATAKANA_PHONETIC_EXTENSIONS: Block = 0x31F0..=0x31FF;
const ENCLOSED_CJK_LETTERS_AND_MONTHS: Block = 0x3200..=0x32FF;
const CJK_COMPATIBILITY: Block = 0x3300..=0x33FF;
const CJK_UNIFIED_IDEOGRAPHS_EXTENSION_A: Block = 0x3400..=0x4DBF;
const YIJING_HEXAGRAM_SYMBOLS: Block = 0x4DC0..=0x4DFF;
const CJK_UNIFIED_IDEOGRAPHS: Block = 0x4E00..=0x9FFF;
const YI_SYLLABLES: Block = 0xA000..=0xA48F;
const YI_RADICALS: Block = 0xA490..=0xA4CF;
const HANGUL_JAMO_EXTENDED_A: Block = 0xA960..=0xA97F;
const HANGUL_SYLLABLES: Block = 0xAC00..=0xD7AF;
const HANGUL_JAMO_EXTENDED_B: Block = 0xD7B0..=0xD7FF;
const PRIVATE_USE_AREA: Block = 0xE000..=0xF8FF;
const CJK_COMPATIBILITY_IDEOGRAPHS: Block = 0xF900..=0xFAFF;
const ARABIC_PRESENTATION_FORMS_A: Block = 0xFB50..=0xFDFF;
const VERTICAL_FORMS: Block = 0xFE10..=0xFE1F;
const CJK_COMPATIBILITY_FORMS: Block = 0xFE30..=0xFE4F;
const SMALL_FORM_VARIANTS: Block = 0xFE50..=0xFE6F;
const ARABIC_PRESENTATION_FORMS_B: Block = 0xFE70..=0xFEFF;
const HALFWIDTH_AND_FULLWIDTH_FORMS: Block = 0xFF00..=0xFFEF;

#[inline]
fn in_any(c: u32, blocks: &[Block]) -> bool {
    blocks.iter().any(|block| block.contains(&c))
}

/// Whitespace for the purposes of line trimming and breaking
///
/// This is a fixed set: tab, line feed, vertical tab, form feed, carriage
/// return and space.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' ')
}

/// Characters after which a line may be broken
///
/// Many other characters may be reasonable breakpoints; this is a
/// conservative set of spaces and word-breaking punctuation.
#[inline]
pub fn is_breakable(c: char) -> bool {
    matches!(
        c,
        '\n' | ' '
            | '&'
            | '('
            | ')'
            | '+'
            | '-'
            | '/'
            | '\u{AD}'   // soft hyphen
            | '\u{B7}'   // middle dot
            | '\u{200B}' // zero-width space
            | '\u{2010}' // hyphen
            | '\u{2013}' // en dash
            | '\u{2027}' // interpunct
    )
}

/// True if a line may be broken after this character without a space
///
/// This covers ideographs, kana, and other CJK characters which are
/// conventionally written without word spacing.
pub fn char_allows_ideographic_breaking(c: char) -> bool {
    let c = u32::from(c);
    if c < 0x2E80 {
        return false;
    }
    in_any(
        c,
        &[
            BOPOMOFO_EXTENDED,
            BOPOMOFO,
            CJK_COMPATIBILITY_FORMS,
            CJK_COMPATIBILITY_IDEOGRAPHS,
            CJK_COMPATIBILITY,
            CJK_RADICALS_SUPPLEMENT,
            CJK_STROKES,
            CJK_SYMBOLS_AND_PUNCTUATION,
            CJK_UNIFIED_IDEOGRAPHS_EXTENSION_A,
            CJK_UNIFIED_IDEOGRAPHS,
            ENCLOSED_CJK_LETTERS_AND_MONTHS,
            HALFWIDTH_AND_FULLWIDTH_FORMS,
            HIRAGANA,
            IDEOGRAPHIC_DESCRIPTION_CHARACTERS,
            KANGXI_RADICALS,
            KATAKANA_PHONETIC_EXTENSIONS,
            KATAKANA,
            VERTICAL_FORMS,
            YI_RADICALS,
            YI_SYLLABLES,
        ],
    )
}

/// True if the character stays upright in vertical writing mode
pub fn char_has_upright_vertical_orientation(c: char) -> bool {
    let c = u32::from(c);
    // modifier letter yin/yang departing tone marks
    if c == 0x02EA || c == 0x02EB {
        return true;
    }
    if c < 0x1100 {
        return false;
    }

    if CJK_COMPATIBILITY_FORMS.contains(&c) {
        // excludes dashed overline .. wavy low line
        return !(0xFE49..=0xFE4F).contains(&c);
    }
    if CJK_SYMBOLS_AND_PUNCTUATION.contains(&c) {
        return !((0x3008..=0x3011).contains(&c) || (0x3014..=0x301F).contains(&c) || c == 0x3030);
    }
    if KATAKANA.contains(&c) {
        // prolonged sound mark
        return c != 0x30FC;
    }
    if HALFWIDTH_AND_FULLWIDTH_FORMS.contains(&c) {
        return !(c == 0xFF08
            || c == 0xFF09
            || c == 0xFF0D
            || (0xFF1A..=0xFF1E).contains(&c)
            || c == 0xFF3B
            || c == 0xFF3D
            || c == 0xFF3F
            || (0xFF5B..=0xFFDF).contains(&c)
            || c == 0xFFE3
            || (0xFFE8..=0xFFEF).contains(&c));
    }
    if SMALL_FORM_VARIANTS.contains(&c) {
        return !((0xFE58..=0xFE5E).contains(&c) || (0xFE63..=0xFE66).contains(&c));
    }

    in_any(
        c,
        &[
            BOPOMOFO_EXTENDED,
            BOPOMOFO,
            CJK_COMPATIBILITY_IDEOGRAPHS,
            CJK_COMPATIBILITY,
            CJK_RADICALS_SUPPLEMENT,
            CJK_STROKES,
            CJK_UNIFIED_IDEOGRAPHS_EXTENSION_A,
            CJK_UNIFIED_IDEOGRAPHS,
            ENCLOSED_CJK_LETTERS_AND_MONTHS,
            HANGUL_COMPATIBILITY_JAMO,
            HANGUL_JAMO_EXTENDED_A,
            HANGUL_JAMO_EXTENDED_B,
            HANGUL_JAMO,
            HANGUL_SYLLABLES,
            HIRAGANA,
            IDEOGRAPHIC_DESCRIPTION_CHARACTERS,
            KANBUN,
            KANGXI_RADICALS,
            KATAKANA_PHONETIC_EXTENSIONS,
            UNIFIED_CANADIAN_ABORIGINAL_SYLLABICS,
            UNIFIED_CANADIAN_ABORIGINAL_SYLLABICS_EXTENDED,
            VERTICAL_FORMS,
            YIJING_HEXAGRAM_SYMBOLS,
            YI_SYLLABLES,
            YI_RADICALS,
        ],
    )
}

/// True if the character may be either upright or rotated in vertical mode
pub fn char_has_neutral_vertical_orientation(c: char) -> bool {
    let c = u32::from(c);
    if LATIN_1_SUPPLEMENT.contains(&c) {
        return matches!(
            c,
            0x00A7 | 0x00A9 | 0x00AE | 0x00B1 | 0x00BC | 0x00BD | 0x00BE | 0x00D7 | 0x00F7
        );
    }
    if GENERAL_PUNCTUATION.contains(&c) {
        return matches!(
            c,
            0x2016
                | 0x2020
                | 0x2021
                | 0x2030
                | 0x2031
                | 0x203B
                | 0x203C
                | 0x2042
                | 0x2047
                | 0x2048
                | 0x2049
                | 0x2051
        );
    }
    if MISCELLANEOUS_TECHNICAL.contains(&c) {
        return (0x2300..=0x2307).contains(&c)
            || (0x230C..=0x231F).contains(&c)
            || (0x2324..=0x2328).contains(&c)
            || c == 0x232B
            || (0x237D..=0x239A).contains(&c)
            || (0x23BE..=0x23CD).contains(&c)
            || c == 0x23CF
            || (0x23D1..=0x23DB).contains(&c)
            || (0x23E2..=0x23FF).contains(&c);
    }
    if CONTROL_PICTURES.contains(&c) {
        return c != 0x2423;
    }
    if MISCELLANEOUS_SYMBOLS.contains(&c) {
        return !(0x261A..=0x261F).contains(&c);
    }
    if MISCELLANEOUS_SYMBOLS_AND_ARROWS.contains(&c) {
        return (0x2B12..=0x2B2F).contains(&c)
            || (0x2B50..=0x2B59).contains(&c)
            || (0x2BB8..=0x2BEB).contains(&c);
    }

    in_any(
        c,
        &[
            LETTERLIKE_SYMBOLS,
            NUMBER_FORMS,
            OPTICAL_CHARACTER_RECOGNITION,
            ENCLOSED_ALPHANUMERICS,
            GEOMETRIC_SHAPES,
            CJK_SYMBOLS_AND_PUNCTUATION,
            KATAKANA,
            PRIVATE_USE_AREA,
            CJK_COMPATIBILITY_FORMS,
            SMALL_FORM_VARIANTS,
            HALFWIDTH_AND_FULLWIDTH_FORMS,
        ],
    ) || c == 0x221E
        || c == 0x2234
        || c == 0x2235
        || (0x2700..=0x2767).contains(&c)
        || (0x2776..=0x2793).contains(&c)
        || c == 0xFFFC
        || c == 0xFFFD
}

/// True if the character is rotated sideways in vertical writing mode
#[inline]
pub fn char_has_rotated_vertical_orientation(c: char) -> bool {
    !(char_has_upright_vertical_orientation(c) || char_has_neutral_vertical_orientation(c))
}

/// True if the character belongs to a script requiring complex shaping
///
/// Such characters join with their neighbours and must never be placed
/// individually in vertical cells.
pub fn char_in_complex_shaping_script(c: char) -> bool {
    in_any(
        u32::from(c),
        &[
            ARABIC,
            ARABIC_SUPPLEMENT,
            ARABIC_EXTENDED_A,
            ARABIC_PRESENTATION_FORMS_A,
            ARABIC_PRESENTATION_FORMS_B,
        ],
    )
}

/// Get the vertical presentation form of a punctuation character
pub fn vertical_form(c: char) -> Option<char> {
    Some(match c {
        '!' => '︕',
        '#' => '＃',
        '$' => '＄',
        '%' => '％',
        '&' => '＆',
        '(' => '︵',
        ')' => '︶',
        '*' => '＊',
        '+' => '＋',
        ',' => '︐',
        '-' => '︲',
        '.' => '・',
        '/' => '／',
        ':' => '︓',
        ';' => '︔',
        '<' => '︿',
        '=' => '＝',
        '>' => '﹀',
        '?' => '︖',
        '@' => '＠',
        '[' => '﹇',
        '\\' => '＼',
        ']' => '﹈',
        '^' => '＾',
        '_' => '︳',
        '`' => '｀',
        '{' => '︷',
        '|' => '―',
        '}' => '︸',
        '~' => '～',
        '¢' => '￠',
        '£' => '￡',
        '¥' => '￥',
        '¦' => '￤',
        '¬' => '￢',
        '¯' => '￣',
        '–' => '︲',
        '—' => '︱',
        '‘' => '﹃',
        '’' => '﹄',
        '“' => '﹁',
        '”' => '﹂',
        '…' => '︙',
        '‧' => '・',
        '₩' => '￦',
        '、' => '︑',
        '。' => '︒',
        '〈' => '︿',
        '〉' => '﹀',
        '《' => '︽',
        '》' => '︾',
        '「' => '﹁',
        '」' => '﹂',
        '『' => '﹃',
        '』' => '﹄',
        '【' => '︻',
        '】' => '︼',
        '〔' => '︹',
        '〕' => '︺',
        '〖' => '︗',
        '〗' => '︘',
        '！' => '︕',
        '（' => '︵',
        '）' => '︶',
        '，' => '︐',
        '－' => '︲',
        '．' => '・',
        '：' => '︓',
        '；' => '︔',
        '＜' => '︿',
        '＞' => '﹀',
        '？' => '︖',
        '［' => '﹇',
        '］' => '﹈',
        '＿' => '︳',
        '｛' => '︷',
        '｜' => '―',
        '｝' => '︸',
        '｟' => '︵',
        '｠' => '︶',
        '｡' => '︒',
        '｢' => '﹁',
        '｣' => '﹂',
        _ => return None,
    })
}

/// Replace punctuation with vertical presentation forms
///
/// A character is only replaced if neither neighbour is a sideways-rotated
/// character (unless that neighbour is itself replaceable): punctuation
/// within a run of rotated Latin text stays as-is.
pub fn verticalize_punctuation(chars: &mut [char]) {
    let keeps_context = |c: Option<char>| match c {
        None => true,
        Some(c) => !char_has_rotated_vertical_orientation(c) || vertical_form(c).is_some(),
    };

    // Decisions depend on the unmodified neighbours, so compute all first
    let replacements: Vec<Option<char>> = (0..chars.len())
        .map(|i| {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            if keeps_context(prev) && keeps_context(next) {
                vertical_form(chars[i])
            } else {
                None
            }
        })
        .collect();

    for (c, replacement) in chars.iter_mut().zip(replacements) {
        if let Some(r) = replacement {
            *c = r;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ideographic_breaking() {
        assert!(char_allows_ideographic_breaking('中'));
        assert!(char_allows_ideographic_breaking('あ'));
        assert!(char_allows_ideographic_breaking('カ'));
        assert!(!char_allows_ideographic_breaking('a'));
        assert!(!char_allows_ideographic_breaking('한'));
    }

    #[test]
    fn upright() {
        assert!(char_has_upright_vertical_orientation('中'));
        assert!(char_has_upright_vertical_orientation('한'));
        assert!(!char_has_upright_vertical_orientation('a'));
        assert!(!char_has_upright_vertical_orientation('ー'));
        assert!(!char_has_upright_vertical_orientation('〈'));
        assert!(char_has_upright_vertical_orientation('、'));
    }

    #[test]
    fn rotated() {
        assert!(char_has_rotated_vertical_orientation('a'));
        assert!(!char_has_rotated_vertical_orientation('中'));
        assert!(!char_has_rotated_vertical_orientation('\u{E000}'));
    }

    #[test]
    fn complex_script() {
        assert!(char_in_complex_shaping_script('ع'));
        assert!(!char_in_complex_shaping_script('a'));
        assert!(!char_in_complex_shaping_script('中'));
    }

    #[test]
    fn verticalize() {
        let mut chars: Vec<char> = "中(国)".chars().collect();
        verticalize_punctuation(&mut chars);
        assert_eq!(chars.iter().collect::<String>(), "中︵国︶");

        // Punctuation adjacent to rotated Latin text is kept
        let mut chars: Vec<char> = "a-b".chars().collect();
        verticalize_punctuation(&mut chars);
        assert_eq!(chars.iter().collect::<String>(), "a-b");

        let mut chars: Vec<char> = "中。".chars().collect();
        verticalize_punctuation(&mut chars);
        assert_eq!(chars.iter().collect::<String>(), "中︒");
    }
}
