//! Unicode code point ranges per script, as inclusive `(start, end)` pairs.
//!
//! See <https://www.unicode.org/charts/> for the block boundaries.

pub type CodeRange = (u32, u32);

pub const LATIN_RANGES: &[CodeRange] = &[
    (0x0000, 0x024F), // Basic Latin through Latin Extended-B
    (0x1E00, 0x1EFF), // Latin Extended Additional
    (0x2C60, 0x2C7F), // Latin Extended-C
    (0xA720, 0xA7FF), // Latin Extended-D
    (0xAB30, 0xAB6F), // Latin Extended-E
];

pub const GREEK_RANGES: &[CodeRange] = &[
    (0x0370, 0x03FF),
    (0x2C80, 0x2CFF),   // Coptic
    (0x102E0, 0x102FF), // Coptic Epact Numbers
    (0x1F00, 0x1FFF),   // Greek Extended
];

pub const CYRILLIC_RANGES: &[CodeRange] = &[
    (0x0400, 0x052F), // Cyrillic + Supplement
    (0x2DE0, 0x2DFF), // Extended-A
    (0xA640, 0xA69F), // Extended-B
    (0x1C80, 0x1C8F), // Extended-C
    (0x1D2B, 0x1D78), // Phonetic Extensions
    (0xFE2E, 0xFE2F), // Combining Half Marks
];

pub const HANGUL_RANGES: &[CodeRange] = &[
    (0xAC00, 0xD7A3), // Hangul Syllables; must stay first
    (0x1100, 0x11FF), // Hangul Jamo
    (0x3130, 0x318F), // Hangul Compatibility Jamo
    (0xA960, 0xA97F), // Hangul Jamo Extended-A
    (0xD7B0, 0xD7FF), // Hangul Jamo Extended-B
    (0xFFA0, 0xFFDC), // Halfwidth Hangul
];

pub const CJK_RANGES: &[CodeRange] = &[
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0x3400, 0x4DBF),   // Extension A
    (0x20000, 0x2A6DF), // Extension B
    (0x2A700, 0x2EBEF), // Extensions C-F
    (0x2E80, 0x303F),   // Radicals, Kangxi, Ideographic Description, Symbols and Punctuation
    (0x31C0, 0x31EF),   // CJK Strokes
    (0x3200, 0x33FF),   // Enclosed CJK Letters and Months, Compatibility
    (0xF900, 0xFAFF),   // Compatibility Ideographs
    (0xFE30, 0xFE4F),   // Compatibility Forms
    (0x1F200, 0x1F2FF), // Enclosed Ideographic Supplement
    (0x2F800, 0x2FA1F), // Compatibility Ideographs Supplement
];

pub const KATAKANA_RANGES: &[CodeRange] = &[
    (0x30A0, 0x30FF),
    (0xFF65, 0xFF9F),   // Halfwidth Katakana
    (0x32D0, 0x32FE),   // Circled Katakana
    (0x31F0, 0x31FF),   // Phonetic Extensions
    (0x1B000, 0x1B0FF), // Kana Supplement
    (0x3099, 0x309C),   // Combining (semi-)voiced marks
    (0x1F201, 0x1F202), // Squared Katakana
    (0x1F213, 0x1F213),
];

pub const HIRAGANA_RANGES: &[CodeRange] = &[
    (0x3040, 0x309F),
    (0x1B100, 0x1B120), // Kana Extended-A
];

pub const THAI_RANGES: &[CodeRange] = &[(0x0E00, 0x0E7F)];

pub const JAPANESE_RANGES: &[&[CodeRange]] = &[KATAKANA_RANGES, HIRAGANA_RANGES];

/// Everything treated as "Asian text" by the any-CJK predicates
pub const NON_ENG_RANGES: &[&[CodeRange]] = &[
    HANGUL_RANGES,
    KATAKANA_RANGES,
    HIRAGANA_RANGES,
    CJK_RANGES,
    THAI_RANGES,
];

pub fn in_ranges(c: char, ranges: &[CodeRange]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(start, end)| start <= cp && cp <= end)
}

pub fn in_any_ranges(c: char, range_sets: &[&[CodeRange]]) -> bool {
    range_sets.iter().any(|ranges| in_ranges(c, ranges))
}

/// Inclusive bounds of the precomposed Hangul syllable block
pub const fn hangul_syllable_bounds() -> CodeRange {
    HANGUL_RANGES[0]
}
