//! Code points and romanization tables for Hangul.
//!
//! Jamo offsets refer to the Hangul Compatibility Jamo block
//! (<https://en.wikipedia.org/wiki/Hangul_Compatibility_Jamo>).

use crate::unicode::ranges::hangul_syllable_bounds;

pub const JAMO_START: u32 = 0x3130;
pub const MEDIAL_START: u32 = 0x314F;
pub const MEDIAL_END: u32 = 0x3163;

pub const SYLLABLES_START: u32 = hangul_syllable_bounds().0;
pub const SYLLABLES_END: u32 = hangul_syllable_bounds().1;

/// `syllable = SYLLABLES_START + initial * 588 + medial * 28 + final`
pub const INITIAL_STRIDE: u32 = 588;
pub const MEDIAL_STRIDE: u32 = 28;

/// Offsets from `JAMO_START` of the 19 consonants usable as a leading consonant
pub const INITIAL_OFFSETS: [u32; 19] = [
    1, 2, 4, 7, 8, 9, 17, 18, 19, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30,
];

/// Offsets from `JAMO_START` of final consonants; index 0 means "no final".
/// ㄸ (8), ㅃ (19) and ㅉ (25) never end a syllable.
pub const FINAL_OFFSETS: [u32; 28] = [
    0, 1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 20, 21, 22, 23, 24, 26, 27, 28,
    29, 30,
];

/// Whole-syllable spellings common in names
pub const ROMANIZED_SHORT_NAMES: &[(char, &str)] = &[('희', "hee"), ('이', "lee"), ('박', "park")];

/// Whole-word spellings of loanword names
pub const ROMANIZED_LONG_NAMES: &[(&str, &str)] = &[("죠지", "george"), ("일레인", "elaine")];

/// Consonant assimilation across a syllable boundary:
/// `(final, next initial) -> (final, next initial)`
pub const COMBO_CHANGES: &[((char, char), (char, char))] = &[
    (('ㄱ', 'ㄴ'), ('ㅇ', 'ㄴ')),
    (('ㅋ', 'ㄴ'), ('ㅇ', 'ㄴ')),
    (('ㄲ', 'ㄴ'), ('ㅇ', 'ㄴ')),
    (('ㄱ', 'ㅁ'), ('ㅇ', 'ㅁ')),
    (('ㅋ', 'ㅁ'), ('ㅇ', 'ㅁ')),
    (('ㄷ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㄷ', 'ㅁ'), ('ㄴ', 'ㅁ')),
    (('ㅅ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㅆ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㅅ', 'ㅁ'), ('ㄴ', 'ㅁ')),
    (('ㅈ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㅈ', 'ㅁ'), ('ㄴ', 'ㅁ')),
    (('ㅊ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㅊ', 'ㅁ'), ('ㄴ', 'ㅁ')),
    (('ㅌ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㅌ', 'ㅁ'), ('ㄴ', 'ㅁ')),
    (('ㅎ', 'ㄴ'), ('ㄴ', 'ㄴ')),
    (('ㅎ', 'ㅁ'), ('ㄴ', 'ㅁ')),
    (('ㅂ', 'ㄴ'), ('ㅁ', 'ㄴ')),
    (('ㅂ', 'ㅁ'), ('ㅁ', 'ㅁ')),
    (('ㅍ', 'ㄴ'), ('ㅁ', 'ㄴ')),
    (('ㅍ', 'ㅁ'), ('ㅁ', 'ㅁ')),
    (('ㄱ', 'ㅎ'), ('ㅋ', 'ㅇ')),
    (('ㅎ', 'ㄱ'), ('ㅋ', 'ㅇ')),
    (('ㅎ', 'ㄷ'), ('ㅌ', 'ㅇ')),
    (('ㄷ', 'ㅎ'), ('ㅌ', 'ㅇ')),
    (('ㅂ', 'ㅎ'), ('ㅍ', 'ㅇ')),
    (('ㅎ', 'ㅂ'), ('ㅍ', 'ㅇ')),
    (('ㅈ', 'ㅎ'), ('ㅊ', 'ㅇ')),
    (('ㅎ', 'ㅈ'), ('ㅊ', 'ㅇ')),
    (('ㅎ', 'ㅅ'), ('ㅆ', 'ㅇ')),
    (('ㄱ', 'ㅅ'), ('ㅆ', 'ㅇ')),
    (('ㄱ', 'ㄹ'), ('ㅇ', 'ㄴ')),
    (('ㄴ', 'ㄹ'), ('ㄹ', 'ㄹ')),
    (('ㄹ', 'ㄴ'), ('ㄹ', 'ㄹ')),
    (('ㅁ', 'ㄹ'), ('ㅁ', 'ㄴ')),
    (('ㅇ', 'ㄹ'), ('ㅇ', 'ㄴ')),
    (('ㅂ', 'ㄹ'), ('ㅁ', 'ㄴ')),
];

/// The assimilated `(final, initial)` pair for a syllable boundary, if any
pub fn combo_change(final_jamo: char, next_initial: char) -> Option<(char, char)> {
    COMBO_CHANGES
        .iter()
        .find(|(pair, _)| *pair == (final_jamo, next_initial))
        .map(|(_, changed)| *changed)
}

// Revised Romanization, indexed like the syllable formula

pub const REVISED_LEAD_CONSONANTS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "l", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];

pub const REVISED_VOWELS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we",
    "wi", "yu", "eu", "ui", "i",
];

pub const REVISED_END_CONSONANTS: [&str; 28] = [
    "", "g", "kk", "gs", "n", "nj", "nh", "d", "l", "lg", "lm", "lb", "ls", "lt", "lp", "lh", "m",
    "b", "bs", "s", "ss", "ng", "j", "ch", "k", "t", "p", "h",
];

/// `(lead, vowel, end)` used for name syllables by the single-guess romanizer
pub const REVISED_NAME_SYLLABLES: &[(char, (&str, &str, &str))] = &[
    ('희', ("h", "ee", "")),
    ('이', ("l", "ee", "")),
    ('박', ("p", "a", "rk")),
];

/// Index of the silent lead consonant ㅇ
pub const SILENT_INITIAL_INDEX: usize = 11;

#[cfg(test)]
mod constants_tests {
    use super::*;

    #[test]
    fn table_sizes_match_formula() {
        assert_eq!(INITIAL_OFFSETS.len(), REVISED_LEAD_CONSONANTS.len());
        assert_eq!(FINAL_OFFSETS.len(), REVISED_END_CONSONANTS.len());
        assert_eq!(
            SYLLABLES_START + 18 * INITIAL_STRIDE + 20 * MEDIAL_STRIDE + 27,
            SYLLABLES_END
        );
    }

    #[test]
    fn finals_skip_initial_only_consonants() {
        for excluded in [8, 19, 25] {
            assert!(!FINAL_OFFSETS.contains(&excluded));
        }
    }

    #[test]
    fn assimilation_lookup() {
        assert_eq!(combo_change('ㄴ', 'ㄹ'), Some(('ㄹ', 'ㄹ')));
        assert_eq!(combo_change('ㄱ', 'ㅁ'), Some(('ㅇ', 'ㅁ')));
        assert_eq!(combo_change('ㄴ', 'ㄱ'), None);
    }
}
