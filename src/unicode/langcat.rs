//! Script/language categorization of text based on Unicode ranges.

use std::collections::BTreeSet;
use std::fmt;

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cache::Memo;
use crate::error::LangCatError;
use crate::hangul::matches_hangul_permutation;
use crate::unicode::ranges::{
    in_any_ranges, in_ranges, CodeRange, CJK_RANGES, CYRILLIC_RANGES, GREEK_RANGES, HANGUL_RANGES,
    JAPANESE_RANGES, LATIN_RANGES, NON_ENG_RANGES, THAI_RANGES,
};

lazy_static! {
    // Digits, whitespace, punctuation and symbols carry no language information
    static ref NON_WORD_CHARS: Regex = Regex::new(r"[\d\s\p{P}\p{S}]+").unwrap();
    static ref PUNC_OR_SYMBOL: Regex = Regex::new(r"^[\p{P}\p{S}]$").unwrap();
    // ASCII punctuation plus any whitespace
    static ref PUNCTUATION_AND_SPACE: Regex = Regex::new(r"[\s[:punct:]]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

static CATEGORIZE_CACHE: Lazy<Memo<String, LangCat>> = Lazy::new(|| Memo::new(1024));

/// Script category of a character or string.
///
/// Variants are ordered so that sorting groups English before the Asian and
/// other non-English scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LangCat {
    Unk,
    Nul,
    Mix,
    Eng,
    Han,
    Jpn,
    Cjk,
    Thai,
    Grk,
    Cyr,
}

/// Range tables checked in priority order for single characters
const CATEGORY_RANGES: &[(LangCat, &[&[CodeRange]])] = &[
    (LangCat::Eng, &[LATIN_RANGES]),
    (LangCat::Han, &[HANGUL_RANGES]),
    (LangCat::Jpn, JAPANESE_RANGES),
    (LangCat::Thai, &[THAI_RANGES]),
    (LangCat::Cjk, &[CJK_RANGES]),
    (LangCat::Grk, &[GREEK_RANGES]),
    (LangCat::Cyr, &[CYRILLIC_RANGES]),
];

impl LangCat {
    /// Categories treated as "not English" when pairing names
    pub const NON_ENG: [LangCat; 7] = [
        LangCat::Unk,
        LangCat::Han,
        LangCat::Jpn,
        LangCat::Cjk,
        LangCat::Thai,
        LangCat::Grk,
        LangCat::Cyr,
    ];

    pub const ASIAN: [LangCat; 4] = [LangCat::Han, LangCat::Jpn, LangCat::Cjk, LangCat::Thai];

    pub fn is_non_eng(self) -> bool {
        Self::NON_ENG.contains(&self)
    }

    pub fn is_asian(self) -> bool {
        Self::ASIAN.contains(&self)
    }

    /// English or empty
    pub fn is_eng_or_nul(self) -> bool {
        matches!(self, LangCat::Eng | LangCat::Nul)
    }

    pub fn full_name(self) -> &'static str {
        match self {
            LangCat::Unk => "UNKNOWN",
            LangCat::Nul => "NULL",
            LangCat::Mix => "MIX",
            LangCat::Eng => "English",
            LangCat::Han => "Korean",
            LangCat::Jpn => "Japanese",
            LangCat::Cjk => "Chinese",
            LangCat::Thai => "Thai",
            LangCat::Grk => "Greek",
            LangCat::Cyr => "Cyrillic",
        }
    }

    pub fn categorize_char(c: char) -> LangCat {
        CATEGORY_RANGES
            .iter()
            .find(|(_, ranges)| in_any_ranges(c, ranges))
            .map(|(cat, _)| *cat)
            .unwrap_or(LangCat::Unk)
    }

    /// Category of a whole string.
    ///
    /// A single character is categorized as-is. Longer strings are stripped of
    /// digits, whitespace, punctuation and symbols first; nothing left means
    /// `Nul`, more than one remaining category means `Mix`.
    pub fn categorize(text: &str) -> LangCat {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => LangCat::Nul,
            (Some(c), None) => Self::categorize_char(c),
            _ => CATEGORIZE_CACHE.get_or_insert_with(text.to_string(), || categorize_stripped(text)),
        }
    }

    /// The set of categories of the word characters in `text`
    pub fn categorize_detailed(text: &str) -> BTreeSet<LangCat> {
        let stripped = strip_non_word_chars(text);
        if stripped.is_empty() {
            return BTreeSet::from([LangCat::Nul]);
        }
        stripped.chars().map(Self::categorize_char).collect()
    }

    pub fn categorize_all<S: AsRef<str>>(texts: &[S]) -> Vec<LangCat> {
        texts.iter().map(|t| Self::categorize(t.as_ref())).collect()
    }

    pub fn matches(text: &str, cat: LangCat) -> bool {
        Self::categorize(text) == cat
    }

    /// True when the detailed categories of `text` are exactly `cats`
    pub fn matches_detailed(text: &str, cats: &[LangCat]) -> bool {
        let expected: BTreeSet<LangCat> = cats.iter().copied().collect();
        Self::categorize_detailed(text) == expected
    }

    /// True if any word character of `text` falls in one of `cats`.
    /// Asking for `Mix` checks whether the whole string is mixed; an empty
    /// string only matches `Nul`.
    pub fn contains_any(text: &str, cats: &[LangCat]) -> bool {
        if cats.contains(&LangCat::Mix) {
            return Self::categorize(text) == LangCat::Mix;
        }
        let stripped = if text.chars().nth(1).is_some() {
            strip_non_word_chars(text)
        } else {
            text.to_string()
        };
        if stripped.is_empty() {
            return cats.contains(&LangCat::Nul);
        }
        stripped
            .chars()
            .any(|c| cats.contains(&Self::categorize_char(c)))
    }

    /// True if any word character of `text` is not in `cat`
    pub fn contains_any_not(text: &str, cat: LangCat) -> Result<bool, LangCatError> {
        if cat == LangCat::Mix {
            return Err(LangCatError::UnsupportedCategory(cat));
        }
        let stripped = if text.chars().nth(1).is_some() {
            strip_non_word_chars(text)
        } else {
            text.to_string()
        };
        if stripped.is_empty() {
            return Ok(cat != LangCat::Nul);
        }
        Ok(stripped.chars().any(|c| Self::categorize_char(c) != cat))
    }

    /// Category for a language name or abbreviation, e.g. `kr` -> `Han`
    pub fn for_name(language: &str) -> LangCat {
        match language.trim().to_lowercase().as_str() {
            // Latin script, not strictly English
            "english" | "eng" | "en" | "spanish" => LangCat::Eng,
            "korean" | "hangul" | "kor" | "kr" | "ko" => LangCat::Han,
            "japanese" | "jp" | "jpn" | "jap" => LangCat::Jpn,
            "thai" => LangCat::Thai,
            "chinese" | "mandarin" | "chn" => LangCat::Cjk,
            "russian" => LangCat::Cyr,
            "greek" => LangCat::Grk,
            _ => LangCat::Unk,
        }
    }

    /// Split `text` into runs of a single script.
    ///
    /// Punctuation, symbols and whitespace never start a new run. An opening
    /// paren directly before a script change moves to the new run, so
    /// `"Name(이름)"` splits into `"Name"` and `"(이름)"`.
    pub fn split(text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut boundaries = Vec::new();
        let mut last: Option<LangCat> = None;
        let mut prev: Option<(usize, char)> = None;
        for (idx, c) in text.char_indices() {
            if !is_punc_or_symbol(c) {
                let current = Self::categorize_char(c);
                match last {
                    None => last = Some(current),
                    Some(cat) if cat != current => {
                        last = Some(current);
                        match prev {
                            Some((paren_idx, '(')) => boundaries.push(paren_idx),
                            _ => boundaries.push(idx),
                        }
                    }
                    Some(_) => {}
                }
            }
            prev = Some((idx, c));
        }

        let mut parts = Vec::with_capacity(boundaries.len() + 1);
        let mut start = 0;
        for end in boundaries {
            parts.push(&text[start..end]);
            start = end;
        }
        parts.push(&text[start..]);

        let mut parts: Vec<String> = parts
            .into_iter()
            .map(|p| {
                let p = p.trim();
                p.strip_suffix(';').map(str::trim).unwrap_or(p).to_string()
            })
            .filter(|p| !p.is_empty())
            .collect();

        for i in 1..parts.len() {
            if parts[i].ends_with(')') && !parts[i].starts_with('(') && parts[i - 1].ends_with('(') {
                parts[i - 1].pop();
                parts[i].insert(0, '(');
            }
        }

        parts
    }

    /// Order texts by category, then by value
    pub fn sort<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
        let mut keyed: Vec<(LangCat, &str)> = texts
            .iter()
            .map(|t| (Self::categorize(t.as_ref()), t.as_ref()))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, t)| t.to_string()).collect()
    }
}

impl fmt::Display for LangCat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

fn categorize_stripped(text: &str) -> LangCat {
    let stripped = strip_non_word_chars(text);
    let mut chars = stripped.chars();
    let Some(first) = chars.next() else {
        return LangCat::Nul;
    };
    let cat = LangCat::categorize_char(first);
    if chars.any(|c| LangCat::categorize_char(c) != cat) {
        LangCat::Mix
    } else {
        cat
    }
}

fn strip_non_word_chars(text: &str) -> String {
    NON_WORD_CHARS.replace_all(text, "").into_owned()
}

fn is_punc_or_symbol(c: char) -> bool {
    if c.is_whitespace() {
        return true;
    }
    let mut buf = [0u8; 4];
    PUNC_OR_SYMBOL.is_match(c.encode_utf8(&mut buf))
}

/// Whitespace and ASCII punctuation removed
fn strip_punctuation(text: &str) -> String {
    PUNCTUATION_AND_SPACE.replace_all(text, "").into_owned()
}

fn all_chars_in(text: &str, pred: impl Fn(char) -> bool) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(c), None) => pred(c),
        _ => {
            let stripped = strip_punctuation(text);
            !stripped.is_empty() && stripped.chars().all(pred)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// String range predicates
// ─────────────────────────────────────────────────────────────────────────────

/// True if `text` is only Hangul, ignoring whitespace and ASCII punctuation
pub fn is_hangul(text: &str) -> bool {
    all_chars_in(text, |c| in_ranges(c, HANGUL_RANGES))
}

pub fn is_japanese(text: &str) -> bool {
    all_chars_in(text, |c| in_any_ranges(c, JAPANESE_RANGES))
}

pub fn is_cjk(text: &str) -> bool {
    all_chars_in(text, |c| in_ranges(c, CJK_RANGES))
}

/// True if `text` is only Hangul/kana/CJK/Thai, ignoring whitespace and
/// optionally punctuation and ASCII digits
pub fn is_any_cjk(text: &str, strip_punc: bool, strip_nums: bool) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(c), None) => in_any_ranges(c, NON_ENG_RANGES),
        _ => {
            let mut stripped = if strip_punc {
                strip_punctuation(text)
            } else {
                WHITESPACE.replace_all(text, "").into_owned()
            };
            if strip_nums {
                stripped.retain(|c| !c.is_ascii_digit());
            }
            !stripped.is_empty() && stripped.chars().all(|c| in_any_ranges(c, NON_ENG_RANGES))
        }
    }
}

pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| in_ranges(c, HANGUL_RANGES))
}

pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|c| in_any_ranges(c, JAPANESE_RANGES))
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(|c| in_ranges(c, CJK_RANGES))
}

pub fn contains_any_cjk(text: &str) -> bool {
    text.chars().any(|c| in_any_ranges(c, NON_ENG_RANGES))
}

/// Whether `eng` could be a romanization of `cjk`, in either argument order.
/// Only Hangul text can be checked; other scripts never match.
pub fn matches_permutation(eng: &str, cjk: &str) -> bool {
    let (eng, cjk) = if !LangCat::matches(eng, LangCat::Eng) && LangCat::matches(cjk, LangCat::Eng) {
        (cjk, eng)
    } else {
        (eng, cjk)
    };
    contains_hangul(cjk) && matches_hangul_permutation(eng, cjk)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod langcat_tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────
    // categorize
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn empty_is_nul() {
        assert_eq!(LangCat::categorize(""), LangCat::Nul);
    }

    #[test]
    fn single_scripts() {
        assert_eq!(LangCat::categorize("IU"), LangCat::Eng);
        assert_eq!(LangCat::categorize("아이유"), LangCat::Han);
        assert_eq!(LangCat::categorize("アイ"), LangCat::Jpn);
        assert_eq!(LangCat::categorize("ひらがなカタカナ"), LangCat::Jpn);
        assert_eq!(LangCat::categorize("中文"), LangCat::Cjk);
        assert_eq!(LangCat::categorize("ไทย"), LangCat::Thai);
        assert_eq!(LangCat::categorize("Ελλάδα"), LangCat::Grk);
        assert_eq!(LangCat::categorize("Россия"), LangCat::Cyr);
    }

    #[test]
    fn punctuation_digits_and_spaces_ignored() {
        assert_eq!(LangCat::categorize("아이유!"), LangCat::Han);
        assert_eq!(LangCat::categorize("Girls' Generation 2"), LangCat::Eng);
        assert_eq!(LangCat::categorize("(소녀시대)"), LangCat::Han);
        assert_eq!(LangCat::categorize("123 !!"), LangCat::Nul);
        assert_eq!(LangCat::categorize("☆☆"), LangCat::Nul);
    }

    #[test]
    fn mixed_scripts() {
        assert_eq!(LangCat::categorize("Artist 아티스트"), LangCat::Mix);
        assert_eq!(LangCat::categorize("日本語です"), LangCat::Mix);
    }

    #[test]
    fn single_char_is_not_stripped() {
        assert_eq!(LangCat::categorize("!"), LangCat::Eng);
        assert_eq!(LangCat::categorize("☆"), LangCat::Unk);
    }

    #[test]
    fn categorize_is_stable() {
        for text in ["Artist (아티스트)", "소녀시대", "x", "", "2NE1 투애니원"] {
            assert_eq!(LangCat::categorize(text), LangCat::categorize(text));
        }
    }

    #[test]
    fn stripping_only_depends_on_letters() {
        assert_eq!(
            LangCat::categorize("B.A.P (비에이피)!!"),
            LangCat::categorize("BAP비에이피")
        );
    }

    #[test]
    fn detailed_categories() {
        let cats = LangCat::categorize_detailed("Artist 아티스트");
        assert_eq!(cats, BTreeSet::from([LangCat::Eng, LangCat::Han]));
        assert_eq!(LangCat::categorize_detailed("..."), BTreeSet::from([LangCat::Nul]));
        assert!(LangCat::matches_detailed("a가", &[LangCat::Han, LangCat::Eng]));
    }

    #[test]
    fn ordering_groups_english_first() {
        assert!(LangCat::Eng < LangCat::Han);
        assert!(LangCat::Unk < LangCat::Nul);
        let sorted = LangCat::sort(&["소녀시대", "Girls' Generation"]);
        assert_eq!(sorted, vec!["Girls' Generation", "소녀시대"]);
    }

    // ─────────────────────────────────────────────────────────────
    // contains / predicates
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn contains_any_category() {
        assert!(LangCat::contains_any("Artist 아티스트", &[LangCat::Han]));
        assert!(!LangCat::contains_any("Artist", &[LangCat::Han, LangCat::Jpn]));
        assert!(LangCat::contains_any("Artist 아티스트", &[LangCat::Mix]));
        assert!(LangCat::contains_any("!!", &[LangCat::Nul]));
    }

    #[test]
    fn contains_any_not_category() {
        assert_eq!(LangCat::contains_any_not("아이유 IU", LangCat::Han), Ok(true));
        assert_eq!(LangCat::contains_any_not("아이유", LangCat::Han), Ok(false));
        assert_eq!(LangCat::contains_any_not("", LangCat::Han), Ok(true));
        assert_eq!(LangCat::contains_any_not("", LangCat::Nul), Ok(false));
        assert!(LangCat::contains_any_not("x", LangCat::Mix).is_err());
    }

    #[test]
    fn whole_string_predicates() {
        assert!(is_hangul("소녀 시대!"));
        assert!(!is_hangul("소녀시대 2"));
        assert!(!is_hangul(""));
        assert!(!is_hangul("..."));
        assert!(is_japanese("カタカナ"));
        assert!(is_cjk("中文"));
        assert!(is_any_cjk("소녀시대 中文 2", true, true));
        assert!(!is_any_cjk("소녀시대 2", true, false));
        assert!(!is_any_cjk("소녀시대!", false, true));
    }

    #[test]
    fn contains_predicates() {
        assert!(contains_hangul("IU 아이유"));
        assert!(!contains_hangul("IU"));
        assert!(contains_japanese("abcカ"));
        assert!(contains_cjk("a中"));
        assert!(contains_any_cjk("aก"));
    }

    #[test]
    fn for_name_aliases() {
        assert_eq!(LangCat::for_name("Korean"), LangCat::Han);
        assert_eq!(LangCat::for_name(" kr "), LangCat::Han);
        assert_eq!(LangCat::for_name("Spanish"), LangCat::Eng);
        assert_eq!(LangCat::for_name("mandarin"), LangCat::Cjk);
        assert_eq!(LangCat::for_name("klingon"), LangCat::Unk);
        assert_eq!(LangCat::Han.full_name(), "Korean");
        assert_eq!(LangCat::Unk.to_string(), "UNKNOWN");
    }

    // ─────────────────────────────────────────────────────────────
    // split
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn split_on_script_change() {
        assert_eq!(
            LangCat::split("Girls' Generation 소녀시대"),
            vec!["Girls' Generation", "소녀시대"]
        );
    }

    #[test]
    fn split_keeps_paren_with_following_run() {
        assert_eq!(LangCat::split("AB(가나)CD"), vec!["AB", "(가나)", "CD"]);
        assert_eq!(LangCat::split("Name (이름)"), vec!["Name", "(이름)"]);
    }

    #[test]
    fn split_strips_trailing_semicolon() {
        assert_eq!(LangCat::split("IU; 아이유"), vec!["IU", "아이유"]);
    }

    #[test]
    fn split_empty() {
        assert!(LangCat::split("   ").is_empty());
        assert_eq!(LangCat::split("단어"), vec!["단어"]);
    }

    #[test]
    fn permutation_in_either_order() {
        assert!(matches_permutation("park", "박"));
        assert!(matches_permutation("박", "park"));
        assert!(!matches_permutation("banana", "박"));
        assert!(!matches_permutation("nihon", "日本"));
    }
}
