//! Jamo, syllables and words, and the conversions between them.

use crate::error::RomanizationError;
use crate::hangul::constants::{
    FINAL_OFFSETS, INITIAL_OFFSETS, INITIAL_STRIDE, JAMO_START, MEDIAL_END, MEDIAL_START,
    MEDIAL_STRIDE, ROMANIZED_LONG_NAMES, ROMANIZED_SHORT_NAMES, SYLLABLES_END, SYLLABLES_START,
};

/// Where a jamo sits inside a syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Leading consonant
    Initial,
    /// Vowel
    Medial,
    /// Final consonant
    Final,
}

impl Position {
    const fn mask(self) -> u8 {
        match self {
            Position::Initial => INITIAL,
            Position::Medial => MEDIAL,
            Position::Final => FINAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Position::Initial => "initial",
            Position::Medial => "medial",
            Position::Final => "final",
        }
    }
}

const INITIAL: u8 = 1;
const MEDIAL: u8 = 2;
const FINAL: u8 = 4;

/// A single Hangul letter and its candidate Latin spellings
#[derive(Debug, PartialEq, Eq)]
pub struct Jamo {
    pub char: char,
    positions: u8,
    pub romanizations: &'static [&'static str],
    /// Pronounced as /t/ when ending a syllable
    pub t_stop: bool,
    /// Turns a preceding ㅅ/ㅆ into "sh"
    pub sh_vowel: bool,
}

const fn jamo(
    char: char,
    positions: u8,
    romanizations: &'static [&'static str],
    t_stop: bool,
    sh_vowel: bool,
) -> Jamo {
    Jamo {
        char,
        positions,
        romanizations,
        t_stop,
        sh_vowel,
    }
}

const CONSONANT: u8 = INITIAL | FINAL;

pub static JAMO: &[Jamo] = &[
    jamo('ㄱ', CONSONANT, &["g", "k"], false, false),
    jamo('ㄲ', CONSONANT, &["gg", "kk"], false, false),
    jamo('ㄴ', CONSONANT, &["n"], false, false),
    jamo('ㄷ', CONSONANT, &["d", "t"], false, false),
    jamo('ㄸ', INITIAL, &["dd", "tt"], false, false),
    jamo('ㄹ', CONSONANT, &["r", "l"], false, false),
    jamo('ㅁ', CONSONANT, &["m"], false, false),
    jamo('ㅂ', CONSONANT, &["b", "p", "v"], false, false),
    jamo('ㅃ', INITIAL, &["bb", "pp"], false, false),
    jamo('ㅅ', CONSONANT, &["s"], true, false),
    jamo('ㅆ', CONSONANT, &["ss"], true, false),
    jamo('ㅇ', CONSONANT, &["ng"], false, false),
    jamo('ㅈ', CONSONANT, &["j", "ch"], true, false),
    jamo('ㅉ', INITIAL, &["jj"], true, false),
    jamo('ㅊ', CONSONANT, &["ch"], true, false),
    jamo('ㅋ', CONSONANT, &["k"], false, false),
    jamo('ㅌ', CONSONANT, &["t"], false, false),
    jamo('ㅍ', CONSONANT, &["p"], false, false),
    jamo('ㅎ', CONSONANT, &["h"], true, false),
    jamo('ㅏ', MEDIAL, &["a"], false, false),
    jamo('ㅐ', MEDIAL, &["ae"], false, false),
    jamo('ㅑ', MEDIAL, &["ya"], false, true),
    jamo('ㅒ', MEDIAL, &["yae"], false, false),
    jamo('ㅓ', MEDIAL, &["eo", "u"], false, false),
    jamo('ㅔ', MEDIAL, &["e"], false, false),
    jamo('ㅕ', MEDIAL, &["yeo", "you", "yu"], false, true),
    jamo('ㅖ', MEDIAL, &["ye"], false, false),
    jamo('ㅗ', MEDIAL, &["o", "oh"], false, false),
    jamo('ㅘ', MEDIAL, &["wa"], false, false),
    jamo('ㅙ', MEDIAL, &["wae"], false, false),
    jamo('ㅚ', MEDIAL, &["oe"], false, false),
    jamo('ㅛ', MEDIAL, &["yo"], false, true),
    jamo('ㅜ', MEDIAL, &["u", "oo"], false, false),
    jamo('ㅝ', MEDIAL, &["weo", "wo"], false, false),
    jamo('ㅞ', MEDIAL, &["we"], false, false),
    jamo('ㅟ', MEDIAL, &["wi"], false, false),
    jamo('ㅠ', MEDIAL, &["yu", "yoo"], false, true),
    jamo('ㅡ', MEDIAL, &["eu"], false, false),
    jamo('ㅢ', MEDIAL, &["eui", "ui", "ee"], false, false),
    jamo('ㅣ', MEDIAL, &["i", "ee", "y"], false, true),
    jamo('ㄳ', FINAL, &["gs"], false, false),
    jamo('ㄵ', FINAL, &["nj"], false, false),
    jamo('ㄶ', FINAL, &["nh"], false, false),
    jamo('ㄺ', FINAL, &["rk", "lk"], false, false),
    jamo('ㄻ', FINAL, &["rm", "lm"], false, false),
    jamo('ㄼ', FINAL, &["rb", "lb"], false, false),
    jamo('ㄽ', FINAL, &["rs", "ls"], false, false),
    jamo('ㄾ', FINAL, &["rt", "lt"], false, false),
    jamo('ㄿ', FINAL, &["rp", "lp"], false, false),
    jamo('ㅀ', FINAL, &["rh", "lh"], false, false),
    jamo('ㅄ', FINAL, &["bs", "ps"], false, false),
];

impl Jamo {
    pub fn for_char(c: char) -> Result<&'static Jamo, RomanizationError> {
        JAMO.iter()
            .find(|j| j.char == c)
            .ok_or(RomanizationError::NotJamo(c))
    }

    fn for_code_point(cp: u32) -> Result<&'static Jamo, RomanizationError> {
        let c = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
        Self::for_char(c)
    }

    pub fn supports(&self, position: Position) -> bool {
        self.positions & position.mask() != 0
    }

    fn offset(&self) -> u32 {
        (self.char as u32).wrapping_sub(JAMO_START)
    }

    pub fn initial_index(&self) -> Option<usize> {
        INITIAL_OFFSETS.iter().position(|&o| o == self.offset())
    }

    pub fn medial_index(&self) -> Option<usize> {
        let cp = self.char as u32;
        (MEDIAL_START..=MEDIAL_END)
            .contains(&cp)
            .then(|| (cp - MEDIAL_START) as usize)
    }

    pub fn final_index(&self) -> Option<usize> {
        FINAL_OFFSETS
            .iter()
            .skip(1)
            .position(|&o| o == self.offset())
            .map(|i| i + 1)
    }

    /// Candidate spellings of this jamo in `position`, in preference order.
    ///
    /// `medial` is the vowel of the same syllable; it only matters for a
    /// leading consonant.
    pub fn iter_romanizations(&self, position: Position, medial: Option<&Jamo>) -> Vec<&'static str> {
        let mut spellings = Vec::with_capacity(self.romanizations.len() + 2);
        match position {
            Position::Initial => match self.char {
                'ㅅ' | 'ㅆ' if medial.is_some_and(|m| m.sh_vowel) => {
                    spellings.push("sh");
                    if self.char == 'ㅆ' {
                        spellings.push("ssh");
                    }
                    spellings.extend_from_slice(self.romanizations);
                }
                'ㅇ' => {
                    spellings.push("");
                    // 우 is often written "woo"
                    if medial.is_some_and(|m| m.char == 'ㅜ') {
                        spellings.push("w");
                    }
                }
                _ => spellings.extend_from_slice(self.romanizations),
            },
            Position::Final if self.t_stop => {
                spellings.push("t");
                spellings.extend_from_slice(self.romanizations);
            }
            _ => spellings.extend_from_slice(self.romanizations),
        }
        spellings
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

pub fn is_hangul_syllable(c: char) -> bool {
    (SYLLABLES_START..=SYLLABLES_END).contains(&(c as u32))
}

pub fn is_jamo(c: char) -> bool {
    let cp = c as u32;
    JAMO_START < cp && cp <= MEDIAL_END
}

pub fn is_lead_jamo(c: char) -> bool {
    (c as u32)
        .checked_sub(JAMO_START)
        .is_some_and(|o| INITIAL_OFFSETS.contains(&o))
}

pub fn is_vowel_jamo(c: char) -> bool {
    (MEDIAL_START..=MEDIAL_END).contains(&(c as u32))
}

pub fn is_final_jamo(c: char) -> bool {
    (c as u32)
        .checked_sub(JAMO_START)
        .is_some_and(|o| FINAL_OFFSETS.contains(&o))
}

// ─────────────────────────────────────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────────────────────────────────────

/// Split a precomposed syllable into its initial, medial and optional final jamo
pub fn decompose(c: char) -> Result<(char, char, Option<char>), RomanizationError> {
    let syllable = Syllable::from_char(c)?;
    Ok((
        syllable.initial.char,
        syllable.medial.char,
        syllable.final_.map(|f| f.char),
    ))
}

/// Combine jamo into a precomposed syllable
pub fn compose(initial: char, medial: char, final_: Option<char>) -> Result<char, RomanizationError> {
    Ok(Syllable::new(initial, medial, final_)?.composed())
}

/// Every Hangul syllable in `text` replaced by its jamo; other characters kept
pub fn decompose_syllables(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        match decompose(c) {
            Ok((i, m, f)) => {
                out.push(i);
                out.push(m);
                out.extend(f);
            }
            Err(_) => out.push(c),
        }
    }
    out
}

/// One Hangul syllable block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub initial: &'static Jamo,
    pub medial: &'static Jamo,
    pub final_: Option<&'static Jamo>,
}

impl Syllable {
    pub fn new(initial: char, medial: char, final_: Option<char>) -> Result<Self, RomanizationError> {
        Ok(Syllable {
            initial: validate(initial, Position::Initial)?,
            medial: validate(medial, Position::Medial)?,
            final_: final_.map(|f| validate(f, Position::Final)).transpose()?,
        })
    }

    pub fn from_char(c: char) -> Result<Self, RomanizationError> {
        if !is_hangul_syllable(c) {
            return Err(RomanizationError::NotASyllable(c));
        }
        let index = c as u32 - SYLLABLES_START;
        let (i, rem) = (index / INITIAL_STRIDE, index % INITIAL_STRIDE);
        let (m, f) = (rem / MEDIAL_STRIDE, rem % MEDIAL_STRIDE);

        let initial = Jamo::for_code_point(JAMO_START + INITIAL_OFFSETS[i as usize])?;
        let medial = Jamo::for_code_point(MEDIAL_START + m)?;
        let final_ = if f > 0 {
            Some(Jamo::for_code_point(JAMO_START + FINAL_OFFSETS[f as usize])?)
        } else {
            None
        };
        Ok(Syllable {
            initial,
            medial,
            final_,
        })
    }

    pub fn composed(&self) -> char {
        // Positions were validated on construction, so every index exists
        let i = self.initial.initial_index().unwrap_or(0) as u32;
        let m = self.medial.medial_index().unwrap_or(0) as u32;
        let f = self.final_.and_then(Jamo::final_index).unwrap_or(0) as u32;
        char::from_u32(SYLLABLES_START + i * INITIAL_STRIDE + m * MEDIAL_STRIDE + f)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Accepted whole-syllable name spelling, e.g. "park" for 박
    pub fn name_override(&self) -> Option<&'static str> {
        let composed = self.composed();
        ROMANIZED_SHORT_NAMES
            .iter()
            .find(|(c, _)| *c == composed)
            .map(|(_, name)| *name)
    }
}

fn validate(c: char, position: Position) -> Result<&'static Jamo, RomanizationError> {
    let jamo = Jamo::for_char(c)?;
    if jamo.supports(position) {
        Ok(jamo)
    } else {
        Err(RomanizationError::InvalidPosition {
            jamo: c,
            position: position.name(),
        })
    }
}

/// A whitespace-free run of Hangul syllables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub syllables: Vec<Syllable>,
}

impl Word {
    pub fn new(text: &str) -> Result<Self, RomanizationError> {
        let syllables = text
            .chars()
            .map(Syllable::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Word {
            text: text.to_string(),
            syllables,
        })
    }

    pub fn name_override(&self) -> Option<&'static str> {
        ROMANIZED_LONG_NAMES
            .iter()
            .find(|(word, _)| *word == self.text)
            .map(|(_, name)| *name)
    }
}

#[cfg(test)]
mod jamo_tests {
    use super::*;

    #[test]
    fn table_counts() {
        let count = |p| JAMO.iter().filter(|j| j.supports(p)).count();
        assert_eq!(count(Position::Initial), 19);
        assert_eq!(count(Position::Medial), 21);
        assert_eq!(count(Position::Final), 27);
    }

    #[test]
    fn table_indexes_agree_with_offsets() {
        for j in JAMO {
            assert_eq!(j.supports(Position::Initial), j.initial_index().is_some(), "{}", j.char);
            assert_eq!(j.supports(Position::Medial), j.medial_index().is_some(), "{}", j.char);
            assert_eq!(j.supports(Position::Final), j.final_index().is_some(), "{}", j.char);
        }
    }

    #[test]
    fn decompose_known_syllables() {
        assert_eq!(decompose('한'), Ok(('ㅎ', 'ㅏ', Some('ㄴ'))));
        assert_eq!(decompose('가'), Ok(('ㄱ', 'ㅏ', None)));
        assert_eq!(decompose('닭'), Ok(('ㄷ', 'ㅏ', Some('ㄺ'))));
        assert_eq!(decompose('a'), Err(RomanizationError::NotASyllable('a')));
    }

    #[test]
    fn compose_round_trip_all_syllables() {
        for cp in SYLLABLES_START..=SYLLABLES_END {
            let c = char::from_u32(cp).unwrap();
            let (i, m, f) = decompose(c).unwrap();
            assert_eq!(compose(i, m, f), Ok(c));
        }
    }

    #[test]
    fn compose_rejects_bad_positions() {
        assert_eq!(
            compose('ㅏ', 'ㅏ', None),
            Err(RomanizationError::InvalidPosition {
                jamo: 'ㅏ',
                position: "initial"
            })
        );
        assert!(matches!(
            compose('ㄱ', 'ㅏ', Some('ㄸ')),
            Err(RomanizationError::InvalidPosition { .. })
        ));
        assert_eq!(compose('x', 'ㅏ', None), Err(RomanizationError::NotJamo('x')));
    }

    #[test]
    fn decompose_text() {
        assert_eq!(decompose_syllables("한 a"), "ㅎㅏㄴ a");
    }

    #[test]
    fn classification() {
        assert!(is_hangul_syllable('한'));
        assert!(!is_hangul_syllable('ㅎ'));
        assert!(is_jamo('ㅎ'));
        assert!(is_jamo('ㅣ'));
        assert!(!is_jamo('\u{3130}'));
        assert!(is_lead_jamo('ㄸ'));
        assert!(!is_lead_jamo('ㄳ'));
        assert!(is_vowel_jamo('ㅏ'));
        assert!(!is_vowel_jamo('ㄱ'));
        assert!(is_final_jamo('ㄳ'));
        assert!(!is_final_jamo('ㄸ'));
    }

    #[test]
    fn contextual_spellings() {
        let s = Jamo::for_char('ㅅ').unwrap();
        let ya = Jamo::for_char('ㅑ').unwrap();
        let a = Jamo::for_char('ㅏ').unwrap();
        assert_eq!(s.iter_romanizations(Position::Initial, Some(ya)), vec!["sh", "s"]);
        assert_eq!(s.iter_romanizations(Position::Initial, Some(a)), vec!["s"]);
        assert_eq!(s.iter_romanizations(Position::Final, None), vec!["t", "s"]);

        let ieung = Jamo::for_char('ㅇ').unwrap();
        let u = Jamo::for_char('ㅜ').unwrap();
        assert_eq!(ieung.iter_romanizations(Position::Initial, Some(a)), vec![""]);
        assert_eq!(ieung.iter_romanizations(Position::Initial, Some(u)), vec!["", "w"]);
        assert_eq!(ieung.iter_romanizations(Position::Final, None), vec!["ng"]);
    }

    #[test]
    fn name_overrides() {
        assert_eq!(Syllable::from_char('박').unwrap().name_override(), Some("park"));
        assert_eq!(Syllable::from_char('김').unwrap().name_override(), None);
        assert_eq!(Word::new("죠지").unwrap().name_override(), Some("george"));
        assert!(Word::new("죠 지").is_err());
    }
}
