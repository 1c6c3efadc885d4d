//! Romanization of Hangul text.
//!
//! Every jamo position becomes a "slot" holding its candidate spellings.
//! The permutation set is the product of all slots, and the permutation
//! pattern is a regex that accepts the same strings without enumerating them.
//! A syllable boundary covered by the assimilation table (within or across
//! words) is spelled either with the written final and initial or with the
//! assimilated pair, never with one of each.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use lazy_static::lazy_static;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cache::Memo;
use crate::error::RomanizationError;
use crate::hangul::constants::{
    combo_change, REVISED_END_CONSONANTS, REVISED_LEAD_CONSONANTS, REVISED_NAME_SYLLABLES,
    REVISED_VOWELS, SILENT_INITIAL_INDEX,
};
use crate::hangul::jamo::{Jamo, Position, Syllable, Word};

static PERMUTATIONS_CACHE: Lazy<Memo<(String, bool), BTreeSet<String>>> =
    Lazy::new(|| Memo::new(300));
static PATTERN_CACHE: Lazy<Memo<(String, bool), Regex>> = Lazy::new(|| Memo::new(300));
static MATCH_CACHE: Lazy<Memo<(String, String), bool>> = Lazy::new(|| Memo::new(300));

lazy_static! {
    /// Final+lead spellings that can be split into end and lead consonants in
    /// more than one way, e.g. "s" + "s" vs "" + "ss"
    static ref AMBIGUOUS_ROMANIZED: HashSet<String> = ambiguous_romanized();
}

// ─────────────────────────────────────────────────────────────────────────────
// Slots
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered, de-duplicated candidate spellings for one jamo position
#[derive(Debug, Clone, Default)]
struct Slot(Vec<&'static str>);

impl Slot {
    fn extend(&mut self, spellings: impl IntoIterator<Item = &'static str>) {
        for s in spellings {
            if !self.0.contains(&s) {
                self.0.push(s);
            }
        }
    }

    fn pattern(&self) -> String {
        let mut singles = String::new();
        let mut multi = Vec::new();
        let mut optional = false;
        for s in &self.0 {
            match s.len() {
                0 => optional = true,
                1 => singles.push_str(s),
                _ if is_doubled_letter(s) => multi.push(format!("{}{{1,2}}", &s[..1])),
                _ => multi.push((*s).to_string()),
            }
        }

        let body = match (singles.is_empty(), multi.is_empty()) {
            (true, true) => return String::new(),
            (false, true) => format!("[{singles}]"),
            (true, false) => format!("(?:{})", multi.join("|")),
            (false, false) => format!("(?:{}|[{singles}])", multi.join("|")),
        };
        if optional {
            format!("{body}?")
        } else {
            body
        }
    }
}

fn is_doubled_letter(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 2 && b[0] == b[1]
}

/// Which consonant pair spells a syllable boundary: the written final and
/// initial, or the pair the assimilation table replaces them with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    Written,
    Assimilated,
}

#[derive(Debug, Clone)]
struct SyllableSlots {
    name: Option<&'static str>,
    initial: Slot,
    medial: Slot,
    final_: Slot,
    /// Initial spellings when the boundary before this syllable assimilates
    assimilated_initial: Option<Slot>,
    /// Final spellings when the boundary after this syllable assimilates
    assimilated_final: Option<Slot>,
}

impl SyllableSlots {
    fn new(syllable: &Syllable) -> Self {
        let medial = syllable.medial;
        let mut slots = SyllableSlots {
            name: syllable.name_override(),
            initial: Slot::default(),
            medial: Slot::default(),
            final_: Slot::default(),
            assimilated_initial: None,
            assimilated_final: None,
        };
        slots
            .initial
            .extend(syllable.initial.iter_romanizations(Position::Initial, Some(medial)));
        slots.medial.extend(medial.iter_romanizations(Position::Medial, None));
        match syllable.final_ {
            Some(f) => slots.final_.extend(f.iter_romanizations(Position::Final, None)),
            None => slots.final_.extend([""]),
        }
        slots
    }

    fn initial_for(&self, left: Boundary) -> Option<&Slot> {
        match left {
            Boundary::Written => Some(&self.initial),
            Boundary::Assimilated => self.assimilated_initial.as_ref(),
        }
    }

    fn final_for(&self, right: Boundary) -> Option<&Slot> {
        match right {
            Boundary::Written => Some(&self.final_),
            Boundary::Assimilated => self.assimilated_final.as_ref(),
        }
    }

    /// Boundary states this syllable can hand to the next one
    fn right_boundaries(&self) -> Vec<Boundary> {
        let mut out = vec![Boundary::Written];
        if self.assimilated_final.is_some() {
            out.push(Boundary::Assimilated);
        }
        out
    }

    /// Name overrides are fixed spellings and only stand in for the written jamo
    fn spellings(&self, left: Boundary, right: Boundary) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if let (Some(name), Boundary::Written, Boundary::Written) = (self.name, left, right) {
            out.insert(name.to_string());
        }
        let (Some(initial), Some(final_)) = (self.initial_for(left), self.final_for(right)) else {
            return out;
        };
        for i in &initial.0 {
            for m in &self.medial.0 {
                for f in &final_.0 {
                    out.insert(format!("{i}{m}{f}"));
                }
            }
        }
        out
    }

    fn pattern(&self, left: Boundary, right: Boundary) -> Option<String> {
        let (initial, final_) = (self.initial_for(left)?, self.final_for(right)?);
        let body = format!("{}{}{}", initial.pattern(), self.medial.pattern(), final_.pattern());
        Some(match (self.name, left, right) {
            (Some(name), Boundary::Written, Boundary::Written) => format!("(?:{name}|{body})"),
            _ => body,
        })
    }
}

fn alternation(mut alternatives: Vec<String>) -> String {
    match alternatives.len() {
        1 => alternatives.pop().unwrap_or_default(),
        _ => format!("(?:{})", alternatives.join("|")),
    }
}

#[derive(Debug, Clone)]
struct WordSlots {
    name: Option<&'static str>,
    syllables: Vec<SyllableSlots>,
}

impl WordSlots {
    /// Spellings of the word entered in the `left` state, keyed by the state
    /// its last syllable leaves for the next word
    fn spellings(&self, left: Boundary) -> BTreeMap<Boundary, BTreeSet<String>> {
        let mut states = BTreeMap::from([(left, BTreeSet::from([String::new()]))]);
        for syllable in &self.syllables {
            let mut next: BTreeMap<Boundary, BTreeSet<String>> = BTreeMap::new();
            for (&lb, prefixes) in &states {
                for rb in syllable.right_boundaries() {
                    let spellings = syllable.spellings(lb, rb);
                    if !spellings.is_empty() {
                        next.entry(rb)
                            .or_default()
                            .extend(product([prefixes.clone(), spellings], ""));
                    }
                }
            }
            states = next;
        }
        if let (Some(name), Boundary::Written) = (self.name, left) {
            states.entry(Boundary::Written).or_default().insert(name.to_string());
        }
        states
    }

    fn pattern(&self, left: Boundary) -> BTreeMap<Boundary, String> {
        let mut states = BTreeMap::from([(left, String::new())]);
        for syllable in &self.syllables {
            let mut next: BTreeMap<Boundary, Vec<String>> = BTreeMap::new();
            for (&lb, prefix) in &states {
                for rb in syllable.right_boundaries() {
                    if let Some(pattern) = syllable.pattern(lb, rb) {
                        next.entry(rb).or_default().push(format!("{prefix}{pattern}"));
                    }
                }
            }
            states = next
                .into_iter()
                .map(|(state, alternatives)| (state, alternation(alternatives)))
                .collect();
        }
        if let (Some(name), Boundary::Written) = (self.name, left) {
            match states.get_mut(&Boundary::Written) {
                Some(body) => *body = format!("(?:{name}|{body})"),
                None => {
                    states.insert(Boundary::Written, name.to_string());
                }
            }
        }
        states
    }
}

/// Every spelling of the phrase, words joined by `joiner`
fn phrase_spellings(words: &[WordSlots], joiner: &str) -> BTreeSet<String> {
    if words.is_empty() {
        return BTreeSet::new();
    }
    let mut states = BTreeMap::from([(Boundary::Written, BTreeSet::from([String::new()]))]);
    for (n, word) in words.iter().enumerate() {
        let joiner = if n == 0 { "" } else { joiner };
        let mut next: BTreeMap<Boundary, BTreeSet<String>> = BTreeMap::new();
        for (&lb, prefixes) in &states {
            for (rb, spellings) in word.spellings(lb) {
                next.entry(rb)
                    .or_default()
                    .extend(product([prefixes.clone(), spellings], joiner));
            }
        }
        states = next;
    }
    states.into_values().flatten().collect()
}

fn phrase_pattern(words: &[WordSlots], joiner: &str) -> String {
    let mut states = BTreeMap::from([(Boundary::Written, String::new())]);
    for (n, word) in words.iter().enumerate() {
        let joiner = if n == 0 { "" } else { joiner };
        let mut next: BTreeMap<Boundary, Vec<String>> = BTreeMap::new();
        for (&lb, prefix) in &states {
            for (rb, pattern) in word.pattern(lb) {
                next.entry(rb).or_default().push(format!("{prefix}{joiner}{pattern}"));
            }
        }
        states = next
            .into_iter()
            .map(|(state, alternatives)| (state, alternation(alternatives)))
            .collect();
    }
    alternation(states.into_values().collect())
}

/// Slots for every word of `text`. A boundary covered by the assimilation
/// table, including one across words, gets a second final/initial pair.
fn phrase_slots(text: &str) -> Result<Vec<WordSlots>, RomanizationError> {
    let words = text
        .split_whitespace()
        .map(Word::new)
        .collect::<Result<Vec<_>, _>>()?;

    let syllables: Vec<&Syllable> = words.iter().flat_map(|w| w.syllables.iter()).collect();
    let mut slots: Vec<SyllableSlots> = syllables.iter().map(|s| SyllableSlots::new(s)).collect();

    for i in 1..syllables.len() {
        let (prev, next) = (syllables[i - 1], syllables[i]);
        let Some(final_) = prev.final_ else {
            continue;
        };
        if let Some((new_final, new_initial)) = combo_change(final_.char, next.initial.char) {
            let mut final_slot = Slot::default();
            final_slot.extend(Jamo::for_char(new_final)?.iter_romanizations(Position::Final, None));
            let mut initial_slot = Slot::default();
            initial_slot.extend(
                Jamo::for_char(new_initial)?.iter_romanizations(Position::Initial, Some(next.medial)),
            );
            slots[i - 1].assimilated_final = Some(final_slot);
            slots[i].assimilated_initial = Some(initial_slot);
        }
    }

    let mut slots = slots.into_iter();
    Ok(words
        .iter()
        .map(|w| WordSlots {
            name: w.name_override(),
            syllables: slots.by_ref().take(w.syllables.len()).collect(),
        })
        .collect())
}

/// Cartesian product of string sets, each combination joined by `joiner`
fn product(sets: impl IntoIterator<Item = BTreeSet<String>>, joiner: &str) -> BTreeSet<String> {
    let mut acc: Option<BTreeSet<String>> = None;
    for set in sets {
        acc = Some(match acc {
            None => set,
            Some(prefixes) => prefixes
                .iter()
                .flat_map(|p| set.iter().map(move |s| format!("{p}{joiner}{s}")))
                .collect(),
        });
    }
    acc.unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Permutations and matching
// ─────────────────────────────────────────────────────────────────────────────

/// Every plausible romanization of the Hangul `text`.
///
/// Words are joined with a space when `include_space` is set. The result grows
/// multiplicatively with the number of syllables; prefer
/// [`hangul_romanized_permutations_pattern`] for matching.
pub fn hangul_romanized_permutations(
    text: &str,
    include_space: bool,
) -> Result<BTreeSet<String>, RomanizationError> {
    PERMUTATIONS_CACHE.try_get_or_insert_with((text.to_string(), include_space), || {
        let words = phrase_slots(text)?;
        let joiner = if include_space { " " } else { "" };
        Ok(phrase_spellings(&words, joiner))
    })
}

/// The uncompiled, unanchored pattern accepting every romanization of `text`
pub fn romanization_pattern_source(
    text: &str,
    include_space: bool,
) -> Result<String, RomanizationError> {
    let joiner = if include_space { " " } else { "" };
    Ok(phrase_pattern(&phrase_slots(text)?, joiner))
}

/// Case-insensitive regex, anchored at the start only, that matches any
/// romanization of `text`
pub fn hangul_romanized_permutations_pattern(
    text: &str,
    include_space: bool,
) -> Result<Regex, RomanizationError> {
    PATTERN_CACHE.try_get_or_insert_with((text.to_string(), include_space), || {
        let source = romanization_pattern_source(text, include_space)?;
        compile(&format!("(?i)^(?:{source})"))
    })
}

fn compile(pattern: &str) -> Result<Regex, RomanizationError> {
    Regex::new(pattern).map_err(|e| RomanizationError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn ascii_letters(eng: &str) -> String {
    eng.to_lowercase()
        .chars()
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Whether `eng` starts with a plausible romanization of the Hangul `han`.
///
/// Only the ASCII letters of `eng` are compared. Trailing letters after a
/// matching romanization are accepted, so "parkjimin" matches 박.
/// Text that is not Hangul never matches.
pub fn matches_hangul_permutation(eng: &str, han: &str) -> bool {
    MATCH_CACHE.get_or_insert_with((eng.to_string(), han.to_string()), || {
        match hangul_romanized_permutations_pattern(han, false) {
            Ok(pattern) => pattern.is_match(&ascii_letters(eng)),
            Err(e) => {
                debug!("Unable to build romanization pattern for {han:?}: {e}");
                false
            }
        }
    })
}

/// Like [`matches_hangul_permutation`], but the whole of `eng` must match
pub fn matches_hangul_permutation_exactly(eng: &str, han: &str) -> bool {
    let pattern = romanization_pattern_source(han, false)
        .and_then(|source| compile(&format!("(?i)^(?:{source})$")));
    match pattern {
        Ok(pattern) => pattern.is_match(&ascii_letters(eng)),
        Err(e) => {
            debug!("Unable to build romanization pattern for {han:?}: {e}");
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Revised Romanization (single best guess)
// ─────────────────────────────────────────────────────────────────────────────

fn ambiguous_romanized() -> HashSet<String> {
    let mut ambiguous = HashSet::new();
    for end in REVISED_END_CONSONANTS {
        for lead in REVISED_LEAD_CONSONANTS {
            let combined = format!("{end}{lead}");
            let splits = (0..combined.len())
                .filter(|&i| {
                    REVISED_END_CONSONANTS.contains(&&combined[..i])
                        && REVISED_LEAD_CONSONANTS.contains(&&combined[i..])
                })
                .count();
            if splits > 1 {
                ambiguous.insert(combined);
            }
        }
    }
    ambiguous
}

#[derive(Debug)]
enum Piece {
    Syllable {
        lead: &'static str,
        vowel: &'static str,
        end: &'static str,
        /// `None` for name overrides, which are never assimilated
        jamo: Option<Syllable>,
    },
    Other(char),
}

fn revised_piece(c: char, name: bool) -> Piece {
    if name {
        if let Some(&(_, (lead, vowel, end))) = REVISED_NAME_SYLLABLES.iter().find(|(n, _)| *n == c) {
            return Piece::Syllable {
                lead,
                vowel,
                end,
                jamo: None,
            };
        }
    }
    match Syllable::from_char(c) {
        Ok(s) => Piece::Syllable {
            lead: s.initial.initial_index().map_or("", |i| REVISED_LEAD_CONSONANTS[i]),
            vowel: s.medial.medial_index().map_or("", |i| REVISED_VOWELS[i]),
            end: s
                .final_
                .and_then(Jamo::final_index)
                .map_or("", |i| REVISED_END_CONSONANTS[i]),
            jamo: Some(s),
        },
        Err(_) => Piece::Other(c),
    }
}

/// Apply the assimilation table between each pair of adjacent syllables
fn assimilate(pieces: &mut [Piece]) {
    for i in 1..pieces.len() {
        let (before, after) = pieces.split_at_mut(i);
        let (
            Piece::Syllable {
                end,
                jamo: Some(prev),
                ..
            },
            Piece::Syllable {
                lead,
                jamo: Some(next),
                ..
            },
        ) = (&mut before[i - 1], &mut after[0])
        else {
            continue;
        };
        let Some(final_) = prev.final_ else {
            continue;
        };
        if let Some((new_final, new_initial)) = combo_change(final_.char, next.initial.char) {
            if let Some(idx) = Jamo::for_char(new_final).ok().and_then(Jamo::final_index) {
                *end = REVISED_END_CONSONANTS[idx];
            }
            if let Some(idx) = Jamo::for_char(new_initial).ok().and_then(Jamo::initial_index) {
                *lead = REVISED_LEAD_CONSONANTS[idx];
            }
        }
    }
}

/// Romanize `text` with the Revised Romanization of Korean.
///
/// `name` uses the customary spellings of name syllables (박 -> "park").
/// `space` separates syllables with spaces. A hyphen separates two syllables
/// when the first ends in a consonant and the second starts with a silent ㅇ,
/// or when the letters at the boundary could be split more than one way.
/// Non-Hangul characters are passed through.
pub fn revised_romanize(text: &str, name: bool, space: bool) -> String {
    let mut pieces: Vec<Piece> = text.chars().map(|c| revised_piece(c, name)).collect();
    assimilate(&mut pieces);

    let mut out = String::with_capacity(text.len() * 2);
    let mut last_end = "";
    for piece in &pieces {
        match piece {
            Piece::Syllable {
                lead,
                vowel,
                end,
                jamo,
            } => {
                let silent_initial = jamo
                    .and_then(|s| s.initial.initial_index())
                    .is_some_and(|i| i == SILENT_INITIAL_INDEX);
                let boundary = format!("{last_end}{lead}");
                if !out.is_empty()
                    && !last_end.is_empty()
                    && (silent_initial || AMBIGUOUS_ROMANIZED.contains(&boundary))
                {
                    if space && out.ends_with(' ') {
                        out.pop();
                    }
                    out.push('-');
                }
                out.push_str(lead);
                out.push_str(vowel);
                out.push_str(end);
                if space {
                    out.push(' ');
                }
                last_end = *end;
            }
            Piece::Other(c) => {
                out.push(*c);
                last_end = "";
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod romanization_tests {
    use super::*;

    fn full_match(source: &str, candidate: &str) -> bool {
        Regex::new(&format!("(?i)^(?:{source})$"))
            .unwrap()
            .is_match(candidate)
    }

    // ─────────────────────────────────────────────────────────────
    // Slot patterns
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn slot_pattern_shapes() {
        assert_eq!(Slot(vec!["g", "k"]).pattern(), "[gk]");
        assert_eq!(Slot(vec!["gg", "kk"]).pattern(), "(?:g{1,2}|k{1,2})");
        assert_eq!(Slot(vec!["sh", "s"]).pattern(), "(?:sh|[s])");
        assert_eq!(Slot(vec![""]).pattern(), "");
        assert_eq!(Slot(vec!["", "w"]).pattern(), "[w]?");
        assert_eq!(Slot(vec!["sh", "ssh", "ss"]).pattern(), "(?:sh|ssh|s{1,2})");
    }

    // ─────────────────────────────────────────────────────────────
    // Permutations
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn permutations_of_surname() {
        let perms = hangul_romanized_permutations("박", false).unwrap();
        for expected in ["park", "bak", "pak", "vak"] {
            assert!(perms.contains(expected), "{expected}");
        }
    }

    #[test]
    fn permutations_include_sh_and_t_stop() {
        let perms = hangul_romanized_permutations("셧", false).unwrap();
        assert!(perms.contains("shyeot"));
        assert!(perms.contains("syeos"));
    }

    #[test]
    fn permutations_include_assimilation() {
        let perms = hangul_romanized_permutations("신라", false).unwrap();
        assert!(perms.contains("silla"));
        assert!(perms.contains("shinra"));
        assert!(perms.contains("sinra"));
    }

    #[test]
    fn assimilation_replaces_whole_consonant_pairs() {
        let perms = hangul_romanized_permutations("맏형", false).unwrap();
        assert!(perms.contains("mathyeong"));
        assert!(perms.contains("matyeong"));
        assert!(!perms.contains("madyeong"), "written final with assimilated initial");

        let perms = hangul_romanized_permutations("국립", false).unwrap();
        assert!(perms.contains("gungnip"));
        assert!(perms.contains("guklip"));
        assert!(!perms.contains("guknip"), "written final with assimilated initial");
        assert!(!perms.contains("gungrip"), "assimilated final with written initial");

        assert!(matches_hangul_permutation_exactly("gungnip", "국립"));
        assert!(!matches_hangul_permutation_exactly("guknip", "국립"));
        assert!(!matches_hangul_permutation_exactly("madyeong", "맏형"));
    }

    #[test]
    fn assimilation_across_words_keeps_pairs() {
        let perms = hangul_romanized_permutations("국 립", true).unwrap();
        assert!(perms.contains("gung nip"));
        assert!(perms.contains("guk rip"));
        assert!(!perms.contains("guk nip"));
    }

    #[test]
    fn permutations_across_words() {
        let with_space = hangul_romanized_permutations("박 지민", true).unwrap();
        assert!(with_space.contains("park jimin"));
        let joined = hangul_romanized_permutations("박 지민", false).unwrap();
        assert!(joined.contains("parkjimin"));
    }

    #[test]
    fn long_name_override() {
        let perms = hangul_romanized_permutations("죠지", false).unwrap();
        assert!(perms.contains("george"));
    }

    #[test]
    fn non_hangul_is_an_error() {
        assert_eq!(
            hangul_romanized_permutations("abc", false),
            Err(RomanizationError::NotASyllable('a'))
        );
    }

    #[test]
    fn every_permutation_fully_matches_pattern() {
        for word in ["박", "신라", "셧", "우주", "국물", "희진", "일레인", "빛나", "국립", "맏형"] {
            let source = romanization_pattern_source(word, false).unwrap();
            for perm in hangul_romanized_permutations(word, false).unwrap() {
                assert!(full_match(&source, &perm), "{word}: {perm} !~ {source}");
            }
        }
    }

    #[test]
    fn spaced_permutations_fully_match_spaced_pattern() {
        let source = romanization_pattern_source("박 지민", true).unwrap();
        for perm in hangul_romanized_permutations("박 지민", true).unwrap() {
            assert!(full_match(&source, &perm), "{perm}");
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Matching
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn matches_known_spellings() {
        assert!(matches_hangul_permutation("park", "박"));
        assert!(matches_hangul_permutation("Park", "박"));
        assert!(matches_hangul_permutation("Woo-ju", "우주"));
        assert!(matches_hangul_permutation("Ji-min", "지민"));
        assert!(!matches_hangul_permutation("banana", "박"));
    }

    #[test]
    fn prefix_match_tolerates_trailing_text() {
        // Documented quirk: only the start of the English text has to match
        assert!(matches_hangul_permutation("parkjimin", "박"));
        assert!(!matches_hangul_permutation_exactly("parkjimin", "박"));
        assert!(matches_hangul_permutation_exactly("park", "박"));
    }

    #[test]
    fn non_hangul_never_matches() {
        assert!(!matches_hangul_permutation("abc", "abc"));
    }

    // ─────────────────────────────────────────────────────────────
    // Revised Romanization
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn revised_basic() {
        assert_eq!(revised_romanize("한글", false, false), "hangeul");
        assert_eq!(revised_romanize("한글", false, true), "han geul");
    }

    #[test]
    fn revised_applies_assimilation() {
        assert_eq!(revised_romanize("국물", false, false), "gungmul");
        assert_eq!(revised_romanize("신라", false, false), "silla");
    }

    #[test]
    fn revised_hyphenates_silent_initial_after_final() {
        assert_eq!(revised_romanize("중앙", false, false), "jung-ang");
        assert_eq!(revised_romanize("중앙", false, true), "jung-ang");
    }

    #[test]
    fn revised_name_syllables() {
        assert_eq!(revised_romanize("박", true, false), "park");
        assert_eq!(revised_romanize("희", true, false), "hee");
        assert_eq!(revised_romanize("희", false, false), "hui");
    }

    #[test]
    fn revised_passes_through_other_text() {
        assert_eq!(revised_romanize("IU 한", false, false), "IU han");
    }

    #[test]
    fn ambiguous_boundaries() {
        assert!(AMBIGUOUS_ROMANIZED.contains("ss"));
        assert!(AMBIGUOUS_ROMANIZED.contains("kk"));
        assert!(!AMBIGUOUS_ROMANIZED.contains("ng"));
    }
}
