//! Hangul decomposition and romanization.

pub mod constants;
pub mod jamo;
pub mod romanization;

pub use jamo::{
    compose, decompose, decompose_syllables, is_final_jamo, is_hangul_syllable, is_jamo,
    is_lead_jamo, is_vowel_jamo, Jamo, Position, Syllable, Word,
};
pub use romanization::{
    hangul_romanized_permutations, hangul_romanized_permutations_pattern,
    matches_hangul_permutation, matches_hangul_permutation_exactly, revised_romanize,
    romanization_pattern_source,
};
