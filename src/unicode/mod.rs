//! Script detection for mixed English/CJK text.

pub mod langcat;
pub mod ranges;

pub use langcat::{
    contains_any_cjk, contains_cjk, contains_hangul, contains_japanese, is_any_cjk, is_cjk,
    is_hangul, is_japanese, matches_permutation, LangCat,
};
