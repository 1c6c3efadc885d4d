//! Parsing of bilingual (English / CJK) K-pop artist names, song and album
//! titles, track lists and discography entries.
//!
//! The pieces, bottom-up:
//!
//! - [`unicode`]: script categorization of text ([`LangCat`])
//! - [`hangul`]: jamo decomposition, Revised Romanization and the
//!   romanization-permutation matcher used to pair `Park` with `박`
//! - [`parser`]: tokenizer-driven grammars for names, track entries and titles
//! - [`names`]: splitting a name into its English and native halves
//! - [`wiki`]: track info, discography entries and album pages
//! - [`lyrics`]: stanza alignment of parallel lyric translations
//! - [`batch`]: line-at-a-time processing used by the command-line tool

pub mod batch;
pub mod cache;
pub mod error;
pub mod hangul;
pub mod lyrics;
pub mod names;
pub mod parser;
pub mod terms;
pub mod unicode;
pub mod wiki;

pub use error::{Error, Result};
pub use names::{eng_cjk_sort, parse_intro_name, split_name, split_name_with, split_names, NameSplit, SplitOptions};
pub use parser::{AlbumTitleParser, ParentheticalParser, TitleParser, TrackInfoParser};
pub use terms::{init_terms, terms};
pub use unicode::LangCat;
