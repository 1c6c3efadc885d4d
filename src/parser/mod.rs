//! Recursive-descent grammars for names, track-list entries and titles.
//!
//! All three share the token cursor in [`cursor`]; each grammar owns its
//! token rules.

pub mod cursor;
pub mod parenthetical;
pub mod title;
pub mod track;

pub use cursor::{Token, TokenKind, Tokenizer, DASH_CLASS, QUOTE_CHARS};
pub use parenthetical::ParentheticalParser;
pub use title::{AlbumTitle, AlbumTitleParser, Title, TitleParser};
pub use track::TrackInfoParser;
