//! Error types for name, title, track and discography parsing.
//!
//! Every failure here is per-entry: callers log it and move on to the next
//! input rather than aborting the run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::TokenKind;
use crate::unicode::LangCat;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Any error produced by this crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Name split error: {0}")]
    NameSplit(#[from] NameSplitError),

    #[error("Track info error: {0}")]
    TrackInfo(#[from] TrackInfoError),

    #[error("Romanization error: {0}")]
    Romanization(#[from] RomanizationError),

    #[error("Wiki entity error: {0}")]
    WikiEntity(#[from] WikiEntityError),

    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    #[error("Language category error: {0}")]
    LangCat(#[from] LangCatError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The tokenizer-parser could not consume its input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token that no grammar rule accepts at this point
    #[error("Unexpected {kind} token {value:?} in {input:?}")]
    UnexpectedToken {
        kind: TokenKind,
        value: String,
        input: String,
    },

    /// A second trailing time after one was already captured
    #[error("Unexpected time {value:?} in {input:?} (time {existing:?} was already found)")]
    DuplicateTime {
        value: String,
        existing: String,
        input: String,
    },
}

/// A name could not be split into English and native parts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameSplitError {
    #[error("Unable to split {name:?} into separate English/CJK strings: {detail}")]
    CannotSplit { name: String, detail: String },

    #[error("Unable to split {name:?} into separate English/CJK strings: {error}")]
    Parse {
        name: String,
        #[source]
        error: ParseError,
    },
}

impl NameSplitError {
    pub(crate) fn cannot_split(name: impl Into<String>, detail: impl Into<String>) -> Self {
        NameSplitError::CannotSplit {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

/// A track-list entry could not be turned into track info
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackInfoError {
    #[error("Error parsing track number {raw:?} for {text:?} from {context}")]
    InvalidNumber {
        raw: String,
        text: String,
        context: String,
    },

    #[error("Error parsing track from {context}: {text:?}")]
    Parse {
        text: String,
        context: String,
        #[source]
        error: ParseError,
    },

    #[error("Length={length:?} was provided for track {num}/{text:?} from {context}, but it was also parsed to be {parsed:?}")]
    LengthConflict {
        num: u32,
        text: String,
        context: String,
        length: String,
        parsed: String,
    },

    #[error("No track name found in {text:?} from {context}")]
    NoName { text: String, context: String },
}

/// Malformed input to the Hangul romanization engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RomanizationError {
    #[error("Not a precomposed Hangul syllable: {0:?}")]
    NotASyllable(char),

    #[error("Not a Korean jamo: {0:?}")]
    NotJamo(char),

    #[error("Jamo {jamo:?} cannot be used in the {position} position")]
    InvalidPosition { jamo: char, position: &'static str },

    #[error("Invalid romanization pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// A discography entry or album page could not be assembled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WikiEntityError {
    #[error("Unhandled discography entry format {text:?} for {artist}: {error}")]
    Unparseable {
        text: String,
        artist: String,
        #[source]
        error: ParseError,
    },

    #[error("No title found in discography entry {text:?}")]
    MissingTitle { text: String },

    #[error("Too many non-artist links found in {text:?}: {links:?}")]
    TooManyLinks {
        text: String,
        links: Vec<(String, String)>,
    },

    #[error("Unable to determine album type from details: {details:?}")]
    UnknownAlbumType { details: Vec<String> },

    #[error("Unexpected album intro format: {0:?}")]
    UnexpectedIntro(String),

    #[error("Unexpected disk number in section header: {0:?}")]
    UnexpectedDisk(String),

    #[error(transparent)]
    Name(#[from] NameSplitError),

    #[error(transparent)]
    Track(#[from] TrackInfoError),
}

/// Parallel lyric stanza lists do not line up
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LyricsError {
    #[error("Stanza lengths don't match: {lengths:?}")]
    StanzaMismatch { lengths: BTreeMap<String, usize> },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangCatError {
    #[error("{0:?} is not supported for this check")]
    UnsupportedCategory(LangCat),
}

/// Term schema loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read term schema {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse term schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid separator pattern in term schema: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Track terms already initialized")]
    AlreadyInitialized,
}
