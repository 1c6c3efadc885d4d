//! Line-at-a-time processing: one input line in, one JSON record out.

use std::collections::BTreeSet;

use clap::ValueEnum;
use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::hangul::{revised_romanize, romanization_pattern_source};
use crate::names::{parse_intro_name, split_name_with, split_names, SplitOptions};
use crate::parser::{AlbumTitleParser, TitleParser};
use crate::unicode::{is_hangul, LangCat};
use crate::wiki::{
    parse_discography_entry, parse_track_info, parse_track_line, ArtistContext, DiscographyItem,
    TrackOptions,
};

/// What each input line contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One artist name, split into English and native halves
    Name,
    /// A list of artist names separated by commas, `and`, `&`
    Names,
    /// The first sentence of an artist page
    Intro,
    /// A track-list entry, optionally numbered (`3. Song - 3:25`)
    Track,
    /// A song title
    Title,
    /// An album title with optional year
    AlbumTitle,
    /// A discography list entry of the artist given with `--artist`
    Discography,
    /// Hangul text to romanize
    Romanize,
    /// Any text; reports its script category
    Langcat,
}

/// Settings shared by every line of one run
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub mode: Mode,
    pub split: SplitOptions,
    pub artist: ArtistContext,
    pub album_type: Option<String>,
}

impl BatchContext {
    pub fn new(mode: Mode) -> Self {
        BatchContext {
            mode,
            split: SplitOptions::default(),
            artist: ArtistContext::default(),
            album_type: None,
        }
    }
}

/// Output record for one input line
#[derive(Debug, Clone, Serialize)]
pub struct LineRecord {
    pub line: usize,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LineRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Serialize)]
struct Romanized {
    revised: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
}

#[derive(Debug, Serialize)]
struct Categorized {
    category: LangCat,
    detailed: BTreeSet<LangCat>,
}

/// Process one line. `line_no` is 1-based.
pub fn process_line(ctx: &BatchContext, line_no: usize, input: &str) -> LineRecord {
    let input = input.trim();
    let (output, error) = match run(ctx, line_no, input) {
        Ok(value) => (Some(value), None),
        Err(e) => {
            debug!("Line {line_no}: {e}");
            (None, Some(e.to_string()))
        }
    };
    LineRecord {
        line: line_no,
        input: input.to_string(),
        output,
        error,
    }
}

fn run(ctx: &BatchContext, line_no: usize, input: &str) -> Result<serde_json::Value> {
    let value = match ctx.mode {
        Mode::Name => serde_json::to_value(split_name_with(input, &ctx.split)?)?,
        Mode::Names => serde_json::to_value(split_names(input)?)?,
        Mode::Intro => serde_json::to_value(parse_intro_name(input)?)?,
        Mode::Track => {
            let info = match input.starts_with(|c: char| c.is_ascii_digit()) {
                true => parse_track_line(input, "input")?,
                false => parse_track_info(line_no as u32, input, "input", &TrackOptions::default())?,
            };
            serde_json::to_value(info)?
        }
        Mode::Title => serde_json::to_value(TitleParser.parse(input)?)?,
        Mode::AlbumTitle => serde_json::to_value(AlbumTitleParser.parse(input)?)?,
        Mode::Discography => {
            let item = DiscographyItem {
                album_type: ctx.album_type.clone(),
                type_idx: line_no as u32,
                ..DiscographyItem::new(input)
            };
            serde_json::to_value(parse_discography_entry(&ctx.artist, &item)?)?
        }
        Mode::Romanize => {
            let pattern = match is_hangul(input) {
                true => Some(romanization_pattern_source(input, true)?),
                false => None,
            };
            serde_json::to_value(Romanized {
                revised: revised_romanize(input, false, false),
                name: revised_romanize(input, true, false),
                pattern,
            })?
        }
        Mode::Langcat => serde_json::to_value(Categorized {
            category: LangCat::categorize(input),
            detailed: LangCat::categorize_detailed(input),
        })?,
    };
    Ok(value)
}

#[cfg(test)]
mod batch_tests {
    use super::*;

    #[test]
    fn name_record() {
        let record = process_line(&BatchContext::new(Mode::Name), 1, "IU (아이유)");
        assert!(record.is_ok());
        let output = record.output.unwrap();
        assert_eq!(output["english"], "IU");
        assert_eq!(output["native"], "아이유");
    }

    #[test]
    fn failed_line_keeps_input() {
        let record = process_line(&BatchContext::new(Mode::Name), 7, "A (B) (C) (D)");
        assert!(!record.is_ok());
        assert_eq!(record.line, 7);
        assert_eq!(record.input, "A (B) (C) (D)");
        assert!(record.output.is_none());
    }

    #[test]
    fn track_line_numbers() {
        let ctx = BatchContext::new(Mode::Track);
        let numbered = process_line(&ctx, 1, "3. Song (노래) - 3:25").output.unwrap();
        assert_eq!(numbered["num"], 3);
        let plain = process_line(&ctx, 5, "Song (노래)").output.unwrap();
        assert_eq!(plain["num"], 5);
        assert_eq!(plain["length"], "-1:00");
    }

    #[test]
    fn discography_record() {
        let mut ctx = BatchContext::new(Mode::Discography);
        ctx.album_type = Some("mini_albums".into());
        ctx.artist.english_name = "Artist".into();
        let output = process_line(&ctx, 2, "Paradise (2018)").output.unwrap();
        assert_eq!(output["title"], "Paradise");
        assert_eq!(output["year"], 2018);
        assert_eq!(output["num"], "2nd");
    }

    #[test]
    fn romanize_record() {
        let output = process_line(&BatchContext::new(Mode::Romanize), 1, "박")
            .output
            .unwrap();
        assert_eq!(output["name"], "park");
        assert!(output["pattern"].is_string());
    }

    #[test]
    fn langcat_record() {
        let output = process_line(&BatchContext::new(Mode::Langcat), 1, "Hello")
            .output
            .unwrap();
        assert_eq!(output["category"], "ENG");
    }
}
