//! Album pages: the intro sentence and the track list sections.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::error::WikiEntityError;
use crate::names::{has_parens, parse_intro_name, IntroName};
use crate::parser::ParentheticalParser;
use crate::terms::terms;
use crate::wiki::track_info::{parse_track_info, TrackInfo, TrackOptions};
use crate::wiki::Link;

lazy_static! {
    static ref INTRO: Regex = Regex::new(r"^(.*?)\s+is\s+(?:a|the)\s+(.*?)\.(?:\s|$)").unwrap();
    static ref REPACKAGE_TITLE: Regex =
        Regex::new(r"A repackage titled (.*) (?:was|will be) released").unwrap();
    static ref DISK_HEADER: Regex =
        Regex::new(r"(?i)^Dis[ck]\s+([^\s\p{Pd}~:]+)\s*[\p{Pd}~:]?\s*(.*)$").unwrap();
    static ref NUMBERED_TRACK: Regex = Regex::new(r"^(\d+)\.\s+(.+)$").unwrap();
    static ref LISTED_TRACK: Regex = Regex::new(r"^[#*]\s*(.+)$").unwrap();
}

/// What the first sentence of an album page says about the album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumIntro {
    pub title: IntroName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<String>,
    pub album_type: String,
    pub repackage: bool,
    /// Link to the original release, for repackages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repackage_of: Option<Link>,
    /// Title of a repackage announced on the original release's page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repackage_title: Option<String>,
}

/// Ordinal and type from intro details such as `second mini album`.
///
/// Returns `(Some("2nd"), "mini album")`; `full-length` is dropped.
pub fn album_num_type<S: AsRef<str>>(details: &[S]) -> Result<(Option<String>, String), WikiEntityError> {
    let words: Vec<&str> = details.iter().map(AsRef::as_ref).collect();
    let unknown = || WikiEntityError::UnknownAlbumType {
        details: words.iter().map(|w| w.to_string()).collect(),
    };

    let broad = ["album", "single"].into_iter().find(|t| words.contains(t));
    if let Some(broad) = broad {
        let idx = words.iter().position(|w| *w == broad).ok_or_else(unknown)?;
        let mut desc = words[..=idx].to_vec();
        if let Some(i) = desc.iter().position(|w| *w == "full-length") {
            desc.remove(i);
        }
        return Ok(match terms().ordinal(desc[0]) {
            Some(num) => (Some(num.to_string()), desc[1..].join(" ")),
            None => (None, desc.join(" ")),
        });
    }
    if words.len() > 1 && words[0] == "song" && words[1] == "by" {
        return Ok((None, "single".to_string()));
    }
    Err(unknown())
}

/// Parse the intro sentence, e.g. `Paradise is the second mini album by Artist. ...`
pub fn parse_album_intro(text: &str, links: &[Link]) -> Result<AlbumIntro, WikiEntityError> {
    let text = text.trim();
    let unexpected = || WikiEntityError::UnexpectedIntro(text.chars().take(200).collect());
    let caps = INTRO.captures(text).ok_or_else(unexpected)?;
    let title = parse_intro_name(&caps[1])?;
    let details_str = caps[2]
        .replace("full length", "full-length")
        .replace("mini-album", "mini album");
    let details: Vec<&str> = details_str.split_whitespace().collect();
    let (first, second) = match details.as_slice() {
        [] => return Err(unexpected()),
        [first] => (*first, ""),
        [first, second, ..] => (*first, *second),
    };

    if first == "repackage" || (first == "new" && second == "edition") {
        let artist_idx = details
            .iter()
            .position(|d| d.ends_with("'s") || d.ends_with("S'") || d.ends_with("s'"))
            .ok_or_else(unexpected)?;
        let (num, album_type) = album_num_type(&details[artist_idx + 1..])?;
        let repackage_of = links
            .iter()
            .find(|(link_text, _)| details_str.ends_with(link_text.as_str()))
            .cloned();
        if repackage_of.is_none() {
            debug!("Unable to find link to repackaged version of {:?}; details={details:?}", title.base);
        }
        return Ok(AlbumIntro {
            title,
            num,
            album_type,
            repackage: true,
            repackage_of,
            repackage_title: None,
        });
    }

    let lc_first = first.to_lowercase();
    if (first == "original" && second == "soundtrack") || lc_first == "ost" || lc_first == "soundtrack" {
        return Ok(AlbumIntro {
            title,
            num: None,
            album_type: "OST".to_string(),
            repackage: false,
            repackage_of: None,
            repackage_title: None,
        });
    }

    let (num, album_type) = album_num_type(&details)?;
    let repackage_title = REPACKAGE_TITLE
        .captures(text)
        .map(|m| m[1].trim().to_string());
    Ok(AlbumIntro {
        title,
        num,
        album_type,
        repackage: false,
        repackage_of: None,
        repackage_title,
    })
}

/// Disk number and remaining title of a `Disc 2: Title` style header
pub fn parse_disk_header(header: &str) -> Result<(u32, Option<String>), WikiEntityError> {
    let header = header.trim();
    let caps = DISK_HEADER
        .captures(header)
        .ok_or_else(|| WikiEntityError::UnexpectedDisk(header.to_string()))?;
    let raw = caps[1].trim().to_lowercase();
    let disk = match terms().number_word(&raw) {
        Some(num) => num,
        None => raw
            .parse()
            .map_err(|_| WikiEntityError::UnexpectedDisk(caps[1].to_string()))?,
    };
    let rest = caps[2].trim();
    Ok((disk, (!rest.is_empty()).then(|| rest.to_string())))
}

/// One track list with the header that preceded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    pub disk: u32,
    pub tracks: Vec<TrackInfo>,
}

#[derive(Default)]
struct SectionState {
    section: Option<String>,
    extras: Vec<String>,
    disk: u32,
    tracks: Vec<TrackInfo>,
}

impl SectionState {
    fn is_dvd(&self) -> bool {
        self.section
            .as_deref()
            .is_some_and(|s| s.to_lowercase().starts_with("dvd"))
    }

    /// Close the current list, if it has tracks
    fn flush(&mut self, sections: &mut Vec<TrackSection>) {
        if self.tracks.is_empty() {
            return;
        }
        let tracks = std::mem::take(&mut self.tracks);
        if self.is_dvd() {
            debug!("Skipping DVD section {:?}", self.section);
        } else {
            sections.push(TrackSection {
                section: self.section.take(),
                extras: std::mem::take(&mut self.extras),
                disk: self.disk,
                tracks,
            });
        }
        self.section = None;
        self.extras.clear();
    }

    fn header(&mut self, line: &str) -> Result<(), WikiEntityError> {
        let mut parts = match has_parens(line) {
            true => ParentheticalParser::new(false, true)
                .parse(line)
                .unwrap_or_else(|_| vec![line.to_string()]),
            false => vec![line.to_string()],
        };
        if parts.is_empty() {
            parts.push(line.to_string());
        }
        let mut section = Some(parts.remove(0));
        if section
            .as_deref()
            .is_some_and(|s| s.to_lowercase().starts_with("disk") || s.to_lowercase().starts_with("disc"))
        {
            let (disk, rest) = parse_disk_header(section.as_deref().unwrap_or_default())?;
            self.disk = disk;
            section = rest;
        } else {
            self.disk = 1;
        }
        self.section = section;
        self.extras = parts;
        Ok(())
    }
}

/// Split a plain-text track list into sections.
///
/// Lines like `1. Song` or `# Song` are tracks; any other non-blank line is a
/// section header such as `Disc 2` or `Korean edition (한국어판)`. Tracks under
/// a `DVD` header are skipped.
pub fn parse_track_sections(
    text: &str,
    context: &str,
    intro_links: &[Link],
    compilation: bool,
) -> Result<Vec<TrackSection>, WikiEntityError> {
    let opts = TrackOptions {
        length: None,
        links: intro_links.to_vec(),
        compilation,
    };
    let mut sections = Vec::new();
    let mut state = SectionState {
        disk: 1,
        ..Default::default()
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let track = if let Some(caps) = NUMBERED_TRACK.captures(line) {
            let num = caps[1]
                .parse()
                .unwrap_or(state.tracks.len() as u32 + 1);
            Some((num, caps.get(2).map_or("", |m| m.as_str())))
        } else {
            LISTED_TRACK
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| (state.tracks.len() as u32 + 1, m.as_str()))
        };

        match track {
            Some(_) if state.is_dvd() => continue,
            Some((num, track_text)) => {
                let info = parse_track_info(num, track_text, context, &opts)?;
                state.tracks.push(info);
            }
            None => {
                state.flush(&mut sections);
                state.header(line)?;
            }
        }
    }
    state.flush(&mut sections);
    Ok(sections)
}
