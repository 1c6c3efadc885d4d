//! Discography list entries from an artist page, e.g.
//! `"Paradise" (with Jane) (2018)` under a `Mini albums` heading.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;

use crate::error::WikiEntityError;
use crate::names::{split_name, str2list};
use crate::parser::ParentheticalParser;
use crate::terms::terms;
use crate::wiki::track_info::{parse_track_info, TrackInfo, TrackOptions};
use crate::wiki::{num_suffix, Link, DRAMA_WIKI, KPOP_WIKI, WIKIPEDIA};

lazy_static! {
    static ref NUMBERED_TYPE: Regex = Regex::new(r"_\d$").unwrap();
    static ref OST_TITLE: Regex = Regex::new(r"^(.*? OST)").unwrap();
}

/// The artist whose page the entry was listed on
#[derive(Debug, Clone, Default)]
pub struct ArtistContext {
    pub english_name: String,
    pub native_name: String,
    pub uri_path: Option<String>,
}

/// One list item from a discography section
#[derive(Debug, Clone, Default)]
pub struct DiscographyItem {
    pub text: String,
    pub links: Vec<Link>,
    /// Section type such as `mini_albums` or `singles_2`
    pub album_type: Option<String>,
    pub language: Option<String>,
    /// 1-based position of the entry within its section
    pub type_idx: u32,
}

impl DiscographyItem {
    pub fn new(text: impl Into<String>) -> Self {
        DiscographyItem {
            text: text.into(),
            type_idx: 1,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collaborator {
    pub artist: (String, String),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_group: Option<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscographyEntry {
    pub title: String,
    /// Name and link target of the artist the entry belongs to
    pub primary_artist: (String, Option<String>),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_type: Option<String>,
    pub base_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    pub collaborators: Vec<Collaborator>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub misc_info: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_path: Option<String>,
    pub wiki: String,
    pub is_feature_or_collab: bool,
    pub is_ost: bool,
    pub is_repackage: bool,
    pub num: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_info: Option<TrackInfo>,
}

impl DiscographyEntry {
    pub fn collaborator_names(&self) -> Vec<&str> {
        self.collaborators.iter().map(|c| c.artist.0.as_str()).collect()
    }
}

fn is_year(part: &str) -> bool {
    part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit())
}

/// Lowercase words with language abbreviations replaced by the language name
/// and bracket/dash characters dropped
fn synonym_key(text: &str) -> String {
    let terms = terms();
    text.to_lowercase()
        .replace(['(', ')', '[', ']', '-', '~'], " ")
        .split_whitespace()
        .map(|word| terms.language(word).map_or(word.to_string(), str::to_lowercase))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Host and path of an absolute http(s) URL
fn split_url(href: &str) -> Option<(&str, &str)> {
    let rest = href
        .strip_prefix("https://")
        .or_else(|| href.strip_prefix("http://"))?;
    Some(match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    })
}

fn base_type(album_type: Option<&str>) -> String {
    match album_type {
        Some(t) if NUMBERED_TYPE.is_match(t) => t[..t.len() - 2].to_lowercase(),
        Some(t) => t.to_lowercase(),
        None => String::new(),
    }
}

pub fn parse_discography_entry(
    artist: &ArtistContext,
    item: &DiscographyItem,
) -> Result<DiscographyEntry, WikiEntityError> {
    let text = item.text.trim();
    let missing_title = || WikiEntityError::MissingTitle {
        text: text.to_string(),
    };
    let mut parsed = ParentheticalParser::default()
        .parse(text)
        .map_err(|error| WikiEntityError::Unparseable {
            text: text.to_string(),
            artist: artist.english_name.clone(),
            error,
        })?;
    if parsed.is_empty() {
        return Err(missing_title());
    }

    let links = &item.links;
    let hrefs: HashMap<&str, &str> = links
        .iter()
        .map(|(t, h)| (t.as_str(), h.as_str()))
        .collect();
    let href_for = |name: &str| hrefs.get(name).map(|h| h.to_string());

    let base_type = base_type(item.album_type.as_deref());
    let is_feature = matches!(base_type.as_str(), "features" | "collaborations_and_features");

    // Features on another artist's release are led by that artist: `Other - Song`
    let lead_artist = match is_feature {
        true if parsed[0].ends_with('-') => {
            let lead = parsed.remove(0);
            Some(lead[..lead.len() - 1].trim().to_string())
        }
        true => match parsed[0].split_once(" - ") {
            Some((lead, rest)) if !rest.trim().is_empty() => {
                let lead = lead.trim().to_string();
                parsed[0] = rest.trim().to_string();
                Some(lead)
            }
            _ => None,
        },
        false => None,
    };
    let (primary_artist, primary_uri) = match lead_artist {
        Some(name) => {
            let uri = links
                .first()
                .filter(|(link_text, _)| *link_text == name)
                .map(|(_, href)| href.clone());
            (name, uri)
        }
        None => (artist.english_name.clone(), artist.uri_path.clone()),
    };

    let mut year = None;
    let mut year_was_last = false;
    if parsed.last().is_some_and(|p| is_year(p)) {
        year = parsed.pop().and_then(|y| y.parse().ok());
        year_was_last = true;
    } else if parsed.len() >= 2 && is_year(&parsed[parsed.len() - 2]) {
        year = parsed.remove(parsed.len() - 2).parse().ok();
    }

    if parsed.is_empty() {
        return Err(missing_title());
    }
    let mut title = parsed.remove(0);
    let mut track_info = None;
    if text.starts_with('[') && !title.starts_with('[') && !parsed.iter().any(|p| p.contains(']')) {
        title = format!("[{title}]");
    } else if !is_feature && !text.starts_with('"') && parsed.len() == 1 && text.contains('"') {
        // Album names ending in a quoted word
        title = format!("{title} \"{}\"", parsed.remove(0));
    } else if base_type.contains("singles") {
        let info = parse_track_info(1, &title, text, &TrackOptions::default())?;
        title = info.display_name();
        if let Some(language) = &info.language {
            title.push_str(&format!(" ({language} ver.)"));
        }
        track_info = Some(info);
    }

    let terms = terms();
    let mut collaborators = Vec::new();
    let mut misc_info = Vec::new();
    for part in parsed {
        let lc_part = part.to_lowercase();
        if !(terms.starts_with_collab_lead(&lc_part) || lc_part.contains("feat.")) {
            misc_info.push(part);
            continue;
        }
        for collab in str2list(&part, &terms.name_list_separators) {
            let collaborator = match collab.split_once(" of ") {
                Some((soloist, group)) if !group.contains(" of ") => Collaborator {
                    artist: split_name(soloist)?.into_pair(),
                    artist_href: href_for(soloist),
                    of_group: Some(split_name(group)?.into_pair()),
                    group_href: href_for(group),
                },
                _ => Collaborator {
                    artist: split_name(&collab)?.into_pair(),
                    artist_href: href_for(&collab),
                    of_group: None,
                    group_href: None,
                },
            };
            collaborators.push(collaborator);
        }
    }

    let mut is_repackage = false;
    if let Some(i) = misc_info.iter().position(|v| v.to_lowercase() == "repackage") {
        misc_info.remove(i);
        is_repackage = true;
    }

    if misc_info.len() > 1 {
        debug!("Unexpected misc_info length for {} - {text:?}: {misc_info:?}", artist.english_name);
    } else if misc_info.len() == 1 && year_was_last {
        let value = misc_info.remove(0);
        let mut words: Vec<String> = value.split_whitespace().map(String::from).collect();
        if let Some((i, language)) = words
            .iter()
            .enumerate()
            .find_map(|(i, w)| terms.language(w).map(|lang| (i, lang.to_string())))
        {
            words[i] = language;
            title = format!("{title} ({})", words.join(" "));
        } else {
            title = format!("{title} ({value})");
        }
    } else if !misc_info.is_empty() {
        debug!(
            "{}: Unexpected misc content in discography entry {text:?} => title={title:?}, misc: {misc_info:?}",
            artist.english_name
        );
    }

    let mut collab_names: HashSet<String> = HashSet::new();
    let mut collab_hrefs: HashSet<Option<String>> = HashSet::new();
    for collab in &collaborators {
        collab_names.insert(collab.artist.0.clone());
        collab_hrefs.insert(collab.artist_href.clone());
        if let Some(group) = &collab.of_group {
            collab_names.insert(group.0.clone());
            collab_hrefs.insert(collab.group_href.clone());
        }
    }
    if (!collab_names.contains(&artist.english_name) || !collab_hrefs.contains(&artist.uri_path))
        && primary_artist != artist.english_name
    {
        collaborators.push(Collaborator {
            artist: (artist.english_name.clone(), artist.native_name.clone()),
            artist_href: artist.uri_path.clone(),
            of_group: None,
            group_href: None,
        });
        collab_hrefs.insert(artist.uri_path.clone());
    }

    let is_feature_or_collab = matches!(
        base_type.as_str(),
        "features" | "collaborations" | "collaborations_and_features"
    );
    let is_ost = matches!(base_type.as_str(), "ost" | "osts");

    let non_artist_links: Vec<&Link> = links
        .iter()
        .filter(|(_, href)| {
            !href.is_empty()
                && primary_uri.as_deref() != Some(href.as_str())
                && !collab_hrefs.contains(&Some(href.clone()))
        })
        .collect();

    let (uri_path, wiki) = match non_artist_links.as_slice() {
        [] if is_ost => {
            let base = OST_TITLE
                .captures(&title)
                .and_then(|m| m.get(1))
                .map_or(title.as_str(), |m| m.as_str().trim());
            (Some(base.replace(' ', "_")), DRAMA_WIKI)
        }
        [] => (None, KPOP_WIKI),
        [(link_text, href)] => {
            if title != *link_text
                && !is_feature_or_collab
                && !(link_text.starts_with(title.as_str()) && link_text.contains(['-', '~', '(', '[']))
                && synonym_key(link_text) != synonym_key(&title)
            {
                debug!("Unexpected first link text {link_text:?} for album {title:?}");
            }
            match split_url(href) {
                Some((WIKIPEDIA, path)) => (path.get(6..).map(String::from), WIKIPEDIA),
                Some(_) => {
                    debug!(
                        "Found link from {}'s discography to unexpected site: {href}",
                        artist.english_name
                    );
                    (None, KPOP_WIKI)
                }
                None => (Some(href.clone()), KPOP_WIKI),
            }
        }
        _ => {
            return Err(WikiEntityError::TooManyLinks {
                text: text.to_string(),
                links: non_artist_links.into_iter().cloned().collect(),
            });
        }
    };

    Ok(DiscographyEntry {
        title,
        primary_artist: (primary_artist, primary_uri),
        album_type: item.album_type.clone(),
        base_type,
        year,
        collaborators,
        misc_info,
        language: item.language.clone(),
        uri_path,
        wiki: wiki.to_string(),
        is_feature_or_collab,
        is_ost,
        is_repackage,
        num: format!("{}{}", item.type_idx, num_suffix(item.type_idx)),
        track_info,
    })
}

#[cfg(test)]
mod discography_tests {
    use super::*;

    fn artist() -> ArtistContext {
        ArtistContext {
            english_name: "Artist".into(),
            native_name: "아티스트".into(),
            uri_path: Some("Artist".into()),
        }
    }

    fn entry(text: &str, album_type: &str) -> DiscographyEntry {
        let item = DiscographyItem {
            album_type: Some(album_type.into()),
            ..DiscographyItem::new(text)
        };
        parse_discography_entry(&artist(), &item).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Titles and years
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn title_and_year() {
        let e = entry("Paradise (2018)", "mini_albums");
        assert_eq!(e.title, "Paradise");
        assert_eq!(e.year, Some(2018));
        assert!(e.collaborators.is_empty());
        assert_eq!(e.base_type, "mini_albums");
        assert_eq!(e.wiki, KPOP_WIKI);
        assert_eq!(e.num, "1st");
    }

    #[test]
    fn with_collaborator() {
        let e = entry("Paradise (with Jane) (2018)", "singles");
        assert_eq!(e.title, "Paradise");
        assert_eq!(e.year, Some(2018));
        assert_eq!(e.collaborator_names(), vec!["Jane"]);
        assert!(e.track_info.is_some());
    }

    #[test]
    fn numbered_type_and_bracket_title() {
        let e = entry("[+ +] (2019)", "albums_2");
        assert_eq!(e.base_type, "albums");
        assert_eq!(e.title, "[+ +]");
    }

    #[test]
    fn year_before_last_part() {
        let e = entry("Album (2017) (Repackage)", "albums");
        assert_eq!(e.year, Some(2017));
        assert!(e.is_repackage);
        assert!(e.misc_info.is_empty());
    }

    #[test]
    fn language_edition_joins_title() {
        let e = entry("Album (Jp ver.) (2016)", "albums");
        assert_eq!(e.title, "Album (Japanese ver.)");
        assert!(e.misc_info.is_empty());
    }

    #[test]
    fn single_with_korean_title() {
        let e = entry("\"Song (노래)\" (2015)", "singles");
        assert_eq!(e.title, "Song (노래)");
        let info = e.track_info.unwrap();
        assert_eq!(info.name_parts, ("Song".to_string(), "노래".to_string()));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Artists and links
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn feature_lists_page_artist() {
        let item = DiscographyItem {
            album_type: Some("features".into()),
            links: vec![
                ("Other".into(), "Other".into()),
                ("Artist".into(), "Artist".into()),
            ],
            ..DiscographyItem::new("Other - Song (feat. Artist) (2020)")
        };
        let e = parse_discography_entry(&artist(), &item).unwrap();
        assert_eq!(e.primary_artist, ("Other".to_string(), Some("Other".to_string())));
        assert_eq!(e.title, "Song");
        assert!(e.is_feature_or_collab);
        assert_eq!(e.collaborator_names(), vec!["Artist"]);
        assert_eq!(e.uri_path, None);
    }

    #[test]
    fn soloist_of_group() {
        let e = entry("Song (with A of Group) (2020)", "collaborations");
        let collab = &e.collaborators[0];
        assert_eq!(collab.artist.0, "A");
        assert_eq!(collab.of_group.as_ref().map(|g| g.0.as_str()), Some("Group"));
    }

    #[test]
    fn album_link() {
        let item = DiscographyItem {
            album_type: Some("albums".into()),
            links: vec![("Paradise".into(), "Paradise_(album)".into())],
            ..DiscographyItem::new("Paradise (2018)")
        };
        let e = parse_discography_entry(&artist(), &item).unwrap();
        assert_eq!(e.uri_path.as_deref(), Some("Paradise_(album)"));
        assert_eq!(e.wiki, KPOP_WIKI);
    }

    #[test]
    fn wikipedia_link() {
        let item = DiscographyItem {
            album_type: Some("albums".into()),
            links: vec![(
                "Paradise".into(),
                "https://en.wikipedia.org/wiki/Paradise_(album)".into(),
            )],
            ..DiscographyItem::new("Paradise (2018)")
        };
        let e = parse_discography_entry(&artist(), &item).unwrap();
        assert_eq!(e.uri_path.as_deref(), Some("Paradise_(album)"));
        assert_eq!(e.wiki, WIKIPEDIA);
    }

    #[test]
    fn too_many_links() {
        let item = DiscographyItem {
            album_type: Some("albums".into()),
            links: vec![("A".into(), "A".into()), ("B".into(), "B".into())],
            ..DiscographyItem::new("Paradise (2018)")
        };
        let err = parse_discography_entry(&artist(), &item).unwrap_err();
        assert!(matches!(err, WikiEntityError::TooManyLinks { .. }));
    }

    #[test]
    fn ost_without_link() {
        let e = entry("Drama OST Part.2 (2018)", "osts");
        assert!(e.is_ost);
        assert_eq!(e.uri_path.as_deref(), Some("Drama_OST"));
        assert_eq!(e.wiki, DRAMA_WIKI);
    }

    #[test]
    fn synonym_keys() {
        assert_eq!(synonym_key("Album (Jp Ver.)"), synonym_key("Album - Japanese ver."));
        assert_ne!(synonym_key("Album"), synonym_key("Other"));
    }
}
