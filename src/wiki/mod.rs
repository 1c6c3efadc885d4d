//! Assembly of wiki-derived entities: track info, discography entries and
//! album pages.
//!
//! Input here is already-extracted text plus the `(text, href)` pairs of the
//! links that appeared in it. Nothing in this module touches the network.

pub mod album;
pub mod discography;
pub mod track_info;

pub use album::{
    album_num_type, parse_album_intro, parse_disk_header, parse_track_sections, AlbumIntro,
    TrackSection,
};
pub use discography::{
    parse_discography_entry, ArtistContext, Collaborator, DiscographyEntry, DiscographyItem,
};
pub use track_info::{
    parse_track_info, parse_track_line, parse_track_number, track_info_from_parts, unsurround,
    TrackInfo, TrackOptions, UNKNOWN_LENGTH,
};

/// Anchor text and target of a link, with any `/wiki/` prefix removed
pub type Link = (String, String);

pub const KPOP_WIKI: &str = "kpop.fandom.com";
pub const WIKIPEDIA: &str = "en.wikipedia.org";
pub const DRAMA_WIKI: &str = "wiki.d-addicts.com";

/// Keep the anchors that have a target, stripping the `/wiki/` prefix
pub fn link_tuples<I, S>(anchors: I) -> Vec<Link>
where
    I: IntoIterator<Item = (S, Option<S>)>,
    S: AsRef<str>,
{
    anchors
        .into_iter()
        .filter_map(|(text, href)| {
            let href = href?;
            let href = href.as_ref();
            if href.is_empty() {
                return None;
            }
            let href = href.strip_prefix("/wiki/").unwrap_or(href);
            Some((text.as_ref().to_string(), href.to_string()))
        })
        .collect()
}

/// English ordinal suffix: `st`, `nd`, `rd` or `th`
pub fn num_suffix(num: u32) -> &'static str {
    if (4..=20).contains(&(num % 100)) {
        return "th";
    }
    match num % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod wiki_tests {
    use super::*;

    #[test]
    fn suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (20, "th"),
            (21, "st"),
            (22, "nd"),
            (33, "rd"),
            (101, "st"),
            (111, "th"),
        ];
        for (num, expected) in cases {
            assert_eq!(num_suffix(num), expected, "{num}");
        }
    }

    #[test]
    fn links_without_targets_are_dropped() {
        let links = link_tuples(vec![
            ("Artist", Some("/wiki/Artist")),
            ("Nothing", None),
            ("Empty", Some("")),
            ("External", Some("https://en.wikipedia.org/wiki/Song")),
        ]);
        assert_eq!(
            links,
            vec![
                ("Artist".to_string(), "Artist".to_string()),
                (
                    "External".to_string(),
                    "https://en.wikipedia.org/wiki/Song".to_string()
                ),
            ]
        );
    }
}
