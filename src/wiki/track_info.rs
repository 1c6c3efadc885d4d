//! Track-list entries: `"Song (노래) (feat. Rapper) - 3:25"` into a
//! structured [`TrackInfo`].

use std::collections::BTreeSet;

use log::{debug, trace, warn};
use serde::Serialize;

use crate::error::TrackInfoError;
use crate::names::{categorize_langs, combine_name_parts, eng_cjk_sort, str2list};
use crate::parser::TrackInfoParser;
use crate::terms::terms;
use crate::unicode::LangCat;
use crate::wiki::Link;

/// Length used when neither the caller nor the text provides one
pub const UNKNOWN_LENGTH: &str = "-1:00";

#[derive(Debug, Clone, Default)]
pub struct TrackOptions {
    /// Length from a separate column; conflicts with a parsed length
    pub length: Option<String>,
    /// Links that appeared in the entry, used to recognize collaborators
    pub links: Vec<Link>,
    /// The last part names the performing artists of a compilation track
    pub compilation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub num: u32,
    pub length: String,
    pub name_parts: (String, String),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collaborators: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub misc: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub compilation: bool,
}

impl TrackInfo {
    /// `English (Native)`, or whichever half is present
    pub fn display_name(&self) -> String {
        match (&self.name_parts.0, &self.name_parts.1) {
            (eng, cjk) if !eng.is_empty() && !cjk.is_empty() => format!("{eng} ({cjk})"),
            (eng, cjk) if eng.is_empty() => cjk.clone(),
            (eng, _) => eng.clone(),
        }
    }
}

/// Strip one matching pair of surrounding delimiters, if present
pub fn unsurround(text: &str, pairs: &[(char, char)]) -> String {
    for &(open, close) in pairs {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            return inner.to_string();
        }
    }
    text.to_string()
}

/// Parse a track number such as `3` or `3.`
pub fn parse_track_number(raw: &str, text: &str, context: &str) -> Result<u32, TrackInfoError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    trimmed.parse().map_err(|_| TrackInfoError::InvalidNumber {
        raw: raw.to_string(),
        text: text.to_string(),
        context: context.to_string(),
    })
}

/// Parse a numbered line such as `3. Song (노래) - 3:25`
pub fn parse_track_line(line: &str, context: &str) -> Result<TrackInfo, TrackInfoError> {
    let line = line.trim();
    let (raw_num, text) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| TrackInfoError::NoName {
            text: line.to_string(),
            context: context.to_string(),
        })?;
    let num = parse_track_number(raw_num, text, context)?;
    parse_track_info(num, text, context, &TrackOptions::default())
}

/// Parse the text of one track-list entry
pub fn parse_track_info(
    num: u32,
    text: &str,
    context: &str,
    opts: &TrackOptions,
) -> Result<TrackInfo, TrackInfoError> {
    let text = unsurround(text.trim(), &[('"', '"'), ('“', '“')]);
    let (parts, time) = TrackInfoParser::default()
        .parse(&text)
        .map_err(|error| TrackInfoError::Parse {
            text: text.clone(),
            context: context.to_string(),
            error,
        })?;
    track_info_from_parts(num, &text, parts, time, context, opts)
}

fn drop_last_chars(text: &str, count: usize) -> &str {
    match text.char_indices().rev().nth(count.saturating_sub(1)) {
        Some((i, _)) if count > 0 => &text[..i],
        _ if count == 0 => text,
        _ => "",
    }
}

/// `value ver.` when the part was a `... ver` tag but its value lost the suffix
fn version_label(value: &str, lc_part: &str, part: &str) -> String {
    if lc_part.contains("ver") && !value.contains("ver") {
        format!("{value} ver.")
    } else {
        part.to_string()
    }
}

fn distinct_langs(langs: &[LangCat]) -> usize {
    langs.iter().collect::<BTreeSet<_>>().len()
}

/// Classify already-parsed parts of a track-list entry
pub fn track_info_from_parts(
    num: u32,
    text: &str,
    mut parts: Vec<String>,
    time: Option<String>,
    context: &str,
    opts: &TrackOptions,
) -> Result<TrackInfo, TrackInfoError> {
    let terms = terms();
    let no_name = || TrackInfoError::NoName {
        text: text.to_string(),
        context: context.to_string(),
    };

    let length = match (&opts.length, time) {
        (Some(length), Some(parsed)) => {
            return Err(TrackInfoError::LengthConflict {
                num,
                text: text.to_string(),
                context: context.to_string(),
                length: length.clone(),
                parsed,
            });
        }
        (Some(length), None) => length.clone(),
        (None, Some(parsed)) => parsed,
        (None, None) => UNKNOWN_LENGTH.to_string(),
    };

    let mut collaborators = Vec::new();
    if opts.compilation {
        let performers = parts.pop().ok_or_else(no_name)?;
        collaborators.extend(str2list(&performers, &terms.collaborator_separators));
    }
    if parts.is_empty() {
        return Err(no_name());
    }

    let link_texts: Vec<&str> = opts.links.iter().map(|(t, _)| t.as_str()).collect();
    let mut name_parts: Vec<String> = Vec::new();
    let mut name_langs: Vec<LangCat> = Vec::new();
    let mut version: Option<String> = None;
    let mut language = None;
    let mut artist = None;
    let mut misc = Vec::new();

    for (n, part) in parts.into_iter().enumerate() {
        if n == 0 {
            name_langs.push(LangCat::categorize(&part));
            name_parts.push(part);
            continue;
        } else if part.is_empty() {
            continue;
        }

        let lc_part = part.to_lowercase();
        if let Some(feat) = terms.feat_indicator(&lc_part) {
            let collab_part = match lc_part.starts_with(feat) {
                true => part.get(feat.len()..).unwrap_or(&part).trim(),
                false => part.as_str(),
            };
            collaborators.extend(str2list(collab_part, &terms.collaborator_separators));
        } else if let Some(ensemble) = terms.ensemble_suffix(&lc_part) {
            let collab_part = drop_last_chars(&part, ensemble.chars().count()).trim();
            collaborators.extend(str2list(collab_part, &terms.collaborator_separators));
        } else if lc_part.ends_with(" solo") {
            artist = Some(drop_last_chars(&part, 5).trim().to_string());
        } else if terms.version_suffix(&lc_part).is_some() {
            let value = part
                .trim_end()
                .rsplit_once(char::is_whitespace)
                .map_or(part.as_str(), |(value, _)| value.trim_end());

            if terms.starts_with_version_type(&lc_part) {
                match &version {
                    Some(existing) if existing.to_lowercase() == value.to_lowercase() => continue,
                    Some(existing) => {
                        warn!("Multiple version annotations found for {text:?} from {context}: {existing:?}, {part:?}");
                        misc.push(version_label(value, &lc_part, &part));
                    }
                    None => version = Some(value.to_string()),
                }
            } else if let Some(lang) = terms.language(value) {
                language = Some(lang.to_string());
            } else {
                debug!("Found unexpected version text in {text:?} - {value:?}");
                match &version {
                    Some(existing) if existing.to_lowercase() == value.to_lowercase() => continue,
                    Some(existing) => {
                        let new_version = version_label(value, &lc_part, &part);
                        let langs = categorize_langs(&[existing.as_str(), new_version.as_str()]);
                        if langs[0] == langs[1] {
                            warn!("Multiple version annotations found for {text:?} from {context}: {existing:?}, {new_version:?}");
                        }
                        misc.push(new_version);
                    }
                    None => version = Some(value.to_string()),
                }
            }
        } else if terms.starts_with_version_prefix(&lc_part) {
            if let Some(existing) = version.take() {
                let lc_version = existing.to_lowercase();
                if terms
                    .version_prefixes
                    .iter()
                    .any(|prefix| lc_version.contains(prefix.as_str()))
                {
                    warn!("Multiple version annotations found for {text:?} from {context}: {existing:?}, {part:?}");
                }
                misc.push(match lc_version.contains("ver") {
                    true => existing,
                    false => format!("{existing} ver."),
                });
            }
            version = Some(part);
        } else if terms.has_misc_indicator(&lc_part)
            || (lc_part.contains(" by ") && lc_part.contains(" of "))
        {
            misc.push(part);
        } else if link_texts.iter().any(|link| part.contains(link)) {
            let split = str2list(&part, &terms.collaborator_separators);
            if split.iter().any(|name| link_texts.contains(&name.as_str())) {
                collaborators.extend(split);
            } else if distinct_langs(&name_langs) < 2 {
                name_langs.push(LangCat::categorize(&part));
                name_parts.push(part);
            } else {
                debug!("Assuming {part:?} from {text:?} is misc [no link matches]");
                misc.push(part);
            }
        } else if distinct_langs(&name_langs) < 2 {
            name_langs.push(LangCat::categorize(&part));
            name_parts.push(part);
        } else {
            debug!("Assuming {part:?} from {text:?} is misc");
            misc.push(part);
        }
    }

    if name_parts.len() > 2 {
        trace!("High name_parts count in {context} [{}]: {name_parts:?}", name_parts.len());
        while name_parts.len() > 2 {
            name_parts = combine_name_parts(&name_parts);
        }
    }

    let langs = categorize_langs(&name_parts);
    let name_parts = match eng_cjk_sort(&name_parts, Some(langs.as_slice()), false) {
        Ok(sorted) => sorted,
        Err(_) => match name_parts.as_slice() {
            [first, second] => (first.clone(), second.clone()),
            [first] => (first.clone(), String::new()),
            _ => return Err(no_name()),
        },
    };

    collaborators.sort();
    Ok(TrackInfo {
        num,
        length,
        name_parts,
        version,
        language,
        artist,
        collaborators,
        misc,
        compilation: opts.compilation,
    })
}
