//! Splitting names into their English and native-script halves.
//!
//! Wiki pages write names as `English (한국어)`, `한국어 (English)`,
//! `Soloist (Group) (솔로 (그룹))` and many variations. [`split_name`] parses
//! the name into parts, categorizes each part by script and picks the
//! English/native pair based on how many parts there are and their scripts.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::Serialize;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::error::NameSplitError;
use crate::parser::ParentheticalParser;
use crate::terms::terms;
use crate::unicode::{contains_any_cjk, is_any_cjk, is_hangul, LangCat};

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W").unwrap();
    static ref DETAIL_SEPARATORS: Regex = Regex::new(r"[;,]").unwrap();
}

/// Content discarded while splitting a name, e.g. the group in
/// `Soloist (Group) (솔로 (그룹))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Remainder {
    Text(String),
    Pair(String, String),
    List(Vec<String>),
}

impl Remainder {
    fn push(self, value: String) -> Remainder {
        match self {
            Remainder::Text(text) => Remainder::List(vec![text, value]),
            Remainder::Pair(a, b) => Remainder::List(vec![a, b, value]),
            Remainder::List(mut list) => {
                list.push(value);
                Remainder::List(list)
            }
        }
    }

    fn from_split(split: NameSplit) -> Remainder {
        Remainder::Pair(split.english, split.native)
    }
}

/// English and native halves of a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameSplit {
    pub english: String,
    pub native: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder: Option<Remainder>,
}

impl NameSplit {
    pub fn pair(&self) -> (&str, &str) {
        (&self.english, &self.native)
    }

    pub fn into_pair(self) -> (String, String) {
        (self.english, self.native)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    /// Reject English halves that start with `feat.`, `inst.` and the like
    pub check_keywords: bool,
    /// Accept a pair of same-script parts (soloist + group) and English + mixed
    pub permissive: bool,
    /// See [`ParentheticalParser::require_preceder`]
    pub require_preceder: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            check_keywords: true,
            permissive: false,
            require_preceder: true,
        }
    }
}

impl SplitOptions {
    fn permissive() -> Self {
        SplitOptions {
            permissive: true,
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// `feat. B` as a list member names `B`
fn strip_excluded_keyword(part: &str) -> &str {
    match terms().excluded_keyword(&part.to_lowercase()) {
        Some(keyword) if part.is_char_boundary(keyword.len()) => part[keyword.len()..].trim(),
        _ => part,
    }
}

pub fn has_parens(text: &str) -> bool {
    text.contains(['(', ')', '[', ']'])
}

pub fn categorize_langs<S: AsRef<str>>(texts: &[S]) -> Vec<LangCat> {
    LangCat::categorize_all(texts)
}

/// Split a textual list on `pattern`, dropping empty items
pub fn str2list(text: &str, pattern: &Regex) -> Vec<String> {
    pattern
        .split(text)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Join the first adjacent pair of same-script parts as `a (b)`, or the
/// first two parts when no neighbors share a script
pub fn combine_name_parts(parts: &[String]) -> Vec<String> {
    if parts.len() < 2 {
        return parts.to_vec();
    }
    let langs = categorize_langs(parts);
    let i = (1..parts.len())
        .find(|&i| langs[i] == langs[i - 1])
        .unwrap_or(1);

    let mut combined = parts[..i - 1].to_vec();
    combined.push(format!("{} ({})", parts[i - 1], parts[i]));
    combined.extend_from_slice(&parts[i + 1..]);
    combined
}

/// Normalize text for fuzzy comparison: non-word characters become spaces,
/// whitespace is collapsed, case is folded and diacritics are removed.
///
/// `"Rosé  한"` becomes `"rose 한"`.
pub fn fuzz_process(text: &str) -> String {
    let mut processed = collapse_whitespace(&NON_WORD.replace_all(text, " ")).to_lowercase();
    if processed.is_empty() {
        processed = collapse_whitespace(text).to_lowercase();
    }
    processed
        .nfd()
        .filter(|&c| canonical_combining_class(c) == 0)
        .nfc()
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}

fn common_suffix(a: &str, b: &str) -> String {
    let mut suffix: Vec<char> = a
        .chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c)
        .collect();
    suffix.reverse();
    suffix.into_iter().collect()
}

/// True for lists written as `A, B (가, 나)`: the same number of commas
/// inside and outside the parentheses
pub fn is_unzipped_name(text: &str) -> bool {
    let (mut outer, mut inner, mut depth) = (0, 0, 0i32);
    for c in text.chars() {
        match c {
            ',' if depth > 0 => inner += 1,
            ',' => outer += 1,
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    outer == inner && outer != 0
}

// ─────────────────────────────────────────────────────────────────────────────
// English / native ordering
// ─────────────────────────────────────────────────────────────────────────────

fn sort_parts<S: AsRef<str>>(strs: &[S], langs: &[LangCat], permissive: bool) -> Option<(String, String)> {
    let native_ok = |cat: LangCat| cat.is_non_eng() || (permissive && cat == LangCat::Mix);
    match (strs, langs) {
        ([a, b], [la, lb]) => {
            if la.is_eng_or_nul() && native_ok(*lb) {
                Some((a.as_ref().to_string(), b.as_ref().to_string()))
            } else if lb.is_eng_or_nul() && native_ok(*la) {
                Some((b.as_ref().to_string(), a.as_ref().to_string()))
            } else {
                None
            }
        }
        ([s], [cat]) => {
            let s = s.as_ref().to_string();
            if cat.is_eng_or_nul() {
                Some((s, String::new()))
            } else if cat.is_non_eng() {
                Some((String::new(), s))
            } else if *cat == LangCat::Mix && !LangCat::categorize_detailed(&s).iter().any(|c| c.is_asian()) {
                Some((s, String::new()))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Order one or two strings as `(english, native)`.
///
/// A single string goes to whichever side its script belongs on. A pair must
/// be English (or empty) plus a non-English script, in either order;
/// `permissive` also accepts English plus mixed text.
pub fn eng_cjk_sort<S: AsRef<str>>(
    strs: &[S],
    langs: Option<&[LangCat]>,
    permissive: bool,
) -> Result<(String, String), NameSplitError> {
    let langs = match langs {
        Some(langs) => langs.to_vec(),
        None => categorize_langs(strs),
    };
    sort_parts(strs, &langs, permissive).ok_or_else(|| {
        let strs: Vec<&str> = strs.iter().map(AsRef::as_ref).collect();
        NameSplitError::cannot_split(strs.join(" / "), format!("unexpected values: strs={strs:?}, langs={langs:?}"))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// split_name
// ─────────────────────────────────────────────────────────────────────────────

/// Split `name` into English and native parts with the default options
pub fn split_name(name: &str) -> Result<NameSplit, NameSplitError> {
    split_name_with(name, &SplitOptions::default())
}

pub fn split_name_with(name: &str, opts: &SplitOptions) -> Result<NameSplit, NameSplitError> {
    let name = name.trim();
    let parser = ParentheticalParser::new(true, opts.require_preceder);
    let parts = parser.parse(name).map_err(|error| NameSplitError::Parse {
        name: name.to_string(),
        error,
    })?;
    split_parts(name, &parts, opts)
}

/// Split a name that was already broken into parts
pub fn split_name_parts<S: AsRef<str>>(parts: &[S], opts: &SplitOptions) -> Result<NameSplit, NameSplitError> {
    let parts: Vec<String> = parts.iter().map(|p| p.as_ref().to_string()).collect();
    split_parts(&parts.join(" / "), &parts, opts)
}

fn split_parts(name: &str, parts: &[String], opts: &SplitOptions) -> Result<NameSplit, NameSplitError> {
    if parts.is_empty() {
        return Err(NameSplitError::cannot_split(name, "nothing was parsed"));
    }
    let parser = ParentheticalParser::new(true, opts.require_preceder);
    let langs = categorize_langs(parts);
    trace!("{name:?} => {} parts: {parts:?} ({langs:?})", parts.len());
    let unsplittable = || NameSplitError::cannot_split(name, format!("parts={parts:?}, langs={langs:?}"));
    let require = |sorted: Option<(String, String)>| sorted.ok_or_else(unsplittable);
    let reparse = |text: &str| {
        parser.parse(text).map_err(|error| NameSplitError::Parse {
            name: name.to_string(),
            error,
        })
    };

    let mut english = String::new();
    let mut native = String::new();
    let mut remainder: Option<Remainder> = None;
    let has_mix = langs.contains(&LangCat::Mix);
    let distinct = {
        let mut unique = langs.clone();
        unique.sort();
        unique.dedup();
        unique.len()
    };

    match parts {
        [only] => {
            (english, native) = require(sort_parts(&[only], &langs, false))?;
        }
        [a, b] => {
            let (la, lb) = (langs[0], langs[1]);
            if !has_mix && distinct == 2 {
                // Name (other script)
                (english, native) = require(sort_parts(&[a, b], &langs, false))?;
                if let Some((group, soloist)) = english.split_once(" / ") {
                    // Group / Soloist (그룹 / 솔로)
                    remainder = Some(Remainder::Text(group.to_string()));
                    english = soloist.to_string();
                }
                if let Some((group, soloist)) = native.split_once(" / ") {
                    remainder = Some(match remainder {
                        Some(Remainder::Text(eng_group)) => Remainder::Pair(eng_group, group.to_string()),
                        _ => Remainder::Text(group.to_string()),
                    });
                    native = soloist.to_string();
                } else if remainder.is_none() && english.contains(" (") && native.contains(" (") {
                    // Soloist (Group) (솔로 (그룹))
                    match (reparse(&english)?.as_slice(), reparse(&native)?.as_slice()) {
                        ([eng, eng_group], [nat, nat_group]) => {
                            remainder = Some(Remainder::Pair(eng_group.clone(), nat_group.clone()));
                            (english, native) = (eng.clone(), nat.clone());
                        }
                        _ => return Err(unsplittable()),
                    }
                }
            } else if opts.permissive && !has_mix && distinct == 1 {
                // Soloist (Group), both in one script
                (english, native) = require(sort_parts(&[a], &langs[..1], false))?;
                remainder = Some(Remainder::Text(b.clone()));
            } else if la == LangCat::Mix && lb != LangCat::Mix && has_parens(a) {
                // Soloist (솔로) (Group)
                let soloist = split_name(a)?;
                (english, native) = (soloist.english, soloist.native);
                remainder = Some(Remainder::Text(b.clone()));
            } else if la != LangCat::Mix && lb == LangCat::Mix && has_parens(b) {
                // Soloist (Group (그룹))
                (english, native) = require(sort_parts(&[a], &langs[..1], false))?;
                remainder = Some(split_name(b).map_or_else(|_| Remainder::Text(b.clone()), Remainder::from_split));
            } else if la == LangCat::Mix && lb == LangCat::Mix && has_parens(a) && has_parens(b) {
                // Soloist (솔로) [Group (그룹)]
                let soloist = split_name(a)?;
                (english, native) = (soloist.english, soloist.native);
                remainder = Some(split_name(b).map_or_else(|_| Remainder::Text(b.clone()), Remainder::from_split));
            } else if (la, lb) == (LangCat::Eng, LangCat::Mix) {
                let asian_b = LangCat::categorize_detailed(b).iter().any(|c| c.is_asian());
                if common_suffix(a, b).chars().count() > 3 && asian_b {
                    (english, native) = (a.clone(), b.clone());
                } else if b.contains(" / ") {
                    // Soloist (Group / 솔로)
                    let pieces: Vec<&str> = b.split(" / ").collect();
                    if let Ok((group, soloist)) = eng_cjk_sort(&pieces, None, false) {
                        remainder = Some(Remainder::Text(group));
                        (english, native) = (a.clone(), soloist);
                    }
                }
            } else if (la, lb) == (LangCat::Mix, LangCat::Mix) && b.contains(" X ") {
                // Name (A X B) collaboration
                if LangCat::categorize_detailed(a).iter().any(|c| c.is_asian()) {
                    native = a.clone();
                } else {
                    english = a.clone();
                }
                remainder = Some(Remainder::List(b.split(" X ").map(String::from).collect()));
            }
        }
        [a, b, c] if !has_mix && distinct == 2 => {
            if langs[0] == langs[1] && langs[1] != langs[2] {
                match reparse(c)?.as_slice() {
                    [soloist_b, group_b] => {
                        // Soloist (Group) (솔로 (그룹))
                        (english, native) = require(sort_parts(&[a, soloist_b], &langs[1..], false))?;
                        let (group_eng, group_native) = require(sort_parts(&[b, group_b], &langs[1..], false))?;
                        remainder = Some(Remainder::Pair(group_eng, group_native));
                    }
                    _ => {
                        // Soloist (Group) (그룹)
                        (english, native) = require(sort_parts(&[a], &langs[..1], false))?;
                        remainder = Some(Remainder::List(vec![b.clone(), c.clone()]));
                    }
                }
            } else {
                // Name (이름) (Group or extra)
                (english, native) = require(sort_parts(&[a, b], &langs[..2], false))?;
                let extra = c.strip_prefix("from ").map_or(c.as_str(), str::trim);
                remainder = Some(Remainder::Text(extra.to_string()));
            }
        }
        _ => {}
    }

    if english.is_empty() && native.is_empty() {
        return Err(unsplittable());
    }

    if opts.check_keywords {
        if let Some(keyword) = terms().excluded_keyword(&english.to_lowercase()) {
            debug!("Moving {english:?} to the remainder of {name:?} due to keyword {keyword:?}");
            let excluded = std::mem::take(&mut english);
            remainder = Some(match remainder {
                None => Remainder::Text(excluded),
                Some(rem) => rem.push(excluded),
            });
            if native.is_empty() {
                return Err(NameSplitError::cannot_split(name, format!("only keyword {keyword:?} remained")));
            }
        }
    }

    Ok(NameSplit {
        english,
        native,
        remainder,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Name lists
// ─────────────────────────────────────────────────────────────────────────────

/// Split a list of names such as `A, B & C` or `A, B (가, 나)`
pub fn split_names(text: &str) -> Result<Vec<NameSplit>, NameSplitError> {
    if !text.contains([',', '&']) {
        return match split_name(text) {
            Ok(split) => Ok(vec![split]),
            Err(_) if text.contains("feat. ") => ParentheticalParser::default()
                .parse(text)
                .map_err(|error| NameSplitError::Parse {
                    name: text.to_string(),
                    error,
                })?
                .iter()
                .map(|part| split_name_with(strip_excluded_keyword(part), &SplitOptions::permissive()))
                .collect(),
            Err(_) if LangCat::categorize(text) == LangCat::Mix && has_parens(text) => {
                let opts = SplitOptions {
                    require_preceder: false,
                    ..Default::default()
                };
                Ok(vec![split_name_with(text, &opts)?])
            }
            Err(e) => Err(e),
        };
    }

    if is_unzipped_name(text) {
        let parts = ParentheticalParser::default()
            .parse(text)
            .map_err(|error| NameSplitError::Parse {
                name: text.to_string(),
                error,
            })?;
        let (english, native) = match parts.as_slice() {
            [x, y] => (x.clone(), y.clone()),
            [x, group, y] if x.contains(',') && y.contains(',') && !group.contains(',') => {
                (format!("{x} ({group})"), y.clone())
            }
            _ => {
                return Err(NameSplitError::cannot_split(
                    text,
                    format!("unexpected parse result: {parts:?}"),
                ))
            }
        };
        return english
            .split(',')
            .map(str::trim)
            .zip(native.split(',').map(str::trim))
            .map(|(a, b)| split_name_parts(&[a, b], &SplitOptions::default()))
            .collect();
    }

    let mut names = str2list(text, &terms().name_list_separators);
    let unbalanced = |n: &String| n.contains('(') != n.contains(')');
    if names.iter().any(unbalanced) {
        // "Group (A, B)" was split into "Group (A" and "B)"
        for i in 1..names.len() {
            let (name, last) = (names[i].clone(), names[i - 1].clone());
            if name.contains(')') && !name.contains('(') && last.contains('(') && !last.contains(')') {
                if let Some((group, first)) = last.split_once('(') {
                    let group = group.trim().to_string();
                    let member = name.strip_suffix(')').unwrap_or(&name).trim().to_string();
                    names[i - 1] = format!("{} / {}", group, first.trim());
                    names[i] = format!("{group} / {member}");
                }
            }
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
        .iter()
        .map(|name| split_name_with(name, &SplitOptions::permissive()))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Artist intros
// ─────────────────────────────────────────────────────────────────────────────

/// Names found in the first sentence of an artist or album intro, e.g.
/// `BoA (Korean: 보아; stylized as BoA) is a singer.`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntroName {
    pub base: String,
    pub native: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aka: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
}

impl IntroName {
    fn simple(base: String, native: String) -> Self {
        IntroName {
            base,
            native,
            ..Default::default()
        }
    }
}

pub fn parse_intro_name(text: &str) -> Result<IntroName, NameSplitError> {
    let text = text.trim();
    let first_sentence = text
        .split_once(". ")
        .map_or(text, |(first, _)| first)
        .trim()
        .replace('\u{a0}', " ");
    let parser = ParentheticalParser::default();
    let parts = parser
        .parse(&first_sentence)
        .map_err(|error| NameSplitError::Parse {
            name: first_sentence.clone(),
            error,
        })?;
    let (base, details) = match parts.as_slice() {
        [] => return Err(NameSplitError::cannot_split(first_sentence, "nothing was parsed")),
        [base] => (base.clone(), String::new()),
        [base, details, ..] => (base.clone(), details.clone()),
    };

    let lc_details = details.to_lowercase();
    let mut details = details.as_str();
    if let Some(idx) = base.find(" is ") {
        let (english, native) = eng_cjk_sort(&[base[..idx].trim()], None, false)?;
        return Ok(IntroName::simple(english, native));
    } else if is_any_cjk(details, true, true) {
        return Ok(IntroName::simple(base.clone(), details.to_string()));
    } else if base == "+ +" || base == "X X" {
        return Ok(IntroName {
            base: format!("[{base}]"),
            aka: Some(details.to_string()),
            ..Default::default()
        });
    } else if parts.len() == 2 && first_sentence.ends_with('"') {
        // Album name ending in a quoted word
        return Ok(IntroName::simple(format!("{base} \"{details}\""), String::new()));
    } else if !contains_any_cjk(details) {
        let (english, native) = eng_cjk_sort(&[&base], None, false)?;
        return Ok(IntroName::simple(english, native));
    } else if lc_details.ends_with("ost") && base.to_lowercase().ends_with("ost") {
        let (english, native) = eng_cjk_sort(&[base.as_str(), details], None, true)?;
        return Ok(IntroName::simple(english, native));
    } else if base.ends_with(')') && details.ends_with(')') {
        let base_parts = parser.parse(&base).unwrap_or_default();
        let details_parts = parser.parse(details).unwrap_or_default();
        if let ([eng, shared], [nat, shared_b]) = (base_parts.as_slice(), details_parts.as_slice()) {
            if shared == shared_b {
                let (english, native) = eng_cjk_sort(&[eng, nat], None, true)?;
                return Ok(IntroName {
                    base: english,
                    native,
                    info: vec![shared.clone()],
                    ..Default::default()
                });
            }
        }
    } else if lc_details.starts_with("hangul") {
        details = details.get(6..).unwrap_or("");
        if let Some(rest) = details.strip_prefix(':') {
            details = rest.trim();
        }
    }

    let mut intro = IntroName {
        base: base.clone(),
        ..Default::default()
    };
    let mut found_hangul = false;
    for part in DETAIL_SEPARATORS.split(details).map(str::trim) {
        let lc_part = part.to_lowercase();
        if lc_part.starts_with("stylized as") {
            intro.stylized = Some(part.get(11..).unwrap_or("").trim().to_string());
        } else if !found_hangul && is_any_cjk(part, true, true) {
            found_hangul = is_hangul(part);
            intro.native = part.to_string();
        } else if !found_hangul && part.contains(':') {
            // "Korean: 보아"
            let pieces: Vec<&str> = part.splitn(2, ':').map(str::trim).collect();
            let (_, native) = eng_cjk_sort(&pieces, None, false)?;
            found_hangul = is_hangul(&native);
            intro.native = native;
        } else if !found_hangul && intro.native.is_empty() && contains_any_cjk(part) {
            let words: Vec<&str> = part.split_whitespace().collect();
            let prefix_len = match words.as_slice() {
                [hangul, eng, ..] if is_hangul(hangul) && LangCat::categorize(eng) == LangCat::Eng => {
                    let prefix = common_prefix(&base, eng);
                    (prefix != base).then(|| prefix.chars().count())
                }
                _ => None,
            };
            if prefix_len.is_some_and(|len| len > 3) {
                // "엑소 첸백시 EXO-CBX" style: the English word is a variant of the base name
                found_hangul = true;
                intro.native = words[0].to_string();
                intro.info.push(words[1].to_string());
            } else {
                found_hangul = LangCat::categorize_detailed(part).contains(&LangCat::Han);
                intro.native = part.to_string();
            }
        } else if lc_part.ends_with(" ver.") || lc_part.ends_with(" ver") {
            intro.info.push(part.to_string());
        } else if intro.aka.is_none() {
            intro.aka = terms()
                .aka_leads
                .iter()
                .find(|lead| lc_part.starts_with(lead.as_str()))
                .map(|lead| part.get(lead.len()..).unwrap_or("").trim().to_string());
        }
    }
    Ok(intro)
}

#[cfg(test)]
mod names_tests {
    use super::*;

    fn pair(name: &str) -> (String, String) {
        let split = split_name(name).unwrap();
        (split.english, split.native)
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // eng_cjk_sort
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn sort_pairs_in_either_order() {
        let expected = ("Artist".to_string(), "아티스트".to_string());
        assert_eq!(eng_cjk_sort(&["Artist", "아티스트"], None, false).unwrap(), expected);
        assert_eq!(eng_cjk_sort(&["아티스트", "Artist"], None, false).unwrap(), expected);
    }

    #[test]
    fn sort_single_strings() {
        assert_eq!(eng_cjk_sort(&["Artist"], None, false).unwrap(), ("Artist".into(), String::new()));
        assert_eq!(eng_cjk_sort(&["アーティスト"], None, false).unwrap(), (String::new(), "アーティスト".into()));
        assert!(eng_cjk_sort(&["Artist 아티스트"], None, false).is_err());
    }

    #[test]
    fn sort_mixed_only_when_permissive() {
        assert!(eng_cjk_sort(&["Artist", "Artist 아티스트"], None, false).is_err());
        assert!(eng_cjk_sort(&["Artist", "Artist 아티스트"], None, true).is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────
    // split_name
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn clean_pairs_split_either_way() {
        let expected = ("Artist".to_string(), "아티스트".to_string());
        assert_eq!(pair("Artist (아티스트)"), expected);
        assert_eq!(pair("아티스트 (Artist)"), expected);
    }

    #[test]
    fn single_part_names() {
        assert_eq!(pair("Artist"), ("Artist".into(), String::new()));
        assert_eq!(pair("아티스트"), (String::new(), "아티스트".into()));
        assert!(split_name("").is_err());
    }

    #[test]
    fn soloist_with_group_in_both_scripts() {
        let split = split_name("Soloist (Group) (솔로 (그룹))").unwrap();
        assert_eq!(split.pair(), ("Soloist", "솔로"));
        assert_eq!(split.remainder, Some(Remainder::Pair("Group".into(), "그룹".into())));
    }

    #[test]
    fn group_slash_soloist() {
        let split = split_name("Group / Soloist (그룹 / 솔로)").unwrap();
        assert_eq!(split.pair(), ("Soloist", "솔로"));
        assert_eq!(split.remainder, Some(Remainder::Pair("Group".into(), "그룹".into())));
    }

    #[test]
    fn same_script_pair_needs_permissive() {
        assert!(matches!(
            split_name("Soloist (Group)"),
            Err(NameSplitError::CannotSplit { .. })
        ));
        let split = split_name_with("Soloist (Group)", &SplitOptions::permissive()).unwrap();
        assert_eq!(split.pair(), ("Soloist", ""));
        assert_eq!(split.remainder, Some(Remainder::Text("Group".into())));
    }

    #[test]
    fn mixed_first_part_is_resplit() {
        let parts = ["Soloist (솔로)", "Group"];
        let split = split_name_parts(&parts, &SplitOptions::default()).unwrap();
        assert_eq!(split.pair(), ("Soloist", "솔로"));
        assert_eq!(split.remainder, Some(Remainder::Text("Group".into())));
    }

    #[test]
    fn mixed_second_part_becomes_remainder() {
        let parts = ["Soloist", "Group (그룹)"];
        let split = split_name_parts(&parts, &SplitOptions::default()).unwrap();
        assert_eq!(split.pair(), ("Soloist", ""));
        assert_eq!(split.remainder, Some(Remainder::Pair("Group".into(), "그룹".into())));
    }

    #[test]
    fn three_parts_with_extra() {
        let split = split_name("Name (이름) (from Album)").unwrap();
        assert_eq!(split.pair(), ("Name", "이름"));
        assert_eq!(split.remainder, Some(Remainder::Text("Album".into())));
    }

    #[test]
    fn three_parts_soloist_and_group() {
        let parts = ["Soloist", "Group", "솔로 (그룹)"];
        let split = split_name_parts(&parts, &SplitOptions::default()).unwrap();
        assert_eq!(split.pair(), ("Soloist", "솔로"));
        assert_eq!(split.remainder, Some(Remainder::Pair("Group".into(), "그룹".into())));
    }

    #[test]
    fn four_parts_cannot_split() {
        let parts = ["A", "B", "가", "나"];
        assert!(matches!(
            split_name_parts(&parts, &SplitOptions::default()),
            Err(NameSplitError::CannotSplit { .. })
        ));
    }

    #[test]
    fn keyword_english_moves_to_remainder() {
        let split = split_name("feat. Someone (피처링)").unwrap();
        assert_eq!(split.pair(), ("", "피처링"));
        assert_eq!(split.remainder, Some(Remainder::Text("feat. Someone".into())));
    }

    #[test]
    fn keyword_alone_cannot_be_split() {
        assert!(matches!(
            split_name("feat. Someone"),
            Err(NameSplitError::CannotSplit { .. })
        ));
        assert!(matches!(
            split_name("Feat. Someone"),
            Err(NameSplitError::CannotSplit { .. })
        ));
        let opts = SplitOptions {
            check_keywords: false,
            ..Default::default()
        };
        assert_eq!(split_name_with("feat. Someone", &opts).unwrap().english, "feat. Someone");
    }

    #[test]
    fn list_members_lose_their_keyword() {
        assert_eq!(strip_excluded_keyword("feat. Someone"), "Someone");
        assert_eq!(strip_excluded_keyword("Featuring Someone"), "Someone");
        assert_eq!(strip_excluded_keyword("Someone"), "Someone");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lists and helpers
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn split_simple_list() {
        let names = split_names("A, B & C, A").unwrap();
        let english: Vec<&str> = names.iter().map(|n| n.english.as_str()).collect();
        assert_eq!(english, vec!["A", "B", "C"]);
    }

    #[test]
    fn split_unzipped_list() {
        let names = split_names("Alpha, Beta (알파, 베타)").unwrap();
        let pairs: Vec<(&str, &str)> = names.iter().map(NameSplit::pair).collect();
        assert_eq!(pairs, vec![("Alpha", "알파"), ("Beta", "베타")]);
    }

    #[test]
    fn unzipped_detection() {
        assert!(is_unzipped_name("A, B (가, 나)"));
        assert!(!is_unzipped_name("A, B (가)"));
        assert!(!is_unzipped_name("A (가)"));
    }

    #[test]
    fn list_parsing() {
        let sep = Regex::new(r"\s*,\s*|\s+and\s+").unwrap();
        assert_eq!(str2list("a, b and c,,", &sep), owned(&["a", "b", "c"]));
        assert!(has_parens("a [b]"));
        assert!(!has_parens("a b"));
    }

    #[test]
    fn combining_parts() {
        assert_eq!(combine_name_parts(&owned(&["A", "B", "가"])), owned(&["A (B)", "가"]));
        assert_eq!(combine_name_parts(&owned(&["A", "가", "나"])), owned(&["A", "가 (나)"]));
        assert_eq!(combine_name_parts(&owned(&["A", "가", "B"])), owned(&["A (가)", "B"]));
    }

    #[test]
    fn fuzz_normalization() {
        assert_eq!(fuzz_process("Rosé  한"), "rose 한");
        assert_eq!(fuzz_process("Hello, World!"), "hello world");
        assert_eq!(fuzz_process("!!"), "!!");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Intros
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn intro_with_native_name() {
        let intro = parse_intro_name("IU (아이유) is a South Korean singer.").unwrap();
        assert_eq!((intro.base.as_str(), intro.native.as_str()), ("IU", "아이유"));
    }

    #[test]
    fn intro_without_parens() {
        let intro = parse_intro_name("Hello is the debut album. It was released").unwrap();
        assert_eq!(intro, IntroName::simple("Hello".into(), String::new()));
    }

    #[test]
    fn intro_with_details() {
        let intro = parse_intro_name("BoA (Korean: 보아; stylized as BoA) is a singer.").unwrap();
        assert_eq!(intro.base, "BoA");
        assert_eq!(intro.native, "보아");
        assert_eq!(intro.stylized.as_deref(), Some("BoA"));
    }

    #[test]
    fn intro_with_hangul_lead_and_aka() {
        let intro = parse_intro_name("Kim (Hangul: 김; aka Kimmy) is a rapper.").unwrap();
        assert_eq!(intro.native, "김");
        assert_eq!(intro.aka.as_deref(), Some("Kimmy"));
    }
}
