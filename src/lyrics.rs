//! Aligning parallel lyric translations into stanzas.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::{debug, warn};

use crate::error::LyricsError;

/// Marker line separating stanzas
pub const LINE_BREAK: &str = "<br/>";

/// Stanzas per language, each a list of non-blank lines
pub type Stanzas = BTreeMap<String, Vec<Vec<String>>>;

#[derive(Debug, Clone, Default)]
pub struct StanzaOptions {
    /// Extra stanza breaks per language, by line index; negative indices
    /// count from the end of that language's lines
    pub extra_linebreaks: BTreeMap<String, Vec<i64>>,
    /// Lines appended to a language after its own lines
    pub extra_lines: BTreeMap<String, Vec<String>>,
    /// Drop the source's break markers and rely on `extra_linebreaks` only
    pub replace_lb: bool,
    /// Log mismatched stanza counts instead of failing
    pub ignore_len: bool,
}

/// Split each language's lines into stanzas and check that every language
/// ends up with the same number of stanzas.
pub fn normalize_lyrics(
    lyrics_by_lang: &BTreeMap<String, Vec<String>>,
    opts: &StanzaOptions,
) -> Result<Stanzas, LyricsError> {
    let mut stanzas = Stanzas::new();
    for (lang, lines) in lyrics_by_lang {
        let lines: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| !(opts.replace_lb && *line == LINE_BREAK))
            .collect();

        let line_count = lines.len() as i64;
        let mut breaks: HashSet<i64> = HashSet::new();
        for &lb in opts.extra_linebreaks.get(lang).into_iter().flatten() {
            breaks.insert(lb);
            if lb < 0 {
                breaks.insert(line_count + lb);
            }
        }

        let extra = opts.extra_lines.get(lang).into_iter().flatten().map(String::as_str);
        let mut lang_stanzas = Vec::new();
        let mut stanza: Vec<String> = Vec::new();
        for (i, line) in lines.into_iter().chain(extra).enumerate() {
            if line == LINE_BREAK || breaks.contains(&(i as i64)) {
                if !stanza.is_empty() {
                    lang_stanzas.push(std::mem::take(&mut stanza));
                }
            } else if !line.trim().is_empty() {
                stanza.push(line.to_string());
            }
        }
        if !stanza.is_empty() {
            lang_stanzas.push(stanza);
        }
        stanzas.insert(lang.clone(), lang_stanzas);
    }

    let lengths: BTreeMap<String, usize> = stanzas
        .iter()
        .map(|(lang, lang_stanzas)| (lang.clone(), lang_stanzas.len()))
        .collect();
    if lengths.values().collect::<BTreeSet<_>>().len() > 1 {
        for (lang, lines) in lyrics_by_lang {
            debug!("{lang}:");
            for line in lines {
                debug!("{line}");
            }
            debug!("");
        }
        if !opts.ignore_len {
            return Err(LyricsError::StanzaMismatch { lengths });
        }
        warn!("Stanza lengths don't match: {lengths:?}");
    }
    Ok(stanzas)
}

#[cfg(test)]
mod lyrics_tests {
    use super::*;

    fn lyrics(pairs: Vec<(&str, Vec<&str>)>) -> BTreeMap<String, Vec<String>> {
        pairs
            .into_iter()
            .map(|(lang, lines)| (lang.to_string(), lines.iter().map(|l| l.to_string()).collect()))
            .collect()
    }

    #[test]
    fn matching_stanzas() {
        let input = lyrics(vec![
            ("Korean", vec!["하나", "둘", LINE_BREAK, "셋"]),
            ("English", vec!["one", "two", LINE_BREAK, "", "three"]),
        ]);
        let stanzas = normalize_lyrics(&input, &StanzaOptions::default()).unwrap();
        assert_eq!(stanzas["Korean"], vec![vec!["하나", "둘"], vec!["셋"]]);
        assert_eq!(stanzas["English"], vec![vec!["one", "two"], vec!["three"]]);
    }

    #[test]
    fn mismatch_is_an_error() {
        let input = lyrics(vec![
            ("Korean", vec!["하나", LINE_BREAK, "둘"]),
            ("English", vec!["one", "two"]),
        ]);
        let err = normalize_lyrics(&input, &StanzaOptions::default()).unwrap_err();
        let LyricsError::StanzaMismatch { lengths } = err;
        assert_eq!(lengths["Korean"], 2);
        assert_eq!(lengths["English"], 1);
    }

    #[test]
    fn mismatch_ignored() {
        let input = lyrics(vec![("Korean", vec!["하나", LINE_BREAK, "둘"]), ("English", vec!["one"])]);
        let opts = StanzaOptions {
            ignore_len: true,
            ..Default::default()
        };
        let stanzas = normalize_lyrics(&input, &opts).unwrap();
        assert_eq!(stanzas["Korean"].len(), 2);
    }

    #[test]
    fn extra_breaks_and_lines() {
        let input = lyrics(vec![
            ("Korean", vec!["하나", "둘", "", "셋"]),
            ("English", vec!["one", LINE_BREAK, "two"]),
        ]);
        let mut opts = StanzaOptions {
            replace_lb: true,
            ..Default::default()
        };
        opts.extra_linebreaks.insert("Korean".into(), vec![-2]);
        opts.extra_linebreaks.insert("English".into(), vec![1]);
        opts.extra_lines.insert("English".into(), vec!["three".into()]);
        let stanzas = normalize_lyrics(&input, &opts).unwrap();
        assert_eq!(stanzas["Korean"], vec![vec!["하나", "둘"], vec!["셋"]]);
        // The line at a break index is dropped along with the break
        assert_eq!(stanzas["English"], vec![vec!["one"], vec!["three"]]);
    }
}
