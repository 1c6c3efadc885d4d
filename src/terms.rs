//! Term tables for track-list and discography classification.
//!
//! The tables live in `schema/track_terms.yaml`. A copy is embedded in the
//! binary as the default; `init_terms` installs an override file instead.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_TERMS: &str = include_str!("../schema/track_terms.yaml");

// === Term schema YAML structures ===

#[derive(Debug, Deserialize)]
struct TermsSchema {
    languages: Vec<LanguageClass>,
    version_suffixes: Vec<String>,
    version_types: Vec<String>,
    version_prefixes: Vec<String>,
    misc_indicators: Vec<String>,
    feat_indicators: Vec<String>,
    ensemble_suffixes: Vec<String>,
    collab_leads: Vec<String>,
    collaborator_separators: String,
    name_list_separators: String,
    excluded_name_keywords: Vec<String>,
    aka_leads: Vec<String>,
    ordinals: HashMap<String, String>,
    number_words: HashMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct LanguageClass {
    name: String,
    variants: Vec<String>,
}

/// Loaded term tables
#[derive(Debug)]
pub struct TrackTerms {
    language_map: HashMap<String, String>,
    pub version_suffixes: Vec<String>,
    pub version_types: Vec<String>,
    pub version_prefixes: Vec<String>,
    pub misc_indicators: Vec<String>,
    pub feat_indicators: Vec<String>,
    pub ensemble_suffixes: Vec<String>,
    pub collab_leads: Vec<String>,
    pub collaborator_separators: Regex,
    pub name_list_separators: Regex,
    pub excluded_name_keywords: Vec<String>,
    pub aka_leads: Vec<String>,
    ordinals: HashMap<String, String>,
    number_words: HashMap<String, u32>,
}

impl TrackTerms {
    /// Canonical language name for an abbreviation such as `kr` or `jpn`
    pub fn language(&self, abbrev: &str) -> Option<&str> {
        self.language_map
            .get(&abbrev.to_lowercase())
            .map(String::as_str)
    }

    /// All abbreviations that map to each canonical language name
    pub fn language_variants(&self) -> HashMap<&str, Vec<&str>> {
        let mut variants: HashMap<&str, Vec<&str>> = HashMap::new();
        for (abbrev, name) in &self.language_map {
            variants.entry(name.as_str()).or_default().push(abbrev.as_str());
        }
        for list in variants.values_mut() {
            list.sort_unstable();
        }
        variants
    }

    /// `1st` for `first`, `1st` for `debut`, etc.
    pub fn ordinal(&self, word: &str) -> Option<&str> {
        self.ordinals.get(word).map(String::as_str)
    }

    pub fn number_word(&self, word: &str) -> Option<u32> {
        self.number_words.get(&word.to_lowercase()).copied()
    }

    /// The version suffix (` ver.`, ` edition`, ...) that `lc_text` ends with
    pub fn version_suffix(&self, lc_text: &str) -> Option<&str> {
        self.version_suffixes
            .iter()
            .find(|suffix| lc_text.ends_with(suffix.as_str()))
            .map(String::as_str)
    }

    pub fn starts_with_version_type(&self, lc_text: &str) -> bool {
        self.version_types.iter().any(|t| lc_text.starts_with(t.as_str()))
    }

    pub fn starts_with_version_prefix(&self, lc_text: &str) -> bool {
        self.version_prefixes.iter().any(|p| lc_text.starts_with(p.as_str()))
    }

    pub fn has_misc_indicator(&self, lc_text: &str) -> bool {
        self.misc_indicators.iter().any(|m| lc_text.contains(m.as_str()))
    }

    /// First feat indicator contained anywhere in `lc_text`
    pub fn feat_indicator(&self, lc_text: &str) -> Option<&str> {
        self.feat_indicators
            .iter()
            .find(|f| lc_text.contains(f.as_str()))
            .map(String::as_str)
    }

    pub fn starts_with_feat_indicator(&self, lc_text: &str) -> bool {
        self.feat_indicators.iter().any(|f| lc_text.starts_with(f.as_str()))
    }

    /// First ensemble suffix (` duet`, ` trio`) contained in `lc_text`
    pub fn ensemble_suffix(&self, lc_text: &str) -> Option<&str> {
        self.ensemble_suffixes
            .iter()
            .find(|s| lc_text.contains(s.as_str()))
            .map(String::as_str)
    }

    pub fn starts_with_collab_lead(&self, lc_text: &str) -> bool {
        self.collab_leads.iter().any(|l| lc_text.starts_with(l.as_str()))
    }

    /// Excluded keyword that `lc_text` starts with
    pub fn excluded_keyword(&self, lc_text: &str) -> Option<&str> {
        self.excluded_name_keywords
            .iter()
            .find(|k| lc_text.starts_with(k.as_str()))
            .map(String::as_str)
    }
}

static TRACK_TERMS: OnceCell<TrackTerms> = OnceCell::new();

/// Parse a term schema from YAML text
pub fn parse_terms(yaml: &str) -> Result<TrackTerms, ConfigError> {
    let schema: TermsSchema = serde_yaml::from_str(yaml)?;

    let mut language_map = HashMap::new();
    for class in schema.languages {
        for variant in class.variants {
            language_map.insert(variant.to_lowercase(), class.name.clone());
        }
    }

    Ok(TrackTerms {
        language_map,
        version_suffixes: schema.version_suffixes,
        version_types: schema.version_types,
        version_prefixes: schema.version_prefixes,
        misc_indicators: schema.misc_indicators,
        feat_indicators: schema.feat_indicators,
        ensemble_suffixes: schema.ensemble_suffixes,
        collab_leads: schema.collab_leads,
        collaborator_separators: Regex::new(&schema.collaborator_separators)?,
        name_list_separators: Regex::new(&schema.name_list_separators)?,
        excluded_name_keywords: schema.excluded_name_keywords,
        aka_leads: schema.aka_leads,
        ordinals: schema.ordinals,
        number_words: schema.number_words,
    })
}

/// Read and parse a term schema file
pub fn load_terms(path: &Path) -> Result<TrackTerms, ConfigError> {
    let mut file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_terms(&contents)
}

/// Install the term tables, from `path` when given, else the embedded defaults.
/// Must run before the first call to [`terms`].
pub fn init_terms(path: Option<&Path>) -> Result<(), ConfigError> {
    let loaded = match path {
        Some(p) => load_terms(p)?,
        None => parse_terms(DEFAULT_TERMS)?,
    };
    TRACK_TERMS
        .set(loaded)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// The active term tables (embedded defaults unless `init_terms` ran first)
pub fn terms() -> &'static TrackTerms {
    TRACK_TERMS.get_or_init(|| {
        parse_terms(DEFAULT_TERMS).expect("embedded schema/track_terms.yaml is invalid")
    })
}
