//! Song and album title grammars.
//!
//! A title is a leading name followed by any number of parenthesized extras,
//! plus a duration for songs or a release year for albums.

use lazy_static::lazy_static;
use log::warn;
use serde::Serialize;

use crate::error::ParseError;
use crate::parser::cursor::{Cursor, TokenKind, Tokenizer, QUOTE_CHARS};

lazy_static! {
    static ref TITLE_TOKENIZER: Tokenizer = Tokenizer::new(&[
        (TokenKind::Quote, r#"["“]"#),
        (TokenKind::LParen, r"[(（]"),
        (TokenKind::RParen, r"[)）]"),
        (TokenKind::Dash, r"\s*\p{Pd}\s*"),
        (TokenKind::Time, r"\d+:\d{2}"),
        (TokenKind::Ws, r"\s+"),
        (TokenKind::Text, r#"[^"“()（）\s\p{Pd}]+"#),
    ])
    .unwrap();
    static ref ALBUM_TOKENIZER: Tokenizer = Tokenizer::new(&[
        (TokenKind::Year, r"\(\d{4}\)"),
        (TokenKind::Quote, r#"["“]"#),
        (TokenKind::LParen, r"[(（]"),
        (TokenKind::RParen, r"[)）]"),
        (TokenKind::Dash, r"\s*\p{Pd}\s*"),
        (TokenKind::Ws, r"\s+"),
        (TokenKind::Text, r#"[^"“()（）\s\p{Pd}]+"#),
    ])
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumTitle {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

fn any_quote_in(text: &str) -> bool {
    QUOTE_CHARS.iter().any(|&q| text.contains(q))
}

fn odd_quote_count(text: &str) -> bool {
    QUOTE_CHARS.iter().any(|&q| text.matches(q).count() % 2 == 1)
}

/// `extra ::= ( { text | dash | time | quote | (extra) }* )`
fn extra(c: &mut Cursor, closer: TokenKind) -> String {
    let mut text = String::new();
    while c.has_next() {
        if c.accept(closer) {
            return text;
        } else if c.accept(TokenKind::LParen) {
            let inner = extra(c, TokenKind::RParen);
            text.push_str(&format!("({inner})"));
        } else {
            c.advance();
            text.push_str(c.value());
        }
    }
    text
}

/// True if the dash just consumed appears again, so it opens an extra
fn dash_recurs(c: &Cursor) -> bool {
    c.remaining().contains(c.value().trim())
}

/// Parser for a song title such as `"Song" (노래) - 3:25`.
///
/// ```text
/// title ::= name { (extra) }* { dash }* { time }* { (extra) }*
/// name  ::= { " }* text { (extra) }* { " }*
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleParser;

impl TitleParser {
    pub fn parse(&self, text: &str) -> Result<Title, ParseError> {
        let text = text.trim();
        let mut c = Cursor::new(text, TITLE_TOKENIZER.tokenize(text));
        let name = self.name(&mut c)?.trim().to_string();
        let mut title = Title {
            name,
            duration: None,
            extras: Vec::new(),
        };

        while c.has_next() {
            if c.accept(TokenKind::LParen) {
                title.extras.push(extra(&mut c, TokenKind::RParen));
            } else if c.accept(TokenKind::Dash) {
                if c.peek(TokenKind::Time) {
                    continue;
                } else if dash_recurs(&c) {
                    title.extras.push(extra(&mut c, TokenKind::Dash));
                } else {
                    return Err(c.unexpected_current());
                }
            } else if c.accept(TokenKind::Ws) {
                continue;
            } else if c.accept(TokenKind::Time) {
                title.duration = Some(c.value().to_string());
            } else if c.accept(TokenKind::Quote) {
                if !odd_quote_count(c.full()) {
                    return Err(c.unexpected_current());
                }
                warn!("Unpaired quote found in {:?}", c.full());
            } else {
                return Err(c.unexpected());
            }
        }
        Ok(title)
    }

    fn name(&self, c: &mut Cursor) -> Result<String, ParseError> {
        let mut name = String::new();
        let mut had_extra = false;
        let mut first_char_was_quote = false;
        while c.has_next() {
            if !name.is_empty()
                && (c.peek(TokenKind::Time) || (c.peek(TokenKind::LParen) && !any_quote_in(c.full())))
            {
                return Ok(name);
            }

            if c.accept(TokenKind::Quote) {
                if !name.is_empty() {
                    return Ok(name);
                }
                first_char_was_quote = true;
            } else if c.accept(TokenKind::Dash) {
                if c.peek(TokenKind::Time) {
                    return Ok(name);
                } else if dash_recurs(c) {
                    let inner = extra(c, TokenKind::Dash);
                    name.push_str(&format!("({inner})"));
                } else {
                    name.push_str(c.value());
                }
            } else if c.accept(TokenKind::LParen) {
                let inner = extra(c, TokenKind::RParen);
                name.push_str(&format!("({inner})"));
                had_extra = true;
            } else if c.accept_any(&[TokenKind::Text, TokenKind::RParen, TokenKind::Time]) {
                name.push_str(c.value());
            } else if c.accept(TokenKind::Ws) {
                // Inside a quoted name, extras belong to the name until the closing quote
                if had_extra && !(first_char_was_quote && any_quote_in(c.remaining())) {
                    return Ok(name);
                }
                name.push_str(c.value());
            } else {
                return Err(c.unexpected());
            }
        }
        Ok(name)
    }
}

/// Parser for an album title such as `"Album" (Repackage) (2019)`.
///
/// ```text
/// title ::= name { (extra) }* { dash }* { (year) }* { (extra) }*
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AlbumTitleParser;

impl AlbumTitleParser {
    pub fn parse(&self, text: &str) -> Result<AlbumTitle, ParseError> {
        let text = text.trim();
        let mut c = Cursor::new(text, ALBUM_TOKENIZER.tokenize(text));
        let name = self.name(&mut c)?.trim().to_string();
        let mut title = AlbumTitle {
            name,
            year: None,
            extras: Vec::new(),
        };

        while c.has_next() {
            if c.accept(TokenKind::LParen) {
                title.extras.push(extra(&mut c, TokenKind::RParen));
            } else if c.accept(TokenKind::Dash) {
                if !dash_recurs(&c) {
                    return Err(c.unexpected_current());
                }
                title.extras.push(extra(&mut c, TokenKind::Dash));
            } else if c.accept(TokenKind::Ws) {
                continue;
            } else if c.accept(TokenKind::Year) {
                let year = c.value().trim_matches(|ch| ch == '(' || ch == ')');
                title.year = year.parse().ok();
            } else if c.accept(TokenKind::Quote) {
                if !c.unpaired_quote() {
                    return Err(c.unexpected_current());
                }
                warn!("Unpaired quote found in {:?}", c.full());
            } else {
                return Err(c.unexpected());
            }
        }
        Ok(title)
    }

    fn name(&self, c: &mut Cursor) -> Result<String, ParseError> {
        let mut name = String::new();
        let mut had_extra = false;
        let mut first_char_was_quote = false;
        let mut quotes = 0;
        while c.has_next() {
            if c.peek(TokenKind::Year) || (c.peek(TokenKind::LParen) && !name.is_empty() && quotes % 2 == 0) {
                return Ok(name);
            }

            if c.accept(TokenKind::Quote) {
                quotes += 1;
                if name.is_empty() {
                    first_char_was_quote = true;
                } else if first_char_was_quote {
                    return Ok(name);
                } else {
                    name.push_str(c.value());
                }
            } else if c.accept(TokenKind::Dash) {
                if dash_recurs(c) {
                    let inner = extra(c, TokenKind::Dash);
                    name.push_str(&format!("({inner})"));
                } else {
                    name.push_str(c.value());
                }
            } else if c.accept(TokenKind::LParen) {
                let inner = extra(c, TokenKind::RParen);
                name.push_str(&format!("({inner})"));
                had_extra = true;
            } else if c.accept_any(&[TokenKind::Text, TokenKind::RParen]) {
                name.push_str(c.value());
            } else if c.accept(TokenKind::Ws) {
                if had_extra && !(first_char_was_quote && any_quote_in(c.remaining())) {
                    return Ok(name);
                }
                name.push_str(c.value());
            } else {
                return Err(c.unexpected());
            }
        }
        Ok(name)
    }
}

#[cfg(test)]
mod title_tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────
    // Song titles
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn name_extras_and_duration() {
        let title = TitleParser.parse("Song (노래) - 3:25").unwrap();
        assert_eq!(title.name, "Song");
        assert_eq!(title.duration.as_deref(), Some("3:25"));
        assert_eq!(title.extras, vec!["노래"]);
    }

    #[test]
    fn quoted_name_keeps_its_extras() {
        let title = TitleParser.parse("\"Song (Remix)\" (노래)").unwrap();
        assert_eq!(title.name, "Song (Remix)");
        assert_eq!(title.extras, vec!["노래"]);
    }

    #[test]
    fn lone_dash_is_part_of_the_name() {
        let title = TitleParser.parse("A - B").unwrap();
        assert_eq!(title.name, "A - B");
        assert!(title.extras.is_empty());
    }

    #[test]
    fn trailing_text_is_unexpected() {
        let err = TitleParser.parse("Song (x) y").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                kind: TokenKind::Text,
                value: "y".into(),
                input: "Song (x) y".into(),
            }
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Album titles
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn album_year() {
        let album = AlbumTitleParser.parse("Paradise (2018)").unwrap();
        assert_eq!(album.name, "Paradise");
        assert_eq!(album.year, Some(2018));
        assert!(album.extras.is_empty());
    }

    #[test]
    fn quoted_album_with_extra() {
        let album = AlbumTitleParser.parse("\"Hello\" (Repackage) (2019)").unwrap();
        assert_eq!(album.name, "Hello");
        assert_eq!(album.year, Some(2019));
        assert_eq!(album.extras, vec!["Repackage"]);
    }

    #[test]
    fn album_apostrophe_quote_is_text() {
        let album = AlbumTitleParser.parse("Don\"t (2019)").unwrap();
        assert_eq!(album.name, "Don\"t");
        assert_eq!(album.year, Some(2019));
    }
}
