//! Track-list grammar: the name grammar plus a trailing `MM:SS` length.

use std::mem;

use lazy_static::lazy_static;
use log::warn;

use crate::error::ParseError;
use crate::parser::cursor::{Cursor, TokenKind, Tokenizer, DASH_CLASS};
use crate::parser::parenthetical::{
    cleanup, recombine, Part, CONTENT_TOKENS, OPENERS, REQUIRED_PRECEDERS,
};
use crate::terms::terms;

lazy_static! {
    static ref TRACK_TOKENIZER: Tokenizer = Tokenizer::new(&[
        (TokenKind::Quote, r#"["“]"#),
        (TokenKind::LParen, r"\("),
        (TokenKind::RParen, r"\)"),
        (TokenKind::LBParen, "（"),
        (TokenKind::RBParen, "）"),
        (TokenKind::LBrkt, r"\["),
        (TokenKind::RBrkt, r"\]"),
        (TokenKind::Time, r"\s*\d+:\d{2}"),
        (TokenKind::Ws, r"\s+"),
        (TokenKind::Dash, &format!("[{DASH_CLASS}]")),
        (TokenKind::Text, &format!(r#"[^{DASH_CLASS}"“()（）\[\]\s]+"#)),
    ])
    .unwrap();
}

/// Parser for one entry of a track list, e.g.
/// `"Song (노래) (feat. Someone) - 3:25"`.
///
/// ```text
/// content       ::= text { parenthetical }* { text }* [ DASH ] [ TIME ]
/// parenthetical ::= opener { text | WS | parenthetical }* closer
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrackInfoParser {
    pub selective_recombine: bool,
}

impl Default for TrackInfoParser {
    fn default() -> Self {
        TrackInfoParser {
            selective_recombine: true,
        }
    }
}

/// Number of groups opened so far in one parse
struct GroupCounter(usize);

impl TrackInfoParser {
    /// Split `text` into its parts and the track length, if one was given
    pub fn parse(&self, text: &str) -> Result<(Vec<String>, Option<String>), ParseError> {
        let text = text.trim();
        let mut cursor = Cursor::new(text, TRACK_TOKENIZER.tokenize(text));
        self.content(&mut cursor)
    }

    fn parenthetical(
        &self,
        c: &mut Cursor,
        counter: &mut GroupCounter,
        closer: TokenKind,
    ) -> (Vec<String>, bool) {
        counter.0 += 1;
        let mut text = String::new();
        let mut parts: Vec<String> = Vec::new();
        let mut nested = false;
        while c.has_next() {
            if c.accept(closer) {
                if !text.is_empty() {
                    parts.push(text);
                }
                return (parts, nested);
            } else if c.accept_any(OPENERS) {
                let kind = c.current_kind().unwrap_or(TokenKind::LParen);
                let value = c.value().to_string();
                if kind == TokenKind::Dash {
                    let next_dash = c.remaining().find(value.as_str()).map(|i| i + c.pos());
                    let next_closer = c.lookahead_unpaired(closer);
                    let closes_first = match (next_dash, next_closer) {
                        (Some(dash), Some(close)) => dash <= close,
                        _ => false,
                    };
                    if !closes_first
                        || (!text.is_empty() && !c.last_is(TokenKind::Ws) && c.peek(TokenKind::Text))
                    {
                        text.push_str(&value);
                        continue;
                    }
                }

                if !text.is_empty() {
                    parts.push(mem::take(&mut text));
                }
                let inner_closer = kind.closer().unwrap_or(TokenKind::RParen);
                let (inner, _) = self.parenthetical(c, counter, inner_closer);
                if parts.len() == 1 && inner.len() == 1 && counter.0 > 2 {
                    let lc_part = parts[0].to_lowercase();
                    if terms().starts_with_feat_indicator(&lc_part) {
                        parts[0] = format!("{} of {}", parts[0].trim(), inner[0]);
                    } else if terms().version_suffix(&inner[0].to_lowercase()).is_some() {
                        parts.extend(inner);
                    } else {
                        let formatted = kind.format_group(&inner[0]);
                        parts[0].push_str(&formatted);
                    }
                } else {
                    parts.extend(inner);
                }
                nested = true;
            } else {
                c.advance();
                text.push_str(c.value());
            }
        }

        if !text.is_empty() {
            parts.push(text);
        }
        (parts, nested)
    }

    fn content(&self, c: &mut Cursor) -> Result<(Vec<String>, Option<String>), ParseError> {
        let mut counter = GroupCounter(0);
        let mut text = String::new();
        let mut time: Option<String> = None;
        let mut parts = Vec::new();
        while c.has_next() {
            if c.accept_any(OPENERS) {
                let kind = c.current_kind().unwrap_or(TokenKind::LParen);
                let value = c.value().to_string();
                if !text.is_empty()
                    && c.prev().is_some_and(|t| !REQUIRED_PRECEDERS.contains(&t.kind))
                    && c.peek(TokenKind::Text)
                {
                    text.push_str(&value);
                    continue;
                }
                match kind {
                    TokenKind::Quote if c.unpaired_quote() => {
                        warn!("Unpaired quote found in {:?}", c.full());
                        text.push_str(&value);
                        continue;
                    }
                    TokenKind::Dash if c.peek(TokenKind::Time) => {
                        if !text.is_empty() {
                            parts.push(Part::Text(mem::take(&mut text)));
                        }
                        continue;
                    }
                    TokenKind::Dash
                        if c.peek(TokenKind::Ws) || !c.remaining().contains(value.as_str()) =>
                    {
                        text.push_str(&value);
                        continue;
                    }
                    _ => {}
                }

                if !text.is_empty() {
                    parts.push(Part::Text(mem::take(&mut text)));
                }
                let closer = kind.closer().unwrap_or(TokenKind::RParen);
                let (mut inner, nested) = self.parenthetical(c, &mut counter, closer);
                if inner.len() == 1 {
                    let inner = inner.remove(0);
                    if !nested && !c.peek(TokenKind::Ws) && c.has_next() {
                        text.push_str(&kind.format_group(&inner));
                    } else {
                        parts.push(Part::Group {
                            text: inner,
                            nested,
                            kind,
                        });
                    }
                } else {
                    parts.extend(inner.into_iter().map(Part::Text));
                }
            } else if c.accept_any(CONTENT_TOKENS) {
                text.push_str(c.value());
            } else if c.accept(TokenKind::Time) {
                if c.last_is(TokenKind::Dash) || !c.has_next() {
                    let value = c.value().trim().to_string();
                    if let Some(existing) = time {
                        return Err(ParseError::DuplicateTime {
                            value,
                            existing,
                            input: c.full().to_string(),
                        });
                    }
                    time = Some(value);
                } else {
                    text.push_str(c.value());
                }
            } else {
                return Err(c.unexpected());
            }
        }

        if !text.is_empty() {
            parts.push(Part::Text(text));
        }
        if self.selective_recombine {
            recombine(&mut parts);
        }
        Ok((cleanup(parts), time))
    }
}

#[cfg(test)]
mod track_parser_tests {
    use super::*;

    fn parse(text: &str) -> (Vec<String>, Option<String>) {
        TrackInfoParser::default().parse(text).unwrap()
    }

    #[test]
    fn name_and_time() {
        let (parts, time) = parse("Song (노래) - 3:25");
        assert_eq!(parts, vec!["Song", "노래"]);
        assert_eq!(time.as_deref(), Some("3:25"));
    }

    #[test]
    fn trailing_time_without_dash() {
        let (parts, time) = parse("Song 3:25");
        assert_eq!(parts, vec!["Song"]);
        assert_eq!(time.as_deref(), Some("3:25"));
    }

    #[test]
    fn time_inside_title_is_text() {
        let (parts, time) = parse("10:00 Somewhere");
        assert_eq!(parts, vec!["10:00 Somewhere"]);
        assert_eq!(time, None);
    }

    #[test]
    fn feat_and_version_parts() {
        let (parts, time) = parse("Song (feat. Someone) (Inst.)");
        assert_eq!(parts, vec!["Song", "feat. Someone", "Inst."]);
        assert_eq!(time, None);
    }

    #[test]
    fn nested_feat_becomes_of() {
        let (parts, _) = parse("Song (노래) (feat. Rapper (Group))");
        // The flat group is folded into the title once another group nests
        assert_eq!(parts, vec!["Song (노래)", "feat. Rapper of Group"]);
    }

    #[test]
    fn nested_version_stays_separate() {
        let (parts, _) = parse("Song (노래) (Remix (Club ver.))");
        assert_eq!(parts, vec!["Song", "노래", "Remix", "Club ver."]);
    }

    #[test]
    fn stray_quote_is_kept() {
        let (parts, _) = parse("Don\"t Stop");
        assert_eq!(parts, vec!["Don\"t Stop"]);
    }

    #[test]
    fn duplicate_time_is_an_error() {
        let err = TrackInfoParser::default().parse("Song - 3:25 - 4:00").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateTime {
                value: "4:00".into(),
                existing: "3:25".into(),
                input: "Song - 3:25 - 4:00".into(),
            }
        );
    }
}
