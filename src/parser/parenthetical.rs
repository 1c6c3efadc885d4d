//! Name grammar: splits a name into its top-level text and parenthesized parts.

use std::mem;

use lazy_static::lazy_static;
use log::warn;

use crate::error::ParseError;
use crate::parser::cursor::{Cursor, TokenKind, Tokenizer, DASH_CLASS};

lazy_static! {
    static ref NAME_TOKENIZER: Tokenizer = Tokenizer::new(&[
        (TokenKind::Quote, r#"["“]"#),
        (TokenKind::LParen, r"\("),
        (TokenKind::RParen, r"\)"),
        (TokenKind::LBParen, "（"),
        (TokenKind::RBParen, "）"),
        (TokenKind::LBrkt, r"\["),
        (TokenKind::RBrkt, r"\]"),
        (TokenKind::Ws, r"\s+"),
        (TokenKind::Dash, &format!("[{DASH_CLASS}]")),
        (TokenKind::Text, &format!(r#"[^{DASH_CLASS}"“()（）\[\]\s]+"#)),
    ])
    .unwrap();
}

pub(crate) const OPENERS: &[TokenKind] = &[
    TokenKind::LParen,
    TokenKind::LBParen,
    TokenKind::LBrkt,
    TokenKind::Quote,
    TokenKind::Dash,
];

/// Tokens appended to the current text as-is
pub(crate) const CONTENT_TOKENS: &[TokenKind] = &[
    TokenKind::Text,
    TokenKind::Ws,
    TokenKind::RParen,
    TokenKind::RBParen,
    TokenKind::RBrkt,
];

/// Tokens after which an opener always starts a group
pub(crate) const REQUIRED_PRECEDERS: &[TokenKind] = &[
    TokenKind::Ws,
    TokenKind::RParen,
    TokenKind::RBParen,
    TokenKind::RBrkt,
    TokenKind::Quote,
    TokenKind::Dash,
];

/// Parts left behind once only delimiters remain
const DELIMITER_JUNK: &str = "\"“()（）[]";

/// A top-level part before recombination
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    Text(String),
    Group {
        text: String,
        nested: bool,
        kind: TokenKind,
    },
}

impl Part {
    fn formatted(&self) -> String {
        match self {
            Part::Text(text) => text.clone(),
            Part::Group { text, kind, .. } => kind.format_group(text),
        }
    }

    fn into_text(self) -> String {
        match self {
            Part::Text(text) | Part::Group { text, .. } => text,
        }
    }
}

/// When any group contains a nested group, merge each flat group into an
/// adjacent non-blank text part (the one before it, else the one after it)
pub(crate) fn recombine(parts: &mut Vec<Part>) {
    let had_nested = parts
        .iter()
        .any(|p| matches!(p, Part::Group { nested: true, .. }));
    let mut singles: Vec<usize> = parts
        .iter()
        .enumerate()
        .filter(|(_, p)| matches!(p, Part::Group { nested: false, .. }))
        .map(|(i, _)| i)
        .collect();
    if !had_nested || singles.is_empty() {
        return;
    }

    singles.reverse();
    while let Some(i) = singles.pop() {
        for target in [i.checked_sub(1), Some(i + 1)].into_iter().flatten() {
            let merged = match parts.get(target) {
                Some(Part::Text(text)) if !text.trim().is_empty() => {
                    let formatted = parts[i].formatted();
                    if target > i {
                        formatted + text
                    } else {
                        format!("{text}{formatted}")
                    }
                }
                _ => continue,
            };
            parts[target] = Part::Text(merged);
            parts.remove(i);
            for idx in singles.iter_mut() {
                *idx -= 1;
            }
            break;
        }
    }
}

/// Strip parts and drop the empty or delimiter-only ones
pub(crate) fn cleanup(parts: Vec<Part>) -> Vec<String> {
    parts
        .into_iter()
        .map(|p| p.into_text().trim().to_string())
        .filter(|p| !p.is_empty() && !DELIMITER_JUNK.contains(p.as_str()))
        .collect()
}

/// Parser for names such as `Soloist (그룹)` or `Title [Remix] (제목)`.
///
/// ```text
/// content       ::= text { parenthetical }* { text }*
/// parenthetical ::= opener { text | WS | parenthetical }* closer
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParentheticalParser {
    /// Merge flat groups into neighboring text when another group is nested
    pub selective_recombine: bool,
    /// Treat an opener glued between two words (`a(b`) as literal text
    pub require_preceder: bool,
}

impl Default for ParentheticalParser {
    fn default() -> Self {
        ParentheticalParser {
            selective_recombine: true,
            require_preceder: true,
        }
    }
}

impl ParentheticalParser {
    pub fn new(selective_recombine: bool, require_preceder: bool) -> Self {
        ParentheticalParser {
            selective_recombine,
            require_preceder,
        }
    }

    pub fn parse(&self, text: &str) -> Result<Vec<String>, ParseError> {
        let text = text.trim();
        let mut cursor = Cursor::new(text, NAME_TOKENIZER.tokenize(text));
        self.content(&mut cursor)
    }

    fn should_not_enter(&self, c: &Cursor) -> bool {
        self.require_preceder
            && c.prev().is_some_and(|t| !REQUIRED_PRECEDERS.contains(&t.kind))
            && c.peek(TokenKind::Text)
    }

    fn parenthetical(&self, c: &mut Cursor, closer: TokenKind) -> (String, bool) {
        let mut text = String::new();
        let mut nested = false;
        while c.has_next() {
            if c.accept(closer) {
                return (text, nested);
            } else if c.accept_any(OPENERS) {
                let kind = c.current_kind().unwrap_or(TokenKind::LParen);
                let value = c.value().to_string();
                if kind == TokenKind::Dash
                    && (!c.remaining().contains(value.as_str())
                        || (!text.is_empty() && !c.last_is(TokenKind::Ws) && c.peek(TokenKind::Text)))
                {
                    text.push_str(&value);
                    continue;
                }
                let inner_closer = kind.closer().unwrap_or(TokenKind::RParen);
                let (inner, _) = self.parenthetical(c, inner_closer);
                text.push_str(&kind.format_group(&inner));
                nested = true;
            } else {
                c.advance();
                text.push_str(c.value());
            }
        }
        (text, nested)
    }

    fn content(&self, c: &mut Cursor) -> Result<Vec<String>, ParseError> {
        let mut text = String::new();
        let mut parts = Vec::new();
        while c.has_next() {
            if c.accept_any(OPENERS) {
                let kind = c.current_kind().unwrap_or(TokenKind::LParen);
                let value = c.value().to_string();
                if !text.is_empty() && self.should_not_enter(c) {
                    text.push_str(&value);
                    continue;
                }
                match kind {
                    TokenKind::Quote if c.unpaired_quote() => {
                        warn!("Unpaired quote found in {:?}", c.full());
                        text.push_str(&value);
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
                let (inner, nested) = self.parenthetical(c, closer);
                if !nested && !c.peek(TokenKind::Ws) && c.has_next() {
                    text.push_str(&kind.format_group(&inner));
                } else {
                    parts.push(Part::Group {
                        text: inner,
                        nested,
                        kind,
                    });
                }
            } else if c.accept_any(CONTENT_TOKENS) {
                text.push_str(c.value());
            } else {
                return Err(c.unexpected());
            }
        }

        let text = text.trim();
        if !text.is_empty() {
            parts.push(Part::Text(text.to_string()));
        }
        if self.selective_recombine {
            recombine(&mut parts);
        }
        Ok(cleanup(parts))
    }
}

#[cfg(test)]
mod parenthetical_tests {
    use super::*;

    fn parse(text: &str) -> Vec<String> {
        ParentheticalParser::default().parse(text).unwrap()
    }

    #[test]
    fn english_with_native() {
        assert_eq!(parse("Artist (아티스트)"), vec!["Artist", "아티스트"]);
        assert_eq!(parse("아티스트 (Artist)"), vec!["아티스트", "Artist"]);
        assert_eq!(parse("Artist （아티스트）"), vec!["Artist", "아티스트"]);
    }

    #[test]
    fn nested_group_is_one_part() {
        assert_eq!(
            parse("Soloist (Group) (솔로 (그룹))"),
            vec!["Soloist (Group)", "솔로 (그룹)"]
        );
    }

    #[test]
    fn sibling_groups_stay_separate() {
        assert_eq!(parse("Song (feat. X) (Remix)"), vec!["Song", "feat. X", "Remix"]);
    }

    #[test]
    fn glued_paren_is_literal() {
        assert_eq!(parse("Jay(Park) (박재범)"), vec!["Jay(Park)", "박재범"]);
    }

    #[test]
    fn group_followed_by_text_is_inlined() {
        assert_eq!(parse("(G)I-DLE ((여자)아이들)"), vec!["(G)I-DLE", "(여자)아이들"]);
    }

    #[test]
    fn brackets_and_quotes() {
        assert_eq!(parse("Title [Remix]"), vec!["Title", "Remix"]);
        assert_eq!(parse("\"Song\" (노래)"), vec!["Song", "노래"]);
    }

    #[test]
    fn stray_quote_is_kept() {
        assert_eq!(parse("Don\"t Stop"), vec!["Don\"t Stop"]);
        assert_eq!(parse("He said \"hi"), vec!["He said \"hi"]);
    }

    #[test]
    fn dash_rules() {
        // Followed by whitespace: literal
        assert_eq!(parse("A - B"), vec!["A - B"]);
        // Never recurs: literal
        assert_eq!(parse("Jay-Z"), vec!["Jay-Z"]);
        // Recurs: a group
        assert_eq!(parse("Song -Remix-"), vec!["Song", "Remix"]);
    }

    #[test]
    fn unbalanced_closer_is_text() {
        assert_eq!(parse("A) B"), vec!["A) B"]);
    }

    #[test]
    fn without_recombine() {
        let parser = ParentheticalParser::new(false, true);
        assert_eq!(
            parser.parse("A (B) (C (D))").unwrap(),
            vec!["A", "B", "C (D)"]
        );
        assert_eq!(parse("A (B) (C (D))"), vec!["A (B)", "C (D)"]);
    }

    #[test]
    fn without_required_preceder() {
        let parser = ParentheticalParser::new(true, false);
        assert_eq!(parser.parse("Jay(Park) X").unwrap(), vec!["Jay", "Park", "X"]);
        assert_eq!(parser.parse("Jay (Park)").unwrap(), vec!["Jay", "Park"]);
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("()").is_empty());
    }
}
