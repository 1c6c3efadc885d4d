//! Tokens and the lookahead cursor shared by the recursive-descent grammars.

use std::fmt;

use regex::Regex;

use crate::error::ParseError;

/// Characters treated as quote marks
pub const QUOTE_CHARS: [char; 2] = ['"', '“'];

/// Regex class body for dash characters: Unicode dash punctuation plus `~`
pub const DASH_CLASS: &str = r"\p{Pd}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Quote,
    LParen,
    RParen,
    /// Fullwidth `（`
    LBParen,
    /// Fullwidth `）`
    RBParen,
    LBrkt,
    RBrkt,
    Time,
    Year,
    Ws,
    Dash,
    Text,
}

impl TokenKind {
    /// The token that closes a group opened by this one
    pub fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBParen => Some(TokenKind::RBParen),
            TokenKind::LBrkt => Some(TokenKind::RBrkt),
            TokenKind::Quote => Some(TokenKind::Quote),
            TokenKind::Dash => Some(TokenKind::Dash),
            _ => None,
        }
    }

    /// Render the contents of a group opened by this token. Quoted groups are
    /// always re-inlined with straight double quotes, whichever quote opened them.
    pub fn format_group(self, inner: &str) -> String {
        match self {
            TokenKind::LBrkt => format!("[{inner}]"),
            TokenKind::Quote => format!("\"{inner}\""),
            _ => format!("({inner})"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Quote => "QUOTE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBParen => "LBPAREN",
            TokenKind::RBParen => "RBPAREN",
            TokenKind::LBrkt => "LBRKT",
            TokenKind::RBrkt => "RBRKT",
            TokenKind::Time => "TIME",
            TokenKind::Year => "YEAR",
            TokenKind::Ws => "WS",
            TokenKind::Dash => "DASH",
            TokenKind::Text => "TEXT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Byte offset in the parsed text
    pub pos: usize,
}

/// Splits text into tokens using an ordered list of `(kind, pattern)` rules.
/// Earlier rules win when more than one matches at the same position.
pub struct Tokenizer {
    pattern: Regex,
    kinds: Vec<TokenKind>,
}

impl Tokenizer {
    pub fn new(rules: &[(TokenKind, &str)]) -> Result<Self, regex::Error> {
        let alternation = rules
            .iter()
            .map(|(_, pat)| format!("({pat})"))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Tokenizer {
            pattern: Regex::new(&alternation)?,
            kinds: rules.iter().map(|(kind, _)| *kind).collect(),
        })
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                self.kinds.iter().enumerate().find_map(|(i, kind)| {
                    caps.get(i + 1).map(|m| Token {
                        kind: *kind,
                        value: m.as_str().to_string(),
                        pos: m.start(),
                    })
                })
            })
            .collect()
    }
}

/// Position in a token list with one token of lookahead.
///
/// `next` is the lookahead token, `current` the one most recently consumed
/// and `prev` the one consumed before that.
pub struct Cursor<'a> {
    full: &'a str,
    tokens: Vec<Token>,
    next: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(full: &'a str, tokens: Vec<Token>) -> Self {
        Cursor {
            full,
            tokens,
            next: 0,
        }
    }

    pub fn full(&self) -> &'a str {
        self.full
    }

    pub fn has_next(&self) -> bool {
        self.next < self.tokens.len()
    }

    pub fn next_token(&self) -> Option<&Token> {
        self.tokens.get(self.next)
    }

    pub fn current(&self) -> Option<&Token> {
        self.next.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    pub fn prev(&self) -> Option<&Token> {
        self.next.checked_sub(2).and_then(|i| self.tokens.get(i))
    }

    /// Value of the most recently consumed token
    pub fn value(&self) -> &str {
        self.current().map_or("", |t| t.value.as_str())
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    pub fn advance(&mut self) {
        if self.next < self.tokens.len() {
            self.next += 1;
        }
    }

    pub fn peek(&self, kind: TokenKind) -> bool {
        self.next_token().is_some_and(|t| t.kind == kind)
    }

    pub fn peek_any(&self, kinds: &[TokenKind]) -> bool {
        self.next_token().is_some_and(|t| kinds.contains(&t.kind))
    }

    pub fn last_is(&self, kind: TokenKind) -> bool {
        self.prev().is_some_and(|t| t.kind == kind)
    }

    pub fn last_any(&self, kinds: &[TokenKind]) -> bool {
        self.prev().is_some_and(|t| kinds.contains(&t.kind))
    }

    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn accept_any(&mut self, kinds: &[TokenKind]) -> bool {
        if self.peek_any(kinds) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Offset of the lookahead token, or of the last token once exhausted
    pub fn pos(&self) -> usize {
        self.next_token()
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.pos)
    }

    /// Text from the lookahead token onward
    pub fn remaining(&self) -> &'a str {
        &self.full[self.pos()..]
    }

    /// Offset of the next `closer` that is not balanced by an opener between
    /// here and there
    pub fn lookahead_unpaired(&self, closer: TokenKind) -> Option<usize> {
        let mut opened = 0;
        let mut closed = 0;
        for token in &self.tokens[self.next..] {
            if token.kind == closer {
                closed += 1;
                if closed > opened {
                    return Some(token.pos);
                }
            } else if token.kind.closer() == Some(closer) {
                opened += 1;
            }
        }
        None
    }

    /// True if some quote mark never appears again and occurs an odd number
    /// of times overall
    pub fn unpaired_quote(&self) -> bool {
        let remaining = self.remaining();
        QUOTE_CHARS
            .iter()
            .any(|&q| !remaining.contains(q) && self.full.matches(q).count() % 2 == 1)
    }

    /// Error for the lookahead token
    pub fn unexpected(&self) -> ParseError {
        self.unexpected_token(self.next_token())
    }

    /// Error for the most recently consumed token
    pub fn unexpected_current(&self) -> ParseError {
        self.unexpected_token(self.current())
    }

    fn unexpected_token(&self, token: Option<&Token>) -> ParseError {
        let (kind, value) = token.map_or((TokenKind::Text, String::new()), |t| (t.kind, t.value.clone()));
        ParseError::UnexpectedToken {
            kind,
            value,
            input: self.full.to_string(),
        }
    }
}

#[cfg(test)]
mod cursor_tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(&[
            (TokenKind::LParen, r"\("),
            (TokenKind::RParen, r"\)"),
            (TokenKind::Ws, r"\s+"),
            (TokenKind::Text, r"[^()\s]+"),
        ])
        .unwrap()
    }

    #[test]
    fn tokenizes_in_rule_order() {
        let tokens = tokenizer().tokenize("a (b)");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text,
                TokenKind::Ws,
                TokenKind::LParen,
                TokenKind::Text,
                TokenKind::RParen
            ]
        );
        assert_eq!(tokens[3].pos, 3);
    }

    #[test]
    fn groups_render_with_their_delimiters() {
        assert_eq!(TokenKind::LParen.format_group("x"), "(x)");
        assert_eq!(TokenKind::LBrkt.format_group("x"), "[x]");
        assert_eq!(TokenKind::Quote.format_group("x"), "\"x\"");
    }

    #[test]
    fn cursor_tracks_prev_current_next() {
        let text = "a (b)";
        let mut c = Cursor::new(text, tokenizer().tokenize(text));
        assert!(c.current().is_none());
        assert!(c.accept(TokenKind::Text));
        assert!(!c.accept(TokenKind::Text));
        assert!(c.accept(TokenKind::Ws));
        assert!(c.last_is(TokenKind::Text));
        assert_eq!(c.remaining(), "(b)");
        c.advance();
        c.advance();
        c.advance();
        assert!(!c.has_next());
        assert_eq!(c.remaining(), ")");
    }

    #[test]
    fn finds_unpaired_closer() {
        let text = "(x) y)";
        let c = Cursor::new(text, tokenizer().tokenize(text));
        assert_eq!(c.lookahead_unpaired(TokenKind::RParen), Some(5));
    }

    #[test]
    fn group_formats() {
        assert_eq!(TokenKind::LParen.format_group("a"), "(a)");
        assert_eq!(TokenKind::LBrkt.format_group("a"), "[a]");
        assert_eq!(TokenKind::Quote.format_group("a"), "\"a\"");
        assert_eq!(TokenKind::Dash.format_group("a"), "(a)");
        assert_eq!(TokenKind::Dash.to_string(), "DASH");
    }
}
