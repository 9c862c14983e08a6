//! Character-level scene tokenizer
//!
//! The tokenizer walks the text one character at a time and yields `label:
//! field` pairs plus the block structure around them. Quoted strings and
//! parenthesized vectors are "space fields": they are copied verbatim up to
//! their closing character, so they may contain whitespace.

use crate::token::{Position, Scope, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("Unexpected whitespace character in label")]
    WhitespaceInLabel,

    #[error("Unexpected newline character in label")]
    NewlineInLabel,

    #[error("Unexpected newline character in field")]
    NewlineInField,

    #[error("Unexpected character '{found}' in {scope} block")]
    UnexpectedChar { found: char, scope: Scope },

    #[error("Unable to find start of behavior block ('{{' expected)")]
    MissingBlockStart,

    #[error("Unexpected end of file in {scope} block")]
    UnexpectedEof { scope: Scope },
}

/// A fatal tokenizing error and where it happened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} [{position}]")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

pub struct Tokenizer<'a> {
    chars: std::str::Chars<'a>,
    peek: Option<char>,
    pos: Position,
    scope: Scope,
    /// The virtual newline at end of input has been handed out
    ended: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut chars = src.chars();
        let peek = chars.next();
        Self {
            chars,
            peek,
            pos: Position::START,
            scope: Scope::TopLevel,
            ended: false,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    fn bump(&mut self) -> Option<char> {
        let cur = self.peek?;
        self.peek = self.chars.next();
        self.pos.advance(cur);
        Some(cur)
    }

    /// Next character, with one trailing newline after the real input
    fn bump_or_newline(&mut self) -> Option<char> {
        match self.bump() {
            Some(c) => Some(c),
            None if !self.ended => {
                self.ended = true;
                Some('\n')
            }
            None => None,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let mut label = String::new();
        let mut field = String::new();
        let mut label_closed = false;
        let mut start = None;
        let mut in_comment = false;
        // Closing character of the open space field
        let mut space_close: Option<char> = None;
        let mut prev = None;

        loop {
            let at = self.pos;
            let Some(c) = self.bump_or_newline() else {
                return match self.scope {
                    Scope::TopLevel => Ok(Token::new(TokenKind::Eof, at)),
                    scope => Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEof { scope }, at)),
                };
            };

            if let Some(close) = space_close {
                match c {
                    '\n' => return Err(SyntaxError::new(SyntaxErrorKind::NewlineInField, at)),
                    '"' if close == '"' && prev == Some('\\') => {
                        field.pop();
                        field.push('"');
                    }
                    c if c == close => {
                        field.push(c);
                        space_close = None;
                    }
                    c => field.push(c),
                }
                prev = Some(c);
                continue;
            }

            if in_comment {
                if c != '\n' {
                    continue;
                }
                in_comment = false;
            } else if c == '#' {
                in_comment = true;
                continue;
            }

            if self.scope == Scope::TopLevel {
                if c == '{' {
                    self.scope = Scope::Object;
                    return Ok(Token::new(TokenKind::ObjectOpen, at));
                }
                continue;
            }

            match c {
                // A colon after the label has closed is dropped
                ':' => label_closed = true,
                c if c.is_whitespace() => {
                    if !label_closed && !label.is_empty() {
                        let kind = if c == '\n' {
                            SyntaxErrorKind::NewlineInLabel
                        } else {
                            SyntaxErrorKind::WhitespaceInLabel
                        };
                        return Err(SyntaxError::new(kind, at));
                    }
                    if label_closed && !field.is_empty() {
                        return Ok(Token::new(
                            TokenKind::Field { label, field },
                            start.unwrap_or(at),
                        ));
                    }
                }
                '{' if !label_closed => return Err(self.unexpected(c, at)),
                '}' if !label_closed => {
                    if !label.is_empty() {
                        return Err(self.unexpected(c, at));
                    }
                    let kind = match self.scope {
                        Scope::Behavior => {
                            self.scope = Scope::Object;
                            TokenKind::BehaviorClose
                        }
                        _ => {
                            self.scope = Scope::TopLevel;
                            TokenKind::ObjectClose
                        }
                    };
                    return Ok(Token::new(kind, at));
                }
                '{' | '}' => {}
                '(' | '"' if !label_closed => return Err(self.unexpected(c, at)),
                '(' | '"' => {
                    space_close = Some(if c == '(' { ')' } else { '"' });
                    prev = Some(c);
                    field.push(c);
                }
                c if label_closed => field.push(c),
                c => {
                    if label.is_empty() {
                        start = Some(at);
                    }
                    label.push(c);
                }
            }
        }
    }

    /// Skip to the `{` that opens a behavior block, ignoring comments and
    /// anything else in between. Returns the position of the brace.
    pub fn expect_behavior_block(&mut self) -> Result<Position, SyntaxError> {
        let mut in_comment = false;

        loop {
            let at = self.pos;
            match self.bump() {
                None => return Err(SyntaxError::new(SyntaxErrorKind::MissingBlockStart, at)),
                Some('\n') => in_comment = false,
                Some(_) if in_comment => {}
                Some('#') => in_comment = true,
                Some('{') => {
                    self.scope = Scope::Behavior;
                    return Ok(at);
                }
                Some(_) => {}
            }
        }
    }

    fn unexpected(&self, found: char, at: Position) -> SyntaxError {
        SyntaxError::new(
            SyntaxErrorKind::UnexpectedChar {
                found,
                scope: self.scope,
            },
            at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "# comment\n{\n    name: \"Player\"\n    add_script: \"Transform\"\n    {\n        position: (1.0, 2.0, 0.5)\n        scale: 2.5\n    }\n}\n";

    fn pos(line: usize, column: usize) -> (usize, usize) {
        (line, column)
    }

    fn at(token: &Token) -> (usize, usize) {
        (token.position.line, token.position.column)
    }

    fn field(label: &str, field: &str) -> TokenKind {
        TokenKind::Field {
            label: label.to_string(),
            field: field.to_string(),
        }
    }

    #[test]
    fn test_minimal_scene_tokens() {
        let mut t = Tokenizer::new(MINIMAL);

        let open = t.next_token().unwrap();
        assert_eq!(open.kind, TokenKind::ObjectOpen);
        assert_eq!(at(&open), pos(2, 1));

        let name = t.next_token().unwrap();
        assert_eq!(name.kind, field("name", "\"Player\""));
        assert_eq!(at(&name), pos(3, 5));

        let script = t.next_token().unwrap();
        assert_eq!(script.kind, field("add_script", "\"Transform\""));
        assert_eq!(at(&script), pos(4, 5));

        let brace = t.expect_behavior_block().unwrap();
        assert_eq!((brace.line, brace.column), pos(5, 5));
        assert_eq!(t.scope(), Scope::Behavior);

        let position = t.next_token().unwrap();
        assert_eq!(position.kind, field("position", "(1.0, 2.0, 0.5)"));
        assert_eq!(at(&position), pos(6, 9));

        let scale = t.next_token().unwrap();
        assert_eq!(scale.kind, field("scale", "2.5"));
        assert_eq!(at(&scale), pos(7, 9));

        assert_eq!(t.next_token().unwrap().kind, TokenKind::BehaviorClose);
        assert_eq!(t.scope(), Scope::Object);
        assert_eq!(t.next_token().unwrap().kind, TokenKind::ObjectClose);
        assert_eq!(t.scope(), Scope::TopLevel);
        assert_eq!(t.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(t.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_top_level_ignores_everything_but_open_brace() {
        let mut t = Tokenizer::new("stray } text: 1\n# {\n{\n}");
        let open = t.next_token().unwrap();
        assert_eq!(open.kind, TokenKind::ObjectOpen);
        assert_eq!(at(&open), pos(3, 1));
        assert_eq!(t.next_token().unwrap().kind, TokenKind::ObjectClose);
        assert_eq!(t.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_comment_newline_ends_field() {
        let mut t = Tokenizer::new("{\n  a: 1# trailing\n  b: 2\n}");
        t.next_token().unwrap();
        assert_eq!(t.next_token().unwrap().kind, field("a", "1"));
        assert_eq!(t.next_token().unwrap().kind, field("b", "2"));
        assert_eq!(t.next_token().unwrap().kind, TokenKind::ObjectClose);
    }

    #[test]
    fn test_hash_inside_space_field_is_text() {
        let mut t = Tokenizer::new("{\n  t: \"#1 (one)\"\n}");
        t.next_token().unwrap();
        assert_eq!(t.next_token().unwrap().kind, field("t", "\"#1 (one)\""));
    }

    #[test]
    fn test_escaped_quote() {
        let mut t = Tokenizer::new("{\n  t: \"say \\\"hi\\\"\"\n}");
        t.next_token().unwrap();
        assert_eq!(t.next_token().unwrap().kind, field("t", "\"say \"hi\"\""));
    }

    #[test]
    fn test_second_colon_is_dropped() {
        let mut t = Tokenizer::new("{\n  a: b:c\n  t: \"x:y\"\n}");
        t.next_token().unwrap();
        assert_eq!(t.next_token().unwrap().kind, field("a", "bc"));
        assert_eq!(t.next_token().unwrap().kind, field("t", "\"x:y\""));
    }

    #[test]
    fn test_braces_after_label_are_ignored() {
        let mut t = Tokenizer::new("{\n  a: {1}\n}");
        t.next_token().unwrap();
        assert_eq!(t.next_token().unwrap().kind, field("a", "1"));
        assert_eq!(t.next_token().unwrap().kind, TokenKind::ObjectClose);
    }

    #[test]
    fn test_whitespace_in_label_is_fatal() {
        let mut t = Tokenizer::new("{\n bad label: 1\n}");
        t.next_token().unwrap();
        let err = t.next_token().unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::WhitespaceInLabel);
        assert_eq!((err.position.line, err.position.column), pos(2, 5));
    }

    #[test]
    fn test_newline_in_label_is_fatal() {
        let mut t = Tokenizer::new("{\n  label\n}");
        t.next_token().unwrap();
        assert_eq!(
            t.next_token().unwrap_err().kind,
            SyntaxErrorKind::NewlineInLabel
        );
    }

    #[test]
    fn test_newline_in_space_field_is_fatal() {
        let mut t = Tokenizer::new("{\n  t: \"abc\n\"\n}");
        t.next_token().unwrap();
        let err = t.next_token().unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::NewlineInField);
        assert_eq!((err.position.line, err.position.column), pos(2, 10));
    }

    #[test]
    fn test_unexpected_block_characters() {
        let mut t = Tokenizer::new("{\n  {\n}");
        t.next_token().unwrap();
        assert_eq!(
            t.next_token().unwrap_err().kind,
            SyntaxErrorKind::UnexpectedChar {
                found: '{',
                scope: Scope::Object
            }
        );

        let mut t = Tokenizer::new("{\n  abc}\n");
        t.next_token().unwrap();
        assert_eq!(
            t.next_token().unwrap_err().kind,
            SyntaxErrorKind::UnexpectedChar {
                found: '}',
                scope: Scope::Object
            }
        );

        let mut t = Tokenizer::new("{\n  (1, 2)\n}");
        t.next_token().unwrap();
        assert!(matches!(
            t.next_token().unwrap_err().kind,
            SyntaxErrorKind::UnexpectedChar { found: '(', .. }
        ));
    }

    #[test]
    fn test_quote_before_colon_is_fatal() {
        let mut t = Tokenizer::new("{\n  \"name\": 1\n}");
        t.next_token().unwrap();
        let err = t.next_token().unwrap_err();
        assert_eq!(
            err.kind,
            SyntaxErrorKind::UnexpectedChar {
                found: '"',
                scope: Scope::Object
            }
        );
        assert_eq!((err.position.line, err.position.column), pos(2, 3));
    }

    #[test]
    fn test_close_with_pending_label_in_behavior() {
        let mut t = Tokenizer::new("{\n  add_script: \"Transform\"\n  {\n    scale}\n}");
        t.next_token().unwrap();
        t.next_token().unwrap();
        t.expect_behavior_block().unwrap();

        let err = t.next_token().unwrap_err();
        assert_eq!(
            err.kind,
            SyntaxErrorKind::UnexpectedChar {
                found: '}',
                scope: Scope::Behavior
            }
        );
        assert_eq!((err.position.line, err.position.column), pos(4, 10));
    }

    #[test]
    fn test_final_field_without_newline() {
        let mut t = Tokenizer::new("{\n  a: 1");
        t.next_token().unwrap();
        assert_eq!(t.next_token().unwrap().kind, field("a", "1"));
        assert_eq!(
            t.next_token().unwrap_err().kind,
            SyntaxErrorKind::UnexpectedEof {
                scope: Scope::Object
            }
        );
    }

    #[test]
    fn test_missing_behavior_block() {
        let mut t = Tokenizer::new("  # { in a comment\n  ");
        let err = t.expect_behavior_block().unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::MissingBlockStart);
        assert_eq!((err.position.line, err.position.column), pos(2, 3));
    }

    #[test]
    fn test_columns_count_characters() {
        let mut t = Tokenizer::new("{\n  é: 1 ü: 2\n}");
        t.next_token().unwrap();
        let first = t.next_token().unwrap();
        assert_eq!(first.kind, field("é", "1"));
        let second = t.next_token().unwrap();
        assert_eq!(second.kind, field("ü", "2"));
        assert_eq!(at(&second), pos(2, 8));
        assert_eq!(second.position.offset, 10);
    }

    #[test]
    fn test_empty_input() {
        let mut t = Tokenizer::new("");
        assert_eq!(t.next_token().unwrap().kind, TokenKind::Eof);
    }
}
