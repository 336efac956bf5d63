/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::error::EvalError;
use crate::lexer::keywords;
use crate::lexer::token::{Keyword, Token, TokenKind};
use crate::span::Span;

/// Scans PAWX source text into a flat token stream.
///
/// Unterminated strings/comments/templates are reported as
/// [`EvalError`]s rather than panics, matching spec.md §7's taxonomy —
/// a malformed script is a diagnosable failure, not a crash.
pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    /// The kind of the most recently emitted significant token, used to
    /// disambiguate `/` as division vs. the start of a regex literal.
    prev_kind: Option<TokenKind>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            prev_kind: None,
        }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, EvalError> {
        while !self.is_at_end() {
            self.skip_trivia()?;
            if self.is_at_end() {
                break;
            }
            self.scan_token()?;
        }
        self.tokens.push(Token::new(TokenKind::Eof, self.here()));
        Ok(self.tokens)
    }

    fn skip_trivia(&mut self) -> Result<(), EvalError> {
        loop {
            match self.peek() {
                ' ' | '\r' | '\t' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                '/' if self.peek_next() == '/' => {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                }
                '/' if self.peek_next() == '*' => {
                    self.advance();
                    self.advance();
                    loop {
                        if self.is_at_end() {
                            return Err(EvalError::unsupported(
                                "unterminated block comment",
                                self.here(),
                            ));
                        }
                        if self.peek() == '*' && self.peek_next() == '/' {
                            self.advance();
                            self.advance();
                            break;
                        }
                        if self.peek() == '\n' {
                            self.line += 1;
                            self.column = 1;
                        }
                        self.advance();
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn scan_token(&mut self) -> Result<(), EvalError> {
        let span = self.here();
        let ch = self.advance();

        let kind = match ch {
            '"' | '\'' => self.string_literal(ch)?,
            '`' => self.template_literal()?,
            '0'..='9' => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(c),

            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,

            '.' => {
                if self.peek() == '.' && self.peek_next() == '.' {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }

            '+' => {
                if self.match_char('+') {
                    TokenKind::PlusPlus
                } else if self.match_char('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.match_char('-') {
                    TokenKind::MinusMinus
                } else if self.match_char('=') {
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.match_char('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.regex_allowed() {
                    self.regex_literal()?
                } else if self.match_char('=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.match_char('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }

            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                } else if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::BangEqEq
                    } else {
                        TokenKind::BangEq
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' if self.peek() == '&' => {
                self.advance();
                TokenKind::AmpAmp
            }
            '|' if self.peek() == '|' => {
                self.advance();
                TokenKind::PipePipe
            }

            other => {
                return Err(EvalError::unsupported(
                    format!("unexpected character '{other}'"),
                    span,
                ));
            }
        };

        self.push(kind, span);
        Ok(())
    }

    fn string_literal(&mut self, delimiter: char) -> Result<TokenKind, EvalError> {
        let start_span = self.here();
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(EvalError::unsupported("unterminated string", start_span));
            }
            let c = self.peek();
            if c == delimiter {
                self.advance();
                break;
            }
            if c == '\n' {
                return Err(EvalError::unsupported(
                    "unterminated string",
                    start_span,
                ));
            }
            if c == '\\' {
                self.advance();
                value.push(self.escape_char());
            } else {
                value.push(self.advance());
            }
        }

        Ok(TokenKind::Str(value))
    }

    fn escape_char(&mut self) -> char {
        match self.advance() {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '`' => '`',
            '$' => '$',
            other => other,
        }
    }

    /// Splits a backtick template into quasis and the raw, unparsed
    /// source of each `${ ... }` interpolation. Brace depth is tracked
    /// char-by-char (skipping over nested string literals) rather than
    /// re-entering the lexer, so a single pass finds every boundary.
    fn template_literal(&mut self) -> Result<TokenKind, EvalError> {
        let start_span = self.here();
        let mut quasis = Vec::new();
        let mut exprs = Vec::new();
        let mut current = String::new();

        loop {
            if self.is_at_end() {
                return Err(EvalError::unsupported(
                    "unterminated template literal",
                    start_span,
                ));
            }
            match self.peek() {
                '`' => {
                    self.advance();
                    quasis.push(current);
                    break;
                }
                '\\' => {
                    self.advance();
                    current.push(self.escape_char());
                }
                '$' if self.peek_next() == '{' => {
                    self.advance();
                    self.advance();
                    quasis.push(std::mem::take(&mut current));
                    exprs.push(self.template_expr_source()?);
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                    current.push('\n');
                }
                _ => current.push(self.advance()),
            }
        }

        Ok(TokenKind::Template { quasis, exprs })
    }

    fn template_expr_source(&mut self) -> Result<String, EvalError> {
        let start_span = self.here();
        let mut depth = 1usize;
        let mut source = String::new();

        while depth > 0 {
            if self.is_at_end() {
                return Err(EvalError::unsupported(
                    "unterminated template interpolation",
                    start_span,
                ));
            }
            let c = self.advance();
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                '"' | '\'' | '`' => {
                    source.push(c);
                    let delim = c;
                    while !self.is_at_end() && self.peek() != delim {
                        let inner = self.advance();
                        source.push(inner);
                        if inner == '\\' && !self.is_at_end() {
                            source.push(self.advance());
                        }
                    }
                    if !self.is_at_end() {
                        source.push(self.advance());
                    }
                    continue;
                }
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => {}
            }
            source.push(c);
        }

        Ok(source)
    }

    fn regex_literal(&mut self) -> Result<TokenKind, EvalError> {
        let start_span = self.here();
        let mut pattern = String::new();
        let mut in_class = false;

        loop {
            if self.is_at_end() {
                return Err(EvalError::unsupported("unterminated regex literal", start_span));
            }
            match self.peek() {
                '/' if !in_class => {
                    self.advance();
                    break;
                }
                '[' => {
                    in_class = true;
                    pattern.push(self.advance());
                }
                ']' => {
                    in_class = false;
                    pattern.push(self.advance());
                }
                '\\' => {
                    pattern.push(self.advance());
                    if !self.is_at_end() {
                        pattern.push(self.advance());
                    }
                }
                '\n' => {
                    return Err(EvalError::unsupported("unterminated regex literal", start_span));
                }
                _ => pattern.push(self.advance()),
            }
        }

        let mut flags = String::new();
        while self.peek().is_alphabetic() {
            flags.push(self.advance());
        }

        Ok(TokenKind::Regex { pattern, flags })
    }

    fn identifier(&mut self, first: char) -> TokenKind {
        let mut text = String::new();
        text.push(first);
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            text.push(self.advance());
        }

        match keywords::lookup(&text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier(text),
        }
    }

    fn number(&mut self) -> TokenKind {
        let start = self.current - 1;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        if self.peek() == 'e' || self.peek() == 'E' {
            let save = self.current;
            self.advance();
            if self.peek() == '+' || self.peek() == '-' {
                self.advance();
            }
            if self.peek().is_ascii_digit() {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            } else {
                self.current = save;
            }
        }

        let text: String = self.chars[start..self.current].iter().collect();
        TokenKind::Number(text.parse().unwrap_or(f64::NAN))
    }

    /// `/` begins a regex literal unless the previous significant token
    /// could end an expression (an operand, `)`, `]`, or postfix
    /// `++`/`--`) — in which case it is division.
    fn regex_allowed(&self) -> bool {
        !matches!(
            self.prev_kind,
            Some(TokenKind::Identifier(_))
                | Some(TokenKind::Number(_))
                | Some(TokenKind::Str(_))
                | Some(TokenKind::Template { .. })
                | Some(TokenKind::Regex { .. })
                | Some(TokenKind::RParen)
                | Some(TokenKind::RBracket)
                | Some(TokenKind::RBrace)
                | Some(TokenKind::PlusPlus)
                | Some(TokenKind::MinusMinus)
                | Some(TokenKind::Keyword(Keyword::This))
                | Some(TokenKind::Keyword(Keyword::True))
                | Some(TokenKind::Keyword(Keyword::False))
                | Some(TokenKind::Keyword(Keyword::Null))
                | Some(TokenKind::Keyword(Keyword::Undefined))
                | Some(TokenKind::Keyword(Keyword::Infinity))
        )
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.prev_kind = Some(kind.clone());
        self.tokens.push(Token::new(kind, span));
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        self.column += 1;
        ch
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn here(&self) -> Span {
        Span::new(self.line, self.column)
    }
}

/// Tokenizes a complete source unit — the entry point used by the
/// parser (and, for `${ }` interpolations, recursively by itself).
pub fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    Lexer::new(source).scan_tokens()
}
