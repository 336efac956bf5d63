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

use crate::ast::{BindingTarget, Param};
use crate::error::EvalError;
use crate::lexer::token::{Keyword, Token, TokenKind};
use crate::parser::parser::Parser;
use crate::span::Span;

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.current].kind
    }

    pub(crate) fn here(&self) -> Span {
        self.tokens[self.current].span
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let t = self.tokens[self.current].clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        t
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(kind)
    }

    pub(crate) fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek_kind(), TokenKind::Keyword(k) if *k == kw)
    }

    pub(crate) fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<Token, EvalError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(EvalError::unsupported(
                format!("expected {what}, found {:?}", self.peek_kind()),
                self.here(),
            ))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, Span), EvalError> {
        let span = self.here();
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok((name, span))
            }
            other => Err(EvalError::unsupported(
                format!("expected identifier, found {other:?}"),
                span,
            )),
        }
    }

    /// Builds a `BindingTarget` from the next token: a single identifier
    /// resolves normally, anything else (array/object destructuring
    /// patterns) is recorded as an unsupported binding so the evaluator
    /// decides whether to raise or skip (spec.md §7).
    pub(crate) fn binding_target(&mut self) -> Result<BindingTarget, EvalError> {
        if let TokenKind::Identifier(_) = self.peek_kind() {
            let (name, _) = self.expect_identifier()?;
            let id = self.next_id();
            Ok(BindingTarget::Identifier { name, id })
        } else if self.match_kind(&TokenKind::LBracket) {
            self.skip_balanced(TokenKind::LBracket, TokenKind::RBracket)?;
            Ok(BindingTarget::Unsupported("array destructuring".into()))
        } else if self.match_kind(&TokenKind::LBrace) {
            self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
            Ok(BindingTarget::Unsupported("object destructuring".into()))
        } else {
            Err(EvalError::unsupported(
                format!("expected a binding target, found {:?}", self.peek_kind()),
                self.here(),
            ))
        }
    }

    /// Consumes tokens until the matching close for an already-consumed
    /// open delimiter, so an unsupported pattern can be skipped wholesale
    /// while keeping the cursor in sync with the rest of the grammar.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> Result<(), EvalError> {
        let mut depth = 1usize;
        while depth > 0 {
            if self.is_at_end() {
                return Err(EvalError::unsupported(
                    "unterminated binding pattern",
                    self.here(),
                ));
            }
            if self.check(&open) {
                depth += 1;
            } else if self.check(&close) {
                depth -= 1;
            }
            self.advance();
        }
        Ok(())
    }

    /// Parses a parenthesized, comma-separated parameter list. The
    /// opening `(` must already be consumed by the caller.
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, EvalError> {
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let target = self.binding_target()?;
                let default = if self.match_kind(&TokenKind::Assign) {
                    Some(self.assignment()?)
                } else {
                    None
                };
                params.push(Param { target, default });
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')' after parameters")?;
        Ok(params)
    }

    /// Parses a `{ ... }` statement list. The opening `{` must already
    /// be consumed by the caller.
    pub(crate) fn parse_block(&mut self) -> Result<Vec<crate::ast::Stmt>, EvalError> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            body.push(self.statement()?);
        }
        self.expect(&TokenKind::RBrace, "'}' to close block")?;
        Ok(body)
    }
}
