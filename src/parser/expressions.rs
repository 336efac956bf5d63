/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  Implements the PAWX expression grammar using recursive descent
 *           with precedence climbing.
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * GitHub:   https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT License
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

use crate::ast::{
    Argument, ArrayElement, ClassMember, ClassMemberKind, ClassNode, Expr, FunctionBody,
    FunctionKind, FunctionNode, ObjectProperty, PropertyKey,
};
use crate::error::EvalError;
use crate::lexer::token::{Keyword, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// `expr , expr , ...` — the comma operator. Top of the precedence
    /// ladder; a single argument/param/array-element position parses at
    /// `assignment()` instead so commas there delimit the list rather
    /// than being swallowed by this rule.
    pub(crate) fn sequence(&mut self) -> Result<Expr, EvalError> {
        let mut expr = self.assignment()?;
        while self.match_kind(&TokenKind::Comma) {
            let right = self.assignment()?;
            expr = Expr::Sequence {
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    pub(crate) fn assignment(&mut self) -> Result<Expr, EvalError> {
        let target = self.conditional()?;
        let span = self.here();

        let compound = match self.peek_kind() {
            TokenKind::PlusEq => Some("+="),
            TokenKind::MinusEq => Some("-="),
            TokenKind::StarEq => Some("*="),
            TokenKind::SlashEq => Some("/="),
            TokenKind::PercentEq => Some("%="),
            _ => None,
        };
        if let Some(op) = compound {
            self.advance();
            let value = self.assignment()?;
            return Ok(Expr::CompoundAssign {
                target: Box::new(target),
                operator: op.to_string(),
                value: Box::new(value),
                span,
            });
        }

        if self.match_kind(&TokenKind::Assign) {
            let value = self.assignment()?;
            return Ok(Expr::Assign {
                target: Box::new(target),
                value: Box::new(value),
                span,
            });
        }

        Ok(target)
    }

    fn conditional(&mut self) -> Result<Expr, EvalError> {
        let test = self.logical_or()?;
        if self.match_kind(&TokenKind::Question) {
            let consequent = self.assignment()?;
            self.expect(&TokenKind::Colon, "':' in conditional expression")?;
            let alternate = self.assignment()?;
            return Ok(Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            });
        }
        Ok(test)
    }

    fn logical_or(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.logical_and()?;
        while self.match_kind(&TokenKind::PipePipe) {
            let right = self.logical_and()?;
            left = Expr::Logical {
                left: Box::new(left),
                operator: "||".to_string(),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn logical_and(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.equality()?;
        while self.match_kind(&TokenKind::AmpAmp) {
            let right = self.equality()?;
            left = Expr::Logical {
                left: Box::new(left),
                operator: "&&".to_string(),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.relational()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => "==",
                TokenKind::BangEq => "!=",
                TokenKind::EqEqEq => "===",
                TokenKind::BangEqEq => "!==",
                _ => break,
            };
            let span = self.here();
            self.advance();
            let right = self.relational()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op.to_string(),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn relational(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => "<",
                TokenKind::Gt => ">",
                TokenKind::LtEq => "<=",
                TokenKind::GtEq => ">=",
                TokenKind::Keyword(Keyword::In) => "in",
                _ => break,
            };
            let span = self.here();
            self.advance();
            let right = self.additive()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op.to_string(),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn additive(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                _ => break,
            };
            let span = self.here();
            self.advance();
            let right = self.multiplicative()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op.to_string(),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                TokenKind::Percent => "%",
                _ => break,
            };
            let span = self.here();
            self.advance();
            let right = self.unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator: op.to_string(),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let span = self.here();
        let op = match self.peek_kind() {
            TokenKind::Bang => Some("!"),
            TokenKind::Minus => Some("-"),
            TokenKind::Plus => Some("+"),
            TokenKind::Keyword(Keyword::Typeof) => Some("typeof"),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                operator: op.to_string(),
                operand: Box::new(operand),
                span,
            });
        }

        if matches!(self.peek_kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if self.match_kind(&TokenKind::PlusPlus) {
                "++"
            } else {
                self.advance();
                "--"
            };
            let target = self.unary()?;
            return Ok(Expr::Update {
                target: Box::new(target),
                operator: op.to_string(),
                prefix: true,
                span,
            });
        }

        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expr, EvalError> {
        let mut expr = self.call_or_new()?;
        loop {
            let span = self.here();
            if self.match_kind(&TokenKind::PlusPlus) {
                expr = Expr::Update {
                    target: Box::new(expr),
                    operator: "++".to_string(),
                    prefix: false,
                    span,
                };
            } else if self.match_kind(&TokenKind::MinusMinus) {
                expr = Expr::Update {
                    target: Box::new(expr),
                    operator: "--".to_string(),
                    prefix: false,
                    span,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn call_or_new(&mut self) -> Result<Expr, EvalError> {
        if self.match_keyword(Keyword::New) {
            let span = self.here();
            let mut callee = self.primary()?;
            loop {
                if self.match_kind(&TokenKind::Dot) {
                    let (name, _) = self.expect_identifier()?;
                    callee = Expr::Member {
                        object: Box::new(callee),
                        property: PropertyKey::Static(name),
                        span,
                    };
                } else if self.match_kind(&TokenKind::LBracket) {
                    let index = self.sequence()?;
                    self.expect(&TokenKind::RBracket, "']' after computed member")?;
                    callee = Expr::Member {
                        object: Box::new(callee),
                        property: PropertyKey::Computed(Box::new(index)),
                        span,
                    };
                } else {
                    break;
                }
            }
            let arguments = if self.match_kind(&TokenKind::LParen) {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            let expr = Expr::New {
                callee: Box::new(callee),
                arguments,
                span,
            };
            return self.member_call_chain(expr);
        }

        let primary = self.primary()?;
        self.member_call_chain(primary)
    }

    fn member_call_chain(&mut self, mut expr: Expr) -> Result<Expr, EvalError> {
        loop {
            let span = self.here();
            if self.match_kind(&TokenKind::Dot) {
                let (name, _) = self.expect_identifier()?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property: PropertyKey::Static(name),
                    span,
                };
            } else if self.match_kind(&TokenKind::LBracket) {
                let index = self.sequence()?;
                self.expect(&TokenKind::RBracket, "']' after computed member")?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property: PropertyKey::Computed(Box::new(index)),
                    span,
                };
            } else if self.match_kind(&TokenKind::LParen) {
                let arguments = self.parse_arguments()?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    arguments,
                    span,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<Argument>, EvalError> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                if self.match_kind(&TokenKind::DotDotDot) {
                    args.push(Argument::Spread(self.assignment()?));
                } else {
                    args.push(Argument::Item(self.assignment()?));
                }
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')' after arguments")?;
        Ok(args)
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let span = self.here();
        match self.peek_kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::NumberLiteral(n))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::StringLiteral(s))
            }
            TokenKind::Template { quasis, exprs } => {
                self.advance();
                let parsed = exprs
                    .iter()
                    .map(|src| self.parse_sub_expr(src))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::TemplateLiteral {
                    quasis,
                    exprs: parsed,
                })
            }
            TokenKind::Regex { pattern, flags } => {
                self.advance();
                Ok(Expr::RegexLiteral { pattern, flags })
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::BoolLiteral(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::BoolLiteral(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::NullLiteral)
            }
            TokenKind::Keyword(Keyword::Undefined) => {
                self.advance();
                Ok(Expr::UndefinedLiteral)
            }
            TokenKind::Keyword(Keyword::Infinity) => {
                self.advance();
                Ok(Expr::InfinityLiteral)
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance();
                let id = self.next_id();
                Ok(Expr::This { id })
            }
            TokenKind::Keyword(Keyword::Function) => {
                self.advance();
                Ok(Expr::FunctionExpr(self.function_tail(FunctionKind::Function)?))
            }
            TokenKind::Keyword(Keyword::Class) => {
                self.advance();
                Ok(Expr::ClassExpr(self.class_tail()?))
            }
            TokenKind::Identifier(name) => {
                // `identifier => body` — single-parameter arrow shorthand.
                if matches!(self.tokens.get(self.current + 1).map(|t| &t.kind), Some(TokenKind::Arrow))
                {
                    self.advance();
                    let id = self.next_id();
                    self.advance(); // =>
                    let param = crate::ast::Param {
                        target: crate::ast::BindingTarget::Identifier { name, id },
                        default: None,
                    };
                    return self.arrow_tail(vec![param]);
                }
                self.advance();
                let id = self.next_id();
                Ok(Expr::Identifier { name, id })
            }
            TokenKind::LParen => {
                if let Some(after_close) = self.arrow_param_lookahead() {
                    return self.arrow_with_parens(after_close);
                }
                self.advance();
                let expr = self.sequence()?;
                self.expect(&TokenKind::RParen, "')' after expression")?;
                Ok(Expr::Grouping(Box::new(expr)))
            }
            TokenKind::LBracket => self.array_literal(),
            TokenKind::LBrace => self.object_literal(),
            other => {
                self.advance();
                Ok(Expr::Unsupported {
                    description: format!("unexpected token {other:?}"),
                    span,
                })
            }
        }
    }

    /// Looks ahead from the current `(` to see whether it opens an arrow
    /// function's parameter list (`(...) =>`) rather than a parenthesized
    /// expression. Pure lookahead over already-lexed tokens — no parser
    /// state is touched, so no backtracking is required either way.
    fn arrow_param_lookahead(&self) -> Option<usize> {
        let mut i = self.current;
        let mut depth = 0i32;
        loop {
            match self.tokens.get(i)?.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
            i += 1;
        }
        let after = i + 1;
        if matches!(self.tokens.get(after)?.kind, TokenKind::Arrow) {
            Some(after)
        } else {
            None
        }
    }

    fn arrow_with_parens(&mut self, after_close: usize) -> Result<Expr, EvalError> {
        self.advance(); // '('
        let params = self.parse_params()?;
        debug_assert_eq!(self.current, after_close);
        self.advance(); // '=>'
        self.arrow_tail(params)
    }

    fn arrow_tail(&mut self, params: Vec<crate::ast::Param>) -> Result<Expr, EvalError> {
        let body = if self.match_kind(&TokenKind::LBrace) {
            FunctionBody::Block(self.parse_block()?)
        } else {
            FunctionBody::Expression(Box::new(self.assignment()?))
        };
        Ok(Expr::ArrowExpr(FunctionNode {
            name: None,
            name_id: None,
            params,
            body,
            kind: FunctionKind::Arrow,
        }))
    }

    /// Parses the part of a function after `function` (and, for
    /// declarations, after the name) — `(params) { body }`.
    pub(crate) fn function_tail(&mut self, kind: FunctionKind) -> Result<FunctionNode, EvalError> {
        self.expect(&TokenKind::LParen, "'(' after function name")?;
        let params = self.parse_params()?;
        self.expect(&TokenKind::LBrace, "'{' to start function body")?;
        let body = self.parse_block()?;
        Ok(FunctionNode {
            name: None,
            name_id: None,
            params,
            body: FunctionBody::Block(body),
            kind,
        })
    }

    fn array_literal(&mut self) -> Result<Expr, EvalError> {
        self.advance(); // '['
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            if self.check(&TokenKind::Comma) {
                elements.push(ArrayElement::Hole);
            } else if self.match_kind(&TokenKind::DotDotDot) {
                elements.push(ArrayElement::Spread(self.assignment()?));
            } else {
                elements.push(ArrayElement::Item(self.assignment()?));
            }
            if !self.match_kind(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket, "']' after array literal")?;
        Ok(Expr::ArrayLiteral { elements })
    }

    fn property_key(&mut self) -> Result<PropertyKey, EvalError> {
        if self.match_kind(&TokenKind::LBracket) {
            let expr = self.assignment()?;
            self.expect(&TokenKind::RBracket, "']' after computed key")?;
            return Ok(PropertyKey::Computed(Box::new(expr)));
        }
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(PropertyKey::Static(name))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(PropertyKey::Static(s))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(PropertyKey::Static(crate::value::number_to_string(n)))
            }
            TokenKind::Keyword(kw) => {
                self.advance();
                Ok(PropertyKey::Static(format!("{kw:?}").to_lowercase()))
            }
            other => Err(EvalError::unsupported(
                format!("expected a property key, found {other:?}"),
                self.here(),
            )),
        }
    }

    fn object_literal(&mut self) -> Result<Expr, EvalError> {
        self.advance(); // '{'
        let mut properties = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.match_kind(&TokenKind::DotDotDot) {
                properties.push(ObjectProperty::Spread(self.assignment()?));
            } else if self.check_keyword(Keyword::Get)
                && !matches!(self.tokens.get(self.current + 1).map(|t| &t.kind), Some(TokenKind::Colon) | Some(TokenKind::Comma) | Some(TokenKind::RBrace) | Some(TokenKind::LParen))
            {
                self.advance();
                let key = self.property_key()?;
                let func = self.function_tail(FunctionKind::Getter)?;
                properties.push(ObjectProperty::Getter { key, func });
            } else if self.check_keyword(Keyword::Set)
                && !matches!(self.tokens.get(self.current + 1).map(|t| &t.kind), Some(TokenKind::Colon) | Some(TokenKind::Comma) | Some(TokenKind::RBrace) | Some(TokenKind::LParen))
            {
                self.advance();
                let key = self.property_key()?;
                let func = self.function_tail(FunctionKind::Setter)?;
                properties.push(ObjectProperty::Setter { key, func });
            } else {
                let key = self.property_key()?;
                if self.check(&TokenKind::LParen) {
                    let func = self.function_tail(FunctionKind::Method)?;
                    properties.push(ObjectProperty::Method { key, func });
                } else if self.match_kind(&TokenKind::Colon) {
                    let value = self.assignment()?;
                    properties.push(ObjectProperty::Data { key, value });
                } else if let PropertyKey::Static(name) = &key {
                    let id = self.next_id();
                    properties.push(ObjectProperty::Shorthand {
                        name: name.clone(),
                        id,
                    });
                } else {
                    return Err(EvalError::unsupported(
                        "computed key requires ':' or '('",
                        self.here(),
                    ));
                }
            }
            if !self.match_kind(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}' after object literal")?;
        Ok(Expr::ObjectLiteral { properties })
    }

    pub(crate) fn class_tail(&mut self) -> Result<ClassNode, EvalError> {
        let (name, name_id) = if let TokenKind::Identifier(_) = self.peek_kind() {
            let (name, _) = self.expect_identifier()?;
            let id = self.next_id();
            (Some(name), Some(id))
        } else {
            (None, None)
        };

        let superclass = if self.match_keyword(Keyword::Extends) {
            Some(Box::new(self.call_or_new()?))
        } else {
            None
        };

        self.expect(&TokenKind::LBrace, "'{' to start class body")?;
        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.match_kind(&TokenKind::Semicolon) {
                continue;
            }
            let is_static = self.match_keyword(Keyword::Static);

            if self.check_keyword(Keyword::Get) && !self.next_is_paren_or_colon() {
                self.advance();
                let key = self.property_key()?;
                let func = self.function_tail(FunctionKind::Getter)?;
                members.push(ClassMember {
                    key,
                    is_static,
                    kind: ClassMemberKind::Getter,
                    func,
                });
                continue;
            }
            if self.check_keyword(Keyword::Set) && !self.next_is_paren_or_colon() {
                self.advance();
                let key = self.property_key()?;
                let func = self.function_tail(FunctionKind::Setter)?;
                members.push(ClassMember {
                    key,
                    is_static,
                    kind: ClassMemberKind::Setter,
                    func,
                });
                continue;
            }

            let key = self.property_key()?;
            let is_ctor = matches!(&key, PropertyKey::Static(n) if n == "constructor");
            let func_kind = if is_ctor {
                FunctionKind::Constructor
            } else {
                FunctionKind::Method
            };
            let func = self.function_tail(func_kind)?;
            members.push(ClassMember {
                key,
                is_static,
                kind: ClassMemberKind::Method,
                func,
            });
        }
        self.expect(&TokenKind::RBrace, "'}' to close class body")?;

        Ok(ClassNode {
            name,
            name_id,
            superclass,
            members,
        })
    }

    fn next_is_paren_or_colon(&self) -> bool {
        matches!(
            self.tokens.get(self.current + 1).map(|t| &t.kind),
            Some(TokenKind::LParen) | Some(TokenKind::Colon) | Some(TokenKind::Comma) | Some(TokenKind::RBrace)
        )
    }
}
