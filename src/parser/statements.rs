/*
 * ============================================================================
 * PAWX - Code with Claws!
 * ============================================================================
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
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ============================================================================
 */

use crate::ast::{CatchClause, DeclKind, Declarator, ForInit, FunctionKind, Stmt};
use crate::error::EvalError;
use crate::lexer::token::{Keyword, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    pub(crate) fn statement(&mut self) -> Result<Stmt, EvalError> {
        match self.peek_kind().clone() {
            TokenKind::Keyword(Keyword::Var) => self.var_decl(DeclKind::Var),
            TokenKind::Keyword(Keyword::Let) => self.var_decl(DeclKind::Let),
            TokenKind::Keyword(Keyword::Const) => self.var_decl(DeclKind::Const),
            TokenKind::Keyword(Keyword::Function) => self.function_decl(),
            TokenKind::Keyword(Keyword::Class) => {
                self.advance();
                Ok(Stmt::ClassDecl(self.class_tail()?))
            }
            TokenKind::Keyword(Keyword::Return) => self.return_stmt(),
            TokenKind::LBrace => {
                self.advance();
                Ok(Stmt::Block(self.parse_block()?))
            }
            TokenKind::Keyword(Keyword::If) => self.if_stmt(),
            TokenKind::Keyword(Keyword::While) => self.while_stmt(),
            TokenKind::Keyword(Keyword::Do) => self.do_while_stmt(),
            TokenKind::Keyword(Keyword::For) => self.for_stmt(),
            TokenKind::Keyword(Keyword::Break) => {
                let span = self.here();
                self.advance();
                self.consume_semicolon();
                Ok(Stmt::Break(span))
            }
            TokenKind::Keyword(Keyword::Continue) => {
                let span = self.here();
                self.advance();
                self.consume_semicolon();
                Ok(Stmt::Continue(span))
            }
            TokenKind::Keyword(Keyword::Throw) => self.throw_stmt(),
            TokenKind::Keyword(Keyword::Try) => self.try_stmt(),
            TokenKind::Keyword(Keyword::Debugger) => {
                self.advance();
                self.consume_semicolon();
                Ok(Stmt::Debugger)
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(Stmt::Empty)
            }
            _ => self.expr_stmt(),
        }
    }

    fn consume_semicolon(&mut self) {
        self.match_kind(&TokenKind::Semicolon);
    }

    fn expr_stmt(&mut self) -> Result<Stmt, EvalError> {
        let expr = self.sequence()?;
        self.consume_semicolon();
        Ok(Stmt::Expression(expr))
    }

    fn declarators(&mut self) -> Result<Vec<Declarator>, EvalError> {
        let mut declarators = Vec::new();
        loop {
            let target = self.binding_target()?;
            let init = if self.match_kind(&TokenKind::Assign) {
                Some(self.assignment()?)
            } else {
                None
            };
            declarators.push(Declarator { target, init });
            if !self.match_kind(&TokenKind::Comma) {
                break;
            }
        }
        Ok(declarators)
    }

    fn var_decl(&mut self, kind: DeclKind) -> Result<Stmt, EvalError> {
        self.advance();
        let declarators = self.declarators()?;
        self.consume_semicolon();
        Ok(Stmt::VarDecl { kind, declarators })
    }

    fn function_decl(&mut self) -> Result<Stmt, EvalError> {
        self.advance();
        let (name, _) = self.expect_identifier()?;
        let name_id = self.next_id();
        let mut func = self.function_tail(FunctionKind::Function)?;
        func.name = Some(name);
        func.name_id = Some(name_id);
        Ok(Stmt::FunctionDecl(func))
    }

    fn return_stmt(&mut self) -> Result<Stmt, EvalError> {
        let span = self.here();
        self.advance();
        let value = if self.check(&TokenKind::Semicolon) || self.check(&TokenKind::RBrace) {
            None
        } else {
            Some(self.sequence()?)
        };
        self.consume_semicolon();
        Ok(Stmt::Return(value, span))
    }

    fn if_stmt(&mut self) -> Result<Stmt, EvalError> {
        self.advance();
        self.expect(&TokenKind::LParen, "'(' after 'if'")?;
        let test = self.sequence()?;
        self.expect(&TokenKind::RParen, "')' after if condition")?;
        let consequent = Box::new(self.statement()?);
        let alternate = if self.match_keyword(Keyword::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            test,
            consequent,
            alternate,
        })
    }

    fn while_stmt(&mut self) -> Result<Stmt, EvalError> {
        self.advance();
        self.expect(&TokenKind::LParen, "'(' after 'while'")?;
        let test = self.sequence()?;
        self.expect(&TokenKind::RParen, "')' after while condition")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { test, body })
    }

    fn do_while_stmt(&mut self) -> Result<Stmt, EvalError> {
        self.advance();
        let body = Box::new(self.statement()?);
        self.expect(&TokenKind::Keyword(Keyword::While), "'while' after do body")?;
        self.expect(&TokenKind::LParen, "'(' after 'while'")?;
        let test = self.sequence()?;
        self.expect(&TokenKind::RParen, "')' after while condition")?;
        self.consume_semicolon();
        Ok(Stmt::DoWhile { body, test })
    }

    /// `for (...)` — disambiguates the four loop forms by looking past
    /// the declared/targeted binding for `in` or `of` before committing
    /// to the classic three-clause form.
    fn for_stmt(&mut self) -> Result<Stmt, EvalError> {
        self.advance();
        self.expect(&TokenKind::LParen, "'(' after 'for'")?;

        let decl_kind = if self.match_keyword(Keyword::Var) {
            Some(DeclKind::Var)
        } else if self.match_keyword(Keyword::Let) {
            Some(DeclKind::Let)
        } else if self.match_keyword(Keyword::Const) {
            Some(DeclKind::Const)
        } else {
            None
        };

        if decl_kind.is_some() || matches!(self.peek_kind(), TokenKind::Identifier(_)) {
            let checkpoint = self.current;
            let target = self.binding_target()?;
            if self.match_keyword(Keyword::In) {
                let object = self.sequence()?;
                self.expect(&TokenKind::RParen, "')' after for-in object")?;
                let body = Box::new(self.statement()?);
                return Ok(Stmt::ForIn {
                    kind: decl_kind,
                    target,
                    object,
                    body,
                });
            }
            if self.match_keyword(Keyword::Of) {
                let iterable = self.sequence()?;
                self.expect(&TokenKind::RParen, "')' after for-of iterable")?;
                let body = Box::new(self.statement()?);
                return Ok(Stmt::ForOf {
                    kind: decl_kind,
                    target,
                    iterable,
                    body,
                });
            }
            // Not a for-in/for-of after all: rewind and parse the
            // classic three-clause header (it may have an initializer
            // with multiple declarators, which `binding_target` alone
            // does not cover).
            self.current = checkpoint;
        }

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if let Some(kind) = decl_kind {
            let declarators = self.declarators()?;
            Some(ForInit::VarDecl { kind, declarators })
        } else {
            Some(ForInit::Expr(self.sequence()?))
        };
        self.expect(&TokenKind::Semicolon, "';' after for-loop initializer")?;

        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.sequence()?)
        };
        self.expect(&TokenKind::Semicolon, "';' after for-loop condition")?;

        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.sequence()?)
        };
        self.expect(&TokenKind::RParen, "')' after for-loop clauses")?;

        let body = Box::new(self.statement()?);
        Ok(Stmt::For {
            init,
            test,
            update,
            body,
        })
    }

    fn throw_stmt(&mut self) -> Result<Stmt, EvalError> {
        let span = self.here();
        self.advance();
        let value = self.sequence()?;
        self.consume_semicolon();
        Ok(Stmt::Throw(value, span))
    }

    fn try_stmt(&mut self) -> Result<Stmt, EvalError> {
        self.advance();
        self.expect(&TokenKind::LBrace, "'{' to start try block")?;
        let block = self.parse_block()?;

        let handler = if self.match_keyword(Keyword::Catch) {
            let param = if self.match_kind(&TokenKind::LParen) {
                let target = self.binding_target()?;
                self.expect(&TokenKind::RParen, "')' after catch parameter")?;
                Some(target)
            } else {
                None
            };
            self.expect(&TokenKind::LBrace, "'{' to start catch block")?;
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };

        let finalizer = if self.match_keyword(Keyword::Finally) {
            self.expect(&TokenKind::LBrace, "'{' to start finally block")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(EvalError::unsupported(
                "'try' requires a 'catch' or 'finally' clause",
                self.here(),
            ));
        }

        Ok(Stmt::Try {
            block,
            handler,
            finalizer,
        })
    }
}
