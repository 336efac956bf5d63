/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Core Recursive-Descent Parser Entry Point
 *
 * This file defines the primary `Parser` structure and the public `parse()`
 * driver function used to transform source text into a full `ast::Program`.
 *
 * The parsing implementation itself is split across multiple modules:
 * - `statements.rs`   -> Statement-level grammar (`if`, `while`, `function`, ...)
 * - `expressions.rs`  -> Expression grammar & operator precedence
 * - `helpers.rs`      -> Token matching, consumption, and navigation utilities
 *
 * This file serves as the **root coordinator** of the parsing process.
 *
 * --------------------------------------------------------------------------
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

use crate::ast::{NodeId, NodeIdGen, Program};
use crate::error::EvalError;
use crate::lexer::token::Token;
use crate::lexer::tokenize;

/// The PAWX recursive-descent parser.
///
/// Grammar logic lives in the sibling `statements`/`expressions`/`helpers`
/// modules via additional `impl Parser` blocks; this file only owns the
/// cursor state and the top-level entry point.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    pub(crate) ids: NodeIdGen,
}

/// Parses a complete source unit into a `Program`.
pub fn parse(source: &str) -> Result<Program, EvalError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        current: 0,
        ids: NodeIdGen::new(),
    };
    parser.parse_program()
}

impl Parser {
    /// Parses the entire token stream into a list of top-level statements.
    pub(crate) fn parse_program(&mut self) -> Result<Program, EvalError> {
        let mut body = Vec::new();
        while !self.is_at_end() {
            body.push(self.statement()?);
        }
        Ok(Program { body })
    }

    pub(crate) fn next_id(&mut self) -> NodeId {
        self.ids.next()
    }

    /// Re-lexes and parses a standalone expression (used for `${ ... }`
    /// template interpolations, whose raw source the lexer deferred).
    /// Reuses `self.ids` so identity stamps stay unique across the whole
    /// program, including inside nested templates.
    pub(crate) fn parse_sub_expr(&mut self, source: &str) -> Result<crate::ast::Expr, EvalError> {
        let tokens = tokenize(source)?;
        let saved_tokens = std::mem::replace(&mut self.tokens, tokens);
        let saved_current = std::mem::replace(&mut self.current, 0);
        let result = self.sequence();
        self.tokens = saved_tokens;
        self.current = saved_current;
        result
    }
}
