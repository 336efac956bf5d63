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

use crate::ast::{BindingTarget, ClassNode, Expr, FunctionNode};
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

/// One `target = init` pair inside a `var`/`let`/`const` declaration.
#[derive(Debug, Clone)]
pub struct Declarator {
    pub target: BindingTarget,
    pub init: Option<Expr>,
}

/// The head of a C-style `for` loop's initializer clause.
#[derive(Debug, Clone)]
pub enum ForInit {
    VarDecl {
        kind: DeclKind,
        declarators: Vec<Declarator>,
    },
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub param: Option<BindingTarget>,
    pub body: Vec<Stmt>,
}

/// All executable statements (spec.md §4.1).
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(Expr),

    VarDecl {
        kind: DeclKind,
        declarators: Vec<Declarator>,
    },

    FunctionDecl(FunctionNode),
    ClassDecl(ClassNode),

    Return(Option<Expr>, Span),

    Block(Vec<Stmt>),

    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },

    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    For {
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    /// `for (<decl or target> in <object>) <body>` — iterates the
    /// object's own enumerable string keys (spec.md §9 "for-in
    /// enumeration order").
    ForIn {
        kind: Option<DeclKind>,
        target: BindingTarget,
        object: Expr,
        body: Box<Stmt>,
    },
    /// `for (<decl or target> of <iterable>) <body>` — iterates array
    /// elements in index order.
    ForOf {
        kind: Option<DeclKind>,
        target: BindingTarget,
        iterable: Expr,
        body: Box<Stmt>,
    },

    Break(Span),
    Continue(Span),

    Throw(Expr, Span),
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },

    Empty,
    /// `debugger;` — parses but is a no-op; there is no attached debug
    /// facility to break into.
    Debugger,

    /// An AST node kind the parser recognized but the evaluator does not
    /// implement (spec.md §7).
    Unsupported { description: String, span: Span },
}
