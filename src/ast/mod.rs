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

//! The syntax tree produced by the parser and consumed by the scope
//! analyser and the evaluator.

pub mod class;
pub mod expr;
pub mod param;
pub mod stmt;

pub use class::{ClassMember, ClassMemberKind, ClassNode};
pub use expr::{Argument, Expr, ObjectProperty, PropertyKey};
pub use param::{BindingTarget, Param};
pub use stmt::{CatchClause, DeclKind, Declarator, ForInit, Stmt};

/// Identity stamp assigned by the parser to every name-bearing node
/// (identifiers, declarators, parameters, function/class names, `this`).
///
/// The scope analyser keys its `ScopeMap` by `NodeId` rather than by
/// source text, so two lexically distinct `x`s never collide and a
/// single name can resolve to different bindings at different call
/// sites, exactly as a resolver pass over a real AST requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Hands out monotonically increasing `NodeId`s while parsing a single
/// source unit. The parser owns one of these and stamps every node as
/// it is built.
#[derive(Debug, Default)]
pub struct NodeIdGen {
    next: u32,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// The whole of a parsed source unit.
#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Shape shared by function declarations, function expressions, arrow
/// expressions, methods, getters, constructors, and setters — spec.md
/// §4.1's "function or arrow" node kind plus the class-member forms of
/// §4.3 all reduce to this one struct with a different `FunctionKind`.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub name: Option<String>,
    pub name_id: Option<NodeId>,
    pub params: Vec<Param>,
    pub body: FunctionBody,
    pub kind: FunctionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Arrow,
    Method,
    Constructor,
    Getter,
    Setter,
}

/// An arrow expression's body may be a block or a single expression
/// whose value is implicitly returned (spec.md §4.1).
#[derive(Debug, Clone)]
pub enum FunctionBody {
    Block(Vec<Stmt>),
    Expression(Box<Expr>),
}
