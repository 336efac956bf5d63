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

use crate::ast::{ClassNode, FunctionNode, NodeId};
use crate::span::Span;

/// An argument in a call or `new` expression — either a plain item or a
/// `...expr` spread (spec.md §4.1).
#[derive(Debug, Clone)]
pub enum Argument {
    Item(Expr),
    Spread(Expr),
}

/// An element in an array literal: a plain item, an elision (`[1, , 3]`),
/// or a `...expr` spread (spec.md §4.1).
#[derive(Debug, Clone)]
pub enum ArrayElement {
    Item(Expr),
    Hole,
    Spread(Expr),
}

/// The key of an object property or a member access: either a fixed
/// name known at parse time, or a `[computed]` expression evaluated at
/// runtime (spec.md §4.1).
#[derive(Debug, Clone)]
pub enum PropertyKey {
    Static(String),
    Computed(Box<Expr>),
}

/// One entry in an object literal (spec.md §4.1).
#[derive(Debug, Clone)]
pub enum ObjectProperty {
    Data {
        key: PropertyKey,
        value: Expr,
    },
    /// `{ x }` — sugar for `{ x: x }`, still resolved through the scope
    /// analyser since it reads a binding.
    Shorthand {
        name: String,
        id: NodeId,
    },
    Method {
        key: PropertyKey,
        func: FunctionNode,
    },
    Getter {
        key: PropertyKey,
        func: FunctionNode,
    },
    Setter {
        key: PropertyKey,
        func: FunctionNode,
    },
    Spread(Expr),
}

#[derive(Debug, Clone)]
pub enum Expr {
    NumberLiteral(f64),
    StringLiteral(String),
    BoolLiteral(bool),
    NullLiteral,
    UndefinedLiteral,
    /// The `Infinity` literal, carried separately from a regular
    /// identifier lookup (spec.md §4.1 "literal" node kind).
    InfinityLiteral,
    TemplateLiteral {
        /// String segments; `quasis.len() == exprs.len() + 1`.
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },
    RegexLiteral {
        pattern: String,
        flags: String,
    },

    Identifier {
        name: String,
        id: NodeId,
    },
    This {
        id: NodeId,
    },

    ArrayLiteral {
        elements: Vec<ArrayElement>,
    },
    ObjectLiteral {
        properties: Vec<ObjectProperty>,
    },

    FunctionExpr(FunctionNode),
    ArrowExpr(FunctionNode),
    ClassExpr(ClassNode),

    /// `object.name` or `object[expr]`.
    Member {
        object: Box<Expr>,
        property: PropertyKey,
        span: Span,
    },

    Call {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
        span: Span,
    },
    New {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
        span: Span,
    },

    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
        span: Span,
    },
    /// `+=`, `-=`, `*=`, … — desugared at evaluation time into a read of
    /// `target`, the binary op, then a write back to `target`.
    CompoundAssign {
        target: Box<Expr>,
        operator: String,
        value: Box<Expr>,
        span: Span,
    },
    /// `++x` / `x++` / `--x` / `x--`.
    Update {
        target: Box<Expr>,
        operator: String,
        prefix: bool,
        span: Span,
    },

    Binary {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
        span: Span,
    },
    /// `&&` and `||` — the right operand is a lazy thunk so the
    /// evaluator can short-circuit (spec.md §9 "Lazy binary operands").
    Logical {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
    },
    /// The comma operator — both operands always evaluate, left then
    /// right, and the expression's value is the right operand's.
    Sequence {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        operator: String,
        operand: Box<Expr>,
        span: Span,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },

    Grouping(Box<Expr>),

    /// An AST node kind the parser recognized but the evaluator does not
    /// implement (spec.md §7 "Unsupported-construct errors"). Carried as
    /// data, not rejected at parse time, so the evaluator's
    /// skip-vs-raise policy governs what happens when control reaches it.
    Unsupported {
        description: String,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Member { span, .. }
            | Expr::Call { span, .. }
            | Expr::New { span, .. }
            | Expr::Assign { span, .. }
            | Expr::CompoundAssign { span, .. }
            | Expr::Update { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Unsupported { span, .. } => *span,
            _ => Span::default(),
        }
    }
}
