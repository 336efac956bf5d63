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

//! The scope analyser (spec.md §6 "Scope analyser contract", SPEC_FULL §9
//! item 9). Walks a parsed [`Program`] once, before evaluation, and
//! produces a [`ScopeMap`] from every name-bearing [`NodeId`] to the
//! [`VariableId`] it resolves to. The evaluator never computes scopes
//! itself — it only consumes this map (spec.md §1 "Out of scope").
//!
//! Lexical scopes nest in a stack, Lox-resolver style
//! (`declare`/`resolve_local` over a stack of name maps), but two kinds
//! of scope exist: `Function` scopes are hoist targets for `var`;
//! `Block` scopes are not. A name unresolved after walking every scope
//! on the stack is left unmapped — the evaluator treats that as a
//! reference into the ambient context (spec.md §4.1 "Identifier").

use std::collections::HashMap;

use crate::ast::{
    BindingTarget, ClassNode, Expr, ForInit, FunctionBody, FunctionNode, NodeId, ObjectProperty,
    Param, Program, Stmt,
};
use crate::environment::VariableId;

/// The result of scope analysis: every occurrence's `NodeId` mapped to
/// the `VariableId` token it shares with its declaration.
#[derive(Debug, Default)]
pub struct ScopeMap {
    resolved: HashMap<NodeId, VariableId>,
}

impl ScopeMap {
    pub fn get(&self, id: NodeId) -> Option<VariableId> {
        self.resolved.get(&id).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Function,
    Block,
}

struct Scope {
    kind: ScopeKind,
    names: HashMap<String, VariableId>,
}

struct Resolver {
    scopes: Vec<Scope>,
    map: HashMap<NodeId, VariableId>,
    next_var: u32,
}

impl Resolver {
    fn new() -> Self {
        Self {
            scopes: Vec::new(),
            map: HashMap::new(),
            next_var: 0,
        }
    }

    fn mint(&mut self) -> VariableId {
        let id = VariableId(self.next_var);
        self.next_var += 1;
        id
    }

    fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope {
            kind,
            names: HashMap::new(),
        });
    }

    fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Declares `name` in the innermost scope, minting a fresh token
    /// unless the name is already declared there (re-declaration, e.g.
    /// re-visiting a hoisted `var` statement in source order).
    fn declare_here(&mut self, name: &str, node: NodeId) -> VariableId {
        let top = self.scopes.len() - 1;
        if let Some(existing) = self.scopes[top].names.get(name) {
            let id = *existing;
            self.map.insert(node, id);
            return id;
        }
        let id = self.mint();
        self.scopes[top].names.insert(name.to_string(), id);
        self.map.insert(node, id);
        id
    }

    /// Declares `name` at the nearest enclosing `Function` scope (a
    /// `var` declarator, spec.md §4.1 hoisting). Reuses the existing
    /// token if the name was hoisted there already.
    fn declare_var(&mut self, name: &str, node: NodeId) -> VariableId {
        let target = self
            .scopes
            .iter()
            .rposition(|s| s.kind == ScopeKind::Function)
            .unwrap_or(0);
        if let Some(existing) = self.scopes[target].names.get(name) {
            let id = *existing;
            self.map.insert(node, id);
            return id;
        }
        let id = self.mint();
        self.scopes[target].names.insert(name.to_string(), id);
        self.map.insert(node, id);
        id
    }

    /// Resolves a read/write occurrence of `name`, walking the scope
    /// stack innermost-out. Leaves the node unmapped (ambient fallback)
    /// if no lexical scope declares it.
    fn resolve_occurrence(&mut self, name: &str, node: NodeId) {
        for scope in self.scopes.iter().rev() {
            if let Some(id) = scope.names.get(name) {
                self.map.insert(node, *id);
                return;
            }
        }
    }

    fn visit_program(&mut self, program: &Program) {
        self.push(ScopeKind::Function);
        self.hoist_var_decls(&program.body);
        self.hoist_function_decls(&program.body);
        for stmt in &program.body {
            self.visit_stmt(stmt);
        }
        self.pop();
    }

    /// Recursively collects every `var` declarator reachable from
    /// `stmts` without crossing a function/arrow/class boundary, and
    /// declares each one at the current (function) scope — spec.md
    /// §4.1 "pre-declare `var` bindings", hoisted past nested blocks,
    /// loops, and `if`/`try` bodies to the enclosing function or script.
    fn hoist_var_decls(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.hoist_var_decls_stmt(stmt);
        }
    }

    fn hoist_var_decls_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                kind: crate::ast::DeclKind::Var,
                declarators,
            } => {
                for d in declarators {
                    if let BindingTarget::Identifier { name, id } = &d.target {
                        self.declare_var(name, *id);
                    }
                }
            }
            Stmt::Block(body) => self.hoist_var_decls(body),
            Stmt::If {
                consequent,
                alternate,
                ..
            } => {
                self.hoist_var_decls_stmt(consequent);
                if let Some(alt) = alternate {
                    self.hoist_var_decls_stmt(alt);
                }
            }
            Stmt::While { body, .. } | Stmt::DoWhile { body, .. } => {
                self.hoist_var_decls_stmt(body)
            }
            Stmt::For { init, body, .. } => {
                if let Some(ForInit::VarDecl {
                    kind: crate::ast::DeclKind::Var,
                    declarators,
                }) = init
                {
                    for d in declarators {
                        if let BindingTarget::Identifier { name, id } = &d.target {
                            self.declare_var(name, *id);
                        }
                    }
                }
                self.hoist_var_decls_stmt(body);
            }
            Stmt::ForIn {
                kind: Some(crate::ast::DeclKind::Var),
                target,
                body,
                ..
            }
            | Stmt::ForOf {
                kind: Some(crate::ast::DeclKind::Var),
                target,
                body,
                ..
            } => {
                if let BindingTarget::Identifier { name, id } = target {
                    self.declare_var(name, *id);
                }
                self.hoist_var_decls_stmt(body);
            }
            Stmt::ForIn { body, .. } | Stmt::ForOf { body, .. } => {
                self.hoist_var_decls_stmt(body)
            }
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                self.hoist_var_decls(block);
                if let Some(h) = handler {
                    self.hoist_var_decls(&h.body);
                }
                if let Some(f) = finalizer {
                    self.hoist_var_decls(f);
                }
            }
            _ => {}
        }
    }

    /// Shallow pass: function declarations are block-scoped (spec.md
    /// §4.1 "install function declarations as bindings of their
    /// names"), so only the statements directly in this block are
    /// considered — nested blocks hoist their own when visited.
    fn hoist_function_decls(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            if let Stmt::FunctionDecl(f) = stmt {
                if let Some(id) = f.name_id {
                    self.declare_here(f.name.as_deref().unwrap_or(""), id);
                }
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(e) => self.visit_expr(e),
            Stmt::VarDecl { declarators, .. } => {
                for d in declarators {
                    if let Some(init) = &d.init {
                        self.visit_expr(init);
                    }
                    if let BindingTarget::Identifier { name, id } = &d.target {
                        // `var` was already declared during hoisting;
                        // `let`/`const` declare fresh in the current
                        // (block) scope at the point of the statement.
                        if self.resolve_if_hoisted(*id, name) {
                            continue;
                        }
                        self.declare_here(name, *id);
                    }
                }
            }
            Stmt::FunctionDecl(f) => self.visit_function(f),
            Stmt::ClassDecl(c) => self.visit_class(c, true),
            Stmt::Return(Some(e), _) => self.visit_expr(e),
            Stmt::Return(None, _) => {}
            Stmt::Block(body) => {
                self.push(ScopeKind::Block);
                self.hoist_function_decls(body);
                for s in body {
                    self.visit_stmt(s);
                }
                self.pop();
            }
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                self.visit_expr(test);
                self.visit_stmt(consequent);
                if let Some(alt) = alternate {
                    self.visit_stmt(alt);
                }
            }
            Stmt::While { test, body } => {
                self.visit_expr(test);
                self.visit_stmt(body);
            }
            Stmt::DoWhile { body, test } => {
                self.visit_stmt(body);
                self.visit_expr(test);
            }
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                self.push(ScopeKind::Block);
                if let Some(init) = init {
                    match init {
                        ForInit::VarDecl { kind, declarators } => {
                            for d in declarators {
                                if let Some(e) = &d.init {
                                    self.visit_expr(e);
                                }
                                if let BindingTarget::Identifier { name, id } = &d.target {
                                    if *kind == crate::ast::DeclKind::Var {
                                        self.resolve_occurrence(name, *id);
                                    } else {
                                        self.declare_here(name, *id);
                                    }
                                }
                            }
                        }
                        ForInit::Expr(e) => self.visit_expr(e),
                    }
                }
                if let Some(t) = test {
                    self.visit_expr(t);
                }
                if let Some(u) = update {
                    self.visit_expr(u);
                }
                self.visit_stmt(body);
                self.pop();
            }
            Stmt::ForIn {
                kind,
                target,
                object,
                body,
            } => {
                self.visit_expr(object);
                self.push(ScopeKind::Block);
                self.bind_loop_target(kind, target);
                self.visit_stmt(body);
                self.pop();
            }
            Stmt::ForOf {
                kind,
                target,
                iterable,
                body,
            } => {
                self.visit_expr(iterable);
                self.push(ScopeKind::Block);
                self.bind_loop_target(kind, target);
                self.visit_stmt(body);
                self.pop();
            }
            Stmt::Break(_) | Stmt::Continue(_) => {}
            Stmt::Throw(e, _) => self.visit_expr(e),
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                self.push(ScopeKind::Block);
                self.hoist_function_decls(block);
                for s in block {
                    self.visit_stmt(s);
                }
                self.pop();
                if let Some(h) = handler {
                    self.push(ScopeKind::Block);
                    if let Some(BindingTarget::Identifier { name, id }) = &h.param {
                        self.declare_here(name, *id);
                    }
                    self.hoist_function_decls(&h.body);
                    for s in &h.body {
                        self.visit_stmt(s);
                    }
                    self.pop();
                }
                if let Some(f) = finalizer {
                    self.push(ScopeKind::Block);
                    self.hoist_function_decls(f);
                    for s in f {
                        self.visit_stmt(s);
                    }
                    self.pop();
                }
            }
            Stmt::Empty | Stmt::Debugger | Stmt::Unsupported { .. } => {}
        }
    }

    fn bind_loop_target(&mut self, kind: &Option<crate::ast::DeclKind>, target: &BindingTarget) {
        if let BindingTarget::Identifier { name, id } = target {
            match kind {
                Some(crate::ast::DeclKind::Var) | None => self.resolve_occurrence(name, *id),
                Some(_) => {
                    self.declare_here(name, *id);
                }
            }
        }
    }

    /// A `var` declarator's target was already minted and mapped during
    /// the function-level hoisting pre-pass; `let`/`const` declarators
    /// have not been visited yet at this point, so an already-present
    /// mapping for this node distinguishes the two.
    fn resolve_if_hoisted(&mut self, node: NodeId, _name: &str) -> bool {
        self.map.contains_key(&node)
    }

    fn visit_function(&mut self, f: &FunctionNode) {
        self.push(ScopeKind::Function);
        for p in &f.params {
            self.visit_param(p);
        }
        match &f.body {
            FunctionBody::Block(body) => {
                self.hoist_var_decls(body);
                self.hoist_function_decls(body);
                for s in body {
                    self.visit_stmt(s);
                }
            }
            FunctionBody::Expression(e) => self.visit_expr(e),
        }
        self.pop();
    }

    fn visit_param(&mut self, p: &Param) {
        if let Some(d) = &p.default {
            self.visit_expr(d);
        }
        if let BindingTarget::Identifier { name, id } = &p.target {
            self.declare_here(name, *id);
        }
    }

    fn visit_class(&mut self, c: &ClassNode, as_decl: bool) {
        if as_decl {
            if let (Some(name), Some(id)) = (&c.name, c.name_id) {
                self.declare_here(name, id);
            }
        }
        if let Some(sup) = &c.superclass {
            self.visit_expr(sup);
        }
        for member in &c.members {
            if let crate::ast::PropertyKey::Computed(e) = &member.key {
                self.visit_expr(e);
            }
            self.visit_function(&member.func);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::NumberLiteral(_)
            | Expr::StringLiteral(_)
            | Expr::BoolLiteral(_)
            | Expr::NullLiteral
            | Expr::UndefinedLiteral
            | Expr::InfinityLiteral
            | Expr::RegexLiteral { .. } => {}
            Expr::TemplateLiteral { exprs, .. } => {
                for e in exprs {
                    self.visit_expr(e);
                }
            }
            Expr::Identifier { name, id } => self.resolve_occurrence(name, *id),
            Expr::This { .. } => {}
            Expr::ArrayLiteral { elements } => {
                for el in elements {
                    match el {
                        crate::ast::ArrayElement::Item(e) | crate::ast::ArrayElement::Spread(e) => {
                            self.visit_expr(e)
                        }
                        crate::ast::ArrayElement::Hole => {}
                    }
                }
            }
            Expr::ObjectLiteral { properties } => {
                for p in properties {
                    match p {
                        ObjectProperty::Data { key, value } => {
                            self.visit_key(key);
                            self.visit_expr(value);
                        }
                        ObjectProperty::Shorthand { name, id } => {
                            self.resolve_occurrence(name, *id)
                        }
                        ObjectProperty::Method { key, func }
                        | ObjectProperty::Getter { key, func }
                        | ObjectProperty::Setter { key, func } => {
                            self.visit_key(key);
                            self.visit_function(func);
                        }
                        ObjectProperty::Spread(e) => self.visit_expr(e),
                    }
                }
            }
            Expr::FunctionExpr(f) | Expr::ArrowExpr(f) => self.visit_function(f),
            Expr::ClassExpr(c) => self.visit_class(c, false),
            Expr::Member { object, property, .. } => {
                self.visit_expr(object);
                self.visit_key(property);
            }
            Expr::Call { callee, arguments, .. } | Expr::New { callee, arguments, .. } => {
                self.visit_expr(callee);
                for a in arguments {
                    match a {
                        crate::ast::Argument::Item(e) | crate::ast::Argument::Spread(e) => {
                            self.visit_expr(e)
                        }
                    }
                }
            }
            Expr::Assign { target, value, .. } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            Expr::CompoundAssign { target, value, .. } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            Expr::Update { target, .. } => self.visit_expr(target),
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Logical { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Sequence { left, right } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.visit_expr(test);
                self.visit_expr(consequent);
                self.visit_expr(alternate);
            }
            Expr::Grouping(e) => self.visit_expr(e),
            Expr::Unsupported { .. } => {}
        }
    }

    fn visit_key(&mut self, key: &crate::ast::PropertyKey) {
        if let crate::ast::PropertyKey::Computed(e) = key {
            self.visit_expr(e);
        }
    }
}

/// Runs scope analysis over a complete parsed program (spec.md §6
/// "Scope analyser contract").
pub fn analyze(program: &Program) -> ScopeMap {
    let mut resolver = Resolver::new();
    resolver.visit_program(program);
    ScopeMap {
        resolved: resolver.map,
    }
}
