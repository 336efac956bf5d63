/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Statement execution: hoisting, sequencing, loops, and try/catch/finally
 * (spec.md §4.1 "Statements"/"Loops", §9 "try/finally interaction").
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

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{BindingTarget, DeclKind, ForInit, Stmt};
use crate::environment::{assign_or_error, Frame};
use crate::interpreter::Evaluator;
use crate::signals::{EvalResult, Signal};
use crate::value::Value;

type FrameRef = Rc<RefCell<Frame>>;

impl Evaluator {
    /// Runs a block's two-phase hoist (spec.md §4.1 "pre-declare `var`
    /// bindings ... then install function declarations") and executes its
    /// statements in order against the *same* activation `frame`.
    ///
    /// Blocks do not get their own `Frame` — a function call gets exactly
    /// one (spec.md §3 "Conceptually a single mapping from Variable tokens
    /// to current values"). Re-entering a block (a loop body on its next
    /// iteration) re-runs this hoist, which is why a function declaration
    /// inside a loop body is rebound fresh on each pass.
    pub(crate) fn exec_block(&self, stmts: &[Stmt], frame: &FrameRef) -> EvalResult {
        self.hoist_block(stmts, frame)?;
        let mut last = Value::Undefined;
        for stmt in stmts {
            last = self.exec_stmt(stmt, frame)?;
        }
        Ok(last)
    }

    /// Declares every `var`-hoisted binding reachable from `stmts` (without
    /// crossing a function/arrow/class boundary) as `undefined` if it is
    /// not already bound in this frame, then installs every directly
    /// nested function declaration as a callable binding.
    fn hoist_block(&self, stmts: &[Stmt], frame: &FrameRef) -> Result<(), Signal> {
        for stmt in stmts {
            self.hoist_vars_in_stmt(stmt, frame);
        }
        for stmt in stmts {
            if let Stmt::FunctionDecl(f) = stmt {
                if let Some(name_id) = f.name_id {
                    if let Some(var_id) = self.scope.get(name_id) {
                        let value = self.make_function_value(f, frame, None);
                        Frame::declare(frame, var_id, value);
                    }
                }
            }
        }
        Ok(())
    }

    fn hoist_vars_in_stmt(&self, stmt: &Stmt, frame: &FrameRef) {
        match stmt {
            Stmt::VarDecl {
                kind: DeclKind::Var,
                declarators,
            } => {
                for d in declarators {
                    if let BindingTarget::Identifier { id, .. } = &d.target {
                        if let Some(var_id) = self.scope.get(*id) {
                            if !Frame::has_own(frame, var_id) {
                                Frame::declare(frame, var_id, Value::Undefined);
                            }
                        }
                    }
                }
            }
            Stmt::Block(body) => {
                for s in body {
                    self.hoist_vars_in_stmt(s, frame);
                }
            }
            Stmt::If {
                consequent,
                alternate,
                ..
            } => {
                self.hoist_vars_in_stmt(consequent, frame);
                if let Some(alt) = alternate {
                    self.hoist_vars_in_stmt(alt, frame);
                }
            }
            Stmt::While { body, .. } | Stmt::DoWhile { body, .. } => {
                self.hoist_vars_in_stmt(body, frame)
            }
            Stmt::For { init, body, .. } => {
                if let Some(ForInit::VarDecl {
                    kind: DeclKind::Var,
                    declarators,
                }) = init
                {
                    for d in declarators {
                        if let BindingTarget::Identifier { id, .. } = &d.target {
                            if let Some(var_id) = self.scope.get(*id) {
                                if !Frame::has_own(frame, var_id) {
                                    Frame::declare(frame, var_id, Value::Undefined);
                                }
                            }
                        }
                    }
                }
                self.hoist_vars_in_stmt(body, frame);
            }
            Stmt::ForIn {
                kind: Some(DeclKind::Var),
                target,
                body,
                ..
            }
            | Stmt::ForOf {
                kind: Some(DeclKind::Var),
                target,
                body,
                ..
            } => {
                if let BindingTarget::Identifier { id, .. } = target {
                    if let Some(var_id) = self.scope.get(*id) {
                        if !Frame::has_own(frame, var_id) {
                            Frame::declare(frame, var_id, Value::Undefined);
                        }
                    }
                }
                self.hoist_vars_in_stmt(body, frame);
            }
            Stmt::ForIn { body, .. } | Stmt::ForOf { body, .. } => {
                self.hoist_vars_in_stmt(body, frame)
            }
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                for s in block {
                    self.hoist_vars_in_stmt(s, frame);
                }
                if let Some(h) = handler {
                    for s in &h.body {
                        self.hoist_vars_in_stmt(s, frame);
                    }
                }
                if let Some(f) = finalizer {
                    for s in f {
                        self.hoist_vars_in_stmt(s, frame);
                    }
                }
            }
            _ => {}
        }
    }

    pub(crate) fn exec_stmt(&self, stmt: &Stmt, frame: &FrameRef) -> EvalResult {
        match stmt {
            Stmt::Expression(e) => self.eval_expr(e, frame),

            Stmt::VarDecl { declarators, .. } => {
                for d in declarators {
                    let value = match &d.init {
                        Some(init) => self.eval_expr(init, frame)?,
                        None => Value::Undefined,
                    };
                    match &d.target {
                        BindingTarget::Identifier { id, .. } => {
                            if let Some(var_id) = self.scope.get(*id) {
                                Frame::declare(frame, var_id, value);
                            }
                        }
                        BindingTarget::Unsupported(description) => {
                            if !self.skip_unsupported {
                                return Err(self.type_error(
                                    format!("unsupported declaration target: {description}"),
                                    crate::span::Span::default(),
                                ));
                            }
                        }
                    }
                }
                Ok(Value::Undefined)
            }

            // Already installed by the enclosing block's hoist pass.
            Stmt::FunctionDecl(_) => Ok(Value::Undefined),

            Stmt::ClassDecl(c) => {
                let value = self.eval_class(c, frame)?;
                if let Some(name_id) = c.name_id {
                    if let Some(var_id) = self.scope.get(name_id) {
                        Frame::declare(frame, var_id, value);
                    }
                }
                Ok(Value::Undefined)
            }

            Stmt::Return(expr, _) => {
                let value = match expr {
                    Some(e) => self.eval_expr(e, frame)?,
                    None => Value::Undefined,
                };
                Err(Signal::Return(value))
            }

            Stmt::Block(body) => self.exec_block(body, frame),

            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(test, frame)?.is_truthy() {
                    self.exec_stmt(consequent, frame)
                } else if let Some(alt) = alternate {
                    self.exec_stmt(alt, frame)
                } else {
                    Ok(Value::Undefined)
                }
            }

            Stmt::While { test, body } => {
                let mut last = Value::Undefined;
                while self.eval_expr(test, frame)?.is_truthy() {
                    match self.exec_stmt(body, frame) {
                        Ok(v) => last = v,
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => continue,
                        Err(other) => return Err(other),
                    }
                }
                Ok(last)
            }

            Stmt::DoWhile { body, test } => {
                let mut last = Value::Undefined;
                loop {
                    match self.exec_stmt(body, frame) {
                        Ok(v) => last = v,
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => {}
                        Err(other) => return Err(other),
                    }
                    if !self.eval_expr(test, frame)?.is_truthy() {
                        break;
                    }
                }
                Ok(last)
            }

            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                if let Some(init) = init {
                    match init {
                        ForInit::VarDecl { declarators, .. } => {
                            for d in declarators {
                                let value = match &d.init {
                                    Some(e) => self.eval_expr(e, frame)?,
                                    None => Value::Undefined,
                                };
                                match &d.target {
                                    BindingTarget::Identifier { id, .. } => {
                                        if let Some(var_id) = self.scope.get(*id) {
                                            Frame::declare(frame, var_id, value);
                                        }
                                    }
                                    BindingTarget::Unsupported(description) => {
                                        if !self.skip_unsupported {
                                            return Err(self.type_error(
                                                format!("unsupported declaration target: {description}"),
                                                crate::span::Span::default(),
                                            ));
                                        }
                                    }
                                }
                            }
                        }
                        ForInit::Expr(e) => {
                            self.eval_expr(e, frame)?;
                        }
                    }
                }

                let mut last = Value::Undefined;
                loop {
                    if let Some(t) = test {
                        if !self.eval_expr(t, frame)?.is_truthy() {
                            break;
                        }
                    }
                    match self.exec_stmt(body, frame) {
                        Ok(v) => last = v,
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => {}
                        Err(other) => return Err(other),
                    }
                    if let Some(u) = update {
                        self.eval_expr(u, frame)?;
                    }
                }
                Ok(last)
            }

            Stmt::ForIn {
                kind,
                target,
                object,
                body,
            } => {
                let object_value = self.eval_expr(object, frame)?;
                let keys = self.enumerable_keys(&object_value);
                let mut last = Value::Undefined;
                for key in keys {
                    self.bind_loop_value(kind, target, Value::Str(key), frame)?;
                    match self.exec_stmt(body, frame) {
                        Ok(v) => last = v,
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => continue,
                        Err(other) => return Err(other),
                    }
                }
                Ok(last)
            }

            Stmt::ForOf {
                kind,
                target,
                iterable,
                body,
            } => {
                let iterable_value = self.eval_expr(iterable, frame)?;
                let items = self.iterate_values(&iterable_value)?;
                let mut last = Value::Undefined;
                for item in items {
                    self.bind_loop_value(kind, target, item, frame)?;
                    match self.exec_stmt(body, frame) {
                        Ok(v) => last = v,
                        Err(Signal::Break) => break,
                        Err(Signal::Continue) => continue,
                        Err(other) => return Err(other),
                    }
                }
                Ok(last)
            }

            Stmt::Break(_) => Err(Signal::Break),
            Stmt::Continue(_) => Err(Signal::Continue),

            Stmt::Throw(e, _) => {
                let value = self.eval_expr(e, frame)?;
                Err(Signal::Throw(value))
            }

            Stmt::Try {
                block,
                handler,
                finalizer,
            } => self.exec_try(block, handler, finalizer, frame),

            Stmt::Empty | Stmt::Debugger => Ok(Value::Undefined),

            Stmt::Unsupported { description, span } => {
                if self.skip_unsupported {
                    Ok(Value::Undefined)
                } else {
                    Err(self.type_error(format!("unsupported construct: {description}"), *span))
                }
            }
        }
    }

    /// `try`/`catch`/`finally`. A normally-completing `finally` never
    /// overrides whatever the `try`/`catch` half produced — it only gets
    /// the chance to *replace* the outcome if it itself throws, returns,
    /// breaks, or continues (spec.md §9 "try/finally interaction",
    /// resolved in favor of host-correct semantics rather than letting a
    /// normal finalizer swallow a pending `return`).
    fn exec_try(
        &self,
        block: &[crate::ast::Stmt],
        handler: &Option<crate::ast::CatchClause>,
        finalizer: &Option<Vec<crate::ast::Stmt>>,
        frame: &FrameRef,
    ) -> EvalResult {
        let outcome = match self.exec_block(block, frame) {
            Err(Signal::Throw(thrown)) => {
                if let Some(h) = handler {
                    let binding_error = match &h.param {
                        Some(BindingTarget::Identifier { id, .. }) => {
                            if let Some(var_id) = self.scope.get(*id) {
                                Frame::declare(frame, var_id, thrown);
                            }
                            None
                        }
                        Some(BindingTarget::Unsupported(description)) if !self.skip_unsupported => {
                            Some(self.type_error(
                                format!("unsupported catch parameter target: {description}"),
                                crate::span::Span::default(),
                            ))
                        }
                        Some(BindingTarget::Unsupported(_)) | None => None,
                    };

                    match binding_error {
                        Some(err) => Err(err),
                        None => self.exec_block(&h.body, frame),
                    }
                } else {
                    Err(Signal::Throw(thrown))
                }
            }
            other => other,
        };

        match finalizer {
            Some(fin) => match self.exec_block(fin, frame) {
                Ok(_) => outcome,
                abrupt => abrupt,
            },
            None => outcome,
        }
    }

    /// Binds one iteration's value to a `for-in`/`for-of` loop target: a
    /// fresh declaration for a `let`/`const`/`var` head, or an assignment
    /// to an already-resolved binding (or ambient name) for a bare target.
    fn bind_loop_value(
        &self,
        kind: &Option<DeclKind>,
        target: &BindingTarget,
        value: Value,
        frame: &FrameRef,
    ) -> Result<(), Signal> {
        let (name, id) = match target {
            BindingTarget::Identifier { name, id } => (name.as_str(), *id),
            BindingTarget::Unsupported(description) => {
                return if self.skip_unsupported {
                    Ok(())
                } else {
                    Err(self.type_error(
                        format!("unsupported loop binding target: {description}"),
                        crate::span::Span::default(),
                    ))
                }
            }
        };

        match kind {
            Some(_) => {
                if let Some(var_id) = self.scope.get(id) {
                    Frame::declare(frame, var_id, value);
                }
                Ok(())
            }
            None => self.assign_identifier(name, id, value, frame, crate::span::Span::default()),
        }
    }

    /// Writes to a bare identifier target shared by assignment expressions
    /// and bare `for-in`/`for-of` loop targets: a resolved lexical binding
    /// is assigned through the frame chain; an unresolved name has no
    /// ambient write path, so it is a reference error (spec.md §4.1
    /// "Identifier" — the ambient record is a read-only fallback).
    pub(crate) fn assign_identifier(
        &self,
        name: &str,
        id: crate::ast::NodeId,
        value: Value,
        frame: &FrameRef,
        span: crate::span::Span,
    ) -> Result<(), Signal> {
        match self.scope.get(id) {
            Some(var_id) => assign_or_error(frame, var_id, value, span)
                .map_err(|e| Signal::Throw(e.into_thrown_value())),
            None => Err(self.reference_error(format!("'{name}' is not declared"), span)),
        }
    }
}
