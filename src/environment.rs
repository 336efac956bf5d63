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

//! The Binding Store (spec.md §2 item 2, §4.2) and Context Stack
//! (spec.md §3 "Context Stack").
//!
//! Bindings are keyed by the opaque [`VariableId`] tokens the scope
//! analyser hands out per declaration site — never by name — so two
//! `x` bindings in different scopes never collide even though they
//! share a lexeme. A `Frame` is one activation's slice of the store;
//! frames chain to their lexical parent, and a closure keeps the chain
//! alive for as long as it is reachable (spec.md §3 "Closure
//! liveness").

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::EvalError;
use crate::span::Span;
use crate::value::Value;

/// Opaque identity token for one lexical binding, minted by the scope
/// analyser (spec.md §3 "Variable Identity"). Two bindings that share a
/// name but not a declaration site get distinct tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub u32);

/// One activation record in the Binding Store: the scope's own
/// bindings plus a link to its lexically enclosing frame. Bindings are
/// stored behind `Rc<RefCell<Value>>` rather than by value so a closure
/// that captures this frame observes later mutations from other
/// owners of the same cell (spec.md §3 "Closure liveness").
#[derive(Debug)]
pub struct Frame {
    bindings: HashMap<VariableId, Rc<RefCell<Value>>>,
    parent: Option<Rc<RefCell<Frame>>>,
}

impl Frame {
    pub fn new(parent: Option<Rc<RefCell<Frame>>>) -> Rc<RefCell<Frame>> {
        Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent,
        }))
    }

    /// Introduces a new binding in this frame, initialized to `value`.
    /// Re-declaring the same `VariableId` (e.g. re-evaluating a `var`
    /// hoist) overwrites the existing cell in place.
    pub fn declare(frame: &Rc<RefCell<Frame>>, id: VariableId, value: Value) {
        frame
            .borrow_mut()
            .bindings
            .insert(id, Rc::new(RefCell::new(value)));
    }

    /// Reads a binding, walking outward through parent frames.
    pub fn lookup(frame: &Rc<RefCell<Frame>>, id: VariableId) -> Option<Value> {
        let this = frame.borrow();
        if let Some(cell) = this.bindings.get(&id) {
            return Some(cell.borrow().clone());
        }
        match &this.parent {
            Some(parent) => Frame::lookup(parent, id),
            None => None,
        }
    }

    /// Writes through to the frame that owns `id`, walking outward.
    /// Returns `false` if no frame in the chain owns this binding —
    /// callers should treat that as an internal-consistency error,
    /// since the scope analyser only ever targets bindings it minted.
    pub fn assign(frame: &Rc<RefCell<Frame>>, id: VariableId, value: Value) -> bool {
        let found = frame.borrow().bindings.contains_key(&id);
        if found {
            let this = frame.borrow();
            *this.bindings.get(&id).unwrap().borrow_mut() = value;
            return true;
        }
        let parent = frame.borrow().parent.clone();
        match parent {
            Some(parent) => Frame::assign(&parent, id, value),
            None => false,
        }
    }

    pub fn has_own(frame: &Rc<RefCell<Frame>>, id: VariableId) -> bool {
        frame.borrow().bindings.contains_key(&id)
    }
}

/// One entry in the Context Stack: the active `this` receiver for a
/// function-call activation, plus ambient name-to-value fallback
/// bindings that only the outermost context installs (spec.md §3
/// "Context Stack", §4.2 "ambient context").
#[derive(Debug, Clone, Default)]
pub struct ContextFrame {
    pub this_value: Option<Value>,
    pub ambient: Option<Rc<HashMap<String, Value>>>,
}

/// Stack of active call contexts. Arrow functions never push a frame
/// here (spec.md §3 "arrow ... never the callsite receiver") — they
/// instead carry a captured `ContextFrame` snapshot on the
/// [`crate::value::FunctionValue`] itself.
#[derive(Debug, Default)]
pub struct ContextStack {
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, frame: ContextFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// The receiver for the innermost context frame, or `Undefined`
    /// when no context has installed one (top-level `this`).
    pub fn current_this(&self) -> Value {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.this_value.clone())
            .unwrap_or(Value::Undefined)
    }

    /// Ambient fallback lookup for a bare identifier that resolved to
    /// no lexical binding at all (spec.md §4.1 "Identifier").
    pub fn ambient_lookup(&self, name: &str) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.ambient.as_ref().and_then(|a| a.get(name).cloned()))
    }
}

/// Helper surfaced to the evaluator: treats a missing/failed write as
/// an internal-consistency `EvalError` rather than a silent no-op.
pub fn assign_or_error(frame: &Rc<RefCell<Frame>>, id: VariableId, value: Value, span: Span) -> Result<(), EvalError> {
    if Frame::assign(frame, id, value) {
        Ok(())
    } else {
        Err(EvalError::reference_error(
            "assignment to a binding the scope analyser did not resolve",
            span,
        ))
    }
}
