/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Interpreter Entry & Runtime Bootstrap
 * -------------------------------------
 * This module is the primary runtime entrypoint for the evaluator. It
 * owns the `Evaluator` struct (scope map + context stack, spec.md §2
 * items 2-3) and the two library entry points from spec.md §6:
 * `interpret_source` and `interpret_tree`. Actual node-by-node
 * evaluation is delegated to the sibling submodules:
 *
 *  - statements.rs  -> statement execution, hoisting, loops, try/catch
 *  - expressions.rs -> expression evaluation
 *  - calls.rs       -> function/constructor invocation
 *  - classes.rs     -> class construction and instance behavior
 *  - display.rs     -> value formatting for the CLI driver
 *  - helpers.rs     -> property access, argument/spread evaluation
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

pub mod calls;
pub mod classes;
pub mod display;
pub mod expressions;
pub mod helpers;
pub mod statements;

use std::cell::RefCell;
use std::rc::Rc;

use crate::ambient::AmbientContext;
use crate::ast::Program;
use crate::environment::{ContextFrame, ContextStack, Frame};
use crate::error::TopLevelError;
use crate::scope::ScopeMap;
use crate::signals::Signal;
use crate::value::Value;

/// The evaluator instance (spec.md §3 "process-wide per evaluator
/// instance"). Owns the scope map produced by the external scope
/// analyser and the Context Stack of active `this`/ambient frames;
/// the Binding Store itself is the chain of [`Frame`]s threaded
/// explicitly through every call rather than stored here, since each
/// activation's frame is scoped to the call that owns it.
pub struct Evaluator {
    pub(crate) scope: ScopeMap,
    pub(crate) ctx: RefCell<ContextStack>,
    /// spec.md §4.1 / §7: "Unsupported kinds either raise an
    /// unsupported-construct error or, if configured to skip, return
    /// undefined". Defaults to `false` (raise) for every entry point
    /// below except the explicit `_skip_unsupported` variants.
    pub(crate) skip_unsupported: bool,
}

impl Evaluator {
    fn new(scope: ScopeMap, skip_unsupported: bool) -> Self {
        Self {
            scope,
            ctx: RefCell::new(ContextStack::new()),
            skip_unsupported,
        }
    }
}

/// Parses source text and evaluates it (spec.md §6 "interpretSource").
pub fn interpret_source(source: &str, context: AmbientContext) -> Result<Value, TopLevelError> {
    interpret_source_with_options(source, context, false)
}

/// `interpret_source`, with the skip-unsupported policy explicit
/// (spec.md §7).
pub fn interpret_source_with_options(
    source: &str,
    context: AmbientContext,
    skip_unsupported: bool,
) -> Result<Value, TopLevelError> {
    let program = crate::parser::parse(source).map_err(TopLevelError::Parse)?;
    interpret_tree_with_options(&program, context, skip_unsupported)
}

/// Evaluates an already-parsed AST against an ambient context (spec.md
/// §6 "interpretTree"): runs the scope analyser, pushes `context` as
/// the outermost receiver/ambient record, and evaluates the top-level
/// block.
pub fn interpret_tree(program: &Program, context: AmbientContext) -> Result<Value, TopLevelError> {
    interpret_tree_with_options(program, context, false)
}

/// `interpret_tree`, with the skip-unsupported policy explicit.
pub fn interpret_tree_with_options(
    program: &Program,
    context: AmbientContext,
    skip_unsupported: bool,
) -> Result<Value, TopLevelError> {
    let scope = crate::scope::analyze(program);
    let evaluator = Evaluator::new(scope, skip_unsupported);

    // spec.md §6: "`this` at the top level is this record" — the
    // outermost receiver is an object view of the same ambient bindings
    // installed as the name-lookup fallback below.
    let this_value = crate::value::plain_object(context.bindings.clone());

    evaluator.ctx.borrow_mut().push(ContextFrame {
        this_value: Some(this_value),
        ambient: Some(Rc::new(context.bindings)),
    });

    let root = Frame::new(None);
    let result = evaluator.exec_block(&program.body, &root);
    evaluator.ctx.borrow_mut().pop();

    match result {
        Ok(value) => Ok(value),
        Err(Signal::Return(value)) => Ok(value),
        Err(Signal::Throw(value)) => Err(TopLevelError::Uncaught(value)),
        Err(Signal::Break) => Err(TopLevelError::MalformedControlFlow(
            crate::error::EvalError::malformed_control_flow(
                "'break' used outside of any loop",
                crate::span::Span::default(),
            ),
        )),
        Err(Signal::Continue) => Err(TopLevelError::MalformedControlFlow(
            crate::error::EvalError::malformed_control_flow(
                "'continue' used outside of any loop",
                crate::span::Span::default(),
            ),
        )),
    }
}
