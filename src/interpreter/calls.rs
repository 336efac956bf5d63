/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Function invocation (spec.md §4.3 "Interpreter callable execution"):
 * binds formal parameters, pushes a context record, evaluates the body,
 * and reports the return value back out through a Normal completion
 * rather than a `Signal::Return` escaping to the caller.
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

use crate::ast::{BindingTarget, FunctionBody, FunctionKind, FunctionNode};
use crate::environment::{ContextFrame, Frame};
use crate::interpreter::Evaluator;
use crate::signals::{EvalResult, Signal};
use crate::span::Span;
use crate::value::{FunctionValue, Value};

type FrameRef = Rc<RefCell<Frame>>;

impl Evaluator {
    /// Builds an interpreter callable closing over `frame` (spec.md §3
    /// "interpreter callable capturing ... lexical environment snapshot").
    /// `captured_this` is set only for arrow callables (spec.md §4.1
    /// "Arrow expression ... captures the enclosing `this`").
    pub(crate) fn make_function_value(
        &self,
        node: &FunctionNode,
        frame: &FrameRef,
        captured_this: Option<Value>,
    ) -> Value {
        Value::Function(Rc::new(FunctionValue {
            node: Rc::new(node.clone()),
            closure: frame.clone(),
            captured_this,
        }))
    }

    /// Dispatches a call to a host or interpreter callable (spec.md §4.1
    /// "Call": "interpreter callables invoke §4.3 Function execution; host
    /// callables invoke host call ... other values raise a type error").
    pub(crate) fn invoke(
        &self,
        callee: &Value,
        args: Vec<Value>,
        receiver: Option<Value>,
        span: Span,
    ) -> EvalResult {
        match callee {
            Value::Function(f) => self.invoke_function(f, args, receiver),
            Value::NativeFunction(native) => (native.func)(&args),
            Value::Class(class) => self.construct(class, args, span),
            other => Err(self.type_error(format!("{} is not callable", other.type_name()), span)),
        }
    }

    /// Interpreter callable execution (spec.md §4.3, steps 1-5).
    pub(crate) fn invoke_function(
        &self,
        f: &Rc<FunctionValue>,
        args: Vec<Value>,
        receiver: Option<Value>,
    ) -> EvalResult {
        let is_arrow = f.node.kind == FunctionKind::Arrow;

        // Step 1: push a context record. A non-arrow installs the
        // callsite receiver; an arrow re-installs the `this` it captured
        // at creation time rather than the callsite receiver (spec.md §3
        // "`this` inside an arrow ... never the callsite receiver").
        self.ctx.borrow_mut().push(ContextFrame {
            this_value: Some(if is_arrow {
                f.captured_this.clone().unwrap_or(Value::Undefined)
            } else {
                receiver.unwrap_or(Value::Undefined)
            }),
            ambient: None,
        });

        let call_frame = Frame::new(Some(f.closure.clone()));

        let result = (|| -> EvalResult {
            // Step 2: bind formal parameters, evaluating defaults for
            // argument slots absent or `undefined` (spec.md §4.3 step 2).
            for (i, param) in f.node.params.iter().enumerate() {
                let arg = args.get(i).cloned().unwrap_or(Value::Undefined);
                let value = if matches!(arg, Value::Undefined) {
                    match &param.default {
                        Some(default_expr) => self.eval_expr(default_expr, &call_frame)?,
                        None => Value::Undefined,
                    }
                } else {
                    arg
                };

                match &param.target {
                    BindingTarget::Identifier { id, .. } => {
                        if let Some(var_id) = self.scope.get(*id) {
                            Frame::declare(&call_frame, var_id, value);
                        }
                    }
                    BindingTarget::Unsupported(description) => {
                        if !self.skip_unsupported {
                            return Err(self.type_error(
                                format!("unsupported parameter target: {description}"),
                                Span::default(),
                            ));
                        }
                    }
                }
            }

            // Step 4: evaluate the body. An arrow's expression body is
            // its return value directly; a block body's return value is
            // either a `Signal::Return` payload or undefined.
            match &f.node.body {
                FunctionBody::Expression(expr) => self.eval_expr(expr, &call_frame),
                FunctionBody::Block(stmts) => match self.exec_block(stmts, &call_frame) {
                    Ok(_) => Ok(Value::Undefined),
                    Err(Signal::Return(value)) => Ok(value),
                    Err(other) => Err(other),
                },
            }
        })();

        // Step 5: pop the context record and yield.
        self.ctx.borrow_mut().pop();

        result
    }
}
