/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Expression evaluation (spec.md §4.1 "Expressions"): one handler per
 * `ast::Expr` kind, dispatching to the Environment for identifier/`this`
 * lookups, to `helpers.rs` for property access and argument evaluation,
 * to `calls.rs` for invocation, and to `classes.rs` for `new`/class
 * expressions.
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

use crate::ast::{Expr, ObjectProperty, PropertyKey};
use crate::environment::Frame;
use crate::interpreter::Evaluator;
use crate::operators::{apply_binary, apply_unary, compound_to_binary};
use crate::signals::{EvalResult, Signal};
use crate::value::{compile_regex, ObjectData, Value};

type FrameRef = Rc<RefCell<Frame>>;

impl Evaluator {
    pub(crate) fn eval_expr(&self, expr: &Expr, frame: &FrameRef) -> EvalResult {
        match expr {
            Expr::NumberLiteral(n) => Ok(Value::Number(*n)),
            Expr::StringLiteral(s) => Ok(Value::Str(s.clone())),
            Expr::BoolLiteral(b) => Ok(Value::Bool(*b)),
            Expr::NullLiteral => Ok(Value::Null),
            Expr::UndefinedLiteral => Ok(Value::Undefined),
            Expr::InfinityLiteral => Ok(Value::Number(f64::INFINITY)),

            Expr::TemplateLiteral { quasis, exprs } => {
                let mut out = String::new();
                for (i, quasi) in quasis.iter().enumerate() {
                    out.push_str(quasi);
                    if let Some(e) = exprs.get(i) {
                        out.push_str(&self.eval_expr(e, frame)?.stringify());
                    }
                }
                Ok(Value::Str(out))
            }

            Expr::RegexLiteral { pattern, flags } => match compile_regex(pattern, flags) {
                Ok(regex) => Ok(Value::Regex(Rc::new(regex))),
                Err(e) => Err(self.type_error(format!("invalid regular expression: {e}"), expr.span())),
            },

            Expr::Identifier { name, id } => self.lookup_identifier(name, *id, frame),

            Expr::This { .. } => Ok(self.ctx.borrow().current_this()),

            Expr::ArrayLiteral { elements } => {
                let values = self.eval_array_elements(elements, frame)?;
                Ok(Value::Array(Rc::new(RefCell::new(values))))
            }

            Expr::ObjectLiteral { properties } => self.eval_object_literal(properties, frame),

            Expr::FunctionExpr(node) => Ok(self.make_function_value(node, frame, None)),
            Expr::ArrowExpr(node) => {
                let captured_this = self.ctx.borrow().current_this();
                Ok(self.make_function_value(node, frame, Some(captured_this)))
            }
            Expr::ClassExpr(node) => self.eval_class(node, frame),

            Expr::Member { object, property, span } => {
                let object_value = self.eval_expr(object, frame)?;
                let key = self.resolve_key(property, frame)?;
                self.get_property(&object_value, &key, *span)
            }

            Expr::Call { callee, arguments, span } => {
                let (receiver, callee_value) = self.eval_callee(callee, frame)?;
                let args = self.eval_arguments(arguments, frame)?;
                self.invoke(&callee_value, args, receiver, *span)
            }

            Expr::New { callee, arguments, span } => {
                let callee_value = self.eval_expr(callee, frame)?;
                let args = self.eval_arguments(arguments, frame)?;
                match &callee_value {
                    Value::Class(class) => self.construct(class, args, *span),
                    Value::Function(f) => {
                        // spec.md §4.1 "New": an interpreter function is a
                        // constructor too — a fresh instance is the receiver,
                        // the function body runs with that instance as
                        // `this`, and an explicit object return (the same
                        // convention as the native-constructor arm below)
                        // wins over the fresh instance.
                        let instance = Value::Object(Rc::new(RefCell::new(ObjectData::default())));
                        let result = self.invoke_function(f, args, Some(instance.clone()))?;
                        Ok(match result {
                            Value::Object(_) => result,
                            _ => instance,
                        })
                    }
                    Value::NativeFunction(native) => {
                        // Native constructor convention (SPEC_FULL.md §9): a
                        // fresh empty instance is the receiver; the callable's
                        // own return is used if it returns an object, else the
                        // fresh instance.
                        let instance = Value::Object(Rc::new(RefCell::new(ObjectData::default())));
                        let result = (native.func)(&args)?;
                        Ok(match result {
                            Value::Object(_) => result,
                            _ => instance,
                        })
                    }
                    other => Err(self.type_error(
                        format!("{} is not a constructor", other.type_name()),
                        *span,
                    )),
                }
            }

            Expr::Assign { target, value, span } => {
                let value = self.eval_expr(value, frame)?;
                self.assign_to_target(target, value, frame, *span)
            }

            Expr::CompoundAssign { target, operator, value, span } => {
                let current = self.eval_expr(target, frame)?;
                let rhs = self.eval_expr(value, frame)?;
                let binary_op = compound_to_binary(operator);
                let next = apply_binary(binary_op, current, rhs, *span)
                    .map_err(|e| Signal::Throw(e.into_thrown_value()))?;
                self.assign_to_target(target, next, frame, *span)
            }

            Expr::Update { target, operator, prefix, span } => {
                let current = self.eval_expr(target, frame)?;
                let current_num = current.as_number_coerced().ok_or_else(|| {
                    self.type_error(
                        format!("cannot convert a value of type '{}' to a number", current.type_name()),
                        *span,
                    )
                })?;
                let next_num = if operator == "++" { current_num + 1.0 } else { current_num - 1.0 };
                let next = Value::Number(next_num);
                self.assign_to_target(target, next, frame, *span)?;
                Ok(if *prefix { Value::Number(next_num) } else { Value::Number(current_num) })
            }

            Expr::Binary { left, operator, right, span } => {
                let left_value = self.eval_expr(left, frame)?;
                if operator == "in" {
                    let right_value = self.eval_expr(right, frame)?;
                    let key = left_value.stringify();
                    return Ok(Value::Bool(self.enumerable_keys(&right_value).contains(&key)));
                }
                let right_value = self.eval_expr(right, frame)?;
                apply_binary(operator, left_value, right_value, *span)
                    .map_err(|e| Signal::Throw(e.into_thrown_value()))
            }

            Expr::Logical { left, operator, right } => {
                let left_value = self.eval_expr(left, frame)?;
                match operator.as_str() {
                    "&&" => {
                        if left_value.is_truthy() {
                            self.eval_expr(right, frame)
                        } else {
                            Ok(left_value)
                        }
                    }
                    "||" => {
                        if left_value.is_truthy() {
                            Ok(left_value)
                        } else {
                            self.eval_expr(right, frame)
                        }
                    }
                    other => Err(self.type_error(
                        format!("unsupported logical operator '{other}'"),
                        expr.span(),
                    )),
                }
            }

            Expr::Sequence { left, right } => {
                self.eval_expr(left, frame)?;
                self.eval_expr(right, frame)
            }

            Expr::Unary { operator, operand, span } => {
                if operator == "typeof" {
                    if let Expr::Identifier { name, id } = operand.as_ref() {
                        return match self.lookup_identifier(name, *id, frame) {
                            Ok(value) => Ok(Value::Str(value.type_of().to_string())),
                            Err(Signal::Throw(_)) => Ok(Value::Str("undefined".to_string())),
                            Err(other) => Err(other),
                        };
                    }
                    let value = self.eval_expr(operand, frame)?;
                    return Ok(Value::Str(value.type_of().to_string()));
                }
                let value = self.eval_expr(operand, frame)?;
                apply_unary(operator, value, *span).map_err(|e| Signal::Throw(e.into_thrown_value()))
            }

            Expr::Conditional { test, consequent, alternate } => {
                if self.eval_expr(test, frame)?.is_truthy() {
                    self.eval_expr(consequent, frame)
                } else {
                    self.eval_expr(alternate, frame)
                }
            }

            Expr::Grouping(inner) => self.eval_expr(inner, frame),

            Expr::Unsupported { description, span } => {
                if self.skip_unsupported {
                    Ok(Value::Undefined)
                } else {
                    Err(self.type_error(format!("unsupported construct: {description}"), *span))
                }
            }
        }
    }

    /// Identifier lookup (spec.md §4.1 "Identifier"): a resolved lexical
    /// binding is read from the frame chain; an unresolved name falls
    /// through to the ambient context stack by textual name; otherwise
    /// a reference error.
    fn lookup_identifier(&self, name: &str, id: crate::ast::NodeId, frame: &FrameRef) -> EvalResult {
        match self.scope.get(id) {
            Some(var_id) => Ok(Frame::lookup(frame, var_id).unwrap_or(Value::Undefined)),
            None => match self.ctx.borrow().ambient_lookup(name) {
                Some(value) => Ok(value),
                None => Err(self.reference_error(format!("'{name}' is not defined"), crate::span::Span::default())),
            },
        }
    }

    /// Resolves a static or computed property key to its string form.
    fn resolve_key(&self, key: &PropertyKey, frame: &FrameRef) -> Result<String, Signal> {
        match key {
            PropertyKey::Static(name) => Ok(name.clone()),
            PropertyKey::Computed(expr) => Ok(self.eval_expr(expr, frame)?.stringify()),
        }
    }

    /// Evaluates a call's callee, splitting out the receiver a member
    /// access implies (spec.md §4.1 "Call": "if the callee is a member
    /// access, the receiver is the object, otherwise the current
    /// context").
    fn eval_callee(&self, callee: &Expr, frame: &FrameRef) -> Result<(Option<Value>, Value), Signal> {
        match callee {
            Expr::Member { object, property, span } => {
                let object_value = self.eval_expr(object, frame)?;
                let key = self.resolve_key(property, frame)?;
                let callee_value = self.get_property(&object_value, &key, *span)?;
                Ok((Some(object_value), callee_value))
            }
            other => {
                let callee_value = self.eval_expr(other, frame)?;
                Ok((Some(self.ctx.borrow().current_this()), callee_value))
            }
        }
    }

    /// Writes a value to an assignment/update/compound-assignment target
    /// (spec.md §4.1 "Assignment": identifier, computed member, static
    /// member).
    fn assign_to_target(
        &self,
        target: &Expr,
        value: Value,
        frame: &FrameRef,
        span: crate::span::Span,
    ) -> EvalResult {
        match target {
            Expr::Identifier { name, id } => {
                self.assign_identifier(name, *id, value.clone(), frame, span)?;
                Ok(value)
            }
            Expr::Member { object, property, span: member_span } => {
                let object_value = self.eval_expr(object, frame)?;
                let key = self.resolve_key(property, frame)?;
                self.set_property(&object_value, &key, value.clone(), *member_span)?;
                Ok(value)
            }
            other => Err(self.type_error(
                format!("invalid assignment target: {:?}", other),
                span,
            )),
        }
    }

    /// Object literal construction (spec.md §4.1 "Object literal"): data/
    /// shorthand/method properties install directly; getter/setter
    /// members accumulate into shared accessor slots keyed by name.
    fn eval_object_literal(&self, properties: &[ObjectProperty], frame: &FrameRef) -> EvalResult {
        let data = Rc::new(RefCell::new(ObjectData::default()));
        for prop in properties {
            match prop {
                ObjectProperty::Data { key, value } => {
                    let key = self.resolve_key(key, frame)?;
                    let value = self.eval_expr(value, frame)?;
                    data.borrow_mut().set_data(&key, value);
                }
                ObjectProperty::Shorthand { name, id } => {
                    let value = self.lookup_identifier(name, *id, frame)?;
                    data.borrow_mut().set_data(name, value);
                }
                ObjectProperty::Method { key, func } => {
                    let key = self.resolve_key(key, frame)?;
                    let value = self.make_function_value(func, frame, None);
                    data.borrow_mut().set_data(&key, value);
                }
                ObjectProperty::Getter { key, func } => {
                    let key = self.resolve_key(key, frame)?;
                    let value = self.make_function_value(func, frame, None);
                    data.borrow_mut().merge_accessor(&key, Some(value), None);
                }
                ObjectProperty::Setter { key, func } => {
                    let key = self.resolve_key(key, frame)?;
                    let value = self.make_function_value(func, frame, None);
                    data.borrow_mut().merge_accessor(&key, None, Some(value));
                }
                ObjectProperty::Spread(expr) => {
                    let spread_value = self.eval_expr(expr, frame)?;
                    if let Value::Object(source) = &spread_value {
                        let source = source.borrow();
                        for key in source.own_keys() {
                            if let Some(crate::value::Property::Data(v)) = source.get_own(&key) {
                                data.borrow_mut().set_data(&key, v.clone());
                            }
                        }
                    }
                }
            }
        }
        Ok(Value::Object(data))
    }
}
