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

//! Shared plumbing used by both the statement and expression evaluators:
//! property get/set (spec.md §4.1 "Static/Computed member"), argument
//! list evaluation with spread inlining, and `for-in`/`for-of` key
//! enumeration (spec.md §4.1 "Loops").

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::{Argument, ArrayElement};
use crate::interpreter::Evaluator;
use crate::signals::Signal;
use crate::span::Span;
use crate::value::{Property, Value};

impl Evaluator {
    /// Evaluates a call/`new` argument list, inlining `...expr` spreads
    /// in place (spec.md §4.1 "Call": "Evaluate arguments (spread
    /// inlined)").
    pub(crate) fn eval_arguments(
        &self,
        arguments: &[Argument],
        frame: &Rc<RefCell<crate::environment::Frame>>,
    ) -> Result<Vec<Value>, Signal> {
        let mut out = Vec::with_capacity(arguments.len());
        for arg in arguments {
            match arg {
                Argument::Item(e) => out.push(self.eval_expr(e, frame)?),
                Argument::Spread(e) => {
                    let value = self.eval_expr(e, frame)?;
                    out.extend(self.iterate_values(&value)?);
                }
            }
        }
        Ok(out)
    }

    /// Evaluates an array literal's elements, inlining spreads and
    /// carrying holes through as `Value::Null` slots (spec.md §4.1
    /// "Array literal": "a null element slot remains null (a hole)").
    pub(crate) fn eval_array_elements(
        &self,
        elements: &[ArrayElement],
        frame: &Rc<RefCell<crate::environment::Frame>>,
    ) -> Result<Vec<Value>, Signal> {
        let mut out = Vec::with_capacity(elements.len());
        for el in elements {
            match el {
                ArrayElement::Item(e) => out.push(self.eval_expr(e, frame)?),
                ArrayElement::Hole => out.push(Value::Null),
                ArrayElement::Spread(e) => {
                    let value = self.eval_expr(e, frame)?;
                    out.extend(self.iterate_values(&value)?);
                }
            }
        }
        Ok(out)
    }

    /// The values a spread or `for-of` walks: array elements in index
    /// order. Anything else is a type error — this evaluator does not
    /// model a general iterator protocol (spec.md §1 Non-goals).
    pub(crate) fn iterate_values(&self, value: &Value) -> Result<Vec<Value>, Signal> {
        match value {
            Value::Array(items) => Ok(items.borrow().clone()),
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            other => Err(self.type_error(
                format!("{} is not iterable", other.type_name()),
                Span::default(),
            )),
        }
    }

    /// Own enumerable string keys in insertion order, used by `for-in`
    /// (spec.md §4.1 "for-in": "iterate over its enumerable string
    /// keys"). Arrays enumerate their index strings.
    pub(crate) fn enumerable_keys(&self, value: &Value) -> Vec<String> {
        match value {
            Value::Array(items) => (0..items.borrow().len()).map(|i| i.to_string()).collect(),
            Value::Object(data) => data.borrow().own_keys(),
            _ => Vec::new(),
        }
    }

    /// Reads a named property off a value, walking a class instance's
    /// prototype chain for methods (spec.md §9 "Prototype-style
    /// inheritance"). Invokes an accessor's getter if present.
    pub(crate) fn get_property(
        &self,
        object: &Value,
        key: &str,
        span: Span,
    ) -> Result<Value, Signal> {
        match object {
            Value::Object(data) => {
                let resolved = self.lookup_own_or_proto(&Value::Object(data.clone()), key);
                match resolved {
                    Some(Property::Data(v)) => Ok(v),
                    Some(Property::Accessor { get: Some(getter), .. }) => {
                        self.invoke(&getter, Vec::new(), Some(object.clone()), span)
                    }
                    Some(Property::Accessor { get: None, .. }) => Ok(Value::Undefined),
                    None => Ok(Value::Undefined),
                }
            }
            Value::Array(items) => {
                if key == "length" {
                    return Ok(Value::Number(items.borrow().len() as f64));
                }
                if let Ok(index) = key.parse::<usize>() {
                    return Ok(items.borrow().get(index).cloned().unwrap_or(Value::Undefined));
                }
                Ok(Value::Undefined)
            }
            Value::Str(s) => {
                if key == "length" {
                    return Ok(Value::Number(s.chars().count() as f64));
                }
                if let Ok(index) = key.parse::<usize>() {
                    return Ok(s
                        .chars()
                        .nth(index)
                        .map(|c| Value::Str(c.to_string()))
                        .unwrap_or(Value::Undefined));
                }
                Ok(Value::Undefined)
            }
            Value::Class(class) => {
                if let Some(prop) = class.statics.borrow().get_own(key) {
                    return match prop {
                        Property::Data(v) => Ok(v.clone()),
                        Property::Accessor { get: Some(getter), .. } => {
                            let getter = getter.clone();
                            self.invoke(&getter, Vec::new(), Some(object.clone()), span)
                        }
                        Property::Accessor { get: None, .. } => Ok(Value::Undefined),
                    };
                }
                if key == "name" {
                    return Ok(Value::Str(class.name.clone()));
                }
                Ok(Value::Undefined)
            }
            Value::Null | Value::Undefined => Err(self.type_error(
                format!("cannot read property '{key}' of {}", object.stringify()),
                span,
            )),
            _ => Ok(Value::Undefined),
        }
    }

    /// Walks an object's (or its prototype chain's) own properties for
    /// `key`, following `ObjectData::proto` links (class instances).
    fn lookup_own_or_proto(&self, object: &Value, key: &str) -> Option<Property> {
        let mut current = object.clone();
        loop {
            match &current {
                Value::Object(data) => {
                    let data = data.borrow();
                    if let Some(prop) = data.get_own(key) {
                        return Some(prop.clone());
                    }
                    match &data.proto {
                        Some(proto) => {
                            let next = proto.clone();
                            drop(data);
                            current = next;
                        }
                        None => return None,
                    }
                }
                _ => return None,
            }
        }
    }

    /// Writes a named property. Invokes an accessor's setter if one is
    /// installed in place of a plain data write (spec.md §3 "Property
    /// writes to an accessor property invoke the setter"). An accessor
    /// inherited from a class prototype is found the same way reads find
    /// it (`lookup_own_or_proto`), so assigning through an instance
    /// invokes the inherited setter instead of shadowing it with an own
    /// data property.
    pub(crate) fn set_property(
        &self,
        object: &Value,
        key: &str,
        value: Value,
        span: Span,
    ) -> Result<(), Signal> {
        match object {
            Value::Object(data) => {
                let existing = data.borrow().get_own(key).cloned();
                match existing.or_else(|| self.lookup_own_or_proto(object, key)) {
                    Some(Property::Accessor { set: Some(setter), .. }) => {
                        self.invoke(&setter, vec![value], Some(object.clone()), span)?;
                        Ok(())
                    }
                    Some(Property::Accessor { set: None, .. }) => Ok(()),
                    _ => {
                        data.borrow_mut().set_data(key, value);
                        Ok(())
                    }
                }
            }
            Value::Array(items) => {
                if let Ok(index) = key.parse::<usize>() {
                    let mut items = items.borrow_mut();
                    if index >= items.len() {
                        items.resize(index + 1, Value::Null);
                    }
                    items[index] = value;
                }
                Ok(())
            }
            Value::Class(class) => {
                class.statics.borrow_mut().set_data(key, value);
                Ok(())
            }
            Value::Null | Value::Undefined => Err(self.type_error(
                format!("cannot set property '{key}' of {}", object.stringify()),
                span,
            )),
            _ => Ok(()),
        }
    }

    pub(crate) fn type_error(&self, message: impl Into<String>, span: Span) -> Signal {
        Signal::Throw(crate::error::EvalError::type_error(message, span).into_thrown_value())
    }

    pub(crate) fn reference_error(&self, message: impl Into<String>, span: Span) -> Signal {
        Signal::Throw(crate::error::EvalError::reference_error(message, span).into_thrown_value())
    }
}
