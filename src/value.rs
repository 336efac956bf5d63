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

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use regex::Regex;

use crate::ast::FunctionNode;
use crate::environment::Frame;
use crate::signals::Signal;

/// A compiled regular expression literal plus its surface flag set
/// (spec.md §3 "Regular expression: pattern + flag set").
#[derive(Debug, Clone)]
pub struct RegexValue {
    pub pattern: String,
    pub flags: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub compiled: Regex,
}

/// One object property: either an ordinary data cell or an accessor
/// pair (spec.md §3 "Object: ... either a data cell ... or an accessor
/// cell"). The two are mutually exclusive by construction.
#[derive(Debug, Clone)]
pub enum Property {
    Data(Value),
    Accessor { get: Option<Value>, set: Option<Value> },
}

/// A plain object or a class instance — both are a `ObjectData` record;
/// an instance is simply one whose `proto` chain reaches a class's
/// prototype object (spec.md §9 "Prototype-style inheritance").
///
/// Properties are kept in a `Vec` rather than a `HashMap` so insertion
/// order is preserved exactly, which `for-in` and object stringification
/// both depend on (spec.md §3 "Insertion order preserved").
#[derive(Debug, Default)]
pub struct ObjectData {
    pub properties: Vec<(String, Property)>,
    pub proto: Option<Value>,
}

impl ObjectData {
    pub fn get_own(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    pub fn get_own_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    /// Inserts or overwrites an own data property, preserving the
    /// original insertion slot on overwrite.
    pub fn set_data(&mut self, key: &str, value: Value) {
        if let Some(prop) = self.get_own_mut(key) {
            *prop = Property::Data(value);
        } else {
            self.properties.push((key.to_string(), Property::Data(value)));
        }
    }

    /// Merges a getter or setter half into the accessor slot for `key`,
    /// creating it if absent (spec.md §4.1 "Getter/setter properties
    /// accumulate into per-name descriptor slots").
    pub fn merge_accessor(&mut self, key: &str, getter: Option<Value>, setter: Option<Value>) {
        if let Some(Property::Accessor { get, set }) = self.get_own_mut(key) {
            if getter.is_some() {
                *get = getter;
            }
            if setter.is_some() {
                *set = setter;
            }
            return;
        }
        self.properties.push((
            key.to_string(),
            Property::Accessor { get: getter, set: setter },
        ));
    }

    /// Own enumerable key order, for `for-in` and object stringification.
    pub fn own_keys(&self) -> Vec<String> {
        self.properties.iter().map(|(k, _)| k.clone()).collect()
    }
}

/// A user-defined ("interpreter") callable: a function/arrow/method
/// node plus the lexical frame it closed over (spec.md §3 "Callable ...
/// an interpreter callable capturing (formal parameters, body AST,
/// lexical environment snapshot, kind)").
pub struct FunctionValue {
    pub node: Rc<FunctionNode>,
    pub closure: Rc<RefCell<Frame>>,
    /// Set only for arrow callables: the receiver captured at creation
    /// time. Arrows never install a new receiver on call (spec.md §4.3
    /// step 1, §3 "`this` inside an arrow ... never the callsite
    /// receiver").
    pub captured_this: Option<Value>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({:?})", self.node.name)
    }
}

/// A host-provided callable exposed to evaluated programs (console.log
/// and friends). Takes the evaluated arguments and the call's receiver
/// (usually irrelevant to ambient natives) and returns the same
/// `Result<Value, Signal>` shape as any interpreter callable, so native
/// and user-defined calls share one dispatch path in the evaluator.
pub struct NativeFunctionValue {
    pub name: String,
    pub func: Box<dyn Fn(&[Value]) -> Result<Value, Signal>>,
}

impl fmt::Debug for NativeFunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunctionValue({})", self.name)
    }
}

/// A class value: a callable constructor plus a prototype object
/// carrying the instance methods, own static properties, and an
/// optional parent class (spec.md §3 "Class").
#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    pub constructor: Option<Rc<FunctionValue>>,
    pub prototype: Rc<RefCell<ObjectData>>,
    pub statics: Rc<RefCell<ObjectData>>,
    pub parent: Option<Rc<ClassValue>>,
}

/// The runtime value universe (spec.md §3 "Values").
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Undefined,

    Regex(Rc<RegexValue>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<ObjectData>>),

    Function(Rc<FunctionValue>),
    NativeFunction(Rc<NativeFunctionValue>),
    Class(Rc<ClassValue>),
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Number(n) => Value::Number(*n),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Bool(b) => Value::Bool(*b),
            Value::Null => Value::Null,
            Value::Undefined => Value::Undefined,
            Value::Regex(r) => Value::Regex(r.clone()),
            Value::Array(a) => Value::Array(a.clone()),
            Value::Object(o) => Value::Object(o.clone()),
            Value::Function(f) => Value::Function(f.clone()),
            Value::NativeFunction(f) => Value::NativeFunction(f.clone()),
            Value::Class(c) => Value::Class(c.clone()),
        }
    }
}

/// Structural equality for test assertions and internal comparisons;
/// mirrors `===` (spec.md §8's scenarios compare results with `==` in
/// the host sense of "same value", which for every primitive this test
/// suite exercises coincides with strict equality).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Value::equals_strict(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Null => write!(f, "Null"),
            Value::Undefined => write!(f, "Undefined"),
            Value::Regex(r) => write!(f, "[Regex /{}/{}]", r.pattern, r.flags),
            Value::Array(a) => write!(f, "[Array len={}]", a.borrow().len()),
            Value::Object(_) => write!(f, "[Object]"),
            Value::Function(fv) => write!(f, "[Function {:?}]", fv.node.name),
            Value::NativeFunction(nf) => write!(f, "[NativeFunction {}]", nf.name),
            Value::Class(c) => write!(f, "[Class {}]", c.name),
        }
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Str(_) => "String",
            Value::Bool(_) => "Boolean",
            Value::Null => "Null",
            Value::Undefined => "Undefined",
            Value::Regex(_) => "RegExp",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Function(_) | Value::NativeFunction(_) => "Function",
            Value::Class(_) => "Class",
        }
    }

    /// The string `typeof` yields — deliberately matches the host
    /// language's well-known quirk that `typeof null === "object""
    /// (spec.md §8 "Conformance-to-host").
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "object",
            Value::Undefined => "undefined",
            Value::Regex(_) | Value::Array(_) | Value::Object(_) => "object",
            Value::Function(_) | Value::NativeFunction(_) | Value::Class(_) => "function",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null | Value::Undefined => false,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_) | Value::NativeFunction(_) | Value::Class(_)
        )
    }

    /// Host-level string coercion, used by template literals, `+`, and
    /// console output alike.
    pub fn stringify(&self) -> String {
        match self {
            Value::Number(n) => number_to_string(*n),
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Undefined => "undefined".to_string(),
            Value::Regex(r) => format!("/{}/{}", r.pattern, r.flags),
            Value::Array(values) => values
                .borrow()
                .iter()
                .map(|v| match v {
                    Value::Null | Value::Undefined => String::new(),
                    other => other.stringify(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(fv) => format!("[Function: {}]", fv.node.name.as_deref().unwrap_or("anonymous")),
            Value::NativeFunction(nf) => format!("[Function: {}]", nf.name),
            Value::Class(c) => format!("[class {}]", c.name),
        }
    }

    /// Loose equality (`==`): numeric coercion between number/string/
    /// boolean, identity for everything else.
    pub fn equals_loose(a: &Value, b: &Value) -> bool {
        use Value::*;
        match (a, b) {
            (Null, Undefined) | (Undefined, Null) => true,
            (Number(_), _) | (_, Number(_)) | (Str(_), Bool(_)) | (Bool(_), Str(_)) => {
                match (a.as_number_coerced(), b.as_number_coerced()) {
                    (Some(x), Some(y)) => x == y,
                    _ => Value::equals_strict(a, b),
                }
            }
            _ => Value::equals_strict(a, b),
        }
    }

    /// Strict equality (`===`): same type, same value for primitives,
    /// same identity for reference types.
    pub fn equals_strict(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::Str(x), Value::Str(y)) => x == y,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
            (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
            (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
            (Value::NativeFunction(x), Value::NativeFunction(y)) => Rc::ptr_eq(x, y),
            (Value::Class(x), Value::Class(y)) => Rc::ptr_eq(x, y),
            (Value::Regex(x), Value::Regex(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }

    /// Describes a thrown value for top-level diagnostics: an object with
    /// a string `message` field (the shape internal errors and host-style
    /// `Error` objects share) prints just that message; anything else
    /// falls back to ordinary stringification.
    pub fn describe_for_throw(&self) -> String {
        if let Value::Object(data) = self {
            if let Some(Property::Data(Value::Str(msg))) = data.borrow().get_own("message") {
                return msg.clone();
            }
        }
        self.stringify()
    }

    /// Numeric coercion used by arithmetic operators and loose equality.
    pub fn as_number_coerced(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::Str(s) => {
                let t = s.trim();
                if t.is_empty() {
                    Some(0.0)
                } else {
                    t.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }
}

/// JS-style number-to-string conversion: integral values print without
/// a trailing `.0`; everything else uses Rust's default float
/// formatting, which agrees with the host for the common cases this
/// evaluator's test surface exercises.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == n.trunc() && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Builds a `RegexValue` from a literal's raw pattern/flags pair.
/// Unsupported flag characters are accepted but ignored rather than
/// erroring — this evaluator maps only the subset `regex` itself
/// supports onto its `RegexBuilder`.
pub fn compile_regex(pattern: &str, flags: &str) -> Result<RegexValue, regex::Error> {
    let mut builder = regex::RegexBuilder::new(pattern);
    builder.case_insensitive(flags.contains('i'));
    builder.multi_line(flags.contains('m'));
    builder.dot_matches_new_line(flags.contains('s'));
    let compiled = builder.build()?;
    Ok(RegexValue {
        pattern: pattern.to_string(),
        flags: flags.to_string(),
        global: flags.contains('g'),
        ignore_case: flags.contains('i'),
        multiline: flags.contains('m'),
        compiled,
    })
}

/// Constructs a fresh, prototype-less plain object from field pairs —
/// the common case for object literals and thrown `Error` payloads.
pub fn plain_object(fields: HashMap<String, Value>) -> Value {
    let mut data = ObjectData::default();
    for (k, v) in fields {
        data.set_data(&k, v);
    }
    Value::Object(Rc::new(RefCell::new(data)))
}
