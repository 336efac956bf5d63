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

//! Binary, unary, and compound-assignment operator tables (spec.md §2
//! item 4, §4.1 "Binary"). Short-circuit operators (`&&`, `||`, the
//! comma operator) are *not* handled here — they need to decide,
//! before evaluating, whether the right-hand side runs at all, so the
//! evaluator calls back into itself lazily for those instead of going
//! through this table (spec.md §4.1 "a short-circuiting form evaluates
//! its right operand lazily via a thunk").

use crate::error::EvalError;
use crate::span::Span;
use crate::value::Value;

/// Applies a non-short-circuiting binary operator to two already
/// evaluated operands.
pub fn apply_binary(op: &str, left: Value, right: Value, span: Span) -> Result<Value, EvalError> {
    match op {
        "+" => add(left, right),
        "-" => numeric(left, right, span, |a, b| a - b),
        "*" => numeric(left, right, span, |a, b| a * b),
        "/" => numeric(left, right, span, |a, b| a / b),
        "%" => numeric(left, right, span, |a, b| a % b),
        "==" => Ok(Value::Bool(Value::equals_loose(&left, &right))),
        "!=" => Ok(Value::Bool(!Value::equals_loose(&left, &right))),
        "===" => Ok(Value::Bool(Value::equals_strict(&left, &right))),
        "!==" => Ok(Value::Bool(!Value::equals_strict(&left, &right))),
        "<" => compare(left, right, span, |o| o == std::cmp::Ordering::Less),
        ">" => compare(left, right, span, |o| o == std::cmp::Ordering::Greater),
        "<=" => compare(left, right, span, |o| o != std::cmp::Ordering::Greater),
        ">=" => compare(left, right, span, |o| o != std::cmp::Ordering::Less),
        other => Err(EvalError::unsupported(
            format!("unsupported binary operator '{other}'"),
            span,
        )),
    }
}

/// Applies a prefix unary operator.
pub fn apply_unary(op: &str, operand: Value, span: Span) -> Result<Value, EvalError> {
    match op {
        "-" => Ok(Value::Number(-require_number(&operand, span)?)),
        "+" => Ok(Value::Number(require_number(&operand, span)?)),
        "!" => Ok(Value::Bool(!operand.is_truthy())),
        // `typeof` on an already-evaluated value is handled directly by
        // the evaluator so it can special-case an undeclared identifier
        // without raising a reference error (spec.md §8
        // "Typeof-on-undeclared").
        other => Err(EvalError::unsupported(
            format!("unsupported unary operator '{other}'"),
            span,
        )),
    }
}

/// Resolves a compound-assignment token (`+=`, `-=`, ...) to the plain
/// binary operator it abbreviates.
pub fn compound_to_binary(op: &str) -> &'static str {
    match op {
        "+=" => "+",
        "-=" => "-",
        "*=" => "*",
        "/=" => "/",
        "%=" => "%",
        _ => unreachable!("compound_to_binary called with non-compound operator"),
    }
}

/// `+` overloads string concatenation onto addition the moment either
/// side is a string (spec.md §9 "Dynamic typing").
fn add(left: Value, right: Value) -> Result<Value, EvalError> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        Ok(Value::Str(format!("{}{}", left.stringify(), right.stringify())))
    } else {
        match (left.as_number_coerced(), right.as_number_coerced()) {
            (Some(a), Some(b)) => Ok(Value::Number(a + b)),
            _ => Ok(Value::Str(format!("{}{}", left.stringify(), right.stringify()))),
        }
    }
}

fn numeric(left: Value, right: Value, span: Span, f: impl Fn(f64, f64) -> f64) -> Result<Value, EvalError> {
    let a = require_number(&left, span)?;
    let b = require_number(&right, span)?;
    Ok(Value::Number(f(a, b)))
}

fn require_number(v: &Value, span: Span) -> Result<f64, EvalError> {
    v.as_number_coerced().ok_or_else(|| {
        EvalError::type_error(
            format!("cannot convert a value of type '{}' to a number", v.type_name()),
            span,
        )
    })
}

/// `<`/`>`/`<=`/`>=`: lexicographic when both sides are strings,
/// numeric otherwise (spec.md §9 "Dynamic typing").
fn compare(left: Value, right: Value, span: Span, accept: impl Fn(std::cmp::Ordering) -> bool) -> Result<Value, EvalError> {
    if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
        return Ok(Value::Bool(accept(a.cmp(b))));
    }
    let a = require_number(&left, span)?;
    let b = require_number(&right, span)?;
    match a.partial_cmp(&b) {
        Some(ord) => Ok(Value::Bool(accept(ord))),
        None => Ok(Value::Bool(false)), // NaN compares false against everything
    }
}
