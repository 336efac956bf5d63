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

use crate::span::Span;
use crate::value::Value;

/// A diagnostic raised by the evaluator, the parser, or the scope analyser.
///
/// Holds a stable code so [`crate::diagnostics::DiagnosticPrinter`] can
/// render it the same way regardless of where it originated.
#[derive(Debug, Clone)]
pub struct EvalError {
    /// Stable error code (E_REFERENCE, E_TYPE, …)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

impl EvalError {
    /// Generic constructor
    pub fn new(code: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            help: None,
        }
    }

    /// Unresolved identifier (spec.md §7 "Reference errors").
    pub fn reference_error(message: impl Into<String>, span: Span) -> Self {
        Self::new("E_REFERENCE", message, span)
    }

    /// Calling a non-callable, constructing a non-constructor, bad operand
    /// types (spec.md §7 "Type errors").
    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::new("E_TYPE", message, span)
    }

    /// An AST node kind this evaluator does not implement
    /// (spec.md §7 "Unsupported-construct errors").
    pub fn unsupported(message: impl Into<String>, span: Span) -> Self {
        Self::new("E_UNSUPPORTED", message, span)
    }

    /// `break`/`continue` escaping a context that cannot handle it — never
    /// produced by a well-formed program once the parser and scope
    /// analyser agree on loop/function boundaries.
    pub fn malformed_control_flow(message: impl Into<String>, span: Span) -> Self {
        Self::new("E_CONTROL_FLOW", message, span)
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The payload a program-level `try`/`catch` sees for this error:
    /// reference/type/unsupported errors are represented as ordinary
    /// thrown values (plain objects with `name`/`message` fields, the same
    /// shape a host `Error` instance would have), so they unwind and are
    /// caught exactly like any other `throw` expression (spec.md §8
    /// "Conformance-to-host").
    pub fn into_thrown_value(self) -> Value {
        let mut fields = std::collections::HashMap::new();
        fields.insert("name".to_string(), Value::Str(self.code.to_string()));
        fields.insert("message".to_string(), Value::Str(self.message));
        crate::value::plain_object(fields)
    }
}

/// What [`crate::interpret_source`]/[`crate::interpret_tree`] return when a
/// program does not complete normally.
#[derive(Debug, Clone)]
pub enum TopLevelError {
    /// A `throw` (program or internal) that escaped every `try`/`catch`.
    Uncaught(Value),
    /// The source text failed to lex or parse.
    Parse(EvalError),
    /// `break`/`continue` used outside of any enclosing loop.
    MalformedControlFlow(EvalError),
}

impl TopLevelError {
    pub fn message(&self) -> String {
        match self {
            TopLevelError::Uncaught(v) => format!("uncaught exception: {}", v.describe_for_throw()),
            TopLevelError::Parse(e) => e.message.clone(),
            TopLevelError::MalformedControlFlow(e) => e.message.clone(),
        }
    }
}