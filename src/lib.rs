/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Crate root: wires the evaluator core (value model, environment,
 * signals, operators, scope analyser) together with its parsing front
 * end (lexer, parser) and ambient/diagnostics support, and re-exports
 * the public library surface the CLI driver and integration tests use.
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

pub mod ambient;
pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod operators;
pub mod parser;
pub mod scope;
pub mod signals;
pub mod span;
pub mod value;

pub use ambient::{default_context, AmbientContext};
pub use error::{EvalError, TopLevelError};
pub use interpreter::{
    interpret_source, interpret_source_with_options, interpret_tree, interpret_tree_with_options,
};
pub use value::Value;
