/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Ambient Context Builder (spec.md §6 "Ambient context": "a mapping
 * from textual name to host value... Typical host contents: host
 * standard-library objects"). This is deliberately small — a `console`
 * object with `log`/`error` — since a full host standard library is a
 * CLI-driver concern, not an evaluator concern (SPEC_FULL.md §2 item 11
 * Non-goals).
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

use std::collections::HashMap;
use std::rc::Rc;

use crate::value::{plain_object, NativeFunctionValue, Value};

/// The host binding record handed to `interpret_source`/`interpret_tree`
/// (spec.md §6 "Ambient context"). Pushed as the outermost context
/// frame's ambient fallback map.
pub struct AmbientContext {
    pub bindings: HashMap<String, Value>,
}

impl AmbientContext {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

impl Default for AmbientContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The default ambient record the CLI driver installs: a `console`
/// object exposing `log`/`error`, both variadic and space-joined with
/// the same host stringification `Value::stringify()` uses for
/// template literals (spec.md §6 "host standard-library objects").
pub fn default_context() -> AmbientContext {
    let mut ctx = AmbientContext::new();

    let mut console_fields = HashMap::new();
    console_fields.insert("log".to_string(), native("log", |args| {
        println!("{}", join_args(args));
        Ok(Value::Undefined)
    }));
    console_fields.insert("error".to_string(), native("error", |args| {
        eprintln!("{}", join_args(args));
        Ok(Value::Undefined)
    }));

    ctx.insert("console", plain_object(console_fields));
    ctx
}

fn join_args(args: &[Value]) -> String {
    args.iter().map(Value::stringify).collect::<Vec<_>>().join(" ")
}

fn native(
    name: &str,
    func: impl Fn(&[Value]) -> Result<Value, crate::signals::Signal> + 'static,
) -> Value {
    Value::NativeFunction(Rc::new(NativeFunctionValue {
        name: name.to_string(),
        func: Box::new(func),
    }))
}
