/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * CLI-facing value display. `Value::stringify()` (value.rs) is the
 * host-coercion string used by template literals, `+`, and
 * `console.log`; this module instead renders a top-level result the
 * way a REPL echoes it back — strings quoted, everything else via the
 * same stringification.
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

use crate::value::Value;

/// Formats a program's final result for the CLI driver's stdout echo.
/// Strings print quoted so a script's result is visually distinguishable
/// from its `console.log` output, which prints strings bare.
pub fn display_result(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("\"{s}\""),
        other => other.stringify(),
    }
}
