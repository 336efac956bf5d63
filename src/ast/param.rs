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

/*
 * ==========================================================================
 * PAWX - Code with Claws! 🐾
 * ==========================================================================
 *
 * File:     param.rs
 * Purpose:  Defines the AST structure for function & method parameters
 *
 * This file defines the `Param` struct used by:
 *  - Function declarations (`purr`)
 *  - Lambda expressions
 *  - Class methods
 *  - Getters & setters
 *
 * It supports:
 *  - Default values (JavaScript-style)
 *  - Optional type annotations
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * GitHub:   https://github.com/samwilcox/pawx
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
 *     https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::ast::{Expr, NodeId};

/// The left-hand side of a variable declarator, function parameter, `catch`
/// clause, or `for-in`/`for-of` loop binding.
///
/// spec.md §4.1 restricts every one of these positions to a single
/// identifier; array/object destructuring targets still parse (so the
/// evaluator's unsupported-construct handling in spec.md §7 governs
/// whether they raise or are skipped), they just carry a description
/// instead of a bindable name.
#[derive(Debug, Clone)]
pub enum BindingTarget {
    Identifier { name: String, id: NodeId },
    Unsupported(String),
}

impl BindingTarget {
    pub fn name(&self) -> Option<&str> {
        match self {
            BindingTarget::Identifier { name, .. } => Some(name),
            BindingTarget::Unsupported(_) => None,
        }
    }
}

/// One declared parameter in a function, arrow, or method.
#[derive(Debug, Clone)]
pub struct Param {
    pub target: BindingTarget,

    /// Default value expression, evaluated when the caller omits the
    /// argument or passes `undefined` (spec.md §4.3 step 2).
    pub default: Option<Expr>,
}