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

use crate::ast::{Expr, FunctionNode, NodeId, PropertyKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Method,
    Getter,
    Setter,
}

/// One member of a class body. spec.md's data model describes a class
/// as "a callable constructor plus a prototype object whose own
/// properties are the instance methods, plus own properties that are
/// the static methods" — there is no field-declaration syntax, only
/// methods (instance data comes from `this.x = ...` inside the
/// constructor).
#[derive(Debug, Clone)]
pub struct ClassMember {
    pub key: PropertyKey,
    pub is_static: bool,
    pub kind: ClassMemberKind,
    pub func: FunctionNode,
}

/// A class declaration or class expression (spec.md §4.3).
#[derive(Debug, Clone)]
pub struct ClassNode {
    pub name: Option<String>,
    pub name_id: Option<NodeId>,
    pub superclass: Option<Box<Expr>>,
    pub members: Vec<ClassMember>,
}
