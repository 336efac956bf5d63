/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * Class construction and instantiation (spec.md §4.3 "Class
 * construction"): synthesises a `Value::Class` from a `ClassNode`,
 * partitioning members into statics/instance methods/constructor, and
 * links its prototype to the parent's. `new` on a class allocates a
 * fresh instance whose `proto` points at the class prototype and
 * invokes the constructor chain.
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

use crate::ast::{ClassMemberKind, ClassNode};
use crate::environment::Frame;
use crate::interpreter::Evaluator;
use crate::signals::EvalResult;
use crate::span::Span;
use crate::value::{ClassValue, FunctionValue, ObjectData, Value};

type FrameRef = Rc<RefCell<Frame>>;

impl Evaluator {
    /// Builds a class value from a declaration or expression (spec.md
    /// §4.3 "Class construction", steps 1-3; step 4, installing the
    /// binding, is the caller's job — see `exec_stmt`'s `ClassDecl` arm).
    pub(crate) fn eval_class(&self, node: &ClassNode, frame: &FrameRef) -> EvalResult {
        // Step 1: evaluate the parent class expression, if present.
        let parent = match &node.superclass {
            Some(expr) => match self.eval_expr(expr, frame)? {
                Value::Class(c) => Some(c),
                other => {
                    return Err(self.type_error(
                        format!("cannot extend a non-class value of type '{}'", other.type_name()),
                        expr.span(),
                    ))
                }
            },
            None => None,
        };

        let prototype = Rc::new(RefCell::new(ObjectData {
            properties: Vec::new(),
            proto: parent.as_ref().map(|p| Value::Object(p.prototype.clone())),
        }));
        let statics = Rc::new(RefCell::new(ObjectData::default()));
        let mut constructor: Option<Rc<FunctionValue>> = None;

        // Step 2: partition members — statics onto the class object,
        // instance members onto the prototype, `constructor` split out.
        for member in &node.members {
            let key = match &member.key {
                crate::ast::PropertyKey::Static(name) => name.clone(),
                crate::ast::PropertyKey::Computed(expr) => {
                    self.eval_expr(expr, frame)?.stringify()
                }
            };

            if !member.is_static && key == "constructor" && member.kind == ClassMemberKind::Method {
                let func = self.make_function_value(&member.func, frame, None);
                if let Value::Function(f) = func {
                    constructor = Some(f);
                }
                continue;
            }

            let func_value = self.make_function_value(&member.func, frame, None);
            let target = if member.is_static { &statics } else { &prototype };

            match member.kind {
                ClassMemberKind::Method => target.borrow_mut().set_data(&key, func_value),
                ClassMemberKind::Getter => {
                    target.borrow_mut().merge_accessor(&key, Some(func_value), None)
                }
                ClassMemberKind::Setter => {
                    target.borrow_mut().merge_accessor(&key, None, Some(func_value))
                }
            }
        }

        // Step 3: synthesise the class value.
        Ok(Value::Class(Rc::new(ClassValue {
            name: node.name.clone().unwrap_or_default(),
            constructor,
            prototype,
            statics,
            parent,
        })))
    }

    /// `new Class(...)` (spec.md §4.1 "New", §4.3 step 3 "constructor
    /// behaviour"): allocates a fresh instance linked to the class's
    /// prototype and runs the constructor chain.
    pub(crate) fn construct(
        &self,
        class: &Rc<ClassValue>,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        let instance_data = Rc::new(RefCell::new(ObjectData {
            properties: Vec::new(),
            proto: Some(Value::Object(class.prototype.clone())),
        }));
        let instance = Value::Object(instance_data);

        self.run_constructor(class, &instance, args, span)?;
        Ok(instance)
    }

    /// Invokes the nearest constructor in the class chain with `instance`
    /// as receiver; a subclass with no explicit constructor forwards the
    /// call to its parent's (spec.md §4.3 "if no explicit constructor,
    /// behave as parent's ... forwarding arguments for subclasses, or do
    /// nothing").
    fn run_constructor(
        &self,
        class: &Rc<ClassValue>,
        instance: &Value,
        args: Vec<Value>,
        span: Span,
    ) -> Result<(), crate::signals::Signal> {
        match &class.constructor {
            Some(ctor) => {
                self.invoke_function(ctor, args, Some(instance.clone()))?;
                Ok(())
            }
            None => match &class.parent {
                Some(parent) => self.run_constructor(parent, instance, args, span),
                None => Ok(()),
            },
        }
    }
}
