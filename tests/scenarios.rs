/*
 * ==========================================================================
 * PAWX - Code with Claws!
 * ==========================================================================
 *
 * End-to-end scenarios: each test parses real source text through the
 * shipped lexer/parser and evaluates it with a fresh ambient context,
 * rather than constructing AST nodes by hand.
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

use wisp::{interpret_source, interpret_source_with_options, AmbientContext, Value};

fn run(source: &str) -> Value {
    interpret_source(source, AmbientContext::new())
        .unwrap_or_else(|e| panic!("expected '{source}' to evaluate, got {e:?}"))
}

#[test]
fn nested_member_access() {
    let v = run(r#"let a = {b:2,c:{ca:"hello"}}; a.c.ca;"#);
    assert_eq!(v, Value::Str("hello".to_string()));
}

#[test]
fn nested_loops_with_break_and_continue_isolation() {
    let v = run(
        "let b = 0; \
         for (let a = 1; a <= 2; a++) { \
           for (let i = 1; i < 10; i++) { break; b++; } \
           b = b + a; \
         } \
         b;",
    );
    assert_eq!(v, Value::Number(3.0));
}

#[test]
fn function_declaration_and_call() {
    let v = run("function a(){return 2}; a();");
    assert_eq!(v, Value::Number(2.0));
}

#[test]
fn method_closes_over_its_defining_object() {
    let v = run(
        r#"let a = { expected: "hello", test: function(actual){ return actual === a.expected; } }; a.test("hello");"#,
    );
    assert_eq!(v, Value::Bool(true));
}

#[test]
fn getter_setter_round_trip() {
    let v = run("let a = { set b(c) {this._b = c + 10}, get b(){return this._b} }; a.b = 22; a.b;");
    assert_eq!(v, Value::Number(32.0));
}

#[test]
fn early_return_short_circuits_function_body() {
    let v = run("function f(){ if (true) return 'in'; return 'out'; } f();");
    assert_eq!(v, Value::Str("in".to_string()));
}

#[test]
fn closure_observes_latest_value_not_captured_value() {
    let v = run(
        "function makeCounter() { \
           let count = 0; \
           return function() { count = count + 1; return count; }; \
         } \
         let counter = makeCounter(); \
         counter(); \
         counter(); \
         counter();",
    );
    assert_eq!(v, Value::Number(3.0));
}

#[test]
fn loose_vs_strict_equality() {
    let v = run(r#"(1 == "1") && (1 !== "1");"#);
    assert_eq!(v, Value::Bool(true));
}

#[test]
fn logical_and_short_circuits_right_operand() {
    let v = run(
        "let calls = 0; \
         function touch() { calls = calls + 1; return true; } \
         false && touch(); \
         calls;",
    );
    assert_eq!(v, Value::Number(0.0));
}

#[test]
fn logical_or_evaluates_right_operand_only_when_needed() {
    let v = run(
        "let calls = 0; \
         function touch() { calls = calls + 1; return true; } \
         true || touch(); \
         calls;",
    );
    assert_eq!(v, Value::Number(0.0));
}

#[test]
fn typeof_on_undeclared_identifier_yields_undefined_string() {
    let v = run("typeof neverDeclared;");
    assert_eq!(v, Value::Str("undefined".to_string()));
}

#[test]
fn referencing_undeclared_identifier_throws() {
    let err = interpret_source("neverDeclared;", AmbientContext::new());
    assert!(err.is_err());
}

#[test]
fn for_in_enumerates_own_keys_in_insertion_order() {
    let v = run(
        "let obj = {x: 1, y: 2, z: 3}; \
         let keys = []; \
         for (let k in obj) { keys[keys.length] = k; } \
         keys[0] + ',' + keys[1] + ',' + keys[2];",
    );
    assert_eq!(v, Value::Str("x,y,z".to_string()));
}

#[test]
fn for_of_iterates_array_values_in_order() {
    let v = run(
        "let total = 0; \
         for (let n of [1, 2, 3]) { total = total + n; } \
         total;",
    );
    assert_eq!(v, Value::Number(6.0));
}

#[test]
fn try_catch_binds_thrown_payload() {
    let v = run(
        "let result; \
         try { throw 'boom'; } catch (e) { result = e; } \
         result;",
    );
    assert_eq!(v, Value::Str("boom".to_string()));
}

#[test]
fn finally_runs_on_both_normal_and_abrupt_completion() {
    let v = run(
        "let trace = []; \
         function f() { \
           try { trace[trace.length] = 'try'; return 'a'; } \
           finally { trace[trace.length] = 'finally'; } \
         } \
         f(); \
         trace[0] + ',' + trace[1];",
    );
    assert_eq!(v, Value::Str("try,finally".to_string()));
}

#[test]
fn classes_support_inheritance_and_super_constructor_forwarding() {
    let v = run(
        "class Animal { \
           constructor(name) { this.name = name; } \
           speak() { return this.name + ' makes a sound'; } \
         } \
         class Dog extends Animal { \
           speak() { return this.name + ' barks'; } \
         } \
         let d = new Dog('Rex'); \
         d.speak();",
    );
    assert_eq!(v, Value::Str("Rex barks".to_string()));
}

#[test]
fn subclass_without_its_own_constructor_forwards_to_parent() {
    let v = run(
        "class Animal { \
           constructor(name) { this.name = name; } \
         } \
         class Cat extends Animal {} \
         let c = new Cat('Tom'); \
         c.name;",
    );
    assert_eq!(v, Value::Str("Tom".to_string()));
}

#[test]
fn class_prototype_accessor_is_invoked_through_the_instance() {
    let v = run(
        "class Box { \
           set value(v) { this._v = v * 2; } \
           get value() { return this._v; } \
         } \
         let b = new Box(); \
         b.value = 5; \
         b.value;",
    );
    assert_eq!(v, Value::Number(10.0));
}

#[test]
fn arrow_this_binds_to_enclosing_activation_not_callsite() {
    let v = run(
        "function Counter() { \
           this.count = 10; \
           this.bump = () => { this.count = this.count + 1; return this.count; }; \
         } \
         let c = new Counter(); \
         let bump = c.bump; \
         bump();",
    );
    assert_eq!(v, Value::Number(11.0));
}

#[test]
fn sequence_expression_evaluates_left_to_right_yields_last() {
    let v = run("let a = 1; (a = a + 1, a = a + 10, a);");
    assert_eq!(v, Value::Number(12.0));
}

#[test]
fn ambient_bindings_are_reachable_as_fallback_names() {
    let mut ctx = AmbientContext::new();
    ctx.insert("greeting", Value::Str("hiya".to_string()));
    let v = interpret_source("greeting;", ctx).expect("ambient binding should resolve");
    assert_eq!(v, Value::Str("hiya".to_string()));
}

#[test]
fn top_level_this_exposes_the_ambient_record() {
    let mut ctx = AmbientContext::new();
    ctx.insert("greeting", Value::Str("hiya".to_string()));
    let v = interpret_source("this.greeting;", ctx).expect("top-level this should be the ambient record");
    assert_eq!(v, Value::Str("hiya".to_string()));
}

#[test]
fn new_on_an_interpreter_function_constructs_an_instance() {
    let v = run(
        "function Counter() { \
           this.count = 10; \
           this.bump = function() { this.count = this.count + 1; return this.count; }; \
         } \
         let c = new Counter(); \
         c.bump();",
    );
    assert_eq!(v, Value::Number(11.0));
}

#[test]
fn unsupported_construct_raises_by_default_but_skips_when_configured() {
    let source = "let [a, b] = [1, 2]; 5;";

    let err = interpret_source(source, AmbientContext::new());
    assert!(err.is_err());

    let v = interpret_source_with_options(source, AmbientContext::new(), true)
        .expect("skip-unsupported should let evaluation continue past the destructuring target");
    assert_eq!(v, Value::Number(5.0));
}

#[test]
fn unsupported_catch_parameter_still_runs_finally_before_propagating() {
    let source = "let trace = []; \
                   try { \
                     try { throw 'x'; } catch ([a, b]) { trace[trace.length] = 'catch'; } \
                     finally { trace[trace.length] = 'finally'; } \
                   } catch (e) { trace[trace.length] = 'outer'; } \
                   trace[0] + ',' + trace[1];";

    let v = run(source);
    assert_eq!(v, Value::Str("finally,outer".to_string()));
}

#[test]
fn break_outside_a_loop_is_reported_as_a_top_level_error() {
    let err = interpret_source("break;", AmbientContext::new());
    assert!(err.is_err());
}
