//! Control-flow completion values (spec.md §4.4, §9 "Control-flow signals
//! vs. exceptions").
//!
//! Every evaluator step returns `Result<Value, Signal>` instead of mutating
//! flags on a shared interpreter struct: a `Signal` bubbling up through
//! `?` *is* the completion-value design spec.md §9 recommends for a
//! statically typed target. `Ok(value)` is a Normal completion; the four
//! `Signal` variants are Return/Break/Continue/Throw.

use crate::value::Value;

/// A non-normal completion produced while evaluating a statement or
/// expression.
#[derive(Debug, Clone)]
pub enum Signal {
    /// `return <expr>;` — propagates up to the nearest function body.
    Return(Value),
    /// `break;` — propagates up to the nearest enclosing loop.
    Break,
    /// `continue;` — propagates up to the nearest enclosing loop.
    Continue,
    /// `throw <expr>;` (or an internal reference/type/unsupported error
    /// converted to a thrown value) — propagates up to the nearest
    /// enclosing `try`/`catch`.
    Throw(Value),
}

/// The result type every evaluator step returns.
pub type EvalResult = Result<Value, Signal>;
