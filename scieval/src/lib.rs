//! Evaluates infix scientific-calculator expressions such as
//! `abs(-(-1+(2*(4--3)))&2)`, where `&` is exponentiation.
//!
//! Evaluation splices a linked token sequence in place instead of building
//! a syntax tree. Each call owns its sequence, so concurrent calls share no
//! state. Nesting depth is bounded only by the call stack.

pub use error::{Error, EvalErr};
pub use reduce::{evaluate, priority, Evaluator};
pub use sequence::{Cell, TokenSequence};

mod error;
mod reduce;
pub mod sequence;

pub fn evaluate_str(expression: &str) -> Result<f64, Error> {
    let tokens = mathlex::tokenize(expression)?;
    Ok(evaluate(tokens)?)
}

/// The result as a shortest round-trip decimal, or `"ERROR: <message>"`.
pub fn eval(expression: &str) -> String {
    match evaluate_str(expression) {
        Ok(value) => format!("{}", value),
        Err(e) => {
            tracing::debug!("eval '{}' failed: {}", expression, e);
            format!("ERROR: {}", e)
        }
    }
}
