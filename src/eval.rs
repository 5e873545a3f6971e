//! Stack-based evaluation of postfix token sequences.

use crate::token::Token;
use thiserror::Error;

/// Reasons a single row of a truth table can fail to evaluate.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum EvalError {
    /// An operator found too few operands on the stack.
    #[error("Invalid expression")]
    InvalidExpression,

    /// A token that is neither a literal nor an operator reached the evaluator.
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Evaluation finished with a stack size other than one.
    #[error("Malformed expression")]
    MalformedExpression,
}

/// Evaluate a postfix sequence in which every variable has been replaced by a literal.
///
/// For binary operators the first value popped is the right-hand operand.
pub fn evaluate_postfix(postfix: &[Token]) -> Result<bool, EvalError> {
    let mut stack: Vec<bool> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Literal(value) => stack.push(*value),
            Token::Operator(op) if op.is_unary() => {
                let a = stack.pop().ok_or(EvalError::InvalidExpression)?;
                stack.push(op.apply(false, a));
            }
            Token::Operator(op) => {
                let b = stack.pop().ok_or(EvalError::InvalidExpression)?;
                let a = stack.pop().ok_or(EvalError::InvalidExpression)?;
                stack.push(op.apply(a, b));
            }
            other => return Err(EvalError::UnknownOperator(other.to_string())),
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::MalformedExpression),
    }
}
