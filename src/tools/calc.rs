//! Expression Evaluator
//!
//! Evaluates a single binary operation such as `2 + 3`. There is no grammar:
//! the operators are probed in the fixed order `+`, `-`, `*`, `/` and the
//! first one present wins. The expression is split on every occurrence of
//! that operator and only the first two pieces are used, so `1+2+3`
//! evaluates to `3` and `1+2-3` fails on the operand `2-3`.

/// Operators in detection order.
const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Failure to evaluate an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// An operand is not a decimal number (or is missing).
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    /// The divisor of a `/` expression is zero.
    #[error("division by zero in '{0}'")]
    DivisionByZero(String),
    /// The result overflowed to infinity or is not a number.
    #[error("result of '{0}' is not a finite number")]
    NonFinite(String),
}

/// Evaluate `expression` and return its value.
///
/// All whitespace is removed before parsing.
pub fn evaluate(expression: &str) -> Result<f64, ExpressionError> {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    let Some(op) = OPERATORS.into_iter().find(|op| stripped.contains(*op)) else {
        return parse_operand(&stripped);
    };

    let mut parts = stripped.split(op);
    let lhs = parse_operand(parts.next().unwrap_or_default())?;
    let rhs = parse_operand(parts.next().unwrap_or_default())?;

    let result = match op {
        '+' => lhs + rhs,
        '-' => lhs - rhs,
        '*' => lhs * rhs,
        _ => {
            if rhs == 0.0 {
                return Err(ExpressionError::DivisionByZero(stripped));
            }
            lhs / rhs
        }
    };

    if !result.is_finite() {
        return Err(ExpressionError::NonFinite(stripped));
    }
    Ok(result)
}

/// Parse a finite decimal operand. `inf` and `NaN` are not numbers here.
fn parse_operand(text: &str) -> Result<f64, ExpressionError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExpressionError::InvalidNumber(text.to_string()))
}
