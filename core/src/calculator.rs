//! Small arithmetic helpers.

use crate::error::CalculatorError;

/// Product of two `i64` values, widened so that it cannot overflow.
pub fn multiply(a: i64, b: i64) -> i128 {
    i128::from(a) * i128::from(b)
}

/// Integer division, truncating toward zero.
pub fn divide(a: i64, b: i64) -> Result<i64, CalculatorError> {
    if b == 0 {
        return Err(CalculatorError::DivisionByZero);
    }
    a.checked_div(b).ok_or(CalculatorError::Overflow)
}

pub fn is_greater_than_ten(n: i64) -> bool {
    n > 10
}

/// Principal square root, or `None` for negative or NaN input.
pub fn safe_square_root(n: f64) -> Option<f64> {
    if n.is_nan() || n < 0.0 {
        return None;
    }
    Some(n.sqrt())
}
