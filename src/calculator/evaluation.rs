//! Expression evaluation.
//!
//! Input is sanitized first, so the evaluator only ever sees numbers,
//! `+ - * / %`, parentheses and spaces. Any failure collapses to "no
//! result" at the display boundary.

use super::parser::eval_arithmetic;
use super::sanitize::{is_blank, sanitize};
use thiserror::Error;

/// Why an expression produced no result.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("nothing to evaluate")]
    Blank,

    #[error("cannot evaluate '{expression}': {message}")]
    Syntax { expression: String, message: String },

    #[error("result is not finite: {0}")]
    NonFinite(f64),
}

/// A successful evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The sanitized expression that was evaluated.
    pub expression: String,
    /// The numeric value.
    pub value: f64,
    /// Canonical decimal text of `value`.
    pub display: String,
}

/// Sanitize and evaluate `input`.
pub fn evaluate(input: &str) -> Result<Evaluation, EvalError> {
    let expression = sanitize(input);
    if is_blank(&expression) {
        return Err(EvalError::Blank);
    }

    let value = eval_arithmetic(&expression).map_err(|e| EvalError::Syntax {
        expression: expression.clone(),
        message: e.to_string(),
    })?;

    if !value.is_finite() {
        return Err(EvalError::NonFinite(value));
    }

    Ok(Evaluation {
        display: format_number(value),
        expression,
        value,
    })
}

/// Evaluate `input` to its display text, or `""` when there is no valid
/// result. Errors are logged at debug level and never propagated.
pub fn evaluate_display(input: &str) -> String {
    match evaluate(input) {
        Ok(evaluation) => evaluation.display,
        Err(EvalError::Blank) => String::new(),
        Err(e) => {
            tracing::debug!("no result for {:?}: {}", input, e);
            String::new()
        }
    }
}

/// Format a finite number as canonical decimal text.
///
/// Uses the shortest digits that round-trip. Negative zero prints as `0`.
/// Magnitudes of at least 1e21, or below 1e-6, switch to exponent form
/// (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
