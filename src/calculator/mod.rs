//! Calculator core.
//!
//! This module provides functionality to:
//! - Sanitize raw keypad or keyboard input
//! - Evaluate sanitized expressions with a small arithmetic parser
//! - Track the current expression and history, persisting both

mod evaluation;
mod parser;
mod sanitize;
mod state;

pub use evaluation::{EvalError, Evaluation, evaluate, evaluate_display, format_number};
pub use parser::{ParseError, eval_arithmetic};
pub use sanitize::{is_blank, sanitize};
pub use state::{Calculator, DEFAULT_EXPRESSION, DisplayState, Outcome};
