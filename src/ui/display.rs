//! Expression and result rendering.

use crate::calculator::DisplayState;
use crate::host::Environment;

/// Render the expression as a title line with the live result below it,
/// prefixed with `= `.
pub fn render_display(state: &DisplayState) -> String {
    let expression = if state.expression.is_empty() {
        "0"
    } else {
        state.expression.as_str()
    };
    format!("{}\n= {}", expression, state.result)
}

/// One-line status showing where the calculator is running.
pub fn render_status(environment: Environment) -> String {
    format!("flashcalc [{}]", environment.label())
}
