//! History list rendering.

use crate::history::History;

const EMPTY_STATE: &str = "No history yet";

/// Render history newest first. Rows are numbered from 1, the number a
/// user passes to recall an entry.
pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let expr_width = history
        .iter()
        .map(|entry| entry.expr.chars().count())
        .max()
        .unwrap_or(0);

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>2}  {:<width$}  = {}",
                i + 1,
                entry.expr,
                entry.result,
                width = expr_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
