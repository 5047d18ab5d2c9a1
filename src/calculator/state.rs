//! The expression-state manager.
//!
//! [`Calculator`] owns the current expression and the history and mirrors
//! both into a [`KeyValueStore`] after every mutation. Store failures are
//! logged and otherwise ignored; evaluation failures turn `commit` into a
//! no-op. Nothing here ever reports an error to the caller.

use super::evaluation::evaluate_display;
use crate::history::{History, HistoryEntry, load_history, save_history};
use crate::storage::{EXPRESSION_KEY, KeyValueStore};

/// Expression shown when nothing has been entered.
pub const DEFAULT_EXPRESSION: &str = "0";

/// What the presentation layer should show for the current expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub expression: String,
    /// Live result, or `"0"` when the expression does not evaluate.
    pub result: String,
}

/// Effect of an operation, used to decide what to re-render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The expression changed; re-render the display.
    Changed,
    /// A commit succeeded; re-render the display and the history.
    Committed,
    /// Nothing changed and nothing was persisted.
    Unchanged,
}

impl Outcome {
    pub fn history_changed(self) -> bool {
        self == Self::Committed
    }
}

pub struct Calculator<S: KeyValueStore> {
    store: S,
    expression: String,
    history: History,
}

impl<S: KeyValueStore> Calculator<S> {
    /// Restore state from `store`, defaulting to `"0"` and an empty history.
    pub fn load(store: S) -> Self {
        let expression = match store.get(EXPRESSION_KEY) {
            Ok(Some(expr)) if !expr.is_empty() => expr,
            Ok(_) => DEFAULT_EXPRESSION.to_string(),
            Err(e) => {
                tracing::warn!("Failed to read expression: {}", e);
                DEFAULT_EXPRESSION.to_string()
            }
        };
        let history = load_history(&store);

        tracing::debug!(
            expression = %expression,
            history = history.len(),
            "calculator state loaded"
        );

        Self {
            store,
            expression,
            history,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current expression and its live result.
    pub fn display(&self) -> DisplayState {
        let result = evaluate_display(&self.expression);
        DisplayState {
            expression: self.expression.clone(),
            result: if result.is_empty() {
                DEFAULT_EXPRESSION.to_string()
            } else {
                result
            },
        }
    }

    /// Append a keypad token. A lone `"0"` is replaced rather than extended
    /// when the token contains a digit or a decimal point.
    pub fn append_token(&mut self, token: &str) -> Outcome {
        if token.is_empty() {
            return Outcome::Unchanged;
        }

        let replaces_zero = token.chars().any(|c| c.is_ascii_digit() || c == '.');
        let expression = if self.expression == DEFAULT_EXPRESSION && replaces_zero {
            token.to_string()
        } else {
            format!("{}{}", self.expression, token)
        };

        self.set_expression(expression);
        Outcome::Changed
    }

    /// Reset the expression to `"0"`.
    pub fn clear(&mut self) -> Outcome {
        self.set_expression(DEFAULT_EXPRESSION.to_string());
        Outcome::Changed
    }

    /// Drop the last character; never leaves the expression empty.
    pub fn backspace(&mut self) -> Outcome {
        let mut expression = self.expression.clone();
        if expression.chars().count() <= 1 {
            expression = DEFAULT_EXPRESSION.to_string();
        } else {
            expression.pop();
        }

        self.set_expression(expression);
        Outcome::Changed
    }

    /// Evaluate the expression and, if it has a result, replace the
    /// expression with it and record the calculation.
    pub fn commit(&mut self) -> Outcome {
        let result = evaluate_display(&self.expression);
        if result.is_empty() {
            tracing::debug!(expression = %self.expression, "commit ignored");
            return Outcome::Unchanged;
        }

        let previous = std::mem::replace(&mut self.expression, result.clone());
        self.persist_expression();

        tracing::info!("{} = {}", previous, result);
        self.history.push_front(HistoryEntry::new(previous, result));
        if let Err(e) = save_history(&mut self.store, &self.history) {
            tracing::warn!("Failed to save history: {}", e);
        }

        Outcome::Committed
    }

    /// Recall the result of the history entry at `index`.
    pub fn select_history_entry(&mut self, index: usize) -> Outcome {
        let Some(entry) = self.history.get(index) else {
            return Outcome::Unchanged;
        };

        let result = entry.result.clone();
        self.set_expression(result);
        Outcome::Changed
    }

    fn set_expression(&mut self, expression: String) {
        self.expression = expression;
        self.persist_expression();
    }

    fn persist_expression(&mut self) {
        if let Err(e) = self.store.set(EXPRESSION_KEY, &self.expression) {
            tracing::warn!("Failed to save expression: {}", e);
        }
    }
}
