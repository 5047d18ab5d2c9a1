//! Glue between input, the calculator and the terminal renderers.

use crate::calculator::{Calculator, Outcome};
use crate::host::Environment;
use crate::input::{Action, KeyKind, find_key};
use crate::storage::KeyValueStore;
use crate::ui::{render_display, render_history, render_keypad, render_status};
use std::io::{BufRead, Write};

/// Words that end an interactive session.
const QUIT_WORDS: &[&str] = &["quit", "exit", ":q"];

pub struct App<S: KeyValueStore> {
    calculator: Calculator<S>,
    environment: Environment,
    show_keypad: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(calculator: Calculator<S>, environment: Environment, show_keypad: bool) -> Self {
        Self {
            calculator,
            environment,
            show_keypad,
        }
    }

    pub fn calculator(&self) -> &Calculator<S> {
        &self.calculator
    }

    /// Status line, display, optional keypad and history.
    pub fn render_screen(&self) -> String {
        let mut sections = vec![
            render_status(self.environment),
            render_display(&self.calculator.display()),
        ];
        if self.show_keypad {
            sections.push(render_keypad());
        }
        sections.push(render_history(self.calculator.history()));
        sections.join("\n\n")
    }

    /// Render only what `outcome` invalidated.
    pub fn render_update(&self, outcome: Outcome) -> String {
        let display = render_display(&self.calculator.display());
        if outcome.history_changed() {
            format!("{}\n\n{}", display, render_history(self.calculator.history()))
        } else {
            display
        }
    }

    pub fn history(&self) -> String {
        render_history(self.calculator.history())
    }

    pub fn apply(&mut self, action: &Action) -> Outcome {
        action.apply(&mut self.calculator)
    }

    /// Press one keypad key.
    pub fn press_virtual(&mut self, value: &str, kind: KeyKind) -> Outcome {
        match Action::from_virtual(value, kind) {
            Some(action) => self.apply(&action),
            None => {
                tracing::warn!("Ignoring unknown {} key {:?}", kind, value);
                Outcome::Unchanged
            }
        }
    }

    /// Feed a typed key name (`"Enter"`, `"7"`, `"×"`) or a run of
    /// characters, each treated as one key press. Unmapped characters are
    /// skipped.
    pub fn feed(&mut self, input: &str) -> Outcome {
        if let Some(action) = key_action(input) {
            return self.apply(&action);
        }

        let mut combined = Outcome::Unchanged;
        let mut buf = [0u8; 4];
        for c in input.chars() {
            let key: &str = c.encode_utf8(&mut buf);
            let outcome = match key_action(key) {
                Some(action) => self.apply(&action),
                None => {
                    tracing::debug!("Ignoring unmapped key {:?}", key);
                    Outcome::Unchanged
                }
            };
            combined = merge(combined, outcome);
        }
        combined
    }

    /// Interactive loop: one line of keys at a time, an empty line commits.
    pub fn run_repl<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> std::io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if QUIT_WORDS.contains(&line) {
                break;
            }

            let outcome = if line.is_empty() {
                self.apply(&Action::Commit)
            } else {
                self.feed(line)
            };
            writeln!(output, "{}\n", self.render_update(outcome))?;
        }
        Ok(())
    }
}

/// Physical key names first, then keypad glyphs.
fn key_action(key: &str) -> Option<Action> {
    Action::from_physical(key).or_else(|| find_key(key).and_then(|k| k.action()))
}

fn merge(a: Outcome, b: Outcome) -> Outcome {
    match (a, b) {
        (Outcome::Committed, _) | (_, Outcome::Committed) => Outcome::Committed,
        (Outcome::Changed, _) | (_, Outcome::Changed) => Outcome::Changed,
        _ => Outcome::Unchanged,
    }
}
