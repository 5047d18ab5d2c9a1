//! Mapping from keypad presses and keyboard keys to calculator operations.

mod keypad;

pub use keypad::{KEYPAD, VirtualKey, find_key};

use crate::calculator::{Calculator, Outcome};
use crate::storage::KeyValueStore;
use std::fmt;
use std::str::FromStr;

/// Utility key that clears the expression.
pub const CLEAR_KEY: &str = "C";

/// Utility key that deletes one character.
pub const BACKSPACE_KEY: &str = "⌫";

/// Role of a keypad key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Digit or decimal point.
    Num,
    /// Arithmetic operator.
    Op,
    /// The equals key.
    Eq,
    /// Clear and backspace.
    Util,
}

impl KeyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Num => "num",
            Self::Op => "op",
            Self::Eq => "eq",
            Self::Util => "util",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "num" => Ok(Self::Num),
            "op" => Ok(Self::Op),
            "eq" => Ok(Self::Eq),
            "util" => Ok(Self::Util),
            other => Err(format!(
                "unknown key kind '{}' (expected num, op, eq or util)",
                other
            )),
        }
    }
}

/// A calculator operation triggered by input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Append(String),
    Commit,
    Clear,
    Backspace,
    SelectHistory(usize),
}

impl Action {
    /// Action for a keypad press, or `None` for an unrecognized key.
    pub fn from_virtual(value: &str, kind: KeyKind) -> Option<Self> {
        if value.is_empty() {
            return None;
        }

        match kind {
            KeyKind::Num | KeyKind::Op => Some(Self::Append(value.to_string())),
            KeyKind::Eq => Some(Self::Commit),
            KeyKind::Util => match value {
                CLEAR_KEY => Some(Self::Clear),
                BACKSPACE_KEY => Some(Self::Backspace),
                _ => None,
            },
        }
    }

    /// Action for a physical keyboard key, named the way browsers report
    /// `KeyboardEvent.key` (`"7"`, `"+"`, `"Enter"`, `"Escape"`, ...).
    pub fn from_physical(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Commit),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if is_physical_token(c) => Some(Self::Append(c.to_string())),
                    _ => None,
                }
            }
        }
    }

    /// Run this action against `calculator`.
    pub fn apply<S: KeyValueStore>(&self, calculator: &mut Calculator<S>) -> Outcome {
        tracing::trace!(action = ?self, "applying action");
        match self {
            Self::Append(token) => calculator.append_token(token),
            Self::Commit => calculator.commit(),
            Self::Clear => calculator.clear(),
            Self::Backspace => calculator.backspace(),
            Self::SelectHistory(index) => calculator.select_history_entry(*index),
        }
    }
}

/// Characters typed on a keyboard that append directly.
fn is_physical_token(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | '*' | '/')
}

/// Whether the host's default handling of `key` must be suppressed.
pub fn prevents_default(key: &str) -> bool {
    matches!(key, "Enter" | "=")
}
