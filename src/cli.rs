//! Command-line interface.

use crate::input::KeyKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flashcalc",
    version,
    about = "A small calculator that remembers its expression and recent results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding calculator state (overrides the config file).
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current expression, its result and the history.
    Show,

    /// Press keyboard keys in order, e.g. `press 1 2 + 3 Enter`.
    Press {
        /// Key names (`0`-`9`, `.`, `+`, `-`, `*`, `/`, `Enter`, `=`,
        /// `Backspace`, `Escape`) or runs of characters.
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// Press one keypad button.
    Key {
        /// The button value, e.g. `7`, `÷`, `=`, `C`, `⌫`.
        value: String,
        /// The button kind: num, op, eq or util.
        kind: KeyKind,
    },

    /// Replace the expression with the result of history entry N (1 = newest).
    Recall {
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        index: u16,
    },

    /// Print the history list.
    History,

    /// Interactive session reading keys from stdin, one line at a time.
    Repl,
}
