//! flashcalc: a calculator that keeps its current expression and a short
//! history of results across runs.
//!
//! The core is [`calculator::Calculator`], which owns the expression and
//! history and mirrors them into an injected [`storage::KeyValueStore`].

pub mod app;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod history;
pub mod host;
pub mod input;
pub mod logging;
pub mod storage;
pub mod ui;
