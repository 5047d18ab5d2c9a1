use anyhow::Result;
use clap::Parser;
use flashcalc::app::App;
use flashcalc::calculator::Calculator;
use flashcalc::cli::{Cli, Command};
use flashcalc::config::Config;
use flashcalc::host::{detect_environment, detect_host, signal_ready};
use flashcalc::input::Action;
use flashcalc::logging;
use flashcalc::storage::{FileStore, KeyValueStore, MemoryStore};
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let store = open_store(&cli, &config);
    let calculator = Calculator::load(store);

    let host = detect_host(config.host_socket.clone());
    let environment = detect_environment(host.as_ref());
    tracing::info!(host = host.name(), "running as {}", environment.label());

    let mut app = App::new(calculator, environment, config.show_keypad);

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {
            println!("{}", app.render_screen());
            signal_ready(host.as_ref(), environment);
        }
        Command::Press { keys } => {
            for key in &keys {
                app.feed(key);
            }
            println!("{}", app.render_screen());
            signal_ready(host.as_ref(), environment);
        }
        Command::Key { value, kind } => {
            app.press_virtual(&value, kind);
            println!("{}", app.render_screen());
            signal_ready(host.as_ref(), environment);
        }
        Command::Recall { index } => {
            app.apply(&Action::SelectHistory(usize::from(index) - 1));
            println!("{}", app.render_screen());
            signal_ready(host.as_ref(), environment);
        }
        Command::History => {
            println!("{}", app.history());
        }
        Command::Repl => {
            println!("{}\n", app.render_screen());
            signal_ready(host.as_ref(), environment);
            app.run_repl(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

/// File store under the configured data directory, or an in-memory store
/// when no directory can be resolved.
fn open_store(cli: &Cli, config: &Config) -> Box<dyn KeyValueStore> {
    let root = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .or_else(FileStore::default_root);

    match root {
        Some(root) => {
            tracing::debug!(root = %root.display(), "using file store");
            Box::new(FileStore::new(root))
        }
        None => {
            tracing::warn!("No data directory available; state will not persist");
            Box::new(MemoryStore::new())
        }
    }
}
