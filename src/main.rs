//! Onsave CLI - run a build command every time a watched file is saved
//!
//! Usage: onsave [FILE] [--command <CMD>] [--json]
//!
//! Watches FILE (default `paper.tex` in the working directory) and runs the
//! configured command (default `make`) in the file's directory every time a
//! write to the file completes. Ctrl+C stops the watch.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use onsave::config::Config;
use onsave::watcher::{watch, WatchEvent, WatchOptions};

/// Onsave - run a build command every time a file is saved
#[derive(Parser, Debug)]
#[command(name = "onsave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to watch (defaults to paper.tex in the working directory)
    file: Option<PathBuf>,

    /// Command to run on each save (defaults to make)
    #[arg(short, long)]
    command: Option<String>,

    /// Output watch events as NDJSON for CI
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let (config, warnings) = Config::load_or_default(&cwd)?;
    for warning in &warnings {
        eprintln!("⚠ {}", warning);
    }

    let config = config.with_cli_overrides(cli.file, cli.command);
    let options = WatchOptions::resolve(&config.file, &config.command)?;

    // Ctrl+C clears the running flag; the loop winds down on its next poll
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let json = cli.json;

    watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            match event {
                WatchEvent::Started { target } => {
                    println!("👀 Watching: {} (press Ctrl+C to stop)", target);
                }
                WatchEvent::Modified { .. } => {
                    println!("📝 Modification detected, rebuilding");
                }
                WatchEvent::Shutdown => {
                    println!("\n👋 Bye!");
                }
            }
        }
    })?;

    Ok(())
}
