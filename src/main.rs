//! Civetman CLI - compile Civet sources to TypeScript
//!
//! Usage: civetman [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build  Compile every source once and update the side files
//!   dev    Compile, then keep recompiling as sources change

mod commands;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use civetman::presentation::{Cli, Commands};
use clap::Parser;

use crate::ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    if let Err(err) = run(&cli, &ui) {
        crate::ui::error::print_error(&err, ui.json);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, ui: &UiContext) -> Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let root = absolute(root)?;

    match cli.command {
        Commands::Build => commands::build::cmd_build(&root, cli.mode_overrides(), ui),
        Commands::Dev => commands::dev::cmd_dev(&root, cli.mode_overrides(), ui),
    }
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
