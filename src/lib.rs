//! folio - hierarchical reading notes with dot-numbered indices

pub mod cli;
pub mod domain;
pub mod hierarchy;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_complete, handle_edit, handle_edition, handle_find, handle_list, handle_new,
        handle_rm, handle_show,
    },
    logging,
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "folio", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let db_path = config.db_path(cli.db.as_ref());
    tracing::debug!(db = %db_path.display(), "resolved database path");

    match &cli.command {
        Command::New(args) => handle_new(args, &db_path),
        Command::Show(args) => handle_show(args, &db_path),
        Command::Edit(args) => handle_edit(args, &db_path),
        Command::Rm(args) => handle_rm(args, &db_path),
        Command::List(args) => handle_list(args, &db_path, &config),
        Command::Find(args) => handle_find(args, &db_path),
        Command::Complete(args) => handle_complete(args, &db_path),
        Command::Edition(args) => handle_edition(args, &db_path),
        Command::Completions(_) => Ok(()),
    }
}
