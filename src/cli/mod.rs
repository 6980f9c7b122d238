//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// folio - hierarchical reading notes
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides FOLIO_DB and the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Show a note with its associations and children
    Show(ShowArgs),

    /// Change a note's content, parent or associations
    Edit(EditArgs),

    /// Delete a note that has no children
    Rm(RmArgs),

    /// List top-level notes with their subtrees
    #[command(name = "ls")]
    List(ListArgs),

    /// Find notes by topic, text, index, keyword or edition
    Find(FindArgs),

    /// Prefix completion for notes and keywords
    Complete(CompleteArgs),

    /// Manage book editions notes can cite
    Edition(EditionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note topic
    pub topic: String,

    /// Parent note (index or ID prefix)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Note body
    #[arg(long)]
    pub text: Option<String>,

    /// Keyword (can be specified multiple times)
    #[arg(short, long = "keyword", action = ArgAction::Append)]
    pub keywords: Vec<String>,

    /// Edition link as ID or ID:annotation (can be specified multiple times)
    #[arg(short, long = "edition", action = ArgAction::Append)]
    pub editions: Vec<String>,

    /// Related note (can be specified multiple times)
    #[arg(short, long = "related", action = ArgAction::Append)]
    pub related: Vec<String>,

    /// Copy keywords and editions from the parent note
    #[arg(long, requires = "parent")]
    pub inherit: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note index or ID prefix
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note index or ID prefix
    pub note: String,

    /// New topic
    #[arg(long)]
    pub topic: Option<String>,

    /// New body
    #[arg(long)]
    pub text: Option<String>,

    /// New parent note (index or ID prefix)
    #[arg(short, long, conflicts_with = "no_parent")]
    pub parent: Option<String>,

    /// Make the note a top-level note
    #[arg(long)]
    pub no_parent: bool,

    /// Keyword (replaces all keywords, can be specified multiple times)
    #[arg(short, long = "keyword", action = ArgAction::Append)]
    pub keywords: Vec<String>,

    /// Remove all keywords
    #[arg(long, conflicts_with = "keywords")]
    pub clear_keywords: bool,

    /// Edition link as ID or ID:annotation (replaces all edition links)
    #[arg(short, long = "edition", action = ArgAction::Append)]
    pub editions: Vec<String>,

    /// Remove all edition links
    #[arg(long, conflicts_with = "editions")]
    pub clear_editions: bool,

    /// Related note (replaces all related notes)
    #[arg(short, long = "related", action = ArgAction::Append)]
    pub related: Vec<String>,

    /// Remove all related notes
    #[arg(long, conflicts_with = "related")]
    pub clear_related: bool,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note index or ID prefix
    pub note: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Top-level notes per page (defaults to the configured page size)
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `find` command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Topic contains (case-insensitive)
    #[arg(short = 'T', long)]
    pub topic: Option<String>,

    /// Text contains (case-insensitive)
    #[arg(long)]
    pub text: Option<String>,

    /// Index or anything below it
    #[arg(short, long)]
    pub index: Option<String>,

    /// Keyword equals (case-insensitive)
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Linked to edition ID
    #[arg(short, long)]
    pub edition: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `complete` command
#[derive(Parser, Debug)]
pub struct CompleteArgs {
    #[command(subcommand)]
    pub target: CompleteTarget,

    /// Maximum number of suggestions
    #[arg(short = 'n', long, global = true, default_value_t = 10)]
    pub limit: usize,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum CompleteTarget {
    /// Notes whose topic or index starts with the query
    Notes {
        /// Query prefix
        #[arg(default_value = "")]
        query: String,
    },

    /// Keywords starting with the query
    Keywords {
        /// Query prefix
        #[arg(default_value = "")]
        query: String,
    },
}

/// Arguments for the `edition` command
#[derive(Parser, Debug)]
pub struct EditionArgs {
    #[command(subcommand)]
    pub action: EditionAction,
}

#[derive(Subcommand, Debug)]
pub enum EditionAction {
    /// Add a book edition
    Add {
        /// Edition title
        title: String,
    },

    /// List book editions
    #[command(name = "ls")]
    List {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Show an edition and the notes citing it
    Show {
        /// Edition ID
        id: String,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
