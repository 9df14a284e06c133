use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "cargo-e-tree shows a package's examples as a folder tree.", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Cargo.toml to open, or the directory holding it. Falls back to $CARGO_MANIFEST, then cargo locate-project."
    )]
    pub manifest_path: Option<PathBuf>,

    #[arg(
        long,
        short = 'w',
        global = true,
        help = "When locating the manifest, use the workspace root."
    )]
    pub workspace: bool,

    #[arg(long, global = true, help = "Print JSON instead of plain text.")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the packages of the opened manifest.
    Packages,
    /// List example targets, paths relative to each package's examples directory.
    Examples(Selection),
    /// Group example targets into a folder tree (the default).
    Tree(Selection),
}

#[derive(Args, Debug, Clone, Default)]
pub struct Selection {
    #[arg(
        long,
        short = 'f',
        default_value = "",
        help = "Only examples whose name or path contains this text (case-insensitive)."
    )]
    pub filter: String,

    #[arg(long, short = 'p', help = "Only this package.")]
    pub package: Option<String>,
}

impl Cli {
    /// The subcommand to run; a bare invocation shows the tree of everything.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Tree(Selection::default()))
    }
}

/// Drops the subcommand name cargo inserts when run as `cargo e-tree`.
pub fn strip_cargo_subcommand(mut args: Vec<String>) -> Vec<String> {
    if args.len() > 1 && args[1] == "e-tree" {
        args.remove(1);
    }
    args
}
