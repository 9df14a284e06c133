//! # cargo-e-tree
//!
//! Shows the examples of a Rust package as a folder tree mirroring their
//! source paths.
//!
//! ## Quick Start
//! ```sh
//! cargo e-tree
//! cargo e-tree examples --filter demo
//! cargo e-tree --json tree --package my-crate
//! ```

use std::env;

use anyhow::Result;
use cargo_e_tree::e_browse::{
    example_listings, example_trees, format_examples, format_packages, format_tree, load_packages,
    select_packages,
};
use cargo_e_tree::e_cli::{strip_cargo_subcommand, Command};
use cargo_e_tree::prelude::*;
use cargo_e_tree::{resolve_manifest, Cli};
use clap::Parser;
use log::debug;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse_from(strip_cargo_subcommand(env::args().collect()));
    debug!("CLI options: {:?}", cli);

    let manifest = resolve_manifest(cli.manifest_path.as_deref(), cli.workspace)?;
    let service = CargoMetadataService::new();
    let packages = load_packages(&service, &manifest).await?;

    match cli.command() {
        Command::Packages => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&packages)?);
            } else {
                print!("{}", format_packages(&packages));
            }
        }
        Command::Examples(selection) => {
            let packages = select_packages(packages, selection.package.as_deref())?;
            let listings = example_listings(&packages, &selection.filter);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                for listing in &listings {
                    print!("{}", format_examples(listing));
                }
            }
        }
        Command::Tree(selection) => {
            let packages = select_packages(packages, selection.package.as_deref())?;
            let trees = example_trees(IdGenerator::global(), &packages, &selection.filter);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&trees)?);
            } else {
                for tree in &trees {
                    print!("{}", format_tree(tree));
                }
            }
        }
    }

    Ok(())
}
