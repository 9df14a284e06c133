// src/e_browse.rs
//! Glue between the package service and the tree builder, plus the plain
//! text forms the command line prints.
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;

use crate::e_examples::list_examples;
use crate::e_folder::{count_targets, group_by_folder, Folder};
use crate::e_id::IdGenerator;
use crate::e_service::PackageService;
use crate::e_target::{Package, Target};

/// Opens `manifest` and returns its packages.
pub async fn load_packages<S: PackageService>(service: &S, manifest: &Path) -> Result<Vec<Package>> {
    service
        .open_manifest(manifest)
        .await
        .with_context(|| format!("Failed to open {}", manifest.display()))?;
    let packages = service
        .list_packages()
        .await
        .context("Failed to list packages")?;
    info!("{} packages in {}", packages.len(), manifest.display());
    Ok(packages)
}

/// Keeps only the package called `name`, or all packages when `name` is `None`.
pub fn select_packages(packages: Vec<Package>, name: Option<&str>) -> Result<Vec<Package>> {
    let Some(name) = name else {
        return Ok(packages);
    };
    let selected: Vec<Package> = packages.into_iter().filter(|p| p.name == name).collect();
    if selected.is_empty() {
        bail!("no package named '{}'", name);
    }
    Ok(selected)
}

/// A package's matching examples, tagged with the package they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleListing {
    pub package: String,
    pub version: String,
    pub examples: Vec<Target>,
}

/// One listing per package, in package order.
pub fn example_listings(packages: &[Package], filter: &str) -> Vec<ExampleListing> {
    packages
        .iter()
        .map(|pkg| ExampleListing {
            package: pkg.name.clone(),
            version: pkg.version.clone(),
            examples: list_examples(pkg, filter),
        })
        .collect()
}

/// One folder tree per package, each holding that package's matching examples.
pub fn example_trees(ids: &IdGenerator, packages: &[Package], filter: &str) -> Vec<Folder> {
    packages
        .iter()
        .map(|pkg| group_by_folder(ids, pkg, list_examples(pkg, filter)))
        .collect()
}

pub fn format_packages(packages: &[Package]) -> String {
    let mut out = String::new();
    for pkg in packages {
        let _ = writeln!(out, "{} {} {}", pkg.name, pkg.version, pkg.manifest_path);
    }
    out
}

pub fn format_examples(listing: &ExampleListing) -> String {
    let mut out = String::new();
    for example in &listing.examples {
        let _ = writeln!(out, "{} {} {}", listing.package, example.name, example.source_path);
    }
    out
}

/// Indented outline of a tree: folders by name, targets as `name (path)`.
pub fn format_tree(root: &Folder) -> String {
    let mut out = String::new();
    let _ = match root.version() {
        Some(version) => writeln!(
            out,
            "{} {} [{} examples]",
            root.name(),
            version,
            count_targets(root)
        ),
        None => writeln!(out, "{}", root.name()),
    };
    write_children(&mut out, root, 1);
    out
}

fn write_children(out: &mut String, folder: &Folder, depth: usize) {
    let indent = "  ".repeat(depth);
    for target in folder.targets() {
        let _ = writeln!(out, "{}{} ({})", indent, target.name, target.source_path);
    }
    for child in folder.folders() {
        let _ = writeln!(out, "{}{}", indent, child.name());
        write_children(out, child, depth + 1);
    }
}
