// src/e_manifest.rs
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use log::debug;

/// Environment variable naming a directory that holds the manifest to open.
pub const MANIFEST_ENV: &str = "CARGO_MANIFEST";

/// Locate the Cargo.toml by invoking `cargo locate-project --message-format plain`.
/// If `workspace` is true, the `--workspace` flag is added so that the manifest
/// for the workspace root is returned.
pub fn locate_manifest(workspace: bool) -> Result<PathBuf> {
    let mut args = vec!["locate-project", "--message-format", "plain"];
    if workspace {
        args.push("--workspace");
    }

    let output = Command::new("cargo")
        .args(&args)
        .output()
        .context("failed to run cargo locate-project")?;
    if !output.status.success() {
        bail!(
            "cargo locate-project failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let manifest = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if manifest.is_empty() {
        bail!("No Cargo.toml found");
    }
    Ok(PathBuf::from(manifest))
}

/// Picks the manifest to open: an explicit path wins, then the directory named
/// by `CARGO_MANIFEST`, then whatever `cargo locate-project` reports.
///
/// An explicit path may name either the manifest itself or its directory.
pub fn resolve_manifest(explicit: Option<&Path>, workspace: bool) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!("using manifest from command line: {}", path.display());
        return Ok(manifest_in(path));
    }

    if let Ok(dir) = env::var(MANIFEST_ENV) {
        let manifest = Path::new(&dir).join("Cargo.toml");
        if !manifest.exists() {
            return Err(anyhow!(
                "{} is set to '{}', but no Cargo.toml found there.",
                MANIFEST_ENV,
                dir
            ));
        }
        debug!("using manifest from {}: {}", MANIFEST_ENV, manifest.display());
        return Ok(manifest);
    }

    locate_manifest(workspace)
}

/// `path` if it names a file, otherwise `path/Cargo.toml`.
fn manifest_in(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join("Cargo.toml")
    } else {
        path.to_path_buf()
    }
}
