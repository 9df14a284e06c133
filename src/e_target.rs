// src/e_target.rs
use serde::{Deserialize, Serialize};

/// The role tag cargo uses for example targets.
pub const EXAMPLE_KIND: &str = "example";

/// One buildable artifact of a package (a binary, an example, a test, ...).
///
/// `kind` carries cargo's role tags verbatim; a target may have more than one
/// (a `crate-type = ["lib", "cdylib"]` example reports both, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    #[serde(rename = "srcPath")]
    pub source_path: String,
    pub kind: Vec<String>,
}

impl Target {
    pub fn new(name: impl Into<String>, source_path: impl Into<String>, kind: &[&str]) -> Self {
        Target {
            name: name.into(),
            source_path: source_path.into(),
            kind: kind.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Returns true if the target carries the `example` role tag.
    pub fn is_example(&self) -> bool {
        self.kind.iter().any(|k| k == EXAMPLE_KIND)
    }
}

/// A snapshot of one package as reported by the package service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub version: String,
    pub manifest_path: String,
    pub targets: Vec<Target>,
}

impl Package {
    /// The directory holding the manifest: `manifest_path` with a trailing
    /// `Cargo.toml` and its separator removed. A manifest at the filesystem
    /// root keeps the root separator. Paths that do not end in `Cargo.toml`
    /// are returned unchanged.
    pub fn manifest_dir(&self) -> &str {
        let path = self.manifest_path.as_str();
        match path.strip_suffix("Cargo.toml") {
            Some(dir) if dir.is_empty() => dir,
            Some(dir) if dir.len() == 1 && dir.starts_with(is_separator) => dir,
            Some(dir) if dir.ends_with(is_separator) => &dir[..dir.len() - 1],
            _ => path,
        }
    }

    pub fn examples(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_example())
    }
}

/// Both separators are accepted; package paths come from cargo on any host.
pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}
