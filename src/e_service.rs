// src/e_service.rs
//! The boundary to whatever knows about packages: open a manifest, then list
//! the packages it describes. Each call is awaited on its own; nothing is
//! pipelined and nothing is retried here.
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use cargo_metadata::{Metadata, MetadataCommand};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::e_target::{Package, Target};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The path does not exist or cargo refused to read it as a manifest.
    #[error("invalid manifest {}: {message}", .path.display())]
    InvalidManifest { path: PathBuf, message: String },
    /// `list_packages` was called before any manifest was opened successfully.
    #[error("no manifest has been opened")]
    NoManifest,
    #[error("package service unavailable: {0}")]
    Unavailable(String),
}

pub trait PackageService {
    /// Opens the manifest at `manifest_path`. On failure the previously opened
    /// manifest, if any, stays current.
    fn open_manifest(
        &self,
        manifest_path: &Path,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Packages of the most recently opened manifest.
    fn list_packages(&self) -> impl Future<Output = Result<Vec<Package>, ServiceError>> + Send;
}

/// Reads packages through `cargo metadata --no-deps`.
///
/// Only workspace members are reported, which for a plain package manifest
/// is the package itself.
#[derive(Debug, Default)]
pub struct CargoMetadataService {
    metadata: RwLock<Option<Metadata>>,
}

impl CargoMetadataService {
    pub fn new() -> Self {
        CargoMetadataService {
            metadata: RwLock::new(None),
        }
    }
}

impl PackageService for CargoMetadataService {
    async fn open_manifest(&self, manifest_path: &Path) -> Result<(), ServiceError> {
        let path = manifest_path.to_path_buf();
        if !path.is_file() {
            return Err(ServiceError::InvalidManifest {
                path,
                message: "no such file".to_string(),
            });
        }

        debug!("running cargo metadata for {}", path.display());
        let command_path = path.clone();
        let result = tokio::task::spawn_blocking(move || {
            MetadataCommand::new()
                .manifest_path(command_path)
                .no_deps()
                .exec()
        })
        .await
        .map_err(|err| ServiceError::Unavailable(format!("metadata task failed: {}", err)))?;

        match result {
            Ok(metadata) => {
                info!(
                    "opened {} ({} workspace members)",
                    path.display(),
                    metadata.workspace_members.len()
                );
                *self.metadata.write().await = Some(metadata);
                Ok(())
            }
            Err(cargo_metadata::Error::CargoMetadata { stderr }) => {
                warn!("cargo rejected {}: {}", path.display(), stderr.trim());
                Err(ServiceError::InvalidManifest {
                    path,
                    message: stderr.trim().to_string(),
                })
            }
            Err(cargo_metadata::Error::Io(err)) => Err(ServiceError::Unavailable(format!(
                "failed to run cargo: {}",
                err
            ))),
            Err(other) => Err(ServiceError::Unavailable(other.to_string())),
        }
    }

    async fn list_packages(&self) -> Result<Vec<Package>, ServiceError> {
        let guard = self.metadata.read().await;
        let metadata = guard.as_ref().ok_or(ServiceError::NoManifest)?;
        Ok(packages_from_metadata(metadata))
    }
}

/// Converts cargo's view of the workspace members into our snapshot types.
pub fn packages_from_metadata(metadata: &Metadata) -> Vec<Package> {
    metadata
        .workspace_packages()
        .into_iter()
        .map(|package| Package {
            id: package.id.repr.clone(),
            name: package.name.to_string(),
            version: package.version.to_string(),
            manifest_path: package.manifest_path.to_string(),
            targets: package
                .targets
                .iter()
                .map(|target| Target {
                    name: target.name.clone(),
                    source_path: target.src_path.to_string(),
                    kind: target.kind.iter().filter_map(kind_tag).collect(),
                })
                .collect(),
        })
        .collect()
}

/// Cargo's textual tag for a target kind, taken from its serialized form.
fn kind_tag<K: Serialize>(kind: &K) -> Option<String> {
    match serde_json::to_value(kind) {
        Ok(serde_json::Value::String(tag)) => Some(tag),
        _ => None,
    }
}

/// Serves a fixed set of packages per manifest path. No process is spawned,
/// which makes it the service of choice for tests and embedders that already
/// hold package data.
#[derive(Debug, Default)]
pub struct StaticPackageService {
    manifests: HashMap<PathBuf, Vec<Package>>,
    opened: RwLock<Option<PathBuf>>,
}

impl StaticPackageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest_path: impl Into<PathBuf>, packages: Vec<Package>) -> Self {
        self.manifests.insert(manifest_path.into(), packages);
        self
    }
}

impl PackageService for StaticPackageService {
    async fn open_manifest(&self, manifest_path: &Path) -> Result<(), ServiceError> {
        if !self.manifests.contains_key(manifest_path) {
            return Err(ServiceError::InvalidManifest {
                path: manifest_path.to_path_buf(),
                message: "not a known manifest".to_string(),
            });
        }
        *self.opened.write().await = Some(manifest_path.to_path_buf());
        Ok(())
    }

    async fn list_packages(&self) -> Result<Vec<Package>, ServiceError> {
        let opened = self.opened.read().await;
        let path = opened.as_ref().ok_or(ServiceError::NoManifest)?;
        Ok(self.manifests.get(path).cloned().unwrap_or_default())
    }
}
