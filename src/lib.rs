//! # cargo-e-tree
//!
//! Groups a Rust package's example targets into a folder tree that mirrors
//! their source paths.
//!
//! The flow is: open a manifest through a [`PackageService`], list its
//! packages, pick each package's examples with [`list_examples`], and group
//! them with [`group_by_folder`].
//!
//! ```
//! use cargo_e_tree::prelude::*;
//!
//! let pkg = Package {
//!     id: "pkg 0.1.0".into(),
//!     name: "pkg".into(),
//!     version: "0.1.0".into(),
//!     manifest_path: "/pkg/Cargo.toml".into(),
//!     targets: vec![
//!         Target::new("pong", "/pkg/examples/games/pong.rs", &["example"]),
//!         Target::new("hello", "/pkg/examples/hello.rs", &["example"]),
//!     ],
//! };
//! let ids = IdGenerator::new();
//! let root = group_by_folder(&ids, &pkg, list_examples(&pkg, ""));
//! assert_eq!(count_targets(&root), 2);
//! assert!(locate_folder(&root, root.id()).is_some());
//! ```

pub mod prelude {
    pub use crate::e_examples::list_examples;
    pub use crate::e_folder::{count_targets, group_by_folder, locate_folder, Folder, FolderKind};
    pub use crate::e_id::IdGenerator;
    pub use crate::e_service::{
        CargoMetadataService, PackageService, ServiceError, StaticPackageService,
    };
    pub use crate::e_target::{Package, Target};
}

pub mod e_browse;
pub mod e_cli;
pub use e_cli::Cli;
pub mod e_examples;
pub use e_examples::list_examples;
pub mod e_folder;
pub use e_folder::{count_targets, group_by_folder, locate_folder, Folder};
pub mod e_id;
pub mod e_manifest;
pub use e_manifest::{locate_manifest, resolve_manifest};
pub mod e_service;
pub use e_service::{PackageService, ServiceError};
pub mod e_target;
pub use e_target::{Package, Target};
