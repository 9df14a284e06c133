// src/e_folder.rs
//! Groups a flat list of targets into a folder tree keyed by source path.
//!
//! The tree is a trie over `/`-separated path segments: every distinct
//! directory path gets exactly one [`Folder`], and children keep the order in
//! which their segment was first seen. After construction a normalization pass
//! makes sure no folder both holds targets and has subfolders; direct targets
//! of such a folder move into a synthetic `"/"` child placed first.
use log::{debug, trace};
use serde::Serialize;

use crate::e_id::IdGenerator;
use crate::e_target::{Package, Target};

/// Name of the synthetic folder that receives a mixed folder's own targets.
pub const ROOT_TARGETS_FOLDER: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FolderKind {
    /// The root of a tree; named after the package.
    Package { version: String },
    Folder,
}

/// A node of the folder tree.
///
/// Folders are only built by [`group_by_folder`], which draws every id from an
/// [`IdGenerator`]; there is no public constructor, so a tree with duplicate
/// ids cannot be assembled by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    id: String,
    #[serde(flatten)]
    kind: FolderKind,
    name: String,
    targets: Vec<Target>,
    folders: Vec<Folder>,
}

impl Folder {
    fn new(ids: &IdGenerator, kind: FolderKind, name: impl Into<String>) -> Self {
        Folder {
            id: ids.generate(),
            kind,
            name: name.into(),
            targets: Vec::new(),
            folders: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &FolderKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The package version, present on the root only.
    pub fn version(&self) -> Option<&str> {
        match &self.kind {
            FolderKind::Package { version } => Some(version),
            FolderKind::Folder => None,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Finds the child named `name` (exact, case-sensitive match), creating it
    /// at the end of `folders` if it does not exist yet.
    fn child_mut(&mut self, ids: &IdGenerator, name: &str) -> &mut Folder {
        let index = match self.folders.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                self.folders
                    .push(Folder::new(ids, FolderKind::Folder, name));
                self.folders.len() - 1
            }
        };
        &mut self.folders[index]
    }

    /// Bottom-up: children first, then this folder.
    fn normalize(&mut self, ids: &IdGenerator) {
        for child in &mut self.folders {
            child.normalize(ids);
        }
        if !self.folders.is_empty() && !self.targets.is_empty() {
            trace!(
                "folder '{}' mixes {} targets with {} folders, sinking targets",
                self.name,
                self.targets.len(),
                self.folders.len()
            );
            let mut sink = Folder::new(ids, FolderKind::Folder, ROOT_TARGETS_FOLDER);
            sink.targets = std::mem::take(&mut self.targets);
            self.folders.insert(0, sink);
        }
    }

    /// Pre-order traversal: the folder itself, then each child subtree in order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Folder>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Folder;

    fn next(&mut self) -> Option<Self::Item> {
        let folder = self.stack.pop()?;
        self.stack.extend(folder.folders.iter().rev());
        Some(folder)
    }
}

/// Builds the folder tree for `targets`, rooted at a folder named after `pkg`.
///
/// A target whose source path has no `/` (including an empty path) sits
/// directly on the root. Otherwise its file name is dropped and the remaining
/// segments select, or create, one folder per level.
///
/// ```
/// use cargo_e_tree::e_folder::{count_targets, group_by_folder};
/// use cargo_e_tree::e_id::IdGenerator;
/// use cargo_e_tree::e_target::{Package, Target};
///
/// let pkg = Package {
///     id: "demo 0.1.0".into(),
///     name: "demo".into(),
///     version: "0.1.0".into(),
///     manifest_path: "/demo/Cargo.toml".into(),
///     targets: vec![],
/// };
/// let targets = vec![
///     Target::new("x", "x.rs", &["example"]),
///     Target::new("y", "sub/y.rs", &["example"]),
/// ];
/// let root = group_by_folder(&IdGenerator::new(), &pkg, targets);
/// assert!(root.targets().is_empty());
/// assert_eq!(root.folders()[0].name(), "/");
/// assert_eq!(root.folders()[1].name(), "sub");
/// assert_eq!(count_targets(&root), 2);
/// ```
pub fn group_by_folder<I>(ids: &IdGenerator, pkg: &Package, targets: I) -> Folder
where
    I: IntoIterator<Item = Target>,
{
    let mut root = Folder::new(
        ids,
        FolderKind::Package {
            version: pkg.version.clone(),
        },
        pkg.name.clone(),
    );

    for target in targets {
        let mut segments: Vec<&str> = target.source_path.split('/').collect();
        segments.pop();

        let mut node = &mut root;
        for segment in segments {
            node = node.child_mut(ids, segment);
        }
        node.targets.push(target);
    }

    root.normalize(ids);
    debug!(
        "grouped {} targets of {} into {} folders",
        count_targets(&root),
        pkg.name,
        root.walk().count()
    );
    root
}

/// Number of targets held by `folder` and all of its descendants.
pub fn count_targets(folder: &Folder) -> usize {
    folder.targets.len() + folder.folders.iter().map(count_targets).sum::<usize>()
}

/// Depth-first search for the folder carrying `id`, starting with `root` itself.
pub fn locate_folder<'a>(root: &'a Folder, id: &str) -> Option<&'a Folder> {
    root.walk().find(|folder| folder.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn package() -> Package {
        Package {
            id: "demo 0.1.0 (path+file:///demo)".to_string(),
            name: "demo".to_string(),
            version: "0.1.0".to_string(),
            manifest_path: "/demo/Cargo.toml".to_string(),
            targets: Vec::new(),
        }
    }

    fn targets(paths: &[&str]) -> Vec<Target> {
        paths
            .iter()
            .map(|&path| {
                let name = path
                    .rsplit('/')
                    .next()
                    .unwrap_or(path)
                    .trim_end_matches(".rs");
                Target::new(name, path, &["example"])
            })
            .collect()
    }

    fn target_names(folder: &Folder) -> Vec<&str> {
        folder.targets().iter().map(|t| t.name.as_str()).collect()
    }

    fn folder_names(folder: &Folder) -> Vec<&str> {
        folder.folders().iter().map(|f| f.name()).collect()
    }

    fn assert_normalized(root: &Folder) {
        for folder in root.walk() {
            if !folder.targets().is_empty() {
                assert!(
                    folder.folders().is_empty(),
                    "folder '{}' holds targets and folders",
                    folder.name()
                );
            }
        }
    }

    #[test]
    fn test_nested_paths_build_one_folder_per_directory() {
        let ids = IdGenerator::new();
        let root = group_by_folder(
            &ids,
            &package(),
            targets(&["src/bin/a.rs", "src/bin/b.rs", "examples/c.rs"]),
        );

        assert_eq!(root.name(), "demo");
        assert_eq!(root.version(), Some("0.1.0"));
        assert!(root.targets().is_empty());
        assert_eq!(folder_names(&root), vec!["src", "examples"]);

        let src = &root.folders()[0];
        assert_eq!(src.kind(), &FolderKind::Folder);
        assert!(src.targets().is_empty());
        assert_eq!(folder_names(src), vec!["bin"]);
        assert_eq!(target_names(&src.folders()[0]), vec!["a", "b"]);

        let examples = &root.folders()[1];
        assert_eq!(target_names(examples), vec!["c"]);
        assert!(examples.folders().is_empty());

        assert_eq!(count_targets(&root), 3);
    }

    #[test]
    fn test_mixed_root_sinks_targets_into_slash_folder() {
        let ids = IdGenerator::new();
        let root = group_by_folder(&ids, &package(), targets(&["x.rs", "sub/y.rs"]));

        assert!(root.targets().is_empty());
        assert_eq!(folder_names(&root), vec![ROOT_TARGETS_FOLDER, "sub"]);
        let sink = &root.folders()[0];
        assert_eq!(target_names(sink), vec!["x"]);
        assert!(sink.folders().is_empty());
        assert_eq!(sink.kind(), &FolderKind::Folder);
        assert_eq!(target_names(&root.folders()[1]), vec!["y"]);
    }

    #[test]
    fn test_mixed_inner_folder_is_normalized() {
        let ids = IdGenerator::new();
        let root = group_by_folder(
            &ids,
            &package(),
            targets(&["games/pong.rs", "games/cards/poker.rs", "games/tetris.rs"]),
        );

        let games = &root.folders()[0];
        assert!(games.targets().is_empty());
        assert_eq!(folder_names(games), vec!["/", "cards"]);
        assert_eq!(target_names(&games.folders()[0]), vec!["pong", "tetris"]);
        assert_eq!(target_names(&games.folders()[1]), vec!["poker"]);
        assert_normalized(&root);
    }

    #[test]
    fn test_only_bare_files_stay_on_root() {
        let ids = IdGenerator::new();
        let root = group_by_folder(&ids, &package(), targets(&["a.rs", "b.rs"]));
        assert_eq!(target_names(&root), vec!["a", "b"]);
        assert!(root.folders().is_empty());
    }

    #[test]
    fn test_empty_source_path_is_a_root_target() {
        let ids = IdGenerator::new();
        let root = group_by_folder(
            &ids,
            &package(),
            vec![Target::new("broken", "", &["example"])],
        );
        assert_eq!(target_names(&root), vec!["broken"]);
        assert!(root.folders().is_empty());
        assert_eq!(count_targets(&root), 1);
    }

    #[test]
    fn test_segments_match_case_sensitively_in_first_seen_order() {
        let ids = IdGenerator::new();
        let root = group_by_folder(
            &ids,
            &package(),
            targets(&["zeta/a.rs", "Alpha/b.rs", "alpha/c.rs", "zeta/d.rs"]),
        );
        assert_eq!(folder_names(&root), vec!["zeta", "Alpha", "alpha"]);
        assert_eq!(target_names(&root.folders()[0]), vec!["a", "d"]);
    }

    #[test]
    fn test_count_matches_input_and_tree_is_normalized() {
        let ids = IdGenerator::new();
        let paths = [
            "a.rs",
            "one/b.rs",
            "one/two/c.rs",
            "one/two/three/d.rs",
            "one/e.rs",
            "four/f.rs",
            "four/five/g.rs",
            "",
            "one/two/h.rs",
        ];
        for len in 0..=paths.len() {
            let root = group_by_folder(&ids, &package(), targets(&paths[..len]));
            assert_eq!(count_targets(&root), len);
            assert_normalized(&root);
            for folder in root.walk() {
                if folder.folders().iter().any(|f| f.name() == ROOT_TARGETS_FOLDER) {
                    assert_eq!(folder.folders()[0].name(), ROOT_TARGETS_FOLDER);
                }
            }
        }
    }

    #[test]
    fn test_ids_unique_within_and_across_builds() {
        let ids = IdGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..10 {
            let root = group_by_folder(
                &ids,
                &package(),
                targets(&["x.rs", "a/b/c.rs", "a/d.rs", "e/f.rs"]),
            );
            for folder in root.walk() {
                assert!(seen.insert(folder.id().to_string()), "id reused");
            }
        }
        assert_eq!(seen.len(), ids.len());
    }

    #[test]
    fn test_locate_folder() {
        let ids = IdGenerator::new();
        let root = group_by_folder(&ids, &package(), targets(&["x.rs", "a/b/c.rs"]));

        assert_eq!(locate_folder(&root, root.id()), Some(&root));
        assert!(locate_folder(&root, "nonexistent-id").is_none());

        let b = &root.folders()[1].folders()[0];
        assert_eq!(b.name(), "b");
        assert_eq!(locate_folder(&root, b.id()).map(Folder::name), Some("b"));
    }

    #[test]
    fn test_walk_is_pre_order() {
        let ids = IdGenerator::new();
        let root = group_by_folder(
            &ids,
            &package(),
            targets(&["a/b/x.rs", "a/c/y.rs", "d/z.rs"]),
        );
        let order: Vec<&str> = root.walk().map(Folder::name).collect();
        assert_eq!(order, vec!["demo", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_count_on_subtree() {
        let ids = IdGenerator::new();
        let root = group_by_folder(
            &ids,
            &package(),
            targets(&["a/x.rs", "a/b/y.rs", "a/b/z.rs", "q.rs"]),
        );
        let a = root.walk().find(|f| f.name() == "a").unwrap();
        assert_eq!(count_targets(a), 3);
        assert_eq!(count_targets(&root), 4);
    }

    #[test]
    fn test_tree_serializes_with_kind_tag() {
        let ids = IdGenerator::new();
        let root = group_by_folder(&ids, &package(), targets(&["sub/y.rs"]));
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["kind"], "package");
        assert_eq!(json["version"], "0.1.0");
        assert_eq!(json["name"], "demo");
        assert_eq!(json["folders"][0]["kind"], "folder");
        assert_eq!(json["folders"][0]["targets"][0]["srcPath"], "sub/y.rs");
    }
}
