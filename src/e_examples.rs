// src/e_examples.rs
use log::debug;

use crate::e_target::{is_separator, Package, Target};

/// Returns the package's example targets whose name or source path contains
/// `filter`, ignoring case. An empty filter keeps every example.
///
/// Source paths of the returned targets are rewritten relative to the
/// package's `examples/` directory, so `/pkg/examples/games/pong.rs` becomes
/// `games/pong.rs`. Order follows `pkg.targets`.
///
/// # Example
/// ```
/// use cargo_e_tree::e_examples::list_examples;
/// use cargo_e_tree::e_target::{Package, Target};
///
/// let pkg = Package {
///     id: "pkg 0.1.0".into(),
///     name: "pkg".into(),
///     version: "0.1.0".into(),
///     manifest_path: "/pkg/Cargo.toml".into(),
///     targets: vec![Target::new("demo", "/pkg/examples/demo.rs", &["example"])],
/// };
/// let examples = list_examples(&pkg, "DEMO");
/// assert_eq!(examples.len(), 1);
/// assert_eq!(examples[0].source_path, "demo.rs");
/// ```
pub fn list_examples(pkg: &Package, filter: &str) -> Vec<Target> {
    let needle = filter.to_lowercase();
    let manifest_dir = pkg.manifest_dir();

    let examples: Vec<Target> = pkg
        .examples()
        .filter(|target| {
            needle.is_empty()
                || target.name.to_lowercase().contains(&needle)
                || target.source_path.to_lowercase().contains(&needle)
        })
        .map(|target| Target {
            name: target.name.clone(),
            source_path: relative_to_examples(manifest_dir, &target.source_path),
            kind: target.kind.clone(),
        })
        .collect();

    debug!(
        "{}: {} of {} targets are examples matching {:?}",
        pkg.name,
        examples.len(),
        pkg.targets.len(),
        filter
    );
    examples
}

/// Strips `manifest_dir` (at a path boundary only) and then a leading
/// `examples` directory from `source_path`.
pub fn relative_to_examples(manifest_dir: &str, source_path: &str) -> String {
    let mut rest = source_path;

    if !manifest_dir.is_empty() {
        if let Some(stripped) = rest.strip_prefix(manifest_dir) {
            if stripped.is_empty()
                || stripped.starts_with(is_separator)
                || manifest_dir.ends_with(is_separator)
            {
                rest = stripped.trim_start_matches(is_separator);
            }
        }
    }

    if let Some(after) = rest.strip_prefix("examples") {
        if after.starts_with(is_separator) {
            rest = after.trim_start_matches(is_separator);
        }
    }

    rest.to_string()
}
