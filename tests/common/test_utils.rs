#![allow(dead_code)]
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A wrapper around a temporary cargo package.
pub struct TestProject {
    /// The temporary directory. When this is dropped, the directory and its contents are removed.
    pub temp_dir: TempDir,
    /// The package root, holding Cargo.toml.
    pub root: PathBuf,
}

impl TestProject {
    /// Create a library package named `project_name` with one `[[example]]`
    /// per entry of `examples`, each a path below `examples/`.
    ///
    /// Examples are declared explicitly so nested files are picked up too;
    /// cargo's auto-discovery only looks one level deep.
    pub fn new(project_name: &str, examples: &[&str]) -> IoResult<Self> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path().join(project_name);
        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("src").join("lib.rs"), "")?;

        // The empty [workspace] table keeps cargo from looking for a parent workspace.
        let mut manifest = format!(
            "[package]\nname = \"{}\"\nversion = \"0.1.0\"\nedition = \"2021\"\nautoexamples = false\n\n[workspace]\n",
            project_name
        );
        for example in examples {
            let file = root.join("examples").join(example);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&file, "fn main() {}\n")?;
            manifest.push_str(&format!(
                "\n[[example]]\nname = \"{}\"\npath = \"examples/{}\"\n",
                example_name(example),
                example
            ));
        }
        fs::write(root.join("Cargo.toml"), manifest)?;

        Ok(TestProject { temp_dir, root })
    }

    /// Returns a reference to the project root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("Cargo.toml")
    }
}

/// `games/cards/poker.rs` -> `poker`
pub fn example_name(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".rs").unwrap_or(file)
}

/// The package layout most tests use: one flat example and two nested ones.
pub fn create_games_project() -> IoResult<TestProject> {
    TestProject::new(
        "games",
        &["hello.rs", "arcade/pong.rs", "arcade/cards/poker.rs"],
    )
}
