//! Where package metadata comes from.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata a [`PackageSource`] reports for an import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    /// Source directory.
    pub dir: PathBuf,
    /// Name from the `package` clause.
    pub name: String,
}

/// Read access to the module graph.
pub trait PackageSource {
    /// Metadata for a cleaned import path, or `None` if no such package.
    fn lookup(&self, import_path: &str) -> Option<PackageMeta>;
}

impl<S: PackageSource + ?Sized> PackageSource for &S {
    fn lookup(&self, import_path: &str) -> Option<PackageMeta> {
        (**self).lookup(import_path)
    }
}

/// Looks packages up in `GOPATH`-style trees (`<root>/src/<import path>`).
#[derive(Debug, Clone, Default)]
pub struct GopathSource {
    roots: Vec<PathBuf>,
}

impl GopathSource {
    /// Search the given GOPATH entries, in order.
    pub fn new<I, P>(gopath: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: gopath.into_iter().map(Into::into).collect(),
        }
    }

    /// Also search the standard library under `goroot`, after GOPATH.
    #[must_use]
    pub fn with_goroot(mut self, goroot: impl Into<PathBuf>) -> Self {
        self.roots.push(goroot.into());
        self
    }

    /// Search roots, in lookup order.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl PackageSource for GopathSource {
    fn lookup(&self, import_path: &str) -> Option<PackageMeta> {
        self.roots.iter().find_map(|root| {
            let dir = root.join("src").join(import_path);
            package_name(&dir).map(|name| PackageMeta { dir, name })
        })
    }
}

/// Name of the package in `dir`, from its first non-test `.go` file.
fn package_name(dir: &Path) -> Option<String> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path.extension().is_some_and(|ext| ext == "go")
                && !path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with("_test.go"))
        })
        .collect();
    files.sort();

    files
        .iter()
        .find_map(|path| fs::read_to_string(path).ok().and_then(|src| package_clause(&src)))
}

/// The identifier after `package`, skipping line and block comments.
fn package_clause(src: &str) -> Option<String> {
    let mut in_block = false;
    for line in src.lines() {
        let mut line = line.trim();
        if in_block {
            match line.find("*/") {
                Some(end) => {
                    in_block = false;
                    line = line[end + 2..].trim();
                }
                None => continue,
            }
        }
        if line.starts_with("/*") {
            match line.find("*/") {
                Some(end) => line = line[end + 2..].trim(),
                None => {
                    in_block = true;
                    continue;
                }
            }
        }
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        return line
            .strip_prefix("package")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .and_then(|rest| rest.split_whitespace().next())
            .map(str::to_string);
    }
    None
}

/// A fixed table of packages.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    packages: BTreeMap<String, PackageMeta>,
}

impl MemorySource {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package.
    #[must_use]
    pub fn with(
        mut self,
        import_path: impl Into<String>,
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Self {
        self.insert(import_path, dir, name);
        self
    }

    /// Add a package in place.
    pub fn insert(
        &mut self,
        import_path: impl Into<String>,
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
    ) {
        self.packages.insert(
            import_path.into(),
            PackageMeta {
                dir: dir.into(),
                name: name.into(),
            },
        );
    }
}

impl PackageSource for MemorySource {
    fn lookup(&self, import_path: &str) -> Option<PackageMeta> {
        self.packages.get(import_path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::package_clause;

    #[test]
    fn finds_clause_after_comments() {
        let src = "// Copyright\n\n/* multi\n line */\n// Package asset does things.\npackage asset // import \"x\"\n";
        assert_eq!(package_clause(src).as_deref(), Some("asset"));
    }

    #[test]
    fn build_tags_do_not_confuse() {
        let src = "// +build android\n\npackage main\n";
        assert_eq!(package_clause(src).as_deref(), Some("main"));
    }

    #[test]
    fn no_clause() {
        assert_eq!(package_clause("func main() {}\n"), None);
        assert_eq!(package_clause("packagefoo\n"), None);
    }
}
