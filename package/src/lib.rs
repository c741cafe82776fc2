//! Go package resolution.
//!
//! Turns package specifiers given on the command line into [`PackageInfo`]
//! values. Specifiers are path-cleaned first, so `example.com/hello/` and
//! `example.com/./hello` name the same package. Lookup goes through a
//! [`PackageSource`], which stands in for the Go module graph.

#![warn(missing_docs)]

mod clean;
mod source;

pub use clean::clean_import_path;
pub use source::{GopathSource, MemorySource, PackageMeta, PackageSource};

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Import path of the package that ships the binding support files.
pub const BIND_SUPPORT_PACKAGE: &str = "golang.org/x/mobile/bind";

/// A resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Cleaned import path, never with a trailing separator.
    pub import_path: String,
    /// Directory holding the package sources.
    pub source_dir: PathBuf,
    /// Name from the `package` clause.
    pub name: String,
    /// Whether this is a `package main`.
    pub is_command: bool,
}

impl PackageInfo {
    /// Last segment of the import path (`asset` for `golang.org/x/mobile/asset`).
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.import_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.import_path)
    }
}

/// What kind of package a caller needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindMode {
    /// Library packages only; binding a `package main` is an error.
    #[default]
    Library,
    /// Command packages only.
    Command,
}

/// Why a specifier could not be resolved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// No package exists at the cleaned import path.
    #[error("package not found")]
    NotFound,
    /// The package exists but is the wrong kind for the current mode.
    #[error("package kind does not match the binding mode")]
    Ambiguous,
}

/// A specifier that failed to resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot resolve {specifier:?}: {kind}")]
pub struct ResolutionError {
    /// The specifier as given.
    pub specifier: String,
    /// Failure kind.
    pub kind: ResolutionErrorKind,
}

/// Resolves specifiers against a [`PackageSource`].
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
    mode: BindMode,
}

impl<S: PackageSource> Resolver<S> {
    /// A resolver in [`BindMode::Library`] mode.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            mode: BindMode::Library,
        }
    }

    /// Set the binding mode.
    #[must_use]
    pub const fn mode(mut self, mode: BindMode) -> Self {
        self.mode = mode;
        self
    }

    /// The underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Resolve every specifier, in order. Stops at the first failure.
    pub fn resolve<I>(&self, specifiers: I) -> Result<Vec<PackageInfo>, ResolutionError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        specifiers
            .into_iter()
            .map(|spec| self.resolve_one(spec.as_ref()))
            .collect()
    }

    /// Resolve a single specifier.
    pub fn resolve_one(&self, specifier: &str) -> Result<PackageInfo, ResolutionError> {
        let fail = |kind| ResolutionError {
            specifier: specifier.to_string(),
            kind,
        };

        let import_path = clean_import_path(specifier);
        if import_path == "." || import_path.starts_with('/') || import_path.starts_with("..") {
            return Err(fail(ResolutionErrorKind::NotFound));
        }

        let meta = self
            .source
            .lookup(&import_path)
            .ok_or_else(|| fail(ResolutionErrorKind::NotFound))?;
        let is_command = meta.name == "main";
        let wanted = match self.mode {
            BindMode::Library => !is_command,
            BindMode::Command => is_command,
        };
        if !wanted {
            return Err(fail(ResolutionErrorKind::Ambiguous));
        }

        log::debug!("resolved {import_path} -> {}", meta.dir.display());
        Ok(PackageInfo {
            import_path,
            source_dir: meta.dir,
            name: meta.name,
            is_command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MemorySource {
        MemorySource::new()
            .with("golang.org/x/mobile/asset", "/go/src/golang.org/x/mobile/asset", "asset")
            .with("example.com/cmd/tool", "/go/src/example.com/cmd/tool", "main")
    }

    #[test]
    fn short_name_is_last_segment() {
        let pkg = Resolver::new(source())
            .resolve_one("golang.org/x/mobile/asset")
            .unwrap();
        assert_eq!(pkg.short_name(), "asset");
        assert!(!pkg.is_command);
    }

    #[test]
    fn library_mode_rejects_main() {
        let err = Resolver::new(source())
            .resolve_one("example.com/cmd/tool")
            .unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::Ambiguous);
    }

    #[test]
    fn command_mode_rejects_library() {
        let resolver = Resolver::new(source()).mode(BindMode::Command);
        assert!(resolver.resolve_one("example.com/cmd/tool").unwrap().is_command);
        let err = resolver.resolve_one("golang.org/x/mobile/asset").unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::Ambiguous);
    }

    #[test]
    fn degenerate_specifiers_are_not_found() {
        let resolver = Resolver::new(source());
        for spec in ["", ".", "/", "../up", "/abs/path"] {
            let err = resolver.resolve_one(spec).unwrap_err();
            assert_eq!(err.kind, ResolutionErrorKind::NotFound, "{spec:?}");
            assert_eq!(err.specifier, spec);
        }
    }
}
