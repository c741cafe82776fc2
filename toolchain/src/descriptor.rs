use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Arch, PATH_LIST_SEPARATOR, Platform};

/// Environment overrides for one command.
///
/// Names are unique; setting an existing name replaces its value in place.
/// Entries keep their first insertion position so rendering is stable, but
/// equality ignores order.
#[derive(Debug, Clone, Default, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvVars(Vec<(String, String)>);

impl EnvVars {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder form of [`EnvVars::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for EnvVars {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (k, v) in iter {
            vars.set(k, v);
        }
        vars
    }
}

/// A fully resolved cross-compilation toolchain for one platform/arch pair.
///
/// Every path is absolute or otherwise final; the command builder uses them
/// verbatim. Built once per bind invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDescriptor {
    pub(crate) platform: Platform,
    pub(crate) arch: Arch,
    pub(crate) toolchain_root: PathBuf,
    pub(crate) api_level: u32,
    pub(crate) sysroot: PathBuf,
    pub(crate) cc: PathBuf,
    pub(crate) cxx: PathBuf,
    pub(crate) compile_flags: Vec<String>,
    pub(crate) include_flags: Vec<String>,
    pub(crate) linker_flags: Vec<String>,
    pub(crate) abi: String,
}

impl TargetDescriptor {
    /// Target platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Target architecture.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }

    /// Root of the compiler toolchain.
    #[must_use]
    pub fn toolchain_root(&self) -> &Path {
        &self.toolchain_root
    }

    /// Platform API level (Android) or minimum OS major version (iOS).
    #[must_use]
    pub const fn api_level(&self) -> u32 {
        self.api_level
    }

    /// System root handed to the C compiler.
    #[must_use]
    pub fn sysroot(&self) -> &Path {
        &self.sysroot
    }

    /// C compiler.
    #[must_use]
    pub fn cc(&self) -> &Path {
        &self.cc
    }

    /// C++ compiler.
    #[must_use]
    pub fn cxx(&self) -> &Path {
        &self.cxx
    }

    /// Target/sysroot flags shared by compiling and linking.
    #[must_use]
    pub fn compile_flags(&self) -> &[String] {
        &self.compile_flags
    }

    /// Extra `-I` flags appended to the compile flags.
    #[must_use]
    pub fn include_flags(&self) -> &[String] {
        &self.include_flags
    }

    /// Complete linker flag bundle.
    #[must_use]
    pub fn linker_flags(&self) -> &[String] {
        &self.linker_flags
    }

    /// ABI directory name (`armeabi-v7a`) or clang arch (`armv7`) on iOS.
    #[must_use]
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// `<goos>_<goarch>`, the suffix of per-target package directories.
    #[must_use]
    pub fn pkg_suffix(&self) -> String {
        format!("{}_{}", self.platform.goos(), self.arch.goarch())
    }

    /// Environment for the native build step.
    ///
    /// `gen_root` is prepended to `gopath` to form `GOPATH`.
    #[must_use]
    pub fn cross_env(&self, gen_root: &Path, gopath: &[PathBuf]) -> EnvVars {
        let cflags = self
            .compile_flags
            .iter()
            .chain(&self.include_flags)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let ldflags = self.linker_flags.join(" ");

        let mut search = gen_root.display().to_string();
        for entry in gopath {
            search.push(PATH_LIST_SEPARATOR);
            search.push_str(&entry.display().to_string());
        }

        let mut env = EnvVars::new()
            .with("GOOS", self.platform.goos())
            .with("GOARCH", self.arch.goarch())
            .with("CC", self.cc.display().to_string())
            .with("CXX", self.cxx.display().to_string())
            .with("CGO_CFLAGS", cflags.clone())
            .with("CGO_CPPFLAGS", cflags)
            .with("CGO_LDFLAGS", ldflags)
            .with("CGO_ENABLED", "1");
        if self.arch == Arch::Arm {
            env.set("GOARM", "7");
        }
        env.with("GOPATH", search)
    }
}
