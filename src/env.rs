use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use mobind_exec::Substitutions;
use mobind_package::GopathSource;

/// Process environment relevant to binding, captured once.
///
/// Nothing downstream reads environment variables; everything is passed
/// from here. Empty variables count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// `ANDROID_HOME`.
    pub android_home: Option<PathBuf>,
    /// `ANDROID_NDK_HOME`.
    pub android_ndk_home: Option<PathBuf>,
    /// `GOPATH` entries; defaults to `~/go`.
    pub gopath: Vec<PathBuf>,
    /// `GOROOT`.
    pub goroot: Option<PathBuf>,
    /// The user's home directory.
    pub home: Option<PathBuf>,
}

impl Environment {
    /// Snapshot the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let home = dirs::home_dir();
        let gopath = gopath_entries(env::var_os("GOPATH"), home.as_deref());
        Self {
            android_home: var_path("ANDROID_HOME"),
            android_ndk_home: var_path("ANDROID_NDK_HOME"),
            gopath,
            goroot: var_path("GOROOT"),
            home,
        }
    }

    /// The first GOPATH entry, where the gomobile cache lives.
    #[must_use]
    pub fn primary_gopath(&self) -> PathBuf {
        self.gopath
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("go"))
    }

    /// `<gopath>/pkg/gomobile`.
    #[must_use]
    pub fn gomobile_dir(&self) -> PathBuf {
        self.primary_gopath().join("pkg").join("gomobile")
    }

    /// A package source over GOPATH, then GOROOT.
    #[must_use]
    pub fn package_source(&self) -> GopathSource {
        let source = GopathSource::new(self.gopath.iter().cloned());
        match &self.goroot {
            Some(root) => source.with_goroot(root),
            None => source,
        }
    }

    /// Trace substitutions for a build in `work`.
    #[must_use]
    pub fn substitutions(&self, work: &Path) -> Substitutions {
        let mut subs = Substitutions::new()
            .work(work)
            .gomobile(self.gomobile_dir())
            .gopath(&self.gopath);
        if let Some(home) = &self.android_home {
            subs = subs.android_home(home);
        }
        if let Some(root) = &self.goroot {
            subs = subs.goroot(root);
        }
        if let Some(home) = &self.home {
            subs = subs.home(home);
        }
        subs
    }
}

fn var_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn gopath_entries(value: Option<OsString>, home: Option<&Path>) -> Vec<PathBuf> {
    let entries: Vec<PathBuf> = value
        .map(|v| env::split_paths(&v).filter(|p| !p.as_os_str().is_empty()).collect())
        .unwrap_or_default();
    if !entries.is_empty() {
        return entries;
    }
    home.map(|h| vec![h.join("go")]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gopath_defaults_to_home_go() {
        let entries = gopath_entries(None, Some(Path::new("/home/gopher")));
        assert_eq!(entries, vec![PathBuf::from("/home/gopher/go")]);
        assert_eq!(
            gopath_entries(Some(OsString::new()), Some(Path::new("/h"))),
            vec![PathBuf::from("/h/go")]
        );
        assert!(gopath_entries(None, None).is_empty());
    }

    #[test]
    fn gopath_list_is_split() {
        let joined = env::join_paths(["/a", "/b"]).unwrap();
        assert_eq!(
            gopath_entries(Some(joined), None),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn gomobile_lives_in_first_gopath() {
        let env = Environment {
            gopath: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            ..Environment::default()
        };
        assert_eq!(env.gomobile_dir(), Path::new("/a").join("pkg").join("gomobile"));
    }
}
