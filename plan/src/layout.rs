use std::path::{Path, PathBuf};

use mobind_package::PackageInfo;

/// Scratch directory layout below the work root.
#[derive(Debug, Clone)]
pub struct WorkLayout {
    work: PathBuf,
}

impl WorkLayout {
    /// Layout rooted at `work`.
    pub fn new(work: impl Into<PathBuf>) -> Self {
        Self { work: work.into() }
    }

    /// The work root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.work
    }

    /// Generated Go glue and support sources.
    #[must_use]
    pub fn bind_dir(&self) -> PathBuf {
        self.work.join("gomobile_bind")
    }

    /// Generated-source root prepended to `GOPATH`.
    #[must_use]
    pub fn gen_root(&self) -> PathBuf {
        self.work.join("gen")
    }

    /// Generated Java sources visible to Go through the gen root.
    #[must_use]
    pub fn gen_java_dir(&self) -> PathBuf {
        self.gen_root().join("src/Java")
    }

    /// Root of the Java source tree.
    #[must_use]
    pub fn java_root(&self) -> PathBuf {
        self.work.join("android/src/main/java")
    }

    /// Java output directory for one bound package.
    #[must_use]
    pub fn java_package_dir(&self, namespace: Option<&str>, pkg: &PackageInfo) -> PathBuf {
        self.java_root().join(java_package_dir(namespace, pkg))
    }

    /// Java sources of the `go` support package.
    #[must_use]
    pub fn java_support_dir(&self) -> PathBuf {
        self.java_root().join("go")
    }

    /// Main package of the Android shared library.
    #[must_use]
    pub fn android_main(&self) -> PathBuf {
        self.work.join("androidlib/main.go")
    }

    /// `libgojni.so` for one ABI.
    #[must_use]
    pub fn jni_library(&self, abi: &str) -> PathBuf {
        self.work
            .join("android/src/main/jniLibs")
            .join(abi)
            .join("libgojni.so")
    }

    /// `javac -d` output.
    #[must_use]
    pub fn javac_output(&self) -> PathBuf {
        self.work.join("javac-output")
    }

    /// Staging tree of the AAR.
    #[must_use]
    pub fn aar_dir(&self) -> PathBuf {
        self.work.join("aar")
    }

    /// Main package of the iOS static library.
    #[must_use]
    pub fn ios_main(&self) -> PathBuf {
        self.work.join("iosbin/main.go")
    }

    /// Static archive for one architecture.
    #[must_use]
    pub fn ios_archive(&self, title: &str, goarch: &str) -> PathBuf {
        self.work.join(format!("{title}-{goarch}.a"))
    }
}

/// Java source subdirectory for `pkg`, relative to the Java root.
///
/// Without a namespace this is the package's short name; with one, the
/// dotted namespace becomes nested directories and the short name follows.
#[must_use]
pub fn java_package_dir(namespace: Option<&str>, pkg: &PackageInfo) -> PathBuf {
    let mut dir = PathBuf::new();
    if let Some(ns) = namespace.filter(|ns| !ns.is_empty()) {
        dir.extend(ns.split('.').filter(|s| !s.is_empty()));
    }
    dir.push(pkg.short_name());
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> PackageInfo {
        PackageInfo {
            import_path: "golang.org/x/mobile/asset".into(),
            source_dir: PathBuf::from("/go/src/golang.org/x/mobile/asset"),
            name: "asset".into(),
            is_command: false,
        }
    }

    #[test]
    fn default_namespace_uses_short_name() {
        assert_eq!(java_package_dir(None, &asset()), Path::new("asset"));
        assert_eq!(java_package_dir(Some(""), &asset()), Path::new("asset"));
    }

    #[test]
    fn namespace_becomes_directories() {
        assert_eq!(
            java_package_dir(Some("com.example.foo"), &asset()),
            Path::new("com/example/foo/asset")
        );
    }

    #[test]
    fn layout_paths() {
        let layout = WorkLayout::new("$WORK");
        assert_eq!(layout.bind_dir(), Path::new("$WORK/gomobile_bind"));
        assert_eq!(
            layout.jni_library("armeabi-v7a"),
            Path::new("$WORK/android/src/main/jniLibs/armeabi-v7a/libgojni.so")
        );
        assert_eq!(
            layout.java_package_dir(Some("com.example.foo"), &asset()),
            Path::new("$WORK/android/src/main/java/com/example/foo/asset")
        );
    }
}
