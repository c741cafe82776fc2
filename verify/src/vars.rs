use std::collections::BTreeMap;
use std::path::{Component, Path};

use mobind_package::PackageInfo;
use mobind_plan::{GOBIND, java_package_dir};
use mobind_toolchain::{HostPlatform, PATH_LIST_SEPARATOR};

/// Values that vary between hosts and bind options in an expected trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceVars {
    /// Host OS as named in NDK prebuilt directories.
    pub goos: String,
    /// Host architecture label of NDK prebuilt directories.
    pub ndk_arch: String,
    /// Executable suffix, empty outside Windows.
    pub exe: String,
    /// SDK platform dir as it appears in the trace.
    pub android_platform: String,
    /// Generator invocation up to the output flag.
    pub gobind_java_cmd: String,
    /// Java package directory relative to the Java source root.
    pub java_pkg_dir: String,
    /// First GOPATH entry, unsubstituted.
    pub gopath: String,
    /// GOPATH list separator.
    pub path_list_sep: String,
}

impl TraceVars {
    /// Variables for binding `pkg` to Android on `host`.
    #[must_use]
    pub fn android(
        host: &HostPlatform,
        android_platform: &str,
        java_namespace: Option<&str>,
        pkg: &PackageInfo,
        gopath: &Path,
    ) -> Self {
        let namespace = java_namespace.filter(|ns| !ns.is_empty());
        let mut gobind_java_cmd = format!("{GOBIND} -lang=java");
        if let Some(ns) = namespace {
            gobind_java_cmd.push_str(&format!(" -javapkg={ns}"));
        }
        Self {
            goos: host.os().to_string(),
            ndk_arch: host.ndk_arch().to_string(),
            exe: host.exe_suffix().to_string(),
            android_platform: android_platform.to_string(),
            gobind_java_cmd,
            java_pkg_dir: to_slash(&java_package_dir(namespace, pkg)),
            gopath: gopath.display().to_string(),
            path_list_sep: PATH_LIST_SEPARATOR.to_string(),
        }
    }

    /// The variables keyed by template name.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        [
            ("goos", &self.goos),
            ("ndk_arch", &self.ndk_arch),
            ("exe", &self.exe),
            ("android_platform", &self.android_platform),
            ("gobind_java_cmd", &self.gobind_java_cmd),
            ("java_pkg_dir", &self.java_pkg_dir),
            ("gopath", &self.gopath),
            ("path_list_sep", &self.path_list_sep),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
