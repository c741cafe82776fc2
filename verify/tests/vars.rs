use std::path::{Path, PathBuf};

use mobind_package::PackageInfo;
use mobind_toolchain::HostPlatform;
use mobind_verify::{TraceVars, diff, golden};

fn asset() -> PackageInfo {
    PackageInfo {
        import_path: "golang.org/x/mobile/asset".into(),
        source_dir: PathBuf::from("/gopath/src/golang.org/x/mobile/asset"),
        name: "asset".into(),
        is_command: false,
    }
}

fn vars(namespace: Option<&str>) -> TraceVars {
    TraceVars::android(
        &HostPlatform::new("windows", "x86", ".exe"),
        "$ANDROID_HOME/platforms/android-23",
        namespace,
        &asset(),
        Path::new("/gopath"),
    )
}

#[test]
fn default_namespace() {
    let v = vars(None);
    assert_eq!(v.gobind_java_cmd, "gobind -lang=java");
    assert_eq!(v.java_pkg_dir, "asset");
    assert_eq!(vars(Some("")), v);
}

#[test]
fn custom_namespace() {
    let v = vars(Some("com.example.foo"));
    assert_eq!(v.gobind_java_cmd, "gobind -lang=java -javapkg=com.example.foo");
    assert_eq!(v.java_pkg_dir, "com/example/foo/asset");
}

#[test]
fn golden_renders_host_values() {
    let out = golden::bind_android(&vars(None)).unwrap();
    assert!(out.starts_with("GOMOBILE=/gopath/pkg/gomobile\nWORK=$WORK\n"));
    assert!(out.contains("/NDK/toolchains/llvm/prebuilt/windows-x86/bin/clang.exe "));
    assert!(out.contains(
        "\ngobind -lang=java -outdir=$WORK/android/src/main/java/asset golang.org/x/mobile/asset\n"
    ));
    assert!(out.contains("-bootclasspath $ANDROID_HOME/platforms/android-23/android.jar"));
    assert!(!out.contains("{{"));
}

#[test]
fn namespaces_differ_only_in_generator_lines() {
    let plain = golden::bind_android(&vars(None)).unwrap();
    let named = golden::bind_android(&vars(Some("com.example.foo"))).unwrap();
    let changed = diff(&named, &plain).unwrap();

    let removed: Vec<_> = changed.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(
        removed,
        vec![
            "- mkdir -p $WORK/android/src/main/java/asset",
            "- gobind -lang=java -outdir=$WORK/android/src/main/java/asset golang.org/x/mobile/asset",
            "- gobind -lang=java -outdir=$WORK/android/src/main/java/go",
        ]
    );
}
