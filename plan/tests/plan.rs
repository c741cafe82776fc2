//! Structured checks over generated plans.

use std::path::{Path, PathBuf};

use mobind_package::PackageInfo;
use mobind_plan::{BindOptions, BindTarget, BuildPaths, Command, Plan, Step, build};
use mobind_toolchain::{AppleSdk, Arch, HostPlatform, Ndk, TargetDescriptor};

const GOMOBILE: &str = "/gopath/pkg/gomobile";

fn asset() -> PackageInfo {
    PackageInfo {
        import_path: "golang.org/x/mobile/asset".into(),
        source_dir: PathBuf::from("/gopath/src/golang.org/x/mobile/asset"),
        name: "asset".into(),
        is_command: false,
    }
}

fn paths() -> BuildPaths {
    BuildPaths {
        work: PathBuf::from("$WORK"),
        gomobile: PathBuf::from(GOMOBILE),
        gopath: vec![PathBuf::from("/gopath")],
        bind_support: PathBuf::from("/gopath/src/golang.org/x/mobile/bind"),
    }
}

fn options(java_package: Option<&str>) -> BindOptions {
    let mut opts = BindOptions::new(vec![asset()], paths());
    opts.java_package = java_package.map(str::to_string);
    opts.flags.print_commands = true;
    opts
}

fn android(archs: &[Arch]) -> BindTarget {
    let host = HostPlatform::new("linux", "x86_64", "");
    let ndk = Ndk::new("/NDK");
    BindTarget::Android {
        targets: archs
            .iter()
            .map(|&arch| TargetDescriptor::android(&ndk, &host, arch, Path::new(GOMOBILE)))
            .collect(),
        platform: PathBuf::from("/sdk/platforms/android-23"),
    }
}

fn gobind_calls<'a>(plan: &'a Plan, lang: &str) -> Vec<&'a Command> {
    let flag = format!("-lang={lang}");
    plan.commands()
        .filter(|c| c.program == "gobind" && c.args.first() == Some(&flag))
        .collect()
}

fn go_calls<'a>(plan: &'a Plan, sub: &str) -> Vec<&'a Command> {
    plan.commands()
        .filter(|c| c.program == "go" && c.args.first().map(String::as_str) == Some(sub))
        .collect()
}

fn position(plan: &Plan, pred: impl Fn(&Step) -> bool) -> usize {
    plan.steps().iter().position(pred).expect("step not found")
}

// ============================================================================
// Android
// ============================================================================

mod android_plan {
    use super::*;

    #[test]
    fn build_is_deterministic() {
        let target = android(&[Arch::Arm]);
        let opts = options(Some("com.example.foo"));
        assert_eq!(build(&target, &opts), build(&target, &opts));
    }

    #[test]
    fn default_namespace_writes_under_short_name() {
        let plan = build(&android(&[Arch::Arm]), &options(None));
        let java = gobind_calls(&plan, "java");

        assert_eq!(java.len(), 2);
        assert_eq!(
            java[0].args,
            vec![
                "-lang=java",
                "-outdir=$WORK/android/src/main/java/asset",
                "golang.org/x/mobile/asset"
            ]
        );
        assert_eq!(
            java[1].args,
            vec!["-lang=java", "-outdir=$WORK/android/src/main/java/go"]
        );
    }

    #[test]
    fn namespace_adds_flag_and_nests_directory() {
        let plan = build(&android(&[Arch::Arm]), &options(Some("com.example.foo")));
        let java = gobind_calls(&plan, "java");

        assert_eq!(
            java[0].args,
            vec![
                "-lang=java",
                "-javapkg=com.example.foo",
                "-outdir=$WORK/android/src/main/java/com/example/foo/asset",
                "golang.org/x/mobile/asset"
            ]
        );
        assert!(java[1].args.contains(&"-javapkg=com.example.foo".to_string()));
        assert!(plan.steps().contains(&Step::MakeDir {
            path: PathBuf::from("$WORK/android/src/main/java/com/example/foo/asset")
        }));
    }

    #[test]
    fn empty_namespace_is_the_default() {
        let target = android(&[Arch::Arm]);
        assert_eq!(build(&target, &options(Some(""))), build(&target, &options(None)));
    }

    #[test]
    fn namespace_only_changes_java_generation() {
        let target = android(&[Arch::Arm]);
        let plain = build(&target, &options(None));
        let named = build(&target, &options(Some("com.example.foo")));

        assert_eq!(plain.steps().len(), named.steps().len());
        for (a, b) in plain.steps().iter().zip(named.steps()) {
            if a == b {
                continue;
            }
            match (a, b) {
                (Step::MakeDir { path: pa }, Step::MakeDir { path: pb }) => {
                    assert!(pa.ends_with("java/asset"));
                    assert!(pb.ends_with("java/com/example/foo/asset"));
                }
                (Step::Run(ca), Step::Run(cb)) => {
                    assert_eq!(ca.program, "gobind");
                    assert_eq!(cb.program, "gobind");
                    assert_eq!(ca.args[0], "-lang=java");
                }
                other => panic!("unexpected difference: {other:?}"),
            }
        }
    }

    #[test]
    fn generator_runs_java_then_go() {
        let plan = build(&android(&[Arch::Arm]), &options(None));
        let first_java = position(&plan, |s| {
            s.command().is_some_and(|c| c.args.first().is_some_and(|a| a == "-lang=java"))
        });
        let first_go = position(&plan, |s| {
            s.command().is_some_and(|c| c.args.first().is_some_and(|a| a == "-lang=go"))
        });
        let shared = position(&plan, |s| {
            s.command().is_some_and(|c| c.args.contains(&"-buildmode=c-shared".to_string()))
        });
        assert!(first_java < first_go);
        assert!(first_go < shared);

        let go = gobind_calls(&plan, "go");
        assert_eq!(
            go[0].args,
            vec!["-lang=go", "-outdir=$WORK/gomobile_bind", "golang.org/x/mobile/asset"]
        );
        assert_eq!(go[1].args, vec!["-lang=go", "-outdir=$WORK/gomobile_bind"]);
    }

    #[test]
    fn cross_env_only_on_go_commands() {
        let plan = build(&android(&[Arch::Arm]), &options(None));
        for cmd in plan.commands() {
            if cmd.program == "go" {
                assert_eq!(cmd.env.get("CGO_ENABLED"), Some("1"));
                assert_eq!(cmd.env.get("GOARM"), Some("7"));
                assert!(
                    cmd.env
                        .get("GOPATH")
                        .is_some_and(|p| p.starts_with("$WORK/gen"))
                );
            } else {
                assert!(cmd.env.is_empty(), "{} has env", cmd.program);
            }
        }
    }

    #[test]
    fn shared_library_per_abi() {
        let plan = build(&android(&[Arch::Arm, Arch::Arm64, Arch::X86]), &options(None));

        let builds = go_calls(&plan, "build");
        let outputs: Vec<_> = builds
            .iter()
            .filter_map(|c| c.args.iter().find(|a| a.starts_with("-o=")))
            .collect();
        assert_eq!(
            outputs,
            vec![
                "-o=$WORK/android/src/main/jniLibs/armeabi-v7a/libgojni.so",
                "-o=$WORK/android/src/main/jniLibs/arm64-v8a/libgojni.so",
                "-o=$WORK/android/src/main/jniLibs/x86/libgojni.so",
            ]
        );
        assert_eq!(builds[1].env.get("GOARCH"), Some("arm64"));
        assert_eq!(builds[1].env.get("GOARM"), None);
        assert_eq!(builds[2].args[1], "-pkgdir=/gopath/pkg/gomobile/pkg_android_386");

        let installs = go_calls(&plan, "install");
        assert_eq!(installs.len(), 1);
        assert_eq!(installs[0].args[1], "-pkgdir=/gopath/pkg/gomobile/pkg_android_arm");
    }

    #[test]
    fn java_support_files_are_symlinked() {
        let plan = build(&android(&[Arch::Arm]), &options(None));
        for name in ["Seq.java", "LoadJNI.java"] {
            let link = Path::new("$WORK/android/src/main/java/go").join(name);
            let rm = position(&plan, |s| *s == Step::Remove { path: link.clone() });
            assert_eq!(
                plan.steps()[rm + 1],
                Step::Symlink {
                    target: Path::new("/gopath/src/golang.org/x/mobile/bind/java").join(name),
                    link: link.clone(),
                }
            );
            assert!(!plan.steps().iter().any(
                |s| matches!(s, Step::Copy { dst, .. } if *dst == link)
            ));
        }
    }

    #[test]
    fn go_support_files_are_copied() {
        let plan = build(&android(&[Arch::Arm]), &options(None));
        let copies: Vec<_> = plan
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::Copy { dst, .. } if dst.starts_with("$WORK/gomobile_bind") => {
                    dst.file_name().and_then(|n| n.to_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(copies, vec!["seq_android.go", "seq_android.c", "seq.h", "seq.go"]);
    }

    #[test]
    fn javac_and_jar() {
        let plan = build(&android(&[Arch::Arm]), &options(None));

        let javac = plan.commands().find(|c| c.program == "javac").unwrap();
        assert_eq!(javac.cwd.as_deref(), Some(Path::new("$WORK/android/src/main/java")));
        assert_eq!(
            javac.args,
            vec![
                "-d",
                "$WORK/javac-output",
                "-source",
                "1.7",
                "-target",
                "1.7",
                "-bootclasspath",
                "/sdk/platforms/android-23/android.jar",
                "*.java"
            ]
        );

        let jars: Vec<_> = plan.commands().filter(|c| c.program == "jar").collect();
        assert_eq!(jars[0].args, vec!["c", "-C", "$WORK/javac-output", "."]);
        assert_eq!(jars[0].stdout.as_deref(), Some(Path::new("$WORK/aar/classes.jar")));
        assert_eq!(jars[1].args, vec!["cMf", "asset.aar", "-C", "$WORK/aar", "."]);
    }

    #[test]
    fn every_directory_exists_before_use() {
        let plan = build(&android(&[Arch::Arm, Arch::X86_64]), &options(None));
        let mut made: Vec<PathBuf> = Vec::new();
        for step in plan.steps() {
            match step {
                Step::MakeDir { path } => made.push(path.clone()),
                Step::Copy { dst: file, .. }
                | Step::WriteFile { path: file, .. }
                | Step::Symlink { link: file, .. } => {
                    let parent = file.parent().unwrap();
                    assert!(
                        made.iter().any(|d| parent.starts_with(d) && d.starts_with(parent)),
                        "{} used before mkdir",
                        parent.display()
                    );
                }
                _ => {}
            }
        }
    }

    #[test]
    fn no_packages_still_binds_support_layer() {
        let opts = BindOptions::new(Vec::new(), paths());
        let plan = build(&android(&[Arch::Arm]), &opts);

        assert!(go_calls(&plan, "install").is_empty());
        assert_eq!(gobind_calls(&plan, "java").len(), 1);
        assert_eq!(gobind_calls(&plan, "go").len(), 1);
        assert_eq!(go_calls(&plan, "build").len(), 1);
    }

    #[test]
    fn build_flags_reach_go_commands() {
        let mut opts = options(None);
        opts.flags.force_rebuild = true;
        opts.flags.verbose = true;
        opts.flags.tags = vec!["netgo".into()];
        let plan = build(&android(&[Arch::Arm]), &opts);

        let build_cmd = go_calls(&plan, "build")[0];
        assert_eq!(build_cmd.args[2..6], ["-a", "-v", "-x", "-tags=netgo"]);
    }

    #[test]
    fn plan_serializes() {
        let plan = build(&android(&[Arch::Arm]), &options(None));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["header"][1][0], "WORK");
        assert_eq!(json["steps"][0]["step"], "make_dir");
    }
}

// ============================================================================
// iOS
// ============================================================================

mod ios_plan {
    use super::*;

    fn ios() -> BindTarget {
        let sdk = AppleSdk {
            developer_dir: PathBuf::from("/Xcode"),
            iphoneos: PathBuf::from("/SDKs/iPhoneOS.sdk"),
            iphonesimulator: PathBuf::from("/SDKs/iPhoneSimulator.sdk"),
            clang: PathBuf::from("/Xcode/clang"),
        };
        BindTarget::Ios {
            targets: [Arch::Arm, Arch::Arm64, Arch::X86_64]
                .into_iter()
                .map(|arch| TargetDescriptor::ios(&sdk, arch))
                .collect(),
        }
    }

    #[test]
    fn objc_generation_with_prefix() {
        let mut opts = options(None);
        opts.objc_prefix = Some("GM".into());
        let plan = build(&ios(), &opts);

        let objc = gobind_calls(&plan, "objc");
        assert_eq!(
            objc[0].args,
            vec![
                "-lang=objc",
                "-prefix=GM",
                "-outdir=$WORK/gomobile_bind",
                "golang.org/x/mobile/asset"
            ]
        );
        assert!(plan.steps().iter().any(|s| matches!(
            s,
            Step::Copy { dst, .. } if dst.ends_with("Headers/GMAsset.objc.h")
        )));
    }

    #[test]
    fn archives_per_arch_then_lipo() {
        let plan = build(&ios(), &options(None));

        let builds = go_calls(&plan, "build");
        assert_eq!(builds.len(), 3);
        assert!(builds.iter().all(|c| c.args.contains(&"-tags=ios".to_string())));
        assert!(builds.iter().all(|c| c.args.contains(&"-buildmode=c-archive".to_string())));
        assert_eq!(builds[2].env.get("GOOS"), Some("darwin"));

        let lipo = plan.commands().find(|c| c.program == "xcrun").unwrap();
        assert_eq!(
            lipo.args,
            vec![
                "lipo",
                "-create",
                "-arch",
                "armv7",
                "$WORK/Asset-arm.a",
                "-arch",
                "arm64",
                "$WORK/Asset-arm64.a",
                "-arch",
                "x86_64",
                "$WORK/Asset-amd64.a",
                "-o",
                "Asset.framework/Versions/A/Asset"
            ]
        );
    }

    #[test]
    fn framework_layout_links() {
        let plan = build(&ios(), &options(None));
        let links: Vec<_> = plan
            .steps()
            .iter()
            .filter_map(|s| match s {
                Step::Symlink { target, link } => Some((target.clone(), link.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(links[0], (PathBuf::from("A"), PathBuf::from("Asset.framework/Versions/Current")));
        assert!(links.contains(&(
            PathBuf::from("Versions/Current/Headers"),
            PathBuf::from("Asset.framework/Headers")
        )));
        let removals: Vec<_> = plan
            .steps()
            .iter()
            .filter(|s| matches!(s, Step::RemoveAll { .. }))
            .collect();
        assert_eq!(
            removals,
            vec![&Step::RemoveAll { path: PathBuf::from("Asset.framework") }]
        );
    }
}
