//! Android binding: Java classes plus `libgojni.so`, packaged as an AAR.

use std::path::{Path, PathBuf};

use mobind_toolchain::{MIN_ANDROID_API, TargetDescriptor};

use crate::go;
use crate::{BindOptions, Command, Plan, WorkLayout};

/// Java compiler executable.
pub const JAVAC: &str = "javac";
/// Java archiver executable.
pub const JAR: &str = "jar";

/// Java language level of the generated sources.
const JAVA_LEVEL: &str = "1.7";

/// Go and C support files, `(source in support package, name in bind dir)`.
const GO_SUPPORT: &[(&str, &str)] = &[
    ("java/seq_android.go.support", "seq_android.go"),
    ("java/seq_android.c.support", "seq_android.c"),
    ("java/seq.h", "seq.h"),
    ("seq.go.support", "seq.go"),
];

/// Java runtime classes linked, never copied, into the `go` package.
const JAVA_SUPPORT: &[&str] = &["Seq.java", "LoadJNI.java"];

const MAIN_GO: &str = r#"package main

import (
	_ "golang.org/x/mobile/bind/java"
	_ "../gomobile_bind"
)

func main() {}
"#;

/// Plan an Android binding.
///
/// `targets` holds one descriptor per ABI and must not be empty for the
/// result to contain a native build; `platform` is the SDK platform dir
/// whose `android.jar` the Java sources compile against.
#[must_use]
pub fn plan(targets: &[TargetDescriptor], platform: &Path, opts: &BindOptions) -> Plan {
    let layout = WorkLayout::new(&opts.paths.work);
    let bind_dir = layout.bind_dir();
    let mut plan = Plan::new();

    plan.announce("GOMOBILE", opts.paths.gomobile.display().to_string());
    plan.announce("WORK", layout.root().display().to_string());

    // Scratch directories.
    plan.mkdir(&bind_dir);
    plan.mkdir(layout.gen_java_dir());

    if let Some(first) = targets.first() {
        go::preinstall(
            &mut plan,
            first,
            opts,
            &layout,
            &["-gcflags=-shared", "-ldflags=-shared"],
        );
    }

    // Java bindings.
    let java_flags: Vec<String> = opts
        .java_namespace()
        .map(|ns| format!("-javapkg={ns}"))
        .into_iter()
        .collect();
    let namespace = opts.java_namespace();
    go::generate(
        &mut plan,
        "java",
        &java_flags,
        opts,
        |pkg| layout.java_package_dir(namespace, pkg),
        &layout.java_support_dir(),
    );

    // Portable Go glue.
    go::generate(&mut plan, "go", &[], opts, |_| bind_dir.clone(), &bind_dir);
    let main_go = layout.android_main();
    if let Some(dir) = main_go.parent() {
        plan.mkdir(dir);
    }
    plan.write(&main_go, MAIN_GO);
    go::copy_support(&mut plan, opts, &layout, GO_SUPPORT);

    // Shared library per ABI.
    for target in targets {
        let lib = layout.jni_library(target.abi());
        if let Some(dir) = lib.parent() {
            plan.mkdir(dir);
        }
        let cmd = go::go_command("build", target, opts, &layout, &[])
            .arg("-buildmode=c-shared")
            .arg(format!("-o={}", lib.display()))
            .arg(main_go.display().to_string());
        plan.run(cmd);
    }

    for name in JAVA_SUPPORT {
        plan.relink(
            opts.paths.bind_support.join("java").join(name),
            &layout.java_support_dir().join(name),
        );
    }

    // Compile and archive.
    let javac_out = layout.javac_output();
    plan.mkdir(&javac_out);
    plan.run(
        Command::new(JAVAC)
            .current_dir(layout.java_root())
            .arg("-d")
            .arg(javac_out.display().to_string())
            .args(["-source", JAVA_LEVEL, "-target", JAVA_LEVEL])
            .arg("-bootclasspath")
            .arg(platform.join("android.jar").display().to_string())
            .arg("*.java"),
    );

    let aar = layout.aar_dir();
    plan.mkdir(&aar);
    plan.run(
        Command::new(JAR)
            .args(["c", "-C"])
            .arg(javac_out.display().to_string())
            .arg(".")
            .stdout_to(aar.join("classes.jar")),
    );
    assemble_aar(&mut plan, targets, opts, &layout);

    plan
}

/// Default artifact name.
#[must_use]
pub fn default_output(opts: &BindOptions) -> PathBuf {
    PathBuf::from(format!("{}.aar", opts.lead_name()))
}

fn assemble_aar(
    plan: &mut Plan,
    targets: &[TargetDescriptor],
    opts: &BindOptions,
    layout: &WorkLayout,
) {
    let aar = layout.aar_dir();
    plan.write(aar.join("AndroidManifest.xml"), manifest(opts.lead_name()));
    plan.write(aar.join("R.txt"), "");
    plan.mkdir(aar.join("res"));
    for target in targets {
        let dir = aar.join("jni").join(target.abi());
        plan.mkdir(&dir);
        plan.copy(layout.jni_library(target.abi()), dir.join("libgojni.so"));
    }

    let output = opts.output.clone().unwrap_or_else(|| default_output(opts));
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        plan.mkdir(dir);
    }
    plan.run(
        Command::new(JAR)
            .arg("cMf")
            .arg(output.display().to_string())
            .arg("-C")
            .arg(aar.display().to_string())
            .arg("."),
    );
}

fn manifest(name: &str) -> String {
    format!(
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="go.{name}">
	<uses-sdk android:minSdkVersion="{MIN_ANDROID_API}"/>
</manifest>
"#
    )
}
