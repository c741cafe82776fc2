//! iOS binding: Objective-C headers over a fat static library, packaged as
//! a framework bundle.

use std::path::{Path, PathBuf};

use mobind_toolchain::TargetDescriptor;

use crate::go::{self, title};
use crate::{BindOptions, Command, Plan, WorkLayout};

/// Xcode tool runner; `lipo` is invoked through it.
pub const XCRUN: &str = "xcrun";

const GO_SUPPORT: &[(&str, &str)] = &[
    ("objc/seq_darwin.go.support", "seq_darwin.go"),
    ("objc/seq_darwin.m.support", "seq_darwin.m"),
    ("objc/seq.h", "seq.h"),
    ("seq.go.support", "seq.go"),
];

const MAIN_GO: &str = r#"package main

import (
	_ "golang.org/x/mobile/bind/objc"
	_ "../gomobile_bind"
)

func main() {}
"#;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
</dict>
</plist>
"#;

/// Plan an iOS binding.
#[must_use]
pub fn plan(targets: &[TargetDescriptor], opts: &BindOptions) -> Plan {
    let layout = WorkLayout::new(&opts.paths.work);
    let bind_dir = layout.bind_dir();
    let mut plan = Plan::new();

    plan.announce("GOMOBILE", opts.paths.gomobile.display().to_string());
    plan.announce("WORK", layout.root().display().to_string());

    plan.mkdir(&bind_dir);

    if let Some(first) = targets.first() {
        go::preinstall(&mut plan, first, opts, &layout, &[]);
    }

    // Objective-C bindings.
    let objc_flags: Vec<String> = opts
        .prefix()
        .map(|p| format!("-prefix={p}"))
        .into_iter()
        .collect();
    go::generate(
        &mut plan,
        "objc",
        &objc_flags,
        opts,
        |_| bind_dir.clone(),
        &bind_dir,
    );

    // Portable Go glue.
    go::generate(&mut plan, "go", &[], opts, |_| bind_dir.clone(), &bind_dir);
    let main_go = layout.ios_main();
    if let Some(dir) = main_go.parent() {
        plan.mkdir(dir);
    }
    plan.write(&main_go, MAIN_GO);
    go::copy_support(&mut plan, opts, &layout, GO_SUPPORT);

    let output = opts.output.clone().unwrap_or_else(|| default_output(opts));
    let framework_title = output
        .file_stem()
        .map_or_else(|| title(opts.lead_name()), |s| s.to_string_lossy().into_owned());

    // Static archive per architecture.
    let mut archives = Vec::new();
    for target in targets {
        let archive = layout.ios_archive(&framework_title, target.arch().goarch());
        let cmd = go::go_command("build", target, opts, &layout, &["ios"])
            .arg("-buildmode=c-archive")
            .arg(format!("-o={}", archive.display()))
            .arg(main_go.display().to_string());
        plan.run(cmd);
        archives.push((target.arch().clang_arch(), archive));
    }

    assemble_framework(&mut plan, &output, &framework_title, &archives, opts, &layout);
    plan
}

/// Default artifact name.
#[must_use]
pub fn default_output(opts: &BindOptions) -> PathBuf {
    PathBuf::from(format!("{}.framework", title(opts.lead_name())))
}

fn assemble_framework(
    plan: &mut Plan,
    framework: &Path,
    name: &str,
    archives: &[(&str, PathBuf)],
    opts: &BindOptions,
    layout: &WorkLayout,
) {
    let version = framework.join("Versions/A");

    plan.remove_all(framework);
    plan.mkdir(&version);
    plan.symlink("A", framework.join("Versions/Current"));

    let mut lipo = Command::new(XCRUN).args(["lipo", "-create"]);
    for (arch, archive) in archives {
        lipo = lipo.arg("-arch").arg(*arch).arg(archive.display().to_string());
    }
    plan.run(lipo.arg("-o").arg(version.join(name).display().to_string()));
    plan.symlink(Path::new("Versions/Current").join(name), framework.join(name));

    let headers = version.join("Headers");
    plan.mkdir(&headers);
    let mut objc_headers = Vec::new();
    for pkg in &opts.packages {
        let header = format!("{}{}.objc.h", opts.prefix().unwrap_or(""), title(&pkg.name));
        plan.copy(layout.bind_dir().join(&header), headers.join(&header));
        objc_headers.push(header);
    }
    plan.copy(opts.paths.bind_support.join("objc/ref.h"), headers.join("ref.h"));
    plan.write(
        headers.join(format!("{name}.h")),
        umbrella_header(name, opts, &objc_headers),
    );
    plan.symlink("Versions/Current/Headers", framework.join("Headers"));

    let resources = version.join("Resources");
    plan.mkdir(&resources);
    plan.write(resources.join("Info.plist"), INFO_PLIST);
    plan.symlink("Versions/Current/Resources", framework.join("Resources"));

    let modules = version.join("Modules");
    plan.mkdir(&modules);
    plan.write(modules.join("module.modulemap"), module_map(name));
    plan.symlink("Versions/Current/Modules", framework.join("Modules"));
}

fn umbrella_header(name: &str, opts: &BindOptions, headers: &[String]) -> String {
    let mut out = String::from("// Objective-C API for talking to the following Go packages\n//\n");
    for pkg in &opts.packages {
        out.push_str(&format!("//\t{}\n", pkg.import_path));
    }
    out.push_str("//\n// File is generated by mobind. Do not edit.\n\n");
    out.push_str(&format!(
        "#ifndef __{name}_FRAMEWORK_H__\n#define __{name}_FRAMEWORK_H__\n\n"
    ));
    out.push_str("#include \"ref.h\"\n");
    for header in headers {
        out.push_str(&format!("#include \"{header}\"\n"));
    }
    out.push_str("\n#endif\n");
    out
}

fn module_map(name: &str) -> String {
    format!(
        "framework module \"{name}\" {{\n\tumbrella header \"{name}.h\"\n\n\texport *\n\tmodule * {{ export * }}\n}}\n"
    )
}
