//! Go tool and generator invocations shared by both platforms.

use std::path::{Path, PathBuf};

use mobind_package::PackageInfo;
use mobind_toolchain::TargetDescriptor;

use crate::{BindOptions, Command, Plan, WorkLayout};

/// The binding generator executable.
pub const GOBIND: &str = "gobind";
/// The Go toolchain executable.
pub const GO: &str = "go";

/// `gobind -lang=<lang> [extra..] -outdir=<outdir> [pkg]`.
///
/// With `pkg` absent the generator emits the shared support layer.
#[must_use]
pub fn gobind(lang: &str, extra: &[String], outdir: &Path, pkg: Option<&PackageInfo>) -> Command {
    Command::new(GOBIND)
        .arg(format!("-lang={lang}"))
        .args(extra.iter().cloned())
        .arg(format!("-outdir={}", outdir.display()))
        .args(pkg.map(|p| p.import_path.clone()))
}

/// Run the generator once per package, then once for the support layer,
/// creating the output directory before every invocation.
pub fn generate<F>(
    plan: &mut Plan,
    lang: &str,
    extra: &[String],
    opts: &BindOptions,
    outdir: F,
    support_dir: &Path,
) where
    F: Fn(&PackageInfo) -> PathBuf,
{
    for pkg in &opts.packages {
        let dir = outdir(pkg);
        plan.mkdir(&dir);
        plan.run(gobind(lang, extra, &dir, Some(pkg)));
    }
    plan.mkdir(support_dir);
    plan.run(gobind(lang, extra, support_dir, None));
}

/// A `go <sub>` command cross-compiling for `target`.
#[must_use]
pub fn go_command(
    sub: &str,
    target: &TargetDescriptor,
    opts: &BindOptions,
    layout: &WorkLayout,
    extra_tags: &[&str],
) -> Command {
    let pkgdir = opts
        .paths
        .gomobile
        .join(format!("pkg_{}", target.pkg_suffix()));
    Command::new(GO)
        .arg(sub)
        .arg(format!("-pkgdir={}", pkgdir.display()))
        .args(opts.flags.to_args(extra_tags))
        .envs(target.cross_env(&layout.gen_root(), &opts.paths.gopath))
}

/// Pre-install the bound packages for `target` so later builds reuse them.
pub fn preinstall(
    plan: &mut Plan,
    target: &TargetDescriptor,
    opts: &BindOptions,
    layout: &WorkLayout,
    extra: &[&str],
) {
    if opts.packages.is_empty() {
        return;
    }
    let cmd = go_command("install", target, opts, layout, &[])
        .args(extra.iter().copied())
        .args(opts.packages.iter().map(|p| p.import_path.clone()));
    plan.run(cmd);
}

/// Copy support sources from the support package into the binding dir.
pub fn copy_support(
    plan: &mut Plan,
    opts: &BindOptions,
    layout: &WorkLayout,
    files: &[(&str, &str)],
) {
    let bind_dir = layout.bind_dir();
    plan.mkdir(&bind_dir);
    for (src, dst) in files {
        plan.copy(opts.paths.bind_support.join(src), bind_dir.join(dst));
    }
}

/// Title-case a package name for Objective-C and framework naming.
#[must_use]
pub fn title(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case() {
        assert_eq!(title("asset"), "Asset");
        assert_eq!(title("Hello"), "Hello");
        assert_eq!(title(""), "");
    }

    #[test]
    fn gobind_without_package_has_no_trailing_argument() {
        let cmd = gobind("go", &[], Path::new("/w/gomobile_bind"), None);
        assert_eq!(cmd.args, vec!["-lang=go", "-outdir=/w/gomobile_bind"]);
    }
}
