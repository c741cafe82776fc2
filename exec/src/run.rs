//! Real-mode step execution.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use mobind_plan::{Command, Step};
use walkdir::WalkDir;

use crate::BuildError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Perform `step`. `line` is its rendering, used in errors.
pub(crate) fn run_step(
    index: usize,
    step: &Step,
    line: &str,
    timeout: Option<Duration>,
) -> Result<(), BuildError> {
    let io_err = |source| BuildError::Io {
        index,
        step: line.to_string(),
        source,
    };
    match step {
        Step::MakeDir { path } => fs::create_dir_all(path).map_err(io_err),
        Step::RemoveAll { path } => remove_all(path).map_err(io_err),
        Step::Remove { path } => ignore_missing(fs::remove_file(path)).map_err(io_err),
        Step::Copy { src, dst } => fs::copy(src, dst).map(drop).map_err(io_err),
        Step::Symlink { target, link } => symlink(target, link).map_err(io_err),
        Step::WriteFile { path, contents } => fs::write(path, contents).map_err(io_err),
        Step::Run(cmd) => run_command(index, cmd, line, timeout),
    }
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn remove_all(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        fn symlink(target: &Path, link: &Path) -> io::Result<()> {
            std::os::unix::fs::symlink(target, link)
        }
    } else if #[cfg(windows)] {
        fn symlink(target: &Path, link: &Path) -> io::Result<()> {
            std::os::windows::fs::symlink_file(target, link)
        }
    } else {
        fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "symlinks are not supported"))
        }
    }
}

fn run_command(
    index: usize,
    cmd: &Command,
    line: &str,
    timeout: Option<Duration>,
) -> Result<(), BuildError> {
    let spawn_err = |source| BuildError::Spawn {
        index,
        program: cmd.program.clone(),
        source,
    };
    let io_err = |source| BuildError::Io {
        index,
        step: line.to_string(),
        source,
    };

    let program = which::which(&cmd.program)
        .map_err(|e| spawn_err(io::Error::new(io::ErrorKind::NotFound, e)))?;

    let mut proc = std::process::Command::new(program);
    proc.args(expand_args(&cmd.args, cmd.cwd.as_deref()).map_err(io_err)?);
    for (name, value) in cmd.env.iter() {
        proc.env(name, value);
    }
    if let Some(dir) = &cmd.cwd {
        proc.current_dir(dir);
    }

    let mut stdout = match &cmd.stdout {
        Some(path) => File::create(resolve(path, cmd.cwd.as_deref())),
        None => tempfile::tempfile(),
    }
    .map_err(io_err)?;
    let mut stderr = tempfile::tempfile().map_err(io_err)?;
    proc.stdin(Stdio::null())
        .stdout(stdout.try_clone().map_err(io_err)?)
        .stderr(stderr.try_clone().map_err(io_err)?);

    let mut child = proc.spawn().map_err(spawn_err)?;
    let status = wait(&mut child, timeout).map_err(io_err)?;
    let Some(status) = status else {
        return Err(BuildError::TimedOut {
            index,
            command: line.to_string(),
            after: timeout.unwrap_or_default(),
        });
    };
    if status.success() {
        return Ok(());
    }

    let mut output = read_back(&mut stderr).map_err(io_err)?;
    if cmd.stdout.is_none() {
        output.push_str(&read_back(&mut stdout).map_err(io_err)?);
    }
    Err(BuildError::Failed {
        index,
        command: line.to_string(),
        status: status.code(),
        output,
    })
}

/// Wait for `child`; `None` means the timeout expired and it was killed.
fn wait(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(limit) = timeout else {
        return child.wait().map(Some);
    };
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= limit {
            // The child may exit between the poll and the kill.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn read_back(file: &mut File) -> io::Result<String> {
    let mut buf = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn resolve(path: &Path, cwd: Option<&Path>) -> PathBuf {
    match cwd {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Expand `*.ext` arguments to every matching file below the working
/// directory, sorted, as relative `/`-separated paths. A pattern with no
/// match stays literal. Linked files match; linked directories are not
/// descended into.
fn expand_args(args: &[String], cwd: Option<&Path>) -> io::Result<Vec<String>> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        let Some(ext) = arg.strip_prefix("*.").filter(|e| !e.contains(['/', '*'])) else {
            out.push(arg.clone());
            continue;
        };
        let root = cwd.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let mut found = collect(&root, ext)?;
        if found.is_empty() {
            out.push(arg.clone());
        } else {
            found.sort();
            out.extend(found);
        }
    }
    Ok(out)
}

fn collect(root: &Path, ext: &str) -> io::Result<Vec<String>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_dir() || !path.is_file() {
            continue;
        }
        if path.extension().is_none_or(|e| e != ext) {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        found.push(parts.join("/"));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_expands_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("go")).unwrap();
        fs::create_dir_all(dir.path().join("asset")).unwrap();
        fs::write(dir.path().join("go/Seq.java"), "").unwrap();
        fs::write(dir.path().join("asset/Asset.java"), "").unwrap();
        fs::write(dir.path().join("asset/notes.txt"), "").unwrap();

        let args = vec!["-d".to_string(), "*.java".to_string()];
        let expanded = expand_args(&args, Some(dir.path())).unwrap();
        assert_eq!(expanded, vec!["-d", "asset/Asset.java", "go/Seq.java"]);
    }

    #[test]
    fn unmatched_glob_stays_literal() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["*.java".to_string(), "-o=*.a/x".to_string()];
        assert_eq!(expand_args(&args, Some(dir.path())).unwrap(), args);
    }

    #[cfg(unix)]
    #[test]
    fn linked_directories_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("go")).unwrap();
        fs::write(dir.path().join("go/Seq.java"), "").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("go/loop")).unwrap();

        let args = vec!["*.java".to_string()];
        let expanded = expand_args(&args, Some(dir.path())).unwrap();
        assert_eq!(expanded, vec!["go/Seq.java"]);
    }

    #[cfg(unix)]
    #[test]
    fn linked_files_are_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let support = dir.path().join("support");
        fs::create_dir_all(&support).unwrap();
        fs::create_dir_all(dir.path().join("java/go")).unwrap();
        fs::write(support.join("LoadJNI.java"), "").unwrap();
        std::os::unix::fs::symlink(
            support.join("LoadJNI.java"),
            dir.path().join("java/go/LoadJNI.java"),
        )
        .unwrap();

        let args = vec!["*.java".to_string()];
        let root = dir.path().join("java");
        assert_eq!(expand_args(&args, Some(&root)).unwrap(), vec!["go/LoadJNI.java"]);
    }

    #[test]
    fn removing_missing_paths_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(remove_all(&missing).is_ok());
        assert!(ignore_missing(fs::remove_file(&missing)).is_ok());
    }

    #[test]
    fn remove_all_handles_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();
        remove_all(&file).unwrap();
        assert!(!file.exists());
    }
}
