/// Clean a slash-separated import path.
///
/// Repeated separators collapse, `.` segments are dropped, `..` removes the
/// segment before it, and trailing separators go away. `..` at the start of
/// a relative path is kept; at a root it is dropped. An empty result is `.`.
#[must_use]
pub fn clean_import_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
