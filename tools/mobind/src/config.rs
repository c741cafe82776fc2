use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use toml_edit::{DocumentMut, Item};

/// Settings read from `mobind.toml`.
///
/// ```toml
/// [bind]
/// target = "android/arm,android/arm64"
/// javapkg = "com.example"
/// prefix = "GM"
/// output = "build/hello.aar"
/// tags = ["netgo"]
///
/// [toolchain]
/// ndk = "/opt/android-ndk"
/// android-home = "/opt/android-sdk"
/// gopath = ["/home/me/go"]
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub target: Option<String>,
    pub javapkg: Option<String>,
    pub prefix: Option<String>,
    pub output: Option<PathBuf>,
    pub tags: Vec<String>,
    pub ndk: Option<PathBuf>,
    pub android_home: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
}

impl FileConfig {
    /// Read `path`; a missing file is an empty config unless `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let doc = text.parse::<DocumentMut>()?;
        let bind = doc.get("bind");
        let toolchain = doc.get("toolchain");

        Ok(Self {
            target: string(bind, "target")?,
            javapkg: string(bind, "javapkg")?,
            prefix: string(bind, "prefix")?,
            output: string(bind, "output")?.map(PathBuf::from),
            tags: list(bind, "tags")?,
            ndk: string(toolchain, "ndk")?.map(PathBuf::from),
            android_home: string(toolchain, "android-home")?.map(PathBuf::from),
            gopath: list(toolchain, "gopath")?
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        })
    }
}

fn string(table: Option<&Item>, key: &str) -> Result<Option<String>> {
    let Some(item) = table.and_then(|t| t.get(key)) else {
        return Ok(None);
    };
    match item.as_str() {
        Some(s) => Ok(Some(s.to_string())),
        None => bail!("`{key}` must be a string"),
    }
}

/// A string array, or a single comma-separated string.
fn list(table: Option<&Item>, key: &str) -> Result<Vec<String>> {
    let Some(item) = table.and_then(|t| t.get(key)) else {
        return Ok(Vec::new());
    };
    if let Some(s) = item.as_str() {
        return Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect());
    }
    let array = item
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("`{key}` must be a string or an array of strings"))?;
    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("`{key}` entries must be strings"))
        })
        .collect()
}
