use std::collections::BTreeMap;

use crate::DiffError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Var(String),
}

/// Text with `{{name}}` placeholders.
///
/// Names are ASCII letters, digits and underscores; whitespace inside the
/// braces is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Malformed`] for a `{{` without a closing `}}`,
    /// or with an empty or invalid name.
    pub fn parse(source: &str) -> Result<Self, DiffError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let open = offset + start;
            let body = &rest[start + 2..];
            let Some(end) = body.find("}}") else {
                return Err(DiffError::Malformed {
                    offset: open,
                    reason: "unterminated placeholder",
                });
            };
            let name = body[..end].trim();
            if name.is_empty() {
                return Err(DiffError::Malformed {
                    offset: open,
                    reason: "empty placeholder",
                });
            }
            if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(DiffError::Malformed {
                    offset: open,
                    reason: "invalid variable name",
                });
            }
            segments.push(Segment::Var(name.to_string()));

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(Self { segments })
    }

    /// Variable names in order of first use.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Var(name) = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitute every placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::UnknownVariable`] for the first name missing
    /// from `vars`.
    pub fn render(&self, vars: &BTreeMap<String, String>) -> Result<String, DiffError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| DiffError::UnknownVariable(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn renders_placeholders() {
        let t = Template::parse("clang{{exe}} {{ goos }}-{{ndk_arch}}/bin{{exe}}").unwrap();
        assert_eq!(t.variables(), vec!["exe", "goos", "ndk_arch"]);
        let out = t
            .render(&vars(&[("exe", ".exe"), ("goos", "windows"), ("ndk_arch", "x86")]))
            .unwrap();
        assert_eq!(out, "clang.exe windows-x86/bin.exe");
    }

    #[test]
    fn single_braces_are_text() {
        let t = Template::parse("module * { export * }").unwrap();
        assert_eq!(t.render(&BTreeMap::new()).unwrap(), "module * { export * }");
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Template::parse("a {{name"),
            Err(DiffError::Malformed {
                offset: 2,
                reason: "unterminated placeholder"
            })
        );
        assert_eq!(
            Template::parse("x{{a}}{{ }}"),
            Err(DiffError::Malformed {
                offset: 6,
                reason: "empty placeholder"
            })
        );
        assert!(Template::parse("{{a-b}}").is_err());
    }

    #[test]
    fn unknown_variable() {
        let t = Template::parse("{{missing}}").unwrap();
        assert_eq!(
            t.render(&BTreeMap::new()),
            Err(DiffError::UnknownVariable("missing".into()))
        );
    }
}
